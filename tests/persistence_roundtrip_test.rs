//! Integration tests for snapshot persistence across process restarts.
//!
//! Each test builds a container over a database file in a temporary
//! directory, mutates state, drops the container, and re-opens the same
//! file the way a fresh process would.

mod helpers;

use std::path::Path;
use std::sync::Arc;

use helpers::ScriptedApi;
use phonebook_core::auth::Credentials;
use phonebook_core::store::PersistenceAdapter;
use phonebook_core::PhonebookCore;

fn open(api: &ScriptedApi, db_path: &Path) -> PhonebookCore {
    PhonebookCore::with_parts(
        Arc::new(api.clone()),
        PersistenceAdapter::new(db_path).unwrap(),
    )
    .unwrap()
}

#[tokio::test]
async fn contacts_and_session_survive_restart() {
    let dir = tempfile::tempdir().unwrap();
    let db = dir.path().join("phonebook.db");
    let api = ScriptedApi::ok();

    let (anna_id, bob_id) = {
        let mut core = open(&api, &db);
        let anna = core.add_contact("Anna", "1234567").unwrap();
        let bob = core.add_contact("Bob", "7654321").unwrap();
        core.login(&Credentials::new("alice", "pw")).await.unwrap();
        core.verify_email("t").await.unwrap();
        (anna.id, bob.id)
    };

    let core = open(&api, &db);
    let ids: Vec<&str> = core.contacts().iter().map(|c| c.id.as_str()).collect();
    assert_eq!(ids, [anna_id.as_str(), bob_id.as_str()], "insertion order kept");
    assert!(core.is_authenticated(), "re-hydrated from persisted token");
    assert_eq!(core.session().token(), Some("tok-1"));
    assert_eq!(core.session().current_user().unwrap().username, "alice");
    assert!(core.is_verified());
}

#[tokio::test]
async fn logout_state_survives_restart() {
    let dir = tempfile::tempdir().unwrap();
    let db = dir.path().join("phonebook.db");
    let api = ScriptedApi::ok();

    {
        let mut core = open(&api, &db);
        core.login(&Credentials::new("alice", "pw")).await.unwrap();
        core.logout().unwrap();
    }

    let core = open(&api, &db);
    assert!(!core.is_authenticated());
    assert!(!core.is_verified());
}

#[test]
fn removal_survives_restart() {
    let dir = tempfile::tempdir().unwrap();
    let db = dir.path().join("phonebook.db");
    let api = ScriptedApi::ok();

    let removed_id = {
        let mut core = open(&api, &db);
        let anna = core.add_contact("Anna", "1234567").unwrap();
        core.add_contact("Juan", "7654321").unwrap();
        core.remove_contact(&anna.id).unwrap();
        anna.id
    };

    let core = open(&api, &db);
    assert_eq!(core.contacts().len(), 1);
    assert!(core.contacts().iter().all(|c| c.id != removed_id));
}

#[test]
fn filter_is_not_persisted() {
    let dir = tempfile::tempdir().unwrap();
    let db = dir.path().join("phonebook.db");
    let api = ScriptedApi::ok();

    {
        let mut core = open(&api, &db);
        core.add_contact("Anna", "1234567").unwrap();
        core.change_filter("an");
    }

    let core = open(&api, &db);
    assert_eq!(core.filter(), "", "filter is session-scoped");
    assert_eq!(core.filtered_contacts().count(), 1);
}

#[test]
fn fresh_store_starts_empty_and_anonymous() {
    let dir = tempfile::tempdir().unwrap();
    let core = open(&ScriptedApi::ok(), &dir.path().join("phonebook.db"));

    assert!(core.contacts().is_empty());
    assert!(!core.is_authenticated());
    assert!(!core.is_verified());
    assert!(core.last_error().is_none());
}
