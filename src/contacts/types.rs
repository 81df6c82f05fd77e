//! Core types for the contact collection.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A single phonebook entry.
///
/// The id is generated client-side at creation, is unique within the
/// collection, and never changes. Names and numbers carry no
/// uniqueness requirement; two contacts may share both.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
    /// Opaque unique identifier (UUID v4).
    pub id: String,
    /// Display name.
    pub name: String,
    /// Phone number as entered.
    pub number: String,
}

impl Contact {
    /// Creates a contact with a freshly generated id.
    #[must_use]
    pub fn new(name: impl Into<String>, number: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name: name.into(),
            number: number.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_generates_distinct_ids() {
        let a = Contact::new("Alice", "+1 234-567-8901");
        let b = Contact::new("Alice", "+1 234-567-8901");

        assert!(!a.id.is_empty());
        assert_ne!(a.id, b.id, "ids must be unique even for equal fields");
    }

    #[test]
    fn serde_roundtrip_preserves_fields() {
        let contact = Contact::new("Bob", "067-123-4567");
        let json = serde_json::to_string(&contact).unwrap();
        let back: Contact = serde_json::from_str(&json).unwrap();
        assert_eq!(contact, back);
    }
}
