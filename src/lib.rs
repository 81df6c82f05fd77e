//! Phonebook Core Library
//!
//! Session and contact state synchronization for the Phonebook client.
//! This crate keeps the authenticated session and the contact list in
//! sync between the in-memory state container, the remote API, and
//! durable local storage. Rendering layers are external collaborators:
//! they dispatch intents into [`PhonebookCore`] and read state back.

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![deny(unsafe_code)]

mod api;
pub mod auth;
pub mod contacts;
pub mod store;

pub use api::{CoreError, PhonebookCore};
