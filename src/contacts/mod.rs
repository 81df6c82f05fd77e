//! Contact collection: repository, name filter, and the form gate.
//!
//! # Architecture
//!
//! ```text
//! form::validate (gate, run by the form collaborator)
//!     └── ContactRepository (owns the ordered collection)
//!             └── FilterState (owns the name filter, transient)
//! ```
//!
//! Validation happens before the repository: a rejected draft never
//! reaches it. The filtered view is derived, never stored.

mod error;
mod filter;
pub mod form;
mod repository;
mod types;

pub use error::{ContactError, Result};
pub use filter::FilterState;
pub use repository::ContactRepository;
pub use types::Contact;
