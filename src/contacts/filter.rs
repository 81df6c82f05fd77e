//! Name filter state.

/// Owner of the current contact name filter.
///
/// A single string, empty by default, matched case-insensitively as a
/// substring against contact names. Transient: never persisted, reset
/// on every process start.
#[derive(Debug, Clone, Default)]
pub struct FilterState {
    name: String,
}

impl FilterState {
    /// Creates an empty filter.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            name: String::new(),
        }
    }

    /// Replaces the filter string.
    pub fn set(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    /// The current filter string.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Whether the given contact name passes the filter.
    ///
    /// Empty filter matches everything.
    #[must_use]
    pub fn matches(&self, contact_name: &str) -> bool {
        if self.name.is_empty() {
            return true;
        }
        contact_name
            .to_lowercase()
            .contains(&self.name.to_lowercase())
    }
}
