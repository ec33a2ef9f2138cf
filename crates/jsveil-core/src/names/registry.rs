//! Session-wide record of every name that has been handed out or preserved.

use rustc_hash::FxHashSet;

/// Names already issued (or deliberately kept) in one obfuscation session.
///
/// Uniqueness is session-wide rather than per scope: later transforms may
/// hoist declarations into a shared namespace.
#[derive(Debug, Clone, Default)]
pub struct NameRegistry {
    names: FxHashSet<String>,
}

impl NameRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a name. Returns `true` if it was not present before.
    pub fn reserve(&mut self, name: impl Into<String>) -> bool {
        self.names.insert(name.into())
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.names.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }
}
