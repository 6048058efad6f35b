//! Invariant checking for the room index and dock.
//!
//! Invariants are properties that must always hold, whatever sequence of
//! room events led to the current state. They run against an
//! [`IndexSnapshot`] and report every violation found.
//!
//! # Usage
//!
//! ```ignore
//! let registry = InvariantRegistry::standard();
//! registry.assert_all(&IndexSnapshot::from_index(&index), "after add");
//! ```

mod checks;
mod snapshot;

pub use checks::{
    CurrentInBounds, GroupsSorted, MembershipConsistency, NoDuplicates, NoEmptyUserGroups,
    RoomDataPresent, RoomsSorted, TitleMatchesRooms,
};
pub use snapshot::{DockSnapshot, IndexSnapshot};

/// Invariant check result.
pub type InvariantResult = Result<(), Violation>;

/// Invariant violation with context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    /// Name of the violated invariant.
    pub invariant: &'static str,
    /// Description of what went wrong.
    pub message: String,
}

impl std::fmt::Display for Violation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.invariant, self.message)
    }
}

impl std::error::Error for Violation {}

/// An invariant that can be checked against a snapshot.
pub trait Invariant: Send + Sync {
    /// Invariant name for error reporting.
    fn name(&self) -> &'static str;

    /// Check the invariant against a snapshot.
    ///
    /// Returns `Ok(())` if the invariant holds, or a [`Violation`]
    /// describing what went wrong.
    fn check(&self, state: &IndexSnapshot<'_>) -> InvariantResult;

    /// Build a violation of this invariant.
    fn violation(&self, message: String) -> Violation {
        Violation { invariant: self.name(), message }
    }
}

/// Registry of invariants to check.
pub struct InvariantRegistry {
    invariants: Vec<Box<dyn Invariant>>,
}

impl Default for InvariantRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl InvariantRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self { invariants: Vec::new() }
    }

    /// Create a registry with every index and dock invariant.
    ///
    /// Dock invariants pass trivially on bare index snapshots.
    pub fn standard() -> Self {
        let mut registry = Self::new();
        registry.add(MembershipConsistency);
        registry.add(RoomDataPresent);
        registry.add(GroupsSorted);
        registry.add(RoomsSorted);
        registry.add(NoEmptyUserGroups);
        registry.add(NoDuplicates);
        registry.add(CurrentInBounds);
        registry.add(TitleMatchesRooms);
        registry
    }

    /// Add an invariant to the registry.
    pub fn add<I: Invariant + 'static>(&mut self, invariant: I) {
        self.invariants.push(Box::new(invariant));
    }

    /// Check all invariants against the given snapshot.
    ///
    /// Returns `Ok(())` if all invariants hold, or all violations found.
    pub fn check_all(&self, state: &IndexSnapshot<'_>) -> Result<(), Vec<Violation>> {
        let violations: Vec<_> =
            self.invariants.iter().filter_map(|inv| inv.check(state).err()).collect();

        if violations.is_empty() { Ok(()) } else { Err(violations) }
    }

    /// Check all invariants, panicking with every violation found.
    ///
    /// Use this in tests where you want immediate failure with context.
    #[allow(clippy::panic)]
    pub fn assert_all(&self, state: &IndexSnapshot<'_>, context: &str) {
        if let Err(violations) = self.check_all(state) {
            let messages: Vec<_> = violations.iter().map(ToString::to_string).collect();
            panic!("Invariant violation {context}:\n  {}", messages.join("\n  "));
        }
    }

    /// Number of registered invariants.
    pub fn len(&self) -> usize {
        self.invariants.len()
    }

    /// Check if registry is empty.
    pub fn is_empty(&self) -> bool {
        self.invariants.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use roomdock_core::RoomGroupIndex;

    use super::*;

    #[test]
    fn standard_registry_has_invariants() {
        let registry = InvariantRegistry::standard();
        assert_eq!(registry.len(), 8);
    }

    #[test]
    fn empty_index_passes_invariants() {
        let index = RoomGroupIndex::default();
        let registry = InvariantRegistry::standard();
        assert!(registry.check_all(&IndexSnapshot::from_index(&index)).is_ok());
    }
}
