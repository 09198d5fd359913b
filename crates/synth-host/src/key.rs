//! Generation keys
//!
//! A key tags every declaration a plugin synthesizes so the same plugin's
//! body generator can recognize it later without sharing state across the
//! frontend/backend boundary.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_KEY: AtomicU64 = AtomicU64::new(1);

/// Opaque identity token carried in a synthesized symbol's origin.
///
/// Two keys are equal only if they are copies of the same `GenerationKey::new`
/// call. The label exists for diagnostics and takes no part in equality.
#[derive(Clone, Copy)]
pub struct GenerationKey {
    id: u64,
    label: &'static str,
}

impl GenerationKey {
    /// Allocate a fresh key, distinct from every other key in the process
    pub fn new(label: &'static str) -> Self {
        GenerationKey {
            id: NEXT_KEY.fetch_add(1, Ordering::Relaxed),
            label,
        }
    }

    /// Diagnostic label given at creation
    pub fn label(&self) -> &'static str {
        self.label
    }
}

impl PartialEq for GenerationKey {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for GenerationKey {}

impl std::hash::Hash for GenerationKey {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Debug for GenerationKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "GenerationKey({}#{})", self.label, self.id)
    }
}

impl fmt::Display for GenerationKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keys_are_unique() {
        let a = GenerationKey::new("Same");
        let b = GenerationKey::new("Same");
        assert_ne!(a, b);
        assert_eq!(a, a);

        let copy = a;
        assert_eq!(copy, a);
        assert_eq!(copy.label(), "Same");
    }
}
