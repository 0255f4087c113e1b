//! # Id
//!
//! Identity of a stored frame or circle.
//!
//! Ids are assigned by the record store, never by the core. The memory
//! adapter hands them out per table in creation order, so ordering by id is
//! ordering by creation.

use serde::{Deserialize, Serialize};

/// Opaque identity of a persisted record
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Debug, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Id(u64);

impl Id {
    /// Create an Id from its raw value
    pub fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// Get the raw value
    pub fn get(&self) -> u64 {
        self.0
    }

    /// The id following this one in a store sequence
    pub fn next(&self) -> Self {
        Self(self.0 + 1)
    }
}

impl From<u64> for Id {
    fn from(raw: u64) -> Self {
        Self(raw)
    }
}

impl std::fmt::Display for Id {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_ordering_follows_sequence() {
        let first = Id::new(1);
        let second = first.next();

        assert!(second > first);
        assert_eq!(second.get(), 2);
    }

    #[test]
    fn test_id_display() {
        assert_eq!(format!("{}", Id::from(42)), "42");
    }

    #[test]
    fn test_id_serializes_as_number() {
        let json = serde_json::to_string(&Id::new(7)).unwrap();
        assert_eq!(json, "7");

        let back: Id = serde_json::from_str("7").unwrap();
        assert_eq!(back, Id::new(7));
    }
}
