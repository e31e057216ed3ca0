//! Update-ordering tokens for endpoint records.
//!
//! Every record arriving from the discovery feed carries a modification tag.
//! When two records describe the same backend, the tag decides which one is
//! the current truth.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Ordering capability over update tokens.
///
/// Implementations answer a single question: does `other` describe a state
/// that causally follows `self`? The registry only ever calls this; swapping
/// in a different ordering scheme does not touch the endpoint core.
pub trait Succession {
    /// Return true if `other` supersedes `self`.
    fn succeeded_by(&self, other: &Self) -> bool;
}

/// A `{guid, index}` token issued by the origin of truth.
///
/// The guid identifies one origin generation; the index counts updates within
/// it. The zero tag (empty guid) marks a record whose origin has not stamped
/// it yet.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModificationTag {
    pub guid: String,
    pub index: u32,
}

impl ModificationTag {
    /// Create a tag with an explicit guid and index.
    pub fn new(guid: impl Into<String>, index: u32) -> Self {
        Self {
            guid: guid.into(),
            index,
        }
    }

    /// Create a fresh initial tag for a new origin generation.
    pub fn random() -> Self {
        Self {
            guid: Uuid::new_v4().to_string(),
            index: 0,
        }
    }

    /// Advance the tag to its next update within the same generation.
    pub fn increment(&mut self) {
        self.index = self.index.wrapping_add(1);
    }
}

impl Succession for ModificationTag {
    fn succeeded_by(&self, other: &Self) -> bool {
        // An unstamped tag never blocks an update, in either direction.
        if self.guid.is_empty() || other.guid.is_empty() {
            return true;
        }

        // A new origin generation takes over; within one generation the
        // higher index wins.
        self.guid != other.guid || self.index < other.index
    }
}
