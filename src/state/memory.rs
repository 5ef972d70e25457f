/// The memory log — unlockable narrative anchors, ordered and unique by id.

use serde::{Deserialize, Serialize};

/// A recovered memory. Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemoryAnchor {
    pub id: String,
    pub name: String,
    pub description: String,
}

/// Append-only, deduplicated on `id`, iterated in unlock order.
///
/// The log holds no narrative-tuning behavior of its own: condition bonuses
/// for a newly unlocked memory are the caller's job, guarded by the return
/// value of [`MemoryLog::add`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(transparent)]
pub struct MemoryLog {
    anchors: Vec<MemoryAnchor>,
}

impl MemoryLog {
    /// Append an anchor. A duplicate id is a no-op returning `false`.
    pub fn add(&mut self, anchor: MemoryAnchor) -> bool {
        if self.has(&anchor.id) {
            return false;
        }
        self.anchors.push(anchor);
        true
    }

    pub fn has(&self, id: &str) -> bool {
        self.anchors.iter().any(|a| a.id == id)
    }

    pub fn len(&self) -> usize {
        self.anchors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.anchors.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &MemoryAnchor> {
        self.anchors.iter()
    }
}
