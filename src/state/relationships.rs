/// Per-character affinity scores, clamped to [0, 100] like condition meters.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use super::condition::{METER_MAX, METER_MIN};

/// Affinity a character starts from the first time they are touched.
pub const DEFAULT_AFFINITY: i32 = 50;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(transparent)]
pub struct RelationshipSet {
    affinity: FxHashMap<String, i32>,
}

impl RelationshipSet {
    /// Characters never modified read as [`DEFAULT_AFFINITY`].
    pub fn get(&self, character: &str) -> i32 {
        self.affinity
            .get(character)
            .copied()
            .unwrap_or(DEFAULT_AFFINITY)
    }

    /// Apply a delta, clamping to [0, 100]. Returns the resulting value.
    /// Saturating, like [`crate::state::condition::ConditionSet::modify`].
    pub fn modify(&mut self, character: &str, delta: i32) -> i32 {
        let slot = self
            .affinity
            .entry(character.to_string())
            .or_insert(DEFAULT_AFFINITY);
        *slot = (*slot).saturating_add(delta).clamp(METER_MIN, METER_MAX);
        *slot
    }

    /// Overwrite an affinity outright, clamped. Used for starting values
    /// and save loading.
    pub fn set(&mut self, character: &str, value: i32) {
        self.affinity
            .insert(character.to_string(), value.clamp(METER_MIN, METER_MAX));
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, i32)> {
        self.affinity.iter().map(|(k, v)| (k.as_str(), *v))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_character_reads_default() {
        let rel = RelationshipSet::default();
        assert_eq!(rel.get("voss"), DEFAULT_AFFINITY);
    }

    #[test]
    fn modify_from_default_clamps() {
        let mut rel = RelationshipSet::default();
        assert_eq!(rel.modify("voss", 200), 100);
        assert_eq!(rel.modify("voss", -500), 0);
        assert_eq!(rel.modify("voss", i32::MAX), 100);
        assert_eq!(rel.modify("voss", i32::MIN), 0);
    }

    #[test]
    fn modify_accumulates() {
        let mut rel = RelationshipSet::default();
        rel.set("mara", 60);
        assert_eq!(rel.modify("mara", 10), 70);
        assert_eq!(rel.modify("mara", -5), 65);
        assert_eq!(rel.get("mara"), 65);
    }

    #[test]
    fn set_clamps() {
        let mut rel = RelationshipSet::default();
        rel.set("mara", 900);
        assert_eq!(rel.get("mara"), 100);
    }
}
