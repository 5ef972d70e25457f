/// Save records — the persisted shape of [`GameState`] and its JSON codec.
///
/// Every field is optional so older saves missing newer fields load cleanly;
/// there is no version field. [`crate::state::game_state::GameState::load_from`]
/// decides replace vs. merge per field.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::clock::TimeOfDay;
use super::condition::ConditionSet;
use super::flags::FlagSet;
use super::inventory::Inventory;
use super::memory::MemoryLog;
use super::relationships::RelationshipSet;

#[derive(Debug, Error)]
pub enum SaveError {
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Per-meter optional so a save written before a meter existed merges onto
/// the current defaults instead of zeroing it.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ConditionRecord {
    pub stability: Option<i32>,
    pub lucidity: Option<i32>,
    pub shape_integrity: Option<i32>,
}

impl From<ConditionSet> for ConditionRecord {
    fn from(c: ConditionSet) -> Self {
        Self {
            stability: Some(c.stability),
            lucidity: Some(c.lucidity),
            shape_integrity: Some(c.shape_integrity),
        }
    }
}

/// The plain persisted record. `to_record` fills every field; hand-edited or
/// older saves may omit any of them.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SaveRecord {
    pub conditions: Option<ConditionRecord>,
    pub inventory: Option<Inventory>,
    pub flags: Option<FlagSet>,
    pub relationships: Option<RelationshipSet>,
    pub memories: Option<MemoryLog>,
    pub act: Option<u32>,
    pub chapter: Option<u32>,
    pub scene: Option<String>,
    pub time_of_day: Option<TimeOfDay>,
    pub day: Option<u32>,
}

impl SaveRecord {
    pub fn to_json(&self) -> Result<String, SaveError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(input: &str) -> Result<SaveRecord, SaveError> {
        Ok(serde_json::from_str(input)?)
    }

    pub fn write_file(&self, path: &Path) -> Result<(), SaveError> {
        std::fs::write(path, self.to_json()?)?;
        Ok(())
    }

    pub fn read_file(path: &Path) -> Result<SaveRecord, SaveError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json(&contents)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::condition::Meter;
    use crate::state::game_state::GameState;
    use crate::state::inventory::ItemSlot;
    use crate::state::memory::MemoryAnchor;

    #[test]
    fn record_round_trip_preserves_state() {
        let mut state = GameState::new();
        state.modify_condition(Meter::Lucidity, -17);
        state.use_item("water");
        state.set_flag("met_the_doctor", true);
        state.modify_relationship("mara", 8);
        state.unlock_memory(MemoryAnchor {
            id: "school_recital".to_string(),
            name: "The School Recital".to_string(),
            description: "Front row.".to_string(),
        });
        state.advance_time();
        state.scene = "kitchen".to_string();
        state.act = 2;

        let record = state.to_record();
        let mut restored = GameState::new();
        restored.load_from(&record);
        assert_eq!(restored, state);
    }

    #[test]
    fn json_round_trip_preserves_state() {
        let mut state = GameState::new();
        state.modify_condition(Meter::Stability, -30);
        state.add_item("water", 4);
        state.set_flag("vest_worn", true);

        let json = state.to_record().to_json().unwrap();
        let record = SaveRecord::from_json(&json).unwrap();
        let mut restored = GameState::new();
        restored.load_from(&record);
        assert_eq!(restored, state);
    }

    #[test]
    fn absent_fields_keep_in_memory_values() {
        let mut state = GameState::new();
        state.act = 3;
        state.set_flag("met_the_doctor", true);

        let record = SaveRecord {
            day: Some(9),
            ..SaveRecord::default()
        };
        state.load_from(&record);
        assert_eq!(state.day, 9);
        assert_eq!(state.act, 3);
        assert!(state.flag("met_the_doctor"));
    }

    #[test]
    fn map_fields_shallow_merge_onto_defaults() {
        // A save written before "music_box" existed should not drop it.
        let json = r#"{
            "inventory": { "water": 1 },
            "conditions": { "stability": 40 }
        }"#;
        let record = SaveRecord::from_json(json).unwrap();
        let mut state = GameState::new();
        state.load_from(&record);

        assert_eq!(state.inventory.slot("water"), Some(ItemSlot::Count(1)));
        assert_eq!(
            state.inventory.slot("music_box"),
            Some(ItemSlot::Flag(false))
        );
        assert_eq!(state.condition(Meter::Stability), 40);
        // Meters missing from the record keep their defaults.
        assert_eq!(state.condition(Meter::Lucidity), 80);
    }

    #[test]
    fn out_of_range_meters_are_clamped_on_load() {
        let json = r#"{ "conditions": { "lucidity": 9000 } }"#;
        let record = SaveRecord::from_json(json).unwrap();
        let mut state = GameState::new();
        state.load_from(&record);
        assert_eq!(state.condition(Meter::Lucidity), 100);
    }

    #[test]
    fn malformed_json_is_a_decode_error() {
        assert!(SaveRecord::from_json("{ not json").is_err());
    }

    #[test]
    fn unknown_fields_are_ignored() {
        let json = r#"{ "day": 4, "cloud_sync_id": "abc" }"#;
        let record = SaveRecord::from_json(json).unwrap();
        assert_eq!(record.day, Some(4));
    }

    #[test]
    fn inventory_serializes_as_plain_map() {
        let state = GameState::new();
        let json = state.to_record().to_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["inventory"]["water"], serde_json::json!(3));
        assert_eq!(value["inventory"]["vest"], serde_json::json!(false));
        assert_eq!(value["time_of_day"], serde_json::json!("dawn"));
    }
}
