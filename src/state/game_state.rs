/// The aggregate root — owns every store, exposes all mutation, and maps
/// to/from the persisted save record.

use super::clock::TimeOfDay;
use super::condition::{ConditionSet, Meter};
use super::flags::FlagSet;
use super::inventory::{Inventory, ItemSlot};
use super::memory::{MemoryAnchor, MemoryLog};
use super::relationships::RelationshipSet;
use super::save::SaveRecord;

/// Meter decay applied when a night rolls over into a new dawn. Intentional
/// pacing behavior: every day she is a little less here.
const DAILY_STABILITY_DECAY: i32 = -5;
const DAILY_SHAPE_DECAY: i32 = -3;

#[derive(Debug, Clone, PartialEq)]
pub struct GameState {
    pub conditions: ConditionSet,
    pub inventory: Inventory,
    pub flags: FlagSet,
    pub relationships: RelationshipSet,
    pub memories: MemoryLog,
    pub act: u32,
    pub chapter: u32,
    pub scene: String,
    pub time_of_day: TimeOfDay,
    pub day: u32,
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}

impl GameState {
    /// Fixed new-game defaults. Item kinds are established here; dialogue
    /// effects can only add to names registered in this starting set.
    pub fn new() -> Self {
        let mut inventory = Inventory::default();
        inventory.register("water", ItemSlot::Count(3));
        inventory.register("sedative", ItemSlot::Count(1));
        inventory.register("vest", ItemSlot::Flag(false));
        inventory.register("music_box", ItemSlot::Flag(false));

        let mut relationships = RelationshipSet::default();
        relationships.set("mara", 60);

        Self {
            conditions: ConditionSet::default(),
            inventory,
            flags: FlagSet::default(),
            relationships,
            memories: MemoryLog::default(),
            act: 1,
            chapter: 1,
            scene: "bedroom".to_string(),
            time_of_day: TimeOfDay::Dawn,
            day: 1,
        }
    }

    pub fn modify_condition(&mut self, meter: Meter, delta: i32) -> i32 {
        self.conditions.modify(meter, delta)
    }

    pub fn condition(&self, meter: Meter) -> i32 {
        self.conditions.get(meter)
    }

    pub fn modify_relationship(&mut self, character: &str, delta: i32) -> i32 {
        self.relationships.modify(character, delta)
    }

    pub fn has_item(&self, name: &str) -> bool {
        self.inventory.has_item(name)
    }

    pub fn use_item(&mut self, name: &str) -> bool {
        self.inventory.use_item(name)
    }

    pub fn add_item(&mut self, name: &str, amount: u32) {
        self.inventory.add_item(name, amount);
    }

    pub fn flag(&self, name: &str) -> bool {
        self.flags.get(name)
    }

    pub fn set_flag(&mut self, name: &str, value: bool) {
        self.flags.set(name, value);
    }

    /// Record a recovered memory. Returns `false` on a duplicate id with no
    /// other effect; any condition bonus for a fresh unlock is the caller's
    /// job, guarded on this return value.
    pub fn unlock_memory(&mut self, anchor: MemoryAnchor) -> bool {
        self.memories.add(anchor)
    }

    /// Step the time-of-day cycle. Wrapping from night to dawn starts a new
    /// day and applies the daily deterioration to stability and shape
    /// integrity (clamped). Returns the new time of day.
    pub fn advance_time(&mut self) -> TimeOfDay {
        self.time_of_day = self.time_of_day.next();
        if self.time_of_day == TimeOfDay::Dawn {
            self.day += 1;
            self.conditions.modify(Meter::Stability, DAILY_STABILITY_DECAY);
            self.conditions.modify(Meter::ShapeIntegrity, DAILY_SHAPE_DECAY);
        }
        self.time_of_day
    }

    /// Produce the complete persisted record. Every field is present.
    pub fn to_record(&self) -> SaveRecord {
        SaveRecord {
            conditions: Some(self.conditions.clone().into()),
            inventory: Some(self.inventory.clone()),
            flags: Some(self.flags.clone()),
            relationships: Some(self.relationships.clone()),
            memories: Some(self.memories.clone()),
            act: Some(self.act),
            chapter: Some(self.chapter),
            scene: Some(self.scene.clone()),
            time_of_day: Some(self.time_of_day),
            day: Some(self.day),
        }
    }

    /// Restore from a record. Present fields replace the in-memory value;
    /// map-like fields shallow-merge the record's entries onto the current
    /// contents, so keys missing from an old save keep their defaults.
    /// Absent fields are left alone. Never fails: JSON decode validation
    /// belongs to [`SaveRecord::from_json`], not here.
    pub fn load_from(&mut self, record: &SaveRecord) {
        if let Some(ref rec) = record.conditions {
            if let Some(v) = rec.stability {
                self.conditions.stability = v.clamp(0, 100);
            }
            if let Some(v) = rec.lucidity {
                self.conditions.lucidity = v.clamp(0, 100);
            }
            if let Some(v) = rec.shape_integrity {
                self.conditions.shape_integrity = v.clamp(0, 100);
            }
        }
        if let Some(ref inv) = record.inventory {
            for (name, slot) in inv.iter() {
                self.inventory.register(name, slot);
            }
        }
        if let Some(ref flags) = record.flags {
            for (name, value) in flags.iter() {
                self.flags.set(name, value);
            }
        }
        if let Some(ref rel) = record.relationships {
            for (character, value) in rel.iter() {
                self.relationships.set(character, value);
            }
        }
        if let Some(ref memories) = record.memories {
            // Wholesale replacement; MemoryLog::add re-enforces id uniqueness.
            let mut log = MemoryLog::default();
            for anchor in memories.iter() {
                log.add(anchor.clone());
            }
            self.memories = log;
        }
        if let Some(act) = record.act {
            self.act = act;
        }
        if let Some(chapter) = record.chapter {
            self.chapter = chapter;
        }
        if let Some(ref scene) = record.scene {
            self.scene = scene.clone();
        }
        if let Some(time) = record.time_of_day {
            self.time_of_day = time;
        }
        if let Some(day) = record.day {
            self.day = day;
        }
    }
}
