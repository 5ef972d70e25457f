/// Data-driven state mutations attached to dialogue nodes and responses.
///
/// Effects are plain data, authored in the same RON files as the nodes that
/// carry them. Applying one is synchronous and infallible; failed lookups
/// (unknown items, duplicate memories) are the same benign no-ops they are
/// on `GameState` itself. Because effects carry no code, they cannot
/// re-enter the dialogue session that applies them.

use serde::{Deserialize, Serialize};

use crate::state::condition::Meter;
use crate::state::game_state::GameState;
use crate::state::memory::MemoryAnchor;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Effect {
    /// Clamped delta to a condition meter.
    Condition { meter: Meter, delta: i32 },
    /// Clamped delta to a character's affinity.
    Relationship { character: String, delta: i32 },
    AddItem {
        item: String,
        #[serde(default = "default_amount")]
        amount: u32,
    },
    UseItem { item: String },
    SetFlag { flag: String, value: bool },
    /// Record a memory anchor. `on_new` applies only when the anchor was not
    /// already in the log, so re-unlocks never double-pay a bonus.
    UnlockMemory {
        anchor: MemoryAnchor,
        #[serde(default)]
        on_new: Vec<Effect>,
    },
    AdvanceTime,
    Seq(Vec<Effect>),
}

fn default_amount() -> u32 {
    1
}

impl Effect {
    pub fn apply(&self, state: &mut GameState) {
        match self {
            Effect::Condition { meter, delta } => {
                state.modify_condition(*meter, *delta);
            }
            Effect::Relationship { character, delta } => {
                state.modify_relationship(character, *delta);
            }
            Effect::AddItem { item, amount } => {
                state.add_item(item, *amount);
            }
            Effect::UseItem { item } => {
                state.use_item(item);
            }
            Effect::SetFlag { flag, value } => {
                state.set_flag(flag, *value);
            }
            Effect::UnlockMemory { anchor, on_new } => {
                if state.unlock_memory(anchor.clone()) {
                    for effect in on_new {
                        effect.apply(state);
                    }
                }
            }
            Effect::AdvanceTime => {
                state.advance_time();
            }
            Effect::Seq(effects) => {
                for effect in effects {
                    effect.apply(state);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn anchor(id: &str) -> MemoryAnchor {
        MemoryAnchor {
            id: id.to_string(),
            name: id.to_string(),
            description: String::new(),
        }
    }

    #[test]
    fn condition_effect_clamps() {
        let mut state = GameState::new();
        Effect::Condition {
            meter: Meter::Lucidity,
            delta: -500,
        }
        .apply(&mut state);
        assert_eq!(state.condition(Meter::Lucidity), 0);
    }

    #[test]
    fn seq_applies_in_order() {
        let mut state = GameState::new();
        Effect::Seq(vec![
            Effect::SetFlag {
                flag: "vest_worn".to_string(),
                value: true,
            },
            Effect::UseItem {
                item: "water".to_string(),
            },
        ])
        .apply(&mut state);
        assert!(state.flag("vest_worn"));
        assert_eq!(
            state.inventory.slot("water"),
            Some(crate::state::inventory::ItemSlot::Count(2))
        );
    }

    #[test]
    fn unlock_memory_bonus_only_on_first_add() {
        let mut state = GameState::new();
        let effect = Effect::UnlockMemory {
            anchor: anchor("school_recital"),
            on_new: vec![Effect::Condition {
                meter: Meter::ShapeIntegrity,
                delta: 5,
            }],
        };
        let before = state.condition(Meter::ShapeIntegrity);
        effect.apply(&mut state);
        assert_eq!(state.condition(Meter::ShapeIntegrity), before + 5);

        effect.apply(&mut state);
        assert_eq!(state.condition(Meter::ShapeIntegrity), before + 5);
        assert_eq!(state.memories.len(), 1);
    }

    #[test]
    fn advance_time_effect_steps_clock() {
        let mut state = GameState::new();
        Effect::AdvanceTime.apply(&mut state);
        assert_eq!(state.time_of_day, crate::state::clock::TimeOfDay::Day);
    }

    #[test]
    fn effect_parses_from_ron() {
        let effect: Effect =
            ron::from_str(r#"Condition(meter: lucidity, delta: -10)"#).unwrap();
        assert_eq!(
            effect,
            Effect::Condition {
                meter: Meter::Lucidity,
                delta: -10
            }
        );

        let effect: Effect = ron::from_str(r#"AddItem(item: "water")"#).unwrap();
        assert_eq!(
            effect,
            Effect::AddItem {
                item: "water".to_string(),
                amount: 1
            }
        );
    }
}
