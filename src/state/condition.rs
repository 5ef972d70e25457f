/// Condition meters — the afflicted character's physical/mental state.

use serde::{Deserialize, Serialize};

/// Lowest value a meter can hold.
pub const METER_MIN: i32 = 0;
/// Highest value a meter can hold.
pub const METER_MAX: i32 = 100;

/// Field selector for the three condition meters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Meter {
    Stability,
    Lucidity,
    ShapeIntegrity,
}

/// The three condition meters, each invariant to [0, 100].
///
/// There is no direct setter; all mutation goes through [`ConditionSet::modify`],
/// which clamps unconditionally, so an out-of-range meter cannot occur.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConditionSet {
    pub stability: i32,
    pub lucidity: i32,
    pub shape_integrity: i32,
}

impl Default for ConditionSet {
    fn default() -> Self {
        Self {
            stability: 70,
            lucidity: 80,
            shape_integrity: 60,
        }
    }
}

impl ConditionSet {
    pub fn get(&self, meter: Meter) -> i32 {
        match meter {
            Meter::Stability => self.stability,
            Meter::Lucidity => self.lucidity,
            Meter::ShapeIntegrity => self.shape_integrity,
        }
    }

    /// Apply a delta to a meter, clamping the result to [0, 100].
    /// Any delta is accepted; returns the resulting value. Saturating, so
    /// extreme deltas clamp to the near bound instead of wrapping.
    pub fn modify(&mut self, meter: Meter, delta: i32) -> i32 {
        let slot = self.slot_mut(meter);
        *slot = (*slot).saturating_add(delta).clamp(METER_MIN, METER_MAX);
        *slot
    }

    fn slot_mut(&mut self, meter: Meter) -> &mut i32 {
        match meter {
            Meter::Stability => &mut self.stability,
            Meter::Lucidity => &mut self.lucidity,
            Meter::ShapeIntegrity => &mut self.shape_integrity,
        }
    }
}
