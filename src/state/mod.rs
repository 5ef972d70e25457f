//! The game-state model: condition meters, inventory, flags, relationships,
//! the memory log, and the aggregate that owns them all.

pub mod clock;
pub mod condition;
pub mod flags;
pub mod game_state;
pub mod inventory;
pub mod memory;
pub mod relationships;
pub mod save;
