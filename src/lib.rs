//! Vigil Engine — game-state and dialogue core for a first-person narrative game.
//!
//! Tracks a deteriorating character's condition meters, inventory, flags,
//! relationships, and recovered memories, and drives branching dialogue trees
//! whose choices mutate that state. Presentation, audio, scene loading, and
//! input capture stay behind collaborator traits supplied by the host.

pub mod dialogue;
pub mod state;
