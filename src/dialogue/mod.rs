//! The dialogue system: node graphs, RON script loading, data-driven
//! effects, and the session state machine that ticks text reveal and
//! dispatches choices.

pub mod effect;
pub mod node;
pub mod presenter;
pub mod script;
pub mod session;
