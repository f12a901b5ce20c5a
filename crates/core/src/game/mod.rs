#![allow(missing_docs)]

//! Game state machine, reducer and controller.

pub mod controller;
pub mod reducer;
mod state;

pub use controller::{GameController, COUNTDOWN_PERIOD, DEFAULT_REVEAL_DELAY};
pub use reducer::{reduce, Effect, Event};
pub use state::{GameState, Screen, Session, LOW_TIME_SECS};
