#![warn(clippy::all, missing_docs)]

//! Core game logic for Memory Match Duel.
//!
//! This crate hosts the card and session models, the reducer-driven game
//! controller with its deferred-callback scheduler, the cue interfaces,
//! the background particle field and configuration handling used by the
//! terminal UI and any future frontends.

pub mod background;
pub mod config;
pub mod cues;
pub mod deck;
pub mod game;
pub mod models;
pub mod schedule;

pub use config::AppConfig;
pub use cues::{Burst, Cue, CueSink, Silent};
pub use deck::{Deck, DeckRng};
pub use game::{Event, GameController, GameState, Screen, Session};
pub use models::{Card, Difficulty, Mode, Outcome, Player, ThemeKind};
