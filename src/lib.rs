// Allow unwrap and unreadable literals in tests (test code is not production)
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::unreadable_literal))]
//! Delve: a deterministic, turn-based grid exploration game engine.
//!
//! The player walks a grid of optional tile contents. Stepping onto a
//! creature starts a fight (or an optional hunt), a resource offers a harvest
//! step, and a shop offers stat boosts for inventory items. Defeating the
//! unique boss wins; dying loses.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────┐
//! │   CLI (play / run / survey)         │
//! ├─────────────────────────────────────┤
//! │   Survey runner   │  Text renderer  │
//! ├─────────────────────────────────────┤
//! │   Game engine (turns, interactions) │
//! ├─────────────────────────────────────┤
//! │   Dice (seeded or scripted)         │
//! └─────────────────────────────────────┘
//! ```
//!
//! All randomness flows through one [`game::Dice`] stream, so a seed fully
//! determines a session for a given sequence of decisions.

pub mod game;
pub mod render;
pub mod survey;

// Re-export key game types at crate root for convenience
pub use game::{
    Command, Controller, Coord, Direction, GameConfig, GameEvent, GameState, Grid, Player,
    Status, TileContent, TurnOutcome, TurnReport,
};
