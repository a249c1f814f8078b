//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Time only arrives through `tick`/`advance`
//! - Seeded RNG only
//! - No rendering or platform dependencies

pub mod landing;
pub mod snapshot;
pub mod state;
pub mod tick;
pub mod world;

pub use landing::{Landing, evaluate_landing};
pub use snapshot::Snapshot;
pub use state::{GameEvent, GamePhase, GameState, Platform, Stick, Tree, TreeColor};
pub use tick::{InputEvent, advance, handle_input, tick};
pub use world::{generate_platform, generate_tree};
