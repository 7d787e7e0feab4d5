//! Reads a riichi mahjong table from a screenshot and suggests a discard.
//!
//! Tiles are found by template matching ([`vision`]), collected into a
//! [`GameState`], and the player's hand is handed to a heuristic
//! [`DiscardSelector`] that weighs shanten against potential han.
pub mod config;
pub mod discard;
pub mod dora;
pub mod error;
pub mod hand;
pub mod pipeline;
pub mod shanten;
pub mod state;
pub mod tile;
pub mod vision;

pub use config::Config;
pub use discard::{DiscardCandidate, DiscardSelector};
pub use error::{Error, Result};
pub use pipeline::{Analysis, TableReader};
pub use state::GameState;
pub use tile::Tile;
