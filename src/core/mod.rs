//! Core types: coordinates, players, tokens, RNG, configuration, errors.
//!
//! Everything here is plain data shared by the board, rules and engine.

pub mod coord;
pub mod player;
pub mod token;
pub mod rng;
pub mod config;
pub mod error;

pub use coord::{Coord, CELL_COUNT, GRID_SIZE};
pub use player::{Player, PlayerId, Seat, SeatMap, MAX_SEATS};
pub use token::{Token, TokenId, TokenState, TOKENS_PER_PLAYER};
pub use rng::{GameRng, GameRngState, RandomSource, ScriptedDice};
pub use config::EngineConfig;
pub use error::{CodecError, ConfigError, Rejection};
