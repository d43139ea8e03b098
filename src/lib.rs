//! # rust-ludo
//!
//! A deterministic Ludo rules evaluator and turn engine for 1–4 players on
//! the classic 15×15 cross board.
//!
//! ## Design Principles
//!
//! 1. **One owner**: `TurnEngine` owns the `GameState`; everything else
//!    reads it. Board topology, paths and move rules are pure functions.
//!
//! 2. **Deterministic**: dice and seat shuffles come from an injected
//!    `RandomSource`, and delays run on a virtual clock advanced by the host.
//!
//! 3. **Plain-data boundary**: hosts send `Command`s and receive `Snapshot`s,
//!    both serde types.
//!
//! ## Modules
//!
//! - `core`: coordinates, players, tokens, RNG, configuration, errors
//! - `board`: cell topology and per-seat paths
//! - `rules`: yard entry, stepping, captures, legal moves
//! - `engine`: game state, turn state machine, timers, autoplay
//! - `codec`: bincode encoding for commands and snapshots
//!
//! ## Example
//!
//! ```
//! use rust_ludo::{Command, EngineConfig, Phase, TurnEngine};
//!
//! let mut engine = TurnEngine::new(EngineConfig::default().with_seed(7)).unwrap();
//! engine.dispatch(Command::RollDice);
//! let snapshot = engine.dispatch(Command::AdvanceClock { elapsed_ms: 600 });
//! assert_eq!(snapshot.phase, Phase::Rolled);
//! ```

pub mod core;
pub mod board;
pub mod rules;
pub mod engine;
pub mod codec;

// Re-export commonly used types
pub use crate::core::{
    Coord, Player, PlayerId, Seat, SeatMap,
    Token, TokenId, TokenState,
    GameRng, GameRngState, RandomSource, ScriptedDice,
    EngineConfig, CodecError, ConfigError, Rejection,
};

pub use crate::board::{Board, Cell, CellKind, Path};

pub use crate::rules::{LegalMove, MovePlan};

pub use crate::engine::{
    Command, Snapshot, UiHints,
    GameState, Phase, TurnEngine,
    MovePolicy, FirstLegalMove, PreferProgress,
    Scheduler, TimerKind,
};
