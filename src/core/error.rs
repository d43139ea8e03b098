//! Error types.
//!
//! Commands from the boundary never fail loudly: a `Rejection` explains why
//! a command was ignored and is only ever logged. `ConfigError` and
//! `CodecError` are ordinary fallible-API errors.

use super::player::PlayerId;
use super::token::TokenId;

/// Why a command was ignored. State is unchanged whenever one is produced.
#[derive(thiserror::Error, Clone, Debug, PartialEq, Eq)]
pub enum Rejection {
    #[error("command not accepted in phase {0:?}")]
    WrongPhase(crate::engine::Phase),
    #[error("roster already has {0} players")]
    RosterFull(usize),
    #[error("need at least {needed} players, have {have}")]
    NotEnoughPlayers { needed: usize, have: usize },
    #[error("removing the last player is not allowed")]
    LastPlayer,
    #[error("unknown player {0}")]
    UnknownPlayer(PlayerId),
    #[error("unknown token {0}")]
    UnknownToken(TokenId),
    #[error("{token} belongs to {owner}, not the acting player")]
    NotYourToken { token: TokenId, owner: PlayerId },
    #[error("{0} has no legal destination")]
    NoLegalMove(TokenId),
}

/// Invalid `EngineConfig`.
#[derive(thiserror::Error, Clone, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("autoplay interval must be positive")]
    ZeroAutoPlayInterval,
    #[error("min players to start must be in 1..=4, got {0}")]
    MinPlayers(usize),
}

/// Failure to encode or decode boundary data.
#[derive(thiserror::Error, Debug)]
pub enum CodecError {
    #[error("encode error: {0}")]
    Encode(#[source] bincode::Error),
    #[error("decode error: {0}")]
    Decode(#[source] bincode::Error),
}
