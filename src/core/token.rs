//! Tokens: the four pieces each player races around the track.
//!
//! A token's location is a `TokenState`. Encoding the location as an enum
//! keeps the per-state fields mutually exclusive: only yard tokens carry a
//! slot, only board tokens carry coordinates, home tokens carry neither.

use serde::{Deserialize, Serialize};

use super::coord::Coord;
use super::player::PlayerId;

/// Tokens owned by every player.
pub const TOKENS_PER_PLAYER: usize = 4;

/// Unique token identifier, allocated sequentially by the engine.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TokenId(pub u32);

impl std::fmt::Display for TokenId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Token({})", self.0)
    }
}

/// Where a token currently is.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TokenState {
    /// Parked in its owner's yard at `slot` (0..=3).
    Yard { slot: u8 },
    /// On the track or home lane.
    Board { at: Coord },
    /// Finished. Irreversible.
    Home,
}

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Token {
    pub id: TokenId,
    pub player: PlayerId,
    pub state: TokenState,
}

impl Token {
    /// Create a token parked in its owner's yard.
    #[must_use]
    pub fn in_yard(id: TokenId, player: PlayerId, slot: u8) -> Self {
        Self {
            id,
            player,
            state: TokenState::Yard { slot },
        }
    }

    /// Board coordinates, only for tokens on the board.
    #[must_use]
    pub fn position(&self) -> Option<Coord> {
        match self.state {
            TokenState::Board { at } => Some(at),
            _ => None,
        }
    }

    /// Yard slot, only for tokens in the yard.
    #[must_use]
    pub fn yard_slot(&self) -> Option<u8> {
        match self.state {
            TokenState::Yard { slot } => Some(slot),
            _ => None,
        }
    }

    #[must_use]
    pub fn is_in_yard(&self) -> bool {
        matches!(self.state, TokenState::Yard { .. })
    }

    #[must_use]
    pub fn is_on_board(&self) -> bool {
        matches!(self.state, TokenState::Board { .. })
    }

    #[must_use]
    pub fn is_home(&self) -> bool {
        self.state == TokenState::Home
    }

    /// Check if this token sits on the board at `at`.
    #[must_use]
    pub fn is_at(&self, at: Coord) -> bool {
        self.position() == Some(at)
    }
}
