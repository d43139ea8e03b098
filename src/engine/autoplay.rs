//! Move choice for unattended play.

use crate::core::TokenId;
use crate::rules::LegalMove;

use super::state::GameState;

/// Picks which token to move when the engine plays by itself.
pub trait MovePolicy: Send + Sync {
    /// Choose one of `moves`, or `None` to pass.
    ///
    /// `moves` is never empty.
    fn choose(&self, state: &GameState, moves: &[LegalMove]) -> Option<TokenId>;
}

/// Moves the first movable token in token order.
#[derive(Clone, Debug, Default)]
pub struct FirstLegalMove;

impl MovePolicy for FirstLegalMove {
    fn choose(&self, _state: &GameState, moves: &[LegalMove]) -> Option<TokenId> {
        moves.first().map(|m| m.token)
    }
}

/// Prefers finishing, then leaving the yard, then the first move.
#[derive(Clone, Debug, Default)]
pub struct PreferProgress;

impl MovePolicy for PreferProgress {
    fn choose(&self, _state: &GameState, moves: &[LegalMove]) -> Option<TokenId> {
        moves
            .iter()
            .find(|m| m.finishes)
            .or_else(|| moves.iter().find(|m| m.enters))
            .or_else(|| moves.first())
            .map(|m| m.token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Coord;

    fn mv(id: u32, enters: bool, finishes: bool) -> LegalMove {
        LegalMove {
            token: TokenId(id),
            to: Coord::new(6, 2),
            enters,
            finishes,
        }
    }

    #[test]
    fn test_first_legal_move() {
        let state = GameState::default();
        let moves = [mv(3, false, false), mv(1, true, false)];
        assert_eq!(FirstLegalMove.choose(&state, &moves), Some(TokenId(3)));
    }

    #[test]
    fn test_prefer_progress() {
        let state = GameState::default();
        let moves = [mv(0, false, false), mv(1, true, false), mv(2, false, true)];
        assert_eq!(PreferProgress.choose(&state, &moves), Some(TokenId(2)));
        assert_eq!(PreferProgress.choose(&state, &moves[..2]), Some(TokenId(1)));
    }
}
