//! Legal-move enumeration and move planning.
//!
//! `plan_move` is the pure transition for a single token: it decides the
//! destination, the token's next state and any captures, without touching
//! the token collection. `MovePlan::apply` produces the next collection.

use im::Vector;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::movement::{apply_captures, can_capture, can_enter_from_yard, next_position, resolve_capture, Capture};
use crate::board::{Board, Path};
use crate::core::{Coord, PlayerId, Token, TokenId, TokenState};

/// A token that can move with the current roll, and where it would land.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LegalMove {
    pub token: TokenId,
    pub to: Coord,
    /// Leaves the yard.
    pub enters: bool,
    /// Lands on the home cell.
    pub finishes: bool,
}

/// Destination for `token` with `dice`, if the move is legal.
#[must_use]
pub fn legal_destination(token: &Token, dice: u8, path: &Path) -> Option<LegalMove> {
    if token.is_in_yard() && !can_enter_from_yard(dice) {
        return None;
    }
    let to = next_position(token, dice, path)?.destination()?;
    let finishes = token.is_on_board() && path.index_of(to).is_some_and(|i| path.is_home_step(i));

    Some(LegalMove {
        token: token.id,
        to,
        enters: token.is_in_yard(),
        finishes,
    })
}

/// Every movable token of `player`, in token order.
#[must_use]
pub fn legal_moves<'a>(
    tokens: impl IntoIterator<Item = &'a Token>,
    player: &PlayerId,
    dice: u8,
    path: &Path,
) -> SmallVec<[LegalMove; 4]> {
    tokens
        .into_iter()
        .filter(|t| &t.player == player)
        .filter_map(|t| legal_destination(t, dice, path))
        .collect()
}

/// The complete effect of committing one move.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MovePlan {
    pub token: TokenId,
    pub from: TokenState,
    pub to: TokenState,
    pub captures: SmallVec<[Capture; 4]>,
}

impl MovePlan {
    /// Apply the plan, returning the new token collection.
    ///
    /// Captures are applied before the mover occupies its destination.
    #[must_use]
    pub fn apply(&self, tokens: &Vector<Token>) -> Vector<Token> {
        let mut next = apply_captures(tokens, &self.captures);
        if let Some(index) = next.iter().position(|t| t.id == self.token) {
            next[index].state = self.to;
        }
        next
    }

    #[must_use]
    pub fn finishes(&self) -> bool {
        self.to == TokenState::Home
    }
}

/// Plan moving `token` by `dice` along `path`.
///
/// Returns `None` when the move is not legal.
#[must_use]
pub fn plan_move(token: &Token, dice: u8, path: &Path, tokens: &Vector<Token>, board: &Board) -> Option<MovePlan> {
    let legal = legal_destination(token, dice, path)?;

    if legal.finishes {
        return Some(MovePlan {
            token: token.id,
            from: token.state,
            to: TokenState::Home,
            captures: SmallVec::new(),
        });
    }

    let captures = if can_capture(legal.to, token, tokens, board) {
        resolve_capture(legal.to, token, tokens, board)
    } else {
        SmallVec::new()
    };

    Some(MovePlan {
        token: token.id,
        from: token.state,
        to: TokenState::Board { at: legal.to },
        captures,
    })
}
