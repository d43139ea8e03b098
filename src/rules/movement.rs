//! Move rules: yard entry, stepping along a path, and captures.
//!
//! These functions never mutate their inputs. Capture resolution returns a
//! list of `Capture` changes which `apply_captures` folds into a new token
//! collection.

use im::Vector;
use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::board::{Board, Path};
use crate::core::{Coord, PlayerId, Token, TokenId, TokenState};

/// Die value that releases a token from the yard.
pub const ENTRY_ROLL: u8 = 6;

/// Result of looking `dice` steps ahead.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Step {
    /// The token would land here.
    To(Coord),
    /// The roll overshoots the end of the path.
    NoMove,
}

impl Step {
    #[must_use]
    pub fn destination(self) -> Option<Coord> {
        match self {
            Step::To(at) => Some(at),
            Step::NoMove => None,
        }
    }
}

/// A token sent back to its yard.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Capture {
    pub token: TokenId,
    pub player: PlayerId,
    pub slot: u8,
}

/// Only a six leaves the yard.
#[must_use]
pub fn can_enter_from_yard(dice: u8) -> bool {
    dice == ENTRY_ROLL
}

/// Where `token` lands after `dice` steps along its owner's `path`.
///
/// - Board token: `Step::To` the coordinate `dice` steps ahead, or
///   `Step::NoMove` when that runs past the end of the path.
/// - Yard token: the path's entry cell, whatever the roll. Combine with
///   `can_enter_from_yard` before acting on it.
/// - `None` when the token is home or sits somewhere not on `path`.
#[must_use]
pub fn next_position(token: &Token, dice: u8, path: &Path) -> Option<Step> {
    match token.state {
        TokenState::Board { at } => {
            let index = path.index_of(at)?;
            let target = index + dice as usize;
            Some(match path.get(target) {
                Some(to) => Step::To(to),
                None => Step::NoMove,
            })
        }
        TokenState::Yard { .. } => path.entry().map(Step::To),
        TokenState::Home => None,
    }
}

fn victims<'a>(
    dest: Coord,
    moving: &'a Token,
    tokens: impl IntoIterator<Item = &'a Token>,
) -> impl Iterator<Item = &'a Token> {
    tokens
        .into_iter()
        .filter(move |t| t.is_at(dest) && t.player != moving.player)
}

/// Landing on `dest` captures when the cell is not safe and holds at least
/// one opposing board token. Same-player stacking never captures.
#[must_use]
pub fn can_capture<'a>(
    dest: Coord,
    moving: &'a Token,
    tokens: impl IntoIterator<Item = &'a Token>,
    board: &Board,
) -> bool {
    match board.cell(dest) {
        Some(cell) if !cell.safe => victims(dest, moving, tokens).next().is_some(),
        _ => false,
    }
}

/// Every opposing token on `dest`, each assigned the lowest free yard slot
/// of its owner. Victims sharing an owner get distinct slots.
///
/// Does not check cell safety; callers gate on `can_capture`.
#[must_use]
pub fn resolve_capture(
    dest: Coord,
    moving: &Token,
    tokens: &Vector<Token>,
    board: &Board,
) -> SmallVec<[Capture; 4]> {
    let mut taken: FxHashSet<(PlayerId, u8)> = tokens
        .iter()
        .filter_map(|t| t.yard_slot().map(|slot| (t.player.clone(), slot)))
        .collect();

    let mut captures = SmallVec::new();
    for victim in victims(dest, moving, tokens) {
        let slot = board
            .yard_slots(&victim.player)
            .into_iter()
            .find(|&slot| !taken.contains(&(victim.player.clone(), slot)))
            .unwrap_or(0);
        taken.insert((victim.player.clone(), slot));
        captures.push(Capture {
            token: victim.id,
            player: victim.player.clone(),
            slot,
        });
    }
    captures
}

/// Apply captures, returning the new token collection.
#[must_use]
pub fn apply_captures(tokens: &Vector<Token>, captures: &[Capture]) -> Vector<Token> {
    tokens
        .iter()
        .map(|t| match captures.iter().find(|c| c.token == t.id) {
            Some(capture) => Token {
                state: TokenState::Yard { slot: capture.slot },
                ..t.clone()
            },
            None => t.clone(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Player, Seat};

    fn board() -> Board {
        Board::new(&Player::defaults())
    }

    fn on_board(id: u32, player: &str, at: Coord) -> Token {
        Token {
            id: TokenId(id),
            player: PlayerId::from(player),
            state: TokenState::Board { at },
        }
    }

    #[test]
    fn test_can_enter_from_yard() {
        for v in 1..=6 {
            assert_eq!(can_enter_from_yard(v), v == 6);
        }
    }

    #[test]
    fn test_yard_token_targets_entry() {
        let path = Path::for_seat(Seat::new(1));
        let token = Token::in_yard(TokenId(0), PlayerId::from("P2"), 0);
        assert_eq!(next_position(&token, 6, &path), Some(Step::To(Coord::new(12, 6))));
    }

    #[test]
    fn test_off_path_and_home_are_invalid() {
        let path = Path::for_seat(Seat::new(0));
        let stray = on_board(0, "P1", Coord::new(0, 0));
        assert_eq!(next_position(&stray, 3, &path), None);

        let home = Token {
            state: TokenState::Home,
            ..stray
        };
        assert_eq!(next_position(&home, 3, &path), None);
    }

    #[test]
    fn test_exact_roll_reaches_home_cell() {
        let path = Path::for_seat(Seat::new(0));
        let last = path.len() - 1;
        let token = on_board(0, "P1", path.get(last - 4).unwrap());

        assert_eq!(next_position(&token, 4, &path), Some(Step::To(path.get(last).unwrap())));
        assert_eq!(next_position(&token, 5, &path), Some(Step::NoMove));
    }

    #[test]
    fn test_safe_cell_blocks_capture() {
        let board = board();
        let dest = Coord::new(6, 3);
        let mover = on_board(0, "P1", Coord::new(6, 2));
        let tokens = vec![mover.clone(), on_board(1, "P2", dest)];

        assert!(board.cell(dest).unwrap().safe);
        assert!(!can_capture(dest, &mover, &tokens, &board));
    }

    #[test]
    fn test_own_tokens_never_captured() {
        let board = board();
        let dest = Coord::new(5, 8);
        let mover = on_board(0, "P1", Coord::new(4, 8));
        let tokens = vec![mover.clone(), on_board(1, "P1", dest)];

        assert!(!can_capture(dest, &mover, &tokens, &board));
    }

    #[test]
    fn test_capture_skips_used_slots() {
        let board = board();
        let dest = Coord::new(5, 8);
        let mover = on_board(0, "P1", Coord::new(4, 8));
        let tokens: Vector<Token> = vec![
            mover.clone(),
            Token::in_yard(TokenId(4), PlayerId::from("P2"), 0),
            on_board(5, "P2", dest),
            on_board(6, "P2", dest),
        ]
        .into_iter()
        .collect();

        assert!(can_capture(dest, &mover, &tokens, &board));
        let captures = resolve_capture(dest, &mover, &tokens, &board);

        assert_eq!(captures.len(), 2);
        assert_eq!(captures[0].slot, 1);
        assert_eq!(captures[1].slot, 2);

        let after = apply_captures(&tokens, &captures);
        assert_eq!(after[2].state, TokenState::Yard { slot: 1 });
        assert_eq!(after[3].state, TokenState::Yard { slot: 2 });
        assert_eq!(after[0], mover);
    }
}
