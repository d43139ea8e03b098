//! Authoritative game state.
//!
//! `GameState` is owned by the turn engine and handed out read-only. It uses
//! `im` persistent collections so snapshots after every command are O(1)
//! clones.

use im::Vector;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::board::{Board, Path};
use crate::core::{Player, PlayerId, Seat, Token, TokenId, TokenState, TOKENS_PER_PLAYER};
use crate::rules::LegalMove;

/// Turn phase.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Phase {
    /// Waiting for the current player to roll.
    #[default]
    Idle,
    /// A roll is in flight; every other action is refused.
    Rolling,
    /// The die has settled; the current player moves or passes.
    Rolled,
}

#[derive(Clone, Debug)]
pub struct GameState {
    /// Roster in seat order.
    pub players: Vector<Player>,
    pub tokens: Vector<Token>,
    /// Seat of the player to act.
    pub turn_index: usize,
    /// Finishers in finishing order.
    pub winners: Vector<Player>,
    pub move_count: u64,
    pub phase: Phase,
    pub dice_value: Option<u8>,
    /// Moves available for the settled roll.
    pub legal_moves: SmallVec<[LegalMove; 4]>,

    board: Board,
    next_token_id: u32,
    next_player_serial: usize,
}

impl GameState {
    /// Create a game for `players`, every token parked in its yard.
    ///
    /// Players are truncated to four seats.
    #[must_use]
    pub fn new(players: impl IntoIterator<Item = Player>) -> Self {
        let players: Vector<Player> = players.into_iter().take(crate::core::MAX_SEATS).collect();
        let mut state = Self {
            board: Board::new(&[]),
            next_player_serial: players.len() + 1,
            players: Vector::new(),
            tokens: Vector::new(),
            turn_index: 0,
            winners: Vector::new(),
            move_count: 0,
            phase: Phase::Idle,
            dice_value: None,
            legal_moves: SmallVec::new(),
            next_token_id: 0,
        };
        for player in players {
            state.seat_player(player);
        }
        state
    }

    /// Default two-player game.
    #[must_use]
    pub fn with_default_players() -> Self {
        Self::new(Player::defaults())
    }

    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[must_use]
    pub fn player_count(&self) -> usize {
        self.players.len()
    }

    #[must_use]
    pub fn current_player(&self) -> Option<&Player> {
        self.players.get(self.turn_index)
    }

    #[must_use]
    pub fn seat_of(&self, player: &PlayerId) -> Option<Seat> {
        self.players
            .iter()
            .position(|p| &p.id == player)
            .map(|i| Seat::new(i as u8))
    }

    #[must_use]
    pub fn path_of(&self, player: &PlayerId) -> Option<&Path> {
        self.board.path(self.seat_of(player)?)
    }

    #[must_use]
    pub fn token(&self, id: TokenId) -> Option<&Token> {
        self.tokens.iter().find(|t| t.id == id)
    }

    pub fn tokens_of<'a>(&'a self, player: &'a PlayerId) -> impl Iterator<Item = &'a Token> + 'a {
        self.tokens.iter().filter(move |t| &t.player == player)
    }

    /// All of the player's tokens are home.
    #[must_use]
    pub fn all_home(&self, player: &PlayerId) -> bool {
        let mut tokens = self.tokens_of(player).peekable();
        tokens.peek().is_some() && tokens.all(Token::is_home)
    }

    #[must_use]
    pub fn is_winner(&self, player: &PlayerId) -> bool {
        self.winners.iter().any(|w| &w.id == player)
    }

    /// Every player but one has finished.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.players.len() >= 2 && self.winners.len() >= self.players.len() - 1
    }

    /// Id for the next added player; never reuses a seated id.
    pub(crate) fn allocate_player_id(&mut self) -> PlayerId {
        loop {
            let id = PlayerId::numbered(self.next_player_serial);
            self.next_player_serial += 1;
            if self.seat_of(&id).is_none() {
                return id;
            }
        }
    }

    /// Append a player with four yard tokens and rebuild the board.
    pub(crate) fn seat_player(&mut self, player: Player) {
        for slot in 0..TOKENS_PER_PLAYER as u8 {
            let id = TokenId(self.next_token_id);
            self.next_token_id += 1;
            self.tokens.push_back(Token::in_yard(id, player.id.clone(), slot));
        }
        self.players.push_back(player);
        self.rebuild_board();
    }

    /// Drop a player and everything they own.
    pub(crate) fn unseat_player(&mut self, player: &PlayerId) -> Option<Player> {
        let index = self.players.iter().position(|p| &p.id == player)?;
        let removed = self.players.remove(index);
        self.tokens.retain(|t| &t.player != player);
        self.winners.retain(|w| &w.id != player);
        self.rebuild_board();
        Some(removed)
    }

    /// Park every token of `player` in the yard, slots 0..=3 in token order.
    pub(crate) fn return_to_yard(&mut self, player: &PlayerId) {
        let mut slot = 0u8;
        for token in self.tokens.iter_mut().filter(|t| &t.player == player) {
            token.state = TokenState::Yard { slot };
            slot += 1;
        }
    }

    /// Park the player's unfinished tokens in the yard, slots from 0 in token
    /// order. Home tokens stay home.
    pub(crate) fn recall_unfinished(&mut self, player: &PlayerId) {
        let mut slot = 0u8;
        for token in self
            .tokens
            .iter_mut()
            .filter(|t| &t.player == player && !t.is_home())
        {
            token.state = TokenState::Yard { slot };
            slot += 1;
        }
    }

    /// Clear the roll and its highlights.
    pub(crate) fn clear_roll(&mut self) {
        self.phase = Phase::Idle;
        self.dice_value = None;
        self.legal_moves.clear();
    }

    /// Regenerate cells and paths from the roster.
    pub(crate) fn rebuild_board(&mut self) {
        let roster: Vec<Player> = self.players.iter().cloned().collect();
        self.board = Board::new(&roster);
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::with_default_players()
    }
}
