//! Plain-data boundary around the turn engine.
//!
//! Hosts send `Command`s and render the `Snapshot` returned after each one.
//! Both are serde types, so they cross any transport unchanged.

use im::Vector;
use serde::{Deserialize, Serialize};

use super::state::Phase;
use super::turn::TurnEngine;
use crate::board::Cell;
use crate::core::{Coord, Player, PlayerId, RandomSource, Token, TokenId};

/// One input event.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Command {
    AddPlayer { name: String, color: String },
    RemovePlayer { id: PlayerId },
    RandomizeSeatOrder,
    StartGame,
    ResetGame,
    RollDice,
    SelectToken { token: TokenId },
    EndTurn,
    ToggleAutoPlay,
    /// Let `elapsed_ms` of virtual time pass, firing due timers.
    AdvanceClock { elapsed_ms: u64 },
}

/// Derived flags for the presentation layer.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UiHints {
    pub can_roll: bool,
    pub can_end_turn: bool,
    pub dice_rolling: bool,
    pub auto_play: bool,
    /// Destinations of the legal moves, in token order.
    pub highlights: Vec<Coord>,
    pub movable_tokens: Vec<TokenId>,
    pub finished: bool,
}

/// Everything a renderer needs after a command.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    pub players: Vector<Player>,
    pub cells: Vector<Cell>,
    pub tokens: Vector<Token>,
    pub turn_index: usize,
    pub current_player: Option<PlayerId>,
    pub winners: Vector<Player>,
    pub move_count: u64,
    pub phase: Phase,
    pub dice_value: Option<u8>,
    /// Virtual clock in milliseconds.
    pub clock_ms: u64,
    pub hints: UiHints,
}

impl<R: RandomSource> TurnEngine<R> {
    /// Apply one command and return the resulting snapshot.
    pub fn dispatch(&mut self, command: Command) -> Snapshot {
        match command {
            Command::AddPlayer { name, color } => self.add_player(name, color),
            Command::RemovePlayer { id } => self.remove_player(&id),
            Command::RandomizeSeatOrder => self.randomize_seat_order(),
            Command::StartGame => self.start_game(),
            Command::ResetGame => self.reset_game(),
            Command::RollDice => self.roll_dice(),
            Command::SelectToken { token } => self.select_token(token),
            Command::EndTurn => self.end_turn(),
            Command::ToggleAutoPlay => self.toggle_auto_play(),
            Command::AdvanceClock { elapsed_ms } => self.advance_clock(elapsed_ms),
        }
        self.snapshot()
    }

    /// Current state plus UI hints. Cheap: collections are shared.
    #[must_use]
    pub fn snapshot(&self) -> Snapshot {
        let state = self.state();
        let hints = UiHints {
            can_roll: self.can_roll(),
            can_end_turn: self.can_end_turn(),
            dice_rolling: state.phase == Phase::Rolling,
            auto_play: self.auto_play(),
            highlights: state.legal_moves.iter().map(|m| m.to).collect(),
            movable_tokens: state.legal_moves.iter().map(|m| m.token).collect(),
            finished: state.is_finished(),
        };

        Snapshot {
            players: state.players.clone(),
            cells: state.board().cells().clone(),
            tokens: state.tokens.clone(),
            turn_index: state.turn_index,
            current_player: state.current_player().map(|p| p.id.clone()),
            winners: state.winners.clone(),
            move_count: state.move_count,
            phase: state.phase,
            dice_value: state.dice_value,
            clock_ms: self.scheduler().now(),
            hints,
        }
    }
}
