//! The turn engine: sole owner of the game state.
//!
//! ## Protocol
//!
//! ```text
//! Idle ──roll_dice──► Rolling ──(roll delay)──► Rolled
//!  ▲                                              │
//!  └──── select_token / end_turn ◄────────────────┘
//! ```
//!
//! - A six keeps the turn with the same player, whether they moved or passed.
//! - Any other value advances `turn_index` after the move or pass.
//! - Winners are recorded when a turn advances away from a player whose four
//!   tokens are all home.
//!
//! Invalid requests are ignored: state stays untouched and the reason is
//! logged at debug level.

use smallvec::SmallVec;
use tracing::{debug, info, instrument};

use super::autoplay::{FirstLegalMove, MovePolicy};
use super::schedule::{Scheduler, TimerKind};
use super::state::{GameState, Phase};
use crate::core::{
    ConfigError, EngineConfig, GameRng, Player, PlayerId, RandomSource, Rejection, TokenId, MAX_SEATS,
};
use crate::rules::{legal_moves, plan_move, LegalMove, ENTRY_ROLL};

/// Drives one game. Generic over the dice source so tests can script rolls.
pub struct TurnEngine<R: RandomSource = GameRng> {
    config: EngineConfig,
    state: GameState,
    rng: R,
    scheduler: Scheduler,
    auto_play: bool,
    policy: Box<dyn MovePolicy>,
}

impl TurnEngine<GameRng> {
    /// Engine with the default two players and a ChaCha8 die seeded from
    /// `config.seed`.
    pub fn new(config: EngineConfig) -> Result<Self, ConfigError> {
        let rng = GameRng::new(config.seed);
        Self::with_source(config, rng)
    }
}

impl<R: RandomSource> TurnEngine<R> {
    /// Engine with the default two players and a custom dice source.
    pub fn with_source(config: EngineConfig, rng: R) -> Result<Self, ConfigError> {
        Self::from_state(config, rng, GameState::with_default_players())
    }

    /// Engine resuming from an existing state.
    ///
    /// A state caught mid-roll is returned to `Idle`, since its timer is gone.
    pub fn from_state(config: EngineConfig, rng: R, mut state: GameState) -> Result<Self, ConfigError> {
        config.validate()?;
        if state.phase == Phase::Rolling {
            state.clear_roll();
        }
        if state.turn_index >= state.player_count() {
            state.turn_index = 0;
        }
        state.rebuild_board();

        Ok(Self {
            config,
            state,
            rng,
            scheduler: Scheduler::new(),
            auto_play: false,
            policy: Box::new(FirstLegalMove),
        })
    }

    /// Replace the autoplay policy.
    #[must_use]
    pub fn with_policy(mut self, policy: impl MovePolicy + 'static) -> Self {
        self.policy = Box::new(policy);
        self
    }

    #[must_use]
    pub fn state(&self) -> &GameState {
        &self.state
    }

    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    #[must_use]
    pub fn auto_play(&self) -> bool {
        self.auto_play
    }

    #[must_use]
    pub fn scheduler(&self) -> &Scheduler {
        &self.scheduler
    }

    #[must_use]
    pub fn rng(&self) -> &R {
        &self.rng
    }

    #[must_use]
    pub fn can_roll(&self) -> bool {
        self.state.phase == Phase::Idle && self.state.player_count() > 0
    }

    #[must_use]
    pub fn can_end_turn(&self) -> bool {
        self.state.phase == Phase::Rolled
    }

    // === Commands ===

    #[instrument(skip(self, name, color))]
    pub fn add_player(&mut self, name: impl Into<String>, color: impl Into<String>) {
        let result = self.try_add_player(name.into(), color.into());
        self.log_rejection("add_player", result);
    }

    #[instrument(skip(self))]
    pub fn remove_player(&mut self, id: &PlayerId) {
        let result = self.try_remove_player(id);
        self.log_rejection("remove_player", result);
    }

    #[instrument(skip(self))]
    pub fn randomize_seat_order(&mut self) {
        let result = self.try_randomize_seat_order();
        self.log_rejection("randomize_seat_order", result);
    }

    #[instrument(skip(self))]
    pub fn start_game(&mut self) {
        let result = self.try_start_game();
        self.log_rejection("start_game", result);
    }

    /// Back to the default two-player setup with autoplay off.
    #[instrument(skip(self))]
    pub fn reset_game(&mut self) {
        self.scheduler.cancel_all();
        self.auto_play = false;
        self.state = GameState::with_default_players();
        info!("game reset");
    }

    #[instrument(skip(self))]
    pub fn roll_dice(&mut self) {
        let result = self.try_roll_dice();
        self.log_rejection("roll_dice", result);
    }

    #[instrument(skip(self))]
    pub fn select_token(&mut self, token: TokenId) {
        let result = self.try_select_token(token);
        self.log_rejection("select_token", result);
    }

    #[instrument(skip(self))]
    pub fn end_turn(&mut self) {
        let result = self.try_end_turn();
        self.log_rejection("end_turn", result);
    }

    #[instrument(skip(self))]
    pub fn toggle_auto_play(&mut self) {
        self.auto_play = !self.auto_play;
        if self.auto_play {
            self.scheduler
                .schedule(self.config.autoplay_interval_ms, TimerKind::AutoPlayTick);
        } else {
            self.scheduler.cancel_where(TimerKind::is_autoplay);
        }
        debug!(auto_play = self.auto_play, "autoplay toggled");
    }

    /// Advance the virtual clock, firing every timer that comes due.
    pub fn advance_clock(&mut self, elapsed_ms: u64) {
        // The last instant stays out of reach so saturated timers never fire.
        let until = self.scheduler.now().saturating_add(elapsed_ms).min(u64::MAX - 1);
        while let Some((_, kind)) = self.scheduler.pop_due(until) {
            self.fire(kind);
        }
        self.scheduler.settle(until);
    }

    /// Advance the clock just far enough to settle an in-flight roll.
    pub fn settle_roll(&mut self) {
        if self.state.phase == Phase::Rolling {
            self.advance_clock(self.config.roll_delay_ms);
        }
    }

    // === Transitions ===

    fn try_add_player(&mut self, name: String, color: String) -> Result<(), Rejection> {
        self.require_not_rolling()?;
        if self.state.player_count() >= MAX_SEATS {
            return Err(Rejection::RosterFull(self.state.player_count()));
        }

        let id = self.state.allocate_player_id();
        info!(player = %id, "player joined");
        self.state.seat_player(Player::new(id, name, color));
        self.rearm_auto_play();
        Ok(())
    }

    fn try_remove_player(&mut self, id: &PlayerId) -> Result<(), Rejection> {
        self.require_not_rolling()?;
        if self.state.seat_of(id).is_none() {
            return Err(Rejection::UnknownPlayer(id.clone()));
        }
        if self.state.player_count() == 1 {
            return Err(Rejection::LastPlayer);
        }

        let before = self.roster_ids();
        self.state.unseat_player(id);
        self.return_reseated(&before);
        self.state.turn_index = 0;
        self.state.clear_roll();
        self.rearm_auto_play();
        info!(player = %id, "player left");
        Ok(())
    }

    fn roster_ids(&self) -> Vec<PlayerId> {
        self.state.players.iter().map(|p| p.id.clone()).collect()
    }

    /// Routes follow seats; unfinished tokens of players whose seat changed
    /// restart from the yard. Home tokens stay home.
    fn return_reseated(&mut self, before: &[PlayerId]) -> usize {
        let moved: Vec<PlayerId> = self
            .state
            .players
            .iter()
            .enumerate()
            .filter(|(seat, p)| before.get(*seat) != Some(&p.id))
            .map(|(_, p)| p.id.clone())
            .collect();
        for id in &moved {
            self.state.recall_unfinished(id);
        }
        moved.len()
    }

    fn try_randomize_seat_order(&mut self) -> Result<(), Rejection> {
        self.require_phase(Phase::Idle)?;

        let before = self.roster_ids();
        let mut roster: Vec<Player> = self.state.players.iter().cloned().collect();
        self.rng.shuffle(&mut roster);
        self.state.players = roster.into_iter().collect();
        self.state.turn_index = 0;
        self.state.rebuild_board();

        let reseated = self.return_reseated(&before);
        debug!(reseated, "seats shuffled");
        Ok(())
    }

    fn try_start_game(&mut self) -> Result<(), Rejection> {
        self.require_not_rolling()?;
        let needed = self.config.min_players_to_start;
        if self.state.player_count() < needed {
            return Err(Rejection::NotEnoughPlayers {
                needed,
                have: self.state.player_count(),
            });
        }

        let ids = self.roster_ids();
        for id in &ids {
            self.state.return_to_yard(id);
        }
        self.state.winners.clear();
        self.state.move_count = 0;
        self.state.turn_index = 0;
        self.state.clear_roll();

        self.scheduler.cancel_all();
        if self.auto_play {
            self.scheduler
                .schedule(self.config.autoplay_interval_ms, TimerKind::AutoPlayTick);
        }
        info!(players = ids.len(), "game started");
        Ok(())
    }

    fn try_roll_dice(&mut self) -> Result<(), Rejection> {
        self.require_phase(Phase::Idle)?;
        if self.state.player_count() == 0 {
            return Err(Rejection::NotEnoughPlayers { needed: 1, have: 0 });
        }

        self.state.phase = Phase::Rolling;
        self.scheduler
            .schedule(self.config.roll_delay_ms, TimerKind::ResolveRoll);
        Ok(())
    }

    fn resolve_roll(&mut self) {
        if self.state.phase != Phase::Rolling {
            return;
        }

        let value = self.rng.roll_die();
        self.state.dice_value = Some(value);
        self.state.phase = Phase::Rolled;
        self.state.legal_moves = self.current_legal_moves(value);
        debug!(
            player = ?self.state.current_player().map(|p| &p.id),
            value,
            movable = self.state.legal_moves.len(),
            "die settled"
        );

        if self.auto_play {
            self.scheduler
                .schedule(self.config.autoplay_move_delay_ms, TimerKind::AutoPlayMove);
        }
    }

    fn current_legal_moves(&self, dice: u8) -> SmallVec<[LegalMove; 4]> {
        let Some(player) = self.state.current_player() else {
            return SmallVec::new();
        };
        match self.state.path_of(&player.id) {
            Some(path) => legal_moves(&self.state.tokens, &player.id, dice, path),
            None => SmallVec::new(),
        }
    }

    fn try_select_token(&mut self, token_id: TokenId) -> Result<(), Rejection> {
        self.require_phase(Phase::Rolled)?;
        let dice = self.state.dice_value.ok_or(Rejection::WrongPhase(self.state.phase))?;
        let token = self
            .state
            .token(token_id)
            .ok_or(Rejection::UnknownToken(token_id))?;
        let current = self
            .state
            .current_player()
            .ok_or(Rejection::UnknownToken(token_id))?;
        if token.player != current.id {
            return Err(Rejection::NotYourToken {
                token: token_id,
                owner: token.player.clone(),
            });
        }

        let plan = self
            .state
            .path_of(&token.player)
            .and_then(|path| plan_move(token, dice, path, &self.state.tokens, self.state.board()))
            .ok_or(Rejection::NoLegalMove(token_id))?;

        for capture in &plan.captures {
            info!(token = %capture.token, owner = %capture.player, slot = capture.slot, "captured");
        }
        self.state.tokens = plan.apply(&self.state.tokens);
        self.state.move_count += 1;
        debug!(token = %token_id, to = ?plan.to, "moved");

        self.finish_action(dice);
        Ok(())
    }

    fn try_end_turn(&mut self) -> Result<(), Rejection> {
        self.require_phase(Phase::Rolled)?;
        let dice = self.state.dice_value.unwrap_or_default();
        self.finish_action(dice);
        Ok(())
    }

    /// After a move or pass: a six replays, anything else hands over.
    fn finish_action(&mut self, dice: u8) {
        if dice == ENTRY_ROLL {
            self.state.clear_roll();
        } else {
            self.advance_turn();
        }
    }

    fn advance_turn(&mut self) {
        if let Some(current) = self.state.current_player().cloned() {
            if !self.state.is_finished()
                && !self.state.is_winner(&current.id)
                && self.state.all_home(&current.id)
            {
                info!(player = %current.id, place = self.state.winners.len() + 1, "player finished");
                self.state.winners.push_back(current);
            }
        }

        let count = self.state.player_count().max(1);
        self.state.turn_index = (self.state.turn_index + 1) % count;
        self.state.clear_roll();
    }

    fn fire(&mut self, kind: TimerKind) {
        match kind {
            TimerKind::ResolveRoll => self.resolve_roll(),
            TimerKind::AutoPlayMove => self.auto_step(),
            TimerKind::AutoPlayTick => {
                self.auto_step();
                if self.auto_play && !self.state.is_finished() {
                    self.scheduler
                        .schedule(self.config.autoplay_interval_ms, TimerKind::AutoPlayTick);
                }
            }
        }
    }

    /// Restart the autoplay tick after a roster change reopens a finished game.
    fn rearm_auto_play(&mut self) {
        if self.auto_play && !self.state.is_finished() && !self.scheduler.is_pending(TimerKind::AutoPlayTick) {
            self.scheduler
                .schedule(self.config.autoplay_interval_ms, TimerKind::AutoPlayTick);
        }
    }

    /// One unattended action: roll when idle, otherwise move or pass.
    fn auto_step(&mut self) {
        if !self.auto_play || self.state.is_finished() {
            return;
        }
        match self.state.phase {
            Phase::Idle => self.roll_dice(),
            Phase::Rolling => {}
            Phase::Rolled => {
                let choice = if self.state.legal_moves.is_empty() {
                    None
                } else {
                    self.policy.choose(&self.state, &self.state.legal_moves)
                };
                match choice {
                    Some(token) => self.select_token(token),
                    None => self.end_turn(),
                }
            }
        }
    }

    // === Guards ===

    fn require_phase(&self, phase: Phase) -> Result<(), Rejection> {
        if self.state.phase == phase {
            Ok(())
        } else {
            Err(Rejection::WrongPhase(self.state.phase))
        }
    }

    fn require_not_rolling(&self) -> Result<(), Rejection> {
        if self.state.phase == Phase::Rolling {
            Err(Rejection::WrongPhase(Phase::Rolling))
        } else {
            Ok(())
        }
    }

    fn log_rejection(&self, command: &'static str, result: Result<(), Rejection>) {
        if let Err(reason) = result {
            debug!(command, %reason, "command ignored");
        }
    }
}
