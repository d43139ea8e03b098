//! The stateful side of the crate.
//!
//! - `state`: the authoritative `GameState`
//! - `turn`: `TurnEngine`, the only thing that mutates it
//! - `schedule`: virtual-clock timers for roll delays and autoplay
//! - `autoplay`: move policies for unattended play
//! - `command`: the `Command`/`Snapshot` boundary

pub mod state;
pub mod schedule;
pub mod autoplay;
pub mod turn;
pub mod command;

pub use state::{GameState, Phase};
pub use schedule::{Scheduler, TimerId, TimerKind};
pub use autoplay::{FirstLegalMove, MovePolicy, PreferProgress};
pub use turn::TurnEngine;
pub use command::{Command, Snapshot, UiHints};
