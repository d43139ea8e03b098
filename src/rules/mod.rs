//! Move rules for Ludo.
//!
//! - `movement`: yard entry, stepping along a path, captures
//! - `moves`: legal-move enumeration and pure move planning
//!
//! Nothing here holds state; the turn engine owns the game and calls in.

pub mod movement;
pub mod moves;

pub use movement::{
    apply_captures, can_capture, can_enter_from_yard, next_position, resolve_capture, Capture, Step, ENTRY_ROLL,
};
pub use moves::{legal_destination, legal_moves, plan_move, LegalMove, MovePlan};
