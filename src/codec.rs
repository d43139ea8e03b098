//! Binary encoding for the command/snapshot boundary.
//!
//! ```
//! use rust_ludo::codec::{decode_command, encode_command};
//! use rust_ludo::Command;
//!
//! let bytes = encode_command(&Command::RollDice).unwrap();
//! assert_eq!(decode_command(&bytes).unwrap(), Command::RollDice);
//! ```

use crate::core::CodecError;
use crate::engine::{Command, Snapshot};

pub fn encode_command(command: &Command) -> Result<Vec<u8>, CodecError> {
    bincode::serialize(command).map_err(CodecError::Encode)
}

pub fn decode_command(bytes: &[u8]) -> Result<Command, CodecError> {
    bincode::deserialize(bytes).map_err(CodecError::Decode)
}

pub fn encode_snapshot(snapshot: &Snapshot) -> Result<Vec<u8>, CodecError> {
    bincode::serialize(snapshot).map_err(CodecError::Encode)
}

pub fn decode_snapshot(bytes: &[u8]) -> Result<Snapshot, CodecError> {
    bincode::deserialize(bytes).map_err(CodecError::Decode)
}
