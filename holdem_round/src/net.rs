//! Wire framing for round events and table snapshots.
//!
//! Frames are a little-endian `u32` length prefix followed by a bincode
//! payload, the same format for every serde type.

/// Error types for framing.
pub mod errors;

/// Length-prefixed bincode frames.
pub mod frame;
