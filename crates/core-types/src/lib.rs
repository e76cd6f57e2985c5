//! # QuantFlow Core Types
//!
//! The shared vocabulary of the workspace: the `Strategy` record and its
//! lifecycle status, synthetic log entries, and the read-only account
//! fixtures served alongside them.
//!
//! Every struct serializes with the exact camelCase field names used both on
//! the wire and in the on-disk store, so a `Strategy` read from disk can be
//! returned to a client unchanged.

pub mod enums;
pub mod error;
pub mod structs;

// Re-export the core types to provide a clean public API.
pub use enums::{LogLevel, PositionSide, StrategyStatus};
pub use error::CoreError;
pub use structs::{AccountBalance, LogEntry, Position, Strategy};
