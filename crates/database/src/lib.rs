//! # QuantFlow Database Crate
//!
//! This crate owns the durable representation of the strategy collection. It
//! is the system's "permanent archive."
//!
//! ## Architectural Principles
//!
//! - **Whole-Collection Snapshots:** The store is one JSON array holding every
//!   strategy. Each save rewrites the whole document; there are no deltas.
//!   This is deliberate at the current scale and would need revisiting for
//!   large collections.
//! - **Atomic Replacement:** A save writes a sibling temporary file, syncs it
//!   and renames it over the live file, so a concurrent reader sees either the
//!   old snapshot or the new one, never a torn file.
//! - **Seed on Empty:** Loading from a location with no store file writes a
//!   fixed two-record seed set and returns it, so subsequent loads are stable.
//!
//! ## Public API
//!
//! - `StrategyRepository`: load/save of the full collection at a given path.
//! - `seed_strategies`: the fixed seed set written on first load.
//! - `DbError`: The specific error types that can be returned from this crate.

// Declare the modules that constitute this crate.
pub mod error;
pub mod repository;
pub mod seed;

// Re-export the key components to create a clean, public-facing API.
pub use error::DbError;
pub use repository::StrategyRepository;
pub use seed::seed_strategies;
