//! # QuantFlow Strategy Service
//!
//! Owns the in-memory strategy collection and is the only component allowed
//! to change it.
//!
//! ## Architectural Principles
//!
//! - **Single Owner:** The collection sits behind one async mutex. Every
//!   mutation (toggle, schedule update, both ingestion forms) holds it for the
//!   whole read-modify-persist sequence, so no reader ever observes or
//!   persists a half-applied change.
//! - **Commit After Persist:** A mutation is applied to a staged copy of the
//!   collection. The copy is written to the `database` store first and only
//!   then swapped in. A failed write leaves memory and disk at the previous
//!   snapshot.
//! - **Reads Stay In Memory:** After startup, `list`, `get` and `logs` never
//!   touch the disk.
//!
//! ## Public API
//!
//! - `StrategyService`: the owner of the collection.
//! - `lifecycle`: the pure status transition rules (`toggle`, `apply_schedule`).
//! - `logs`: deterministic synthetic activity logs.
//! - `ServiceError`: NotFound, Validation, Persistence.

pub mod error;
pub mod lifecycle;
pub mod logs;
pub mod strategy_service;

pub use error::ServiceError;
pub use lifecycle::ScheduleUpdate;
pub use strategy_service::StrategyService;
