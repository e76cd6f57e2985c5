use crate::error::ProviderError;
use async_trait::async_trait;
use core_types::{AccountBalance, Position};

pub mod error;
pub mod fixtures;

// --- Public API ---
pub use fixtures::FixtureClient;

/// The read-only interface for exchange account data.
///
/// The web layer only ever talks to this trait, so the static fixtures used
/// today can be swapped for a live exchange connector without touching the
/// handlers.
#[async_trait]
pub trait AccountDataProvider: Send + Sync {
    /// Fetches the futures account balance summary.
    async fn get_account_balance(&self) -> Result<AccountBalance, ProviderError>;

    /// Fetches all current open positions.
    async fn get_open_positions(&self) -> Result<Vec<Position>, ProviderError>;
}
