use crate::enums::{LogLevel, PositionSide, StrategyStatus};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A user-authored trading strategy: metadata, the script payload, and its
/// lifecycle status.
///
/// This is both the wire representation and the on-disk one, so the field
/// names must stay exactly as serialized here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Strategy {
    /// Opaque unique identifier; never changes after creation.
    pub id: String,
    pub name: String,
    pub description: String,
    /// The uploaded script, stored verbatim. It is never executed.
    pub script_content: String,
    pub status: StrategyStatus,
    pub schedule_enabled: bool,
    /// Free-form time of day, e.g. "09:00".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_time: Option<String>,
    /// Set only when the strategy is toggled into `RUNNING`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_run: Option<DateTime<Utc>>,
    #[serde(with = "rust_decimal::serde::float")]
    pub pnl: Decimal,
    pub created_at: DateTime<Utc>,
}

impl Strategy {
    /// Builds a freshly ingested strategy: stopped, unscheduled and with zero P&L.
    pub fn new(
        id: String,
        name: String,
        description: String,
        script_content: String,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            name,
            description,
            script_content,
            status: StrategyStatus::Stopped,
            schedule_enabled: false,
            start_time: None,
            end_time: None,
            last_run: None,
            pnl: Decimal::ZERO,
            created_at,
        }
    }
}

/// A single line of synthetic strategy activity. Never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogEntry {
    pub id: String,
    pub timestamp: DateTime<Utc>,
    pub level: LogLevel,
    pub message: String,
}

/// USDT-margined futures account summary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountBalance {
    #[serde(with = "rust_decimal::serde::float")]
    pub total_wallet_balance: Decimal,
    #[serde(rename = "unrealizedPNL", with = "rust_decimal::serde::float")]
    pub unrealized_pnl: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub margin_balance: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub available_balance: Decimal,
}

/// An open futures position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Position {
    pub symbol: String,
    pub position_side: PositionSide,
    #[serde(with = "rust_decimal::serde::float")]
    pub entry_price: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub mark_price: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
    pub leverage: u32,
    #[serde(rename = "unrealizedPNL", with = "rust_decimal::serde::float")]
    pub unrealized_pnl: Decimal,
    /// Return on equity, in percent.
    #[serde(with = "rust_decimal::serde::float")]
    pub roe: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub liquidation_price: Decimal,
}
