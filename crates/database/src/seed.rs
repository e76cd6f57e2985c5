use crate::DbError;
use chrono::{DateTime, Utc};
use core_types::{Strategy, StrategyStatus};
use rust_decimal_macros::dec;

const SEED_SCRIPT: &str = "def run(data):\n    # Python script here...";

fn timestamp(rfc3339: &str) -> Result<DateTime<Utc>, DbError> {
    Ok(DateTime::parse_from_rfc3339(rfc3339)?.with_timezone(&Utc))
}

/// The fixed records written to an empty store.
///
/// The content is fully deterministic (no "now" timestamps) so that two
/// fresh stores always start out identical.
pub fn seed_strategies() -> Result<Vec<Strategy>, DbError> {
    Ok(vec![
        Strategy {
            id: "1".to_string(),
            name: "双均线突破策略 (BTC)".to_string(),
            description: "基于MA5和MA20的金叉死叉进行交易，适用于趋势行情。".to_string(),
            script_content: SEED_SCRIPT.to_string(),
            status: StrategyStatus::Running,
            schedule_enabled: false,
            start_time: None,
            end_time: None,
            last_run: Some(timestamp("2024-05-10T10:00:00Z")?),
            pnl: dec!(1250.40),
            created_at: timestamp("2024-05-10T10:00:00Z")?,
        },
        Strategy {
            id: "2".to_string(),
            name: "RSI 超买超卖回归".to_string(),
            description: "当RSI > 70做空，RSI < 30做多，适用于震荡行情。".to_string(),
            script_content: SEED_SCRIPT.to_string(),
            status: StrategyStatus::Scheduled,
            schedule_enabled: true,
            start_time: Some("09:00".to_string()),
            end_time: Some("23:00".to_string()),
            last_run: None,
            pnl: dec!(-320.10),
            created_at: timestamp("2024-05-12T14:30:00Z")?,
        },
    ])
}
