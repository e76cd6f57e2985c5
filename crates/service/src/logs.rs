use chrono::{DateTime, Duration, Utc};
use core_types::{LogEntry, LogLevel};

/// Number of entries returned per request.
pub const LOG_ENTRY_COUNT: usize = 20;

/// Level of the `index`-th entry. The WARNING rule is checked first, so index 0
/// is a warning even though it is also a multiple of 7.
pub fn level_for_index(index: usize) -> LogLevel {
    if index % 10 == 0 {
        LogLevel::Warning
    } else if index % 7 == 0 {
        LogLevel::Trade
    } else {
        LogLevel::Info
    }
}

pub fn message_for(level: LogLevel) -> &'static str {
    match level {
        LogLevel::Trade => "执行信号: 买入 BTCUSDT @ 62300",
        LogLevel::Warning => "API 延迟稍高 (450ms)，正在重试...",
        LogLevel::Error => "连接 WebSocket 失败",
        LogLevel::Info => "正在计算指标 MA(20)... 策略心跳正常。",
    }
}

/// Builds the synthetic activity log for a strategy: one entry per minute
/// going back from `now`, newest first.
pub fn synthetic_logs(strategy_id: &str, now: DateTime<Utc>) -> Vec<LogEntry> {
    (0..LOG_ENTRY_COUNT)
        .map(|i| {
            let level = level_for_index(i);
            LogEntry {
                id: format!("{strategy_id}-{i}"),
                timestamp: now - Duration::minutes(i as i64),
                level,
                message: message_for(level).to_string(),
            }
        })
        .collect()
}
