use crate::error::CoreError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The lifecycle status of a stored strategy.
///
/// `Error` is a valid stored value but no operation ever moves a strategy into
/// or out of it; it can only arrive through seeded or hand-edited data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum StrategyStatus {
    Stopped,
    Running,
    Scheduled,
    Error,
}

impl StrategyStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            StrategyStatus::Stopped => "STOPPED",
            StrategyStatus::Running => "RUNNING",
            StrategyStatus::Scheduled => "SCHEDULED",
            StrategyStatus::Error => "ERROR",
        }
    }
}

impl fmt::Display for StrategyStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StrategyStatus {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "STOPPED" => Ok(StrategyStatus::Stopped),
            "RUNNING" => Ok(StrategyStatus::Running),
            "SCHEDULED" => Ok(StrategyStatus::Scheduled),
            "ERROR" => Ok(StrategyStatus::Error),
            _ => Err(CoreError::UnknownStatus(s.to_string())),
        }
    }
}

/// Severity of a synthetic strategy log line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum LogLevel {
    Info,
    Warning,
    Error,
    Trade,
}

/// Binance-style position side (hedge mode uses LONG/SHORT, one-way uses BOTH).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum PositionSide {
    Long,
    Short,
    Both,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_serializes_upper_case() {
        let json = serde_json::to_string(&StrategyStatus::Scheduled).unwrap();
        assert_eq!(json, "\"SCHEDULED\"");

        let parsed: StrategyStatus = serde_json::from_str("\"ERROR\"").unwrap();
        assert_eq!(parsed, StrategyStatus::Error);
    }

    #[test]
    fn status_rejects_unknown_values() {
        assert!(serde_json::from_str::<StrategyStatus>("\"PAUSED\"").is_err());
        assert!(matches!(
            "paused".parse::<StrategyStatus>(),
            Err(CoreError::UnknownStatus(_))
        ));
    }

    #[test]
    fn status_parses_case_insensitively() {
        assert_eq!("running".parse::<StrategyStatus>().unwrap(), StrategyStatus::Running);
        assert_eq!(StrategyStatus::Running.to_string(), "RUNNING");
    }
}
