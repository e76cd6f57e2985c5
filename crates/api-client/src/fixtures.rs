use crate::AccountDataProvider;
use crate::error::ProviderError;
use async_trait::async_trait;
use core_types::{AccountBalance, Position, PositionSide};
use rust_decimal_macros::dec;

/// An `AccountDataProvider` serving fixed demo figures. It holds no state and
/// returns the same values on every call.
#[derive(Debug, Clone, Copy, Default)]
pub struct FixtureClient;

impl FixtureClient {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl AccountDataProvider for FixtureClient {
    async fn get_account_balance(&self) -> Result<AccountBalance, ProviderError> {
        Ok(AccountBalance {
            total_wallet_balance: dec!(54320.50),
            unrealized_pnl: dec!(1240.30),
            margin_balance: dec!(55560.80),
            available_balance: dec!(45000.00),
        })
    }

    async fn get_open_positions(&self) -> Result<Vec<Position>, ProviderError> {
        Ok(vec![
            Position {
                symbol: "BTCUSDT".to_string(),
                position_side: PositionSide::Long,
                entry_price: dec!(62000.50),
                mark_price: dec!(63500.00),
                amount: dec!(0.5),
                leverage: 10,
                unrealized_pnl: dec!(750.00),
                roe: dec!(12.10),
                liquidation_price: dec!(58000.00),
            },
            Position {
                symbol: "ETHUSDT".to_string(),
                position_side: PositionSide::Short,
                entry_price: dec!(3100.00),
                mark_price: dec!(3050.00),
                amount: dec!(10),
                leverage: 20,
                unrealized_pnl: dec!(500.00),
                roe: dec!(16.13),
                liquidation_price: dec!(3300.00),
            },
        ])
    }
}
