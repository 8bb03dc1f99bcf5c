//! Buy/sell requests and receipts.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::{de, LeagueId};

/// Trade direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Buy,
    Sell,
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Buy => write!(f, "buy"),
            Side::Sell => write!(f, "sell"),
        }
    }
}

/// Body of `POST /api/stocks/buy/` and `POST /api/stocks/sell/`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TradeRequest {
    pub league_id: LeagueId,
    pub ticker: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub shares: Decimal,
}

impl TradeRequest {
    pub fn new(league_id: LeagueId, ticker: impl Into<String>, shares: Decimal) -> Self {
        Self {
            league_id,
            ticker: ticker.into(),
            shares,
        }
    }
}

/// Successful trade response.
///
/// Buys report `total_shares`/`cost`, sells report `remaining_shares`/`revenue`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct TradeReceipt {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default, deserialize_with = "de::decimal")]
    pub new_balance: Decimal,
    /// Shares held after the trade
    #[serde(
        default,
        alias = "total_shares",
        alias = "remaining_shares",
        deserialize_with = "de::decimal"
    )]
    pub shares_held: Decimal,
    /// Cash spent (buy) or received (sell)
    #[serde(default, alias = "cost", alias = "revenue", deserialize_with = "de::decimal")]
    pub amount: Decimal,
}

impl TradeReceipt {
    pub fn message_or(&self, side: Side) -> String {
        self.message.clone().unwrap_or_else(|| match side {
            Side::Buy => "Stock purchased successfully".to_string(),
            Side::Sell => "Stock sold successfully".to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_trade_request_body() {
        let id: LeagueId = "7f1c2a52-0b8e-4a5e-9c1d-3f6e2b4a9d10".parse().unwrap();
        let body = serde_json::to_value(TradeRequest::new(id, "AAA", dec!(5))).unwrap();
        assert_eq!(
            body,
            serde_json::json!({
                "league_id": "7f1c2a52-0b8e-4a5e-9c1d-3f6e2b4a9d10",
                "ticker": "AAA",
                "shares": 5.0
            })
        );
    }

    #[test]
    fn test_receipts() {
        let buy: TradeReceipt = serde_json::from_str(
            r#"{"message": "Successfully bought 5 shares of AAA", "new_balance": 9500.0,
                "total_shares": 5.0, "cost": 500.0}"#,
        )
        .unwrap();
        assert_eq!(buy.shares_held, dec!(5));
        assert_eq!(buy.amount, dec!(500));

        let sell: TradeReceipt = serde_json::from_str(
            r#"{"new_balance": 9750.0, "remaining_shares": 2.5, "revenue": 250.0}"#,
        )
        .unwrap();
        assert_eq!(sell.shares_held, dec!(2.5));
        assert_eq!(sell.amount, dec!(250));
        assert_eq!(sell.message_or(Side::Sell), "Stock sold successfully");
    }
}
