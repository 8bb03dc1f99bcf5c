//! Holdings in a league.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Deserializer, Serialize};

use super::de;

/// Cash every participant starts a league with.
pub const STARTING_BALANCE: Decimal = dec!(10000);

/// One owned stock in a league.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Holding {
    pub ticker: String,
    #[serde(default)]
    pub name: String,
    #[serde(default, deserialize_with = "de::decimal")]
    pub shares: Decimal,
    /// Average purchase price per share
    #[serde(default, deserialize_with = "de::decimal")]
    pub avg_price_per_share: Decimal,
    #[serde(default, deserialize_with = "de::decimal")]
    pub current_price: Decimal,
    #[serde(default, deserialize_with = "de::decimal")]
    pub start_price: Decimal,
    #[serde(default, deserialize_with = "de::opt_decimal", skip_serializing_if = "Option::is_none")]
    pub daily_change: Option<Decimal>,
    #[serde(default, deserialize_with = "de::opt_decimal", skip_serializing_if = "Option::is_none")]
    pub daily_change_percent: Option<Decimal>,
}

impl Holding {
    /// Market value (shares * current_price).
    pub fn market_value(&self) -> Decimal {
        self.shares * self.current_price
    }

    /// All-time profit against the average purchase price.
    ///
    /// `None` when no purchase price is known.
    pub fn all_time_profit(&self) -> Option<Decimal> {
        if self.avg_price_per_share <= Decimal::ZERO {
            return None;
        }
        Some((self.current_price - self.avg_price_per_share) * self.shares)
    }

    /// All-time profit as a percentage of the average purchase price.
    pub fn all_time_profit_percent(&self) -> Option<Decimal> {
        if self.avg_price_per_share <= Decimal::ZERO {
            return None;
        }
        Some(
            (self.current_price - self.avg_price_per_share) / self.avg_price_per_share
                * Decimal::ONE_HUNDRED,
        )
    }
}

/// Response of `GET /api/owned-stocks/{league}/`.
///
/// Older servers answered with a bare array of holdings; both shapes are accepted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Holdings {
    pub stocks: Vec<Holding>,
    pub current_balance: Decimal,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_stock_value: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub net_worth: Option<Decimal>,
}

#[derive(Deserialize)]
struct HoldingsObject {
    #[serde(default)]
    stocks: Vec<Holding>,
    #[serde(default, deserialize_with = "de::decimal")]
    current_balance: Decimal,
    #[serde(default, deserialize_with = "de::opt_decimal")]
    total_stock_value: Option<Decimal>,
    #[serde(default, deserialize_with = "de::opt_decimal")]
    net_worth: Option<Decimal>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum HoldingsWire {
    Object(HoldingsObject),
    Legacy(Vec<Holding>),
}

impl<'de> Deserialize<'de> for Holdings {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(match HoldingsWire::deserialize(deserializer)? {
            HoldingsWire::Object(o) => Holdings {
                stocks: o.stocks,
                current_balance: o.current_balance,
                total_stock_value: o.total_stock_value,
                net_worth: o.net_worth,
            },
            HoldingsWire::Legacy(stocks) => Holdings {
                stocks,
                ..Default::default()
            },
        })
    }
}

impl Holdings {
    /// Sum of market values of every holding.
    pub fn stock_value(&self) -> Decimal {
        self.stocks.iter().map(Holding::market_value).sum()
    }

    /// Net worth: the server's figure when it reports a positive one,
    /// otherwise stock value plus cash.
    pub fn net_worth(&self) -> Decimal {
        match self.net_worth {
            Some(n) if n > Decimal::ZERO => n,
            _ => self.stock_value() + self.current_balance,
        }
    }

    /// Net worth gained over the starting balance.
    pub fn total_all_time_profit(&self) -> Decimal {
        self.net_worth() - STARTING_BALANCE
    }

    pub fn is_empty(&self) -> bool {
        self.stocks.is_empty()
    }
}
