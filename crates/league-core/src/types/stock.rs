//! Stock types.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::de;

/// A stock as listed by `GET /api/stocks/`.
///
/// This is the raw server shape and the form kept in the stocks cache.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stock {
    pub ticker: String,
    #[serde(default)]
    pub name: String,
    /// Price at the start of the pricing period
    #[serde(default, deserialize_with = "de::decimal")]
    pub start_price: Decimal,
    /// Latest price
    #[serde(default, deserialize_with = "de::decimal")]
    pub current_price: Decimal,
}

impl Stock {
    pub fn new(
        ticker: impl Into<String>,
        name: impl Into<String>,
        start_price: Decimal,
        current_price: Decimal,
    ) -> Self {
        Self {
            ticker: ticker.into(),
            name: name.into(),
            start_price,
            current_price,
        }
    }

    /// Derive the display snapshot.
    pub fn snapshot(&self) -> StockSnapshot {
        StockSnapshot::from(self)
    }

    /// Case-insensitive match on ticker or company name.
    pub fn matches(&self, term: &str) -> bool {
        let term = term.trim().to_lowercase();
        if term.is_empty() {
            return true;
        }
        self.ticker.to_lowercase().contains(&term) || self.name.to_lowercase().contains(&term)
    }
}

/// Display model of a stock with its change since the start price.
///
/// Derived at read time and never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StockSnapshot {
    pub ticker: String,
    pub name: String,
    pub current_price: Decimal,
    pub start_price: Decimal,
    pub change: Decimal,
    pub change_percent: Decimal,
}

impl From<&Stock> for StockSnapshot {
    fn from(stock: &Stock) -> Self {
        let change = stock.current_price - stock.start_price;
        let change_percent = if stock.start_price.is_zero() {
            Decimal::ZERO
        } else {
            change / stock.start_price * Decimal::ONE_HUNDRED
        };

        Self {
            ticker: stock.ticker.clone(),
            name: stock.name.clone(),
            current_price: stock.current_price,
            start_price: stock.start_price,
            change,
            change_percent,
        }
    }
}

impl StockSnapshot {
    pub fn is_up(&self) -> bool {
        self.change >= Decimal::ZERO
    }
}

/// Balance and position for one stock in one league, from `GET /api/stocks/info/..`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockInfo {
    #[serde(default, deserialize_with = "de::decimal")]
    pub balance: Decimal,
    #[serde(default, deserialize_with = "de::decimal")]
    pub owned_shares: Decimal,
    #[serde(default, deserialize_with = "de::decimal")]
    pub current_price: Decimal,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_snapshot_change() {
        let stock = Stock::new("AAA", "Alpha Corp", dec!(100), dec!(110));
        let snap = stock.snapshot();
        assert_eq!(snap.change, dec!(10));
        assert_eq!(snap.change_percent, dec!(10));
        assert!(snap.is_up());
    }

    #[test]
    fn test_snapshot_zero_start_price() {
        let stock = Stock::new("NEW", "Newly Listed", Decimal::ZERO, dec!(12.5));
        let snap = stock.snapshot();
        assert_eq!(snap.change, dec!(12.5));
        assert_eq!(snap.change_percent, Decimal::ZERO);
    }

    #[test]
    fn test_stock_from_wire() {
        let json = r#"[{"ticker":"AAPL","name":"Apple Inc.","start_price":"180.00","current_price":"171.00"}]"#;
        let stocks: Vec<Stock> = serde_json::from_str(json).unwrap();
        let snap = stocks[0].snapshot();
        assert_eq!(snap.change, dec!(-9));
        assert_eq!(snap.change_percent, dec!(-5));
        assert!(!snap.is_up());
    }

    #[test]
    fn test_matches() {
        let stock = Stock::new("MSFT", "Microsoft Corporation", dec!(1), dec!(1));
        assert!(stock.matches("msf"));
        assert!(stock.matches("micro"));
        assert!(stock.matches("  "));
        assert!(!stock.matches("apple"));
    }
}
