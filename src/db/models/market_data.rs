use chrono::{DateTime, Duration, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use sqlx::FromRow;

use crate::db::models::transactions::{normalize_symbol, validate_symbol};
use crate::errors::StoreError;
use crate::valuation;

#[derive(Debug, Clone, FromRow, Serialize)]
pub struct MarketDataModel {
    pub symbol: String,
    pub current_price: Option<Decimal>,
    pub company_name: Option<String>,
    pub exchange: Option<String>,
    pub currency: Option<String>,
    pub last_updated: DateTime<Utc>,
}

impl MarketDataModel {
    pub fn is_stale(&self, max_age_minutes: i64) -> bool {
        self.is_stale_at(Utc::now(), max_age_minutes)
    }

    pub fn is_stale_at(&self, now: DateTime<Utc>, max_age_minutes: i64) -> bool {
        now - self.last_updated > Duration::minutes(max_age_minutes)
    }

    pub fn formatted_price(&self) -> String {
        valuation::format_price(self.current_price)
    }
}

#[derive(Debug, Clone)]
pub struct NewMarketDataModel {
    pub symbol: String,
    pub current_price: Option<Decimal>,
    pub company_name: Option<String>,
    pub exchange: Option<String>,
    pub currency: String,
}

impl NewMarketDataModel {
    pub fn new(symbol: impl Into<String>, current_price: Option<Decimal>) -> Self {
        Self {
            symbol: symbol.into(),
            current_price,
            company_name: None,
            exchange: None,
            currency: "USD".to_string(),
        }
    }

    /// Pre-write normalization: the symbol key is stored uppercase.
    pub fn normalize(&mut self) {
        self.symbol = normalize_symbol(&self.symbol);
    }

    pub fn validate(&self) -> Result<(), StoreError> {
        validate_symbol(&self.symbol)?;
        if let Some(price) = self.current_price {
            if price < Decimal::ZERO {
                return Err(StoreError::Validation(format!(
                    "current_price must be non-negative, got {price}"
                )));
            }
        }
        if self.currency.len() != 3 {
            return Err(StoreError::Validation(format!(
                "currency must be a 3-letter code, got {:?}",
                self.currency
            )));
        }
        Ok(())
    }
}

/// One entry of a bulk price refresh; only price and timestamp are written.
#[derive(Debug, Clone)]
pub struct PriceUpdate {
    pub symbol: String,
    pub price: Decimal,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::dec;

    fn quote(minutes_old: i64) -> MarketDataModel {
        MarketDataModel {
            symbol: "AAPL".to_string(),
            current_price: Some(dec!(175.50)),
            company_name: Some("Apple Inc.".to_string()),
            exchange: Some("NASDAQ".to_string()),
            currency: Some("USD".to_string()),
            last_updated: Utc::now() - Duration::minutes(minutes_old),
        }
    }

    #[test]
    fn staleness_is_a_strict_age_comparison() {
        let now = Utc::now();
        let fresh = MarketDataModel {
            last_updated: now - Duration::minutes(10),
            ..quote(0)
        };
        assert!(!fresh.is_stale_at(now, 15));
        assert!(!fresh.is_stale_at(now, 10));
        assert!(fresh.is_stale_at(now, 9));
    }

    #[test]
    fn formatted_price_renders_dollars_or_na() {
        assert_eq!(quote(0).formatted_price(), "$175.50");

        let unquoted = MarketDataModel {
            current_price: None,
            ..quote(0)
        };
        assert_eq!(unquoted.formatted_price(), "N/A");
    }

    #[test]
    fn new_quote_defaults_to_usd() {
        let mut quote = NewMarketDataModel::new("msft", Some(dec!(415.75)));
        quote.normalize();
        assert_eq!(quote.symbol, "MSFT");
        assert_eq!(quote.currency, "USD");
        assert!(quote.validate().is_ok());
    }

    #[test]
    fn validate_rejects_bad_currency_and_price() {
        let mut quote = NewMarketDataModel::new("AAPL", Some(dec!(-1)));
        assert!(quote.validate().is_err());

        quote.current_price = Some(dec!(1));
        quote.currency = "DOLLARS".to_string();
        assert!(quote.validate().is_err());
    }
}
