use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use sqlx::FromRow;
use uuid::Uuid;

use crate::errors::StoreError;
use crate::valuation::{self, TransactionType};

pub const MAX_SYMBOL_LEN: usize = 10;

#[derive(Debug, Clone, FromRow, Serialize)]
pub struct TransactionModel {
    pub id: Uuid,
    pub user_id: Uuid,
    pub symbol: String,
    // Selected as `type::text AS tx_type`; the column itself is a Postgres enum
    #[serde(rename = "type")]
    pub tx_type: String,
    pub quantity: Decimal,
    pub price: Decimal,
    pub transaction_date: NaiveDate,
    pub fees: Option<Decimal>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl TransactionModel {
    pub fn transaction_type(&self) -> Result<TransactionType, StoreError> {
        self.tx_type.parse()
    }

    pub fn fees_or_zero(&self) -> Decimal {
        self.fees.unwrap_or(Decimal::ZERO)
    }

    /// Gross trade value, fee-inclusive.
    pub fn total_value(&self) -> Decimal {
        valuation::total_value(self.quantity, self.price, self.fees_or_zero())
    }

    /// Signed cash-flow impact. Fails if the stored type string is outside
    /// the BUY/SELL/DIVIDEND enum.
    pub fn net_cash_value(&self) -> Result<Decimal, StoreError> {
        Ok(valuation::net_cash_value(
            self.transaction_type()?,
            self.quantity,
            self.price,
            self.fees_or_zero(),
        ))
    }
}

#[derive(Debug, Clone)]
pub struct NewTransactionModel {
    pub user_id: Uuid,
    pub symbol: String,
    pub tx_type: TransactionType,
    pub quantity: Decimal,
    pub price: Decimal,
    pub transaction_date: NaiveDate,
    pub fees: Decimal,
    pub notes: Option<String>,
}

impl NewTransactionModel {
    pub fn new(
        user_id: Uuid,
        symbol: impl Into<String>,
        tx_type: TransactionType,
        quantity: Decimal,
        price: Decimal,
        transaction_date: NaiveDate,
    ) -> Self {
        Self {
            user_id,
            symbol: symbol.into(),
            tx_type,
            quantity,
            price,
            transaction_date,
            fees: Decimal::ZERO,
            notes: None,
        }
    }

    /// Pre-write normalization: symbols are stored uppercase.
    pub fn normalize(&mut self) {
        self.symbol = normalize_symbol(&self.symbol);
    }

    pub fn validate(&self) -> Result<(), StoreError> {
        validate_symbol(&self.symbol)?;
        for (field, value) in [
            ("quantity", self.quantity),
            ("price", self.price),
            ("fees", self.fees),
        ] {
            if value < Decimal::ZERO {
                return Err(StoreError::Validation(format!(
                    "{field} must be non-negative, got {value}"
                )));
            }
        }
        Ok(())
    }
}

pub fn normalize_symbol(symbol: &str) -> String {
    symbol.trim().to_uppercase()
}

pub fn validate_symbol(symbol: &str) -> Result<(), StoreError> {
    if symbol.is_empty() || symbol.len() > MAX_SYMBOL_LEN {
        return Err(StoreError::Validation(format!(
            "symbol must be 1-{MAX_SYMBOL_LEN} characters, got {symbol:?}"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::dec;

    fn sample_tx() -> NewTransactionModel {
        NewTransactionModel::new(
            Uuid::new_v4(),
            "aapl",
            TransactionType::Buy,
            dec!(10),
            dec!(175.50),
            NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
        )
    }

    #[test]
    fn normalize_uppercases_and_trims_symbols() {
        let mut tx = sample_tx();
        tx.symbol = "  aapl ".to_string();
        tx.normalize();
        assert_eq!(tx.symbol, "AAPL");
    }

    #[test]
    fn validate_rejects_out_of_range_symbols() {
        let mut tx = sample_tx();
        tx.symbol = String::new();
        assert!(tx.validate().is_err());

        tx.symbol = "TOOLONGSYMBOL".to_string();
        assert!(tx.validate().is_err());
    }

    #[test]
    fn validate_rejects_negative_amounts() {
        let mut tx = sample_tx();
        tx.normalize();
        tx.quantity = dec!(-1);
        assert!(matches!(tx.validate(), Err(StoreError::Validation(_))));

        let mut tx = sample_tx();
        tx.normalize();
        tx.fees = dec!(-0.01);
        assert!(tx.validate().is_err());
    }

    #[test]
    fn row_helpers_coalesce_missing_fees() {
        let row = TransactionModel {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            symbol: "AAPL".to_string(),
            tx_type: "SELL".to_string(),
            quantity: dec!(10),
            price: dec!(100),
            transaction_date: NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
            fees: None,
            notes: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };

        assert_eq!(row.total_value(), dec!(1000));
        assert_eq!(row.net_cash_value().unwrap(), dec!(1000));
    }

    #[test]
    fn unknown_type_string_fails_to_parse() {
        let mut row = TransactionModel {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            symbol: "AAPL".to_string(),
            tx_type: "SPLIT".to_string(),
            quantity: dec!(1),
            price: dec!(1),
            transaction_date: NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
            fees: Some(dec!(0)),
            notes: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };

        assert!(matches!(
            row.net_cash_value(),
            Err(StoreError::InvalidTransactionType(_))
        ));

        row.tx_type = "BUY".to_string();
        assert_eq!(row.net_cash_value().unwrap(), dec!(-1));
    }
}
