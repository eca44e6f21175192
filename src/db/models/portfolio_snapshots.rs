use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use sqlx::FromRow;
use uuid::Uuid;

use crate::errors::StoreError;
use crate::valuation;

#[derive(Debug, Clone, FromRow, Serialize)]
pub struct PortfolioSnapshotModel {
    pub id: Uuid,
    pub user_id: Uuid,
    pub snapshot_date: NaiveDate,
    pub total_value: Option<Decimal>,
    pub total_invested: Option<Decimal>,
    // Caller-supplied; this system never solves for XIRR
    pub xirr_rate: Option<Decimal>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl PortfolioSnapshotModel {
    pub fn return_pct(&self) -> Decimal {
        valuation::return_pct(self.total_value, self.total_invested)
    }

    pub fn is_positive(&self) -> bool {
        valuation::is_positive(self.total_value, self.total_invested)
    }

    pub fn formatted_xirr(&self) -> String {
        valuation::format_xirr(self.xirr_rate)
    }
}

#[derive(Debug, Clone)]
pub struct NewPortfolioSnapshotModel {
    pub user_id: Uuid,
    pub snapshot_date: NaiveDate,
    pub total_value: Option<Decimal>,
    pub total_invested: Option<Decimal>,
    pub xirr_rate: Option<Decimal>,
}

impl NewPortfolioSnapshotModel {
    pub fn validate(&self) -> Result<(), StoreError> {
        for (field, value) in [
            ("total_value", self.total_value),
            ("total_invested", self.total_invested),
        ] {
            if let Some(value) = value {
                if value < Decimal::ZERO {
                    return Err(StoreError::Validation(format!(
                        "{field} must be non-negative, got {value}"
                    )));
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::dec;

    fn snapshot(
        total_value: Option<Decimal>,
        total_invested: Option<Decimal>,
        xirr_rate: Option<Decimal>,
    ) -> PortfolioSnapshotModel {
        PortfolioSnapshotModel {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            snapshot_date: NaiveDate::from_ymd_opt(2024, 6, 30).unwrap(),
            total_value,
            total_invested,
            xirr_rate,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn return_helpers_delegate_to_the_kernel() {
        let s = snapshot(Some(dec!(12000)), Some(dec!(10000)), Some(dec!(15.789)));
        assert_eq!(s.return_pct(), dec!(20.0));
        assert!(s.is_positive());
        assert_eq!(s.formatted_xirr(), "15.79%");
    }

    #[test]
    fn empty_snapshot_reports_zero_return_and_na() {
        let s = snapshot(None, None, None);
        assert_eq!(s.return_pct(), dec!(0));
        assert!(!s.is_positive());
        assert_eq!(s.formatted_xirr(), "N/A");
    }

    #[test]
    fn validate_rejects_negative_totals() {
        let new = NewPortfolioSnapshotModel {
            user_id: Uuid::new_v4(),
            snapshot_date: NaiveDate::from_ymd_opt(2024, 6, 30).unwrap(),
            total_value: Some(dec!(-1)),
            total_invested: None,
            xirr_rate: None,
        };
        assert!(new.validate().is_err());
    }

    #[test]
    fn validate_allows_negative_xirr() {
        let new = NewPortfolioSnapshotModel {
            user_id: Uuid::new_v4(),
            snapshot_date: NaiveDate::from_ymd_opt(2024, 6, 30).unwrap(),
            total_value: Some(dec!(9000)),
            total_invested: Some(dec!(10000)),
            xirr_rate: Some(dec!(-12.5)),
        };
        assert!(new.validate().is_ok());
    }
}
