use std::fmt;
use std::str::FromStr;

use rust_decimal::{Decimal, RoundingStrategy};

use crate::errors::StoreError;

/// Transaction kind as stored in the `transactions.type` column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransactionType {
    Buy,
    Sell,
    Dividend,
}

impl TransactionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionType::Buy => "BUY",
            TransactionType::Sell => "SELL",
            TransactionType::Dividend => "DIVIDEND",
        }
    }
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TransactionType {
    type Err = StoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "BUY" => Ok(TransactionType::Buy),
            "SELL" => Ok(TransactionType::Sell),
            "DIVIDEND" => Ok(TransactionType::Dividend),
            other => Err(StoreError::InvalidTransactionType(other.to_string())),
        }
    }
}

/// Gross magnitude of a trade, fee-inclusive, regardless of type.
pub fn total_value(quantity: Decimal, price: Decimal, fees: Decimal) -> Decimal {
    quantity * price + fees
}

/// Signed cash-flow impact of a transaction. BUY is an outflow (negative),
/// SELL an inflow net of fees, DIVIDEND pure income with fees ignored.
pub fn net_cash_value(
    ty: TransactionType,
    quantity: Decimal,
    price: Decimal,
    fees: Decimal,
) -> Decimal {
    let gross = quantity * price;
    match ty {
        TransactionType::Buy => -(gross + fees),
        TransactionType::Sell => gross - fees,
        TransactionType::Dividend => gross,
    }
}

/// Simple return of a snapshot as a percentage. Zero when either side is
/// missing or nothing was invested.
pub fn return_pct(total_value: Option<Decimal>, total_invested: Option<Decimal>) -> Decimal {
    match (total_value, total_invested) {
        (Some(value), Some(invested)) if !invested.is_zero() => {
            (value - invested) / invested * Decimal::ONE_HUNDRED
        }
        _ => Decimal::ZERO,
    }
}

pub fn is_positive(total_value: Option<Decimal>, total_invested: Option<Decimal>) -> bool {
    return_pct(total_value, total_invested) > Decimal::ZERO
}

/// Renders a caller-supplied XIRR percentage to two decimal places, or the
/// "N/A" sentinel when none was stored.
pub fn format_xirr(xirr_rate: Option<Decimal>) -> String {
    match xirr_rate {
        Some(rate) => format!("{:.2}%", round_2dp(rate)),
        None => "N/A".to_string(),
    }
}

/// Renders a quote price as dollars to two decimal places, or "N/A".
pub fn format_price(price: Option<Decimal>) -> String {
    match price {
        Some(p) => format!("${:.2}", round_2dp(p)),
        None => "N/A".to_string(),
    }
}

// Half-away-from-zero, to match display conventions for percentages/prices.
fn round_2dp(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::dec;

    #[test]
    fn total_value_is_gross_plus_fees() {
        assert_eq!(total_value(dec!(10), dec!(100), dec!(9.99)), dec!(1009.99));
        assert_eq!(total_value(dec!(0), dec!(100), dec!(0)), dec!(0));
        assert_eq!(total_value(dec!(2.5), dec!(4.2), dec!(0.5)), dec!(11));
    }

    #[test]
    fn net_cash_value_buy_is_an_outflow() {
        let net = net_cash_value(TransactionType::Buy, dec!(10), dec!(100), dec!(5));
        assert_eq!(net, dec!(-1005));
        assert!(net <= Decimal::ZERO);
    }

    #[test]
    fn net_cash_value_sell_is_net_of_fees() {
        let net = net_cash_value(TransactionType::Sell, dec!(10), dec!(100), dec!(5));
        assert_eq!(net, dec!(995));
        assert!(net >= Decimal::ZERO);
    }

    #[test]
    fn net_cash_value_dividend_ignores_fees() {
        let net = net_cash_value(TransactionType::Dividend, dec!(100), dec!(0.52), dec!(7));
        assert_eq!(net, dec!(52));
    }

    #[test]
    fn net_cash_value_sign_invariants_hold_at_zero() {
        assert_eq!(
            net_cash_value(TransactionType::Buy, dec!(0), dec!(0), dec!(0)),
            dec!(0)
        );
        assert_eq!(
            net_cash_value(TransactionType::Sell, dec!(0), dec!(0), dec!(0)),
            dec!(0)
        );
    }

    #[test]
    fn return_pct_flat_portfolio_is_zero() {
        assert_eq!(return_pct(Some(dec!(10000)), Some(dec!(10000))), dec!(0));
    }

    #[test]
    fn return_pct_zero_invested_is_zero() {
        assert_eq!(return_pct(Some(dec!(12345)), Some(dec!(0))), dec!(0));
    }

    #[test]
    fn return_pct_missing_sides_are_zero() {
        assert_eq!(return_pct(None, Some(dec!(10000))), dec!(0));
        assert_eq!(return_pct(Some(dec!(10000)), None), dec!(0));
        assert_eq!(return_pct(None, None), dec!(0));
    }

    #[test]
    fn return_pct_twenty_percent_gain() {
        assert_eq!(return_pct(Some(dec!(12000)), Some(dec!(10000))), dec!(20.0));
    }

    #[test]
    fn return_pct_loss_is_negative() {
        assert_eq!(return_pct(Some(dec!(8000)), Some(dec!(10000))), dec!(-20.0));
    }

    #[test]
    fn is_positive_only_on_gains() {
        assert!(is_positive(Some(dec!(12000)), Some(dec!(10000))));
        assert!(!is_positive(Some(dec!(10000)), Some(dec!(10000))));
        assert!(!is_positive(Some(dec!(8000)), Some(dec!(10000))));
        assert!(!is_positive(None, Some(dec!(10000))));
    }

    #[test]
    fn format_xirr_rounds_to_two_places() {
        assert_eq!(format_xirr(Some(dec!(15.789))), "15.79%");
        assert_eq!(format_xirr(Some(dec!(15.7))), "15.70%");
        assert_eq!(format_xirr(Some(dec!(-3.5))), "-3.50%");
        assert_eq!(format_xirr(Some(dec!(0))), "0.00%");
    }

    #[test]
    fn format_xirr_missing_rate_is_na() {
        assert_eq!(format_xirr(None), "N/A");
    }

    #[test]
    fn format_price_renders_dollars() {
        assert_eq!(format_price(Some(dec!(175.5))), "$175.50");
        assert_eq!(format_price(Some(dec!(2750.255))), "$2750.26");
        assert_eq!(format_price(None), "N/A");
    }

    #[test]
    fn transaction_type_round_trips_through_strings() {
        assert_eq!("BUY".parse::<TransactionType>().unwrap(), TransactionType::Buy);
        assert_eq!("SELL".parse::<TransactionType>().unwrap(), TransactionType::Sell);
        assert_eq!(
            "DIVIDEND".parse::<TransactionType>().unwrap(),
            TransactionType::Dividend
        );
        assert_eq!(TransactionType::Buy.to_string(), "BUY");
    }

    #[test]
    fn transaction_type_rejects_unknown_values() {
        let err = "STAKE".parse::<TransactionType>().unwrap_err();
        assert!(matches!(err, StoreError::InvalidTransactionType(ref s) if s == "STAKE"));
    }
}
