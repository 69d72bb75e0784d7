use std::fmt::Display;

use sea_orm::FromJsonQueryResult;
use serde::{Serialize, Deserialize};

/// Monetary value as stored on product rows (JSON column).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, FromJsonQueryResult, utoipa::ToSchema)]
pub struct Price {
    pub amount: f64,
    pub currency: String,
}

impl Price {
    pub fn new(amount: f64, currency: impl Into<String>) -> Self {
        Price {
            amount,
            currency: currency.into(),
        }
    }

    /// True when this price sits at or below `threshold`.
    pub fn at_or_below(&self, threshold: f64) -> bool {
        self.amount <= threshold
    }
}

impl Display for Price {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.2} {}", self.amount, self.currency)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_with_two_decimals() {
        assert_eq!(Price::new(129.9, "EUR").to_string(), "129.90 EUR");
    }

    #[test]
    fn threshold_comparison_is_inclusive() {
        let price = Price::new(100.0, "USD");
        assert!(price.at_or_below(100.0));
        assert!(price.at_or_below(100.5));
        assert!(!price.at_or_below(99.99));
    }
}
