use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// All monetary values. Wraps Decimal to prevent accidental f64 usage.
pub type Money = Decimal;

/// Rates expressed as decimals (0.05 = 5%). Never as percentages.
pub type Rate = Decimal;

/// Values already scaled by 100 (7.7 = 7.7%).
pub type Percent = Decimal;

/// Currency code
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Currency {
    #[default]
    CAD,
    USD,
    EUR,
    GBP,
    CHF,
    Other(String),
}

impl std::fmt::Display for Currency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Currency::CAD => write!(f, "CAD"),
            Currency::USD => write!(f, "USD"),
            Currency::EUR => write!(f, "EUR"),
            Currency::GBP => write!(f, "GBP"),
            Currency::CHF => write!(f, "CHF"),
            Currency::Other(code) => write!(f, "{code}"),
        }
    }
}

/// Standard computation output envelope
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputationOutput<T: Serialize> {
    pub result: T,
    pub methodology: String,
    pub assumptions: serde_json::Value,
    pub warnings: Vec<String>,
    pub metadata: ComputationMetadata,
}

/// Metadata for every computation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputationMetadata {
    pub version: String,
    pub computation_time_us: u64,
    pub precision: String,
}

/// Helper to wrap computation results with metadata
pub fn with_metadata<T: Serialize>(
    methodology: &str,
    assumptions: &impl Serialize,
    warnings: Vec<String>,
    elapsed_us: u64,
    result: T,
) -> ComputationOutput<T> {
    ComputationOutput {
        result,
        methodology: methodology.to_string(),
        assumptions: serde_json::to_value(assumptions).unwrap_or_default(),
        warnings,
        metadata: ComputationMetadata {
            version: env!("CARGO_PKG_VERSION").to_string(),
            computation_time_us: elapsed_us,
            precision: "rust_decimal_128bit".to_string(),
        },
    }
}

// ---------------------------------------------------------------------------
// Boundary validation shared by the public entry points
// ---------------------------------------------------------------------------

pub(crate) fn require_non_negative(
    field: &str,
    value: Money,
) -> crate::FinIndicatorsResult<()> {
    if value < Decimal::ZERO {
        return Err(crate::FinIndicatorsError::InvalidInput {
            field: field.into(),
            reason: format!("must be non-negative, got {value}"),
        });
    }
    Ok(())
}

pub(crate) fn require_unit_rate(field: &str, value: Rate) -> crate::FinIndicatorsResult<()> {
    if value < Decimal::ZERO || value > Decimal::ONE {
        return Err(crate::FinIndicatorsError::InvalidInput {
            field: field.into(),
            reason: format!("must be a fraction between 0 and 1, got {value}"),
        });
    }
    Ok(())
}

/// Error for a result that falls outside the `Decimal` range.
pub(crate) fn not_representable(field: &str) -> crate::FinIndicatorsError {
    crate::FinIndicatorsError::InvalidInput {
        field: field.into(),
        reason: "result exceeds the representable range".into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_rate_bounds_are_inclusive() {
        assert!(require_unit_rate("tax_rate", dec!(0)).is_ok());
        assert!(require_unit_rate("tax_rate", dec!(1)).is_ok());
        assert!(require_unit_rate("tax_rate", dec!(1.01)).is_err());
        assert!(require_unit_rate("tax_rate", dec!(-0.01)).is_err());
    }

    #[test]
    fn test_negative_amount_names_field() {
        match require_non_negative("equity", dec!(-5)) {
            Err(crate::FinIndicatorsError::InvalidInput { field, .. }) => {
                assert_eq!(field, "equity")
            }
            other => panic!("Expected InvalidInput, got {other:?}"),
        }
    }
}
