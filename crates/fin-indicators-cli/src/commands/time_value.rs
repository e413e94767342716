use clap::Args;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde_json::Value;

use fin_indicators_core::time_value::{self, TimeValueInput};
use fin_indicators_core::Currency;

use crate::input;

/// Arguments for a future value schedule
#[derive(Args)]
pub struct FutureValueArgs {
    /// Initial amount invested
    #[arg(long, default_value = "1000")]
    pub principal: Decimal,

    /// Annual interest rate (e.g. 0.05 for 5%)
    #[arg(long, default_value = "0.05")]
    pub rate: Decimal,

    /// Investment horizon in years
    #[arg(long, default_value_t = 10)]
    pub years: u32,

    /// Currency code for display
    #[arg(long)]
    pub currency: Option<String>,

    /// Path to JSON/YAML input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,
}

/// Arguments for a present value schedule
#[derive(Args)]
pub struct PresentValueArgs {
    /// Amount receivable at the horizon
    #[arg(long, alias = "future-amount", default_value = "2000")]
    pub amount: Decimal,

    /// Annual discount rate
    #[arg(long, alias = "discount-rate", default_value = "0.05")]
    pub rate: Decimal,

    /// Horizon in years
    #[arg(long, default_value_t = 10)]
    pub years: u32,

    /// Currency code for display
    #[arg(long)]
    pub currency: Option<String>,

    /// Path to JSON/YAML input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,
}

pub fn run_future_value(args: FutureValueArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let tv_input = resolve_input(
        args.input.as_deref(),
        piped_input(args.input.as_deref())?,
        args.principal,
        args.rate,
        args.years,
        args.currency.as_deref(),
    )?;
    let result = time_value::calculate_future_value(&tv_input)?;
    Ok(serde_json::to_value(result)?)
}

pub fn run_present_value(args: PresentValueArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let tv_input = resolve_input(
        args.input.as_deref(),
        piped_input(args.input.as_deref())?,
        args.amount,
        args.rate,
        args.years,
        args.currency.as_deref(),
    )?;
    let result = time_value::calculate_present_value(&tv_input)?;
    Ok(serde_json::to_value(result)?)
}

/// Piped JSON, read only when no input file was given.
fn piped_input(
    path: Option<&str>,
) -> Result<Option<TimeValueInput>, Box<dyn std::error::Error>> {
    match path {
        Some(_) => Ok(None),
        None => input::stdin::read_stdin_as(),
    }
}

fn resolve_input(
    path: Option<&str>,
    piped: Option<TimeValueInput>,
    amount: Decimal,
    rate: Decimal,
    years: u32,
    currency: Option<&str>,
) -> Result<TimeValueInput, Box<dyn std::error::Error>> {
    if let Some(path) = path {
        return input::file::read_input(path);
    }
    if let Some(data) = piped {
        return Ok(data);
    }
    if rate > dec!(1) {
        return Err(format!(
            "--rate is a fraction (0.05 for 5%), got {rate}; did you mean {}?",
            rate / dec!(100)
        )
        .into());
    }
    Ok(TimeValueInput {
        amount,
        rate,
        years,
        currency: currency.map(parse_currency).unwrap_or_default(),
    })
}

fn parse_currency(code: &str) -> Currency {
    match code.to_ascii_uppercase().as_str() {
        "CAD" => Currency::CAD,
        "USD" => Currency::USD,
        "EUR" => Currency::EUR,
        "GBP" => Currency::GBP,
        "CHF" => Currency::CHF,
        other => Currency::Other(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flags_build_the_input() {
        let resolved = resolve_input(None, None, dec!(1000), dec!(0.05), 10, Some("eur")).unwrap();
        assert_eq!(resolved.amount, dec!(1000));
        assert_eq!(resolved.years, 10);
        assert_eq!(resolved.currency, Currency::EUR);
    }

    #[test]
    fn test_percent_style_rate_gets_a_hint() {
        let err = resolve_input(None, None, dec!(1000), dec!(5), 10, None).unwrap_err();
        assert!(err.to_string().contains("did you mean 0.05"), "{err}");
    }

    #[test]
    fn test_piped_input_wins_over_flags() {
        let piped = TimeValueInput {
            amount: dec!(2000),
            rate: dec!(0.04),
            years: 3,
            currency: Currency::USD,
        };
        let resolved =
            resolve_input(None, Some(piped), dec!(1000), dec!(5), 10, None).unwrap();
        assert_eq!(resolved.amount, dec!(2000));
        assert_eq!(resolved.years, 3);
    }

    #[test]
    fn test_parse_currency() {
        assert_eq!(parse_currency("usd"), Currency::USD);
        assert_eq!(parse_currency("JPY"), Currency::Other("JPY".into()));
    }
}
