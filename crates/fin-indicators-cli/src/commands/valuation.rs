use clap::Args;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde_json::Value;

use fin_indicators_core::valuation::wacc::{self, WaccInput};

use crate::input;

/// Arguments for WACC calculation
#[derive(Args)]
pub struct WaccArgs {
    /// Equity financing amount (use with --debt)
    #[arg(long, requires = "debt")]
    pub equity: Option<Decimal>,

    /// Debt financing amount (use with --equity)
    #[arg(long, requires = "equity")]
    pub debt: Option<Decimal>,

    /// Equity share of the capital structure; debt takes the rest
    #[arg(long, conflicts_with_all = ["equity", "debt"])]
    pub equity_weight: Option<Decimal>,

    /// Cost of equity (e.g. 0.10 for 10%)
    #[arg(long, alias = "ke")]
    pub cost_of_equity: Option<Decimal>,

    /// Pre-tax cost of debt
    #[arg(long, alias = "kd")]
    pub cost_of_debt: Option<Decimal>,

    /// Corporate tax rate
    #[arg(long)]
    pub tax_rate: Option<Decimal>,

    /// Path to JSON/YAML input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,
}

pub fn run_wacc(args: WaccArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let piped = match args.input {
        Some(_) => None,
        None => input::stdin::read_stdin_as()?,
    };
    let wacc_input = resolve_wacc_input(&args, piped)?;
    let result = wacc::calculate_wacc(&wacc_input)?;
    Ok(serde_json::to_value(result)?)
}

/// Input file, then piped JSON, then flags. Flags take either explicit
/// `--equity`/`--debt` amounts or an `--equity-weight` (default 60%).
fn resolve_wacc_input(
    args: &WaccArgs,
    piped: Option<WaccInput>,
) -> Result<WaccInput, Box<dyn std::error::Error>> {
    if let Some(ref path) = args.input {
        return input::file::read_input(path);
    }
    if let Some(data) = piped {
        return Ok(data);
    }

    let defaults = WaccInput::default();
    let cost_of_equity = args.cost_of_equity.unwrap_or(defaults.cost_of_equity);
    let cost_of_debt = args.cost_of_debt.unwrap_or(defaults.cost_of_debt);
    let tax_rate = args.tax_rate.unwrap_or(defaults.tax_rate);

    let wacc_input = match (args.equity, args.debt) {
        (Some(equity), Some(debt)) => WaccInput {
            equity,
            debt,
            cost_of_equity,
            cost_of_debt,
            tax_rate,
        },
        _ => WaccInput::from_equity_weight(
            args.equity_weight.unwrap_or(dec!(0.6)),
            cost_of_equity,
            cost_of_debt,
            tax_rate,
        )?,
    };
    Ok(wacc_input)
}
