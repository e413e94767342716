use clap::Args;
use rust_decimal::Decimal;
use serde_json::{Map, Value};

use fin_indicators_core::ratios::analysis::{self, RatioAnalysisInput};
use fin_indicators_core::ratios::calculator::FinancialFigures;
use fin_indicators_core::ratios::sectors::{self, IndustryProfile};

use crate::input;

/// Arguments for sector ratio analysis
#[derive(Args)]
pub struct RatiosArgs {
    /// Industry to compare against (see `finind industries`)
    #[arg(long)]
    pub industry: Option<String>,

    /// Path to JSON/YAML input file with `figures` and `industry`
    #[arg(long)]
    pub input: Option<String>,

    /// Revenue
    #[arg(long)]
    pub revenue: Option<Decimal>,

    /// Net income
    #[arg(long)]
    pub net_income: Option<Decimal>,

    /// Short-term (current) assets
    #[arg(long)]
    pub current_assets: Option<Decimal>,

    /// Short-term (current) liabilities
    #[arg(long)]
    pub current_liabilities: Option<Decimal>,

    /// Total assets
    #[arg(long)]
    pub total_assets: Option<Decimal>,

    /// Total liabilities
    #[arg(long)]
    pub total_liabilities: Option<Decimal>,

    /// Shareholders' equity
    #[arg(long)]
    pub equity: Option<Decimal>,

    /// Cost of equity (e.g. 0.10 for 10%)
    #[arg(long, alias = "ke")]
    pub cost_of_equity: Option<Decimal>,

    /// Pre-tax cost of debt
    #[arg(long, alias = "kd")]
    pub cost_of_debt: Option<Decimal>,

    /// Corporate tax rate
    #[arg(long)]
    pub tax_rate: Option<Decimal>,
}

/// Arguments for listing the sector reference table
#[derive(Args)]
pub struct IndustriesArgs {
    /// Show a single industry instead of the whole table
    #[arg(long)]
    pub industry: Option<String>,
}

pub fn run_ratios(args: RatiosArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let piped = match args.input {
        Some(_) => None,
        None => input::stdin::read_stdin_as()?,
    };
    let analysis_input = resolve_analysis_input(&args, piped)?;
    let result = analysis::analyze_ratios(&analysis_input)?;
    Ok(serde_json::to_value(result)?)
}

/// Input file first, then piped JSON, then flags. `--industry` overrides
/// whichever source supplied the figures.
fn resolve_analysis_input(
    args: &RatiosArgs,
    piped: Option<RatioAnalysisInput>,
) -> Result<RatioAnalysisInput, Box<dyn std::error::Error>> {
    let mut analysis_input: RatioAnalysisInput = if let Some(ref path) = args.input {
        input::file::read_input(path)?
    } else if let Some(data) = piped {
        data
    } else {
        RatioAnalysisInput {
            industry: args
                .industry
                .clone()
                .ok_or("--industry is required (or provide --input)")?,
            figures: figures_from_args(args)?,
        }
    };

    if let Some(ref industry) = args.industry {
        analysis_input.industry = industry.clone();
    }
    Ok(analysis_input)
}

pub fn run_industries(args: IndustriesArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let rows: Vec<Value> = match args.industry {
        Some(name) => vec![profile_row(sectors::get_sector_averages(&name)?)],
        None => sectors::sector_table().iter().map(profile_row).collect(),
    };
    Ok(Value::Array(rows))
}

/// Flatten a profile into `{industry, <ratio>: <average>, ...}`.
fn profile_row(profile: &IndustryProfile) -> Value {
    let mut row = Map::new();
    row.insert("industry".into(), Value::String(profile.industry.clone()));
    for benchmark in &profile.averages {
        row.insert(
            benchmark.ratio.name().to_string(),
            Value::String(benchmark.average.to_string()),
        );
    }
    Value::Object(row)
}

fn figures_from_args(args: &RatiosArgs) -> Result<FinancialFigures, Box<dyn std::error::Error>> {
    Ok(FinancialFigures {
        revenue: args.revenue.ok_or("--revenue is required (or provide --input)")?,
        net_income: args
            .net_income
            .ok_or("--net-income is required (or provide --input)")?,
        current_assets: args
            .current_assets
            .ok_or("--current-assets is required (or provide --input)")?,
        current_liabilities: args
            .current_liabilities
            .ok_or("--current-liabilities is required (or provide --input)")?,
        total_assets: args
            .total_assets
            .ok_or("--total-assets is required (or provide --input)")?,
        total_liabilities: args
            .total_liabilities
            .ok_or("--total-liabilities is required (or provide --input)")?,
        equity: args.equity.ok_or("--equity is required (or provide --input)")?,
        cost_of_equity: args
            .cost_of_equity
            .ok_or("--cost-of-equity is required (or provide --input)")?,
        cost_of_debt: args
            .cost_of_debt
            .ok_or("--cost-of-debt is required (or provide --input)")?,
        tax_rate: args
            .tax_rate
            .ok_or("--tax-rate is required (or provide --input)")?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn bare_args() -> RatiosArgs {
        RatiosArgs {
            industry: None,
            input: None,
            revenue: None,
            net_income: None,
            current_assets: None,
            current_liabilities: None,
            total_assets: None,
            total_liabilities: None,
            equity: None,
            cost_of_equity: None,
            cost_of_debt: None,
            tax_rate: None,
        }
    }

    fn flag_args() -> RatiosArgs {
        RatiosArgs {
            industry: Some("Technology".into()),
            revenue: Some(dec!(1000)),
            net_income: Some(dec!(150)),
            current_assets: Some(dec!(400)),
            current_liabilities: Some(dec!(250)),
            total_assets: Some(dec!(800)),
            total_liabilities: Some(dec!(300)),
            equity: Some(dec!(500)),
            cost_of_equity: Some(dec!(0.10)),
            cost_of_debt: Some(dec!(0.05)),
            tax_rate: Some(dec!(0.25)),
            ..bare_args()
        }
    }

    fn piped_input(industry: &str, revenue: Decimal) -> RatioAnalysisInput {
        RatioAnalysisInput {
            industry: industry.into(),
            figures: FinancialFigures {
                revenue,
                ..figures_from_args(&flag_args()).unwrap()
            },
        }
    }

    #[test]
    fn test_missing_flag_is_named() {
        let args = RatiosArgs {
            net_income: None,
            ..flag_args()
        };
        let err = figures_from_args(&args).unwrap_err();
        assert!(err.to_string().contains("--net-income is required"), "{err}");
    }

    #[test]
    fn test_flags_build_the_input() {
        let resolved = resolve_analysis_input(&flag_args(), None).unwrap();
        assert_eq!(resolved.industry, "Technology");
        assert_eq!(resolved.figures.equity, dec!(500));
        assert_eq!(resolved.figures.tax_rate, dec!(0.25));
    }

    #[test]
    fn test_missing_industry_without_input_fails() {
        let args = RatiosArgs {
            industry: None,
            ..flag_args()
        };
        let err = resolve_analysis_input(&args, None).unwrap_err();
        assert!(err.to_string().contains("--industry is required"), "{err}");
    }

    #[test]
    fn test_piped_input_wins_over_flags() {
        let args = RatiosArgs {
            industry: None,
            ..flag_args()
        };
        let resolved = resolve_analysis_input(&args, Some(piped_input("Energy", dec!(42)))).unwrap();
        assert_eq!(resolved.industry, "Energy");
        assert_eq!(resolved.figures.revenue, dec!(42));
    }

    #[test]
    fn test_industry_flag_overrides_piped_industry() {
        let args = RatiosArgs {
            industry: Some("Healthcare".into()),
            ..bare_args()
        };
        let resolved = resolve_analysis_input(&args, Some(piped_input("Energy", dec!(42)))).unwrap();
        assert_eq!(resolved.industry, "Healthcare");
        assert_eq!(resolved.figures.revenue, dec!(42));
    }

    #[test]
    fn test_input_file_wins_over_piped_data() {
        let path = std::env::temp_dir().join(format!("finind-ratios-{}.json", std::process::id()));
        let from_file = piped_input("Utilities", dec!(7));
        std::fs::write(&path, serde_json::to_string(&from_file).unwrap()).unwrap();

        let args = RatiosArgs {
            input: Some(path.to_string_lossy().into_owned()),
            industry: Some("Retail".into()),
            ..bare_args()
        };
        let resolved = resolve_analysis_input(&args, Some(piped_input("Energy", dec!(42))));
        std::fs::remove_file(&path).unwrap();

        let resolved = resolved.unwrap();
        assert_eq!(resolved.figures.revenue, dec!(7));
        assert_eq!(resolved.industry, "Retail");
    }

    #[test]
    fn test_industries_rows_flatten_averages() {
        let rows = run_industries(IndustriesArgs {
            industry: Some("technology".into()),
        })
        .unwrap();
        let row = &rows[0];
        assert_eq!(row["industry"], "Technology");
        assert!(row.get("debt-ratio").is_some());
    }
}
