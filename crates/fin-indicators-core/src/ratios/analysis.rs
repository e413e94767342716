use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::ratios::calculator::{compute_ratios, FinancialFigures, RatioKey, RatioSet, RatioValue};
use crate::ratios::recommendations::{generate_findings, Band, Finding};
use crate::ratios::sectors::get_sector_averages;
use crate::types::{with_metadata, ComputationOutput};
use crate::FinIndicatorsResult;

/// Tolerated gap between total assets and liabilities plus equity.
const BALANCE_TOLERANCE: Decimal = dec!(0.01);

// ---------------------------------------------------------------------------
// Input / Output types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RatioAnalysisInput {
    pub figures: FinancialFigures,
    /// Industry name from the sector table
    pub industry: String,
}

/// One row of the company-versus-sector table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RatioComparison {
    pub ratio: RatioKey,
    pub company: RatioValue,
    pub sector_average: Decimal,
    pub band: Band,
}

impl From<&Finding> for RatioComparison {
    fn from(finding: &Finding) -> Self {
        Self {
            ratio: finding.ratio.clone(),
            company: finding.company_value,
            sector_average: finding.sector_average,
            band: finding.band,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RatioAnalysisOutput {
    /// Canonical industry name
    pub industry: String,
    pub ratios: RatioSet,
    pub comparison: Vec<RatioComparison>,
    pub findings: Vec<Finding>,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Compute a company's ratios and compare them with its industry.
pub fn analyze_ratios(
    input: &RatioAnalysisInput,
) -> FinIndicatorsResult<ComputationOutput<RatioAnalysisOutput>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    let ratios = compute_ratios(&input.figures)?;
    let profile = get_sector_averages(&input.industry)?;

    for key in ratios.undefined_keys() {
        tracing::warn!(ratio = key.name(), "ratio undefined: zero denominator");
        warnings.push(format!("{key} is undefined: its denominator is zero."));
    }
    if let Some(gap) = balance_sheet_gap(&input.figures) {
        warnings.push(format!(
            "Total liabilities plus equity differ from total assets by {}%; check the figures.",
            (gap * dec!(100)).round_dp(1)
        ));
    }

    let findings = generate_findings(&ratios, &profile.averages);
    let comparison: Vec<RatioComparison> = findings.iter().map(RatioComparison::from).collect();

    tracing::debug!(
        industry = %profile.industry,
        findings = findings.len(),
        "ratio analysis complete"
    );

    let output = RatioAnalysisOutput {
        industry: profile.industry.clone(),
        ratios,
        comparison,
        findings,
    };

    Ok(with_metadata(
        "Sector ratio comparison with a +/-20% band around the sector average",
        input,
        warnings,
        start.elapsed().as_micros() as u64,
        output,
    ))
}

// ---------------------------------------------------------------------------
// Internal helpers
// ---------------------------------------------------------------------------

/// Relative gap between assets and liabilities plus equity, when above tolerance.
fn balance_sheet_gap(figures: &FinancialFigures) -> Option<Decimal> {
    if figures.total_assets.is_zero() {
        return None;
    }
    let funded = figures.total_liabilities.checked_add(figures.equity)?;
    let gap = figures
        .total_assets
        .checked_sub(funded)?
        .checked_div(figures.total_assets)?
        .abs();
    (gap > BALANCE_TOLERANCE).then_some(gap)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn sample_input(industry: &str) -> RatioAnalysisInput {
        RatioAnalysisInput {
            figures: FinancialFigures {
                revenue: dec!(1000),
                net_income: dec!(150),
                current_assets: dec!(400),
                current_liabilities: dec!(250),
                total_assets: dec!(800),
                total_liabilities: dec!(300),
                equity: dec!(500),
                cost_of_equity: dec!(0.10),
                cost_of_debt: dec!(0.05),
                tax_rate: dec!(0.25),
            },
            industry: industry.into(),
        }
    }

    #[test]
    fn test_comparison_and_findings_align() {
        let out = analyze_ratios(&sample_input("Technology")).unwrap().result;
        assert_eq!(out.industry, "Technology");
        assert_eq!(out.comparison.len(), 5);
        assert_eq!(out.findings.len(), 5);
        for (row, finding) in out.comparison.iter().zip(&out.findings) {
            assert_eq!(row.ratio, finding.ratio);
            assert_eq!(row.band, finding.band);
        }
    }

    #[test]
    fn test_balanced_sheet_has_no_warning() {
        let result = analyze_ratios(&sample_input("Technology")).unwrap();
        assert!(result.warnings.is_empty(), "{:?}", result.warnings);
    }

    #[test]
    fn test_unbalanced_sheet_warns() {
        let mut input = sample_input("Technology");
        input.figures.total_assets = dec!(1000);
        let result = analyze_ratios(&input).unwrap();
        assert!(result.warnings.iter().any(|w| w.contains("differ from total assets")));
    }

    #[test]
    fn test_undefined_ratio_warns() {
        let mut input = sample_input("Energy");
        input.figures.revenue = Decimal::ZERO;
        let result = analyze_ratios(&input).unwrap();
        assert!(result.warnings.iter().any(|w| w.contains("Net margin")));
    }

    #[test]
    fn test_oversized_figures_rejected_without_panicking() {
        let huge = Decimal::MAX - dec!(1);
        let mut input = sample_input("Technology");
        input.figures.total_assets = huge;
        input.figures.total_liabilities = huge;
        input.figures.equity = huge;
        assert!(analyze_ratios(&input).is_err());
    }

    #[test]
    fn test_gap_is_none_when_sum_overflows() {
        let huge = Decimal::MAX - dec!(1);
        let mut input = sample_input("Technology");
        input.figures.total_liabilities = huge;
        input.figures.equity = huge;
        assert_eq!(balance_sheet_gap(&input.figures), None);
    }

    #[test]
    fn test_comparison_rows_mirror_findings() {
        let mut input = sample_input("Financial Services");
        input.figures.current_liabilities = Decimal::ZERO;
        let out = analyze_ratios(&input).unwrap().result;
        let expected: Vec<RatioComparison> =
            out.findings.iter().map(RatioComparison::from).collect();
        assert_eq!(out.comparison, expected);
    }

    #[test]
    fn test_canonical_industry_name_returned() {
        let out = analyze_ratios(&sample_input("real estate")).unwrap().result;
        assert_eq!(out.industry, "Real Estate");
    }
}
