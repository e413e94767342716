use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

use crate::error::FinIndicatorsError;
use crate::ratios::calculator::RatioKey;
use crate::FinIndicatorsResult;

/// Expected value of one ratio for an industry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectorBenchmark {
    pub ratio: RatioKey,
    pub average: Decimal,
}

/// Reference ratios for a named industry, in comparison order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndustryProfile {
    pub industry: String,
    pub averages: Vec<SectorBenchmark>,
}

impl IndustryProfile {
    pub fn average(&self, ratio: &RatioKey) -> Option<Decimal> {
        self.averages
            .iter()
            .find(|b| &b.ratio == ratio)
            .map(|b| b.average)
    }
}

/// Averages are listed as working capital ratio, net margin %, debt ratio,
/// ROE % and WACC %. A zero average means the sector publishes no figure.
static SECTOR_TABLE: LazyLock<Vec<IndustryProfile>> = LazyLock::new(|| {
    vec![
        profile("Technology", [dec!(2.0), dec!(15.0), dec!(0.8), dec!(18.0), dec!(9.0)]),
        profile("Healthcare", [dec!(1.8), dec!(10.0), dec!(0.9), dec!(14.0), dec!(8.0)]),
        // banks do not split current and non-current items
        profile("Financial Services", [dec!(0), dec!(20.0), dec!(8.0), dec!(11.0), dec!(7.5)]),
        profile("Consumer Goods", [dec!(1.4), dec!(8.0), dec!(1.2), dec!(16.0), dec!(7.0)]),
        profile("Retail", [dec!(1.2), dec!(3.5), dec!(1.6), dec!(15.0), dec!(7.5)]),
        profile("Energy", [dec!(1.3), dec!(7.0), dec!(1.0), dec!(10.0), dec!(8.5)]),
        profile("Industrials", [dec!(1.5), dec!(6.5), dec!(1.3), dec!(12.0), dec!(8.0)]),
        profile("Utilities", [dec!(0.9), dec!(10.0), dec!(2.5), dec!(9.0), dec!(5.5)]),
        profile("Real Estate", [dec!(1.1), dec!(25.0), dec!(1.8), dec!(7.0), dec!(6.5)]),
        profile("Telecommunications", [dec!(1.0), dec!(9.0), dec!(2.0), dec!(11.0), dec!(6.5)]),
    ]
});

fn profile(industry: &str, averages: [Decimal; 5]) -> IndustryProfile {
    IndustryProfile {
        industry: industry.to_string(),
        averages: RatioKey::ALL
            .into_iter()
            .zip(averages)
            .map(|(ratio, average)| SectorBenchmark { ratio, average })
            .collect(),
    }
}

/// Look up an industry by name, ignoring case and surrounding whitespace.
pub fn get_sector_averages(industry: &str) -> FinIndicatorsResult<&'static IndustryProfile> {
    let wanted = industry.trim();
    SECTOR_TABLE
        .iter()
        .find(|p| p.industry.eq_ignore_ascii_case(wanted))
        .ok_or_else(|| FinIndicatorsError::UnknownIndustry(industry.to_string()))
}

/// Industry names in table order.
pub fn list_industries() -> impl Iterator<Item = &'static str> {
    SECTOR_TABLE.iter().map(|p| p.industry.as_str())
}

/// The whole reference table.
pub fn sector_table() -> &'static [IndustryProfile] {
    &SECTOR_TABLE
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ten_industries() {
        assert_eq!(list_industries().count(), 10);
    }

    #[test]
    fn test_every_profile_covers_the_five_ratios_in_order() {
        for p in sector_table() {
            let keys: Vec<RatioKey> = p.averages.iter().map(|b| b.ratio.clone()).collect();
            assert_eq!(keys, RatioKey::ALL.to_vec(), "{}", p.industry);
        }
    }

    #[test]
    fn test_lookup_is_case_insensitive() {
        let p = get_sector_averages("  technology ").unwrap();
        assert_eq!(p.industry, "Technology");
        assert_eq!(p.average(&RatioKey::NetMarginPct), Some(dec!(15.0)));
    }

    #[test]
    fn test_unknown_industry_fails() {
        match get_sector_averages("Shipbuilding") {
            Err(FinIndicatorsError::UnknownIndustry(name)) => assert_eq!(name, "Shipbuilding"),
            other => panic!("Expected UnknownIndustry, got {other:?}"),
        }
    }

    #[test]
    fn test_empty_name_is_unknown() {
        assert!(get_sector_averages("").is_err());
    }

    #[test]
    fn test_financial_services_has_no_working_capital_baseline() {
        let p = get_sector_averages("Financial Services").unwrap();
        assert_eq!(p.average(&RatioKey::WorkingCapitalRatio), Some(Decimal::ZERO));
    }
}
