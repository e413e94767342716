use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::ratios::calculator::{RatioKey, RatioSet, RatioValue};
use crate::ratios::sectors::SectorBenchmark;

/// Width of the "in line" band around a sector average.
const UPPER_BAND: Decimal = dec!(1.2);
const LOWER_BAND: Decimal = dec!(0.8);

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Where a company ratio falls relative to its sector average.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Band {
    Above,
    Within,
    Below,
    /// The sector average is zero, so there is no baseline.
    NoData,
    /// The company ratio has a zero denominator.
    Undefined,
}

impl std::fmt::Display for Band {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Band::Above => write!(f, "above sector average"),
            Band::Within => write!(f, "in line with sector average"),
            Band::Below => write!(f, "below sector average"),
            Band::NoData => write!(f, "no sector data"),
            Band::Undefined => write!(f, "cannot classify"),
        }
    }
}

/// One classified comparison of a company ratio with its sector average.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Finding {
    pub ratio: RatioKey,
    pub band: Band,
    pub company_value: RatioValue,
    pub sector_average: Decimal,
    pub message: String,
}

impl std::fmt::Display for Finding {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}: {} vs {} ({})",
            self.ratio, self.company_value, self.sector_average, self.band
        )
    }
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Classify `value` against a sector `average`.
///
/// A zero average is NoData, an undefined value is Undefined. Otherwise the
/// value is Above when strictly greater than 120% of the average, Below when
/// strictly less than 80%, and Within for everything in between, boundaries
/// included.
pub fn classify(value: RatioValue, average: Decimal) -> Band {
    if average.is_zero() {
        return Band::NoData;
    }
    let Some(v) = value.value() else {
        return Band::Undefined;
    };
    // A bound past the Decimal range cannot be crossed.
    let above = average.checked_mul(UPPER_BAND).is_some_and(|high| v > high);
    let below = average.checked_mul(LOWER_BAND).is_some_and(|low| v < low);
    if above {
        Band::Above
    } else if below {
        Band::Below
    } else {
        Band::Within
    }
}

/// One finding per benchmark whose ratio the set carries, in benchmark order.
/// Benchmarks for ratios outside the set are skipped.
pub fn generate_findings(ratios: &RatioSet, benchmarks: &[SectorBenchmark]) -> Vec<Finding> {
    benchmarks
        .iter()
        .filter_map(|benchmark| {
            let company_value = ratios.get(&benchmark.ratio)?;
            let band = classify(company_value, benchmark.average);
            tracing::debug!(ratio = benchmark.ratio.name(), ?band, "ratio classified");
            Some(Finding {
                ratio: benchmark.ratio.clone(),
                band,
                company_value,
                sector_average: benchmark.average,
                message: message_for(&benchmark.ratio, band).to_string(),
            })
        })
        .collect()
}

/// Canned explanation for a ratio in a band.
pub fn message_for(ratio: &RatioKey, band: Band) -> &'static str {
    match (ratio, band) {
        (_, Band::NoData) => {
            "No sector data is available for this ratio, so no comparison can be made."
        }
        (_, Band::Undefined) => {
            "This ratio cannot be computed because its denominator is zero, so it cannot be \
             classified against the sector."
        }

        (RatioKey::WorkingCapitalRatio, Band::Above) => {
            "The working capital ratio is significantly above the sector average. Short-term \
             obligations are comfortably covered, but a large share of assets may be sitting \
             idle in cash, receivables or inventory; consider putting surplus liquidity to \
             work or returning it to shareholders."
        }
        (RatioKey::WorkingCapitalRatio, Band::Within) => {
            "The working capital ratio is in line with the sector average. Liquidity is \
             adequate for day-to-day operations; keep monitoring receivables and inventory \
             turnover to preserve this balance."
        }
        (RatioKey::WorkingCapitalRatio, Band::Below) => {
            "The working capital ratio is below the sector average. The company may struggle \
             to meet short-term obligations; consider negotiating longer supplier terms, \
             speeding up collections or securing a credit line."
        }

        (RatioKey::NetMarginPct, Band::Above) => {
            "The net margin is significantly above the sector average. The company converts \
             revenue into profit more efficiently than its peers, which points to pricing \
             power or tight cost control; check that the margin is sustainable and not driven \
             by one-off items."
        }
        (RatioKey::NetMarginPct, Band::Within) => {
            "The net margin is in line with the sector average. Profitability matches that of \
             comparable companies; gains will come from incremental cost savings or a better \
             product mix."
        }
        (RatioKey::NetMarginPct, Band::Below) => {
            "The net margin is below the sector average. Costs absorb a larger share of \
             revenue than at peers; review operating expenses, pricing and financing costs to \
             restore profitability."
        }

        (RatioKey::DebtRatio, Band::Above) => {
            "The debt ratio is significantly above the sector average. The company relies \
             heavily on borrowed funds, which raises financial risk and interest charges; \
             consider reducing leverage or strengthening equity."
        }
        (RatioKey::DebtRatio, Band::Within) => {
            "The debt ratio is in line with the sector average. The balance between debt and \
             equity financing is comparable to peers and leaves room to borrow if needed."
        }
        (RatioKey::DebtRatio, Band::Below) => {
            "The debt ratio is below the sector average. The company is conservatively \
             financed; moderate additional borrowing could fund growth and lower the overall \
             cost of capital through the tax shield."
        }

        (RatioKey::RoePct, Band::Above) => {
            "Return on equity is significantly above the sector average. Shareholders' funds \
             are used very profitably; confirm that the return is not inflated by high \
             leverage or a thin equity base."
        }
        (RatioKey::RoePct, Band::Within) => {
            "Return on equity is in line with the sector average. Shareholders earn a return \
             comparable to what the industry typically delivers."
        }
        (RatioKey::RoePct, Band::Below) => {
            "Return on equity is below the sector average. Equity capital is generating less \
             profit than at peers; look at margins, asset turnover and capital structure for \
             improvement levers."
        }

        (RatioKey::WaccPct, Band::Above) => {
            "The cost of capital is significantly above the sector average. Financing is \
             expensive, which raises the hurdle rate for new projects; consider refinancing \
             debt or rebalancing the capital structure."
        }
        (RatioKey::WaccPct, Band::Within) => {
            "The cost of capital is in line with the sector average. The company finances \
             itself on terms similar to its peers."
        }
        (RatioKey::WaccPct, Band::Below) => {
            "The cost of capital is below the sector average. The company enjoys cheap \
             financing, which gives it a competitive edge when investing; make sure the \
             estimate of the cost of equity is not understated."
        }

        (RatioKey::Other(_), Band::Above) => {
            "This ratio is significantly above the sector average; review the drivers behind \
             the gap."
        }
        (RatioKey::Other(_), Band::Within) => "This ratio is in line with the sector average.",
        (RatioKey::Other(_), Band::Below) => {
            "This ratio is below the sector average; review the drivers behind the gap."
        }
    }
}
