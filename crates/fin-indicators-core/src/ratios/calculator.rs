use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::types::{not_representable, require_non_negative, require_unit_rate, Money, Rate};
use crate::valuation::wacc::checked_wacc;
use crate::FinIndicatorsResult;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Raw figures for one company snapshot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FinancialFigures {
    pub revenue: Money,
    pub net_income: Money,
    /// Short-term assets
    pub current_assets: Money,
    /// Short-term liabilities
    pub current_liabilities: Money,
    pub total_assets: Money,
    pub total_liabilities: Money,
    pub equity: Money,
    pub cost_of_equity: Rate,
    pub cost_of_debt: Rate,
    pub tax_rate: Rate,
}

/// Identifies a ratio. `Other` carries names this crate has no templates for.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RatioKey {
    #[serde(rename = "working-capital-ratio")]
    WorkingCapitalRatio,
    #[serde(rename = "net-margin-pct")]
    NetMarginPct,
    #[serde(rename = "debt-ratio")]
    DebtRatio,
    #[serde(rename = "ROE-pct")]
    RoePct,
    #[serde(rename = "WACC-pct")]
    WaccPct,
    #[serde(untagged)]
    Other(String),
}

impl RatioKey {
    /// The five ratios every [`RatioSet`] carries, in canonical order.
    pub const ALL: [RatioKey; 5] = [
        RatioKey::WorkingCapitalRatio,
        RatioKey::NetMarginPct,
        RatioKey::DebtRatio,
        RatioKey::RoePct,
        RatioKey::WaccPct,
    ];

    /// Wire name, e.g. `net-margin-pct`.
    pub fn name(&self) -> &str {
        match self {
            RatioKey::WorkingCapitalRatio => "working-capital-ratio",
            RatioKey::NetMarginPct => "net-margin-pct",
            RatioKey::DebtRatio => "debt-ratio",
            RatioKey::RoePct => "ROE-pct",
            RatioKey::WaccPct => "WACC-pct",
            RatioKey::Other(name) => name,
        }
    }
}

impl std::fmt::Display for RatioKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RatioKey::WorkingCapitalRatio => write!(f, "Working capital ratio"),
            RatioKey::NetMarginPct => write!(f, "Net margin (%)"),
            RatioKey::DebtRatio => write!(f, "Debt ratio"),
            RatioKey::RoePct => write!(f, "Return on equity (%)"),
            RatioKey::WaccPct => write!(f, "WACC (%)"),
            RatioKey::Other(name) => write!(f, "{name}"),
        }
    }
}

/// A computed ratio, or the explicit marker for a zero denominator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RatioValue {
    Defined(Decimal),
    Undefined,
}

impl RatioValue {
    pub fn value(&self) -> Option<Decimal> {
        match self {
            RatioValue::Defined(v) => Some(*v),
            RatioValue::Undefined => None,
        }
    }

    pub fn is_undefined(&self) -> bool {
        matches!(self, RatioValue::Undefined)
    }
}

impl std::fmt::Display for RatioValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RatioValue::Defined(v) => write!(f, "{v}"),
            RatioValue::Undefined => write!(f, "undefined"),
        }
    }
}

/// The five ratios of one company, each rounded to 1 dp.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RatioSet {
    #[serde(rename = "working-capital-ratio")]
    pub working_capital_ratio: RatioValue,
    #[serde(rename = "net-margin-pct")]
    pub net_margin_pct: RatioValue,
    #[serde(rename = "debt-ratio")]
    pub debt_ratio: RatioValue,
    #[serde(rename = "ROE-pct")]
    pub roe_pct: RatioValue,
    #[serde(rename = "WACC-pct")]
    pub wacc_pct: RatioValue,
}

impl RatioSet {
    /// Value for `key`; `None` for keys outside the fixed five.
    pub fn get(&self, key: &RatioKey) -> Option<RatioValue> {
        match key {
            RatioKey::WorkingCapitalRatio => Some(self.working_capital_ratio),
            RatioKey::NetMarginPct => Some(self.net_margin_pct),
            RatioKey::DebtRatio => Some(self.debt_ratio),
            RatioKey::RoePct => Some(self.roe_pct),
            RatioKey::WaccPct => Some(self.wacc_pct),
            RatioKey::Other(_) => None,
        }
    }

    /// `(key, value)` pairs in canonical order.
    pub fn iter(&self) -> impl Iterator<Item = (RatioKey, RatioValue)> + '_ {
        RatioKey::ALL
            .into_iter()
            .filter_map(move |key| self.get(&key).map(|value| (key, value)))
    }

    /// Keys whose value is [`RatioValue::Undefined`].
    pub fn undefined_keys(&self) -> Vec<RatioKey> {
        self.iter()
            .filter(|(_, value)| value.is_undefined())
            .map(|(key, _)| key)
            .collect()
    }
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Derive the five ratios from a company's raw figures.
///
/// A zero denominator yields [`RatioValue::Undefined`] for that ratio only.
/// A ratio that falls outside the `Decimal` range is an error, never
/// Undefined. WACC-pct weights the cost of debt by total liabilities.
pub fn compute_ratios(figures: &FinancialFigures) -> FinIndicatorsResult<RatioSet> {
    validate_figures(figures)?;

    let hundred = dec!(100);
    let wacc_pct = checked_wacc(
        figures.equity,
        figures.total_liabilities,
        figures.cost_of_equity,
        figures.cost_of_debt,
        figures.tax_rate,
    )
    .and_then(|rate| rate.checked_mul(hundred))
    .ok_or_else(|| not_representable(RatioKey::WaccPct.name()))?;

    let ratios = RatioSet {
        working_capital_ratio: ratio(
            RatioKey::WorkingCapitalRatio,
            figures.current_assets,
            figures.current_liabilities,
            Decimal::ONE,
        )?,
        net_margin_pct: ratio(
            RatioKey::NetMarginPct,
            figures.net_income,
            figures.revenue,
            hundred,
        )?,
        debt_ratio: ratio(
            RatioKey::DebtRatio,
            figures.total_liabilities,
            figures.equity,
            Decimal::ONE,
        )?,
        roe_pct: ratio(RatioKey::RoePct, figures.net_income, figures.equity, hundred)?,
        wacc_pct: RatioValue::Defined(round_one_dp(wacc_pct)),
    };

    tracing::debug!(?ratios, "ratio set computed");
    Ok(ratios)
}

// ---------------------------------------------------------------------------
// Internal helpers
// ---------------------------------------------------------------------------

fn validate_figures(figures: &FinancialFigures) -> FinIndicatorsResult<()> {
    require_non_negative("revenue", figures.revenue)?;
    require_non_negative("net_income", figures.net_income)?;
    require_non_negative("current_assets", figures.current_assets)?;
    require_non_negative("current_liabilities", figures.current_liabilities)?;
    require_non_negative("total_assets", figures.total_assets)?;
    require_non_negative("total_liabilities", figures.total_liabilities)?;
    require_non_negative("equity", figures.equity)?;
    require_unit_rate("cost_of_equity", figures.cost_of_equity)?;
    require_unit_rate("cost_of_debt", figures.cost_of_debt)?;
    require_unit_rate("tax_rate", figures.tax_rate)?;
    Ok(())
}

fn ratio(
    key: RatioKey,
    numerator: Money,
    denominator: Money,
    scale: Decimal,
) -> FinIndicatorsResult<RatioValue> {
    if denominator.is_zero() {
        return Ok(RatioValue::Undefined);
    }
    numerator
        .checked_mul(scale)
        .and_then(|n| n.checked_div(denominator))
        .map(|v| RatioValue::Defined(round_one_dp(v)))
        .ok_or_else(|| not_representable(key.name()))
}

fn round_one_dp(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(1, RoundingStrategy::MidpointNearestEven)
}
