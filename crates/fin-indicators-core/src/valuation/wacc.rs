use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::types::{
    not_representable, require_non_negative, require_unit_rate, with_metadata, ComputationOutput,
    Money, Percent, Rate,
};
use crate::FinIndicatorsResult;

/// Input parameters for the Weighted Average Cost of Capital (CMPC).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WaccInput {
    /// Equity financing (amount or proportion)
    pub equity: Money,
    /// Debt financing, same unit as `equity`
    pub debt: Money,
    /// Cost of equity
    pub cost_of_equity: Rate,
    /// Pre-tax cost of debt
    pub cost_of_debt: Rate,
    /// Corporate tax rate
    pub tax_rate: Rate,
}

impl WaccInput {
    /// Build an input from the equity share of the capital structure; debt
    /// takes the remaining `1 - equity_weight`.
    pub fn from_equity_weight(
        equity_weight: Rate,
        cost_of_equity: Rate,
        cost_of_debt: Rate,
        tax_rate: Rate,
    ) -> FinIndicatorsResult<Self> {
        require_unit_rate("equity_weight", equity_weight)?;
        Ok(Self {
            equity: equity_weight,
            debt: Decimal::ONE - equity_weight,
            cost_of_equity,
            cost_of_debt,
            tax_rate,
        })
    }
}

impl Default for WaccInput {
    /// 60/40 equity/debt split, Ke 10%, Kd 5%, 30% tax.
    fn default() -> Self {
        Self {
            equity: dec!(0.6),
            debt: dec!(0.4),
            cost_of_equity: dec!(0.10),
            cost_of_debt: dec!(0.05),
            tax_rate: dec!(0.30),
        }
    }
}

/// Output of the WACC calculation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WaccOutput {
    /// Weighted average cost of capital
    pub wacc: Rate,
    /// WACC as a percentage, rounded to 2 dp
    pub wacc_pct: Percent,
    /// Equity share of the capital structure
    pub equity_weight: Rate,
    /// Debt share of the capital structure
    pub debt_weight: Rate,
    /// Kd * (1 - t)
    pub after_tax_cost_of_debt: Rate,
}

/// Weighted average cost of capital.
///
/// WACC = E/(E+D) * Ke + D/(E+D) * Kd * (1 - t)
///
/// Returns zero when `equity + debt` is zero. Inputs are not validated and
/// the arithmetic is unchecked; use [`compute_wacc`] at a trust boundary.
pub fn wacc(
    equity: Money,
    debt: Money,
    cost_of_equity: Rate,
    cost_of_debt: Rate,
    tax_rate: Rate,
) -> Rate {
    let capital = equity + debt;
    if capital.is_zero() {
        return Decimal::ZERO;
    }
    (equity / capital) * cost_of_equity
        + (debt / capital) * cost_of_debt * (Decimal::ONE - tax_rate)
}

/// [`wacc`] with checked arithmetic; `None` if any term overflows.
pub(crate) fn checked_wacc(
    equity: Money,
    debt: Money,
    cost_of_equity: Rate,
    cost_of_debt: Rate,
    tax_rate: Rate,
) -> Option<Rate> {
    let capital = equity.checked_add(debt)?;
    if capital.is_zero() {
        return Some(Decimal::ZERO);
    }
    let equity_term = equity.checked_div(capital)?.checked_mul(cost_of_equity)?;
    let debt_term = debt
        .checked_div(capital)?
        .checked_mul(cost_of_debt)?
        .checked_mul(Decimal::ONE.checked_sub(tax_rate)?)?;
    equity_term.checked_add(debt_term)
}

/// [`wacc`] with fail-fast validation: amounts must be non-negative and
/// rates must lie in [0, 1]. Capital beyond the `Decimal` range is rejected.
pub fn compute_wacc(
    equity: Money,
    debt: Money,
    cost_of_equity: Rate,
    cost_of_debt: Rate,
    tax_rate: Rate,
) -> FinIndicatorsResult<Rate> {
    require_non_negative("equity", equity)?;
    require_non_negative("debt", debt)?;
    require_unit_rate("cost_of_equity", cost_of_equity)?;
    require_unit_rate("cost_of_debt", cost_of_debt)?;
    require_unit_rate("tax_rate", tax_rate)?;
    checked_wacc(equity, debt, cost_of_equity, cost_of_debt, tax_rate)
        .ok_or_else(|| not_representable("equity + debt"))
}

/// Calculate the WACC together with the capital structure split.
pub fn calculate_wacc(input: &WaccInput) -> FinIndicatorsResult<ComputationOutput<WaccOutput>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    let wacc = compute_wacc(
        input.equity,
        input.debt,
        input.cost_of_equity,
        input.cost_of_debt,
        input.tax_rate,
    )?;

    let capital = input
        .equity
        .checked_add(input.debt)
        .ok_or_else(|| not_representable("equity + debt"))?;
    let (equity_weight, debt_weight) = if capital.is_zero() {
        warnings.push("Equity and debt are both zero; WACC reported as 0.".into());
        (Decimal::ZERO, Decimal::ZERO)
    } else {
        (input.equity / capital, input.debt / capital)
    };

    if wacc > dec!(0.20) {
        warnings.push(format!(
            "WACC of {} exceeds 20%; verify the cost of equity and debt",
            wacc.round_dp(4)
        ));
    }
    if input.cost_of_debt > input.cost_of_equity {
        warnings.push(
            "Cost of debt exceeds cost of equity; debt is usually the cheaper source of capital"
                .into(),
        );
    }

    let output = WaccOutput {
        wacc,
        wacc_pct: (wacc * dec!(100)).round_dp(2),
        equity_weight,
        debt_weight,
        after_tax_cost_of_debt: input.cost_of_debt * (Decimal::ONE - input.tax_rate),
    };

    tracing::debug!(wacc = %output.wacc, equity_weight = %equity_weight, "WACC computed");

    Ok(with_metadata(
        "WACC = E/V x Ke + D/V x Kd x (1 - t)",
        input,
        warnings,
        start.elapsed().as_micros() as u64,
        output,
    ))
}
