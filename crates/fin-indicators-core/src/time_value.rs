use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::iter::FusedIterator;
use std::time::Instant;

use crate::error::FinIndicatorsError;
use crate::types::{
    not_representable, require_non_negative, require_unit_rate, with_metadata, ComputationOutput,
    Currency, Money, Rate,
};
use crate::FinIndicatorsResult;

/// Longest horizon accepted at the library boundary, in years.
pub const MAX_YEARS: u32 = 50;

// ---------------------------------------------------------------------------
// Lazy compounding series
// ---------------------------------------------------------------------------

/// Whether a series grows an amount forward or discounts it back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Compounding {
    Accumulate,
    Discount,
}

/// Year-by-year values of `amount` compounded (or discounted) at a fixed
/// annual rate, for t = 0..=years.
///
/// The series is lazy and finite. Cloning it, or calling [`restart`], gives
/// an independent walk from year 0. Arithmetic is checked: if a term cannot
/// be represented the series ends early rather than panicking.
///
/// [`restart`]: CompoundSeries::restart
#[derive(Debug, Clone)]
pub struct CompoundSeries {
    amount: Money,
    rate: Rate,
    years: u32,
    direction: Compounding,
    next_year: u32,
    factor: Option<Decimal>,
}

impl CompoundSeries {
    fn new(amount: Money, rate: Rate, years: u32, direction: Compounding) -> Self {
        Self {
            amount,
            rate,
            years,
            direction,
            next_year: 0,
            factor: Some(Decimal::ONE),
        }
    }

    /// A fresh copy of this series positioned at year 0.
    pub fn restart(&self) -> Self {
        Self::new(self.amount, self.rate, self.years, self.direction)
    }

    /// Value at t = years, or `None` if the series cannot reach it.
    pub fn final_value(&self) -> Option<Money> {
        let years = self.years as usize;
        self.restart()
            .enumerate()
            .last()
            .filter(|(t, _)| *t == years)
            .map(|(_, value)| value)
    }
}

impl Iterator for CompoundSeries {
    type Item = Money;

    fn next(&mut self) -> Option<Money> {
        if self.next_year > self.years {
            return None;
        }
        let factor = self.factor?;
        let value = match self.direction {
            Compounding::Accumulate => self.amount.checked_mul(factor),
            Compounding::Discount => self.amount.checked_div(factor),
        };
        if value.is_none() {
            self.factor = None;
            return None;
        }
        self.next_year += 1;
        self.factor = factor.checked_mul(Decimal::ONE + self.rate);
        value
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        if self.factor.is_none() || self.next_year > self.years {
            return (0, Some(0));
        }
        (0, Some((self.years - self.next_year) as usize + 1))
    }
}

impl FusedIterator for CompoundSeries {}

/// `principal * (1 + annual_rate)^t` for t = 0..=years.
///
/// No validation; see [`compute_future_value_series`] for the checked entry point.
pub fn future_value_series(principal: Money, annual_rate: Rate, years: u32) -> CompoundSeries {
    CompoundSeries::new(principal, annual_rate, years, Compounding::Accumulate)
}

/// `future_amount / (1 + discount_rate)^t` for t = 0..=years.
pub fn present_value_series(
    future_amount: Money,
    discount_rate: Rate,
    years: u32,
) -> CompoundSeries {
    CompoundSeries::new(future_amount, discount_rate, years, Compounding::Discount)
}

/// Validated future value series: non-negative principal, rate in [0, 1],
/// horizon of at most [`MAX_YEARS`].
pub fn compute_future_value_series(
    principal: Money,
    annual_rate: Rate,
    years: u32,
) -> FinIndicatorsResult<CompoundSeries> {
    validate_series_input("principal", principal, "annual_rate", annual_rate, years)?;
    ensure_representable(future_value_series(principal, annual_rate, years), "principal")
}

/// Validated present value series, same bounds as the future value one.
pub fn compute_present_value_series(
    future_amount: Money,
    discount_rate: Rate,
    years: u32,
) -> FinIndicatorsResult<CompoundSeries> {
    validate_series_input(
        "future_amount",
        future_amount,
        "discount_rate",
        discount_rate,
        years,
    )?;
    ensure_representable(
        present_value_series(future_amount, discount_rate, years),
        "future_amount",
    )
}

// ---------------------------------------------------------------------------
// Schedule workflows
// ---------------------------------------------------------------------------

/// Input for a future or present value schedule.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimeValueInput {
    /// Starting amount (future value) or target amount (present value)
    pub amount: Money,
    /// Annual interest or discount rate
    pub rate: Rate,
    /// Horizon in whole years
    pub years: u32,
    #[serde(default)]
    pub currency: Currency,
}

/// One point of a schedule, ready for charting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SchedulePoint {
    pub year: u32,
    pub value: Money,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimeValueOutput {
    pub currency: Currency,
    /// Values for year 0 through the horizon, rounded to cents
    pub schedule: Vec<SchedulePoint>,
    /// Value at the horizon
    pub final_value: Money,
    /// `final_value - amount`; negative for a present value
    pub total_change: Money,
}

/// Year-by-year growth of an investment under annual compounding.
pub fn calculate_future_value(
    input: &TimeValueInput,
) -> FinIndicatorsResult<ComputationOutput<TimeValueOutput>> {
    let start = Instant::now();
    let series = compute_future_value_series(input.amount, input.rate, input.years)?;
    let (output, warnings) = build_schedule(input, series);

    tracing::debug!(
        amount = %input.amount,
        rate = %input.rate,
        years = input.years,
        final_value = %output.final_value,
        "future value schedule computed"
    );

    Ok(with_metadata(
        "Future value under annual compounding: P x (1 + r)^t",
        input,
        warnings,
        start.elapsed().as_micros() as u64,
        output,
    ))
}

/// Year-by-year present value of a future amount under annual discounting.
pub fn calculate_present_value(
    input: &TimeValueInput,
) -> FinIndicatorsResult<ComputationOutput<TimeValueOutput>> {
    let start = Instant::now();
    let series = compute_present_value_series(input.amount, input.rate, input.years)?;
    let (output, warnings) = build_schedule(input, series);

    tracing::debug!(
        amount = %input.amount,
        rate = %input.rate,
        years = input.years,
        final_value = %output.final_value,
        "present value schedule computed"
    );

    Ok(with_metadata(
        "Present value under annual discounting: F / (1 + r)^t",
        input,
        warnings,
        start.elapsed().as_micros() as u64,
        output,
    ))
}

// ---------------------------------------------------------------------------
// Internal helpers
// ---------------------------------------------------------------------------

fn validate_series_input(
    amount_field: &str,
    amount: Money,
    rate_field: &str,
    rate: Rate,
    years: u32,
) -> FinIndicatorsResult<()> {
    require_non_negative(amount_field, amount)?;
    require_unit_rate(rate_field, rate)?;
    if years > MAX_YEARS {
        return Err(FinIndicatorsError::InvalidInput {
            field: "years".into(),
            reason: format!("Horizon must be at most {MAX_YEARS} years, got {years}"),
        });
    }
    Ok(())
}

fn ensure_representable(
    series: CompoundSeries,
    amount_field: &str,
) -> FinIndicatorsResult<CompoundSeries> {
    if series.final_value().is_none() {
        return Err(not_representable(amount_field));
    }
    Ok(series)
}

fn to_cents(value: Money) -> Money {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

fn build_schedule(input: &TimeValueInput, series: CompoundSeries) -> (TimeValueOutput, Vec<String>) {
    let mut warnings = Vec::new();
    if input.rate.is_zero() {
        warnings.push("Rate is zero; every year carries the same value.".into());
    }
    if input.years == 0 {
        warnings.push("Horizon is zero years; the schedule holds the starting amount only.".into());
    }

    let schedule: Vec<SchedulePoint> = series
        .zip(0u32..)
        .map(|(value, year)| SchedulePoint {
            year,
            value: to_cents(value),
        })
        .collect();

    let final_value = schedule
        .last()
        .map(|p| p.value)
        .unwrap_or_else(|| to_cents(input.amount));

    let output = TimeValueOutput {
        currency: input.currency.clone(),
        total_change: final_value - to_cents(input.amount),
        final_value,
        schedule,
    };
    (output, warnings)
}
