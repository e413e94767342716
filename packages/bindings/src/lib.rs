use napi::Result as NapiResult;
use napi_derive::napi;

use fin_indicators_core::ratios::{analysis, calculator, recommendations, sectors};
use fin_indicators_core::{time_value, valuation::wacc};

/// Convert any Display error into a napi::Error.
fn to_napi_error(e: impl std::fmt::Display) -> napi::Error {
    napi::Error::from_reason(e.to_string())
}

// ---------------------------------------------------------------------------
// Cost of capital and time value
// ---------------------------------------------------------------------------

#[napi]
pub fn calculate_wacc(input_json: String) -> NapiResult<String> {
    let input: wacc::WaccInput = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = wacc::calculate_wacc(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn future_value(input_json: String) -> NapiResult<String> {
    let input: time_value::TimeValueInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = time_value::calculate_future_value(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn present_value(input_json: String) -> NapiResult<String> {
    let input: time_value::TimeValueInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = time_value::calculate_present_value(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Sector ratio analysis
// ---------------------------------------------------------------------------

#[napi]
pub fn analyze_ratios(input_json: String) -> NapiResult<String> {
    let input: analysis::RatioAnalysisInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = analysis::analyze_ratios(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[derive(serde::Deserialize)]
struct FindingsBindingInput {
    ratios: calculator::RatioSet,
    benchmarks: Vec<sectors::SectorBenchmark>,
}

/// Findings against caller-supplied benchmarks instead of the built-in table.
#[napi]
pub fn generate_findings(input_json: String) -> NapiResult<String> {
    let input: FindingsBindingInput = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let findings = recommendations::generate_findings(&input.ratios, &input.benchmarks);
    serde_json::to_string(&findings).map_err(to_napi_error)
}

#[napi]
pub fn sector_averages(industry: String) -> NapiResult<String> {
    let profile = sectors::get_sector_averages(&industry).map_err(to_napi_error)?;
    serde_json::to_string(profile).map_err(to_napi_error)
}

#[napi]
pub fn list_industries() -> Vec<String> {
    sectors::list_industries().map(str::to_string).collect()
}
