pub mod ratios;
pub mod time_value;
pub mod valuation;
