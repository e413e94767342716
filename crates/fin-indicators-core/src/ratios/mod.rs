pub mod analysis;
pub mod calculator;
pub mod recommendations;
pub mod sectors;
