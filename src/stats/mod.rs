//! Stats module - descriptive statistics and number formatting

mod calculator;

pub use calculator::{format_thousands, SummaryStats};
