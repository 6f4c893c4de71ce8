//! Statistics Calculator Module
//! Descriptive statistics and console formatting for country subsets.

use statrs::statistics::Statistics;

/// Summary statistics for one numeric column of a country subset.
///
/// `std_dev` is the population (divide-by-N) estimator, matching the
/// figures the report blocks print.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SummaryStats {
    pub count: usize,
    pub mean: f64,
    pub min: f64,
    pub max: f64,
    pub std_dev: f64,
}

impl SummaryStats {
    /// Compute statistics for a sequence of values. Empty input yields
    /// NaN fields and a count of zero.
    pub fn from_values(values: &[f64]) -> Self {
        Self {
            count: values.len(),
            mean: values.mean(),
            min: values.min(),
            max: values.max(),
            std_dev: values.population_std_dev(),
        }
    }

    /// Render the per-country console block: mean, min, max and standard
    /// deviation, thousands-grouped with no decimal places.
    pub fn to_block(&self, country: &str) -> String {
        format!(
            "=== {} Stats ===\nMean: {}\nMin: {}\nMax: {}\nStd Dev: {}\n",
            country,
            format_thousands(self.mean),
            format_thousands(self.min),
            format_thousands(self.max),
            format_thousands(self.std_dev),
        )
    }
}

/// Format a value with `,` thousands separators and no decimal places.
pub fn format_thousands(value: f64) -> String {
    if !value.is_finite() {
        return value.to_string();
    }

    let rounded = value.round() as i64;
    let digits = rounded.abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    if rounded < 0 {
        format!("-{grouped}")
    } else {
        grouped
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stats_respect_value_bounds() {
        let stats = SummaryStats::from_values(&[10.0, 20.0, 30.0, 40.0]);
        assert_eq!(stats.count, 4);
        assert_eq!(stats.mean, 25.0);
        assert_eq!(stats.min, 10.0);
        assert_eq!(stats.max, 40.0);
        assert!(stats.min <= stats.mean && stats.mean <= stats.max);
    }

    #[test]
    fn stats_are_order_independent() {
        // values chosen so every incremental step is exact in f64
        let a = SummaryStats::from_values(&[8.0, 16.0, 24.0, 32.0]);
        let b = SummaryStats::from_values(&[8.0, 24.0, 16.0, 32.0]);
        assert_eq!(a, b);
        assert_eq!(a.mean, 20.0);
    }

    #[test]
    fn constant_sequence_has_zero_std_dev() {
        let stats = SummaryStats::from_values(&[7.0; 5]);
        assert_eq!(stats.std_dev, 0.0);
        assert_eq!(stats.mean, 7.0);
    }

    #[test]
    fn empty_input_yields_nan_fields() {
        let stats = SummaryStats::from_values(&[]);
        assert_eq!(stats.count, 0);
        assert!(stats.mean.is_nan());
        assert!(stats.min.is_nan());
        assert!(stats.max.is_nan());
        assert!(stats.std_dev.is_nan());
    }

    #[test]
    fn thousands_grouping() {
        assert_eq!(format_thousands(0.0), "0");
        assert_eq!(format_thousands(999.0), "999");
        assert_eq!(format_thousands(1000.0), "1,000");
        assert_eq!(format_thousands(6_728_000.0), "6,728,000");
        assert_eq!(format_thousands(-1_234_567.0), "-1,234,567");
        // rounds to the nearest integer before grouping
        assert_eq!(format_thousands(1234.6), "1,235");
    }

    #[test]
    fn block_text_layout() {
        let stats = SummaryStats::from_values(&[1000.0, 2000.0, 3000.0]);
        let block = stats.to_block("Sample");
        assert_eq!(
            block,
            "=== Sample Stats ===\nMean: 2,000\nMin: 1,000\nMax: 3,000\nStd Dev: 816\n"
        );
    }
}
