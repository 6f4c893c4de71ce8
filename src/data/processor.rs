//! Data Processor Module
//! Country filtering and plain-vector column extraction on loaded tables.

use polars::prelude::*;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ProcessorError {
    #[error("Polars error: {0}")]
    PolarsError(#[from] PolarsError),
}

/// Splits tables by country and extracts column vectors for reporting
/// and chart rendering.
pub struct DataProcessor;

impl DataProcessor {
    /// Keep rows whose `label_col` equals `country`, preserving row order.
    pub fn filter_by_country(
        df: &DataFrame,
        label_col: &str,
        country: &str,
    ) -> Result<DataFrame, ProcessorError> {
        let subset = df
            .clone()
            .lazy()
            .filter(col(label_col).eq(lit(country)))
            .collect()?;
        Ok(subset)
    }

    /// Cast the Year column to strings so charts treat years as labels.
    pub fn year_labels_to_string(df: &DataFrame) -> Result<DataFrame, ProcessorError> {
        let cast = df
            .clone()
            .lazy()
            .with_column(col("Year").cast(DataType::String))
            .collect()?;
        Ok(cast)
    }

    /// Extract a column as f64 values. Non-float columns are cast first;
    /// nulls are skipped.
    pub fn numeric_column(df: &DataFrame, name: &str) -> Result<Vec<f64>, ProcessorError> {
        let values = df
            .column(name)?
            .cast(&DataType::Float64)?
            .f64()?
            .into_iter()
            .flatten()
            .collect();
        Ok(values)
    }

    /// Extract a column as display strings; nulls become empty strings.
    pub fn string_column(df: &DataFrame, name: &str) -> Result<Vec<String>, ProcessorError> {
        let values = df
            .column(name)?
            .cast(&DataType::String)?
            .str()?
            .into_iter()
            .map(|v| v.unwrap_or_default().to_string())
            .collect();
        Ok(values)
    }

    /// Extract a column as i64 values; nulls are skipped.
    pub fn int_column(df: &DataFrame, name: &str) -> Result<Vec<i64>, ProcessorError> {
        let values = df
            .column(name)?
            .cast(&DataType::Int64)?
            .i64()?
            .into_iter()
            .flatten()
            .collect();
        Ok(values)
    }
}
