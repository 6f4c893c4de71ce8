//! Dataset Loader Module
//! Loads the cocoa production CSV and the embedded population table using Polars.

use polars::prelude::*;
use std::io::Cursor;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Country label used by both datasets for Côte d'Ivoire.
pub const COTE_DIVOIRE: &str = "Côte d'Ivoire";
/// Country label used by both datasets for Ghana.
pub const GHANA: &str = "Ghana";

/// Columns the cocoa production CSV must provide.
pub const PRODUCTION_COLUMNS: [&str; 4] = ["Year", "Area", "Yield", "Area harvested"];

/// Population of both countries for selected years, 1960-2023.
pub const POPULATION_CSV: &str = "\
Year,Country,Population
1960,Côte d'Ivoire,3508000
1960,Ghana,6728000
1970,Côte d'Ivoire,5411000
1970,Ghana,8678000
1980,Côte d'Ivoire,8066000
1980,Ghana,12081000
1990,Côte d'Ivoire,11962000
1990,Ghana,15117000
2000,Côte d'Ivoire,16387000
2000,Ghana,19278000
2010,Côte d'Ivoire,21095000
2010,Ghana,24957000
2020,Côte d'Ivoire,26378000
2020,Ghana,31073000
2023,Côte d'Ivoire,28891000
2023,Ghana,34122000
";

#[derive(Error, Debug)]
pub enum LoaderError {
    #[error("dataset not found: {}", .0.display())]
    NotFound(PathBuf),
    #[error("failed to parse dataset: {0}")]
    Malformed(#[from] PolarsError),
    #[error("dataset is missing the {0:?} column")]
    MissingColumn(String),
}

/// Loads tabular datasets into Polars DataFrames.
pub struct DataLoader;

impl DataLoader {
    /// Load the cocoa production CSV from disk and check its schema.
    pub fn load_production_csv(path: &Path) -> Result<DataFrame, LoaderError> {
        if !path.exists() {
            return Err(LoaderError::NotFound(path.to_path_buf()));
        }

        // Use lazy evaluation for memory efficiency, then collect
        let df = LazyCsvReader::new(path)
            .with_infer_schema_length(Some(100))
            .finish()?
            .collect()?;

        Self::require_columns(&df, &PRODUCTION_COLUMNS)?;
        Ok(df)
    }

    /// Parse the embedded population table.
    pub fn embedded_population() -> Result<DataFrame, LoaderError> {
        let df = CsvReadOptions::default()
            .with_has_header(true)
            .into_reader_with_file_handle(Cursor::new(POPULATION_CSV))
            .finish()?;

        Self::require_columns(&df, &["Year", "Country", "Population"])?;
        Ok(df)
    }

    fn require_columns(df: &DataFrame, required: &[&str]) -> Result<(), LoaderError> {
        for name in required {
            if df.column(name).is_err() {
                return Err(LoaderError::MissingColumn((*name).to_string()));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn embedded_population_has_all_rows() {
        let df = DataLoader::embedded_population().unwrap();
        assert_eq!(df.height(), 16);
        assert_eq!(df.get_column_names().len(), 3);
    }

    #[test]
    fn missing_file_reports_not_found() {
        let err = DataLoader::load_production_csv(Path::new("no/such/file.csv")).unwrap_err();
        assert!(matches!(err, LoaderError::NotFound(_)));
    }

    #[test]
    fn production_csv_loads_with_required_columns() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("production.csv");
        std::fs::write(
            &path,
            "Year,Area,Yield,Area harvested\n\
             2020,Ghana,5500,1700000\n\
             2021,Ghana,5600,1710000\n",
        )
        .unwrap();

        let df = DataLoader::load_production_csv(&path).unwrap();
        assert_eq!(df.height(), 2);
        assert!(df.column("Area harvested").is_ok());
    }

    #[test]
    fn incomplete_schema_reports_missing_column() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("partial.csv");
        std::fs::write(&path, "Year,Area\n2020,Ghana\n").unwrap();

        let err = DataLoader::load_production_csv(&path).unwrap_err();
        assert!(matches!(err, LoaderError::MissingColumn(c) if c == "Yield"));
    }
}
