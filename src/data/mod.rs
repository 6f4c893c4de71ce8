//! Data module - dataset loading and country filtering

mod loader;
mod processor;

pub use loader::{DataLoader, LoaderError, COTE_DIVOIRE, GHANA, POPULATION_CSV, PRODUCTION_COLUMNS};
pub use processor::{DataProcessor, ProcessorError};
