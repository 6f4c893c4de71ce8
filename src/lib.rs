//! Agrichart - cocoa production & population analytics
//!
//! Two small pipelines over Côte d'Ivoire / Ghana datasets: load a table,
//! split it by country, compute descriptive statistics and render static
//! charts. The binaries `cocoa-analysis` and `population-trends` wire the
//! pieces together.

pub mod charts;
pub mod data;
pub mod stats;

use crate::data::LoaderError;
use std::path::PathBuf;
use tracing::warn;
use tracing_subscriber::{fmt, EnvFilter};

/// Initialize stderr logging, honoring `RUST_LOG` when set.
///
/// Report text goes to stdout; keeping logs on stderr leaves the report
/// stream clean for redirection.
pub fn init_tracing() {
    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt::Subscriber::builder()
        .with_env_filter(env)
        .with_writer(std::io::stderr)
        .init();
}

/// Map a pipeline failure to the single console line the binaries print.
///
/// A missing input file gets a guidance message; everything else shares a
/// generic wrapper.
pub fn describe_failure(err: &anyhow::Error) -> String {
    if let Some(LoaderError::NotFound(path)) = err.downcast_ref::<LoaderError>() {
        format!(
            "Error: '{}' not found. Place the dataset there or pass its path as the first argument.",
            path.display()
        )
    } else {
        format!("An error occurred: {err}")
    }
}

/// Open rendered artifacts with the system default viewer. Failures are
/// logged, not fatal.
pub fn open_artifacts(paths: &[PathBuf]) {
    for path in paths {
        if let Err(err) = open::that(path) {
            warn!(path = %path.display(), %err, "could not open artifact");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    #[test]
    fn not_found_failures_get_guidance() {
        let err = anyhow::Error::new(LoaderError::NotFound(Path::new("Cocoa production.csv").into()));
        let text = describe_failure(&err);
        assert!(text.starts_with("Error: 'Cocoa production.csv' not found."));
    }

    #[test]
    fn other_failures_use_generic_wrapper() {
        let err = anyhow::anyhow!("something broke");
        assert_eq!(describe_failure(&err), "An error occurred: something broke");
    }
}
