//! Population trends pipeline.
//!
//! Parses the embedded population table, prints one statistics block per
//! country and renders the trend line chart plus the distribution
//! histograms, each in PNG and SVG form.

use agrichart::charts::{ChartRenderer, CountrySeries, COTE_DIVOIRE_COLOR, GHANA_COLOR};
use agrichart::data::{DataLoader, DataProcessor, COTE_DIVOIRE, GHANA};
use agrichart::stats::SummaryStats;
use agrichart::{describe_failure, init_tracing, open_artifacts};
use anyhow::Result;
use std::env;
use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::info;

const TREND_SIZE: (u32, u32) = (1000, 600);
const HISTOGRAM_SIZE: (u32, u32) = (1200, 600);
const TREND_TITLE: &str = "Population Trends: Côte d’Ivoire vs Ghana";

struct Options {
    out_dir: PathBuf,
    show: bool,
}

fn parse_args() -> Options {
    let mut opts = Options {
        out_dir: PathBuf::from("."),
        show: false,
    };

    let mut args = env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--show" => opts.show = true,
            "--out" => {
                if let Some(dir) = args.next() {
                    opts.out_dir = PathBuf::from(dir);
                }
            }
            _ => {}
        }
    }
    opts
}

fn main() -> ExitCode {
    init_tracing();
    let opts = parse_args();
    match run(&opts) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            println!("{}", describe_failure(&err));
            ExitCode::FAILURE
        }
    }
}

fn run(opts: &Options) -> Result<()> {
    // 1) embedded table, one series per country
    let df = DataLoader::embedded_population()?;
    info!(rows = df.height(), "parsed embedded population data");

    let mut series = Vec::new();
    for (country, color) in [(COTE_DIVOIRE, COTE_DIVOIRE_COLOR), (GHANA, GHANA_COLOR)] {
        let subset = DataProcessor::filter_by_country(&df, "Country", country)?;
        series.push(CountrySeries {
            label: country.to_string(),
            years: DataProcessor::int_column(&subset, "Year")?,
            values: DataProcessor::numeric_column(&subset, "Population")?,
            color,
        });
    }

    // 2) statistics blocks on stdout
    for s in &series {
        println!("{}", SummaryStats::from_values(&s.values).to_block(&s.label));
    }

    // 3) charts, each in both formats
    fs::create_dir_all(&opts.out_dir)?;
    let mut artifacts = Vec::new();
    for name in ["population_trends.png", "population_trends.svg"] {
        let path = opts.out_dir.join(name);
        ChartRenderer::save_trend_chart(&path, TREND_TITLE, &series, TREND_SIZE)?;
        artifacts.push(path);
    }
    for name in ["population_histograms.png", "population_histograms.svg"] {
        let path = opts.out_dir.join(name);
        ChartRenderer::save_histogram_pair(&path, &series, HISTOGRAM_SIZE)?;
        artifacts.push(path);
    }
    for path in &artifacts {
        info!(path = %path.display(), "saved chart");
    }

    if opts.show {
        open_artifacts(&artifacts);
    }
    Ok(())
}
