//! Cocoa production analysis pipeline.
//!
//! Loads the cocoa production CSV, splits it into one table per country,
//! prints both tables and renders the production charts: a combined 2x2
//! figure plus standalone scatter/bar charts per country.

use agrichart::charts::{ChartRenderer, Panel, PanelKind, COTE_DIVOIRE_COLOR, GHANA_COLOR};
use agrichart::data::{DataLoader, DataProcessor, COTE_DIVOIRE, GHANA};
use agrichart::{describe_failure, init_tracing, open_artifacts};
use anyhow::Result;
use plotters::style::RGBColor;
use polars::prelude::DataFrame;
use std::env;
use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::info;

/// Dataset location when no path argument is given.
const DEFAULT_CSV: &str = "Cocoa production.csv";

const COMBINED_SIZE: (u32, u32) = (1300, 600);
const SINGLE_SIZE: (u32, u32) = (1200, 600);

struct Options {
    csv_path: PathBuf,
    out_dir: PathBuf,
    show: bool,
}

fn parse_args() -> Options {
    let mut opts = Options {
        csv_path: PathBuf::from(DEFAULT_CSV),
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
            other => opts.csv_path = PathBuf::from(other),
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
    // 1) load the production table and turn years into axis labels
    let df = DataLoader::load_production_csv(&opts.csv_path)?;
    let df = DataProcessor::year_labels_to_string(&df)?;
    info!(rows = df.height(), "loaded cocoa production data");

    // 2) one table per country, country column dropped
    let ivory = DataProcessor::filter_by_country(&df, "Area", COTE_DIVOIRE)?.drop("Area")?;
    let ghana = DataProcessor::filter_by_country(&df, "Area", GHANA)?.drop("Area")?;

    fs::create_dir_all(&opts.out_dir)?;
    let mut artifacts = Vec::new();

    // 3) combined 2x2 figure: yields on top, harvested area below
    let panels = [
        yield_panel(&ghana, format!("{GHANA} - Year vs Yield"), GHANA_COLOR)?,
        yield_panel(
            &ivory,
            format!("{COTE_DIVOIRE} - Year vs Yield"),
            COTE_DIVOIRE_COLOR,
        )?,
        area_panel(
            &ghana,
            format!("{GHANA} - Area harvested by Year"),
            GHANA_COLOR,
        )?,
        area_panel(
            &ivory,
            format!("{COTE_DIVOIRE} - Area harvested by Year"),
            COTE_DIVOIRE_COLOR,
        )?,
    ];
    let combined = opts.out_dir.join("cocoa_analysis.svg");
    ChartRenderer::save_panel_grid(&combined, "Cocoa Production Analysis", &panels, COMBINED_SIZE)?;
    info!(path = %combined.display(), "saved combined figure");
    artifacts.push(combined);

    // 4) per-country tables on stdout
    println!("{COTE_DIVOIRE} table.");
    println!("{ivory}");
    println!("{GHANA} table.");
    println!("{ghana}");

    // 5) standalone charts per country
    for (df, country, code, color) in [
        (&ivory, COTE_DIVOIRE, "civ", COTE_DIVOIRE_COLOR),
        (&ghana, GHANA, "gha", GHANA_COLOR),
    ] {
        let scatter = opts.out_dir.join(format!("yield_scatter_{code}.png"));
        let panel = yield_panel(df, format!("Year vs Yield - {country}"), color)?;
        ChartRenderer::save_panel(&scatter, &panel, SINGLE_SIZE)?;
        artifacts.push(scatter);

        let bar = opts.out_dir.join(format!("area_harvested_{code}.png"));
        let panel = area_panel(df, format!("Area harvested by Year - {country}"), color)?;
        ChartRenderer::save_panel(&bar, &panel, SINGLE_SIZE)?;
        artifacts.push(bar);
    }
    info!(count = artifacts.len(), "rendered chart artifacts");

    if opts.show {
        open_artifacts(&artifacts);
    }
    Ok(())
}

fn yield_panel(df: &DataFrame, title: String, color: RGBColor) -> Result<Panel> {
    Ok(Panel {
        kind: PanelKind::Scatter,
        title,
        x_desc: "Year".into(),
        y_desc: "Yield".into(),
        year_labels: DataProcessor::string_column(df, "Year")?,
        values: DataProcessor::numeric_column(df, "Yield")?,
        color,
    })
}

fn area_panel(df: &DataFrame, title: String, color: RGBColor) -> Result<Panel> {
    Ok(Panel {
        kind: PanelKind::Bar,
        title,
        x_desc: "Year".into(),
        y_desc: "Area harvested".into(),
        year_labels: DataProcessor::string_column(df, "Year")?,
        values: DataProcessor::numeric_column(df, "Area harvested")?,
        color,
    })
}
