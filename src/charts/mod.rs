//! Charts module - static chart rendering

mod renderer;

pub use renderer::{
    bin_counts, ChartError, ChartRenderer, CountrySeries, Panel, PanelKind, COTE_DIVOIRE_COLOR,
    GHANA_COLOR, HIST_BINS,
};
