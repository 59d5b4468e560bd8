#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Chart configuration builders and the canvas instance controller.
//!
//! Configs are serialized in the shape the frontend charting library
//! expects and rendered there; the server only owns their lifecycle.
//! The [`ChartController`] enforces the one-live-instance-per-canvas
//! rule: replacement destroys the prior instance before the new one
//! exists, so a canvas can never hold two overlapping renders.

pub mod config;
pub mod controller;

pub use config::{
    Axis, AxisTitle, ChartConfig, ChartData, ChartKind, ChartOptions, ColorSpec, Dataset, Legend,
    Plugins, Scales, gdp_bar_chart, hpi_line_chart,
};
pub use controller::{ChartController, ChartInstance};

/// Canvas id of the GDP bar chart.
pub const GDP_CANVAS: &str = "gdpChart";

/// Canvas id of the housing-price-index line chart.
pub const HPI_CANVAS: &str = "hpiChart";

/// Series colors by selection position: first country teal, second
/// light blue. Shared by both charts so the color always identifies
/// the same country.
pub const SERIES_COLORS: [&str; 2] = ["#78E0DC", "#A1CDF1"];
