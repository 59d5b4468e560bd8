//! Chart config types, serialized for the frontend charting library.

use serde::Serialize;

use crate::SERIES_COLORS;

/// Chart types used by the comparison view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartKind {
    /// Two-bar GDP comparison.
    Bar,
    /// Two-line housing-price-index time series.
    Line,
}

/// A color applied to a whole dataset or per data point.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ColorSpec {
    /// One color for the whole dataset (line charts).
    Single(String),
    /// One color per data point (bar charts).
    PerPoint(Vec<String>),
}

/// One dataset within a chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Dataset {
    /// Dataset label.
    pub label: String,
    /// Data values; `None` passes through as `null` and renders as a
    /// gap or empty bar, unvalidated.
    pub data: Vec<Option<f64>>,
    /// Fill color(s).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background_color: Option<ColorSpec>,
    /// Border color(s).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub border_color: Option<ColorSpec>,
    /// Border width in pixels.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub border_width: Option<f64>,
    /// Whether the area under a line is filled.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fill: Option<bool>,
}

/// Labels plus datasets.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartData {
    /// Shared axis labels.
    pub labels: Vec<String>,
    /// Datasets drawn over those labels.
    pub datasets: Vec<Dataset>,
}

/// An axis title.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AxisTitle {
    /// Whether the title is shown.
    pub display: bool,
    /// Title text.
    pub text: String,
}

impl AxisTitle {
    fn shown(text: &str) -> Self {
        Self {
            display: true,
            text: text.to_string(),
        }
    }
}

/// One axis of the chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Axis {
    /// Axis title.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<AxisTitle>,
    /// Whether the axis is forced to start at zero.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub begin_at_zero: Option<bool>,
}

/// The x and y axes.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Scales {
    /// Horizontal axis.
    pub x: Axis,
    /// Vertical axis.
    pub y: Axis,
}

/// Legend visibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Legend {
    /// Whether the legend is shown.
    pub display: bool,
}

/// Plugin options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Plugins {
    /// Legend plugin options.
    pub legend: Legend,
}

/// Chart options.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartOptions {
    /// Axis configuration.
    pub scales: Scales,
    /// Plugin configuration.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub plugins: Option<Plugins>,
}

/// A complete chart configuration.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartConfig {
    /// Chart type.
    #[serde(rename = "type")]
    pub kind: ChartKind,
    /// Labels and datasets.
    pub data: ChartData,
    /// Axes and plugins.
    pub options: ChartOptions,
}

fn per_position_colors() -> Vec<String> {
    SERIES_COLORS.iter().map(ToString::to_string).collect()
}

/// Builds the two-bar GDP comparison config.
///
/// One bar per country in selection order, colored by position, legend
/// suppressed, y axis starting at zero. GDP values are opaque: a
/// missing value serializes as `null` and renders as an empty bar.
#[must_use]
pub fn gdp_bar_chart(labels: [String; 2], gdp: [Option<f64>; 2]) -> ChartConfig {
    ChartConfig {
        kind: ChartKind::Bar,
        data: ChartData {
            labels: labels.to_vec(),
            datasets: vec![Dataset {
                label: "GDP per capita comparison".to_string(),
                data: gdp.to_vec(),
                background_color: Some(ColorSpec::PerPoint(per_position_colors())),
                border_color: Some(ColorSpec::PerPoint(per_position_colors())),
                border_width: Some(1.0),
                fill: None,
            }],
        },
        options: ChartOptions {
            scales: Scales {
                x: Axis {
                    title: Some(AxisTitle::shown("Country")),
                    begin_at_zero: None,
                },
                y: Axis {
                    title: Some(AxisTitle::shown("GDP per capita (EUR)")),
                    begin_at_zero: Some(true),
                },
            },
            plugins: Some(Plugins {
                legend: Legend { display: false },
            }),
        },
    }
}

/// Builds the two-line housing-price-index config.
///
/// `series` pairs each country's code with its observation values over
/// the shared `years` labels, in selection order so line colors match
/// the GDP chart's position convention.
#[must_use]
pub fn hpi_line_chart(years: Vec<String>, series: [(String, Vec<Option<f64>>); 2]) -> ChartConfig {
    let datasets = series
        .into_iter()
        .zip(SERIES_COLORS)
        .map(|((code, values), color)| Dataset {
            label: code,
            data: values,
            background_color: None,
            border_color: Some(ColorSpec::Single(color.to_string())),
            border_width: Some(2.0),
            fill: Some(false),
        })
        .collect();

    ChartConfig {
        kind: ChartKind::Line,
        data: ChartData {
            labels: years,
            datasets,
        },
        options: ChartOptions {
            scales: Scales {
                x: Axis {
                    title: Some(AxisTitle::shown("Year")),
                    begin_at_zero: None,
                },
                y: Axis {
                    title: Some(AxisTitle::shown("HPI (unitless index)")),
                    begin_at_zero: Some(false),
                },
            },
            plugins: None,
        },
    }
}
