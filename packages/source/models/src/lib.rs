#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Reshaped external data types for the comparison view.
//!
//! Both external APIs answer in provider-specific shapes; the fetchers
//! in `country_compare_source` reshape them into these chart-ready
//! types before anything else touches them.

use serde::{Deserialize, Serialize};

/// One observation of a country's housing price index.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeriesPoint {
    /// Year label (e.g. "2021").
    pub year: String,
    /// Index value; `None` where the provider reported no observation
    /// for that period.
    pub value: Option<f64>,
}

/// One country's housing price index series over the shared year axis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CountrySeries {
    /// Three-letter country code.
    pub code: String,
    /// Year-to-value points in label order.
    pub points: Vec<SeriesPoint>,
}

impl CountrySeries {
    /// The value observed for a year label, if any.
    #[must_use]
    pub fn value_for(&self, year: &str) -> Option<f64> {
        self.points
            .iter()
            .find(|p| p.year == year)
            .and_then(|p| p.value)
    }

    /// Values in label order, for chart datasets.
    #[must_use]
    pub fn values(&self) -> Vec<Option<f64>> {
        self.points.iter().map(|p| p.value).collect()
    }
}

/// Both countries' housing series over one shared year axis, in
/// selection order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HousingDataset {
    /// Shared year labels in provider order.
    pub years: Vec<String>,
    /// One series per selected country, in selection order.
    pub series: [CountrySeries; 2],
}

/// The two flag glyphs, in selection order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlagPair {
    /// Flag glyphs keyed by selection position.
    pub flags: [String; 2],
}

impl FlagPair {
    /// The comparison text appended to the results container.
    #[must_use]
    pub fn comparison_text(&self) -> String {
        format!("{} vs {}", self.flags[0], self.flags[1])
    }
}
