#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Country dataset loading and spatial hit-testing.
//!
//! Loads the curated country `GeoJSON` file at startup, builds an R-tree
//! spatial index over the polygons, and answers click lookups with a
//! two-step query: a coarse bounding-box hit-test followed by a precise
//! point-in-polygon check per candidate.

pub mod index;

pub use index::{CountryEntry, CountryIndex};

use thiserror::Error;

/// Errors that can occur while loading or querying the country dataset.
#[derive(Debug, Error)]
pub enum GeoError {
    /// Dataset file could not be read.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The file is not valid `GeoJSON`.
    #[error("GeoJSON error: {0}")]
    Geojson(#[from] geojson::Error),

    /// Feature properties failed to decode.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The dataset violated the expected shape.
    #[error("Dataset shape error: {message}")]
    Shape {
        /// Description of what went wrong.
        message: String,
    },
}
