#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

//! External data fetchers for the comparison view.
//!
//! Two independent providers: a country-reference API for flag glyphs
//! and the OECD SDMX data API for annual housing price indexes. Each
//! fetcher makes one GET request and reshapes the provider's JSON into
//! the chart-ready types in `country_compare_source_models`. Returned
//! records are matched back to the requested country codes by key, not
//! by array position, so a provider reordering its response cannot
//! silently swap the two countries.

pub mod flags;
pub mod housing;

pub use flags::fetch_flags;
pub use housing::fetch_housing;

use thiserror::Error;

/// Errors that can occur while fetching or reshaping external data.
#[derive(Debug, Error)]
pub enum SourceError {
    /// HTTP request failed.
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON parsing failed.
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    /// The body decoded but violated the expected shape.
    #[error("Malformed response: {message}")]
    MalformedResponse {
        /// Description of what went wrong.
        message: String,
    },

    /// The statistics response carries no series for a requested code.
    #[error("No series for country {code} in response")]
    MissingSeriesKey {
        /// The requested country code.
        code: String,
    },

    /// The flag response carries no record for a requested code.
    #[error("No record for country {code} in response")]
    CountryMissing {
        /// The requested country code.
        code: String,
    },
}

impl SourceError {
    fn malformed(message: impl Into<String>) -> Self {
        Self::MalformedResponse {
            message: message.into(),
        }
    }
}
