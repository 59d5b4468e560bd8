#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Country polygon attribute types.
//!
//! These mirror the property names of the curated country dataset
//! (Natural Earth field names, plus a manually added `GDP_cap` column).
//! They are independent of the selection and charting layers.

use serde::{Deserialize, Serialize};

/// Attributes carried by one country polygon in the dataset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CountryAttributes {
    /// Sovereign state name (e.g. "Estonia").
    #[serde(rename = "SOVEREIGNT")]
    pub sovereignt: String,
    /// Three-letter sovereign code (e.g. "EST").
    #[serde(rename = "SOV_A3")]
    pub sov_a3: String,
    /// Population estimate.
    #[serde(rename = "POP_EST")]
    pub pop_est: f64,
    /// GDP per capita. Curated into the dataset by hand; the unit is
    /// opaque and values pass through unconverted.
    #[serde(rename = "GDP_cap", default)]
    pub gdp_cap: Option<f64>,
}

impl CountryAttributes {
    /// The three-letter code, uppercased as stored in the dataset.
    #[must_use]
    pub fn code(&self) -> &str {
        &self.sov_a3
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_dataset_property_names() {
        let json = r#"{
            "SOVEREIGNT": "Estonia",
            "SOV_A3": "EST",
            "POP_EST": 1331057.0,
            "GDP_cap": 27500.0
        }"#;
        let attrs: CountryAttributes = serde_json::from_str(json).unwrap();
        assert_eq!(attrs.sovereignt, "Estonia");
        assert_eq!(attrs.code(), "EST");
        assert_eq!(attrs.gdp_cap, Some(27500.0));
    }

    #[test]
    fn missing_gdp_decodes_as_none() {
        let json = r#"{
            "SOVEREIGNT": "Latvia",
            "SOV_A3": "LVA",
            "POP_EST": 1883008.0,
            "GDP_cap": null
        }"#;
        let attrs: CountryAttributes = serde_json::from_str(json).unwrap();
        assert_eq!(attrs.gdp_cap, None);
    }
}
