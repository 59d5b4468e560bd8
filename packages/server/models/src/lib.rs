#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! API request and response types for the country compare server.
//!
//! These types are serialized to JSON for the REST API the static
//! frontend polls. They are separate from the core selection and chart
//! types to allow independent evolution of the API contract.

use std::collections::BTreeMap;

use country_compare_chart::ChartInstance;
use country_compare_selection::{Highlight, SelectedCountry};
use serde::{Deserialize, Serialize};

/// Health check response.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiHealth {
    /// Whether the service is healthy.
    pub healthy: bool,
    /// Service version.
    pub version: String,
}

/// A map click in geographic coordinates.
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClickRequest {
    /// Longitude of the clicked map point.
    pub lng: f64,
    /// Latitude of the clicked map point.
    pub lat: f64,
}

/// What one click did to the selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "camelCase")]
pub enum ApiClickOutcome {
    /// Both slots were already full; the click cleared everything and
    /// selected nothing.
    Reset,
    /// The click was hit-tested normally.
    #[serde(rename_all = "camelCase")]
    Selected {
        /// Features appended by this click (0 on a miss).
        added: usize,
        /// Slots populated after the click.
        selected: usize,
        /// Whether this click filled the second slot and kicked off
        /// the comparison tasks.
        comparison_started: bool,
    },
}

/// Completion state of one comparison task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "camelCase")]
pub enum TaskStatus {
    /// Spawned but not yet resolved.
    Pending,
    /// Resolved and its result applied.
    Ready,
    /// Resolved with an error; the message is user-visible.
    #[serde(rename_all = "camelCase")]
    Failed {
        /// What went wrong.
        message: String,
    },
}

/// Per-task statuses for the active comparison.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiTasks {
    /// GDP bar chart render.
    pub gdp_chart: TaskStatus,
    /// Housing data fetch and render.
    pub housing: TaskStatus,
    /// Flag fetch and append.
    pub flags: TaskStatus,
}

/// Description panel placeholder state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiDescriptionPanel {
    /// Whether the placeholders are shown.
    pub visible: bool,
    /// Element ids the frontend toggles.
    pub element_ids: [String; 3],
    /// Class that hides an element.
    pub hide_class: String,
}

/// The complete view state the frontend renders.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiState {
    /// Highlight graphics in selection order.
    pub highlights: Vec<Highlight>,
    /// Selected payloads in selection order.
    pub selected: Vec<SelectedCountry>,
    /// Live chart instances keyed by canvas id.
    pub charts: BTreeMap<String, ChartInstance>,
    /// Flag comparison text, if the flag task has resolved.
    pub comparison_text: Option<String>,
    /// Description panel placeholders.
    pub description: ApiDescriptionPanel,
    /// Task statuses, present while a comparison is active.
    pub tasks: Option<ApiTasks>,
    /// Selection generation, bumped on every clear.
    pub generation: u64,
}

/// Layer symbology for the country polygons.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiLayerRenderer {
    /// Polygon fill color.
    pub fill_color: String,
    /// Polygon outline color.
    pub outline_color: String,
    /// Outline width in pixels.
    pub outline_width: f64,
}

/// Popup template shown when a country is clicked.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiPopupTemplate {
    /// Popup title.
    pub title: String,
    /// Popup body with `{FIELD}` placeholders.
    pub content: String,
}

/// Map bootstrap configuration for the frontend.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiMapConfig {
    /// Basemap identifier.
    pub basemap: String,
    /// Initial center as `[lng, lat]`.
    pub center: [f64; 2],
    /// Initial zoom level.
    pub zoom: u8,
    /// URL of the country `GeoJSON` layer.
    pub dataset_url: String,
    /// Country layer symbology.
    pub renderer: ApiLayerRenderer,
    /// Popup template for country polygons.
    pub popup: ApiPopupTemplate,
}
