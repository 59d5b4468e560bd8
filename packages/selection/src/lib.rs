#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Two-slot country selection tracker.
//!
//! The interaction holds at most two selected countries at a time. A
//! click while both slots are full is consumed as a reset rather than a
//! new selection. Every clear bumps a generation counter; async work
//! spawned for an earlier comparison checks its generation on
//! completion and discards itself if the tracker has moved on.

use country_compare_geography_models::CountryAttributes;
use serde::Serialize;

/// Maximum number of simultaneously selected countries.
pub const MAX_SELECTIONS: usize = 2;

/// Fill symbology for a highlight graphic.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FillSymbol {
    /// Fill color (CSS color string).
    pub color: String,
    /// Outline color.
    pub outline_color: String,
    /// Outline width in pixels.
    pub outline_width: f64,
}

impl FillSymbol {
    /// The fixed symbology applied to selected polygons.
    #[must_use]
    pub fn selection() -> Self {
        Self {
            color: "rgba(142, 237, 247, 0.7)".to_string(),
            outline_color: "#D496A7".to_string(),
            outline_width: 1.0,
        }
    }
}

/// A temporary visual overlay marking a selected polygon, distinct
/// from the underlying data feature.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Highlight {
    /// The selected polygon's geometry.
    pub geometry: geojson::Geometry,
    /// Selection symbology.
    pub symbol: FillSymbol,
}

impl Highlight {
    /// Wraps a geometry in the fixed selection symbology.
    #[must_use]
    pub fn new(geometry: geojson::Geometry) -> Self {
        Self {
            geometry,
            symbol: FillSymbol::selection(),
        }
    }
}

/// The attribute payload a slot keeps for one selected country.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectedCountry {
    /// Three-letter country code.
    pub code: String,
    /// Sovereign name, used as the chart label.
    pub label: String,
    /// GDP per capita, passed through unvalidated.
    pub gdp: Option<f64>,
}

impl From<&CountryAttributes> for SelectedCountry {
    fn from(attrs: &CountryAttributes) -> Self {
        Self {
            code: attrs.sov_a3.clone(),
            label: attrs.sovereignt.clone(),
            gdp: attrs.gdp_cap,
        }
    }
}

/// The ephemeral dataset assembled at the moment the second slot fills.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ComparisonDataset {
    /// Country codes in selection order.
    pub codes: [String; 2],
    /// Country labels in selection order.
    pub labels: [String; 2],
    /// GDP values in selection order.
    pub gdp: [Option<f64>; 2],
}

/// What a click means before any hit-testing happens.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickDisposition {
    /// Both slots were already full; the tracker cleared itself and
    /// the click selects nothing.
    Reset,
    /// The click proceeds to hit-testing.
    Select,
}

/// Result of offering one hit feature to the tracker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectOutcome {
    /// The feature filled a slot.
    Added,
    /// Both slots were full; the feature was silently dropped.
    Full,
}

/// The two parallel capped sequences of the interaction: selected
/// attribute payloads and their highlight graphics.
#[derive(Debug, Default)]
pub struct SelectionTracker {
    slots: Vec<(SelectedCountry, Highlight)>,
    generation: u64,
}

impl SelectionTracker {
    /// An empty tracker at generation zero.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Applies the overflow rule before hit-testing a click.
    ///
    /// With both slots full the tracker clears itself and the click is
    /// consumed; otherwise the caller proceeds to hit-test.
    pub fn begin_click(&mut self) -> ClickDisposition {
        if self.slots.len() >= MAX_SELECTIONS {
            log::info!("Both slots full; click consumed as reset");
            self.clear();
            ClickDisposition::Reset
        } else {
            ClickDisposition::Select
        }
    }

    /// Offers one hit feature to the tracker. Appends while under the
    /// cap; silently drops past it (no feedback distinguishes a full
    /// tracker from a partially processed click).
    pub fn try_select(&mut self, country: SelectedCountry, highlight: Highlight) -> SelectOutcome {
        if self.slots.len() >= MAX_SELECTIONS {
            return SelectOutcome::Full;
        }
        log::info!("Selected {} ({})", country.label, country.code);
        self.slots.push((country, highlight));
        SelectOutcome::Added
    }

    /// The comparison dataset, present exactly when both slots are
    /// populated.
    #[must_use]
    pub fn comparison(&self) -> Option<ComparisonDataset> {
        let [(a, _), (b, _)] = self.slots.as_slice() else {
            return None;
        };
        Some(ComparisonDataset {
            codes: [a.code.clone(), b.code.clone()],
            labels: [a.label.clone(), b.label.clone()],
            gdp: [a.gdp, b.gdp],
        })
    }

    /// Empties both slots and bumps the generation, invalidating any
    /// in-flight task spawned under the old generation. Returns the
    /// new generation.
    pub fn clear(&mut self) -> u64 {
        self.slots.clear();
        self.generation += 1;
        self.generation
    }

    /// The current generation.
    #[must_use]
    pub const fn generation(&self) -> u64 {
        self.generation
    }

    /// Whether a task spawned under `generation` may still write its
    /// result.
    #[must_use]
    pub const fn is_current(&self, generation: u64) -> bool {
        self.generation == generation
    }

    /// Number of populated slots.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.slots.len()
    }

    /// Whether no slot is populated.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Highlight graphics in selection order.
    pub fn highlights(&self) -> impl Iterator<Item = &Highlight> {
        self.slots.iter().map(|(_, h)| h)
    }

    /// Selected payloads in selection order.
    pub fn selections(&self) -> impl Iterator<Item = &SelectedCountry> {
        self.slots.iter().map(|(c, _)| c)
    }
}
