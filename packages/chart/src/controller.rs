//! Canvas-keyed chart instance lifecycle.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::config::ChartConfig;

/// One live chart bound to a canvas.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartInstance {
    /// Monotonic instance id; a replaced chart never shares an id with
    /// its predecessor.
    pub id: u64,
    /// The config the frontend renders.
    pub config: ChartConfig,
}

/// Owns every live chart instance, at most one per canvas.
///
/// There are no nullable chart handles anywhere: [`Self::replace`]
/// removes the prior instance and installs the new one in one step, so
/// callers never null-check before destroying.
#[derive(Debug, Default)]
pub struct ChartController {
    charts: BTreeMap<String, ChartInstance>,
    next_id: u64,
}

impl ChartController {
    /// A controller with no live charts.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Destroys whatever chart the canvas holds and installs a new one
    /// built from `config`. Returns the new instance's id.
    pub fn replace(&mut self, canvas: &str, config: ChartConfig) -> u64 {
        self.next_id += 1;
        let instance = ChartInstance {
            id: self.next_id,
            config,
        };
        if let Some(old) = self.charts.insert(canvas.to_string(), instance) {
            log::debug!("Destroyed chart {} on canvas {canvas}", old.id);
        }
        self.next_id
    }

    /// Destroys the chart on a canvas, if any. Returns whether one was
    /// destroyed.
    pub fn destroy(&mut self, canvas: &str) -> bool {
        self.charts.remove(canvas).is_some()
    }

    /// Destroys every live chart.
    pub fn destroy_all(&mut self) {
        self.charts.clear();
    }

    /// The live chart on a canvas, if any.
    #[must_use]
    pub fn get(&self, canvas: &str) -> Option<&ChartInstance> {
        self.charts.get(canvas)
    }

    /// Number of live instances on a canvas: always 0 or 1.
    #[must_use]
    pub fn live_count(&self, canvas: &str) -> usize {
        usize::from(self.charts.contains_key(canvas))
    }

    /// Iterates over `(canvas, instance)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ChartInstance)> {
        self.charts.iter().map(|(k, v)| (k.as_str(), v))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{GDP_CANVAS, HPI_CANVAS, gdp_bar_chart};

    fn some_config() -> ChartConfig {
        gdp_bar_chart(
            ["Estonia".to_string(), "Latvia".to_string()],
            [Some(1.0), Some(2.0)],
        )
    }

    #[test]
    fn replace_leaves_exactly_one_instance() {
        let mut controller = ChartController::new();
        let first = controller.replace(GDP_CANVAS, some_config());
        let second = controller.replace(GDP_CANVAS, some_config());

        assert_eq!(controller.live_count(GDP_CANVAS), 1);
        assert_ne!(first, second);
        assert_eq!(controller.get(GDP_CANVAS).unwrap().id, second);
    }

    #[test]
    fn canvases_are_independent() {
        let mut controller = ChartController::new();
        controller.replace(GDP_CANVAS, some_config());
        controller.replace(HPI_CANVAS, some_config());

        assert_eq!(controller.live_count(GDP_CANVAS), 1);
        assert_eq!(controller.live_count(HPI_CANVAS), 1);
        assert_eq!(controller.iter().count(), 2);
    }

    #[test]
    fn destroy_all_clears_every_canvas() {
        let mut controller = ChartController::new();
        controller.replace(GDP_CANVAS, some_config());
        controller.replace(HPI_CANVAS, some_config());
        controller.destroy_all();

        assert_eq!(controller.live_count(GDP_CANVAS), 0);
        assert_eq!(controller.live_count(HPI_CANVAS), 0);
        assert!(!controller.destroy(GDP_CANVAS));
    }
}
