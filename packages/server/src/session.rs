//! The comparison session: everything one browser tab's interaction
//! mutates, behind one lock.

use country_compare_chart::{
    ChartConfig, ChartController, GDP_CANVAS, HPI_CANVAS, gdp_bar_chart, hpi_line_chart,
};
use country_compare_selection::{
    ClickDisposition, ComparisonDataset, Highlight, SelectOutcome, SelectedCountry,
    SelectionTracker,
};
use country_compare_server_models::{ApiDescriptionPanel, ApiState, ApiTasks, TaskStatus};
use country_compare_source::SourceError;
use country_compare_source_models::{FlagPair, HousingDataset};

/// Placeholder element ids the frontend shows while no charts are up.
pub const DESCRIPTION_ELEMENT_IDS: [&str; 3] = ["desc-1", "desc-2", "prompt-text"];

/// Class that hides a description element.
pub const DESCRIPTION_HIDE_CLASS: &str = "chart-desc-hide";

/// Visibility of the description placeholders. Both transitions are
/// idempotent; there is no state beyond the flag itself.
#[derive(Debug)]
pub struct DescriptionPanel {
    visible: bool,
}

impl Default for DescriptionPanel {
    fn default() -> Self {
        Self { visible: true }
    }
}

impl DescriptionPanel {
    /// Shows the placeholders.
    pub fn show(&mut self) {
        self.visible = true;
    }

    /// Hides the placeholders.
    pub fn hide(&mut self) {
        self.visible = false;
    }

    /// Whether the placeholders are shown.
    #[must_use]
    pub const fn visible(&self) -> bool {
        self.visible
    }
}

/// All mutable interaction state: the selection tracker, the chart
/// controller, the description panel, the flag text, and the statuses
/// of the three comparison tasks.
///
/// Task completions carry the generation they were spawned under; a
/// completion under a stale generation is discarded without touching
/// anything, so clearing mid-flight can never resurrect old results.
#[derive(Debug, Default)]
pub struct CompareSession {
    tracker: SelectionTracker,
    charts: ChartController,
    panel: DescriptionPanel,
    comparison_text: Option<String>,
    tasks: Option<ApiTasks>,
}

impl CompareSession {
    /// A fresh session: nothing selected, no charts, panel visible.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Applies the overflow rule for an incoming click. A click while
    /// both slots are full clears the whole session and is consumed.
    pub fn begin_click(&mut self) -> ClickDisposition {
        match self.tracker.begin_click() {
            ClickDisposition::Reset => {
                self.clear_derived();
                ClickDisposition::Reset
            }
            ClickDisposition::Select => ClickDisposition::Select,
        }
    }

    /// Offers one hit feature to the tracker.
    pub fn try_select(&mut self, country: SelectedCountry, highlight: Highlight) -> SelectOutcome {
        self.tracker.try_select(country, highlight)
    }

    /// If the second slot just filled, marks all three tasks pending
    /// and hands back the dataset plus the generation to spawn under.
    pub fn start_comparison(&mut self) -> Option<(ComparisonDataset, u64)> {
        let dataset = self.tracker.comparison()?;
        self.tasks = Some(ApiTasks {
            gdp_chart: TaskStatus::Pending,
            housing: TaskStatus::Pending,
            flags: TaskStatus::Pending,
        });
        Some((dataset, self.tracker.generation()))
    }

    /// Installs the GDP bar chart, unless the generation is stale.
    pub fn apply_gdp_chart(&mut self, generation: u64, config: ChartConfig) {
        if !self.tracker.is_current(generation) {
            log::debug!("Discarding stale GDP chart (generation {generation})");
            return;
        }
        self.charts.replace(GDP_CANVAS, config);
        self.panel.hide();
        if let Some(tasks) = &mut self.tasks {
            tasks.gdp_chart = TaskStatus::Ready;
        }
    }

    /// Installs the housing line chart or records the fetch failure,
    /// unless the generation is stale.
    pub fn apply_housing(&mut self, generation: u64, result: Result<HousingDataset, SourceError>) {
        if !self.tracker.is_current(generation) {
            log::debug!("Discarding stale housing result (generation {generation})");
            return;
        }
        match result {
            Ok(dataset) => {
                self.charts.replace(HPI_CANVAS, hpi_config(&dataset));
                self.panel.hide();
                if let Some(tasks) = &mut self.tasks {
                    tasks.housing = TaskStatus::Ready;
                }
            }
            Err(e) => {
                log::error!("Housing data fetch failed: {e}");
                if let Some(tasks) = &mut self.tasks {
                    tasks.housing = TaskStatus::Failed {
                        message: e.to_string(),
                    };
                }
            }
        }
    }

    /// Appends the flag comparison text or records the fetch failure,
    /// unless the generation is stale.
    pub fn apply_flags(&mut self, generation: u64, result: Result<FlagPair, SourceError>) {
        if !self.tracker.is_current(generation) {
            log::debug!("Discarding stale flag result (generation {generation})");
            return;
        }
        match result {
            Ok(pair) => {
                self.comparison_text = Some(pair.comparison_text());
                self.panel.hide();
                if let Some(tasks) = &mut self.tasks {
                    tasks.flags = TaskStatus::Ready;
                }
            }
            Err(e) => {
                log::error!("Flag fetch failed: {e}");
                if let Some(tasks) = &mut self.tasks {
                    tasks.flags = TaskStatus::Failed {
                        message: e.to_string(),
                    };
                }
            }
        }
    }

    /// Clears everything: slots, highlights, charts, comparison text,
    /// task statuses; restores the description panel.
    pub fn clear(&mut self) {
        self.tracker.clear();
        self.clear_derived();
    }

    fn clear_derived(&mut self) {
        self.charts.destroy_all();
        self.comparison_text = None;
        self.tasks = None;
        self.panel.show();
    }

    /// Number of populated selection slots.
    #[must_use]
    pub const fn selected_count(&self) -> usize {
        self.tracker.len()
    }

    /// Live chart instances on a canvas: always 0 or 1.
    #[must_use]
    pub fn live_chart_count(&self, canvas: &str) -> usize {
        self.charts.live_count(canvas)
    }

    /// Snapshot of the full view state for the frontend.
    #[must_use]
    pub fn state(&self) -> ApiState {
        ApiState {
            highlights: self.tracker.highlights().cloned().collect(),
            selected: self.tracker.selections().cloned().collect(),
            charts: self
                .charts
                .iter()
                .map(|(canvas, instance)| (canvas.to_string(), instance.clone()))
                .collect(),
            comparison_text: self.comparison_text.clone(),
            description: ApiDescriptionPanel {
                visible: self.panel.visible(),
                element_ids: DESCRIPTION_ELEMENT_IDS.map(ToString::to_string),
                hide_class: DESCRIPTION_HIDE_CLASS.to_string(),
            },
            tasks: self.tasks.clone(),
            generation: self.tracker.generation(),
        }
    }
}

/// Builds the GDP chart config for a comparison dataset.
#[must_use]
pub fn gdp_config(dataset: &ComparisonDataset) -> ChartConfig {
    gdp_bar_chart(dataset.labels.clone(), dataset.gdp)
}

/// Builds the housing line chart config from a reshaped dataset. The
/// series arrive in selection order, so positions line up with the GDP
/// chart's color convention.
#[must_use]
pub fn hpi_config(dataset: &HousingDataset) -> ChartConfig {
    let [first, second] = &dataset.series;
    hpi_line_chart(
        dataset.years.clone(),
        [
            (first.code.clone(), first.values()),
            (second.code.clone(), second.values()),
        ],
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use country_compare_chart::{GDP_CANVAS, HPI_CANVAS};
    use country_compare_source_models::{CountrySeries, SeriesPoint};

    fn country(code: &str, label: &str, gdp: f64) -> SelectedCountry {
        SelectedCountry {
            code: code.to_string(),
            label: label.to_string(),
            gdp: Some(gdp),
        }
    }

    fn highlight() -> Highlight {
        Highlight::new(geojson::Geometry::new(geojson::Value::Polygon(vec![
            vec![
                vec![0.0, 0.0],
                vec![1.0, 0.0],
                vec![1.0, 1.0],
                vec![0.0, 0.0],
            ],
        ])))
    }

    fn housing_dataset() -> HousingDataset {
        let series = |code: &str, base: f64| CountrySeries {
            code: code.to_string(),
            points: vec![
                SeriesPoint {
                    year: "2020".to_string(),
                    value: Some(base),
                },
                SeriesPoint {
                    year: "2021".to_string(),
                    value: Some(base + 5.0),
                },
            ],
        };
        HousingDataset {
            years: vec!["2020".to_string(), "2021".to_string()],
            series: [series("EST", 100.0), series("LVA", 98.0)],
        }
    }

    fn select_two(session: &mut CompareSession) -> (ComparisonDataset, u64) {
        assert_eq!(session.begin_click(), ClickDisposition::Select);
        session.try_select(country("EST", "Estonia", 30000.0), highlight());
        assert_eq!(session.begin_click(), ClickDisposition::Select);
        session.try_select(country("LVA", "Latvia", 45000.0), highlight());
        session.start_comparison().unwrap()
    }

    #[test]
    fn full_comparison_flow() {
        let mut session = CompareSession::new();
        let (dataset, generation) = select_two(&mut session);

        session.apply_gdp_chart(generation, gdp_config(&dataset));
        session.apply_housing(generation, Ok(housing_dataset()));
        session.apply_flags(
            generation,
            Ok(FlagPair {
                flags: ["🇪🇪".to_string(), "🇱🇻".to_string()],
            }),
        );

        let state = session.state();
        assert_eq!(session.live_chart_count(GDP_CANVAS), 1);
        assert_eq!(session.live_chart_count(HPI_CANVAS), 1);
        assert_eq!(state.comparison_text.as_deref(), Some("🇪🇪 vs 🇱🇻"));
        assert!(!state.description.visible);

        let tasks = state.tasks.unwrap();
        assert_eq!(tasks.gdp_chart, TaskStatus::Ready);
        assert_eq!(tasks.housing, TaskStatus::Ready);
        assert_eq!(tasks.flags, TaskStatus::Ready);
    }

    #[test]
    fn third_click_clears_everything() {
        let mut session = CompareSession::new();
        let (dataset, generation) = select_two(&mut session);
        session.apply_gdp_chart(generation, gdp_config(&dataset));
        session.apply_housing(generation, Ok(housing_dataset()));

        assert_eq!(session.begin_click(), ClickDisposition::Reset);

        let state = session.state();
        assert!(state.highlights.is_empty());
        assert!(state.selected.is_empty());
        assert!(state.charts.is_empty());
        assert_eq!(state.comparison_text, None);
        assert!(state.description.visible);
        assert_eq!(state.tasks, None);
    }

    #[test]
    fn stale_completion_is_discarded() {
        let mut session = CompareSession::new();
        let (dataset, generation) = select_two(&mut session);

        // User triple-clicks before the fetches resolve.
        assert_eq!(session.begin_click(), ClickDisposition::Reset);

        session.apply_gdp_chart(generation, gdp_config(&dataset));
        session.apply_housing(generation, Ok(housing_dataset()));
        session.apply_flags(
            generation,
            Ok(FlagPair {
                flags: ["🇪🇪".to_string(), "🇱🇻".to_string()],
            }),
        );

        let state = session.state();
        assert!(state.charts.is_empty());
        assert_eq!(state.comparison_text, None);
        assert!(state.description.visible);
    }

    #[test]
    fn fetch_failure_is_surfaced_and_does_not_poison_later_clicks() {
        let mut session = CompareSession::new();
        let (dataset, generation) = select_two(&mut session);
        session.apply_gdp_chart(generation, gdp_config(&dataset));
        session.apply_housing(
            generation,
            Err(SourceError::MissingSeriesKey {
                code: "LVA".to_string(),
            }),
        );

        let state = session.state();
        let tasks = state.tasks.unwrap();
        assert!(matches!(tasks.housing, TaskStatus::Failed { .. }));
        // The GDP chart still rendered.
        assert_eq!(session.live_chart_count(GDP_CANVAS), 1);
        assert_eq!(session.live_chart_count(HPI_CANVAS), 0);

        // The next click sequence proceeds normally.
        assert_eq!(session.begin_click(), ClickDisposition::Reset);
        assert_eq!(session.begin_click(), ClickDisposition::Select);
        session.try_select(country("LTU", "Lithuania", 25000.0), highlight());
        assert_eq!(session.selected_count(), 1);
    }

    #[test]
    fn comparison_only_starts_with_two_slots() {
        let mut session = CompareSession::new();
        session.begin_click();
        session.try_select(country("EST", "Estonia", 30000.0), highlight());
        assert!(session.start_comparison().is_none());
        assert_eq!(session.state().tasks, None);
    }

    #[test]
    fn panel_toggles_are_idempotent() {
        let mut panel = DescriptionPanel::default();
        assert!(panel.visible());
        panel.hide();
        panel.hide();
        assert!(!panel.visible());
        panel.show();
        panel.show();
        assert!(panel.visible());
    }
}
