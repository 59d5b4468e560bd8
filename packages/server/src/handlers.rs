//! HTTP handler functions for the country compare API.

use actix_web::{HttpResponse, web};
use country_compare_selection::{
    ClickDisposition, ComparisonDataset, Highlight, SelectOutcome, SelectedCountry,
};
use country_compare_server_models::{
    ApiClickOutcome, ApiHealth, ApiLayerRenderer, ApiMapConfig, ApiPopupTemplate, ClickRequest,
};
use country_compare_source::{fetch_flags, fetch_housing};

use crate::AppState;
use crate::session::gdp_config;

/// `GET /api/health`
pub async fn health() -> HttpResponse {
    HttpResponse::Ok().json(ApiHealth {
        healthy: true,
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// `GET /api/map`
///
/// Returns the map bootstrap config: basemap, initial viewport, layer
/// symbology, and the popup template for country polygons.
pub async fn map_config(state: web::Data<AppState>) -> HttpResponse {
    HttpResponse::Ok().json(ApiMapConfig {
        basemap: "gray-vector".to_string(),
        center: [25.0, 57.0],
        zoom: 5,
        dataset_url: state.dataset_url.clone(),
        renderer: ApiLayerRenderer {
            fill_color: "#279cd5".to_string(),
            outline_color: "white".to_string(),
            outline_width: 0.5,
        },
        popup: ApiPopupTemplate {
            title: "Country comparison tool".to_string(),
            content: "Country: {SOVEREIGNT}; Population: {POP_EST}".to_string(),
        },
    })
}

/// `POST /api/click`
///
/// Runs one map click through the selection state machine. The
/// synchronous portion (overflow check, two-step feature lookup, slot
/// updates, task spawn) completes before the response; the comparison
/// tasks themselves resolve later and are observed via `GET /api/state`.
pub async fn click(state: web::Data<AppState>, body: web::Json<ClickRequest>) -> HttpResponse {
    let ClickRequest { lng, lat } = *body;

    let (outcome, kickoff) = {
        let mut session = state.session.lock().expect("session mutex poisoned");
        match session.begin_click() {
            ClickDisposition::Reset => (ApiClickOutcome::Reset, None),
            ClickDisposition::Select => {
                let mut added = 0;
                // Coarse envelope hit-test, then a precise geometry
                // query per candidate.
                for entry in state.index.hit_test(lng, lat) {
                    if !entry.contains_point(lng, lat) {
                        continue;
                    }
                    let country = SelectedCountry::from(entry.attributes());
                    let highlight = Highlight::new(entry.geometry_geojson());
                    if session.try_select(country, highlight) == SelectOutcome::Added {
                        added += 1;
                    }
                }

                let kickoff = if added > 0 {
                    session.start_comparison()
                } else {
                    None
                };
                (
                    ApiClickOutcome::Selected {
                        added,
                        selected: session.selected_count(),
                        comparison_started: kickoff.is_some(),
                    },
                    kickoff,
                )
            }
        }
    };

    if let Some((dataset, generation)) = kickoff {
        spawn_comparison_tasks(&state, dataset, generation);
    }

    HttpResponse::Ok().json(outcome)
}

/// `POST /api/clear`
///
/// Clears the whole session and returns the fresh view state.
pub async fn clear(state: web::Data<AppState>) -> HttpResponse {
    let mut session = state.session.lock().expect("session mutex poisoned");
    session.clear();
    HttpResponse::Ok().json(session.state())
}

/// `GET /api/state`
///
/// Returns the complete view state the frontend renders.
pub async fn view_state(state: web::Data<AppState>) -> HttpResponse {
    let session = state.session.lock().expect("session mutex poisoned");
    HttpResponse::Ok().json(session.state())
}

/// Spawns the three comparison tasks for one filled pair of slots.
///
/// All three fire without waiting on one another and may complete in
/// any order; each re-checks its generation under the session lock
/// before writing, so a clear that lands mid-flight wins.
fn spawn_comparison_tasks(
    state: &web::Data<AppState>,
    dataset: ComparisonDataset,
    generation: u64,
) {
    // GDP chart render: no I/O, but tracked and generation-checked
    // like the other two.
    {
        let state = state.clone();
        let config = gdp_config(&dataset);
        tokio::spawn(async move {
            let mut session = state.session.lock().expect("session mutex poisoned");
            session.apply_gdp_chart(generation, config);
        });
    }

    // Housing data fetch and render.
    {
        let state = state.clone();
        let codes = dataset.codes.clone();
        tokio::spawn(async move {
            let result = fetch_housing(&state.client, [codes[0].as_str(), codes[1].as_str()]).await;
            let mut session = state.session.lock().expect("session mutex poisoned");
            session.apply_housing(generation, result);
        });
    }

    // Flag fetch and append.
    {
        let state = state.clone();
        let codes = dataset.codes;
        tokio::spawn(async move {
            let result = fetch_flags(&state.client, [codes[0].as_str(), codes[1].as_str()]).await;
            let mut session = state.session.lock().expect("session mutex poisoned");
            session.apply_flags(generation, result);
        });
    }
}
