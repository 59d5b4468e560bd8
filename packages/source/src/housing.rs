//! OECD SDMX housing price index fetcher.
//!
//! One GET per comparison against the annual house price dataflow,
//! filtered to the real price index measure over 2014-2024. The
//! SDMX-JSON response addresses each series by a positional key like
//! `"1:0:0:0"`; the first position indexes the `REF_AREA` dimension,
//! so the requested codes are located in that dimension's value list
//! to derive their keys instead of assuming the provider preserves
//! request order.

use country_compare_source_models::{CountrySeries, HousingDataset, SeriesPoint};
use serde_json::Value;

use crate::SourceError;

const DATAFLOW_URL: &str =
    "https://sdmx.oecd.org/public/rest/data/OECD.ECO.MPD,DSD_AN_HOUSE_PRICES@DF_HOUSE_PRICES,1.0";
const PERIOD_FILTER: &str = "startPeriod=2014&endPeriod=2024&dimensionAtObservation=TIME_PERIOD";
const SDMX_JSON_MEDIA_TYPE: &str = "application/vnd.sdmx.data+json";

/// The composite resource URL for one country pair.
#[must_use]
pub fn housing_url(codes: [&str; 2]) -> String {
    format!(
        "{DATAFLOW_URL}/{}+{}.A.RPI.?{PERIOD_FILTER}",
        codes[0], codes[1]
    )
}

/// Fetches and reshapes the housing price index series for two
/// countries, in the order given.
///
/// # Errors
///
/// Returns [`SourceError`] if the request fails, the body is not
/// SDMX-JSON, or the response lacks a requested country's series.
pub async fn fetch_housing(
    client: &reqwest::Client,
    codes: [&str; 2],
) -> Result<HousingDataset, SourceError> {
    let url = housing_url(codes);
    log::info!("Fetching housing data for {}+{}", codes[0], codes[1]);

    let response = client
        .get(&url)
        .header(reqwest::header::ACCEPT, SDMX_JSON_MEDIA_TYPE)
        .send()
        .await?
        .error_for_status()?;
    let body: Value = response.json().await?;

    reshape_housing(&body, codes)
}

/// Reshapes an SDMX-JSON body into per-country year-to-value series.
///
/// Observation values are zipped to the shared year labels by
/// observation index, so a sparse or out-of-order observation map
/// still lands each value on its own year.
///
/// # Errors
///
/// Returns [`SourceError::MalformedResponse`] if the structure paths
/// are absent and [`SourceError::MissingSeriesKey`] if a requested
/// code has no series.
pub fn reshape_housing(body: &Value, codes: [&str; 2]) -> Result<HousingDataset, SourceError> {
    let structures = &body["data"]["structures"][0]["dimensions"];

    let years = dimension_ids(&structures["observation"][0], "observation")?;

    let ref_area = &structures["series"][0];
    if ref_area["id"].as_str() != Some("REF_AREA") {
        return Err(SourceError::malformed(
            "first series dimension is not REF_AREA",
        ));
    }
    let areas = dimension_ids(ref_area, "REF_AREA")?;

    let series_map = body["data"]["dataSets"][0]["series"]
        .as_object()
        .ok_or_else(|| SourceError::malformed("missing dataSets series map"))?;

    let series = codes.map(|code| {
        // Locate the code in REF_AREA to derive its series key.
        let Some(area_idx) = areas.iter().position(|a| a == code) else {
            return Err(SourceError::MissingSeriesKey {
                code: code.to_string(),
            });
        };
        let key = format!("{area_idx}:0:0:0");
        let observations = series_map
            .get(&key)
            .and_then(|s| s["observations"].as_object())
            .ok_or_else(|| SourceError::MissingSeriesKey {
                code: code.to_string(),
            })?;

        let points = years
            .iter()
            .enumerate()
            .map(|(idx, year)| SeriesPoint {
                year: year.clone(),
                value: observations
                    .get(&idx.to_string())
                    .and_then(|obs| obs.get(0))
                    .and_then(Value::as_f64),
            })
            .collect();

        Ok(CountrySeries {
            code: code.to_string(),
            points,
        })
    });

    let [first, second] = series;
    Ok(HousingDataset {
        years,
        series: [first?, second?],
    })
}

/// The `id` of every value in one SDMX dimension, in provider order.
///
/// Positions in the value list are load-bearing: series keys and
/// observation indexes are derived from them. An id-less entry would
/// shift every later position, so it is rejected rather than skipped.
fn dimension_ids(dimension: &Value, name: &str) -> Result<Vec<String>, SourceError> {
    dimension["values"]
        .as_array()
        .ok_or_else(|| SourceError::malformed(format!("missing {name} dimension values")))?
        .iter()
        .map(|v| {
            v["id"]
                .as_str()
                .map(ToString::to_string)
                .ok_or_else(|| SourceError::malformed(format!("{name} dimension value missing id")))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sdmx_body(first_area: &str, second_area: &str) -> Value {
        serde_json::json!({
            "data": {
                "dataSets": [{
                    "series": {
                        "0:0:0:0": {
                            "observations": {
                                "0": [100.0],
                                "1": [105.0],
                                "2": [110.0]
                            }
                        },
                        "1:0:0:0": {
                            "observations": {
                                "0": [98.0],
                                "1": [102.0],
                                "2": [108.0]
                            }
                        }
                    }
                }],
                "structures": [{
                    "dimensions": {
                        "series": [{
                            "id": "REF_AREA",
                            "values": [
                                {"id": first_area},
                                {"id": second_area}
                            ]
                        }],
                        "observation": [{
                            "id": "TIME_PERIOD",
                            "values": [
                                {"id": "2020"},
                                {"id": "2021"},
                                {"id": "2022"}
                            ]
                        }]
                    }
                }]
            }
        })
    }

    #[test]
    fn url_embeds_both_codes_and_period_filter() {
        let url = housing_url(["EST", "LVA"]);
        assert!(url.contains("/EST+LVA.A.RPI.?"));
        assert!(url.contains("startPeriod=2014&endPeriod=2024"));
    }

    #[test]
    fn zips_values_to_years_by_observation_index() {
        let dataset = reshape_housing(&sdmx_body("EST", "LVA"), ["EST", "LVA"]).unwrap();

        assert_eq!(dataset.years, vec!["2020", "2021", "2022"]);
        assert_eq!(dataset.series[0].value_for("2021"), Some(105.0));
        assert_eq!(dataset.series[1].value_for("2021"), Some(102.0));
    }

    #[test]
    fn series_matched_by_ref_area_not_response_order() {
        // Provider lists LVA first; the requested order was EST, LVA.
        let dataset = reshape_housing(&sdmx_body("LVA", "EST"), ["EST", "LVA"]).unwrap();

        assert_eq!(dataset.series[0].code, "EST");
        // EST now sits at series key "1:0:0:0".
        assert_eq!(dataset.series[0].value_for("2020"), Some(98.0));
        assert_eq!(dataset.series[1].value_for("2020"), Some(100.0));
    }

    #[test]
    fn sparse_observations_leave_gaps() {
        let mut body = sdmx_body("EST", "LVA");
        body["data"]["dataSets"][0]["series"]["0:0:0:0"]["observations"] =
            serde_json::json!({"0": [100.0], "2": [110.0]});

        let dataset = reshape_housing(&body, ["EST", "LVA"]).unwrap();
        assert_eq!(dataset.series[0].values(), vec![Some(100.0), None, Some(110.0)]);
    }

    #[test]
    fn absent_country_is_missing_series_key() {
        let err = reshape_housing(&sdmx_body("EST", "LVA"), ["EST", "LTU"]).unwrap_err();
        assert!(matches!(
            err,
            SourceError::MissingSeriesKey { code } if code == "LTU"
        ));
    }

    #[test]
    fn id_less_ref_area_entry_is_malformed_not_shifted() {
        // An entry without an id would shift every later area's series
        // key, attributing one country's observations to another.
        let mut body = sdmx_body("EST", "LVA");
        body["data"]["structures"][0]["dimensions"]["series"][0]["values"] = serde_json::json!([
            {"id": "EST"},
            {"name": "broken entry"},
            {"id": "LVA"}
        ]);
        body["data"]["dataSets"][0]["series"] = serde_json::json!({
            "0:0:0:0": {"observations": {"0": [100.0]}},
            "1:0:0:0": {"observations": {"0": [555.0]}},
            "2:0:0:0": {"observations": {"0": [98.0]}}
        });

        assert!(matches!(
            reshape_housing(&body, ["EST", "LVA"]),
            Err(SourceError::MalformedResponse { .. })
        ));
    }

    #[test]
    fn id_less_year_label_is_malformed_not_shifted() {
        let mut body = sdmx_body("EST", "LVA");
        body["data"]["structures"][0]["dimensions"]["observation"][0]["values"][1] =
            serde_json::json!({"name": "2021"});

        assert!(matches!(
            reshape_housing(&body, ["EST", "LVA"]),
            Err(SourceError::MalformedResponse { .. })
        ));
    }

    #[test]
    fn unexpected_series_dimension_is_malformed() {
        let mut body = sdmx_body("EST", "LVA");
        body["data"]["structures"][0]["dimensions"]["series"][0]["id"] =
            serde_json::json!("MEASURE");

        assert!(matches!(
            reshape_housing(&body, ["EST", "LVA"]),
            Err(SourceError::MalformedResponse { .. })
        ));
    }

    #[test]
    fn empty_body_is_malformed() {
        assert!(matches!(
            reshape_housing(&serde_json::json!({}), ["EST", "LVA"]),
            Err(SourceError::MalformedResponse { .. })
        ));
    }
}
