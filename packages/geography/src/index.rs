//! In-memory R-tree index over the country polygons.

use std::path::Path;

use country_compare_geography_models::CountryAttributes;
use geo::{Contains, MultiPolygon};
use geojson::{FeatureCollection, GeoJson};
use rstar::{AABB, RTree, RTreeObject};

use crate::GeoError;

/// One country polygon stored in the R-tree with its attributes.
pub struct CountryEntry {
    attributes: CountryAttributes,
    envelope: AABB<[f64; 2]>,
    polygon: MultiPolygon<f64>,
}

impl CountryEntry {
    /// Attributes of this country.
    #[must_use]
    pub const fn attributes(&self) -> &CountryAttributes {
        &self.attributes
    }

    /// Precise point-in-polygon check for the second lookup step.
    #[must_use]
    pub fn contains_point(&self, lng: f64, lat: f64) -> bool {
        self.polygon.contains(&geo::Point::new(lng, lat))
    }

    /// The polygon geometry re-encoded as `GeoJSON`, for highlight
    /// graphics sent back to the frontend.
    #[must_use]
    pub fn geometry_geojson(&self) -> geojson::Geometry {
        geojson::Geometry::new(geojson::Value::from(&self.polygon))
    }
}

impl RTreeObject for CountryEntry {
    type Envelope = AABB<[f64; 2]>;

    fn envelope(&self) -> Self::Envelope {
        self.envelope
    }
}

/// Pre-built spatial index over the country dataset.
///
/// Constructed once at startup and shared read-only across handlers.
pub struct CountryIndex {
    countries: RTree<CountryEntry>,
    count: usize,
}

impl CountryIndex {
    /// Reads and indexes a `GeoJSON` file from disk.
    ///
    /// # Errors
    ///
    /// Returns [`GeoError`] if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self, GeoError> {
        let raw = std::fs::read_to_string(path)?;
        let index = Self::from_geojson_str(&raw)?;
        log::info!(
            "Loaded {} countries into spatial index from {}",
            index.len(),
            path.display()
        );
        Ok(index)
    }

    /// Builds the index from `GeoJSON` text.
    ///
    /// Every feature must carry the curated attribute fields and a
    /// `Polygon` or `MultiPolygon` geometry.
    ///
    /// # Errors
    ///
    /// Returns [`GeoError`] if parsing fails or a feature is missing
    /// its geometry, properties, or has a non-polygonal geometry.
    pub fn from_geojson_str(raw: &str) -> Result<Self, GeoError> {
        let geojson: GeoJson = raw.parse()?;
        let collection = FeatureCollection::try_from(geojson)?;

        let mut entries = Vec::new();
        for feature in collection.features {
            let properties = feature.properties.ok_or_else(|| GeoError::Shape {
                message: "feature has no properties".to_string(),
            })?;
            let attributes: CountryAttributes =
                serde_json::from_value(serde_json::Value::Object(properties))?;

            let geometry = feature.geometry.ok_or_else(|| GeoError::Shape {
                message: format!("feature {} has no geometry", attributes.sov_a3),
            })?;
            let polygon = to_multipolygon(geometry).ok_or_else(|| GeoError::Shape {
                message: format!("feature {} is not polygonal", attributes.sov_a3),
            })?;

            let envelope = compute_envelope(&polygon);
            entries.push(CountryEntry {
                attributes,
                envelope,
                polygon,
            });
        }

        let count = entries.len();
        Ok(Self {
            countries: RTree::bulk_load(entries),
            count,
        })
    }

    /// Coarse hit-test: every country whose bounding box contains the
    /// point. Callers follow up with [`CountryEntry::contains_point`]
    /// for the precise check.
    #[must_use]
    pub fn hit_test(&self, lng: f64, lat: f64) -> Vec<&CountryEntry> {
        let query_env = AABB::from_point([lng, lat]);
        self.countries
            .locate_in_envelope_intersecting(&query_env)
            .collect()
    }

    /// Number of indexed countries.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.count
    }

    /// Whether the index is empty.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Iterates over all indexed countries in arbitrary order.
    pub fn iter(&self) -> impl Iterator<Item = &CountryEntry> {
        self.countries.iter()
    }
}

/// Converts a `GeoJSON` geometry into a [`MultiPolygon`].
/// Handles both `Polygon` and `MultiPolygon` geometry types.
fn to_multipolygon(geometry: geojson::Geometry) -> Option<MultiPolygon<f64>> {
    let geo_geom: geo::Geometry<f64> = geometry.try_into().ok()?;
    match geo_geom {
        geo::Geometry::MultiPolygon(mp) => Some(mp),
        geo::Geometry::Polygon(p) => Some(MultiPolygon(vec![p])),
        _ => None,
    }
}

/// Computes the bounding box envelope for a [`MultiPolygon`].
fn compute_envelope(mp: &MultiPolygon<f64>) -> AABB<[f64; 2]> {
    use geo::BoundingRect;

    mp.bounding_rect().map_or_else(
        || AABB::from_point([0.0, 0.0]),
        |rect| AABB::from_corners([rect.min().x, rect.min().y], [rect.max().x, rect.max().y]),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square(name: &str, code: &str, gdp: f64, x0: f64, x1: f64) -> String {
        format!(
            r#"{{
                "type": "Feature",
                "properties": {{
                    "SOVEREIGNT": "{name}",
                    "SOV_A3": "{code}",
                    "POP_EST": 1000000.0,
                    "GDP_cap": {gdp}
                }},
                "geometry": {{
                    "type": "Polygon",
                    "coordinates": [[[{x0}, 0.0], [{x1}, 0.0], [{x1}, 10.0], [{x0}, 10.0], [{x0}, 0.0]]]
                }}
            }}"#
        )
    }

    fn two_square_collection() -> CountryIndex {
        let raw = format!(
            r#"{{"type": "FeatureCollection", "features": [{}, {}]}}"#,
            square("Estonia", "EST", 27500.0, 0.0, 10.0),
            square("Latvia", "LVA", 21800.0, 10.0, 20.0),
        );
        CountryIndex::from_geojson_str(&raw).unwrap()
    }

    #[test]
    fn indexes_all_features() {
        let index = two_square_collection();
        assert_eq!(index.len(), 2);
    }

    #[test]
    fn hit_then_contains_finds_one_country() {
        let index = two_square_collection();
        let hits = index.hit_test(5.0, 5.0);
        let precise: Vec<_> = hits
            .into_iter()
            .filter(|e| e.contains_point(5.0, 5.0))
            .collect();
        assert_eq!(precise.len(), 1);
        assert_eq!(precise[0].attributes().sov_a3, "EST");
    }

    #[test]
    fn miss_outside_all_polygons() {
        let index = two_square_collection();
        let hits = index.hit_test(50.0, 50.0);
        assert!(hits.iter().all(|e| !e.contains_point(50.0, 50.0)));
    }

    #[test]
    fn coarse_hit_can_exceed_precise_hit() {
        // A point inside EST's bounding box but outside LVA's polygon
        // near the shared edge; the envelope phase may return both,
        // the precise phase must keep exactly one.
        let index = two_square_collection();
        let (lng, lat) = (9.5, 5.0);
        let precise: Vec<_> = index
            .hit_test(lng, lat)
            .into_iter()
            .filter(|e| e.contains_point(lng, lat))
            .collect();
        assert_eq!(precise.len(), 1);
        assert_eq!(precise[0].attributes().sov_a3, "EST");
    }

    #[test]
    fn rejects_non_polygonal_feature() {
        let raw = r#"{
            "type": "FeatureCollection",
            "features": [{
                "type": "Feature",
                "properties": {
                    "SOVEREIGNT": "Nowhere",
                    "SOV_A3": "NWH",
                    "POP_EST": 1.0,
                    "GDP_cap": null
                },
                "geometry": {"type": "Point", "coordinates": [0.0, 0.0]}
            }]
        }"#;
        assert!(matches!(
            CountryIndex::from_geojson_str(raw),
            Err(GeoError::Shape { .. })
        ));
    }
}
