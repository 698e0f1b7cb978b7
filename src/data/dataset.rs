//! Dataset entities and JSON loading.

use std::collections::BTreeMap;
use std::path::Path;

use geo_types::Coord;
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::{AtlasError, LoadError};

/// Demo network embedded at compile time.
static DEMO_DATASET: &str = include_str!("../../assets/demo_dataset.json");

/// Maximum number of dangling references listed individually in the log.
const MAX_LOGGED_DANGLING: usize = 10;

/// Treats an explicit `null` the same as a missing field.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

fn missing_coordinate() -> f64 {
    f64::NAN
}

/// Reads an optional coordinate; `null` becomes NaN so projection rejects it.
fn null_as_nan<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<f64>::deserialize(deserializer)?.unwrap_or(f64::NAN))
}

/// Immutable airport reference data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Airport {
    /// Short unique code (IATA). Filled from the map key on load.
    #[serde(default)]
    pub id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub city: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub country: String,
    /// Coarse geographic tag used by the continent filter.
    #[serde(default)]
    pub continent: Option<String>,
    #[serde(alias = "lon", default = "missing_coordinate", deserialize_with = "null_as_nan")]
    pub longitude: f64,
    #[serde(alias = "lat", default = "missing_coordinate", deserialize_with = "null_as_nan")]
    pub latitude: f64,
}

impl Airport {
    /// Geographic position as (x = longitude, y = latitude).
    pub fn coord(&self) -> Coord<f64> {
        Coord {
            x: self.longitude,
            y: self.latitude,
        }
    }

    /// City name when known, otherwise the identifier.
    pub fn display_city(&self) -> &str {
        if self.city.is_empty() {
            &self.id
        } else {
            &self.city
        }
    }
}

/// A directed route between two airports.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Route {
    #[serde(alias = "src_iata")]
    pub origin: String,
    #[serde(alias = "dst_iata")]
    pub destination: String,
    #[serde(alias = "distance", default, deserialize_with = "null_as_default")]
    pub distance_km: f64,
    /// Operating airline code.
    #[serde(default, deserialize_with = "null_as_default")]
    pub airline: String,
    /// Informational tag; the continent filter goes by endpoint airports.
    #[serde(default)]
    pub continent: Option<String>,
}

impl Route {
    /// Returns true if either endpoint is `airport_id`.
    pub fn touches(&self, airport_id: &str) -> bool {
        self.origin == airport_id || self.destination == airport_id
    }
}

/// One bucket of the haul-length breakdown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HaulBucket {
    #[serde(default, deserialize_with = "null_as_default")]
    pub label: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub count: u64,
}

/// Haul category recognised from a free-text bucket label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HaulCategory {
    Short,
    Medium,
    Long,
    Other,
}

impl HaulCategory {
    /// Classifies a label by case-insensitive substring ("Long-haul" -> `Long`).
    pub fn from_label(label: &str) -> Self {
        let label = label.to_lowercase();
        if label.contains("long") {
            HaulCategory::Long
        } else if label.contains("medium") {
            HaulCategory::Medium
        } else if label.contains("short") {
            HaulCategory::Short
        } else {
            HaulCategory::Other
        }
    }
}

impl HaulBucket {
    pub fn category(&self) -> HaulCategory {
        HaulCategory::from_label(&self.label)
    }
}

/// Entry of an upstream ranking (e.g. airlines by route count).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankedEntity {
    #[serde(alias = "airline")]
    pub key: String,
    #[serde(alias = "routes", default, deserialize_with = "null_as_default")]
    pub count: u64,
}

/// Labelled count (domestic vs. international breakdown).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamedValue {
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub value: u64,
}

/// Provenance information shown in the top bar.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatasetMeta {
    #[serde(default)]
    pub source: Option<String>,
    #[serde(default)]
    pub note: Option<String>,
}

/// A complete route network, loaded once and treated as immutable.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Dataset {
    #[serde(default, deserialize_with = "null_as_default")]
    pub meta: DatasetMeta,

    #[serde(default, alias = "routes_sample", deserialize_with = "null_as_default")]
    pub routes: Vec<Route>,

    #[serde(default, alias = "iata_lookup", deserialize_with = "null_as_default")]
    pub airports: BTreeMap<String, Airport>,

    #[serde(default, deserialize_with = "null_as_default")]
    pub haul_distribution: Vec<HaulBucket>,

    #[serde(default, alias = "top_airlines", deserialize_with = "null_as_default")]
    pub top_entities: Vec<RankedEntity>,

    #[serde(default, deserialize_with = "null_as_default")]
    pub domestic_vs_international: Vec<NamedValue>,
}

impl Dataset {
    /// Parses a JSON document and normalizes it.
    pub fn from_json_str(json: &str) -> Result<Self, LoadError> {
        let mut dataset: Dataset = serde_json::from_str(json)?;
        dataset.normalize();
        Ok(dataset)
    }

    /// Reads and parses a dataset file.
    pub fn load(path: &Path) -> Result<Self, LoadError> {
        let json = std::fs::read_to_string(path).map_err(|source| LoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let dataset = Self::from_json_str(&json)?;
        log::info!("Loaded dataset from {}: {}", path.display(), dataset.summary());
        Ok(dataset)
    }

    /// The embedded demo network.
    pub fn demo() -> Self {
        match Self::from_json_str(DEMO_DATASET) {
            Ok(dataset) => dataset,
            Err(e) => {
                log::warn!("Embedded demo dataset is unreadable: {}", e);
                Self::default()
            }
        }
    }

    /// Fills airport ids from their keys, clamps invalid distances and logs
    /// dangling route endpoints.
    pub fn normalize(&mut self) {
        for (id, airport) in self.airports.iter_mut() {
            if airport.id != *id {
                airport.id = id.clone();
            }
        }

        for (index, route) in self.routes.iter_mut().enumerate() {
            if !route.distance_km.is_finite() || route.distance_km < 0.0 {
                log::warn!(
                    "Route #{} {}->{} has invalid distance {}, using 0",
                    index,
                    route.origin,
                    route.destination,
                    route.distance_km
                );
                route.distance_km = 0.0;
            }
        }

        let dangling = self.dangling_references();
        if !dangling.is_empty() {
            log::warn!("{} route endpoint(s) missing from the airport table", dangling.len());
            for err in dangling.iter().take(MAX_LOGGED_DANGLING) {
                log::warn!("  {}", err);
            }
        }
    }

    pub fn airport(&self, id: &str) -> Option<&Airport> {
        self.airports.get(id)
    }

    /// Every route endpoint that has no airport entry, in route order.
    pub fn dangling_references(&self) -> Vec<AtlasError> {
        let mut errors = Vec::new();
        for (route_index, route) in self.routes.iter().enumerate() {
            for identifier in [&route.origin, &route.destination] {
                if !self.airports.contains_key(identifier) {
                    errors.push(AtlasError::DanglingReference {
                        route_index,
                        identifier: identifier.clone(),
                    });
                }
            }
        }
        errors
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty() && self.airports.is_empty()
    }

    /// Short human-readable description ("16 routes, 14 airports").
    pub fn summary(&self) -> String {
        format!("{} routes, {} airports", self.routes.len(), self.airports.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_fields_default_to_empty() {
        let dataset = Dataset::from_json_str("{}").unwrap();
        assert!(dataset.routes.is_empty());
        assert!(dataset.airports.is_empty());
        assert!(dataset.haul_distribution.is_empty());
        assert!(dataset.top_entities.is_empty());
        assert!(dataset.is_empty());

        let dataset = Dataset::from_json_str(r#"{"routes": null, "airports": null}"#).unwrap();
        assert!(dataset.is_empty());
    }

    #[test]
    fn test_original_field_names_are_accepted() {
        let json = r#"{
            "routes_sample": [{"src_iata": "SYD", "dst_iata": "DFW", "distance_km": 13808.2, "airline": "QF"}],
            "iata_lookup": {"SYD": {"name": "Sydney", "city": "Sydney", "country": "Australia", "lat": -33.9, "lon": 151.2}},
            "top_airlines": [{"airline": "FR", "routes": 2484}]
        }"#;
        let dataset = Dataset::from_json_str(json).unwrap();

        assert_eq!(dataset.routes[0].origin, "SYD");
        assert_eq!(dataset.routes[0].destination, "DFW");
        assert_eq!(dataset.routes[0].airline, "QF");
        assert_eq!(dataset.top_entities[0].key, "FR");
        assert_eq!(dataset.top_entities[0].count, 2484);

        let syd = dataset.airport("SYD").unwrap();
        assert_eq!(syd.id, "SYD");
        assert!((syd.longitude - 151.2).abs() < 1e-9);
        assert!(syd.continent.is_none());
    }

    #[test]
    fn test_invalid_distance_is_clamped() {
        let json = r#"{"routes": [{"origin": "A", "destination": "B", "distance_km": -5.0}]}"#;
        let dataset = Dataset::from_json_str(json).unwrap();
        assert_eq!(dataset.routes[0].distance_km, 0.0);
    }

    #[test]
    fn test_null_entry_fields_degrade_instead_of_failing() {
        let json = r#"{
            "routes": [{"origin": "A", "destination": "B", "distance_km": null, "airline": null}],
            "airports": {"A": {"name": null, "longitude": null, "latitude": 10.0},
                         "B": {"longitude": 5.0, "latitude": 5.0}},
            "haul_distribution": [{"label": "Long-haul", "count": null}],
            "top_airlines": [{"airline": "FR", "routes": null}],
            "domestic_vs_international": [{"name": "Domestic", "value": null}]
        }"#;
        let dataset = Dataset::from_json_str(json).unwrap();

        assert_eq!(dataset.routes[0].distance_km, 0.0);
        assert_eq!(dataset.routes[0].airline, "");
        assert_eq!(dataset.haul_distribution[0].count, 0);
        assert_eq!(dataset.top_entities[0].count, 0);
        assert_eq!(dataset.domestic_vs_international[0].value, 0);

        let a = dataset.airport("A").unwrap();
        assert!(a.longitude.is_nan());
        assert_eq!(a.latitude, 10.0);
        assert_eq!(a.name, "");
    }

    #[test]
    fn test_dangling_references_are_reported() {
        let json = r#"{
            "routes": [{"origin": "A", "destination": "ZZZ"}],
            "airports": {"A": {"longitude": 0.0, "latitude": 0.0}}
        }"#;
        let dataset = Dataset::from_json_str(json).unwrap();
        assert_eq!(
            dataset.dangling_references(),
            vec![AtlasError::DanglingReference {
                route_index: 0,
                identifier: "ZZZ".to_string()
            }]
        );
    }

    #[test]
    fn test_missing_coordinates_are_nan() {
        let dataset = Dataset::from_json_str(r#"{"airports": {"X": {"name": "Nowhere"}}}"#).unwrap();
        assert!(dataset.airport("X").unwrap().latitude.is_nan());
    }

    #[test]
    fn test_demo_dataset_is_consistent() {
        let dataset = Dataset::demo();
        assert_eq!(dataset.airports.len(), 14);
        assert_eq!(dataset.routes.len(), 16);
        assert!(dataset.dangling_references().is_empty());
        assert!(dataset
            .airports
            .values()
            .all(|a| a.continent.is_some()));
    }

    #[test]
    fn test_haul_category_from_label() {
        assert_eq!(HaulCategory::from_label("Long-haul"), HaulCategory::Long);
        assert_eq!(HaulCategory::from_label("ULTRA LONG"), HaulCategory::Long);
        assert_eq!(HaulCategory::from_label("Medium-haul"), HaulCategory::Medium);
        assert_eq!(HaulCategory::from_label("short"), HaulCategory::Short);
        assert_eq!(HaulCategory::from_label("regional"), HaulCategory::Other);
    }
}
