//! GeoJSON feature types for pourpoint boundaries and points.
//!
//! Geometry stays opaque (`serde_json::Value`): Leaflet draws it, Rust only
//! needs the properties to key highlights, rows and query links.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use crate::error::SnodasError;

/// Identifier shared by a boundary polygon and its pourpoint.
///
/// Both renderings are looked up by this id, never by object reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FeatureId(pub i64);

impl fmt::Display for FeatureId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// An area of interest associated with a boundary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Aoi {
    pub id: i64,
    #[serde(default)]
    pub name: String,
    /// Remaining properties, shown as-is in the AOI detail modal.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoundaryProperties {
    pub pourpoint_id: FeatureId,
    pub name: String,
    #[serde(default)]
    pub awdb_id: Option<String>,
    #[serde(default)]
    pub aois: Vec<Aoi>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PourpointProperties {
    pub pourpoint_id: FeatureId,
    pub name: String,
    #[serde(default)]
    pub awdb_id: Option<String>,
    #[serde(default)]
    pub source: Option<String>,
    #[serde(default)]
    pub area_meters: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Feature<P> {
    #[serde(default)]
    pub geometry: serde_json::Value,
    pub properties: P,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureCollection<P> {
    pub features: Vec<Feature<P>>,
}

pub type BoundaryFeature = Feature<BoundaryProperties>;
pub type PourpointFeature = Feature<PourpointProperties>;

impl<P> FeatureCollection<P>
where
    P: for<'de> Deserialize<'de>,
{
    pub fn from_json(body: &str) -> Result<Self, SnodasError> {
        Ok(serde_json::from_str(body)?)
    }
}

impl BoundaryFeature {
    pub fn id(&self) -> FeatureId {
        self.properties.pourpoint_id
    }

    /// Popup text shown when a boundary is clicked on the AOI map.
    pub fn popup_text(&self) -> String {
        popup_text(self.properties.awdb_id.as_deref(), &self.properties.name)
    }
}

impl PourpointFeature {
    pub fn id(&self) -> FeatureId {
        self.properties.pourpoint_id
    }

    pub fn popup_text(&self) -> String {
        popup_text(self.properties.awdb_id.as_deref(), &self.properties.name)
    }
}

pub fn popup_text(awdb_id: Option<&str>, name: &str) -> String {
    format!("{} {}", awdb_id.unwrap_or_default(), name)
}

/// Every AOI referenced by any boundary, keyed by AOI id.
pub fn collect_aois(boundaries: &[BoundaryFeature]) -> BTreeMap<i64, Aoi> {
    boundaries
        .iter()
        .flat_map(|b| b.properties.aois.iter())
        .map(|aoi| (aoi.id, aoi.clone()))
        .collect()
}

/// The pourpoint currently chosen for a statistics query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectedPourpoint {
    pub pourpoint_id: FeatureId,
    pub awdb_id: Option<String>,
    pub name: String,
    /// Whether a boundary polygon is loaded for this pourpoint.
    pub is_polygon: bool,
}

impl SelectedPourpoint {
    pub fn from_point(props: &PourpointProperties, is_polygon: bool) -> Self {
        Self {
            pourpoint_id: props.pourpoint_id,
            awdb_id: props.awdb_id.clone(),
            name: props.name.clone(),
            is_polygon,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BOUNDARIES: &str = r#"{
        "type": "FeatureCollection",
        "features": [
            {
                "type": "Feature",
                "geometry": {"type": "MultiPolygon", "coordinates": []},
                "properties": {
                    "pourpoint_id": 12,
                    "name": "Upper Deschutes",
                    "awdb_id": "14064500",
                    "aois": [
                        {"id": 3, "name": "Central Oregon", "owner": "OWRD"},
                        {"id": 4, "name": "Deschutes Basin"}
                    ]
                }
            },
            {
                "type": "Feature",
                "geometry": null,
                "properties": {
                    "pourpoint_id": 7,
                    "name": "Crooked River",
                    "aois": [{"id": 3, "name": "Central Oregon"}]
                }
            }
        ]
    }"#;

    #[test]
    fn parses_boundary_collection() {
        let collection = FeatureCollection::<BoundaryProperties>::from_json(BOUNDARIES).unwrap();
        assert_eq!(collection.features.len(), 2);
        let first = &collection.features[0];
        assert_eq!(first.id(), FeatureId(12));
        assert_eq!(first.properties.aois.len(), 2);
        assert_eq!(
            first.properties.aois[0].extra.get("owner"),
            Some(&serde_json::Value::String("OWRD".to_string()))
        );
        assert_eq!(collection.features[1].properties.awdb_id, None);
    }

    #[test]
    fn collects_distinct_aois() {
        let collection = FeatureCollection::<BoundaryProperties>::from_json(BOUNDARIES).unwrap();
        let aois = collect_aois(&collection.features);
        assert_eq!(aois.len(), 2);
        assert_eq!(aois[&3].name, "Central Oregon");
    }

    #[test]
    fn popup_text_joins_awdb_id_and_name() {
        let collection = FeatureCollection::<BoundaryProperties>::from_json(BOUNDARIES).unwrap();
        assert_eq!(collection.features[0].popup_text(), "14064500 Upper Deschutes");
        assert_eq!(collection.features[1].popup_text(), " Crooked River");
    }

    #[test]
    fn parses_pourpoint_points() {
        let body = r#"{"type":"FeatureCollection","features":[
            {"type":"Feature","id":5,
             "geometry":{"type":"Point","coordinates":[-121.3,44.1]},
             "properties":{"pourpoint_id":5,"name":"Bend","awdb_id":"14070500","source":"USGS","area_meters":1.5e9}}
        ]}"#;
        let points = FeatureCollection::<PourpointProperties>::from_json(body).unwrap();
        let selected = SelectedPourpoint::from_point(&points.features[0].properties, false);
        assert_eq!(selected.pourpoint_id, FeatureId(5));
        assert_eq!(selected.awdb_id.as_deref(), Some("14070500"));
        assert!(!selected.is_polygon);
    }

    #[test]
    fn malformed_payload_is_a_geojson_error() {
        let err = FeatureCollection::<PourpointProperties>::from_json("{\"features\": 3}")
            .unwrap_err();
        assert!(matches!(err, SnodasError::GeoJson(_)));
    }
}
