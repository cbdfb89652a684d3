//! Map events forwarded from the Leaflet bridge.
//!
//! The bridge posts each event as a small JSON object with a `type` tag; this
//! is the typed side of that contract.

use serde::{Deserialize, Serialize};

use crate::error::SnodasError;
use crate::feature::{popup_text, FeatureId, SelectedPourpoint};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum MapEvent {
    /// Pointer entered a boundary in the vector-tile layer.
    PolygonOver { id: FeatureId },
    PolygonOut { id: FeatureId },
    /// A boundary was clicked. Vector tiles only carry a few properties.
    PolygonClick {
        id: FeatureId,
        name: String,
        #[serde(default)]
        awdb_id: Option<String>,
        /// `[lat, lng]` of the click, for popups.
        latlng: [f64; 2],
    },
    PointOver { id: FeatureId },
    PointOut { id: FeatureId },
    PointClick {
        id: FeatureId,
        /// `[lat, lng]` of the marker click, for popups.
        latlng: [f64; 2],
    },
    /// A click on the map background.
    MapClick,
    ZoomEnd { zoom: f64 },
    /// The vector-tile layer finished loading tiles.
    TilesLoaded,
    /// A popup closed. `id` is the feature it was opened for, if any.
    PopupClosed {
        #[serde(default)]
        id: Option<FeatureId>,
    },
}

impl MapEvent {
    pub fn from_json(body: &str) -> Result<Self, SnodasError> {
        Ok(serde_json::from_str(body)?)
    }

    /// Popup text for a boundary click.
    pub fn popup_text(&self) -> Option<String> {
        match self {
            MapEvent::PolygonClick { name, awdb_id, .. } => {
                Some(popup_text(awdb_id.as_deref(), name))
            }
            _ => None,
        }
    }

    /// The query selection a boundary click makes on the SNODAS map.
    pub fn selection(&self) -> Option<SelectedPourpoint> {
        match self {
            MapEvent::PolygonClick {
                id, name, awdb_id, ..
            } => Some(SelectedPourpoint {
                pourpoint_id: *id,
                awdb_id: awdb_id.clone(),
                name: name.clone(),
                is_polygon: true,
            }),
            _ => None,
        }
    }
}
