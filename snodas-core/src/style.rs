//! Leaflet path styles for boundaries and pourpoint markers.
//!
//! Field names serialize in Leaflet's camelCase so the bridge can hand the
//! JSON straight to `setStyle`.

use serde::{Deserialize, Serialize};

use crate::highlight::HighlightStyle;

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PathStyle {
    pub fill: bool,
    pub weight: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub opacity: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub radius: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fill_opacity: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fill_color: Option<String>,
}

impl PathStyle {
    fn outline(weight: f64, color: &str) -> Self {
        Self {
            fill: false,
            weight,
            color: Some(color.to_string()),
            opacity: Some(1.0),
            ..Self::default()
        }
    }

    fn marker(fill_opacity: f64, color: &str, fill_color: Option<&str>) -> Self {
        Self {
            fill: true,
            weight: 1.0,
            color: Some(color.to_string()),
            radius: Some(8.0),
            fill_opacity: Some(fill_opacity),
            fill_color: fill_color.map(str::to_string),
            ..Self::default()
        }
    }

    /// A marker style that draws nothing.
    pub fn hidden() -> Self {
        Self {
            fill: false,
            weight: 0.0,
            ..Self::default()
        }
    }

    pub fn is_visible(&self) -> bool {
        self.fill || self.weight > 0.0
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_default()
    }
}

/// Styles for the vector-tile boundary layer.
#[derive(Debug, Clone, PartialEq)]
pub struct PolygonStyles {
    pub base: PathStyle,
    pub hover: PathStyle,
    pub clicked: PathStyle,
    pub hover_clicked: PathStyle,
}

impl PolygonStyles {
    /// Boundary styles on the SNODAS query map.
    pub fn snodas() -> Self {
        Self {
            base: PathStyle::outline(1.0, "#4455FF"),
            hover: PathStyle::outline(2.0, "#223399"),
            clicked: PathStyle::outline(4.0, "#BB2244"),
            hover_clicked: PathStyle::outline(5.0, "#BB2244"),
        }
    }

    /// Boundary styles on the AOI overview map. Nothing is ever click-selected
    /// there, so only the hover style matters.
    pub fn aoi() -> Self {
        let hover = PathStyle::outline(5.0, "#223399");
        Self {
            base: PathStyle::outline(1.5, "#4455FF"),
            clicked: hover.clone(),
            hover_clicked: hover.clone(),
            hover,
        }
    }

    pub fn for_highlight(&self, highlight: HighlightStyle) -> &PathStyle {
        match highlight {
            HighlightStyle::Hover => &self.hover,
            HighlightStyle::Clicked => &self.clicked,
            HighlightStyle::HoverClicked => &self.hover_clicked,
        }
    }
}

/// Fill styles for the AOI boundary GeoJSON layer.
///
/// These polygons are filled rather than outlined, so they get their own pair
/// instead of sharing [`PolygonStyles`] with the vector tiles.
#[derive(Debug, Clone, PartialEq)]
pub struct BoundaryStyles {
    pub base: PathStyle,
    pub highlight: PathStyle,
}

impl Default for BoundaryStyles {
    fn default() -> Self {
        Self {
            base: PathStyle {
                fill: true,
                weight: 0.0,
                color: Some("#b20000".to_string()),
                fill_opacity: Some(0.75),
                ..PathStyle::default()
            },
            highlight: PathStyle {
                fill: true,
                weight: 0.0,
                color: Some("#b20000".to_string()),
                fill_color: Some("#0000b2".to_string()),
                fill_opacity: Some(1.0),
                ..PathStyle::default()
            },
        }
    }
}

/// Styles for the pourpoint circle markers.
#[derive(Debug, Clone, PartialEq)]
pub struct PointStyles {
    pub visible: PathStyle,
    pub hidden: PathStyle,
    pub hover: PathStyle,
    pub clicked: PathStyle,
    /// Markers are only drawn at or above this zoom.
    pub zoom_threshold: f64,
}

impl PointStyles {
    pub fn new(zoom_threshold: f64) -> Self {
        Self {
            visible: PathStyle::marker(0.0, "#227722", None),
            hidden: PathStyle::hidden(),
            hover: PathStyle::marker(1.0, "#223399", Some("#223399")),
            clicked: PathStyle::marker(1.0, "#BB2244", Some("#BB2244")),
            zoom_threshold,
        }
    }

    /// Base marker style at the given zoom.
    pub fn base(&self, zoom: f64) -> &PathStyle {
        if zoom >= self.zoom_threshold {
            &self.visible
        } else {
            &self.hidden
        }
    }

    pub fn for_highlight(&self, highlight: HighlightStyle) -> &PathStyle {
        match highlight {
            HighlightStyle::Hover => &self.hover,
            HighlightStyle::Clicked | HighlightStyle::HoverClicked => &self.clicked,
        }
    }
}
