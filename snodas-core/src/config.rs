//! Endpoint and map-view settings shared by the map pages and the CLI.
//!
//! Every field has a default, so a page shell can override just the one or
//! two values it cares about in its JSON config element.

use serde::{Deserialize, Serialize};

use crate::error::SnodasError;
use crate::highlight::HighlightCoordinator;
use crate::style::{PointStyles, PolygonStyles};
use crate::tiles::{TileSource, WATERSHED_LAYER};

pub const DEFAULT_API_ROOT: &str = "https://api.snodas.geog.pdx.edu/";

/// DOM id of the optional JSON config element in the page shell.
pub const CONFIG_ELEMENT_ID: &str = "snodas-config";

/// Which of the two map pages is running.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MapVariant {
    /// Overview of AOI boundaries with the sidebar list. Clicks open popups.
    Aoi,
    /// Query map with SNODAS tiles and the query panel. Clicks select.
    Snodas,
}

impl MapVariant {
    /// Whether clicking a feature click-selects it (otherwise it opens a popup).
    pub fn click_selects(&self) -> bool {
        matches!(self, MapVariant::Snodas)
    }

    pub fn polygon_styles(&self) -> PolygonStyles {
        match self {
            MapVariant::Aoi => PolygonStyles::aoi(),
            MapVariant::Snodas => PolygonStyles::snodas(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MapConfig {
    /// Prefix of every statistics link. Ends with `/`.
    pub api_root: String,
    pub pourpoints_url: String,
    /// Boundary polygons with their AOIs (AOI map only).
    pub boundaries_url: String,
    pub tile_dates_url: String,
    pub snodas_tile_template: String,
    pub watershed_tile_template: String,
    /// Name of the boundary layer inside the watershed vector tiles.
    pub watershed_layer: String,
    pub initial_zoom: f64,
    pub min_zoom: f64,
    /// `[lat, lng]`
    pub center: [f64; 2],
    /// Pourpoint markers are hidden below this zoom.
    pub point_zoom_threshold: f64,
    /// Cap for zoom-to-feature from the sidebar.
    pub feature_max_zoom: f64,
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            api_root: DEFAULT_API_ROOT.to_string(),
            pourpoints_url: format!("{}pourpoints/", DEFAULT_API_ROOT),
            boundaries_url: format!("{}pourpoints/polygons/", DEFAULT_API_ROOT),
            tile_dates_url: format!("{}tiles/", DEFAULT_API_ROOT),
            snodas_tile_template: "https://{s}.snodas.geog.pdx.edu/tiles/{date}/{z}/{x}/{y}.png"
                .to_string(),
            watershed_tile_template: "https://{s}.snodas.geog.pdx.edu/pourpoints/{z}/{x}/{y}.mvt"
                .to_string(),
            watershed_layer: WATERSHED_LAYER.to_string(),
            initial_zoom: 4.0,
            min_zoom: 3.0,
            center: [39.8283, -98.5795],
            point_zoom_threshold: 7.0,
            feature_max_zoom: 9.0,
        }
    }
}

impl MapConfig {
    /// Parse a page-provided config; missing fields keep their defaults.
    pub fn from_json(body: &str) -> Result<Self, SnodasError> {
        serde_json::from_str(body).map_err(|e| SnodasError::InvalidConfig(e.to_string()))
    }

    /// Point every endpoint at a different API root.
    pub fn with_api_root(api_root: &str) -> Self {
        let mut root = api_root.to_string();
        if !root.ends_with('/') {
            root.push('/');
        }
        Self {
            pourpoints_url: format!("{}pourpoints/", root),
            boundaries_url: format!("{}pourpoints/polygons/", root),
            tile_dates_url: format!("{}tiles/", root),
            api_root: root,
            ..Self::default()
        }
    }

    pub fn point_styles(&self) -> PointStyles {
        PointStyles::new(self.point_zoom_threshold)
    }

    pub fn coordinator(&self, variant: MapVariant) -> HighlightCoordinator {
        HighlightCoordinator::new(
            variant.polygon_styles(),
            self.point_styles(),
            self.initial_zoom,
        )
    }

    pub fn basemaps(&self) -> Vec<TileSource> {
        vec![TileSource::street_map(), TileSource::aerial_imagery()]
    }

    pub fn watersheds(&self) -> TileSource {
        TileSource::watersheds(&self.watershed_tile_template, &self.watershed_layer)
    }
}
