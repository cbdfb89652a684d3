//! Tile layer definitions handed to Leaflet, and the dated SNODAS raster layer.

use chrono::NaiveDate;
use serde::Serialize;

/// Date format of the `{date}` segment in SNODAS raster tile URLs.
pub const TILE_DATE_FORMAT: &str = "%Y%m%d";

/// Extent of the SNODAS grid, `[[north, west], [south, east]]`.
pub const SNODAS_BOUNDS: [[f64; 2]; 2] = [[52.8754, -124.7337], [24.9504, -66.9421]];

pub const SNODAS_MAX_NATIVE_ZOOM: u8 = 15;

/// Layer name inside the watershed `.mvt` tiles. VectorGrid looks styles up by it.
pub const WATERSHED_LAYER: &str = "polygons";

const CARTO_ATTRIBUTION: &str = "&copy; <a href=\"http://www.openstreetmap.org/copyright\">OpenStreetMap</a> contributors, &copy; <a href=\"https://cartodb.com/attributions\">CartoDB</a>";

/// Options for one Leaflet tile layer, in Leaflet's option names.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TileSource {
    pub name: String,
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subdomains: Option<String>,
    pub tms: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_zoom: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_native_zoom: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bounds: Option<[[f64; 2]; 2]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attribution: Option<String>,
    /// Vector tiles only: the layer the base style applies to.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub layer: Option<String>,
}

impl TileSource {
    pub fn street_map() -> Self {
        Self {
            name: "Street Map".to_string(),
            url: "https://cartodb-basemaps-{s}.global.ssl.fastly.net/light_all/{z}/{x}/{y}.png"
                .to_string(),
            subdomains: None,
            tms: false,
            max_zoom: Some(19),
            max_native_zoom: None,
            bounds: None,
            attribution: Some(CARTO_ATTRIBUTION.to_string()),
            layer: None,
        }
    }

    pub fn aerial_imagery() -> Self {
        Self {
            name: "Aerial Imagery".to_string(),
            url: "http://basemap.nationalmap.gov/arcgis/rest/services/USGSImageryOnly/MapServer/tile/{z}/{y}/{x}"
                .to_string(),
            subdomains: None,
            tms: false,
            max_zoom: Some(15),
            max_native_zoom: None,
            bounds: None,
            attribution: Some("Aerial Imagery courtesy USGS".to_string()),
            layer: None,
        }
    }

    /// Pourpoint boundary vector tiles (`.mvt`), keyed by `pourpoint_id`.
    pub fn watersheds(template: &str, layer: &str) -> Self {
        Self {
            name: "Watersheds".to_string(),
            url: template.to_string(),
            subdomains: Some("abcde".to_string()),
            tms: true,
            max_zoom: None,
            max_native_zoom: None,
            bounds: None,
            attribution: None,
            layer: Some(layer.to_string()),
        }
    }

    /// SNODAS raster tiles. The URL is filled in once a date is chosen.
    pub fn snodas() -> Self {
        Self {
            name: "SNODAS".to_string(),
            url: String::new(),
            subdomains: Some("fghij".to_string()),
            tms: true,
            max_zoom: None,
            max_native_zoom: Some(SNODAS_MAX_NATIVE_ZOOM),
            bounds: Some(SNODAS_BOUNDS),
            attribution: None,
            layer: None,
        }
    }
}

/// What the bridge must do to the SNODAS raster layer after an update.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TileLayerUpdate {
    /// New URL template, present only when the date changed.
    pub url: Option<String>,
    /// `Some(true)` to add the layer to the map, `Some(false)` to remove it.
    pub show: Option<bool>,
}

/// The date-parameterized SNODAS raster layer.
#[derive(Debug, Clone, PartialEq)]
pub struct SnodasTileLayer {
    template: String,
    date: Option<NaiveDate>,
    shown: bool,
}

impl SnodasTileLayer {
    /// `template` contains a `{date}` placeholder; `{s}`, `{z}`, `{x}` and
    /// `{y}` are left for Leaflet.
    pub fn new(template: impl Into<String>) -> Self {
        Self {
            template: template.into(),
            date: None,
            shown: false,
        }
    }

    pub fn date(&self) -> Option<NaiveDate> {
        self.date
    }

    pub fn shown(&self) -> bool {
        self.shown
    }

    pub fn url_for(&self, date: NaiveDate) -> String {
        self.template
            .replace("{date}", &date.format(TILE_DATE_FORMAT).to_string())
    }

    /// Apply the picker date and the on/off toggle.
    pub fn update(&mut self, date: Option<NaiveDate>, enabled: bool) -> TileLayerUpdate {
        let mut update = TileLayerUpdate::default();
        if let Some(date) = date {
            if self.date != Some(date) {
                self.date = Some(date);
                update.url = Some(self.url_for(date));
            }
        }
        let want_shown = enabled && self.date.is_some();
        if want_shown != self.shown {
            self.shown = want_shown;
            update.show = Some(want_shown);
        }
        update
    }
}
