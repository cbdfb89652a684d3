//! Application state managed via Dioxus context.
//!
//! `AppState` bundles all reactive signals into a single struct provided via
//! `use_context_provider`. Child components retrieve it with `use_context::<AppState>()`.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use dioxus::prelude::*;
use snodas_core::available_dates::AvailableDates;
use snodas_core::config::{MapConfig, MapVariant};
use snodas_core::feature::{Aoi, PourpointProperties};
use snodas_core::feature_list::FeatureList;
use snodas_core::fetch::FetchGenerations;
use snodas_core::highlight::HighlightCoordinator;
use snodas_core::query::QueryPanel;
use snodas_core::tiles::SnodasTileLayer;
use snodas_core::FeatureId;

/// Shared application state for both map pages.
#[derive(Clone, Copy)]
pub struct AppState {
    /// Which page is running. Fixed for the life of the app.
    pub variant: MapVariant,
    pub config: Signal<MapConfig>,
    /// Whether the initial loads are still in flight
    pub loading: Signal<bool>,
    /// Error message if a load failed
    pub error_msg: Signal<Option<String>>,
    pub generations: Signal<FetchGenerations>,
    pub coordinator: Signal<HighlightCoordinator>,
    /// Pourpoint properties by id, for click selection
    pub pourpoints: Signal<BTreeMap<FeatureId, PourpointProperties>>,
    /// Sidebar rows (AOI map)
    pub feature_list: Signal<FeatureList>,
    pub aois: Signal<BTreeMap<i64, Aoi>>,
    /// AOI shown in the detail modal
    pub selected_aoi: Signal<Option<Aoi>>,
    /// Boundary whose popup is open, if any
    pub popup: Signal<Option<FeatureId>>,
    /// Available SNODAS dates (None until loaded)
    pub dates: Signal<Option<AvailableDates>>,
    pub panel: Signal<QueryPanel>,
    pub tile_layer: Signal<SnodasTileLayer>,
    /// Date chosen in the tile date picker
    pub tile_date: Signal<Option<NaiveDate>>,
    /// "SNODAS on" toggle
    pub snodas_on: Signal<bool>,
}

impl AppState {
    /// Create a new AppState for `variant` with default signal values.
    pub fn new(variant: MapVariant, config: MapConfig) -> Self {
        Self {
            variant,
            coordinator: Signal::new(config.coordinator(variant)),
            panel: Signal::new(QueryPanel::new(config.api_root.clone())),
            tile_layer: Signal::new(SnodasTileLayer::new(config.snodas_tile_template.clone())),
            config: Signal::new(config),
            loading: Signal::new(true),
            error_msg: Signal::new(None),
            generations: Signal::new(FetchGenerations::new()),
            pourpoints: Signal::new(BTreeMap::new()),
            feature_list: Signal::new(FeatureList::new()),
            aois: Signal::new(BTreeMap::new()),
            selected_aoi: Signal::new(None),
            popup: Signal::new(None),
            dates: Signal::new(None),
            tile_date: Signal::new(None),
            snodas_on: Signal::new(true),
        }
    }
}
