//! Map event dispatch and the data loaders shared by both map pages.
//!
//! Every Leaflet event lands in [`dispatch`]. The page's `MapContext` decides
//! what it means; this module only applies the outcome to the signals and the
//! bridge.

use dioxus::prelude::*;
use futures::StreamExt;
use snodas_core::available_dates::AvailableDates;
use snodas_core::event::MapEvent;
use snodas_core::feature::{collect_aois, BoundaryFeature, FeatureCollection, PourpointProperties};
use snodas_core::fetch::FetchKind;
use snodas_core::interaction::{end_hover, MapContext, PopupAction};
use snodas_core::style::BoundaryStyles;
use snodas_core::FeatureId;

use crate::js_bridge::{self, LeafletMarkers, LeafletPolygons};
use crate::state::AppState;

/// Create the Leaflet map and route its events into [`dispatch`].
///
/// Call once from the app's root component, after `AppState` is provided.
pub fn use_leaflet_map(state: AppState) {
    let events = use_coroutine(move |mut rx: UnboundedReceiver<MapEvent>| async move {
        while let Some(event) = rx.next().await {
            dispatch(state, event);
        }
    });

    use_hook(move || {
        js_bridge::register_event_sink(events.tx());
        js_bridge::init_map(&state.config.peek(), state.variant);
    });
}

/// Apply one map event to the shared state.
pub fn dispatch(mut state: AppState, event: MapEvent) {
    let outcome = {
        let pourpoints = state.pourpoints.peek();
        let ctx = MapContext {
            variant: state.variant,
            pourpoints: &pourpoints,
            popup: *state.popup.peek(),
        };
        ctx.route(
            &event,
            &mut state.coordinator.write(),
            &mut LeafletPolygons,
            &mut LeafletMarkers,
        )
    };

    if let Some(action) = outcome.panel {
        action.apply(&mut state.panel.write());
    }
    match outcome.popup {
        Some(PopupAction::Open { id, latlng, text }) => {
            js_bridge::open_popup(id, latlng, &text);
            state.popup.set(Some(id));
        }
        Some(PopupAction::Close) => {
            js_bridge::close_popup();
            state.popup.set(None);
        }
        Some(PopupAction::Closed) => state.popup.set(None),
        None => {}
    }
}

/// Hover a sidebar row's boundary on the map.
pub fn hover_feature(mut state: AppState, id: FeatureId) {
    state
        .coordinator
        .write()
        .hover(id, &mut LeafletPolygons, &mut LeafletMarkers);
}

/// The pointer left a sidebar row.
pub fn leave_feature(mut state: AppState, id: FeatureId) {
    let popup = *state.popup.peek();
    end_hover(
        id,
        popup,
        &mut state.coordinator.write(),
        &mut LeafletPolygons,
        &mut LeafletMarkers,
    );
}

/// Fetch the available tile dates and seed the date pickers.
pub async fn load_tile_dates(mut state: AppState) {
    let token = state.generations.write().issue(FetchKind::TileDates);
    let url = state.config.peek().tile_dates_url.clone();
    let result = js_bridge::fetch_text(&url).await;

    if let Err(e) = state.generations.peek().accept(token) {
        log::debug!("{}", e);
        return;
    }

    let body = match result {
        Ok(body) => body,
        Err(e) => {
            log::error!("Failed to fetch SNODAS dates: {}", e);
            state
                .error_msg
                .set(Some(format!("Failed to fetch SNODAS dates: {}", e)));
            return;
        }
    };

    let dates = match AvailableDates::from_json(&body) {
        Ok(dates) => dates,
        Err(e) => {
            log::error!("Failed to parse SNODAS dates: {}", e);
            state
                .error_msg
                .set(Some(format!("Failed to parse SNODAS dates: {}", e)));
            return;
        }
    };

    if dates.is_empty() {
        log::warn!("No SNODAS dates available");
    }
    log::info!("Loaded {} SNODAS dates", dates.len());

    state.tile_date.set(dates.max_date());
    if let Err(e) = state.panel.write().dates_loaded(&dates) {
        log::warn!("Query form initialization failed: {}", e);
    }
    state.dates.set(Some(dates));
}

/// Fetch the pourpoint markers and hand them to the map.
pub async fn load_pourpoints(mut state: AppState) {
    let token = state.generations.write().issue(FetchKind::Pourpoints);
    let url = state.config.peek().pourpoints_url.clone();
    let result = js_bridge::fetch_text(&url).await;

    if let Err(e) = state.generations.peek().accept(token) {
        log::debug!("{}", e);
        return;
    }

    let body = match result {
        Ok(body) => body,
        Err(e) => {
            log::error!("Failed to fetch pourpoints: {}", e);
            state
                .error_msg
                .set(Some(format!("Failed to fetch pourpoints: {}", e)));
            return;
        }
    };

    let collection = match FeatureCollection::<PourpointProperties>::from_json(&body) {
        Ok(collection) => collection,
        Err(e) => {
            log::error!("Failed to parse pourpoints: {}", e);
            state
                .error_msg
                .set(Some(format!("Failed to parse pourpoints: {}", e)));
            return;
        }
    };
    log::info!("Loaded {} pourpoints", collection.features.len());

    let base_style = state.coordinator.peek().base_point_style().clone();
    js_bridge::add_pourpoints(&body, &base_style);

    state.pourpoints.set(
        collection
            .features
            .into_iter()
            .map(|f| (f.id(), f.properties))
            .collect(),
    );
    state
        .coordinator
        .write()
        .markers_loaded(&mut LeafletMarkers);
}

/// Fetch the AOI boundaries, draw them and fill the sidebar.
pub async fn load_boundaries(mut state: AppState) {
    let token = state.generations.write().issue(FetchKind::Boundaries);
    let url = state.config.peek().boundaries_url.clone();
    let result = js_bridge::fetch_text(&url).await;

    if let Err(e) = state.generations.peek().accept(token) {
        log::debug!("{}", e);
        return;
    }

    let body = match result {
        Ok(body) => body,
        Err(e) => {
            log::error!("Failed to fetch AOI boundaries: {}", e);
            state
                .error_msg
                .set(Some(format!("Failed to fetch AOI boundaries: {}", e)));
            return;
        }
    };

    let boundaries: Vec<BoundaryFeature> = match FeatureCollection::from_json(&body) {
        Ok(collection) => collection.features,
        Err(e) => {
            log::error!("Failed to parse AOI boundaries: {}", e);
            state
                .error_msg
                .set(Some(format!("Failed to parse AOI boundaries: {}", e)));
            return;
        }
    };
    log::info!("Loaded {} AOI boundaries", boundaries.len());

    js_bridge::add_boundaries(&body, &BoundaryStyles::default());
    js_bridge::fit_boundaries();

    state.feature_list.write().populate(&boundaries);
    state.aois.set(collect_aois(&boundaries));
    state
        .coordinator
        .write()
        .tiles_loaded(&mut LeafletPolygons);
}
