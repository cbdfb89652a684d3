//! AOI Overview Map
//!
//! AOI boundary polygons with a searchable sidebar. Hovering a sidebar row
//! highlights its boundary; clicking a boundary opens a popup with its AWDB
//! id and name. Each row lists the AOIs attached to that boundary, and an AOI
//! opens a detail modal.
//!
//! Data flow:
//! 1. The page config element supplies the boundaries endpoint.
//! 2. On mount, boundaries and pourpoints are fetched in parallel.
//! 3. Boundaries populate the sidebar (sorted by name) and the map fits to them.
//! 4. Leaflet events arrive as `MapEvent`s and drive highlights and popups.

use dioxus::prelude::*;
use snodas_core::config::MapVariant;
use snodas_ui::components::{
    AoiModal, ErrorDisplay, FeatureListPanel, LoadingSpinner, PanelHeader,
};
use snodas_ui::handlers::{self, use_leaflet_map};
use snodas_ui::js_bridge;
use snodas_ui::state::AppState;

fn main() {
    dioxus_logger::init(dioxus_logger::tracing::Level::INFO).expect("failed to init logger");
    dioxus::LaunchBuilder::new()
        .with_cfg(dioxus::web::Config::new().rootname("aoi-map-root"))
        .launch(App);
}

#[component]
fn App() -> Element {
    let mut state =
        use_context_provider(|| AppState::new(MapVariant::Aoi, js_bridge::read_page_config()));
    use_leaflet_map(state);

    use_effect(move || {
        spawn(async move {
            futures::join!(
                handlers::load_boundaries(state),
                handlers::load_pourpoints(state)
            );
            state.loading.set(false);
        });
    });

    let count = state.feature_list.read().len();

    rsx! {
        div {
            style: "display: flex; height: 100vh; font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif;",
            div {
                id: "sidebar",
                style: "width: 320px; padding: 16px; overflow-y: auto; border-right: 1px solid #E0E0E0;",

                PanelHeader {
                    title: "Areas of Interest".to_string(),
                    description: format!("{} watersheds", count),
                }

                ErrorDisplay {}
                if (state.loading)() {
                    LoadingSpinner { label: "AOI boundaries".to_string() }
                } else {
                    FeatureListPanel {}
                }
            }
            div {
                id: js_bridge::MAP_CONTAINER_ID,
                style: "flex: 1;",
            }
            AoiModal {}
        }
    }
}
