//! SNODAS Query Map
//!
//! Watershed boundaries (vector tiles) and pourpoint markers over the SNODAS
//! raster layer. Clicking a boundary or pourpoint selects it for a statistics
//! query; the query panel builds the link once the chosen mode's form is
//! complete.
//!
//! Data flow:
//! 1. The page config element (if any) overrides the default endpoints.
//! 2. On mount, the available tile dates and the pourpoints are fetched in
//!    parallel. The dates seed the tile date picker and the query forms.
//! 3. Leaflet events arrive as `MapEvent`s and update the highlight
//!    coordinator and the query panel.
//! 4. The tile date picker and "Show SNODAS" toggle drive the raster layer.

use dioxus::prelude::*;
use snodas_core::config::MapVariant;
use snodas_ui::components::{
    ErrorDisplay, LoadingSpinner, PanelHeader, QueryPanelView, TileDateControls,
};
use snodas_ui::handlers::{self, use_leaflet_map};
use snodas_ui::js_bridge;
use snodas_ui::state::AppState;

fn main() {
    dioxus_logger::init(dioxus_logger::tracing::Level::INFO).expect("failed to init logger");
    dioxus::LaunchBuilder::new()
        .with_cfg(dioxus::web::Config::new().rootname("snodas-map-root"))
        .launch(App);
}

#[component]
fn App() -> Element {
    let mut state = use_context_provider(|| {
        AppState::new(MapVariant::Snodas, js_bridge::read_page_config())
    });
    use_leaflet_map(state);

    // Initial loads
    use_effect(move || {
        spawn(async move {
            futures::join!(
                handlers::load_tile_dates(state),
                handlers::load_pourpoints(state)
            );
            state.loading.set(false);
        });
    });

    // Keep the raster layer in step with the date picker and toggle
    use_effect(move || {
        let date = (state.tile_date)();
        let enabled = (state.snodas_on)();
        let update = state.tile_layer.write().update(date, enabled);
        if update.url.is_some() || update.show.is_some() {
            log::debug!("SNODAS layer update: {:?}", update);
        }
        js_bridge::update_snodas_layer(&update);
    });

    rsx! {
        div {
            style: "display: flex; height: 100vh; font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif;",
            div {
                id: "sidebar",
                style: "width: 340px; padding: 16px; overflow-y: auto; border-right: 1px solid #E0E0E0;",

                PanelHeader {
                    title: "SNODAS Query".to_string(),
                    description: "Click a watershed or pourpoint to select it, then choose a query type.".to_string(),
                }

                ErrorDisplay {}
                if (state.loading)() {
                    LoadingSpinner { label: "SNODAS dates and pourpoints".to_string() }
                }

                TileDateControls {}
                QueryPanelView {}
            }
            div {
                id: js_bridge::MAP_CONTAINER_ID,
                style: "flex: 1;",
            }
        }
    }
}
