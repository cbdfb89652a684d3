//! Typed wrappers around JS interop via `js_sys::eval()`.
//!
//! The Leaflet side lives in `assets/js/leaflet-bridge.js` and is loaded at
//! runtime, once Leaflet and Leaflet.VectorGrid are on the page. It exposes a
//! single `window.snodasMap` object. Calls made before the map is ready are
//! queued on the JS side and replayed in order.
//!
//! Map events travel the other way through a closure registered as
//! `window.__snodasDispatch`, which receives one JSON-encoded [`MapEvent`] per
//! call.

use futures::channel::mpsc::UnboundedSender;
use serde::Serialize;
use snodas_core::config::{MapConfig, MapVariant, CONFIG_ELEMENT_ID};
use snodas_core::event::MapEvent;
use snodas_core::highlight::{MarkerRenderer, OverlayRenderer};
use snodas_core::style::{BoundaryStyles, PathStyle};
use snodas_core::tiles::{TileLayerUpdate, TileSource};
use snodas_core::FeatureId;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};

static LEAFLET_BRIDGE_JS: &str = include_str!("../assets/js/leaflet-bridge.js");

/// DOM id of the Leaflet map container in the page shell.
pub const MAP_CONTAINER_ID: &str = "map";

/// Execute arbitrary JS, wrapping in try/catch to avoid panics.
pub fn call_js(code: &str) {
    let wrapped = format!(
        "try {{ {} }} catch(e) {{ console.warn('SNODAS JS call failed:', e); }}",
        code
    );
    let _ = js_sys::eval(&wrapped);
}

/// Evaluate a JS expression that yields a boolean. Any failure reads as `false`.
fn eval_bool(expr: &str) -> bool {
    let wrapped = format!("(function() {{ try {{ return !!({}); }} catch(e) {{ return false; }} }})()", expr);
    js_sys::eval(&wrapped)
        .ok()
        .and_then(|v| v.as_bool())
        .unwrap_or(false)
}

/// Quote a Rust string as a JS string literal.
fn js_str(s: &str) -> String {
    serde_json::to_string(s).unwrap_or_else(|_| "\"\"".to_string())
}

/// Run `body` against `window.snodasMap` (bound as `m`) once the map is ready.
fn call_map(body: &str) {
    call_js(&format!(
        r#"
        (function() {{
            var run = function() {{ var m = window.snodasMap; {body} }};
            if (window.__snodasReady) {{
                run();
            }} else {{
                (window.__snodasPending = window.__snodasPending || []).push(run);
            }}
        }})();
        "#,
    ));
}

/// Options handed to `snodasMap.init`, in the bridge's own field names.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct MapInit<'a> {
    center: [f64; 2],
    zoom: f64,
    min_zoom: f64,
    basemaps: Vec<TileSource>,
    watersheds: TileSource,
    /// Only the query map carries the SNODAS raster layer.
    #[serde(skip_serializing_if = "Option::is_none")]
    snodas: Option<TileSource>,
    polygon_style: &'a PathStyle,
    zoom_to_extent: bool,
}

/// Load the Leaflet bridge and create the map once Leaflet is available.
///
/// The bridge script declares `snodasMap` with `var`. It is evaluated at
/// global scope via indirect eval from inside the polling callback, the same
/// way regardless of when Leaflet finishes loading.
pub fn init_map(config: &MapConfig, variant: MapVariant) {
    let polygon_styles = variant.polygon_styles();
    let init = MapInit {
        center: config.center,
        zoom: config.initial_zoom,
        min_zoom: config.min_zoom,
        basemaps: config.basemaps(),
        watersheds: config.watersheds(),
        snodas: match variant {
            MapVariant::Snodas => Some(TileSource::snodas()),
            MapVariant::Aoi => None,
        },
        polygon_style: &polygon_styles.base,
        zoom_to_extent: variant == MapVariant::Aoi,
    };
    let init_json = match serde_json::to_string(&init) {
        Ok(json) => json,
        Err(e) => {
            log::error!("Failed to serialize map options: {}", e);
            return;
        }
    };

    let store_js = format!(
        "window.__snodasBridgeScript = {};",
        js_str(LEAFLET_BRIDGE_JS)
    );
    let _ = js_sys::eval(&store_js);

    call_js(&format!(
        r#"
        (function() {{
            var waitForLeaflet = setInterval(function() {{
                if (typeof L !== 'undefined' && L.vectorGrid &&
                    document.getElementById({container})) {{
                    clearInterval(waitForLeaflet);
                    (0, eval)(window.__snodasBridgeScript);
                    delete window.__snodasBridgeScript;
                    window.snodasMap.init({container}, {init_json});
                    window.__snodasReady = true;
                    var pending = window.__snodasPending || [];
                    delete window.__snodasPending;
                    pending.forEach(function(run) {{
                        try {{ run(); }} catch(e) {{ console.warn('SNODAS queued call failed:', e); }}
                    }});
                    console.log('SNODAS map initialized');
                }}
            }}, 100);
        }})();
        "#,
        container = js_str(MAP_CONTAINER_ID),
    ));
}

/// Forward every map event into `sender`.
///
/// The closure lives as long as the page, so it is leaked with `forget`.
pub fn register_event_sink(sender: UnboundedSender<MapEvent>) {
    let Some(window) = web_sys::window() else {
        log::error!("No window; map events will not be delivered");
        return;
    };
    let callback = Closure::<dyn FnMut(String)>::new(move |body: String| {
        match MapEvent::from_json(&body) {
            Ok(event) => {
                if sender.unbounded_send(event).is_err() {
                    log::warn!("Map event receiver dropped");
                }
            }
            Err(e) => log::warn!("Ignoring malformed map event {}: {}", body, e),
        }
    });
    if let Err(e) = js_sys::Reflect::set(
        &window,
        &JsValue::from_str("__snodasDispatch"),
        callback.as_ref(),
    ) {
        log::error!("Failed to register map event handler: {:?}", e);
    }
    callback.forget();
}

/// Add the pourpoint markers from a GeoJSON FeatureCollection body.
pub fn add_pourpoints(geojson: &str, base_style: &PathStyle) {
    call_map(&format!(
        "m.addPourpoints({}, {});",
        geojson,
        base_style.to_json()
    ));
}

/// Add the boundary polygons from a GeoJSON FeatureCollection body.
///
/// Overlays drawn on these polygons use `styles.highlight` in place of the
/// vector-tile style passed to `drawOverlay`.
pub fn add_boundaries(geojson: &str, styles: &BoundaryStyles) {
    call_map(&format!(
        "m.addBoundaries({}, {}, {});",
        geojson,
        styles.base.to_json(),
        styles.highlight.to_json()
    ));
}

/// Open the popup for feature `id`. Its close event reports the same id.
pub fn open_popup(id: FeatureId, latlng: [f64; 2], text: &str) {
    call_map(&format!(
        "m.openPopup({}, {}, {}, {});",
        id,
        latlng[0],
        latlng[1],
        js_str(text)
    ));
}

pub fn close_popup() {
    call_map("m.closePopup();");
}

/// Fit the map to one boundary, capped at `max_zoom`.
pub fn fit_feature(id: FeatureId, max_zoom: f64) {
    call_map(&format!("m.fitFeature({}, {});", id, max_zoom));
}

/// Fit the map to every loaded boundary. A no-op when none are loaded.
pub fn fit_boundaries() {
    call_map("m.fitBoundaries();");
}

/// Apply a SNODAS raster layer change.
pub fn update_snodas_layer(update: &TileLayerUpdate) {
    if let Some(url) = &update.url {
        call_map(&format!("m.setSnodasUrl({});", js_str(url)));
    }
    if let Some(show) = update.show {
        call_map(&format!("m.showSnodas({});", show));
    }
}

/// Polygon overlays on the watershed vector tiles and the boundary layer.
#[derive(Debug, Default, Clone, Copy)]
pub struct LeafletPolygons;

impl OverlayRenderer for LeafletPolygons {
    fn has_feature(&self, id: FeatureId) -> bool {
        eval_bool(&format!(
            "window.__snodasReady && window.snodasMap.hasFeature({})",
            id
        ))
    }

    fn draw(&mut self, id: FeatureId, style: &PathStyle) {
        call_map(&format!("m.drawOverlay({}, {});", id, style.to_json()));
    }

    fn erase(&mut self, id: FeatureId) {
        call_map(&format!("m.eraseOverlay({});", id));
    }
}

/// Pourpoint circle markers.
#[derive(Debug, Default, Clone, Copy)]
pub struct LeafletMarkers;

impl MarkerRenderer for LeafletMarkers {
    fn has_marker(&self, id: FeatureId) -> bool {
        eval_bool(&format!(
            "window.__snodasReady && window.snodasMap.hasMarker({})",
            id
        ))
    }

    fn set_marker_style(&mut self, id: FeatureId, style: &PathStyle) {
        call_map(&format!("m.setMarkerStyle({}, {});", id, style.to_json()));
    }

    fn restyle_all(&mut self, style: &PathStyle) {
        call_map(&format!("m.restyleMarkers({});", style.to_json()));
    }
}

/// GET `url` and return the body as text.
pub async fn fetch_text(url: &str) -> Result<String, String> {
    use web_sys::{Request, RequestInit, RequestMode, Response};

    let opts = RequestInit::new();
    opts.set_method("GET");
    opts.set_mode(RequestMode::Cors);

    let request = Request::new_with_str_and_init(url, &opts)
        .map_err(|e| format!("Failed to create request: {:?}", e))?;

    let window = web_sys::window().ok_or("No window")?;
    let resp_value = wasm_bindgen_futures::JsFuture::from(window.fetch_with_request(&request))
        .await
        .map_err(|e| format!("Fetch failed: {:?}", e))?;

    let resp: Response = resp_value
        .dyn_into()
        .map_err(|_| "Response is not a Response")?;

    if !resp.ok() {
        return Err(format!("HTTP error {} from {}", resp.status(), url));
    }

    let text = wasm_bindgen_futures::JsFuture::from(
        resp.text()
            .map_err(|e| format!("Failed to read response: {:?}", e))?,
    )
    .await
    .map_err(|e| format!("Failed to read response: {:?}", e))?;

    text.as_string()
        .ok_or_else(|| "Response body is not text".to_string())
}

/// Read the page's optional JSON config element, falling back to defaults.
pub fn read_page_config() -> MapConfig {
    let body = web_sys::window()
        .and_then(|w| w.document())
        .and_then(|d| d.get_element_by_id(CONFIG_ELEMENT_ID))
        .and_then(|el| el.text_content());

    match body {
        Some(body) if !body.trim().is_empty() => match MapConfig::from_json(&body) {
            Ok(config) => config,
            Err(e) => {
                log::warn!("{}; using defaults", e);
                MapConfig::default()
            }
        },
        _ => MapConfig::default(),
    }
}
