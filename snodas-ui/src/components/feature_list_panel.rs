//! Sidebar list of AOI boundaries with a name filter.

use crate::handlers::{hover_feature, leave_feature};
use crate::js_bridge;
use crate::state::AppState;
use dioxus::prelude::*;
use snodas_core::feature::Aoi;
use snodas_core::feature_list::FeatureRow;

/// Filterable boundary list. Hovering a row highlights its boundary on the map.
#[component]
pub fn FeatureListPanel() -> Element {
    let mut state = use_context::<AppState>();
    let list = state.feature_list.read().clone();
    let filter = list.filter().to_string();
    let rows: Vec<FeatureRow> = list.visible().into_iter().cloned().collect();

    let on_filter = move |evt: Event<FormData>| {
        state.feature_list.write().set_filter(evt.value());
    };

    let on_clear = move |_| {
        state.feature_list.write().clear_filter();
    };

    rsx! {
        div {
            id: "features",
            style: "display: flex; flex-direction: column; gap: 8px;",
            div {
                style: "display: flex; gap: 4px;",
                input {
                    id: "filter",
                    r#type: "text",
                    placeholder: "Filter",
                    value: "{filter}",
                    style: "flex: 1;",
                    oninput: on_filter,
                }
                button {
                    id: "clear-btn",
                    r#type: "button",
                    onclick: on_clear,
                    "Clear"
                }
            }
            div {
                id: "feature-list",
                if rows.is_empty() && !list.is_empty() {
                    p { style: "color: #666;", "No matching features" }
                }
                for row in rows {
                    FeatureRowItem { key: "{row.id}", row: row.clone() }
                }
            }
        }
    }
}

#[derive(Props, Clone, PartialEq)]
struct FeatureRowItemProps {
    row: FeatureRow,
}

#[component]
fn FeatureRowItem(props: FeatureRowItemProps) -> Element {
    let state = use_context::<AppState>();
    let mut expanded = use_signal(|| false);
    let id = props.row.id;
    let max_zoom = state.config.read().feature_max_zoom;
    let icon = if expanded() { "[-]" } else { "[+]" };

    let on_enter = move |_| hover_feature(state, id);

    let on_leave = move |_| leave_feature(state, id);

    let on_zoom = move |evt: Event<MouseData>| {
        evt.stop_propagation();
        js_bridge::fit_feature(id, max_zoom);
    };

    rsx! {
        div {
            class: "feature-row",
            id: "{id}",
            style: "padding: 4px 0; border-bottom: 1px solid #eee; cursor: pointer;",
            onmouseenter: on_enter,
            onmouseleave: on_leave,
            div {
                class: "pourpoint-header",
                style: "display: flex; justify-content: space-between; align-items: center;",
                span {
                    class: "expand-icon",
                    style: "margin-right: 6px;",
                    onclick: move |_| expanded.set(!expanded()),
                    "{icon}"
                }
                span {
                    class: "feature-name",
                    style: "flex: 1;",
                    "{props.row.name}"
                }
                button {
                    class: "zoom-to-pp",
                    r#type: "button",
                    title: "Zoom to boundary",
                    onclick: on_zoom,
                    "Zoom"
                }
            }
            if expanded() {
                ul {
                    style: "margin: 4px 0 0 20px; padding: 0;",
                    if props.row.aois.is_empty() {
                        li { style: "color: #666;", "No AOIs" }
                    }
                    for aoi in props.row.aois.iter() {
                        AoiEntry { key: "{aoi.id}", aoi: aoi.clone() }
                    }
                }
            }
        }
    }
}

#[derive(Props, Clone, PartialEq)]
struct AoiEntryProps {
    aoi: Aoi,
}

/// One AOI under a boundary row. Clicking it opens the AOI modal.
#[component]
fn AoiEntry(props: AoiEntryProps) -> Element {
    let mut state = use_context::<AppState>();
    let aoi = props.aoi.clone();

    rsx! {
        li {
            class: "aoi-row",
            id: "{props.aoi.id}",
            style: "list-style: none; color: #223399;",
            onclick: move |_| state.selected_aoi.set(Some(aoi.clone())),
            "{props.aoi.name}"
        }
    }
}
