//! Detail modal for one AOI.

use crate::state::AppState;
use dioxus::prelude::*;

/// Shows the AOI chosen in the sidebar, with all its properties.
#[component]
pub fn AoiModal() -> Element {
    let mut state = use_context::<AppState>();
    let Some(aoi) = state.selected_aoi.read().clone() else {
        return rsx! {};
    };

    let extra: Vec<(String, String)> = aoi
        .extra
        .iter()
        .map(|(k, v)| {
            let value = match v {
                serde_json::Value::String(s) => s.clone(),
                other => other.to_string(),
            };
            (k.clone(), value)
        })
        .collect();

    rsx! {
        div {
            id: "aoiModal",
            style: "position: fixed; inset: 0; background: rgba(0,0,0,0.4); display: flex; align-items: center; justify-content: center; z-index: 2000;",
            onclick: move |_| state.selected_aoi.set(None),
            div {
                style: "background: white; border-radius: 4px; padding: 16px 20px; min-width: 320px; max-width: 90vw;",
                onclick: move |evt| evt.stop_propagation(),
                div {
                    style: "display: flex; justify-content: space-between; align-items: center; margin-bottom: 8px;",
                    h4 { style: "margin: 0;", "{aoi.name}" }
                    button {
                        r#type: "button",
                        onclick: move |_| state.selected_aoi.set(None),
                        "Close"
                    }
                }
                table {
                    style: "width: 100%; border-collapse: collapse;",
                    tbody {
                        tr {
                            th { style: "text-align: left; padding-right: 12px;", "AOI ID" }
                            td { "{aoi.id}" }
                        }
                        for (name, value) in extra {
                            tr {
                                key: "{name}",
                                th { style: "text-align: left; padding-right: 12px;", "{name}" }
                                td { "{value}" }
                            }
                        }
                    }
                }
            }
        }
    }
}
