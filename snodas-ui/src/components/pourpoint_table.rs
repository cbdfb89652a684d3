//! Summary of the pourpoint a query will run against.

use crate::state::AppState;
use dioxus::prelude::*;

/// Shows the click-selected pourpoint, or a hint to pick one on the map.
#[component]
pub fn PourpointTable() -> Element {
    let state = use_context::<AppState>();
    let selected = state.panel.read().pourpoint().cloned();

    rsx! {
        table {
            id: "snodas-query-pp-table",
            style: "width: 100%; margin: 8px 0; border-collapse: collapse;",
            tbody {
                {match selected {
                    Some(pp) => rsx! {
                        tr {
                            th { style: "text-align: left; padding-right: 12px;", "Pourpoint" }
                            td { id: "snodas-query-pp-name", "{pp.name}" }
                        }
                        tr {
                            th { style: "text-align: left; padding-right: 12px;", "AWDB ID" }
                            td { "{pp.awdb_id.clone().unwrap_or_default()}" }
                        }
                        tr {
                            th { style: "text-align: left; padding-right: 12px;", "Query Type" }
                            td { if pp.is_polygon { "Polygon" } else { "Point" } }
                        }
                    },
                    None => rsx! {
                        tr {
                            td {
                                style: "color: #666; font-style: italic;",
                                "Select a pourpoint or watershed on the map"
                            }
                        }
                    },
                }}
            }
        }
    }
}
