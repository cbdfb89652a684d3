//! Load failure banner.

use crate::state::AppState;
use dioxus::prelude::*;

/// Shows the last load error, the API it came from, and ways out of it.
///
/// Renders nothing while `error_msg` is empty.
#[component]
pub fn ErrorDisplay() -> Element {
    let mut state = use_context::<AppState>();
    let Some(message) = (state.error_msg)() else {
        return rsx! {};
    };
    let api_root = state.config.read().api_root.clone();

    let on_reload = move |_| {
        let reloaded = web_sys::window().map(|w| w.location().reload());
        if let Some(Err(e)) = reloaded {
            log::error!("Page reload failed: {:?}", e);
        }
    };

    rsx! {
        div {
            class: "snodas-error",
            role: "alert",
            style: "padding: 10px 12px; margin: 8px 0; background: #FFEBEE; color: #C62828; border-left: 4px solid #C62828;",
            p { style: "margin: 0 0 4px 0;", "{message}" }
            p {
                style: "margin: 0 0 8px 0; font-size: 12px; color: #666;",
                "SNODAS API: {api_root}"
            }
            button {
                r#type: "button",
                onclick: on_reload,
                "Reload"
            }
            button {
                r#type: "button",
                style: "margin-left: 6px;",
                onclick: move |_| state.error_msg.set(None),
                "Dismiss"
            }
        }
    }
}
