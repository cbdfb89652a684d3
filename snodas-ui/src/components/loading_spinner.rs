use dioxus::prelude::*;

#[derive(Props, Clone, PartialEq)]
pub struct LoadingSpinnerProps {
    /// What is being fetched, e.g. "AOI boundaries".
    pub label: String,
}

#[component]
pub fn LoadingSpinner(props: LoadingSpinnerProps) -> Element {
    rsx! {
        div {
            id: "loading",
            class: "snodas-loading",
            style: "display: flex; gap: 8px; align-items: center; padding: 16px 0; color: #666;",
            div {
                class: "spinner-border spinner-border-sm",
                role: "status",
            }
            span { "Loading {props.label}..." }
        }
    }
}
