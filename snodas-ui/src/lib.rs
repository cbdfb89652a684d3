//! Shared Dioxus components and Leaflet bridge for the SNODAS map apps.
//!
//! This crate provides:
//! - `js_bridge`: Rust wrappers for the Leaflet map via `js_sys::eval()`, plus browser fetch
//! - `state`: Reactive AppState with Dioxus Signals
//! - `handlers`: map event dispatch into the highlight coordinator and query panel
//! - `components`: Reusable RSX components (sidebar, query panel, date controls, etc.)

pub mod components;
pub mod handlers;
pub mod js_bridge;
pub mod state;
