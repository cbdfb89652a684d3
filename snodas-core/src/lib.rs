//! Core types and UI state for the SNODAS pourpoint map front-ends.
//!
//! Nothing in this crate touches the browser. The WASM apps own the DOM and
//! Leaflet; they feed events in here and render whatever state comes back out,
//! which keeps the highlight, query and sidebar logic testable natively.

pub mod available_dates;
pub mod config;
pub mod error;
pub mod event;
pub mod feature;
pub mod feature_list;
pub mod fetch;
pub mod highlight;
pub mod interaction;
pub mod query;
pub mod style;
pub mod tiles;

pub use error::SnodasError;
pub use feature::FeatureId;
