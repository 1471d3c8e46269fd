//! HTTP API handlers for wazn-api

pub mod analyze;
pub mod buildinfo;
pub mod health;
pub mod types;
pub mod ui;
pub mod weights;

pub use analyze::{analyze, analyze_rules};
pub use buildinfo::get_build_info;
pub use health::health_routes;
pub use ui::{serve_app_js, serve_index};
pub use weights::list_weights;
