//! HTTP API handlers for syllabus-server

pub mod buildinfo;
pub mod health;
pub mod process;
pub mod ui;

pub use buildinfo::get_build_info;
pub use health::health_routes;
pub use process::{process_course, process_report};
pub use ui::{serve_app_js, serve_index};
