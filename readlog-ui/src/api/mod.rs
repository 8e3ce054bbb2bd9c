//! HTTP handlers for readlog-ui

pub mod buildinfo;
pub mod entries;
pub mod health;
pub mod ui;

pub use buildinfo::get_build_info;
pub use entries::entry_routes;
pub use health::health_routes;
pub use ui::ui_routes;
