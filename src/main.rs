//! RoomDesk Frontend Entry Point

mod app;
mod components;
mod context;
mod models;
mod pages;
mod routes;
mod storage;
mod store;

use app::App;
use leptos::prelude::*;
use roomdesk_core::AppConfig;

fn main() {
    console_error_panic_hook::set_once();

    let mut config = AppConfig::from_build_env();
    let level = config.level_filter().unwrap_or(log::LevelFilter::Info);
    // only fails if a logger is already installed
    let _ = rolling_logger::init(level);
    if let Err(e) = config.validate() {
        log::error!("invalid build configuration, using defaults: {}", e);
        config = AppConfig::default();
    }
    log::info!("RoomDesk starting against {}", config.api_base_url);

    mount_to_body(move || view! { <App config=config /> });
}
