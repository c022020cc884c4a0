//! Simulator Frontend Entry Point

mod api;
mod app;
mod components;
mod config;
mod context;
mod pages;
mod router;
mod storage;
mod store;

use app::App;
use config::Config;
use leptos::prelude::*;

fn main() {
    console_error_panic_hook::set_once();

    let config = Config::from_env();
    if console_logger::init_logger(config::APP_NAME, config.log_level).is_err() {
        web_sys::console::warn_1(&"[SIM] logger already initialised".into());
    }
    log::info!("starting, api at {}", config.api_url);

    mount_to_body(move || view! { <App config=config /> });
}
