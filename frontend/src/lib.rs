use leptos::*;

pub mod api;
mod components;
pub mod config;
pub mod identity;
mod messages;
mod pages;
mod router;
pub mod state;
#[cfg(test)]
mod test_support;
pub mod utils;

/// Boots the app: logging, runtime config, then the router.
#[wasm_bindgen::prelude::wasm_bindgen]
pub fn run() {
    console_error_panic_hook::set_once();
    if let Err(err) = console_log::init_with_level(log::Level::Debug) {
        web_sys::console::warn_1(&format!("logger already set: {}", err).into());
    }
    log::info!("Starting Bankline frontend");

    spawn_local(config::init());

    router::mount_app();
}
