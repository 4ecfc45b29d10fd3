pub mod api;
pub mod app;
pub mod browse;
pub mod client;
pub mod components;
pub mod db;
pub mod error;
pub mod models;
pub mod suggest;
pub mod utils;

#[cfg(feature = "hydrate")]
#[wasm_bindgen::prelude::wasm_bindgen]
pub fn hydrate() {
    use crate::app::App;

    console_error_panic_hook::set_once();
    leptos::mount_to_body(App);
}
