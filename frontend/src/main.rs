//! Binary entry for `trunk serve`; the library's `#[wasm_bindgen(start)]`
//! covers the cdylib build.

use geoflip_frontend::{App, API_URL};
use leptos::*;

pub fn main() {
    console_error_panic_hook::set_once();
    _ = console_log::init_with_level(log::Level::Debug);

    log::info!("🦀 Geoflip account screens (API: {})", API_URL);

    mount_to_body(|| view! { <App/> })
}
