//! Runakuna - recruitment platform landing page
//!
//! A server-rendered, hydrated marketing page built with Leptos, animated by a
//! small tween and scroll-trigger engine that runs in WebAssembly.

#![recursion_limit = "4096"]

pub mod app;
pub mod core;
pub mod ui;

#[cfg(feature = "hydrate")]
#[wasm_bindgen::prelude::wasm_bindgen]
pub fn hydrate() {
    use crate::app::*;
    console_error_panic_hook::set_once();
    leptos::mount::hydrate_body(App);
}
