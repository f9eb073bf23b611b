//! # client
//!
//! Leptos frontend for the authenticated web app: session store, auth
//! gateway, route guard, and the login/dashboard pages. Compiled with
//! `hydrate` for the browser and with `ssr` when linked into the server,
//! which also reuses the wire types in [`net::types`].

pub mod app;
pub mod net;
pub mod pages;
pub mod state;
pub mod util;

/// WASM entry point: hydrate the server-rendered body.
#[cfg(feature = "hydrate")]
#[wasm_bindgen::prelude::wasm_bindgen]
pub fn hydrate() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Debug);
    leptos::mount::hydrate_body(app::App);
}
