//! Wok Hero core crate.
//!
//! A keyboard-driven hawker-stall cooking game. The pure game logic
//! (catalog, session, engine, resolvers, scoring, leaderboard) compiles and
//! tests natively; `app`, `render`, and `audio` are the browser glue exposed
//! through `start_game()`.

use wasm_bindgen::prelude::*;

pub mod app;
pub mod audio;
pub mod catalog;
pub mod engine;
pub mod keys;
pub mod leaderboard;
pub mod render;
pub mod resolvers;
pub mod scoring;
pub mod session;

// Optional small allocator for size (feature gated)
#[cfg(feature = "wee_alloc")]
#[global_allocator]
static ALLOC: wee_alloc::WeeAlloc = wee_alloc::WeeAlloc::INIT;

#[wasm_bindgen(start)]
pub fn wasm_start() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
}

#[wasm_bindgen]
pub fn start_game() -> Result<(), JsValue> {
    app::boot()
}
