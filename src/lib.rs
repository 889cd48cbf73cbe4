//! life-backdrop - Animated Game of Life canvas backdrop in WASM
//!
//! - engine/ - Simulation core (grid, viewport, mask, scheduler, renderer)
//! - api/    - Public wasm-bindgen surface and browser wiring
//!
//! The engine tree is host-agnostic: the canvas, the frame callback and
//! the stats display enter through traits, so the whole core runs under
//! plain `cargo test` with fake hosts.

pub mod api;
pub mod engine;

use wasm_bindgen::prelude::*;

// Better error messages in debug mode
#[cfg(feature = "console_error_panic_hook")]
pub fn set_panic_hook() {
    console_error_panic_hook::set_once();
}

/// Initialize the engine
#[wasm_bindgen]
pub fn init() {
    #[cfg(feature = "console_error_panic_hook")]
    set_panic_hook();

    web_sys::console::log_1(&"🦀 life-backdrop engine initialized".into());
}

/// Get engine version
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

// Re-export main types
pub use api::wasm::{mount_backdrop, Backdrop};
pub use engine::{BackdropConfig, BackdropCore};
