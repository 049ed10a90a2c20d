//! PC Smash core crate.
//!
//! Click the computer until it breaks before ten seconds run out. The session
//! state machine ([`session`]) is plain Rust and runs natively; [`web`] binds
//! it to the DOM, HTML audio, `localStorage` and `setInterval` when built for
//! the browser with wasm-pack.

use wasm_bindgen::prelude::*;

pub mod best_time;
pub mod config;
pub mod damage;
pub mod error;
pub mod rng;
pub mod session;
pub mod shake;
pub mod web;

pub use best_time::{BestTime, MemoryStore, ScoreStore};
pub use config::GameConfig;
pub use error::GameError;
pub use session::{
    DisplaySurface, FeedbackPlayer, Outcome, Phase, Screen, Session, SessionController, Ticker,
    Track,
};

// Optional small allocator for size (feature gated)
#[cfg(feature = "wee_alloc")]
#[global_allocator]
static ALLOC: wee_alloc::WeeAlloc = wee_alloc::WeeAlloc::INIT;

#[wasm_bindgen(start)]
pub fn wasm_start() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
    #[cfg(target_arch = "wasm32")]
    let _ = console_log::init_with_level(log::Level::Info);
}

// -----------------------------------------------------------------------------
// JS entrypoints
// -----------------------------------------------------------------------------

/// Boot the game with the built-in assets and rules.
#[wasm_bindgen]
pub fn start_game() -> Result<(), JsValue> {
    web::boot(GameConfig::default())?;
    Ok(())
}

/// Boot with a JSON config; fields left out keep their defaults.
#[cfg(feature = "serde_json")]
#[wasm_bindgen]
pub fn start_game_with_config(json: &str) -> Result<(), JsValue> {
    let config = GameConfig::from_json(json)?;
    web::boot(config)?;
    Ok(())
}
