//! Portfolio interactions core crate.
//!
//! Two self-contained editions wire the page: `start_basic()` (nav state,
//! smooth anchors, section reveals, active links, resume gate) and
//! `start_impressive()` (all of that plus particles, typing text and hover
//! effects). The host page picks one. The per-frame and per-scroll logic lives
//! in plain modules (`scroll`, `reveal`, `typing`, `particles`, `effects`,
//! `throttle`) that run natively under `cargo test`; `page` holds the DOM glue.

use wasm_bindgen::prelude::*;

pub mod config;
pub mod effects;
mod log;
pub mod page;
pub mod particles;
pub mod resume;
pub mod reveal;
pub mod scroll;
pub mod throttle;
pub mod typing;

pub use config::PortfolioConfig;

// Optional small allocator for size (feature gated)
#[cfg(feature = "wee_alloc")]
#[global_allocator]
static ALLOC: wee_alloc::WeeAlloc = wee_alloc::WeeAlloc::INIT;

#[wasm_bindgen(start)]
pub fn wasm_start() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

// -----------------------------------------------------------------------------
// Edition entrypoints
// -----------------------------------------------------------------------------

fn launch(cfg: PortfolioConfig, edition: fn(page::Page) -> Result<(), JsValue>) -> Result<(), JsValue> {
    let page = page::Page::new(cfg)?;
    let doc = page.doc.clone();
    page::when_ready(&doc, move || {
        if let Err(e) = edition(page) {
            log::warn("init", &format!("edition failed to start: {e:?}"));
        }
    })
}

#[wasm_bindgen]
pub fn start_basic() -> Result<(), JsValue> {
    launch(PortfolioConfig::default(), page::basic::start)
}

#[wasm_bindgen]
pub fn start_impressive() -> Result<(), JsValue> {
    launch(PortfolioConfig::default(), page::impressive::start)
}

#[cfg(feature = "serde_json")]
#[wasm_bindgen]
pub fn start_basic_with_config(json: &str) -> Result<(), JsValue> {
    let cfg = PortfolioConfig::from_json(json).map_err(|e| JsValue::from_str(&e))?;
    launch(cfg, page::basic::start)
}

#[cfg(feature = "serde_json")]
#[wasm_bindgen]
pub fn start_impressive_with_config(json: &str) -> Result<(), JsValue> {
    let cfg = PortfolioConfig::from_json(json).map_err(|e| JsValue::from_str(&e))?;
    launch(cfg, page::impressive::start)
}
