// Basic edition: nav scroll state, smooth anchors, section reveals, active
// nav links and the resume download gate.

use wasm_bindgen::prelude::*;

use super::{Page, install_bindings, reveal_sections, shared_bindings};
use crate::resume;

const FEATURE: &str = "basic";

pub fn start(page: Page) -> Result<(), JsValue> {
    let bindings = shared_bindings(&page)?;
    install_bindings(&page, FEATURE, bindings)?;
    reveal_sections(&page)?;
    resume::install(&page.doc, &page.cfg.resume_path, &page.cfg.resume_download_name);
    Ok(())
}
