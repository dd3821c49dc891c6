//! Console logging helpers. Messages are prefixed `[portfolio] <feature>:`.
//! Only wasm32 builds touch the console; native builds (tests) stay silent.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::JsValue;

#[cfg_attr(not(target_arch = "wasm32"), allow(dead_code))]
fn line(feature: &str, msg: &str) -> String {
    format!("[portfolio] {feature}: {msg}")
}

#[allow(unused_variables)]
pub fn info(feature: &str, msg: &str) {
    #[cfg(target_arch = "wasm32")]
    web_sys::console::info_1(&JsValue::from_str(&line(feature, msg)));
}

#[allow(unused_variables)]
pub fn warn(feature: &str, msg: &str) {
    #[cfg(target_arch = "wasm32")]
    web_sys::console::warn_1(&JsValue::from_str(&line(feature, msg)));
}

/// Compiled out unless the `logging` feature is on.
#[allow(unused_variables)]
pub fn debug(feature: &str, msg: &str) {
    #[cfg(all(target_arch = "wasm32", feature = "logging"))]
    web_sys::console::debug_1(&JsValue::from_str(&line(feature, msg)));
}

/// Styled greeting printed once by the impressive edition.
pub fn greeting() {
    #[cfg(target_arch = "wasm32")]
    web_sys::console::log_2(
        &JsValue::from_str("%c👋 Hi there! Thanks for checking out the source."),
        &JsValue::from_str("color:#64ffda; font-size:14px; font-weight:bold;"),
    );
}
