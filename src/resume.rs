//! Optional-resource gate for the resume download button.
//!
//! The button ships disabled. A HEAD request for the resume file decides
//! whether it gets enabled; any failure simply leaves it disabled.

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Document, HtmlAnchorElement, HtmlButtonElement, HtmlElement, Request, RequestInit, Response};

use crate::log;

/// Result of checking for the resource.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CheckOutcome {
    Status(u16),
    NetworkError,
}

impl CheckOutcome {
    pub fn is_available(self) -> bool {
        matches!(self, CheckOutcome::Status(code) if (200..300).contains(&code))
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum GateState {
    #[default]
    Disabled,
    Checking,
    Enabled,
}

/// Tracks the button through one check. Only a successful check enables it,
/// and an enabled gate never goes back.
#[derive(Clone, Copy, Debug, Default)]
pub struct ResumeGate {
    state: GateState,
}

impl ResumeGate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> GateState {
        self.state
    }

    /// Returns false if a check is already in flight or the gate is open.
    pub fn begin_check(&mut self) -> bool {
        if self.state != GateState::Disabled {
            return false;
        }
        self.state = GateState::Checking;
        true
    }

    /// Record the check result; returns true if the button should be enabled now.
    pub fn finish_check(&mut self, outcome: CheckOutcome) -> bool {
        if self.state != GateState::Checking {
            return false;
        }
        if outcome.is_available() {
            self.state = GateState::Enabled;
            true
        } else {
            self.state = GateState::Disabled;
            false
        }
    }
}

// --- DOM ------------------------------------------------------------------------

const FEATURE: &str = "resume";

/// Kick off the availability check for `#resumeBtn`. Fire-and-forget: no retry or timeout.
pub fn install(doc: &Document, path: &str, download_name: &str) {
    let Some(button) = doc
        .get_element_by_id("resumeBtn")
        .and_then(|el| el.dyn_into::<HtmlButtonElement>().ok())
    else {
        log::debug(FEATURE, "#resumeBtn not found; skipping");
        return;
    };
    let mut gate = ResumeGate::new();
    gate.begin_check();
    let doc = doc.clone();
    let path = path.to_string();
    let download_name = download_name.to_string();
    wasm_bindgen_futures::spawn_local(async move {
        let outcome = check(&path).await;
        if gate.finish_check(outcome) {
            if let Err(e) = enable_download(&doc, &button, &path, &download_name) {
                log::warn(FEATURE, &format!("failed to enable download: {e:?}"));
            }
        } else {
            log::debug(FEATURE, &format!("{path} unavailable ({outcome:?}); button stays disabled"));
        }
    });
}

async fn check(path: &str) -> CheckOutcome {
    match head(path).await {
        Ok(status) => CheckOutcome::Status(status),
        Err(_) => CheckOutcome::NetworkError,
    }
}

async fn head(path: &str) -> Result<u16, JsValue> {
    let win = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
    let init = RequestInit::new();
    init.set_method("HEAD");
    let req = Request::new_with_str_and_init(path, &init)?;
    let resp: Response = JsFuture::from(win.fetch_with_request(&req)).await?.dyn_into()?;
    Ok(resp.status())
}

/// Turn the disabled placeholder into a working download button and hide its
/// sibling `.tooltip`.
pub fn enable_download(
    doc: &Document,
    button: &HtmlButtonElement,
    path: &str,
    download_name: &str,
) -> Result<(), JsValue> {
    button.set_disabled(false);
    let classes = button.class_list();
    classes.remove_1("btn-disabled")?;
    classes.add_1("btn-secondary")?;

    if let Some(parent) = button.parent_element() {
        if let Some(tooltip) = parent.query_selector(".tooltip")? {
            if let Ok(tooltip) = tooltip.dyn_into::<HtmlElement>() {
                tooltip.style().set_property("display", "none")?;
            }
        }
    }

    let doc = doc.clone();
    let path = path.to_string();
    let download_name = download_name.to_string();
    let closure = Closure::wrap(Box::new(move |_evt: web_sys::Event| {
        if let Err(e) = download(&doc, &path, &download_name) {
            log::warn(FEATURE, &format!("download failed: {e:?}"));
        }
    }) as Box<dyn FnMut(_)>);
    button.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())?;
    closure.forget();
    log::info(FEATURE, "resume available; download enabled");
    Ok(())
}

/// Trigger a download through a temporary anchor.
fn download(doc: &Document, path: &str, download_name: &str) -> Result<(), JsValue> {
    let body = doc.body().ok_or_else(|| JsValue::from_str("no body"))?;
    let link: HtmlAnchorElement = doc.create_element("a")?.dyn_into()?;
    link.set_href(path);
    link.set_download(download_name);
    body.append_child(&link)?;
    link.click();
    body.remove_child(&link)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_2xx_counts_as_available() {
        assert!(CheckOutcome::Status(200).is_available());
        assert!(CheckOutcome::Status(204).is_available());
        assert!(!CheckOutcome::Status(304).is_available());
        assert!(!CheckOutcome::Status(404).is_available());
        assert!(!CheckOutcome::Status(500).is_available());
        assert!(!CheckOutcome::NetworkError.is_available());
    }

    #[test]
    fn gate_enables_on_success() {
        let mut g = ResumeGate::new();
        assert_eq!(g.state(), GateState::Disabled);
        assert!(g.begin_check());
        assert_eq!(g.state(), GateState::Checking);
        assert!(g.finish_check(CheckOutcome::Status(200)));
        assert_eq!(g.state(), GateState::Enabled);
    }

    #[test]
    fn gate_stays_disabled_on_failure() {
        for outcome in [CheckOutcome::Status(404), CheckOutcome::NetworkError] {
            let mut g = ResumeGate::new();
            g.begin_check();
            assert!(!g.finish_check(outcome));
            assert_eq!(g.state(), GateState::Disabled);
        }
    }

    #[test]
    fn gate_ignores_results_without_a_check() {
        let mut g = ResumeGate::new();
        assert!(!g.finish_check(CheckOutcome::Status(200)));
        assert_eq!(g.state(), GateState::Disabled);

        g.begin_check();
        g.finish_check(CheckOutcome::Status(200));
        assert!(!g.begin_check());
        assert!(!g.finish_check(CheckOutcome::NetworkError));
        assert_eq!(g.state(), GateState::Enabled);
    }
}
