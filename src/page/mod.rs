//! DOM wiring shared by both editions.
//!
//! Each edition builds a list of [`Binding`]s once at startup and hands it to
//! [`install_bindings`]. Handlers read the DOM, ask the pure modules
//! (`scroll`, `effects`, ...) what to do, and write the result back. A
//! selector that matches nothing installs nothing; the feature is skipped.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{
    AddEventListenerOptions, Document, Element, Event, EventTarget, HtmlElement,
    IntersectionObserver, IntersectionObserverEntry, IntersectionObserverInit, ScrollBehavior,
    ScrollToOptions, Window,
};

use crate::config::PortfolioConfig;
use crate::effects::Rect;
use crate::log;
use crate::reveal::RevealTracker;
use crate::scroll::{self, SectionSpan};
use crate::throttle::{Throttle, ThrottleDecision};

pub mod basic;
pub mod impressive;

// --- Selectors --------------------------------------------------------------------

pub const NAV_ID: &str = "nav";
pub const ANCHOR_LINKS: &str = "a[href^=\"#\"]";
pub const REVEAL_SECTIONS: &str = ".section";
pub const ID_SECTIONS: &str = "section[id]";
pub const NAV_LINKS: &str = ".nav-links a:not(.nav-cta)";

// --- Page context -----------------------------------------------------------------

/// Handles every behavior needs. Cheap to clone into closures.
#[derive(Clone)]
pub struct Page {
    pub win: Window,
    pub doc: Document,
    pub cfg: Rc<PortfolioConfig>,
}

impl Page {
    pub fn new(cfg: PortfolioConfig) -> Result<Self, JsValue> {
        let win = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
        let doc = win.document().ok_or_else(|| JsValue::from_str("no document"))?;
        Ok(Self { win, doc, cfg: Rc::new(cfg) })
    }

    pub fn scroll_y(&self) -> f64 {
        self.win.scroll_y().unwrap_or(0.0)
    }

    pub fn now(&self) -> f64 {
        self.win.performance().map(|p| p.now()).unwrap_or(0.0)
    }

    pub fn viewport(&self) -> (f64, f64) {
        let w = self.win.inner_width().ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
        let h = self.win.inner_height().ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
        (w, h)
    }

    pub fn elements(&self, selector: &str) -> Result<Vec<Element>, JsValue> {
        let list = self.doc.query_selector_all(selector)?;
        Ok((0..list.length())
            .filter_map(|i| list.item(i))
            .filter_map(|n| n.dyn_into::<Element>().ok())
            .collect())
    }

    pub fn html_elements(&self, selector: &str) -> Result<Vec<HtmlElement>, JsValue> {
        Ok(self
            .elements(selector)?
            .into_iter()
            .filter_map(|e| e.dyn_into::<HtmlElement>().ok())
            .collect())
    }

    pub fn smooth_scroll_to(&self, top: f64) {
        let opts = ScrollToOptions::new();
        opts.set_top(top);
        opts.set_behavior(ScrollBehavior::Smooth);
        self.win.scroll_to_with_scroll_to_options(&opts);
    }

    /// Smooth-scroll so `target` lands just below the fixed nav bar.
    pub fn scroll_below_nav(&self, target: &Element) {
        let nav_height = self
            .doc
            .get_element_by_id(NAV_ID)
            .and_then(|n| n.dyn_into::<HtmlElement>().ok())
            .map(|n| n.offset_height() as f64)
            .unwrap_or(0.0);
        let top = scroll::smooth_scroll_top(target.get_bounding_client_rect().top(), self.scroll_y(), nav_height);
        self.smooth_scroll_to(top);
    }

    /// Run `f` once after `ms` milliseconds.
    pub fn set_timeout(&self, ms: u32, f: impl FnOnce() + 'static) -> Result<(), JsValue> {
        let cb = Closure::once_into_js(f);
        self.win
            .set_timeout_with_callback_and_timeout_and_arguments_0(cb.unchecked_ref(), ms as i32)?;
        Ok(())
    }

    /// Run `f` on the next animation frame.
    pub fn request_frame(&self, f: impl FnOnce(f64) + 'static) -> Result<(), JsValue> {
        let cb = Closure::once_into_js(f);
        self.win.request_animation_frame(cb.unchecked_ref())?;
        Ok(())
    }
}

pub fn rect_of(el: &Element) -> Rect {
    let r = el.get_bounding_client_rect();
    Rect { left: r.left(), top: r.top(), width: r.width(), height: r.height() }
}

/// Run `f` now, or on `DOMContentLoaded` if the document is still loading.
pub fn when_ready(doc: &Document, f: impl FnOnce() + 'static) -> Result<(), JsValue> {
    if doc.ready_state() != "loading" {
        f();
        return Ok(());
    }
    let opts = AddEventListenerOptions::new();
    opts.set_once(true);
    let cb = Closure::once_into_js(f);
    doc.add_event_listener_with_callback_and_add_event_listener_options(
        "DOMContentLoaded",
        cb.unchecked_ref(),
        &opts,
    )
}

// --- Bindings ---------------------------------------------------------------------

/// Where a binding listens.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Target {
    Window,
    Document,
    /// Every element matching the selector at install time.
    Selector(&'static str),
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Target::Window => f.write_str("window"),
            Target::Document => f.write_str("document"),
            Target::Selector(sel) => f.write_str(sel),
        }
    }
}

/// Handler receives the event and, for selector targets, the element it was
/// installed on.
pub type Handler = Rc<dyn Fn(&Event, Option<&Element>)>;

pub struct Binding {
    pub target: Target,
    pub event: &'static str,
    pub passive: bool,
    pub handler: Handler,
}

impl Binding {
    pub fn new(target: Target, event: &'static str, handler: impl Fn(&Event, Option<&Element>) + 'static) -> Self {
        Self { target, event, passive: false, handler: Rc::new(handler) }
    }

    pub fn passive(mut self) -> Self {
        self.passive = true;
        self
    }

    pub fn describe(&self) -> String {
        format!("{} on {}{}", self.event, self.target, if self.passive { " (passive)" } else { "" })
    }
}

fn listen(target: &EventTarget, binding: &Binding, el: Option<Element>) -> Result<(), JsValue> {
    let handler = binding.handler.clone();
    let closure = Closure::wrap(Box::new(move |evt: Event| {
        handler(&evt, el.as_ref());
    }) as Box<dyn FnMut(_)>);
    let opts = AddEventListenerOptions::new();
    opts.set_passive(binding.passive);
    target.add_event_listener_with_callback_and_add_event_listener_options(
        binding.event,
        closure.as_ref().unchecked_ref(),
        &opts,
    )?;
    closure.forget();
    Ok(())
}

/// Attach every binding. Returns the number of listeners installed.
pub fn install_bindings(page: &Page, feature: &str, bindings: Vec<Binding>) -> Result<usize, JsValue> {
    let mut installed = 0;
    for binding in &bindings {
        match binding.target {
            Target::Window => {
                listen(&page.win, binding, None)?;
                installed += 1;
            }
            Target::Document => {
                listen(&page.doc, binding, None)?;
                installed += 1;
            }
            Target::Selector(sel) => {
                let els = page.elements(sel)?;
                if els.is_empty() {
                    log::debug(feature, &format!("no match for {}; skipped", binding.describe()));
                }
                for el in els {
                    listen(&el, binding, Some(el.clone()))?;
                    installed += 1;
                }
            }
        }
    }
    log::debug(feature, &format!("{installed} listeners from {} bindings", bindings.len()));
    Ok(installed)
}

/// Wrap `apply` in a [`Throttle`]. A call suppressed inside the window is
/// replayed once when the window closes, so the last event always lands.
pub fn throttled(page: &Page, limit_ms: u32, apply: impl Fn() + 'static) -> impl Fn() + 'static {
    let apply = Rc::new(apply);
    let throttle = Rc::new(RefCell::new(Throttle::new(limit_ms as f64)));
    let page = page.clone();
    move || {
        let decision = throttle.borrow_mut().call(page.now());
        match decision {
            ThrottleDecision::Fire => apply(),
            ThrottleDecision::Defer(delay_ms) => {
                let (throttle, apply, clock) = (throttle.clone(), apply.clone(), page.clone());
                let _ = page.set_timeout(delay_ms.ceil() as u32, move || {
                    if throttle.borrow_mut().flush(clock.now()) {
                        apply();
                    }
                });
            }
            ThrottleDecision::Drop => {}
        }
    }
}

// --- Shared behaviors -------------------------------------------------------------

/// Toggle `scrolled` on the nav bar, throttled. Also applied once immediately.
pub fn nav_scroll_state(page: &Page) -> Option<Binding> {
    let Some(nav) = page.doc.get_element_by_id(NAV_ID) else {
        log::debug("nav", "#nav not found; scroll state disabled");
        return None;
    };
    let apply = {
        let page = page.clone();
        move || {
            let scrolled = scroll::nav_is_scrolled(page.scroll_y(), page.cfg.nav_threshold);
            let _ = nav.class_list().toggle_with_force("scrolled", scrolled);
        }
    };
    apply();
    let on_scroll = throttled(page, page.cfg.nav_throttle_ms, apply);
    Some(Binding::new(Target::Window, "scroll", move |_, _| on_scroll()).passive())
}

/// Smooth-scroll in-page anchors, landing just below the fixed nav bar.
pub fn smooth_scroll(page: &Page) -> Binding {
    let page = page.clone();
    Binding::new(Target::Selector(ANCHOR_LINKS), "click", move |evt, el| {
        evt.prevent_default();
        let Some(href) = el.and_then(|e| e.get_attribute("href")) else { return };
        let Some(id) = scroll::anchor_fragment(&href) else { return };
        if let Some(target) = page.doc.get_element_by_id(id) {
            page.scroll_below_nav(&target);
        }
    })
}

fn section_spans(sections: &[HtmlElement]) -> Vec<SectionSpan> {
    sections
        .iter()
        .map(|s| SectionSpan::new(s.id(), s.offset_top() as f64, s.offset_height() as f64))
        .collect()
}

/// Mark the nav link of the section under the lookahead point as `active`.
/// Applied once immediately.
pub fn active_nav_links(page: &Page) -> Result<Option<Binding>, JsValue> {
    let sections = page.html_elements(ID_SECTIONS)?;
    let links = page.elements(NAV_LINKS)?;
    if sections.is_empty() || links.is_empty() {
        log::debug("active-link", "no sections or nav links; skipped");
        return Ok(None);
    }
    let hrefs: Vec<String> = links.iter().map(|l| l.get_attribute("href").unwrap_or_default()).collect();
    let update = {
        let page = page.clone();
        move || {
            let spans = section_spans(&sections);
            let active = scroll::active_section(&spans, page.scroll_y(), page.cfg.active_lookahead);
            let flags = scroll::active_link_flags(&hrefs, active.map(|i| spans[i].id.as_str()));
            for (link, on) in links.iter().zip(flags) {
                let _ = link.class_list().toggle_with_force("active", on);
            }
        }
    };
    update();
    Ok(Some(Binding::new(Target::Window, "scroll", move |_, _| update()).passive()))
}

/// Observe `selector` and call `on_reveal` the first time each element
/// intersects; the element is then unobserved. Returns the number observed.
pub fn observe_once(
    page: &Page,
    selector: &str,
    root_margin: &str,
    threshold: f64,
    on_reveal: impl Fn(&Element) + 'static,
) -> Result<usize, JsValue> {
    let els = page.elements(selector)?;
    if els.is_empty() {
        return Ok(0);
    }
    let tracker = RefCell::new(RevealTracker::new(els.len()));
    let watched = els.clone();
    let callback = Closure::wrap(Box::new(move |entries: js_sys::Array, observer: IntersectionObserver| {
        for entry in entries.iter() {
            let Ok(entry) = entry.dyn_into::<IntersectionObserverEntry>() else { continue };
            let target = entry.target();
            let Some(idx) = watched.iter().position(|e| *e == target) else { continue };
            if tracker.borrow_mut().on_intersect(idx, entry.is_intersecting()) {
                on_reveal(&target);
                observer.unobserve(&target);
            }
        }
    }) as Box<dyn FnMut(js_sys::Array, IntersectionObserver)>);

    let opts = IntersectionObserverInit::new();
    opts.set_root_margin(root_margin);
    opts.set_threshold(&JsValue::from_f64(threshold));
    let observer = IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &opts)?;
    callback.forget();
    for el in &els {
        observer.observe(el);
    }
    Ok(els.len())
}

/// Add `visible` to each `.section` the first time it scrolls into view.
pub fn reveal_sections(page: &Page) -> Result<(), JsValue> {
    let cfg = &page.cfg;
    let n = observe_once(page, REVEAL_SECTIONS, &cfg.reveal_root_margin, cfg.reveal_threshold, |el| {
        let _ = el.class_list().add_1("visible");
    })?;
    log::debug("reveal", &format!("observing {n} sections"));
    Ok(())
}

/// Behaviors common to both editions, in the order the page installs them.
pub fn shared_bindings(page: &Page) -> Result<Vec<Binding>, JsValue> {
    let mut bindings = vec![smooth_scroll(page)];
    bindings.extend(active_nav_links(page)?);
    bindings.extend(nav_scroll_state(page));
    Ok(bindings)
}
