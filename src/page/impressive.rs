//! Impressive edition: everything the basic edition does plus the particle
//! background, typing rotation, hover effects, counters, lazy images, mobile
//! menu, keyboard shortcuts and the scroll-progress variable.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, Element, HtmlCanvasElement, HtmlElement, HtmlImageElement, KeyboardEvent};

use super::{
    Binding, ID_SECTIONS, Page, Target, install_bindings, observe_once, rect_of, reveal_sections, shared_bindings, throttled,
};
use crate::effects::{self, CounterTarget, Shortcut};
use crate::particles::ParticleField;
use crate::throttle::Debounce;
use crate::typing::TypingState;
use crate::{log, resume, scroll};

const FEATURE: &str = "impressive";

const PARTICLE_CANVAS_ID: &str = "particles";
const CURSOR_GLOW: &str = ".cursor-glow";
const MAGNETIC: &str = ".btn, .nav-cta";
const TILT: &str = ".project-card, .skill-card";
const COUNTERS: &str = "[data-count]";
const LAZY_IMAGES: &str = "img[data-src]";
const TYPING_TEXT: &str = ".typing-text";
const MENU_TOGGLE_ID: &str = "menuToggle";
const MENU_TOGGLE_SELECTOR: &str = "#menuToggle";
const MENU_PANEL: &str = ".nav-links";
const MENU_LINKS: &str = ".nav-links a";

pub fn start(page: Page) -> Result<(), JsValue> {
    log::greeting();

    let mut bindings = shared_bindings(&page)?;
    bindings.extend(scroll_progress(&page));
    bindings.extend(particle_background(&page)?);
    bindings.extend(cursor_glow(&page));
    bindings.extend(magnetic_buttons(&page));
    bindings.extend(card_tilt(&page));
    let menu = MobileMenu::find(&page);
    if let Some(menu) = &menu {
        bindings.extend(menu.bindings());
    }
    bindings.push(keyboard_shortcuts(&page, menu));
    install_bindings(&page, FEATURE, bindings)?;

    reveal_sections(&page)?;
    counters(&page)?;
    lazy_images(&page)?;
    typing(&page)?;
    resume::install(&page.doc, &page.cfg.resume_path, &page.cfg.resume_download_name);
    Ok(())
}

// --- Scroll progress --------------------------------------------------------------

fn scroll_progress(page: &Page) -> Option<Binding> {
    let root = page.doc.document_element()?.dyn_into::<HtmlElement>().ok()?;
    let apply = {
        let page = page.clone();
        move || {
            let (_, viewport_h) = page.viewport();
            let p = scroll::scroll_progress(page.scroll_y(), root.scroll_height() as f64, viewport_h);
            let _ = root.style().set_property("--scroll-progress", &format!("{p:.4}"));
        }
    };
    apply();
    Some(Binding::new(Target::Window, "scroll", move |_, _| apply()).passive())
}

// --- Particles --------------------------------------------------------------------

type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>>;

fn particle_seed(page: &Page) -> u64 {
    #[cfg(feature = "rng")]
    {
        let mut buf = [0u8; 8];
        if getrandom::getrandom(&mut buf).is_ok() {
            return u64::from_le_bytes(buf);
        }
    }
    // Simple linear transform of the clock (not crypto secure)
    ((page.now() * 1000.0) as u64).wrapping_mul(1664525).wrapping_add(1013904223)
}

/// Start the particle animation on `#particles`; returns the resize binding.
fn particle_background(page: &Page) -> Result<Option<Binding>, JsValue> {
    let Some(el) = page.doc.get_element_by_id(PARTICLE_CANVAS_ID) else {
        log::debug("particles", "#particles not found; skipped");
        return Ok(None);
    };
    let canvas: HtmlCanvasElement = el.dyn_into()?;
    let Some(ctx) = canvas.get_context("2d")? else {
        log::warn("particles", "2d context unavailable");
        return Ok(None);
    };
    let ctx: CanvasRenderingContext2d = ctx.dyn_into()?;

    let (w, h) = page.viewport();
    fit_canvas(&canvas, w, h);
    let field = Rc::new(RefCell::new(ParticleField::new(w, h, page.cfg.particles.clone(), particle_seed(page))));
    start_particle_loop(page, field.clone(), ctx);

    let debounce = Rc::new(RefCell::new(Debounce::new()));
    let wait_ms = page.cfg.particles.resize_debounce_ms;
    let page = page.clone();
    Ok(Some(Binding::new(Target::Window, "resize", move |_, _| {
        let ticket = debounce.borrow_mut().schedule();
        let (debounce, field, canvas, page2) = (debounce.clone(), field.clone(), canvas.clone(), page.clone());
        let _ = page.set_timeout(wait_ms, move || {
            if !debounce.borrow().is_current(ticket) {
                return;
            }
            let (w, h) = page2.viewport();
            fit_canvas(&canvas, w, h);
            field.borrow_mut().resize(w, h);
        });
    })))
}

fn fit_canvas(canvas: &HtmlCanvasElement, w: f64, h: f64) {
    canvas.set_width(w.max(0.0) as u32);
    canvas.set_height(h.max(0.0) as u32);
}

fn start_particle_loop(page: &Page, field: Rc<RefCell<ParticleField>>, mut ctx: CanvasRenderingContext2d) {
    let f: FrameCallback = Rc::new(RefCell::new(None));
    let g = f.clone();
    let win = page.win.clone();
    *g.borrow_mut() = Some(Closure::wrap(Box::new(move |_ts: f64| {
        field.borrow_mut().frame(&mut ctx);
        if let Some(cb) = f.borrow().as_ref() {
            let _ = win.request_animation_frame(cb.as_ref().unchecked_ref());
        }
    }) as Box<dyn FnMut(f64)>));
    if let Some(cb) = g.borrow().as_ref() {
        let _ = page.win.request_animation_frame(cb.as_ref().unchecked_ref());
    }
}

// --- Hover effects ----------------------------------------------------------------

fn cursor_glow(page: &Page) -> Option<Binding> {
    let glow = page.doc.query_selector(CURSOR_GLOW).ok().flatten()?.dyn_into::<HtmlElement>().ok()?;
    let last = Rc::new(Cell::new((0, 0)));
    let follow = {
        let last = last.clone();
        throttled(page, page.cfg.glow_throttle_ms, move || {
            let (x, y) = last.get();
            let style = glow.style();
            let _ = style.set_property("left", &format!("{x}px"));
            let _ = style.set_property("top", &format!("{y}px"));
        })
    };
    Some(
        Binding::new(Target::Document, "mousemove", move |evt, _| {
            let Some(m) = evt.dyn_ref::<web_sys::MouseEvent>() else { return };
            last.set((m.client_x(), m.client_y()));
            follow();
        })
        .passive(),
    )
}

fn pointer(evt: &web_sys::Event) -> Option<(f64, f64)> {
    evt.dyn_ref::<web_sys::MouseEvent>()
        .map(|m| (m.client_x() as f64, m.client_y() as f64))
}

fn set_transform(el: Option<&Element>, value: &str) {
    if let Some(el) = el.and_then(|e| e.dyn_ref::<HtmlElement>()) {
        let _ = el.style().set_property("transform", value);
    }
}

fn magnetic_buttons(page: &Page) -> [Binding; 2] {
    let strength = page.cfg.magnetic_strength;
    [
        Binding::new(Target::Selector(MAGNETIC), "mousemove", move |evt, el| {
            let (Some(p), Some(target)) = (pointer(evt), el) else { return };
            let (dx, dy) = effects::magnetic_offset(p, &rect_of(target), strength);
            set_transform(el, &effects::magnetic_transform(dx, dy));
        }),
        Binding::new(Target::Selector(MAGNETIC), "mouseleave", |_, el| set_transform(el, "")),
    ]
}

fn card_tilt(page: &Page) -> [Binding; 2] {
    let max_deg = page.cfg.tilt_max_deg;
    [
        Binding::new(Target::Selector(TILT), "mousemove", move |evt, el| {
            let (Some(p), Some(target)) = (pointer(evt), el) else { return };
            let (rx, ry) = effects::tilt_angles(p, &rect_of(target), max_deg);
            set_transform(el, &effects::tilt_transform(rx, ry));
        }),
        Binding::new(Target::Selector(TILT), "mouseleave", |_, el| set_transform(el, "")),
    ]
}

// --- Counters / lazy images ---------------------------------------------------------

fn counters(page: &Page) -> Result<(), JsValue> {
    let anim_page = page.clone();
    observe_once(page, COUNTERS, "0px", 0.5, move |el| {
        let Some(target) = el.get_attribute("data-count").as_deref().and_then(CounterTarget::parse) else {
            log::debug("counter", "unparseable data-count; skipped");
            return;
        };
        let suffix = el.get_attribute("data-suffix").unwrap_or_default();
        let start = anim_page.now();
        animate_counter(anim_page.clone(), el.clone(), target, suffix, start, start);
    })?;
    Ok(())
}

fn animate_counter(page: Page, el: Element, target: CounterTarget, suffix: String, start: f64, now: f64) {
    let duration = page.cfg.counter_duration_ms;
    let elapsed = now - start;
    el.set_text_content(Some(&target.format(target.value_at(elapsed, duration), &suffix)));
    if elapsed < duration {
        let next = page.clone();
        let _ = page.request_frame(move |ts| animate_counter(next, el, target, suffix, start, ts));
    }
}

fn lazy_images(page: &Page) -> Result<(), JsValue> {
    let n = observe_once(page, LAZY_IMAGES, "50px", 0.01, |el| {
        let Some(img) = el.dyn_ref::<HtmlImageElement>() else { return };
        if let Some(src) = img.get_attribute("data-src") {
            img.set_src(&src);
            let _ = img.remove_attribute("data-src");
            let _ = img.class_list().add_1("loaded");
        }
    })?;
    log::debug("lazy-images", &format!("observing {n} images"));
    Ok(())
}

// --- Typing -----------------------------------------------------------------------

fn typing(page: &Page) -> Result<(), JsValue> {
    let Some(el) = page.doc.query_selector(TYPING_TEXT)? else {
        log::debug("typing", ".typing-text not found; skipped");
        return Ok(());
    };
    if page.cfg.typing.phrases.is_empty() {
        return Ok(());
    }
    typing_tick(page.clone(), el, TypingState::new());
    Ok(())
}

/// One step of the typing effect; reschedules itself with the same state.
fn typing_tick(page: Page, el: Element, mut state: TypingState) {
    let step = state.step(&page.cfg.typing);
    el.set_text_content(Some(&step.text));
    let next = page.clone();
    if let Err(e) = page.set_timeout(step.delay_ms, move || typing_tick(next, el, state)) {
        log::warn("typing", &format!("could not schedule next step: {e:?}"));
    }
}

// --- Mobile menu / keyboard -----------------------------------------------------------

#[derive(Clone)]
struct MobileMenu {
    toggle: Element,
    panel: Element,
}

impl MobileMenu {
    fn find(page: &Page) -> Option<Self> {
        let toggle = page.doc.get_element_by_id(MENU_TOGGLE_ID)?;
        let panel = page.doc.query_selector(MENU_PANEL).ok().flatten()?;
        Some(Self { toggle, panel })
    }

    fn toggle(&self) {
        let open = self.panel.class_list().toggle("active").unwrap_or(false);
        let _ = self.toggle.class_list().toggle_with_force("active", open);
    }

    fn close(&self) {
        let _ = self.panel.class_list().remove_1("active");
        let _ = self.toggle.class_list().remove_1("active");
    }

    fn bindings(&self) -> [Binding; 2] {
        let (a, b) = (self.clone(), self.clone());
        [
            Binding::new(Target::Selector(MENU_TOGGLE_SELECTOR), "click", move |_, _| a.toggle()),
            Binding::new(Target::Selector(MENU_LINKS), "click", move |_, _| b.close()),
        ]
    }
}

fn in_form_field(evt: &web_sys::Event) -> bool {
    evt.target()
        .and_then(|t| t.dyn_into::<Element>().ok())
        .is_some_and(|el| matches!(el.tag_name().as_str(), "INPUT" | "TEXTAREA" | "SELECT"))
}

fn keyboard_shortcuts(page: &Page, menu: Option<MobileMenu>) -> Binding {
    let page = page.clone();
    Binding::new(Target::Document, "keydown", move |evt, _| {
        let Some(k) = evt.dyn_ref::<KeyboardEvent>() else { return };
        let modifier = k.ctrl_key() || k.meta_key() || k.alt_key();
        match effects::shortcut_for(&k.key(), modifier, in_form_field(evt)) {
            Some(Shortcut::CloseMenu) => {
                if let Some(menu) = &menu {
                    menu.close();
                }
            }
            Some(Shortcut::ScrollTop) => page.smooth_scroll_to(0.0),
            Some(Shortcut::JumpToSection(i)) => {
                if let Some(section) = page.elements(ID_SECTIONS).ok().and_then(|s| s.into_iter().nth(i)) {
                    page.scroll_below_nav(&section);
                }
            }
            None => {}
        }
    })
}
