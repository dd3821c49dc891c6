// Browser checks for the DOM wiring. Run with `wasm-pack test --headless --chrome`.
#![cfg(target_arch = "wasm32")]

use std::cell::Cell;
use std::rc::Rc;

use portfolio_interactions::PortfolioConfig;
use portfolio_interactions::page::{Binding, Page, Target, active_nav_links, install_bindings, when_ready};
use portfolio_interactions::resume;
use wasm_bindgen::JsCast;
use wasm_bindgen_test::*;
use web_sys::{HtmlButtonElement, HtmlElement};

wasm_bindgen_test_configure!(run_in_browser);

fn mount(html: &str) -> HtmlElement {
    let doc = web_sys::window().unwrap().document().unwrap();
    let host: HtmlElement = doc.create_element("div").unwrap().dyn_into().unwrap();
    host.set_inner_html(html);
    doc.body().unwrap().append_child(&host).unwrap();
    host
}

#[wasm_bindgen_test]
fn selector_bindings_attach_to_every_match() {
    let host = mount("<button class='t-binding'>a</button><button class='t-binding'>b</button>");
    let page = Page::new(PortfolioConfig::default()).unwrap();
    let clicks = Rc::new(Cell::new(0));
    let seen = clicks.clone();
    let bindings = vec![Binding::new(Target::Selector(".t-binding"), "click", move |_, el| {
        assert!(el.is_some());
        seen.set(seen.get() + 1);
    })];
    assert_eq!(install_bindings(&page, "test", bindings).unwrap(), 2);

    let buttons = host.query_selector_all(".t-binding").unwrap();
    for i in 0..buttons.length() {
        buttons.item(i).unwrap().dyn_into::<HtmlElement>().unwrap().click();
    }
    assert_eq!(clicks.get(), 2);
    host.remove();
}

#[wasm_bindgen_test]
fn missing_selector_installs_nothing() {
    let page = Page::new(PortfolioConfig::default()).unwrap();
    let bindings = vec![Binding::new(Target::Selector(".does-not-exist"), "click", |_, _| {})];
    assert_eq!(install_bindings(&page, "test", bindings).unwrap(), 0);
}

#[wasm_bindgen_test]
fn basic_edition_starts_without_markup() {
    // No #nav, sections or #resumeBtn in the test page: every feature is skipped.
    assert!(portfolio_interactions::start_basic().is_ok());
}

#[wasm_bindgen_test]
fn when_ready_runs_immediately_after_load() {
    let doc = web_sys::window().unwrap().document().unwrap();
    assert_ne!(doc.ready_state(), "loading");
    let ran = Rc::new(Cell::new(false));
    let flag = ran.clone();
    when_ready(&doc, move || flag.set(true)).unwrap();
    assert!(ran.get());
}

#[wasm_bindgen_test]
fn enabling_the_resume_button_swaps_classes_and_hides_tooltip() {
    let host = mount(
        "<div><button id='t-resume' class='btn btn-disabled' disabled>Resume</button>\
         <span class='tooltip'>Coming soon</span></div>",
    );
    let doc = web_sys::window().unwrap().document().unwrap();
    let button: HtmlButtonElement = doc.get_element_by_id("t-resume").unwrap().dyn_into().unwrap();

    resume::enable_download(&doc, &button, "resume.pdf", "Resume.pdf").unwrap();

    assert!(!button.disabled());
    assert!(!button.class_list().contains("btn-disabled"));
    assert!(button.class_list().contains("btn-secondary"));
    let tooltip: HtmlElement = host.query_selector(".tooltip").unwrap().unwrap().dyn_into().unwrap();
    assert_eq!(tooltip.style().get_property_value("display").unwrap(), "none");
    host.remove();
}

#[wasm_bindgen_test]
fn only_the_link_for_the_current_section_is_active() {
    let host = mount(
        "<ul class='nav-links'>\
           <li><a href='#t-about'>About</a></li>\
           <li><a href='#t-work' class='active'>Work</a></li>\
           <li><a href='#t-contact' class='nav-cta'>Contact</a></li>\
         </ul>\
         <section id='t-about' style='height:1000px'></section>\
         <section id='t-work' style='height:1000px'></section>",
    );
    // Positioned host: section offsets are measured from its top.
    host.style().set_property("position", "absolute").unwrap();
    host.style().set_property("top", "0").unwrap();
    let page = Page::new(PortfolioConfig::default()).unwrap();
    assert_eq!(page.scroll_y(), 0.0);

    let binding = active_nav_links(&page).unwrap();
    assert!(binding.is_some());

    let links = host.query_selector_all(".nav-links a").unwrap();
    let active: Vec<bool> = (0..links.length())
        .map(|i| links.item(i).unwrap().dyn_into::<web_sys::Element>().unwrap().class_list().contains("active"))
        .collect();
    assert_eq!(active, vec![true, false, false]);
    host.remove();
}
