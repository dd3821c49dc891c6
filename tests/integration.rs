// Integration tests (native) for the `portfolio-interactions` crate.
// These tests avoid wasm-specific functionality and exercise the pure
// modules through the public API so they run under `cargo test` on the host.

use portfolio_interactions::config::{ParticleConfig, PortfolioConfig};
use portfolio_interactions::particles::ParticleField;
use portfolio_interactions::resume::{GateState, CheckOutcome, ResumeGate};
use portfolio_interactions::reveal::RevealTracker;
use portfolio_interactions::scroll::{self, SectionSpan};
use portfolio_interactions::throttle::{Throttle, ThrottleDecision};
use portfolio_interactions::typing::TypingState;

fn sections() -> Vec<SectionSpan> {
    ["home", "about", "skills", "projects", "contact"]
        .iter()
        .enumerate()
        .map(|(i, id)| SectionSpan::new(*id, i as f64 * 800.0, 800.0))
        .collect()
}

// Simulate a user scrolling down the page: nav state, active link and reveals
// all follow the scroll offset.
#[test]
fn scrolling_down_the_page() {
    let cfg = PortfolioConfig::default();
    let spans = sections();
    let hrefs: Vec<String> = spans.iter().map(|s| format!("#{}", s.id)).collect();
    let mut reveals = RevealTracker::new(spans.len());
    let mut throttle = Throttle::new(cfg.nav_throttle_ms as f64);
    let mut nav_scrolled = false;
    let mut reveal_events = 0;

    for (tick, y) in (0..3600).step_by(20).enumerate() {
        let y = y as f64;
        let now = tick as f64 * 16.0;
        if throttle.call(now) == ThrottleDecision::Fire {
            nav_scrolled = scroll::nav_is_scrolled(y, cfg.nav_threshold);
        }

        let active = scroll::active_section(&spans, y, cfg.active_lookahead);
        let flags = scroll::active_link_flags(&hrefs, active.map(|i| spans[i].id.as_str()));
        assert_eq!(flags.iter().filter(|f| **f).count(), usize::from(active.is_some()));

        // viewport of 900px
        for (i, s) in spans.iter().enumerate() {
            let visible = s.top < y + 900.0 && s.top + s.height > y;
            if reveals.on_intersect(i, visible) {
                reveal_events += 1;
            }
        }
    }
    assert!(nav_scrolled);
    assert_eq!(reveals.pending(), 0);
    assert_eq!(reveal_events, spans.len());
}

// A fast flick back to the top ends inside the throttle window; the replay
// must still leave the nav un-scrolled.
#[test]
fn flick_back_to_top_clears_nav_state() {
    let cfg = PortfolioConfig::default();
    let mut throttle = Throttle::new(cfg.nav_throttle_ms as f64);
    let mut nav_scrolled = false;
    let mut replay_at = None;
    let mut offset = 0.0;

    for (now, y) in [(0.0, 800.0), (16.0, 400.0), (32.0, 100.0), (40.0, 0.0)] {
        offset = y;
        match throttle.call(now) {
            ThrottleDecision::Fire => nav_scrolled = scroll::nav_is_scrolled(offset, cfg.nav_threshold),
            ThrottleDecision::Defer(ms) => replay_at = Some(now + ms),
            ThrottleDecision::Drop => {}
        }
    }
    assert!(nav_scrolled);

    let due = replay_at.expect("a suppressed event arms a replay");
    if throttle.flush(due) {
        nav_scrolled = scroll::nav_is_scrolled(offset, cfg.nav_threshold);
    }
    assert!(!nav_scrolled);
}

#[test]
fn resume_button_follows_availability_check() {
    let cases = [
        (CheckOutcome::Status(200), GateState::Enabled),
        (CheckOutcome::Status(403), GateState::Disabled),
        (CheckOutcome::Status(404), GateState::Disabled),
        (CheckOutcome::NetworkError, GateState::Disabled),
    ];
    for (outcome, expected) in cases {
        let mut gate = ResumeGate::new();
        assert!(gate.begin_check());
        gate.finish_check(outcome);
        assert_eq!(gate.state(), expected, "{outcome:?}");
    }
}

#[test]
fn typing_runs_through_default_roles() {
    let cfg = PortfolioConfig::default().typing;
    let mut state = TypingState::new();
    let mut finished = Vec::new();
    while finished.len() < cfg.phrases.len() {
        let step = state.step(&cfg);
        if step.delay_ms == cfg.hold_ms {
            finished.push(step.text);
        }
    }
    assert_eq!(finished, cfg.phrases);
    assert_eq!(state.phrase_index(), cfg.phrases.len() - 1);
    assert!(state.is_deleting());
}

#[test]
fn particle_field_survives_resizes() {
    let mut field = ParticleField::new(1280.0, 720.0, ParticleConfig::default(), 1234);
    for (w, h) in [(1280.0, 720.0), (375.0, 812.0), (0.0, 0.0), (1920.0, 1080.0)] {
        field.resize(w, h);
        for _ in 0..60 {
            field.update();
        }
        assert_eq!(field.size(), (w, h));
        assert_eq!(field.particles().len(), ParticleConfig::default().count);
        assert!(field.particles().iter().all(|p| p.x >= 0.0 && p.x <= w && p.y >= 0.0 && p.y <= h));
    }
}
