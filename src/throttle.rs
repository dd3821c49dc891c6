//! Rate limiting for bursty DOM events (scroll, mousemove, resize).
//!
//! Both types are clock-agnostic: callers pass `performance.now()` (or a test
//! timestamp) so the logic runs natively.

/// What a throttled caller should do with the current event.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ThrottleDecision {
    /// Run the handler now.
    Fire,
    /// Suppressed; arm one timer for this many ms and call [`Throttle::flush`]
    /// when it runs.
    Defer(f64),
    /// Suppressed; a replay is already armed.
    Drop,
}

/// Leading-edge throttle with a single trailing replay: the first call fires,
/// the first call suppressed inside the window arms a replay at the window's
/// end, and anything after that is dropped until the replay runs.
#[derive(Clone, Debug)]
pub struct Throttle {
    limit_ms: f64,
    last_fire_ms: Option<f64>,
    trailing: bool,
}

impl Throttle {
    pub fn new(limit_ms: f64) -> Self {
        Self { limit_ms, last_fire_ms: None, trailing: false }
    }

    pub fn call(&mut self, now: f64) -> ThrottleDecision {
        match self.last_fire_ms {
            Some(last) if now - last < self.limit_ms => {
                if self.trailing {
                    ThrottleDecision::Drop
                } else {
                    self.trailing = true;
                    ThrottleDecision::Defer(self.limit_ms - (now - last))
                }
            }
            _ => {
                self.last_fire_ms = Some(now);
                ThrottleDecision::Fire
            }
        }
    }

    /// Runs the armed replay. Returns true if the handler should run; the
    /// replay starts a new window.
    pub fn flush(&mut self, now: f64) -> bool {
        if !self.trailing {
            return false;
        }
        self.trailing = false;
        self.last_fire_ms = Some(now);
        true
    }

    pub fn has_pending(&self) -> bool {
        self.trailing
    }
}

/// Trailing-edge debounce keyed by generation. Each `schedule` invalidates
/// every earlier ticket, so only the callback holding the latest ticket runs.
#[derive(Clone, Debug, Default)]
pub struct Debounce {
    generation: u64,
}

impl Debounce {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn schedule(&mut self) -> u64 {
        self.generation = self.generation.wrapping_add(1);
        self.generation
    }

    pub fn is_current(&self, ticket: u64) -> bool {
        ticket == self.generation
    }
}
