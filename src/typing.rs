//! Typing-text rotation. A single [`TypingState`] is owned by one recurring
//! timer task; each [`TypingState::step`] yields the text to render and how
//! long to wait before the next step.

use crate::config::TypingConfig;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TypingStep {
    pub text: String,
    pub delay_ms: u32,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TypingState {
    phrase_idx: usize,
    shown: usize, // characters currently visible
    deleting: bool,
}

impl TypingState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phrase_index(&self) -> usize {
        self.phrase_idx
    }

    pub fn is_deleting(&self) -> bool {
        self.deleting
    }

    /// Advance by one character (typing or deleting) and report what to show.
    pub fn step(&mut self, cfg: &TypingConfig) -> TypingStep {
        let Some(phrase) = cfg.phrases.get(self.phrase_idx % cfg.phrases.len().max(1)) else {
            return TypingStep { text: String::new(), delay_ms: cfg.hold_ms };
        };
        let len = phrase.chars().count();

        let delay_ms = if self.deleting {
            self.shown = self.shown.saturating_sub(1);
            if self.shown == 0 {
                self.deleting = false;
                self.phrase_idx = (self.phrase_idx + 1) % cfg.phrases.len();
                cfg.gap_ms
            } else {
                cfg.delete_ms
            }
        } else {
            self.shown = (self.shown + 1).min(len);
            if self.shown == len {
                self.deleting = true;
                cfg.hold_ms
            } else {
                cfg.type_ms
            }
        };

        TypingStep { text: phrase.chars().take(self.shown).collect(), delay_ms }
    }
}
