//! One-shot visibility tracking for observed elements (section reveals,
//! counters, lazy images). Elements are addressed by their index in the
//! NodeList that was observed.

#[derive(Clone, Debug, Default)]
pub struct RevealTracker {
    revealed: Vec<bool>,
}

impl RevealTracker {
    pub fn new(count: usize) -> Self {
        Self { revealed: vec![false; count] }
    }

    /// Feed an intersection observation. Returns true only on the first
    /// intersecting observation for `idx`; the caller then applies the visual
    /// state and stops observing. Unknown indices are ignored.
    pub fn on_intersect(&mut self, idx: usize, intersecting: bool) -> bool {
        match self.revealed.get_mut(idx) {
            Some(flag) if intersecting && !*flag => {
                *flag = true;
                true
            }
            _ => false,
        }
    }

    pub fn is_revealed(&self, idx: usize) -> bool {
        self.revealed.get(idx).copied().unwrap_or(false)
    }

    /// Number of elements still waiting for their first intersection.
    pub fn pending(&self) -> usize {
        self.revealed.iter().filter(|r| !**r).count()
    }
}
