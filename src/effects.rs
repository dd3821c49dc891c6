//! Cosmetic hover/counter/keyboard math. Transforms are returned as CSS
//! strings so the DOM layer only has to assign them.

/// Element box in viewport coordinates (mirrors `DOMRect`).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn center(&self) -> (f64, f64) {
        (self.left + self.width / 2.0, self.top + self.height / 2.0)
    }
}

// --- Magnetic / tilt ------------------------------------------------------------

/// Offset pulling an element toward the pointer.
pub fn magnetic_offset(pointer: (f64, f64), rect: &Rect, strength: f64) -> (f64, f64) {
    let (cx, cy) = rect.center();
    ((pointer.0 - cx) * strength, (pointer.1 - cy) * strength)
}

pub fn magnetic_transform(dx: f64, dy: f64) -> String {
    format!("translate({dx:.1}px, {dy:.1}px)")
}

/// `(rotate_x, rotate_y)` in degrees. Pointer above centre tips the top edge
/// toward the viewer; both axes are clamped to `max_deg`.
pub fn tilt_angles(pointer: (f64, f64), rect: &Rect, max_deg: f64) -> (f64, f64) {
    if rect.width <= 0.0 || rect.height <= 0.0 {
        return (0.0, 0.0);
    }
    let (cx, cy) = rect.center();
    let nx = ((pointer.0 - cx) / (rect.width / 2.0)).clamp(-1.0, 1.0);
    let ny = ((pointer.1 - cy) / (rect.height / 2.0)).clamp(-1.0, 1.0);
    (-ny * max_deg, nx * max_deg)
}

pub fn tilt_transform(rotate_x: f64, rotate_y: f64) -> String {
    format!("perspective(1000px) rotateX({rotate_x:.2}deg) rotateY({rotate_y:.2}deg) scale3d(1.02, 1.02, 1.02)")
}

// --- Counters -------------------------------------------------------------------

/// Parsed `data-count` value with the number of decimals to display.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CounterTarget {
    pub value: f64,
    pub decimals: usize,
}

impl CounterTarget {
    pub fn parse(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        let value: f64 = raw.parse().ok()?;
        if !value.is_finite() {
            return None;
        }
        Some(Self { value, decimals: fraction_digits(raw) })
    }

    /// Value shown `elapsed_ms` into a `duration_ms` animation (cubic ease-out).
    pub fn value_at(&self, elapsed_ms: f64, duration_ms: f64) -> f64 {
        if duration_ms <= 0.0 || elapsed_ms >= duration_ms {
            return self.value;
        }
        let t = (elapsed_ms / duration_ms).max(0.0);
        let eased = 1.0 - (1.0 - t).powi(3);
        self.value * eased
    }

    pub fn format(&self, value: f64, suffix: &str) -> String {
        format!("{value:.prec$}{suffix}", prec = self.decimals)
    }
}

/// Digits after the point once any exponent is applied: `1.5e2` has none,
/// `5e-1` has one.
fn fraction_digits(raw: &str) -> usize {
    let (mantissa, exp) = match raw.split_once(['e', 'E']) {
        Some((m, e)) => (m, e.parse::<i64>().unwrap_or(0)),
        None => (raw, 0),
    };
    let frac = mantissa.split_once('.').map_or(0, |(_, f)| f.len()) as i64;
    (frac - exp).max(0) as usize
}

// --- Keyboard -------------------------------------------------------------------

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Shortcut {
    CloseMenu,
    ScrollTop,
    /// Zero-based index into the page's `section[id]` list.
    JumpToSection(usize),
}

/// Map a `KeyboardEvent.key` to a shortcut. Nothing fires while the user is
/// typing into a form field or holding a modifier.
pub fn shortcut_for(key: &str, modifier_held: bool, in_form_field: bool) -> Option<Shortcut> {
    if modifier_held || in_form_field {
        return None;
    }
    match key {
        "Escape" => Some(Shortcut::CloseMenu),
        "t" | "T" => Some(Shortcut::ScrollTop),
        _ => {
            let mut chars = key.chars();
            match (chars.next(), chars.next()) {
                (Some(c @ '1'..='9'), None) => Some(Shortcut::JumpToSection(c as usize - '1' as usize)),
                _ => None,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CARD: Rect = Rect { left: 100.0, top: 200.0, width: 200.0, height: 100.0 };

    #[test]
    fn magnetic_is_zero_at_center() {
        assert_eq!(magnetic_offset((200.0, 250.0), &CARD, 0.3), (0.0, 0.0));
    }

    #[test]
    fn magnetic_pulls_toward_pointer() {
        let (dx, dy) = magnetic_offset((300.0, 200.0), &CARD, 0.3);
        assert!((dx - 30.0).abs() < 1e-9);
        assert!((dy + 15.0).abs() < 1e-9);
        assert_eq!(magnetic_transform(dx, dy), "translate(30.0px, -15.0px)");
    }

    #[test]
    fn tilt_clamps_to_max() {
        assert_eq!(tilt_angles((200.0, 250.0), &CARD, 10.0), (0.0, 0.0));
        assert_eq!(tilt_angles((300.0, 300.0), &CARD, 10.0), (-10.0, 10.0));
        assert_eq!(tilt_angles((5000.0, -5000.0), &CARD, 10.0), (10.0, 10.0));
        assert_eq!(tilt_angles((150.0, 250.0), &CARD, 10.0), (0.0, -5.0));
    }

    #[test]
    fn tilt_ignores_zero_size() {
        let empty = Rect { left: 0.0, top: 0.0, width: 0.0, height: 40.0 };
        assert_eq!(tilt_angles((10.0, 10.0), &empty, 10.0), (0.0, 0.0));
    }

    #[test]
    fn counter_parse_keeps_decimals() {
        assert_eq!(CounterTarget::parse("150"), Some(CounterTarget { value: 150.0, decimals: 0 }));
        assert_eq!(CounterTarget::parse(" 99.5 "), Some(CounterTarget { value: 99.5, decimals: 1 }));
        assert_eq!(CounterTarget::parse("abc"), None);
        assert_eq!(CounterTarget::parse("inf"), None);
    }

    #[test]
    fn counter_exponent_shifts_decimals() {
        let c = CounterTarget::parse("1.5e2").unwrap();
        assert_eq!(c, CounterTarget { value: 150.0, decimals: 0 });
        assert_eq!(c.format(c.value, "+"), "150+");
        assert_eq!(CounterTarget::parse("1.25E1").unwrap().decimals, 1);
        assert_eq!(CounterTarget::parse("5e-1").unwrap().decimals, 1);
    }

    #[test]
    fn counter_eases_and_lands_on_target() {
        let c = CounterTarget::parse("200").unwrap();
        assert_eq!(c.value_at(0.0, 2000.0), 0.0);
        let mid = c.value_at(1000.0, 2000.0);
        assert!(mid > 100.0 && mid < 200.0, "ease-out is ahead of linear: {mid}");
        assert_eq!(c.value_at(2000.0, 2000.0), 200.0);
        assert_eq!(c.value_at(9000.0, 2000.0), 200.0);
        assert_eq!(c.format(c.value_at(2000.0, 2000.0), "+"), "200+");
    }

    #[test]
    fn counter_is_monotonic() {
        let c = CounterTarget::parse("3.25").unwrap();
        let mut last = -1.0;
        for ms in (0..=2000).step_by(50) {
            let v = c.value_at(ms as f64, 2000.0);
            assert!(v >= last);
            last = v;
        }
        assert_eq!(c.format(last, ""), "3.25");
    }

    #[test]
    fn shortcuts() {
        assert_eq!(shortcut_for("Escape", false, false), Some(Shortcut::CloseMenu));
        assert_eq!(shortcut_for("T", false, false), Some(Shortcut::ScrollTop));
        assert_eq!(shortcut_for("1", false, false), Some(Shortcut::JumpToSection(0)));
        assert_eq!(shortcut_for("9", false, false), Some(Shortcut::JumpToSection(8)));
        assert_eq!(shortcut_for("0", false, false), None);
        assert_eq!(shortcut_for("Enter", false, false), None);
    }

    #[test]
    fn shortcuts_suppressed_in_forms_and_with_modifiers() {
        assert_eq!(shortcut_for("t", false, true), None);
        assert_eq!(shortcut_for("1", true, false), None);
        assert_eq!(shortcut_for("Escape", true, false), None);
    }
}
