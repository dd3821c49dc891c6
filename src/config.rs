//! Tunable constants for both editions.
//!
//! Everything here has a compiled-in default. With the `serde` feature the
//! struct can be deserialized (missing fields fall back to the defaults), and
//! with `serde_json` a host page can pass overrides as a JSON string.

/// Roles cycled by the typing effect, in display order.
pub const DEFAULT_ROLES: &[&str] = &[
    "Azure Data Engineer",
    "Data Pipeline Architect",
    "Big Data Enthusiast",
    "Cloud Solutions Builder",
];

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct TypingConfig {
    pub phrases: Vec<String>,
    pub type_ms: u32,
    pub delete_ms: u32,
    pub hold_ms: u32, // pause once a phrase is complete
    pub gap_ms: u32,  // pause before the next phrase starts typing
}

impl Default for TypingConfig {
    fn default() -> Self {
        Self {
            phrases: DEFAULT_ROLES.iter().map(|s| s.to_string()).collect(),
            type_ms: 100,
            delete_ms: 50,
            hold_ms: 2000,
            gap_ms: 500,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ParticleConfig {
    pub count: usize,
    pub max_speed: f64,
    pub min_radius: f64,
    pub max_radius: f64,
    pub min_opacity: f64,
    pub max_opacity: f64,
    pub connect_distance: f64,
    pub max_line_opacity: f64,
    /// RGB triple used for both dots and connecting lines.
    pub color: (u8, u8, u8),
    pub resize_debounce_ms: u32,
}

impl Default for ParticleConfig {
    fn default() -> Self {
        Self {
            count: 60,
            max_speed: 0.4,
            min_radius: 1.0,
            max_radius: 3.0,
            min_opacity: 0.2,
            max_opacity: 0.7,
            connect_distance: 120.0,
            max_line_opacity: 0.15,
            color: (100, 255, 218),
            resize_debounce_ms: 200,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PortfolioConfig {
    /// Scroll offset (px) at or past which the nav bar gets `scrolled`.
    pub nav_threshold: f64,
    /// Added to the scroll offset when deciding which section is active.
    pub active_lookahead: f64,
    pub nav_throttle_ms: u32,
    pub glow_throttle_ms: u32,
    pub reveal_root_margin: String,
    pub reveal_threshold: f64,
    pub magnetic_strength: f64,
    pub tilt_max_deg: f64,
    pub counter_duration_ms: f64,
    pub resume_path: String,
    pub resume_download_name: String,
    pub typing: TypingConfig,
    pub particles: ParticleConfig,
}

impl Default for PortfolioConfig {
    fn default() -> Self {
        Self {
            nav_threshold: 50.0,
            active_lookahead: 150.0,
            nav_throttle_ms: 100,
            glow_throttle_ms: 16,
            reveal_root_margin: "0px 0px -100px 0px".to_string(),
            reveal_threshold: 0.1,
            magnetic_strength: 0.3,
            tilt_max_deg: 10.0,
            counter_duration_ms: 2000.0,
            resume_path: "resume.pdf".to_string(),
            resume_download_name: "Nishant_Pardeshi_Resume.pdf".to_string(),
            typing: TypingConfig::default(),
            particles: ParticleConfig::default(),
        }
    }
}

impl PortfolioConfig {
    /// Parse overrides from JSON. Absent keys keep their defaults.
    #[cfg(feature = "serde_json")]
    pub fn from_json(json: &str) -> Result<Self, String> {
        serde_json::from_str(json).map_err(|e| format!("invalid portfolio config: {e}"))
    }
}
