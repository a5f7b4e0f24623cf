//! Game settings and preferences
//!
//! Defaults can be overridden from the page URL query string, for example
//! `?variant=simple&seed=42&muted=1&reduced_motion=1`. Nothing is persisted.

use serde::{Deserialize, Serialize};

/// Which field simulator a match uses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum SimVariant {
    /// Single ball, three bat presets, scored from the center
    Simple,
    /// Bowler, fielders, timed shots and catches
    #[default]
    Interactive,
}

impl SimVariant {
    pub fn as_str(&self) -> &'static str {
        match self {
            SimVariant::Simple => "Simple",
            SimVariant::Interactive => "Interactive",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "simple" | "classic" => Some(SimVariant::Simple),
            "interactive" | "2d" => Some(SimVariant::Interactive),
            _ => None,
        }
    }
}

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    pub variant: SimVariant,
    /// Fixed match seed; a fresh one is drawn per match when unset
    pub seed: Option<u64>,

    // === Audio ===
    pub sound: bool,
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,

    // === Match screen ===
    /// Show the live commentary feed
    pub commentary: bool,
    /// Show FPS counter
    pub show_fps: bool,

    // === Accessibility ===
    /// Reduced motion (no bowler/batsman poses)
    pub reduced_motion: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            variant: SimVariant::Interactive,
            seed: None,
            sound: true,
            master_volume: 0.8,
            commentary: true,
            show_fps: false,
            reduced_motion: false,
        }
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

impl Settings {
    /// Effective volume (0 when muted)
    pub fn effective_volume(&self) -> f32 {
        if self.sound {
            self.master_volume.clamp(0.0, 1.0)
        } else {
            0.0
        }
    }

    /// Apply `key=value` pairs from a URL query string
    ///
    /// Unknown keys are ignored and unparsable values leave the current
    /// setting untouched.
    pub fn apply_query(&mut self, query: &str) {
        let query = query.strip_prefix('?').unwrap_or(query);
        for pair in query.split('&').filter(|p| !p.is_empty()) {
            let (key, value) = pair.split_once('=').unwrap_or((pair, "1"));
            match key {
                "variant" => {
                    if let Some(v) = SimVariant::from_str(value) {
                        self.variant = v;
                    }
                }
                "seed" => {
                    if let Ok(seed) = value.parse() {
                        self.seed = Some(seed);
                    }
                }
                "muted" => {
                    if let Some(muted) = parse_flag(value) {
                        self.sound = !muted;
                    }
                }
                "volume" => {
                    if let Ok(v) = value.parse::<f32>()
                        && v.is_finite()
                    {
                        self.master_volume = v.clamp(0.0, 1.0);
                    }
                }
                "commentary" => {
                    if let Some(on) = parse_flag(value) {
                        self.commentary = on;
                    }
                }
                "fps" => {
                    if let Some(on) = parse_flag(value) {
                        self.show_fps = on;
                    }
                }
                "reduced_motion" => {
                    if let Some(on) = parse_flag(value) {
                        self.reduced_motion = on;
                    }
                }
                other => log::debug!("Ignoring unknown setting '{other}'"),
            }
        }
    }

    pub fn from_query(query: &str) -> Self {
        let mut settings = Self::default();
        settings.apply_query(query);
        settings
    }

    /// Load settings from the page URL (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let search = web_sys::window()
            .and_then(|w| w.location().search().ok())
            .unwrap_or_default();
        let settings = Self::from_query(&search);
        log::info!("Settings: {:?}", settings);
        settings
    }

    /// Native: settings come from the first command-line argument, written
    /// like a query string
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        std::env::args()
            .nth(1)
            .map(|arg| Self::from_query(&arg))
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let s = Settings::default();
        assert_eq!(s.variant, SimVariant::Interactive);
        assert!(s.sound);
        assert!(!s.reduced_motion);
        assert!((s.effective_volume() - 0.8).abs() < 1e-6);
    }

    #[test]
    fn test_query_overrides() {
        let s = Settings::from_query("?variant=simple&seed=42&muted=1&reduced_motion=1");
        assert_eq!(s.variant, SimVariant::Simple);
        assert_eq!(s.seed, Some(42));
        assert!(!s.sound);
        assert_eq!(s.effective_volume(), 0.0);
        assert!(s.reduced_motion);
    }

    #[test]
    fn test_bad_values_keep_defaults() {
        let s = Settings::from_query("variant=cricket&seed=abc&volume=loud&muted=maybe&x=1");
        assert_eq!(s, Settings::default());
    }

    #[test]
    fn test_volume_clamped() {
        let s = Settings::from_query("volume=3.5");
        assert_eq!(s.master_volume, 1.0);
    }

    #[test]
    fn test_bare_flag_means_on() {
        let s = Settings::from_query("fps&commentary=off");
        assert!(s.show_fps);
        assert!(!s.commentary);
    }

    #[test]
    fn test_variant_from_str() {
        assert_eq!(SimVariant::from_str("Interactive"), Some(SimVariant::Interactive));
        assert_eq!(SimVariant::from_str("SIMPLE"), Some(SimVariant::Simple));
        assert_eq!(SimVariant::from_str("3d"), None);
    }

    #[test]
    fn test_variant_label_parses_back() {
        for variant in [SimVariant::Simple, SimVariant::Interactive] {
            assert_eq!(SimVariant::from_str(variant.as_str()), Some(variant));
        }
        assert_eq!(SimVariant::default().as_str(), "Interactive");
    }
}
