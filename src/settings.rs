//! Game settings and preferences
//!
//! Persisted separately from the profile, under their own key.

use serde::{Deserialize, Serialize};

use crate::consts::MAX_PARTICLES;
use crate::persistence::{Store, load_json_or_default, save_json};

/// Quality preset levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum QualityPreset {
    Low,
    #[default]
    Medium,
    High,
}

impl QualityPreset {
    pub fn as_str(&self) -> &'static str {
        match self {
            QualityPreset::Low => "Low",
            QualityPreset::Medium => "Medium",
            QualityPreset::High => "High",
        }
    }

    /// Parse a preset name; `None` for anything unrecognized
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "low" => Some(QualityPreset::Low),
            "medium" | "med" => Some(QualityPreset::Medium),
            "high" => Some(QualityPreset::High),
            _ => None,
        }
    }

    /// Effect particle cap for this preset
    pub fn max_particles(&self) -> usize {
        match self {
            QualityPreset::Low => 100,
            QualityPreset::Medium | QualityPreset::High => MAX_PARTICLES,
        }
    }

    /// Multiplier on the ambient rain/snow population
    pub fn ambient_density(&self) -> f32 {
        match self {
            QualityPreset::Low => 0.5,
            QualityPreset::Medium => 1.0,
            QualityPreset::High => 1.5,
        }
    }
}

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Graphics quality preset
    pub quality: QualityPreset,
    /// Screen shake on recoil, kills and mimics
    pub screen_shake: bool,
    /// Particle effects (bursts, explosions)
    pub particles: bool,
    /// Show the aim line above the bow
    pub trajectory_preview: bool,

    // === Accessibility ===
    /// Reduced motion (no shake)
    pub reduced_motion: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            quality: QualityPreset::Medium,
            screen_shake: true,
            particles: true,
            trajectory_preview: true,
            reduced_motion: false,
        }
    }
}

impl Settings {
    /// Storage key
    pub const STORAGE_KEY: &'static str = "archer_evo_settings";

    /// Create settings from a quality preset
    pub fn from_preset(preset: QualityPreset) -> Self {
        Self {
            quality: preset,
            ..Self::default()
        }
    }

    /// Apply a quality preset (Low also turns the aim line off)
    pub fn apply_preset(&mut self, preset: QualityPreset) {
        self.quality = preset;
        if preset == QualityPreset::Low {
            self.trajectory_preview = false;
        }
    }

    /// Whether shake is shown at all (respects reduced_motion)
    pub fn effective_screen_shake(&self) -> bool {
        self.screen_shake && !self.reduced_motion
    }

    /// Shake offset to display for a raw simulation shake value
    pub fn effective_shake(&self, raw: f32) -> f32 {
        if self.effective_screen_shake() { raw } else { 0.0 }
    }

    /// Effective particle count cap
    pub fn max_particles(&self) -> usize {
        if !self.particles {
            0
        } else {
            self.quality.max_particles()
        }
    }

    pub fn ambient_density(&self) -> f32 {
        self.quality.ambient_density()
    }

    /// Load settings, falling back to defaults on any problem
    pub fn load(store: &dyn Store) -> Self {
        let settings: Settings = load_json_or_default(store, Self::STORAGE_KEY);
        log::info!("Settings: {} quality", settings.quality.as_str());
        settings
    }

    /// Save settings; failures are logged and otherwise ignored
    pub fn save(&self, store: &mut dyn Store) {
        match save_json(store, Self::STORAGE_KEY, self) {
            Ok(()) => log::info!("Settings saved"),
            Err(e) => log::warn!("Settings not saved: {e}"),
        }
    }
}
