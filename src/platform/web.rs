//! JS bindings
//!
//! The page owns the canvas, the DOM HUD and the animation-frame loop. It
//! forwards key state and frame deltas here and reads back JSON snapshots.

use wasm_bindgen::prelude::*;

use crate::daily::DailyChallenge;
use crate::persistence::LocalStore;
use crate::session::Session;
use crate::settings::{QualityPreset, Settings};
use crate::sim::catalog::{Perk, Weapon};
use crate::tuning::Tuning;

#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).expect("Failed to init logger");
    log::info!("Archer Evolution starting...");
}

/// Game instance handed to the page
#[wasm_bindgen]
pub struct WebGame {
    session: Session<LocalStore>,
}

#[wasm_bindgen]
impl WebGame {
    #[wasm_bindgen(constructor)]
    pub fn new() -> WebGame {
        let seed = super::entropy_seed();
        log::info!("Seed: {}", seed);
        Self {
            session: Session::new(
                LocalStore::new(),
                DailyChallenge::today(),
                seed,
                Tuning::default(),
            ),
        }
    }

    /// Map a `KeyboardEvent.code` onto the input flags. Returns false for
    /// keys the game doesn't use so the page can let them through.
    pub fn set_key(&mut self, code: &str, down: bool) -> bool {
        let input = &mut self.session.input;
        match code {
            "ArrowLeft" | "KeyA" => input.left = down,
            "ArrowRight" | "KeyD" => input.right = down,
            "Space" => input.shoot = down,
            "ShiftLeft" | "ShiftRight" | "KeyE" => input.anchor = down,
            _ => return false,
        }
        true
    }

    pub fn select_weapon(&mut self, id: &str) -> bool {
        self.session.select_weapon(Weapon::from_id(id))
    }

    pub fn select_perk(&mut self, id: &str) -> bool {
        self.session.select_perk(Perk::from_id(id))
    }

    pub fn start_run(&mut self) -> bool {
        self.session.start_run()
    }

    pub fn show_menu(&mut self) -> bool {
        self.session.show_menu()
    }

    pub fn restart(&mut self) -> bool {
        self.session.restart()
    }

    pub fn set_quality(&mut self, name: &str) {
        let Some(preset) = QualityPreset::parse(name) else {
            log::warn!("Unknown quality preset '{}'", name);
            return;
        };
        let mut settings: Settings = self.session.settings().clone();
        settings.apply_preset(preset);
        self.session.set_settings(settings);
    }

    pub fn set_reduced_motion(&mut self, on: bool) {
        let mut settings = self.session.settings().clone();
        settings.reduced_motion = on;
        self.session.set_settings(settings);
    }

    /// Advance one frame; returns the frame's events as a JSON array
    pub fn frame(&mut self, dt: f32) -> String {
        let events = self.session.frame(dt);
        serde_json::to_string(&events).unwrap_or_else(|_| "[]".to_string())
    }

    /// HUD snapshot as JSON
    pub fn hud(&self) -> String {
        serde_json::to_string(&self.session.hud()).unwrap_or_else(|_| "{}".to_string())
    }

    /// Aim line as flat `[x0, y0, x1, y1, ...]`
    pub fn preview(&self) -> Vec<f32> {
        self.session
            .preview()
            .into_iter()
            .flat_map(|p| [p.x, p.y])
            .collect()
    }

    pub fn daily_id(&self) -> String {
        self.session.daily().id.clone()
    }

    pub fn daily_description(&self) -> String {
        self.session.daily().modifier.description().to_string()
    }
}

impl Default for WebGame {
    fn default() -> Self {
        Self::new()
    }
}
