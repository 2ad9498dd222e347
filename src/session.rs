//! Application session
//!
//! Owns the simulation plus everything around it: loadout selection, the
//! externally triggered mode transitions, the daily modifier, settings and
//! the profile. Shells (browser or native) only feed input flags and frame
//! deltas, then read the HUD snapshot and events.

use serde::Serialize;

use crate::consts::MAX_FRAME_DT;
use crate::daily::DailyChallenge;
use crate::persistence::Store;
use crate::profile::Meta;
use crate::settings::Settings;
use crate::sim::catalog::{Loadout, Perk, Weapon};
use crate::sim::combo::combo_multiplier;
use crate::sim::state::{GameEvent, GameState, Mode};
use crate::sim::tick::{TickInput, tick, trajectory_preview};
use crate::tuning::Tuning;

/// Which way the wind blows, for the HUD arrow
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum WindDirection {
    Left,
    Calm,
    Right,
}

/// Lightning band for the HUD overlay
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct HudHazard {
    pub left: f32,
    pub right: f32,
    pub striking: bool,
}

/// Display snapshot, produced once per frame
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Hud {
    pub mode: Mode,
    pub score: i64,
    pub lives: i32,
    /// 1.0 just fired, 0.0 ready
    pub cooldown: f32,
    /// Rounded effective wind speed (modifier applied), signed
    pub wind: i32,
    pub wind_direction: WindDirection,
    pub multiplier: u32,
    pub slow_mo: bool,
    pub hazard: Option<HudHazard>,
    /// Shake offset after settings are applied
    pub shake: f32,
    pub daily_id: String,
    pub best_score: f64,
}

pub struct Session<S: Store> {
    state: GameState,
    loadout: Loadout,
    daily: DailyChallenge,
    meta: Meta<S>,
    settings: Settings,
    /// Input flags, set by the shell between frames
    pub input: TickInput,
}

impl<S: Store> Session<S> {
    pub fn new(store: S, daily: DailyChallenge, seed: u64, tuning: Tuning) -> Self {
        let settings = Settings::load(&store);
        let meta = Meta::new(store);
        let mut state = GameState::new(seed, tuning);
        state.weather.density = settings.ambient_density();
        state.max_particles = settings.max_particles();
        log::info!("Daily challenge {}: {}", daily.id, daily.modifier.name());
        Self {
            state,
            loadout: Loadout::default(),
            daily,
            meta,
            settings,
            input: TickInput::default(),
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn mode(&self) -> Mode {
        self.state.mode
    }

    pub fn loadout(&self) -> Loadout {
        self.loadout
    }

    pub fn daily(&self) -> &DailyChallenge {
        &self.daily
    }

    pub fn meta(&self) -> &Meta<S> {
        &self.meta
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Replace settings, persist them and apply what affects the simulation
    pub fn set_settings(&mut self, settings: Settings) {
        settings.save(self.meta.store_mut());
        self.state.weather.density = settings.ambient_density();
        self.state.max_particles = settings.max_particles();
        self.settings = settings;
    }

    /// Equip a weapon. Only in the menu, and only if unlocked.
    pub fn select_weapon(&mut self, weapon: Weapon) -> bool {
        if self.state.mode != Mode::Menu || !self.meta.profile.has_weapon(weapon) {
            log::warn!("Weapon {} not selectable", weapon.name());
            return false;
        }
        self.loadout.weapon = weapon;
        true
    }

    /// Equip a perk. Only in the menu, and only if unlocked.
    pub fn select_perk(&mut self, perk: Perk) -> bool {
        if self.state.mode != Mode::Menu || !self.meta.profile.has_perk(perk) {
            log::warn!("Perk {} not selectable", perk.name());
            return false;
        }
        self.loadout.perk = perk;
        true
    }

    /// MENU → GAME with the current loadout and today's modifier
    pub fn start_run(&mut self) -> bool {
        if !self.state.start_run(self.loadout, self.daily.modifiers()) {
            return false;
        }
        self.input = TickInput::default();
        self.state.weather.density = self.settings.ambient_density();
        self.state.max_particles = self.settings.max_particles();
        true
    }

    /// OVER → MENU
    pub fn show_menu(&mut self) -> bool {
        self.state.show_menu()
    }

    /// OVER → MENU → GAME with the same loadout
    pub fn restart(&mut self) -> bool {
        self.show_menu() && self.start_run()
    }

    /// Advance one frame and return what happened. A finished run is
    /// recorded in the profile before this returns.
    pub fn frame(&mut self, dt: f32) -> Vec<GameEvent> {
        let dt = if dt.is_finite() {
            dt.clamp(0.0, MAX_FRAME_DT)
        } else {
            0.0
        };
        tick(&mut self.state, &self.input, dt);
        let events = self.state.drain_events();
        for event in &events {
            if let GameEvent::RunEnded { score, kills } = *event {
                self.meta.record_run(score, kills);
            }
        }
        events
    }

    /// Aim line points, empty when the preview is turned off or no run is active
    pub fn preview(&self) -> Vec<glam::Vec2> {
        if self.state.mode != Mode::Game || !self.settings.trajectory_preview {
            return Vec::new();
        }
        trajectory_preview(&self.state)
    }

    pub fn hud(&self) -> Hud {
        let state = &self.state;
        let combat = &state.tuning.combat;
        // What the arrows actually feel
        let wind = (state.weather.wind * state.run.modifiers.wind_mult).round() as i32;
        let wind_direction = match wind {
            w if w > 0 => WindDirection::Right,
            w if w < 0 => WindDirection::Left,
            _ => WindDirection::Calm,
        };
        Hud {
            mode: state.mode,
            score: state.run.score.floor() as i64,
            lives: state.run.lives.floor().max(0.0) as i32,
            cooldown: state.player.cooldown_fraction(),
            wind,
            wind_direction,
            multiplier: combo_multiplier(
                state.combo.streak,
                combat.streak_per_step,
                combat.max_multiplier,
            ),
            slow_mo: state.run.slow_mo_timer > 0.0,
            hazard: state.weather.hazard.map(|h| {
                let (left, right) = h.band();
                HudHazard {
                    left,
                    right,
                    striking: h.is_striking(),
                }
            }),
            shake: self.settings.effective_shake(state.fx.shake),
            daily_id: self.daily.id.clone(),
            best_score: self.meta.profile.best_score,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::daily::CivilDate;
    use crate::persistence::MemoryStore;
    use crate::profile::Profile;
    use crate::sim::catalog::Modifier;

    fn session() -> Session<MemoryStore> {
        let mut tuning = Tuning::default();
        tuning.spawn.base_rate = 0.0;
        tuning.spawn.box_chance = 0.0;
        tuning.weather.gust_chance = 0.0;
        let daily = DailyChallenge::for_date(CivilDate::new(2026, 10, 19));
        Session::new(MemoryStore::new(), daily, 7, tuning)
    }

    #[test]
    fn test_loadout_only_in_menu() {
        let mut s = session();
        assert!(s.select_weapon(Weapon::Tech));
        assert!(s.select_perk(Perk::DoubleArrowSpeed));
        assert!(s.start_run());
        assert!(!s.select_weapon(Weapon::Heavy));
        assert_eq!(s.state().run.loadout.weapon, Weapon::Tech);
        assert_eq!(s.state().run.loadout.perk, Perk::DoubleArrowSpeed);
    }

    #[test]
    fn test_locked_weapon_rejected() {
        let mut store = MemoryStore::new();
        let mut profile = Profile::default();
        profile.unlocked_weapons = vec!["standard".into()];
        profile.save(&mut store);
        let daily = DailyChallenge::for_date(CivilDate::new(2026, 10, 19));
        let mut s = Session::new(store, daily, 1, Tuning::default());
        assert!(!s.select_weapon(Weapon::Heavy));
        assert_eq!(s.loadout().weapon, Weapon::Standard);
    }

    #[test]
    fn test_daily_modifier_applied() {
        let mut s = session();
        assert_eq!(s.daily().modifier, Modifier::Explosive);
        s.start_run();
        assert!(s.state().run.modifiers.explosive_birds);
    }

    #[test]
    fn test_run_end_recorded_once() {
        let mut s = session();
        s.start_run();
        s.state.run.score = 250.0;
        s.state.run.kills = 12;
        s.state.run.lives = 0.0;
        let events = s.frame(0.016);
        assert!(events.contains(&GameEvent::RunEnded {
            score: 250.0,
            kills: 12
        }));
        assert_eq!(s.mode(), Mode::Over);
        assert!(s.frame(0.016).is_empty());
        assert_eq!(s.meta().profile.runs, 1);
        assert_eq!(s.meta().profile.best_score, 250.0);
        assert_eq!(Profile::load(s.meta().store()).total_kills, 12);
    }

    #[test]
    fn test_restart_from_over_only() {
        let mut s = session();
        assert!(!s.restart());
        s.start_run();
        assert!(!s.restart());
        s.state.run.lives = 0.0;
        s.frame(0.016);
        assert!(s.restart());
        assert_eq!(s.mode(), Mode::Game);
        assert_eq!(s.state().run.lives, 20.0);
    }

    #[test]
    fn test_bad_frame_deltas_are_harmless() {
        let mut s = session();
        s.start_run();
        s.frame(f32::NAN);
        s.frame(-1.0);
        s.frame(10.0);
        assert!(s.state().run.time <= MAX_FRAME_DT + 1e-6);
    }

    #[test]
    fn test_hud_snapshot() {
        let mut s = session();
        s.start_run();
        s.state.weather.wind = -37.6;
        s.state.run.lives = 12.7;
        s.state.combo.streak = 11;
        s.state.fx.shake = 6.0;
        let hud = s.hud();
        assert_eq!(hud.wind, -38);
        assert_eq!(hud.wind_direction, WindDirection::Left);
        assert_eq!(hud.lives, 12);
        assert_eq!(hud.multiplier, 3);
        assert_eq!(hud.shake, 6.0);
        assert_eq!(hud.daily_id, "OP-261019-EXPLOSIVE");

        let mut settings = s.settings().clone();
        settings.reduced_motion = true;
        s.set_settings(settings);
        assert_eq!(s.hud().shake, 0.0);
        assert!(serde_json::to_string(&s.hud()).is_ok());
    }

    #[test]
    fn test_hud_wind_includes_gale() {
        let daily = DailyChallenge::for_date(CivilDate::new(2026, 10, 2));
        assert_eq!(daily.modifier, Modifier::Gale);
        let mut s = Session::new(MemoryStore::new(), daily, 3, Tuning::default());
        s.start_run();
        assert_eq!(s.state().run.modifiers.wind_mult, 2.0);
        s.state.weather.wind = -17.586;
        let hud = s.hud();
        assert_eq!(hud.wind, -35);
        assert_eq!(hud.wind_direction, WindDirection::Left);
    }

    #[test]
    fn test_hud_score_is_floored() {
        let mut s = session();
        s.start_run();
        s.state.run.score = 139.7;
        assert_eq!(s.hud().score, 139);
        s.state.run.score = -0.4;
        assert_eq!(s.hud().score, -1);
    }

    #[test]
    fn test_settings_feed_the_simulation() {
        let mut s = session();
        let mut settings = Settings::from_preset(crate::settings::QualityPreset::Low);
        settings.particles = true;
        s.set_settings(settings);
        s.start_run();
        assert_eq!(s.state().max_particles, 100);
        assert_eq!(s.state().weather.density, 0.5);
        assert_eq!(Settings::load(s.meta().store()).quality, crate::settings::QualityPreset::Low);
    }

    #[test]
    fn test_preview_follows_settings() {
        let mut s = session();
        assert!(s.preview().is_empty());
        s.start_run();
        assert_eq!(s.preview().len(), 21);
        let mut settings = s.settings().clone();
        settings.trajectory_preview = false;
        s.set_settings(settings);
        assert!(s.preview().is_empty());
    }
}
