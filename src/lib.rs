//! Archer Evolution - A wind-swept arcade archery game
//!
//! Core modules:
//! - `sim`: Frame simulation (weather, projectiles, targets, scoring)
//! - `tuning`: Data-driven game balance
//! - `settings`: Player preferences (quality, shake, reduced motion)
//! - `session`: Mode transitions, loadout, HUD snapshot, run recording
//! - `profile`: Best score / kills / unlocks
//! - `daily`: Date-seeded daily challenge modifier
//! - `persistence`: Key/value storage backends
//! - `platform`: Browser/native platform abstraction

pub mod daily;
pub mod persistence;
pub mod platform;
pub mod profile;
pub mod session;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use daily::{CivilDate, DailyChallenge};
pub use profile::{Meta, Profile};
pub use session::{Hud, Session};
pub use settings::{QualityPreset, Settings};
pub use tuning::Tuning;

/// Game configuration constants
pub mod consts {
    /// Largest frame delta the simulation accepts (seconds); longer gaps are clamped
    pub const MAX_FRAME_DT: f32 = 0.05;

    /// Player rectangle
    pub const PLAYER_WIDTH: f32 = 40.0;
    pub const PLAYER_HEIGHT: f32 = 50.0;
    /// Distance from the bottom of the playfield to the player's top edge
    pub const PLAYER_FLOOR_OFFSET: f32 = 70.0;
    /// Left clamp for the player, and the right-side margin (width - this)
    pub const PLAYER_MIN_X: f32 = 10.0;
    pub const PLAYER_RIGHT_MARGIN: f32 = 50.0;
    /// Base player speed in px/s before weapon weight is applied
    pub const PLAYER_BASE_SPEED: f32 = 300.0;
    /// Bow nock offset from the player's left edge
    pub const BOW_OFFSET_X: f32 = 18.0;

    /// Arrow rectangle
    pub const ARROW_WIDTH: f32 = 4.0;
    pub const ARROW_HEIGHT: f32 = 20.0;

    /// Bird rectangle
    pub const TARGET_WIDTH: f32 = 30.0;
    pub const TARGET_HEIGHT: f32 = 20.0;

    /// Crate rectangle
    pub const BOX_SIZE: f32 = 30.0;

    /// Hard cap on effect particles; oldest are discarded first
    pub const MAX_PARTICLES: usize = 200;
    /// Cap on particles emitted by a single burst
    pub const MAX_BURST: usize = 15;

    /// Base fire interval in milliseconds (divided by weapon fire rate)
    pub const BASE_FIRE_INTERVAL_MS: f32 = 400.0;
}
