//! Game state and core simulation types
//!
//! Everything a run owns lives in `GameState`. It is rebuilt on every run
//! start; nothing but the final score and kill count outlives a run.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::Serialize;

use super::catalog::{Loadout, Modifiers, TargetAi, TargetKind};
use super::collision::Rect;
use super::combo::Combo;
use super::weather::Weather;
use crate::consts::*;
use crate::tuning::Tuning;

/// Top-level mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Mode {
    /// Loadout selection; nothing simulates
    Menu,
    /// Active run
    Game,
    /// Run ended (lives ran out)
    Over,
}

/// Arrow state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProjectileState {
    Flying,
    /// Suspended in place while the anchor input is held
    Anchored,
}

/// An arrow
#[derive(Debug, Clone, PartialEq)]
pub struct Projectile {
    pub pos: Vec2,
    pub vel: Vec2,
    pub size: Vec2,
    /// Base damage times the weapon's power; carried but not yet consumed
    pub damage: f32,
    pub state: ProjectileState,
}

impl Projectile {
    pub fn new(pos: Vec2, vel: Vec2, damage: f32) -> Self {
        Self {
            pos,
            vel,
            size: Vec2::new(ARROW_WIDTH, ARROW_HEIGHT),
            damage,
            state: ProjectileState::Flying,
        }
    }

    pub fn bounds(&self) -> Rect {
        Rect::from_pos_size(self.pos, self.size)
    }
}

/// A bird
#[derive(Debug, Clone, PartialEq)]
pub struct Target {
    pub pos: Vec2,
    pub vel: Vec2,
    pub size: Vec2,
    pub kind: TargetKind,
    /// One-way latch, diving kind only
    pub diving: bool,
}

impl Target {
    pub fn new(kind: TargetKind, pos: Vec2, vel: Vec2) -> Self {
        Self {
            pos,
            vel,
            size: Vec2::new(TARGET_WIDTH, TARGET_HEIGHT),
            kind,
            diving: false,
        }
    }

    pub fn ai(&self) -> TargetAi {
        self.kind.ai()
    }

    pub fn bounds(&self) -> Rect {
        Rect::from_pos_size(self.pos, self.size)
    }
}

/// A crate drifting across the sky: heals, unless it's a mimic
#[derive(Debug, Clone, PartialEq)]
pub struct PickupBox {
    pub pos: Vec2,
    /// Constant horizontal velocity
    pub vx: f32,
    pub size: Vec2,
    pub is_mimic: bool,
}

impl PickupBox {
    pub fn new(pos: Vec2, vx: f32, is_mimic: bool) -> Self {
        Self {
            pos,
            vx,
            size: Vec2::splat(BOX_SIZE),
            is_mimic,
        }
    }

    pub fn bounds(&self) -> Rect {
        Rect::from_pos_size(self.pos, self.size)
    }
}

/// The archer
#[derive(Debug, Clone, PartialEq)]
pub struct Player {
    pub pos: Vec2,
    pub size: Vec2,
    /// Horizontal speed (px/s)
    pub speed: f32,
    /// Milliseconds until the next shot
    pub cooldown: f32,
    /// Fire interval (ms)
    pub max_cooldown: f32,
}

impl Player {
    pub fn bounds(&self) -> Rect {
        Rect::from_pos_size(self.pos, self.size)
    }

    /// Reload progress for the HUD: 1.0 just fired, 0.0 ready
    pub fn cooldown_fraction(&self) -> f32 {
        if self.max_cooldown <= 0.0 {
            return 0.0;
        }
        (self.cooldown / self.max_cooldown).clamp(0.0, 1.0)
    }
}

/// A particle for visual effects
#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    pub color: u32,
    /// Seconds left
    pub life: f32,
    pub size: f32,
}

/// Rising score text
#[derive(Debug, Clone, PartialEq)]
pub struct FloatingLabel {
    pub pos: Vec2,
    pub vy: f32,
    pub text: String,
    pub color: u32,
    /// 1.0 → 0.0
    pub life: f32,
}

/// Cosmetic output of the simulation (not gameplay-affecting)
#[derive(Debug, Clone, Default)]
pub struct Effects {
    pub particles: Vec<Particle>,
    pub labels: Vec<FloatingLabel>,
    /// Screen shake amplitude (px), decays every tick
    pub shake: f32,
}

impl Effects {
    /// Spawn a burst of particles (at most `MAX_BURST`)
    pub fn burst(&mut self, rng: &mut Pcg32, pos: Vec2, color: u32, count: usize) {
        for _ in 0..count.min(MAX_BURST) {
            self.particles.push(Particle {
                pos,
                vel: Vec2::new(
                    (rng.random::<f32>() - 0.5) * 200.0,
                    (rng.random::<f32>() - 0.5) * 200.0,
                ),
                color,
                life: 0.5 + rng.random::<f32>() * 0.5,
                size: rng.random::<f32>() * 3.0 + 1.0,
            });
        }
    }

    pub fn label(&mut self, pos: Vec2, text: impl Into<String>, color: u32) {
        self.labels.push(FloatingLabel {
            pos,
            vy: -50.0,
            text: text.into(),
            color,
            life: 1.0,
        });
    }

    pub fn shake(&mut self, amount: f32) {
        self.shake = amount;
    }
}

/// Notifications for the shell (HUD flashes, sounds, persistence)
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub enum GameEvent {
    /// A volley left the bow
    Fired { arrows: usize },
    /// A scoring bird went down
    TargetKilled {
        kind: TargetKind,
        points: f32,
        multiplier: u32,
    },
    /// The forbidden bird was shot; flash the score
    PenaltyHit { points: f32 },
    /// A scoring bird left the playfield
    TargetEscaped { kind: TargetKind },
    /// A crate was shot open
    BoxOpened { mimic: bool },
    /// Lightning burned the player this tick
    PlayerStruck { damage: f32 },
    /// Lives ran out
    RunEnded { score: f32, kills: u32 },
}

/// Per-run scalars
#[derive(Debug, Clone, PartialEq)]
pub struct RunState {
    pub score: f32,
    /// Clamped to the max on healing, unclamped on damage
    pub lives: f32,
    pub kills: u32,
    /// World seconds since the run started (drives weaving)
    pub time: f32,
    /// 1.0 normally, reduced while slow motion lasts
    pub time_scale: f32,
    pub slow_mo_timer: f32,
    pub box_spawn_timer: f32,
    pub modifiers: Modifiers,
    pub loadout: Loadout,
}

impl RunState {
    pub fn new(lives: f32, loadout: Loadout, modifiers: Modifiers) -> Self {
        Self {
            score: 0.0,
            lives,
            kills: 0,
            time: 0.0,
            time_scale: 1.0,
            slow_mo_timer: 0.0,
            box_spawn_timer: 0.0,
            modifiers,
            loadout,
        }
    }
}

/// Complete simulation state
#[derive(Debug, Clone)]
pub struct GameState {
    pub mode: Mode,
    pub tuning: Tuning,
    pub run: RunState,
    pub combo: Combo,
    pub player: Player,
    pub weather: Weather,
    pub projectiles: Vec<Projectile>,
    pub targets: Vec<Target>,
    pub boxes: Vec<PickupBox>,
    pub fx: Effects,
    /// Drained by the shell after each tick
    pub events: Vec<GameEvent>,
    /// Gameplay RNG
    pub rng: Pcg32,
    /// Particle cap from settings (never above `MAX_PARTICLES`)
    pub max_particles: usize,
}

impl GameState {
    /// Fresh state sitting in the menu
    pub fn new(seed: u64, tuning: Tuning) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let loadout = Loadout::default();
        let weather = Weather::new(&tuning.weather, &tuning.playfield, &mut rng);
        Self {
            mode: Mode::Menu,
            run: RunState::new(tuning.combat.starting_lives, loadout, Modifiers::default()),
            combo: Combo::default(),
            player: Self::spawn_player(&tuning, loadout),
            weather,
            projectiles: Vec::new(),
            targets: Vec::new(),
            boxes: Vec::new(),
            fx: Effects::default(),
            events: Vec::new(),
            rng,
            max_particles: MAX_PARTICLES,
            tuning,
        }
    }

    fn spawn_player(tuning: &Tuning, loadout: Loadout) -> Player {
        let field = &tuning.playfield;
        Player {
            pos: Vec2::new(field.width / 2.0, field.height - PLAYER_FLOOR_OFFSET),
            size: Vec2::new(PLAYER_WIDTH, PLAYER_HEIGHT),
            speed: loadout.weapon.move_speed(),
            cooldown: 0.0,
            max_cooldown: loadout.weapon.fire_interval_ms(),
        }
    }

    /// MENU → GAME. Rebuilds every pool and the weather; ignored outside the menu.
    pub fn start_run(&mut self, loadout: Loadout, modifiers: Modifiers) -> bool {
        if self.mode != Mode::Menu {
            log::warn!("start_run ignored in {:?}", self.mode);
            return false;
        }
        let density = self.weather.density;
        self.run = RunState::new(self.tuning.combat.starting_lives, loadout, modifiers);
        self.combo = Combo::default();
        self.player = Self::spawn_player(&self.tuning, loadout);
        self.weather = Weather::new(&self.tuning.weather, &self.tuning.playfield, &mut self.rng);
        self.weather.density = density;
        self.projectiles.clear();
        self.targets.clear();
        self.boxes.clear();
        self.fx = Effects::default();
        self.events.clear();
        self.mode = Mode::Game;
        log::info!(
            "Run started: {} + {}",
            loadout.weapon.name(),
            loadout.perk.name()
        );
        true
    }

    /// OVER → MENU; ignored in any other mode
    pub fn show_menu(&mut self) -> bool {
        if self.mode != Mode::Over {
            log::warn!("show_menu ignored in {:?}", self.mode);
            return false;
        }
        self.mode = Mode::Menu;
        true
    }

    /// GAME → OVER, exactly once
    pub fn end_run(&mut self) {
        if self.mode != Mode::Game {
            return;
        }
        self.mode = Mode::Over;
        log::info!(
            "Run ended: score {:.0}, kills {}",
            self.run.score,
            self.run.kills
        );
        self.events.push(GameEvent::RunEnded {
            score: self.run.score,
            kills: self.run.kills,
        });
    }

    /// End the run if lives are gone. Returns true when the run is over.
    pub fn check_lives(&mut self) -> bool {
        if self.run.lives <= 0.0 {
            self.end_run();
        }
        self.mode != Mode::Game
    }

    /// Take the events produced since the last drain
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}
