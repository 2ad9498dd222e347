//! Frame simulation module
//!
//! All gameplay logic lives here. This module has no rendering or platform
//! dependencies:
//! - Gameplay randomness comes from the run's seeded `Pcg32`
//! - The daily modifier draw uses its own `Mulberry32`, never shared
//! - Pools are compacted once per stage, survivors keep their order

pub mod catalog;
pub mod collision;
pub mod combo;
pub mod rng;
pub mod spawn;
pub mod state;
pub mod tick;
pub mod weather;

pub use catalog::{Loadout, Modifier, Modifiers, Perk, TargetAi, TargetKind, Weapon};
pub use collision::{Rect, first_hit};
pub use combo::{Combo, combo_multiplier};
pub use rng::Mulberry32;
pub use state::{
    Effects, FloatingLabel, GameEvent, GameState, Mode, Particle, PickupBox, Player, Projectile,
    ProjectileState, RunState, Target,
};
pub use tick::{TickInput, tick, trajectory_preview};
pub use weather::{AmbientParticle, Hazard, HazardStage, Weather};
