//! Fixed catalogs: weapons, perks, bird kinds and daily modifiers
//!
//! Lookups by string id never fail; an unknown id resolves to the first
//! entry of its catalog so a bad save or URL parameter can't stall a run.

use serde::{Deserialize, Serialize};

/// Bows the player can equip
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Weapon {
    /// Ranger: reliable, no downsides
    #[default]
    Standard,
    /// Greatbow: slow draw, heavy arrows
    Heavy,
    /// Tech Comp: fast, single precise shot, can anchor arrows
    Tech,
}

impl Weapon {
    pub const ALL: [Weapon; 3] = [Weapon::Standard, Weapon::Heavy, Weapon::Tech];

    pub fn id(&self) -> &'static str {
        match self {
            Weapon::Standard => "standard",
            Weapon::Heavy => "heavy",
            Weapon::Tech => "tech",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Weapon::Standard => "Ranger",
            Weapon::Heavy => "Greatbow",
            Weapon::Tech => "Tech Comp",
        }
    }

    /// Unknown ids fall back to the Ranger
    pub fn from_id(id: &str) -> Self {
        Self::ALL
            .into_iter()
            .find(|w| w.id() == id)
            .unwrap_or_default()
    }

    /// Fire-rate multiplier (higher = shorter fire interval)
    pub fn fire_rate(&self) -> f32 {
        match self {
            Weapon::Standard => 1.0,
            Weapon::Heavy => 0.6,
            Weapon::Tech => 1.2,
        }
    }

    /// Damage multiplier carried on every arrow
    pub fn power(&self) -> f32 {
        match self {
            Weapon::Standard => 1.0,
            Weapon::Heavy => 1.8,
            Weapon::Tech => 0.7,
        }
    }

    /// Hold-to-suspend ability
    pub fn can_anchor(&self) -> bool {
        matches!(self, Weapon::Tech)
    }

    /// Milliseconds between shots
    pub fn fire_interval_ms(&self) -> f32 {
        crate::consts::BASE_FIRE_INTERVAL_MS / self.fire_rate()
    }

    /// Horizontal walk speed; lighter bows move faster
    pub fn move_speed(&self) -> f32 {
        crate::consts::PLAYER_BASE_SPEED * (1.2 - (self.fire_rate() - 1.0) * 0.3)
    }
}

/// Run-long passive perks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Perk {
    /// Wind Walker: arrows ignore wind
    #[default]
    WindImmune,
    /// Time Thief: kills trigger brief slow motion
    SlowMoOnKill,
    /// Deadeye: arrows launch twice as fast
    DoubleArrowSpeed,
}

impl Perk {
    pub const ALL: [Perk; 3] = [Perk::WindImmune, Perk::SlowMoOnKill, Perk::DoubleArrowSpeed];

    pub fn id(&self) -> &'static str {
        match self {
            Perk::WindImmune => "wind",
            Perk::SlowMoOnKill => "thief",
            Perk::DoubleArrowSpeed => "precision",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Perk::WindImmune => "Wind Walker",
            Perk::SlowMoOnKill => "Time Thief",
            Perk::DoubleArrowSpeed => "Deadeye",
        }
    }

    /// Unknown ids fall back to Wind Walker
    pub fn from_id(id: &str) -> Self {
        Self::ALL
            .into_iter()
            .find(|p| p.id() == id)
            .unwrap_or_default()
    }
}

/// Weapon + perk chosen before a run; immutable while it lasts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Loadout {
    pub weapon: Weapon,
    pub perk: Perk,
}

/// How a bird moves
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetAi {
    /// Straight line across the screen
    Straight,
    /// Sinusoidal vertical wobble
    Weave,
    /// Latches into a vertical dive near the top center
    Dive,
}

/// Bird kinds, in spawn-table order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub enum TargetKind {
    /// Sparrow
    #[default]
    Common,
    /// Swallow
    Weaver,
    /// Falcon
    Diver,
    /// Dove - never shoot it
    Forbidden,
}

impl TargetKind {
    pub const ALL: [TargetKind; 4] = [
        TargetKind::Common,
        TargetKind::Weaver,
        TargetKind::Diver,
        TargetKind::Forbidden,
    ];

    pub fn id(&self) -> &'static str {
        match self {
            TargetKind::Common => "normal",
            TargetKind::Weaver => "fast",
            TargetKind::Diver => "diver",
            TargetKind::Forbidden => "forbidden",
        }
    }

    /// Unknown ids fall back to the common sparrow
    pub fn from_id(id: &str) -> Self {
        Self::ALL
            .into_iter()
            .find(|k| k.id() == id)
            .unwrap_or_default()
    }

    /// Spawn weight; the table sums to 1.0
    pub fn probability(&self) -> f32 {
        match self {
            TargetKind::Common => 0.70,
            TargetKind::Weaver => 0.15,
            TargetKind::Diver => 0.08,
            TargetKind::Forbidden => 0.07,
        }
    }

    pub fn ai(&self) -> TargetAi {
        match self {
            TargetKind::Common | TargetKind::Forbidden => TargetAi::Straight,
            TargetKind::Weaver => TargetAi::Weave,
            TargetKind::Diver => TargetAi::Dive,
        }
    }

    /// Base score; negative for the penalty kind
    pub fn score(&self) -> i32 {
        match self {
            TargetKind::Common => 10,
            TargetKind::Weaver => 20,
            TargetKind::Diver => 30,
            TargetKind::Forbidden => -500,
        }
    }

    pub fn is_penalty(&self) -> bool {
        matches!(self, TargetKind::Forbidden)
    }

    /// Particle color (0xRRGGBB)
    pub fn color(&self) -> u32 {
        match self {
            TargetKind::Common => 0xFFD166,
            TargetKind::Weaver => 0xEF476F,
            TargetKind::Diver => 0x118AB2,
            TargetKind::Forbidden => 0xFFFFFF,
        }
    }
}

/// Run-wide multipliers and flags, reset at every run start
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Modifiers {
    pub wind_mult: f32,
    pub spawn_rate_mult: f32,
    pub arrow_speed_mult: f32,
    pub explosive_birds: bool,
}

impl Default for Modifiers {
    fn default() -> Self {
        Self {
            wind_mult: 1.0,
            spawn_rate_mult: 1.0,
            arrow_speed_mult: 1.0,
            explosive_birds: false,
        }
    }
}

/// Daily challenge modifier catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Modifier {
    /// Gale Force: wind is 200% stronger
    Gale,
    /// Bird Rush: spawn rate +40%
    Rush,
    /// Heavy Air: arrows fly 25% slower
    HeavyAir,
    /// Volatile: birds explode on death
    Explosive,
}

impl Modifier {
    pub const ALL: [Modifier; 4] = [
        Modifier::Gale,
        Modifier::Rush,
        Modifier::HeavyAir,
        Modifier::Explosive,
    ];

    pub fn id(&self) -> &'static str {
        match self {
            Modifier::Gale => "gale",
            Modifier::Rush => "rush",
            Modifier::HeavyAir => "heavy_air",
            Modifier::Explosive => "explosive",
        }
    }

    /// Unknown ids resolve to no modifier at all
    pub fn from_id(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|m| m.id() == id)
    }

    pub fn name(&self) -> &'static str {
        match self {
            Modifier::Gale => "Gale Force",
            Modifier::Rush => "Bird Rush",
            Modifier::HeavyAir => "Heavy Air",
            Modifier::Explosive => "Volatile",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Modifier::Gale => "Wind is 200% stronger.",
            Modifier::Rush => "Spawn rate +40%.",
            Modifier::HeavyAir => "Arrows fly 25% slower.",
            Modifier::Explosive => "Birds explode on death.",
        }
    }

    pub fn apply(&self, mods: &mut Modifiers) {
        match self {
            Modifier::Gale => mods.wind_mult = 2.0,
            Modifier::Rush => mods.spawn_rate_mult = 1.4,
            Modifier::HeavyAir => mods.arrow_speed_mult = 0.75,
            Modifier::Explosive => mods.explosive_birds = true,
        }
    }
}
