//! Player profile
//!
//! Best score, lifetime kills, run count and unlocks, persisted as one
//! versioned JSON blob. A missing, corrupt or outdated blob is replaced by
//! a fresh profile; the game never refuses to start over it. Older blobs
//! (camelCase fields, no version) still load under the same key.

use serde::{Deserialize, Serialize};

use crate::persistence::{Store, load_json_or_default, save_json};
use crate::sim::catalog::{Perk, Weapon};

/// Current blob layout
pub const PROFILE_VERSION: u32 = 1;

/// Persisted profile
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Profile {
    pub version: u32,
    #[serde(alias = "bestScore")]
    pub best_score: f64,
    #[serde(alias = "totalKills")]
    pub total_kills: u64,
    pub runs: u32,
    #[serde(alias = "unlockedBows")]
    pub unlocked_weapons: Vec<String>,
    #[serde(alias = "unlockedPerks")]
    pub unlocked_perks: Vec<String>,
}

impl Default for Profile {
    fn default() -> Self {
        Self {
            version: PROFILE_VERSION,
            best_score: 0.0,
            total_kills: 0,
            runs: 0,
            unlocked_weapons: Weapon::ALL.iter().map(|w| w.id().to_string()).collect(),
            unlocked_perks: Perk::ALL.iter().map(|p| p.id().to_string()).collect(),
        }
    }
}

impl Profile {
    /// Storage key
    pub const STORAGE_KEY: &'static str = "archer_evo_v1";

    /// Fold a finished run into the profile
    pub fn record_run(&mut self, score: f32, kills: u32) {
        self.best_score = self.best_score.max(score as f64);
        self.total_kills += kills as u64;
        self.runs += 1;
    }

    pub fn has_weapon(&self, weapon: Weapon) -> bool {
        self.unlocked_weapons.iter().any(|id| id == weapon.id())
    }

    pub fn has_perk(&self, perk: Perk) -> bool {
        self.unlocked_perks.iter().any(|id| id == perk.id())
    }

    /// Load from a store, reinitializing on any problem
    pub fn load(store: &dyn Store) -> Self {
        let profile: Profile = load_json_or_default(store, Self::STORAGE_KEY);
        if profile.version != PROFILE_VERSION {
            log::warn!(
                "Profile version {} unsupported, starting fresh",
                profile.version
            );
            return Self::default();
        }
        log::info!(
            "Profile loaded: best {:.0}, {} runs",
            profile.best_score,
            profile.runs
        );
        profile
    }

    pub fn save(&self, store: &mut dyn Store) {
        match save_json(store, Self::STORAGE_KEY, self) {
            Ok(()) => log::info!("Profile saved ({} runs)", self.runs),
            Err(e) => log::warn!("Profile not saved: {e}"),
        }
    }
}

/// Profile bound to its store
#[derive(Debug)]
pub struct Meta<S: Store> {
    store: S,
    pub profile: Profile,
}

impl<S: Store> Meta<S> {
    pub fn new(store: S) -> Self {
        let profile = Profile::load(&store);
        Self { store, profile }
    }

    /// Record a finished run and persist immediately
    pub fn record_run(&mut self, score: f32, kills: u32) {
        self.profile.record_run(score, kills);
        self.profile.save(&mut self.store);
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }
}
