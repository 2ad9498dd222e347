//! Data-driven game balance
//!
//! Every gameplay constant that a designer might want to tweak lives here.
//! Groups deserialize independently, so a JSON override only needs the
//! fields it changes.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Why a tuning override was refused
#[derive(Debug, Error)]
pub enum TuningError {
    #[error("tuning is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("tuning field `{field}` {requirement} (got {value})")]
    OutOfRange {
        field: &'static str,
        requirement: &'static str,
        value: f32,
    },
}

// NaN fails every comparison below, so it is rejected too
fn positive(field: &'static str, value: f32) -> Result<(), TuningError> {
    if value > 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(TuningError::OutOfRange {
            field,
            requirement: "must be positive",
            value,
        })
    }
}

fn non_negative(field: &'static str, value: f32) -> Result<(), TuningError> {
    if value >= 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(TuningError::OutOfRange {
            field,
            requirement: "must not be negative",
            value,
        })
    }
}

fn unit(field: &'static str, value: f32) -> Result<(), TuningError> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(TuningError::OutOfRange {
            field,
            requirement: "must be within [0, 1]",
            value,
        })
    }
}

/// Logical playfield and culling margins
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayfieldTuning {
    /// Logical width in px (independent of display resolution)
    pub width: f32,
    /// Logical height in px
    pub height: f32,
    /// How far past a side edge a bird, arrow or crate may travel before culling
    pub side_margin: f32,
    /// How far above the top edge an arrow may travel before culling
    pub top_margin: f32,
}

impl Default for PlayfieldTuning {
    fn default() -> Self {
        Self {
            width: 640.0,
            height: 960.0,
            side_margin: 100.0,
            top_margin: 50.0,
        }
    }
}

/// Wind, storm and lightning
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WeatherTuning {
    /// Per-frame chance of picking a new target wind
    pub gust_chance: f32,
    /// Target wind is drawn from (-range/2, range/2)
    pub gust_range: f32,
    /// Starting wind is drawn from (-range/2, range/2)
    pub initial_wind_range: f32,
    /// Wind relaxation rate toward the target (1/s)
    pub wind_relax: f32,
    /// Storm relaxation rate toward the score-derived level (1/s)
    pub storm_relax: f32,
    /// Score at which the storm target saturates at 1.0
    pub storm_score_scale: f32,
    /// Lightning only happens above this storm level
    pub storm_threshold: f32,
    /// Countdown before the first strike of a run (s)
    pub first_strike_delay: f32,
    /// Full width of the lightning band (px)
    pub hazard_width: f32,
    pub warning_secs: f32,
    pub strike_secs: f32,
    /// Re-arm interval is `rearm_min + U[0, rearm_spread)`
    pub rearm_min: f32,
    pub rearm_spread: f32,
    /// Ambient particle target count is `(base + storm * per_storm) * multiplier`
    pub ambient_base: f32,
    pub ambient_per_storm: f32,
    /// Continuous damage to the player inside a strike (lives/s, real time)
    pub lightning_damage: f32,
}

impl Default for WeatherTuning {
    fn default() -> Self {
        Self {
            gust_chance: 0.02,
            gust_range: 150.0,
            initial_wind_range: 50.0,
            wind_relax: 0.5,
            storm_relax: 0.1,
            storm_score_scale: 800.0,
            storm_threshold: 0.45,
            first_strike_delay: 10.0,
            hazard_width: 60.0,
            warning_secs: 2.0,
            strike_secs: 0.4,
            rearm_min: 8.0,
            rearm_spread: 10.0,
            ambient_base: 20.0,
            ambient_per_storm: 50.0,
            lightning_damage: 10.0,
        }
    }
}

/// Bird and crate spawning
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SpawnTuning {
    /// Birds per 1000 s of world time at 1x spawn rate (per-frame test `r*1000 < dt*rate`)
    pub base_rate: f32,
    /// Birds spawn this far outside the side edges
    pub edge_offset: f32,
    /// Spawn height is `top_offset + U[0, height * band)`
    pub top_offset: f32,
    pub band: f32,
    /// Horizontal speed is `min_speed + U[0, speed_spread)`
    pub min_speed: f32,
    pub speed_spread: f32,
    /// Seconds between crate rolls
    pub box_interval: f32,
    pub box_chance: f32,
    pub mimic_chance: f32,
    pub box_speed: f32,
    pub box_top_offset: f32,
    pub box_band: f32,
}

impl Default for SpawnTuning {
    fn default() -> Self {
        Self {
            base_rate: 1400.0,
            edge_offset: 50.0,
            top_offset: 50.0,
            band: 0.5,
            min_speed: 100.0,
            speed_spread: 100.0,
            box_interval: 15.0,
            box_chance: 0.2,
            mimic_chance: 0.35,
            box_speed: 120.0,
            box_top_offset: 60.0,
            box_band: 0.4,
        }
    }
}

/// Lives, combo and pickups
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CombatTuning {
    pub starting_lives: f32,
    /// Healing never raises lives above this
    pub max_lives: f32,
    /// Arrow bounds are inflated by this on every side when testing birds
    pub hit_padding: f32,
    /// Seconds a streak survives without a qualifying hit
    pub combo_window: f32,
    /// Hits per multiplier step
    pub streak_per_step: u32,
    pub max_multiplier: u32,
    /// Slow motion granted by the Time Thief perk
    pub slow_mo_secs: f32,
    pub slow_mo_scale: f32,
    pub crate_heal: f32,
    pub mimic_damage: f32,
    /// Diving birds latch when within this distance of the center line...
    pub dive_band: f32,
    /// ...and above this height
    pub dive_ceiling: f32,
    pub dive_speed: f32,
    /// Vertical weave speed (px/s at peak)
    pub weave_speed: f32,
}

impl Default for CombatTuning {
    fn default() -> Self {
        Self {
            starting_lives: 20.0,
            max_lives: 20.0,
            hit_padding: 15.0,
            combo_window: 2.5,
            streak_per_step: 5,
            max_multiplier: 5,
            slow_mo_secs: 1.0,
            slow_mo_scale: 0.3,
            crate_heal: 5.0,
            mimic_damage: 3.0,
            dive_band: 100.0,
            dive_ceiling: 150.0,
            dive_speed: 200.0,
            weave_speed: 120.0,
        }
    }
}

/// Arrow flight
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ArrowTuning {
    /// Upward launch speed (px/s), doubled by Deadeye
    pub launch_speed: f32,
    /// Horizontal speed of the two side arrows in a volley
    pub spread: f32,
    /// Upward speed after an anchored arrow is released
    pub relaunch_speed: f32,
    /// Released arrows get a horizontal kick in (-kick/2, kick/2)
    pub relaunch_kick: f32,
    /// Damage before the weapon's power multiplier
    pub base_damage: f32,
    /// Arrows can only anchor above `height * anchor_height`
    pub anchor_height: f32,
}

impl Default for ArrowTuning {
    fn default() -> Self {
        Self {
            launch_speed: 600.0,
            spread: 100.0,
            relaunch_speed: 900.0,
            relaunch_kick: 80.0,
            base_damage: 10.0,
            anchor_height: 0.6,
        }
    }
}

/// Complete balance sheet
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    pub playfield: PlayfieldTuning,
    pub weather: WeatherTuning,
    pub spawn: SpawnTuning,
    pub combat: CombatTuning,
    pub arrows: ArrowTuning,
}

impl Tuning {
    /// Parse a (possibly partial) JSON override on top of the defaults.
    /// Overrides that would break the simulation are refused.
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Check every value the simulation divides by, rolls against or
    /// counts down from
    pub fn validate(&self) -> Result<(), TuningError> {
        let p = &self.playfield;
        positive("playfield.width", p.width)?;
        positive("playfield.height", p.height)?;
        non_negative("playfield.side_margin", p.side_margin)?;
        non_negative("playfield.top_margin", p.top_margin)?;

        let w = &self.weather;
        unit("weather.gust_chance", w.gust_chance)?;
        non_negative("weather.gust_range", w.gust_range)?;
        non_negative("weather.initial_wind_range", w.initial_wind_range)?;
        non_negative("weather.wind_relax", w.wind_relax)?;
        non_negative("weather.storm_relax", w.storm_relax)?;
        positive("weather.storm_score_scale", w.storm_score_scale)?;
        unit("weather.storm_threshold", w.storm_threshold)?;
        non_negative("weather.first_strike_delay", w.first_strike_delay)?;
        positive("weather.hazard_width", w.hazard_width)?;
        positive("weather.warning_secs", w.warning_secs)?;
        positive("weather.strike_secs", w.strike_secs)?;
        positive("weather.rearm_min", w.rearm_min)?;
        non_negative("weather.rearm_spread", w.rearm_spread)?;
        non_negative("weather.ambient_base", w.ambient_base)?;
        non_negative("weather.ambient_per_storm", w.ambient_per_storm)?;
        non_negative("weather.lightning_damage", w.lightning_damage)?;

        let sp = &self.spawn;
        non_negative("spawn.base_rate", sp.base_rate)?;
        unit("spawn.band", sp.band)?;
        non_negative("spawn.min_speed", sp.min_speed)?;
        non_negative("spawn.speed_spread", sp.speed_spread)?;
        positive("spawn.box_interval", sp.box_interval)?;
        unit("spawn.box_chance", sp.box_chance)?;
        unit("spawn.mimic_chance", sp.mimic_chance)?;
        unit("spawn.box_band", sp.box_band)?;

        let c = &self.combat;
        positive("combat.starting_lives", c.starting_lives)?;
        positive("combat.max_lives", c.max_lives)?;
        if c.starting_lives > c.max_lives {
            return Err(TuningError::OutOfRange {
                field: "combat.starting_lives",
                requirement: "must not exceed combat.max_lives",
                value: c.starting_lives,
            });
        }
        non_negative("combat.hit_padding", c.hit_padding)?;
        positive("combat.combo_window", c.combo_window)?;
        positive("combat.streak_per_step", c.streak_per_step as f32)?;
        positive("combat.max_multiplier", c.max_multiplier as f32)?;
        non_negative("combat.slow_mo_secs", c.slow_mo_secs)?;
        positive("combat.slow_mo_scale", c.slow_mo_scale)?;
        unit("combat.slow_mo_scale", c.slow_mo_scale)?;
        non_negative("combat.crate_heal", c.crate_heal)?;
        non_negative("combat.mimic_damage", c.mimic_damage)?;

        let a = &self.arrows;
        positive("arrows.launch_speed", a.launch_speed)?;
        positive("arrows.relaunch_speed", a.relaunch_speed)?;
        non_negative("arrows.spread", a.spread)?;
        non_negative("arrows.relaunch_kick", a.relaunch_kick)?;
        non_negative("arrows.base_damage", a.base_damage)?;
        unit("arrows.anchor_height", a.anchor_height)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_override_keeps_defaults() {
        let tuning = Tuning::from_json(r#"{"weather":{"gust_chance":0.0},"spawn":{"base_rate":0}}"#)
            .expect("valid json");
        assert_eq!(tuning.weather.gust_chance, 0.0);
        assert_eq!(tuning.weather.storm_threshold, 0.45);
        assert_eq!(tuning.spawn.base_rate, 0.0);
        assert_eq!(tuning.combat.max_lives, 20.0);
        assert_eq!(tuning.playfield.width, 640.0);
    }

    #[test]
    fn test_empty_object_is_default() {
        let tuning = Tuning::from_json("{}").expect("valid json");
        assert_eq!(tuning.arrows.launch_speed, 600.0);
        assert_eq!(tuning.combat.combo_window, 2.5);
    }

    #[test]
    fn test_garbage_is_rejected() {
        assert!(matches!(
            Tuning::from_json("not json"),
            Err(TuningError::Parse(_))
        ));
    }

    #[test]
    fn test_defaults_are_valid() {
        assert!(Tuning::default().validate().is_ok());
    }

    fn rejected_field(json: &str) -> &'static str {
        match Tuning::from_json(json) {
            Err(TuningError::OutOfRange { field, .. }) => field,
            other => panic!("expected a range error for {json}, got {other:?}"),
        }
    }

    #[test]
    fn test_zero_storm_scale_rejected() {
        assert_eq!(
            rejected_field(r#"{"weather":{"storm_score_scale":0}}"#),
            "weather.storm_score_scale"
        );
    }

    #[test]
    fn test_non_positive_rearm_rejected() {
        assert_eq!(
            rejected_field(r#"{"weather":{"rearm_min":-5,"rearm_spread":0}}"#),
            "weather.rearm_min"
        );
        assert_eq!(
            rejected_field(r#"{"weather":{"rearm_min":0,"rearm_spread":0}}"#),
            "weather.rearm_min"
        );
        assert_eq!(
            rejected_field(r#"{"weather":{"rearm_spread":-1}}"#),
            "weather.rearm_spread"
        );
    }

    #[test]
    fn test_probabilities_rejected_outside_unit_range() {
        assert_eq!(
            rejected_field(r#"{"weather":{"gust_chance":1.5}}"#),
            "weather.gust_chance"
        );
        assert_eq!(
            rejected_field(r#"{"spawn":{"box_chance":-0.1}}"#),
            "spawn.box_chance"
        );
        assert_eq!(
            rejected_field(r#"{"spawn":{"mimic_chance":2}}"#),
            "spawn.mimic_chance"
        );
    }

    #[test]
    fn test_slow_mo_scale_rejected() {
        assert_eq!(
            rejected_field(r#"{"combat":{"slow_mo_scale":0}}"#),
            "combat.slow_mo_scale"
        );
        assert_eq!(
            rejected_field(r#"{"combat":{"slow_mo_scale":3}}"#),
            "combat.slow_mo_scale"
        );
    }

    #[test]
    fn test_lives_and_steps_rejected() {
        assert_eq!(
            rejected_field(r#"{"combat":{"starting_lives":30}}"#),
            "combat.starting_lives"
        );
        assert_eq!(
            rejected_field(r#"{"combat":{"streak_per_step":0}}"#),
            "combat.streak_per_step"
        );
        assert_eq!(
            rejected_field(r#"{"playfield":{"width":0}}"#),
            "playfield.width"
        );
    }

    #[test]
    fn test_valid_tuning_keeps_storm_bounded() {
        use crate::sim::{GameState, Loadout, Modifiers, TickInput, tick};

        let tuning = Tuning::from_json(r#"{"weather":{"storm_score_scale":1,"rearm_min":0.5}}"#)
            .expect("valid override");
        let mut state = GameState::new(5, tuning);
        state.start_run(Loadout::default(), Modifiers::default());
        for _ in 0..200 {
            tick(&mut state, &TickInput::default(), 0.05);
            assert!((0.0..=1.0).contains(&state.weather.storm_level));
        }
    }
}
