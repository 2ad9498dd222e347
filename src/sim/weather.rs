//! Wind, storm intensity and lightning hazards
//!
//! Wind relaxes toward a target that is occasionally re-drawn. Storm level
//! follows the run score with a slow lag and gates the lightning cycle:
//!
//! ```text
//! idle countdown --0--> WARNING --warning_secs--> STRIKE --strike_secs--> idle (re-armed)
//! ```
//!
//! Dropping to or below the storm threshold clears any hazard on the spot.

use rand::Rng;
use rand_pcg::Pcg32;

use crate::tuning::{PlayfieldTuning, WeatherTuning};

/// Lightning stage
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HazardStage {
    /// Telegraphed band, harmless
    Warning,
    /// Destroys birds and burns the player inside the band
    Strike,
}

/// A lightning event
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hazard {
    /// Band center (px)
    pub x: f32,
    pub half_width: f32,
    pub stage: HazardStage,
    /// Seconds left in the current stage
    pub timer: f32,
}

impl Hazard {
    /// Horizontal band `(lo, hi)`
    pub fn band(&self) -> (f32, f32) {
        (self.x - self.half_width, self.x + self.half_width)
    }

    pub fn is_striking(&self) -> bool {
        self.stage == HazardStage::Strike
    }
}

/// Cosmetic rain/debris streak
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AmbientParticle {
    pub x: f32,
    pub y: f32,
    pub vx: f32,
    pub vy: f32,
    pub life: f32,
    pub size: f32,
}

/// Weather process for one run
#[derive(Debug, Clone)]
pub struct Weather {
    pub wind: f32,
    pub target_wind: f32,
    /// 0..1, lags behind `score / storm_score_scale`
    pub storm_level: f32,
    /// Idle countdown until the next hazard
    pub lightning_timer: f32,
    pub hazard: Option<Hazard>,
    pub particles: Vec<AmbientParticle>,
    /// Extra ambient density from the quality preset
    pub density: f32,
    tuning: WeatherTuning,
    field_width: f32,
}

impl Weather {
    pub fn new(tuning: &WeatherTuning, playfield: &PlayfieldTuning, rng: &mut Pcg32) -> Self {
        let wind = (rng.random::<f32>() - 0.5) * tuning.initial_wind_range;
        Self {
            wind,
            target_wind: wind,
            storm_level: 0.0,
            lightning_timer: tuning.first_strike_delay,
            hazard: None,
            particles: Vec::new(),
            density: 1.0,
            tuning: tuning.clone(),
            field_width: playfield.width,
        }
    }

    /// Active strike, if any
    pub fn strike(&self) -> Option<&Hazard> {
        self.hazard.as_ref().filter(|h| h.is_striking())
    }

    /// Advance weather by `dt` world seconds
    pub fn advance(&mut self, dt: f32, score: f32, wind_mult: f32, rng: &mut Pcg32) {
        let t = &self.tuning;

        // Wind
        if rng.random::<f32>() < t.gust_chance {
            self.target_wind = (rng.random::<f32>() - 0.5) * t.gust_range;
        }
        self.wind += (self.target_wind - self.wind) * (dt * t.wind_relax).min(1.0);

        // Storm
        let target_storm = (score / t.storm_score_scale).clamp(0.0, 1.0);
        self.storm_level += (target_storm - self.storm_level) * (dt * t.storm_relax).min(1.0);
        self.storm_level = self.storm_level.clamp(0.0, 1.0);

        // Lightning
        if self.storm_level > t.storm_threshold {
            match self.hazard.as_mut() {
                None => {
                    self.lightning_timer -= dt;
                    if self.lightning_timer <= 0.0 {
                        let hazard = Hazard {
                            x: rng.random::<f32>() * self.field_width,
                            half_width: t.hazard_width / 2.0,
                            stage: HazardStage::Warning,
                            timer: t.warning_secs,
                        };
                        log::debug!("Lightning warning at x={:.0}", hazard.x);
                        self.hazard = Some(hazard);
                    }
                }
                Some(hazard) => {
                    hazard.timer -= dt;
                    if hazard.timer <= 0.0 {
                        match hazard.stage {
                            HazardStage::Warning => {
                                hazard.stage = HazardStage::Strike;
                                hazard.timer = t.strike_secs;
                                log::debug!("Lightning strike at x={:.0}", hazard.x);
                            }
                            HazardStage::Strike => {
                                self.hazard = None;
                                self.lightning_timer =
                                    t.rearm_min + rng.random::<f32>() * t.rearm_spread;
                            }
                        }
                    }
                }
            }
        } else {
            self.hazard = None;
        }

        // Ambient particles
        let target_count =
            (t.ambient_base + self.storm_level * t.ambient_per_storm) * wind_mult * self.density;
        if (self.particles.len() as f32) < target_count {
            self.particles.push(AmbientParticle {
                x: rng.random::<f32>() * (self.field_width + 1000.0) - 500.0,
                y: -rng.random::<f32>() * 100.0,
                vx: 0.0,
                vy: 20.0 + rng.random::<f32>() * 40.0,
                life: 2.0 + rng.random::<f32>() * 3.0,
                size: 1.0 + rng.random::<f32>() * 2.0,
            });
        }

        let drift = self.wind * 2.0 * wind_mult;
        for p in self.particles.iter_mut() {
            p.x += (p.vx + drift) * dt;
            p.y += p.vy * dt;
            p.life -= dt;
        }
        self.particles.retain(|p| p.life > 0.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tuning::Tuning;
    use proptest::prelude::*;
    use rand::SeedableRng;

    fn calm_tuning() -> Tuning {
        let mut tuning = Tuning::default();
        tuning.weather.gust_chance = 0.0;
        tuning
    }

    fn weather(tuning: &Tuning, seed: u64) -> (Weather, Pcg32) {
        let mut rng = Pcg32::seed_from_u64(seed);
        let w = Weather::new(&tuning.weather, &tuning.playfield, &mut rng);
        (w, rng)
    }

    #[test]
    fn test_zero_dt_is_idempotent() {
        let tuning = calm_tuning();
        let (mut w, mut rng) = weather(&tuning, 1);
        w.storm_level = 0.7;
        w.hazard = Some(Hazard {
            x: 100.0,
            half_width: 30.0,
            stage: HazardStage::Warning,
            timer: 1.0,
        });
        let (wind, storm, hazard) = (w.wind, w.storm_level, w.hazard);
        for _ in 0..100 {
            w.advance(0.0, 5000.0, 1.0, &mut rng);
        }
        assert_eq!(w.wind, wind);
        assert_eq!(w.storm_level, storm);
        assert_eq!(w.hazard, hazard);
    }

    #[test]
    fn test_wind_relaxes_toward_target() {
        let tuning = calm_tuning();
        let (mut w, mut rng) = weather(&tuning, 2);
        w.wind = 0.0;
        w.target_wind = 60.0;
        w.advance(0.05, 0.0, 1.0, &mut rng);
        // 60 * 0.05 * 0.5
        assert!((w.wind - 1.5).abs() < 1e-4);
    }

    #[test]
    fn test_storm_lags_score() {
        let tuning = calm_tuning();
        let (mut w, mut rng) = weather(&tuning, 3);
        w.advance(0.05, 800.0, 1.0, &mut rng);
        assert!(w.storm_level > 0.0 && w.storm_level < 0.01);
        for _ in 0..100_000 {
            w.advance(0.05, 800.0, 1.0, &mut rng);
        }
        assert!(w.storm_level > 0.99 && w.storm_level <= 1.0);
    }

    #[test]
    fn test_full_hazard_cycle() {
        let tuning = calm_tuning();
        let (mut w, mut rng) = weather(&tuning, 4);
        w.storm_level = 1.0;
        w.lightning_timer = 0.1;
        let dt = 0.05;

        // Count down to the warning
        w.advance(dt, 1_000_000.0, 1.0, &mut rng);
        assert!(w.hazard.is_none());
        w.advance(dt, 1_000_000.0, 1.0, &mut rng);
        let hazard = w.hazard.expect("warning should spawn");
        assert_eq!(hazard.stage, HazardStage::Warning);
        assert_eq!(hazard.half_width, 30.0);
        assert!(hazard.x >= 0.0 && hazard.x < 640.0);

        // Warning lasts the full 2 seconds
        let mut warning_time = 0.0;
        while w.hazard.map(|h| h.stage) == Some(HazardStage::Warning) {
            w.advance(dt, 1_000_000.0, 1.0, &mut rng);
            warning_time += dt;
        }
        assert!(warning_time >= 2.0 - 1e-3, "warning lasted {warning_time}");
        assert!(w.strike().is_some());

        // Strike clears and re-arms
        while w.hazard.is_some() {
            w.advance(dt, 1_000_000.0, 1.0, &mut rng);
        }
        assert!(w.lightning_timer >= 8.0 && w.lightning_timer < 18.0);
    }

    #[test]
    fn test_calm_storm_clears_hazard() {
        let tuning = calm_tuning();
        let (mut w, mut rng) = weather(&tuning, 5);
        w.storm_level = 0.3;
        w.hazard = Some(Hazard {
            x: 10.0,
            half_width: 30.0,
            stage: HazardStage::Strike,
            timer: 0.3,
        });
        w.advance(0.016, 0.0, 1.0, &mut rng);
        assert!(w.hazard.is_none());
    }

    #[test]
    fn test_ambient_particles_spawn_and_expire() {
        let tuning = calm_tuning();
        let (mut w, mut rng) = weather(&tuning, 6);
        for _ in 0..10 {
            w.advance(0.016, 0.0, 1.0, &mut rng);
        }
        assert_eq!(w.particles.len(), 10);
        assert!(w.particles.iter().all(|p| p.vy > 0.0));
        // Everything dies within 5s if no more are added
        w.density = 0.0;
        for _ in 0..120 {
            w.advance(0.05, 0.0, 1.0, &mut rng);
        }
        assert!(w.particles.is_empty());
    }

    proptest! {
        #[test]
        fn prop_storm_stays_in_unit_range(
            seed in 0u64..1000,
            steps in prop::collection::vec((0.0f32..5.0, -2000.0f32..5000.0), 1..200),
        ) {
            let tuning = Tuning::default();
            let (mut w, mut rng) = weather(&tuning, seed);
            for (dt, score) in steps {
                w.advance(dt, score, 1.0, &mut rng);
                prop_assert!((0.0..=1.0).contains(&w.storm_level));
            }
        }

        #[test]
        fn prop_storm_non_decreasing_for_rising_score(
            increments in prop::collection::vec(0.0f32..50.0, 1..200),
        ) {
            let tuning = calm_tuning();
            let (mut w, mut rng) = weather(&tuning, 7);
            let mut score = 0.0;
            let mut last = w.storm_level;
            for inc in increments {
                score += inc;
                w.advance(0.016, score, 1.0, &mut rng);
                prop_assert!(w.storm_level >= last - 1e-6);
                last = w.storm_level;
            }
        }
    }
}
