//! Bird and crate spawning

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;

use super::catalog::TargetKind;
use super::state::{PickupBox, Target};
use crate::tuning::{PlayfieldTuning, SpawnTuning};

/// Per-frame spawn roll: `r * 1000 < dt * base_rate * rate_mult`
pub fn should_spawn_target(rng: &mut Pcg32, dt: f32, base_rate: f32, rate_mult: f32) -> bool {
    rng.random::<f32>() * 1000.0 < dt * base_rate * rate_mult
}

/// Walk the weight table with a uniform draw in [0, 1)
///
/// Falls back to the common kind if rounding leaves `r` past the last bucket.
pub fn pick_kind(r: f32) -> TargetKind {
    let mut acc = 0.0;
    for kind in TargetKind::ALL {
        acc += kind.probability();
        if r < acc {
            return kind;
        }
    }
    TargetKind::Common
}

/// Spawn a bird at a random side edge, flying toward the opposite one
pub fn spawn_target(rng: &mut Pcg32, tuning: &SpawnTuning, field: &PlayfieldTuning) -> Target {
    let kind = pick_kind(rng.random::<f32>());
    let y = rng.random::<f32>() * (field.height * tuning.band) + tuning.top_offset;
    let from_left = rng.random::<f32>() < 0.5;
    let x = if from_left {
        -tuning.edge_offset
    } else {
        field.width + tuning.edge_offset
    };
    let speed = tuning.min_speed + rng.random::<f32>() * tuning.speed_spread;
    let vx = if from_left { speed } else { -speed };
    Target::new(kind, Vec2::new(x, y), Vec2::new(vx, 0.0))
}

/// Spawn a crate at the left edge drifting right
pub fn spawn_box(rng: &mut Pcg32, tuning: &SpawnTuning, field: &PlayfieldTuning) -> PickupBox {
    let is_mimic = rng.random::<f32>() < tuning.mimic_chance;
    let y = rng.random::<f32>() * (field.height * tuning.box_band) + tuning.box_top_offset;
    PickupBox::new(Vec2::new(-tuning.edge_offset, y), tuning.box_speed, is_mimic)
}

/// Crate timer: accumulate, and once past the interval roll once and restart
///
/// Returns true when a crate should spawn this frame.
pub fn tick_box_timer(timer: &mut f32, rng: &mut Pcg32, dt: f32, tuning: &SpawnTuning) -> bool {
    *timer += dt;
    if *timer > tuning.box_interval {
        *timer = 0.0;
        return rng.random::<f32>() < tuning.box_chance;
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    #[test]
    fn test_pick_kind_boundaries() {
        assert_eq!(pick_kind(0.0), TargetKind::Common);
        assert_eq!(pick_kind(0.699), TargetKind::Common);
        assert_eq!(pick_kind(0.70), TargetKind::Weaver);
        assert_eq!(pick_kind(0.849), TargetKind::Weaver);
        assert_eq!(pick_kind(0.86), TargetKind::Diver);
        assert_eq!(pick_kind(0.94), TargetKind::Forbidden);
        assert_eq!(pick_kind(0.999_999), TargetKind::Forbidden);
        assert_eq!(pick_kind(1.5), TargetKind::Common);
    }

    #[test]
    fn test_kind_distribution() {
        let mut rng = Pcg32::seed_from_u64(2024);
        let n = 100_000;
        let mut counts = [0u32; 4];
        for _ in 0..n {
            let kind = pick_kind(rng.random::<f32>());
            let idx = TargetKind::ALL.iter().position(|k| *k == kind).unwrap();
            counts[idx] += 1;
        }
        for (kind, count) in TargetKind::ALL.iter().zip(counts) {
            let frac = count as f32 / n as f32;
            assert!(
                (frac - kind.probability()).abs() < 0.01,
                "{kind:?}: {frac}"
            );
        }
    }

    #[test]
    fn test_spawned_target_heads_inward() {
        let mut rng = Pcg32::seed_from_u64(11);
        let tuning = SpawnTuning::default();
        let field = PlayfieldTuning::default();
        for _ in 0..500 {
            let t = spawn_target(&mut rng, &tuning, &field);
            if t.pos.x < 0.0 {
                assert_eq!(t.pos.x, -50.0);
                assert!(t.vel.x >= 100.0 && t.vel.x < 200.0);
            } else {
                assert_eq!(t.pos.x, 690.0);
                assert!(t.vel.x <= -100.0 && t.vel.x > -200.0);
            }
            assert!(t.pos.y >= 50.0 && t.pos.y < 50.0 + 480.0);
            assert!(!t.diving);
        }
    }

    #[test]
    fn test_spawn_rate_roll() {
        let mut rng = Pcg32::seed_from_u64(5);
        // dt * 1400 >= 1000 always spawns
        assert!((0..100).all(|_| should_spawn_target(&mut rng, 1.0, 1400.0, 1.0)));
        assert!((0..100).all(|_| !should_spawn_target(&mut rng, 0.0, 1400.0, 1.0)));
    }

    #[test]
    fn test_box_timer_resets_without_spawn() {
        let mut rng = Pcg32::seed_from_u64(5);
        let mut tuning = SpawnTuning::default();
        tuning.box_chance = 0.0;
        let mut timer = 14.99;
        assert!(!tick_box_timer(&mut timer, &mut rng, 0.05, &tuning));
        assert_eq!(timer, 0.0);

        tuning.box_chance = 1.0;
        let mut timer = 15.0;
        assert!(tick_box_timer(&mut timer, &mut rng, 0.01, &tuning));
        assert_eq!(timer, 0.0);
    }

    #[test]
    fn test_box_spawns_left_moving_right() {
        let mut rng = Pcg32::seed_from_u64(8);
        let b = spawn_box(&mut rng, &SpawnTuning::default(), &PlayfieldTuning::default());
        assert_eq!(b.pos.x, -50.0);
        assert_eq!(b.vx, 120.0);
        assert!(b.pos.y >= 60.0 && b.pos.y < 60.0 + 384.0);
    }
}
