//! Per-frame simulation tick
//!
//! Stage order: slow motion, combo decay, weather, lightning, player, firing,
//! arrows, spawning, birds, crates, effects. Each pool is compacted once per
//! stage; survivors keep their relative order.

use glam::Vec2;
use rand::Rng;

use super::catalog::{Perk, TargetAi};
use super::collision::first_hit;
use super::spawn;
use super::state::{GameEvent, GameState, Mode, Projectile, ProjectileState};
use crate::consts::*;

const PENALTY_COLOR: u32 = 0xFF0000;
const LIGHTNING_COLOR: u32 = 0xFFFFFF;
const EXPLOSION_COLOR: u32 = 0xFF5500;
const MIMIC_COLOR: u32 = 0xD32F2F;
const HEAL_COLOR: u32 = 0xFFD700;
const LABEL_COLOR: u32 = 0xFFD166;

/// Input flags sampled at the start of a tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    pub left: bool,
    pub right: bool,
    pub shoot: bool,
    /// Hold to suspend arrows (anchor-capable bows only)
    pub anchor: bool,
}

/// Advance the game by one frame of `dt` real seconds
///
/// `dt` is clamped to `MAX_FRAME_DT`. Does nothing outside `Mode::Game`.
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) {
    if state.mode != Mode::Game {
        return;
    }
    let dt = dt.clamp(0.0, MAX_FRAME_DT);
    // Lives may have been drained outside the tick
    if state.check_lives() {
        return;
    }

    // Decay screen shake
    state.fx.shake *= 0.9;
    if state.fx.shake < 0.5 {
        state.fx.shake = 0.0;
    }

    // Slow motion
    if state.run.slow_mo_timer > 0.0 {
        state.run.slow_mo_timer -= dt;
        state.run.time_scale = state.tuning.combat.slow_mo_scale;
    } else {
        state.run.time_scale = 1.0;
    }
    let world_dt = dt * state.run.time_scale;
    state.run.time += world_dt;

    state.combo.decay(world_dt);

    let mods = state.run.modifiers;
    state
        .weather
        .advance(world_dt, state.run.score, mods.wind_mult, &mut state.rng);

    if apply_lightning(state, dt) {
        return;
    }

    move_player(state, input, dt);

    state.player.cooldown -= dt * 1000.0;
    if input.shoot && state.player.cooldown <= 0.0 {
        fire(state);
        state.player.cooldown = state.player.max_cooldown;
    }

    advance_projectiles(state, input, world_dt);

    // Spawning
    if spawn::should_spawn_target(
        &mut state.rng,
        world_dt,
        state.tuning.spawn.base_rate,
        mods.spawn_rate_mult,
    ) {
        let target = spawn::spawn_target(&mut state.rng, &state.tuning.spawn, &state.tuning.playfield);
        state.targets.push(target);
    }
    if spawn::tick_box_timer(
        &mut state.run.box_spawn_timer,
        &mut state.rng,
        world_dt,
        &state.tuning.spawn,
    ) {
        let b = spawn::spawn_box(&mut state.rng, &state.tuning.spawn, &state.tuning.playfield);
        log::debug!("Crate spawned (mimic: {})", b.is_mimic);
        state.boxes.push(b);
    }

    if advance_targets(state, world_dt) {
        return;
    }
    if advance_boxes(state, world_dt) {
        return;
    }

    advance_effects(state, dt, world_dt);
}

/// Strike stage: destroys birds in the band and burns the player.
/// Returns true if the run ended.
fn apply_lightning(state: &mut GameState, dt: f32) -> bool {
    let Some((lo, hi)) = state.weather.strike().map(|h| h.band()) else {
        return false;
    };

    let fx = &mut state.fx;
    let rng = &mut state.rng;
    state.targets.retain(|t| {
        let bounds = t.bounds();
        if bounds.overlaps_band(lo, hi) {
            fx.burst(rng, bounds.center(), LIGHTNING_COLOR, 15);
            false
        } else {
            true
        }
    });

    if state.player.bounds().overlaps_band(lo, hi) {
        // Real time: slow motion doesn't shield the player
        let damage = state.tuning.weather.lightning_damage * dt;
        state.run.lives -= damage;
        let pos = state.player.pos + Vec2::splat(20.0);
        state.fx.burst(&mut state.rng, pos, PENALTY_COLOR, 2);
        state.events.push(GameEvent::PlayerStruck { damage });
        return state.check_lives();
    }
    false
}

fn move_player(state: &mut GameState, input: &TickInput, dt: f32) {
    let player = &mut state.player;
    if input.left {
        player.pos.x -= player.speed * dt;
    }
    if input.right {
        player.pos.x += player.speed * dt;
    }
    let right_limit = state.tuning.playfield.width - PLAYER_RIGHT_MARGIN;
    player.pos.x = player.pos.x.min(right_limit).max(PLAYER_MIN_X);
}

/// Loose a volley from the bow
///
/// One center arrow, plus two spread arrows unless the bow anchors (which
/// needs a single precise shot).
pub fn fire(state: &mut GameState) {
    let arrows = &state.tuning.arrows;
    let loadout = state.run.loadout;
    let mut vy = -arrows.launch_speed;
    if loadout.perk == Perk::DoubleArrowSpeed {
        vy *= 2.0;
    }
    let origin = Vec2::new(state.player.pos.x + BOW_OFFSET_X, state.player.pos.y);
    let damage = arrows.base_damage * loadout.weapon.power();

    let offsets: &[f32] = if loadout.weapon.can_anchor() {
        &[0.0]
    } else {
        &[0.0, -1.0, 1.0]
    };
    let spread = arrows.spread;
    for &dir in offsets {
        state
            .projectiles
            .push(Projectile::new(origin, Vec2::new(dir * spread, vy), damage));
    }

    state.fx.shake(2.0);
    state.events.push(GameEvent::Fired {
        arrows: offsets.len(),
    });
}

fn advance_projectiles(state: &mut GameState, input: &TickInput, world_dt: f32) {
    let field = &state.tuning.playfield;
    let arrows = &state.tuning.arrows;
    let mods = state.run.modifiers;
    let loadout = state.run.loadout;

    let drift = if loadout.perk == Perk::WindImmune {
        0.0
    } else {
        state.weather.wind * mods.wind_mult
    };
    let can_anchor = input.anchor && loadout.weapon.can_anchor();
    let anchor_ceiling = field.height * arrows.anchor_height;
    let rng = &mut state.rng;

    state.projectiles.retain_mut(|a| match a.state {
        ProjectileState::Flying => {
            a.pos.x += (a.vel.x + drift) * world_dt * mods.arrow_speed_mult;
            a.pos.y += a.vel.y * world_dt * mods.arrow_speed_mult;

            if a.pos.y < -field.top_margin
                || a.pos.x < -field.side_margin
                || a.pos.x > field.width + field.side_margin
            {
                return false;
            }
            if can_anchor && a.pos.y < anchor_ceiling {
                a.state = ProjectileState::Anchored;
            }
            true
        }
        ProjectileState::Anchored => {
            a.pos.x += rng.random::<f32>() - 0.5;
            a.pos.y += rng.random::<f32>() - 0.5;
            if !input.anchor {
                a.state = ProjectileState::Flying;
                a.vel = Vec2::new(
                    (rng.random::<f32>() - 0.5) * arrows.relaunch_kick,
                    -arrows.relaunch_speed,
                );
            }
            true
        }
    });
}

/// Move birds, resolve arrow hits and escapes.
/// Returns true if the run ended.
fn advance_targets(state: &mut GameState, world_dt: f32) -> bool {
    let field = state.tuning.playfield.clone();
    let combat = state.tuning.combat.clone();
    let center_x = field.width / 2.0;
    let weave = (state.run.time * 5.0).sin() * combat.weave_speed * world_dt;

    let mut spent = vec![false; state.projectiles.len()];
    let mut keep = vec![true; state.targets.len()];
    let mut ended = false;

    for i in (0..state.targets.len()).rev() {
        let bird = &mut state.targets[i];
        match bird.ai() {
            TargetAi::Weave => bird.pos.y += weave,
            TargetAi::Dive => {
                if !bird.diving
                    && (bird.pos.x - center_x).abs() < combat.dive_band
                    && bird.pos.y < combat.dive_ceiling
                {
                    bird.diving = true;
                    bird.vel.y = combat.dive_speed;
                }
                if bird.diving {
                    bird.pos.y += bird.vel.y * world_dt;
                }
            }
            TargetAi::Straight => {}
        }
        bird.pos.x += bird.vel.x * world_dt;

        let bounds = bird.bounds();
        if let Some(j) = first_hit(&state.projectiles, &spent, &bounds, combat.hit_padding) {
            spent[j] = true;
            keep[i] = false;
            let (kind, pos) = (bird.kind, bird.pos);
            if kind.is_penalty() {
                let points = kind.score() as f32;
                state.run.score += points;
                state.run.lives -= 1.0;
                state.combo.reset();
                state.fx.label(pos, "X", PENALTY_COLOR);
                state.fx.burst(&mut state.rng, pos, PENALTY_COLOR, 30);
                state.fx.shake(10.0);
                state.events.push(GameEvent::PenaltyHit { points });
                if state.check_lives() {
                    ended = true;
                    break;
                }
            } else {
                let multiplier = state.combo.register_hit(
                    combat.combo_window,
                    combat.streak_per_step,
                    combat.max_multiplier,
                );
                let points = kind.score() as f32 * multiplier as f32;
                state.run.score += points;
                state.run.kills += 1;
                let text = if multiplier > 1 {
                    format!("+{points} x{multiplier}")
                } else {
                    format!("+{points}")
                };
                state.fx.label(pos, text, LABEL_COLOR);
                state.fx.burst(&mut state.rng, pos, kind.color(), 15);
                if state.run.modifiers.explosive_birds {
                    state.fx.burst(&mut state.rng, pos, EXPLOSION_COLOR, 25);
                }
                if state.run.loadout.perk == Perk::SlowMoOnKill {
                    state.run.slow_mo_timer = combat.slow_mo_secs;
                }
                state.fx.shake(5.0);
                state.events.push(GameEvent::TargetKilled {
                    kind,
                    points,
                    multiplier,
                });
            }
            continue;
        }

        if bounds.min.x < -field.side_margin
            || bounds.min.x > field.width + field.side_margin
            || bounds.min.y > field.height
        {
            keep[i] = false;
            if !bird.kind.is_penalty() {
                let kind = bird.kind;
                state.run.lives -= 1.0;
                state.combo.reset();
                state.events.push(GameEvent::TargetEscaped { kind });
                if state.check_lives() {
                    ended = true;
                    break;
                }
            }
        }
    }

    compact(&mut state.targets, &keep);
    compact_spent(&mut state.projectiles, &spent);
    ended
}

/// Move crates and resolve arrow hits (exact bounds).
/// Returns true if the run ended.
fn advance_boxes(state: &mut GameState, world_dt: f32) -> bool {
    let combat = state.tuning.combat.clone();
    let limit = state.tuning.playfield.width + state.tuning.playfield.side_margin;

    let mut spent = vec![false; state.projectiles.len()];
    let mut keep = vec![true; state.boxes.len()];
    let mut ended = false;

    for i in (0..state.boxes.len()).rev() {
        let crate_box = &mut state.boxes[i];
        crate_box.pos.x += crate_box.vx * world_dt;
        let bounds = crate_box.bounds();

        if let Some(j) = first_hit(&state.projectiles, &spent, &bounds, 0.0) {
            spent[j] = true;
            keep[i] = false;
            let mimic = crate_box.is_mimic;
            let center = crate_box.pos + Vec2::splat(20.0);
            if mimic {
                state.run.lives -= combat.mimic_damage;
                state.fx.burst(&mut state.rng, center, MIMIC_COLOR, 20);
                state.fx.shake(15.0);
            } else {
                state.run.lives = (state.run.lives + combat.crate_heal).min(combat.max_lives);
                state.fx.burst(&mut state.rng, center, HEAL_COLOR, 20);
                state.fx.shake(5.0);
            }
            log::debug!("Crate opened (mimic: {mimic})");
            state.events.push(GameEvent::BoxOpened { mimic });
            if state.check_lives() {
                ended = true;
                break;
            }
            continue;
        }

        if crate_box.pos.x > limit {
            keep[i] = false;
        }
    }

    compact(&mut state.boxes, &keep);
    compact_spent(&mut state.projectiles, &spent);
    ended
}

fn advance_effects(state: &mut GameState, dt: f32, world_dt: f32) {
    let fx = &mut state.fx;

    // Labels float in real time
    for label in fx.labels.iter_mut() {
        label.pos.y += label.vy * dt;
        label.life -= dt * 1.5;
    }
    fx.labels.retain(|l| l.life > 0.0);

    // Drop the oldest excess before moving anything
    let cap = state.max_particles.min(MAX_PARTICLES);
    if fx.particles.len() > cap {
        let excess = fx.particles.len() - cap;
        fx.particles.drain(..excess);
    }
    for p in fx.particles.iter_mut() {
        p.life -= world_dt;
        p.pos += p.vel * world_dt;
    }
    fx.particles.retain(|p| p.life > 0.0);
}

/// Keep items whose flag is set
fn compact<T>(items: &mut Vec<T>, keep: &[bool]) {
    let mut idx = 0;
    items.retain(|_| {
        let k = keep.get(idx).copied().unwrap_or(true);
        idx += 1;
        k
    });
}

/// Drop items whose flag is set
fn compact_spent<T>(items: &mut Vec<T>, spent: &[bool]) {
    let mut idx = 0;
    items.retain(|_| {
        let s = spent.get(idx).copied().unwrap_or(false);
        idx += 1;
        !s
    });
}

/// Cosmetic aim line: 20 points, 0.05 s apart, wind-only (arrows ignore gravity)
pub fn trajectory_preview(state: &GameState) -> Vec<Vec2> {
    let loadout = state.run.loadout;
    let wind = if loadout.perk == Perk::WindImmune {
        0.0
    } else {
        state.weather.wind * state.run.modifiers.wind_mult
    };
    let step = 0.05;
    let vel = Vec2::new(wind, -state.tuning.arrows.launch_speed);
    let mut pos = Vec2::new(state.player.pos.x + BOW_OFFSET_X, state.player.pos.y);
    let mut points = Vec::with_capacity(21);
    points.push(pos);
    for _ in 0..20 {
        pos += vel * step;
        points.push(pos);
    }
    points
}
