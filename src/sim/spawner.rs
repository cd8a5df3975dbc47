//! Enemy spawning and steering
//!
//! Enemies enter just outside a random arena edge and walk straight at the
//! player. Both spawn rate and walking speed scale with the stage.

use glam::Vec2;
use rand::Rng;

use super::state::{Arena, Enemy, EnemyKind, GameState};
use crate::consts::STEERING_EPSILON_SQ;
use crate::tuning::Tuning;

/// Arena edge an enemy enters from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Edge {
    Top,
    Bottom,
    Left,
    Right,
}

impl Edge {
    pub const ALL: [Edge; 4] = [Edge::Top, Edge::Bottom, Edge::Left, Edge::Right];

    /// Position just outside this edge; `along` is in [0, 1)
    pub fn spawn_point(&self, along: f32, arena: Arena, radius: f32) -> Vec2 {
        match self {
            Edge::Top => Vec2::new(along * arena.width, -radius),
            Edge::Bottom => Vec2::new(along * arena.width, arena.height + radius),
            Edge::Left => Vec2::new(-radius, along * arena.height),
            Edge::Right => Vec2::new(arena.width + radius, along * arena.height),
        }
    }
}

/// Time between spawns at `stage` (ms)
pub fn spawn_interval(stage: u32, tuning: &Tuning) -> f64 {
    let reduced = tuning.spawn_interval
        - stage.saturating_sub(1) as f64 * tuning.spawn_interval_reduction_per_stage;
    reduced.max(tuning.min_spawn_interval)
}

/// Enemy walking speed at `stage` (pixels/ms)
pub fn enemy_speed(stage: u32, tuning: &Tuning) -> f32 {
    tuning.enemy_speed + stage.saturating_sub(1) as f32 * tuning.enemy_speed_increase_per_stage
}

/// Move every enemy toward `target`
pub fn steer(enemies: &mut [Enemy], target: Vec2, speed: f32, dt: f32) {
    let step = speed * dt;
    for enemy in enemies.iter_mut() {
        let to_target = target - enemy.pos;
        let dist_sq = to_target.length_squared();
        if dist_sq > STEERING_EPSILON_SQ {
            enemy.pos += to_target / dist_sq.sqrt() * step;
        }
    }
}

/// Roll a new enemy at a random edge
pub fn roll_enemy<R: Rng + ?Sized>(id: u32, arena: Arena, tuning: &Tuning, rng: &mut R) -> Enemy {
    let edge = Edge::ALL[rng.random_range(0..Edge::ALL.len())];
    let along: f32 = rng.random();
    let kind = if rng.random::<f64>() < tuning.square_spawn_chance {
        EnemyKind::Square
    } else {
        EnemyKind::Normal
    };
    Enemy {
        id,
        pos: edge.spawn_point(along, arena, tuning.enemy_radius),
        radius: tuning.enemy_radius,
        kind,
        hp: kind.max_hp(tuning),
    }
}

/// Move existing enemies, then spawn one if the interval has elapsed;
/// returns true if an enemy spawned
pub fn update<R: Rng + ?Sized>(
    state: &mut GameState,
    arena: Arena,
    dt: f32,
    tuning: &Tuning,
    rng: &mut R,
) -> bool {
    let speed = enemy_speed(state.stage, tuning);
    steer(&mut state.enemies, state.player.pos, speed, dt);

    let now = state.time_ms;
    let due = match state.last_spawn_time {
        Some(last) => now - last > spawn_interval(state.stage, tuning),
        None => true,
    };
    if !due {
        return false;
    }

    state.last_spawn_time = Some(now);
    let id = state.next_entity_id();
    let enemy = roll_enemy(id, arena, tuning, rng);
    log::debug!("Spawned {:?} enemy {} at {:?}", enemy.kind, enemy.id, enemy.pos);
    state.enemies.push(enemy);
    true
}
