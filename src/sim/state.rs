//! Game state and core simulation types
//!
//! `GameState` owns every mutable entity container. It is private to the
//! session; observers only ever see a [`Snapshot`] taken after a full tick.

use glam::Vec2;
use serde::Serialize;

use crate::tuning::Tuning;
use crate::weapons::WeaponKind;

/// Arena bounds for one tick, as reported by the host surface
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Arena {
    pub width: f32,
    pub height: f32,
}

impl Arena {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Bounds are usable only when both sides are finite and positive
    pub fn is_usable(&self) -> bool {
        self.width.is_finite() && self.height.is_finite() && self.width > 0.0 && self.height > 0.0
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.width / 2.0, self.height / 2.0)
    }

    /// Strictly inside the arena (edges excluded)
    pub fn contains(&self, pos: Vec2) -> bool {
        pos.x > 0.0 && pos.x < self.width && pos.y > 0.0 && pos.y < self.height
    }

    /// Clamp a circle's center so the whole circle stays inside
    pub fn clamp_circle(&self, pos: Vec2, radius: f32) -> Vec2 {
        let max_x = (self.width - radius).max(radius);
        let max_y = (self.height - radius).max(radius);
        Vec2::new(pos.x.clamp(radius, max_x), pos.y.clamp(radius, max_y))
    }
}

/// Session lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SessionPhase {
    Playing,
    /// Terminal; no more ticks are processed
    Ended,
}

/// The player
#[derive(Debug, Clone, Serialize)]
pub struct Player {
    pub pos: Vec2,
    pub radius: f32,
    /// Facing angle in radians, toward the pointer
    pub facing: f32,
    pub lives: u32,
    pub invincible: bool,
    /// Absolute time (ms) invincibility ends
    pub invincible_until: f64,
    pub double_shot: bool,
    /// Absolute time (ms) double-shot ends
    pub double_shot_until: f64,
    pub level: u32,
    pub xp: u32,
    pub xp_to_next_level: u32,
    /// Weapon currently firing
    pub weapon: WeaponKind,
    /// Primary chosen at session start
    pub primary_weapon: WeaponKind,
}

impl Player {
    pub fn new(weapon: WeaponKind, tuning: &Tuning) -> Self {
        Self {
            pos: Vec2::ZERO,
            radius: tuning.player_radius,
            facing: 0.0,
            lives: tuning.initial_lives,
            invincible: false,
            invincible_until: 0.0,
            double_shot: false,
            double_shot_until: 0.0,
            level: 1,
            xp: 0,
            xp_to_next_level: tuning.base_xp_to_level_up,
            weapon,
            primary_weapon: weapon,
        }
    }

    /// Fraction of the way to the next level, for HUD bars
    pub fn xp_progress(&self) -> f32 {
        if self.xp_to_next_level == 0 {
            return 0.0;
        }
        self.xp as f32 / self.xp_to_next_level as f32
    }
}

/// Enemy types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum EnemyKind {
    Normal,
    Square,
}

impl EnemyKind {
    pub fn max_hp(&self, tuning: &Tuning) -> f32 {
        match self {
            EnemyKind::Normal => tuning.normal_enemy_hp,
            EnemyKind::Square => tuning.square_enemy_hp,
        }
    }

    pub fn score(&self, tuning: &Tuning) -> u64 {
        match self {
            EnemyKind::Normal => tuning.normal_enemy_score,
            EnemyKind::Square => tuning.square_enemy_score,
        }
    }

    pub fn xp(&self, tuning: &Tuning) -> u32 {
        match self {
            EnemyKind::Normal => tuning.normal_enemy_xp,
            EnemyKind::Square => tuning.square_enemy_xp,
        }
    }
}

/// An enemy entity
#[derive(Debug, Clone, Serialize)]
pub struct Enemy {
    pub id: u32,
    pub pos: Vec2,
    pub radius: f32,
    pub kind: EnemyKind,
    pub hp: f32,
}

impl Enemy {
    pub fn is_alive(&self) -> bool {
        self.hp > 0.0
    }
}

/// A projectile entity
#[derive(Debug, Clone, Serialize)]
pub struct Projectile {
    pub id: u32,
    pub pos: Vec2,
    /// Pixels per millisecond
    pub vel: Vec2,
    pub radius: f32,
    pub damage: f32,
    pub color: &'static str,
    pub weapon: WeaponKind,
}

/// Power-up types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum PowerUpKind {
    Health,
    DoubleShot,
}

/// A power-up lying in the arena
#[derive(Debug, Clone, Serialize)]
pub struct PowerUp {
    pub id: u32,
    pub pos: Vec2,
    pub radius: f32,
    pub kind: PowerUpKind,
    /// Absolute time (ms) it dropped
    pub spawn_time: f64,
}

/// The live melee swing (at most one)
#[derive(Debug, Clone, Serialize)]
pub struct MeleeAttack {
    pub id: u32,
    pub facing: f32,
    pub start_time: f64,
    /// Enemies already struck by this swing
    #[serde(skip)]
    pub struck: Vec<u32>,
}

impl MeleeAttack {
    pub fn expired(&self, now: f64, duration: f64) -> bool {
        now > self.start_time + duration
    }
}

/// Complete mutable simulation state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Simulation time (ms since session start)
    pub time_ms: f64,
    pub score: u64,
    /// Difficulty tier, never decreases
    pub stage: u32,
    pub player: Player,
    pub enemies: Vec<Enemy>,
    pub projectiles: Vec<Projectile>,
    pub power_ups: Vec<PowerUp>,
    pub melee: Option<MeleeAttack>,
    /// Time of the last permitted shot
    pub last_shot_time: Option<f64>,
    pub last_melee_time: Option<f64>,
    pub last_spawn_time: Option<f64>,
    /// Player is centered on the first tick with usable bounds
    pub player_placed: bool,
    next_id: u32,
}

impl GameState {
    pub fn new(weapon: WeaponKind, tuning: &Tuning) -> Self {
        Self {
            time_ms: 0.0,
            score: 0,
            stage: 1,
            player: Player::new(weapon, tuning),
            enemies: Vec::new(),
            projectiles: Vec::new(),
            power_ups: Vec::new(),
            melee: None,
            last_shot_time: None,
            last_melee_time: None,
            last_spawn_time: None,
            player_placed: false,
            next_id: 1,
        }
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Recompute the stage from the score; returns true if it went up
    pub fn update_stage(&mut self, tuning: &Tuning) -> bool {
        let stage = tuning.stage_for_score(self.score);
        if stage > self.stage {
            self.stage = stage;
            true
        } else {
            false
        }
    }
}

/// Read-only view of committed state, published once per tick
#[derive(Debug, Clone, Serialize)]
pub struct Snapshot {
    pub time_ms: f64,
    pub player: Player,
    pub enemies: Vec<Enemy>,
    pub projectiles: Vec<Projectile>,
    pub power_ups: Vec<PowerUp>,
    pub melee_attack: Option<MeleeAttack>,
    pub score: u64,
    pub stage: u32,
    /// Best score loaded at session start
    pub high_score: Option<u64>,
}

impl Snapshot {
    pub fn capture(state: &GameState, high_score: Option<u64>) -> Self {
        Self {
            time_ms: state.time_ms,
            player: state.player.clone(),
            enemies: state.enemies.clone(),
            projectiles: state.projectiles.clone(),
            power_ups: state.power_ups.clone(),
            melee_attack: state.melee.clone(),
            score: state.score,
            stage: state.stage,
            high_score,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_xp_progress() {
        let mut player = Player::new(WeaponKind::Pistol, &Tuning::default());
        assert_eq!(player.xp_progress(), 0.0);
        player.xp = player.xp_to_next_level / 4;
        assert!((player.xp_progress() - 0.25).abs() < 1e-6);
    }

    #[test]
    fn test_entity_ids_are_unique() {
        let mut state = GameState::new(WeaponKind::Shotgun, &Tuning::default());
        let a = state.next_entity_id();
        let b = state.next_entity_id();
        assert_ne!(a, b);
    }

    #[test]
    fn test_stage_never_decreases() {
        let tuning = Tuning::default();
        let mut state = GameState::new(WeaponKind::Shotgun, &tuning);
        state.score = 600;
        assert!(state.update_stage(&tuning));
        assert_eq!(state.stage, 3);
        state.score = 0;
        assert!(!state.update_stage(&tuning));
        assert_eq!(state.stage, 3);
    }

    #[test]
    fn test_arena_usability() {
        assert!(Arena::new(800.0, 600.0).is_usable());
        assert!(!Arena::new(0.0, 600.0).is_usable());
        assert!(!Arena::new(800.0, f32::NAN).is_usable());
    }

    #[test]
    fn test_clamp_circle() {
        let arena = Arena::new(100.0, 50.0);
        let p = arena.clamp_circle(Vec2::new(-10.0, 80.0), 5.0);
        assert_eq!(p, Vec2::new(5.0, 45.0));
    }
}
