//! Game balance values
//!
//! Everything that shapes difficulty lives here so it can be tweaked from a
//! JSON file without recompiling. Distances are pixels, speeds pixels per
//! millisecond, durations milliseconds.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Balance configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Sizes ===
    pub player_radius: f32,
    pub enemy_radius: f32,
    pub power_up_radius: f32,

    // === Player ===
    pub player_speed: f32,
    pub initial_lives: u32,
    pub max_lives: u32,
    pub invincibility_duration: f64,

    // === Enemies ===
    pub enemy_speed: f32,
    pub enemy_speed_increase_per_stage: f32,
    pub spawn_interval: f64,
    pub spawn_interval_reduction_per_stage: f64,
    pub min_spawn_interval: f64,
    /// Probability that a spawned enemy is a square
    pub square_spawn_chance: f64,
    pub normal_enemy_hp: f32,
    pub square_enemy_hp: f32,
    pub normal_enemy_score: u64,
    pub square_enemy_score: u64,
    pub normal_enemy_xp: u32,
    pub square_enemy_xp: u32,

    // === Stages ===
    pub score_per_stage: u64,

    // === Power-ups ===
    pub health_drop_chance: f64,
    pub double_shot_drop_chance: f64,
    pub double_shot_duration: f64,
    pub power_up_lifespan: f64,
    /// Lateral distance between doubled single-projectile shots
    pub double_shot_offset: f32,

    // === Melee ===
    pub melee_cooldown: f64,
    pub melee_duration: f64,
    pub melee_range: f32,
    /// Full arc width in degrees
    pub melee_arc_angle: f32,
    pub melee_damage: f32,

    // === Leveling ===
    pub base_xp_to_level_up: u32,
    pub xp_increment_per_level: u32,
    pub fire_rate_bonus_per_level: f32,

    // === Clock ===
    /// Frame deltas above this are clamped (e.g. after a backgrounded tab)
    pub max_frame_delta: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            player_radius: 20.0,
            enemy_radius: 15.0,
            power_up_radius: 12.0,

            player_speed: 0.25,
            initial_lives: 3,
            max_lives: 5,
            invincibility_duration: 2000.0,

            enemy_speed: 0.07,
            enemy_speed_increase_per_stage: 0.007,
            spawn_interval: 800.0,
            spawn_interval_reduction_per_stage: 50.0,
            min_spawn_interval: 250.0,
            square_spawn_chance: 0.2,
            normal_enemy_hp: 1.0,
            square_enemy_hp: 3.0,
            normal_enemy_score: 10,
            square_enemy_score: 20,
            normal_enemy_xp: 10,
            square_enemy_xp: 20,

            score_per_stage: 250,

            health_drop_chance: 0.03,
            double_shot_drop_chance: 0.01,
            double_shot_duration: 10_000.0,
            power_up_lifespan: 10_000.0,
            double_shot_offset: 8.0,

            melee_cooldown: 1500.0,
            melee_duration: 150.0,
            melee_range: 75.0,
            melee_arc_angle: 90.0,
            melee_damage: 3.0,

            base_xp_to_level_up: 400,
            xp_increment_per_level: 200,
            fire_rate_bonus_per_level: 0.07,

            max_frame_delta: 100.0,
        }
    }
}

impl Tuning {
    /// Parse tuning from JSON; missing keys keep their defaults
    pub fn from_json_str(json: &str) -> Result<Self> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Load tuning from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let tuning = Self::from_json_str(&json)?;
        log::info!("Loaded tuning from {}", path.display());
        Ok(tuning)
    }

    /// Write tuning as pretty JSON
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    /// Reject values the simulation cannot run with
    pub fn validate(&self) -> Result<()> {
        let positive = [
            ("player_radius", self.player_radius as f64),
            ("enemy_radius", self.enemy_radius as f64),
            ("power_up_radius", self.power_up_radius as f64),
            ("player_speed", self.player_speed as f64),
            ("enemy_speed", self.enemy_speed as f64),
            ("spawn_interval", self.spawn_interval),
            ("min_spawn_interval", self.min_spawn_interval),
            ("invincibility_duration", self.invincibility_duration),
            ("double_shot_duration", self.double_shot_duration),
            ("power_up_lifespan", self.power_up_lifespan),
            ("melee_cooldown", self.melee_cooldown),
            ("melee_duration", self.melee_duration),
            ("melee_range", self.melee_range as f64),
            ("melee_arc_angle", self.melee_arc_angle as f64),
            ("normal_enemy_hp", self.normal_enemy_hp as f64),
            ("square_enemy_hp", self.square_enemy_hp as f64),
            ("base_xp_to_level_up", self.base_xp_to_level_up as f64),
            ("score_per_stage", self.score_per_stage as f64),
            ("max_frame_delta", self.max_frame_delta as f64),
        ];
        for (field, value) in positive {
            if !(value > 0.0) {
                return Err(invalid(field, format!("must be positive, got {value}")));
            }
        }

        let probabilities = [
            ("square_spawn_chance", self.square_spawn_chance),
            ("health_drop_chance", self.health_drop_chance),
            ("double_shot_drop_chance", self.double_shot_drop_chance),
        ];
        for (field, value) in probabilities {
            if !(0.0..=1.0).contains(&value) {
                return Err(invalid(field, format!("must be within [0, 1], got {value}")));
            }
        }
        if self.health_drop_chance + self.double_shot_drop_chance > 1.0 {
            return Err(invalid(
                "health_drop_chance",
                "drop chances sum above 1".to_string(),
            ));
        }

        if self.initial_lives == 0 || self.initial_lives > self.max_lives {
            return Err(invalid(
                "initial_lives",
                format!("must be within [1, {}]", self.max_lives),
            ));
        }
        if self.fire_rate_bonus_per_level < 0.0 {
            return Err(invalid(
                "fire_rate_bonus_per_level",
                "must not be negative".to_string(),
            ));
        }
        Ok(())
    }

    /// Stage for a cumulative score (1-based)
    pub fn stage_for_score(&self, score: u64) -> u32 {
        (score / self.score_per_stage) as u32 + 1
    }

    /// Half of the melee arc, in radians
    pub fn melee_half_arc(&self) -> f32 {
        (self.melee_arc_angle / 2.0).to_radians()
    }
}

fn invalid(field: &'static str, reason: String) -> Error {
    Error::InvalidTuning { field, reason }
}
