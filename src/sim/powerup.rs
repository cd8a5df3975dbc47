//! Power-up drops, lifespan and pickup

use super::collision::circles_overlap;
use super::state::{GameState, Player, PowerUp, PowerUpKind};
use crate::tuning::Tuning;
use glam::Vec2;

/// Map one uniform draw in [0, 1) to a drop
///
/// Double-shot takes the lowest band, health the next one.
pub fn roll_drop(roll: f64, tuning: &Tuning) -> Option<PowerUpKind> {
    if roll < tuning.double_shot_drop_chance {
        Some(PowerUpKind::DoubleShot)
    } else if roll < tuning.double_shot_drop_chance + tuning.health_drop_chance {
        Some(PowerUpKind::Health)
    } else {
        None
    }
}

/// Place a dropped power-up
pub fn spawn(state: &mut GameState, kind: PowerUpKind, pos: Vec2, tuning: &Tuning) {
    let id = state.next_entity_id();
    log::debug!("Dropped {kind:?} at {pos:?}");
    state.power_ups.push(PowerUp {
        id,
        pos,
        radius: tuning.power_up_radius,
        kind,
        spawn_time: state.time_ms,
    });
}

/// Remove power-ups whose lifespan has run out
pub fn expire(power_ups: &mut Vec<PowerUp>, now: f64, lifespan: f64) {
    power_ups.retain(|p| now < p.spawn_time + lifespan);
}

/// Apply a picked-up power-up to the player
pub fn apply(player: &mut Player, kind: PowerUpKind, now: f64, tuning: &Tuning) {
    match kind {
        PowerUpKind::Health => {
            player.lives = (player.lives + 1).min(tuning.max_lives);
        }
        PowerUpKind::DoubleShot => {
            // Refresh, not extend
            player.double_shot = true;
            player.double_shot_until = now + tuning.double_shot_duration;
        }
    }
}

/// Expire stale power-ups, then collect the ones touching the player
pub fn update(state: &mut GameState, tuning: &Tuning) -> Vec<PowerUpKind> {
    let now = state.time_ms;
    expire(&mut state.power_ups, now, tuning.power_up_lifespan);

    let player_pos = state.player.pos;
    let player_radius = state.player.radius;
    let mut collected = Vec::new();
    state.power_ups.retain(|p| {
        if circles_overlap(player_pos, player_radius, p.pos, p.radius) {
            collected.push(p.kind);
            false
        } else {
            true
        }
    });

    for kind in &collected {
        apply(&mut state.player, *kind, now, tuning);
    }
    collected
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::weapons::WeaponKind;

    fn state() -> (GameState, Tuning) {
        let tuning = Tuning::default();
        let mut state = GameState::new(WeaponKind::Pistol, &tuning);
        state.player.pos = Vec2::new(100.0, 100.0);
        (state, tuning)
    }

    #[test]
    fn test_roll_bands() {
        let t = Tuning::default();
        assert_eq!(roll_drop(0.0, &t), Some(PowerUpKind::DoubleShot));
        assert_eq!(roll_drop(0.0099, &t), Some(PowerUpKind::DoubleShot));
        assert_eq!(roll_drop(0.01, &t), Some(PowerUpKind::Health));
        assert_eq!(roll_drop(0.0399, &t), Some(PowerUpKind::Health));
        assert_eq!(roll_drop(0.04, &t), None);
        assert_eq!(roll_drop(0.99, &t), None);
    }

    #[test]
    fn test_expiry_is_inclusive_of_deadline() {
        let (mut state, t) = state();
        spawn(&mut state, PowerUpKind::Health, Vec2::new(500.0, 500.0), &t);
        expire(&mut state.power_ups, 9_999.0, t.power_up_lifespan);
        assert_eq!(state.power_ups.len(), 1);
        expire(&mut state.power_ups, 10_000.0, t.power_up_lifespan);
        assert!(state.power_ups.is_empty());
    }

    #[test]
    fn test_health_caps_at_max() {
        let (mut state, t) = state();
        state.player.lives = t.max_lives;
        spawn(&mut state, PowerUpKind::Health, Vec2::new(105.0, 100.0), &t);
        assert_eq!(update(&mut state, &t), vec![PowerUpKind::Health]);
        assert_eq!(state.player.lives, t.max_lives);
        assert!(state.power_ups.is_empty());
    }

    #[test]
    fn test_double_shot_refreshes_expiry() {
        let (mut state, t) = state();
        apply(&mut state.player, PowerUpKind::DoubleShot, 1_000.0, &t);
        assert_eq!(state.player.double_shot_until, 11_000.0);
        apply(&mut state.player, PowerUpKind::DoubleShot, 5_000.0, &t);
        assert!(state.player.double_shot);
        assert_eq!(state.player.double_shot_until, 15_000.0);
    }

    #[test]
    fn test_far_power_up_not_collected() {
        let (mut state, t) = state();
        spawn(&mut state, PowerUpKind::DoubleShot, Vec2::new(300.0, 100.0), &t);
        assert!(update(&mut state, &t).is_empty());
        assert_eq!(state.power_ups.len(), 1);
    }
}
