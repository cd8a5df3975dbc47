//! Melee swings
//!
//! Melee has its own cooldown, independent of ranged fire. A swing stays
//! live for a short window and strikes each enemy in its arc at most once.

use super::arc::SwingArc;
use super::input::{Action, InputState};
use super::state::{Enemy, GameState, MeleeAttack, Player};
use crate::tuning::Tuning;

/// Drop the swing once its window has passed
pub fn expire(state: &mut GameState, tuning: &Tuning) {
    let now = state.time_ms;
    if state
        .melee
        .as_ref()
        .is_some_and(|m| m.expired(now, tuning.melee_duration))
    {
        state.melee = None;
    }
}

/// Start a swing if melee is held and off cooldown; returns true on start
pub fn try_trigger(state: &mut GameState, input: &InputState, tuning: &Tuning) -> bool {
    if !input.is_held(Action::Melee) {
        return false;
    }
    let now = state.time_ms;
    let ready = match state.last_melee_time {
        Some(last) => now - last > tuning.melee_cooldown,
        None => true,
    };
    if !ready {
        return false;
    }

    state.last_melee_time = Some(now);
    let id = state.next_entity_id();
    state.melee = Some(MeleeAttack {
        id,
        facing: state.player.facing,
        start_time: now,
        struck: Vec::new(),
    });
    true
}

/// Apply the live swing to `enemies`; returns how many were struck
///
/// The arc follows the player's current position and facing. Enemies that
/// are already dead or were struck earlier by the same swing are skipped.
pub fn apply_hits(
    attack: &mut MeleeAttack,
    player: &Player,
    enemies: &mut [Enemy],
    tuning: &Tuning,
) -> usize {
    let arc = SwingArc::new(
        player.pos,
        player.facing,
        tuning.melee_range,
        tuning.melee_half_arc(),
    );

    let mut struck = 0;
    for enemy in enemies.iter_mut() {
        if !enemy.is_alive() || attack.struck.contains(&enemy.id) {
            continue;
        }
        if arc.hits_circle(enemy.pos, enemy.radius) {
            enemy.hp -= tuning.melee_damage;
            attack.struck.push(enemy.id);
            struck += 1;
        }
    }
    struck
}
