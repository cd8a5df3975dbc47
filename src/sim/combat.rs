//! Combat resolution
//!
//! Order within a tick:
//! 1. melee swing against every enemy in its arc
//! 2. each projectile against the first live enemy it overlaps, in
//!    collection order (not the nearest one)
//! 3. dead enemies are removed, paying score, XP and a possible drop
//! 4. spent projectiles are removed

use glam::Vec2;
use rand::Rng;

use super::collision::first_overlap;
use super::melee;
use super::powerup;
use super::state::{EnemyKind, GameState, PowerUpKind};
use crate::tuning::Tuning;

/// An enemy destroyed this tick
#[derive(Debug, Clone, PartialEq)]
pub struct Kill {
    pub enemy_id: u32,
    pub kind: EnemyKind,
    pub pos: Vec2,
    pub drop: Option<PowerUpKind>,
}

/// What combat resolution did this tick
#[derive(Debug, Clone, Default)]
pub struct CombatReport {
    pub melee_hits: usize,
    pub projectile_hits: usize,
    pub kills: Vec<Kill>,
    pub score_gained: u64,
    pub xp_gained: u32,
}

/// Resolve melee and projectile damage, then reap the dead
///
/// Score is added to the state here; XP is returned for the progression step.
pub fn resolve<R: Rng + ?Sized>(
    state: &mut GameState,
    tuning: &Tuning,
    rng: &mut R,
) -> CombatReport {
    let mut report = CombatReport::default();

    if let Some(attack) = state.melee.as_mut() {
        report.melee_hits = melee::apply_hits(attack, &state.player, &mut state.enemies, tuning);
    }

    let mut spent = vec![false; state.projectiles.len()];
    for (i, projectile) in state.projectiles.iter().enumerate() {
        let targets = state.enemies.iter().map(|e| (e.pos, e.radius, e.is_alive()));
        if let Some(hit) = first_overlap(projectile.pos, projectile.radius, targets) {
            state.enemies[hit].hp -= projectile.damage;
            spent[i] = true;
            report.projectile_hits += 1;
        }
    }

    let mut dead = Vec::new();
    state.enemies.retain(|e| {
        if e.is_alive() {
            true
        } else {
            dead.push((e.id, e.kind, e.pos));
            false
        }
    });

    for (enemy_id, kind, pos) in dead {
        report.score_gained += kind.score(tuning);
        report.xp_gained += kind.xp(tuning);

        let drop = powerup::roll_drop(rng.random::<f64>(), tuning);
        if let Some(drop_kind) = drop {
            powerup::spawn(state, drop_kind, pos, tuning);
        }
        report.kills.push(Kill {
            enemy_id,
            kind,
            pos,
            drop,
        });
    }
    state.score += report.score_gained;

    let mut flags = spent.into_iter();
    state.projectiles.retain(|_| !flags.next().unwrap_or(false));

    report
}
