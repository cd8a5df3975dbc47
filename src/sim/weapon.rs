//! Ranged weapons: fire gating, projectile generation and swapping
//!
//! Spread rules:
//! - multi-pellet weapons fan pellets evenly, one `spread_angle` step apart,
//!   symmetric about the aim direction
//! - single-projectile weapons with a spread draw one random offset per
//!   trigger pull from `[-spread/2, spread/2]`
//! - double-shot doubles the projectile count; for single-projectile weapons
//!   the copies are displaced sideways instead of fanned

use glam::Vec2;
use rand::Rng;

use super::input::{Action, InputEdges, InputState};
use super::state::{Arena, GameState, Projectile};
use crate::polar_to_cartesian;
use crate::tuning::Tuning;
use crate::weapons::{WeaponDefinition, WeaponKind};

/// Fire-rate multiplier granted by player level
#[inline]
pub fn fire_rate_multiplier(level: u32, bonus_per_level: f32) -> f32 {
    1.0 + level.saturating_sub(1) as f32 * bonus_per_level
}

/// Cooldown after level bonus (ms)
#[inline]
pub fn effective_cooldown(def: &WeaponDefinition, level: u32, bonus_per_level: f32) -> f64 {
    (def.cooldown / fire_rate_multiplier(level, bonus_per_level)) as f64
}

/// Whether enough time passed since the last shot
#[inline]
pub fn can_fire(last_shot: Option<f64>, now: f64, cooldown: f64) -> bool {
    match last_shot {
        Some(last) => now - last > cooldown,
        None => true,
    }
}

/// One trigger pull
#[derive(Debug, Clone, Copy)]
pub struct Shot {
    pub weapon: WeaponKind,
    pub origin: Vec2,
    /// Aim direction (radians)
    pub aim: f32,
    pub double_shot: bool,
    /// Sideways displacement of doubled single-projectile shots (pixels)
    pub lateral_offset: f32,
}

/// Build the projectiles for one trigger pull
pub fn generate_projectiles<R: Rng + ?Sized>(
    shot: &Shot,
    rng: &mut R,
    mut next_id: impl FnMut() -> u32,
) -> Vec<Projectile> {
    let def = shot.weapon.definition();
    let multiplier = if shot.double_shot { 2 } else { 1 };
    let count = def.projectiles_per_shot * multiplier;
    let spread = def.spread_radians();

    // Single random deviation shared by every projectile of this pull
    let random_offset = if !def.is_multi_pellet() && spread > 0.0 {
        rng.random_range(-spread / 2.0..=spread / 2.0)
    } else {
        0.0
    };

    let mut projectiles = Vec::with_capacity(count as usize);
    for i in 0..count {
        let angle_offset = if def.is_multi_pellet() {
            (i as f32 - (count - 1) as f32 / 2.0) * spread
        } else {
            random_offset
        };
        let angle = shot.aim + angle_offset;
        let vel = polar_to_cartesian(def.projectile_speed, angle);

        let mut pos = shot.origin;
        if shot.double_shot && !def.is_multi_pellet() {
            let perp = Vec2::new(-vel.y, vel.x).normalize_or_zero();
            let side = if i % 2 == 0 { 1.0 } else { -1.0 };
            pos += perp * side * shot.lateral_offset;
        }

        projectiles.push(Projectile {
            id: next_id(),
            pos,
            vel,
            radius: def.projectile_radius,
            damage: def.damage,
            color: def.color,
            weapon: shot.weapon,
        });
    }
    projectiles
}

/// Swap between primary and sidearm on a fresh press; returns true if swapped
pub fn handle_swap(state: &mut GameState, input: &InputState, edges: &InputEdges) -> bool {
    if !edges.just_pressed(input, Action::SwapWeapon) {
        return false;
    }
    let player = &mut state.player;
    player.weapon = player.weapon.swapped(player.primary_weapon);
    log::debug!("Swapped to {}", player.weapon.as_str());
    true
}

/// Fire the active weapon if the trigger is held and the cooldown allows;
/// returns the number of projectiles spawned
pub fn try_fire<R: Rng + ?Sized>(
    state: &mut GameState,
    input: &InputState,
    tuning: &Tuning,
    rng: &mut R,
) -> usize {
    if !input.is_held(Action::Fire) {
        return 0;
    }
    let now = state.time_ms;
    let def = state.player.weapon.definition();
    let cooldown = effective_cooldown(def, state.player.level, tuning.fire_rate_bonus_per_level);
    if !can_fire(state.last_shot_time, now, cooldown) {
        return 0;
    }
    state.last_shot_time = Some(now);

    let shot = Shot {
        weapon: state.player.weapon,
        origin: state.player.pos,
        aim: state.player.facing,
        double_shot: state.player.double_shot,
        lateral_offset: tuning.double_shot_offset,
    };
    let projectiles = generate_projectiles(&shot, rng, || state.next_entity_id());
    let fired = projectiles.len();
    state.projectiles.extend(projectiles);
    fired
}

/// Move projectiles and drop the ones that left the arena
pub fn advance_projectiles(projectiles: &mut Vec<Projectile>, dt: f32, arena: Arena) {
    for p in projectiles.iter_mut() {
        p.pos += p.vel * dt;
    }
    projectiles.retain(|p| arena.contains(p.pos));
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn shot(weapon: WeaponKind, double_shot: bool) -> Shot {
        Shot {
            weapon,
            origin: Vec2::new(100.0, 100.0),
            aim: 0.0,
            double_shot,
            lateral_offset: 8.0,
        }
    }

    fn ids() -> impl FnMut() -> u32 {
        let mut n = 0;
        move || {
            n += 1;
            n
        }
    }

    #[test]
    fn test_fire_rate_multiplier() {
        assert_eq!(fire_rate_multiplier(1, 0.07), 1.0);
        assert!((fire_rate_multiplier(3, 0.07) - 1.14).abs() < 1e-6);
    }

    #[test]
    fn test_can_fire_is_strict() {
        assert!(can_fire(None, 0.0, 250.0));
        assert!(!can_fire(Some(0.0), 250.0, 250.0));
        assert!(can_fire(Some(0.0), 250.1, 250.0));
    }

    #[test]
    fn test_shotgun_fan_is_symmetric() {
        let mut rng = Pcg32::seed_from_u64(1);
        let pellets = generate_projectiles(&shot(WeaponKind::Shotgun, false), &mut rng, ids());
        assert_eq!(pellets.len(), 6);
        let angles: Vec<f32> = pellets.iter().map(|p| p.vel.y.atan2(p.vel.x)).collect();
        let sum: f32 = angles.iter().sum();
        assert!(sum.abs() < 1e-4);
        let step = 5f32.to_radians();
        assert!((angles[1] - angles[0] - step).abs() < 1e-4);
        assert!((angles[0] + 2.5 * step).abs() < 1e-4);
    }

    #[test]
    fn test_machine_gun_random_spread_within_cone() {
        let mut rng = Pcg32::seed_from_u64(7);
        let half = 2f32.to_radians();
        for _ in 0..200 {
            let p = generate_projectiles(&shot(WeaponKind::MachineGun, false), &mut rng, ids());
            assert_eq!(p.len(), 1);
            let angle = p[0].vel.y.atan2(p[0].vel.x);
            assert!(angle.abs() <= half + 1e-5);
        }
    }

    #[test]
    fn test_double_shot_single_projectile_offsets_sideways() {
        let mut rng = Pcg32::seed_from_u64(3);
        let p = generate_projectiles(&shot(WeaponKind::Pistol, true), &mut rng, ids());
        assert_eq!(p.len(), 2);
        assert_eq!(p[0].vel, p[1].vel);
        // Aim along +x, so the offset is along y
        assert!((p[0].pos.y - 108.0).abs() < 1e-4);
        assert!((p[1].pos.y - 92.0).abs() < 1e-4);
        assert_eq!(p[0].pos.x, p[1].pos.x);
        assert_ne!(p[0].id, p[1].id);
    }

    #[test]
    fn test_double_shot_machine_gun_shares_direction() {
        let mut rng = Pcg32::seed_from_u64(11);
        let p = generate_projectiles(&shot(WeaponKind::MachineGun, true), &mut rng, ids());
        assert_eq!(p.len(), 2);
        assert!((p[0].vel - p[1].vel).length() < 1e-6);
    }

    #[test]
    fn test_double_shot_shotgun_doubles_pellets() {
        let mut rng = Pcg32::seed_from_u64(5);
        let p = generate_projectiles(&shot(WeaponKind::Shotgun, true), &mut rng, ids());
        assert_eq!(p.len(), 12);
        assert!(p.iter().all(|pr| pr.pos == Vec2::new(100.0, 100.0)));
    }

    #[test]
    fn test_projectiles_leave_arena() {
        let arena = Arena::new(100.0, 100.0);
        let mut rng = Pcg32::seed_from_u64(1);
        let mut p = generate_projectiles(&shot(WeaponKind::Pistol, false), &mut rng, ids());
        p[0].pos = Vec2::new(95.0, 50.0);
        advance_projectiles(&mut p, 5.0, arena);
        assert_eq!(p.len(), 1);
        advance_projectiles(&mut p, 10.0, arena);
        assert!(p.is_empty());
    }

    #[test]
    fn test_try_fire_respects_cooldown() {
        let tuning = Tuning::default();
        let mut rng = Pcg32::seed_from_u64(9);
        let mut state = GameState::new(WeaponKind::Pistol, &tuning);
        let input = InputState::new().with(Action::Fire);

        assert_eq!(try_fire(&mut state, &input, &tuning, &mut rng), 1);
        state.time_ms = 250.0;
        assert_eq!(try_fire(&mut state, &input, &tuning, &mut rng), 0);
        state.time_ms = 251.0;
        assert_eq!(try_fire(&mut state, &input, &tuning, &mut rng), 1);
        assert_eq!(state.last_shot_time, Some(251.0));
    }

    #[test]
    fn test_swap_is_edge_triggered() {
        let tuning = Tuning::default();
        let mut state = GameState::new(WeaponKind::Sniper, &tuning);
        let mut edges = InputEdges::new();
        let held = InputState::new().with(Action::SwapWeapon);

        assert!(handle_swap(&mut state, &held, &edges));
        assert_eq!(state.player.weapon, WeaponKind::Pistol);
        edges.commit(&held);
        assert!(!handle_swap(&mut state, &held, &edges));
        assert_eq!(state.player.weapon, WeaponKind::Pistol);

        edges.commit(&InputState::new());
        assert!(handle_swap(&mut state, &held, &edges));
        assert_eq!(state.player.weapon, WeaponKind::Sniper);
    }
}
