//! Per-frame simulation tick
//!
//! Advances the game state by one variable-length step. The caller owns the
//! session lifecycle; this only runs the ordered systems and reports what
//! happened.

use rand::Rng;

use super::collision::circles_overlap;
use super::combat::{self, Kill};
use super::input::{InputEdges, InputState};
use super::state::{Arena, GameState, PowerUpKind};
use super::{melee, player, powerup, progression, spawner, weapon};
use crate::tuning::Tuning;

/// Everything notable that happened during one tick
#[derive(Debug, Clone, Default)]
pub struct TickEvents {
    /// Score at the start of the tick, before any kill was paid out
    pub score_before: u64,
    pub weapon_swapped: bool,
    pub projectiles_fired: usize,
    pub melee_started: bool,
    pub enemy_spawned: bool,
    pub kills: Vec<Kill>,
    pub levels_gained: u32,
    pub pickups: Vec<PowerUpKind>,
    pub stage_changed: bool,
    /// Player lost a life this tick
    pub player_hit: bool,
    /// The last life was lost
    pub player_died: bool,
}

/// Advance the game state by `dt` milliseconds
///
/// `arena` must be usable and `dt` already clamped; the session checks both.
pub fn tick<R: Rng + ?Sized>(
    state: &mut GameState,
    input: &InputState,
    edges: &InputEdges,
    arena: Arena,
    dt: f32,
    tuning: &Tuning,
    rng: &mut R,
) -> TickEvents {
    let mut events = TickEvents {
        score_before: state.score,
        ..Default::default()
    };

    state.time_ms += dt as f64;
    let now = state.time_ms;

    if !state.player_placed {
        state.player.pos = arena.center();
        state.player_placed = true;
    }

    // Timed state first so stale buffs never apply
    player::expire_timed_effects(&mut state.player, now);
    melee::expire(state, tuning);

    // Player
    let dir = player::movement_direction(input);
    player::move_player(&mut state.player, dir, tuning.player_speed, dt, arena);
    player::update_facing(&mut state.player, input.pointer);

    // Weapons
    events.weapon_swapped = weapon::handle_swap(state, input, edges);
    events.projectiles_fired = weapon::try_fire(state, input, tuning, rng);
    events.melee_started = melee::try_trigger(state, input, tuning);
    weapon::advance_projectiles(&mut state.projectiles, dt, arena);

    // Enemies
    events.enemy_spawned = spawner::update(state, arena, dt, tuning, rng);

    // Combat and progression
    let report = combat::resolve(state, tuning, rng);
    events.levels_gained = progression::gain_xp(&mut state.player, report.xp_gained, tuning);
    events.kills = report.kills;

    // Power-ups
    events.pickups = powerup::update(state, tuning);

    events.stage_changed = state.update_stage(tuning);
    if events.stage_changed {
        log::info!("Stage {} reached at score {}", state.stage, state.score);
    }

    // Contact damage
    if !state.player.invincible {
        let p = &state.player;
        let touched = state
            .enemies
            .iter()
            .any(|e| circles_overlap(p.pos, p.radius, e.pos, e.radius));
        if touched {
            events.player_hit = true;
            state.player.lives = state.player.lives.saturating_sub(1);
            if state.player.lives == 0 {
                events.player_died = true;
            } else {
                state.player.invincible = true;
                state.player.invincible_until = now + tuning.invincibility_duration;
                log::debug!("Player hit, {} lives left", state.player.lives);
            }
        }
    }

    events
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::input::Action;
    use crate::sim::state::{Enemy, EnemyKind};
    use crate::weapons::WeaponKind;
    use glam::Vec2;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn arena() -> Arena {
        Arena::new(800.0, 600.0)
    }

    fn placed_state(tuning: &Tuning) -> GameState {
        let mut state = GameState::new(WeaponKind::Pistol, tuning);
        state.player.pos = arena().center();
        state.player_placed = true;
        // Keep the spawner quiet
        state.last_spawn_time = Some(0.0);
        state
    }

    #[test]
    fn test_swap_applies_before_firing() {
        let tuning = Tuning::default();
        let mut state = placed_state(&tuning);
        state.player.weapon = WeaponKind::Sniper;
        state.player.primary_weapon = WeaponKind::Sniper;
        let mut rng = Pcg32::seed_from_u64(6);

        let input = InputState::new()
            .with(Action::Fire)
            .with(Action::SwapWeapon)
            .with_pointer(Vec2::new(700.0, 300.0));
        let events = tick(
            &mut state,
            &input,
            &InputEdges::new(),
            arena(),
            16.0,
            &tuning,
            &mut rng,
        );
        assert!(events.weapon_swapped);
        assert_eq!(events.projectiles_fired, 1);
        assert_eq!(state.projectiles[0].weapon, WeaponKind::Pistol);
    }

    #[test]
    fn test_first_tick_centers_player() {
        let tuning = Tuning::default();
        let mut state = GameState::new(WeaponKind::Shotgun, &tuning);
        let mut rng = Pcg32::seed_from_u64(1);
        tick(
            &mut state,
            &InputState::new(),
            &InputEdges::new(),
            arena(),
            16.0,
            &tuning,
            &mut rng,
        );
        assert_eq!(state.player.pos, arena().center());
        assert_eq!(state.time_ms, 16.0);
    }

    #[test]
    fn test_contact_costs_life_and_grants_invincibility() {
        let tuning = Tuning::default();
        let mut state = placed_state(&tuning);
        let mut rng = Pcg32::seed_from_u64(2);
        state.enemies.push(Enemy {
            id: 100,
            pos: state.player.pos,
            radius: 15.0,
            kind: EnemyKind::Square,
            hp: 3.0,
        });

        let events = tick(
            &mut state,
            &InputState::new(),
            &InputEdges::new(),
            arena(),
            16.0,
            &tuning,
            &mut rng,
        );
        assert!(events.player_hit);
        assert!(!events.player_died);
        assert_eq!(state.player.lives, tuning.initial_lives - 1);
        assert!(state.player.invincible);
        assert_eq!(state.player.invincible_until, 16.0 + tuning.invincibility_duration);

        // Invincible: next tick costs nothing
        let events = tick(
            &mut state,
            &InputState::new(),
            &InputEdges::new(),
            arena(),
            16.0,
            &tuning,
            &mut rng,
        );
        assert!(!events.player_hit);
        assert_eq!(state.player.lives, tuning.initial_lives - 1);
    }

    #[test]
    fn test_last_life_reports_death() {
        let tuning = Tuning::default();
        let mut state = placed_state(&tuning);
        let mut rng = Pcg32::seed_from_u64(3);
        state.player.lives = 1;
        state.enemies.push(Enemy {
            id: 100,
            pos: state.player.pos,
            radius: 15.0,
            kind: EnemyKind::Square,
            hp: 3.0,
        });
        let events = tick(
            &mut state,
            &InputState::new(),
            &InputEdges::new(),
            arena(),
            16.0,
            &tuning,
            &mut rng,
        );
        assert!(events.player_died);
        assert_eq!(state.player.lives, 0);
    }

    #[test]
    fn test_kill_awards_xp_and_stage() {
        let tuning = Tuning::default();
        let mut state = placed_state(&tuning);
        let mut rng = Pcg32::seed_from_u64(4);
        state.score = 245;
        state.enemies.push(Enemy {
            id: 100,
            pos: Vec2::new(100.0, 100.0),
            radius: 15.0,
            kind: EnemyKind::Normal,
            hp: 1.0,
        });
        // Aim from the center toward the enemy and let the bullet fly
        let input = InputState::new()
            .with(Action::Fire)
            .with_pointer(Vec2::new(100.0, 100.0));
        let edges = InputEdges::new();
        let mut kills = 0;
        for _ in 0..200 {
            let events = tick(&mut state, &input, &edges, arena(), 16.0, &tuning, &mut rng);
            kills += events.kills.len();
            if kills > 0 {
                break;
            }
        }
        assert_eq!(kills, 1);
        assert_eq!(state.score, 255);
        assert_eq!(state.stage, 2);
        assert_eq!(state.player.xp, tuning.normal_enemy_xp);
    }
}
