//! Player movement, facing and timed effects

use glam::Vec2;

use super::input::{Action, InputState};
use super::state::{Arena, Player};

/// Unit movement direction from held keys, or zero when nothing (or two
/// opposing keys) is held
pub fn movement_direction(input: &InputState) -> Vec2 {
    let mut dir = Vec2::ZERO;
    if input.is_held(Action::Up) {
        dir.y -= 1.0;
    }
    if input.is_held(Action::Down) {
        dir.y += 1.0;
    }
    if input.is_held(Action::Left) {
        dir.x -= 1.0;
    }
    if input.is_held(Action::Right) {
        dir.x += 1.0;
    }
    dir.normalize_or_zero()
}

/// Clear timed flags whose expiry has passed
///
/// Runs before any other player logic so a stale buff never applies.
pub fn expire_timed_effects(player: &mut Player, now: f64) {
    if player.invincible && now > player.invincible_until {
        player.invincible = false;
    }
    if player.double_shot && now > player.double_shot_until {
        player.double_shot = false;
        log::debug!("Double shot expired at {now:.0}ms");
    }
}

/// Integrate movement and keep the whole player circle in the arena
pub fn move_player(player: &mut Player, dir: Vec2, speed: f32, dt: f32, arena: Arena) {
    let next = player.pos + dir * speed * dt;
    player.pos = arena.clamp_circle(next, player.radius);
}

/// Face the pointer; a pointer on top of the player keeps the old facing
pub fn update_facing(player: &mut Player, pointer: Vec2) {
    let to_pointer = pointer - player.pos;
    if to_pointer.length_squared() > f32::EPSILON {
        player.facing = to_pointer.y.atan2(to_pointer.x);
    }
}
