//! Experience and leveling

use super::state::Player;
use crate::tuning::Tuning;

/// XP needed to leave `level`
#[inline]
pub fn xp_threshold(level: u32, tuning: &Tuning) -> u32 {
    tuning.base_xp_to_level_up + level.saturating_sub(1) * tuning.xp_increment_per_level
}

/// Add XP and resolve every level-up it pays for; returns levels gained
pub fn gain_xp(player: &mut Player, xp: u32, tuning: &Tuning) -> u32 {
    player.xp += xp;
    let mut gained = 0;
    while player.xp_to_next_level > 0 && player.xp >= player.xp_to_next_level {
        player.xp -= player.xp_to_next_level;
        player.level += 1;
        player.xp_to_next_level = xp_threshold(player.level, tuning);
        gained += 1;
    }
    if gained > 0 {
        log::info!("Reached level {}", player.level);
    }
    gained
}
