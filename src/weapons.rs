//! Weapon catalog
//!
//! Fixed, read-only table of weapon parameters keyed by [`WeaponKind`].
//! Speeds are in pixels per millisecond, cooldowns in milliseconds.

use serde::{Deserialize, Serialize};

/// Weapon identifiers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum WeaponKind {
    /// Sidearm, always reachable through the swap key
    Pistol,
    #[default]
    Shotgun,
    MachineGun,
    Sniper,
}

/// Static parameters of one weapon
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct WeaponDefinition {
    pub name: &'static str,
    pub description: &'static str,
    /// Minimum time between shots (ms), before level bonus
    pub cooldown: f32,
    pub damage: f32,
    /// Projectile speed (pixels/ms)
    pub projectile_speed: f32,
    pub projectiles_per_shot: u32,
    /// Degrees. Per-pellet step for multi-pellet weapons, random cone otherwise.
    pub spread_angle: f32,
    /// CSS-style color for the render layer
    pub color: &'static str,
    pub projectile_radius: f32,
}

impl WeaponDefinition {
    /// Spread angle in radians
    #[inline]
    pub fn spread_radians(&self) -> f32 {
        self.spread_angle.to_radians()
    }

    /// Whether one trigger pull emits several pellets
    #[inline]
    pub fn is_multi_pellet(&self) -> bool {
        self.projectiles_per_shot > 1
    }
}

const PISTOL: WeaponDefinition = WeaponDefinition {
    name: "Pistol",
    description: "Balanced, all-purpose sidearm.",
    cooldown: 250.0,
    damage: 1.0,
    projectile_speed: 0.6,
    projectiles_per_shot: 1,
    spread_angle: 0.0,
    color: "#fde047",
    projectile_radius: 3.0,
};

const SHOTGUN: WeaponDefinition = WeaponDefinition {
    name: "Shotgun",
    description: "Devastating at close range.",
    cooldown: 800.0,
    damage: 1.0,
    projectile_speed: 0.5,
    projectiles_per_shot: 6,
    spread_angle: 5.0,
    color: "#fb923c",
    projectile_radius: 2.5,
};

const MACHINE_GUN: WeaponDefinition = WeaponDefinition {
    name: "Machine Gun",
    description: "High fire rate, low accuracy.",
    cooldown: 80.0,
    damage: 0.7,
    projectile_speed: 0.7,
    projectiles_per_shot: 1,
    spread_angle: 4.0,
    color: "#60a5fa",
    projectile_radius: 2.5,
};

const SNIPER: WeaponDefinition = WeaponDefinition {
    name: "Sniper Rifle",
    description: "Slow, but powerful and precise.",
    cooldown: 1200.0,
    damage: 4.0,
    projectile_speed: 1.2,
    projectiles_per_shot: 1,
    spread_angle: 0.0,
    color: "#f472b6",
    projectile_radius: 3.0,
};

impl WeaponKind {
    /// Every weapon, in menu order
    pub const ALL: [WeaponKind; 4] = [
        WeaponKind::Pistol,
        WeaponKind::Shotgun,
        WeaponKind::MachineGun,
        WeaponKind::Sniper,
    ];

    /// Weapons offered as a primary (the sidearm is always carried)
    pub const PRIMARIES: [WeaponKind; 3] =
        [WeaponKind::Shotgun, WeaponKind::MachineGun, WeaponKind::Sniper];

    /// The sidearm swapped to and from with the swap key
    pub const SIDEARM: WeaponKind = WeaponKind::Pistol;

    /// Catalog lookup
    pub fn definition(&self) -> &'static WeaponDefinition {
        match self {
            WeaponKind::Pistol => &PISTOL,
            WeaponKind::Shotgun => &SHOTGUN,
            WeaponKind::MachineGun => &MACHINE_GUN,
            WeaponKind::Sniper => &SNIPER,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            WeaponKind::Pistol => "pistol",
            WeaponKind::Shotgun => "shotgun",
            WeaponKind::MachineGun => "machine_gun",
            WeaponKind::Sniper => "sniper",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "pistol" => Some(WeaponKind::Pistol),
            "shotgun" => Some(WeaponKind::Shotgun),
            "machine_gun" | "machinegun" | "mg" => Some(WeaponKind::MachineGun),
            "sniper" | "sniper_rifle" => Some(WeaponKind::Sniper),
            _ => None,
        }
    }

    /// Weapon active after pressing swap while holding `self`
    pub fn swapped(&self, primary: WeaponKind) -> WeaponKind {
        if *self == Self::SIDEARM {
            primary
        } else {
            Self::SIDEARM
        }
    }
}
