//! Simulation module
//!
//! All gameplay logic lives here. This module has no rendering or platform
//! dependencies:
//! - Variable timestep in milliseconds, clamped per frame
//! - Absolute expiry timestamps instead of countdowns
//! - Single owner for all entity collections (`GameSession`)
//! - Stable iteration order (collection order decides ties)

pub mod arc;
pub mod clock;
pub mod collision;
pub mod combat;
pub mod input;
pub mod melee;
pub mod player;
pub mod powerup;
pub mod progression;
pub mod session;
pub mod spawner;
pub mod state;
pub mod tick;
pub mod weapon;

pub use arc::SwingArc;
pub use clock::SimulationClock;
pub use collision::circles_overlap;
pub use combat::{CombatReport, Kill};
pub use input::{Action, InputEdges, InputState};
pub use session::{GameSession, TickOutcome};
pub use state::{
    Arena, Enemy, EnemyKind, GameState, MeleeAttack, Player, PowerUp, PowerUpKind, Projectile,
    SessionPhase, Snapshot,
};
pub use tick::{TickEvents, tick};
