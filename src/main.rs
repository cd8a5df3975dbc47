//! WASD Shooter headless runner
//!
//! Plays one session with a simple autopilot at 60 Hz and logs the result.
//!
//! Usage: `wasd-shooter [weapon] [tuning.json]`

use glam::Vec2;

use wasd_shooter::consts::{DEFAULT_ARENA_HEIGHT, DEFAULT_ARENA_WIDTH};
use wasd_shooter::sim::{
    Action, Arena, GameSession, InputState, SimulationClock, Snapshot, TickOutcome,
};
use wasd_shooter::{JsonFileStore, Tuning, WeaponKind};

const FRAME_MS: f64 = 1000.0 / 60.0;
/// Give up after ten simulated minutes
const MAX_SIM_MS: f64 = 10.0 * 60.0 * 1000.0;
const HIGH_SCORE_FILE: &str = "wasd_shooter_highscores.json";

fn main() {
    env_logger::init();
    if let Err(e) = run() {
        log::error!("{e}");
        std::process::exit(1);
    }
}

fn run() -> wasd_shooter::Result<()> {
    let mut args = std::env::args().skip(1);
    let weapon = match args.next() {
        Some(name) => WeaponKind::from_str(&name).unwrap_or_else(|| {
            log::warn!("Unknown weapon `{name}`, using default");
            WeaponKind::default()
        }),
        None => WeaponKind::default(),
    };
    let tuning = match args.next() {
        Some(path) => Tuning::load(path)?,
        None => Tuning::default(),
    };

    let arena = Arena::new(DEFAULT_ARENA_WIDTH, DEFAULT_ARENA_HEIGHT);
    let mut clock = SimulationClock::new(tuning.max_frame_delta);
    let mut session = GameSession::start(weapon, tuning, JsonFileStore::new(HIGH_SCORE_FILE));
    session.on_game_over(|score| println!("Game over! Final score: {score}"));

    let mut input = InputState::new();
    let mut timestamp = 0.0;
    while timestamp < MAX_SIM_MS {
        timestamp += FRAME_MS;
        let Some(dt) = clock.frame(timestamp) else {
            continue;
        };
        autopilot(session.snapshot(), session.tuning(), &mut input);
        match session.advance(&input, Some(arena), dt) {
            TickOutcome::GameOver {
                final_score,
                new_high_score,
            } => {
                if new_high_score {
                    println!("New high score: {final_score}");
                }
                break;
            }
            TickOutcome::Ended => break,
            TickOutcome::Skipped | TickOutcome::Advanced(_) => {}
        }
    }

    let snap = session.snapshot();
    println!(
        "Survived {:.1}s, stage {}, level {} ({:.0}% to next), score {}",
        snap.time_ms / 1000.0,
        snap.stage,
        snap.player.level,
        snap.player.xp_progress() * 100.0,
        snap.score
    );
    Ok(())
}

/// Very small bot: aim at the nearest enemy, keep shooting, swing when
/// something is close, back away from threats, otherwise go for power-ups
fn autopilot(snap: &Snapshot, tuning: &Tuning, input: &mut InputState) {
    for action in [Action::Up, Action::Down, Action::Left, Action::Right, Action::Melee] {
        input.release(action);
    }
    input.set_primary_button(true);

    let me = snap.player.pos;
    let nearest = snap
        .enemies
        .iter()
        .min_by(|a, b| me.distance_squared(a.pos).total_cmp(&me.distance_squared(b.pos)));

    let mut heading = Vec2::ZERO;
    if let Some(enemy) = nearest {
        input.set_pointer(enemy.pos);
        let dist = me.distance(enemy.pos);
        if dist < tuning.melee_range + enemy.radius {
            input.press(Action::Melee);
        }
        if dist < 200.0 {
            heading = me - enemy.pos;
        }
    }
    if heading == Vec2::ZERO {
        if let Some(power_up) = snap.power_ups.first() {
            heading = power_up.pos - me;
        }
    }

    if heading.x < -1.0 {
        input.press(Action::Left);
    } else if heading.x > 1.0 {
        input.press(Action::Right);
    }
    if heading.y < -1.0 {
        input.press(Action::Up);
    } else if heading.y > 1.0 {
        input.press(Action::Down);
    }
}
