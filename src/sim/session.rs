//! Game session: lifecycle around the per-frame tick
//!
//! The session owns all mutable state. Each `advance` either skips (bounds
//! unavailable or session over) or runs one full tick and publishes a fresh
//! [`Snapshot`]. Game over is reported once through the registered callback,
//! and a new best score is written once after that.

use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::clock::clamp_delta;
use super::input::{InputEdges, InputState};
use super::state::{Arena, GameState, SessionPhase, Snapshot};
use super::tick::{TickEvents, tick};
use crate::highscores::HighScoreStore;
use crate::tuning::Tuning;
use crate::weapons::WeaponKind;

/// Result of one `advance` call
#[derive(Debug, Clone)]
pub enum TickOutcome {
    /// Bounds were missing or degenerate; nothing changed
    Skipped,
    /// A normal tick ran
    Advanced(TickEvents),
    /// This tick ended the session
    GameOver { final_score: u64, new_high_score: bool },
    /// The session had already ended; nothing changed
    Ended,
}

type GameOverCallback = Box<dyn FnMut(u64)>;

/// One play-through from weapon choice to game over
pub struct GameSession<S: HighScoreStore> {
    state: GameState,
    tuning: Tuning,
    rng: Pcg32,
    edges: InputEdges,
    phase: SessionPhase,
    high_score: Option<u64>,
    store: S,
    on_game_over: Option<GameOverCallback>,
    snapshot: Snapshot,
}

impl<S: HighScoreStore> GameSession<S> {
    /// Start a session with an OS-seeded RNG
    pub fn start(weapon: WeaponKind, tuning: Tuning, store: S) -> Self {
        Self::with_seed(weapon, tuning, store, rand::random())
    }

    /// Start a session with a fixed RNG seed
    pub fn with_seed(weapon: WeaponKind, tuning: Tuning, store: S, seed: u64) -> Self {
        let high_score = match store.load_high_score() {
            Ok(score) => score,
            Err(e) => {
                log::warn!("Could not load high score: {e}");
                None
            }
        };
        let state = GameState::new(weapon, &tuning);
        let snapshot = Snapshot::capture(&state, high_score);
        log::info!(
            "Session started with {} (seed {seed}, best {:?})",
            weapon.definition().name,
            high_score
        );
        Self {
            state,
            tuning,
            rng: Pcg32::seed_from_u64(seed),
            edges: InputEdges::new(),
            phase: SessionPhase::Playing,
            high_score,
            store,
            on_game_over: None,
            snapshot,
        }
    }

    /// Register the game-over callback; it receives the final score
    pub fn on_game_over(&mut self, callback: impl FnMut(u64) + 'static) {
        self.on_game_over = Some(Box::new(callback));
    }

    /// Advance by one host frame
    pub fn advance(
        &mut self,
        input: &InputState,
        arena: Option<Arena>,
        delta_ms: f32,
    ) -> TickOutcome {
        if self.phase == SessionPhase::Ended {
            return TickOutcome::Ended;
        }
        let Some(arena) = arena.filter(Arena::is_usable) else {
            log::debug!("Skipping tick: arena bounds unavailable");
            return TickOutcome::Skipped;
        };
        let dt = clamp_delta(delta_ms, self.tuning.max_frame_delta);

        let events = tick(
            &mut self.state,
            input,
            &self.edges,
            arena,
            dt,
            &self.tuning,
            &mut self.rng,
        );
        self.edges.commit(input);

        let outcome = if events.player_died {
            self.finish(events.score_before)
        } else {
            TickOutcome::Advanced(events)
        };
        self.snapshot = Snapshot::capture(&self.state, self.high_score);
        outcome
    }

    fn finish(&mut self, final_score: u64) -> TickOutcome {
        self.phase = SessionPhase::Ended;
        log::info!("Game over: score {final_score}, stage {}", self.state.stage);

        if let Some(callback) = self.on_game_over.as_mut() {
            callback(final_score);
        }

        let new_high_score = final_score > self.high_score.unwrap_or(0);
        if new_high_score {
            self.high_score = Some(final_score);
            if let Err(e) = self.store.store_high_score(final_score) {
                log::warn!("Could not store high score {final_score}: {e}");
            }
        }
        TickOutcome::GameOver {
            final_score,
            new_high_score,
        }
    }

    /// Last committed state
    pub fn snapshot(&self) -> &Snapshot {
        &self.snapshot
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn is_over(&self) -> bool {
        self.phase == SessionPhase::Ended
    }

    /// Best score known to this session
    pub fn high_score(&self) -> Option<u64> {
        self.high_score
    }

    /// Simulation time (ms)
    pub fn now_ms(&self) -> f64 {
        self.state.time_ms
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Mutable access to the live state, for scripted scenarios
    #[cfg(test)]
    pub(crate) fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }
}
