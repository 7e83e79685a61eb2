//! Headless survey runner.
//!
//! Provides a pure function interface: `(seed, config) -> SessionResult`
//!
//! Each session generates a level from the seed and lets the [`Autopilot`]
//! play it until the session ends or the turn cap is hit. Many sessions can be
//! run in parallel and folded into [`SurveyStats`].

use serde::Serialize;
use tracing::debug;

use crate::game::{
    Autopilot, GameConfig, GameEvent, GameState, LevelGenError, PlayerStats, SeededDice, Status,
    DEFAULT_HEIGHT, DEFAULT_WIDTH,
};

/// Configuration for survey sessions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SurveyConfig {
    /// Grid width.
    pub width: u16,
    /// Grid height.
    pub height: u16,
    /// Turns before a session is cut off.
    pub max_turns: u32,
}

impl Default for SurveyConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            max_turns: 2000,
        }
    }
}

impl SurveyConfig {
    /// Game configuration for one session.
    #[must_use]
    pub fn game_config(&self) -> GameConfig {
        GameConfig {
            width: self.width,
            height: self.height,
            player: PlayerStats::default(),
        }
    }
}

/// How a session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionOutcome {
    /// The boss was defeated.
    Won,
    /// The player died.
    Lost,
    /// The autopilot ran out of places to go.
    Quit,
    /// The turn cap was reached.
    TimedOut,
}

impl std::fmt::Display for SessionOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            SessionOutcome::Won => "won",
            SessionOutcome::Lost => "lost",
            SessionOutcome::Quit => "quit",
            SessionOutcome::TimedOut => "timed_out",
        };
        f.write_str(label)
    }
}

/// Final result of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SessionResult {
    /// The seed used for this session.
    pub seed: u64,
    /// How the session ended.
    pub outcome: SessionOutcome,
    /// Turns played.
    pub turns: u32,
    /// Health at the end.
    pub final_health: i32,
    /// Strength at the end.
    pub final_strength: i32,
    /// Creatures defeated, boss included.
    pub creatures_defeated: u32,
    /// Resources fully harvested.
    pub resources_harvested: u32,
    /// Shop purchases made.
    pub purchases: u32,
    /// Successful escapes.
    pub escapes: u32,
}

/// Run one autopilot session.
///
/// # Determinism
///
/// Given the same seed and config, this function always produces the same
/// `SessionResult`.
///
/// # Errors
///
/// Returns an error if the configured grid cannot hold a level.
pub fn run_session(seed: u64, config: &SurveyConfig) -> Result<SessionResult, LevelGenError> {
    let mut state = GameState::new(config.game_config(), Box::new(SeededDice::new(seed)))?;
    let mut autopilot = Autopilot::new();
    let mut result = SessionResult {
        seed,
        outcome: SessionOutcome::TimedOut,
        turns: 0,
        final_health: 0,
        final_strength: 0,
        creatures_defeated: 0,
        resources_harvested: 0,
        purchases: 0,
        escapes: 0,
    };

    while !state.is_over() && state.turn() < config.max_turns {
        let command = autopilot.next_command(&state);
        let report = state.take_turn(command, &mut autopilot);
        for event in &report.events {
            match event {
                GameEvent::CreatureDefeated { .. } => result.creatures_defeated += 1,
                GameEvent::HarvestComplete { .. } => result.resources_harvested += 1,
                GameEvent::Purchased { .. } => result.purchases += 1,
                GameEvent::Escaped => result.escapes += 1,
                _ => {}
            }
        }
    }

    result.outcome = match state.status() {
        Status::Won => SessionOutcome::Won,
        Status::Lost => SessionOutcome::Lost,
        Status::Quit => SessionOutcome::Quit,
        Status::Playing => SessionOutcome::TimedOut,
    };
    result.turns = state.turn();
    result.final_health = state.player().health;
    result.final_strength = state.player().strength;

    debug!(seed, outcome = %result.outcome, turns = result.turns, "session finished");
    Ok(result)
}

/// Aggregated statistics over many sessions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SurveyStats {
    /// Sessions played.
    pub sessions: u64,
    /// Sessions won.
    pub wins: u64,
    /// Sessions lost.
    pub losses: u64,
    /// Sessions the autopilot quit.
    pub quits: u64,
    /// Sessions cut off by the turn cap.
    pub timeouts: u64,
    /// Turns across all sessions.
    pub total_turns: u64,
    /// Creatures defeated across all sessions.
    pub creatures_defeated: u64,
    /// Resources harvested across all sessions.
    pub resources_harvested: u64,
    /// Purchases across all sessions.
    pub purchases: u64,
    /// Escapes across all sessions.
    pub escapes: u64,
}

impl SurveyStats {
    /// Add a session result to the stats.
    pub fn add_result(&mut self, result: &SessionResult) {
        self.sessions += 1;
        match result.outcome {
            SessionOutcome::Won => self.wins += 1,
            SessionOutcome::Lost => self.losses += 1,
            SessionOutcome::Quit => self.quits += 1,
            SessionOutcome::TimedOut => self.timeouts += 1,
        }
        self.total_turns += u64::from(result.turns);
        self.creatures_defeated += u64::from(result.creatures_defeated);
        self.resources_harvested += u64::from(result.resources_harvested);
        self.purchases += u64::from(result.purchases);
        self.escapes += u64::from(result.escapes);
    }

    /// Merge another set of stats into this one.
    pub fn merge(&mut self, other: &SurveyStats) {
        self.sessions += other.sessions;
        self.wins += other.wins;
        self.losses += other.losses;
        self.quits += other.quits;
        self.timeouts += other.timeouts;
        self.total_turns += other.total_turns;
        self.creatures_defeated += other.creatures_defeated;
        self.resources_harvested += other.resources_harvested;
        self.purchases += other.purchases;
        self.escapes += other.escapes;
    }

    /// Fraction of sessions won (0.0-1.0).
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn win_rate(&self) -> f64 {
        if self.sessions == 0 {
            return 0.0;
        }
        self.wins as f64 / self.sessions as f64
    }

    /// Average session length in turns.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn avg_turns(&self) -> f64 {
        if self.sessions == 0 {
            return 0.0;
        }
        self.total_turns as f64 / self.sessions as f64
    }
}
