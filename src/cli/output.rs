//! Output formatting utilities for the survey command.

// Rates and averages are reported as floats
#![allow(clippy::cast_precision_loss, clippy::format_push_string)]

use delve::survey::{SessionResult, SurveyConfig, SurveyStats};
use serde::Serialize;

/// JSON-serializable survey summary.
#[derive(Debug, Serialize)]
pub(super) struct JsonSurveyResult {
    /// First session seed; session `i` uses `base_seed + i`.
    base_seed: u64,
    /// Grid width.
    width: u16,
    /// Grid height.
    height: u16,
    /// Turn cap per session.
    max_turns: u32,
    /// Sessions played.
    sessions: u64,
    /// Outcome counts.
    wins: u64,
    losses: u64,
    quits: u64,
    timeouts: u64,
    /// Win rate (0.0-1.0).
    win_rate: f64,
    /// Average session length in turns.
    avg_turns: f64,
    /// Per-session averages.
    avg_creatures_defeated: f64,
    avg_resources_harvested: f64,
    avg_purchases: f64,
    avg_escapes: f64,
}

impl JsonSurveyResult {
    /// Create from stats and the survey settings.
    pub(super) fn from_stats(stats: &SurveyStats, base_seed: u64, config: &SurveyConfig) -> Self {
        Self {
            base_seed,
            width: config.width,
            height: config.height,
            max_turns: config.max_turns,
            sessions: stats.sessions,
            wins: stats.wins,
            losses: stats.losses,
            quits: stats.quits,
            timeouts: stats.timeouts,
            win_rate: stats.win_rate(),
            avg_turns: stats.avg_turns(),
            avg_creatures_defeated: per_session(stats.creatures_defeated, stats.sessions),
            avg_resources_harvested: per_session(stats.resources_harvested, stats.sessions),
            avg_purchases: per_session(stats.purchases, stats.sessions),
            avg_escapes: per_session(stats.escapes, stats.sessions),
        }
    }
}

fn per_session(total: u64, sessions: u64) -> f64 {
    if sessions == 0 {
        return 0.0;
    }
    total as f64 / sessions as f64
}

fn percent(count: u64, sessions: u64) -> f64 {
    per_session(count, sessions) * 100.0
}

/// Format survey stats as human-readable text.
pub(super) fn format_survey_text(stats: &SurveyStats, base_seed: u64, config: &SurveyConfig) -> String {
    let mut output = String::new();
    let n = stats.sessions;

    output.push_str(&format!("Survey Results ({n} sessions)\n"));
    output.push_str("========================================\n");
    output.push_str(&format!(
        "Grid {}x{}, max {} turns, seeds {}..\n\n",
        config.width, config.height, config.max_turns, base_seed
    ));

    output.push_str("Outcomes:\n");
    output.push_str(&format!("  Won:       {:>6} ({:.1}%)\n", stats.wins, percent(stats.wins, n)));
    output.push_str(&format!("  Lost:      {:>6} ({:.1}%)\n", stats.losses, percent(stats.losses, n)));
    output.push_str(&format!("  Quit:      {:>6} ({:.1}%)\n", stats.quits, percent(stats.quits, n)));
    output.push_str(&format!(
        "  Timed out: {:>6} ({:.1}%)\n\n",
        stats.timeouts,
        percent(stats.timeouts, n)
    ));

    output.push_str("Per Session:\n");
    output.push_str(&format!("  Turns:               {:.1}\n", stats.avg_turns()));
    output.push_str(&format!(
        "  Creatures defeated:  {:.2}\n",
        per_session(stats.creatures_defeated, n)
    ));
    output.push_str(&format!(
        "  Resources harvested: {:.2}\n",
        per_session(stats.resources_harvested, n)
    ));
    output.push_str(&format!("  Purchases:           {:.2}\n", per_session(stats.purchases, n)));
    output.push_str(&format!("  Escapes:             {:.2}\n", per_session(stats.escapes, n)));

    output
}

/// Format session results as CSV, one row per session.
pub(super) fn format_survey_csv(results: &[SessionResult]) -> String {
    let mut output = String::new();

    // Header
    output.push_str(
        "seed,outcome,turns,final_health,final_strength,creatures_defeated,resources_harvested,purchases,escapes\n",
    );

    // Data rows
    for r in results {
        output.push_str(&format!(
            "{},{},{},{},{},{},{},{},{}\n",
            r.seed,
            r.outcome,
            r.turns,
            r.final_health,
            r.final_strength,
            r.creatures_defeated,
            r.resources_harvested,
            r.purchases,
            r.escapes
        ));
    }

    output
}

/// Format session results as JSON lines, one serialized row per session.
///
/// # Errors
///
/// Returns an error if a row fails to serialize.
pub(super) fn format_survey_jsonl(
    results: &[SessionResult],
) -> Result<String, serde_json::Error> {
    let mut output = String::new();
    for result in results {
        output.push_str(&serde_json::to_string(result)?);
        output.push('\n');
    }
    Ok(output)
}
