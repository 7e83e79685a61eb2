//! Survey command implementation.

use super::output::{format_survey_csv, format_survey_jsonl, format_survey_text, JsonSurveyResult};
use super::{CliError, SurveyFormat};
use delve::survey::{run_session, SessionResult, SurveyConfig, SurveyStats};
use indicatif::{ProgressBar, ProgressStyle};
use rayon::prelude::*;
use std::time::Instant;
use tracing::warn;

/// Per-thread accumulator: running stats plus the rows CSV and JSON lines need.
#[derive(Debug, Default)]
struct Batch {
    stats: SurveyStats,
    results: Vec<SessionResult>,
    failures: u64,
}

impl Batch {
    fn merge(mut self, mut other: Batch) -> Batch {
        self.stats.merge(&other.stats);
        self.results.append(&mut other.results);
        self.failures += other.failures;
        self
    }
}

/// Execute the survey command.
///
/// # Errors
///
/// Returns an error if the grid is invalid or the report cannot be written.
pub(crate) fn execute(
    sessions: u64,
    seed: Option<u64>,
    config: SurveyConfig,
    threads: Option<usize>,
    format: SurveyFormat,
    progress: bool,
) -> Result<(), CliError> {
    config.game_config().validate()?;

    // Set thread pool size if specified
    if let Some(num_threads) = threads {
        rayon::ThreadPoolBuilder::new()
            .num_threads(num_threads)
            .build_global()
            .ok(); // Ignore error if already initialized
    }

    let base_seed = seed.unwrap_or_else(rand::random);

    let pb = progress.then(|| {
        let pb = ProgressBar::new(sessions);
        if let Ok(style) = ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} sessions ({per_sec})")
        {
            pb.set_style(style.progress_chars("=>-"));
        }
        pb
    });

    let keep_rows = matches!(format, SurveyFormat::Csv | SurveyFormat::Jsonl);
    let start = Instant::now();

    // Each thread folds into its own batch; batches are merged at the end
    let batch = (0..sessions)
        .into_par_iter()
        .fold(Batch::default, |mut local, i| {
            let session_seed = base_seed.wrapping_add(i);
            match run_session(session_seed, &config) {
                Ok(result) => {
                    local.stats.add_result(&result);
                    if keep_rows {
                        local.results.push(result);
                    }
                }
                Err(e) => {
                    warn!(seed = session_seed, error = %e, "session failed");
                    local.failures += 1;
                }
            }
            if let Some(pb) = &pb {
                pb.inc(1);
            }
            local
        })
        .reduce(Batch::default, Batch::merge);

    if let Some(pb) = &pb {
        pb.finish_with_message("done");
    }

    let duration = start.elapsed();
    let mut results = batch.results;
    results.sort_by_key(|r| r.seed);

    match format {
        SurveyFormat::Text => {
            println!();
            print!("{}", format_survey_text(&batch.stats, base_seed, &config));
            if batch.failures > 0 {
                println!("Failed sessions: {}", batch.failures);
            }
            println!();
            #[allow(clippy::cast_precision_loss)]
            let per_sec = if duration.as_secs_f64() > 0.0 {
                batch.stats.sessions as f64 / duration.as_secs_f64()
            } else {
                0.0
            };
            println!("Duration: {:.2}s ({per_sec:.0} sessions/sec)", duration.as_secs_f64());
        }
        SurveyFormat::Json => {
            let json_result = JsonSurveyResult::from_stats(&batch.stats, base_seed, &config);
            println!("{}", serde_json::to_string_pretty(&json_result)?);
        }
        SurveyFormat::Csv => {
            print!("{}", format_survey_csv(&results));
        }
        SurveyFormat::Jsonl => {
            print!("{}", format_survey_jsonl(&results)?);
        }
    }

    Ok(())
}
