//! Delve CLI - play, script or survey grid exploration sessions.

// Allow print in the CLI binary
#![allow(clippy::print_stdout, clippy::print_stderr)]
#![cfg_attr(test, allow(clippy::unwrap_used))]

mod cli;

use clap::{Parser, Subcommand};
use delve::survey::SurveyConfig;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

/// Delve - a turn-based grid exploration game
#[derive(Parser, Debug)]
#[command(name = "delve")]
#[command(author, version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
enum Commands {
    /// Play interactively in a terminal UI
    Play {
        #[command(flatten)]
        options: cli::GameOptions,
    },

    /// Play in line mode: board on stdout, answers on stdin
    Run {
        #[command(flatten)]
        options: cli::GameOptions,

        /// Let the built-in autopilot make every decision
        #[arg(long)]
        autopilot: bool,
    },

    /// Run many autopilot sessions in parallel and aggregate statistics
    Survey {
        #[command(flatten)]
        options: cli::GameOptions,

        /// Number of sessions to run (default: 1000)
        #[arg(short = 'n', long, default_value = "1000")]
        sessions: u64,

        /// Turn cap per session (default: 2000)
        #[arg(short = 't', long, default_value = "2000")]
        max_turns: u32,

        /// Parallel threads (default: CPU count)
        #[arg(short = 'j', long)]
        threads: Option<usize>,

        /// Output format: text, json, csv, or jsonl
        #[arg(short, long, default_value = "text")]
        format: cli::SurveyFormat,

        /// Show progress bar
        #[arg(short, long)]
        progress: bool,
    },
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(tracing::Level::WARN.into()))
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let result = match args.command {
        Commands::Play { options } => cli::play::execute(options),

        Commands::Run { options, autopilot } => cli::run::execute(options, autopilot),

        Commands::Survey {
            options,
            sessions,
            max_turns,
            threads,
            format,
            progress,
        } => {
            let config = SurveyConfig {
                width: options.width,
                height: options.height,
                max_turns,
            };
            cli::survey::execute(sessions, options.seed, config, threads, format, progress)
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
