//! Run command implementation - line-oriented text mode.

use super::prompt;
use super::{CliError, GameOptions};
use delve::game::{
    Autopilot, CombatAction, Command, Controller, Creature, GameEvent, GameState, Offer, Player,
    Resource, SeededDice, ShopChoice, Status,
};
use delve::render::render_text;
use std::io::{self, BufRead, Write};
use tracing::info;

/// Execute the run command.
///
/// # Errors
///
/// Returns an error if the level cannot be generated or stdin/stdout fail.
pub(crate) fn execute(options: GameOptions, autopilot: bool) -> Result<(), CliError> {
    let seed = options.seed();
    let mut state = GameState::new(options.config(), Box::new(SeededDice::new(seed)))?;
    info!(seed, autopilot, "starting text session");

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut lines = LineController::new(stdin.lock(), stdout.lock());
    writeln!(lines.output, "Seed: {seed}")?;

    let pilot = autopilot.then(Autopilot::new);
    play(&mut state, &mut lines, pilot)?;
    Ok(())
}

/// Play until the session ends, printing the board before every command.
///
/// With an autopilot the input stream is never read.
fn play<R: BufRead, W: Write>(
    state: &mut GameState,
    lines: &mut LineController<R, W>,
    mut pilot: Option<Autopilot>,
) -> Result<Status, CliError> {
    loop {
        write!(lines.output, "{}", render_text(state))?;
        if state.is_over() {
            break;
        }

        let command = if let Some(pilot) = &pilot {
            let command = pilot.next_command(state);
            writeln!(lines.output, "> {command:?}")?;
            command
        } else {
            match lines.ask(&[prompt::MOVE]) {
                None => Command::Quit,
                Some(answer) => {
                    let Some(command) = prompt::parse_command(&answer) else {
                        writeln!(lines.output, "Unknown command.")?;
                        continue;
                    };
                    command
                }
            }
        };

        if let Some(pilot) = &mut pilot {
            let report = state.take_turn(command, pilot);
            for event in &report.events {
                writeln!(lines.output, "{event}")?;
            }
        } else {
            state.take_turn(command, lines);
        }

        if let Some(e) = lines.error.take() {
            return Err(e.into());
        }
    }

    lines.output.flush()?;
    Ok(state.status())
}

/// Controller that prints prompts and reads one answer line each.
///
/// At end of input it answers so that every interaction finishes: no hunt,
/// attack, no harvest, leave the shop.
struct LineController<R, W> {
    input: R,
    output: W,
    eof: bool,
    /// First I/O failure, reported once the turn is over.
    error: Option<io::Error>,
}

impl<R: BufRead, W: Write> LineController<R, W> {
    fn new(input: R, output: W) -> Self {
        Self {
            input,
            output,
            eof: false,
            error: None,
        }
    }

    /// Print `lines` and read an answer. `None` at end of input or on error.
    fn ask(&mut self, lines: &[&str]) -> Option<String> {
        if self.eof || self.error.is_some() {
            return None;
        }
        let result = self.prompt(lines);
        match result {
            Ok(Some(answer)) => Some(answer),
            Ok(None) => {
                self.eof = true;
                None
            }
            Err(e) => {
                self.error = Some(e);
                None
            }
        }
    }

    fn prompt(&mut self, lines: &[&str]) -> io::Result<Option<String>> {
        for line in lines {
            writeln!(self.output, "{line}")?;
        }
        self.output.flush()?;

        let mut answer = String::new();
        if self.input.read_line(&mut answer)? == 0 {
            return Ok(None);
        }
        Ok(Some(answer))
    }
}

impl<R: BufRead, W: Write> Controller for LineController<R, W> {
    fn engage(&mut self, _creature: &Creature, _player: &Player) -> bool {
        self.ask(&[prompt::HUNT])
            .and_then(|answer| prompt::first_char(&answer))
            .is_some_and(prompt::is_confirm)
    }

    fn combat_action(&mut self, _creature: &Creature, _player: &Player) -> Option<CombatAction> {
        match self.ask(&[prompt::COMBAT]) {
            Some(answer) => prompt::first_char(&answer).and_then(prompt::combat_action),
            None => Some(CombatAction::Attack),
        }
    }

    fn harvest(&mut self, _resource: &Resource) -> bool {
        self.ask(&[prompt::HARVEST])
            .and_then(|answer| prompt::first_char(&answer))
            .is_some_and(prompt::is_confirm)
    }

    fn shop_choice(&mut self, offers: &[Offer], _player: &Player) -> ShopChoice {
        let menu = prompt::shop_menu(offers);
        let menu: Vec<&str> = menu.iter().map(String::as_str).collect();
        self.ask(&menu)
            .map_or(ShopChoice::Exit, |answer| prompt::shop_choice(&answer))
    }

    fn notify(&mut self, event: &GameEvent) {
        if self.error.is_none()
            && let Err(e) = writeln!(self.output, "{event}")
        {
            self.error = Some(e);
        }
    }
}
