//! Play command implementation - interactive terminal UI.

use super::prompt;
use super::{CliError, GameOptions};
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use delve::game::{
    CombatAction, Command, Controller, Creature, Direction, GameEvent, GameState, Offer, Player,
    Resource, SeededDice, ShopChoice, Status,
};
use delve::render::{render_grid, render_player};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction as Axis, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame, Terminal,
};
use std::collections::VecDeque;
use std::io::{self, stdout, Stdout};
use tracing::info;

/// Event log lines kept for display.
const LOG_CAPACITY: usize = 200;

/// Execute the play command.
///
/// # Errors
///
/// Returns an error if the level cannot be generated or the terminal fails.
pub(crate) fn execute(options: GameOptions) -> Result<(), CliError> {
    let seed = options.seed();
    let mut state = GameState::new(options.config(), Box::new(SeededDice::new(seed)))?;
    info!(seed, "starting interactive session");

    // Setup terminal
    enable_raw_mode()?;
    let mut out = stdout();
    execute!(out, EnterAlternateScreen)?;
    let terminal = Terminal::new(CrosstermBackend::new(out))?;

    let mut screen = Screen::new(terminal, seed);
    let result = screen.run(&mut state);

    // Restore terminal
    disable_raw_mode()?;
    execute!(screen.terminal.backend_mut(), LeaveAlternateScreen)?;

    result
}

/// Terminal front-end. Also answers interaction prompts, so it keeps a
/// snapshot of the board taken before each turn.
struct Screen {
    terminal: Terminal<CrosstermBackend<Stdout>>,
    seed: u64,
    header: String,
    board: Vec<String>,
    stats: String,
    log: VecDeque<String>,
    prompt: Vec<String>,
    /// First terminal failure inside a prompt, reported once the turn is over.
    error: Option<io::Error>,
}

impl Screen {
    fn new(terminal: Terminal<CrosstermBackend<Stdout>>, seed: u64) -> Self {
        Self {
            terminal,
            seed,
            header: String::new(),
            board: Vec::new(),
            stats: String::new(),
            log: VecDeque::with_capacity(LOG_CAPACITY),
            prompt: Vec::new(),
            error: None,
        }
    }

    fn run(&mut self, state: &mut GameState) -> Result<(), CliError> {
        loop {
            self.snapshot(state);
            self.prompt = vec![controls(state.status()).to_string()];
            self.draw()?;

            let key = read_key()?;
            let command = match (state.status(), key) {
                (Status::Playing, KeyCode::Char('q') | KeyCode::Esc) => Command::Quit,
                (_, KeyCode::Char('q') | KeyCode::Esc) => break,
                (Status::Won, KeyCode::Char('n')) => {
                    let event = state.reinitialize_level()?;
                    self.push_log(event.to_string());
                    continue;
                }
                (Status::Playing, code) => match direction(code) {
                    Some(direction) => Command::Move(direction),
                    None => continue,
                },
                _ => continue,
            };

            state.take_turn(command, self);
            if let Some(e) = self.error.take() {
                return Err(e.into());
            }
            if state.status() == Status::Quit {
                break;
            }
        }
        Ok(())
    }

    fn snapshot(&mut self, state: &GameState) {
        self.board = render_grid(state).lines().map(str::to_string).collect();
        self.stats = render_player(state.player());
        self.header = format!(
            " Delve | Seed {} | Level {} | Turn {} | {} ",
            self.seed,
            state.level(),
            state.turn(),
            status_label(state.status())
        );
    }

    fn push_log(&mut self, line: String) {
        if self.log.len() == LOG_CAPACITY {
            self.log.pop_front();
        }
        self.log.push_back(line);
    }

    fn draw(&mut self) -> io::Result<()> {
        let view = View {
            header: &self.header,
            board: &self.board,
            stats: &self.stats,
            log: &self.log,
            prompt: &self.prompt,
        };
        self.terminal.draw(|f| ui(f, &view))?;
        Ok(())
    }

    /// Show `lines` as the prompt and wait for a key. `None` once the
    /// terminal has failed.
    fn ask(&mut self, lines: Vec<String>) -> Option<KeyCode> {
        if self.error.is_some() {
            return None;
        }
        self.prompt = lines;
        match self.draw().and_then(|()| read_key()) {
            Ok(key) => Some(key),
            Err(e) => {
                self.error = Some(e);
                None
            }
        }
    }
}

impl Controller for Screen {
    fn engage(&mut self, _creature: &Creature, player: &Player) -> bool {
        self.stats = render_player(player);
        matches!(self.ask(vec![prompt::HUNT.to_string()]), Some(KeyCode::Char(c)) if prompt::is_confirm(c))
    }

    fn combat_action(&mut self, _creature: &Creature, player: &Player) -> Option<CombatAction> {
        self.stats = render_player(player);
        match self.ask(vec![prompt::COMBAT.to_string()]) {
            Some(KeyCode::Char(c)) => prompt::combat_action(c),
            Some(_) => None,
            None => Some(CombatAction::Attack),
        }
    }

    fn harvest(&mut self, _resource: &Resource) -> bool {
        matches!(self.ask(vec![prompt::HARVEST.to_string()]), Some(KeyCode::Char(c)) if prompt::is_confirm(c))
    }

    fn shop_choice(&mut self, offers: &[Offer], player: &Player) -> ShopChoice {
        self.stats = render_player(player);
        match self.ask(prompt::shop_menu(offers)) {
            Some(KeyCode::Char(c)) => prompt::shop_choice(c.encode_utf8(&mut [0; 4])),
            Some(KeyCode::Esc) | None => ShopChoice::Exit,
            Some(_) => ShopChoice::Unrecognized,
        }
    }

    fn notify(&mut self, event: &GameEvent) {
        self.push_log(event.to_string());
    }
}

/// Block until a key is pressed.
fn read_key() -> io::Result<KeyCode> {
    loop {
        if let Event::Key(key) = event::read()?
            && key.kind == KeyEventKind::Press
        {
            return Ok(key.code);
        }
    }
}

fn direction(code: KeyCode) -> Option<Direction> {
    match code {
        KeyCode::Up | KeyCode::Char('w') => Some(Direction::Up),
        KeyCode::Down | KeyCode::Char('s') => Some(Direction::Down),
        KeyCode::Left | KeyCode::Char('a') => Some(Direction::Left),
        KeyCode::Right | KeyCode::Char('d') => Some(Direction::Right),
        _ => None,
    }
}

const fn status_label(status: Status) -> &'static str {
    match status {
        Status::Playing => "PLAYING",
        Status::Won => "YOU WIN",
        Status::Lost => "GAME OVER",
        Status::Quit => "QUIT",
    }
}

const fn controls(status: Status) -> &'static str {
    match status {
        Status::Playing => " [←↑↓→/WASD] Move  [q] Quit ",
        Status::Won => " [n] Next level  [q] Quit ",
        Status::Lost | Status::Quit => " [q] Quit ",
    }
}

/// Borrowed pieces of the screen needed to draw a frame.
struct View<'a> {
    header: &'a str,
    board: &'a [String],
    stats: &'a str,
    log: &'a VecDeque<String>,
    prompt: &'a [String],
}

fn ui(f: &mut Frame, view: &View<'_>) {
    let prompt_height = u16::try_from(view.prompt.len()).unwrap_or(u16::MAX).saturating_add(2);
    let chunks = Layout::default()
        .direction(Axis::Vertical)
        .constraints([
            Constraint::Length(3),             // Header
            Constraint::Min(10),               // Board and side panel
            Constraint::Length(prompt_height), // Prompt
        ])
        .split(f.area());

    let header = Paragraph::new(view.header)
        .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(header, chunks[0]);

    let main_chunks = Layout::default()
        .direction(Axis::Horizontal)
        .constraints([Constraint::Percentage(65), Constraint::Percentage(35)])
        .split(chunks[1]);

    render_board(f, main_chunks[0], view.board);

    let side = Layout::default()
        .direction(Axis::Vertical)
        .constraints([Constraint::Length(4), Constraint::Min(3)])
        .split(main_chunks[1]);

    let stats = Paragraph::new(view.stats)
        .block(Block::default().borders(Borders::ALL).title(" Player "))
        .wrap(Wrap { trim: false });
    f.render_widget(stats, side[0]);

    render_log(f, side[1], view.log);

    let lines: Vec<Line> = view.prompt.iter().map(|l| Line::from(l.as_str())).collect();
    let prompt = Paragraph::new(lines)
        .style(Style::default().fg(Color::Gray))
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(prompt, chunks[2]);
}

fn render_board(f: &mut Frame, area: Rect, board: &[String]) {
    let lines: Vec<Line> = board
        .iter()
        .map(|row| {
            let spans: Vec<Span> = row
                .chars()
                .map(|ch| Span::styled(ch.to_string(), symbol_style(ch)))
                .collect();
            Line::from(spans)
        })
        .collect();

    let widget = Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title(" Map "));
    f.render_widget(widget, area);
}

fn render_log(f: &mut Frame, area: Rect, log: &VecDeque<String>) {
    let visible = usize::from(area.height.saturating_sub(2));
    let skip = log.len().saturating_sub(visible);
    let lines: Vec<Line> = log.iter().skip(skip).map(|l| Line::from(l.as_str())).collect();

    let widget = Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title(" Log "));
    f.render_widget(widget, area);
}

fn symbol_style(symbol: char) -> Style {
    let color = match symbol {
        '@' => return Style::default().fg(Color::LightGreen).add_modifier(Modifier::BOLD),
        'B' => Color::LightRed,
        'M' => Color::Red,
        'A' | 'G' => Color::LightYellow,
        'W' => Color::Yellow,
        'T' => Color::LightCyan,
        'S' => Color::LightBlue,
        _ => Color::DarkGray,
    };
    Style::default().fg(color)
}
