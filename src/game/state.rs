//! Game state management and turn orchestration.

use tracing::{debug, info};

use crate::game::{
    enter, generate_level, Controller, Coord, Dice, Direction, Encounter, GameEvent, Grid,
    LevelGenError, Player, PlayerStats,
};

/// Default grid width.
pub const DEFAULT_WIDTH: u16 = 30;
/// Default grid height.
pub const DEFAULT_HEIGHT: u16 = 30;

/// Session configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameConfig {
    /// Grid width in cells.
    pub width: u16,
    /// Grid height in cells.
    pub height: u16,
    /// Stats the player starts with.
    pub player: PlayerStats,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            player: PlayerStats::default(),
        }
    }
}

impl GameConfig {
    /// Check that a level can be generated with these dimensions.
    ///
    /// # Errors
    ///
    /// Returns an error if either dimension is zero or the grid is a single
    /// cell.
    pub const fn validate(&self) -> Result<(), LevelGenError> {
        let (width, height) = (self.width, self.height);
        if width == 0 || height == 0 {
            return Err(LevelGenError::ZeroSize { width, height });
        }
        if width == 1 && height == 1 {
            return Err(LevelGenError::TooSmall { width, height });
        }
        Ok(())
    }
}

/// Session status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Status {
    /// Turns are being accepted.
    Playing,
    /// The boss is gone.
    Won,
    /// The player died.
    Lost,
    /// The player quit. Neither a win nor a loss.
    Quit,
}

impl Status {
    /// Whether no further turns are processed.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        !matches!(self, Status::Playing)
    }
}

/// An abstract player command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Step one cell.
    Move(Direction),
    /// End the session.
    Quit,
}

/// What a turn did to the player's position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnOutcome {
    /// The player moved to this cell.
    Moved(Coord),
    /// The interaction disallowed the move.
    Stayed,
    /// The destination was outside the grid.
    OutOfBounds,
    /// The session was ended by the player.
    Quit,
    /// The session was already over; nothing happened.
    Ignored,
}

/// Everything a presentation layer needs after a turn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TurnReport {
    /// Movement result.
    pub outcome: TurnOutcome,
    /// Status after the turn.
    pub status: Status,
    /// Events in the order they happened.
    pub events: Vec<GameEvent>,
}

/// Complete game state.
pub struct GameState {
    config: GameConfig,
    grid: Grid,
    player: Player,
    dice: Box<dyn Dice>,
    status: Status,
    /// Commands processed, including rejected moves.
    turn: u32,
    /// Current level, starting at 1.
    level: u32,
}

impl std::fmt::Debug for GameState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GameState")
            .field("config", &self.config)
            .field("player", &self.player)
            .field("status", &self.status)
            .field("turn", &self.turn)
            .field("level", &self.level)
            .finish_non_exhaustive()
    }
}

impl GameState {
    /// Start a session: generate the first level from `dice`.
    ///
    /// The same dice keep serving every roll of the session.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured grid cannot hold a level.
    pub fn new(config: GameConfig, mut dice: Box<dyn Dice>) -> Result<Self, LevelGenError> {
        config.validate()?;
        let grid = generate_level(config.width, config.height, dice.as_mut())?;
        info!(width = config.width, height = config.height, "session started");

        Ok(Self {
            config,
            grid,
            player: Player::new(config.player),
            dice,
            status: Status::Playing,
            turn: 0,
            level: 1,
        })
    }

    /// Start a session on a prepared grid.
    ///
    /// Used to set up exact scenarios. The status is evaluated immediately,
    /// so a grid without a boss starts out won.
    #[must_use]
    pub fn from_grid(grid: Grid, player: Player, dice: Box<dyn Dice>) -> Self {
        let config = GameConfig {
            width: grid.width(),
            height: grid.height(),
            player: PlayerStats {
                health: player.health,
                strength: player.strength,
                agility: player.agility,
            },
        };
        let mut state = Self {
            config,
            grid,
            player,
            dice,
            status: Status::Playing,
            turn: 0,
            level: 1,
        };
        state.status = state.evaluate_status();
        state
    }

    /// The session configuration.
    #[must_use]
    pub const fn config(&self) -> &GameConfig {
        &self.config
    }

    /// The playing field.
    #[must_use]
    pub const fn grid(&self) -> &Grid {
        &self.grid
    }

    /// The player.
    #[must_use]
    pub const fn player(&self) -> &Player {
        &self.player
    }

    /// Current status.
    #[must_use]
    pub const fn status(&self) -> Status {
        self.status
    }

    /// Number of commands processed.
    #[must_use]
    pub const fn turn(&self) -> u32 {
        self.turn
    }

    /// Current level number, starting at 1.
    #[must_use]
    pub const fn level(&self) -> u32 {
        self.level
    }

    /// Check if the session is over.
    #[must_use]
    pub const fn is_over(&self) -> bool {
        self.status.is_terminal()
    }

    /// Process one command.
    ///
    /// Interactions on the destination cell ask `controller` for decisions.
    /// Once the session is over every command is ignored.
    pub fn take_turn(&mut self, command: Command, controller: &mut dyn Controller) -> TurnReport {
        let mut events = Vec::new();

        if self.is_over() {
            return TurnReport {
                outcome: TurnOutcome::Ignored,
                status: self.status,
                events,
            };
        }

        self.turn += 1;

        let direction = match command {
            Command::Quit => {
                info!(turn = self.turn, "player quit");
                self.status = Status::Quit;
                return TurnReport {
                    outcome: TurnOutcome::Quit,
                    status: self.status,
                    events,
                };
            }
            Command::Move(direction) => direction,
        };

        let outcome = self.move_player(direction, controller, &mut events);
        debug!(turn = self.turn, ?direction, ?outcome, "turn");

        let status = self.evaluate_status();
        if status != self.status {
            let event = match status {
                Status::Lost => GameEvent::GameOver,
                _ => GameEvent::BossDefeated,
            };
            info!(turn = self.turn, ?status, "session ended");
            record(controller, &mut events, event);
            self.status = status;
        }

        TurnReport {
            outcome,
            status: self.status,
            events,
        }
    }

    fn move_player(
        &mut self,
        direction: Direction,
        controller: &mut dyn Controller,
        events: &mut Vec<GameEvent>,
    ) -> TurnOutcome {
        let Some(destination) =
            self.player
                .position
                .step(direction, self.grid.width(), self.grid.height())
        else {
            record(controller, events, GameEvent::OutOfBounds);
            return TurnOutcome::OutOfBounds;
        };

        if let Some(content) = self.grid.content_mut(destination) {
            let mut encounter =
                Encounter::new(&mut self.player, self.dice.as_mut(), controller, events);
            let allowed = enter(content, &mut encounter);
            if !allowed {
                return TurnOutcome::Stayed;
            }
            if content.is_consumed() {
                self.grid.clear(destination);
            }
        }

        self.player.position = destination;
        TurnOutcome::Moved(destination)
    }

    /// Loss takes priority over a win on the same turn.
    fn evaluate_status(&self) -> Status {
        if self.player.is_dead() {
            Status::Lost
        } else if self.grid.boss_count() == 0 {
            Status::Won
        } else {
            Status::Playing
        }
    }

    /// Generate a fresh level with the session's dice.
    ///
    /// Stats and inventory carry over; the player returns to the origin.
    /// The status is re-evaluated, so a dead player stays lost. Returns the
    /// [`GameEvent::LevelStarted`] event for the new level.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured grid cannot hold a level.
    pub fn reinitialize_level(&mut self) -> Result<GameEvent, LevelGenError> {
        self.grid = generate_level(self.config.width, self.config.height, self.dice.as_mut())?;
        self.player.position = Coord::ORIGIN;
        self.level += 1;
        self.status = self.evaluate_status();
        info!(level = self.level, "level started");
        Ok(GameEvent::LevelStarted { level: self.level })
    }
}

fn record(controller: &mut dyn Controller, events: &mut Vec<GameEvent>, event: GameEvent) {
    debug!(%event, "game event");
    controller.notify(&event);
    events.push(event);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::interact::testing::ScriptedController;
    use crate::game::{Creature, Resource, ScriptedDice, SeededDice, TileContent, GOLD};

    /// 3x3 grid with the boss in the far corner.
    fn scenario() -> Grid {
        let mut grid = Grid::new(3, 3).unwrap();
        grid.place(Coord::new(2, 2), TileContent::Creature(Creature::boss()));
        grid
    }

    fn state_with(grid: Grid, player: Player) -> GameState {
        GameState::from_grid(grid, player, Box::new(ScriptedDice::new().with_fallback(4, 0.0)))
    }

    #[test]
    fn test_new_session_defaults() {
        let state = GameState::new(GameConfig::default(), Box::new(SeededDice::new(1))).unwrap();
        assert_eq!(state.status(), Status::Playing);
        assert_eq!(state.player().position, Coord::ORIGIN);
        assert_eq!(state.grid().width(), 30);
        assert_eq!(state.grid().boss_count(), 1);
        assert_eq!(state.level(), 1);
    }

    #[test]
    fn test_new_session_with_zero_dice() {
        let state = GameState::new(GameConfig::default(), Box::new(ScriptedDice::new())).unwrap();
        assert_eq!(state.grid().boss_position(), Some(Coord::new(0, 1)));
        assert_eq!(state.status(), Status::Playing);
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = GameConfig {
            width: 0,
            ..GameConfig::default()
        };
        assert!(GameState::new(config, Box::new(SeededDice::new(1))).is_err());
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_move_into_empty_cell() {
        let mut state = state_with(scenario(), Player::default());
        let mut controller = ScriptedController::default();

        let report = state.take_turn(Command::Move(Direction::Right), &mut controller);
        assert_eq!(report.outcome, TurnOutcome::Moved(Coord::new(0, 1)));
        assert_eq!(report.status, Status::Playing);
        assert!(report.events.is_empty());
        assert_eq!(state.turn(), 1);
    }

    #[test]
    fn test_out_of_bounds_rejected() {
        let mut state = state_with(scenario(), Player::default());
        let mut controller = ScriptedController::default();

        let report = state.take_turn(Command::Move(Direction::Up), &mut controller);
        assert_eq!(report.outcome, TurnOutcome::OutOfBounds);
        assert_eq!(report.events, vec![GameEvent::OutOfBounds]);
        assert_eq!(state.player().position, Coord::ORIGIN);
        // The turn still consumes the input
        assert_eq!(state.turn(), 1);
        assert_eq!(controller.notified, vec![GameEvent::OutOfBounds]);
    }

    #[test]
    fn test_consumed_tile_cleared() {
        let mut grid = scenario();
        grid.place(Coord::new(0, 1), TileContent::Resource(Resource::coin()));
        let mut state = state_with(grid, Player::default());
        let mut controller = ScriptedController::default();
        controller.harvest.push_back(true);

        let report = state.take_turn(Command::Move(Direction::Right), &mut controller);
        assert_eq!(report.outcome, TurnOutcome::Moved(Coord::new(0, 1)));
        assert!(state.grid().is_empty(Coord::new(0, 1)));
        assert_eq!(state.player().quantity("Coin"), 1);
    }

    #[test]
    fn test_unfinished_tile_shared_with_player() {
        let mut grid = scenario();
        grid.place(Coord::new(1, 0), TileContent::Creature(Creature::animal()));
        let mut state = state_with(grid, Player::default());
        let mut controller = ScriptedController::default();
        controller.engage.push_back(false);

        let report = state.take_turn(Command::Move(Direction::Down), &mut controller);
        assert_eq!(report.outcome, TurnOutcome::Moved(Coord::new(1, 0)));
        assert!(!state.grid().is_empty(Coord::new(1, 0)));
    }

    #[test]
    fn test_defeating_boss_wins() {
        let mut grid = Grid::new(2, 1).unwrap();
        grid.place(
            Coord::new(0, 1),
            TileContent::Creature(Creature::new(
                crate::game::CreatureKind::Boss,
                "Dragon",
                14,
                30,
                true,
            )),
        );
        let mut state = state_with(grid, Player::default());
        let mut controller = ScriptedController::default();

        let report = state.take_turn(Command::Move(Direction::Right), &mut controller);
        assert_eq!(report.status, Status::Won);
        assert_eq!(report.outcome, TurnOutcome::Moved(Coord::new(0, 1)));
        assert_eq!(report.events.last(), Some(&GameEvent::BossDefeated));
        assert_eq!(state.grid().boss_count(), 0);

        let ignored = state.take_turn(Command::Move(Direction::Left), &mut controller);
        assert_eq!(ignored.outcome, TurnOutcome::Ignored);
        assert_eq!(state.turn(), 1);
    }

    #[test]
    fn test_death_loses_without_moving() {
        let mut grid = scenario();
        grid.place(Coord::new(0, 1), TileContent::Creature(Creature::boss()));
        let mut player = Player::default();
        player.health = 30;
        let mut state = state_with(grid, player);
        let mut controller = ScriptedController::default();

        let report = state.take_turn(Command::Move(Direction::Right), &mut controller);
        assert_eq!(report.outcome, TurnOutcome::Stayed);
        assert_eq!(report.status, Status::Lost);
        assert_eq!(state.player().position, Coord::ORIGIN);
        assert_eq!(report.events.last(), Some(&GameEvent::GameOver));
    }

    #[test]
    fn test_quit_is_terminal() {
        let mut state = state_with(scenario(), Player::default());
        let mut controller = ScriptedController::default();

        let report = state.take_turn(Command::Quit, &mut controller);
        assert_eq!(report.outcome, TurnOutcome::Quit);
        assert_eq!(state.status(), Status::Quit);
        assert!(state.is_over());
    }

    #[test]
    fn test_grid_without_boss_starts_won() {
        let state = state_with(Grid::new(2, 2).unwrap(), Player::default());
        assert_eq!(state.status(), Status::Won);
    }

    #[test]
    fn test_reinitialize_keeps_inventory() {
        let mut state = GameState::new(
            GameConfig {
                width: 8,
                height: 8,
                ..GameConfig::default()
            },
            Box::new(SeededDice::new(5)),
        )
        .unwrap();
        state.player.add(GOLD, 12);
        state.player.position = Coord::new(3, 3);
        state.status = Status::Won;

        let event = state.reinitialize_level().unwrap();
        assert_eq!(event, GameEvent::LevelStarted { level: 2 });
        assert_eq!(event.to_string(), "Level 2");
        assert_eq!(state.status(), Status::Playing);
        assert_eq!(state.level(), 2);
        assert_eq!(state.player().position, Coord::ORIGIN);
        assert_eq!(state.player().quantity(GOLD), 12);
        assert_eq!(state.grid().boss_count(), 1);
    }
}
