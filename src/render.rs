//! Plain text status readout.
//!
//! ```text
//! @ . M .
//! . G . S
//! . . . B
//! HP:100 Str:10 Agi:10
//! Inventory: Gold:10 Nugget:3
//! ```

use crate::game::{GameState, Player, TileContent};

/// Symbol for an empty cell.
pub const EMPTY_SYMBOL: char = '.';

/// Symbol for the player's cell.
pub const PLAYER_SYMBOL: char = '@';

/// Render the grid followed by the status lines.
///
/// The player's symbol hides whatever shares its cell.
#[must_use]
pub fn render_text(state: &GameState) -> String {
    let mut output = render_grid(state);
    output.push_str(&render_status(state));
    output
}

/// Render the grid rows, one line each, symbols separated by spaces.
#[must_use]
pub fn render_grid(state: &GameState) -> String {
    let grid = state.grid();
    let position = state.player().position;
    let width = usize::from(grid.width());
    let mut output = String::with_capacity(width * 2 * usize::from(grid.height()));

    for (coord, content) in grid.iter() {
        let symbol = if coord == position {
            PLAYER_SYMBOL
        } else {
            content.map_or(EMPTY_SYMBOL, TileContent::symbol)
        };
        output.push(symbol);
        let last_in_row = usize::from(coord.col) + 1 == width;
        output.push(if last_in_row { '\n' } else { ' ' });
    }

    output
}

/// Render the stat line and the inventory line.
#[must_use]
pub fn render_status(state: &GameState) -> String {
    render_player(state.player())
}

/// Render a player's stat line and inventory line.
#[must_use]
pub fn render_player(player: &Player) -> String {
    let items: String = player
        .inventory()
        .map(|(item, quantity)| format!(" {item}:{quantity}"))
        .collect();
    format!(
        "HP:{} Str:{} Agi:{}\nInventory:{items}\n",
        player.health, player.strength, player.agility
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{Coord, Creature, Grid, Resource, ScriptedDice, Shop, GOLD};

    fn state() -> GameState {
        let mut grid = Grid::new(3, 2).unwrap();
        grid.place(Coord::new(0, 1), TileContent::Creature(Creature::monster()));
        grid.place(Coord::new(1, 0), TileContent::Resource(Resource::tree()));
        grid.place(Coord::new(1, 1), TileContent::Shop(Shop::standard()));
        grid.place(Coord::new(1, 2), TileContent::Creature(Creature::boss()));
        let mut player = Player::default();
        player.add(GOLD, 10);
        player.add("Nugget", 3);
        GameState::from_grid(grid, player, Box::new(ScriptedDice::new()))
    }

    #[test]
    fn test_render_text() {
        let text = render_text(&state());
        assert_eq!(
            text,
            "@ M .\nW S B\nHP:100 Str:10 Agi:10\nInventory: Gold:10 Nugget:3\n"
        );
    }

    #[test]
    fn test_render_status_empty_inventory() {
        let state = GameState::from_grid(
            Grid::new(2, 1).unwrap(),
            Player::default(),
            Box::new(ScriptedDice::new()),
        );
        assert_eq!(render_status(&state), "HP:100 Str:10 Agi:10\nInventory:\n");
    }

    #[test]
    fn test_player_hides_shared_cell() {
        let mut grid = Grid::new(2, 1).unwrap();
        grid.place(Coord::ORIGIN, TileContent::Shop(Shop::standard()));
        grid.place(Coord::new(0, 1), TileContent::Creature(Creature::boss()));
        let state = GameState::from_grid(grid, Player::default(), Box::new(ScriptedDice::new()));
        assert!(render_grid(&state).starts_with('@'));
    }
}
