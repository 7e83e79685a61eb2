//! Procedural level generation.
//!
//! The boss goes on a random non-origin cell first. Every other non-origin
//! cell is then filled in row-major order from one roll against a fixed
//! cumulative table:
//!
//! | roll          | content                       |
//! |---------------|-------------------------------|
//! | `[0.00, 0.10)` | hostile monster              |
//! | `[0.10, 0.15)` | passive animal               |
//! | `[0.15, 0.30)` | resource (see below)         |
//! | `[0.30, 0.32)` | shop                         |
//! | otherwise      | empty                        |
//!
//! Resources take a second roll: below 0.4 is gold, below 0.8 is wood, the
//! rest is a diamond. Gold and wood then flip a coin between the small and
//! the large variant. The order of draws is fixed, so a seeded [`Dice`]
//! always produces the same level.

use tracing::{debug, warn};

use crate::game::{Coord, Creature, Dice, Grid, Resource, Shop, TileContent};

/// Upper bound of the monster band.
pub const MONSTER_CHANCE: f64 = 0.10;
/// Upper bound of the animal band.
pub const ANIMAL_CHANCE: f64 = 0.15;
/// Upper bound of the resource band.
pub const RESOURCE_CHANCE: f64 = 0.30;
/// Upper bound of the shop band.
pub const SHOP_CHANCE: f64 = 0.32;

const GOLD_CHANCE: f64 = 0.4;
const WOOD_CHANCE: f64 = 0.8;

/// Boss draws that may land on the origin before placement falls back.
const BOSS_ATTEMPTS: u32 = 64;

/// Error type for level generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LevelGenError {
    /// Width or height is zero.
    ZeroSize {
        /// Requested width.
        width: u16,
        /// Requested height.
        height: u16,
    },
    /// The grid has no cell besides the origin to hold the boss.
    TooSmall {
        /// Requested width.
        width: u16,
        /// Requested height.
        height: u16,
    },
}

impl std::fmt::Display for LevelGenError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LevelGenError::ZeroSize { width, height } => {
                write!(f, "Invalid grid dimensions {width}x{height} (must be > 0)")
            }
            LevelGenError::TooSmall { width, height } => write!(
                f,
                "Grid {width}x{height} is too small: the boss needs a cell other than the origin"
            ),
        }
    }
}

impl std::error::Error for LevelGenError {}

/// Generate a populated level.
///
/// # Errors
///
/// Returns an error if either dimension is zero or the grid has a single cell.
pub fn generate_level(width: u16, height: u16, dice: &mut dyn Dice) -> Result<Grid, LevelGenError> {
    let mut grid = Grid::new(width, height).ok_or(LevelGenError::ZeroSize { width, height })?;
    if width == 1 && height == 1 {
        return Err(LevelGenError::TooSmall { width, height });
    }

    let boss = place_boss(&mut grid, dice);

    for row in 0..height {
        for col in 0..width {
            let coord = Coord::new(row, col);
            if coord == Coord::ORIGIN || coord == boss {
                continue;
            }
            if let Some(content) = roll_content(dice) {
                grid.place(coord, content);
            }
        }
    }

    debug!(
        width,
        height,
        boss_row = boss.row,
        boss_col = boss.col,
        occupied = grid.occupied().count(),
        "level generated"
    );
    Ok(grid)
}

/// Put the boss on a uniformly chosen cell other than the origin.
///
/// Dice that keep landing on the origin get [`BOSS_ATTEMPTS`] tries, then
/// the boss takes the cell right of the origin (below it on a one-column
/// grid).
fn place_boss(grid: &mut Grid, dice: &mut dyn Dice) -> Coord {
    let drawn = (0..BOSS_ATTEMPTS)
        .map(|_| {
            let row = roll_axis(dice, grid.height());
            let col = roll_axis(dice, grid.width());
            Coord::new(row, col)
        })
        .find(|&coord| coord != Coord::ORIGIN);

    let coord = drawn.unwrap_or_else(|| {
        warn!(attempts = BOSS_ATTEMPTS, "boss draws kept hitting the origin");
        if grid.width() > 1 {
            Coord::new(0, 1)
        } else {
            Coord::new(1, 0)
        }
    });
    grid.place(coord, TileContent::Creature(Creature::boss()));
    coord
}

fn roll_axis(dice: &mut dyn Dice, len: u16) -> u16 {
    u16::try_from(dice.below(u32::from(len))).unwrap_or(0)
}

/// Sample the content of one non-boss cell.
pub fn roll_content(dice: &mut dyn Dice) -> Option<TileContent> {
    let roll = dice.unit();

    if roll < MONSTER_CHANCE {
        Some(TileContent::Creature(Creature::monster()))
    } else if roll < ANIMAL_CHANCE {
        Some(TileContent::Creature(Creature::animal()))
    } else if roll < RESOURCE_CHANCE {
        Some(TileContent::Resource(roll_resource(dice)))
    } else if roll < SHOP_CHANCE {
        Some(TileContent::Shop(Shop::standard()))
    } else {
        None
    }
}

fn roll_resource(dice: &mut dyn Dice) -> Resource {
    let roll = dice.unit();

    if roll < GOLD_CHANCE {
        if dice.below(2) == 0 {
            Resource::coin()
        } else {
            Resource::nugget()
        }
    } else if roll < WOOD_CHANCE {
        if dice.below(2) == 0 {
            Resource::bush()
        } else {
            Resource::tree()
        }
    } else {
        Resource::diamond()
    }
}
