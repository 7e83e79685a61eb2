//! Grid and coordinate types.

use crate::game::TileContent;

/// A cell address on the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Coord {
    /// Row index, growing downwards.
    pub row: u16,
    /// Column index, growing to the right.
    pub col: u16,
}

impl Coord {
    /// The starting cell.
    pub const ORIGIN: Coord = Coord::new(0, 0);

    /// Create a new coordinate.
    #[must_use]
    pub const fn new(row: u16, col: u16) -> Self {
        Self { row, col }
    }

    /// The neighbouring cell in `direction`, if it lies inside a
    /// `width` x `height` grid.
    #[must_use]
    pub fn step(self, direction: Direction, width: u16, height: u16) -> Option<Coord> {
        let (row, col) = match direction {
            Direction::Up => (self.row.checked_sub(1)?, self.col),
            Direction::Down => (self.row.checked_add(1)?, self.col),
            Direction::Left => (self.row, self.col.checked_sub(1)?),
            Direction::Right => (self.row, self.col.checked_add(1)?),
        };
        (row < height && col < width).then_some(Coord::new(row, col))
    }

    /// Manhattan distance between two cells.
    #[must_use]
    pub fn distance(self, other: Coord) -> u32 {
        u32::from(self.row.abs_diff(other.row)) + u32::from(self.col.abs_diff(other.col))
    }
}

/// One of the four movement directions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Towards row 0.
    Up,
    /// Away from row 0.
    Down,
    /// Towards column 0.
    Left,
    /// Away from column 0.
    Right,
}

impl Direction {
    /// All directions, in a fixed order.
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];
}

/// The playing field: a fixed-size array of optional tile contents.
#[derive(Debug, Clone)]
pub struct Grid {
    /// Width of the grid in cells.
    width: u16,
    /// Height of the grid in cells.
    height: u16,
    /// Cells stored in row-major order.
    cells: Vec<Option<TileContent>>,
}

impl Grid {
    /// Create an empty grid.
    ///
    /// Returns `None` if width or height is zero.
    #[must_use]
    pub fn new(width: u16, height: u16) -> Option<Self> {
        if width == 0 || height == 0 {
            return None;
        }

        let size = usize::from(width) * usize::from(height);
        let mut cells = Vec::with_capacity(size);
        cells.resize_with(size, || None);

        Some(Self {
            width,
            height,
            cells,
        })
    }

    /// Get the width of the grid.
    #[must_use]
    pub const fn width(&self) -> u16 {
        self.width
    }

    /// Get the height of the grid.
    #[must_use]
    pub const fn height(&self) -> u16 {
        self.height
    }

    /// Check if a coordinate is within the grid bounds.
    #[must_use]
    pub const fn in_bounds(&self, coord: Coord) -> bool {
        coord.row < self.height && coord.col < self.width
    }

    fn index(&self, coord: Coord) -> Option<usize> {
        if self.in_bounds(coord) {
            Some(usize::from(coord.row) * usize::from(self.width) + usize::from(coord.col))
        } else {
            None
        }
    }

    /// The content at `coord`, or `None` if the cell is empty or out of bounds.
    #[must_use]
    pub fn content(&self, coord: Coord) -> Option<&TileContent> {
        self.index(coord).and_then(|idx| self.cells[idx].as_ref())
    }

    /// Mutable access to the content at `coord`.
    #[must_use]
    pub fn content_mut(&mut self, coord: Coord) -> Option<&mut TileContent> {
        self.index(coord).and_then(|idx| self.cells[idx].as_mut())
    }

    /// Check whether the cell at `coord` holds nothing.
    ///
    /// Out-of-bounds cells count as not empty.
    #[must_use]
    pub fn is_empty(&self, coord: Coord) -> bool {
        self.index(coord).is_some_and(|idx| self.cells[idx].is_none())
    }

    /// Put `content` into the cell at `coord`, replacing anything there.
    ///
    /// Returns `false` if the coordinate is out of bounds.
    pub fn place(&mut self, coord: Coord, content: TileContent) -> bool {
        if let Some(idx) = self.index(coord) {
            self.cells[idx] = Some(content);
            true
        } else {
            false
        }
    }

    /// Empty the cell at `coord`, returning what was there.
    pub fn clear(&mut self, coord: Coord) -> Option<TileContent> {
        let idx = self.index(coord)?;
        self.cells[idx].take()
    }

    /// Iterate over every cell in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (Coord, Option<&TileContent>)> {
        let width = usize::from(self.width);
        self.cells.iter().enumerate().map(move |(idx, cell)| {
            #[allow(clippy::cast_possible_truncation)]
            let coord = Coord::new((idx / width) as u16, (idx % width) as u16);
            (coord, cell.as_ref())
        })
    }

    /// Iterate over occupied cells only.
    pub fn occupied(&self) -> impl Iterator<Item = (Coord, &TileContent)> {
        self.iter()
            .filter_map(|(coord, cell)| cell.map(|content| (coord, content)))
    }

    /// Number of boss creatures on the grid.
    #[must_use]
    pub fn boss_count(&self) -> usize {
        self.occupied()
            .filter(|(_, content)| content.is_boss())
            .count()
    }

    /// Location of the first boss creature, if any remains.
    #[must_use]
    pub fn boss_position(&self) -> Option<Coord> {
        self.occupied()
            .find(|(_, content)| content.is_boss())
            .map(|(coord, _)| coord)
    }
}
