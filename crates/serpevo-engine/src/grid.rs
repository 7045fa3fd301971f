use serde::{Deserialize, Serialize};

use crate::Direction;

/// Occupancy marker for one grid cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, derive_more::IsVariant)]
pub enum Cell {
    #[default]
    Empty,
    Body,
    Head,
    Apple,
}

/// A cell coordinate.
///
/// Signed so that off-grid positions (the head stepping past a wall, a ray
/// marching beyond the boundary) are representable before the bounds check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Pos {
    pub row: i32,
    pub col: i32,
}

impl Pos {
    #[must_use]
    pub fn new(row: i32, col: i32) -> Self {
        Self { row, col }
    }

    /// The adjacent position one step in `direction`.
    #[must_use]
    pub fn stepped(self, direction: Direction) -> Self {
        let (row, col) = direction.step();
        Self {
            row: self.row + row,
            col: self.col + col,
        }
    }

    /// The position offset by `(row, col)`.
    #[must_use]
    pub fn offset(self, row: i32, col: i32) -> Self {
        Self {
            row: self.row + row,
            col: self.col + col,
        }
    }

    /// Manhattan distance to `other`.
    #[must_use]
    pub fn manhattan(self, other: Self) -> u32 {
        self.row.abs_diff(other.row) + self.col.abs_diff(other.col)
    }
}

/// The game board: a `rows x cols` occupancy matrix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    rows: usize,
    cols: usize,
    cells: Vec<Cell>,
}

impl Grid {
    /// Creates an empty grid.
    #[must_use]
    pub fn new(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            cells: vec![Cell::Empty; rows * cols],
        }
    }

    #[must_use]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[must_use]
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Whether `pos` lies inside the grid bounds.
    #[must_use]
    #[expect(clippy::cast_possible_wrap)]
    pub fn contains(&self, pos: Pos) -> bool {
        (0..self.rows as i32).contains(&pos.row) && (0..self.cols as i32).contains(&pos.col)
    }

    /// Returns the cell at `pos`.
    ///
    /// # Panics
    ///
    /// Panics if `pos` is outside the grid.
    #[must_use]
    pub fn get(&self, pos: Pos) -> Cell {
        assert!(self.contains(pos));
        self.cells[self.index(pos)]
    }

    /// Overwrites the cell at `pos`.
    ///
    /// # Panics
    ///
    /// Panics if `pos` is outside the grid.
    pub fn set(&mut self, pos: Pos, cell: Cell) {
        assert!(self.contains(pos));
        let index = self.index(pos);
        self.cells[index] = cell;
    }

    /// All currently empty cells, in row-major order.
    #[must_use]
    #[expect(clippy::cast_possible_wrap)]
    pub fn free_cells(&self) -> Vec<Pos> {
        let mut free = Vec::new();
        for row in 0..self.rows as i32 {
            for col in 0..self.cols as i32 {
                let pos = Pos::new(row, col);
                if self.get(pos).is_empty() {
                    free.push(pos);
                }
            }
        }
        free
    }

    #[expect(clippy::cast_sign_loss)]
    fn index(&self, pos: Pos) -> usize {
        pos.row as usize * self.cols + pos.col as usize
    }
}
