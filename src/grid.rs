//! The lab floor: a rectangular bitmap of obstacles plus the read-only
//! [`Terrain`] view the simulator walks over.

use std::fmt;
use std::ops::Deref;

use bitvec::prelude::*;

use crate::error::{PatrolError, Result};
use crate::guard::Orientation;

/// A cell address; `x` is the row, `y` the column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Position {pub x: usize, pub y: usize}

impl Position {
    pub const fn new(x: usize, y: usize) -> Self {Position {x, y}}
}

impl From<(usize, usize)> for Position {
    fn from((x, y): (usize, usize)) -> Self {Position {x, y}}
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {write!(f, "({}, {})", self.x, self.y)}
}

/// Everything the simulator needs to know about the floor.
///
/// `blocked` is only ever asked about in-bounds positions; implementors may
/// panic otherwise.
pub trait Terrain {
    fn dimensions(&self) -> (usize, usize);
    fn blocked(&self, pos: Position) -> bool;

    fn contains(&self, pos: Position) -> bool {
        let (rows, cols) = self.dimensions();
        pos.x < rows && pos.y < cols
    }

    /// The neighbouring cell in `orientation`, or `None` if that leaves the grid.
    fn step(&self, pos: Position, orientation: Orientation) -> Option<Position> {
        let (dx, dy) = orientation.delta();
        let next = Position::new(pos.x.checked_add_signed(dx)?, pos.y.checked_add_signed(dy)?);
        self.contains(next).then_some(next)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Grid {
    rows: usize,
    cols: usize,
    cells: BitVec,
}

impl Grid {
    pub fn new(rows: usize, cols: usize) -> Result<Self> {
        if rows == 0 || cols == 0 {return Err(PatrolError::EmptyMap)}
        Ok(Grid {rows, cols, cells: bitvec![0; rows * cols]})
    }

    pub fn from_rows(rows: Vec<Vec<bool>>) -> Result<Self> {
        let cols = rows.first().map_or(0, Vec::len);
        if rows.is_empty() || cols == 0 {return Err(PatrolError::EmptyMap)}
        let mut cells = BitVec::with_capacity(rows.len() * cols);
        for (row, line) in rows.iter().enumerate() {
            if line.len() != cols {
                return Err(PatrolError::RaggedRow {row, expected: cols, found: line.len()});
            }
            cells.extend(line.iter().copied());
        }
        Ok(Grid {rows: rows.len(), cols, cells})
    }

    pub fn rows(&self) -> usize {self.rows}
    pub fn cols(&self) -> usize {self.cols}

    pub fn in_bounds(&self, x: isize, y: isize) -> bool {
        (0 .. self.rows as isize).contains(&x) && (0 .. self.cols as isize).contains(&y)
    }

    fn index(&self, pos: Position) -> Result<usize> {
        if pos.x < self.rows && pos.y < self.cols {
            Ok(pos.x * self.cols + pos.y)
        } else {
            Err(PatrolError::OutOfRange {x: pos.x, y: pos.y, rows: self.rows, cols: self.cols})
        }
    }

    pub fn is_obstacle(&self, pos: Position) -> Result<bool> {
        Ok(self.cells[self.index(pos)?])
    }

    pub fn with_obstacle_toggled(&self, pos: Position) -> Result<Grid> {
        let mut grid = self.clone();
        let at = grid.index(pos)?;
        let was = grid.cells[at];
        grid.cells.set(at, !was);
        Ok(grid)
    }

    /// Flips `pos` in place until the returned guard is dropped.
    pub fn toggled(&mut self, pos: Position) -> Result<Toggled<'_>> {
        let at = self.index(pos)?;
        let was = self.cells[at];
        self.cells.set(at, !was);
        Ok(Toggled {grid: self, at})
    }

    pub fn obstacles(&self) -> impl Iterator<Item = Position> + '_ {
        self.cells.iter_ones().map(|at| Position::new(at / self.cols, at % self.cols))
    }

    pub fn obstacle_count(&self) -> usize {self.cells.count_ones()}
}

impl Terrain for Grid {
    fn dimensions(&self) -> (usize, usize) {(self.rows, self.cols)}
    fn blocked(&self, pos: Position) -> bool {self.cells[pos.x * self.cols + pos.y]}
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for row in self.cells.chunks(self.cols) {
            for cell in row.iter() {
                f.write_str(if *cell {"#"} else {"."})?;
            }
            f.write_str("\n")?;
        }
        Ok(())
    }
}

/// A grid with one cell flipped; the flip is undone on drop.
pub struct Toggled<'a> {
    grid: &'a mut Grid,
    at: usize,
}

impl Deref for Toggled<'_> {
    type Target = Grid;
    fn deref(&self) -> &Grid {self.grid}
}

impl Terrain for Toggled<'_> {
    fn dimensions(&self) -> (usize, usize) {self.grid.dimensions()}
    fn blocked(&self, pos: Position) -> bool {self.grid.blocked(pos)}
}

impl Drop for Toggled<'_> {
    fn drop(&mut self) {
        let was = self.grid.cells[self.at];
        self.grid.cells.set(self.at, !was);
    }
}

/// A shared base grid seen through a single-cell exception.
#[derive(Debug, Clone, Copy)]
pub struct Overlay<'a> {
    base: &'a Grid,
    flipped: Position,
}

impl<'a> Overlay<'a> {
    pub fn new(base: &'a Grid, flipped: Position) -> Result<Self> {
        base.index(flipped)?;
        Ok(Overlay {base, flipped})
    }
}

impl Terrain for Overlay<'_> {
    fn dimensions(&self) -> (usize, usize) {self.base.dimensions()}
    fn blocked(&self, pos: Position) -> bool {self.base.blocked(pos) ^ (pos == self.flipped)}
}
