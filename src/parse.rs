use std::path::Path;
use std::str::FromStr;

use anyhow::Context;
use tracing::debug;

use crate::error::{PatrolError, Result};
use crate::grid::Grid;
use crate::guard::{AgentState, Orientation};

/// A parsed puzzle: the floor and where the guard starts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatrolMap {
    pub grid: Grid,
    pub start: AgentState,
}

/// `.` is open floor, `#` an obstacle, and the one remaining cell is the guard,
/// drawn as `^`, `>`, `v` or `<`. The guard's cell is open floor.
pub fn parse_map(input: &str) -> Result<PatrolMap> {
    let mut start = None;
    let mut rows = vec![];
    for (ri, line) in input.trim().lines().map(str::trim_end).enumerate() {
        let mut row = Vec::with_capacity(line.len());
        for (ci, cell) in line.chars().enumerate() {
            match cell {
                '.' => row.push(false),
                '#' => row.push(true),
                glyph => {
                    if start.is_some() {return Err(PatrolError::MultipleStarts {row: ri, col: ci})}
                    start = Some(AgentState::new(ri, ci, Orientation::from_glyph(glyph)?));
                    row.push(false);
                }
            }
        }
        rows.push(row);
    }
    let grid = Grid::from_rows(rows)?;
    let start = start.ok_or(PatrolError::MissingStart)?;
    debug!(rows = grid.rows(), cols = grid.cols(), %start, "parsed map");
    Ok(PatrolMap {grid, start})
}

impl FromStr for PatrolMap {
    type Err = PatrolError;
    fn from_str(s: &str) -> Result<Self> {parse_map(s)}
}

pub fn load_map(path: impl AsRef<Path>) -> anyhow::Result<PatrolMap> {
    let path = path.as_ref();
    let input = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    parse_map(&input).with_context(|| format!("failed to parse {}", path.display()))
}
