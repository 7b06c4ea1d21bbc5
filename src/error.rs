use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PatrolError {
    #[error("cell ({x}, {y}) is outside the {rows}x{cols} grid")]
    OutOfRange {x: usize, y: usize, rows: usize, cols: usize},

    #[error("invalid guard orientation '{0}'")]
    InvalidOrientation(char),

    /// Mode A was asked to trace a grid the guard never leaves.
    #[error("guard did not leave the grid within {ticks} ticks")]
    NonTerminating {ticks: usize},

    #[error("row {row} has {found} cells, expected {expected}")]
    RaggedRow {row: usize, expected: usize, found: usize},

    #[error("map has no guard")]
    MissingStart,

    #[error("map has more than one guard, second one at ({row}, {col})")]
    MultipleStarts {row: usize, col: usize},

    #[error("map is empty")]
    EmptyMap,
}

pub type Result<T, E = PatrolError> = std::result::Result<T, E>;
