use thiserror::Error;

pub type Result<T> = std::result::Result<T, MazeError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum MazeError {
    #[error("invalid maze dimensions {rows}x{cols} (both must be at least 1)")]
    InvalidDimensions { rows: usize, cols: usize },

    #[error("cell ({row}, {col}) is outside the {rows}x{cols} maze")]
    OutOfRange {
        row: usize,
        col: usize,
        rows: usize,
        cols: usize,
    },
}
