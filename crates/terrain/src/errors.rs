use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TerrainError {
    #[error("Invalid grid side {side}: must be 2^n + 1 with n >= 1")]
    InvalidSide { side: usize },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Coordinate ({x}, {y}) is outside a grid of side {side}")]
    OutOfRange { x: i64, y: i64, side: usize },

    #[error("Cannot average heights: no coordinate falls inside the grid")]
    EmptyAverage,

    #[error("Invalid classifier thresholds: {0}")]
    InvalidThresholds(String),
}

pub type Result<T, E = TerrainError> = std::result::Result<T, E>;
