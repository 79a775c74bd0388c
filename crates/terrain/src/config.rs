//! Configuration types for terrain generation.

use serde::{Deserialize, Serialize};

use crate::errors::{Result, TerrainError};
use crate::height_field::Height;

/// Parameters of a diamond-square run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TerrainConfig {
    /// Half-range of the random perturbation at the coarsest pass.
    pub initial_roughness: u32,
    /// Upper bound for the four corner seeds (lower bound is 1).
    pub max_height: Height,
    /// Computed heights below this value are replaced by `water_floor`.
    pub water_threshold: Height,
    /// Height substituted for anything under `water_threshold`.
    pub water_floor: Height,
}

impl Default for TerrainConfig {
    fn default() -> Self {
        Self {
            initial_roughness: 10,
            max_height: 10,
            water_threshold: 3,
            water_floor: 1,
        }
    }
}

impl TerrainConfig {
    pub fn with_initial_roughness(mut self, roughness: u32) -> Self {
        self.initial_roughness = roughness;
        self
    }

    pub fn with_max_height(mut self, max_height: Height) -> Self {
        self.max_height = max_height;
        self
    }

    /// Sets the water clamp: anything below `threshold` becomes `floor`.
    pub fn with_water(mut self, threshold: Height, floor: Height) -> Self {
        self.water_threshold = threshold;
        self.water_floor = floor;
        self
    }

    /// Checks the bounds the generator relies on.
    ///
    /// Corners are drawn from `[1, max_height]` and never clamped, so the
    /// floor may not exceed 1.
    pub fn validate(&self) -> Result<()> {
        if self.max_height <= 0 {
            return Err(TerrainError::InvalidConfig(format!(
                "max_height must be positive, got {}",
                self.max_height
            )));
        }
        if self.water_floor > self.water_threshold {
            return Err(TerrainError::InvalidConfig(format!(
                "water_floor {} is above water_threshold {}",
                self.water_floor, self.water_threshold
            )));
        }
        if self.water_floor > 1 {
            return Err(TerrainError::InvalidConfig(format!(
                "water_floor {} is above the lowest corner seed (1)",
                self.water_floor
            )));
        }
        if i32::try_from(self.initial_roughness).is_err() {
            return Err(TerrainError::InvalidConfig(format!(
                "initial_roughness {} does not fit a height",
                self.initial_roughness
            )));
        }
        Ok(())
    }

    /// Applies the water rule to a freshly computed height.
    pub fn clamp_water(&self, height: Height) -> Height {
        if height < self.water_threshold {
            self.water_floor
        } else {
            height
        }
    }
}

/// Maps grid cells to renderer space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CellLayout {
    /// Horizontal distance between neighbouring cells.
    pub block_size: f32,
    /// World units per unit of height.
    pub vertical_scale: f32,
}

impl Default for CellLayout {
    fn default() -> Self {
        Self {
            block_size: 3.0,
            vertical_scale: 1.5,
        }
    }
}

/// Renderer-space position of a cell.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Position {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl CellLayout {
    /// Position of the cell at `index` in a grid of `side`, centred on the origin.
    pub fn position(&self, side: usize, index: usize, height: Height) -> Position {
        let centre = (side.saturating_sub(1)) as f32 / 2.0;
        let column = (index % side) as f32;
        let row = (index / side) as f32;

        Position {
            x: (column - centre) * self.block_size,
            y: height as f32 * self.vertical_scale,
            z: (row - centre) * self.block_size,
        }
    }
}
