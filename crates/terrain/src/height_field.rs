//! Square grid of integer heights.

use serde::{Deserialize, Serialize};

use crate::errors::{Result, TerrainError};

/// Height of a single cell.
pub type Height = i32;

/// Square, row-major grid of heights whose side is `2^n + 1`.
///
/// Logical coordinate `(x, y)` maps to linear index `y * side + x`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeightField {
    side: usize,
    cells: Vec<Height>,
}

impl HeightField {
    /// Allocates a zeroed field, rejecting sides that are not `2^n + 1` with `n >= 1`.
    pub fn new(side: usize) -> Result<Self> {
        if !is_refinable_side(side) {
            return Err(TerrainError::InvalidSide { side });
        }

        let len = side
            .checked_mul(side)
            .ok_or_else(|| TerrainError::InvalidConfig(format!("side {side} is too large")))?;
        let mut cells = Vec::new();
        cells.try_reserve_exact(len).map_err(|err| {
            TerrainError::InvalidConfig(format!("cannot allocate {len} cells: {err}"))
        })?;
        cells.resize(len, 0);

        Ok(Self { side, cells })
    }

    /// Allocates a field of side `2^power + 1`.
    pub fn with_power(power: u32) -> Result<Self> {
        if power == 0 {
            return Err(TerrainError::InvalidSide { side: 2 });
        }
        let side = 1usize
            .checked_shl(power)
            .and_then(|span| span.checked_add(1))
            .ok_or_else(|| TerrainError::InvalidConfig(format!("power {power} is too large")))?;
        Self::new(side)
    }

    pub fn side(&self) -> usize {
        self.side
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Row-major view of every height.
    pub fn cells(&self) -> &[Height] {
        &self.cells
    }

    pub(crate) fn cells_mut(&mut self) -> &mut [Height] {
        &mut self.cells
    }

    /// Iterates rows from `y = 0` upwards.
    pub fn rows(&self) -> impl Iterator<Item = &[Height]> {
        self.cells.chunks(self.side)
    }

    pub fn get(&self, x: usize, y: usize) -> Result<Height> {
        let index = self.to_linear(x, y)?;
        Ok(self.cells[index])
    }

    pub fn set(&mut self, x: usize, y: usize, height: Height) -> Result<()> {
        let index = self.to_linear(x, y)?;
        self.cells[index] = height;
        Ok(())
    }

    pub fn to_linear(&self, x: usize, y: usize) -> Result<usize> {
        if x >= self.side || y >= self.side {
            return Err(self.out_of_range(x as i64, y as i64));
        }
        Ok(y * self.side + x)
    }

    pub fn from_linear(&self, index: usize) -> Result<(usize, usize)> {
        if index >= self.cells.len() {
            return Err(self.out_of_range(
                (index % self.side) as i64,
                (index / self.side) as i64,
            ));
        }
        Ok((index % self.side, index / self.side))
    }

    /// Whether a signed coordinate lies inside the grid.
    pub fn contains(&self, x: i64, y: i64) -> bool {
        let side = self.side as i64;
        (0..side).contains(&x) && (0..side).contains(&y)
    }

    /// Mean height of the in-bounds subset of `coords`.
    ///
    /// Out-of-bounds coordinates are dropped from both the sum and the count.
    /// If none remain the result is [`TerrainError::EmptyAverage`].
    pub fn average_of(&self, coords: &[(i64, i64)]) -> Result<f64> {
        let mut total = 0i64;
        let mut count = 0u32;

        for &(x, y) in coords {
            if self.contains(x, y) {
                total += i64::from(self.cells[y as usize * self.side + x as usize]);
                count += 1;
            }
        }

        if count == 0 {
            return Err(TerrainError::EmptyAverage);
        }
        Ok(total as f64 / f64::from(count))
    }

    fn out_of_range(&self, x: i64, y: i64) -> TerrainError {
        TerrainError::OutOfRange {
            x,
            y,
            side: self.side,
        }
    }
}

fn is_refinable_side(side: usize) -> bool {
    side >= 3 && (side - 1).is_power_of_two()
}
