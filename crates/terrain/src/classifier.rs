//! Height banding for display colours.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::errors::{Result, TerrainError};
use crate::height_field::Height;

/// HSL colour attached to a band. Presentation metadata only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hsl {
    pub hue: u16,
    pub saturation: u8,
    pub lightness: u8,
}

impl Hsl {
    pub const fn new(hue: u16, saturation: u8, lightness: u8) -> Self {
        Self {
            hue,
            saturation,
            lightness,
        }
    }
}

impl fmt::Display for Hsl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "hsl({}, {}%, {}%)",
            self.hue, self.saturation, self.lightness
        )
    }
}

/// Position of a band in the classifier's ordered table. Lower is lower ground.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Category(pub usize);

/// A band covering every height up to and including `upper`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Band {
    pub upper: Height,
    pub color: Hsl,
}

/// Maps heights to ordered categories using increasing upper bounds.
///
/// Heights above the last bound fall into an extra top category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeightClassifier {
    bands: Vec<Band>,
    top: Hsl,
}

impl Default for HeightClassifier {
    /// Water, sand, two shades of earth, grass, highland and snow.
    fn default() -> Self {
        Self {
            bands: vec![
                Band { upper: 1, color: Hsl::new(202, 88, 38) },
                Band { upper: 6, color: Hsl::new(39, 96, 43) },
                Band { upper: 12, color: Hsl::new(28, 87, 61) },
                Band { upper: 18, color: Hsl::new(22, 87, 60) },
                Band { upper: 24, color: Hsl::new(45, 96, 48) },
                Band { upper: 31, color: Hsl::new(62, 93, 66) },
            ],
            top: Hsl::new(60, 14, 93),
        }
    }
}

impl HeightClassifier {
    /// Builds a classifier; bounds must be non-empty and strictly increasing.
    pub fn new(bands: Vec<Band>, top: Hsl) -> Result<Self> {
        if bands.is_empty() {
            return Err(TerrainError::InvalidThresholds(
                "at least one band is required".into(),
            ));
        }
        if let Some(pair) = bands.windows(2).find(|pair| pair[0].upper >= pair[1].upper) {
            return Err(TerrainError::InvalidThresholds(format!(
                "bound {} is not below {}",
                pair[0].upper, pair[1].upper
            )));
        }
        Ok(Self { bands, top })
    }

    pub fn classify(&self, height: Height) -> Category {
        let index = self.bands.partition_point(|band| band.upper < height);
        Category(index)
    }

    /// Number of categories, including the top one.
    pub fn category_count(&self) -> usize {
        self.bands.len() + 1
    }

    pub fn color(&self, category: Category) -> Hsl {
        self.bands
            .get(category.0)
            .map(|band| band.color)
            .unwrap_or(self.top)
    }
}
