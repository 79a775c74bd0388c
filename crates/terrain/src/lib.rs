//! Procedural terrain height fields for external renderers.
//!
//! A [`TerrainGenerator`] fills a [`HeightField`] using the diamond-square
//! (midpoint displacement) algorithm. Every cell write is classified into a
//! display band and pushed synchronously through a [`ChangeSink`], so a
//! renderer can follow the grid without polling it.
//!
//! # Quick Start
//!
//! ```rust
//! use terrain::prelude::*;
//!
//! let generator = TerrainGenerator::new(TerrainConfig::default())?;
//! let mut field = HeightField::with_power(4)?;
//! let mut rng = RngSource::seeded(12345);
//! let mut sink = RecordingSink::new();
//!
//! let summary = generator.generate(&mut field, &mut rng, &mut sink)?;
//! assert_eq!(summary.writes, 17 * 17);
//! # Ok::<(), terrain::errors::TerrainError>(())
//! ```

pub mod classifier;
pub mod config;
pub mod errors;
pub mod generator;
pub mod height_field;
pub mod random;
pub mod sink;
pub mod trigger;

pub use classifier::{Band, Category, HeightClassifier, Hsl};
pub use config::{CellLayout, Position, TerrainConfig};
pub use errors::TerrainError;
pub use generator::{GenerationSummary, TerrainGenerator};
pub use height_field::{Height, HeightField};
pub use random::{RandomSource, RngSource};
pub use sink::{CellUpdate, ChangeSink, RecordingSink, TracingSink};
pub use trigger::{RegenerationTrigger, TerrainParams};

pub mod prelude {
    //! Convenient re-exports for common usage.

    pub use crate::{
        CellLayout, CellUpdate, ChangeSink, GenerationSummary, HeightClassifier, HeightField,
        RandomSource, RecordingSink, RegenerationTrigger, RngSource, TerrainConfig,
        TerrainError, TerrainGenerator, TerrainParams,
    };
}
