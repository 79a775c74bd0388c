//! Text previews of generated terrain.
//!
//! This crate is the reference controller for the `terrain` library: it
//! collects parameters, drives regeneration, and renders the finished grid as
//! an ASCII band map or a JSON snapshot.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use terrain::prelude::*;
//! use terrain_preview::render::render_ascii;
//!
//! let generator = TerrainGenerator::new(TerrainConfig::default())?;
//! let mut field = HeightField::with_power(4)?;
//! generator.generate(&mut field, &mut RngSource::seeded(7), &mut RecordingSink::new())?;
//! println!("{}", render_ascii(&field, generator.classifier()));
//! ```

pub mod render;

pub use render::{BandHistogram, Snapshot, render_ascii};
