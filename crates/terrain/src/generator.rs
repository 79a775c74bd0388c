//! Diamond-square refinement over a [`HeightField`].

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::classifier::HeightClassifier;
use crate::config::{CellLayout, TerrainConfig};
use crate::errors::Result;
use crate::height_field::{Height, HeightField};
use crate::random::RandomSource;
use crate::sink::{CellUpdate, ChangeSink};

/// Outcome of a completed run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationSummary {
    /// Square + diamond passes performed.
    pub passes: u32,
    /// Cell writes reported to the sink, corners included.
    pub writes: usize,
    pub min_height: Height,
    pub max_height: Height,
}

/// Fills a height field with midpoint-displacement terrain.
///
/// Each call to [`generate`](Self::generate) is a full, independent run: the
/// corners are re-seeded and every cell is rewritten. Cells are classified and
/// pushed to the sink one at a time, in the order they are computed.
#[derive(Debug, Clone)]
pub struct TerrainGenerator {
    config: TerrainConfig,
    classifier: HeightClassifier,
    layout: CellLayout,
}

impl TerrainGenerator {
    /// Creates a generator with the default band table and layout.
    pub fn new(config: TerrainConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            classifier: HeightClassifier::default(),
            layout: CellLayout::default(),
        })
    }

    pub fn with_classifier(mut self, classifier: HeightClassifier) -> Self {
        self.classifier = classifier;
        self
    }

    pub fn with_layout(mut self, layout: CellLayout) -> Self {
        self.layout = layout;
        self
    }

    pub fn config(&self) -> &TerrainConfig {
        &self.config
    }

    pub fn classifier(&self) -> &HeightClassifier {
        &self.classifier
    }

    pub fn layout(&self) -> &CellLayout {
        &self.layout
    }

    /// Replaces the parameters used by the next run.
    pub fn set_config(&mut self, config: TerrainConfig) -> Result<()> {
        config.validate()?;
        self.config = config;
        Ok(())
    }

    /// Runs diamond-square to completion over `field`.
    pub fn generate(
        &self,
        field: &mut HeightField,
        rng: &mut impl RandomSource,
        sink: &mut impl ChangeSink,
    ) -> Result<GenerationSummary> {
        info!(
            side = field.side(),
            roughness = self.config.initial_roughness,
            max_height = self.config.max_height,
            "Generating terrain"
        );

        let mut run = Run {
            generator: self,
            field: &mut *field,
            rng,
            sink,
            writes: 0,
        };

        run.seed_corners();

        let mut chunk = run.field.side() - 1;
        // Fits: validate() checks the roughness against i32.
        let mut roughness = self.config.initial_roughness as i32;
        let mut passes = 0;

        while chunk > 1 {
            let half = chunk / 2;
            debug!(chunk, half, roughness, "Refinement pass");

            run.square_step(chunk, half, roughness)?;
            run.diamond_step(chunk, half, roughness)?;

            chunk /= 2;
            roughness /= 2;
            passes += 1;
        }

        let writes = run.writes;
        let cells = field.cells();
        let summary = GenerationSummary {
            passes,
            writes,
            min_height: cells.iter().copied().min().unwrap_or_default(),
            max_height: cells.iter().copied().max().unwrap_or_default(),
        };

        info!(
            passes = summary.passes,
            writes = summary.writes,
            min = summary.min_height,
            max = summary.max_height,
            "Terrain generated"
        );
        Ok(summary)
    }
}

/// Mutable state of a single `generate` call.
struct Run<'a, R: ?Sized, S: ?Sized> {
    generator: &'a TerrainGenerator,
    field: &'a mut HeightField,
    rng: &'a mut R,
    sink: &'a mut S,
    writes: usize,
}

impl<R: RandomSource + ?Sized, S: ChangeSink + ?Sized> Run<'_, R, S> {
    fn seed_corners(&mut self) {
        let last = self.field.side() - 1;
        let max_height = self.generator.config.max_height;

        for (x, y) in [(0, 0), (last, 0), (0, last), (last, last)] {
            let height = self.rng.int_inclusive(1, max_height);
            self.write(x, y, height);
        }
    }

    /// Sets the centre of every `chunk`-sized square from its four corners.
    fn square_step(&mut self, chunk: usize, half: usize, roughness: i32) -> Result<()> {
        let last = self.field.side() - 1;

        for y in (0..last).step_by(chunk) {
            for x in (0..last).step_by(chunk) {
                let (x0, y0) = (x as i64, y as i64);
                let (x1, y1) = ((x + chunk) as i64, (y + chunk) as i64);
                let average = self
                    .field
                    .average_of(&[(x0, y0), (x1, y0), (x0, y1), (x1, y1)])?;
                let height = self.displace(average, roughness);
                self.write(x + half, y + half, height);
            }
        }
        Ok(())
    }

    /// Sets every diamond point from its axis neighbours at distance `half`.
    ///
    /// Neighbours off the grid are left out of the average; there is no wraparound.
    fn diamond_step(&mut self, chunk: usize, half: usize, roughness: i32) -> Result<()> {
        let side = self.field.side();

        for y in (0..side).step_by(half) {
            for x in ((y + half) % chunk..side).step_by(chunk) {
                let (cx, cy, h) = (x as i64, y as i64, half as i64);
                let average = self
                    .field
                    .average_of(&[(cx, cy - h), (cx - h, cy), (cx + h, cy), (cx, cy + h)])?;
                let height = self.displace(average, roughness);
                self.write(x, y, height);
            }
        }
        Ok(())
    }

    fn displace(&mut self, average: f64, roughness: i32) -> Height {
        let offset = self.rng.int_inclusive(-roughness, roughness);
        let height = (average + f64::from(offset)).floor() as Height;
        self.generator.config.clamp_water(height)
    }

    fn write(&mut self, x: usize, y: usize, height: Height) {
        let side = self.field.side();
        let index = y * side + x;
        // Callers only pass coordinates inside [0, side).
        self.field.cells_mut()[index] = height;

        let category = self.generator.classifier.classify(height);
        let position = self.generator.layout.position(side, index, height);
        self.sink.notify(CellUpdate {
            index,
            height,
            category,
            position,
        });
        self.writes += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::RngSource;
    use crate::sink::RecordingSink;

    fn run(side: usize, config: TerrainConfig, seed: u64) -> (HeightField, RecordingSink) {
        let generator = TerrainGenerator::new(config).unwrap();
        let mut field = HeightField::new(side).unwrap();
        let mut rng = RngSource::seeded(seed);
        let mut sink = RecordingSink::new();
        generator.generate(&mut field, &mut rng, &mut sink).unwrap();
        (field, sink)
    }

    #[test]
    fn test_rejects_invalid_config() {
        assert!(TerrainGenerator::new(TerrainConfig::default().with_max_height(0)).is_err());
    }

    #[test]
    fn test_every_cell_written() {
        for side in [3, 5, 9, 17, 33] {
            let (field, sink) = run(side, TerrainConfig::default(), 42);
            let latest = sink.latest();
            assert_eq!(latest.len(), side * side, "side {side}");
            for (index, update) in latest {
                assert_eq!(field.cells()[index], update.height);
            }
        }
    }

    #[test]
    fn test_corners_in_seed_range() {
        let config = TerrainConfig::default().with_max_height(6);
        for seed in 0..20 {
            let (field, sink) = run(9, config, seed);
            // Corners are the first four writes and are never rewritten.
            let corners: Vec<usize> = sink.updates()[..4].iter().map(|u| u.index).collect();
            assert_eq!(corners, vec![0, 8, 72, 80]);
            for index in corners {
                let height = field.cells()[index];
                assert!((1..=6).contains(&height), "seed {seed}: corner {height}");
                assert_eq!(sink.updates().iter().filter(|u| u.index == index).count(), 1);
            }
        }
    }

    #[test]
    fn test_nothing_below_water_floor() {
        let config = TerrainConfig::default()
            .with_initial_roughness(20)
            .with_max_height(5)
            .with_water(3, 0);
        let corners = [0, 16, 272, 288];
        for seed in 0..20 {
            let (field, _) = run(17, config, seed);
            assert!(field.cells().iter().all(|&h| h >= 0), "seed {seed}");
            // Corner seeds are never clamped; everything else is water or at least 3.
            let refined = field
                .cells()
                .iter()
                .enumerate()
                .filter(|(index, _)| !corners.contains(index));
            for (index, &height) in refined {
                assert!(height == 0 || height >= 3, "seed {seed}: cell {index} = {height}");
            }
        }
    }

    #[test]
    fn test_deterministic() {
        let config = TerrainConfig::default().with_initial_roughness(8);
        let (a, _) = run(17, config, 1234);
        let (b, _) = run(17, config, 1234);
        assert_eq!(a, b);

        let (c, _) = run(17, config, 4321);
        assert_ne!(a, c);
    }

    #[test]
    fn test_notifications_carry_classification() {
        let generator = TerrainGenerator::new(TerrainConfig::default()).unwrap();
        let (_, sink) = run(9, TerrainConfig::default(), 3);
        for update in sink.updates() {
            assert_eq!(update.category, generator.classifier().classify(update.height));
            assert_eq!(
                update.position,
                generator.layout().position(9, update.index, update.height)
            );
        }
    }

    #[test]
    fn test_summary() {
        let generator = TerrainGenerator::new(TerrainConfig::default()).unwrap();
        let mut field = HeightField::new(17).unwrap();
        let mut rng = RngSource::seeded(5);
        let mut sink = RecordingSink::new();
        let summary = generator.generate(&mut field, &mut rng, &mut sink).unwrap();

        assert_eq!(summary.passes, 4);
        assert_eq!(summary.writes, sink.len());
        assert_eq!(summary.writes, 17 * 17);
        assert_eq!(summary.min_height, *field.cells().iter().min().unwrap());
        assert_eq!(summary.max_height, *field.cells().iter().max().unwrap());
    }

    #[test]
    fn test_zero_roughness_is_smooth_interpolation() {
        // Corners still random, but without perturbation every cell stays within them.
        let config = TerrainConfig::default()
            .with_initial_roughness(0)
            .with_water(i32::MIN, i32::MIN);
        let (field, _) = run(9, config, 77);
        let corners = [0, 8, 72, 80].map(|i| field.cells()[i]);
        let lo = *corners.iter().min().unwrap();
        let hi = *corners.iter().max().unwrap();
        assert!(field.cells().iter().all(|&h| (lo..=hi).contains(&h)));
    }
}
