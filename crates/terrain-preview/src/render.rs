//! ASCII and JSON renderings of a height field.

use serde::Serialize;

use terrain::{
    Category, CellUpdate, ChangeSink, GenerationSummary, Height, HeightClassifier, HeightField,
    TerrainConfig,
};

/// Glyphs from lowest to highest band. Extra bands reuse the last glyph.
const GLYPHS: [char; 7] = ['~', '.', ',', '-', '^', 'A', '#'];

pub fn glyph(category: Category) -> char {
    GLYPHS[category.0.min(GLYPHS.len() - 1)]
}

/// One glyph per cell, rows separated by newlines, `y = 0` first.
pub fn render_ascii(field: &HeightField, classifier: &HeightClassifier) -> String {
    let mut out = String::with_capacity(field.len() * 2 + field.side());
    for row in field.rows() {
        let line: Vec<String> = row
            .iter()
            .map(|&height| glyph(classifier.classify(height)).to_string())
            .collect();
        out.push_str(&line.join(" "));
        out.push('\n');
    }
    out
}

/// Serializable result of a run, for `--json` output.
#[derive(Debug, Clone, Serialize)]
pub struct Snapshot {
    pub seed: u64,
    pub side: usize,
    pub config: TerrainConfig,
    pub summary: GenerationSummary,
    pub heights: Vec<Vec<Height>>,
    pub palette: Vec<String>,
}

impl Snapshot {
    pub fn new(
        seed: u64,
        field: &HeightField,
        config: TerrainConfig,
        summary: GenerationSummary,
        classifier: &HeightClassifier,
    ) -> Self {
        Self {
            seed,
            side: field.side(),
            config,
            summary,
            heights: field.rows().map(|row| row.to_vec()).collect(),
            palette: (0..classifier.category_count())
                .map(|index| classifier.color(Category(index)).to_string())
                .collect(),
        }
    }
}

/// Counts how many final cells land in each band.
///
/// Fed from the change stream, so it honours last-write-wins per index.
#[derive(Debug, Clone)]
pub struct BandHistogram {
    latest: Vec<Option<Category>>,
    bands: usize,
}

impl BandHistogram {
    pub fn new(cells: usize, bands: usize) -> Self {
        Self {
            latest: vec![None; cells],
            bands,
        }
    }

    pub fn counts(&self) -> Vec<usize> {
        let mut counts = vec![0; self.bands];
        for category in self.latest.iter().flatten() {
            if let Some(slot) = counts.get_mut(category.0) {
                *slot += 1;
            }
        }
        counts
    }

    /// Cells never reported by the generator.
    pub fn unset(&self) -> usize {
        self.latest.iter().filter(|c| c.is_none()).count()
    }
}

impl ChangeSink for BandHistogram {
    fn notify(&mut self, update: CellUpdate) {
        if let Some(slot) = self.latest.get_mut(update.index) {
            *slot = Some(update.category);
        }
    }
}
