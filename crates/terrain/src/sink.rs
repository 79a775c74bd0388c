//! Per-cell change notifications for renderers.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::classifier::Category;
use crate::config::Position;
use crate::height_field::Height;

/// A cell whose height was just established or overwritten.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CellUpdate {
    pub index: usize,
    pub height: Height,
    pub category: Category,
    pub position: Position,
}

impl CellUpdate {
    /// Vertical scale a box renderer applies to the cell's column.
    pub fn column_scale(&self) -> f32 {
        1.0 + self.height as f32
    }
}

/// Receives every cell write, synchronously and in computation order.
///
/// An index may be reported more than once per run; the latest report wins.
pub trait ChangeSink {
    fn notify(&mut self, update: CellUpdate);
}

impl<F: FnMut(CellUpdate)> ChangeSink for F {
    fn notify(&mut self, update: CellUpdate) {
        self(update)
    }
}

/// Keeps every update in arrival order.
#[derive(Debug, Clone, Default)]
pub struct RecordingSink {
    updates: Vec<CellUpdate>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn updates(&self) -> &[CellUpdate] {
        &self.updates
    }

    pub fn len(&self) -> usize {
        self.updates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.updates.is_empty()
    }

    pub fn clear(&mut self) {
        self.updates.clear();
    }

    /// Folds the stream to the last update per index.
    pub fn latest(&self) -> BTreeMap<usize, CellUpdate> {
        self.updates
            .iter()
            .map(|update| (update.index, *update))
            .collect()
    }
}

impl ChangeSink for RecordingSink {
    fn notify(&mut self, update: CellUpdate) {
        self.updates.push(update);
    }
}

/// Logs each update at trace level.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl ChangeSink for TracingSink {
    fn notify(&mut self, update: CellUpdate) {
        trace!(
            index = update.index,
            height = update.height,
            category = update.category.0,
            "cell updated"
        );
    }
}
