//! Change detection for controllers that regenerate on input changes.

use serde::{Deserialize, Serialize};

use crate::config::TerrainConfig;
use crate::height_field::Height;

/// Inputs a controller watches.
///
/// `generation` is an opaque counter: only a change in its value matters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TerrainParams {
    pub initial_roughness: u32,
    pub max_height: Height,
    pub generation: u64,
}

impl TerrainParams {
    /// Same inputs with the counter bumped, i.e. a "randomize" request.
    pub fn bumped(self) -> Self {
        Self {
            generation: self.generation.wrapping_add(1),
            ..self
        }
    }

    /// Overlays these inputs onto `base`, keeping its water settings.
    pub fn apply_to(&self, base: TerrainConfig) -> TerrainConfig {
        base.with_initial_roughness(self.initial_roughness)
            .with_max_height(self.max_height)
    }
}

/// Remembers the last inputs a run was started for.
#[derive(Debug, Clone, Default)]
pub struct RegenerationTrigger {
    last: Option<TerrainParams>,
}

impl RegenerationTrigger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records `params` and returns whether they differ from the previous call.
    ///
    /// The first observation always asks for a run.
    pub fn observe(&mut self, params: TerrainParams) -> bool {
        let changed = self.last != Some(params);
        self.last = Some(params);
        changed
    }

    pub fn last(&self) -> Option<&TerrainParams> {
        self.last.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params() -> TerrainParams {
        TerrainParams {
            initial_roughness: 10,
            max_height: 10,
            generation: 0,
        }
    }

    #[test]
    fn test_first_observation_triggers() {
        let mut trigger = RegenerationTrigger::new();
        assert!(trigger.observe(params()));
        assert!(!trigger.observe(params()));
    }

    #[test]
    fn test_any_input_change_triggers() {
        let mut trigger = RegenerationTrigger::new();
        trigger.observe(params());

        assert!(trigger.observe(params().bumped()));
        assert!(trigger.observe(TerrainParams {
            initial_roughness: 4,
            ..params().bumped()
        }));
        assert!(trigger.observe(TerrainParams {
            max_height: 20,
            initial_roughness: 4,
            ..params().bumped()
        }));
        assert_eq!(trigger.last().map(|p| p.max_height), Some(20));
    }

    #[test]
    fn test_apply_to_keeps_water_settings() {
        let base = TerrainConfig::default().with_water(2, 0);
        let config = TerrainParams {
            initial_roughness: 3,
            max_height: 15,
            generation: 9,
        }
        .apply_to(base);
        assert_eq!(config.initial_roughness, 3);
        assert_eq!(config.max_height, 15);
        assert_eq!(config.water_threshold, 2);
        assert_eq!(config.water_floor, 0);
    }
}
