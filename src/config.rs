//! # Engine Configuration
//!
//! Tunables for the decor engine, read from an optional JSON file. Every
//! field has a default, so an empty object (or no file at all) is valid.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Runtime configuration for [`DecorEngine`](crate::engine_state::DecorEngine).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Half-extent of the cube scanned around a cell centre when looking up
    /// the decor occupying that cell.
    pub search_radius: f64,
    /// How many NONE-kind decorations may share a single cell.
    pub max_decorations_in_block: usize,
    /// Ticks between readiness checks of deferred recipe registration.
    pub recipe_poll_interval_ticks: u64,
    /// Whether the demo runner sweeps orphaned proxies after loading.
    pub orphan_sweep: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            search_radius: 0.5,
            max_decorations_in_block: 6,
            recipe_poll_interval_ticks: 10,
            orphan_sweep: false,
        }
    }
}

impl EngineConfig {
    /// Parses a configuration from JSON text.
    pub fn from_json(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    /// Loads the configuration file at `path`, or the defaults when no path is given.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or is not valid JSON.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => {
                let text = std::fs::read_to_string(path)?;
                let config = Self::from_json(&text)?;
                log::info!("Loaded engine config from {}", path.display());
                Ok(config)
            }
            None => Ok(Self::default()),
        }
    }
}
