#![warn(rustdoc::missing_crate_level_docs)]
#![warn(rustdoc::invalid_rust_codeblocks)]

//! # Voxel Decor
//!
//! A composite decoration engine for voxel worlds.
//!
//! Decorations such as chairs, tables, lamps and ornaments are made of one
//! visual entity plus a group of invisible proxy entities that provide
//! collision and click targets. Their identity lives entirely in tags on
//! those proxies, so a placed decor can be rebuilt from the live world at
//! any time without a side database.
//!
//! ## Key Modules
//!
//! * `application_state` - The scripted demo scene run by the binary
//! * `config` - Engine tunables loaded from JSON
//! * `core` - Small shared building blocks (flag sets, thread guard)
//! * `engine_state` - The decor engine, its definitions and tick-driven tasks
//! * `error` - The crate's error type
//! * `host` - The traits a host world implements, plus an in-memory world
//!
//! ## Architecture
//!
//! The engine follows a modular architecture with clear separation between:
//! * Immutable decor definitions, validated once at startup
//! * Placement and destruction, which mutate the host world
//! * Reconstruction, which only ever reads tags back
//! * Deferred work, polled from the host's tick loop
//!
//! ## Usage
//!
//! ```ignore
//! fn main() {
//!     voxel_decor::run();
//! }
//! ```
//!
//! Set `VOXEL_DECOR_CONFIG` (or pass a path as the first argument) to load
//! an engine configuration file, and `RUST_LOG` to pick the log level.

use std::path::PathBuf;

use log::{error, info};

use application_state::ApplicationState;
use config::EngineConfig;
use engine_state::decor::catalog;
use engine_state::DecorEngine;

pub mod application_state;
pub mod config;
pub mod core;
pub mod engine_state;
pub mod error;
pub mod host;

/// Environment variable naming the engine configuration file.
pub const CONFIG_ENV: &str = "VOXEL_DECOR_CONFIG";

/// Runs the demo scene, exiting with a non-zero status if the catalog or
/// the configuration cannot be loaded.
pub fn run() {
    let mut log_builder = env_logger::Builder::new();
    log_builder
        .target(env_logger::Target::Stdout)
        .parse_env("RUST_LOG")
        .init();

    info!("Logger initialized");

    let config_path = std::env::args()
        .nth(1)
        .or_else(|| std::env::var(CONFIG_ENV).ok())
        .map(PathBuf::from);

    let config = match EngineConfig::load(config_path.as_deref()) {
        Ok(config) => config,
        Err(err) => {
            error!("Failed to load engine config: {}", err);
            std::process::exit(1);
        }
    };

    let registry = match catalog::load_registry() {
        Ok(registry) => registry,
        Err(err) => {
            error!("Failed to load decor catalog: {}", err);
            std::process::exit(1);
        }
    };

    let mut state = ApplicationState::new(DecorEngine::new(registry, config));
    if let Err(err) = state.run_scene() {
        error!("Demo scene failed: {}", err);
        std::process::exit(1);
    }
}
