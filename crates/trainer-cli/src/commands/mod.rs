//! Command implementations.

pub mod apply;
pub mod list;
pub mod run;

use std::path::Path;

use anyhow::{Context, Result};
use tracing::info;
use trainer_core::GameRegistry;

/// Registry from `path`, or the built-in one when no file is given.
pub fn load_registry(path: Option<&Path>) -> Result<GameRegistry> {
    match path {
        Some(path) => {
            let registry = trainer_core::load_registry(path)
                .with_context(|| format!("Failed to load registry from {}", path.display()))?;
            info!("Loaded {} game(s) from {}", registry.len(), path.display());
            Ok(registry)
        }
        None => Ok(GameRegistry::builtin()),
    }
}
