//! JSON registry files.
//!
//! ```json
//! {
//!   "games": [
//!     {
//!       "identity": "FlatOut 2",
//!       "process_name": "FlatOut2.exe",
//!       "pointer_width": "x86",
//!       "features": [{ "key": "money", "label": "Add Money" }],
//!       "offsets": { "money": ["0x4E8418", "0x1C", "0x64"] },
//!       "increments": { "money": 1500000 },
//!       "value_widths": { "money": "i32" }
//!     }
//!   ]
//! }
//! ```

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use serde::Deserialize;
use tracing::debug;

use crate::config::{FeatureDescriptor, GameDescriptor, GameRegistry};
use crate::error::{Error, Result};
use crate::memory::{PointerWidth, ValueWidth};

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RegistryFile {
    games: Vec<RawGame>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawGame {
    identity: String,
    process_name: String,
    #[serde(default)]
    pointer_width: PointerWidth,
    #[serde(default)]
    features: Vec<RawFeature>,
    #[serde(default)]
    offsets: HashMap<String, Vec<RawOffset>>,
    #[serde(default)]
    increments: HashMap<String, i64>,
    #[serde(default)]
    value_widths: HashMap<String, ValueWidth>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawFeature {
    key: String,
    label: String,
}

/// Offsets may be written as JSON integers or hex strings
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawOffset {
    Number(u64),
    Text(String),
}

impl RawOffset {
    fn value(&self) -> Result<u64> {
        match self {
            RawOffset::Number(n) => Ok(*n),
            RawOffset::Text(s) => parse_hex_value(s),
        }
    }
}

pub fn load_registry<P: AsRef<Path>>(path: P) -> Result<GameRegistry> {
    let content = fs::read_to_string(&path)?;
    let registry = parse_registry(&content)?;
    debug!(
        "Loaded {} game(s) from {}",
        registry.len(),
        path.as_ref().display()
    );
    Ok(registry)
}

pub fn parse_registry(content: &str) -> Result<GameRegistry> {
    let file: RegistryFile = serde_json::from_str(content)?;
    let games = file
        .games
        .into_iter()
        .map(RawGame::into_descriptor)
        .collect::<Result<Vec<_>>>()?;
    GameRegistry::new(games)
}

impl RawGame {
    fn into_descriptor(mut self) -> Result<GameDescriptor> {
        let declared: Vec<&str> = self.features.iter().map(|f| f.key.as_str()).collect();

        // Every table entry must belong to a declared feature
        let tables = [
            ("offsets", self.offsets.keys().collect::<Vec<_>>()),
            ("increments", self.increments.keys().collect()),
            ("value_widths", self.value_widths.keys().collect()),
        ];
        for (table, keys) in tables {
            if let Some(stray) = keys.into_iter().find(|k| !declared.contains(&k.as_str())) {
                return Err(Error::InvalidRegistry(format!(
                    "game '{}': {} entry '{}' has no matching feature",
                    self.identity, table, stray
                )));
            }
        }

        let mut features = Vec::with_capacity(self.features.len());
        for RawFeature { key, label } in std::mem::take(&mut self.features) {
            let raw_offsets = self.offsets.remove(&key).ok_or_else(|| {
                Error::InvalidRegistry(format!(
                    "game '{}': feature '{}' has no offsets entry",
                    self.identity, key
                ))
            })?;
            let increment = self.increments.remove(&key).ok_or_else(|| {
                Error::InvalidRegistry(format!(
                    "game '{}': feature '{}' has no increments entry",
                    self.identity, key
                ))
            })?;
            let offsets = raw_offsets
                .iter()
                .map(RawOffset::value)
                .collect::<Result<Vec<_>>>()?;
            let width = self.value_widths.remove(&key).unwrap_or_default();

            features.push(FeatureDescriptor {
                key,
                label,
                offsets,
                increment,
                width,
            });
        }

        Ok(GameDescriptor {
            identity: self.identity,
            process_name: self.process_name,
            pointer_width: self.pointer_width,
            features,
        })
    }
}

fn parse_hex_value(value: &str) -> Result<u64> {
    let value = value.trim();
    // Strip hex prefix (case-insensitive), only once
    let digits = value
        .strip_prefix("0x")
        .or_else(|| value.strip_prefix("0X"))
        .unwrap_or(value);

    u64::from_str_radix(digits, 16).map_err(|e| {
        Error::InvalidRegistry(format!("failed to parse offset '{}': {}", value, e))
    })
}
