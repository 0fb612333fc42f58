//! Static table of supported games.

use std::collections::HashSet;

use crate::error::{Error, Result};
use crate::memory::{PointerWidth, ValueWidth};

/// One mutation a game supports: add `increment` to the value at the end of
/// `offsets`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeatureDescriptor {
    pub key: String,
    /// Human-readable label shown next to the key
    pub label: String,
    /// Empty means the feature is declared but not supported yet
    pub offsets: Vec<u64>,
    pub increment: i64,
    pub width: ValueWidth,
}

impl FeatureDescriptor {
    pub fn is_supported(&self) -> bool {
        !self.offsets.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameDescriptor {
    pub identity: String,
    pub process_name: String,
    pub pointer_width: PointerWidth,
    /// Features in display order
    pub features: Vec<FeatureDescriptor>,
}

impl GameDescriptor {
    pub fn feature(&self, key: &str) -> Option<&FeatureDescriptor> {
        self.features.iter().find(|f| f.key == key)
    }

    pub fn feature_keys(&self) -> impl Iterator<Item = &str> {
        self.features.iter().map(|f| f.key.as_str())
    }

    /// `(key, label)` pairs in display order
    pub fn feature_labels(&self) -> Vec<(String, String)> {
        self.features
            .iter()
            .map(|f| (f.key.clone(), f.label.clone()))
            .collect()
    }

    fn validate(&self) -> Result<()> {
        if self.identity.trim().is_empty() {
            return Err(Error::InvalidRegistry(
                "game identity must not be empty".to_string(),
            ));
        }
        if self.process_name.trim().is_empty() {
            return Err(Error::InvalidRegistry(format!(
                "game '{}' has an empty process name",
                self.identity
            )));
        }

        let mut keys = HashSet::new();
        for feature in &self.features {
            if feature.key.trim().is_empty() {
                return Err(Error::InvalidRegistry(format!(
                    "game '{}' has a feature with an empty key",
                    self.identity
                )));
            }
            if !keys.insert(feature.key.as_str()) {
                return Err(Error::InvalidRegistry(format!(
                    "game '{}' declares feature '{}' twice",
                    self.identity, feature.key
                )));
            }
            if !feature.width.fits(feature.increment) {
                return Err(Error::InvalidRegistry(format!(
                    "game '{}': increment {} of feature '{}' does not fit in {}",
                    self.identity, feature.increment, feature.key, feature.width
                )));
            }
        }
        Ok(())
    }
}

/// Supported games, iterated in definition order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameRegistry {
    games: Vec<GameDescriptor>,
}

impl GameRegistry {
    /// Validate and wrap a list of descriptors.
    pub fn new(games: Vec<GameDescriptor>) -> Result<Self> {
        let mut identities = HashSet::new();
        for game in &games {
            game.validate()?;
            if !identities.insert(game.identity.as_str()) {
                return Err(Error::InvalidRegistry(format!(
                    "game '{}' is defined twice",
                    game.identity
                )));
            }
        }
        Ok(Self { games })
    }

    /// The games this tool ships with.
    pub fn builtin() -> Self {
        Self {
            games: vec![GameDescriptor {
                identity: "FlatOut 2".to_string(),
                process_name: "FlatOut2.exe".to_string(),
                pointer_width: PointerWidth::X86,
                features: vec![FeatureDescriptor {
                    key: "money".to_string(),
                    label: "Add Money".to_string(),
                    offsets: vec![0x4E8418, 0x1C, 0x64, 0x14, 0x30, 0x14, 0x58, 0xE58],
                    increment: 1_500_000,
                    width: ValueWidth::I32,
                }],
            }],
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &GameDescriptor> {
        self.games.iter()
    }

    pub fn get(&self, identity: &str) -> Option<&GameDescriptor> {
        self.games.iter().find(|g| g.identity == identity)
    }

    pub fn len(&self) -> usize {
        self.games.len()
    }

    pub fn is_empty(&self) -> bool {
        self.games.is_empty()
    }
}

impl Default for GameRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}
