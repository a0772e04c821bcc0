//! Sprite name resolution
//!
//! Decoding images is the presentation layer's job. The engine only needs
//! to know that every name a level refers to resolves, and to hand out a
//! stable handle for it. All names are resolved before the first tick so a
//! missing file aborts startup instead of a running game.

use std::collections::HashMap;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Opaque handle to a resolved image
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct SpriteId(pub u32);

#[derive(Debug, Error, PartialEq, Eq)]
pub enum AssetError {
    #[error("empty asset name")]
    EmptyName,
    #[error("asset not found: {0}")]
    NotFound(String),
    #[error("asset not resolved before use: {0}")]
    Unresolved(String),
}

/// Resolves names to images (external collaborator)
pub trait AssetLoader {
    fn load(&mut self, name: &str) -> Result<(), AssetError>;
}

/// Requires each asset to exist as a file under `root`
#[derive(Debug, Clone)]
pub struct DirectoryLoader {
    pub root: PathBuf,
}

impl DirectoryLoader {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl AssetLoader for DirectoryLoader {
    fn load(&mut self, name: &str) -> Result<(), AssetError> {
        if name.is_empty() {
            return Err(AssetError::EmptyName);
        }
        let path = self.root.join(name);
        if path.is_file() {
            Ok(())
        } else {
            Err(AssetError::NotFound(path.display().to_string()))
        }
    }
}

/// Accepts any non-empty name (headless runs and tests)
#[derive(Debug, Clone, Default)]
pub struct ManifestLoader;

impl AssetLoader for ManifestLoader {
    fn load(&mut self, name: &str) -> Result<(), AssetError> {
        if name.is_empty() {
            Err(AssetError::EmptyName)
        } else {
            Ok(())
        }
    }
}

/// Names already resolved, with their handles
#[derive(Debug, Clone, Default)]
pub struct AssetCatalog {
    ids: HashMap<String, SpriteId>,
    names: Vec<String>,
}

impl AssetCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve a name once; repeated names share a handle
    pub fn resolve(&mut self, loader: &mut dyn AssetLoader, name: &str) -> Result<SpriteId, AssetError> {
        if let Some(id) = self.ids.get(name) {
            return Ok(*id);
        }
        loader.load(name)?;
        let id = SpriteId(self.names.len() as u32);
        self.names.push(name.to_string());
        self.ids.insert(name.to_string(), id);
        log::debug!("asset {} -> {:?}", name, id);
        Ok(id)
    }

    /// Handle for a name resolved earlier
    pub fn get(&self, name: &str) -> Result<SpriteId, AssetError> {
        self.ids
            .get(name)
            .copied()
            .ok_or_else(|| AssetError::Unresolved(name.to_string()))
    }

    pub fn name(&self, id: SpriteId) -> Option<&str> {
        self.names.get(id.0 as usize).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}
