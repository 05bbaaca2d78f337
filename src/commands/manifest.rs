//! # Command Manifest
//!
//! Optional YAML file choosing which built-in commands to load, and in
//! which order:
//!
//! ```yaml
//! commands:
//!   - help
//!   - stats
//! ```
//!
//! - **Version**: 1.0.0
//! - **Since**: 1.1.0

use anyhow::{anyhow, Context, Result};
use log::warn;
use serde::{Deserialize, Serialize};
use std::path::Path;

use super::registry::CommandEntry;

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CommandManifest {
    pub commands: Vec<String>,
}

impl CommandManifest {
    /// Load a manifest from a YAML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read command manifest {}", path.display()))?;
        Self::from_yaml_str(&contents)
    }

    pub fn from_yaml_str(contents: &str) -> Result<Self> {
        let manifest: CommandManifest = serde_yaml::from_str(contents)?;
        manifest.validate()?;
        Ok(manifest)
    }

    /// Load the manifest if the file exists; a missing file means "load everything"
    pub fn load_optional(path: impl AsRef<Path>) -> Result<Option<Self>> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(None);
        }
        Self::load(path).map(Some)
    }

    pub fn validate(&self) -> Result<()> {
        for id in &self.commands {
            if id.is_empty() || id.chars().any(char::is_whitespace) {
                return Err(anyhow!("Invalid command id in manifest: '{id}'"));
            }
        }
        Ok(())
    }

    /// Keep the entries the manifest lists, in manifest order
    ///
    /// Ids with no matching entry are logged and ignored. An id listed twice
    /// is only taken once.
    pub fn select(&self, entries: Vec<CommandEntry>) -> Vec<CommandEntry> {
        let mut available: Vec<Option<CommandEntry>> = entries.into_iter().map(Some).collect();
        let mut selected = Vec::with_capacity(self.commands.len());

        for id in &self.commands {
            let position = available
                .iter()
                .position(|slot| slot.as_ref().is_some_and(|entry| entry.id() == id));
            match position.and_then(|i| available[i].take()) {
                Some(entry) => selected.push(entry),
                None => warn!("⚠️ Manifest lists unknown or repeated command '{id}'"),
            }
        }
        selected
    }
}
