#![warn(missing_docs)]
//! Block-type catalog schema + loading helpers.

mod catalog;
mod loader;

pub use catalog::{BlockTypeCatalog, BlockTypeDescriptor};
pub use loader::{catalog_from_file, catalog_from_str};

use serde::Deserialize;
use thiserror::Error;

/// Minimal block-type definition used to sanity-check packs.
///
/// Pack files are JSON arrays of definitions; `null` array entries are legal
/// and become catalog holes.
#[derive(Debug, Clone, Deserialize)]
pub struct BlockTypeDefinition {
    /// Human-readable identifier (e.g., "Ore_Gold_1").
    pub name: String,
    /// Optional display name shown to players (defaults to `name`).
    #[serde(default)]
    pub display_name: Option<String>,
}

/// Errors emitted during pack loading.
#[derive(Debug, Error)]
pub enum AssetError {
    /// Wrap IO errors when reading packs.
    #[error("failed to read block-type pack: {0}")]
    Io(#[from] std::io::Error),
    /// Wrap serde parsing issues.
    #[error("failed to parse block-type pack: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Parse a JSON string into a list of block-type slots.
pub fn load_block_types_from_str(
    input: &str,
) -> Result<Vec<Option<BlockTypeDefinition>>, AssetError> {
    Ok(serde_json::from_str(input)?)
}
