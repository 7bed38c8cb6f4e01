use std::fs;
use std::path::Path;

use crate::AssetError;
use crate::{BlockTypeCatalog, BlockTypeDescriptor};

/// Load a block-type catalog from the provided JSON file path.
pub fn catalog_from_file(path: &Path) -> Result<BlockTypeCatalog, AssetError> {
    let data = fs::read_to_string(path)?;
    catalog_from_str(&data)
}

/// Load a block-type catalog from an in-memory JSON string.
pub fn catalog_from_str(input: &str) -> Result<BlockTypeCatalog, AssetError> {
    let defs = crate::load_block_types_from_str(input)?;
    Ok(BlockTypeCatalog::new(
        defs.into_iter()
            .map(|slot| slot.map(BlockTypeDescriptor::from_definition))
            .collect(),
    ))
}
