use std::collections::HashMap;

use mithrilgen_world::BlockId;

/// Block-type metadata loaded from packs.
#[derive(Debug, Clone)]
pub struct BlockTypeDescriptor {
    /// Human-readable identifier (e.g., "Ore_Gold_1").
    pub name: String,
    /// Display name shown to players.
    pub display_name: String,
}

impl BlockTypeDescriptor {
    /// Construct a descriptor from the JSON definition.
    pub fn from_definition(def: crate::BlockTypeDefinition) -> Self {
        let display_name = def.display_name.unwrap_or_else(|| def.name.clone());
        Self {
            name: def.name,
            display_name,
        }
    }

    /// Helper for tests/examples that need a simple descriptor.
    pub fn simple(name: &str) -> Self {
        Self {
            name: name.to_string(),
            display_name: name.to_string(),
        }
    }
}

/// Catalog of registered block types, keyed by position.
///
/// A block type's id is its slot index. Slots may be empty (holes) when a
/// pack reserves ids without defining them; consumers skip holes.
pub struct BlockTypeCatalog {
    entries: Vec<Option<BlockTypeDescriptor>>,
    name_to_id: HashMap<String, BlockId>,
}

impl BlockTypeCatalog {
    /// Construct a catalog from the supplied slots.
    pub fn new(entries: Vec<Option<BlockTypeDescriptor>>) -> Self {
        let mut name_to_id = HashMap::new();
        for (id, entry) in entries.iter().enumerate() {
            if let Some(desc) = entry {
                name_to_id.insert(desc.name.clone(), id as BlockId);
            }
        }
        Self {
            entries,
            name_to_id,
        }
    }

    /// Look up a descriptor by numeric id; `None` for holes and out-of-range ids.
    pub fn descriptor(&self, id: BlockId) -> Option<&BlockTypeDescriptor> {
        self.entries.get(id as usize).and_then(Option::as_ref)
    }

    /// Resolve a block-type id by its exact name.
    pub fn id_by_name(&self, name: &str) -> Option<BlockId> {
        self.name_to_id.get(name).copied()
    }

    /// Number of slots, holes included.
    pub fn slot_count(&self) -> usize {
        self.entries.len()
    }

    /// Iterate all slots in catalog order as `(id, descriptor)`, holes included.
    pub fn slots(&self) -> impl Iterator<Item = (BlockId, Option<&BlockTypeDescriptor>)> {
        self.entries
            .iter()
            .enumerate()
            .map(|(id, entry)| (id as BlockId, entry.as_ref()))
    }
}
