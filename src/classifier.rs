//! One-time classification of the block-type catalog into ore lookup tables.
//!
//! Scans every catalog slot once and splits the ore identifiers into two
//! structures: a map from vanilla ore id to its replacement probability, and
//! the ordered list of mithril variant ids available as substitutes.

use std::collections::HashMap;

use mithrilgen_assets::BlockTypeCatalog;
use mithrilgen_world::BlockId;
use tracing::info;

/// Replacement chance for the `Ore_Copper` family.
pub const ORE_COPPER_CHANCE: f64 = 0.0001;
/// Replacement chance for the `Ore_Iron` family.
pub const ORE_IRON_CHANCE: f64 = 0.0005;
/// Replacement chance for the `Ore_Gold` family.
pub const ORE_GOLD_CHANCE: f64 = 0.01;
/// Replacement chance for the `Ore_Thorium` family.
pub const ORE_THORIUM_CHANCE: f64 = 0.001;
/// Replacement chance for the `Ore_Cobalt` family.
pub const ORE_COBALT_CHANCE: f64 = 0.01;
/// Replacement chance for the `Ore_Adamantite` family.
pub const ORE_ADAMANTITE_CHANCE: f64 = 0.08;

/// Vanilla ore family prefixes with their replacement chances.
/// Matchers apply in this order; the first match wins.
const VANILLA_FAMILIES: [(&str, f64); 6] = [
    ("Ore_Copper", ORE_COPPER_CHANCE),
    ("Ore_Iron", ORE_IRON_CHANCE),
    ("Ore_Gold", ORE_GOLD_CHANCE),
    ("Ore_Thorium", ORE_THORIUM_CHANCE),
    ("Ore_Cobalt", ORE_COBALT_CHANCE),
    ("Ore_Adamantite", ORE_ADAMANTITE_CHANCE),
];

/// Identifier prefix of the mithril replacement family.
const MITHRIL_PREFIX: &str = "Ore_Mithril";

/// Case-insensitive prefix match on a block-type identifier.
fn matches_family(name: &str, prefix: &str) -> bool {
    name.get(..prefix.len())
        .is_some_and(|head| head.eq_ignore_ascii_case(prefix))
}

/// Classifier output: replacement probabilities plus mithril candidates.
///
/// Built once per process from the block-type catalog; immutable afterwards.
#[derive(Debug, Clone)]
pub struct OreTables {
    /// Vanilla ore id -> probability of replacing that cell with mithril.
    replacements: HashMap<BlockId, f64>,
    /// Mithril variant ids in catalog order.
    candidates: Vec<BlockId>,
}

impl OreTables {
    /// Scan the full catalog once and build the lookup tables.
    ///
    /// Catalog holes are skipped; identifiers outside the known families are
    /// ignored. An empty catalog yields empty tables.
    pub fn classify(catalog: &BlockTypeCatalog) -> Self {
        let mut replacements = HashMap::new();
        let mut candidates = Vec::new();

        for (id, entry) in catalog.slots() {
            let Some(desc) = entry else { continue };
            let name = desc.name.as_str();

            if let Some((_, chance)) = VANILLA_FAMILIES
                .iter()
                .find(|(prefix, _)| matches_family(name, prefix))
            {
                replacements.insert(id, *chance);
            } else if matches_family(name, MITHRIL_PREFIX) {
                candidates.push(id);
            }
        }

        info!(
            vanilla_ores = replacements.len(),
            mithril_variants = candidates.len(),
            "ore classification complete"
        );

        Self {
            replacements,
            candidates,
        }
    }

    /// Replacement probability for a block id, if it is an eligible vanilla ore.
    #[inline]
    pub fn chance(&self, id: BlockId) -> Option<f64> {
        self.replacements.get(&id).copied()
    }

    /// Mithril variant ids in catalog order.
    pub fn candidates(&self) -> &[BlockId] {
        &self.candidates
    }

    /// Whether any mithril variants are available as substitutes.
    pub fn has_candidates(&self) -> bool {
        !self.candidates.is_empty()
    }

    /// Number of distinct vanilla ore ids eligible for replacement.
    pub fn replacement_count(&self) -> usize {
        self.replacements.len()
    }
}
