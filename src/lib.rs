#![warn(missing_docs)]
//! Mithril ore injection for voxel world generation.
//!
//! A post-processing world-gen provider: chunk generation is delegated to an
//! upstream generator, and once each chunk is available a deterministic,
//! seed-reproducible pass replaces a fraction of its vanilla ore cells with
//! mithril variants.
//!
//! Two phases: [`OreTables::classify`] scans the block-type catalog once
//! (lazily, on the first generation request) to build the replacement lookup
//! structures, and [`inject_ores`] walks each generated chunk with a
//! per-chunk random stream derived from the world seed and chunk coordinates.

pub mod classifier;
pub mod provider;
pub mod registry;
pub mod substitute;
pub mod vanilla;
pub mod worldgen;

pub use classifier::OreTables;
pub use provider::{MithrilWorldGenProvider, UpstreamFactory};
pub use registry::{register_mithril_ore, Priority, ProviderRegistry, PROVIDER_NAME};
pub use substitute::{chunk_stream_seed, inject_ores};
pub use vanilla::{OreSprinkle, VanillaWorldGen};
pub use worldgen::{always_needed, StillNeeded, WorldGen, WorldGenError, WorldGenTimings};
