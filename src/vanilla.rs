//! Reference upstream generator: a flat deterministic world with seeded
//! vanilla-ore sprinkles.
//!
//! Stands in for a full terrain engine when wiring the provider into a
//! pipeline, and gives the integration tests a realistic upstream.

use std::sync::Mutex;
use std::time::Instant;

use async_trait::async_trait;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use mithrilgen_world::{
    BlockAccess, BlockId, Chunk, ChunkPos, Transform, CHUNK_SIZE_X, CHUNK_SIZE_Y, CHUNK_SIZE_Z,
};

use crate::worldgen::{StillNeeded, WorldGen, WorldGenError, WorldGenTimings};

/// One vanilla ore sprinkled through the stone layer.
#[derive(Debug, Clone, Copy)]
pub struct OreSprinkle {
    /// Block id written when the sprinkle rolls.
    pub id: BlockId,
    /// Per-cell chance in [0, 1).
    pub chance: f64,
}

/// Flat deterministic generator: stone up to a fixed surface level, with
/// per-chunk seeded ore sprinkles and air above.
pub struct VanillaWorldGen {
    stone: BlockId,
    surface_y: usize,
    sprinkles: Vec<OreSprinkle>,
    timings: Mutex<WorldGenTimings>,
}

impl VanillaWorldGen {
    /// Create a generator with the given stone block, surface level, and
    /// ore sprinkles. The surface level is clamped to the chunk height.
    pub fn new(stone: BlockId, surface_y: usize, sprinkles: Vec<OreSprinkle>) -> Self {
        Self {
            stone,
            surface_y: surface_y.min(CHUNK_SIZE_Y),
            sprinkles,
            timings: Mutex::new(WorldGenTimings::default()),
        }
    }

    /// Per-chunk seed for the sprinkle pass.
    fn sprinkle_seed(seed: i32, x: i32, z: i32) -> u64 {
        let chunk_hash = (x as u64)
            .wrapping_mul(73_856_093)
            .wrapping_add((z as u64).wrapping_mul(19_349_663));
        (seed as u64).wrapping_add(chunk_hash)
    }
}

#[async_trait]
impl WorldGen for VanillaWorldGen {
    async fn generate(
        &self,
        seed: i32,
        _index: u64,
        x: i32,
        z: i32,
        _still_needed: StillNeeded,
    ) -> Result<Option<Chunk>, WorldGenError> {
        let start = Instant::now();

        let mut chunk = Chunk::new(ChunkPos::new(x, z));
        let mut rng = StdRng::seed_from_u64(Self::sprinkle_seed(seed, x, z));

        for bx in 0..CHUNK_SIZE_X {
            for bz in 0..CHUNK_SIZE_Z {
                for by in 0..self.surface_y {
                    let mut id = self.stone;

                    let roll: f64 = rng.gen();
                    let mut acc = 0.0;
                    for sprinkle in &self.sprinkles {
                        acc += sprinkle.chance;
                        if roll < acc {
                            id = sprinkle.id;
                            break;
                        }
                    }

                    chunk.set_block(bx, by, bz, id, 0, 0);
                }
            }
        }

        if let Ok(mut timings) = self.timings.lock() {
            timings.record("terrain", start.elapsed());
        }

        Ok(Some(chunk))
    }

    fn spawn_points(&self, _radius: i32) -> Option<Vec<Transform>> {
        Some(vec![Transform::from_xyz(0.0, self.surface_y as f32, 0.0)])
    }

    fn timings(&self) -> Option<WorldGenTimings> {
        self.timings.lock().ok().map(|timings| timings.clone())
    }
}
