//! The per-chunk probabilistic ore substitution pass.
//!
//! Walks the full chunk volume with a deterministic per-chunk random stream
//! and rewrites eligible vanilla ore cells into mithril variants in place.

use mithrilgen_world::{BlockAccess, CHUNK_SIZE_X, CHUNK_SIZE_Y, CHUNK_SIZE_Z};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::debug;

use crate::classifier::OreTables;

/// Combine the world seed and chunk coordinates into the per-chunk stream seed.
///
/// The exact integer combination is load-bearing: identical (seed, x, z)
/// triples must reproduce identical replacement outcomes across runs.
#[inline]
pub fn chunk_stream_seed(seed: i32, x: i32, z: i32) -> u64 {
    let mixed = (x as i64).wrapping_mul(31).wrapping_add(z as i64);
    ((seed as i64) ^ mixed) as u64
}

/// Replace eligible vanilla ore cells with mithril variants, in place.
///
/// The volume is walked x, then z, then y (innermost loop vertical); the walk
/// order is part of the determinism contract because draws come from a single
/// sequential stream. Each eligible cell consumes one draw for the probability
/// test and a second draw only when the test succeeds; non-eligible cells
/// consume none. Replacement keeps the cell's rotation index and resets its
/// secondary state.
pub fn inject_ores<C: BlockAccess>(chunk: &mut C, tables: &OreTables, seed: i32, x: i32, z: i32) {
    // Fail-safe: nothing to place, so don't scan at all.
    if !tables.has_candidates() {
        debug!(
            chunk_x = x,
            chunk_z = z,
            "no mithril variants registered; passing chunk through"
        );
        return;
    }

    let mut rng = StdRng::seed_from_u64(chunk_stream_seed(seed, x, z));
    substitute_with(chunk, tables, &mut rng);
}

fn substitute_with<C: BlockAccess, R: Rng>(chunk: &mut C, tables: &OreTables, rng: &mut R) {
    let candidates = tables.candidates();

    for bx in 0..CHUNK_SIZE_X {
        for bz in 0..CHUNK_SIZE_Z {
            for by in 0..CHUNK_SIZE_Y {
                let Some(chance) = tables.chance(chunk.block(bx, by, bz)) else {
                    continue;
                };

                if rng.gen::<f64>() < chance {
                    let rotation = chunk.rotation_index(bx, by, bz);

                    // floor(draw * len); the clamp covers the top-of-range
                    // f64 rounding edge where the product lands on len.
                    let pick = ((rng.gen::<f64>() * candidates.len() as f64) as usize)
                        .min(candidates.len() - 1);

                    chunk.set_block(bx, by, bz, candidates[pick], rotation, 0);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mithrilgen_assets::{BlockTypeCatalog, BlockTypeDescriptor};
    use mithrilgen_world::{
        BlockId, BlockState, Cell, Chunk, ChunkPos, RotationIndex, CHUNK_VOLUME,
    };
    use rand::RngCore;
    use std::cell::RefCell;

    // Catalog layout: 0 Air, 1 Stone, 2 Ore_Gold, 3 Ore_Adamantite,
    // 4 Ore_Mithril_A, 5 Ore_Mithril_B.
    const GOLD: BlockId = 2;
    const ADAMANTITE: BlockId = 3;
    const MITHRIL_A: BlockId = 4;
    const MITHRIL_B: BlockId = 5;

    fn tables() -> OreTables {
        let catalog = BlockTypeCatalog::new(vec![
            Some(BlockTypeDescriptor::simple("Air")),
            Some(BlockTypeDescriptor::simple("Stone")),
            Some(BlockTypeDescriptor::simple("Ore_Gold_1")),
            Some(BlockTypeDescriptor::simple("Ore_Adamantite_1")),
            Some(BlockTypeDescriptor::simple("Ore_Mithril_A")),
            Some(BlockTypeDescriptor::simple("Ore_Mithril_B")),
        ]);
        OreTables::classify(&catalog)
    }

    fn tables_without_candidates() -> OreTables {
        let catalog = BlockTypeCatalog::new(vec![
            Some(BlockTypeDescriptor::simple("Air")),
            Some(BlockTypeDescriptor::simple("Stone")),
            Some(BlockTypeDescriptor::simple("Ore_Gold_1")),
        ]);
        OreTables::classify(&catalog)
    }

    fn chunk_filled_with(id: BlockId) -> Chunk {
        let mut chunk = Chunk::new(ChunkPos::new(0, 0));
        for x in 0..CHUNK_SIZE_X {
            for z in 0..CHUNK_SIZE_Z {
                for y in 0..CHUNK_SIZE_Y {
                    chunk.set_block(x, y, z, id, 0, 0);
                }
            }
        }
        chunk
    }

    /// RngCore wrapper counting how many draws the engine consumes.
    struct CountingRng {
        inner: StdRng,
        draws: u64,
    }

    impl CountingRng {
        fn new(seed: u64) -> Self {
            Self {
                inner: StdRng::seed_from_u64(seed),
                draws: 0,
            }
        }
    }

    impl RngCore for CountingRng {
        fn next_u32(&mut self) -> u32 {
            self.draws += 1;
            self.inner.next_u32()
        }

        fn next_u64(&mut self) -> u64 {
            self.draws += 1;
            self.inner.next_u64()
        }

        fn fill_bytes(&mut self, dest: &mut [u8]) {
            self.draws += 1;
            self.inner.fill_bytes(dest)
        }

        fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
            self.draws += 1;
            self.inner.try_fill_bytes(dest)
        }
    }

    /// BlockAccess double counting per-cell visits; every cell reads as air.
    struct CountingVolume {
        visits: RefCell<Vec<u32>>,
    }

    impl CountingVolume {
        fn new() -> Self {
            Self {
                visits: RefCell::new(vec![0; CHUNK_VOLUME]),
            }
        }

        fn index(x: usize, y: usize, z: usize) -> usize {
            (y * CHUNK_SIZE_Z + z) * CHUNK_SIZE_X + x
        }
    }

    impl BlockAccess for CountingVolume {
        fn block(&self, x: usize, y: usize, z: usize) -> BlockId {
            self.visits.borrow_mut()[Self::index(x, y, z)] += 1;
            0
        }

        fn rotation_index(&self, _x: usize, _y: usize, _z: usize) -> RotationIndex {
            0
        }

        fn set_block(
            &mut self,
            _x: usize,
            _y: usize,
            _z: usize,
            _id: BlockId,
            _rotation: RotationIndex,
            _state: BlockState,
        ) {
        }
    }

    #[test]
    fn stream_seed_matches_reference_combination() {
        // seed ^ (x * 31 + z), evaluated in 64-bit space
        assert_eq!(chunk_stream_seed(10, 3, 4), 10 ^ 97);
        assert_eq!(chunk_stream_seed(0, 0, 0), 0);
        // negative coordinates wrap through i64 before the cast
        assert_eq!(chunk_stream_seed(-1, -2, 5), ((-1i64) ^ (-57i64)) as u64);
        assert_ne!(chunk_stream_seed(7, 1, 2), chunk_stream_seed(7, 2, 1));
    }

    #[test]
    fn substitution_is_deterministic() {
        let tables = tables();

        let mut first = chunk_filled_with(ADAMANTITE);
        let mut second = chunk_filled_with(ADAMANTITE);

        inject_ores(&mut first, &tables, 1234, 7, -3);
        inject_ores(&mut second, &tables, 1234, 7, -3);

        assert_eq!(first.cells(), second.cells());
    }

    #[test]
    fn different_coordinates_diverge() {
        let tables = tables();

        let mut a = chunk_filled_with(ADAMANTITE);
        let mut b = chunk_filled_with(ADAMANTITE);

        inject_ores(&mut a, &tables, 1234, 0, 0);
        inject_ores(&mut b, &tables, 1234, 1, 0);

        assert_ne!(a.cells(), b.cells());
    }

    #[test]
    fn empty_candidates_pass_chunk_through() {
        let tables = tables_without_candidates();
        let mut chunk = chunk_filled_with(GOLD);
        let before: Vec<Cell> = chunk.cells().to_vec();

        inject_ores(&mut chunk, &tables, 42, 0, 0);

        assert_eq!(chunk.cells(), &before[..]);
    }

    #[test]
    fn non_ore_cells_are_untouched() {
        let tables = tables();
        let mut chunk = chunk_filled_with(1); // Stone: not in the replacement map
        let before: Vec<Cell> = chunk.cells().to_vec();

        inject_ores(&mut chunk, &tables, 42, 5, 5);

        assert_eq!(chunk.cells(), &before[..]);
    }

    #[test]
    fn replacement_picks_a_candidate_and_keeps_rotation() {
        let tables = tables();

        // Adamantite replaces at 8%; scan seeds until the probe cell flips.
        let mut replaced = None;
        for seed in 0..10_000 {
            let mut chunk = Chunk::new(ChunkPos::new(0, 0));
            chunk.set_block(0, 0, 0, ADAMANTITE, 5, 7);
            inject_ores(&mut chunk, &tables, seed, 0, 0);
            let cell = chunk.cell(0, 0, 0);
            if cell.id != ADAMANTITE {
                replaced = Some(cell);
                break;
            }
        }

        let cell = replaced.expect("no seed in 0..10000 replaced the probe cell");
        assert!(cell.id == MITHRIL_A || cell.id == MITHRIL_B);
        assert_eq!(cell.rotation, 5, "rotation index must be preserved");
        assert_eq!(cell.state, 0, "secondary state must be reset");
    }

    #[test]
    fn draw_count_invariant_holds() {
        let tables = tables();
        let mut chunk = chunk_filled_with(GOLD);
        let mut rng = CountingRng::new(99);

        substitute_with(&mut chunk, &tables, &mut rng);

        let replaced = chunk
            .cells()
            .iter()
            .filter(|c| c.id == MITHRIL_A || c.id == MITHRIL_B)
            .count() as u64;
        let eligible = CHUNK_VOLUME as u64;

        // 1 draw per failed probability test, 2 per success.
        assert!(replaced > 0);
        assert_eq!(rng.draws, (eligible - replaced) + 2 * replaced);
    }

    #[test]
    fn non_eligible_cells_consume_no_draws() {
        let tables = tables();
        let mut chunk = chunk_filled_with(1); // Stone
        let mut rng = CountingRng::new(7);

        substitute_with(&mut chunk, &tables, &mut rng);

        assert_eq!(rng.draws, 0);
    }

    #[test]
    fn every_cell_is_visited_exactly_once() {
        let tables = tables();
        let mut volume = CountingVolume::new();

        inject_ores(&mut volume, &tables, 31337, -4, 9);

        let visits = volume.visits.borrow();
        assert_eq!(visits.len(), CHUNK_VOLUME);
        assert!(visits.iter().all(|&v| v == 1));
    }
}
