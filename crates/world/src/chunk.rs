use std::fmt;

/// Chunk width (X axis) in cells.
pub const CHUNK_SIZE_X: usize = 32;
/// Chunk height (Y axis) in cells.
pub const CHUNK_SIZE_Y: usize = 320;
/// Chunk depth (Z axis) in cells.
pub const CHUNK_SIZE_Z: usize = 32;
/// Total cell count per chunk.
pub const CHUNK_VOLUME: usize = CHUNK_SIZE_X * CHUNK_SIZE_Y * CHUNK_SIZE_Z;

/// Block-type identifier referencing the catalog (id = catalog position).
pub type BlockId = u16;
/// Secondary block state bits.
pub type BlockState = u16;
/// Rotation/orientation index of a placed block.
pub type RotationIndex = u8;

/// Reserved ID for air.
pub const BLOCK_AIR: BlockId = 0;

/// Chunk-local position (X, Y, Z).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LocalPos {
    pub x: usize,
    pub y: usize,
    pub z: usize,
}

impl LocalPos {
    /// Convert to a linear index within the cell array.
    pub fn index(self) -> usize {
        debug_assert!(self.x < CHUNK_SIZE_X);
        debug_assert!(self.y < CHUNK_SIZE_Y);
        debug_assert!(self.z < CHUNK_SIZE_Z);
        (self.y * CHUNK_SIZE_Z + self.z) * CHUNK_SIZE_X + self.x
    }
}

/// Chunk coordinate (X,Z) in chunk space.
/// Implements Ord for deterministic iteration in BTreeMap/BTreeSet (sorts by x, then z).
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize,
)]
pub struct ChunkPos {
    pub x: i32,
    pub z: i32,
}

impl ChunkPos {
    pub const fn new(x: i32, z: i32) -> Self {
        Self { x, z }
    }
}

impl fmt::Display for ChunkPos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.z)
    }
}

/// Per-cell data stored in the chunk array.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Cell {
    pub id: BlockId,
    pub rotation: RotationIndex,
    pub state: BlockState,
}

impl Default for Cell {
    fn default() -> Self {
        Self {
            id: BLOCK_AIR,
            rotation: 0,
            state: 0,
        }
    }
}

impl Cell {
    #[inline]
    pub fn is_air(&self) -> bool {
        self.id == BLOCK_AIR
    }
}

bitflags::bitflags! {
    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    /// Dirty flags set whenever chunk data changes.
    pub struct DirtyFlags: u8 {
        const BLOCKS = 0b0000_0001;
        const LIGHT = 0b0000_0010;
    }
}

impl Default for DirtyFlags {
    fn default() -> Self {
        DirtyFlags::empty()
    }
}

/// Read/write access to a fixed 32x32x320 cell volume.
///
/// The substitution engine is written against this seam so tests can stand in
/// instrumented volumes for real chunks.
pub trait BlockAccess {
    /// Block-type id at the given local coordinates.
    fn block(&self, x: usize, y: usize, z: usize) -> BlockId;
    /// Rotation index at the given local coordinates.
    fn rotation_index(&self, x: usize, y: usize, z: usize) -> RotationIndex;
    /// Overwrite the cell at the given local coordinates.
    fn set_block(
        &mut self,
        x: usize,
        y: usize,
        z: usize,
        id: BlockId,
        rotation: RotationIndex,
        state: BlockState,
    );
}

/// Chunk storing cell data plus dirty flags.
pub struct Chunk {
    position: ChunkPos,
    cells: Vec<Cell>,
    dirty: DirtyFlags,
}

impl Chunk {
    /// Allocate a fresh chunk filled with air.
    pub fn new(position: ChunkPos) -> Self {
        Self {
            position,
            cells: vec![Cell::default(); CHUNK_VOLUME],
            dirty: DirtyFlags::all(),
        }
    }

    #[inline]
    pub fn position(&self) -> ChunkPos {
        self.position
    }

    fn index(x: usize, y: usize, z: usize) -> usize {
        LocalPos { x, y, z }.index()
    }

    /// Fetch a cell copy.
    pub fn cell(&self, x: usize, y: usize, z: usize) -> Cell {
        let idx = Self::index(x, y, z);
        self.cells[idx]
    }

    /// Set a cell and mark the relevant dirty flags.
    pub fn set_cell(&mut self, x: usize, y: usize, z: usize, cell: Cell) {
        let idx = Self::index(x, y, z);
        if self.cells[idx] != cell {
            self.cells[idx] = cell;
            self.dirty.insert(DirtyFlags::BLOCKS | DirtyFlags::LIGHT);
        }
    }

    /// Borrow raw cell storage (byte-identity comparisons in tests).
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Consume and return the current dirty flags.
    pub fn take_dirty_flags(&mut self) -> DirtyFlags {
        let flags = self.dirty;
        self.dirty = DirtyFlags::empty();
        flags
    }
}

impl BlockAccess for Chunk {
    fn block(&self, x: usize, y: usize, z: usize) -> BlockId {
        self.cells[Self::index(x, y, z)].id
    }

    fn rotation_index(&self, x: usize, y: usize, z: usize) -> RotationIndex {
        self.cells[Self::index(x, y, z)].rotation
    }

    fn set_block(
        &mut self,
        x: usize,
        y: usize,
        z: usize,
        id: BlockId,
        rotation: RotationIndex,
        state: BlockState,
    ) {
        self.set_cell(x, y, z, Cell { id, rotation, state });
    }
}
