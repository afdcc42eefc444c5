//! Block positions, chunk coordinates, and inclusive bounding boxes.
//!
//! The world is a 3-D integer lattice of blocks.  Blocks are partitioned into
//! vertical columns of `CHUNK_SIZE × CHUNK_SIZE` called chunks; every tick is
//! owned by the chunk containing its position.  The scheduler never looks at
//! chunk geometry beyond [`ChunkPos::containing`] and
//! [`BoundingBox::intersecting_chunks`].

use std::fmt;

/// Bits to shift a block coordinate right to get its chunk coordinate.
pub const CHUNK_SHIFT: u32 = 4;

/// Width of a chunk column along x and z, in blocks.
pub const CHUNK_SIZE: i32 = 1 << CHUNK_SHIFT;

// ── BlockPos ─────────────────────────────────────────────────────────────────

/// An integer block coordinate.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BlockPos {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

impl BlockPos {
    pub const ORIGIN: BlockPos = BlockPos { x: 0, y: 0, z: 0 };

    #[inline]
    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    /// Translate by the given deltas.
    #[inline]
    pub fn offset(self, dx: i32, dy: i32, dz: i32) -> BlockPos {
        BlockPos::new(self.x + dx, self.y + dy, self.z + dz)
    }

    /// Translate by a vector expressed as a `BlockPos`.
    #[inline]
    pub fn offset_by(self, delta: BlockPos) -> BlockPos {
        self.offset(delta.x, delta.y, delta.z)
    }
}

impl fmt::Display for BlockPos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}, {}]", self.x, self.y, self.z)
    }
}

// ── ChunkPos ─────────────────────────────────────────────────────────────────

/// Coordinate of a chunk column.  Ordered x-major so it can break ties
/// deterministically.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ChunkPos {
    pub x: i32,
    pub z: i32,
}

impl ChunkPos {
    #[inline]
    pub const fn new(x: i32, z: i32) -> Self {
        Self { x, z }
    }

    /// The chunk owning `pos`.  Arithmetic shift floors negative coordinates.
    #[inline]
    pub fn containing(pos: BlockPos) -> ChunkPos {
        ChunkPos::new(pos.x >> CHUNK_SHIFT, pos.z >> CHUNK_SHIFT)
    }

    /// `true` if `pos` lies in this chunk column.
    #[inline]
    pub fn contains(self, pos: BlockPos) -> bool {
        ChunkPos::containing(pos) == self
    }

    /// Lowest block x coordinate in this chunk.
    #[inline]
    pub fn min_block_x(self) -> i32 {
        self.x << CHUNK_SHIFT
    }

    /// Lowest block z coordinate in this chunk.
    #[inline]
    pub fn min_block_z(self) -> i32 {
        self.z << CHUNK_SHIFT
    }
}

impl fmt::Display for ChunkPos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.x, self.z)
    }
}

// ── BoundingBox ──────────────────────────────────────────────────────────────

/// An axis-aligned box of blocks with inclusive bounds on every axis.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BoundingBox {
    pub min: BlockPos,
    pub max: BlockPos,
}

impl BoundingBox {
    /// Build a box spanning both corners.  Corner order does not matter.
    pub fn new(a: BlockPos, b: BlockPos) -> Self {
        Self {
            min: BlockPos::new(a.x.min(b.x), a.y.min(b.y), a.z.min(b.z)),
            max: BlockPos::new(a.x.max(b.x), a.y.max(b.y), a.z.max(b.z)),
        }
    }

    /// The single-block box at `pos`.
    pub fn single(pos: BlockPos) -> Self {
        Self { min: pos, max: pos }
    }

    #[inline]
    pub fn is_inside(&self, pos: BlockPos) -> bool {
        (self.min.x..=self.max.x).contains(&pos.x)
            && (self.min.y..=self.max.y).contains(&pos.y)
            && (self.min.z..=self.max.z).contains(&pos.z)
    }

    /// Every chunk column overlapping the box, x-major.
    pub fn intersecting_chunks(&self) -> impl Iterator<Item = ChunkPos> + use<> {
        let min = ChunkPos::containing(self.min);
        let max = ChunkPos::containing(self.max);
        (min.x..=max.x).flat_map(move |x| (min.z..=max.z).map(move |z| ChunkPos::new(x, z)))
    }
}

impl fmt::Display for BoundingBox {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.min, self.max)
    }
}
