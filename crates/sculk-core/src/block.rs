use serde::{Deserialize, Serialize};

use crate::direction::Direction;
use crate::faces::FaceSet;

/// The kinds of block the spreading simulation distinguishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[repr(u8)]
pub enum BlockKind {
    #[default]
    Air = 0,
    Water = 1,
    Stone = 2,
    Deepslate = 3,
    CobbledDeepslate = 4,
    DeepslateBricks = 5,
    Dirt = 6,
    GrassBlock = 7,
    Sand = 8,
    Gravel = 9,
    Bedrock = 10,
    Sculk = 11,
    SculkVein = 12,
    SculkCatalyst = 13,
    SculkSensor = 14,
    SculkShrieker = 15,
}

impl BlockKind {
    /// Whether the given face of a block of this kind is a full, sturdy surface.
    pub fn is_face_sturdy(self, face: Direction) -> bool {
        match self {
            BlockKind::Air | BlockKind::Water | BlockKind::SculkVein => false,
            // Half-height blocks only present a full face downward.
            BlockKind::SculkSensor | BlockKind::SculkShrieker => face == Direction::Down,
            _ => true,
        }
    }

    /// Sensors and shriekers: the growths sculk places on top of itself.
    pub fn is_growth(self) -> bool {
        matches!(self, BlockKind::SculkSensor | BlockKind::SculkShrieker)
    }
}

/// A block as stored in the grid: its kind plus the few properties the
/// spreading simulation reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct BlockState {
    pub kind: BlockKind,
    /// Faces covered, for vein blocks. Empty for every other kind.
    #[serde(default)]
    pub faces: FaceSet,
    /// Whether the cell also holds a water source.
    #[serde(default)]
    pub waterlogged: bool,
}

impl BlockState {
    pub const AIR: BlockState = BlockState::of(BlockKind::Air);
    pub const WATER: BlockState = BlockState::of(BlockKind::Water);

    pub const fn of(kind: BlockKind) -> Self {
        Self {
            kind,
            faces: FaceSet::EMPTY,
            waterlogged: false,
        }
    }

    /// A vein covering `faces`.
    pub fn vein(faces: FaceSet, waterlogged: bool) -> Self {
        Self {
            kind: BlockKind::SculkVein,
            faces,
            waterlogged,
        }
    }

    pub fn with_waterlogged(mut self, waterlogged: bool) -> Self {
        self.waterlogged = waterlogged;
        self
    }

    pub fn is(&self, kind: BlockKind) -> bool {
        self.kind == kind
    }

    pub fn is_air(&self) -> bool {
        self.kind == BlockKind::Air
    }

    /// Whether the cell's fluid is water, either as a plain water block or
    /// a waterlogged one.
    pub fn has_water(&self) -> bool {
        self.kind == BlockKind::Water || self.waterlogged
    }

    /// The state left behind when this block is removed.
    pub fn emptied(&self) -> BlockState {
        if self.has_water() {
            BlockState::WATER
        } else {
            BlockState::AIR
        }
    }

    pub fn is_face_sturdy(&self, face: Direction) -> bool {
        self.kind.is_face_sturdy(face)
    }
}

/// Classification of which block kinds a spreader may convert into sculk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SubstrateTag {
    /// Blocks replaceable by a spreader running in a live world.
    Live,
    /// The wider set replaceable while generating the world.
    WorldGen,
}

impl SubstrateTag {
    pub fn contains(self, kind: BlockKind) -> bool {
        let live = matches!(
            kind,
            BlockKind::Stone
                | BlockKind::Deepslate
                | BlockKind::Dirt
                | BlockKind::GrassBlock
                | BlockKind::Sand
                | BlockKind::Gravel
        );
        match self {
            SubstrateTag::Live => live,
            SubstrateTag::WorldGen => {
                live || matches!(
                    kind,
                    BlockKind::CobbledDeepslate | BlockKind::DeepslateBricks
                )
            }
        }
    }
}
