use glam::IVec3;
use sculk_core::constants::{BLOCKS_PER_CHUNK, CHUNK_SLEEP_TICKS};
use sculk_core::math::local_index;
use sculk_core::types::ChunkCoord;
use sculk_core::BlockState;

/// Chunk lifecycle state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChunkState {
    /// Not resident; reads as air and writes are ignored.
    Unloaded,
    /// Simulated every tick.
    Active,
    /// No block changes for CHUNK_SLEEP_TICKS ticks; cursors inside are frozen.
    Static,
}

/// One cubic section of the grid.
#[derive(Debug, Clone)]
pub struct Chunk {
    pub coord: ChunkCoord,
    pub state: ChunkState,
    /// Consecutive ticks with no block change (for sleep transition).
    pub idle_ticks: u32,
    blocks: Vec<BlockState>,
}

impl Chunk {
    /// A loaded, active chunk filled with air.
    pub fn new_active(coord: ChunkCoord) -> Self {
        Self::filled(coord, BlockState::AIR)
    }

    pub fn filled(coord: ChunkCoord, state: BlockState) -> Self {
        Self {
            coord,
            state: ChunkState::Active,
            idle_ticks: 0,
            blocks: vec![state; BLOCKS_PER_CHUNK as usize],
        }
    }

    pub fn block(&self, local: IVec3) -> BlockState {
        self.blocks[local_index(local)]
    }

    /// Returns true if the stored state changed.
    pub fn set_block(&mut self, local: IVec3, state: BlockState) -> bool {
        let slot = &mut self.blocks[local_index(local)];
        if *slot == state {
            return false;
        }
        *slot = state;
        true
    }

    pub fn has_non_air(&self) -> bool {
        self.blocks.iter().any(|b| !b.is_air())
    }

    /// Mark this chunk as active (resets idle counter).
    pub fn activate(&mut self) {
        self.state = ChunkState::Active;
        self.idle_ticks = 0;
    }

    /// Record one idle tick. Returns true if chunk should transition to Static.
    pub fn tick_idle(&mut self) -> bool {
        self.idle_ticks += 1;
        self.idle_ticks >= CHUNK_SLEEP_TICKS
    }

    pub fn sleep(&mut self) {
        self.state = ChunkState::Static;
    }

    pub fn is_ticking(&self) -> bool {
        self.state == ChunkState::Active
    }
}
