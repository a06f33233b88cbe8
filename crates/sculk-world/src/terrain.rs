use glam::IVec3;
use sculk_core::constants::CHUNK_SIZE;
use sculk_core::types::ChunkCoord;
use sculk_core::{BlockKind, BlockState};

use crate::chunk::Chunk;

/// Horizontally uniform terrain: a stack of layers starting at `base_y`,
/// air above, and air below.
#[derive(Debug, Clone)]
pub struct FlatTerrain {
    base_y: i32,
    /// Bottom to top.
    layers: Vec<BlockState>,
}

impl FlatTerrain {
    pub fn new(base_y: i32, layers: Vec<BlockState>) -> Self {
        Self { base_y, layers }
    }

    /// Bedrock floor under deepslate, with a stone cap. Surface at y = 0.
    pub fn deep_dark() -> Self {
        let mut layers = vec![BlockState::of(BlockKind::Bedrock)];
        layers.extend(std::iter::repeat(BlockState::of(BlockKind::Deepslate)).take(12));
        layers.extend(std::iter::repeat(BlockState::of(BlockKind::Stone)).take(3));
        Self::new(-16, layers)
    }

    /// Y of the first air cell above the layers.
    pub fn surface_y(&self) -> i32 {
        self.base_y + self.layers.len() as i32
    }

    pub fn block_at(&self, y: i32) -> BlockState {
        let offset = y - self.base_y;
        if offset < 0 {
            return BlockState::AIR;
        }
        self.layers
            .get(offset as usize)
            .copied()
            .unwrap_or(BlockState::AIR)
    }

    /// Build the chunk at `coord`.
    pub fn generate_chunk(&self, coord: ChunkCoord) -> Chunk {
        let cs = CHUNK_SIZE as i32;
        let mut chunk = Chunk::new_active(coord);
        for ly in 0..cs {
            let state = self.block_at(coord.y * cs + ly);
            if state.is_air() {
                continue;
            }
            for lz in 0..cs {
                for lx in 0..cs {
                    chunk.set_block(IVec3::new(lx, ly, lz), state);
                }
            }
        }
        chunk
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deep_dark_layers() {
        let terrain = FlatTerrain::deep_dark();
        assert_eq!(terrain.surface_y(), 0);
        assert!(terrain.block_at(0).is_air());
        assert!(terrain.block_at(-1).is(BlockKind::Stone));
        assert!(terrain.block_at(-10).is(BlockKind::Deepslate));
        assert!(terrain.block_at(-16).is(BlockKind::Bedrock));
        assert!(terrain.block_at(-17).is_air());
    }

    #[test]
    fn test_generate_chunk() {
        let terrain = FlatTerrain::deep_dark();
        let below = terrain.generate_chunk(IVec3::new(0, -1, 0));
        assert!(below.block(IVec3::new(3, 15, 7)).is(BlockKind::Stone));
        assert!(below.block(IVec3::new(0, 0, 0)).is(BlockKind::Bedrock));
        let above = terrain.generate_chunk(IVec3::new(0, 0, 0));
        assert!(!above.has_non_air());
    }
}
