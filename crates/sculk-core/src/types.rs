use glam::IVec3;

/// Block coordinate in world-space.
pub type BlockPos = IVec3;

/// Chunk coordinate in chunk-space (each unit = CHUNK_SIZE blocks).
pub type ChunkCoord = IVec3;
