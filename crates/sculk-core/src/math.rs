use crate::constants::CHUNK_SIZE;
use crate::types::{BlockPos, ChunkCoord};
use glam::IVec3;

/// Chessboard distance: the largest per-axis difference.
pub fn chebyshev(a: BlockPos, b: BlockPos) -> i32 {
    (a - b).abs().max_element()
}

/// Squared euclidean distance between two block positions.
pub fn dist_sq(a: BlockPos, b: BlockPos) -> i64 {
    let d = (a - b).as_i64vec3();
    d.dot(d)
}

/// Squared distance between the columns of two positions, ignoring height.
pub fn horizontal_dist_sq(a: BlockPos, b: BlockPos) -> i64 {
    let dx = (a.x - b.x) as i64;
    let dz = (a.z - b.z) as i64;
    dx * dx + dz * dz
}

/// Whether `a` lies strictly within `radius` of `b`.
pub fn closer_than(a: BlockPos, b: BlockPos, radius: f64) -> bool {
    (dist_sq(a, b) as f64) < radius * radius
}

/// Convert a world-space block coordinate to its containing chunk coordinate.
pub fn world_to_chunk(world: BlockPos) -> ChunkCoord {
    let cs = CHUNK_SIZE as i32;
    IVec3::new(
        world.x.div_euclid(cs),
        world.y.div_euclid(cs),
        world.z.div_euclid(cs),
    )
}

/// Convert a world-space block coordinate to its local offset within a chunk.
pub fn world_to_local(world: BlockPos) -> IVec3 {
    let cs = CHUNK_SIZE as i32;
    IVec3::new(
        world.x.rem_euclid(cs),
        world.y.rem_euclid(cs),
        world.z.rem_euclid(cs),
    )
}

/// Linear index of a local offset within a chunk's block array.
pub fn local_index(local: IVec3) -> usize {
    let cs = CHUNK_SIZE as i32;
    (local.x + local.y * cs + local.z * cs * cs) as usize
}
