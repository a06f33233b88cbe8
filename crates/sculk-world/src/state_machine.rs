use std::collections::HashSet;

use crate::chunk::ChunkState;
use crate::chunk_map::ChunkMap;
use sculk_core::types::ChunkCoord;

/// Advance chunk lifecycles after a tick.
///
/// Chunks listed in `changed` had at least one block written. They reset
/// their idle counter and wake any sleeping face neighbour so that spread
/// across a boundary keeps going. Every other active chunk counts an idle
/// tick and falls asleep after CHUNK_SLEEP_TICKS of them.
pub fn process_activity(chunk_map: &mut ChunkMap, changed: &HashSet<ChunkCoord>) {
    let mut to_wake: Vec<ChunkCoord> = Vec::new();
    let mut to_sleep: Vec<ChunkCoord> = Vec::new();

    for (coord, chunk) in chunk_map.iter_mut() {
        if changed.contains(coord) {
            chunk.activate();
            to_wake.extend(ChunkMap::face_neighbors(coord));
        } else if chunk.state == ChunkState::Active && chunk.tick_idle() {
            to_sleep.push(*coord);
        }
    }

    for coord in &to_sleep {
        if let Some(chunk) = chunk_map.get_mut(coord) {
            chunk.sleep();
        }
    }

    for coord in &to_wake {
        if let Some(chunk) = chunk_map.get_mut(coord) {
            if chunk.state == ChunkState::Static {
                chunk.activate();
            }
        }
    }
}
