use sculk_spread::{ChargeCursor, Spreader};

use crate::format::*;

/// Serialize a spreader's cursors into the save binary format.
///
/// Layout: header (16B) + one length-prefixed record per cursor, in list
/// order. Facings are written only for cursors that carry them.
pub fn save(spreader: &Spreader) -> Vec<u8> {
    let cursors = spreader.cursors();
    let header = SaveHeader {
        magic: MAGIC,
        version: FORMAT_VERSION,
        flags: if spreader.is_world_generation() {
            FLAG_WORLD_GENERATION
        } else {
            0
        },
        cursor_count: cursors.len() as u32,
        _pad: 0,
    };

    let mut output = Vec::with_capacity(
        HEADER_SIZE + cursors.len() * (RECORD_PREFIX_SIZE + record_body_size(KNOWN_FIELDS)),
    );
    output.extend_from_slice(bytemuck::bytes_of(&header));
    for cursor in cursors {
        write_record(&mut output, cursor);
    }
    output
}

fn write_record(output: &mut Vec<u8>, cursor: &ChargeCursor) {
    let mut mask = HAS_DECAY_DELAY | HAS_UPDATE_DELAY;
    if cursor.facings().is_some() {
        mask |= HAS_FACINGS;
    }

    output.extend_from_slice(&(record_body_size(mask) as u16).to_le_bytes());
    output.push(mask);
    let pos = cursor.pos();
    output.extend_from_slice(&pos.x.to_le_bytes());
    output.extend_from_slice(&pos.y.to_le_bytes());
    output.extend_from_slice(&pos.z.to_le_bytes());
    output.extend_from_slice(&cursor.charge().to_le_bytes());
    output.push(cursor.decay_delay());
    output.extend_from_slice(&cursor.update_delay().to_le_bytes());
    if let Some(facings) = cursor.facings() {
        output.push(facings.bits());
    }
}
