use glam::IVec3;
use sculk_core::constants::MAX_CURSOR_DECAY_DELAY;
use sculk_core::FaceSet;
use sculk_spread::{ChargeCursor, Spreader};

use crate::compat;
use crate::error::PersistError;
use crate::format::*;

/// Outcome of restoring a spreader from saved bytes.
#[derive(Debug, Default)]
pub struct LoadReport {
    /// Cursors now held by the spreader.
    pub restored: usize,
    /// Records that could not be decoded.
    pub skipped: usize,
    /// Decoded cursors that did not fit under the cursor cap.
    pub dropped: usize,
    /// Compatibility warnings (e.g., mode mismatch).
    pub warnings: Vec<String>,
}

/// Replace `spreader`'s cursors with those stored in `bytes`.
///
/// Undecodable records are skipped. Charge and decay delay are clamped to
/// their valid ranges and the list is cut to the cursor cap. On error the
/// spreader is left untouched.
pub fn load(bytes: &[u8], spreader: &mut Spreader) -> Result<LoadReport, PersistError> {
    if bytes.len() < HEADER_SIZE {
        return Err(PersistError::FileTooSmall(bytes.len(), HEADER_SIZE));
    }

    let header: SaveHeader = bytemuck::pod_read_unaligned(&bytes[..HEADER_SIZE]);
    let warnings = compat::validate_header(&header, spreader.is_world_generation())?;

    let mut cursors = Vec::new();
    let mut skipped = 0;
    let mut offset = HEADER_SIZE;
    for index in 0..header.cursor_count {
        let body_start = offset + RECORD_PREFIX_SIZE;
        if bytes.len() < body_start {
            return Err(PersistError::TruncatedFile {
                expected: body_start,
                actual: bytes.len(),
            });
        }
        let len = u16::from_le_bytes([bytes[offset], bytes[offset + 1]]) as usize;
        let body_end = body_start + len;
        if bytes.len() < body_end {
            return Err(PersistError::TruncatedFile {
                expected: body_end,
                actual: bytes.len(),
            });
        }

        match decode_record(&bytes[body_start..body_end]) {
            Some(cursor) => cursors.push(cursor),
            None => {
                log::warn!("skipping malformed cursor record {index} ({len} bytes)");
                skipped += 1;
            }
        }
        offset = body_end;
    }

    let dropped = spreader.restore_cursors(cursors);
    for warning in &warnings {
        log::warn!("{warning}");
    }

    Ok(LoadReport {
        restored: spreader.cursors().len(),
        skipped,
        dropped,
        warnings,
    })
}

/// Little-endian reader over one record body.
struct Reader<'a> {
    bytes: &'a [u8],
}

impl<'a> Reader<'a> {
    fn take<const N: usize>(&mut self) -> Option<[u8; N]> {
        let (head, rest) = self.bytes.split_first_chunk::<N>()?;
        self.bytes = rest;
        Some(*head)
    }

    fn u8(&mut self) -> Option<u8> {
        self.take::<1>().map(|[b]| b)
    }

    fn u32(&mut self) -> Option<u32> {
        self.take().map(u32::from_le_bytes)
    }

    fn i32(&mut self) -> Option<i32> {
        self.take().map(i32::from_le_bytes)
    }
}

fn decode_record(body: &[u8]) -> Option<ChargeCursor> {
    let mut reader = Reader { bytes: body };
    let mask = reader.u8()?;
    if mask & !KNOWN_FIELDS != 0 || body.len() != record_body_size(mask) {
        return None;
    }

    let pos = IVec3::new(reader.i32()?, reader.i32()?, reader.i32()?);
    let charge = reader.u32()?;
    let decay_delay = if mask & HAS_DECAY_DELAY != 0 {
        reader.u8()?
    } else {
        MAX_CURSOR_DECAY_DELAY
    };
    let update_delay = if mask & HAS_UPDATE_DELAY != 0 {
        reader.u32()?
    } else {
        0
    };
    let facings = if mask & HAS_FACINGS != 0 {
        Some(FaceSet::from_bits(reader.u8()?)?)
    } else {
        None
    };

    Some(ChargeCursor::with_state(
        pos,
        charge,
        decay_delay,
        update_delay,
        facings,
    ))
}
