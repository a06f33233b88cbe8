/// Magic bytes identifying a saved spreader.
pub const MAGIC: [u8; 4] = *b"SCLK";

/// Current save format version.
pub const FORMAT_VERSION: u16 = 1;

/// Size of the file header in bytes.
pub const HEADER_SIZE: usize = 16;

/// Header flag: the spreader ran in world-generation mode.
pub const FLAG_WORLD_GENERATION: u16 = 1;

/// Size of the little-endian length prefix before each record.
pub const RECORD_PREFIX_SIZE: usize = 2;

/// Record body: presence mask, position and charge are always present.
pub const RECORD_BASE_SIZE: usize = 1 + 12 + 4;

/// Presence mask bits for the optional record fields.
pub const HAS_DECAY_DELAY: u8 = 1 << 0;
pub const HAS_UPDATE_DELAY: u8 = 1 << 1;
pub const HAS_FACINGS: u8 = 1 << 2;
pub const KNOWN_FIELDS: u8 = HAS_DECAY_DELAY | HAS_UPDATE_DELAY | HAS_FACINGS;

/// Save file header. Fixed 16 bytes, repr(C) for byte-level serialization.
///
/// Followed by `cursor_count` records, each a u16 body length and a body:
/// `mask:u8, x:i32, y:i32, z:i32, charge:u32`, then `decay_delay:u8`,
/// `update_delay:u32` and `facings:u8` when their mask bit is set.
#[repr(C)]
#[derive(Debug, Clone, Copy, bytemuck::Pod, bytemuck::Zeroable)]
pub struct SaveHeader {
    pub magic: [u8; 4],
    pub version: u16,
    pub flags: u16,
    pub cursor_count: u32,
    pub _pad: u32,
}

impl SaveHeader {
    pub fn world_generation(&self) -> bool {
        self.flags & FLAG_WORLD_GENERATION != 0
    }
}

/// Size of a record body carrying the fields in `mask`.
pub fn record_body_size(mask: u8) -> usize {
    let mut size = RECORD_BASE_SIZE;
    if mask & HAS_DECAY_DELAY != 0 {
        size += 1;
    }
    if mask & HAS_UPDATE_DELAY != 0 {
        size += 4;
    }
    if mask & HAS_FACINGS != 0 {
        size += 1;
    }
    size
}
