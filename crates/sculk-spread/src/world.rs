use sculk_core::{BlockPos, BlockState, Direction, FaceSet};

use crate::behaviour::SculkBehaviour;

/// Events emitted outward by the simulation. They carry no behaviour of
/// their own; a host turns them into particles and sounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpreadEvent {
    /// A cursor ran out of charge at `pos`.
    Discharge { pos: BlockPos },
    /// Aggregated charge arrived at `pos` this tick.
    Spread {
        pos: BlockPos,
        /// Particle density, `floor(ln(1 + charge) / 2.3) + 1`.
        density: u32,
        /// Cached facings of the cell's representative cursor.
        faces: FaceSet,
    },
    /// Sculk or veins were placed at `pos`.
    SpreadSound { pos: BlockPos },
}

impl SpreadEvent {
    pub fn pos(&self) -> BlockPos {
        match *self {
            SpreadEvent::Discharge { pos }
            | SpreadEvent::Spread { pos, .. }
            | SpreadEvent::SpreadSound { pos } => pos,
        }
    }

    /// Event payload packed as `(density << 6) | faces`; zero for a discharge.
    pub fn packed_data(&self) -> u32 {
        match *self {
            SpreadEvent::Spread { density, faces, .. } => (density << 6) + faces.bits() as u32,
            SpreadEvent::Discharge { .. } | SpreadEvent::SpreadSound { .. } => 0,
        }
    }
}

/// The block grid as seen by the spreading simulation.
///
/// The simulation assumes exclusive access for the duration of a tick.
pub trait SpreadWorld {
    fn block(&self, pos: BlockPos) -> BlockState;

    fn set_block(&mut self, pos: BlockPos, state: BlockState);

    /// Whether the block at `pos` presents a full surface on `face`.
    fn is_face_sturdy(&self, pos: BlockPos, face: Direction) -> bool {
        self.block(pos).is_face_sturdy(face)
    }

    /// Whether the region containing `pos` is currently simulated.
    fn is_ticking(&self, pos: BlockPos) -> bool;

    /// The spreading policy implemented by `state`, if any.
    fn behaviour(&self, state: &BlockState) -> Option<&'static dyn SculkBehaviour>;

    fn emit(&mut self, event: SpreadEvent);
}
