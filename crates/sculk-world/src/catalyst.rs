use rand::RngCore;
use sculk_core::math::closer_than;
use sculk_core::BlockPos;
use sculk_spread::{Spreader, SpreaderConfig, SpreadWorld};

/// Deaths within this distance of a catalyst feed it.
pub const CATALYST_LISTEN_RADIUS: f64 = 8.0;

/// A charge source: converts experience from nearby deaths into cursors
/// and drives its own spreader every tick.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SculkCatalyst {
    pos: BlockPos,
    spreader: Spreader,
}

impl SculkCatalyst {
    pub fn new(pos: BlockPos, config: SpreaderConfig) -> Self {
        Self {
            pos,
            spreader: Spreader::new(config),
        }
    }

    pub fn pos(&self) -> BlockPos {
        self.pos
    }

    pub fn spreader(&self) -> &Spreader {
        &self.spreader
    }

    pub fn hears(&self, pos: BlockPos) -> bool {
        closer_than(pos, self.pos, CATALYST_LISTEN_RADIUS)
    }

    /// Seed cursors where a death worth `experience` happened. Returns
    /// false if there was nothing to seed.
    pub fn on_death(&mut self, death_pos: BlockPos, experience: u32) -> bool {
        if experience == 0 {
            return false;
        }
        self.spreader.add_cursors(death_pos, experience);
        log::debug!(
            "catalyst at {} absorbed {experience} experience from {death_pos} ({} cursors)",
            self.pos,
            self.spreader.cursors().len()
        );
        true
    }

    pub fn tick(&mut self, world: &mut dyn SpreadWorld, rng: &mut dyn RngCore) {
        self.spreader.update_cursors(world, self.pos, rng, true);
    }
}
