use arrayvec::ArrayVec;
use indexmap::IndexMap;
use rand::RngCore;
use sculk_core::constants::{MAX_CHARGE, MAX_CURSORS, PARTICLE_DENSITY_DIVISOR};
use sculk_core::{BlockPos, FaceSet};

use crate::config::SpreaderConfig;
use crate::cursor::ChargeCursor;
use crate::world::{SpreadEvent, SpreadWorld};

pub type CursorList = ArrayVec<ChargeCursor, MAX_CURSORS>;

/// Charge gathered at one cell during a tick.
#[derive(Debug, Default)]
struct CellTally {
    charge: u32,
    /// Index into the retained list of the cursor whose facings are reported.
    representative: Option<usize>,
}

/// Owns a bounded set of charge cursors and advances them together.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Spreader {
    config: SpreaderConfig,
    cursors: CursorList,
}

impl Spreader {
    /// A spreader with no cursors. Out-of-range config values are clamped.
    pub fn new(config: SpreaderConfig) -> Self {
        Self {
            config: config.sanitized(),
            cursors: ArrayVec::new(),
        }
    }

    pub fn live() -> Self {
        Self::new(SpreaderConfig::live())
    }

    pub fn world_gen() -> Self {
        Self::new(SpreaderConfig::world_gen())
    }

    pub fn config(&self) -> &SpreaderConfig {
        &self.config
    }

    pub fn is_world_generation(&self) -> bool {
        self.config.world_generation
    }

    pub fn cursors(&self) -> &[ChargeCursor] {
        &self.cursors
    }

    /// Sum of all cursor charge.
    pub fn total_charge(&self) -> u32 {
        self.cursors.iter().map(ChargeCursor::charge).sum()
    }

    pub fn clear(&mut self) {
        self.cursors.clear();
    }

    /// Split `charge` into cursors at `pos`, at most `MAX_CHARGE` each.
    /// Whatever does not fit under the cursor cap is discarded.
    pub fn add_cursors(&mut self, pos: BlockPos, mut charge: u32) {
        while charge > 0 {
            let portion = charge.min(MAX_CHARGE);
            if self.cursors.try_push(ChargeCursor::new(pos, portion)).is_err() {
                log::debug!("cursor cap reached at {pos}, discarding {charge} charge");
                return;
            }
            charge -= portion;
        }
    }

    /// Replace the cursor list, e.g. from saved state. Returns how many
    /// cursors did not fit.
    pub fn restore_cursors(&mut self, cursors: impl IntoIterator<Item = ChargeCursor>) -> usize {
        self.cursors.clear();
        let mut dropped = 0;
        for cursor in cursors {
            if self.cursors.try_push(cursor).is_err() {
                dropped += 1;
            }
        }
        if dropped > 0 {
            log::warn!("restored spreader over capacity, dropped {dropped} cursors");
        }
        dropped
    }

    /// Advance every cursor one tick, merge colocated cursors, and emit one
    /// `Spread` event per cell still holding charge.
    pub fn update_cursors(
        &mut self,
        world: &mut dyn SpreadWorld,
        origin: BlockPos,
        rng: &mut dyn RngCore,
        spread_veins: bool,
    ) {
        if self.cursors.is_empty() {
            return;
        }

        let pending = std::mem::take(&mut self.cursors);
        let mut retained = CursorList::new();
        let mut cells: IndexMap<BlockPos, CellTally> = IndexMap::new();
        let mut merged = 0;
        let mut discharged = 0;

        for mut cursor in pending {
            if cursor.is_pos_unreasonable(origin) {
                log::debug!("discarding runaway cursor at {}", cursor.pos());
                continue;
            }

            cursor.update(world, origin, rng, &self.config, spread_veins);
            if cursor.charge() == 0 {
                world.emit(SpreadEvent::Discharge { pos: cursor.pos() });
                discharged += 1;
                continue;
            }

            let tally = cells.entry(cursor.pos()).or_default();
            tally.charge += cursor.charge();

            match tally.representative {
                None => {
                    tally.representative = Some(retained.len());
                    retained.push(cursor);
                }
                Some(index) => {
                    let rep = &mut retained[index];
                    if !self.config.world_generation
                        && rep.charge() + cursor.charge() <= MAX_CHARGE
                    {
                        rep.merge_with(&mut cursor);
                        merged += 1;
                    } else {
                        if cursor.charge() < rep.charge() {
                            tally.representative = Some(retained.len());
                        }
                        retained.push(cursor);
                    }
                }
            }
        }

        for (pos, tally) in &cells {
            let Some(index) = tally.representative else {
                continue;
            };
            if tally.charge == 0 {
                continue;
            }
            world.emit(SpreadEvent::Spread {
                pos: *pos,
                density: particle_density(tally.charge),
                faces: retained[index].facings().unwrap_or(FaceSet::EMPTY),
            });
        }

        log::trace!(
            "spreader tick: {} cursors, {} cells, {merged} merged, {discharged} discharged",
            retained.len(),
            cells.len()
        );
        self.cursors = retained;
    }
}

impl Default for Spreader {
    fn default() -> Self {
        Self::live()
    }
}

/// Particle count for `charge` arriving at one cell.
pub fn particle_density(charge: u32) -> u32 {
    ((charge as f64).ln_1p() / PARTICLE_DENSITY_DIVISOR) as u32 + 1
}
