pub mod catalyst;
pub mod chunk;
pub mod chunk_map;
pub mod grid;
pub mod state_machine;
pub mod terrain;

use catalyst::SculkCatalyst;
use glam::IVec3;
use grid::BlockGrid;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use sculk_core::{BlockKind, BlockPos, BlockState};
use sculk_spread::{SpreadEvent, SpreadWorld, SpreaderConfig};
use terrain::FlatTerrain;

/// Primary public struct for the sculk-world crate.
/// Owns the block grid, the catalysts placed in it, and the tick RNG.
pub struct SculkWorld {
    grid: BlockGrid,
    catalysts: Vec<SculkCatalyst>,
    config: SpreaderConfig,
    rng: ChaCha8Rng,
    tick: u64,
}

impl SculkWorld {
    /// A deep-dark floor spanning `radius` chunks around the origin on
    /// each horizontal axis, surface at y = 0.
    pub fn new(seed: u64, radius: i32, config: SpreaderConfig) -> Self {
        let mut grid = BlockGrid::default();
        grid.generate(
            &FlatTerrain::deep_dark(),
            IVec3::new(-radius, -1, -radius),
            IVec3::new(radius - 1, 0, radius - 1),
        );
        Self {
            grid,
            catalysts: Vec::new(),
            config,
            rng: ChaCha8Rng::seed_from_u64(seed),
            tick: 0,
        }
    }

    /// Place a catalyst block at `pos` and start listening for deaths there.
    pub fn place_catalyst(&mut self, pos: BlockPos) {
        self.grid.set_block(pos, BlockState::of(BlockKind::SculkCatalyst));
        self.catalysts.push(SculkCatalyst::new(pos, self.config));
    }

    /// A death worth `experience` at `pos` feeds the first catalyst in
    /// earshot. Returns the catalyst position, if any heard it.
    pub fn on_death(&mut self, pos: BlockPos, experience: u32) -> Option<BlockPos> {
        let catalyst = self.catalysts.iter_mut().find(|c| c.hears(pos))?;
        catalyst.on_death(pos, experience).then_some(catalyst.pos())
    }

    /// Run one tick of every catalyst, then update chunk lifecycles.
    /// Returns the events emitted this tick.
    pub fn tick(&mut self) -> Vec<SpreadEvent> {
        for catalyst in &mut self.catalysts {
            catalyst.tick(&mut self.grid, &mut self.rng);
        }
        self.grid.end_tick();
        self.tick += 1;
        let events = self.grid.drain_events();
        log::trace!("tick {}: {} events", self.tick, events.len());
        events
    }

    pub fn tick_count(&self) -> u64 {
        self.tick
    }

    pub fn grid(&self) -> &BlockGrid {
        &self.grid
    }

    pub fn grid_mut(&mut self) -> &mut BlockGrid {
        &mut self.grid
    }

    pub fn catalysts(&self) -> &[SculkCatalyst] {
        &self.catalysts
    }

    /// Get counts for debug display: (total_loaded, active, static_count)
    pub fn chunk_counts(&self) -> (u32, u32, u32) {
        self.grid.chunk_map().chunk_counts()
    }

    pub fn block(&self, pos: BlockPos) -> BlockState {
        self.grid.block(pos)
    }
}
