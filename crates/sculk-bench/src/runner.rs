use std::time::Instant;

use glam::IVec3;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use sculk_core::constants::{CHUNK_SIZE, MAX_CURSORS};
use sculk_core::{BlockKind, FaceSet};
use sculk_spread::{place_patch, ChargeCursor, SculkPatchConfig, Spreader, SpreaderConfig};
use sculk_world::grid::BlockGrid;
use sculk_world::terrain::FlatTerrain;
use sculk_world::SculkWorld;

use crate::scenes::{catalyst_positions, SceneConfig, SceneKind};

/// Timing data for a single benchmark run.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct TimingSeries {
    pub mean_ms: f64,
    pub median_ms: f64,
    pub p95_ms: f64,
    pub p99_ms: f64,
    pub min_ms: f64,
    pub max_ms: f64,
}

/// Result of a single scene benchmark.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct BenchmarkResult {
    pub scene_name: String,
    /// Largest cursor count held by any one spreader during the run.
    pub peak_cursors: u32,
    /// Sculk blocks in the scene once the run finished.
    pub sculk_blocks: u32,
    pub events: u64,
    pub tick_count: u32,
    pub timings: TimingSeries,
}

/// Runs spreading scenes headless on the CPU.
pub struct BenchmarkRunner {
    tick_count: u32,
    config: SpreaderConfig,
}

/// Counters gathered while a scene runs.
#[derive(Default)]
struct SceneStats {
    peak_cursors: usize,
    sculk_blocks: usize,
    events: u64,
}

impl BenchmarkRunner {
    pub fn new(tick_count: u32, config: SpreaderConfig) -> Self {
        Self { tick_count, config }
    }

    /// Run a single benchmark scene and return timing results.
    pub fn run_scene(&self, scene: &SceneConfig) -> BenchmarkResult {
        log::info!("Running scene '{}' ({:?})...", scene.name, scene.kind);

        let mut frame_times = Vec::with_capacity(self.tick_count as usize);
        let stats = match scene.kind {
            SceneKind::CatalystBurst { deaths, experience } => {
                self.run_catalyst_burst(scene, deaths, experience, &mut frame_times)
            }
            SceneKind::SaturatedCapacity { catalysts } => {
                self.run_saturated(scene, catalysts, &mut frame_times)
            }
            SceneKind::WorldGenPatch => self.run_patches(scene, &mut frame_times),
            SceneKind::PersistRoundTrip => self.run_persist(&mut frame_times),
        };

        let timings = compute_timings(&frame_times);
        log::info!(
            "  Done: mean={:.3}ms, p95={:.3}ms, p99={:.3}ms, {} sculk",
            timings.mean_ms,
            timings.p95_ms,
            timings.p99_ms,
            stats.sculk_blocks
        );

        BenchmarkResult {
            scene_name: scene.name.to_string(),
            peak_cursors: stats.peak_cursors as u32,
            sculk_blocks: stats.sculk_blocks as u32,
            events: stats.events,
            tick_count: self.tick_count,
            timings,
        }
    }

    fn run_catalyst_burst(
        &self,
        scene: &SceneConfig,
        deaths: u32,
        experience: u32,
        frame_times: &mut Vec<f64>,
    ) -> SceneStats {
        let mut world = SculkWorld::new(scene.seed, scene.chunk_radius, self.config);
        world.place_catalyst(IVec3::new(0, -1, 0));
        for d in 0..deaths as i32 {
            world.on_death(IVec3::new(d % 3 - 1, 0, (d / 3) % 3 - 1), experience);
        }

        let mut stats = SceneStats::default();
        for _ in 0..self.tick_count {
            stats.peak_cursors = stats.peak_cursors.max(peak_cursors(&world));
            let frame_start = Instant::now();
            stats.events += world.tick().len() as u64;
            frame_times.push(frame_start.elapsed().as_secs_f64() * 1000.0);
        }
        stats.sculk_blocks = count_sculk(world.grid(), scene.chunk_radius);
        stats
    }

    fn run_saturated(
        &self,
        scene: &SceneConfig,
        catalysts: u32,
        frame_times: &mut Vec<f64>,
    ) -> SceneStats {
        let mut world = SculkWorld::new(scene.seed, scene.chunk_radius, self.config);
        let positions = catalyst_positions(catalysts);
        for pos in &positions {
            world.place_catalyst(*pos);
        }

        let mut stats = SceneStats::default();
        for _ in 0..self.tick_count {
            for pos in &positions {
                world.on_death(*pos + IVec3::new(1, 1, 0), (MAX_CURSORS as u32) * 1000);
            }
            stats.peak_cursors = stats.peak_cursors.max(peak_cursors(&world));
            let frame_start = Instant::now();
            stats.events += world.tick().len() as u64;
            frame_times.push(frame_start.elapsed().as_secs_f64() * 1000.0);
        }
        stats.sculk_blocks = count_sculk(world.grid(), scene.chunk_radius);
        stats
    }

    fn run_patches(&self, scene: &SceneConfig, frame_times: &mut Vec<f64>) -> SceneStats {
        let radius = scene.chunk_radius;
        let mut grid = BlockGrid::default();
        grid.generate(
            &FlatTerrain::deep_dark(),
            IVec3::new(-radius, -1, -radius),
            IVec3::new(radius - 1, 0, radius - 1),
        );
        let mut rng = ChaCha8Rng::seed_from_u64(scene.seed);
        let patch = SculkPatchConfig::default();
        let span = (radius * CHUNK_SIZE as i32 * 2 / 32).max(1);

        let mut stats = SceneStats::default();
        for tick in 0..self.tick_count as i32 {
            let origin = IVec3::new(
                (tick % span) * 32 - radius * CHUNK_SIZE as i32 + 16,
                0,
                ((tick / span) % span) * 32 - radius * CHUNK_SIZE as i32 + 16,
            );
            let frame_start = Instant::now();
            place_patch(&mut grid, origin, &mut rng, &patch);
            frame_times.push(frame_start.elapsed().as_secs_f64() * 1000.0);
            stats.events += grid.drain_events().len() as u64;
        }
        // Each patch owns a short-lived spreader, so no cursor count is sampled.
        stats.sculk_blocks = count_sculk(&grid, radius);
        stats
    }

    fn run_persist(&self, frame_times: &mut Vec<f64>) -> SceneStats {
        let mut source = Spreader::new(self.config);
        source.restore_cursors((0..MAX_CURSORS as i32).map(|i| {
            let facings =
                (i % 2 == 0).then(|| FaceSet::from_bits(i as u8 % 64).unwrap_or(FaceSet::EMPTY));
            ChargeCursor::with_state(IVec3::new(i, 0, -i), 31 * i as u32 + 1, 1, i as u32 % 3, facings)
        }));
        let mut target = Spreader::new(self.config);

        let mut stats = SceneStats::default();
        for _ in 0..self.tick_count {
            let frame_start = Instant::now();
            let bytes = sculk_persist::save(&source);
            match sculk_persist::load(&bytes, &mut target) {
                Ok(report) => stats.events += report.restored as u64,
                Err(e) => log::error!("persist round trip failed: {e}"),
            }
            frame_times.push(frame_start.elapsed().as_secs_f64() * 1000.0);
        }
        stats.peak_cursors = target.cursors().len();
        stats
    }
}

fn peak_cursors(world: &SculkWorld) -> usize {
    world
        .catalysts()
        .iter()
        .map(|c| c.spreader().cursors().len())
        .max()
        .unwrap_or(0)
}

fn count_sculk(grid: &BlockGrid, chunk_radius: i32) -> usize {
    let extent = chunk_radius * CHUNK_SIZE as i32;
    grid.count_blocks(
        IVec3::new(-extent, -(CHUNK_SIZE as i32), -extent),
        IVec3::new(extent - 1, CHUNK_SIZE as i32 - 1, extent - 1),
        |state| state.is(BlockKind::Sculk),
    )
}

/// Compute timing statistics from a list of frame times in milliseconds.
fn compute_timings(times: &[f64]) -> TimingSeries {
    if times.is_empty() {
        return TimingSeries {
            mean_ms: 0.0,
            median_ms: 0.0,
            p95_ms: 0.0,
            p99_ms: 0.0,
            min_ms: 0.0,
            max_ms: 0.0,
        };
    }

    let mut sorted = times.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));

    let n = sorted.len();
    let mean = sorted.iter().sum::<f64>() / n as f64;
    let median = if n % 2 == 0 {
        (sorted[n / 2 - 1] + sorted[n / 2]) / 2.0
    } else {
        sorted[n / 2]
    };
    let p95_idx = ((n as f64) * 0.95).ceil() as usize;
    let p99_idx = ((n as f64) * 0.99).ceil() as usize;

    TimingSeries {
        mean_ms: mean,
        median_ms: median,
        p95_ms: sorted[p95_idx.min(n - 1)],
        p99_ms: sorted[p99_idx.min(n - 1)],
        min_ms: sorted[0],
        max_ms: sorted[n - 1],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compute_timings() {
        let timings = compute_timings(&[4.0, 1.0, 3.0, 2.0]);
        assert_eq!(timings.min_ms, 1.0);
        assert_eq!(timings.max_ms, 4.0);
        assert_eq!(timings.median_ms, 2.5);
        assert_eq!(timings.mean_ms, 2.5);
        assert_eq!(compute_timings(&[]).max_ms, 0.0);
    }

    #[test]
    fn test_catalyst_scene_runs() {
        let runner = BenchmarkRunner::new(40, SpreaderConfig::live());
        let scene = SceneConfig {
            name: "tiny",
            kind: SceneKind::CatalystBurst {
                deaths: 2,
                experience: 60,
            },
            seed: 9,
            chunk_radius: 1,
        };
        let result = runner.run_scene(&scene);
        assert_eq!(result.tick_count, 40);
        assert!(result.peak_cursors >= 1 && result.peak_cursors <= 32);
        assert!(result.sculk_blocks > 0);
    }

    #[test]
    fn test_patch_scene_reports_no_cursor_peak() {
        let runner = BenchmarkRunner::new(2, SpreaderConfig::live());
        let scene = SceneConfig {
            name: "patch",
            kind: SceneKind::WorldGenPatch,
            seed: 4,
            chunk_radius: 1,
        };
        let result = runner.run_scene(&scene);
        assert_eq!(result.peak_cursors, 0);
        assert!(result.events > 0);
    }

    #[test]
    fn test_persist_scene_restores_full_list() {
        let runner = BenchmarkRunner::new(3, SpreaderConfig::live());
        let scene = SceneConfig {
            name: "persist",
            kind: SceneKind::PersistRoundTrip,
            seed: 0,
            chunk_radius: 1,
        };
        let result = runner.run_scene(&scene);
        assert_eq!(result.peak_cursors, 32);
        assert_eq!(result.events, 3 * 32);
    }
}
