use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::warn;

use crate::capacity::{check_capacity, requested_slots};
use crate::error::ScheduleError;
use crate::fill::fill_sessions;
use crate::grid::Grid;
use crate::place::{SortStrategy, place_sessions};
use crate::session::Session;

/// Grid dimensions and search parameters for a scheduling run. Immutable
/// for the duration of a run.
#[derive(Debug, Clone)]
pub struct PlanConfig {
    pub blocks: usize,
    pub rooms: usize,
    /// Upper bound on randomized placement tries per run.
    pub max_tries: usize,
    pub strategy: SortStrategy,
    /// Base seed for reproducible runs; advanced per permutation index.
    /// `None` draws fresh entropy for every run.
    pub seed: Option<u64>,
}

impl Default for PlanConfig {
    fn default() -> Self {
        PlanConfig {
            blocks: 5,
            rooms: 8,
            max_tries: 5000,
            strategy: SortStrategy::default(),
            seed: None,
        }
    }
}

impl PlanConfig {
    fn rng_for(&self, index: usize) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed.wrapping_add(index as u64)),
            None => StdRng::from_entropy(),
        }
    }
}

/// One finished scheduling run.
#[derive(Debug, Clone)]
pub struct ScheduleRun {
    pub grid: Grid,
    /// Placement tries consumed (0 when no group phase ran).
    pub tries: usize,
    /// Blocks that ended with every room empty. Advisory only.
    pub empty_blocks: Vec<usize>,
}

/// Runs the full pipeline once: capacity check, contiguous placement of
/// `groups`, then filling `bofs` into the remaining empty cells.
///
/// `base` carries pre-existing placements (updating an already published
/// schedule); `None` starts from an empty `blocks x rooms` grid. On any
/// error the caller gets no grid at all, never a partial one.
pub fn plan(
    config: &PlanConfig,
    groups: &[Session],
    bofs: &[Session],
    base: Option<&Grid>,
) -> Result<ScheduleRun, ScheduleError> {
    plan_indexed(config, groups, bofs, base, 0)
}

/// Runs [`plan`] `count` times, each with independent random state.
///
/// Results are reported per index: one unlucky ordering exhausting its
/// tries never aborts its siblings, since later permutations are likely to
/// succeed anyway. With a configured seed the runs are reproducible but
/// distinct (seed advanced per index).
pub fn plan_many(
    config: &PlanConfig,
    groups: &[Session],
    bofs: &[Session],
    base: Option<&Grid>,
    count: usize,
) -> Vec<Result<ScheduleRun, ScheduleError>> {
    (0..count)
        .map(|index| plan_indexed(config, groups, bofs, base, index))
        .collect()
}

fn plan_indexed(
    config: &PlanConfig,
    groups: &[Session],
    bofs: &[Session],
    base: Option<&Grid>,
    index: usize,
) -> Result<ScheduleRun, ScheduleError> {
    let mut rng = config.rng_for(index);
    let mut grid = match base {
        Some(existing) => existing.clone(),
        None => Grid::new(config.blocks, config.rooms),
    };

    check_capacity(
        requested_slots(groups) + requested_slots(bofs),
        grid.empty_count(),
    )?;

    let tries = place_sessions(&mut grid, groups, config.max_tries, config.strategy, &mut rng)?;
    fill_sessions(&mut grid, bofs, config.strategy, &mut rng)?;

    let empty_blocks = grid.empty_blocks();
    if !empty_blocks.is_empty() {
        warn!(run = index, ?empty_blocks, "schedule leaves whole blocks unused");
    }

    Ok(ScheduleRun {
        grid,
        tries,
        empty_blocks,
    })
}
