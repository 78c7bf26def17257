//! Batch distribution for parallel simulation.
//!
//! A run's trials are cut into a fixed number of contiguous batches. Each batch draws from its
//! own RNG substream, so the merged result depends on the seed and batch layout only, never on
//! how many threads happened to run it.

use chrono::{DateTime, Utc};
use rayon::prelude::*;
use tracing::{info, instrument};

use crate::combat::{Rng, SimulationRequest};
use crate::error::SimulationError;
use crate::parallel::pool::WorkerPool;
use crate::simulation::{assemble_report, AggregatedReport, ResourcePrices, RunPlan, TrialLedger};

/// Number of substreams a parallel run is split into, independent of worker count.
pub const PARALLEL_BATCH_COUNT: usize = 32;

/// Split `total` items into up to `num_batches` ranges `[start, end)`.
/// Batches are as equal in size as possible; later batches may be smaller.
///
/// # Example
/// ```
/// # use warodds::parallel::batch_ranges;
/// let ranges = batch_ranges(100, 4);
/// assert_eq!(ranges, vec![(0, 25), (25, 50), (50, 75), (75, 100)]);
/// ```
pub fn batch_ranges(total: usize, num_batches: usize) -> Vec<(usize, usize)> {
    if total == 0 || num_batches == 0 {
        return Vec::new();
    }
    let num_batches = num_batches.min(total);
    let base = total / num_batches;
    let remainder = total % num_batches;
    let mut ranges = Vec::with_capacity(num_batches);
    let mut start = 0;
    for i in 0..num_batches {
        let size = base + if i < remainder { 1 } else { 0 };
        let end = start + size;
        ranges.push((start, end));
        start = end;
    }
    ranges
}

/// Parallel counterpart of [crate::simulation::run_simulation].
pub fn run_simulation_parallel(
    request: &SimulationRequest,
    prices: &ResourcePrices,
    generated_at: DateTime<Utc>,
    pool: &WorkerPool,
) -> Result<AggregatedReport, SimulationError> {
    simulate_batches(request, prices, generated_at, pool).map(|(report, _)| report)
}

/// Runs the request's trials in seeded batches on `pool` and merges them in batch order.
#[instrument(skip_all, fields(action = ?request.action.kind(), workers = pool.workers))]
pub fn simulate_batches(
    request: &SimulationRequest,
    prices: &ResourcePrices,
    generated_at: DateTime<Utc>,
    pool: &WorkerPool,
) -> Result<(AggregatedReport, TrialLedger), SimulationError> {
    let plan = RunPlan::prepare(request, prices)?;
    let seed = match request.seed {
        Some(seed) => seed,
        None => Rng::from_entropy().1,
    };
    let ranges = batch_ranges(plan.iterations as usize, PARALLEL_BATCH_COUNT);

    let batches: Vec<TrialLedger> = pool.install(|| {
        ranges
            .par_iter()
            .enumerate()
            .map(|(index, &(start, end))| {
                let mut rng = Rng::substream(seed, index as u64);
                plan.run_trials(request, &mut rng, end - start)
            })
            .collect()
    })?;

    let mut ledger = TrialLedger::with_capacity(plan.iterations as usize);
    for batch in batches {
        ledger.merge(batch);
    }

    let report = assemble_report(request, &plan, &ledger, prices, seed, generated_at);
    info!(
        iterations = plan.iterations,
        seed,
        batches = ranges.len(),
        "parallel simulation complete"
    );
    Ok((report, ledger))
}
