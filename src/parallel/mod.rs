pub mod batch;
pub mod pool;

pub use batch::{
    batch_ranges, run_simulation_parallel, simulate_batches, PARALLEL_BATCH_COUNT,
};
pub use pool::WorkerPool;
