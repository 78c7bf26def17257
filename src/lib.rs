//! Monte Carlo odds for a single ground, air or naval action between two nations.
//!
//! [simulation::run_simulation] is the entry point: it resolves modifiers once, runs the
//! requested number of seeded trials through the matching action simulator and summarizes
//! every metric into percentile distributions.

pub mod cli;
pub mod combat;
pub mod config;
pub mod error;
pub mod parallel;
pub mod simulation;

pub use combat::{ActionSpec, CombatContext, NationCombatProfile, SimulationRequest};
pub use error::{ConfigError, ExportError, SimulationError};
pub use simulation::{run_simulation, AggregatedReport, ResourcePrices};
