use thiserror::Error;

#[derive(Error, Debug)]
pub enum SimulationError {
    #[error("invalid action: {0}")]
    InvalidAction(String),

    #[error("invalid {side} profile: {field} is not a finite number")]
    InvalidProfile {
        side: &'static str,
        field: &'static str,
    },

    #[error("worker pool error: {0}")]
    WorkerPool(#[from] rayon::ThreadPoolBuildError),
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error reading {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error(transparent)]
    Simulation(#[from] SimulationError),
}

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}
