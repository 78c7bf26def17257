//! Runtime settings and document loading. YAML or JSON, picked by file extension.
//! A missing settings file yields defaults; a malformed one is an error.

use std::fs;
use std::path::Path;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::combat::SimulationRequest;
use crate::error::ConfigError;
use crate::simulation::ResourcePrices;

pub const DEFAULT_CONFIG_PATH: &str = "warodds.yaml";
pub const CONFIG_ENV: &str = "WARODDS_CONFIG";
pub const LOG_ENV: &str = "WARODDS_LOG";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub prices: ResourcePrices,
    /// Run trials in seeded parallel batches instead of one sequential stream.
    pub parallel: bool,
    /// Worker threads for parallel runs. 0 means Rayon's default.
    pub workers: usize,
}

/// Settings from `explicit`, else `$WARODDS_CONFIG`, else `warodds.yaml` in the working directory.
pub fn resolve_settings(explicit: Option<&str>) -> Result<Settings, ConfigError> {
    let env_path = std::env::var(CONFIG_ENV).ok();
    let path = explicit
        .or(env_path.as_deref())
        .unwrap_or(DEFAULT_CONFIG_PATH);
    load_settings(path)
}

pub fn load_settings(path: impl AsRef<Path>) -> Result<Settings, ConfigError> {
    let path = path.as_ref();
    if !path.exists() {
        tracing::debug!(path = %path.display(), "no settings file, using defaults");
        return Ok(Settings::default());
    }
    read_document(path)
}

pub fn load_prices(path: impl AsRef<Path>) -> Result<ResourcePrices, ConfigError> {
    read_document(path)
}

/// Reads and validates a request document.
pub fn load_request(path: impl AsRef<Path>) -> Result<SimulationRequest, ConfigError> {
    let request: SimulationRequest = read_document(path)?;
    request.validate()?;
    Ok(request)
}

pub fn read_document<T: DeserializeOwned>(path: impl AsRef<Path>) -> Result<T, ConfigError> {
    let path = path.as_ref();
    let raw = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.display().to_string(),
        source,
    })?;
    parse_document(&raw, is_yaml(path))
}

pub fn parse_document<T: DeserializeOwned>(raw: &str, yaml: bool) -> Result<T, ConfigError> {
    if yaml {
        Ok(serde_yaml::from_str(raw)?)
    } else {
        Ok(serde_json::from_str(raw)?)
    }
}

fn is_yaml(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map_or(false, |ext| ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::combat::{ActionSpec, WarType};

    #[test]
    fn missing_settings_file_yields_defaults() {
        let settings = load_settings("definitely/not/here.yaml").expect("defaults");
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn partial_yaml_settings_fill_defaults() {
        let settings: Settings =
            parse_document("parallel: true\nprices:\n  steel: 10.0\n", true).expect("yaml");
        assert!(settings.parallel);
        assert_eq!(settings.workers, 0);
        assert_eq!(settings.prices.steel, 10.0);
        assert_eq!(settings.prices.gasoline, ResourcePrices::default().gasoline);
    }

    #[test]
    fn request_parses_from_yaml() {
        let raw = r#"
iterations: 500
seed: 3
nation_attacker:
  soldiers: 100
  tanks: 5
nation_defender:
  soldiers: 50
context:
  war_type: raid
  attacker_policy: PIRATE
action:
  type: ground
  attacking_soldiers: 100
  attacking_tanks: 5
  arm_soldiers_with_munitions: true
"#;
        let request: SimulationRequest = parse_document(raw, true).expect("yaml request");
        assert_eq!(request.iterations, 500);
        assert_eq!(request.context.war_type, WarType::Raid);
        assert!(matches!(request.action, ActionSpec::Ground { attacking_tanks: 5, .. }));
        assert_eq!(request.defender.money, None);
    }

    #[test]
    fn malformed_json_is_an_error() {
        let err = parse_document::<Settings>("{ not json", false).unwrap_err();
        assert!(matches!(err, ConfigError::Json(_)));
    }
}
