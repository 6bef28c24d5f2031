use std::path::Path;

use serde::Deserialize;
use zeolite_core::{PlanConfig, SortStrategy};

use crate::error::ZeoError;

/// Config file looked up in the working directory when `-c` is not given.
pub const DEFAULT_CONFIG_PATH: &str = "zeolite.toml";

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    pub grid: GridConfig,
    pub algorithm: AlgorithmConfig,
    pub groups: ClassConfig,
    pub bofs: ClassConfig,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            grid: GridConfig::default(),
            algorithm: AlgorithmConfig::default(),
            groups: ClassConfig::groups(),
            bofs: ClassConfig::bofs(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct GridConfig {
    pub blocks: usize,
    pub rooms: usize,
}

impl Default for GridConfig {
    fn default() -> Self {
        GridConfig { blocks: 5, rooms: 8 }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AlgorithmConfig {
    pub max_tries: usize,
    pub sort_strategy: SortStrategy,
    pub seed: Option<u64>,
}

impl Default for AlgorithmConfig {
    fn default() -> Self {
        AlgorithmConfig {
            max_tries: 5000,
            sort_strategy: SortStrategy::default(),
            seed: None,
        }
    }
}

/// Where to find one session class in its CSV export, and how long its
/// sessions may run.
#[derive(Debug, Clone, Deserialize)]
pub struct ClassConfig {
    /// 0-based column holding the session name.
    pub name_column: usize,
    /// 0-based column holding the requested block count.
    pub length_column: usize,
    /// Requested lengths are capped here at ingestion.
    pub max_length: usize,
}

impl ClassConfig {
    fn groups() -> Self {
        ClassConfig {
            name_column: 0,
            length_column: 1,
            max_length: 3,
        }
    }

    // The BOF sheet is a wide registration export; the title lives far out
    // in column AG.
    fn bofs() -> Self {
        ClassConfig {
            name_column: 32,
            length_column: 33,
            max_length: 1,
        }
    }
}

impl Config {
    /// Loads configuration from `path`, or from `zeolite.toml` in the
    /// working directory. An explicit path must exist; the implicit one
    /// falls back to defaults when absent.
    pub fn load(path: Option<&Path>) -> Result<Config, ZeoError> {
        let content = match path {
            Some(path) => std::fs::read_to_string(path)?,
            None => match std::fs::read_to_string(DEFAULT_CONFIG_PATH) {
                Ok(content) => content,
                Err(_) => return Ok(Config::default()),
            },
        };

        let config: Config = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ZeoError> {
        if self.grid.blocks == 0 || self.grid.rooms == 0 {
            return Err(ZeoError::InvalidConfig(
                "grid.blocks and grid.rooms must be at least 1".to_string(),
            ));
        }
        if self.algorithm.max_tries == 0 {
            return Err(ZeoError::InvalidConfig(
                "algorithm.max_tries must be at least 1".to_string(),
            ));
        }
        for (section, class) in [("groups", &self.groups), ("bofs", &self.bofs)] {
            if class.max_length == 0 {
                return Err(ZeoError::InvalidConfig(format!(
                    "{section}.max_length must be at least 1"
                )));
            }
            if class.max_length > self.grid.blocks {
                return Err(ZeoError::InvalidConfig(format!(
                    "{section}.max_length ({}) cannot exceed grid.blocks ({})",
                    class.max_length, self.grid.blocks
                )));
            }
        }
        Ok(())
    }

    /// Engine parameters with CLI overrides applied.
    pub fn plan_config(
        &self,
        rooms_override: Option<usize>,
        max_tries_override: Option<usize>,
    ) -> PlanConfig {
        PlanConfig {
            blocks: self.grid.blocks,
            rooms: rooms_override.unwrap_or(self.grid.rooms),
            max_tries: max_tries_override.unwrap_or(self.algorithm.max_tries),
            strategy: self.algorithm.sort_strategy,
            seed: self.algorithm.seed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_describe_a_5x8_conference() {
        let config = Config::default();
        assert_eq!(config.grid.blocks, 5);
        assert_eq!(config.grid.rooms, 8);
        assert_eq!(config.algorithm.max_tries, 5000);
        assert_eq!(config.groups.max_length, 3);
        assert_eq!(config.bofs.name_column, 32);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn partial_toml_fills_in_defaults() {
        let config: Config = toml::from_str(
            r#"
            [grid]
            rooms = 4

            [algorithm]
            seed = 42
            "#,
        )
        .unwrap();
        assert_eq!(config.grid.blocks, 5);
        assert_eq!(config.grid.rooms, 4);
        assert_eq!(config.algorithm.seed, Some(42));
        assert_eq!(config.algorithm.max_tries, 5000);
    }

    #[test]
    fn sort_strategy_parses_from_toml() {
        let config: Config = toml::from_str(
            r#"
            [algorithm]
            sort_strategy = "smallest_first"
            "#,
        )
        .unwrap();
        assert_eq!(
            config.algorithm.sort_strategy,
            SortStrategy::SmallestFirst
        );
    }

    #[test]
    fn max_length_beyond_blocks_is_rejected() {
        let config: Config = toml::from_str(
            r#"
            [grid]
            blocks = 5
            rooms = 8

            [groups]
            name_column = 0
            length_column = 1
            max_length = 6
            "#,
        )
        .unwrap();
        assert!(matches!(
            config.validate(),
            Err(ZeoError::InvalidConfig(_))
        ));
    }

    #[test]
    fn zero_max_tries_is_rejected() {
        let config: Config = toml::from_str(
            r#"
            [algorithm]
            max_tries = 0
            "#,
        )
        .unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn cli_overrides_beat_config() {
        let config = Config::default();
        let plan = config.plan_config(Some(12), Some(99));
        assert_eq!(plan.rooms, 12);
        assert_eq!(plan.max_tries, 99);
        let plan = config.plan_config(None, None);
        assert_eq!(plan.rooms, 8);
        assert_eq!(plan.max_tries, 5000);
    }
}
