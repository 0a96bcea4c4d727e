use crate::config::GameConfig;
use crate::utils::error::{MonopolyError, Result};
use crate::utils::validation::{validate_non_empty_string, validate_range, Validate};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// A game definition loaded from a TOML file:
///
/// ```toml
/// [game]
/// starting_money = 1500
/// bail = 50
///
/// [simulation]
/// players = ["Ada", "Ben"]
/// max_rounds = 150
/// seed = 7
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TomlConfig {
    #[serde(default)]
    pub game: GameConfig,
    pub simulation: Option<SimulationConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationConfig {
    pub players: Vec<String>,
    pub max_rounds: Option<usize>,
    pub seed: Option<u64>,
}

impl TomlConfig {
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        tracing::debug!("Loading configuration from {}", path.display());
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: TomlConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        self.game.validate()?;
        if let Some(simulation) = &self.simulation {
            simulation.validate()?;
        }
        Ok(())
    }
}

impl Validate for SimulationConfig {
    fn validate(&self) -> Result<()> {
        validate_range("simulation.players", self.players.len(), 2, 8)?;
        for name in &self.players {
            validate_non_empty_string("simulation.players", name)?;
        }
        if let Some(max_rounds) = self.max_rounds {
            if max_rounds == 0 {
                return Err(MonopolyError::InvalidConfigValueError {
                    field: "simulation.max_rounds".to_string(),
                    value: "0".to_string(),
                    reason: "At least one round is required".to_string(),
                });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_config_parses() {
        let config = TomlConfig::from_toml_str(
            r#"
            [game]
            starting_money = 2000
            bail = 100

            [simulation]
            players = ["Ada", "Ben", "Cleo"]
            max_rounds = 50
            seed = 3
            "#,
        )
        .unwrap();

        assert_eq!(config.game.starting_money, 2000);
        assert_eq!(config.game.bail, 100);
        // Unset fields keep the classic defaults.
        assert_eq!(config.game.go_salary, 200);
        let simulation = config.simulation.unwrap();
        assert_eq!(simulation.players.len(), 3);
        assert_eq!(simulation.seed, Some(3));
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = TomlConfig::from_toml_str("").unwrap();
        assert_eq!(config.game, GameConfig::default());
        assert!(config.simulation.is_none());
    }

    #[test]
    fn test_single_player_simulation_is_rejected() {
        let result = TomlConfig::from_toml_str(
            r#"
            [simulation]
            players = ["Ada"]
            "#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_invalid_game_numbers_are_rejected() {
        let result = TomlConfig::from_toml_str(
            r#"
            [game]
            starting_money = -10
            "#,
        );
        assert!(result.is_err());
    }
}
