use crate::domain::ports::Storage;
use crate::utils::error::{MonopolyError, Result};
use crate::utils::validation::{validate_non_empty_string, validate_range, Validate};
use clap::Parser;
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, Parser)]
#[command(name = "monopoly")]
#[command(about = "Simulate Monopoly games on the classic board")]
pub struct CliConfig {
    /// Player names, in seating order.
    #[arg(long, value_delimiter = ',', default_value = "Ada,Ben,Cleo")]
    pub players: Vec<String>,

    /// Seed for dice and deck shuffles; omit for a random game.
    #[arg(long)]
    pub seed: Option<u64>,

    /// Stop after this many rounds if nobody has won.
    #[arg(long, default_value = "200")]
    pub max_rounds: usize,

    /// Optional TOML file overriding game numbers and players.
    #[arg(long)]
    pub config: Option<String>,

    #[arg(long, default_value = "./output")]
    pub output_path: String,

    /// Write a JSON snapshot of the final game state.
    #[arg(long)]
    pub snapshot: bool,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validate_range("players", self.players.len(), 2, 8)?;
        for name in &self.players {
            validate_non_empty_string("players", name)?;
        }
        if self.max_rounds == 0 {
            return Err(MonopolyError::InvalidConfigValueError {
                field: "max_rounds".to_string(),
                value: "0".to_string(),
                reason: "At least one round is required".to_string(),
            });
        }
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct LocalStorage {
    base_path: String,
}

impl LocalStorage {
    pub fn new(base_path: String) -> Self {
        Self { base_path }
    }
}

impl Storage for LocalStorage {
    async fn read_file(&self, path: &str) -> Result<Vec<u8>> {
        let full_path = Path::new(&self.base_path).join(path);
        let data = fs::read(full_path)?;
        Ok(data)
    }

    async fn write_file(&self, path: &str, data: &[u8]) -> Result<()> {
        let full_path = Path::new(&self.base_path).join(path);

        if let Some(parent) = full_path.parent() {
            fs::create_dir_all(parent)?;
        }

        fs::write(full_path, data)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_cli_config_is_valid() {
        let config = CliConfig::parse_from(["monopoly"]);
        assert!(config.validate().is_ok());
        assert_eq!(config.players, vec!["Ada", "Ben", "Cleo"]);
        assert_eq!(config.max_rounds, 200);
    }

    #[test]
    fn test_player_list_parses_from_commas() {
        let config = CliConfig::parse_from(["monopoly", "--players", "A,B,C,D", "--seed", "9"]);
        assert_eq!(config.players.len(), 4);
        assert_eq!(config.seed, Some(9));
    }

    #[test]
    fn test_too_many_players_is_rejected() {
        let config = CliConfig::parse_from(["monopoly", "--players", "a,b,c,d,e,f,g,h,i"]);
        assert!(config.validate().is_err());
    }
}
