#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

use crate::utils::error::Result;
use crate::utils::validation::{
    validate_non_negative_amount, validate_positive_amount, validate_range, Validate,
};
use serde::{Deserialize, Serialize};

/// The tunable numbers of a game. Defaults are the classic rules.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub starting_money: i64,
    pub go_salary: i64,
    pub bail: i64,
    pub luxury_tax: i64,
    pub income_tax_flat: i64,
    pub income_tax_rate_percent: u32,
    /// Consecutive doubles that send a player to jail.
    pub doubles_limit: u8,
    /// Failed doubles attempts in jail before bail is compulsory.
    pub jail_attempt_limit: u8,
    pub unmortgage_interest_percent: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            starting_money: 1500,
            go_salary: 200,
            bail: 50,
            luxury_tax: 75,
            income_tax_flat: 200,
            income_tax_rate_percent: 10,
            doubles_limit: 3,
            jail_attempt_limit: 3,
            unmortgage_interest_percent: 10,
        }
    }
}

impl Validate for GameConfig {
    fn validate(&self) -> Result<()> {
        validate_positive_amount("starting_money", self.starting_money)?;
        validate_non_negative_amount("go_salary", self.go_salary)?;
        validate_non_negative_amount("bail", self.bail)?;
        validate_non_negative_amount("luxury_tax", self.luxury_tax)?;
        validate_non_negative_amount("income_tax_flat", self.income_tax_flat)?;
        validate_range(
            "income_tax_rate_percent",
            self.income_tax_rate_percent,
            0,
            100,
        )?;
        validate_range("doubles_limit", self.doubles_limit, 1, 5)?;
        validate_range("jail_attempt_limit", self.jail_attempt_limit, 1, 5)?;
        validate_range(
            "unmortgage_interest_percent",
            self.unmortgage_interest_percent,
            0,
            100,
        )?;
        Ok(())
    }
}
