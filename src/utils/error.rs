use thiserror::Error;

use crate::domain::model::{PlayerId, PropertyId};

#[derive(Error, Debug)]
pub enum MonopolyError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value for {field} ({value}): {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Tried to query a player but no decider is attached")]
    NoDecider,

    #[error("Decider chose option {index} but only {count} options were offered")]
    InvalidChoice { index: usize, count: usize },

    #[error("Cannot end the turn before it is resolved")]
    TurnIncomplete,

    #[error("The current turn is already resolved")]
    TurnComplete,

    #[error("The game is over")]
    GameOver,

    #[error("Unknown player index: {0}")]
    UnknownPlayer(usize),

    #[error("Unknown property index: {0}")]
    UnknownProperty(usize),

    #[error("Player {player} does not own property {property}")]
    NotOwner {
        player: PlayerId,
        property: PropertyId,
    },

    #[error("Property is mortgaged")]
    Mortgaged,

    #[error("Property is not mortgaged")]
    NotMortgaged,

    #[error("Houses must be sold off the color group before mortgaging")]
    HousesInGroup,

    #[error("The whole color group must be owned and unmortgaged to build")]
    GroupIncomplete,

    #[error("Houses must be spread evenly across the color group")]
    UnevenBuild,

    #[error("House limit reached")]
    HouseLimit,

    #[error("No houses to sell")]
    NoHouses,

    #[error("Only color properties can carry houses")]
    NotBuildable,

    #[error("Insufficient funds: need {needed}, have {available}")]
    InsufficientFunds { needed: i64, available: i64 },

    #[error("Player {0} is bankrupt and out of the game")]
    PlayerBankrupt(PlayerId),
}

pub type Result<T> = std::result::Result<T, MonopolyError>;
