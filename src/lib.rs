pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use crate::config::cli::{CliConfig, LocalStorage};

pub use crate::app::deciders::{FirstChoiceDecider, NullDecider, RandomDecider, ScriptedDecider};
pub use crate::app::simulation::{Simulation, SimulationReport};
pub use crate::app::sinks::{NullSink, RecordingSink, TracingSink};
pub use crate::config::GameConfig;
pub use crate::core::dice::RandomDice;
pub use crate::core::game::{Game, GameSnapshot, TurnPhase};
pub use crate::utils::error::{MonopolyError, Result};
