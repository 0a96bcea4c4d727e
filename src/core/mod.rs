pub mod board;
pub mod cards;
pub mod dice;
pub mod game;
pub mod property;
pub mod standard;

pub use crate::domain::model::{DiceRoll, GameEvent, Player, PlayerId, PropertyId};
pub use crate::domain::ports::{Decider, Dice, EventSink, Storage};
pub use crate::utils::error::Result;
