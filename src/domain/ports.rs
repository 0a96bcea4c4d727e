use crate::domain::model::{Choice, DiceRoll, GameEvent, PlayerId, Query};
use crate::utils::error::Result;
use async_trait::async_trait;

/// A pair of dice. Implementations decide where the randomness comes
/// from; the engine only asks for throws.
pub trait Dice: Send {
    /// Throw the dice and remember the result.
    fn roll(&mut self) -> DiceRoll;

    /// The result of the most recent throw, if any.
    fn last_roll(&self) -> Option<DiceRoll>;

    /// Reseed the random source. `None` reseeds from entropy.
    fn reseed(&mut self, seed: Option<u64>);
}

/// Answers queries directed at a player: which of the offered options
/// does this player take? Returns the index into `options`.
#[async_trait]
pub trait Decider: Send + Sync {
    async fn choose(
        &mut self,
        player: PlayerId,
        query: &Query,
        options: &[Choice],
    ) -> Result<usize>;
}

/// Receives every game event in the order it happened.
pub trait EventSink: Send {
    fn emit(&mut self, event: &GameEvent);
}

/// Byte-level persistence for game snapshots.
pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}
