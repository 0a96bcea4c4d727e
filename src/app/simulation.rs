use crate::core::game::{Game, GameSnapshot};
use crate::domain::ports::{Decider, Dice, EventSink, Storage};
use crate::utils::error::Result;
use serde::Serialize;

/// Drives a game to completion or a round cap.
pub struct Simulation<D: Dice, C: Decider, E: EventSink> {
    game: Game<D, C, E>,
    max_rounds: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct Standing {
    pub name: String,
    pub money: i64,
    pub worth: i64,
    pub properties: usize,
    pub bankrupt: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct SimulationReport {
    pub turns_played: usize,
    pub rounds_played: usize,
    pub winner: Option<String>,
    pub standings: Vec<Standing>,
}

impl<D: Dice, C: Decider, E: EventSink> Simulation<D, C, E> {
    pub fn new(game: Game<D, C, E>, max_rounds: usize) -> Self {
        Self { game, max_rounds }
    }

    pub fn game(&self) -> &Game<D, C, E> {
        &self.game
    }

    /// Play turns until somebody wins or the round cap is reached.
    pub async fn run(&mut self) -> Result<SimulationReport> {
        let player_count = self.game.players().len();
        let max_turns = self.max_rounds * player_count;
        tracing::info!(
            "Starting simulation: {} players, up to {} rounds",
            player_count,
            self.max_rounds
        );

        let mut turns = 0;
        while !self.game.is_over() && turns < max_turns {
            self.game.take_turn().await?;
            turns += 1;
        }

        let winner = self
            .game
            .winner()
            .and_then(|id| self.game.players().get(id.0))
            .map(|player| player.name.clone());
        match &winner {
            Some(name) => tracing::info!("Simulation finished after {} turns: {} wins", turns, name),
            None => tracing::info!("Simulation stopped at the round cap ({} turns)", turns),
        }

        let standings = self
            .game
            .players()
            .iter()
            .map(|player| Standing {
                name: player.name.clone(),
                money: player.money,
                worth: self.game.board().player_worth(player),
                properties: player.properties.len(),
                bankrupt: player.bankrupt,
            })
            .collect();

        Ok(SimulationReport {
            turns_played: turns,
            rounds_played: turns / player_count,
            winner,
            standings,
        })
    }

    /// Persist the game state as pretty JSON through the storage port.
    pub async fn save_snapshot<S: Storage>(&self, storage: &S, path: &str) -> Result<()> {
        let snapshot = self.game.snapshot();
        let json = serde_json::to_vec_pretty(&snapshot)?;
        tracing::debug!("Writing snapshot ({} bytes) to {}", json.len(), path);
        storage.write_file(path, &json).await
    }
}

/// Read a snapshot back. Pair with [`Game::restore`] to resume.
pub async fn load_snapshot<S: Storage>(storage: &S, path: &str) -> Result<GameSnapshot> {
    let bytes = storage.read_file(path).await?;
    Ok(serde_json::from_slice(&bytes)?)
}
