use clap::Parser;
use monopoly::config::toml_config::TomlConfig;
use monopoly::utils::{logger, validation::Validate};
use monopoly::{
    CliConfig, Game, GameConfig, LocalStorage, RandomDecider, Simulation, TracingSink,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    logger::init_cli_logger(cli.verbose);

    tracing::info!("Starting monopoly simulator");
    if cli.verbose {
        tracing::debug!("CLI config: {:?}", cli);
    }

    if let Err(e) = cli.validate() {
        tracing::error!("Configuration validation failed: {}", e);
        eprintln!("❌ {}", e);
        std::process::exit(1);
    }

    // CLI values fill in whatever the TOML file leaves unset.
    let (game_config, players, max_rounds, seed) = match &cli.config {
        Some(path) => {
            let file = TomlConfig::from_file(path)?;
            let simulation = file.simulation.as_ref();
            let players = simulation
                .map(|s| s.players.clone())
                .unwrap_or_else(|| cli.players.clone());
            let max_rounds = simulation
                .and_then(|s| s.max_rounds)
                .unwrap_or(cli.max_rounds);
            let seed = simulation.and_then(|s| s.seed).or(cli.seed);
            (file.game, players, max_rounds, seed)
        }
        None => (
            GameConfig::default(),
            cli.players.clone(),
            cli.max_rounds,
            cli.seed,
        ),
    };

    let decider = match seed {
        Some(seed) => RandomDecider::seeded(seed),
        None => RandomDecider::new(),
    };
    let game = Game::standard(&players, game_config, seed, decider, TracingSink)?;
    let mut simulation = Simulation::new(game, max_rounds);

    match simulation.run().await {
        Ok(report) => {
            match &report.winner {
                Some(winner) => println!(
                    "🏆 {} wins after {} rounds",
                    winner, report.rounds_played
                ),
                None => println!(
                    "⏱️ No winner within {} rounds",
                    report.rounds_played
                ),
            }
            for standing in &report.standings {
                let status = if standing.bankrupt { "bankrupt" } else { "solvent" };
                println!(
                    "  {:<12} ${:<6} worth ${:<6} {} deeds ({})",
                    standing.name, standing.money, standing.worth, standing.properties, status
                );
            }

            if cli.snapshot {
                let storage = LocalStorage::new(cli.output_path.clone());
                simulation.save_snapshot(&storage, "final_state.json").await?;
                println!("📁 Snapshot saved to {}/final_state.json", cli.output_path);
            }
        }
        Err(e) => {
            tracing::error!("Simulation failed: {}", e);
            eprintln!("❌ {}", e);
            std::process::exit(1);
        }
    }

    Ok(())
}
