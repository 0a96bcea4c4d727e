use monopoly::config::toml_config::TomlConfig;
use monopoly::core::game::Game;
use monopoly::{GameConfig, MonopolyError, NullSink, RandomDecider, Simulation};
use std::fs;
use tempfile::TempDir;

#[tokio::test]
async fn test_toml_file_drives_a_game() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("game.toml");
    fs::write(
        &config_path,
        r#"
        [game]
        starting_money = 500
        go_salary = 100

        [simulation]
        players = ["Ada", "Ben"]
        max_rounds = 30
        seed = 4
        "#,
    )
    .unwrap();

    let config = TomlConfig::from_file(&config_path).unwrap();
    assert_eq!(config.game.starting_money, 500);
    assert_eq!(config.game.go_salary, 100);
    // Untouched values keep the classic defaults.
    assert_eq!(config.game.bail, 50);

    let simulation_config = config.simulation.clone().unwrap();
    let game = Game::standard(
        &simulation_config.players,
        config.game.clone(),
        simulation_config.seed,
        RandomDecider::seeded(simulation_config.seed.unwrap()),
        NullSink,
    )
    .unwrap();
    let mut simulation = Simulation::new(game, simulation_config.max_rounds.unwrap());

    let report = simulation.run().await.unwrap();
    assert_eq!(report.standings.len(), 2);
}

#[test]
fn test_missing_config_file_is_an_io_error() {
    let result = TomlConfig::from_file("/nonexistent/game.toml");
    assert!(matches!(result, Err(MonopolyError::IoError(_))));
}

#[test]
fn test_malformed_toml_is_a_parse_error() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("broken.toml");
    fs::write(&config_path, "[game\nstarting_money = ").unwrap();

    let result = TomlConfig::from_file(&config_path);
    assert!(matches!(result, Err(MonopolyError::TomlError(_))));
}

#[test]
fn test_out_of_range_values_are_field_errors() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("bad.toml");
    fs::write(
        &config_path,
        r#"
        [game]
        doubles_limit = 12
        "#,
    )
    .unwrap();

    match TomlConfig::from_file(&config_path) {
        Err(MonopolyError::InvalidConfigValueError { field, .. }) => {
            assert_eq!(field, "doubles_limit");
        }
        other => panic!("expected a field error, got {:?}", other.map(|_| ())),
    }
}

#[test]
fn test_custom_config_feeds_the_board() {
    let config = GameConfig {
        bail: 100,
        go_salary: 400,
        ..GameConfig::default()
    };
    let board = monopoly::core::standard::standard_board(&config);
    assert_eq!(board.bail(), Some(100));
    assert_eq!(board.go_salary(), 400);
}
