#![allow(missing_docs)]
#![allow(clippy::float_cmp)]

use flappy_evo::simulation::error::{ConfigError, SimError};
use flappy_evo::simulation::params::Params;
use std::fs;

#[test]
fn test_partial_json_falls_back_to_defaults() {
    let params = Params::from_json_str(r#"{ "population_size": 50, "gravity": 0.5 }"#).unwrap();

    assert_eq!(params.population_size, 50);
    assert_eq!(params.gravity, 0.5);
    assert_eq!(params.elite_size, Params::default().elite_size);
    assert_eq!(params.height, 600.0);
}

#[test]
fn test_invalid_values_are_rejected() {
    let too_many_elite = Params {
        population_size: 10,
        elite_size: 11,
        ..Params::default()
    };
    assert_eq!(
        too_many_elite.validate(),
        Err(ConfigError::InvalidEliteSize {
            elite_size: 11,
            population_size: 10
        })
    );

    let one_obstacle = Params {
        obstacle_count: 1,
        ..Params::default()
    };
    assert_eq!(one_obstacle.validate(), Err(ConfigError::TooFewObstacles(1)));

    let bad_rate = Params {
        mutation_rate: 1.5,
        ..Params::default()
    };
    assert!(matches!(
        bad_rate.validate(),
        Err(ConfigError::InvalidProbability {
            name: "mutation_rate",
            ..
        })
    ));

    let no_gap = Params {
        obstacle_gap: 0.0,
        ..Params::default()
    };
    assert!(matches!(
        no_gap.validate(),
        Err(ConfigError::NonPositive {
            name: "obstacle_gap",
            ..
        })
    ));

    let nan_gravity = Params {
        gravity: f32::NAN,
        ..Params::default()
    };
    assert!(matches!(
        nan_gravity.validate(),
        Err(ConfigError::NonFinite {
            name: "gravity",
            ..
        })
    ));
}

#[test]
fn test_invalid_json_values_fail_to_load() {
    let result = Params::from_json_str(r#"{ "population_size": 0 }"#);
    assert!(matches!(result, Err(SimError::Params(ConfigError::EmptyPopulation))));

    let result = Params::from_json_str("not json");
    assert!(matches!(result, Err(SimError::Json(_))));
}

#[test]
fn test_load_from_file() {
    let path = std::env::temp_dir().join("flappy_evo_params_test.json");
    let params = Params {
        population_size: 40,
        elite_size: 8,
        ..Params::default()
    };
    fs::write(&path, serde_json::to_string_pretty(&params).unwrap()).unwrap();

    let loaded = Params::from_json_file(&path).expect("Failed to load params");
    fs::remove_file(&path).ok();

    assert_eq!(loaded, params);
}

#[test]
fn test_missing_file_is_an_io_error() {
    let result = Params::from_json_file("/nonexistent/flappy_evo/params.json");
    assert!(matches!(result, Err(SimError::Io(_))));
}
