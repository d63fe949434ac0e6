#![cfg(feature = "serde")]

//! Round-trip tests for the `serde` feature.

use tunable::prelude::*;

#[test]
fn round_trip_param_value() {
    for value in [
        ParamValue::Float(0.5),
        ParamValue::Int(32),
        ParamValue::Str("relu".into()),
        ParamValue::Bool(true),
    ] {
        let json = serde_json::to_string(&value).unwrap();
        let parsed: ParamValue = serde_json::from_str(&json).unwrap();
        assert_eq!(value, parsed);
    }
}

#[test]
fn round_trip_search_space() {
    let space = SearchSpace::builder()
        .uniform("model", "dropout", 0.0, 0.5)
        .log_uniform("training", "lr", 1e-5, 1e-1)
        .categorical("model", "activation", ["relu", "gelu"])
        .build()
        .unwrap();

    let json = serde_json::to_string(&space).unwrap();
    let parsed: SearchSpace = serde_json::from_str(&json).unwrap();
    assert_eq!(space, parsed);
}

#[test]
fn round_trip_trial_config() {
    let mut config = TrialConfig::new();
    config.set("model", "n_filters", 32);
    config.set("model", "activation", "relu");
    config.set("training", "lr", 1e-3);

    let json = serde_json::to_string(&config).unwrap();
    let parsed: TrialConfig = serde_json::from_str(&json).unwrap();
    assert_eq!(config, parsed);
}

#[test]
fn round_trip_tuning_result() {
    let space = SearchSpace::builder()
        .uniform("g", "x", 0.0, 1.0)
        .build()
        .unwrap();

    let result = Tuner::new()
        .run(
            &space,
            &RandomSuggester::with_seed(42),
            |config: &TrialConfig, scope: &TrialScope| {
                if scope.trial() == 1 {
                    return Err("injected failure".to_string());
                }
                config.get_f64("g", "x").map_err(|e| e.to_string())
            },
            4,
        )
        .unwrap();

    let json = serde_json::to_string(&result).unwrap();
    let parsed: TuningResult = serde_json::from_str(&json).unwrap();
    assert_eq!(result, parsed);
    assert_eq!(parsed.n_failed(), 1);
    assert_eq!(parsed.best().index, result.best().index);
}
