//! Integration tests for the tuning loop.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use tunable::prelude::*;

fn single_param_space() -> SearchSpace {
    SearchSpace::builder()
        .uniform("g", "x", 0.0, 1.0)
        .build()
        .expect("valid space")
}

// =============================================================================
// Test: a full budget of successful trials yields a complete, sorted ranking
// =============================================================================

#[test]
fn test_all_successful_trials_are_ranked_ascending() {
    let space = single_param_space();
    let suggester = RandomSuggester::with_seed(42);

    let result = Tuner::new()
        .run(
            &space,
            &suggester,
            |config: &TrialConfig, _scope: &TrialScope| {
                let x = config.get_f64("g", "x")?;
                Ok::<_, tunable::Error>((x - 0.3).powi(2))
            },
            20,
        )
        .expect("run should succeed");

    assert_eq!(result.len(), 20);
    assert_eq!(result.history().len(), 20);
    assert_eq!(result.n_failed(), 0);

    let losses: Vec<f64> = result.iter().filter_map(TrialRecord::loss).collect();
    for pair in losses.windows(2) {
        assert!(pair[0] <= pair[1], "ranking must ascend: {pair:?}");
    }
    let best = result.best().loss().expect("best is completed");
    assert!(losses.iter().all(|&l| l >= best));
}

// =============================================================================
// Test: per-trial failures are recorded, not raised
// =============================================================================

#[test]
fn test_failures_are_isolated_and_visible_in_history() {
    let space = single_param_space();
    let suggester = RandomSuggester::with_seed(7);

    let result = Tuner::new()
        .run(
            &space,
            &suggester,
            |_config: &TrialConfig, scope: &TrialScope| {
                if scope.trial() == 1 || scope.trial() == 3 {
                    return Err("synthetic failure".to_string());
                }
                let loss = scope.trial() as f64 * 0.1;
                Ok(loss)
            },
            5,
        )
        .expect("three trials completed");

    assert_eq!(result.len(), 3);
    assert_eq!(result.n_failed(), 2);
    assert_eq!(result.history().len(), 5);

    for (failed_index, kind) in [(1u64, "synthetic failure"), (3u64, "synthetic failure")] {
        let record = &result.history()[usize::try_from(failed_index).unwrap()];
        assert_eq!(record.index, failed_index);
        assert!(!record.is_completed());
        match record.outcome.failure() {
            Some(FailureKind::Evaluation(message)) => assert_eq!(message, kind),
            other => panic!("expected evaluation failure, got {other:?}"),
        }
    }

    // Trials 0, 2, 4 succeeded with losses 0.0, 0.2, 0.4
    let ranked: Vec<u64> = result.iter().map(|r| r.index).collect();
    assert_eq!(ranked, vec![0, 2, 4]);
}

#[test]
fn test_all_failures_is_a_terminal_error() {
    let space = single_param_space();
    let suggester = RandomSuggester::with_seed(7);

    let err = Tuner::new()
        .run(
            &space,
            &suggester,
            |_config: &TrialConfig, _scope: &TrialScope| Err::<f64, _>("always fails".to_string()),
            5,
        )
        .expect_err("no trial completed");

    assert!(matches!(err, Error::NoSuccessfulTrials));
}

#[test]
fn test_non_finite_loss_marks_trial_failed() {
    let space = single_param_space();
    let suggester = RandomSuggester::with_seed(7);

    let result = Tuner::new()
        .run(
            &space,
            &suggester,
            |_config: &TrialConfig, scope: &TrialScope| {
                if scope.trial() == 0 {
                    Ok::<_, tunable::Error>(f64::NAN)
                } else {
                    Ok(0.5)
                }
            },
            2,
        )
        .expect("trial 1 completed");

    assert_eq!(result.len(), 1);
    assert!(matches!(
        result.history()[0].outcome.failure(),
        Some(FailureKind::NonFiniteLoss(_))
    ));
}

#[test]
fn test_panicking_objective_is_isolated() {
    let space = single_param_space();
    let suggester = RandomSuggester::with_seed(7);

    let result = Tuner::new()
        .run(
            &space,
            &suggester,
            |_config: &TrialConfig, scope: &TrialScope| {
                assert!(scope.trial() != 1, "trial 1 blows up");
                Ok::<_, tunable::Error>(0.5)
            },
            3,
        )
        .expect("trials 0 and 2 completed");

    assert_eq!(result.len(), 2);
    assert_eq!(result.n_failed(), 1);
    assert!(matches!(
        result.history()[1].outcome.failure(),
        Some(FailureKind::Panicked)
    ));
}

// =============================================================================
// Test: wall-clock budget
// =============================================================================

#[test]
fn test_timeout_marks_trial_failed_and_loop_proceeds() {
    let space = single_param_space();
    let suggester = RandomSuggester::with_seed(7);

    let tuner = Tuner::builder()
        .trial_timeout(Duration::from_millis(50))
        .build();

    let result = tuner
        .run(
            &space,
            &suggester,
            |_config: &TrialConfig, scope: &TrialScope| {
                if scope.trial() == 1 {
                    std::thread::sleep(Duration::from_secs(2));
                }
                Ok::<_, tunable::Error>(0.5)
            },
            3,
        )
        .expect("trials 0 and 2 completed");

    assert_eq!(result.len(), 2);
    assert!(matches!(
        result.history()[1].outcome.failure(),
        Some(FailureKind::Timeout { .. })
    ));
    let completed: Vec<u64> = result.iter().map(|r| r.index).collect();
    assert!(completed.contains(&0) && completed.contains(&2));
}

// =============================================================================
// Test: cancellation between trials
// =============================================================================

#[test]
fn test_cancellation_stops_before_next_suggestion() {
    let space = single_param_space();
    let inner = RandomSuggester::with_seed(42);
    let suggest_calls = Arc::new(AtomicUsize::new(0));

    let counting = {
        let calls = Arc::clone(&suggest_calls);
        move |space: &SearchSpace, history: &[TrialRecord]| {
            calls.fetch_add(1, Ordering::SeqCst);
            inner.suggest(space, history)
        }
    };

    let tuner = Tuner::new();
    let token = tuner.cancel_token();

    let result = tuner
        .run(
            &space,
            &counting,
            move |_config: &TrialConfig, scope: &TrialScope| {
                if scope.trial() == 2 {
                    token.cancel();
                }
                let loss = scope.trial() as f64;
                Ok::<_, tunable::Error>(loss)
            },
            10,
        )
        .expect("trials 0..=2 completed");

    assert_eq!(result.len(), 3);
    assert_eq!(result.history().len(), 3);
    assert_eq!(suggest_calls.load(Ordering::SeqCst), 3);

    let ranked: Vec<u64> = result.iter().map(|r| r.index).collect();
    assert_eq!(ranked, vec![0, 1, 2]);
}

#[test]
fn test_cancellation_before_any_success_is_terminal() {
    let space = single_param_space();
    let suggester = RandomSuggester::with_seed(7);
    let tuner = Tuner::new();
    tuner.cancel_token().cancel();

    let err = tuner
        .run(
            &space,
            &suggester,
            |_config: &TrialConfig, _scope: &TrialScope| Ok::<_, tunable::Error>(0.5),
            10,
        )
        .expect_err("nothing ran");
    assert!(matches!(err, Error::NoSuccessfulTrials));
}

// =============================================================================
// Test: observer hook
// =============================================================================

struct TargetLoss {
    target: f64,
}

impl Objective for TargetLoss {
    type Error = tunable::Error;

    fn evaluate(&self, config: &TrialConfig, _scope: &TrialScope) -> Result<f64> {
        let x = config.get_f64("g", "x")?;
        Ok((x - 0.5).abs())
    }

    fn after_trial(&self, record: &TrialRecord) -> std::ops::ControlFlow<()> {
        match record.loss() {
            Some(loss) if loss < self.target => std::ops::ControlFlow::Break(()),
            _ => std::ops::ControlFlow::Continue(()),
        }
    }
}

#[test]
fn test_observer_break_stops_early_with_partial_result() {
    let space = single_param_space();
    let suggester = RandomSuggester::with_seed(42);

    let result = Tuner::new()
        .run(&space, &suggester, TargetLoss { target: 0.4 }, 1000)
        .expect("the target is reachable");

    assert!(result.history().len() < 1000);
    let best = result.best().loss().expect("best is completed");
    assert!(best < 0.4);
}

// =============================================================================
// Test: input validation and determinism
// =============================================================================

#[test]
fn test_empty_space_is_rejected() {
    let space = SearchSpace::builder().build().expect("empty space builds");
    let suggester = RandomSuggester::with_seed(7);

    let err = Tuner::new()
        .run(
            &space,
            &suggester,
            |_config: &TrialConfig, _scope: &TrialScope| Ok::<_, tunable::Error>(0.5),
            5,
        )
        .expect_err("empty space");
    assert!(matches!(err, Error::EmptySearchSpace));
}

#[test]
fn test_zero_trial_budget_is_terminal() {
    let space = single_param_space();
    let suggester = RandomSuggester::with_seed(7);

    let err = Tuner::new()
        .run(
            &space,
            &suggester,
            |_config: &TrialConfig, _scope: &TrialScope| Ok::<_, tunable::Error>(0.5),
            0,
        )
        .expect_err("budget exhausted immediately");
    assert!(matches!(err, Error::NoSuccessfulTrials));
}

#[test]
fn test_invalid_suggestion_fails_the_run() {
    let space = single_param_space();

    let out_of_domain = |_space: &SearchSpace, _history: &[TrialRecord]| {
        let mut config = TrialConfig::new();
        config.set("g", "x", 5.0);
        Ok::<_, tunable::Error>(config)
    };

    let err = Tuner::new()
        .run(
            &space,
            &out_of_domain,
            |_config: &TrialConfig, _scope: &TrialScope| Ok::<_, tunable::Error>(0.5),
            5,
        )
        .expect_err("suggestion violates the space");
    assert!(matches!(err, Error::ValueOutOfDomain { .. }));
}

#[test]
fn test_seeded_runs_are_identical() {
    let space = SearchSpace::builder()
        .uniform("model", "dropout", 0.0, 0.5)
        .log_uniform("training", "lr", 1e-5, 1e-1)
        .categorical("model", "n_filters", [16, 32, 64])
        .build()
        .expect("valid space");

    let evaluate = |config: &TrialConfig, _scope: &TrialScope| {
        let dropout = config.get_f64("model", "dropout")?;
        let lr = config.get_f64("training", "lr")?;
        Ok::<_, tunable::Error>((lr.ln() + 7.0).powi(2) + dropout)
    };

    let first = Tuner::new()
        .run(&space, &RandomSuggester::with_seed(42), evaluate, 25)
        .expect("run succeeds");
    let second = Tuner::new()
        .run(&space, &RandomSuggester::with_seed(42), evaluate, 25)
        .expect("run succeeds");

    assert_eq!(first, second);
}

#[test]
fn test_history_grows_by_one_record_per_trial() {
    let space = single_param_space();
    let lengths = Arc::new(parking_lot::Mutex::new(Vec::new()));

    let observing = {
        let lengths = Arc::clone(&lengths);
        let inner = RandomSuggester::with_seed(42);
        move |space: &SearchSpace, history: &[TrialRecord]| {
            lengths.lock().push(history.len());
            inner.suggest(space, history)
        }
    };

    Tuner::new()
        .run(
            &space,
            &observing,
            |_config: &TrialConfig, _scope: &TrialScope| Ok::<_, tunable::Error>(0.5),
            4,
        )
        .expect("run succeeds");

    assert_eq!(*lengths.lock(), vec![0, 1, 2, 3]);
}
