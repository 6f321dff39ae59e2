//! Integration tests for the rep counter
//!
//! Tests the full path: angle stream → AngleHysteresisCounter → events/output

use reflexbot::core::{AngleHysteresisCounter, AppConfig, CounterConfig};
use reflexbot::error::ConfigError;
use reflexbot::types::PostureState;
use reflexbot::{SITUP_EXTENDED_MIN_DEG, SITUP_FLEXED_MAX_DEG};

/// Noisy synthetic sit-up: lie back, crunch, with jitter at both ends
fn noisy_situps(reps: usize) -> Vec<f64> {
    let mut samples = Vec::new();
    for _ in 0..reps {
        samples.extend_from_slice(&[150.0, 148.0, 152.0, 140.0, 125.0, 110.0]);
        // jitter around the flexed threshold
        samples.extend_from_slice(&[101.0, 103.0, 99.0, 104.0, 85.0, 90.0, 84.0]);
        // jitter around the extended threshold
        samples.extend_from_slice(&[100.0, 116.0, 118.0, 115.0, 119.0, 140.0]);
    }
    samples
}

#[test]
fn test_noisy_stream_counts_each_rep_once() {
    let mut counter = AngleHysteresisCounter::new(CounterConfig::situp()).unwrap();
    let reps = noisy_situps(5)
        .into_iter()
        .filter_map(|a| counter.update(a))
        .count();
    assert_eq!(reps, 5);
    assert_eq!(counter.count(), 5);
    assert_eq!(counter.posture(), PostureState::Extended);
}

#[test]
fn test_count_monotonic_and_steps_by_one() {
    let mut counter = AngleHysteresisCounter::with_thresholds(100.0, 120.0).unwrap();
    // deterministic pseudo-random walk over a wide range
    let mut x: u64 = 0x2545_f491_4f6c_dd1d;
    let mut previous = 0;
    for _ in 0..5000 {
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        let angle = (x % 240) as f64 - 30.0;
        let event = counter.update(angle);
        let now = counter.count();
        assert!(now >= previous);
        assert!(now - previous <= 1);
        assert_eq!(event.is_some(), now == previous + 1);
        if let Some(event) = event {
            assert_eq!(event.count, now);
            assert_eq!(counter.posture(), PostureState::Flexed);
        }
        previous = now;
    }
}

#[test]
fn test_two_cycles_end_extended() {
    let mut counter = AngleHysteresisCounter::with_thresholds(100.0, 120.0).unwrap();
    let mut increments = 0;
    for angle in [180.0, 80.0, 180.0, 80.0, 180.0] {
        if counter.update(angle).is_some() {
            increments += 1;
        }
    }
    assert_eq!(increments, 2);
    assert_eq!(counter.posture(), PostureState::Extended);
}

#[test]
fn test_set_ends_at_target() {
    let config = CounterConfig::situp().with_target(3);
    let mut counter = AngleHysteresisCounter::new(config).unwrap();

    let mut finished_after = None;
    for (i, angle) in noisy_situps(10).into_iter().enumerate() {
        if counter.observe(angle).target_reached {
            finished_after = Some(i);
            break;
        }
    }
    assert!(finished_after.is_some());
    assert_eq!(counter.count(), 3);
}

#[test]
fn test_strict_profile_ignores_shallow_reps() {
    let mut loose = AngleHysteresisCounter::new(CounterConfig::situp()).unwrap();
    let mut strict = AngleHysteresisCounter::new(CounterConfig::situp_strict()).unwrap();

    // crunch to 95°, lie back to 125°: enough for the loose band only
    for angle in [125.0, 95.0, 125.0, 95.0, 125.0] {
        loose.update(angle);
        strict.update(angle);
    }
    assert_eq!(loose.count(), 2);
    assert_eq!(strict.count(), 0);
}

#[test]
fn test_config_file_drives_counter() {
    let config = AppConfig::from_toml_str(
        r#"
        [counter]
        enter_flexed_max = 60.0
        enter_extended_min = 150.0
        "#,
    )
    .unwrap();
    let mut counter = AngleHysteresisCounter::new(config.counter).unwrap();
    assert!(counter.update(SITUP_FLEXED_MAX_DEG).is_none());
    assert!(counter.update(59.0).is_some());
    counter.update(SITUP_EXTENDED_MIN_DEG);
    assert_eq!(counter.posture(), PostureState::Flexed);
}

#[test]
fn test_inverted_thresholds_fail_fast() {
    let err = AngleHysteresisCounter::with_thresholds(130.0, 100.0).unwrap_err();
    match err {
        ConfigError::InvalidThreshold {
            enter_flexed_max,
            enter_extended_min,
        } => {
            assert_eq!(enter_flexed_max, 130.0);
            assert_eq!(enter_extended_min, 100.0);
        }
        other => panic!("unexpected error: {}", other),
    }
}

#[test]
fn test_json_output_valid() {
    let mut counter = AngleHysteresisCounter::new(CounterConfig::situp()).unwrap();
    let output = counter.observe(80.0);

    let json = serde_json::to_string(&output).unwrap();
    assert!(json.contains("\"posture\":\"FLEXED\""));
    assert!(json.contains("\"count\":1"));
    assert!(json.contains("\"rep_completed\":true"));
}

#[test]
fn test_parseable_output() {
    let mut counter = AngleHysteresisCounter::new(CounterConfig::situp()).unwrap();
    let output = counter.observe(80.0);
    assert_eq!(
        output.to_parseable_string(),
        "angle=80.0 | posture=FLEXED | count=1 | rep=1"
    );
}
