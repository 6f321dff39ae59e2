//! Integration tests for the servo tracker
//!
//! Tests the full path: detections → ServoTracker → wire frames

use std::time::{Duration, Instant};

use reflexbot::core::{AppConfig, ServoTracker, TrackerConfig};
use reflexbot::types::{ActuatorCommand, Detection};

fn parse_frame(line: &str) -> Vec<Detection> {
    line.split(';').filter_map(Detection::parse_line).collect()
}

#[test]
fn test_tracker_converges_on_offset_target() {
    let start = Instant::now();
    let mut tracker = ServoTracker::new_at(TrackerConfig::default(), start).unwrap();

    // bottle far left, level with centre
    let detections = parse_frame("39 20 230 60 250 0.55");
    let mut frames = Vec::new();
    for i in 0..5 {
        let now = start + Duration::from_millis(100 * i);
        frames.push(tracker.track(&detections, 640, 480, now));
    }

    let pans: Vec<i32> = frames.iter().map(|f| f.pan).collect();
    assert_eq!(pans, vec![94, 98, 102, 106, 110]);
    assert!(frames.iter().all(|f| f.tilt == 90 && !f.beep));
}

#[test]
fn test_non_target_classes_are_ignored() {
    let start = Instant::now();
    let mut tracker = ServoTracker::new_at(TrackerConfig::default(), start).unwrap();

    // person (0) off-centre, cup (41) centred
    let detections = parse_frame("0 0 0 40 40 0.99; 41 310 230 330 250 0.8");
    let frame = tracker.track(&detections, 640, 480, start);
    assert_eq!((frame.pan, frame.tilt), (90, 90));
    assert!(frame.beep);
}

#[test]
fn test_lost_target_rehomes_only_after_timeout() {
    let start = Instant::now();
    let mut tracker = ServoTracker::new_at(TrackerConfig::default(), start).unwrap();
    tracker.track(&parse_frame("39 600 460 620 480 0.4"), 640, 480, start);
    assert_eq!(tracker.position(), (86, 94));

    let within = tracker.track(&[], 640, 480, start + Duration::from_millis(5000));
    assert_eq!((within.pan, within.tilt), (86, 94));

    let after = tracker.track(&[], 640, 480, start + Duration::from_millis(5001));
    assert_eq!((after.pan, after.tilt), (90, 90));
}

#[test]
fn test_wire_output() {
    let start = Instant::now();
    let mut tracker = ServoTracker::new_at(TrackerConfig::default(), start).unwrap();
    let frame = tracker.track(&parse_frame("41 100 40 140 80 0.9"), 640, 480, start);
    assert_eq!(ActuatorCommand::Track(frame).to_wire(), "94,86,1\n");
}

#[test]
fn test_configured_tracker() {
    let config = AppConfig::from_toml_str(
        r#"
        [tracker]
        step = 10
        target_classes = [64]
        "#,
    )
    .unwrap();
    let start = Instant::now();
    let mut tracker = ServoTracker::new_at(config.tracker, start).unwrap();

    let frame = tracker.track(&parse_frame("64 600 230 620 250 0.5"), 640, 480, start);
    assert_eq!(frame.pan, 80);

    let frame = tracker.track(&parse_frame("39 600 230 620 250 0.5"), 640, 480, start);
    assert_eq!(frame.pan, 80);
}

#[test]
fn test_frame_stream_is_gated() {
    let start = Instant::now();
    let mut tracker = ServoTracker::new_at(TrackerConfig::default(), start).unwrap();
    let detections = parse_frame("39 20 230 60 250 0.55");

    let frames: Vec<Option<i32>> = (0..6)
        .map(|i| {
            let now = start + Duration::from_millis(33 * i);
            tracker
                .process_frame(&detections, 640, 480, false, now)
                .map(|f| f.pan)
        })
        .collect();
    assert_eq!(frames, vec![None, None, Some(94), None, None, Some(98)]);

    // a running command holds the servos even on a gated frame
    tracker.process_frame(&detections, 640, 480, false, start);
    tracker.process_frame(&detections, 640, 480, false, start);
    assert!(tracker.process_frame(&detections, 640, 480, true, start).is_none());
    assert_eq!(tracker.position(), (98, 90));
}
