use sitcount_rs::integration::PoseBuilder;
use sitcount_rs::pose::Reason;
use sitcount_rs::tracker::TrackState;
use sitcount_rs::{EngineConfig, Joint, PersonId, PoseDetection, SittingEngine, Verdict, Zone};

fn config(confirmation_frames: u32) -> EngineConfig {
    EngineConfig::default()
        .with_exclusion_x_max(0.35)
        .with_bench(Zone::new(0.35, 0.65, 0.40, 0.80))
        .with_knee_angle(75.0, 125.0)
        .with_proximity_threshold(0.1)
        .with_confirmation_frames(confirmation_frames)
}

/// Pose with horizontal thighs and the left shin at `knee_deg` from the thigh.
/// The right leg is standing straight.
fn pose(left_hip: (f32, f32), right_hip: (f32, f32), knee_deg: f32) -> PoseDetection {
    let rad = knee_deg.to_radians();
    PoseBuilder::new()
        .joint(Joint::LeftHip, left_hip.0, left_hip.1)
        .joint(Joint::RightHip, right_hip.0, right_hip.1)
        .joint(Joint::LeftKnee, left_hip.0 + 0.1, left_hip.1)
        .joint(
            Joint::LeftAnkle,
            left_hip.0 + 0.1 - 0.1 * rad.cos(),
            left_hip.1 + 0.1 * rad.sin(),
        )
        .joint(Joint::RightKnee, right_hip.0, right_hip.1 + 0.15)
        .joint(Joint::RightAnkle, right_hip.0, right_hip.1 + 0.30)
        .build()
}

fn seated() -> PoseDetection {
    pose((0.45, 0.60), (0.50, 0.60), 100.0)
}

fn standing() -> PoseDetection {
    pose((0.45, 0.60), (0.50, 0.60), 180.0)
}

#[test]
fn test_masked_detection_is_never_tracked() {
    let mut engine = SittingEngine::new(config(1));
    let det = pose((0.20, 0.60), (0.22, 0.60), 100.0);

    for _ in 0..5 {
        let report = engine.process_frame(std::slice::from_ref(&det));
        assert_eq!(report.outcomes[0].verdict, Verdict::Masked);
        assert_eq!(report.outcomes[0].reason, Reason::Masked);
        assert_eq!(report.outcomes[0].identity, None);
        assert_eq!(report.headline(), Verdict::Masked);
    }
    assert_eq!(engine.tracks().count(), 0);
    assert_eq!(engine.unique_count(), 0);
}

#[test]
fn test_seated_in_zone_counts_on_first_frame() {
    let mut engine = SittingEngine::new(config(1));
    let report = engine.process_frame(&[seated()]);

    let outcome = &report.outcomes[0];
    assert_eq!(outcome.verdict, Verdict::SittingNew);
    assert_eq!(outcome.reason, Reason::InZoneSitting);
    assert_eq!(outcome.identity, Some(PersonId(0)));
    assert_eq!(report.unique_count, 1);
    assert_eq!(report.newly_confirmed().collect::<Vec<_>>(), vec![PersonId(0)]);
}

#[test]
fn test_right_hip_off_bench_is_not_sitting() {
    let mut engine = SittingEngine::new(config(1));
    let det = pose((0.45, 0.60), (0.50, 0.85), 100.0);

    let report = engine.process_frame(&[det]);
    assert_eq!(report.outcomes[0].verdict, Verdict::NotSitting);
    assert_eq!(report.outcomes[0].reason, Reason::OutOfZone);
    assert_eq!(engine.unique_count(), 0);
    // still tracked, just not counted
    assert_eq!(engine.tracks().count(), 1);
}

#[test]
fn test_streak_gap_delays_confirmation() {
    let mut engine = SittingEngine::new(config(3));
    let sequence = [true, true, false, true, true, true];

    let mut new_events = Vec::new();
    for (i, sitting) in sequence.iter().enumerate() {
        let det = if *sitting { seated() } else { standing() };
        let report = engine.process_frame(&[det]);
        if report.outcomes[0].verdict == Verdict::SittingNew {
            new_events.push(i + 1);
        }
    }

    assert_eq!(new_events, vec![6]);
    assert_eq!(engine.unique_count(), 1);
    let track = engine.track(PersonId(0)).unwrap();
    assert_eq!(track.state, TrackState::Confirmed);
    assert_eq!(track.streak, 3);
}

#[test]
fn test_count_never_double_counts() {
    let mut engine = SittingEngine::new(config(2));
    let mut last_count = 0;

    for frame in 0..40 {
        let det = if frame % 7 == 3 { standing() } else { seated() };
        let report = engine.process_frame(&[det]);
        assert!(report.unique_count >= last_count);
        last_count = report.unique_count;
    }

    assert_eq!(last_count, 1);
    assert_eq!(engine.tracks().count(), 1);
}

#[test]
fn test_confirmation_survives_leaving_and_returning() {
    let mut engine = SittingEngine::new(config(1));
    engine.process_frame(&[seated()]);
    for _ in 0..10 {
        engine.process_frame(&[]);
    }
    let report = engine.process_frame(&[seated()]);
    assert_eq!(report.outcomes[0].verdict, Verdict::SittingContinued);
    assert_eq!(report.unique_count, 1);
}

#[test]
fn test_two_people_counted_separately() {
    let mut engine = SittingEngine::new(config(2));
    let left = pose((0.38, 0.60), (0.40, 0.60), 95.0);
    let right = pose((0.58, 0.60), (0.60, 0.60), 110.0);

    for _ in 0..3 {
        engine.process_frame(&[left.clone(), right.clone()]);
    }

    assert_eq!(engine.unique_count(), 2);
    assert_eq!(
        engine.confirmed_ids().collect::<Vec<_>>(),
        vec![PersonId(0), PersonId(1)]
    );
}

#[test]
fn test_crossing_people_can_swap_identities() {
    // Scan-order matching: when two people end up within the proximity
    // threshold of the older identity, both detections map onto it.
    let mut engine = SittingEngine::new(config(1));
    let a = pose((0.40, 0.60), (0.42, 0.60), 100.0);
    let b = pose((0.55, 0.60), (0.57, 0.60), 100.0);
    engine.process_frame(&[a, b]);
    assert_eq!(engine.tracks().count(), 2);

    let a = pose((0.46, 0.60), (0.48, 0.60), 100.0);
    let b = pose((0.50, 0.60), (0.52, 0.60), 100.0);
    let report = engine.process_frame(&[a, b]);

    let ids: Vec<_> = report.outcomes.iter().map(|o| o.identity).collect();
    assert_eq!(ids, vec![Some(PersonId(0)), Some(PersonId(0))]);
}

#[test]
fn test_independent_engines_do_not_share_state() {
    let mut first = SittingEngine::new(config(1));
    let mut second = SittingEngine::new(config(1));

    first.process_frame(&[seated()]);
    first.process_frame(&[pose((0.60, 0.60), (0.62, 0.60), 100.0)]);

    let report = second.process_frame(&[seated()]);
    assert_eq!(report.outcomes[0].identity, Some(PersonId(0)));
    assert_eq!(first.unique_count(), 2);
    assert_eq!(second.unique_count(), 1);
}
