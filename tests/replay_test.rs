use std::io::Cursor;

use sitcount_rs::integration::JsonLinesSource;
use sitcount_rs::{EngineConfig, SittingEngine, Verdict};

/// 17 COCO keypoints as `[x, y, conf]`, with only hips, knees and ankles set.
fn person(hip_x: f32, knee_angle_bent: bool) -> String {
    let mut kpts = vec![[0.0_f32, 0.0, 0.0]; 17];
    kpts[11] = [hip_x, 0.60, 0.9];
    kpts[12] = [hip_x + 0.03, 0.60, 0.9];
    if knee_angle_bent {
        kpts[13] = [hip_x + 0.10, 0.60, 0.9];
        kpts[15] = [hip_x + 0.10, 0.72, 0.9];
    } else {
        kpts[13] = [hip_x, 0.75, 0.9];
        kpts[15] = [hip_x, 0.90, 0.9];
    }
    let rows: Vec<String> = kpts
        .iter()
        .map(|&[x, y, c]| format!("[{x}, {y}, {c}]"))
        .collect();
    format!(r#"{{"keypoints": [{}]}}"#, rows.join(", "))
}

fn frame(people: &[String]) -> String {
    format!(r#"{{"people": [{}]}}"#, people.join(", "))
}

#[test]
fn test_replay_counts_unique_sitters() {
    let mut lines = Vec::new();
    // someone masked on the far left the whole time
    let masked = person(0.10, true);
    for i in 0..6 {
        let mut people = vec![masked.clone(), person(0.45, true)];
        if i >= 3 {
            people.push(person(0.60, i >= 4));
        }
        lines.push(frame(&people));
    }
    lines.push(frame(&[]));
    let data = lines.join("\n");

    let mut engine = SittingEngine::new(EngineConfig::default().with_confirmation_frames(2));
    let mut headlines = Vec::new();
    for detections in JsonLinesSource::new(Cursor::new(data)) {
        let report = engine.process_frame(&detections.unwrap());
        headlines.push(report.headline());
    }

    assert_eq!(engine.frame_index(), 7);
    assert_eq!(engine.unique_count(), 2);
    assert_eq!(headlines[1], Verdict::SittingNew);
    assert_eq!(headlines[6], Verdict::NoDetection);
    assert!(
        engine
            .tracks()
            .all(|t| t.position_x > 0.35),
        "masked person must never be tracked"
    );
}
