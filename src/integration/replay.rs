//! Replay of recorded keypoints, one JSON object per frame.
//!
//! Each non-empty line looks like
//! `{"people": [{"keypoints": [[x, y, conf], ...], "bbox": [x1, y1, x2, y2], "score": 0.9}]}`.
//! `bbox` and `score` are optional, and keypoint entries may omit the
//! confidence.

use std::io::{BufRead, Lines};

use serde::Deserialize;
use thiserror::Error;

use crate::pose::{Keypoint, PoseDetection, Rect};

#[derive(Debug, Error)]
pub enum ReplayError {
    #[error("failed to read keypoint stream: {0}")]
    Io(#[from] std::io::Error),
    #[error("line {line}: invalid frame record: {source}")]
    Parse {
        line: usize,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Debug, Deserialize)]
struct FrameRecord {
    #[serde(default)]
    people: Vec<PersonRecord>,
}

#[derive(Debug, Deserialize)]
struct PersonRecord {
    keypoints: Vec<Vec<f32>>,
    #[serde(default)]
    bbox: Option<[f32; 4]>,
    #[serde(default)]
    score: Option<f32>,
}

impl PersonRecord {
    fn into_detection(self) -> PoseDetection {
        let keypoints = self
            .keypoints
            .iter()
            .map(|values| match values.as_slice() {
                [x, y, confidence, ..] => Keypoint::with_confidence(*x, *y, *confidence),
                [x, y] => Keypoint::new(*x, *y),
                _ => Keypoint::MISSING,
            })
            .collect();
        PoseDetection {
            keypoints,
            bbox: self
                .bbox
                .map(|[x1, y1, x2, y2]| Rect::from_tlbr(x1, y1, x2, y2)),
            score: self.score.unwrap_or(1.0),
        }
    }
}

/// Iterator over recorded frames, yielding each frame's detections.
pub struct JsonLinesSource<R> {
    lines: Lines<R>,
    line_no: usize,
}

impl<R: BufRead> JsonLinesSource<R> {
    pub fn new(reader: R) -> Self {
        Self {
            lines: reader.lines(),
            line_no: 0,
        }
    }

    /// Number of lines consumed so far.
    pub fn line_number(&self) -> usize {
        self.line_no
    }
}

impl<R: BufRead> Iterator for JsonLinesSource<R> {
    type Item = Result<Vec<PoseDetection>, ReplayError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let line = match self.lines.next()? {
                Ok(line) => line,
                Err(e) => return Some(Err(e.into())),
            };
            self.line_no += 1;

            if line.trim().is_empty() {
                continue;
            }

            let frame: Self::Item = serde_json::from_str::<FrameRecord>(&line)
                .map(|record| {
                    record
                        .people
                        .into_iter()
                        .map(PersonRecord::into_detection)
                        .collect()
                })
                .map_err(|source| ReplayError::Parse {
                    line: self.line_no,
                    source,
                });
            return Some(frame);
        }
    }
}
