//! Per-stream frame driver: tracker, counter, previous snapshot and frame
//! counter of one logical video source.

use serde_derive::{Deserialize, Serialize};

use crate::config::Config;
use crate::counter::CrossingCounter;
use crate::error::Error;
use crate::frame::Frame;
use crate::overlay::{label_detections, Label};
use crate::track::{Objects, TrackId};
use crate::tracker::CentroidTracker;

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrackedObject {
    pub id: TrackId,
    pub x: i32,
    pub y: i32,
}

/// Outcome of one processed frame
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct FrameReport {
    /// 1-based index among all frames offered to the session
    pub frame: u64,
    pub timestamp: f32,
    /// Crossings counted on this frame
    pub delta: u32,
    pub total: u64,
    pub objects: Vec<TrackedObject>,
    pub labels: Vec<Label>,
}

#[derive(Debug, Clone)]
pub struct Session {
    config: Config,
    tracker: CentroidTracker,
    counter: CrossingCounter,
    previous: Objects,
    frame_count: u64,
}

impl Default for Session {
    fn default() -> Self {
        Self::new(Config::default())
    }
}

impl Session {
    pub fn new(config: Config) -> Self {
        Self {
            tracker: CentroidTracker::new(config.max_disappear),
            counter: CrossingCounter::new(config.line),
            previous: Objects::new(),
            frame_count: 0,
            config,
        }
    }

    #[inline]
    pub fn config(&self) -> &Config {
        &self.config
    }

    #[inline]
    pub fn tracker(&self) -> &CentroidTracker {
        &self.tracker
    }

    #[inline]
    pub fn counter(&self) -> &CrossingCounter {
        &self.counter
    }

    #[inline]
    pub fn total(&self) -> u64 {
        self.counter.total()
    }

    /// Snapshot of the last processed frame
    #[inline]
    pub fn previous(&self) -> &Objects {
        &self.previous
    }

    #[inline]
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Drops counted ids, total, previous snapshot and frame counter and starts
    /// over with a fresh tracker, ids restart at 1.
    pub fn reset(&mut self) {
        log::info!("session reset at total {}", self.counter.total());

        self.tracker = CentroidTracker::new(self.config.max_disappear);
        self.counter.reset();
        self.previous.clear();
        self.frame_count = 0;
    }

    /// Processes one frame, or returns `None` when frame skipping drops it.
    ///
    /// A frame with an invalid detection is rejected and leaves the session
    /// as it was, apart from the offered frame being counted.
    pub fn process(&mut self, frame: &Frame) -> Result<Option<FrameReport>, Error> {
        self.frame_count += 1;
        if self.frame_count % (self.config.skip_frames as u64 + 1) != 0 {
            return Ok(None);
        }

        let objects = self.tracker.update(&frame.detections)?;
        let delta = self.counter.evaluate(&objects, &self.previous);

        log::trace!(
            "frame {}: {} detections, {} tracks, +{} (total {})",
            self.frame_count,
            frame.len(),
            objects.len(),
            delta,
            self.counter.total()
        );

        let report = FrameReport {
            frame: self.frame_count,
            timestamp: frame.timestamp,
            delta,
            total: self.counter.total(),
            objects: objects
                .iter()
                .map(|(&id, p)| TrackedObject { id, x: p.x, y: p.y })
                .collect(),
            labels: label_detections(&objects, &frame.detections),
        };

        self.previous = objects;

        Ok(Some(report))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
