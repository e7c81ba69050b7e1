pub mod config;
pub mod counter;
pub mod detection;
pub mod error;
pub mod frame;
pub mod math;
pub mod overlay;
pub mod session;
pub mod track;
pub mod tracker;

pub use config::Config;
pub use counter::{count_crossings, Axis, CrossingCounter, Direction, Line};
pub use detection::Detection;
pub use frame::Frame;
pub use session::{FrameReport, Session};
pub use track::{Centroid, Objects, Track, TrackId};
pub use tracker::CentroidTracker;

use error::Error;
use std::collections::HashMap;

/// Line counting over any number of named video sources. Every source is
/// counted independently, frames of one source must be fed in order.
pub trait Counting {
    fn update(&mut self, frame: &Frame, src: &str) -> Result<Option<FrameReport>, Error>;
    fn total(&self, src: &str) -> u64;
    fn reset(&mut self, src: &str);
}

pub struct MultiStreamCounter {
    config: Config,
    sessions: HashMap<String, Session>,
}

impl MultiStreamCounter {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            sessions: HashMap::new(),
        }
    }

    #[inline]
    pub fn session(&self, src: &str) -> Option<&Session> {
        self.sessions.get(src)
    }

    /// Forgets a source, e.g. when it is replaced by another video
    #[inline]
    pub fn remove(&mut self, src: &str) -> Option<Session> {
        self.sessions.remove(src)
    }

    #[inline]
    pub fn sources(&self) -> impl Iterator<Item = &str> {
        self.sessions.keys().map(String::as_str)
    }
}

impl Default for MultiStreamCounter {
    fn default() -> Self {
        Self::new(Config::default())
    }
}

impl crate::Counting for MultiStreamCounter {
    fn update(&mut self, frame: &Frame, src: &str) -> Result<Option<FrameReport>, Error> {
        let config = &self.config;
        let session = self
            .sessions
            .entry(src.to_string())
            .or_insert_with(|| Session::new(config.clone()));

        session.process(frame)
    }

    #[inline]
    fn total(&self, src: &str) -> u64 {
        self.sessions.get(src).map(Session::total).unwrap_or(0)
    }

    fn reset(&mut self, src: &str) {
        if let Some(session) = self.sessions.get_mut(src) {
            session.reset();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frame(cy: i32) -> Frame {
        Frame::new(0.0, vec![Detection::new(90, cy - 10, 20, 20)])
    }

    #[test]
    fn sources_are_counted_independently() {
        let mut counter = MultiStreamCounter::default();

        counter.update(&frame(230), "cam-a").unwrap();
        counter.update(&frame(250), "cam-a").unwrap();

        counter.update(&frame(250), "cam-b").unwrap();
        counter.update(&frame(230), "cam-b").unwrap();

        assert_eq!(counter.total("cam-a"), 1);
        assert_eq!(counter.total("cam-b"), 0);
        assert_eq!(counter.total("cam-c"), 0);

        let mut sources: Vec<_> = counter.sources().collect();
        sources.sort_unstable();
        assert_eq!(sources, vec!["cam-a", "cam-b"]);
    }

    #[test]
    fn reset_touches_one_source() {
        let mut counter = MultiStreamCounter::default();

        for src in ["a", "b"] {
            counter.update(&frame(230), src).unwrap();
            counter.update(&frame(250), src).unwrap();
        }

        counter.reset("a");
        assert_eq!(counter.total("a"), 0);
        assert_eq!(counter.total("b"), 1);

        assert!(counter.remove("b").is_some());
        assert!(counter.session("b").is_none());
    }
}
