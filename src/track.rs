use nalgebra as na;
use serde_derive::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Integer pixel position of an object
pub type Centroid = na::Point2<i32>;

/// Frame-scoped snapshot of the tracker: id -> current centroid, ascending id order
pub type Objects = BTreeMap<TrackId, Centroid>;

#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct TrackId(pub u32);

impl fmt::Display for TrackId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ID {}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Track {
    pub id: TrackId,
    pub centroid: Centroid,

    // consecutive frames without a matching detection
    pub misses: u32,
}

impl Track {
    pub fn new(id: TrackId, centroid: Centroid) -> Self {
        Self {
            id,
            centroid,
            misses: 0,
        }
    }

    #[inline]
    pub fn hit(&mut self, centroid: Centroid) {
        self.centroid = centroid;
        self.misses = 0;
    }

    #[inline]
    pub fn miss(&mut self) -> u32 {
        self.misses = self.misses.saturating_add(1);
        self.misses
    }
}
