//! Greedy nearest-centroid tracker.
//!
//! Each call to [`CentroidTracker::update`] takes the complete detection set
//! of one frame and returns the id -> centroid snapshot after the frame.
//!
//! - empty frame: every track takes a miss, tracks with more than
//!   `max_disappear` misses are dropped;
//! - no live tracks: every detection becomes a new track;
//! - otherwise: greedy assignment on centroid distance (see
//!   [`math::greedy_assignment`]), matched tracks are moved and their misses
//!   cleared, leftover detections become new tracks. Tracks left unmatched
//!   in this branch keep their miss count as is.

use std::collections::BTreeMap;

use crate::detection::Detection;
use crate::error::Error;
use crate::math;
use crate::track::{Centroid, Objects, Track, TrackId};

pub const DEFAULT_MAX_DISAPPEAR: u32 = 10;

/// Result of matching one frame's centroids against the live tracks.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct DetectionsMapping {
    /// `(track, centroid index, distance)` in assignment order
    pub matched: Vec<(TrackId, usize, f64)>,
    /// centroid indexes left for registration, ascending
    pub missed: Vec<usize>,
}

#[derive(Debug, Clone)]
pub struct CentroidTracker {
    tracks: BTreeMap<TrackId, Track>,
    next_id: u32,
    max_disappear: u32,
}

impl Default for CentroidTracker {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_DISAPPEAR)
    }
}

impl CentroidTracker {
    pub fn new(max_disappear: u32) -> Self {
        Self {
            tracks: BTreeMap::new(),
            next_id: 1,
            max_disappear,
        }
    }

    #[inline]
    pub fn max_disappear(&self) -> u32 {
        self.max_disappear
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    #[inline]
    pub fn get(&self, id: TrackId) -> Option<&Track> {
        self.tracks.get(&id)
    }

    /// Live tracks in ascending id order
    #[inline]
    pub fn tracks(&self) -> impl Iterator<Item = &Track> {
        self.tracks.values()
    }

    pub fn objects(&self) -> Objects {
        self.tracks
            .values()
            .map(|t| (t.id, t.centroid))
            .collect()
    }

    fn register(&mut self, centroid: Centroid) -> TrackId {
        let id = TrackId(self.next_id);
        self.next_id += 1;

        log::debug!("register {} at ({}, {})", id, centroid.x, centroid.y);
        self.tracks.insert(id, Track::new(id, centroid));

        id
    }

    fn deregister(&mut self, id: TrackId) {
        if self.tracks.remove(&id).is_some() {
            log::debug!("deregister {}", id);
        }
    }

    fn age_all(&mut self) {
        let max_disappear = self.max_disappear;
        let expired: Vec<TrackId> = self
            .tracks
            .values_mut()
            .filter_map(|t| (t.miss() > max_disappear).then(|| t.id))
            .collect();

        for id in expired {
            self.deregister(id);
        }
    }

    /// Matches `centroids` against the live tracks without touching them.
    pub fn map_detections(&self, centroids: &[Centroid]) -> DetectionsMapping {
        if self.tracks.is_empty() {
            return DetectionsMapping {
                matched: Vec::new(),
                missed: (0..centroids.len()).collect(),
            };
        }

        let ids: Vec<TrackId> = self.tracks.keys().copied().collect();
        let positions: Vec<Centroid> = self.tracks.values().map(|t| t.centroid).collect();

        let dist = math::distance_matrix(&positions, centroids);
        let assignments = math::greedy_assignment(&dist);

        let mut taken = vec![false; centroids.len()];
        let matched = assignments
            .into_iter()
            .map(|(r, c, d)| {
                taken[c] = true;
                (ids[r], c, d)
            })
            .collect();

        let missed = taken
            .iter()
            .enumerate()
            .filter_map(|(i, &t)| (!t).then(|| i))
            .collect();

        DetectionsMapping { matched, missed }
    }

    fn apply(&mut self, mapping: DetectionsMapping, centroids: &[Centroid]) {
        for (id, c, _) in mapping.matched {
            if let Some(track) = self.tracks.get_mut(&id) {
                track.hit(centroids[c]);
            }
        }

        for c in mapping.missed {
            self.register(centroids[c]);
        }
    }

    /// Feeds one frame. The whole set is validated first, a rejected frame
    /// leaves the tracker untouched.
    pub fn update(&mut self, detections: &[Detection]) -> Result<Objects, Error> {
        let centroids = detections
            .iter()
            .enumerate()
            .map(|(i, det)| det.validate(i).map(|_| det.centroid()))
            .collect::<Result<Vec<_>, _>>()?;

        if centroids.is_empty() {
            self.age_all();
        } else {
            let mapping = self.map_detections(&centroids);
            self.apply(mapping, &centroids);
        }

        Ok(self.objects())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
