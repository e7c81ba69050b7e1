//! One-way line crossing counter.
//!
//! A track is counted the first time its position moves across the line in
//! the configured direction between two consecutive snapshots. A counted id
//! is never counted again and never uncounted, whatever it does afterwards.

use serde_derive::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::track::{Centroid, Objects, TrackId};

/// Orientation of the counting line. A horizontal line is crossed along `y`,
/// a vertical one along `x`.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    Horizontal,
    Vertical,
}

/// `Forward` counts movement towards growing coordinates (top to bottom for
/// a horizontal line), `Backward` the opposite.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Forward,
    Backward,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Line {
    pub axis: Axis,
    pub coordinate: i32,
    pub direction: Direction,
}

impl Default for Line {
    fn default() -> Self {
        Self::horizontal(240)
    }
}

impl Line {
    #[inline]
    pub fn horizontal(y: i32) -> Self {
        Self {
            axis: Axis::Horizontal,
            coordinate: y,
            direction: Direction::Forward,
        }
    }

    #[inline]
    pub fn vertical(x: i32) -> Self {
        Self {
            axis: Axis::Vertical,
            coordinate: x,
            direction: Direction::Forward,
        }
    }

    #[inline]
    pub fn with_direction(mut self, direction: Direction) -> Self {
        self.direction = direction;
        self
    }

    /// Coordinate of `p` perpendicular to the line
    #[inline(always)]
    pub fn project(&self, p: &Centroid) -> i32 {
        match self.axis {
            Axis::Horizontal => p.y,
            Axis::Vertical => p.x,
        }
    }

    /// `prev < c <= cur` for forward lines, `prev > c >= cur` for backward ones.
    /// Starting exactly on the line never counts.
    #[inline]
    pub fn crossed(&self, prev: &Centroid, cur: &Centroid) -> bool {
        let (prev, cur, c) = (self.project(prev), self.project(cur), self.coordinate);

        match self.direction {
            Direction::Forward => prev < c && c <= cur,
            Direction::Backward => prev > c && c >= cur,
        }
    }
}

/// Counts ids of `current` that also appear in `previous`, crossed `line`
/// between the two and are not in `counted` yet. Counted ids are added to
/// `counted`; the return value is the number of ids added.
pub fn count_crossings(
    current: &Objects,
    previous: &Objects,
    line: &Line,
    counted: &mut BTreeSet<TrackId>,
) -> u32 {
    let mut count = 0;

    for (id, cur) in current {
        let prev = match previous.get(id) {
            Some(prev) => prev,
            None => continue,
        };

        if line.crossed(prev, cur) && counted.insert(*id) {
            log::info!(
                "{} crossed line at {}: {} -> {}",
                id,
                line.coordinate,
                line.project(prev),
                line.project(cur)
            );
            count += 1;
        }
    }

    count
}

/// Owns the counted-set and the running total for one counting session.
#[derive(Debug, Clone, Default)]
pub struct CrossingCounter {
    line: Line,
    counted: BTreeSet<TrackId>,
    total: u64,
}

impl CrossingCounter {
    pub fn new(line: Line) -> Self {
        Self {
            line,
            counted: BTreeSet::new(),
            total: 0,
        }
    }

    #[inline]
    pub fn line(&self) -> &Line {
        &self.line
    }

    #[inline]
    pub fn total(&self) -> u64 {
        self.total
    }

    #[inline]
    pub fn counted(&self) -> &BTreeSet<TrackId> {
        &self.counted
    }

    #[inline]
    pub fn is_counted(&self, id: TrackId) -> bool {
        self.counted.contains(&id)
    }

    /// Returns the increment for this frame and adds it to the total.
    pub fn evaluate(&mut self, current: &Objects, previous: &Objects) -> u32 {
        let delta = count_crossings(current, previous, &self.line, &mut self.counted);
        self.total += delta as u64;

        delta
    }

    pub fn reset(&mut self) {
        self.counted.clear();
        self.total = 0;
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot(items: &[(u32, i32, i32)]) -> Objects {
        items
            .iter()
            .map(|&(id, x, y)| (TrackId(id), Centroid::new(x, y)))
            .collect()
    }

    #[test]
    fn crossing_downwards_counts_once() {
        let mut counter = CrossingCounter::new(Line::horizontal(240));

        let delta = counter.evaluate(&snapshot(&[(1, 100, 250)]), &snapshot(&[(1, 100, 230)]));
        assert_eq!(delta, 1);
        assert!(counter.is_counted(TrackId(1)));

        let delta = counter.evaluate(&snapshot(&[(1, 100, 245)]), &snapshot(&[(1, 100, 260)]));
        assert_eq!(delta, 0, "moving back up must not count");

        let delta = counter.evaluate(&snapshot(&[(1, 100, 250)]), &snapshot(&[(1, 100, 230)]));
        assert_eq!(delta, 0, "second crossing of a counted id");
        assert_eq!(counter.total(), 1);
    }

    #[test]
    fn landing_on_the_line_counts_but_starting_on_it_does_not() {
        let line = Line::horizontal(240);

        assert!(line.crossed(&Centroid::new(0, 239), &Centroid::new(0, 240)));
        assert!(!line.crossed(&Centroid::new(0, 240), &Centroid::new(0, 260)));
        assert!(!line.crossed(&Centroid::new(0, 250), &Centroid::new(0, 230)));
        assert!(!line.crossed(&Centroid::new(0, 200), &Centroid::new(0, 230)));
    }

    #[test]
    fn backward_line_mirrors_forward() {
        let line = Line::horizontal(240).with_direction(Direction::Backward);

        assert!(line.crossed(&Centroid::new(0, 250), &Centroid::new(0, 240)));
        assert!(!line.crossed(&Centroid::new(0, 240), &Centroid::new(0, 200)));
        assert!(!line.crossed(&Centroid::new(0, 230), &Centroid::new(0, 250)));
    }

    #[test]
    fn vertical_line_uses_x() {
        let line = Line::vertical(320);

        assert!(line.crossed(&Centroid::new(300, 0), &Centroid::new(330, 0)));
        assert!(!line.crossed(&Centroid::new(300, 0), &Centroid::new(310, 500)));
    }

    #[test]
    fn new_tracks_can_not_cross() {
        let mut counted = BTreeSet::new();
        let delta = count_crossings(
            &snapshot(&[(2, 100, 300)]),
            &snapshot(&[(1, 100, 100)]),
            &Line::horizontal(240),
            &mut counted,
        );

        assert_eq!(delta, 0);
        assert!(counted.is_empty());
    }

    #[test]
    fn several_tracks_in_one_frame() {
        let mut counter = CrossingCounter::new(Line::horizontal(100));
        let prev = snapshot(&[(1, 0, 90), (2, 50, 95), (3, 90, 120)]);
        let cur = snapshot(&[(1, 0, 110), (2, 50, 100), (3, 90, 130)]);

        assert_eq!(counter.evaluate(&cur, &prev), 2);
        assert_eq!(
            counter.counted().iter().copied().collect::<Vec<_>>(),
            vec![TrackId(1), TrackId(2)]
        );
        assert_eq!(counter.total(), counter.counted().len() as u64);
    }

    #[test]
    fn reset_clears_counted_and_total() {
        let mut counter = CrossingCounter::default();
        counter.evaluate(&snapshot(&[(1, 0, 250)]), &snapshot(&[(1, 0, 230)]));
        assert_eq!(counter.total(), 1);

        counter.reset();
        assert_eq!(counter.total(), 0);
        assert!(counter.counted().is_empty());

        let delta = counter.evaluate(&snapshot(&[(1, 0, 250)]), &snapshot(&[(1, 0, 230)]));
        assert_eq!(delta, 1);
    }
}
