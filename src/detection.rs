use serde_derive::{Deserialize, Serialize};

use crate::error::Error;
use crate::track::Centroid;

/// Axis-aligned foreground box: left-top corner and width-height, in pixels
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Detection {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

impl Detection {
    #[inline]
    pub fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        Self { x, y, w, h }
    }

    /// Rejects boxes a well-behaved detector can not produce. `index` is the
    /// position of the box in its frame and only ends up in the error.
    pub fn validate(&self, index: usize) -> Result<(), Error> {
        let reason = if self.x < 0 || self.y < 0 {
            "negative corner"
        } else if self.w <= 0 {
            "non-positive width"
        } else if self.h <= 0 {
            "non-positive height"
        } else if self.x.checked_add(self.w).is_none() || self.y.checked_add(self.h).is_none() {
            "box exceeds i32 range"
        } else {
            return Ok(());
        };

        Err(Error::InvalidDetection {
            index,
            x: self.x,
            y: self.y,
            w: self.w,
            h: self.h,
            reason,
        })
    }

    /// Geometric center, truncated to whole pixels (`x + w / 2` in integer
    /// arithmetic, which equals truncation of the real center for
    /// non-negative boxes).
    #[inline]
    pub fn centroid(&self) -> Centroid {
        Centroid::new(self.x + self.w / 2, self.y + self.h / 2)
    }

    #[inline(always)]
    pub fn right(&self) -> i32 {
        self.x + self.w
    }

    #[inline(always)]
    pub fn bottom(&self) -> i32 {
        self.y + self.h
    }

    /// Strict interior test, points on the border are outside.
    #[inline]
    pub fn contains(&self, p: &Centroid) -> bool {
        self.x < p.x && p.x < self.right() && self.y < p.y && p.y < self.bottom()
    }
}

impl From<(i32, i32, i32, i32)> for Detection {
    #[inline]
    fn from((x, y, w, h): (i32, i32, i32, i32)) -> Self {
        Self::new(x, y, w, h)
    }
}
