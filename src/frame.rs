use serde_derive::{Deserialize, Serialize};
use std::str::FromStr;

use crate::detection::Detection;
use crate::error::Error;

/// Complete detection set of one video frame
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct Frame {
    pub detections: Vec<Detection>,
    pub timestamp: f32, // in seconds
}

impl Frame {
    #[inline]
    pub fn new(timestamp: f32, detections: Vec<Detection>) -> Self {
        Self {
            detections,
            timestamp,
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.detections.len()
    }

    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = &Detection> {
        self.detections.iter()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.detections.is_empty()
    }
}

/// Dump line: `<timestamp>:<json array of {"x","y","w","h"}>`
impl FromStr for Frame {
    type Err = Error;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let idx = line
            .find(':')
            .ok_or_else(|| Error::Parse("expected `:`".to_string()))?;

        let (ts, vector) = line.split_at(idx);
        let timestamp = ts
            .trim()
            .parse::<f32>()
            .map_err(|e| Error::Parse(format!("timestamp `{}`: {}", ts.trim(), e)))?;

        let detections = serde_json::from_str(&vector[1..])?;

        Ok(Self::new(timestamp, detections))
    }
}
