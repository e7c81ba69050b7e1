use serde_derive::{Deserialize, Serialize};
use std::path::Path;

use crate::counter::Line;
use crate::error::Error;
use crate::tracker::DEFAULT_MAX_DISAPPEAR;

/// Settings of one counting session
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Empty frames a track survives before it is dropped
    pub max_disappear: u32,
    pub line: Line,
    /// Frames dropped between two processed ones
    pub skip_frames: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_disappear: DEFAULT_MAX_DISAPPEAR,
            line: Line::default(),
            skip_frames: 0,
        }
    }
}

impl Config {
    pub fn from_json(src: &str) -> Result<Self, Error> {
        let config: Self = serde_json::from_str(src)?;
        config.validate()?;

        Ok(config)
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, Error> {
        let src = std::fs::read_to_string(path)?;

        Self::from_json(&src)
    }

    pub fn validate(&self) -> Result<(), Error> {
        if self.line.coordinate < 0 {
            return Err(Error::InvalidConfig(format!(
                "line coordinate must be non-negative, got {}",
                self.line.coordinate
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::counter::{Axis, Direction};

    #[test]
    fn empty_object_gives_defaults() {
        let config = Config::from_json("{}").unwrap();

        assert_eq!(config, Config::default());
        assert_eq!(config.max_disappear, 10);
        assert_eq!(config.line, Line::horizontal(240));
    }

    #[test]
    fn partial_override() {
        let config = Config::from_json(
            r#"{
                "max_disappear": 4,
                "skip_frames": 2,
                "line": { "axis": "vertical", "coordinate": 320, "direction": "backward" }
            }"#,
        )
        .unwrap();

        assert_eq!(config.max_disappear, 4);
        assert_eq!(config.skip_frames, 2);
        assert_eq!(config.line.axis, Axis::Vertical);
        assert_eq!(config.line.coordinate, 320);
        assert_eq!(config.line.direction, Direction::Backward);
    }

    #[test]
    fn negative_line_is_rejected() {
        let res = Config::from_json(
            r#"{ "line": { "axis": "horizontal", "coordinate": -1, "direction": "forward" } }"#,
        );

        assert!(matches!(res, Err(Error::InvalidConfig(_))));
    }

    #[test]
    fn unknown_axis_is_a_json_error() {
        let res = Config::from_json(
            r#"{ "line": { "axis": "diagonal", "coordinate": 1, "direction": "forward" } }"#,
        );

        assert!(matches!(res, Err(Error::Json(_))));
    }
}
