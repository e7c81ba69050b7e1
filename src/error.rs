use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid detection #{index} ({x}, {y}, {w}, {h}): {reason}")]
    InvalidDetection {
        index: usize,
        x: i32,
        y: i32,
        w: i32,
        h: i32,
        reason: &'static str,
    },

    #[error("invalid config: {0}")]
    InvalidConfig(String),

    #[error("parse error: {0}")]
    Parse(String),

    #[error("IO Error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Json Error: {0}")]
    Json(#[from] serde_json::Error),
}
