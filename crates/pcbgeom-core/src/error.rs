//! 几何层错误定义

use thiserror::Error;

#[derive(Error, Debug)]
pub enum GeometryError {
    #[error("Zero length segment: {0}")]
    ZeroLengthSegment(String),

    #[error("Segments do not intersect even when extended: {0} / {1}")]
    NonIntersectingSegments(String, String),

    #[error("Invalid approximation config: {0}")]
    InvalidConfig(String),

    #[error("IO error: {0}")]
    ConfigIo(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    ConfigParse(#[from] serde_json::Error),
}
