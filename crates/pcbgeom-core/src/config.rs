//! 折线逼近配置
//!
//! 默认值对应板级坐标（纳米）：最大逼近误差 0.005mm，整圆至少 8 段。

use crate::error::GeometryError;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// 默认最大逼近误差（纳米）
pub const DEFAULT_MAX_ERROR: i32 = 5_000;

/// 整圆的最少分段数
pub const MIN_SEGCOUNT_FOR_CIRCLE: usize = 8;

/// 圆弧折线逼近配置
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApproxConfig {
    /// 弦与真实圆弧之间允许的最大偏差
    pub max_error: i32,
    /// 整圆至少使用的分段数
    pub min_segments_per_circle: usize,
}

impl Default for ApproxConfig {
    fn default() -> Self {
        Self {
            max_error: DEFAULT_MAX_ERROR,
            min_segments_per_circle: MIN_SEGCOUNT_FOR_CIRCLE,
        }
    }
}

impl ApproxConfig {
    /// 指定最大误差，其余取默认值
    pub fn with_max_error(max_error: i32) -> Self {
        Self {
            max_error,
            ..Self::default()
        }
    }

    /// 校验配置
    pub fn validate(&self) -> Result<(), GeometryError> {
        if self.max_error <= 0 {
            return Err(GeometryError::InvalidConfig(format!(
                "max_error must be positive, got {}",
                self.max_error
            )));
        }

        if self.min_segments_per_circle < 3 {
            return Err(GeometryError::InvalidConfig(format!(
                "min_segments_per_circle must be at least 3, got {}",
                self.min_segments_per_circle
            )));
        }

        Ok(())
    }

    /// 从 JSON 字符串加载并校验
    pub fn from_json_str(json: &str) -> Result<Self, GeometryError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// 从 JSON 文件加载并校验
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, GeometryError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        let config = ApproxConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.max_error, 5_000);
        assert_eq!(config.min_segments_per_circle, 8);
    }

    #[test]
    fn test_from_json() {
        let config = ApproxConfig::from_json_str(r#"{ "max_error": 100 }"#).unwrap();
        assert_eq!(config.max_error, 100);
        assert_eq!(config.min_segments_per_circle, MIN_SEGCOUNT_FOR_CIRCLE);

        let config =
            ApproxConfig::from_json_str(r#"{ "max_error": 10, "min_segments_per_circle": 16 }"#)
                .unwrap();
        assert_eq!(config.min_segments_per_circle, 16);
    }

    #[test]
    fn test_invalid_config() {
        assert!(matches!(
            ApproxConfig::from_json_str(r#"{ "max_error": 0 }"#),
            Err(GeometryError::InvalidConfig(_))
        ));
        assert!(matches!(
            ApproxConfig::from_json_str(r#"{ "min_segments_per_circle": 2 }"#),
            Err(GeometryError::InvalidConfig(_))
        ));
        assert!(matches!(
            ApproxConfig::from_json_str("not json"),
            Err(GeometryError::ConfigParse(_))
        ));
    }

    #[test]
    fn test_missing_file() {
        assert!(matches!(
            ApproxConfig::from_json_file("/nonexistent/pcbgeom/approx.json"),
            Err(GeometryError::ConfigIo(_))
        ));
    }
}
