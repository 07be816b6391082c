//! 容差配置
//!
//! 所有工具共用的唯一容差来源。屏幕像素值除以当前缩放得到世界坐标半径，
//! 因此无论缩放级别如何，用户感知到的捕捉/命中距离保持不变。

use serde::{Deserialize, Serialize};

/// 容差配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ToleranceConfig {
    /// 点捕捉半径（屏幕像素）
    pub snap_radius_px: f64,
    /// 类直线/圆命中半径，以及交点候选高亮半径（屏幕像素）
    pub hit_radius_px: f64,
    /// 判定"该位置已有点"的世界坐标容差
    pub duplicate_epsilon: f64,
    /// 拖动提交的最小位移（世界坐标）
    pub drag_commit_epsilon: f64,
}

impl Default for ToleranceConfig {
    fn default() -> Self {
        Self {
            snap_radius_px: 10.0,
            hit_radius_px: 8.0,
            duplicate_epsilon: 1e-6,
            drag_commit_epsilon: 1e-6,
        }
    }
}

impl ToleranceConfig {
    /// 捕捉半径（世界坐标）
    pub fn snap_radius(&self, zoom: f64) -> f64 {
        Self::to_world(self.snap_radius_px, zoom)
    }

    /// 命中半径（世界坐标）
    pub fn hit_radius(&self, zoom: f64) -> f64 {
        Self::to_world(self.hit_radius_px, zoom)
    }

    fn to_world(px: f64, zoom: f64) -> f64 {
        if zoom.is_finite() && zoom > 0.0 {
            px / zoom
        } else {
            px
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zoom_normalized_radius() {
        let config = ToleranceConfig::default();
        assert!((config.snap_radius(1.0) - 10.0).abs() < 1e-12);
        assert!((config.snap_radius(2.0) - 5.0).abs() < 1e-12);
        assert!((config.hit_radius(0.5) - 16.0).abs() < 1e-12);
    }

    #[test]
    fn test_invalid_zoom_falls_back() {
        let config = ToleranceConfig::default();
        assert!((config.snap_radius(0.0) - 10.0).abs() < 1e-12);
        assert!((config.snap_radius(f64::NAN) - 10.0).abs() < 1e-12);
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let config: ToleranceConfig = serde_json::from_str(r#"{"snap_radius_px": 4.0}"#).unwrap();
        assert_eq!(config.snap_radius_px, 4.0);
        assert_eq!(config.hit_radius_px, 8.0);
    }
}
