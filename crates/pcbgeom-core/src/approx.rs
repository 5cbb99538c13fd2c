//! 圆弧分段计算
//!
//! 给定半径和允许误差，计算逼近圆弧所需的最少弦数，以及给定弦数时的实际误差。

use crate::config::MIN_SEGCOUNT_FOR_CIRCLE;
use std::f64::consts::PI;

/// 允许的最小逼近误差，更小的值（含 0 和负数）按此处理
const MIN_ERROR: f64 = 1.0;

/// 逼近 `arc_angle` 度的圆弧、误差不超过 `max_error` 所需的分段数
///
/// 至少返回 2。`max_error` 小于 1 时按 1 计算。
pub fn arc_to_segment_count(radius: f64, max_error: f64, arc_angle: f64) -> usize {
    arc_to_segment_count_with(radius, max_error, arc_angle, MIN_SEGCOUNT_FOR_CIRCLE)
}

/// 同 [`arc_to_segment_count`]，整圆最少分段数由调用方指定
pub fn arc_to_segment_count_with(
    radius: f64,
    max_error: f64,
    arc_angle: f64,
    min_segments_per_circle: usize,
) -> usize {
    let max_error = max_error.max(MIN_ERROR);

    let rel_error = if radius > 0.0 {
        (max_error / radius).min(1.0)
    } else {
        1.0
    };

    // 每段弦对应的最大圆心角（度）
    let mut arc_increment = (1.0 - rel_error).acos().to_degrees() * 2.0;
    arc_increment = arc_increment.min(360.0 / min_segments_per_circle.max(1) as f64);

    let seg_count = (arc_angle.abs() / arc_increment).round() as usize;
    seg_count.max(2)
}

/// 整圆被 `seg_count` 段弦逼近、弦中点恰在圆上时，弦端点半径与圆半径之差
///
/// `seg_count` 小于 3 时按 3 计算。
pub fn circle_to_end_segment_delta_radius(radius: f64, seg_count: usize) -> f64 {
    let seg_count = seg_count.max(3);
    let alpha = PI / seg_count as f64;
    radius * (1.0 / alpha.cos() - 1.0)
}
