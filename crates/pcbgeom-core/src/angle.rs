//! 角度工具
//!
//! 所有角度均以度为单位。旋转约定：`rotate_point` 的正角度在 y 轴向上的
//! 平面上为顺时针（即在 y 轴向下的屏幕/板坐标系中为逆时针）。

use crate::math::{ki_round, Point2I};

/// 归一化到 (-180, 180]
pub fn normalize_angle_180(angle: f64) -> f64 {
    let a = normalize_angle_pos(angle);
    if a > 180.0 {
        a - 360.0
    } else {
        a
    }
}

/// 归一化到 [0, 360)
///
/// 非有限值返回 NaN。
pub fn normalize_angle_pos(angle: f64) -> f64 {
    let a = angle.rem_euclid(360.0);
    // rem_euclid 对极小负数可能返回 360 本身
    if a >= 360.0 {
        0.0
    } else {
        a
    }
}

/// 归一化到 (-360, 0]
pub fn normalize_angle_neg(angle: f64) -> f64 {
    let a = normalize_angle_pos(angle);
    if a > 0.0 {
        a - 360.0
    } else {
        a
    }
}

/// 判断 `value` 是否落在环绕区间 `[min, max]` 内
///
/// 三个值先各自折回 `[0, wrap)`。`min > max` 表示区间跨越了 0 点；
/// `min == max` 时整圈都算在内。
pub fn within_wrapped_range(value: f64, min: f64, max: f64, wrap: f64) -> bool {
    debug_assert!(wrap > 0.0, "wrap must be positive");

    let fold = |v: f64| {
        let r = v.rem_euclid(wrap);
        // rem_euclid 对极小负数可能返回 wrap 本身
        if r >= wrap {
            r - wrap
        } else {
            r
        }
    };

    let (value, min, max) = (fold(value), fold(min), fold(max));

    if max > min {
        value >= min && value <= max
    } else {
        value >= min || value <= max
    }
}

/// 绕 `center` 旋转点
///
/// 90° 的整数倍走精确分支，其余角度用三角函数后四舍五入。
pub fn rotate_point(point: Point2I, center: Point2I, angle: f64) -> Point2I {
    let dx = point.x as i64 - center.x as i64;
    let dy = point.y as i64 - center.y as i64;
    let angle = normalize_angle_pos(angle);

    let (rx, ry) = if angle == 0.0 {
        (dx, dy)
    } else if angle == 90.0 {
        (dy, -dx)
    } else if angle == 180.0 {
        (-dx, -dy)
    } else if angle == 270.0 {
        (-dy, dx)
    } else {
        let (sin, cos) = angle.to_radians().sin_cos();
        let (fx, fy) = (dx as f64, dy as f64);
        (
            ki_round(fx * cos + fy * sin) as i64,
            ki_round(fy * cos - fx * sin) as i64,
        )
    };

    Point2I::new(
        (center.x as i64 + rx).clamp(i32::MIN as i64, i32::MAX as i64) as i32,
        (center.y as i64 + ry).clamp(i32::MIN as i64, i32::MAX as i64) as i32,
    )
}
