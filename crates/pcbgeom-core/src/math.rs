//! 数学基础类型
//!
//! 基于 nalgebra 的整数坐标点/向量别名，以及整数包围盒和取整辅助函数。
//! 板级坐标统一使用整数（纳米），只有中间计算才转换为 `f64`。

use nalgebra as na;
use serde::{Deserialize, Serialize};
use std::fmt;

/// 2D整数点类型
pub type Point2I = na::Point2<i32>;

/// 2D整数向量类型（两点之差）
pub type Vector2I = na::Vector2<i32>;

/// 2D浮点点类型，用于中间计算
pub type Point2 = na::Point2<f64>;

/// 2D浮点向量类型
pub type Vector2 = na::Vector2<f64>;

/// 数值容差，用于几何比较
pub const EPSILON: f64 = 1e-10;

/// 判断两个浮点数是否近似相等
#[inline]
pub fn approx_eq(a: f64, b: f64) -> bool {
    (a - b).abs() < EPSILON
}

/// 四舍五入（远离零）并截断到 `i32` 范围
#[inline]
pub fn ki_round(v: f64) -> i32 {
    let r = v.round();
    if r >= i32::MAX as f64 {
        i32::MAX
    } else if r <= i32::MIN as f64 {
        i32::MIN
    } else {
        r as i32
    }
}

/// 计算 `numerator * value / denominator`，结果四舍五入
///
/// 中间结果使用 `i128`，避免大坐标时溢出。`denominator` 为零时返回 0。
pub fn rescale(numerator: i128, value: i128, denominator: i128) -> i128 {
    if denominator == 0 {
        return 0;
    }

    let product = numerator * value;
    let negative = (product < 0) != (denominator < 0);
    let (p, d) = (product.abs(), denominator.abs());
    let q = (p + d / 2) / d;

    if negative {
        -q
    } else {
        q
    }
}

/// 整数向量叉积 `a.x * b.y - a.y * b.x`
#[inline]
pub fn cross(a: &Vector2I, b: &Vector2I) -> i128 {
    a.x as i128 * b.y as i128 - a.y as i128 * b.x as i128
}

/// 整数向量点积
#[inline]
pub fn dot(a: &Vector2I, b: &Vector2I) -> i128 {
    a.x as i128 * b.x as i128 + a.y as i128 * b.y as i128
}

/// 欧几里得范数
#[inline]
pub fn norm(v: &Vector2I) -> f64 {
    (v.x as f64).hypot(v.y as f64)
}

/// 向量的极角（度），范围 (-180, 180]
#[inline]
pub fn polar_angle(v: &Vector2I) -> f64 {
    (v.y as f64).atan2(v.x as f64).to_degrees()
}

/// 整数点转浮点点
#[inline]
pub fn to_f64(p: &Point2I) -> Point2 {
    Point2::new(p.x as f64, p.y as f64)
}

/// 浮点点取整为整数点
#[inline]
pub fn to_i32(p: &Point2) -> Point2I {
    Point2I::new(ki_round(p.x), ki_round(p.y))
}

/// 保持方向，把向量缩放到指定长度
///
/// 零向量保持不变。
pub fn resize(v: &Vector2I, length: f64) -> Vector2I {
    let n = norm(v);
    if n == 0.0 {
        return *v;
    }
    let k = length / n;
    Vector2I::new(ki_round(v.x as f64 * k), ki_round(v.y as f64 * k))
}

/// 截断到 `i32` 范围
#[inline]
pub fn clamp_i32(v: i128) -> i32 {
    v.clamp(i32::MIN as i128, i32::MAX as i128) as i32
}

/// 点加向量，结果截断到 `i32` 范围
pub fn offset_point(p: &Point2I, v: &Vector2I) -> Point2I {
    Point2I::new(
        clamp_i32(p.x as i128 + v.x as i128),
        clamp_i32(p.y as i128 + v.y as i128),
    )
}

/// 两点中点（向零取整）
pub fn midpoint(a: &Point2I, b: &Point2I) -> Point2I {
    Point2I::new(
        clamp_i32((a.x as i128 + b.x as i128) / 2),
        clamp_i32((a.y as i128 + b.y as i128) / 2),
    )
}

/// 以 `[x, y]` 形式输出点，供 `Display` 实现使用
pub(crate) struct DisplayPoint<'a>(pub &'a Point2I);

impl fmt::Display for DisplayPoint<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.0.x, self.0.y)
    }
}

/// 2D整数包围盒
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoundingBox2I {
    pub min: Point2I,
    pub max: Point2I,
}

impl BoundingBox2I {
    /// 创建新的包围盒
    pub fn new(min: Point2I, max: Point2I) -> Self {
        Self { min, max }
    }

    /// 创建空的包围盒（无效状态）
    pub fn empty() -> Self {
        Self {
            min: Point2I::new(i32::MAX, i32::MAX),
            max: Point2I::new(i32::MIN, i32::MIN),
        }
    }

    /// 是否为空包围盒
    pub fn is_empty(&self) -> bool {
        self.min.x > self.max.x || self.min.y > self.max.y
    }

    /// 从点集创建包围盒
    pub fn from_points(points: impl IntoIterator<Item = Point2I>) -> Self {
        let mut bbox = Self::empty();
        for p in points {
            bbox.expand_to_include(&p);
        }
        bbox
    }

    /// 扩展包围盒以包含指定点
    pub fn expand_to_include(&mut self, point: &Point2I) {
        self.min.x = self.min.x.min(point.x);
        self.min.y = self.min.y.min(point.y);
        self.max.x = self.max.x.max(point.x);
        self.max.y = self.max.y.max(point.y);
    }

    /// 合并两个包围盒
    pub fn union(&self, other: &Self) -> Self {
        if self.is_empty() {
            return *other;
        }
        if other.is_empty() {
            return *self;
        }
        Self {
            min: Point2I::new(self.min.x.min(other.min.x), self.min.y.min(other.min.y)),
            max: Point2I::new(self.max.x.max(other.max.x), self.max.y.max(other.max.y)),
        }
    }

    /// 向四周扩大 `margin`
    pub fn inflated(&self, margin: i32) -> Self {
        if self.is_empty() {
            return *self;
        }
        Self {
            min: Point2I::new(
                self.min.x.saturating_sub(margin),
                self.min.y.saturating_sub(margin),
            ),
            max: Point2I::new(
                self.max.x.saturating_add(margin),
                self.max.y.saturating_add(margin),
            ),
        }
    }

    /// 检查是否与另一个包围盒相交
    pub fn intersects(&self, other: &Self) -> bool {
        self.min.x <= other.max.x
            && self.max.x >= other.min.x
            && self.min.y <= other.max.y
            && self.max.y >= other.min.y
    }

    /// 检查是否包含指定点（边界算包含）
    pub fn contains(&self, point: &Point2I) -> bool {
        point.x >= self.min.x
            && point.x <= self.max.x
            && point.y >= self.min.y
            && point.y <= self.max.y
    }

    /// 获取中心点
    pub fn center(&self) -> Point2I {
        Point2I::new(
            ((self.min.x as i64 + self.max.x as i64) / 2) as i32,
            ((self.min.y as i64 + self.max.y as i64) / 2) as i32,
        )
    }

    /// 获取宽度
    pub fn width(&self) -> i64 {
        self.max.x as i64 - self.min.x as i64
    }

    /// 获取高度
    pub fn height(&self) -> i64 {
        self.max.y as i64 - self.min.y as i64
    }
}

impl Default for BoundingBox2I {
    fn default() -> Self {
        Self::empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bounding_box() {
        let bbox = BoundingBox2I::from_points([
            Point2I::new(0, 0),
            Point2I::new(10, 5),
            Point2I::new(-5, 8),
        ]);

        assert_eq!(bbox.min, Point2I::new(-5, 0));
        assert_eq!(bbox.max, Point2I::new(10, 8));
        assert!(bbox.contains(&Point2I::new(0, 4)));
        assert!(!bbox.contains(&Point2I::new(20, 4)));

        let grown = bbox.inflated(10);
        assert!(grown.contains(&Point2I::new(20, 4)));
        assert_eq!(grown.width(), 35);
    }

    #[test]
    fn test_empty_union() {
        let a = BoundingBox2I::empty();
        let b = BoundingBox2I::from_points([Point2I::new(1, 2)]);
        assert!(a.is_empty());
        assert_eq!(a.union(&b), b);
        assert!(!a.inflated(5).contains(&Point2I::new(0, 0)));
    }

    #[test]
    fn test_rounding_helpers() {
        assert_eq!(ki_round(2.5), 3);
        assert_eq!(ki_round(-2.5), -3);
        assert_eq!(ki_round(1e20), i32::MAX);

        assert_eq!(rescale(1, 3, 2), 2);
        assert_eq!(rescale(-1, 3, 2), -2);
        assert_eq!(rescale(7, 10, 0), 0);
    }

    #[test]
    fn test_saturating_point_helpers() {
        let far = Point2I::new(2_000_000_000, -2_000_000_000);
        assert_eq!(
            offset_point(&far, &Vector2I::new(500_000_000, -500_000_000)),
            Point2I::new(i32::MAX, i32::MIN)
        );
        assert_eq!(
            offset_point(&Point2I::new(1, 2), &Vector2I::new(10, -20)),
            Point2I::new(11, -18)
        );

        assert_eq!(
            midpoint(&far, &Point2I::new(2_000_000_000, -2_000_000_000)),
            far
        );
        assert_eq!(
            midpoint(&Point2I::new(0, 0), &Point2I::new(-3, 3)),
            Point2I::new(-1, 1)
        );
        assert_eq!(clamp_i32(i128::MAX), i32::MAX);
    }

    #[test]
    fn test_vector_helpers() {
        let v = Vector2I::new(3, 4);
        assert!(approx_eq(norm(&v), 5.0));
        assert_eq!(resize(&v, 10.0), Vector2I::new(6, 8));
        assert_eq!(cross(&Vector2I::new(1, 0), &Vector2I::new(0, 1)), 1);
        assert!(approx_eq(polar_angle(&Vector2I::new(0, 5)), 90.0));
    }
}
