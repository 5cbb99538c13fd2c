//! 线段
//!
//! 有向线段 A→B，整数端点。交点、投影、反射都用整数运算加四舍五入，
//! 中间量放大到 `i128`，保证大坐标下不会溢出。

use crate::math::{
    clamp_i32, cross, dot, norm, rescale, BoundingBox2I, DisplayPoint, Point2I, Vector2I,
};
use serde::{Deserialize, Serialize};
use std::fmt;

/// 线段
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Segment {
    pub a: Point2I,
    pub b: Point2I,
}

impl Segment {
    pub fn new(a: Point2I, b: Point2I) -> Self {
        Self { a, b }
    }

    /// 计算线段长度
    pub fn length(&self) -> f64 {
        norm(&(self.b - self.a))
    }

    /// 线段长度为零
    pub fn is_degenerate(&self) -> bool {
        self.a == self.b
    }

    /// 计算线段中点
    pub fn center(&self) -> Point2I {
        let half = |a: i32, b: i32| clamp_i32(a as i128 + (b as i128 - a as i128) / 2);
        Point2I::new(half(self.a.x, self.b.x), half(self.a.y, self.b.y))
    }

    /// 求与另一条线段的交点
    ///
    /// - `ignore_endpoints`: 两条线段仅在端点处相接时不算相交
    /// - `lines`: 两者都按无限长直线处理
    ///
    /// 平行（含共线）时返回 `None`。
    pub fn intersect(
        &self,
        other: &Segment,
        ignore_endpoints: bool,
        lines: bool,
    ) -> Option<Point2I> {
        let e = self.b - self.a;
        let f = other.b - other.a;
        let ac = other.a - self.a;

        let d = cross(&f, &e);
        let p = cross(&f, &ac);
        let q = cross(&e, &ac);

        if d == 0 {
            return None;
        }

        if !lines {
            if d > 0 && (q < 0 || q > d || p < 0 || p > d) {
                return None;
            }
            if d < 0 && (q < d || p < d || p > 0 || q > 0) {
                return None;
            }
            if ignore_endpoints && (q == 0 || q == d) && (p == 0 || p == d) {
                return None;
            }
        }

        let x = other.a.x as i128 + rescale(q, f.x as i128, d);
        let y = other.a.y as i128 + rescale(q, f.y as i128, d);

        Some(Point2I::new(clamp_i32(x), clamp_i32(y)))
    }

    /// 与另一条线段是否相交（端点相接也算）
    pub fn intersects(&self, other: &Segment) -> bool {
        self.intersect(other, false, false).is_some()
    }

    /// 线段上离 `p` 最近的点
    pub fn nearest_point(&self, p: &Point2I) -> Point2I {
        let d = self.b - self.a;
        let l_squared = dot(&d, &d);

        if l_squared == 0 {
            return self.a;
        }

        let t = dot(&d, &(*p - self.a));

        if t < 0 {
            self.a
        } else if t > l_squared {
            self.b
        } else {
            self.offset_along(&d, t, l_squared)
        }
    }

    /// `p` 在线段所在无限直线上的正交投影
    pub fn line_project(&self, p: &Point2I) -> Point2I {
        let d = self.b - self.a;
        let l_squared = dot(&d, &d);

        if l_squared == 0 {
            return self.a;
        }

        let t = dot(&d, &(*p - self.a));
        self.offset_along(&d, t, l_squared)
    }

    /// `p` 关于线段所在直线的镜像点
    pub fn reflect_point(&self, p: &Point2I) -> Point2I {
        let d = self.b - self.a;
        let l_squared = dot(&d, &d);

        let c = if l_squared == 0 {
            *p
        } else {
            let t = dot(&d, &(*p - self.a));
            self.offset_along(&d, t, l_squared)
        };

        Point2I::new(
            clamp_i32(2 * c.x as i128 - p.x as i128),
            clamp_i32(2 * c.y as i128 - p.y as i128),
        )
    }

    /// 点到线段的平方距离
    pub fn square_distance(&self, p: &Point2I) -> i128 {
        let v = *p - self.nearest_point(p);
        dot(&v, &v)
    }

    /// 点到线段的距离
    pub fn distance(&self, p: &Point2I) -> f64 {
        norm(&(*p - self.nearest_point(p)))
    }

    /// 点是否在线段上（容许 1 个单位的取整误差）
    pub fn contains(&self, p: &Point2I) -> bool {
        self.square_distance(p) <= 1
    }

    pub fn bounding_box(&self) -> BoundingBox2I {
        BoundingBox2I::from_points([self.a, self.b])
    }

    fn offset_along(&self, d: &Vector2I, t: i128, l_squared: i128) -> Point2I {
        let x = self.a.x as i128 + rescale(t, d.x as i128, l_squared);
        let y = self.a.y as i128 + rescale(t, d.y as i128, l_squared);
        Point2I::new(clamp_i32(x), clamp_i32(y))
    }
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Seg( {} {} )", DisplayPoint(&self.a), DisplayPoint(&self.b))
    }
}
