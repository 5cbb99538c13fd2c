//! 圆
//!
//! 圆与线段、直线、圆的求交，以及由三点或两点加圆心角求圆心。

use crate::math::{
    ki_round, norm, offset_point, resize, to_f64, to_i32, DisplayPoint, Point2, Point2I, Vector2,
};
use crate::segment::Segment;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

/// 圆
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Circle {
    pub center: Point2I,
    pub radius: i32,
}

impl Circle {
    pub fn new(center: Point2I, radius: i32) -> Self {
        Self { center, radius }
    }

    /// 与线段所在无限直线的交点（0~2个）
    pub fn intersect_line(&self, line: &Segment) -> Vec<Point2I> {
        if line.is_degenerate() {
            return Vec::new();
        }

        let dir = line.b - line.a;
        let m = line.line_project(&self.center);
        let om = (m - self.center).cast::<f64>().norm_squared();
        let r = self.radius as f64;
        let r2 = r * r;

        if om == 0.0 {
            // 直线穿过圆心
            let v = resize(&dir, r);
            return vec![
                offset_point(&self.center, &v),
                offset_point(&self.center, &-v),
            ];
        }

        if om > r2 {
            return Vec::new();
        }

        let h = (r2 - om).sqrt();
        if ki_round(h) == 0 {
            return vec![m];
        }

        let unit = dir.cast::<f64>() / norm(&dir);
        let m = to_f64(&m);
        vec![to_i32(&(m + unit * h)), to_i32(&(m - unit * h))]
    }

    /// 与线段的交点（0~2个），只保留落在线段上的点
    pub fn intersect_segment(&self, seg: &Segment) -> Vec<Point2I> {
        self.intersect_line(seg)
            .into_iter()
            .filter(|p| seg.contains(p))
            .collect()
    }

    /// 与另一个圆的交点（0~2个）
    ///
    /// 同心圆不返回交点。
    pub fn intersect_circle(&self, other: &Circle) -> Vec<Point2I> {
        let c2c = (other.center - self.center).cast::<f64>();
        let d = c2c.norm();
        let r1 = self.radius as f64;
        let r2 = other.radius as f64;

        if d == 0.0 || d > r1 + r2 || d < (r1 - r2).abs() {
            return Vec::new();
        }

        let a = (r1 * r1 - r2 * r2 + d * d) / (2.0 * d);
        let h = (r1 * r1 - a * a).max(0.0).sqrt();

        let m = to_f64(&self.center) + c2c * (a / d);
        let perp = Vector2::new(-c2c.y, c2c.x) * (h / d);

        let p1 = to_i32(&(m + perp));
        let p2 = to_i32(&(m - perp));

        if p1 == p2 {
            vec![p1]
        } else {
            vec![p1, p2]
        }
    }

    /// 点是否在圆周上（容许 1 个单位的取整误差）
    pub fn contains(&self, p: &Point2I) -> bool {
        (norm(&(*p - self.center)) - self.radius as f64).abs() <= 1.0
    }
}

impl fmt::Display for Circle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Circle( C={} R={} )", DisplayPoint(&self.center), self.radius)
    }
}

/// 由圆上三点求圆心
///
/// `start == end` 表示整圆，此时圆心取 `start` 与 `mid` 的中点。
/// 三点共线时圆心不存在，返回 `start`/`end` 的中点。
pub fn calc_arc_center(start: &Point2I, mid: &Point2I, end: &Point2I) -> Point2I {
    if start == end {
        return to_i32(&Point2::from((to_f64(start).coords + to_f64(mid).coords) / 2.0));
    }

    let b = to_f64(mid) - to_f64(start);
    let c = to_f64(end) - to_f64(start);
    let d = 2.0 * (b.x * c.y - b.y * c.x);

    if d.abs() < f64::EPSILON {
        debug!(%start, %mid, %end, "collinear arc points, center is undefined");
        return to_i32(&Point2::from((to_f64(start).coords + to_f64(end).coords) / 2.0));
    }

    let b2 = b.norm_squared();
    let c2 = c.norm_squared();
    let ux = (c.y * b2 - b.y * c2) / d;
    let uy = (b.x * c2 - c.x * b2) / d;

    to_i32(&(to_f64(start) + Vector2::new(ux, uy)))
}

/// 由起点、终点和圆心角（度，正为逆时针）求圆心
pub fn calc_arc_center_from_angle(start: &Point2I, end: &Point2I, angle: f64) -> Point2I {
    let (mut start, mut end, mut angle) = (*start, *end, angle);

    if angle < 0.0 {
        std::mem::swap(&mut start, &mut end);
        angle = angle.abs();
    }

    if angle > 180.0 {
        std::mem::swap(&mut start, &mut end);
        angle = 360.0 - angle;
    }

    let half = (angle / 2.0).to_radians().sin();
    if half.abs() < f64::EPSILON {
        debug!(%start, %end, angle, "zero arc angle, center is undefined");
        return to_i32(&Point2::from((to_f64(&start).coords + to_f64(&end).coords) / 2.0));
    }

    let chord = norm(&(end - start));
    let r = (chord / 2.0) / half;

    let dir = (end - start).cast::<f64>();
    let dir = if dir.norm() == 0.0 { dir } else { dir * (r / dir.norm()) };

    let rot = ((180.0 - angle) / 2.0).to_radians();
    let (sin, cos) = rot.sin_cos();
    let v = Vector2::new(dir.x * cos - dir.y * sin, dir.x * sin + dir.y * cos);

    to_i32(&(to_f64(&start) + v))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pt(x: i32, y: i32) -> Point2I {
        Point2I::new(x, y)
    }

    fn near(a: Point2I, b: Point2I, tol: i32) -> bool {
        (a.x - b.x).abs() <= tol && (a.y - b.y).abs() <= tol
    }

    #[test]
    fn test_arc_center_three_points() {
        let c = calc_arc_center(&pt(1000, 0), &pt(707, 707), &pt(0, 1000));
        assert_eq!(c, pt(0, 0));

        let c = calc_arc_center(&pt(600, 500), &pt(500, 600), &pt(400, 500));
        assert_eq!(c, pt(500, 500));
    }

    #[test]
    fn test_arc_center_full_circle() {
        let c = calc_arc_center(&pt(1000, 0), &pt(-1000, 0), &pt(1000, 0));
        assert_eq!(c, pt(0, 0));
    }

    #[test]
    fn test_arc_center_collinear() {
        let c = calc_arc_center(&pt(0, 0), &pt(50, 0), &pt(100, 0));
        assert_eq!(c, pt(50, 0));
    }

    #[test]
    fn test_arc_center_from_angle() {
        let c = calc_arc_center_from_angle(&pt(1000, 0), &pt(0, 1000), 90.0);
        assert!(near(c, pt(0, 0), 1));

        // 大于 180° 时取另一侧
        let c = calc_arc_center_from_angle(&pt(1000, 0), &pt(0, -1000), 270.0);
        assert!(near(c, pt(0, 0), 1));

        // 顺时针
        let c = calc_arc_center_from_angle(&pt(0, 1000), &pt(1000, 0), -90.0);
        assert!(near(c, pt(0, 0), 1));
    }

    #[test]
    fn test_intersect_line() {
        let circle = Circle::new(pt(0, 0), 1000);

        let through = Segment::new(pt(-10, 0), pt(10, 0));
        let mut ips = circle.intersect_line(&through);
        ips.sort_by_key(|p| p.x);
        assert_eq!(ips, vec![pt(-1000, 0), pt(1000, 0)]);

        let secant = Segment::new(pt(-2000, 600), pt(2000, 600));
        let mut ips = circle.intersect_line(&secant);
        ips.sort_by_key(|p| p.x);
        assert_eq!(ips, vec![pt(-800, 600), pt(800, 600)]);

        let tangent = Segment::new(pt(-5, 1000), pt(5, 1000));
        assert_eq!(circle.intersect_line(&tangent), vec![pt(0, 1000)]);

        let miss = Segment::new(pt(-5, 1200), pt(5, 1200));
        assert!(circle.intersect_line(&miss).is_empty());
    }

    #[test]
    fn test_intersect_segment() {
        let circle = Circle::new(pt(0, 0), 1000);
        let half = Segment::new(pt(0, 600), pt(2000, 600));
        assert_eq!(circle.intersect_segment(&half), vec![pt(800, 600)]);
    }

    #[test]
    fn test_intersect_circle() {
        let a = Circle::new(pt(0, 0), 1000);
        let b = Circle::new(pt(1000, 0), 1000);
        let mut ips = a.intersect_circle(&b);
        ips.sort_by_key(|p| p.y);
        assert_eq!(ips, vec![pt(500, -866), pt(500, 866)]);

        let touching = Circle::new(pt(2000, 0), 1000);
        assert_eq!(a.intersect_circle(&touching), vec![pt(1000, 0)]);

        let far = Circle::new(pt(5000, 0), 1000);
        assert!(a.intersect_circle(&far).is_empty());

        let concentric = Circle::new(pt(0, 0), 500);
        assert!(a.intersect_circle(&concentric).is_empty());
    }
}
