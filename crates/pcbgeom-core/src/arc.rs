//! 圆弧图元
//!
//! 圆弧由起点、弧上中间点、终点三点定义，外加线宽。圆心和半径不单独存储，
//! 每次由三点现算。
//!
//! # 约定
//!
//! - 角度单位为度。
//! - 圆心角为正表示在 y 轴向上的平面上沿 `start → mid → end` 逆时针。
//! - `start == end` 表示整圆，`mid` 为对径点。
//! - 包围盒缓存在图元内，每次变换后重新计算。
//!
//! # 示例
//!
//! ```rust
//! use pcbgeom_core::prelude::*;
//!
//! // 圆心 (0,0)，从 (1000,0) 逆时针扫过 90°
//! let arc = Arc::from_center(Point2I::new(0, 0), Point2I::new(1000, 0), 90.0, 0);
//!
//! assert_eq!(arc.end(), Point2I::new(0, 1000));
//! assert!((arc.central_angle() - 90.0).abs() < 0.1);
//! ```

use crate::angle::{
    normalize_angle_180, normalize_angle_neg, normalize_angle_pos, rotate_point,
    within_wrapped_range,
};
use crate::approx::{arc_to_segment_count_with, circle_to_end_segment_delta_radius};
use crate::circle::{calc_arc_center, calc_arc_center_from_angle, Circle};
use crate::config::{ApproxConfig, MIN_SEGCOUNT_FOR_CIRCLE};
use crate::error::GeometryError;
use crate::line_chain::LineChain;
use crate::math::{
    clamp_i32, ki_round, midpoint, norm, offset_point, polar_angle, BoundingBox2I, DisplayPoint,
    Point2I, Vector2I,
};
use crate::segment::Segment;
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;
use std::fmt;
use tracing::{debug, warn};

/// 碰撞结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Collision {
    /// 实际间距（扣除半线宽，不小于 0）
    pub actual: i32,
    /// 碰撞位置：查询点与圆心的中点（近似值，并非真正的最近点）
    pub location: Point2I,
}

/// 折线逼近结果
#[derive(Debug, Clone, PartialEq)]
pub struct ArcApproximation {
    pub chain: LineChain,
    /// 实际达到的逼近误差
    pub effective_accuracy: f64,
}

/// 圆弧
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "ArcData", into = "ArcData")]
pub struct Arc {
    start: Point2I,
    mid: Point2I,
    end: Point2I,
    width: i32,
    bbox: BoundingBox2I,
}

/// 序列化形式，不含包围盒缓存
#[derive(Serialize, Deserialize)]
struct ArcData {
    start: Point2I,
    mid: Point2I,
    end: Point2I,
    width: i32,
}

impl From<ArcData> for Arc {
    fn from(d: ArcData) -> Self {
        Arc::new(d.start, d.mid, d.end, d.width)
    }
}

impl From<Arc> for ArcData {
    fn from(a: Arc) -> Self {
        ArcData {
            start: a.start,
            mid: a.mid,
            end: a.end,
            width: a.width,
        }
    }
}

impl Arc {
    /// 由三点直接构造
    ///
    /// 不做校验，调用方保证三点共圆。
    pub fn new(start: Point2I, mid: Point2I, end: Point2I, width: i32) -> Self {
        let mut arc = Self {
            start,
            mid,
            end,
            width,
            bbox: BoundingBox2I::empty(),
        };
        arc.update_bbox();
        arc
    }

    /// 由圆心、起点和圆心角构造
    ///
    /// `angle` 为正时逆时针扫过，`±360` 得到整圆。
    pub fn from_center(center: Point2I, start: Point2I, angle: f64, width: i32) -> Self {
        let mid = rotate_point(start, center, -angle / 2.0);
        let end = rotate_point(start, center, -angle);
        Self::new(start, mid, end, width)
    }

    /// 由起点、终点和圆心角构造，圆心由弦长和圆心角推出
    pub fn from_start_end_angle(start: Point2I, end: Point2I, angle: f64, width: i32) -> Self {
        let center = calc_arc_center_from_angle(&start, &end, angle);
        let mid = rotate_point(start, center, -angle / 2.0);
        Self::new(start, mid, end, width)
    }

    /// 由起点、终点、圆心和方向构造
    ///
    /// `clockwise` 为真时取从起点顺时针到终点的那段弧。
    pub fn from_start_end_center(
        start: Point2I,
        end: Point2I,
        center: Point2I,
        clockwise: bool,
        width: i32,
    ) -> Self {
        let start_angle = normalize_angle_pos(polar_angle(&(start - center)));
        let end_angle = normalize_angle_pos(polar_angle(&(end - center)));
        let mut angle = end_angle - start_angle;

        angle = if clockwise {
            normalize_angle_neg(angle)
        } else {
            normalize_angle_pos(angle)
        };

        let mid = rotate_point(start, center, -angle / 2.0);
        Self::new(start, mid, end, width)
    }

    /// 构造与两条线段（延长线）都相切、半径为 `radius` 的圆弧，即倒圆角
    ///
    /// 任一线段长度为零，或两线段延长后仍不相交时返回错误。
    pub fn try_from_tangent_segments(
        seg_a: &Segment,
        seg_b: &Segment,
        radius: i32,
        width: i32,
    ) -> Result<Self, GeometryError> {
        if seg_a.is_degenerate() {
            return Err(GeometryError::ZeroLengthSegment(seg_a.to_string()));
        }
        if seg_b.is_degenerate() {
            return Err(GeometryError::ZeroLengthSegment(seg_b.to_string()));
        }

        let p = seg_a.intersect(seg_b, true, true).ok_or_else(|| {
            GeometryError::NonIntersectingSegments(seg_a.to_string(), seg_b.to_string())
        })?;

        // 从交点指向各线段远端；远端恰为交点时改用近端
        let mut p_to_a = seg_a.b - p;
        let mut p_to_b = seg_b.b - p;

        if p_to_a == Vector2I::zeros() {
            p_to_a = seg_a.a - p;
        }
        if p_to_b == Vector2I::zeros() {
            p_to_b = seg_b.a - p;
        }

        let p_to_a_angle = polar_angle(&p_to_a);
        let p_to_b_angle = polar_angle(&p_to_b);

        let alpha = normalize_angle_180(p_to_a_angle - p_to_b_angle);

        let dist_pc = radius as f64 / (alpha / 2.0).to_radians().sin().abs();
        let ang_pc = (p_to_a_angle - alpha / 2.0).to_radians();

        let center = p + Vector2I::new(
            ki_round(dist_pc * ang_pc.cos()),
            ki_round(dist_pc * ang_pc.sin()),
        );

        // 切点即圆心在两条线上的正交投影
        let start = seg_a.line_project(&center);
        let end = seg_b.line_project(&center);

        let start_angle = polar_angle(&(start - center));
        let end_angle = polar_angle(&(end - center));

        let mid_rot = normalize_angle_180(start_angle - end_angle) / 2.0;
        let mid = rotate_point(start, center, mid_rot);

        Ok(Self::new(start, mid, end, width))
    }

    /// 同 [`Arc::try_from_tangent_segments`]，失败时退化为以 `seg_a` 为直径的半圆
    pub fn from_tangent_segments(
        seg_a: &Segment,
        seg_b: &Segment,
        radius: i32,
        width: i32,
    ) -> Self {
        match Self::try_from_tangent_segments(seg_a, seg_b, radius, width) {
            Ok(arc) => arc,
            Err(e) => {
                warn!(error = %e, "tangent arc construction failed, using half circle over first segment");
                let mid = rotate_point(seg_a.a, seg_a.center(), 90.0);
                Self::new(seg_a.a, mid, seg_a.b, width)
            }
        }
    }

    pub fn start(&self) -> Point2I {
        self.start
    }

    pub fn mid(&self) -> Point2I {
        self.mid
    }

    pub fn end(&self) -> Point2I {
        self.end
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn set_width(&mut self, width: i32) {
        self.width = width;
    }

    /// 是否为整圆
    pub fn is_full_circle(&self) -> bool {
        self.start == self.end
    }

    /// 圆心
    pub fn center(&self) -> Point2I {
        calc_arc_center(&self.start, &self.mid, &self.end)
    }

    /// 半径
    pub fn radius(&self) -> f64 {
        norm(&(self.start - self.center()))
    }

    /// 起点极角，范围 [0, 360)
    pub fn start_angle(&self) -> f64 {
        normalize_angle_pos(polar_angle(&(self.start - self.center())))
    }

    /// 终点极角，范围 [0, 360)
    pub fn end_angle(&self) -> f64 {
        normalize_angle_pos(polar_angle(&(self.end - self.center())))
    }

    /// 带符号的圆心角
    ///
    /// 分成 `start → mid`、`mid → end` 两段各自归一化到 (-180, 180] 后相加，
    /// 超过 180° 的圆弧也能正确表示。整圆返回 ±360，符号取 `start → mid` 半段的方向。
    pub fn central_angle(&self) -> f64 {
        let center = self.center();
        let a0 = polar_angle(&(self.start - center));
        let a1 = polar_angle(&(self.mid - center));

        if self.is_full_circle() {
            // 两个半段都接近 ±180°，浮点误差会让它们互相抵消
            return if normalize_angle_180(a1 - a0) < 0.0 {
                -360.0
            } else {
                360.0
            };
        }

        let a2 = polar_angle(&(self.end - center));

        normalize_angle_180(a1 - a0) + normalize_angle_180(a2 - a1)
    }

    /// 是否顺时针
    pub fn is_clockwise(&self) -> bool {
        self.central_angle() < 0.0
    }

    /// 弧长
    pub fn length(&self) -> f64 {
        self.radius() * PI * self.central_angle().abs() / 180.0
    }

    /// 圆弧所在的完整圆
    pub fn circle(&self) -> Circle {
        Circle::new(self.center(), ki_round(self.radius()))
    }

    /// 包围盒，向外扩大 `clearance`
    pub fn bbox(&self, clearance: i32) -> BoundingBox2I {
        if clearance != 0 {
            self.bbox.inflated(clearance)
        } else {
            self.bbox
        }
    }

    fn update_bbox(&mut self) {
        let mut bbox = BoundingBox2I::from_points([self.start, self.end]);

        let center = self.center();
        let radius = ki_round(self.radius());

        let mut start_angle = self.start_angle();
        let mut end_angle = start_angle + self.central_angle();

        // 象限总是按角度递增方向数
        if start_angle > end_angle {
            std::mem::swap(&mut start_angle, &mut end_angle);
        }

        let quad_start = (start_angle / 90.0).ceil() as i32;
        let quad_end = (end_angle / 90.0).floor() as i32;

        for quad in quad_start..=quad_end {
            let offset = match quad.rem_euclid(4) {
                0 => Vector2I::new(radius, 0),
                1 => Vector2I::new(0, radius),
                2 => Vector2I::new(-radius, 0),
                _ => Vector2I::new(0, -radius),
            };
            bbox.expand_to_include(&offset_point(&center, &offset));
        }

        self.bbox = bbox;
    }

    /// 点到圆弧中心线的距离
    ///
    /// 非整圆时，若点的极角不在圆弧扫过的范围内，改用到较近端点的距离。
    pub fn distance_to_point(&self, p: &Point2I) -> f64 {
        let center = self.center();
        let radius = norm(&(self.start - center));
        let vec = *p - center;

        let mut dist = (norm(&vec) - radius).abs();

        if self.start != self.end {
            let ccw = self.central_angle() > 0.0;
            let start_angle = normalize_angle_pos(polar_angle(&(self.start - center)));
            let end_angle = normalize_angle_pos(polar_angle(&(self.end - center)));

            let rotated_vec_angle =
                normalize_angle_pos(normalize_angle_pos(polar_angle(&vec)) - start_angle);
            let rotated_end_angle = normalize_angle_pos(end_angle - start_angle);

            if (ccw && rotated_vec_angle > rotated_end_angle)
                || (!ccw && rotated_vec_angle < rotated_end_angle)
            {
                let dist_start = norm(&(*p - self.start));
                let dist_end = norm(&(*p - self.end));
                dist = dist_start.min(dist_end);
            }
        }

        dist
    }

    /// 点碰撞检测
    ///
    /// 点到圆弧的距离不超过 `clearance + width / 2` 时返回碰撞结果。
    pub fn collide_point(&self, p: &Point2I, clearance: i32) -> Option<Collision> {
        let half_width = self.width / 2;
        let min_dist = clearance.saturating_add(half_width);

        // 包围盒快速排除
        if !self.bbox(min_dist).contains(p) {
            return None;
        }

        let dist = self.distance_to_point(p);

        if dist <= min_dist as f64 {
            let center = self.center();
            Some(Collision {
                actual: ki_round(dist - half_width as f64).max(0),
                location: midpoint(p, &center),
            })
        } else {
            None
        }
    }

    /// 点是否与圆弧碰撞
    pub fn collides_with_point(&self, p: &Point2I, clearance: i32) -> bool {
        self.collide_point(p, clearance).is_some()
    }

    /// 线段碰撞检测
    ///
    /// 候选点：线段与整圆的交点、线段上离圆心最近的点、线段上离两端点最近的点、
    /// 线段两端点。任一候选点碰撞即返回该候选点的结果。
    pub fn collide_segment(&self, seg: &Segment, clearance: i32) -> Option<Collision> {
        if seg.is_degenerate() {
            return self.collide_point(&seg.a, clearance);
        }

        let center = self.center();
        let mut candidates = self.circle().intersect_segment(seg);

        candidates.push(seg.nearest_point(&center));
        candidates.push(seg.nearest_point(&self.start));
        candidates.push(seg.nearest_point(&self.end));
        candidates.push(seg.a);
        candidates.push(seg.b);

        candidates
            .iter()
            .find_map(|candidate| self.collide_point(candidate, clearance))
    }

    /// 线段是否与圆弧碰撞
    pub fn collides_with_segment(&self, seg: &Segment, clearance: i32) -> bool {
        self.collide_segment(seg, clearance).is_some()
    }

    /// 与线段所在无限直线的交点，只保留落在圆弧上的点
    pub fn intersect_line(&self, seg: &Segment) -> Vec<Point2I> {
        self.circle()
            .intersect_line(seg)
            .into_iter()
            .filter(|p| self.slice_contains_point(p))
            .collect()
    }

    /// 与另一段圆弧的交点
    pub fn intersect_arc(&self, other: &Arc) -> Vec<Point2I> {
        self.circle()
            .intersect_circle(&other.circle())
            .into_iter()
            .filter(|p| self.slice_contains_point(p) && other.slice_contains_point(p))
            .collect()
    }

    /// 点的极角是否落在圆弧扫过的扇区内
    pub fn slice_contains_point(&self, p: &Point2I) -> bool {
        if self.is_full_circle() {
            return true;
        }

        let ca = self.central_angle();
        if ca.abs() >= 360.0 {
            return true;
        }

        let center = self.center();
        let phi = polar_angle(&(*p - center));
        let sa = self.start_angle();

        let (lo, hi) = if ca >= 0.0 { (sa, sa + ca) } else { (sa + ca, sa) };

        within_wrapped_range(phi, lo, hi, 360.0)
    }

    /// 平移
    pub fn translate(&mut self, v: &Vector2I) {
        self.start = offset_point(&self.start, v);
        self.mid = offset_point(&self.mid, v);
        self.end = offset_point(&self.end, v);
        self.update_bbox();
    }

    /// 绕 `center` 逆时针旋转 `angle` 度
    pub fn rotate(&mut self, angle: f64, center: &Point2I) {
        self.start = rotate_point(self.start, *center, -angle);
        self.mid = rotate_point(self.mid, *center, -angle);
        self.end = rotate_point(self.end, *center, -angle);
        self.update_bbox();
    }

    /// 关于过 `reference` 的竖直线（`mirror_x`）和/或水平线（`mirror_y`）镜像
    pub fn mirror(&mut self, mirror_x: bool, mirror_y: bool, reference: &Point2I) {
        for p in [&mut self.start, &mut self.mid, &mut self.end] {
            if mirror_x {
                p.x = clamp_i32(2 * reference.x as i128 - p.x as i128);
            }
            if mirror_y {
                p.y = clamp_i32(2 * reference.y as i128 - p.y as i128);
            }
        }
        self.update_bbox();
    }

    /// 关于任意直线镜像
    pub fn mirror_across(&mut self, axis: &Segment) {
        self.start = axis.reflect_point(&self.start);
        self.mid = axis.reflect_point(&self.mid);
        self.end = axis.reflect_point(&self.end);
        self.update_bbox();
    }

    /// 原地交换起点和终点
    pub fn reverse(&mut self) {
        std::mem::swap(&mut self.start, &mut self.end);
        self.update_bbox();
    }

    /// 返回起终点交换后的新圆弧
    pub fn reversed(&self) -> Self {
        Self::new(self.end, self.mid, self.start, self.width)
    }

    /// 折线逼近，弦与圆弧的最大偏差不超过 `accuracy`
    pub fn to_polyline(&self, accuracy: i32) -> ArcApproximation {
        self.approximate(accuracy as f64, MIN_SEGCOUNT_FOR_CIRCLE)
    }

    /// 按配置做折线逼近
    pub fn to_polyline_with(&self, config: &ApproxConfig) -> ArcApproximation {
        self.approximate(config.max_error as f64, config.min_segments_per_circle)
    }

    fn approximate(&self, accuracy: f64, min_segments_per_circle: usize) -> ArcApproximation {
        let center = self.center();
        let mut r = self.radius();
        let sa = self.start_angle();
        let ca = self.central_angle();

        // 分段数按外沿半径计算，粗线宽小半径时两者差别很大
        let external_radius = r + (self.width / 2) as f64;

        let (mut n, effective_accuracy) = if external_radius < accuracy / 2.0 {
            debug!(external_radius, accuracy, "arc smaller than accuracy, using one segment");
            (0usize, external_radius)
        } else {
            let arc_angle = ca.abs();
            let n = arc_to_segment_count_with(
                external_radius,
                accuracy,
                arc_angle,
                min_segments_per_circle,
            );

            // 分段数取整后实际误差可能小于 accuracy，重新计算
            let seg360 = if arc_angle > 0.0 {
                (n as f64 * 360.0 / arc_angle) as usize
            } else {
                usize::MAX
            };
            (n, circle_to_end_segment_delta_radius(external_radius, seg360))
        };

        // 误差分摊到圆弧两侧：采样半径外扩半个误差带，只取奇数位置的采样点，
        // 使首末两段较短，起点终点恰好落在圆弧上
        r += effective_accuracy / 2.0;
        n *= 2;

        let mut chain = LineChain::new();
        chain.append(self.start);

        for i in (1..n).step_by(2) {
            let a = (sa + ca * i as f64 / n as f64).to_radians();
            chain.append(Point2I::new(
                ki_round(center.x as f64 + r * a.cos()),
                ki_round(center.y as f64 + r * a.sin()),
            ));
        }

        chain.append(self.end);

        ArcApproximation {
            chain,
            effective_accuracy,
        }
    }
}

impl fmt::Display for Arc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Arc( P0={} P1={} Mid={} Width={} )",
            DisplayPoint(&self.start),
            DisplayPoint(&self.end),
            DisplayPoint(&self.mid),
            self.width
        )
    }
}
