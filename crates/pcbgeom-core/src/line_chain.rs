//! 折线链
//!
//! 圆弧折线逼近和轮廓展开的输出。顶点全部为整数坐标。

use crate::math::{BoundingBox2I, Point2I};
use crate::segment::Segment;
use serde::{Deserialize, Serialize};

/// 折线链
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineChain {
    points: Vec<Point2I>,
    /// 是否闭合
    pub closed: bool,
}

impl LineChain {
    pub fn new() -> Self {
        Self::default()
    }

    /// 从点列表创建
    pub fn from_points(points: impl IntoIterator<Item = Point2I>, closed: bool) -> Self {
        Self {
            points: points.into_iter().collect(),
            closed,
        }
    }

    /// 追加一个点，与末尾点重合时忽略
    pub fn append(&mut self, p: Point2I) {
        if self.points.last() != Some(&p) {
            self.points.push(p);
        }
    }

    /// 首尾重合时去掉末尾点并标记为闭合
    pub fn close_if_looped(&mut self) {
        if self.points.len() > 2 && self.points.first() == self.points.last() {
            self.points.pop();
            self.closed = true;
        }
    }

    /// 追加另一条链的全部点
    pub fn append_chain(&mut self, other: &LineChain) {
        for p in &other.points {
            self.append(*p);
        }
    }

    pub fn points(&self) -> &[Point2I] {
        &self.points
    }

    pub fn into_points(self) -> Vec<Point2I> {
        self.points
    }

    /// 顶点数量
    pub fn point_count(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn first(&self) -> Option<&Point2I> {
        self.points.first()
    }

    pub fn last(&self) -> Option<&Point2I> {
        self.points.last()
    }

    /// 线段数量
    pub fn segment_count(&self) -> usize {
        if self.points.len() < 2 {
            return 0;
        }
        if self.closed {
            self.points.len()
        } else {
            self.points.len() - 1
        }
    }

    /// 第 `index` 段
    pub fn segment(&self, index: usize) -> Option<Segment> {
        if index >= self.segment_count() {
            return None;
        }
        let a = self.points[index];
        let b = self.points[(index + 1) % self.points.len()];
        Some(Segment::new(a, b))
    }

    /// 遍历所有线段
    pub fn segments(&self) -> impl Iterator<Item = Segment> + '_ {
        (0..self.segment_count()).filter_map(move |i| self.segment(i))
    }

    /// 计算总长度
    pub fn length(&self) -> f64 {
        self.segments().map(|s| s.length()).sum()
    }

    /// 点到折线的最短距离
    pub fn distance(&self, p: &Point2I) -> f64 {
        match self.points.len() {
            0 => f64::MAX,
            1 => Segment::new(self.points[0], self.points[0]).distance(p),
            _ => self
                .segments()
                .map(|s| s.distance(p))
                .fold(f64::MAX, f64::min),
        }
    }

    pub fn bounding_box(&self) -> BoundingBox2I {
        BoundingBox2I::from_points(self.points.iter().copied())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::approx_eq;

    fn square() -> LineChain {
        LineChain::from_points(
            [
                Point2I::new(0, 0),
                Point2I::new(100, 0),
                Point2I::new(100, 100),
                Point2I::new(0, 100),
            ],
            true,
        )
    }

    #[test]
    fn test_segments() {
        let mut chain = square();
        assert_eq!(chain.point_count(), 4);
        assert_eq!(chain.segment_count(), 4);
        assert!(approx_eq(chain.length(), 400.0));
        assert_eq!(
            chain.segment(3),
            Some(Segment::new(Point2I::new(0, 100), Point2I::new(0, 0)))
        );

        chain.closed = false;
        assert_eq!(chain.segment_count(), 3);
        assert!(approx_eq(chain.length(), 300.0));
        assert_eq!(chain.segment(3), None);
    }

    #[test]
    fn test_append_skips_duplicates() {
        let mut chain = LineChain::new();
        chain.append(Point2I::new(1, 1));
        chain.append(Point2I::new(1, 1));
        chain.append(Point2I::new(2, 2));
        assert_eq!(chain.point_count(), 2);

        let other = LineChain::from_points([Point2I::new(2, 2), Point2I::new(3, 3)], false);
        chain.append_chain(&other);
        assert_eq!(chain.point_count(), 3);
    }

    #[test]
    fn test_close_if_looped() {
        let mut chain = LineChain::from_points(
            [
                Point2I::new(0, 0),
                Point2I::new(10, 0),
                Point2I::new(10, 10),
                Point2I::new(0, 0),
            ],
            false,
        );
        chain.close_if_looped();
        assert!(chain.closed);
        assert_eq!(chain.point_count(), 3);
        assert_eq!(chain.segment_count(), 3);
    }

    #[test]
    fn test_distance_and_bbox() {
        let chain = square();
        assert!(approx_eq(chain.distance(&Point2I::new(50, 120)), 20.0));
        let bbox = chain.bounding_box();
        assert_eq!(bbox.min, Point2I::new(0, 0));
        assert_eq!(bbox.max, Point2I::new(100, 100));
    }
}
