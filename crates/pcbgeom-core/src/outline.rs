//! 轮廓
//!
//! 由线段和圆弧首尾相接组成的轮廓，例如焊盘或板框的圆角矩形。

use crate::arc::Arc;
use crate::config::ApproxConfig;
use crate::line_chain::LineChain;
use crate::math::{BoundingBox2I, Point2I, Vector2I};
use crate::segment::Segment;
use serde::{Deserialize, Serialize};

/// 轮廓元素
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum OutlineItem {
    Segment(Segment),
    Arc(Arc),
}

impl OutlineItem {
    /// 获取元素的类型名称
    pub fn type_name(&self) -> &'static str {
        match self {
            OutlineItem::Segment(_) => "Segment",
            OutlineItem::Arc(_) => "Arc",
        }
    }

    pub fn start(&self) -> Point2I {
        match self {
            OutlineItem::Segment(s) => s.a,
            OutlineItem::Arc(a) => a.start(),
        }
    }

    pub fn end(&self) -> Point2I {
        match self {
            OutlineItem::Segment(s) => s.b,
            OutlineItem::Arc(a) => a.end(),
        }
    }

    pub fn length(&self) -> f64 {
        match self {
            OutlineItem::Segment(s) => s.length(),
            OutlineItem::Arc(a) => a.length(),
        }
    }

    pub fn bounding_box(&self) -> BoundingBox2I {
        match self {
            OutlineItem::Segment(s) => s.bounding_box(),
            OutlineItem::Arc(a) => a.bbox(0),
        }
    }

    /// 点到元素中心线的距离
    pub fn distance_to_point(&self, p: &Point2I) -> f64 {
        match self {
            OutlineItem::Segment(s) => s.distance(p),
            OutlineItem::Arc(a) => a.distance_to_point(p),
        }
    }
}

/// 轮廓
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Outline {
    items: Vec<OutlineItem>,
}

impl Outline {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_segment(&mut self, seg: Segment) {
        self.items.push(OutlineItem::Segment(seg));
    }

    pub fn push_arc(&mut self, arc: Arc) {
        self.items.push(OutlineItem::Arc(arc));
    }

    pub fn items(&self) -> &[OutlineItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// 首尾是否相接
    pub fn is_closed(&self) -> bool {
        match (self.items.first(), self.items.last()) {
            (Some(first), Some(last)) => first.start() == last.end(),
            _ => false,
        }
    }

    /// 总长度
    pub fn length(&self) -> f64 {
        self.items.iter().map(|i| i.length()).sum()
    }

    pub fn bounding_box(&self) -> BoundingBox2I {
        self.items
            .iter()
            .fold(BoundingBox2I::empty(), |bbox, i| bbox.union(&i.bounding_box()))
    }

    /// 点到轮廓的最短距离
    pub fn distance_to_point(&self, p: &Point2I) -> f64 {
        self.items
            .iter()
            .map(|i| i.distance_to_point(p))
            .fold(f64::MAX, f64::min)
    }

    /// 展开为一条折线，圆弧按 `config` 逼近
    pub fn to_polyline(&self, config: &ApproxConfig) -> LineChain {
        let mut chain = LineChain::new();

        for item in &self.items {
            match item {
                OutlineItem::Segment(s) => {
                    chain.append(s.a);
                    chain.append(s.b);
                }
                OutlineItem::Arc(a) => {
                    chain.append_chain(&a.to_polyline_with(config).chain);
                }
            }
        }

        chain.close_if_looped();
        chain
    }

    /// 以 `center` 为中心、`size` 为外形尺寸、四角圆角半径为 `corner_radius` 的矩形
    ///
    /// 从右边开始逆时针排列。直边长度为零（跑道形）时省略该边，
    /// 圆角半径为零时省略圆弧。
    pub fn rounded_rect(center: Point2I, size: Vector2I, corner_radius: i32, width: i32) -> Self {
        let x_r = center.x + size.x / 2;
        let x_l = center.x - size.x / 2;
        let y_t = center.y + size.y / 2;
        let y_b = center.y - size.y / 2;

        let xin_r = x_r - corner_radius;
        let xin_l = x_l + corner_radius;
        let yin_t = y_t - corner_radius;
        let yin_b = y_b + corner_radius;

        let mut outline = Self::new();

        let edge = |outline: &mut Self, a: (i32, i32), b: (i32, i32)| {
            if a != b {
                outline.push_segment(Segment::new(
                    Point2I::new(a.0, a.1),
                    Point2I::new(b.0, b.1),
                ));
            }
        };

        let corner = |outline: &mut Self, c: (i32, i32), s: (i32, i32)| {
            if corner_radius > 0 {
                outline.push_arc(Arc::from_center(
                    Point2I::new(c.0, c.1),
                    Point2I::new(s.0, s.1),
                    90.0,
                    width,
                ));
            }
        };

        edge(&mut outline, (x_r, yin_b), (x_r, yin_t));
        corner(&mut outline, (xin_r, yin_t), (x_r, yin_t));
        edge(&mut outline, (xin_r, y_t), (xin_l, y_t));
        corner(&mut outline, (xin_l, yin_t), (xin_l, y_t));
        edge(&mut outline, (x_l, yin_t), (x_l, yin_b));
        corner(&mut outline, (xin_l, yin_b), (x_l, yin_b));
        edge(&mut outline, (xin_l, y_b), (xin_r, y_b));
        corner(&mut outline, (xin_r, yin_b), (xin_r, y_b));

        outline
    }
}
