//! pcbgeom 核心几何引擎
//!
//! 提供整数坐标下的圆弧图元、碰撞检测和折线逼近。
//!
//! # 架构设计
//!
//! 圆弧以起点、中点、终点三个整数点表示：
//! - `Arc`: 三点圆弧，附带线宽和包围盒缓存
//! - `Segment` / `Circle`: 碰撞与求交用到的基本图元
//! - `LineChain`: 折线逼近的输出
//! - `Outline`: 线段与圆弧组成的轮廓
//!
//! 角度一律以度为单位。
//!
//! # 示例
//!
//! ```rust
//! use pcbgeom_core::prelude::*;
//!
//! // 以原点为圆心、逆时针 90° 的圆弧
//! let arc = Arc::from_center(Point2I::new(0, 0), Point2I::new(10_000, 0), 90.0, 0);
//!
//! println!("Length: {}", arc.length());
//! ```

pub mod angle;
pub mod approx;
pub mod arc;
pub mod circle;
pub mod config;
pub mod error;
pub mod line_chain;
pub mod math;
pub mod outline;
pub mod segment;

pub mod prelude {
    //! 常用类型的便捷导入
    pub use crate::arc::{Arc, ArcApproximation, Collision};
    pub use crate::circle::Circle;
    pub use crate::config::ApproxConfig;
    pub use crate::error::GeometryError;
    pub use crate::line_chain::LineChain;
    pub use crate::math::{BoundingBox2I, Point2I, Vector2I};
    pub use crate::outline::{Outline, OutlineItem};
    pub use crate::segment::Segment;
}
