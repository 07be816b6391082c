//! ZGEO 核心构造引擎
//!
//! 平面尺规作图的数据模型与纯计算部分。
//!
//! # 架构设计
//!
//! - `element`: 点与引用点的构造元素（直线、圆、平分线、垂线）
//! - `derive`: 从元素集合推导几何图元与交点，不修改集合
//! - `snap`: 以缩放无关的半径捕捉已有点
//! - `history` / `store`: 快照式撤销重做与唯一的元素集合
//!
//! # 示例
//!
//! ```rust
//! use zgeo_core::prelude::*;
//!
//! let mut store = ElementStore::new();
//! let a = Element::new(Geometry::Point(Point::fixed(0.0, 0.0)));
//! let b = Element::new(Geometry::Point(Point::fixed(10.0, 0.0)));
//! let line = Element::new(Geometry::Line(Line::new(a.id, b.id)));
//! store.add_elements_batch(vec![a, b, line]).unwrap();
//!
//! assert_eq!(store.len(), 3);
//! assert!(store.undo());
//! assert!(store.is_empty());
//! ```

pub mod derive;
pub mod element;
pub mod error;
pub mod geometry;
pub mod history;
pub mod math;
pub mod pending;
pub mod snap;
pub mod store;
pub mod tolerance;

pub mod prelude {
    //! 常用类型的便捷导入
    pub use crate::derive::{element_shape, find_intersections, LineLike, LineSample};
    pub use crate::element::{
        AngleBisector, Circle, Element, ElementId, ElementKind, ElementLookup, ElementPatch,
        Geometry, Line, PerpendicularBisector, PerpendicularLine, Point, PointPatch,
    };
    pub use crate::error::StoreError;
    pub use crate::geometry::{CircleShape, InfiniteLine, Shape};
    pub use crate::history::{HistoryManager, MAX_HISTORY_DEPTH};
    pub use crate::math::{Point2, Vector2};
    pub use crate::pending::{
        PendingAngle, PendingConstruction, PendingPerpendicular, StagedPoint, Tool,
    };
    pub use crate::snap::{SnapResolver, SnapTarget};
    pub use crate::store::ElementStore;
    pub use crate::tolerance::ToleranceConfig;
}
