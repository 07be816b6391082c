//! 构造元素定义
//!
//! 所有元素共享唯一的 [`ElementId`] 和封闭的类型标签 [`ElementKind`]：
//! - 点 (Point)
//! - 直线 (Line)
//! - 圆 (Circle)
//! - 垂直平分线 (PerpendicularBisector)
//! - 垂线 (PerpendicularLine)
//! - 角平分线 (AngleBisector)
//!
//! 除点之外的元素只保存被引用点/元素的 ID，几何量在需要时重新推导。

use crate::math::Point2;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_ELEMENT_ID: AtomicU64 = AtomicU64::new(1);

/// 元素ID
///
/// 进程内单调递增，撤销后也不会复用。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ElementId(u64);

impl ElementId {
    /// 生成新的ID
    pub fn new() -> Self {
        Self(NEXT_ELEMENT_ID.fetch_add(1, Ordering::Relaxed))
    }

    pub fn raw(&self) -> u64 {
        self.0
    }
}

impl Default for ElementId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// 元素类型标签
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ElementKind {
    Point,
    Line,
    Circle,
    PerpendicularBisector,
    PerpendicularLine,
    AngleBisector,
}

impl ElementKind {
    pub fn name(&self) -> &'static str {
        match self {
            ElementKind::Point => "Point",
            ElementKind::Line => "Line",
            ElementKind::Circle => "Circle",
            ElementKind::PerpendicularBisector => "Perpendicular Bisector",
            ElementKind::PerpendicularLine => "Perpendicular Line",
            ElementKind::AngleBisector => "Angle Bisector",
        }
    }

    /// 是否具有无限直线表示
    pub fn is_line_like(&self) -> bool {
        matches!(
            self,
            ElementKind::Line
                | ElementKind::PerpendicularBisector
                | ElementKind::PerpendicularLine
                | ElementKind::AngleBisector
        )
    }
}

/// 点
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
    /// true: 用户放置，可拖动；false: 交点工具推导得到
    pub is_fixed: bool,
    /// 单个字母 A-Z，在带标签的点中唯一
    pub label: Option<char>,
}

impl Point {
    /// 用户放置的点
    pub fn fixed(x: f64, y: f64) -> Self {
        Self {
            x,
            y,
            is_fixed: true,
            label: None,
        }
    }

    /// 交点工具推导的点
    pub fn derived(x: f64, y: f64) -> Self {
        Self {
            x,
            y,
            is_fixed: false,
            label: None,
        }
    }

    pub fn from_point2(position: Point2, is_fixed: bool) -> Self {
        Self {
            x: position.x,
            y: position.y,
            is_fixed,
            label: None,
        }
    }

    pub fn position(&self) -> Point2 {
        Point2::new(self.x, self.y)
    }
}

/// 直线（过两点的无限直线）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Line {
    pub p1: ElementId,
    pub p2: ElementId,
    /// 预留给线段支持，推导时始终按无限直线处理
    pub infinite: bool,
}

impl Line {
    pub fn new(p1: ElementId, p2: ElementId) -> Self {
        Self {
            p1,
            p2,
            infinite: true,
        }
    }
}

/// 圆
///
/// 半径 = 圆心到半径点的距离，每次推导时重新计算。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Circle {
    pub center: ElementId,
    pub radius_point: ElementId,
}

impl Circle {
    pub fn new(center: ElementId, radius_point: ElementId) -> Self {
        Self {
            center,
            radius_point,
        }
    }
}

/// 垂直平分线
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PerpendicularBisector {
    pub p1: ElementId,
    pub p2: ElementId,
}

impl PerpendicularBisector {
    pub fn new(p1: ElementId, p2: ElementId) -> Self {
        Self { p1, p2 }
    }

    /// 是否与给定的无序点对相同
    pub fn spans(&self, a: ElementId, b: ElementId) -> bool {
        (self.p1 == a && self.p2 == b) || (self.p1 == b && self.p2 == a)
    }
}

/// 垂线：过 `point`，垂直于 `reference` 指向的类直线元素
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PerpendicularLine {
    pub point: ElementId,
    pub reference: ElementId,
}

impl PerpendicularLine {
    pub fn new(point: ElementId, reference: ElementId) -> Self {
        Self { point, reference }
    }
}

/// 角平分线
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AngleBisector {
    pub vertex: ElementId,
    pub ray1: ElementId,
    pub ray2: ElementId,
}

impl AngleBisector {
    pub fn new(vertex: ElementId, ray1: ElementId, ray2: ElementId) -> Self {
        Self { vertex, ray1, ray2 }
    }

    /// 顶点相同且射线点为同一无序对
    pub fn spans(&self, vertex: ElementId, a: ElementId, b: ElementId) -> bool {
        self.vertex == vertex
            && ((self.ray1 == a && self.ray2 == b) || (self.ray1 == b && self.ray2 == a))
    }
}

/// 几何类型枚举
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Geometry {
    Point(Point),
    Line(Line),
    Circle(Circle),
    PerpendicularBisector(PerpendicularBisector),
    PerpendicularLine(PerpendicularLine),
    AngleBisector(AngleBisector),
}

impl Geometry {
    pub fn kind(&self) -> ElementKind {
        match self {
            Geometry::Point(_) => ElementKind::Point,
            Geometry::Line(_) => ElementKind::Line,
            Geometry::Circle(_) => ElementKind::Circle,
            Geometry::PerpendicularBisector(_) => ElementKind::PerpendicularBisector,
            Geometry::PerpendicularLine(_) => ElementKind::PerpendicularLine,
            Geometry::AngleBisector(_) => ElementKind::AngleBisector,
        }
    }

    /// 引用的其他元素ID
    pub fn references(&self) -> Vec<ElementId> {
        match self {
            Geometry::Point(_) => vec![],
            Geometry::Line(l) => vec![l.p1, l.p2],
            Geometry::Circle(c) => vec![c.center, c.radius_point],
            Geometry::PerpendicularBisector(b) => vec![b.p1, b.p2],
            Geometry::PerpendicularLine(pl) => vec![pl.point, pl.reference],
            Geometry::AngleBisector(ab) => vec![ab.vertex, ab.ray1, ab.ray2],
        }
    }
}

/// 元素 = ID + 几何
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Element {
    pub id: ElementId,
    #[serde(flatten)]
    pub geometry: Geometry,
}

impl Element {
    /// 使用新生成的ID创建元素
    pub fn new(geometry: Geometry) -> Self {
        Self {
            id: ElementId::new(),
            geometry,
        }
    }

    pub fn kind(&self) -> ElementKind {
        self.geometry.kind()
    }

    pub fn references(&self) -> Vec<ElementId> {
        self.geometry.references()
    }

    pub fn is_point(&self) -> bool {
        matches!(self.geometry, Geometry::Point(_))
    }

    pub fn as_point(&self) -> Option<&Point> {
        match &self.geometry {
            Geometry::Point(p) => Some(p),
            _ => None,
        }
    }
}

/// 按ID查询元素的只读视图
pub trait ElementLookup {
    fn element(&self, id: ElementId) -> Option<&Element>;

    /// 点元素的坐标；ID 不存在或不是点时返回 None
    fn point_position(&self, id: ElementId) -> Option<Point2> {
        self.element(id)
            .and_then(Element::as_point)
            .map(Point::position)
    }
}

impl ElementLookup for [Element] {
    fn element(&self, id: ElementId) -> Option<&Element> {
        self.iter().find(|e| e.id == id)
    }
}

/// 元素局部更新，变体必须与现有元素的类型一致
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PointPatch {
    pub x: Option<f64>,
    pub y: Option<f64>,
    pub label: Option<Option<char>>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ElementPatch {
    Point(PointPatch),
    Line {
        p1: Option<ElementId>,
        p2: Option<ElementId>,
        infinite: Option<bool>,
    },
    Circle {
        center: Option<ElementId>,
        radius_point: Option<ElementId>,
    },
    PerpendicularBisector {
        p1: Option<ElementId>,
        p2: Option<ElementId>,
    },
    PerpendicularLine {
        point: Option<ElementId>,
        reference: Option<ElementId>,
    },
    AngleBisector {
        vertex: Option<ElementId>,
        ray1: Option<ElementId>,
        ray2: Option<ElementId>,
    },
}

impl ElementPatch {
    /// 把点移动到新位置
    pub fn move_point(position: Point2) -> Self {
        ElementPatch::Point(PointPatch {
            x: Some(position.x),
            y: Some(position.y),
            label: None,
        })
    }

    pub fn kind(&self) -> ElementKind {
        match self {
            ElementPatch::Point(_) => ElementKind::Point,
            ElementPatch::Line { .. } => ElementKind::Line,
            ElementPatch::Circle { .. } => ElementKind::Circle,
            ElementPatch::PerpendicularBisector { .. } => ElementKind::PerpendicularBisector,
            ElementPatch::PerpendicularLine { .. } => ElementKind::PerpendicularLine,
            ElementPatch::AngleBisector { .. } => ElementKind::AngleBisector,
        }
    }

    /// 应用到几何上；类型不匹配时返回 false 且不做任何修改
    pub fn apply(&self, geometry: &mut Geometry) -> bool {
        fn set<T: Clone>(slot: &mut T, value: &Option<T>) {
            if let Some(v) = value {
                *slot = v.clone();
            }
        }

        match (self, geometry) {
            (ElementPatch::Point(patch), Geometry::Point(p)) => {
                set(&mut p.x, &patch.x);
                set(&mut p.y, &patch.y);
                set(&mut p.label, &patch.label);
            }
            (ElementPatch::Line { p1, p2, infinite }, Geometry::Line(l)) => {
                set(&mut l.p1, p1);
                set(&mut l.p2, p2);
                set(&mut l.infinite, infinite);
            }
            (
                ElementPatch::Circle {
                    center,
                    radius_point,
                },
                Geometry::Circle(c),
            ) => {
                set(&mut c.center, center);
                set(&mut c.radius_point, radius_point);
            }
            (
                ElementPatch::PerpendicularBisector { p1, p2 },
                Geometry::PerpendicularBisector(b),
            ) => {
                set(&mut b.p1, p1);
                set(&mut b.p2, p2);
            }
            (
                ElementPatch::PerpendicularLine { point, reference },
                Geometry::PerpendicularLine(pl),
            ) => {
                set(&mut pl.point, point);
                set(&mut pl.reference, reference);
            }
            (ElementPatch::AngleBisector { vertex, ray1, ray2 }, Geometry::AngleBisector(ab)) => {
                set(&mut ab.vertex, vertex);
                set(&mut ab.ray1, ray1);
                set(&mut ab.ray2, ray2);
            }
            _ => return false,
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_are_unique() {
        let a = ElementId::new();
        let b = ElementId::new();
        assert_ne!(a, b);
        assert!(b > a);
    }

    #[test]
    fn test_references() {
        let (v, r1, r2) = (ElementId::new(), ElementId::new(), ElementId::new());
        let ab = Element::new(Geometry::AngleBisector(AngleBisector::new(v, r1, r2)));
        assert_eq!(ab.references(), vec![v, r1, r2]);
        assert!(ab.kind().is_line_like());

        let p = Element::new(Geometry::Point(Point::fixed(1.0, 2.0)));
        assert!(p.references().is_empty());
        assert!(!p.kind().is_line_like());
    }

    #[test]
    fn test_bisector_spans_unordered_pair() {
        let (a, b, c) = (ElementId::new(), ElementId::new(), ElementId::new());
        let bis = PerpendicularBisector::new(a, b);
        assert!(bis.spans(a, b));
        assert!(bis.spans(b, a));
        assert!(!bis.spans(a, c));

        let ang = AngleBisector::new(a, b, c);
        assert!(ang.spans(a, c, b));
        assert!(!ang.spans(b, a, c));
    }

    #[test]
    fn test_patch_kind_mismatch() {
        let mut geometry = Geometry::Circle(Circle::new(ElementId::new(), ElementId::new()));
        let before = geometry.clone();
        assert!(!ElementPatch::move_point(Point2::new(1.0, 1.0)).apply(&mut geometry));
        assert_eq!(geometry, before);
    }

    #[test]
    fn test_patch_point() {
        let mut geometry = Geometry::Point(Point::fixed(0.0, 0.0));
        assert!(ElementPatch::move_point(Point2::new(3.0, 4.0)).apply(&mut geometry));
        match geometry {
            Geometry::Point(p) => {
                assert_eq!((p.x, p.y), (3.0, 4.0));
                assert!(p.is_fixed);
            }
            _ => unreachable!(),
        }
    }

    #[test]
    fn test_serialize_tagged() {
        let e = Element::new(Geometry::Point(Point::fixed(1.0, 2.0)));
        let json = serde_json::to_value(&e).unwrap();
        assert_eq!(json["type"], "Point");
        assert_eq!(json["x"], 1.0);
        let back: Element = serde_json::from_value(json).unwrap();
        assert_eq!(back, e);
    }
}
