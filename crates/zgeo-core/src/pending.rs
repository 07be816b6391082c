//! 当前工具与进行中的构造
//!
//! 多次点击的工具在两次点击之间保存的暂存数据。每个工具只携带自己需要的字段，
//! 暂存的新点在提交前不属于元素集合。

use crate::element::{Element, ElementId, Geometry, Point};
use crate::math::Point2;
use serde::{Deserialize, Serialize};

/// 当前工具
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Tool {
    #[default]
    Select,
    Point,
    Line,
    Circle,
    PerpendicularBisector,
    PerpendicularLine,
    AngleBisector,
    Intersection,
}

impl Tool {
    pub fn name(&self) -> &'static str {
        match self {
            Tool::Select => "Select",
            Tool::Point => "Point",
            Tool::Line => "Line",
            Tool::Circle => "Circle",
            Tool::PerpendicularBisector => "Perpendicular Bisector",
            Tool::PerpendicularLine => "Perpendicular Line",
            Tool::AngleBisector => "Angle Bisector",
            Tool::Intersection => "Intersection",
        }
    }

    /// 获取快捷键
    pub fn shortcut(&self) -> Option<&'static str> {
        match self {
            Tool::Select => Some("Space"),
            Tool::Point => Some("."),
            Tool::Line => Some("L"),
            Tool::Circle => Some("C"),
            Tool::PerpendicularBisector => Some("B"),
            Tool::PerpendicularLine => Some("P"),
            Tool::AngleBisector => Some("A"),
            Tool::Intersection => Some("I"),
        }
    }

    pub fn all() -> [Tool; 8] {
        [
            Tool::Select,
            Tool::Point,
            Tool::Line,
            Tool::Circle,
            Tool::PerpendicularBisector,
            Tool::PerpendicularLine,
            Tool::AngleBisector,
            Tool::Intersection,
        ]
    }
}

/// 暂存的点：已有点，或尚未提交的新点
#[derive(Debug, Clone, PartialEq)]
pub struct StagedPoint {
    pub element: Element,
    pub is_new: bool,
}

impl StagedPoint {
    /// 已存在于集合中的点
    pub fn existing(element: Element) -> Self {
        Self {
            element,
            is_new: false,
        }
    }

    /// 新建的固定点（ID 预先生成）
    pub fn new_fixed(position: Point2) -> Self {
        Self {
            element: Element::new(Geometry::Point(Point::from_point2(position, true))),
            is_new: true,
        }
    }

    pub fn id(&self) -> ElementId {
        self.element.id
    }

    pub fn position(&self) -> Point2 {
        self.element
            .as_point()
            .map(Point::position)
            .unwrap_or_else(Point2::origin)
    }
}

/// 垂线工具：先选点或先选直线均可
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PendingPerpendicular {
    Point { point: ElementId },
    Line { line: ElementId },
}

/// 角平分线工具的进度
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PendingAngle {
    Vertex { vertex: ElementId },
    FirstRay { vertex: ElementId, ray1: ElementId },
}

/// 进行中的构造
#[derive(Debug, Clone, PartialEq)]
pub enum PendingConstruction {
    Line { first: StagedPoint },
    Circle { center: StagedPoint },
    PerpendicularBisector { first: ElementId },
    PerpendicularLine(PendingPerpendicular),
    AngleBisector(PendingAngle),
}

impl PendingConstruction {
    /// 对应的工具
    pub fn tool(&self) -> Tool {
        match self {
            PendingConstruction::Line { .. } => Tool::Line,
            PendingConstruction::Circle { .. } => Tool::Circle,
            PendingConstruction::PerpendicularBisector { .. } => Tool::PerpendicularBisector,
            PendingConstruction::PerpendicularLine(_) => Tool::PerpendicularLine,
            PendingConstruction::AngleBisector(_) => Tool::AngleBisector,
        }
    }

    /// 暂存的新点（预览用）
    pub fn staged_new_points(&self) -> Vec<&Element> {
        match self {
            PendingConstruction::Line { first: staged }
            | PendingConstruction::Circle { center: staged }
                if staged.is_new =>
            {
                vec![&staged.element]
            }
            _ => vec![],
        }
    }
}
