//! 推导引擎
//!
//! 把元素集合中的构造元素转换为可求交的图元：
//! - 圆 → [`CircleShape`]（半径每次重新计算）
//! - 类直线元素 → 无限直线采样 {过点, 方向}，再展开为相距很远的两个合成采样点
//!
//! 所有类直线变体都实现同一个能力 [`LineLike`]，命中测试与求交只依赖该能力。
//! 引用缺失、零长度、反向射线等退化情况一律返回 None / 空集合。

use crate::element::{
    AngleBisector, Element, ElementLookup, Geometry, Line, PerpendicularBisector,
    PerpendicularLine,
};
use crate::geometry::{CircleShape, InfiniteLine, Shape};
use crate::math::{
    distance, midpoint, perp, try_normalize, Point2, Vector2, DIRECTION_EPSILON, EPSILON,
};

/// 合成采样点相对参考点的偏移
pub const SYNTHETIC_SAMPLE_OFFSET: f64 = 10_000.0;

/// 垂线引用另一条垂线时允许额外解析的层数
///
/// 垂线 → 垂线 → 直线 可以解析；再多一层垂线则视为没有可推导的方向。
pub const MAX_NESTED_PERPENDICULAR_DEPTH: usize = 1;

/// 无限直线采样：过点 + 单位方向
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineSample {
    pub through: Point2,
    pub direction: Vector2,
}

impl LineSample {
    /// 由过点和任意非零方向创建，方向为零时返回 None
    pub fn new(through: Point2, direction: Vector2) -> Option<Self> {
        if !through.x.is_finite() || !through.y.is_finite() {
            return None;
        }
        try_normalize(&direction, EPSILON).map(|direction| Self { through, direction })
    }

    /// 展开为 `through ± 10000·direction` 两个合成采样点
    pub fn to_infinite_line(&self) -> InfiniteLine {
        InfiniteLine::new(
            self.through - self.direction * SYNTHETIC_SAMPLE_OFFSET,
            self.through + self.direction * SYNTHETIC_SAMPLE_OFFSET,
        )
    }
}

/// 类直线能力
///
/// `depth` 是当前垂线嵌套层数，只有 [`PerpendicularLine`] 使用它。
pub trait LineLike {
    fn line_sample_at_depth(&self, elements: &[Element], depth: usize) -> Option<LineSample>;

    fn line_sample(&self, elements: &[Element]) -> Option<LineSample> {
        self.line_sample_at_depth(elements, 0)
    }
}

impl LineLike for Line {
    fn line_sample_at_depth(&self, elements: &[Element], _depth: usize) -> Option<LineSample> {
        let p1 = elements.point_position(self.p1)?;
        let p2 = elements.point_position(self.p2)?;
        LineSample::new(p1, p2 - p1)
    }
}

impl LineLike for PerpendicularBisector {
    fn line_sample_at_depth(&self, elements: &[Element], _depth: usize) -> Option<LineSample> {
        let p1 = elements.point_position(self.p1)?;
        let p2 = elements.point_position(self.p2)?;
        LineSample::new(midpoint(&p1, &p2), perp(&(p2 - p1)))
    }
}

impl LineLike for PerpendicularLine {
    fn line_sample_at_depth(&self, elements: &[Element], depth: usize) -> Option<LineSample> {
        if depth > MAX_NESTED_PERPENDICULAR_DEPTH {
            return None;
        }
        let through = elements.point_position(self.point)?;
        let reference = elements.element(self.reference)?.as_line_like()?;
        let base = reference.line_sample_at_depth(elements, depth + 1)?;
        LineSample::new(through, perp(&base.direction))
    }
}

impl LineLike for AngleBisector {
    fn line_sample_at_depth(&self, elements: &[Element], _depth: usize) -> Option<LineSample> {
        let vertex = elements.point_position(self.vertex)?;
        let r1 = elements.point_position(self.ray1)?;
        let r2 = elements.point_position(self.ray2)?;

        let u1 = try_normalize(&(r1 - vertex), EPSILON)?;
        let u2 = try_normalize(&(r2 - vertex), EPSILON)?;
        // 反向射线：和向量为零
        let sum = try_normalize(&(u1 + u2), DIRECTION_EPSILON)?;
        LineSample::new(vertex, sum)
    }
}

impl Element {
    /// 类直线能力（点和圆返回 None）
    pub fn as_line_like(&self) -> Option<&dyn LineLike> {
        match &self.geometry {
            Geometry::Line(l) => Some(l as &dyn LineLike),
            Geometry::PerpendicularBisector(b) => Some(b as &dyn LineLike),
            Geometry::PerpendicularLine(pl) => Some(pl as &dyn LineLike),
            Geometry::AngleBisector(ab) => Some(ab as &dyn LineLike),
            Geometry::Point(_) | Geometry::Circle(_) => None,
        }
    }
}

/// 圆的推导
pub fn circle_shape(center: &Point2, radius_point: &Point2) -> Option<CircleShape> {
    let radius = distance(center, radius_point);
    radius.is_finite().then(|| CircleShape::new(*center, radius))
}

/// 元素对应的图元；点以及无法推导的元素返回 None
pub fn element_shape(element: &Element, elements: &[Element]) -> Option<Shape> {
    match &element.geometry {
        Geometry::Point(_) => None,
        Geometry::Circle(c) => {
            let center = elements.point_position(c.center)?;
            let radius_point = elements.point_position(c.radius_point)?;
            circle_shape(&center, &radius_point).map(Shape::Circle)
        }
        _ => element
            .as_line_like()?
            .line_sample(elements)
            .map(|sample| Shape::Line(sample.to_infinite_line())),
    }
}

/// 两个元素的交点
///
/// 与参数顺序无关；任何一方为点或无法推导时返回空集合。
pub fn find_intersections(a: &Element, b: &Element, elements: &[Element]) -> Vec<Point2> {
    if a.is_point() || b.is_point() {
        return vec![];
    }
    let (Some(sa), Some(sb)) = (element_shape(a, elements), element_shape(b, elements)) else {
        return vec![];
    };
    sa.intersect(&sb)
        .into_iter()
        .filter(|p| p.x.is_finite() && p.y.is_finite())
        .collect()
}
