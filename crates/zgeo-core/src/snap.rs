//! 捕捉解析
//!
//! 光标坐标（已是世界坐标）→ 半径内最近的已有点（固定点或推导点）。
//! 半径 = 屏幕像素容差 / 当前缩放。
//!
//! 另外提供基于 [`LineLike`](crate::derive::LineLike) 能力与推导图元的命中测试，
//! 供需要选取类直线元素或圆的工具使用。

use crate::derive::element_shape;
use crate::element::{Element, ElementId};
use crate::math::{distance, Point2};
use crate::tolerance::ToleranceConfig;

/// 捕捉结果
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SnapTarget {
    /// 被捕捉的元素
    pub id: ElementId,
    /// 被捕捉点的世界坐标
    pub position: Point2,
    /// 到光标的距离（世界坐标）
    pub distance: f64,
}

/// 捕捉解析器
#[derive(Debug, Clone, Default)]
pub struct SnapResolver {
    config: ToleranceConfig,
}

impl SnapResolver {
    pub fn new(config: ToleranceConfig) -> Self {
        Self { config }
    }

    /// 获取配置
    pub fn config(&self) -> &ToleranceConfig {
        &self.config
    }

    /// 获取配置（可变）
    pub fn config_mut(&mut self) -> &mut ToleranceConfig {
        &mut self.config
    }

    /// 寻找半径内最近的点，距离相同时取集合中靠前的
    pub fn find_snap_point(
        &self,
        cursor: Point2,
        elements: &[Element],
        zoom: f64,
    ) -> Option<SnapTarget> {
        let radius = self.config.snap_radius(zoom);
        nearest_point_within(cursor, elements, radius)
    }

    /// 寻找光标下最近的类直线元素
    pub fn find_line_like_at(
        &self,
        cursor: Point2,
        elements: &[Element],
        zoom: f64,
    ) -> Option<(ElementId, f64)> {
        let radius = self.config.hit_radius(zoom);
        self.nearest_shape(cursor, elements, radius, |e| e.as_line_like().is_some())
    }

    /// 寻找光标下最近的非点元素（直线类或圆）
    pub fn find_shape_at(
        &self,
        cursor: Point2,
        elements: &[Element],
        zoom: f64,
    ) -> Option<(ElementId, f64)> {
        let radius = self.config.hit_radius(zoom);
        self.nearest_shape(cursor, elements, radius, |e| !e.is_point())
    }

    fn nearest_shape(
        &self,
        cursor: Point2,
        elements: &[Element],
        radius: f64,
        accept: impl Fn(&Element) -> bool,
    ) -> Option<(ElementId, f64)> {
        let mut best: Option<(ElementId, f64)> = None;
        for element in elements {
            if !accept(element) {
                continue;
            }
            let Some(shape) = element_shape(element, elements) else {
                continue;
            };
            let dist = shape.distance_to_point(&cursor);
            if dist <= radius && best.map_or(true, |(_, d)| dist < d) {
                best = Some((element.id, dist));
            }
        }
        best
    }
}

/// 半径内最近的点元素
pub fn nearest_point_within(
    cursor: Point2,
    elements: &[Element],
    radius: f64,
) -> Option<SnapTarget> {
    let mut best: Option<SnapTarget> = None;
    for element in elements {
        let Some(point) = element.as_point() else {
            continue;
        };
        let position = point.position();
        let dist = distance(&position, &cursor);
        if dist <= radius && best.map_or(true, |b| dist < b.distance) {
            best = Some(SnapTarget {
                id: element.id,
                position,
                distance: dist,
            });
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::{Circle, Geometry, Line, Point};

    fn point(elements: &mut Vec<Element>, x: f64, y: f64, fixed: bool) -> ElementId {
        let p = if fixed { Point::fixed(x, y) } else { Point::derived(x, y) };
        let e = Element::new(Geometry::Point(p));
        let id = e.id;
        elements.push(e);
        id
    }

    #[test]
    fn test_snap_nearest_within_radius() {
        let mut elements = Vec::new();
        let _a = point(&mut elements, 0.0, 0.0, true);
        let b = point(&mut elements, 4.0, 0.0, false);
        let resolver = SnapResolver::default();

        let target = resolver.find_snap_point(Point2::new(3.0, 0.0), &elements, 1.0).unwrap();
        assert_eq!(target.id, b);
        assert!((target.distance - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_snap_radius_scales_with_zoom() {
        let mut elements = Vec::new();
        let a = point(&mut elements, 0.0, 0.0, true);
        let resolver = SnapResolver::default();

        // 缩放1：10个世界单位以内
        let target = resolver.find_snap_point(Point2::new(8.0, 0.0), &elements, 1.0);
        assert_eq!(target.map(|t| t.id), Some(a));
        // 缩放4：2.5个世界单位以内
        assert!(resolver.find_snap_point(Point2::new(8.0, 0.0), &elements, 4.0).is_none());
        assert!(resolver.find_snap_point(Point2::new(2.0, 0.0), &elements, 4.0).is_some());
    }

    #[test]
    fn test_snap_ignores_non_points() {
        let mut elements = Vec::new();
        let a = point(&mut elements, -50.0, 0.0, true);
        let b = point(&mut elements, 50.0, 0.0, true);
        elements.push(Element::new(Geometry::Line(Line::new(a, b))));
        let resolver = SnapResolver::default();
        assert!(resolver.find_snap_point(Point2::new(0.0, 0.0), &elements, 1.0).is_none());
    }

    #[test]
    fn test_hit_line_like_and_circle() {
        let mut elements = Vec::new();
        let a = point(&mut elements, 0.0, 0.0, true);
        let b = point(&mut elements, 100.0, 0.0, true);
        let line = Element::new(Geometry::Line(Line::new(a, b)));
        let line_id = line.id;
        elements.push(line);
        let c = point(&mut elements, 0.0, 500.0, true);
        let r = point(&mut elements, 0.0, 520.0, true);
        let circle = Element::new(Geometry::Circle(Circle::new(c, r)));
        let circle_id = circle.id;
        elements.push(circle);

        let resolver = SnapResolver::default();
        // 无限直线：远离采样点仍可命中
        let hit = resolver.find_line_like_at(Point2::new(-300.0, 3.0), &elements, 1.0).unwrap();
        assert_eq!(hit.0, line_id);

        assert!(resolver.find_line_like_at(Point2::new(20.0, 500.0), &elements, 1.0).is_none());
        let hit = resolver.find_shape_at(Point2::new(20.0, 502.0), &elements, 1.0).unwrap();
        assert_eq!(hit.0, circle_id);
    }
}
