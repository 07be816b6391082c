//! 几何图元与交点算法
//!
//! 推导引擎把所有元素归约为两种图元：
//! - 无限直线 (InfiniteLine)，由两个不同的采样点确定
//! - 圆 (CircleShape)
//!
//! 所有函数都是纯函数，退化输入返回空结果，不会产生 NaN/Infinity。

use crate::math::{distance, Point2, Vector2, EPSILON};
use serde::{Deserialize, Serialize};

/// 无限直线
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct InfiniteLine {
    pub a: Point2,
    pub b: Point2,
}

impl InfiniteLine {
    pub fn new(a: Point2, b: Point2) -> Self {
        Self { a, b }
    }

    /// 方向向量（未归一化）
    pub fn direction(&self) -> Vector2 {
        self.b - self.a
    }

    /// 点到无限直线的垂直距离，两点重合时退化为到 `a` 的距离
    pub fn distance_to_point(&self, point: &Point2) -> f64 {
        let d = self.direction();
        let len = d.norm();
        if len < EPSILON {
            return distance(&self.a, point);
        }
        let w = point - self.a;
        (d.x * w.y - d.y * w.x).abs() / len
    }

    /// 点在直线上的投影
    pub fn project(&self, point: &Point2) -> Option<Point2> {
        let d = self.direction();
        let len_sq = d.dot(&d);
        if len_sq < EPSILON {
            return None;
        }
        let t = (point - self.a).dot(&d) / len_sq;
        Some(self.a + d * t)
    }
}

/// 圆
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CircleShape {
    pub center: Point2,
    pub radius: f64,
}

impl CircleShape {
    pub fn new(center: Point2, radius: f64) -> Self {
        Self { center, radius }
    }

    /// 点到圆周的距离（绝对值）
    pub fn distance_to_point(&self, point: &Point2) -> f64 {
        (distance(&self.center, point) - self.radius).abs()
    }
}

/// 推导后的图元
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Shape {
    Line(InfiniteLine),
    Circle(CircleShape),
}

impl Shape {
    /// 点到图元的距离（用于命中测试）
    pub fn distance_to_point(&self, point: &Point2) -> f64 {
        match self {
            Shape::Line(l) => l.distance_to_point(point),
            Shape::Circle(c) => c.distance_to_point(point),
        }
    }

    /// 两个图元的交点，与参数顺序无关
    pub fn intersect(&self, other: &Shape) -> Vec<Point2> {
        match (self, other) {
            (Shape::Line(l1), Shape::Line(l2)) => {
                line_line_intersection(l1, l2).into_iter().collect()
            }
            (Shape::Line(line), Shape::Circle(circle))
            | (Shape::Circle(circle), Shape::Line(line)) => {
                line_circle_intersection(line, circle)
            }
            (Shape::Circle(c1), Shape::Circle(c2)) => circle_circle_intersection(c1, c2),
        }
    }
}

/// 直线-直线交点
///
/// 行列式绝对值小于 1e-10（平行或重合）时无交点。
pub fn line_line_intersection(l1: &InfiniteLine, l2: &InfiniteLine) -> Option<Point2> {
    let d1 = l1.direction();
    let d2 = l2.direction();

    let det = d1.x * d2.y - d1.y * d2.x;
    if det.abs() < EPSILON || !det.is_finite() {
        return None;
    }

    let d = l2.a - l1.a;
    let t = (d.x * d2.y - d.y * d2.x) / det;
    Some(l1.a + d1 * t)
}

/// 直线-圆交点
///
/// 0个（相离）、1个（相切，|d - r| < 1e-10）或2个点。
pub fn line_circle_intersection(line: &InfiniteLine, circle: &CircleShape) -> Vec<Point2> {
    let d = line.direction();
    let len = d.norm();
    if len < EPSILON || !circle.radius.is_finite() {
        return vec![];
    }
    let unit = d / len;

    let Some(closest) = line.project(&circle.center) else {
        return vec![];
    };
    let dist = distance(&closest, &circle.center);

    if dist > circle.radius {
        return vec![];
    }
    if (dist - circle.radius).abs() < EPSILON {
        return vec![closest];
    }

    let half_chord = (circle.radius * circle.radius - dist * dist).sqrt();
    vec![closest + unit * half_chord, closest - unit * half_chord]
}

/// 圆-圆交点（根轴法）
///
/// 相离、内含或同心时无交点，否则返回关于连心线对称的两个点
/// （相切时两点重合）。
pub fn circle_circle_intersection(c1: &CircleShape, c2: &CircleShape) -> Vec<Point2> {
    let dist = distance(&c1.center, &c2.center);

    if dist > c1.radius + c2.radius || dist < (c1.radius - c2.radius).abs() || dist < EPSILON {
        return vec![];
    }

    let a = (c1.radius * c1.radius - c2.radius * c2.radius + dist * dist) / (2.0 * dist);
    let h = (c1.radius * c1.radius - a * a).max(0.0).sqrt();

    let dir = (c2.center - c1.center) / dist;
    let p = c1.center + dir * a;
    let perp = Vector2::new(-dir.y, dir.x);

    vec![p + perp * h, p - perp * h]
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOL: f64 = 1e-6;

    fn line(ax: f64, ay: f64, bx: f64, by: f64) -> InfiniteLine {
        InfiniteLine::new(Point2::new(ax, ay), Point2::new(bx, by))
    }

    #[test]
    fn test_line_line_intersection() {
        let l1 = line(0.0, 0.0, 10.0, 10.0);
        let l2 = line(0.0, 10.0, 10.0, 0.0);
        let p = line_line_intersection(&l1, &l2).unwrap();
        assert!((p.x - 5.0).abs() < TOL);
        assert!((p.y - 5.0).abs() < TOL);
    }

    #[test]
    fn test_line_line_outside_sample_range() {
        // 无限直线：交点在两个采样点之外也应返回
        let l1 = line(0.0, 0.0, 1.0, 0.0);
        let l2 = line(100.0, 5.0, 100.0, 6.0);
        let p = line_line_intersection(&l1, &l2).unwrap();
        assert!((p.x - 100.0).abs() < TOL);
        assert!(p.y.abs() < TOL);
    }

    #[test]
    fn test_parallel_and_coincident_lines() {
        let l1 = line(0.0, 0.0, 10.0, 0.0);
        let l2 = line(0.0, 5.0, 10.0, 5.0);
        assert!(line_line_intersection(&l1, &l2).is_none());

        let l3 = line(3.0, 0.0, 13.0, 0.0);
        assert!(line_line_intersection(&l1, &l3).is_none());
    }

    #[test]
    fn test_line_circle_two_points() {
        let circle = CircleShape::new(Point2::origin(), 10.0);
        let l = line(5.0, -20.0, 5.0, 20.0);
        let pts = line_circle_intersection(&l, &circle);
        assert_eq!(pts.len(), 2);
        let expected = 75f64.sqrt();
        for p in &pts {
            assert!((p.x - 5.0).abs() < TOL);
            assert!((p.y.abs() - expected).abs() < TOL);
            assert!(circle.distance_to_point(p) < TOL);
            assert!(l.distance_to_point(p) < TOL);
        }
        assert!((pts[0].y + pts[1].y).abs() < TOL);
    }

    #[test]
    fn test_line_circle_tangent_and_miss() {
        let circle = CircleShape::new(Point2::origin(), 10.0);
        let tangent = line(10.0, -5.0, 10.0, 5.0);
        let pts = line_circle_intersection(&tangent, &circle);
        assert_eq!(pts.len(), 1);
        assert!((pts[0].x - 10.0).abs() < TOL);
        assert!(pts[0].y.abs() < TOL);

        let miss = line(11.0, -5.0, 11.0, 5.0);
        assert!(line_circle_intersection(&miss, &circle).is_empty());
    }

    #[test]
    fn test_line_circle_degenerate_line() {
        let circle = CircleShape::new(Point2::origin(), 10.0);
        let l = line(1.0, 1.0, 1.0, 1.0);
        assert!(line_circle_intersection(&l, &circle).is_empty());
    }

    #[test]
    fn test_circle_circle_two_points() {
        let c1 = CircleShape::new(Point2::new(0.0, 0.0), 5.0);
        let c2 = CircleShape::new(Point2::new(8.0, 0.0), 5.0);
        let pts = circle_circle_intersection(&c1, &c2);
        assert_eq!(pts.len(), 2);
        for p in &pts {
            assert!(c1.distance_to_point(p) < TOL);
            assert!(c2.distance_to_point(p) < TOL);
        }
        // 关于连心线 y=0 对称
        assert!((pts[0].x - pts[1].x).abs() < TOL);
        assert!((pts[0].y + pts[1].y).abs() < TOL);
        assert!((pts[0].y.abs() - 3.0).abs() < TOL);
    }

    #[test]
    fn test_circle_circle_no_intersection() {
        let c1 = CircleShape::new(Point2::new(0.0, 0.0), 2.0);
        // 相离
        let far = CircleShape::new(Point2::new(10.0, 0.0), 2.0);
        assert!(circle_circle_intersection(&c1, &far).is_empty());
        // 内含
        let containing = CircleShape::new(Point2::new(0.5, 0.0), 10.0);
        assert!(circle_circle_intersection(&c1, &containing).is_empty());
        // 同心
        let concentric = CircleShape::new(Point2::new(0.0, 0.0), 2.0);
        assert!(circle_circle_intersection(&c1, &concentric).is_empty());
    }

    #[test]
    fn test_circle_circle_tangent_returns_two() {
        let c1 = CircleShape::new(Point2::new(0.0, 0.0), 2.0);
        let c2 = CircleShape::new(Point2::new(4.0, 0.0), 2.0);
        let pts = circle_circle_intersection(&c1, &c2);
        assert_eq!(pts.len(), 2);
        for p in &pts {
            assert!(p.x.is_finite() && p.y.is_finite());
            assert!((p.x - 2.0).abs() < TOL);
        }
    }

    #[test]
    fn test_shape_intersect_order_independent() {
        let l = Shape::Line(line(5.0, -20.0, 5.0, 20.0));
        let c = Shape::Circle(CircleShape::new(Point2::origin(), 10.0));
        assert_eq!(l.intersect(&c), c.intersect(&l));
    }
}
