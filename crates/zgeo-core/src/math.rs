//! 数学基础类型
//!
//! 基于 nalgebra 的二维点/向量别名，以及推导引擎共用的容差常量。

/// 二维点
pub type Point2 = nalgebra::Point2<f64>;

/// 二维向量
pub type Vector2 = nalgebra::Vector2<f64>;

/// 通用容差
pub const EPSILON: f64 = 1e-10;

/// 方向向量判零容差（角平分线的反向射线等）
pub const DIRECTION_EPSILON: f64 = 1e-9;

/// 欧氏距离
#[inline]
pub fn distance(a: &Point2, b: &Point2) -> f64 {
    (b - a).norm()
}

/// 中点
#[inline]
pub fn midpoint(a: &Point2, b: &Point2) -> Point2 {
    Point2::new((a.x + b.x) / 2.0, (a.y + b.y) / 2.0)
}

/// 逆时针旋转90°
#[inline]
pub fn perp(v: &Vector2) -> Vector2 {
    Vector2::new(-v.y, v.x)
}

/// 归一化，零向量返回 None
#[inline]
pub fn try_normalize(v: &Vector2, eps: f64) -> Option<Vector2> {
    let len = v.norm();
    if len < eps || !len.is_finite() {
        None
    } else {
        Some(v / len)
    }
}

/// 两点是否在容差范围内重合
#[inline]
pub fn points_coincide(a: &Point2, b: &Point2, tolerance: f64) -> bool {
    distance(a, b) <= tolerance
}
