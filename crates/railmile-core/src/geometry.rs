//! 几何图元定义
//!
//! - 线段 (Segment) 与点到线段的投影
//! - 左右侧判定 (Side)
//! - 多边形 (Polygon) 与严格包含测试
//!
//! 所有线段均按直线处理，不考虑凸度（bulge）。

use crate::math::{distance, lerp, points_coincide, BoundingBox2, Point2, Vector2};
use std::fmt;

/// 点相对于线段走向（A→B）的位置
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    Left,
    Right,
    On,
}

impl Side {
    /// 根据叉积符号判定侧别：正为左，负为右，绝对值小于容差为线上
    pub fn from_cross(cross: f64, tolerance: f64) -> Self {
        if cross > tolerance {
            Side::Left
        } else if cross < -tolerance {
            Side::Right
        } else {
            Side::On
        }
    }

    /// 反转走向后的侧别
    pub fn flipped(self) -> Self {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
            Side::On => Side::On,
        }
    }

    /// 报表中使用的名称
    pub fn as_str(&self) -> &'static str {
        match self {
            Side::Left => "Left",
            Side::Right => "Right",
            Side::On => "On",
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 点到线段的投影结果
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projection {
    /// 线段上的投影点
    pub point: Point2,
    /// 截断到 [0, 1] 的线段参数
    pub t: f64,
    /// 查询点到投影点的距离
    pub distance: f64,
    /// 查询点所在侧
    pub side: Side,
}

/// 将点投影到线段 A-B 上
///
/// 线段长度小于 `tolerance` 时整段视为点 A，侧别为 [`Side::On`]。
/// 否则参数 t 截断到 [0, 1]，侧别取
/// `(B-A).x * (P.y - Q.y) - (B-A).y * (P.x - Q.x)` 的符号，Q 为投影点。
pub fn project_point(point: &Point2, a: &Point2, b: &Point2, tolerance: f64) -> Projection {
    let ab: Vector2 = b - a;
    let length = ab.norm();
    if length < tolerance {
        return Projection {
            point: *a,
            t: 0.0,
            distance: distance(point, a),
            side: Side::On,
        };
    }

    let t = (point - a).dot(&ab) / (length * length);
    let (projected, t) = if t < 0.0 {
        (*a, 0.0)
    } else if t > 1.0 {
        (*b, 1.0)
    } else {
        (lerp(a, b, t), t)
    };

    let cross = ab.x * (point.y - projected.y) - ab.y * (point.x - projected.x);

    Projection {
        point: projected,
        t,
        distance: distance(point, &projected),
        side: Side::from_cross(cross, tolerance),
    }
}

/// 线段
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    pub start: Point2,
    pub end: Point2,
}

impl Segment {
    pub fn new(start: Point2, end: Point2) -> Self {
        Self { start, end }
    }

    /// 反向线段
    pub fn reversed(&self) -> Self {
        Self::new(self.end, self.start)
    }

    /// 将点投影到本线段
    pub fn project(&self, point: &Point2, tolerance: f64) -> Projection {
        project_point(point, &self.start, &self.end, tolerance)
    }
}

/// 简单多边形（顶点环，不含重复的闭合点）
#[derive(Debug, Clone, PartialEq)]
pub struct Polygon {
    vertices: Vec<Point2>,
    bbox: BoundingBox2,
}

impl Polygon {
    /// 由顶点环构建多边形
    ///
    /// 末尾与首点重合的闭合点会被去掉；不足3个顶点时返回 `None`。
    pub fn from_ring(points: &[Point2], tolerance: f64) -> Option<Self> {
        let vertices = crate::polyline::strip_closing_vertex(points, tolerance);
        if vertices.len() < 3 {
            return None;
        }
        let bbox = BoundingBox2::from_points(&vertices);
        Some(Self { vertices, bbox })
    }

    /// 顶点（保持原始顺序）
    pub fn vertices(&self) -> &[Point2] {
        &self.vertices
    }

    /// 顶点数量
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// 依次返回各条边（含首尾闭合边）
    pub fn edges(&self) -> impl Iterator<Item = Segment> + '_ {
        let n = self.vertices.len();
        (0..n).map(move |i| Segment::new(self.vertices[i], self.vertices[(i + 1) % n]))
    }

    /// 点到多边形边界的最短距离
    pub fn boundary_distance(&self, point: &Point2, tolerance: f64) -> f64 {
        self.edges()
            .map(|edge| edge.project(point, tolerance).distance)
            .fold(f64::INFINITY, f64::min)
    }

    /// 严格包含测试：边界容差范围内的点视为不包含
    pub fn contains(&self, point: &Point2, tolerance: f64) -> bool {
        if !self.bbox.contains(point) {
            return false;
        }
        if self.boundary_distance(point, tolerance) < tolerance {
            return false;
        }
        parry2d_f64::utils::point_in_poly2d(point, &self.vertices)
    }

    /// 是否有首尾以外的重合顶点
    pub fn has_repeated_vertices(&self, tolerance: f64) -> bool {
        self.vertices
            .iter()
            .enumerate()
            .any(|(i, a)| self.vertices[i + 1..].iter().any(|b| points_coincide(a, b, tolerance)))
    }
}
