//! 里程投影
//!
//! 参考线（铁路中心线）在加载时加密并计算累计长度表，之后对每个查询点
//! 遍历所有参考线的所有线段，取距离最小的投影：
//!
//! ```text
//! 里程 = 累计长度[i] + |投影点 - 段起点| + 参考线起始里程
//! ```
//!
//! 距离相同时保留先遇到的线段（先按参考线顺序，再按线段序号），
//! 比较使用严格小于。

use crate::geometry::{project_point, Projection, Side};
use crate::math::{distance, Point2, DEFAULT_MAX_SEGMENT_LENGTH, DEFAULT_TOLERANCE};
use crate::polyline::{cumulative_lengths, densify};
use serde::{Deserialize, Serialize};

/// 里程计算参数（配置文件中的 `[geometry]` 段）
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MileageSettings {
    /// 几何容差
    pub tolerance: f64,
    /// 参考线加密阈值
    pub max_segment_length: f64,
}

impl Default for MileageSettings {
    fn default() -> Self {
        Self {
            tolerance: DEFAULT_TOLERANCE,
            max_segment_length: DEFAULT_MAX_SEGMENT_LENGTH,
        }
    }
}

/// 单条参考线上的最近匹配
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineMatch {
    /// 命中线段在加密后多段线中的序号
    pub segment_index: usize,
    /// 投影结果
    pub projection: Projection,
    /// 沿线长度（不含起始里程）
    pub along: f64,
}

/// 参考线：加密后的多段线 + 累计长度表 + 起始里程
#[derive(Debug, Clone, PartialEq)]
pub struct ReferenceLine {
    name: String,
    points: Vec<Point2>,
    cumulative: Vec<f64>,
    offset: f64,
}

impl ReferenceLine {
    /// 由原始顶点构建参考线（内部完成加密和累计长度计算）
    pub fn new(
        name: impl Into<String>,
        vertices: &[Point2],
        offset: f64,
        settings: &MileageSettings,
    ) -> Self {
        let points = densify(vertices, settings.max_segment_length);
        let cumulative = cumulative_lengths(&points);
        Self {
            name: name.into(),
            points,
            cumulative,
            offset,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// 加密后的顶点
    pub fn points(&self) -> &[Point2] {
        &self.points
    }

    /// 累计长度表，与 [`points`](Self::points) 一一对应
    pub fn cumulative_lengths(&self) -> &[f64] {
        &self.cumulative
    }

    /// 参考线总长
    pub fn length(&self) -> f64 {
        self.cumulative.last().copied().unwrap_or(0.0)
    }

    /// 线段数量
    pub fn segment_count(&self) -> usize {
        self.points.len().saturating_sub(1)
    }

    /// 总长小于容差（含少于两个点）的参考线不参与匹配
    pub fn is_degenerate(&self, tolerance: f64) -> bool {
        self.segment_count() == 0 || self.length() < tolerance
    }

    /// 返回本线上距离查询点最近的线段匹配
    pub fn nearest(&self, point: &Point2, tolerance: f64) -> Option<LineMatch> {
        let mut best: Option<LineMatch> = None;
        for (i, pair) in self.points.windows(2).enumerate() {
            let projection = project_point(point, &pair[0], &pair[1], tolerance);
            let better = match &best {
                Some(current) => projection.distance < current.projection.distance,
                None => !projection.distance.is_nan(),
            };
            if better {
                best = Some(LineMatch {
                    segment_index: i,
                    projection,
                    along: self.cumulative[i] + distance(&projection.point, &pair[0]),
                });
            }
        }
        best
    }
}

/// 里程计算结果
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MileageResult {
    /// 里程（米）
    pub mileage: f64,
    /// 到参考线的垂距
    pub distance: f64,
    /// 相对参考线走向的侧别
    pub side: Side,
    /// 命中参考线在集合中的序号
    pub line: usize,
}

/// 参考线集合，每次运行加载一次，之后只读
#[derive(Debug, Clone)]
pub struct ReferenceSet {
    lines: Vec<ReferenceLine>,
    tolerance: f64,
}

impl Default for ReferenceSet {
    fn default() -> Self {
        Self::new(DEFAULT_TOLERANCE)
    }
}

impl ReferenceSet {
    pub fn new(tolerance: f64) -> Self {
        Self {
            lines: Vec::new(),
            tolerance,
        }
    }

    pub fn with_lines(lines: Vec<ReferenceLine>, tolerance: f64) -> Self {
        Self { lines, tolerance }
    }

    /// 追加参考线；追加顺序即同距离时的优先顺序
    pub fn push(&mut self, line: ReferenceLine) {
        self.lines.push(line);
    }

    pub fn lines(&self) -> &[ReferenceLine] {
        &self.lines
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// 计算查询点的里程
    ///
    /// 没有可用参考线时返回 `None`，不会报错。
    pub fn resolve(&self, point: &Point2) -> Option<MileageResult> {
        let mut best: Option<(usize, LineMatch)> = None;
        for (index, line) in self.lines.iter().enumerate() {
            if line.is_degenerate(self.tolerance) {
                continue;
            }
            let Some(candidate) = line.nearest(point, self.tolerance) else {
                continue;
            };
            let better = match &best {
                Some((_, current)) => candidate.projection.distance < current.projection.distance,
                None => true,
            };
            if better {
                best = Some((index, candidate));
            }
        }

        best.map(|(index, found)| MileageResult {
            mileage: found.along + self.lines[index].offset,
            distance: found.projection.distance,
            side: found.projection.side,
            line: index,
        })
    }
}
