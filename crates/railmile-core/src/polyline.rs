//! 多段线预处理
//!
//! 参考线在投影前先做加密（每段不超过给定长度），再计算累计弧长表，
//! 这样投影只需在短线段上进行，里程 = 累计长度 + 段内长度。

use crate::math::{distance, lerp, points_coincide, Point2};

/// 加密多段线
///
/// 对长度超过 `max_len` 的每一段插入 `k = floor(len / max_len)` 个内点，
/// 把该段等分为 `k + 1` 份。原始顶点的顺序和首末点保持不变。
/// 少于两个点、或 `max_len` 非正/非有限时原样返回。
pub fn densify(points: &[Point2], max_len: f64) -> Vec<Point2> {
    if points.len() < 2 || !max_len.is_finite() || max_len <= 0.0 {
        return points.to_vec();
    }

    let mut dense = Vec::with_capacity(points.len());
    for pair in points.windows(2) {
        let (a, b) = (&pair[0], &pair[1]);
        dense.push(*a);

        let len = distance(a, b);
        if len > max_len {
            let steps = (len / max_len).floor() as usize;
            let parts = (steps + 1) as f64;
            dense.extend((1..=steps).map(|k| lerp(a, b, k as f64 / parts)));
        }
    }
    // windows(2) 不会推入最后一个点
    if let Some(last) = points.last() {
        dense.push(*last);
    }
    dense
}

/// 累计长度表：第 i 项为顶点 0..=i 之间各段长度之和，首项恒为 0
pub fn cumulative_lengths(points: &[Point2]) -> Vec<f64> {
    let mut cum = Vec::with_capacity(points.len());
    let mut total = 0.0;
    for (i, p) in points.iter().enumerate() {
        if i > 0 {
            total += distance(&points[i - 1], p);
        }
        cum.push(total);
    }
    cum
}

/// 多段线总长
pub fn total_length(points: &[Point2]) -> f64 {
    points.windows(2).map(|w| distance(&w[0], &w[1])).sum()
}

/// 去掉与首点重合的末尾闭合点
pub fn strip_closing_vertex(points: &[Point2], tolerance: f64) -> Vec<Point2> {
    match (points.first(), points.last()) {
        (Some(first), Some(last))
            if points.len() > 1 && points_coincide(first, last, tolerance) =>
        {
            points[..points.len() - 1].to_vec()
        }
        _ => points.to_vec(),
    }
}
