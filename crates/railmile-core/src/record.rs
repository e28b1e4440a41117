//! 提取结果记录
//!
//! 每条记录在逐点计算阶段生成，写出报表后即丢弃。里程缺失的记录
//! 排在所有有里程的记录之后（视为 +∞），不会被丢弃。

use crate::geometry::Side;
use crate::math::Point2;
use std::cmp::Ordering;

/// 多边形 + 文字记录（`Mileage, Text, Points`）
#[derive(Debug, Clone, PartialEq)]
pub struct PolygonRow {
    pub mileage: Option<f64>,
    pub text: String,
    /// 多边形顶点，保持原始顺序
    pub vertices: Vec<Point2>,
}

/// 文字 + 垂距 + 侧别记录（`Mileage_m, Distance_m, Side, Text`）
#[derive(Debug, Clone, PartialEq)]
pub struct DistanceRow {
    pub mileage: Option<f64>,
    pub distance: Option<f64>,
    pub side: Option<Side>,
    pub text: String,
}

/// 可按里程排序的记录
pub trait MileageKey {
    fn mileage(&self) -> Option<f64>;
}

impl MileageKey for PolygonRow {
    fn mileage(&self) -> Option<f64> {
        self.mileage
    }
}

impl MileageKey for DistanceRow {
    fn mileage(&self) -> Option<f64> {
        self.mileage
    }
}

/// 里程比较：缺失值最大
pub fn compare_mileage(a: Option<f64>, b: Option<f64>) -> Ordering {
    match (a, b) {
        (Some(x), Some(y)) => x.total_cmp(&y),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// 按里程升序稳定排序
pub fn sort_by_mileage<R: MileageKey>(rows: &mut [R]) {
    rows.sort_by(|a, b| compare_mileage(a.mileage(), b.mileage()));
}

/// 保留三位小数
pub fn round3(value: f64) -> f64 {
    (value * 1000.0).round() / 1000.0
}

/// 顶点列表格式化为 `x.xxx y.yyy;x.xxx y.yyy;...`
pub fn format_points(vertices: &[Point2]) -> String {
    vertices
        .iter()
        .map(|p| format!("{:.3} {:.3}", p.x, p.y))
        .collect::<Vec<_>>()
        .join(";")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(mileage: Option<f64>, text: &str) -> DistanceRow {
        DistanceRow {
            mileage,
            distance: None,
            side: None,
            text: text.to_string(),
        }
    }

    #[test]
    fn test_missing_mileage_sorts_last() {
        let mut rows = vec![
            row(None, "a"),
            row(Some(300.0), "b"),
            row(None, "c"),
            row(Some(-5.0), "d"),
            row(Some(120.5), "e"),
        ];
        sort_by_mileage(&mut rows);

        let order: Vec<&str> = rows.iter().map(|r| r.text.as_str()).collect();
        // 缺失里程的记录保持原有先后
        assert_eq!(order, ["d", "e", "b", "a", "c"]);
    }

    #[test]
    fn test_compare_mileage() {
        assert_eq!(compare_mileage(Some(1.0), None), Ordering::Less);
        assert_eq!(compare_mileage(None, None), Ordering::Equal);
        assert_eq!(compare_mileage(Some(2.0), Some(1.0)), Ordering::Greater);
    }

    #[test]
    fn test_format_points() {
        let pts = [Point2::new(1.0, 2.5), Point2::new(-3.14159, 100.0)];
        assert_eq!(format_points(&pts), "1.000 2.500;-3.142 100.000");
        assert_eq!(format_points(&[]), "");
    }

    #[test]
    fn test_round3() {
        assert_eq!(round3(1050.00049), 1050.0);
        assert_eq!(round3(4.99951), 5.0);
    }
}
