//! 报表导出
//!
//! 两种CSV格式：
//! - `Mileage,Text,Points`：多边形 + 文字
//! - `Mileage_m,Distance_m,Side,Text`：文字 + 垂距 + 侧别（数值保留三位小数）
//!
//! 缺失的里程/垂距/侧别写为空单元格。

use crate::error::FileError;
use railmile_core::record::{format_points, round3, DistanceRow, PolygonRow};
use std::io::Write;
use std::path::Path;

/// 多边形报表表头
pub const POLYGON_HEADER: [&str; 3] = ["Mileage", "Text", "Points"];

/// 垂距报表表头
pub const DISTANCE_HEADER: [&str; 4] = ["Mileage_m", "Distance_m", "Side", "Text"];

/// 数值单元格：整数值保留 `.0`（`1050.0`），缺失为空
fn number_cell(value: Option<f64>) -> String {
    value.map(|v| format!("{v:?}")).unwrap_or_default()
}

/// 写出多边形报表
pub fn write_polygon_csv<W: Write>(writer: W, rows: &[PolygonRow]) -> Result<(), FileError> {
    let mut csv = csv::Writer::from_writer(writer);
    csv.write_record(POLYGON_HEADER)?;
    for row in rows {
        csv.write_record([
            number_cell(row.mileage),
            row.text.clone(),
            format_points(&row.vertices),
        ])?;
    }
    csv.flush()?;
    Ok(())
}

/// 写出垂距报表
pub fn write_distance_csv<W: Write>(writer: W, rows: &[DistanceRow]) -> Result<(), FileError> {
    let mut csv = csv::Writer::from_writer(writer);
    csv.write_record(DISTANCE_HEADER)?;
    for row in rows {
        csv.write_record([
            number_cell(row.mileage.map(round3)),
            number_cell(row.distance.map(round3)),
            row.side.map(|s| s.as_str().to_string()).unwrap_or_default(),
            row.text.clone(),
        ])?;
    }
    csv.flush()?;
    Ok(())
}

/// 多边形报表写入文件
pub fn polygon_csv_to_file(path: &Path, rows: &[PolygonRow]) -> Result<(), FileError> {
    let file = std::fs::File::create(path)?;
    write_polygon_csv(file, rows)
}

/// 垂距报表写入文件
pub fn distance_csv_to_file(path: &Path, rows: &[DistanceRow]) -> Result<(), FileError> {
    let file = std::fs::File::create(path)?;
    write_distance_csv(file, rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use railmile_core::geometry::Side;
    use railmile_core::math::Point2;

    #[test]
    fn test_polygon_csv() {
        let rows = vec![
            PolygonRow {
                mileage: Some(57012.5),
                text: "101".to_string(),
                vertices: vec![
                    Point2::new(0.0, 0.0),
                    Point2::new(4.0, 0.0),
                    Point2::new(4.0, 3.0),
                    Point2::new(0.0, 3.0),
                ],
            },
            PolygonRow {
                mileage: None,
                text: "值班室, 2".to_string(),
                vertices: vec![Point2::new(1.0, 1.0)],
            },
        ];

        let mut buffer = Vec::new();
        write_polygon_csv(&mut buffer, &rows).unwrap();
        let output = String::from_utf8(buffer).unwrap();

        assert_eq!(
            output,
            "Mileage,Text,Points\n\
             57012.5,101,0.000 0.000;4.000 0.000;4.000 3.000;0.000 3.000\n\
             ,\"值班室, 2\",1.000 1.000\n"
        );
    }

    #[test]
    fn test_distance_csv_rounding() {
        let rows = vec![
            DistanceRow {
                mileage: Some(74912.34567),
                distance: Some(3.14159),
                side: Some(Side::Right),
                text: "信号机".to_string(),
            },
            DistanceRow {
                mileage: None,
                distance: None,
                side: None,
                text: "孤立".to_string(),
            },
        ];

        let mut buffer = Vec::new();
        write_distance_csv(&mut buffer, &rows).unwrap();
        let output = String::from_utf8(buffer).unwrap();
        let lines: Vec<&str> = output.lines().collect();

        assert_eq!(lines[0], "Mileage_m,Distance_m,Side,Text");
        assert_eq!(lines[1], "74912.346,3.142,Right,信号机");
        assert_eq!(lines[2], ",,,孤立");
    }

    #[test]
    fn test_whole_numbers_keep_decimal_point() {
        let distance_rows = vec![DistanceRow {
            mileage: Some(1050.0),
            distance: Some(4.99999999),
            side: Some(Side::Left),
            text: "north".to_string(),
        }];
        let mut buffer = Vec::new();
        write_distance_csv(&mut buffer, &distance_rows).unwrap();
        let output = String::from_utf8(buffer).unwrap();
        assert_eq!(output.lines().nth(1), Some("1050.0,5.0,Left,north"));

        let polygon_rows = vec![PolygonRow {
            mileage: Some(3250.0),
            text: "K3+250".to_string(),
            vertices: vec![Point2::new(0.0, 0.0)],
        }];
        let mut buffer = Vec::new();
        write_polygon_csv(&mut buffer, &polygon_rows).unwrap();
        let output = String::from_utf8(buffer).unwrap();
        assert_eq!(output.lines().nth(1), Some("3250.0,K3+250,0.000 0.000"));
    }
}
