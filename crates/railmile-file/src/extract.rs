//! 提取流程
//!
//! 两类报表：
//! - 多边形报表：选出闭合多段线（或四边形），对其中严格包含的每个文字生成一条记录
//! - 垂距报表：指定图层上的每个文字生成一条记录，附带垂距和左右侧
//!
//! 参考线只加载一次，之后每个点独立计算，互不影响。

use crate::config::{ExtractConfig, MileageSource};
use crate::document::{PolylineShape, SourceDrawing, TextFilter};
use crate::error::FileError;
use crate::export::{distance_csv_to_file, polygon_csv_to_file};
use crate::reference::open_reference_set;
use railmile_core::geometry::Polygon;
use railmile_core::label::{format_chainage, parse_label_mileage};
use railmile_core::mileage::ReferenceSet;
use railmile_core::polyline::strip_closing_vertex;
use railmile_core::record::{sort_by_mileage, DistanceRow, MileageKey, PolygonRow};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// 多段线选取策略
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PolygonSelection {
    /// 闭合多段线（闭合标志或首尾重合），至少3个顶点
    Closed,
    /// 恰好4个不重合顶点的多段线，是否闭合均可
    Quad,
}

impl PolygonSelection {
    /// 判断多段线是否入选，入选时返回构建好的多边形
    pub fn select(&self, shape: &PolylineShape, tolerance: f64) -> Option<Polygon> {
        let ring = strip_closing_vertex(&shape.vertices, tolerance);
        let closed = shape.closed || ring.len() < shape.vertices.len();

        let polygon = Polygon::from_ring(&ring, tolerance)?;
        match self {
            PolygonSelection::Closed if closed => Some(polygon),
            PolygonSelection::Quad
                if polygon.vertex_count() == 4 && !polygon.has_repeated_vertices(tolerance) =>
            {
                Some(polygon)
            }
            _ => None,
        }
    }
}

/// 多边形报表参数
#[derive(Debug, Clone, Copy)]
pub struct PolygonOptions<'a> {
    pub selection: PolygonSelection,
    pub source: MileageSource,
    pub texts: TextFilter<'a>,
    pub polygon_layer: Option<&'a str>,
    pub tolerance: f64,
}

/// 一次运行的结果
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// 已写出报表
    Written { path: PathBuf, rows: usize },
    /// 没有可写的内容，未生成文件
    Empty { reason: String },
}

/// 生成多边形报表记录（已按里程排序）
pub fn extract_polygon_rows(
    drawing: &SourceDrawing,
    references: &ReferenceSet,
    options: &PolygonOptions<'_>,
) -> Vec<PolygonRow> {
    let texts: Vec<_> = drawing.texts(options.texts).collect();
    let mut rows = Vec::new();
    let mut selected = 0usize;

    for shape in drawing.polylines(options.polygon_layer) {
        let Some(polygon) = options.selection.select(shape, options.tolerance) else {
            continue;
        };
        selected += 1;

        for text in texts
            .iter()
            .filter(|t| polygon.contains(&t.position, options.tolerance))
        {
            let mileage = match options.source {
                MileageSource::Projection => references.resolve(&text.position).map(|r| r.mileage),
                MileageSource::Label => parse_label_mileage(&text.content),
            };
            if mileage.is_none() {
                debug!(text = %text.content, "no mileage for text");
            }
            rows.push(PolygonRow {
                mileage,
                text: text.content.clone(),
                vertices: polygon.vertices().to_vec(),
            });
        }
    }

    debug!(
        polygons = selected,
        texts = texts.len(),
        rows = rows.len(),
        "polygon extraction finished"
    );
    sort_by_mileage(&mut rows);
    rows
}

/// 生成垂距报表记录（已按里程排序）
pub fn extract_distance_rows(
    drawing: &SourceDrawing,
    references: &ReferenceSet,
    filter: TextFilter<'_>,
) -> Vec<DistanceRow> {
    let mut rows: Vec<DistanceRow> = drawing
        .texts(filter)
        .map(|text| match references.resolve(&text.position) {
            Some(found) => DistanceRow {
                mileage: Some(found.mileage),
                distance: Some(found.distance),
                side: Some(found.side),
                text: text.content.clone(),
            },
            None => DistanceRow {
                mileage: None,
                distance: None,
                side: None,
                text: text.content.clone(),
            },
        })
        .collect();

    sort_by_mileage(&mut rows);
    rows
}

/// 运行多边形报表提取
pub fn run_polygon(
    config: &ExtractConfig,
    selection: PolygonSelection,
) -> Result<Outcome, FileError> {
    let settings = config.mileage_settings();
    let polygon = &config.polygon;

    let drawing = SourceDrawing::open(&polygon.input)?;
    let references = match polygon.mileage_source {
        MileageSource::Projection => {
            open_reference_set(&config.reference.path, &config.reference.layers, &settings)?
        }
        MileageSource::Label => ReferenceSet::new(settings.tolerance),
    };
    if polygon.mileage_source == MileageSource::Projection && references.is_empty() {
        warn!("no reference lines loaded, every mileage will be empty");
    }

    let options = PolygonOptions {
        selection,
        source: polygon.mileage_source,
        texts: TextFilter::on_layer(polygon.text_layer.as_deref())
            .with_mtext(polygon.include_mtext),
        polygon_layer: polygon.polygon_layer.as_deref(),
        tolerance: settings.tolerance,
    };
    let rows = extract_polygon_rows(&drawing, &references, &options);

    if rows.is_empty() {
        return Ok(Outcome::Empty {
            reason: "no matching polylines with text found".to_string(),
        });
    }

    polygon_csv_to_file(&polygon.output, &rows)?;
    log_summary(&rows, &polygon.output);
    Ok(Outcome::Written {
        path: polygon.output.clone(),
        rows: rows.len(),
    })
}

/// 运行垂距报表提取
pub fn run_distance(config: &ExtractConfig) -> Result<Outcome, FileError> {
    let settings = config.mileage_settings();
    let distance = &config.distance;

    let drawing = SourceDrawing::open(&distance.input)?;
    let filter =
        TextFilter::on_layer(distance.text_layer.as_deref()).with_mtext(distance.include_mtext);
    if drawing.texts(filter).next().is_none() {
        let layer = distance.text_layer.as_deref().unwrap_or("*");
        warn!(layer, "no TEXT found on layer");
        return Ok(Outcome::Empty {
            reason: format!("no text items on layer {layer}"),
        });
    }

    // 参考线与文字可以在同一张图里，避免重复解析
    let references = if same_file(&config.reference.path, &distance.input) {
        crate::reference::load_reference_set(&drawing, &config.reference.layers, &settings)
    } else {
        open_reference_set(&config.reference.path, &config.reference.layers, &settings)?
    };
    if references.is_empty() {
        warn!("no reference lines loaded, every mileage will be empty");
    }

    let rows = extract_distance_rows(&drawing, &references, filter);
    distance_csv_to_file(&distance.output, &rows)?;
    log_summary(&rows, &distance.output);
    Ok(Outcome::Written {
        path: distance.output.clone(),
        rows: rows.len(),
    })
}

fn same_file(a: &Path, b: &Path) -> bool {
    match (a.canonicalize(), b.canonicalize()) {
        (Ok(a), Ok(b)) => a == b,
        _ => a == b,
    }
}

fn log_summary<R: MileageKey>(rows: &[R], output: &Path) {
    let resolved: Vec<f64> = rows.iter().filter_map(|r| r.mileage()).collect();
    let missing = rows.len() - resolved.len();
    // 记录已排序，首尾即范围
    match (resolved.first(), resolved.last()) {
        (Some(first), Some(last)) => info!(
            rows = rows.len(),
            missing,
            from = %format_chainage(*first),
            to = %format_chainage(*last),
            output = %output.display(),
            "report written"
        ),
        _ => info!(rows = rows.len(), missing, output = %output.display(), "report written"),
    }
}
