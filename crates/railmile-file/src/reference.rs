//! 参考线加载
//!
//! 每个配置图层取一条多段线（优先 LWPOLYLINE，其次 POLYLINE），加密后
//! 计算累计长度表，连同该图层的起始里程组成一条参考线。缺失的图层只告警
//! 并跳过，不会中断运行。

use crate::config::ReferenceLayer;
use crate::document::{PolylineKind, PolylineShape, SourceDrawing};
use crate::error::FileError;
use railmile_core::mileage::{MileageSettings, ReferenceLine, ReferenceSet};
use std::path::Path;
use tracing::{debug, info, warn};

/// 从已加载的图纸构建参考线集合（按配置顺序）
pub fn load_reference_set(
    drawing: &SourceDrawing,
    layers: &[ReferenceLayer],
    settings: &MileageSettings,
) -> ReferenceSet {
    let mut set = ReferenceSet::new(settings.tolerance);

    for layer in layers {
        let Some(shape) = pick_polyline(drawing, &layer.name) else {
            warn!(layer = %layer.name, "no polyline found on reference layer, skipped");
            continue;
        };
        if shape.vertices.len() < 2 {
            warn!(
                layer = %layer.name,
                vertices = shape.vertices.len(),
                "reference polyline has fewer than two vertices, skipped"
            );
            continue;
        }

        let line = ReferenceLine::new(layer.name.clone(), &shape.vertices, layer.offset, settings);
        debug!(
            layer = %layer.name,
            offset = layer.offset,
            length = line.length(),
            segments = line.segment_count(),
            "reference line loaded"
        );
        set.push(line);
    }

    info!(loaded = set.len(), configured = layers.len(), "reference lines ready");
    set
}

/// 打开参考图纸并构建参考线集合
pub fn open_reference_set(
    path: &Path,
    layers: &[ReferenceLayer],
    settings: &MileageSettings,
) -> Result<ReferenceSet, FileError> {
    let drawing = SourceDrawing::open(path)?;
    Ok(load_reference_set(&drawing, layers, settings))
}

/// 选取图层上的参考多段线：先 LWPOLYLINE 后 POLYLINE，各自按图纸顺序
fn pick_polyline<'a>(drawing: &'a SourceDrawing, layer: &'a str) -> Option<&'a PolylineShape> {
    let of_kind = |kind: PolylineKind| {
        drawing
            .polylines(Some(layer))
            .filter(move |p| p.kind == kind)
    };

    let count = drawing.polylines(Some(layer)).count();
    if count > 1 {
        warn!(layer, count, "several polylines on reference layer, using the first");
    }

    of_kind(PolylineKind::Light)
        .next()
        .or_else(|| of_kind(PolylineKind::Heavy).next())
}
