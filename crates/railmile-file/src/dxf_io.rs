//! DXF文件导入
//!
//! 只读取模型空间中的：
//! - TEXT / MTEXT（插入点 + 内容）
//! - LWPOLYLINE / POLYLINE（二维顶点 + 闭合标志）
//!
//! 其他实体类型直接忽略；凸度（bulge）不参与计算，所有线段按直线处理。

use crate::document::{PolylineKind, PolylineShape, SourceDrawing, TextKind, TextLabel};
use crate::error::FileError;
use dxf::entities::{Entity, EntityType};
use railmile_core::math::Point2;
use std::path::Path;
use tracing::debug;

/// 从DXF文件导入
///
/// 文件不存在时在解析前返回 [`FileError::NotFound`]。
pub fn import(path: &Path) -> Result<SourceDrawing, FileError> {
    if !path.exists() {
        return Err(FileError::NotFound(path.to_path_buf()));
    }

    let drawing = dxf::Drawing::load_file(path).map_err(|e| FileError::Dxf {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;

    let document = from_drawing(&drawing)?;

    debug!(
        path = %path.display(),
        texts = document.text_count(),
        polylines = document.polyline_count(),
        "DXF loaded"
    );
    Ok(document)
}

/// 从已解析的DXF图纸构建源图纸
pub fn from_drawing(drawing: &dxf::Drawing) -> Result<SourceDrawing, FileError> {
    let mut document = SourceDrawing::new();

    for entity in drawing.entities() {
        // 图纸空间里是图框和标题栏
        if entity.common.is_in_paper_space {
            continue;
        }
        let layer = entity.common.layer.clone();
        match &entity.specific {
            EntityType::Text(text) => {
                let position = Point2::new(text.location.x, text.location.y);
                document.add_text(TextLabel::new(position, text.value.clone(), layer));
            }

            EntityType::MText(mtext) => {
                let position = Point2::new(mtext.insertion_point.x, mtext.insertion_point.y);
                // 超过250字符的内容前段在 extended_text 中
                let mut content = mtext.extended_text.concat();
                content.push_str(&mtext.text);
                // 报表按单行输出，段落分隔替换为空格
                let content = content.replace("\\P", " ");
                document.add_text(
                    TextLabel::new(position, content, layer).with_kind(TextKind::Multi),
                );
            }

            EntityType::LwPolyline(lwpoly) => {
                let shape = PolylineShape::new(polyline_points(entity)?, lwpoly.is_closed(), layer);
                document.add_polyline(shape);
            }

            EntityType::Polyline(poly) => {
                let shape = PolylineShape::new(polyline_points(entity)?, poly.is_closed(), layer)
                    .with_kind(PolylineKind::Heavy);
                document.add_polyline(shape);
            }

            _ => {}
        }
    }

    Ok(document)
}

/// 将多段线实体投影为二维顶点列表
///
/// 只接受 LWPOLYLINE / POLYLINE，其他类型属于调用方错误。
pub fn polyline_points(entity: &Entity) -> Result<Vec<Point2>, FileError> {
    match &entity.specific {
        EntityType::LwPolyline(lwpoly) => Ok(lwpoly
            .vertices
            .iter()
            .map(|v| Point2::new(v.x, v.y))
            .collect()),

        EntityType::Polyline(poly) => Ok(poly
            .vertices()
            .map(|v| Point2::new(v.location.x, v.location.y))
            .collect()),

        other => Err(FileError::UnsupportedEntity(entity_type_name(other).to_string())),
    }
}

/// DXF实体类型名称（用于错误信息）
fn entity_type_name(specific: &EntityType) -> &'static str {
    match specific {
        EntityType::Line(_) => "LINE",
        EntityType::Circle(_) => "CIRCLE",
        EntityType::Arc(_) => "ARC",
        EntityType::Text(_) => "TEXT",
        EntityType::MText(_) => "MTEXT",
        EntityType::Spline(_) => "SPLINE",
        EntityType::Ellipse(_) => "ELLIPSE",
        EntityType::ModelPoint(_) => "POINT",
        EntityType::Insert(_) => "INSERT",
        EntityType::LwPolyline(_) => "LWPOLYLINE",
        EntityType::Polyline(_) => "POLYLINE",
        _ => "OTHER",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::TextFilter;

    fn lwpolyline(points: &[(f64, f64)], closed: bool, layer: &str) -> Entity {
        let mut lwpoly = dxf::entities::LwPolyline::default();
        lwpoly.set_is_closed(closed);
        lwpoly.vertices = points
            .iter()
            .map(|&(x, y)| {
                let mut vertex = dxf::LwPolylineVertex::default();
                vertex.x = x;
                vertex.y = y;
                vertex
            })
            .collect();
        let mut entity = Entity::new(EntityType::LwPolyline(lwpoly));
        entity.common.layer = layer.to_string();
        entity
    }

    #[test]
    fn test_polyline_points() {
        let entity = lwpolyline(&[(0.0, 0.0), (3.0, 4.0), (5.0, 1.0)], false, "dl1");
        let points = polyline_points(&entity).unwrap();
        assert_eq!(
            points,
            vec![Point2::new(0.0, 0.0), Point2::new(3.0, 4.0), Point2::new(5.0, 1.0)]
        );
    }

    #[test]
    fn test_polyline_points_rejects_other_entities() {
        let mut line = dxf::entities::Line::default();
        line.p2 = dxf::Point::new(1.0, 1.0, 0.0);
        let entity = Entity::new(EntityType::Line(line));

        let err = polyline_points(&entity).unwrap_err();
        assert!(matches!(err, FileError::UnsupportedEntity(ref name) if name == "LINE"));
    }

    #[test]
    fn test_from_drawing_keeps_texts_and_polylines() {
        let mut drawing = dxf::Drawing::new();
        drawing.add_entity(lwpolyline(&[(0.0, 0.0), (10.0, 0.0), (10.0, 10.0)], true, "rooms"));

        let mut text = dxf::entities::Text::default();
        text.location = dxf::Point::new(4.0, 2.0, 0.0);
        text.value = "K1+200".to_string();
        let mut entity = Entity::new(EntityType::Text(text));
        entity.common.layer = "labels".to_string();
        drawing.add_entity(entity);

        let mut circle = dxf::entities::Circle::default();
        circle.radius = 2.0;
        drawing.add_entity(Entity::new(EntityType::Circle(circle)));

        let document = from_drawing(&drawing).unwrap();
        assert_eq!(document.text_count(), 1);
        assert_eq!(document.polyline_count(), 1);

        let shape = document.polylines(Some("rooms")).next().unwrap();
        assert!(shape.closed);
        assert_eq!(shape.vertices.len(), 3);
        assert_eq!(shape.kind, PolylineKind::Light);

        let label = document
            .texts(TextFilter::on_layer(Some("labels")))
            .next()
            .unwrap();
        assert_eq!(label.content, "K1+200");
        assert_eq!(label.position, Point2::new(4.0, 2.0));
    }

    fn text(value: &str, x: f64, y: f64) -> Entity {
        let mut text = dxf::entities::Text::default();
        text.location = dxf::Point::new(x, y, 0.0);
        text.value = value.to_string();
        Entity::new(EntityType::Text(text))
    }

    #[test]
    fn test_from_drawing_skips_paper_space() {
        let mut drawing = dxf::Drawing::new();

        let mut title = text("图签", 10.0, 10.0);
        title.common.is_in_paper_space = true;
        drawing.add_entity(title);

        let mut frame = lwpolyline(&[(0.0, 0.0), (420.0, 0.0), (420.0, 297.0)], true, "0");
        frame.common.is_in_paper_space = true;
        drawing.add_entity(frame);

        drawing.add_entity(text("K2+100", 5.0, 5.0));
        drawing.add_entity(lwpolyline(&[(0.0, 0.0), (8.0, 0.0), (8.0, 8.0)], true, "0"));

        let document = from_drawing(&drawing).unwrap();
        let contents: Vec<&str> = document
            .texts(TextFilter::default())
            .map(|t| t.content.as_str())
            .collect();
        assert_eq!(contents, ["K2+100"]);
        assert_eq!(document.polyline_count(), 1);
        let shape = document.polylines(None).next().unwrap();
        assert_eq!(shape.vertices[1], Point2::new(8.0, 0.0));
    }

    #[test]
    fn test_mtext_joins_extended_chunks() {
        let mut drawing = dxf::Drawing::new();
        let mut mtext = dxf::entities::MText::default();
        mtext.insertion_point = dxf::Point::new(1.0, 2.0, 0.0);
        mtext.extended_text = vec!["设备用房".to_string(), "\\P一层-".to_string()];
        mtext.text = "101".to_string();
        drawing.add_entity(Entity::new(EntityType::MText(mtext)));

        let document = from_drawing(&drawing).unwrap();
        let label = document
            .texts(TextFilter::default().with_mtext(true))
            .next()
            .unwrap();
        assert_eq!(label.content, "设备用房 一层-101");
        assert_eq!(label.kind, TextKind::Multi);
        assert_eq!(label.position, Point2::new(1.0, 2.0));
    }

    #[test]
    fn test_from_drawing_reads_heavy_polyline() {
        let mut drawing = dxf::Drawing::new();
        let mut poly = dxf::entities::Polyline::default();
        poly.set_is_closed(true);
        for &(x, y) in &[(0.0, 0.0), (6.0, 0.0), (6.0, 4.0), (0.0, 4.0)] {
            let vertex = dxf::entities::Vertex::new(dxf::Point::new(x, y, 0.0));
            poly.add_vertex(&mut drawing, vertex);
        }
        let mut entity = Entity::new(EntityType::Polyline(poly));
        entity.common.layer = "dl2".to_string();
        drawing.add_entity(entity);

        let document = from_drawing(&drawing).unwrap();
        let shape = document.polylines(Some("dl2")).next().unwrap();
        assert_eq!(shape.kind, PolylineKind::Heavy);
        assert!(shape.closed);
        assert_eq!(
            shape.vertices,
            vec![
                Point2::new(0.0, 0.0),
                Point2::new(6.0, 0.0),
                Point2::new(6.0, 4.0),
                Point2::new(0.0, 4.0),
            ]
        );
    }

    #[test]
    fn test_import_missing_file() {
        let err = import(Path::new("does/not/exist.dxf")).unwrap_err();
        assert!(matches!(err, FileError::NotFound(_)));
    }
}
