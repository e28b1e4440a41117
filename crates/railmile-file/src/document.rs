//! 源图纸数据模型
//!
//! 只保留里程提取需要的实体：单行/多行文字和多段线，按图纸中的顺序存放。

use railmile_core::math::Point2;
use std::path::Path;

/// 文字实体类型
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextKind {
    /// 单行文字 (TEXT)
    Single,
    /// 多行文字 (MTEXT)
    Multi,
}

/// 文字标注
#[derive(Debug, Clone, PartialEq)]
pub struct TextLabel {
    /// 插入点
    pub position: Point2,
    /// 文本内容
    pub content: String,
    /// 所属图层
    pub layer: String,
    pub kind: TextKind,
}

impl TextLabel {
    pub fn new(position: Point2, content: impl Into<String>, layer: impl Into<String>) -> Self {
        Self {
            position,
            content: content.into(),
            layer: layer.into(),
            kind: TextKind::Single,
        }
    }

    pub fn with_kind(mut self, kind: TextKind) -> Self {
        self.kind = kind;
        self
    }
}

/// 多段线实体类型
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PolylineKind {
    /// 轻量多段线 (LWPOLYLINE)
    Light,
    /// 传统多段线 (POLYLINE)
    Heavy,
}

/// 多段线（二维顶点）
#[derive(Debug, Clone, PartialEq)]
pub struct PolylineShape {
    pub vertices: Vec<Point2>,
    /// 是否闭合
    pub closed: bool,
    /// 所属图层
    pub layer: String,
    pub kind: PolylineKind,
}

impl PolylineShape {
    pub fn new(vertices: Vec<Point2>, closed: bool, layer: impl Into<String>) -> Self {
        Self {
            vertices,
            closed,
            layer: layer.into(),
            kind: PolylineKind::Light,
        }
    }

    pub fn with_kind(mut self, kind: PolylineKind) -> Self {
        self.kind = kind;
        self
    }
}

/// 文字查询条件
#[derive(Debug, Clone, Copy, Default)]
pub struct TextFilter<'a> {
    /// 限定图层，`None` 表示全部图层
    pub layer: Option<&'a str>,
    /// 是否包含多行文字
    pub include_mtext: bool,
}

impl<'a> TextFilter<'a> {
    pub fn on_layer(layer: Option<&'a str>) -> Self {
        Self {
            layer,
            include_mtext: false,
        }
    }

    pub fn with_mtext(mut self, include: bool) -> Self {
        self.include_mtext = include;
        self
    }

    fn accepts(&self, text: &TextLabel) -> bool {
        layer_matches(self.layer, &text.layer)
            && (self.include_mtext || text.kind == TextKind::Single)
    }
}

fn layer_matches(filter: Option<&str>, layer: &str) -> bool {
    filter.map_or(true, |name| name == layer)
}

/// 源图纸
#[derive(Debug, Default)]
pub struct SourceDrawing {
    texts: Vec<TextLabel>,
    polylines: Vec<PolylineShape>,
}

impl SourceDrawing {
    /// 创建空图纸
    pub fn new() -> Self {
        Self::default()
    }

    /// 从DXF文件加载
    pub fn open(path: impl AsRef<Path>) -> Result<Self, crate::FileError> {
        crate::dxf_io::import(path.as_ref())
    }

    pub fn add_text(&mut self, text: TextLabel) {
        self.texts.push(text);
    }

    pub fn add_polyline(&mut self, polyline: PolylineShape) {
        self.polylines.push(polyline);
    }

    /// 按条件查询文字（保持图纸顺序）
    pub fn texts<'s>(&'s self, filter: TextFilter<'s>) -> impl Iterator<Item = &'s TextLabel> + 's {
        self.texts.iter().filter(move |t| filter.accepts(t))
    }

    /// 按图层查询多段线（保持图纸顺序）
    pub fn polylines<'s>(
        &'s self,
        layer: Option<&'s str>,
    ) -> impl Iterator<Item = &'s PolylineShape> + 's {
        self.polylines
            .iter()
            .filter(move |p| layer_matches(layer, &p.layer))
    }

    pub fn text_count(&self) -> usize {
        self.texts.len()
    }

    pub fn polyline_count(&self) -> usize {
        self.polylines.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> SourceDrawing {
        let mut drawing = SourceDrawing::new();
        drawing.add_text(TextLabel::new(Point2::new(0.0, 0.0), "A", "标注"));
        drawing.add_text(TextLabel::new(Point2::new(1.0, 0.0), "B", "0"));
        drawing.add_text(
            TextLabel::new(Point2::new(2.0, 0.0), "C", "标注").with_kind(TextKind::Multi),
        );
        drawing.add_polyline(PolylineShape::new(
            vec![Point2::new(0.0, 0.0), Point2::new(1.0, 1.0)],
            false,
            "dl1",
        ));
        drawing.add_polyline(
            PolylineShape::new(vec![Point2::new(0.0, 0.0), Point2::new(2.0, 2.0)], false, "dl2")
                .with_kind(PolylineKind::Heavy),
        );
        drawing
    }

    #[test]
    fn test_text_filter() {
        let drawing = sample();
        let names = |filter: TextFilter| -> Vec<String> {
            drawing.texts(filter).map(|t| t.content.clone()).collect()
        };

        assert_eq!(names(TextFilter::default()), ["A", "B"]);
        assert_eq!(names(TextFilter::on_layer(Some("标注"))), ["A"]);
        assert_eq!(
            names(TextFilter::on_layer(Some("标注")).with_mtext(true)),
            ["A", "C"]
        );
        assert!(names(TextFilter::on_layer(Some("missing"))).is_empty());
    }

    #[test]
    fn test_polyline_layer_query() {
        let drawing = sample();
        assert_eq!(drawing.polylines(None).count(), 2);
        assert_eq!(drawing.polylines(Some("dl2")).count(), 1);
        assert_eq!(drawing.text_count(), 3);
        assert_eq!(drawing.polyline_count(), 2);
    }
}
