//! Railmile 核心引擎
//!
//! 把铁路平面图中的标注点投影到参考中心线上，计算其里程、垂距和左右侧。
//!
//! # 架构设计
//!
//! - `math`: 点/向量类型与容差常量
//! - `geometry`: 点到线段投影、侧别判定、多边形包含测试
//! - `polyline`: 多段线加密与累计长度表
//! - `mileage`: 参考线集合与最近投影搜索
//! - `label`: 从标注文字解析里程
//! - `record`: 报表记录与按里程排序
//!
//! # 示例
//!
//! ```rust
//! use railmile_core::prelude::*;
//!
//! let settings = MileageSettings::default();
//! let line = ReferenceLine::new(
//!     "dl1",
//!     &[Point2::new(0.0, 0.0), Point2::new(100.0, 0.0)],
//!     1000.0,
//!     &settings,
//! );
//! let rails = ReferenceSet::with_lines(vec![line], settings.tolerance);
//!
//! let result = rails.resolve(&Point2::new(50.0, 5.0)).unwrap();
//! assert!((result.mileage - 1050.0).abs() < 1e-6);
//! assert_eq!(result.side, Side::Left);
//! ```

pub mod geometry;
pub mod label;
pub mod math;
pub mod mileage;
pub mod polyline;
pub mod record;

pub mod prelude {
    //! 常用类型的便捷导入
    pub use crate::geometry::{project_point, Polygon, Projection, Segment, Side};
    pub use crate::label::parse_label_mileage;
    pub use crate::math::{BoundingBox2, Point2, Vector2};
    pub use crate::mileage::{MileageResult, MileageSettings, ReferenceLine, ReferenceSet};
    pub use crate::record::{sort_by_mileage, DistanceRow, PolygonRow};
}
