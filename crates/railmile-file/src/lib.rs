//! Railmile 文件处理
//!
//! 支持：
//! - `.dxf` 读取（文字与多段线）
//! - 参考中心线加载
//! - `.toml` 运行配置
//! - `.csv` 报表导出

pub mod config;
pub mod document;
pub mod dxf_io;
pub mod error;
pub mod export;
pub mod extract;
pub mod reference;

pub use config::ExtractConfig;
pub use document::SourceDrawing;
pub use error::FileError;
pub use extract::{Outcome, PolygonSelection};
