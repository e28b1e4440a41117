//! 运行配置
//!
//! 所有参数（文件路径、参考线图层与起始里程、容差、加密阈值）集中在
//! [`ExtractConfig`] 中，显式传给加载器和计算器。未写出的字段取内置默认值，
//! 默认值即示例工程 `break.dxf` 的配置。

use crate::error::FileError;
use railmile_core::mileage::MileageSettings;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// 配置根结构
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ExtractConfig {
    pub logging: LoggingConfig,
    pub geometry: MileageSettings,
    pub reference: ReferenceConfig,
    pub polygon: PolygonConfig,
    pub distance: DistanceConfig,
}

impl ExtractConfig {
    /// 从TOML文件加载
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, FileError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(FileError::NotFound(path.to_path_buf()));
        }
        let content = fs::read_to_string(path)?;
        Self::from_toml(&content).map_err(|source| FileError::Config {
            path: path.to_path_buf(),
            source,
        })
    }

    /// 从TOML文本解析
    pub fn from_toml(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// 里程计算参数
    pub fn mileage_settings(&self) -> MileageSettings {
        self.geometry
    }
}

/// 日志配置
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

/// 参考线图层及其起始里程（米）
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ReferenceLayer {
    pub name: String,
    pub offset: f64,
}

impl ReferenceLayer {
    pub fn new(name: impl Into<String>, offset: f64) -> Self {
        Self {
            name: name.into(),
            offset,
        }
    }
}

/// 参考图纸配置
///
/// `layers` 的顺序即距离相同时的优先顺序。
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ReferenceConfig {
    pub path: PathBuf,
    pub layers: Vec<ReferenceLayer>,
}

impl Default for ReferenceConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("break.dxf"),
            layers: vec![
                ReferenceLayer::new("dl1", 56700.0),
                ReferenceLayer::new("dl2", 74900.0),
                ReferenceLayer::new("dl3", 100000.0),
                ReferenceLayer::new("dl4", 125000.0),
                ReferenceLayer::new("dl5", 156000.0),
                ReferenceLayer::new("dl6", 163300.0),
            ],
        }
    }
}

/// 多边形记录的里程来源
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MileageSource {
    /// 投影到参考线
    #[default]
    Projection,
    /// 从标注文字解析
    Label,
}

/// 多边形 + 文字提取配置
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PolygonConfig {
    pub input: PathBuf,
    pub output: PathBuf,
    /// 文字图层，`None` 表示全部图层
    pub text_layer: Option<String>,
    /// 多段线图层，`None` 表示全部图层
    pub polygon_layer: Option<String>,
    pub include_mtext: bool,
    pub mileage_source: MileageSource,
}

impl Default for PolygonConfig {
    fn default() -> Self {
        Self {
            input: PathBuf::from("room_and_number.dxf"),
            output: PathBuf::from("room_and_number_extracted.csv"),
            text_layer: None,
            polygon_layer: None,
            include_mtext: false,
            mileage_source: MileageSource::Projection,
        }
    }
}

/// 文字 + 垂距提取配置
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DistanceConfig {
    pub input: PathBuf,
    pub output: PathBuf,
    pub text_layer: Option<String>,
    pub include_mtext: bool,
}

impl Default for DistanceConfig {
    fn default() -> Self {
        Self {
            input: PathBuf::from("break.dxf"),
            output: PathBuf::from("text_distance.csv"),
            text_layer: Some("标注".to_string()),
            include_mtext: false,
        }
    }
}
