//! Railmile 命令行入口
//!
//! 从DXF图纸提取文字标注，投影到铁路中心线计算里程，输出CSV报表。

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use railmile_file::config::{ExtractConfig, MileageSource};
use railmile_file::extract::{run_distance, run_polygon};
use railmile_file::{Outcome, PolygonSelection};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{error, info, warn, Level};
use tracing_subscriber::FmtSubscriber;

#[derive(Parser, Debug)]
#[command(name = "railmile", version)]
#[command(about = "Extract annotations from railway DXF drawings and compute their mileage")]
struct Cli {
    /// TOML 配置文件
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// 日志级别（trace/debug/info/warn/error）
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// 闭合多段线内的文字 → Mileage,Text,Points
    Closed(PolygonArgs),
    /// 四边形多段线内的文字 → Mileage,Text,Points
    Quad(PolygonArgs),
    /// 图层上的文字 → Mileage_m,Distance_m,Side,Text
    Distance(DistanceArgs),
}

#[derive(Args, Debug)]
struct PolygonArgs {
    /// 源图纸
    #[arg(short, long)]
    input: Option<PathBuf>,
    /// 参考中心线图纸
    #[arg(short, long)]
    reference: Option<PathBuf>,
    /// 输出CSV
    #[arg(short, long)]
    output: Option<PathBuf>,
    /// 只取该图层的文字
    #[arg(long)]
    text_layer: Option<String>,
    /// 只取该图层的多段线
    #[arg(long)]
    polygon_layer: Option<String>,
    /// 里程来源
    #[arg(long, value_enum)]
    mileage_from: Option<MileageFrom>,
    /// 同时读取多行文字
    #[arg(long)]
    include_mtext: bool,
}

#[derive(Args, Debug)]
struct DistanceArgs {
    /// 源图纸（可与参考图纸相同）
    #[arg(short, long)]
    input: Option<PathBuf>,
    /// 参考中心线图纸
    #[arg(short, long)]
    reference: Option<PathBuf>,
    /// 输出CSV
    #[arg(short, long)]
    output: Option<PathBuf>,
    /// 文字图层
    #[arg(long)]
    text_layer: Option<String>,
    /// 同时读取多行文字
    #[arg(long)]
    include_mtext: bool,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum MileageFrom {
    /// 投影到参考线
    Projection,
    /// 从文字解析
    Label,
}

impl From<MileageFrom> for MileageSource {
    fn from(value: MileageFrom) -> Self {
        match value {
            MileageFrom::Projection => MileageSource::Projection,
            MileageFrom::Label => MileageSource::Label,
        }
    }
}

impl PolygonArgs {
    fn apply(self, config: &mut ExtractConfig) {
        if let Some(input) = self.input {
            config.polygon.input = input;
        }
        if let Some(reference) = self.reference {
            config.reference.path = reference;
        }
        if let Some(output) = self.output {
            config.polygon.output = output;
        }
        if self.text_layer.is_some() {
            config.polygon.text_layer = self.text_layer;
        }
        if self.polygon_layer.is_some() {
            config.polygon.polygon_layer = self.polygon_layer;
        }
        if let Some(source) = self.mileage_from {
            config.polygon.mileage_source = source.into();
        }
        config.polygon.include_mtext |= self.include_mtext;
    }
}

impl DistanceArgs {
    fn apply(self, config: &mut ExtractConfig) {
        if let Some(input) = self.input {
            config.distance.input = input;
        }
        if let Some(reference) = self.reference {
            config.reference.path = reference;
        }
        if let Some(output) = self.output {
            config.distance.output = output;
        }
        if self.text_layer.is_some() {
            config.distance.text_layer = self.text_layer;
        }
        config.distance.include_mtext |= self.include_mtext;
    }
}

fn load_config(path: Option<&std::path::Path>) -> Result<ExtractConfig> {
    match path {
        Some(path) => ExtractConfig::from_file(path)
            .with_context(|| format!("failed to load config {}", path.display())),
        None => Ok(ExtractConfig::default()),
    }
}

fn init_logging(level: &str) -> Result<()> {
    let level: Level = level
        .parse()
        .with_context(|| format!("invalid log level `{level}`"))?;
    tracing::subscriber::set_global_default(
        FmtSubscriber::builder().with_max_level(level).finish(),
    )?;
    Ok(())
}

fn run(command: Command, mut config: ExtractConfig) -> Result<Outcome> {
    let outcome = match command {
        Command::Closed(args) => {
            args.apply(&mut config);
            run_polygon(&config, PolygonSelection::Closed)?
        }
        Command::Quad(args) => {
            args.apply(&mut config);
            run_polygon(&config, PolygonSelection::Quad)?
        }
        Command::Distance(args) => {
            args.apply(&mut config);
            run_distance(&config)?
        }
    };
    Ok(outcome)
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let mut config = match load_config(cli.config.as_deref()) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("{err:#}");
            return ExitCode::FAILURE;
        }
    };
    if let Some(level) = cli.log_level {
        config.logging.level = level;
    }
    if let Err(err) = init_logging(&config.logging.level) {
        eprintln!("{err:#}");
        return ExitCode::FAILURE;
    }

    info!("Starting railmile...");

    match run(cli.command, config) {
        Ok(Outcome::Written { path, rows }) => {
            info!("[OK] Extracted {} entries -> {}", rows, path.display());
            ExitCode::SUCCESS
        }
        Ok(Outcome::Empty { reason }) => {
            warn!("Nothing written: {}", reason);
            ExitCode::SUCCESS
        }
        Err(err) => {
            error!("{:#}", err);
            ExitCode::FAILURE
        }
    }
}
