//! 标注文字中的里程解析
//!
//! 支持两种写法，按优先级：
//! 1. 公里标：`K12+345`、`12+345.5`，里程 = 公里 × 1000 + 米
//! 2. 普通数字：取文字中第一个十进制数，如 `途7.5m` → 7.5

use once_cell::sync::Lazy;
use regex::Regex;

static CHAINAGE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[Kk]?(\d+)\+(\d+(?:\.\d+)?)").expect("valid chainage regex"));

static NUMBER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\d+(?:\.\d+)?").expect("valid number regex"));

/// 从标注文字解析里程（米），无法解析时返回 `None`
pub fn parse_label_mileage(text: &str) -> Option<f64> {
    if let Some(caps) = CHAINAGE_RE.captures(text) {
        let km: f64 = caps[1].parse().ok()?;
        let metres: f64 = caps[2].parse().ok()?;
        return Some(km * 1000.0 + metres);
    }

    NUMBER_RE
        .find(text)
        .and_then(|m| m.as_str().parse::<f64>().ok())
}

/// 以公里标格式输出里程，如 `K12+345.000`
pub fn format_chainage(mileage: f64) -> String {
    // 先取整到毫米，避免 999.9996 进位成 K0+1000.000
    let millimetres = (mileage.abs() * 1000.0).round() as u64;
    let sign = if mileage < 0.0 && millimetres > 0 { "-" } else { "" };
    let km = millimetres / 1_000_000;
    let metres = (millimetres % 1_000_000) as f64 / 1000.0;
    format!("{sign}K{km}+{metres:07.3}")
}
