//! 文件名排序键提取 - 业务能力层
//!
//! 纯函数，只看文件名字符串，从不失败：没有匹配时返回 0 / `None` / 原字符串。

use chrono::NaiveDate;
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// 页码标记，如 "p07"
    static ref RE_PAGE: Regex = Regex::new(r"(?i)p([0-9]+)").unwrap();

    /// YYYY-MM-DD
    static ref RE_DASHED_DATE: Regex = Regex::new(r"([0-9]{4})-([0-9]{2})-([0-9]{2})").unwrap();

    /// YYYYMMDD
    static ref RE_COMPACT_DATE: Regex = Regex::new(r"([0-9]{4})([0-9]{2})([0-9]{2})").unwrap();
}

/// 提取页码标记（第一个 `p` 后紧跟的数字），没有时返回 0
///
/// 只认 ASCII 数字，全角数字（如 "p１２"）不算页码；数字超出范围时取 `i64::MAX`
pub fn extract_page_number(name: &str) -> i64 {
    RE_PAGE
        .captures(name)
        .map(|caps| caps[1].parse::<i64>().unwrap_or(i64::MAX))
        .unwrap_or(0)
}

/// 提取文件名中的日期
///
/// 先找 `YYYY-MM-DD`，再找连续的 `YYYYMMDD`；每种格式只看第一个匹配，
/// 不是合法日历日期（如 13 月、0000 年）时视为没有日期。
pub fn extract_date(name: &str) -> Option<NaiveDate> {
    first_valid_date(&RE_DASHED_DATE, name).or_else(|| first_valid_date(&RE_COMPACT_DATE, name))
}

fn first_valid_date(re: &Regex, name: &str) -> Option<NaiveDate> {
    let caps = re.captures(name)?;
    let year = caps[1].parse::<i32>().ok().filter(|y| *y >= 1)?;
    let month = caps[2].parse::<u32>().ok()?;
    let day = caps[3].parse::<u32>().ok()?;
    NaiveDate::from_ymd_opt(year, month, day)
}

/// 去掉最后一个扩展名
///
/// 开头的点不算扩展名分隔符（".cover" 保持不变）
pub fn strip_extension(name: &str) -> &str {
    match name.rfind('.') {
        Some(i) if name[..i].chars().any(|c| c != '.') => &name[..i],
        _ => name,
    }
}
