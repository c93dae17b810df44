//! 排序引擎 - 业务能力层
//!
//! 根据 `SortConfig` 为每个文件名构造组合排序键，然后做一次稳定排序。
//!
//! ## 页码次序与倒序无关
//!
//! 前 N 位 / 后 N 位模式下，页码分量在倒序时先取负，再对整个键元组反向比较。
//! 两次取反相互抵消：倒序只反转名称 / 日期的顺序，同一前缀下的页码始终从小到大。
//! 修改这里的行为前请确认这是有意为之。

use chrono::NaiveDate;
use std::path::Path;
use std::time::SystemTime;
use tracing::warn;

use crate::error::ConfigError;
use crate::models::sort_config::{SortConfig, SortMode, SortOptions};
use crate::services::key_extractor::{extract_date, extract_page_number, strip_extension};

/// 单个文件名的组合排序键
///
/// 同一次排序中所有键都是同一个变体
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub enum SortKey {
    Filename(String),
    Modified(SystemTime),
    Prefix(String, i64),
    Suffix(String, Option<NaiveDate>, i64),
}

/// 排序引擎（无状态）
#[derive(Debug, Clone, Copy, Default)]
pub struct OrderingEngine;

impl OrderingEngine {
    pub fn new() -> Self {
        Self
    }

    /// 对文件名排序，输出是输入的重排（不增不减）
    pub fn order(&self, filenames: &[String], folder: &Path, config: &SortConfig) -> Vec<String> {
        self.order_by(filenames.to_vec(), |name| name.as_str(), folder, config)
    }

    /// 先校验原始选项再排序；选项无效时返回 `ConfigError`，不做任何排序
    pub fn order_with_options(
        &self,
        filenames: &[String],
        folder: &Path,
        options: &SortOptions,
    ) -> Result<Vec<String>, ConfigError> {
        let config = SortConfig::try_from(options)?;
        Ok(self.order(filenames, folder, &config))
    }

    /// 按条目的文件名排序任意条目
    pub fn order_by<T, F>(&self, items: Vec<T>, name_of: F, folder: &Path, config: &SortConfig) -> Vec<T>
    where
        F: Fn(&T) -> &str,
    {
        let mut keyed: Vec<(SortKey, T)> = items
            .into_iter()
            .map(|item| (sort_key(name_of(&item), folder, config), item))
            .collect();

        // sort_by 是稳定排序，倒序时相等的键仍保持原有次序
        if config.reverse() {
            keyed.sort_by(|a, b| b.0.cmp(&a.0));
        } else {
            keyed.sort_by(|a, b| a.0.cmp(&b.0));
        }

        keyed.into_iter().map(|(_, item)| item).collect()
    }
}

/// 构造排序键
pub fn sort_key(name: &str, folder: &Path, config: &SortConfig) -> SortKey {
    match config.mode() {
        SortMode::Filename => SortKey::Filename(name.to_lowercase()),
        SortMode::ModifiedTime => SortKey::Modified(modified_time(folder, name)),
        SortMode::PrefixN => SortKey::Prefix(
            head_chars(name, config.prefix_length()).to_lowercase(),
            page_component(name, config.reverse()),
        ),
        SortMode::SuffixN => SortKey::Suffix(
            tail_chars(strip_extension(name), config.suffix_length()).to_lowercase(),
            extract_date(name),
            page_component(name, config.reverse()),
        ),
    }
}

/// 倒序时预先取负，见模块文档
fn page_component(name: &str, reverse: bool) -> i64 {
    let page = extract_page_number(name);
    if reverse {
        -page
    } else {
        page
    }
}

fn head_chars(s: &str, n: usize) -> String {
    s.chars().take(n).collect()
}

fn tail_chars(s: &str, n: usize) -> String {
    let count = s.chars().count();
    s.chars().skip(count.saturating_sub(n)).collect()
}

/// 读取不到修改时间的文件排在最前
fn modified_time(folder: &Path, name: &str) -> SystemTime {
    let path = folder.join(name);
    match std::fs::metadata(&path).and_then(|m| m.modified()) {
        Ok(time) => time,
        Err(e) => {
            warn!("⚠️ 无法读取修改时间 {}: {}", path.display(), e);
            SystemTime::UNIX_EPOCH
        }
    }
}
