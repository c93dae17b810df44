//! 排序配置
//!
//! `SortOptions` 是外壳（界面 / 环境变量 / 配置文件）提供的原始选项，
//! 长度参数保留为文本；`SortConfig` 是校验后的不可变值对象。

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ConfigError;

/// 默认前 N 位长度
pub const DEFAULT_PREFIX_LENGTH: usize = 9;
/// 默认后 N 位长度
pub const DEFAULT_SUFFIX_LENGTH: usize = 10;

/// 排序方式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortMode {
    /// 按文件名
    Filename,
    /// 按修改时间
    ModifiedTime,
    /// 按文件名前 N 位 + 页码
    PrefixN,
    /// 按去扩展名后 N 位 + 日期 + 页码
    SuffixN,
}

impl SortMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortMode::Filename => "filename",
            SortMode::ModifiedTime => "modified-time",
            SortMode::PrefixN => "prefix-n",
            SortMode::SuffixN => "suffix-n",
        }
    }
}

impl FromStr for SortMode {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "filename" => Ok(SortMode::Filename),
            "time" | "modified-time" => Ok(SortMode::ModifiedTime),
            "prefix" | "prefix-n" => Ok(SortMode::PrefixN),
            "suffix" | "suffix-n" => Ok(SortMode::SuffixN),
            _ => Err(ConfigError::UnknownMode {
                mode: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for SortMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 排序原始选项
///
/// 对应界面上的单选框、倒序复选框和两个长度输入框
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SortOptions {
    pub mode: String,
    pub reverse: bool,
    pub prefix_length: String,
    pub suffix_length: String,
}

impl Default for SortOptions {
    fn default() -> Self {
        Self {
            mode: SortMode::Filename.as_str().to_string(),
            reverse: false,
            prefix_length: DEFAULT_PREFIX_LENGTH.to_string(),
            suffix_length: DEFAULT_SUFFIX_LENGTH.to_string(),
        }
    }
}

/// 校验后的排序配置
///
/// 字段只读，只能经 `new` / `try_from` 构造，当前模式的长度一定大于 0
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortConfig {
    mode: SortMode,
    reverse: bool,
    prefix_length: usize,
    suffix_length: usize,
}

impl Default for SortConfig {
    fn default() -> Self {
        Self {
            mode: SortMode::Filename,
            reverse: false,
            prefix_length: DEFAULT_PREFIX_LENGTH,
            suffix_length: DEFAULT_SUFFIX_LENGTH,
        }
    }
}

impl SortConfig {
    /// 创建排序配置
    ///
    /// 当前模式用到的长度必须大于 0；未启用的长度不做检查
    pub fn new(
        mode: SortMode,
        reverse: bool,
        prefix_length: i64,
        suffix_length: i64,
    ) -> Result<Self, ConfigError> {
        let prefix_length = match mode {
            SortMode::PrefixN => positive("prefix_length", prefix_length)?,
            _ => prefix_length.max(0) as usize,
        };
        let suffix_length = match mode {
            SortMode::SuffixN => positive("suffix_length", suffix_length)?,
            _ => suffix_length.max(0) as usize,
        };

        Ok(Self {
            mode,
            reverse,
            prefix_length,
            suffix_length,
        })
    }

    pub fn mode(&self) -> SortMode {
        self.mode
    }

    pub fn reverse(&self) -> bool {
        self.reverse
    }

    pub fn prefix_length(&self) -> usize {
        self.prefix_length
    }

    pub fn suffix_length(&self) -> usize {
        self.suffix_length
    }

    pub fn filename(reverse: bool) -> Self {
        Self {
            mode: SortMode::Filename,
            reverse,
            ..Self::default()
        }
    }

    pub fn prefix(length: usize, reverse: bool) -> Result<Self, ConfigError> {
        Self::new(SortMode::PrefixN, reverse, length as i64, DEFAULT_SUFFIX_LENGTH as i64)
    }

    pub fn suffix(length: usize, reverse: bool) -> Result<Self, ConfigError> {
        Self::new(SortMode::SuffixN, reverse, DEFAULT_PREFIX_LENGTH as i64, length as i64)
    }
}

impl TryFrom<&SortOptions> for SortConfig {
    type Error = ConfigError;

    fn try_from(options: &SortOptions) -> Result<Self, Self::Error> {
        let mode: SortMode = options.mode.parse()?;

        // 只解析当前模式需要的长度，其余输入框的内容不影响结果
        let prefix_length = match mode {
            SortMode::PrefixN => parse_length("prefix_length", &options.prefix_length)?,
            _ => DEFAULT_PREFIX_LENGTH as i64,
        };
        let suffix_length = match mode {
            SortMode::SuffixN => parse_length("suffix_length", &options.suffix_length)?,
            _ => DEFAULT_SUFFIX_LENGTH as i64,
        };

        SortConfig::new(mode, options.reverse, prefix_length, suffix_length)
    }
}

fn parse_length(field: &'static str, value: &str) -> Result<i64, ConfigError> {
    value
        .trim()
        .parse::<i64>()
        .map_err(|_| ConfigError::InvalidLength {
            field,
            value: value.to_string(),
        })
}

fn positive(field: &'static str, value: i64) -> Result<usize, ConfigError> {
    if value > 0 {
        Ok(value as usize)
    } else {
        Err(ConfigError::NonPositiveLength { field, value })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn options(mode: &str, prefix: &str, suffix: &str) -> SortOptions {
        SortOptions {
            mode: mode.to_string(),
            reverse: false,
            prefix_length: prefix.to_string(),
            suffix_length: suffix.to_string(),
        }
    }

    #[test]
    fn test_mode_aliases() {
        assert_eq!("time".parse::<SortMode>().unwrap(), SortMode::ModifiedTime);
        assert_eq!("Prefix".parse::<SortMode>().unwrap(), SortMode::PrefixN);
        assert_eq!("suffix-n".parse::<SortMode>().unwrap(), SortMode::SuffixN);
        assert!(matches!(
            "random".parse::<SortMode>(),
            Err(ConfigError::UnknownMode { .. })
        ));
    }

    #[test]
    fn test_non_numeric_length_rejected_only_when_active() {
        let err = SortConfig::try_from(&options("prefix", "abc", "10")).unwrap_err();
        assert_eq!(
            err,
            ConfigError::InvalidLength {
                field: "prefix_length",
                value: "abc".to_string()
            }
        );

        // 后 N 位模式下，前 N 位输入框内容无关
        let config = SortConfig::try_from(&options("suffix", "abc", "4")).unwrap();
        assert_eq!(config.mode(), SortMode::SuffixN);
        assert_eq!(config.suffix_length(), 4);
    }

    #[test]
    fn test_zero_length_rejected() {
        assert!(matches!(
            SortConfig::prefix(0, false),
            Err(ConfigError::NonPositiveLength { .. })
        ));
        assert!(matches!(
            SortConfig::try_from(&options("suffix-n", "9", "-3")),
            Err(ConfigError::NonPositiveLength { value: -3, .. })
        ));
    }

    #[test]
    fn test_zero_active_length_only_reachable_as_error() {
        for (prefix, suffix, mode) in [
            (0, 10, SortMode::PrefixN),
            (9, 0, SortMode::SuffixN),
            (-1, 10, SortMode::PrefixN),
        ] {
            assert!(matches!(
                SortConfig::new(mode, false, prefix, suffix),
                Err(ConfigError::NonPositiveLength { .. })
            ));
        }

        // 构造成功的配置，当前模式的长度一定为正
        let config = SortConfig::prefix(8, true).unwrap();
        assert_eq!(config.mode(), SortMode::PrefixN);
        assert!(config.reverse());
        assert_eq!(config.prefix_length(), 8);
        let config = SortConfig::suffix(1, false).unwrap();
        assert_eq!(config.suffix_length(), 1);
    }

    #[test]
    fn test_default_options_build_filename_config() {
        let config = SortConfig::try_from(&SortOptions::default()).unwrap();
        assert_eq!(config, SortConfig::default());
    }
}
