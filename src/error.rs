use std::path::PathBuf;
use std::sync::Arc;

use thiserror::Error;

/// 排序配置错误
///
/// 只在构造 `SortConfig` 时产生，失败时调用方保留之前的排序结果
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// 未知的排序方式
    #[error("未知的排序方式: {mode}")]
    UnknownMode { mode: String },

    /// 长度参数不是有效的数字
    #[error("{field} 不是有效的数字: '{value}'")]
    InvalidLength { field: &'static str, value: String },

    /// 长度参数必须大于 0
    #[error("{field} 必须大于 0，当前值: {value}")]
    NonPositiveLength { field: &'static str, value: i64 },
}

/// 单张图片解码错误（不会中断任务）
#[derive(Debug, Error)]
pub enum DecodeError {
    /// 打开或识别文件失败
    #[error("无法打开图片 ({path}): {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// 图片数据损坏或格式不支持
    #[error("图片解码失败 ({path}): {source}")]
    Image {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
}

/// PDF 写入错误
#[derive(Debug, Error)]
pub enum WriteError {
    /// 没有可写入的页面
    #[error("没有可写入的页面")]
    NoPages,

    /// 像素数据压缩失败
    #[error("图片数据压缩失败: {0}")]
    Compress(#[source] std::io::Error),

    /// PDF 结构组装失败
    #[error("PDF 组装失败: {0}")]
    Pdf(#[from] lopdf::Error),

    /// 输出文件写入失败
    #[error("写入文件失败 ({path}): {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// 任务级错误，记录在 `TaskResult` 中，不会中断整批处理
#[derive(Debug, Clone, Error)]
pub enum TaskError {
    /// 文件夹中没有图片
    #[error("文件夹中没有图片文件")]
    NoImages,

    /// 所有图片都解码失败
    #[error("没有可用的图片 (跳过 {skipped} 张)")]
    NoUsableImages { skipped: usize },

    /// 无法读取文件夹
    #[error("无法读取文件夹 ({path}): {source}")]
    FolderUnreadable {
        path: PathBuf,
        #[source]
        source: Arc<std::io::Error>,
    },

    /// PDF 写入失败
    #[error("PDF 写入失败 ({path}): {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: Arc<WriteError>,
    },
}

/// 批处理调度错误
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum RunnerError {
    /// 已有批处理正在运行
    #[error("已有批处理任务正在运行")]
    Busy,
}

/// 应用程序错误类型
#[derive(Debug, Error)]
pub enum AppError {
    /// 配置错误
    #[error("配置错误: {0}")]
    Config(#[from] ConfigError),

    /// 调度错误
    #[error("调度错误: {0}")]
    Runner(#[from] RunnerError),

    /// 文件操作错误
    #[error("文件错误 ({path}): {source}")]
    File {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl AppError {
    /// 创建文件读取错误
    pub fn file(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        AppError::File {
            path: path.into(),
            source,
        }
    }
}

/// 应用程序结果类型
pub type AppResult<T> = Result<T, AppError>;
