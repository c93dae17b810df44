//! # folder2pdf
//!
//! 把多个图片文件夹批量合成为 PDF，每个文件夹一个文件
//!
//! ## 架构设计
//!
//! ### ① 业务能力层（Services）
//! - `services/` - 只处理单个文件名或单个文件
//! - `key_extractor` - 从文件名提取页码、日期、主干
//! - `ordering` - 按排序方式生成组合键并稳定排序
//! - `file_scanner` - 枚举文件夹中的图片
//! - `image_decoder` / `pdf_writer` - 解码与多页写入
//!
//! ### ② 数据层（Models）
//! - `SortOptions` → `SortConfig`（校验后的不可变排序配置）
//! - `Task` / `TaskResult` / `RunResult`
//!
//! ### ③ 编排层（Orchestration）
//! - `TaskRegistry` - 任务列表
//! - `Preview` - 排序预览
//! - `BatchAssembler` - 单个文件夹 → 单个 PDF
//! - `BatchRunner` - 顺序执行全部任务，单槽后台调度
//!
//! ## 模块结构

pub mod app;
pub mod config;
pub mod error;
pub mod logger;
pub mod models;
pub mod orchestrator;
pub mod services;
pub mod utils;

// 重新导出常用类型
pub use app::App;
pub use config::Config;
pub use error::{AppError, AppResult, ConfigError, TaskError};
pub use models::{RunResult, SortConfig, SortMode, SortOptions, Task, TaskResult, TaskStatus};
pub use orchestrator::{BatchAssembler, BatchRunner, Preview, ProgressEvent, ProgressSink, TaskRegistry};
pub use services::{OrderingEngine, RasterImage};
