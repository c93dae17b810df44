//! 编排层（Orchestration Layer）
//!
//! ## 职责
//!
//! 本层负责任务管理和批量调度，不包含排序规则或图片格式细节。
//!
//! ## 模块划分
//!
//! ### `task_registry` - 任务列表
//! - 按加入顺序保存文件夹，规范化路径去重
//! - 运行开始时提供不可变快照
//!
//! ### `preview` - 排序预览
//! - 选项变化时重新读取文件夹并排序
//! - 选项无效时保留上一次的预览
//!
//! ### `batch_assembler` - 单个任务处理器
//! - 枚举 → 排序 → 逐张解码 → 写出 PDF
//! - 单张图片失败只记录，不中断任务
//!
//! ### `batch_runner` - 批量调度器
//! - 顺序执行所有任务，汇总 `RunResult`
//! - 单槽调度：运行中再次请求返回 `Busy`
//!
//! ### `progress` - 进度通知
//!
//! ## 层次关系
//!
//! ```text
//! batch_runner (处理 Vec<Task>)
//!     ↓
//! batch_assembler (处理单个文件夹)
//!     ↓
//! services (能力层：scan / order / decode / write)
//! ```

pub mod batch_assembler;
pub mod batch_runner;
pub mod preview;
pub mod progress;
pub mod task_registry;

// 重新导出主要类型
pub use batch_assembler::{resolve_output_path, BatchAssembler};
pub use batch_runner::{BatchRunner, RunHandle};
pub use preview::Preview;
pub use progress::{NoProgress, ProgressEvent, ProgressSink, RecordingProgress};
pub use task_registry::TaskRegistry;
