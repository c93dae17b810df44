//! 日志工具模块
//!
//! 提供日志格式化和输出的辅助函数

use anyhow::Result;
use std::fs;
use std::path::Path;
use tracing::{error, info};

use crate::models::task::{RunResult, TaskStatus};

/// 初始化日志文件
///
/// # 参数
/// - `log_file_path`: 日志文件路径
pub fn init_log_file(log_file_path: &str) -> Result<()> {
    let log_header = format!(
        "{}\n图片合成 PDF 日志 - {}\n{}\n\n",
        "=".repeat(60),
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S"),
        "=".repeat(60)
    );
    fs::write(log_file_path, log_header)?;
    Ok(())
}

/// 记录程序启动信息
///
/// # 参数
/// - `task_count`: 任务文件夹数量
/// - `sort_description`: 排序方式描述
pub fn log_startup(task_count: usize, sort_description: &str) {
    info!("{}", "=".repeat(60));
    info!("🚀 程序启动 - 多任务图像合成 PDF");
    info!("📊 任务文件夹: {} 个", task_count);
    info!("🔀 排序方式: {}", sort_description);
    info!("{}", "=".repeat(60));
}

/// 记录任务开始信息
pub fn log_task_start(folder_name: &str, image_count: usize, output_path: &Path) {
    info!("\n{}", "─".repeat(60));
    info!("[{}] 开始处理，共 {} 张图片", folder_name, image_count);
    info!("[{}] 输出: {}", folder_name, output_path.display());
}

/// 记录任务完成信息
pub fn log_task_complete(folder_name: &str, processed: usize, skipped: usize, output_path: &Path) {
    info!(
        "[{}] 图片统计: 成功 {}, 跳过 {}, 总计 {}",
        folder_name,
        processed,
        skipped,
        processed + skipped
    );
    info!("[{}] ✅ 已生成 {}", folder_name, output_path.display());
}

/// 打印最终统计信息
///
/// # 参数
/// - `result`: 本次运行的汇总结果
/// - `log_file_path`: 日志文件路径
pub fn print_final_stats(result: &RunResult, log_file_path: &str) {
    info!("\n{}", "=".repeat(60));
    info!("📊 全部处理完成统计");
    info!(
        "完成时间: {}",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    );
    info!("{}", "=".repeat(60));
    info!("✅ 成功: {}/{}", result.succeeded(), result.total());
    info!("⚠️ 部分成功: {}", result.partial());
    info!("❌ 失败: {}", result.failed());

    for task in result.tasks.iter().filter(|t| t.status() == TaskStatus::Failed) {
        if let Some(e) = &task.error {
            error!("   {} → {}", task.task_path.display(), e);
        }
    }

    info!("{}", "=".repeat(60));
    info!("\n日志已保存至: {}", log_file_path);
}

/// 截断长文本用于日志显示
///
/// # 参数
/// - `text`: 原始文本
/// - `max_len`: 最大长度
///
/// # 返回
/// 返回截断后的文本
pub fn truncate_text(text: &str, max_len: usize) -> String {
    if text.chars().count() > max_len {
        text.chars().take(max_len).collect::<String>() + "..."
    } else {
        text.to_string()
    }
}
