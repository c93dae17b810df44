//! 命令行外壳
//!
//! 代替图形界面：把参数中的文件夹加入任务列表，显示排序预览，启动一次批处理并输出进度

use anyhow::{Context, Result};
use std::path::Path;
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::models::sort_config::SortConfig;
use crate::models::task::RunResult;
use crate::models::load_options_file;
use crate::orchestrator::{BatchRunner, Preview, ProgressEvent, TaskRegistry};
use crate::utils::logging::{init_log_file, log_startup, print_final_stats, truncate_text};

/// 应用主结构
pub struct App {
    config: Config,
    sort: SortConfig,
    registry: TaskRegistry,
    runner: BatchRunner,
}

impl App {
    /// 初始化应用
    pub async fn initialize(mut config: Config) -> Result<Self> {
        // 初始化日志文件
        init_log_file(&config.output_log_file)
            .with_context(|| format!("无法创建日志文件: {}", config.output_log_file))?;

        if let Some(path) = config.options_file.clone() {
            let options = load_options_file(Path::new(&path)).await?;
            config.merge_options(options);
        }

        let sort = SortConfig::try_from(&config.sort).context("排序选项无效")?;

        Ok(Self {
            config,
            sort,
            registry: TaskRegistry::new(),
            runner: BatchRunner::default(),
        })
    }

    /// 加入任务文件夹，返回实际加入的数量
    pub fn add_folders<I, P>(&mut self, folders: I) -> usize
    where
        I: IntoIterator<Item = P>,
        P: AsRef<Path>,
    {
        self.registry.add_all(folders)
    }

    /// 运行应用主逻辑
    pub async fn run(&self) -> Result<RunResult> {
        if self.registry.is_empty() {
            warn!("⚠️ 没有任务文件夹，程序结束");
            return Ok(RunResult::default());
        }

        let sort_description = format!(
            "{}{}",
            self.sort.mode(),
            if self.sort.reverse() { " (倒序)" } else { "" }
        );
        log_startup(self.registry.len(), &sort_description);

        self.log_previews();

        let handle = self.runner.start(
            self.registry.snapshot(),
            self.sort,
            self.config.output_name_template.clone(),
        )?;

        let result = handle.drain(log_event).await?;

        print_final_stats(&result, &self.config.output_log_file);

        if let Some(report) = &self.config.report_file {
            write_report(Path::new(report), &result).await?;
        }

        Ok(result)
    }

    /// 输出每个任务的排序预览
    fn log_previews(&self) {
        let mut preview = Preview::new();
        for task in self.registry.list() {
            match preview.refresh(&task.path, &self.config.sort) {
                Ok(items) => {
                    info!("🔀 [{}] 排序预览 ({} 个文件)", task.folder_name(), items.len());
                    for (i, name) in items.iter().enumerate() {
                        debug!("   {:>4}. {}", i + 1, truncate_text(name, 80));
                    }
                }
                Err(e) => warn!("⚠️ [{}] 无法生成预览: {}", task.folder_name(), e),
            }
        }
    }
}

fn log_event(event: &ProgressEvent) {
    match event {
        ProgressEvent::TaskStarted { index, total_tasks } => {
            info!("📦 任务 {}/{}", index, total_tasks);
        }
        ProgressEvent::Image { index, done, total } => {
            debug!("[任务 {}] 进度 {}/{}", index, done, total);
            if done == total {
                info!("[任务 {}] 图片读取完成 {}/{}", index, done, total);
            }
        }
        ProgressEvent::TaskFinished { index, result } => match &result.error {
            None => info!(
                "[任务 {}] ✓ {:?}: 成功 {}, 跳过 {}",
                index,
                result.status(),
                result.images_processed,
                result.images_skipped
            ),
            Some(e) => warn!("[任务 {}] ✗ {}", index, e),
        },
        ProgressEvent::RunComplete(result) => {
            info!("🏁 所有任务已处理完成 ({} 个)", result.total());
        }
    }
}

/// 写出 JSON 运行报告
async fn write_report(path: &Path, result: &RunResult) -> Result<()> {
    let json = serde_json::to_string_pretty(result)?;
    tokio::fs::write(path, json)
        .await
        .with_context(|| format!("无法写入运行报告: {}", path.display()))?;
    info!("📝 运行报告: {}", path.display());
    Ok(())
}
