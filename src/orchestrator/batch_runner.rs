//! 批量任务调度器 - 编排层
//!
//! ## 职责
//!
//! 1. **顺序执行**：逐个任务调用 `BatchAssembler`，任务之间不并发，
//!    内存峰值只取决于单个任务的图片
//! 2. **失败隔离**：某个文件夹失败不影响后续任务
//! 3. **单槽调度**：同一时间只允许一次运行，再次请求返回 `Busy`
//! 4. **后台运行**：在阻塞线程池上执行，前台只接收进度事件和结果值

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::mpsc::{self, UnboundedReceiver};
use tokio::task::JoinHandle;
use tracing::{error, info};

use crate::error::RunnerError;
use crate::models::sort_config::SortConfig;
use crate::models::task::{RunResult, Task};
use crate::orchestrator::batch_assembler::BatchAssembler;
use crate::orchestrator::progress::{ProgressEvent, ProgressSink};

/// 批量任务调度器
#[derive(Clone)]
pub struct BatchRunner {
    assembler: Arc<BatchAssembler>,
    running: Arc<AtomicBool>,
}

impl Default for BatchRunner {
    fn default() -> Self {
        Self::new(BatchAssembler::new())
    }
}

impl BatchRunner {
    pub fn new(assembler: BatchAssembler) -> Self {
        Self {
            assembler: Arc::new(assembler),
            running: Arc::new(AtomicBool::new(false)),
        }
    }

    /// 是否有批处理正在运行
    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::Acquire)
    }

    /// 同步执行所有任务
    ///
    /// 任务自带模板时优先使用，否则使用 `default_template`
    pub fn run(
        &self,
        tasks: &[Task],
        config: &SortConfig,
        default_template: &str,
        progress: &mut dyn ProgressSink,
    ) -> RunResult {
        let total_tasks = tasks.len();
        let mut run_result = RunResult::default();

        for (idx, task) in tasks.iter().enumerate() {
            let index = idx + 1;
            info!("📦 开始处理第 {}/{} 个任务: {}", index, total_tasks, task);
            progress.on_task_started(index, total_tasks);

            let template = task.template_or(default_template);
            let result = self
                .assembler
                .process(task, config, template, &mut |done, total| {
                    progress.on_progress(index, done, total)
                });

            if !result.succeeded {
                error!("[任务 {}] ❌ 处理失败: {}", index, task);
            }

            progress.on_task_result(index, &result);
            run_result.push(result);
        }

        progress.on_run_complete(&run_result);
        run_result
    }

    /// 在后台启动一次运行
    ///
    /// 已有运行未结束时返回 `RunnerError::Busy`，不排队
    pub fn start(
        &self,
        snapshot: Vec<Task>,
        config: SortConfig,
        default_template: String,
    ) -> Result<RunHandle, RunnerError> {
        if self
            .running
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            return Err(RunnerError::Busy);
        }

        let guard = RunningGuard(self.running.clone());
        let (tx, rx) = mpsc::unbounded_channel();
        let runner = self.clone();

        let join = tokio::task::spawn_blocking(move || {
            let _guard = guard;
            let mut sink = tx;
            runner.run(&snapshot, &config, &default_template, &mut sink)
        });

        Ok(RunHandle { events: rx, join })
    }
}

/// 运行结束（包括 panic）时释放运行标记
struct RunningGuard(Arc<AtomicBool>);

impl Drop for RunningGuard {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

/// 后台运行句柄
pub struct RunHandle {
    /// 进度事件，运行结束后通道关闭
    pub events: UnboundedReceiver<ProgressEvent>,
    join: JoinHandle<RunResult>,
}

impl RunHandle {
    /// 等待运行结束
    pub async fn wait(self) -> anyhow::Result<RunResult> {
        Ok(self.join.await?)
    }

    /// 消费所有进度事件后返回结果
    pub async fn drain<F>(mut self, mut on_event: F) -> anyhow::Result<RunResult>
    where
        F: FnMut(&ProgressEvent),
    {
        while let Some(event) = self.events.recv().await {
            on_event(&event);
        }
        self.wait().await
    }
}
