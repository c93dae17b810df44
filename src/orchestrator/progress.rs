//! 进度通知
//!
//! 后台只通过这里向前台发送进度和结果值，从不跨线程抛出错误

use tokio::sync::mpsc::UnboundedSender;

use crate::models::task::{RunResult, TaskResult};

/// 进度事件
#[derive(Debug, Clone)]
pub enum ProgressEvent {
    /// 任务开始（任务序号从 1 开始）
    TaskStarted { index: usize, total_tasks: usize },
    /// 单张图片处理完毕（成功或跳过）
    Image { index: usize, done: usize, total: usize },
    /// 单个任务结束
    TaskFinished { index: usize, result: TaskResult },
    /// 全部任务结束
    RunComplete(RunResult),
}

/// 进度接收方
pub trait ProgressSink {
    fn on_task_started(&mut self, _index: usize, _total_tasks: usize) {}

    fn on_progress(&mut self, _index: usize, _done: usize, _total: usize) {}

    fn on_task_result(&mut self, _index: usize, _result: &TaskResult) {}

    fn on_run_complete(&mut self, _result: &RunResult) {}
}

/// 忽略所有进度
#[derive(Debug, Default)]
pub struct NoProgress;

impl ProgressSink for NoProgress {}

/// 通过通道转发给前台；前台已经关闭接收端时静默丢弃
impl ProgressSink for UnboundedSender<ProgressEvent> {
    fn on_task_started(&mut self, index: usize, total_tasks: usize) {
        let _ = self.send(ProgressEvent::TaskStarted { index, total_tasks });
    }

    fn on_progress(&mut self, index: usize, done: usize, total: usize) {
        let _ = self.send(ProgressEvent::Image { index, done, total });
    }

    fn on_task_result(&mut self, index: usize, result: &TaskResult) {
        let _ = self.send(ProgressEvent::TaskFinished {
            index,
            result: result.clone(),
        });
    }

    fn on_run_complete(&mut self, result: &RunResult) {
        let _ = self.send(ProgressEvent::RunComplete(result.clone()));
    }
}

/// 记录全部事件，供测试和同步调用方使用
#[derive(Debug, Default)]
pub struct RecordingProgress {
    pub events: Vec<ProgressEvent>,
}

impl ProgressSink for RecordingProgress {
    fn on_task_started(&mut self, index: usize, total_tasks: usize) {
        self.events
            .push(ProgressEvent::TaskStarted { index, total_tasks });
    }

    fn on_progress(&mut self, index: usize, done: usize, total: usize) {
        self.events.push(ProgressEvent::Image { index, done, total });
    }

    fn on_task_result(&mut self, index: usize, result: &TaskResult) {
        self.events.push(ProgressEvent::TaskFinished {
            index,
            result: result.clone(),
        });
    }

    fn on_run_complete(&mut self, result: &RunResult) {
        self.events.push(ProgressEvent::RunComplete(result.clone()));
    }
}
