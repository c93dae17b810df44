//! 任务与处理结果

use serde::{Serialize, Serializer};
use std::fmt;
use std::path::{Path, PathBuf};

use crate::error::TaskError;

/// 一个待合成的图片文件夹
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Task {
    /// 规范化后的绝对路径
    pub path: PathBuf,
    /// 任务自己的输出文件名模板，未设置时使用全局模板
    pub output_template: Option<String>,
}

impl Task {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            output_template: None,
        }
    }

    pub fn with_template(path: PathBuf, template: impl Into<String>) -> Self {
        Self {
            path,
            output_template: Some(template.into()),
        }
    }

    /// 文件夹名（用于替换 `{folder_name}`）
    pub fn folder_name(&self) -> String {
        self.path
            .file_name()
            .map(|name| name.to_string_lossy().to_string())
            .unwrap_or_default()
    }

    /// 取任务模板，未设置时返回全局模板
    pub fn template_or<'a>(&'a self, default: &'a str) -> &'a str {
        self.output_template.as_deref().unwrap_or(default)
    }
}

impl fmt::Display for Task {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.path.display())
    }
}

/// 单个任务的处理状态
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    /// 全部图片写入成功
    Succeeded,
    /// 写入成功，但有图片被跳过
    Partial,
    /// 没有生成输出文件
    Failed,
}

/// 单个任务的处理结果
#[derive(Debug, Clone, Serialize)]
pub struct TaskResult {
    pub task_path: PathBuf,
    pub succeeded: bool,
    pub images_processed: usize,
    pub images_skipped: usize,
    pub output_path: Option<PathBuf>,
    #[serde(serialize_with = "serialize_error")]
    pub error: Option<TaskError>,
}

impl TaskResult {
    pub fn success(
        task_path: &Path,
        output_path: PathBuf,
        images_processed: usize,
        images_skipped: usize,
    ) -> Self {
        Self {
            task_path: task_path.to_path_buf(),
            succeeded: true,
            images_processed,
            images_skipped,
            output_path: Some(output_path),
            error: None,
        }
    }

    pub fn failure(
        task_path: &Path,
        output_path: Option<PathBuf>,
        images_skipped: usize,
        error: TaskError,
    ) -> Self {
        Self {
            task_path: task_path.to_path_buf(),
            succeeded: false,
            images_processed: 0,
            images_skipped,
            output_path,
            error: Some(error),
        }
    }

    pub fn status(&self) -> TaskStatus {
        match (self.succeeded, self.images_skipped) {
            (false, _) => TaskStatus::Failed,
            (true, 0) => TaskStatus::Succeeded,
            (true, _) => TaskStatus::Partial,
        }
    }
}

fn serialize_error<S>(error: &Option<TaskError>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    match error {
        Some(e) => serializer.serialize_some(&e.to_string()),
        None => serializer.serialize_none(),
    }
}

/// 一次批处理的汇总结果
#[derive(Debug, Clone, Default, Serialize)]
pub struct RunResult {
    pub tasks: Vec<TaskResult>,
}

impl RunResult {
    pub fn push(&mut self, result: TaskResult) {
        self.tasks.push(result);
    }

    pub fn total(&self) -> usize {
        self.tasks.len()
    }

    pub fn succeeded(&self) -> usize {
        self.tasks.iter().filter(|t| t.succeeded).count()
    }

    pub fn failed(&self) -> usize {
        self.total() - self.succeeded()
    }

    pub fn partial(&self) -> usize {
        self.tasks
            .iter()
            .filter(|t| t.status() == TaskStatus::Partial)
            .count()
    }

    pub fn all_failed(&self) -> bool {
        !self.tasks.is_empty() && self.succeeded() == 0
    }
}
