//! 任务列表
//!
//! 只由前台修改；批处理开始时取一份快照，运行中的增删只影响下一次运行

use std::path::{Path, PathBuf};
use tracing::{info, warn};

use crate::models::task::Task;

/// 待处理文件夹列表（按加入顺序，路径规范化后去重）
#[derive(Debug, Default, Clone)]
pub struct TaskRegistry {
    tasks: Vec<Task>,
}

impl TaskRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// 加入文件夹；已存在或不是目录时返回 false
    pub fn add(&mut self, path: impl AsRef<Path>) -> bool {
        self.insert(path.as_ref(), None)
    }

    /// 加入文件夹并指定它自己的输出文件名模板
    pub fn add_with_template(&mut self, path: impl AsRef<Path>, template: impl Into<String>) -> bool {
        self.insert(path.as_ref(), Some(template.into()))
    }

    /// 批量加入（拖放多个路径），返回实际加入的数量
    pub fn add_all<I, P>(&mut self, paths: I) -> usize
    where
        I: IntoIterator<Item = P>,
        P: AsRef<Path>,
    {
        paths.into_iter().filter(|p| self.add(p)).count()
    }

    fn insert(&mut self, path: &Path, template: Option<String>) -> bool {
        if !path.is_dir() {
            warn!("⚠️ 不是文件夹，已忽略: {}", path.display());
            return false;
        }

        let canonical = match path.canonicalize() {
            Ok(p) => p,
            Err(e) => {
                warn!("⚠️ 无法解析路径 {}: {}", path.display(), e);
                return false;
            }
        };

        if self.contains(&canonical) {
            return false;
        }

        info!("📁 加入任务: {}", canonical.display());
        self.tasks.push(Task {
            path: canonical,
            output_template: template,
        });
        true
    }

    /// 移除一组路径；路径已不存在时按原样比较
    pub fn remove<I, P>(&mut self, paths: I)
    where
        I: IntoIterator<Item = P>,
        P: AsRef<Path>,
    {
        let targets: Vec<PathBuf> = paths
            .into_iter()
            .map(|p| {
                let p = p.as_ref();
                p.canonicalize().unwrap_or_else(|_| p.to_path_buf())
            })
            .collect();

        self.tasks.retain(|task| !targets.contains(&task.path));
    }

    pub fn contains(&self, canonical: &Path) -> bool {
        self.tasks.iter().any(|t| t.path == canonical)
    }

    pub fn list(&self) -> &[Task] {
        &self.tasks
    }

    /// 当前任务列表的不可变副本
    pub fn snapshot(&self) -> Vec<Task> {
        self.tasks.clone()
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }
}
