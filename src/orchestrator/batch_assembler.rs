//! 单个任务处理器 - 编排层
//!
//! ## 职责
//!
//! 处理一个文件夹：枚举图片 → 排序 → 逐张解码 → 一次性写出多页 PDF。
//!
//! ## 核心规则
//!
//! 1. **没有图片**：直接失败（`NoImages`），不生成文件
//! 2. **单张失败**：记录并跳过，继续处理剩余图片
//! 3. **全部失败**：`NoUsableImages`，不生成文件
//! 4. **输出位置**：任务文件夹的同级目录，不写进源文件夹
//! 5. **内存释放**：解码结果只在本任务内存活，返回前全部释放

use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{error, info, warn};

use crate::error::TaskError;
use crate::models::sort_config::SortConfig;
use crate::models::task::{Task, TaskResult};
use crate::services::{
    list_candidates, CandidateFile, ImageDecoder, LopdfWriter, OrderingEngine, PdfWriter,
    RasterDecoder, RasterImage,
};
use crate::utils::logging::{log_task_complete, log_task_start};

/// 输出文件名模板中的文件夹名占位符
pub const FOLDER_NAME_TOKEN: &str = "{folder_name}";

/// 单个任务处理器
pub struct BatchAssembler {
    ordering: OrderingEngine,
    decoder: Box<dyn ImageDecoder>,
    writer: Box<dyn PdfWriter>,
}

impl Default for BatchAssembler {
    fn default() -> Self {
        Self::new()
    }
}

impl BatchAssembler {
    /// 使用默认的解码器和写入器
    pub fn new() -> Self {
        Self::with_collaborators(Box::new(RasterDecoder), Box::new(LopdfWriter))
    }

    pub fn with_collaborators(decoder: Box<dyn ImageDecoder>, writer: Box<dyn PdfWriter>) -> Self {
        Self {
            ordering: OrderingEngine::new(),
            decoder,
            writer,
        }
    }

    /// 处理单个任务
    ///
    /// `on_progress(done, total)` 在每张图片解码尝试后调用一次
    pub fn process(
        &self,
        task: &Task,
        config: &SortConfig,
        template: &str,
        on_progress: &mut dyn FnMut(usize, usize),
    ) -> TaskResult {
        let folder = task.path.as_path();

        let candidates = match list_candidates(folder) {
            Ok(c) => c,
            Err(e) => {
                error!("[{}] ❌ 无法读取文件夹: {}", task.folder_name(), e);
                return TaskResult::failure(
                    folder,
                    None,
                    0,
                    TaskError::FolderUnreadable {
                        path: folder.to_path_buf(),
                        source: Arc::new(e),
                    },
                );
            }
        };

        if candidates.is_empty() {
            warn!("[{}] ⚠️ 没有图片文件，跳过", task.folder_name());
            return TaskResult::failure(folder, None, 0, TaskError::NoImages);
        }

        let ordered =
            self.ordering
                .order_by(candidates, |c: &CandidateFile| c.file_name.as_str(), folder, config);

        let output_path = resolve_output_path(folder, template);
        log_task_start(&task.folder_name(), ordered.len(), &output_path);

        // 解码结果的生命周期限定在本次调用内
        let mut images: Vec<RasterImage> = Vec::with_capacity(ordered.len());
        let (processed, skipped) = self.decode_all(&ordered, &mut images, on_progress);

        if images.is_empty() {
            error!("[{}] ❌ 没有可用的图片", task.folder_name());
            return TaskResult::failure(folder, None, skipped, TaskError::NoUsableImages { skipped });
        }

        let written = self.writer.write(&output_path, &images);
        drop(images);

        match written {
            Ok(()) => {
                log_task_complete(&task.folder_name(), processed, skipped, &output_path);
                TaskResult::success(folder, output_path, processed, skipped)
            }
            Err(e) => {
                error!("[{}] ❌ PDF 写入失败: {}", task.folder_name(), e);
                let mut result = TaskResult::failure(
                    folder,
                    Some(output_path.clone()),
                    skipped,
                    TaskError::Write {
                        path: output_path,
                        source: Arc::new(e),
                    },
                );
                result.images_processed = processed;
                result
            }
        }
    }

    fn decode_all(
        &self,
        ordered: &[CandidateFile],
        images: &mut Vec<RasterImage>,
        on_progress: &mut dyn FnMut(usize, usize),
    ) -> (usize, usize) {
        let total = ordered.len();
        let mut skipped = 0;

        for (index, candidate) in ordered.iter().enumerate() {
            match self.decoder.decode(&candidate.path) {
                Ok(image) => images.push(image),
                Err(e) => {
                    warn!("⚠️ 跳过 {}: {}", candidate.file_name, e);
                    skipped += 1;
                }
            }
            on_progress(index + 1, total);
        }

        (images.len(), skipped)
    }
}

/// 根据模板计算输出路径
///
/// 空模板等同于 `{folder_name}`；缺少 `.pdf` 后缀时补上；
/// 文件写在任务文件夹的父目录中（文件夹没有父目录时写在文件夹内）
pub fn resolve_output_path(folder: &Path, template: &str) -> PathBuf {
    let template = match template.trim() {
        "" => FOLDER_NAME_TOKEN,
        t => t,
    };

    let folder_name = folder
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default();

    let mut file_name = template.replace(FOLDER_NAME_TOKEN, &folder_name);
    if !file_name.to_lowercase().ends_with(".pdf") {
        file_name.push_str(".pdf");
    }

    let parent = folder.parent().unwrap_or(folder);
    let output = parent.join(&file_name);
    info!("📄 输出文件: {}", output.display());
    output
}
