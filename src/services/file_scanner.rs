//! 图片文件枚举 - 业务能力层
//!
//! 每次调用都重新读取目录，不做缓存

use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// 支持的图片扩展名（不区分大小写）
pub const IMAGE_EXTENSIONS: [&str; 4] = ["png", "jpg", "jpeg", "webp"];

/// 待处理的图片文件
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateFile {
    /// 文件名
    pub file_name: String,
    /// 完整路径
    pub path: PathBuf,
}

/// 判断文件名是否是支持的图片
pub fn is_image_file(name: &str) -> bool {
    Path::new(name)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| {
            IMAGE_EXTENSIONS
                .iter()
                .any(|allowed| ext.eq_ignore_ascii_case(allowed))
        })
        .unwrap_or(false)
}

/// 列出文件夹中的图片文件
///
/// 结果按文件名排列，使后续稳定排序的结果不依赖目录遍历顺序。
/// 子目录和非 UTF-8 文件名会被忽略。
pub fn list_candidates(folder: &Path) -> io::Result<Vec<CandidateFile>> {
    let mut candidates = Vec::new();

    for entry in std::fs::read_dir(folder)? {
        let entry = entry?;
        let path = entry.path();

        if !entry.file_type()?.is_file() && !path.is_file() {
            continue;
        }

        let file_name = match entry.file_name().into_string() {
            Ok(name) => name,
            Err(raw) => {
                warn!("⚠️ 忽略无法识别的文件名: {:?}", raw);
                continue;
            }
        };

        if is_image_file(&file_name) {
            candidates.push(CandidateFile { file_name, path });
        }
    }

    candidates.sort_by(|a, b| a.file_name.cmp(&b.file_name));
    debug!("{} 中找到 {} 个图片文件", folder.display(), candidates.len());

    Ok(candidates)
}

/// 只返回文件名
pub fn list_image_names(folder: &Path) -> io::Result<Vec<String>> {
    Ok(list_candidates(folder)?
        .into_iter()
        .map(|c| c.file_name)
        .collect())
}
