//! 排序预览
//!
//! 前台每次修改排序选项都显式请求一次重排；选项无效时保留上一次的结果

use std::path::Path;
use tracing::{debug, warn};

use crate::error::{AppError, AppResult};
use crate::models::sort_config::SortOptions;
use crate::services::{list_image_names, OrderingEngine};

/// 当前显示的预览顺序
#[derive(Debug, Default, Clone)]
pub struct Preview {
    ordering: OrderingEngine,
    items: Vec<String>,
}

impl Preview {
    pub fn new() -> Self {
        Self::default()
    }

    /// 当前显示的文件顺序
    pub fn items(&self) -> &[String] {
        &self.items
    }

    /// 重新读取文件夹并按选项排序
    ///
    /// 文件夹不存在时清空预览；选项无效或读取失败时返回错误，保留原有内容
    pub fn refresh(&mut self, folder: &Path, options: &SortOptions) -> AppResult<&[String]> {
        if !folder.exists() {
            self.items.clear();
            return Ok(&self.items);
        }

        let names = list_image_names(folder).map_err(|e| AppError::file(folder, e))?;
        self.items = self
            .ordering
            .order_with_options(&names, folder, options)
            .map_err(|e| {
                warn!("⚠️ 排序选项无效，保留当前预览: {}", e);
                AppError::from(e)
            })?;
        debug!("预览 {}: {} 个文件", folder.display(), self.items.len());

        Ok(&self.items)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn options(mode: &str, prefix: &str, reverse: bool) -> SortOptions {
        SortOptions {
            mode: mode.to_string(),
            reverse,
            prefix_length: prefix.to_string(),
            ..SortOptions::default()
        }
    }

    #[test]
    fn test_invalid_options_keep_previous_order() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["b.png", "a.png", "c.png"] {
            fs::write(dir.path().join(name), b"x").unwrap();
        }

        let mut preview = Preview::new();
        preview
            .refresh(dir.path(), &options("filename", "9", true))
            .unwrap();
        assert_eq!(preview.items(), ["c.png", "b.png", "a.png"]);

        let err = preview
            .refresh(dir.path(), &options("prefix", "x9", false))
            .unwrap_err();
        assert!(matches!(err, AppError::Config(_)));
        assert_eq!(preview.items(), ["c.png", "b.png", "a.png"]);
    }

    #[test]
    fn test_refresh_sees_new_files() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("a.png"), b"x").unwrap();

        let mut preview = Preview::new();
        preview
            .refresh(dir.path(), &SortOptions::default())
            .unwrap();
        assert_eq!(preview.items().len(), 1);

        fs::write(dir.path().join("b.webp"), b"x").unwrap();
        preview
            .refresh(dir.path(), &SortOptions::default())
            .unwrap();
        assert_eq!(preview.items(), ["a.png", "b.webp"]);
    }

    #[test]
    fn test_missing_folder_clears_preview() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("a.png"), b"x").unwrap();

        let mut preview = Preview::new();
        preview
            .refresh(dir.path(), &SortOptions::default())
            .unwrap();
        preview
            .refresh(&dir.path().join("gone"), &SortOptions::default())
            .unwrap();
        assert!(preview.items().is_empty());
    }
}
