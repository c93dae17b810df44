//! 图片解码 - 业务能力层
//!
//! 只负责"把一个文件解码成统一的 RGB 图像"，不关心顺序和批次

use image::RgbImage;
use std::path::Path;

use crate::error::DecodeError;

/// 解码后的内存图像（8 位 RGB）
///
/// 释放即回收像素缓冲区
#[derive(Debug, Clone, PartialEq)]
pub struct RasterImage {
    pixels: RgbImage,
}

impl RasterImage {
    pub fn new(pixels: RgbImage) -> Self {
        Self { pixels }
    }

    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    /// 按行排列的 RGB 采样
    pub fn samples(&self) -> &[u8] {
        self.pixels.as_raw()
    }
}

/// 图片解码能力
pub trait ImageDecoder: Send + Sync {
    fn decode(&self, path: &Path) -> Result<RasterImage, DecodeError>;
}

/// 基于 `image` 库的解码器
///
/// 按文件内容识别格式；透明通道、调色板、灰度统一转换为 RGB
#[derive(Debug, Clone, Copy, Default)]
pub struct RasterDecoder;

impl ImageDecoder for RasterDecoder {
    fn decode(&self, path: &Path) -> Result<RasterImage, DecodeError> {
        let reader = image::io::Reader::open(path)
            .and_then(|r| r.with_guessed_format())
            .map_err(|source| DecodeError::Open {
                path: path.to_path_buf(),
                source,
            })?;

        let img = reader.decode().map_err(|source| DecodeError::Image {
            path: path.to_path_buf(),
            source,
        })?;

        Ok(RasterImage::new(img.to_rgb8()))
    }
}
