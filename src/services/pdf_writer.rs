//! 多页 PDF 写入 - 业务能力层
//!
//! 每张图片一页，页面尺寸等于像素尺寸（72 dpi），第一张为首页，其余依次追加

use flate2::write::ZlibEncoder;
use flate2::Compression;
use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, ObjectId, Stream};
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;
use tracing::debug;

use crate::error::WriteError;
use crate::services::image_decoder::RasterImage;

/// PDF 写入能力
pub trait PdfWriter: Send + Sync {
    fn write(&self, path: &Path, images: &[RasterImage]) -> Result<(), WriteError>;
}

/// 基于 `lopdf` 的写入器
#[derive(Debug, Clone, Copy, Default)]
pub struct LopdfWriter;

impl PdfWriter for LopdfWriter {
    fn write(&self, path: &Path, images: &[RasterImage]) -> Result<(), WriteError> {
        let mut doc = build_document(images)?;

        // 先在内存中生成完整文件，写入同目录临时文件后改名，失败时不留半截文件
        let mut bytes = Vec::new();
        doc.save_to(&mut bytes).map_err(|source| io_error(path, source))?;

        let dir = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        let mut staged = NamedTempFile::new_in(dir).map_err(|source| io_error(path, source))?;
        staged
            .write_all(&bytes)
            .and_then(|_| staged.as_file().sync_all())
            .map_err(|source| io_error(path, source))?;
        staged
            .persist(path)
            .map_err(|e| io_error(path, e.error))?;

        debug!("写入 {} ({} 页, {} 字节)", path.display(), images.len(), bytes.len());
        Ok(())
    }
}

fn io_error(path: &Path, source: std::io::Error) -> WriteError {
    WriteError::Io {
        path: path.to_path_buf(),
        source,
    }
}

/// 组装 PDF 文档
pub fn build_document(images: &[RasterImage]) -> Result<Document, WriteError> {
    if images.is_empty() {
        return Err(WriteError::NoPages);
    }

    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let mut kids: Vec<Object> = Vec::with_capacity(images.len());
    for image in images {
        let page_id = add_image_page(&mut doc, pages_id, image)?;
        kids.push(page_id.into());
    }

    let count = kids.len() as i64;
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => count,
        }),
    );

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    Ok(doc)
}

fn add_image_page(
    doc: &mut Document,
    pages_id: ObjectId,
    image: &RasterImage,
) -> Result<ObjectId, WriteError> {
    let width = image.width() as i64;
    let height = image.height() as i64;

    let image_stream = Stream::new(
        dictionary! {
            "Type" => "XObject",
            "Subtype" => "Image",
            "Width" => width,
            "Height" => height,
            "ColorSpace" => "DeviceRGB",
            "BitsPerComponent" => 8,
            "Filter" => "FlateDecode",
        },
        compress(image.samples())?,
    );
    let image_id = doc.add_object(image_stream);

    // 把单位正方形的图片缩放到整页
    let content = Content {
        operations: vec![
            Operation::new("q", vec![]),
            Operation::new(
                "cm",
                vec![
                    width.into(),
                    0.into(),
                    0.into(),
                    height.into(),
                    0.into(),
                    0.into(),
                ],
            ),
            Operation::new("Do", vec![Object::Name(b"Im0".to_vec())]),
            Operation::new("Q", vec![]),
        ],
    };
    let content_id = doc.add_object(Stream::new(dictionary! {}, content.encode()?));

    let page_id = doc.add_object(dictionary! {
        "Type" => "Page",
        "Parent" => pages_id,
        "MediaBox" => vec![0.into(), 0.into(), width.into(), height.into()],
        "Contents" => content_id,
        "Resources" => dictionary! {
            "XObject" => dictionary! {
                "Im0" => image_id,
            },
        },
    });

    Ok(page_id)
}

fn compress(raw: &[u8]) -> Result<Vec<u8>, WriteError> {
    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(raw).map_err(WriteError::Compress)?;
    encoder.finish().map_err(WriteError::Compress)
}
