pub mod file_scanner;
pub mod image_decoder;
pub mod key_extractor;
pub mod ordering;
pub mod pdf_writer;

pub use file_scanner::{list_candidates, list_image_names, CandidateFile};
pub use image_decoder::{ImageDecoder, RasterDecoder, RasterImage};
pub use key_extractor::{extract_date, extract_page_number, strip_extension};
pub use ordering::{OrderingEngine, SortKey};
pub use pdf_writer::{LopdfWriter, PdfWriter};
