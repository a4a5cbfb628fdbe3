mod pdf;
mod walker;

pub use pdf::{load_files, load_pages, PageExtractor, PageText, PdfExtractor};
pub use walker::list_pdf_files;
