mod pdf_adapter;
mod spreadsheet_adapter;

pub use pdf_adapter::{EXTRACTION_TIMEOUT, PdfAdapter};
pub use spreadsheet_adapter::{SpreadsheetAdapter, render_cell, render_workbook};
