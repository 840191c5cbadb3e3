use std::path::Path;
use std::sync::Arc;

use axum::Router;
use lopdf::content::{Content, Operation};
use lopdf::{Object, Stream, dictionary};

use lading::application::ports::{LlmClient, TextExtractor};
use lading::application::services::{
    DocumentAggregator, DocumentProcessingService, FieldExtractionService, ProcessingOptions,
};
use lading::domain::DocumentKind;
use lading::infrastructure::text_processing::{PdfAdapter, SpreadsheetAdapter};
use lading::presentation::{AppState, Settings, create_router};

pub const MULTIPART_BOUNDARY: &str = "lading-test-boundary";

/// Writes a PDF with one line of Helvetica text per page.
pub fn write_pdf(path: &Path, pages: &[&str]) {
    let mut doc = lopdf::Document::with_version("1.5");
    let pages_id = doc.new_object_id();
    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! { "F1" => font_id },
    });

    let mut kids: Vec<Object> = Vec::new();
    for text in pages {
        let operations = if text.is_empty() {
            Vec::new()
        } else {
            vec![
                Operation::new("BT", vec![]),
                Operation::new("Tf", vec!["F1".into(), 12.into()]),
                Operation::new("Td", vec![72.into(), 720.into()]),
                Operation::new("Tj", vec![Object::string_literal(*text)]),
                Operation::new("ET", vec![]),
            ]
        };
        let content = Content { operations };
        let content_id = doc.add_object(Stream::new(dictionary! {}, content.encode().unwrap()));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
            "Resources" => resources_id,
            "MediaBox" => vec![0.into(), 0.into(), 595.into(), 842.into()],
        });
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
    doc.save(path).unwrap();
}

/// Writes an `.xlsx` workbook. Empty strings leave the cell unset.
pub fn write_workbook(path: &Path, sheets: &[(&str, Vec<Vec<&str>>)]) {
    let mut workbook = rust_xlsxwriter::Workbook::new();
    for (name, rows) in sheets {
        let worksheet = workbook.add_worksheet();
        worksheet.set_name(*name).unwrap();
        for (row_index, row) in rows.iter().enumerate() {
            for (col_index, value) in row.iter().enumerate() {
                if !value.is_empty() {
                    worksheet
                        .write_string(row_index as u32, col_index as u16, *value)
                        .unwrap();
                }
            }
        }
    }
    workbook.save(path).unwrap();
}

pub fn pdf_bytes(pages: &[&str]) -> Vec<u8> {
    let dir = tempfile::TempDir::new().unwrap();
    let path = dir.path().join("fixture.pdf");
    write_pdf(&path, pages);
    std::fs::read(path).unwrap()
}

pub fn workbook_bytes(sheets: &[(&str, Vec<Vec<&str>>)]) -> Vec<u8> {
    let dir = tempfile::TempDir::new().unwrap();
    let path = dir.path().join("fixture.xlsx");
    write_workbook(&path, sheets);
    std::fs::read(path).unwrap()
}

/// Multipart body with every file under the `files` field.
pub fn multipart_body(files: &[(&str, &[u8])]) -> Vec<u8> {
    let mut body = Vec::new();
    for (filename, content) in files {
        body.extend_from_slice(format!("--{MULTIPART_BOUNDARY}\r\n").as_bytes());
        body.extend_from_slice(
            format!(
                "Content-Disposition: form-data; name=\"files\"; filename=\"{filename}\"\r\n"
            )
            .as_bytes(),
        );
        body.extend_from_slice(b"Content-Type: application/octet-stream\r\n\r\n");
        body.extend_from_slice(content);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{MULTIPART_BOUNDARY}--\r\n").as_bytes());
    body
}

pub fn multipart_content_type() -> String {
    format!("multipart/form-data; boundary={MULTIPART_BOUNDARY}")
}

pub fn test_settings() -> Settings {
    Settings::from_builder(Settings::defaults().unwrap()).unwrap()
}

pub fn default_aggregator() -> DocumentAggregator {
    let pdf: Arc<dyn TextExtractor> = Arc::new(PdfAdapter::new());
    let spreadsheet: Arc<dyn TextExtractor> = Arc::new(SpreadsheetAdapter::new());
    DocumentAggregator::new(vec![
        (DocumentKind::Pdf, pdf),
        (DocumentKind::Spreadsheet, spreadsheet),
    ])
}

pub fn processing_service<L>(
    llm_client: Arc<L>,
    staging_root: &Path,
) -> DocumentProcessingService<L>
where
    L: LlmClient + 'static,
{
    DocumentProcessingService::new(
        Arc::new(default_aggregator()),
        Arc::new(FieldExtractionService::new(llm_client)),
        None,
        ProcessingOptions {
            staging_root: Some(staging_root.to_path_buf()),
            ..ProcessingOptions::default()
        },
    )
}

pub fn create_test_app<L>(llm_client: Arc<L>, staging_root: &Path) -> Router
where
    L: LlmClient + 'static,
{
    create_test_app_with_settings(llm_client, staging_root, test_settings())
}

pub fn create_test_app_with_settings<L>(
    llm_client: Arc<L>,
    staging_root: &Path,
    settings: Settings,
) -> Router
where
    L: LlmClient + 'static,
{
    let service = Arc::new(processing_service(llm_client, staging_root));
    create_router(AppState::new(service, settings))
}

/// Number of entries left under the staging root.
pub fn entries_in(dir: &Path) -> usize {
    std::fs::read_dir(dir).map(|entries| entries.count()).unwrap_or(0)
}
