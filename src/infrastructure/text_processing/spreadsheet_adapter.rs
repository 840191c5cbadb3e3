use std::path::{Path, PathBuf};

use async_trait::async_trait;
use calamine::{Data, Range, Reader, open_workbook_auto};
use chrono::NaiveTime;

use crate::application::ports::{DocumentReadError, TextExtractor};

use super::pdf_adapter::EXTRACTION_TIMEOUT;

const CELL_SEPARATOR: &str = "\t";

/// Flattens a workbook into one `Sheet: <name>` block per sheet, one
/// tab-separated line per non-empty row. Formula cells give their cached
/// value.
#[derive(Default)]
pub struct SpreadsheetAdapter;

impl SpreadsheetAdapter {
    pub fn new() -> Self {
        Self
    }

    fn read_sheets(path: &Path) -> Result<Vec<(String, Range<Data>)>, DocumentReadError> {
        let mut workbook = open_workbook_auto(path).map_err(|e| DocumentReadError::Open {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        let mut sheets = Vec::new();
        for name in workbook.sheet_names() {
            let range = workbook
                .worksheet_range(&name)
                .map_err(|e| DocumentReadError::Parse {
                    path: path.to_path_buf(),
                    reason: format!("sheet '{name}': {e}"),
                })?;
            sheets.push((name, range));
        }

        Ok(sheets)
    }
}

#[async_trait]
impl TextExtractor for SpreadsheetAdapter {
    #[tracing::instrument(skip(self, path), fields(path = %path.display()))]
    async fn extract_text(&self, path: &Path) -> Result<String, DocumentReadError> {
        let owned: PathBuf = path.to_path_buf();

        let sheets = tokio::time::timeout(
            EXTRACTION_TIMEOUT,
            tokio::task::spawn_blocking(move || Self::read_sheets(&owned)),
        )
        .await
        .map_err(|_| DocumentReadError::TimedOut {
            path: path.to_path_buf(),
        })?
        .map_err(|e| DocumentReadError::TaskFailed(e.to_string()))??;

        tracing::info!(sheet_count = sheets.len(), "Workbook read complete");

        Ok(render_workbook(&sheets))
    }
}

/// Renders sheets as text. Sheets without any non-empty row are left out.
/// Rows are laid out from column A even when the used range starts later.
pub fn render_workbook(sheets: &[(String, Range<Data>)]) -> String {
    let mut lines = Vec::new();

    for (name, range) in sheets {
        let leading = range
            .start()
            .map(|(_, col)| CELL_SEPARATOR.repeat(col as usize))
            .unwrap_or_default();

        let rows: Vec<String> = range
            .rows()
            .filter(|row| row.iter().any(|cell| !is_blank(cell)))
            .map(|row| {
                let cells = row
                    .iter()
                    .map(render_cell)
                    .collect::<Vec<_>>()
                    .join(CELL_SEPARATOR);
                format!("{leading}{cells}")
            })
            .collect();

        if rows.is_empty() {
            continue;
        }

        lines.push(format!("Sheet: {name}"));
        lines.extend(rows);
        lines.push(String::new());
    }

    lines.join("\n")
}

fn is_blank(cell: &Data) -> bool {
    match cell {
        Data::Empty => true,
        Data::String(s) => s.is_empty(),
        _ => false,
    }
}

pub fn render_cell(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(s) => s.clone(),
        Data::Int(i) => i.to_string(),
        Data::Float(f) => f.to_string(),
        Data::Bool(b) => b.to_string(),
        Data::DateTime(dt) => match dt.as_datetime() {
            Some(value) if !dt.is_duration() => {
                if value.time() == NaiveTime::MIN {
                    value.format("%Y-%m-%d").to_string()
                } else {
                    value.format("%Y-%m-%d %H:%M:%S").to_string()
                }
            }
            _ => dt.as_f64().to_string(),
        },
        Data::DateTimeIso(s) | Data::DurationIso(s) => s.clone(),
        Data::Error(e) => e.to_string(),
    }
}
