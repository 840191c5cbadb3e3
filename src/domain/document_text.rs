use std::collections::BTreeMap;
use std::path::PathBuf;

use super::DocumentKind;

/// Extracted text grouped by document category.
///
/// Categories iterate in [`DocumentKind`] order; within a category the texts
/// keep the order in which their files were supplied.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocumentTexts {
    by_kind: BTreeMap<DocumentKind, Vec<String>>,
}

impl DocumentTexts {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, kind: DocumentKind, text: String) {
        self.by_kind.entry(kind).or_default().push(text);
    }

    pub fn get(&self, kind: DocumentKind) -> &[String] {
        self.by_kind.get(&kind).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn iter(&self) -> impl Iterator<Item = (DocumentKind, &[String])> {
        self.by_kind.iter().map(|(kind, texts)| (*kind, texts.as_slice()))
    }

    pub fn is_empty(&self) -> bool {
        self.by_kind.values().all(Vec::is_empty)
    }

    pub fn document_count(&self) -> usize {
        self.by_kind.values().map(Vec::len).sum()
    }

    /// Single text blob handed to the model: a label line per category
    /// followed by each file's text.
    pub fn flatten(&self) -> String {
        let mut sections = Vec::new();
        for (kind, texts) in self.iter() {
            let mut section = format!("=== {kind} ===");
            for text in texts {
                section.push('\n');
                section.push_str(text);
                section.push('\n');
            }
            sections.push(section);
        }
        sections.join("\n")
    }
}

/// Result of running the aggregator over a set of staged files.
#[derive(Debug, Clone, Default)]
pub struct AggregatedDocuments {
    pub texts: DocumentTexts,
    pub skipped: Vec<PathBuf>,
}
