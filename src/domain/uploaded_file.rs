use std::path::Path;

/// A file received in a single upload request.
#[derive(Debug, Clone, PartialEq)]
pub struct UploadedFile {
    pub filename: String,
    pub content: Vec<u8>,
}

impl UploadedFile {
    pub fn new(filename: impl Into<String>, content: impl Into<Vec<u8>>) -> Self {
        Self {
            filename: filename.into(),
            content: content.into(),
        }
    }

    pub fn size_bytes(&self) -> u64 {
        self.content.len() as u64
    }

    /// Final path component of the client-supplied name, with anything that
    /// could escape the staging directory replaced.
    pub fn safe_filename(&self) -> String {
        let base = Path::new(&self.filename)
            .file_name()
            .and_then(|name| name.to_str())
            .unwrap_or("");

        let cleaned: String = base
            .chars()
            .map(|c| match c {
                '/' | '\\' | ':' | '\0' => '_',
                c if c.is_control() => '_',
                c => c,
            })
            .collect();

        if cleaned.is_empty() || cleaned == "." || cleaned == ".." {
            "upload".to_string()
        } else {
            cleaned
        }
    }
}
