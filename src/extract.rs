//! File text extraction for the upload endpoint.
//!
//! Best-effort: decoding problems are tolerated by substitution where the
//! format allows it. Whether the extracted text is usable (non-empty) is the
//! API layer's call.

use crate::error::ExtractError;

/// Supported upload formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileKind {
    Txt,
    Pdf,
    Csv,
}

impl FileKind {
    /// Detect the format from the file name extension, case-insensitive.
    pub fn from_filename(name: &str) -> Option<Self> {
        let lower = name.to_lowercase();
        if lower.ends_with(".txt") {
            Some(Self::Txt)
        } else if lower.ends_with(".pdf") {
            Some(Self::Pdf)
        } else if lower.ends_with(".csv") {
            Some(Self::Csv)
        } else {
            None
        }
    }

    /// Short label for logging and error messages.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Txt => "txt",
            Self::Pdf => "pdf",
            Self::Csv => "csv",
        }
    }
}

/// Extract text from raw file bytes.
pub fn extract_text(kind: FileKind, bytes: &[u8]) -> Result<String, ExtractError> {
    match kind {
        FileKind::Txt => Ok(String::from_utf8_lossy(bytes).into_owned()),
        FileKind::Pdf => pdf_extract::extract_text_from_mem(bytes).map_err(|e| {
            ExtractError::Unreadable {
                kind: "pdf".into(),
                reason: e.to_string(),
            }
        }),
        FileKind::Csv => Ok(flatten_csv(&String::from_utf8_lossy(bytes))),
    }
}

/// Flatten CSV rows into lines of whitespace-joined cells.
///
/// Rows whose first cell is "assunto"/"subject" (case-insensitive) are
/// treated as header rows and skipped.
fn flatten_csv(decoded: &str) -> String {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(decoded.as_bytes());

    let mut out = String::new();
    for record in reader.records() {
        let Ok(record) = record else {
            continue;
        };
        if let Some(first) = record.get(0)
            && matches!(first.trim().to_lowercase().as_str(), "assunto" | "subject")
        {
            continue;
        }
        let line = record.iter().collect::<Vec<_>>().join(" ");
        out.push_str(&line);
        out.push('\n');
    }
    out
}
