//! Export artifacts produced for one submission

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ArtifactKind {
    Html,
    Docx,
    Pdf,
}

impl ArtifactKind {
    pub fn file_name(&self) -> &'static str {
        match self {
            ArtifactKind::Html => "resume.html",
            ArtifactKind::Docx => "resume.docx",
            ArtifactKind::Pdf => "resume.pdf",
        }
    }

    pub fn mime_type(&self) -> &'static str {
        match self {
            ArtifactKind::Html => "text/html",
            ArtifactKind::Docx => {
                "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
            }
            ArtifactKind::Pdf => "application/pdf",
        }
    }
}

impl fmt::Display for ArtifactKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArtifactKind::Html => write!(f, "HTML"),
            ArtifactKind::Docx => write!(f, "DOCX"),
            ArtifactKind::Pdf => write!(f, "PDF"),
        }
    }
}

/// A finished output file held in memory. Never mutated after creation.
#[derive(Debug, Clone, Serialize)]
pub struct ExportArtifact {
    pub kind: ArtifactKind,
    pub file_name: String,
    pub mime_type: String,
    pub size_bytes: usize,
    #[serde(skip)]
    bytes: Vec<u8>,
}

impl ExportArtifact {
    pub fn new(kind: ArtifactKind, bytes: Vec<u8>) -> Self {
        Self {
            kind,
            file_name: kind.file_name().to_string(),
            mime_type: kind.mime_type().to_string(),
            size_bytes: bytes.len(),
            bytes,
        }
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// The payload as text, for markup artifacts.
    pub fn as_text(&self) -> Option<&str> {
        std::str::from_utf8(&self.bytes).ok()
    }
}

/// An artifact that could not be produced. Other artifacts are unaffected.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportFailure {
    pub artifact: ArtifactKind,
    pub message: String,
}

/// A best-effort export that was skipped or failed and was downgraded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportWarning {
    pub artifact: ArtifactKind,
    pub message: String,
}

impl fmt::Display for ExportWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} export skipped: {}", self.artifact, self.message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_artifact_metadata() {
        let artifact = ExportArtifact::new(ArtifactKind::Pdf, b"%PDF-1.3".to_vec());

        assert_eq!(artifact.file_name, "resume.pdf");
        assert_eq!(artifact.mime_type, "application/pdf");
        assert_eq!(artifact.size_bytes, 8);
    }

    #[test]
    fn test_serialized_artifact_omits_payload() {
        let artifact = ExportArtifact::new(ArtifactKind::Html, b"<h1>Ada</h1>".to_vec());
        let json = serde_json::to_value(&artifact).unwrap();

        assert_eq!(json["kind"], "html");
        assert_eq!(json["file_name"], "resume.html");
        assert!(json.get("bytes").is_none());
    }
}
