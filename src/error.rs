//! Error handling for the resume builder

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ResumeBuilderError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Unknown template: {0}")]
    TemplateNotFound(String),

    #[error("Template rendering error: {0}")]
    Render(String),

    #[error("Failed to write {artifact}: {source}")]
    ExportIo {
        artifact: String,
        #[source]
        source: std::io::Error,
    },

    #[error("DOCX generation error: {0}")]
    Docx(String),

    #[error("PDF rendering engine unavailable: {0}")]
    RenderEngineUnavailable(String),

    #[error("PDF rendering timed out after {0}s")]
    RenderTimeout(u64),

    #[error("PDF rendering failed: {0}")]
    PdfRender(String),

    #[error("No extractable terms to compare")]
    DegenerateVocabulary,

    #[error("PDF extraction error: {0}")]
    PdfExtraction(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("File format not supported: {0}")]
    UnsupportedFormat(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

pub type Result<T> = std::result::Result<T, ResumeBuilderError>;

/// Convert anyhow errors, keeping the whole context chain in the message
impl From<anyhow::Error> for ResumeBuilderError {
    fn from(err: anyhow::Error) -> Self {
        ResumeBuilderError::InvalidInput(format!("{:#}", err))
    }
}

impl From<askama::Error> for ResumeBuilderError {
    fn from(err: askama::Error) -> Self {
        ResumeBuilderError::Render(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_anyhow_context_is_kept() {
        let err: ResumeBuilderError = anyhow::anyhow!("unexpected end of input")
            .context("Failed to parse submission 'ada.json'")
            .into();

        assert!(matches!(
            err,
            ResumeBuilderError::InvalidInput(ref message)
                if message == "Failed to parse submission 'ada.json': unexpected end of input"
        ));
    }

    #[test]
    fn test_export_io_display_names_artifact() {
        let err = ResumeBuilderError::ExportIo {
            artifact: "resume.docx".to_string(),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        };
        assert!(err.to_string().contains("resume.docx"));
    }
}
