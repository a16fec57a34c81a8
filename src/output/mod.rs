//! Rendering and export of resume documents

pub mod artifact;
pub mod docx;
pub mod formatter;
pub mod pdf;
pub mod report;
pub mod templates;

pub use artifact::{ArtifactKind, ExportArtifact, ExportFailure, ExportWarning};
pub use docx::DocxExporter;
pub use pdf::{PdfBackend, PdfExporter};
pub use report::GenerationReport;
pub use templates::{TemplateId, TemplateRenderer, TemplateSettings};
