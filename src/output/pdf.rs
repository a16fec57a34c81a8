//! Paginated (PDF) export
//!
//! PDF output is best effort. Every backend sits behind [`PdfBackend`] and the
//! [`PdfExporter`] turns any failure, including an unavailable engine or a
//! timeout, into an [`ExportWarning`] instead of an error.

use crate::config::{ExportConfig, PdfBackendKind};
use crate::error::{Result, ResumeBuilderError};
use crate::output::artifact::{ArtifactKind, ExportArtifact, ExportWarning};
use crate::processing::markup::{self, BlockKind};
use async_trait::async_trait;
use log::{debug, info, warn};
use printpdf::{BuiltinFont, Mm, PdfDocument};
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::sync::Arc;
use std::time::Duration;
use tokio::process::Command;

/// Result of a backend capability check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Availability {
    Available,
    Unavailable(String),
}

impl Availability {
    pub fn is_available(&self) -> bool {
        matches!(self, Availability::Available)
    }
}

/// A strategy that turns rendered HTML into PDF bytes.
#[async_trait]
pub trait PdfBackend: Send + Sync {
    fn name(&self) -> &str;

    fn availability(&self) -> Availability;

    async fn render(&self, markup: &str) -> Result<Vec<u8>>;
}

pub struct PdfExporter {
    backend: Arc<dyn PdfBackend>,
    timeout: Duration,
}

impl PdfExporter {
    pub fn new(backend: Arc<dyn PdfBackend>, timeout: Duration) -> Self {
        Self { backend, timeout }
    }

    pub fn from_config(config: &ExportConfig) -> Self {
        Self::new(
            select_backend(config),
            Duration::from_secs(config.pdf_timeout_secs),
        )
    }

    pub fn backend_name(&self) -> &str {
        self.backend.name()
    }

    /// Single attempt at a PDF. Failures come back as a warning.
    pub async fn export(&self, markup: &str) -> std::result::Result<ExportArtifact, ExportWarning> {
        match self.try_export(markup).await {
            Ok(artifact) => {
                info!("PDF rendered by {} ({} bytes)", self.backend.name(), artifact.size_bytes);
                Ok(artifact)
            }
            Err(e) => {
                warn!("PDF export via {} failed: {}", self.backend.name(), e);
                Err(ExportWarning {
                    artifact: ArtifactKind::Pdf,
                    message: e.to_string(),
                })
            }
        }
    }

    async fn try_export(&self, markup: &str) -> Result<ExportArtifact> {
        if let Availability::Unavailable(reason) = self.backend.availability() {
            return Err(ResumeBuilderError::RenderEngineUnavailable(reason));
        }

        let bytes = tokio::time::timeout(self.timeout, self.backend.render(markup))
            .await
            .map_err(|_| ResumeBuilderError::RenderTimeout(self.timeout.as_secs()))??;

        if bytes.is_empty() {
            return Err(ResumeBuilderError::PdfRender(format!(
                "{} produced an empty document",
                self.backend.name()
            )));
        }

        Ok(ExportArtifact::new(ArtifactKind::Pdf, bytes))
    }
}

/// Pick the backend named in the configuration. `auto` prefers an installed
/// HTML engine and falls back to the builtin renderer.
pub fn select_backend(config: &ExportConfig) -> Arc<dyn PdfBackend> {
    match config.pdf_backend {
        PdfBackendKind::Builtin => Arc::new(BuiltinPdfBackend::default()),
        PdfBackendKind::Disabled => Arc::new(DisabledBackend),
        PdfBackendKind::Wkhtmltopdf => Arc::new(ExternalCommandBackend::locate(
            ExternalEngine::Wkhtmltopdf,
            config.wkhtmltopdf_path.clone(),
        )),
        PdfBackendKind::Weasyprint => Arc::new(ExternalCommandBackend::locate(
            ExternalEngine::Weasyprint,
            config.weasyprint_path.clone(),
        )),
        PdfBackendKind::Auto => {
            let candidates = [
                ExternalCommandBackend::locate(ExternalEngine::Weasyprint, config.weasyprint_path.clone()),
                ExternalCommandBackend::locate(ExternalEngine::Wkhtmltopdf, config.wkhtmltopdf_path.clone()),
            ];
            match candidates.into_iter().find(|b| b.availability().is_available()) {
                Some(backend) => {
                    debug!("Using {} for PDF export", backend.name());
                    Arc::new(backend)
                }
                None => {
                    debug!("No HTML to PDF engine installed, using builtin renderer");
                    Arc::new(BuiltinPdfBackend::default())
                }
            }
        }
    }
}

/// Always unavailable; used when PDF export is switched off.
pub struct DisabledBackend;

#[async_trait]
impl PdfBackend for DisabledBackend {
    fn name(&self) -> &str {
        "disabled"
    }

    fn availability(&self) -> Availability {
        Availability::Unavailable("PDF export is disabled in configuration".to_string())
    }

    async fn render(&self, _markup: &str) -> Result<Vec<u8>> {
        Err(ResumeBuilderError::RenderEngineUnavailable("disabled".to_string()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExternalEngine {
    Wkhtmltopdf,
    Weasyprint,
}

impl ExternalEngine {
    pub fn program(&self) -> &'static str {
        match self {
            ExternalEngine::Wkhtmltopdf => "wkhtmltopdf",
            ExternalEngine::Weasyprint => "weasyprint",
        }
    }

    fn args(&self, input: &Path, output: &Path) -> Vec<OsString> {
        let mut args: Vec<OsString> = match self {
            ExternalEngine::Wkhtmltopdf => vec!["--quiet".into(), "--encoding".into(), "utf-8".into()],
            ExternalEngine::Weasyprint => vec!["--quiet".into()],
        };
        args.push(input.as_os_str().to_owned());
        args.push(output.as_os_str().to_owned());
        args
    }
}

/// Runs an installed HTML to PDF converter. Each call works in its own
/// temporary directory so concurrent exports never share files.
pub struct ExternalCommandBackend {
    engine: ExternalEngine,
    binary: Option<PathBuf>,
}

impl ExternalCommandBackend {
    /// Resolve the engine binary from an explicit path or from `PATH`.
    pub fn locate(engine: ExternalEngine, explicit: Option<PathBuf>) -> Self {
        let binary = match explicit {
            Some(path) => path.is_file().then_some(path),
            None => find_on_path(engine.program()),
        };
        Self { engine, binary }
    }

    pub fn with_binary(engine: ExternalEngine, binary: PathBuf) -> Self {
        Self {
            engine,
            binary: Some(binary),
        }
    }

    pub fn binary(&self) -> Option<&Path> {
        self.binary.as_deref()
    }
}

#[async_trait]
impl PdfBackend for ExternalCommandBackend {
    fn name(&self) -> &str {
        self.engine.program()
    }

    fn availability(&self) -> Availability {
        match &self.binary {
            Some(path) if path.is_file() => Availability::Available,
            Some(path) => Availability::Unavailable(format!("{} not found at {}", self.engine.program(), path.display())),
            None => Availability::Unavailable(format!("{} is not installed", self.engine.program())),
        }
    }

    async fn render(&self, markup: &str) -> Result<Vec<u8>> {
        let binary = self.binary.as_ref().ok_or_else(|| {
            ResumeBuilderError::RenderEngineUnavailable(self.engine.program().to_string())
        })?;

        let workdir = tempfile::tempdir()?;
        let input = workdir.path().join("resume.html");
        let output = workdir.path().join("resume.pdf");
        tokio::fs::write(&input, markup).await?;

        let result = Command::new(binary)
            .args(self.engine.args(&input, &output))
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .output()
            .await
            .map_err(|e| ResumeBuilderError::RenderEngineUnavailable(format!("{}: {}", binary.display(), e)))?;

        if !result.status.success() {
            let stderr = String::from_utf8_lossy(&result.stderr);
            return Err(ResumeBuilderError::PdfRender(format!(
                "{} exited with {}: {}",
                self.engine.program(),
                result.status,
                stderr.trim()
            )));
        }

        Ok(tokio::fs::read(&output).await?)
    }
}

fn find_on_path(program: &str) -> Option<PathBuf> {
    let path = std::env::var_os("PATH")?;
    let file_name = if cfg!(windows) {
        format!("{}.exe", program)
    } else {
        program.to_string()
    };

    std::env::split_paths(&path)
        .map(|dir| dir.join(&file_name))
        .find(|candidate| candidate.is_file())
}

/// Page geometry and type sizes for the builtin renderer, in millimetres and points.
#[derive(Debug, Clone)]
pub struct PageLayout {
    pub width_mm: f32,
    pub height_mm: f32,
    pub margin_mm: f32,
    pub title_size: f32,
    pub heading_size: f32,
    pub body_size: f32,
}

impl Default for PageLayout {
    fn default() -> Self {
        // A4
        Self {
            width_mm: 210.0,
            height_mm: 297.0,
            margin_mm: 20.0,
            title_size: 22.0,
            heading_size: 14.0,
            body_size: 11.0,
        }
    }
}

impl PageLayout {
    /// Rough character capacity of one line at `font_size`, assuming an
    /// average Helvetica glyph width of half the em size.
    fn chars_per_line(&self, font_size: f32) -> usize {
        let usable_pt = (self.width_mm - 2.0 * self.margin_mm) * 72.0 / 25.4;
        ((usable_pt / (font_size * 0.5)) as usize).max(10)
    }

    fn line_height_mm(font_size: f32) -> f32 {
        font_size * 1.4 * 25.4 / 72.0
    }
}

/// Lays out the text content of the markup with printpdf's builtin fonts.
/// Needs no external program, so it is always available.
#[derive(Debug, Clone, Default)]
pub struct BuiltinPdfBackend {
    layout: PageLayout,
}

impl BuiltinPdfBackend {
    pub fn new(layout: PageLayout) -> Self {
        Self { layout }
    }

    fn render_blocking(layout: &PageLayout, markup: &str) -> Result<Vec<u8>> {
        let blocks = markup::blocks(markup);
        let title = blocks
            .iter()
            .find(|b| b.kind == BlockKind::Title)
            .map(|b| b.text.clone())
            .unwrap_or_else(|| "Resume".to_string());

        let (doc, page, layer) = PdfDocument::new(
            title,
            Mm(layout.width_mm),
            Mm(layout.height_mm),
            "Layer 1",
        );
        let regular = doc
            .add_builtin_font(BuiltinFont::Helvetica)
            .map_err(|e| ResumeBuilderError::PdfRender(e.to_string()))?;
        let bold = doc
            .add_builtin_font(BuiltinFont::HelveticaBold)
            .map_err(|e| ResumeBuilderError::PdfRender(e.to_string()))?;

        let mut current = doc.get_page(page).get_layer(layer);
        let mut y = layout.height_mm - layout.margin_mm;

        for block in &blocks {
            let (size, font, prefix, gap_before) = match block.kind {
                BlockKind::Title => (layout.title_size, &bold, "", 0.0),
                BlockKind::Heading => (layout.heading_size, &bold, "", 4.0),
                BlockKind::ListItem => (layout.body_size, &regular, "- ", 0.0),
                BlockKind::Paragraph => (layout.body_size, &regular, "", 1.0),
            };
            let line_height = PageLayout::line_height_mm(size);
            y -= gap_before;

            let width = layout.chars_per_line(size);
            for (i, line) in wrap_block(&block.text, width.saturating_sub(prefix.len())).iter().enumerate() {
                if y - line_height < layout.margin_mm {
                    let (next_page, next_layer) =
                        doc.add_page(Mm(layout.width_mm), Mm(layout.height_mm), "Layer 1");
                    current = doc.get_page(next_page).get_layer(next_layer);
                    y = layout.height_mm - layout.margin_mm;
                }
                y -= line_height;

                let lead = if i == 0 { prefix } else { "  " };
                current.use_text(format!("{}{}", lead, line), size, Mm(layout.margin_mm), Mm(y), font);
            }
        }

        drop(current);
        doc.save_to_bytes()
            .map_err(|e| ResumeBuilderError::PdfRender(e.to_string()))
    }
}

#[async_trait]
impl PdfBackend for BuiltinPdfBackend {
    fn name(&self) -> &str {
        "builtin"
    }

    fn availability(&self) -> Availability {
        Availability::Available
    }

    async fn render(&self, markup: &str) -> Result<Vec<u8>> {
        let layout = self.layout.clone();
        let markup = markup.to_string();

        tokio::task::spawn_blocking(move || Self::render_blocking(&layout, &markup))
            .await
            .map_err(|e| ResumeBuilderError::PdfRender(e.to_string()))?
    }
}

/// Greedy word wrap. Explicit newlines always start a new line.
pub fn wrap_block(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut lines = Vec::new();

    for paragraph in text.lines() {
        let mut line = String::new();
        for word in paragraph.split_whitespace() {
            let needed = if line.is_empty() { word.chars().count() } else { line.chars().count() + 1 + word.chars().count() };
            if needed > width && !line.is_empty() {
                lines.push(std::mem::take(&mut line));
            }
            if !line.is_empty() {
                line.push(' ');
            }
            line.push_str(word);
        }
        if !line.is_empty() {
            lines.push(line);
        }
    }

    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    const MARKUP: &str = "<html><body><h1>Ada Lovelace</h1><h2>Key Skills</h2><ul><li>Math</li></ul><p>Pioneer</p></body></html>";

    struct SlowBackend;

    #[async_trait]
    impl PdfBackend for SlowBackend {
        fn name(&self) -> &str {
            "slow"
        }

        fn availability(&self) -> Availability {
            Availability::Available
        }

        async fn render(&self, _markup: &str) -> Result<Vec<u8>> {
            tokio::time::sleep(Duration::from_secs(5)).await;
            Ok(b"%PDF".to_vec())
        }
    }

    #[test]
    fn test_wrap_block() {
        let lines = wrap_block("one two three four\nfive", 9);
        assert_eq!(lines, vec!["one two", "three", "four", "five"]);
    }

    #[test]
    fn test_wrap_keeps_long_words_whole() {
        let lines = wrap_block("supercalifragilistic ok", 5);
        assert_eq!(lines, vec!["supercalifragilistic", "ok"]);
    }

    #[tokio::test]
    async fn test_builtin_backend_produces_pdf() {
        let exporter = PdfExporter::new(Arc::new(BuiltinPdfBackend::default()), Duration::from_secs(30));
        let artifact = exporter.export(MARKUP).await.unwrap();

        assert_eq!(artifact.kind, ArtifactKind::Pdf);
        assert!(artifact.bytes().starts_with(b"%PDF"));
    }

    #[tokio::test]
    async fn test_builtin_backend_paginates_long_documents() {
        let items: String = (0..200).map(|i| format!("<li>Skill number {}</li>", i)).collect();
        let markup = format!("<h1>Long</h1><ul>{}</ul>", items);

        let bytes = BuiltinPdfBackend::default().render(&markup).await.unwrap();
        assert!(bytes.starts_with(b"%PDF"));
    }

    #[tokio::test]
    async fn test_disabled_backend_yields_warning() {
        let exporter = PdfExporter::new(Arc::new(DisabledBackend), Duration::from_secs(1));
        let warning = exporter.export(MARKUP).await.unwrap_err();

        assert_eq!(warning.artifact, ArtifactKind::Pdf);
        assert!(warning.message.contains("unavailable"));
    }

    #[tokio::test]
    async fn test_missing_binary_yields_warning() {
        let backend = ExternalCommandBackend::locate(
            ExternalEngine::Wkhtmltopdf,
            Some(PathBuf::from("/nonexistent/bin/wkhtmltopdf")),
        );
        assert!(!backend.availability().is_available());
        assert_eq!(backend.binary(), None);

        let exporter = PdfExporter::new(Arc::new(backend), Duration::from_secs(1));
        assert!(exporter.export(MARKUP).await.is_err());
    }

    #[tokio::test]
    async fn test_timeout_yields_warning() {
        let exporter = PdfExporter::new(Arc::new(SlowBackend), Duration::from_millis(50));
        let warning = exporter.export(MARKUP).await.unwrap_err();

        assert!(warning.message.contains("timed out"));
    }

    #[test]
    fn test_select_backend_from_config() {
        let mut config = ExportConfig::default();

        config.pdf_backend = PdfBackendKind::Builtin;
        assert_eq!(select_backend(&config).name(), "builtin");

        config.pdf_backend = PdfBackendKind::Disabled;
        assert!(!select_backend(&config).availability().is_available());

        config.pdf_backend = PdfBackendKind::Weasyprint;
        config.weasyprint_path = Some(PathBuf::from("/nonexistent/weasyprint"));
        let backend = select_backend(&config);
        assert_eq!(backend.name(), "weasyprint");
        assert!(!backend.availability().is_available());
    }
}
