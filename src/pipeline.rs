//! Resume generation pipeline
//!
//! ```text
//! Received -> Normalized -> Rendered -> { MarkupReady,
//!                                         WordProcessorReady | WordProcessorFailed,
//!                                         PaginatedReady | PaginatedWarning }
//!          -> Scored | Unscored -> Complete
//! ```
//!
//! Only an unknown template aborts a run. The DOCX export, the PDF export and
//! scoring run concurrently and a failure in one never affects the others.

use crate::config::Config;
use crate::error::{Result, ResumeBuilderError};
use crate::input::Submission;
use crate::output::artifact::{ArtifactKind, ExportArtifact, ExportFailure};
use crate::output::docx::DocxExporter;
use crate::output::pdf::PdfExporter;
use crate::output::report::{GenerationReport, Stage};
use crate::output::templates::{TemplateId, TemplateRenderer};
use crate::processing::{ResumeDocument, SimilarityScorer};
use log::{info, warn};
use std::sync::Arc;

pub struct Pipeline {
    renderer: TemplateRenderer,
    docx: DocxExporter,
    pdf: PdfExporter,
    scorer: Arc<SimilarityScorer>,
    default_template: TemplateId,
    scoring_enabled: bool,
}

impl Pipeline {
    pub fn new(renderer: TemplateRenderer, docx: DocxExporter, pdf: PdfExporter, scorer: SimilarityScorer) -> Self {
        Self {
            renderer,
            docx,
            pdf,
            scorer: Arc::new(scorer),
            default_template: TemplateId::default(),
            scoring_enabled: true,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        let settings = config.template_settings();
        let docx = DocxExporter::new(settings.placeholder_name.clone());
        Self::new(
            TemplateRenderer::new(settings),
            docx,
            PdfExporter::from_config(&config.export),
            SimilarityScorer::from_config(&config.scoring),
        )
        .with_default_template(config.templates.default_template)
        .with_scoring(config.scoring.enabled)
    }

    pub fn with_default_template(mut self, template: TemplateId) -> Self {
        self.default_template = template;
        self
    }

    pub fn with_scoring(mut self, enabled: bool) -> Self {
        self.scoring_enabled = enabled;
        self
    }

    pub fn pdf_backend(&self) -> &str {
        self.pdf.backend_name()
    }

    /// Process one submission. Returns an error only for an unknown template;
    /// every other problem is recorded in the report.
    pub async fn run(&self, submission: &Submission) -> Result<GenerationReport> {
        let template = match submission.template_id.as_deref() {
            Some(id) => id.parse::<TemplateId>()?,
            None => self.default_template,
        };
        let mut report = GenerationReport::new(template);

        let document = ResumeDocument::from_submission(submission);
        report.advance(Stage::Normalized);

        let markup = self.renderer.render(template, &document)?;
        report.advance(Stage::Rendered);

        report.artifacts.push(ExportArtifact::new(ArtifactKind::Html, markup.clone().into_bytes()));
        report.advance(Stage::MarkupReady);

        let job_text = if self.scoring_enabled {
            submission.job_text().map(str::to_string)
        } else {
            None
        };

        let (docx_result, pdf_result, score) = tokio::join!(
            self.export_docx(&document),
            self.pdf.export(&markup),
            self.score(&document, job_text),
        );

        match docx_result {
            Ok(artifact) => {
                report.artifacts.push(artifact);
                report.advance(Stage::WordProcessorReady);
            }
            Err(e) => {
                warn!("DOCX export failed: {}", e);
                report.failures.push(ExportFailure {
                    artifact: ArtifactKind::Docx,
                    message: e.to_string(),
                });
                report.advance(Stage::WordProcessorFailed);
            }
        }

        match pdf_result {
            Ok(artifact) => {
                report.artifacts.push(artifact);
                report.advance(Stage::PaginatedReady);
            }
            Err(warning) => {
                report.warnings.push(warning);
                report.advance(Stage::PaginatedWarning);
            }
        }

        match score {
            Some(score) => {
                report.score = Some(score);
                report.advance(Stage::Scored);
            }
            None => report.advance(Stage::Unscored),
        }

        report.advance(Stage::Complete);
        info!(
            "Generated {} artifact(s) with template {}",
            report.artifacts.len(),
            template
        );
        Ok(report)
    }

    async fn export_docx(&self, document: &ResumeDocument) -> Result<ExportArtifact> {
        let exporter = self.docx.clone();
        let document = document.clone();

        tokio::task::spawn_blocking(move || exporter.export(&document))
            .await
            .map_err(|e| ResumeBuilderError::Docx(e.to_string()))?
    }

    async fn score(&self, document: &ResumeDocument, job_text: Option<String>) -> Option<f64> {
        let job_text = job_text?;
        let scorer = Arc::clone(&self.scorer);
        let resume_text = document.resume_text();

        match tokio::task::spawn_blocking(move || scorer.score(&resume_text, &job_text)).await {
            Ok(score) => Some(score),
            Err(e) => {
                warn!("Scoring task failed: {}", e);
                None
            }
        }
    }
}
