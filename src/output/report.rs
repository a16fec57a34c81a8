//! Outcome of one resume generation run

use crate::error::{Result, ResumeBuilderError};
use crate::output::artifact::{ArtifactKind, ExportArtifact, ExportFailure, ExportWarning};
use crate::output::templates::TemplateId;
use log::{debug, info, warn};
use serde::Serialize;
use std::fmt;
use std::path::{Path, PathBuf};

/// States a submission passes through, in the order they are reached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    Received,
    Normalized,
    Rendered,
    MarkupReady,
    WordProcessorReady,
    WordProcessorFailed,
    PaginatedReady,
    PaginatedWarning,
    Scored,
    Unscored,
    Complete,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Stage::Received => "received",
            Stage::Normalized => "normalized",
            Stage::Rendered => "rendered",
            Stage::MarkupReady => "markup ready",
            Stage::WordProcessorReady => "word processor ready",
            Stage::WordProcessorFailed => "word processor failed",
            Stage::PaginatedReady => "paginated ready",
            Stage::PaginatedWarning => "paginated warning",
            Stage::Scored => "scored",
            Stage::Unscored => "unscored",
            Stage::Complete => "complete",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct GenerationReport {
    pub template: TemplateId,
    pub stages: Vec<Stage>,
    pub artifacts: Vec<ExportArtifact>,
    pub failures: Vec<ExportFailure>,
    pub warnings: Vec<ExportWarning>,
    /// Job match percentage, present only when a job description was given.
    pub score: Option<f64>,
}

/// Where each artifact ended up after [`GenerationReport::write_artifacts`].
#[derive(Debug, Default)]
pub struct WrittenArtifacts {
    pub written: Vec<PathBuf>,
    pub failed: Vec<ResumeBuilderError>,
}

impl GenerationReport {
    pub fn new(template: TemplateId) -> Self {
        Self {
            template,
            stages: vec![Stage::Received],
            artifacts: Vec::new(),
            failures: Vec::new(),
            warnings: Vec::new(),
            score: None,
        }
    }

    pub(crate) fn advance(&mut self, stage: Stage) {
        debug!("Pipeline stage: {}", stage);
        self.stages.push(stage);
    }

    pub fn artifact(&self, kind: ArtifactKind) -> Option<&ExportArtifact> {
        self.artifacts.iter().find(|a| a.kind == kind)
    }

    pub fn reached(&self, stage: Stage) -> bool {
        self.stages.contains(&stage)
    }

    pub fn is_complete(&self) -> bool {
        self.stages.last() == Some(&Stage::Complete)
    }

    pub fn is_scored(&self) -> bool {
        self.score.is_some()
    }

    /// Write every artifact into `dir`. Each write is independent: one failure
    /// is recorded and the remaining artifacts are still written.
    pub fn write_artifacts(&self, dir: &Path) -> WrittenArtifacts {
        let mut outcome = WrittenArtifacts::default();

        if let Err(source) = std::fs::create_dir_all(dir) {
            outcome.failed.push(ResumeBuilderError::ExportIo {
                artifact: dir.display().to_string(),
                source,
            });
            return outcome;
        }

        for artifact in &self.artifacts {
            match write_artifact(dir, artifact) {
                Ok(path) => {
                    info!("Wrote {}", path.display());
                    outcome.written.push(path);
                }
                Err(e) => {
                    warn!("{}", e);
                    outcome.failed.push(e);
                }
            }
        }

        outcome
    }
}

fn write_artifact(dir: &Path, artifact: &ExportArtifact) -> Result<PathBuf> {
    let path = dir.join(&artifact.file_name);
    std::fs::write(&path, artifact.bytes()).map_err(|source| ResumeBuilderError::ExportIo {
        artifact: artifact.file_name.clone(),
        source,
    })?;
    Ok(path)
}
