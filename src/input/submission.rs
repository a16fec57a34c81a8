//! Raw resume submissions as delivered by a form, CLI flags or a file

use crate::error::{Result, ResumeBuilderError};
use crate::input::file_detector::FileType;
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// One resume submission with unprocessed field values.
///
/// `skills` is a single comma separated string; `template_id` selects one of
/// the known templates and falls back to the configured default when absent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Submission {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub summary: String,
    pub skills: String,
    pub experience: String,
    pub education: String,
    #[serde(alias = "jobDescription")]
    pub job_description: Option<String>,
    #[serde(alias = "templateId")]
    pub template_id: Option<String>,
}

impl Submission {
    /// Load a submission from a TOML or JSON file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .ok_or_else(|| ResumeBuilderError::InvalidInput(
                format!("Submission file has no extension: {}", path.display())
            ))?;

        let content = std::fs::read_to_string(path)?;

        match FileType::from_extension(extension) {
            FileType::Toml => Ok(toml::from_str(&content)
                .with_context(|| format!("Failed to parse submission '{}'", path.display()))?),
            FileType::Json => Ok(serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse submission '{}'", path.display()))?),
            _ => Err(ResumeBuilderError::UnsupportedFormat(format!(
                "Submission files must be .toml or .json: {}",
                path.display()
            ))),
        }
    }

    /// The job description, if one was supplied and is not just whitespace.
    pub fn job_text(&self) -> Option<&str> {
        self.job_description
            .as_deref()
            .map(str::trim)
            .filter(|text| !text.is_empty())
    }
}
