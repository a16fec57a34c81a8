//! Configuration management for the resume builder

use crate::error::{Result, ResumeBuilderError};
use crate::output::templates::{TemplateId, TemplateSettings};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub templates: TemplateConfig,
    pub export: ExportConfig,
    pub scoring: ScoringConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TemplateConfig {
    pub default_template: TemplateId,
    pub include_styles: bool,
    pub placeholder_name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    pub output_dir: PathBuf,
    pub pdf_backend: PdfBackendKind,
    pub pdf_timeout_secs: u64,
    pub wkhtmltopdf_path: Option<PathBuf>,
    pub weasyprint_path: Option<PathBuf>,
    pub timestamp_output: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PdfBackendKind {
    #[default]
    Auto,
    Builtin,
    Wkhtmltopdf,
    Weasyprint,
    Disabled,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    pub enabled: bool,
    pub remove_stop_words: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub color_output: bool,
    pub json: bool,
}

impl Default for TemplateConfig {
    fn default() -> Self {
        let settings = TemplateSettings::default();
        Self {
            default_template: TemplateId::default(),
            include_styles: settings.include_styles,
            placeholder_name: settings.placeholder_name,
        }
    }
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("output"),
            pdf_backend: PdfBackendKind::Auto,
            pdf_timeout_secs: 30,
            wkhtmltopdf_path: None,
            weasyprint_path: None,
            timestamp_output: false,
        }
    }
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            remove_stop_words: false,
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            color_output: true,
            json: false,
        }
    }
}

impl std::str::FromStr for PdfBackendKind {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "auto" => Ok(PdfBackendKind::Auto),
            "builtin" => Ok(PdfBackendKind::Builtin),
            "wkhtmltopdf" => Ok(PdfBackendKind::Wkhtmltopdf),
            "weasyprint" => Ok(PdfBackendKind::Weasyprint),
            "disabled" | "none" | "off" => Ok(PdfBackendKind::Disabled),
            _ => Err(format!(
                "Invalid PDF backend: {}. Supported: auto, builtin, wkhtmltopdf, weasyprint, disabled",
                s
            )),
        }
    }
}

impl Config {
    /// Load the user configuration, writing defaults on first use.
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path();

        if config_path.exists() {
            Self::load_from(&config_path)
        } else {
            let config = Self::default();
            config.save()?;
            Ok(config)
        }
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content)
            .map_err(|e| ResumeBuilderError::Configuration(format!("Failed to parse config: {}", e)))
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path())
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)
            .map_err(|e| ResumeBuilderError::Configuration(format!("Failed to serialize config: {}", e)))?;

        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")))
            .join("resume-builder")
            .join("config.toml")
    }

    /// Renderer options derived from the `templates` section.
    pub fn template_settings(&self) -> TemplateSettings {
        TemplateSettings {
            include_styles: self.templates.include_styles,
            placeholder_name: self.templates.placeholder_name.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip_through_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut config = Config::default();
        config.export.pdf_backend = PdfBackendKind::Weasyprint;
        config.templates.default_template = TemplateId::Minimal;
        config.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let config: Config = toml::from_str("[export]\npdf_backend = \"disabled\"\n").unwrap();

        assert_eq!(config.export.pdf_backend, PdfBackendKind::Disabled);
        assert_eq!(config.export.pdf_timeout_secs, 30);
        assert_eq!(config.templates.default_template, TemplateId::Classic);
        assert!(config.scoring.enabled);
    }

    #[test]
    fn test_template_ids_in_toml() {
        let config: Config = toml::from_str("[templates]\ndefault_template = \"T2\"\n").unwrap();
        assert_eq!(config.templates.default_template, TemplateId::Modern);
    }

    #[test]
    fn test_invalid_file_is_a_configuration_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "export = 5").unwrap();

        assert!(matches!(
            Config::load_from(&path),
            Err(ResumeBuilderError::Configuration(_))
        ));
    }

    #[test]
    fn test_pdf_backend_parsing() {
        assert_eq!("Builtin".parse::<PdfBackendKind>().unwrap(), PdfBackendKind::Builtin);
        assert_eq!("off".parse::<PdfBackendKind>().unwrap(), PdfBackendKind::Disabled);
        assert!("chrome".parse::<PdfBackendKind>().is_err());
    }
}
