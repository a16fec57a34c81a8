//! Console and JSON summaries of a generation run

use crate::error::Result;
use crate::output::report::GenerationReport;
use colored::{Color, Colorize};

/// Trait for formatting generation reports
pub trait OutputFormatter {
    fn format_report(&self, report: &GenerationReport) -> Result<String>;
}

/// Human readable summary with optional colors
pub struct ConsoleFormatter {
    use_colors: bool,
}

/// JSON formatter for scripting and integration
pub struct JsonFormatter {
    pretty: bool,
}

impl ConsoleFormatter {
    pub fn new(use_colors: bool) -> Self {
        Self { use_colors }
    }

    fn colorize(&self, text: &str, color: Color) -> String {
        if self.use_colors {
            text.color(color).to_string()
        } else {
            text.to_string()
        }
    }

    /// Match score with a qualitative label, colored by band.
    pub fn format_score(&self, score: f64) -> String {
        let (label, color) = match score {
            s if s >= 75.0 => ("Strong match", Color::Green),
            s if s >= 50.0 => ("Good match", Color::Cyan),
            s if s >= 25.0 => ("Partial match", Color::Yellow),
            _ => ("Weak match", Color::Red),
        };
        self.colorize(&format!("{:.2}% ({})", score, label), color)
    }
}

impl OutputFormatter for ConsoleFormatter {
    fn format_report(&self, report: &GenerationReport) -> Result<String> {
        let mut output = String::new();

        output.push_str(&format!("Template: {}\n", report.template));

        output.push_str("\nArtifacts:\n");
        for artifact in &report.artifacts {
            output.push_str(&format!(
                "  {} {} ({}, {} bytes)\n",
                self.colorize("✓", Color::Green),
                artifact.file_name,
                artifact.mime_type,
                artifact.size_bytes
            ));
        }
        for failure in &report.failures {
            output.push_str(&format!(
                "  {} {}: {}\n",
                self.colorize("✗", Color::Red),
                failure.artifact.file_name(),
                failure.message
            ));
        }
        for warning in &report.warnings {
            output.push_str(&format!(
                "  {} {}\n",
                self.colorize("!", Color::Yellow),
                warning
            ));
        }

        match report.score {
            Some(score) => output.push_str(&format!("\nJob Match Score: {}\n", self.format_score(score))),
            None => output.push_str("\nJob Match Score: not computed (no job description)\n"),
        }

        Ok(output)
    }
}

impl JsonFormatter {
    pub fn new(pretty: bool) -> Self {
        Self { pretty }
    }
}

impl OutputFormatter for JsonFormatter {
    fn format_report(&self, report: &GenerationReport) -> Result<String> {
        if self.pretty {
            Ok(serde_json::to_string_pretty(report)?)
        } else {
            Ok(serde_json::to_string(report)?)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::artifact::{ArtifactKind, ExportArtifact, ExportWarning};
    use crate::output::templates::TemplateId;

    fn sample_report() -> GenerationReport {
        let mut report = GenerationReport::new(TemplateId::Classic);
        report.artifacts.push(ExportArtifact::new(ArtifactKind::Html, b"<h1>Ada</h1>".to_vec()));
        report.warnings.push(ExportWarning {
            artifact: ArtifactKind::Pdf,
            message: "weasyprint is not installed".to_string(),
        });
        report.score = Some(42.5);
        report
    }

    #[test]
    fn test_console_report_without_colors() {
        let text = ConsoleFormatter::new(false).format_report(&sample_report()).unwrap();

        assert!(text.contains("Template: T1 (classic)"));
        assert!(text.contains("resume.html (text/html, 12 bytes)"));
        assert!(text.contains("PDF export skipped: weasyprint is not installed"));
        assert!(text.contains("42.50% (Partial match)"));
    }

    #[test]
    fn test_json_report() {
        let json = JsonFormatter::new(false).format_report(&sample_report()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["template"], "T1");
        assert_eq!(value["score"], 42.5);
        assert_eq!(value["stages"][0], "received");
        assert_eq!(value["warnings"][0]["artifact"], "pdf");
    }
}
