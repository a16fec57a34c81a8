//! CLI interface for the resume builder

use crate::config::PdfBackendKind;
use crate::input::Submission;
use clap::{Args, Parser, Subcommand};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "resume-builder")]
#[command(about = "Generate HTML, DOCX and PDF resumes and score them against job descriptions")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Generate resume documents from form fields
    Generate(GenerateArgs),

    /// Score a resume file against a job description file
    Score {
        /// Path to resume file (PDF, TXT, MD, HTML)
        #[arg(short, long)]
        resume: PathBuf,

        /// Path to job description file (PDF, TXT, MD, HTML)
        #[arg(short, long)]
        job: PathBuf,
    },

    /// List available templates
    Templates,

    /// Show configuration
    Config {
        #[command(subcommand)]
        action: Option<ConfigAction>,
    },
}

#[derive(Args, Default)]
pub struct GenerateArgs {
    /// Read the submission from a TOML or JSON file; flags override its fields
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    #[arg(long)]
    pub name: Option<String>,

    #[arg(long)]
    pub email: Option<String>,

    #[arg(long)]
    pub phone: Option<String>,

    #[arg(long)]
    pub summary: Option<String>,

    /// Comma separated list of skills
    #[arg(long)]
    pub skills: Option<String>,

    #[arg(long)]
    pub experience: Option<String>,

    #[arg(long)]
    pub education: Option<String>,

    /// Job description text to score against
    #[arg(long, conflicts_with = "job_file")]
    pub job: Option<String>,

    /// Job description file (PDF, TXT, MD, HTML)
    #[arg(long)]
    pub job_file: Option<PathBuf>,

    /// Template: T1 (classic), T2 (modern) or T3 (minimal)
    #[arg(short, long)]
    pub template: Option<String>,

    /// Directory for the generated files
    #[arg(short, long)]
    pub output_dir: Option<PathBuf>,

    /// PDF backend: auto, builtin, wkhtmltopdf, weasyprint, disabled
    #[arg(long)]
    pub pdf_backend: Option<String>,

    /// Write into a timestamped subdirectory of the output directory
    #[arg(long)]
    pub timestamp: bool,

    /// Print the run report as JSON
    #[arg(long)]
    pub json: bool,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,
}

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Print the configuration file location
    Path,

    /// Reset configuration to defaults
    Reset,
}

impl GenerateArgs {
    /// Overlay the field flags onto a base submission.
    pub fn apply_to(&self, mut submission: Submission) -> Submission {
        let fields = [
            (&self.name, &mut submission.name),
            (&self.email, &mut submission.email),
            (&self.phone, &mut submission.phone),
            (&self.summary, &mut submission.summary),
            (&self.skills, &mut submission.skills),
            (&self.experience, &mut submission.experience),
            (&self.education, &mut submission.education),
        ];
        for (flag, field) in fields {
            if let Some(value) = flag {
                *field = value.clone();
            }
        }

        if let Some(job) = &self.job {
            submission.job_description = Some(job.clone());
        }
        if let Some(template) = &self.template {
            submission.template_id = Some(template.clone());
        }
        submission
    }
}

/// Parse and validate a PDF backend name
pub fn parse_pdf_backend(name: &str) -> Result<PdfBackendKind, String> {
    name.parse()
}

/// Validate file extension
pub fn validate_file_extension(path: &Path, allowed_extensions: &[&str]) -> Result<(), String> {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some(ext) => {
            if allowed_extensions.contains(&ext.to_lowercase().as_str()) {
                Ok(())
            } else {
                Err(format!(
                    "Unsupported file extension: .{}. Allowed: {}",
                    ext,
                    allowed_extensions.join(", ")
                ))
            }
        }
        None => Err("File has no extension".to_string()),
    }
}
