//! Resume builder: generate resumes in several formats and score job matches

use clap::Parser;
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use log::{error, info};
use resume_builder::cli::{self, Cli, Commands, ConfigAction, GenerateArgs};
use resume_builder::config::Config;
use resume_builder::input::file_detector::FileType;
use resume_builder::input::{InputManager, Submission};
use resume_builder::output::formatter::{ConsoleFormatter, JsonFormatter, OutputFormatter};
use resume_builder::output::templates::TemplateId;
use resume_builder::processing::SimilarityScorer;
use resume_builder::{Pipeline, Result, ResumeBuilderError};
use std::path::{Path, PathBuf};
use std::process;
use std::time::Duration;

const TEXT_EXTENSIONS: &[&str] = &["pdf", "txt", "md", "markdown", "html", "htm"];

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(log_level)
    ).init();

    let config = match &cli.config {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    };
    let config = match config {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            process::exit(1);
        }
    };

    if let Err(e) = run_command(cli.command, config, cli.config).await {
        error!("Command failed: {}", e);
        process::exit(1);
    }
}

async fn run_command(command: Commands, config: Config, config_path: Option<PathBuf>) -> Result<()> {
    match command {
        Commands::Generate(args) => generate(args, config).await?,

        Commands::Score { resume, job } => {
            for path in [&resume, &job] {
                cli::validate_file_extension(path, TEXT_EXTENSIONS)
                    .map_err(|e| ResumeBuilderError::InvalidInput(format!("{}: {}", path.display(), e)))?;
            }

            let mut input_manager = InputManager::new();
            let resume_text = input_manager.extract_text(&resume).await?;
            let job_text = input_manager.extract_text(&job).await?;

            let score = SimilarityScorer::from_config(&config.scoring).score(&resume_text, &job_text);
            let formatter = ConsoleFormatter::new(config.output.color_output);
            println!("📊 Job Match Score: {}", formatter.format_score(score));
        }

        Commands::Templates => {
            println!("📄 Available Templates\n");
            for id in TemplateId::all() {
                let marker = if id == config.templates.default_template { " (default)" } else { "" };
                println!("  • {}{} - {}", id, marker, id.description());
            }
        }

        Commands::Config { action } => {
            let path = config_path.unwrap_or_else(Config::config_path);
            match action {
                Some(ConfigAction::Show) | None => {
                    let content = toml::to_string_pretty(&config).map_err(|e| {
                        ResumeBuilderError::Configuration(format!("Failed to serialize config: {}", e))
                    })?;
                    println!("⚙️  Current Configuration ({})\n", path.display());
                    println!("{}", content);
                }
                Some(ConfigAction::Path) => println!("{}", path.display()),
                Some(ConfigAction::Reset) => {
                    println!("🔄 Resetting configuration to defaults...");
                    Config::default().save_to(&path)?;
                    println!("✅ Configuration reset successfully!");
                }
            }
        }
    }

    Ok(())
}

async fn generate(args: GenerateArgs, mut config: Config) -> Result<()> {
    if let Some(backend) = &args.pdf_backend {
        config.export.pdf_backend = cli::parse_pdf_backend(backend).map_err(ResumeBuilderError::InvalidInput)?;
    }
    if let Some(dir) = &args.output_dir {
        config.export.output_dir = dir.clone();
    }
    let json = args.json || config.output.json;
    let use_colors = config.output.color_output && !args.no_color;

    let base = match &args.input {
        Some(path) => Submission::from_file(path)?,
        None => Submission::default(),
    };
    let mut submission = args.apply_to(base);

    if let Some(job_file) = &args.job_file {
        submission.job_description = Some(read_job_file(job_file).await?);
    }

    let pipeline = Pipeline::from_config(&config);
    info!("Using PDF backend: {}", pipeline.pdf_backend());

    let spinner = if json { ProgressBar::hidden() } else { ProgressBar::new_spinner() };
    spinner.set_style(ProgressStyle::default_spinner());
    spinner.set_message("Generating resume...");
    spinner.enable_steady_tick(Duration::from_millis(100));

    let report = pipeline.run(&submission).await;
    spinner.finish_and_clear();
    let report = report?;

    let output_dir = if args.timestamp || config.export.timestamp_output {
        config
            .export
            .output_dir
            .join(format!("resume_{}", chrono::Local::now().format("%Y%m%d_%H%M%S")))
    } else {
        config.export.output_dir.clone()
    };
    let written = report.write_artifacts(&output_dir);

    if json {
        println!("{}", JsonFormatter::new(true).format_report(&report)?);
    } else {
        println!("{}", ConsoleFormatter::new(use_colors).format_report(&report)?);
        if !written.written.is_empty() {
            let location = output_dir.display().to_string();
            println!("📁 Saved to {}", if use_colors { location.bold().to_string() } else { location });
        }
    }

    for failure in &written.failed {
        error!("{}", failure);
    }

    if report.artifacts.is_empty() || written.written.is_empty() {
        return Err(ResumeBuilderError::InvalidInput("No artifacts were written".to_string()));
    }

    Ok(())
}

async fn read_job_file(path: &Path) -> Result<String> {
    let is_text = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| FileType::from_extension(ext).is_text_source())
        .unwrap_or(false);

    if !is_text {
        return Err(ResumeBuilderError::UnsupportedFormat(format!(
            "Job description must be one of: {}",
            TEXT_EXTENSIONS.join(", ")
        )));
    }

    InputManager::new().with_cache(false).extract_text(path).await
}
