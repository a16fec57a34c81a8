//! Resume builder library
//!
//! Turns resume form fields into HTML, DOCX and PDF documents and scores the
//! resulting text against a job description.

pub mod cli;
pub mod config;
pub mod error;
pub mod input;
pub mod output;
pub mod pipeline;
pub mod processing;

pub use config::Config;
pub use error::{Result, ResumeBuilderError};
pub use pipeline::Pipeline;
