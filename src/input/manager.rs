//! Reads resumes and job descriptions from disk as plain text

use crate::error::{Result, ResumeBuilderError};
use crate::input::file_detector::FileType;
use crate::input::text_extractor::{
    HtmlExtractor, MarkdownExtractor, PdfExtractor, PlainTextExtractor, TextExtractor,
};
use log::{debug, info};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Dispatches on file extension and remembers what it has already read.
pub struct InputManager {
    extracted: HashMap<PathBuf, String>,
    caching: bool,
}

impl Default for InputManager {
    fn default() -> Self {
        Self::new()
    }
}

impl InputManager {
    pub fn new() -> Self {
        Self {
            extracted: HashMap::new(),
            caching: true,
        }
    }

    pub fn with_cache(mut self, enable: bool) -> Self {
        self.caching = enable;
        self
    }

    pub async fn extract_text(&mut self, path: &Path) -> Result<String> {
        if let Some(text) = self.extracted.get(path).filter(|_| self.caching) {
            debug!("Reusing extracted text of {}", path.display());
            return Ok(text.clone());
        }

        if !path.is_file() {
            return Err(ResumeBuilderError::InvalidInput(format!(
                "No such file: {}",
                path.display()
            )));
        }

        let file_type = Self::file_type(path)?;
        info!("Reading {:?} source: {}", file_type, path.display());

        let text = match file_type {
            FileType::Pdf => PdfExtractor.extract(path).await?,
            FileType::Text => PlainTextExtractor.extract(path).await?,
            FileType::Markdown => MarkdownExtractor.extract(path).await?,
            FileType::Html => HtmlExtractor.extract(path).await?,
            FileType::Toml | FileType::Json | FileType::Unknown => {
                return Err(ResumeBuilderError::UnsupportedFormat(format!(
                    "no text extractor for {}",
                    path.display()
                )));
            }
        };

        if self.caching {
            self.extracted.insert(path.to_path_buf(), text.clone());
        }
        Ok(text)
    }

    fn file_type(path: &Path) -> Result<FileType> {
        path.extension()
            .and_then(|ext| ext.to_str())
            .map(FileType::from_extension)
            .ok_or_else(|| {
                ResumeBuilderError::InvalidInput(format!("File has no extension: {}", path.display()))
            })
    }

    pub fn clear_cache(&mut self) {
        self.extracted.clear();
    }

    pub fn cache_size(&self) -> usize {
        self.extracted.len()
    }
}
