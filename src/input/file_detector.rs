//! File type detection

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FileType {
    Pdf,
    Text,
    Markdown,
    Html,
    Toml,
    Json,
    Unknown,
}

impl FileType {
    pub fn from_extension(ext: &str) -> Self {
        match ext.to_lowercase().as_str() {
            "pdf" => FileType::Pdf,
            "txt" => FileType::Text,
            "md" | "markdown" => FileType::Markdown,
            "html" | "htm" => FileType::Html,
            "toml" => FileType::Toml,
            "json" => FileType::Json,
            _ => FileType::Unknown,
        }
    }

    /// Whether free text can be pulled out of this kind of file.
    pub fn is_text_source(&self) -> bool {
        matches!(
            self,
            FileType::Pdf | FileType::Text | FileType::Markdown | FileType::Html
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extension_is_case_insensitive() {
        assert_eq!(FileType::from_extension("PDF"), FileType::Pdf);
        assert_eq!(FileType::from_extension("Htm"), FileType::Html);
        assert_eq!(FileType::from_extension("xyz"), FileType::Unknown);
    }

    #[test]
    fn test_text_sources() {
        assert!(FileType::Markdown.is_text_source());
        assert!(!FileType::Toml.is_text_source());
        assert!(!FileType::Unknown.is_text_source());
    }
}
