//! Resume normalization, text processing and similarity scoring

pub mod document;
pub mod markup;
pub mod similarity;
pub mod text_processor;

pub use document::ResumeDocument;
pub use similarity::SimilarityScorer;
