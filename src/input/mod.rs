//! Input processing module
//! Handles submission records, file detection and text extraction

pub mod file_detector;
pub mod manager;
pub mod submission;
pub mod text_extractor;

pub use manager::InputManager;
pub use submission::Submission;
