//! Integration tests for text extraction and job match scoring

use resume_builder::input::{InputManager, Submission};
use resume_builder::processing::{ResumeDocument, SimilarityScorer};
use std::path::Path;

#[tokio::test]
async fn test_text_extraction_from_txt() {
    let mut manager = InputManager::new();
    let path = Path::new("tests/fixtures/sample_job.txt");

    let result = manager.extract_text(path).await;
    assert!(result.is_ok());

    let text = result.unwrap();
    assert!(text.contains("Software Engineer"));
    assert!(text.contains("React"));
    assert!(text.contains("Node.js"));
}

#[tokio::test]
async fn test_text_extraction_from_markdown() {
    let mut manager = InputManager::new();
    let path = Path::new("tests/fixtures/sample_job.md");

    let text = manager.extract_text(path).await.unwrap();
    assert!(text.contains("Software Engineer"));
    assert!(text.contains("React"));
    assert!(text.contains("Mentor engineers"));
    assert!(!text.contains("**"));
    assert!(!text.contains("##"));
    assert!(!text.contains('`'));
}

#[tokio::test]
async fn test_caching_functionality() {
    let mut manager = InputManager::new();
    let path = Path::new("tests/fixtures/sample_job.txt");

    let text1 = manager.extract_text(path).await.unwrap();
    assert_eq!(manager.cache_size(), 1);

    let text2 = manager.extract_text(path).await.unwrap();
    assert_eq!(text1, text2);
    assert_eq!(manager.cache_size(), 1);

    manager.clear_cache();
    assert_eq!(manager.cache_size(), 0);
}

#[tokio::test]
async fn test_unsupported_file_type() {
    let mut manager = InputManager::new();
    let path = Path::new("tests/fixtures/unsupported.xyz");

    assert!(manager.extract_text(path).await.is_err());
}

#[tokio::test]
async fn test_nonexistent_file() {
    let mut manager = InputManager::new();
    let path = Path::new("tests/fixtures/nonexistent.txt");

    assert!(manager.extract_text(path).await.is_err());
}

#[test]
fn test_submission_from_toml_file() {
    let submission = Submission::from_file(Path::new("tests/fixtures/sample_submission.toml")).unwrap();

    assert_eq!(submission.name, "John Doe");
    assert_eq!(submission.template_id.as_deref(), Some("T2"));
    assert!(submission.job_description.is_none());

    let document = ResumeDocument::from_submission(&submission);
    assert_eq!(document.skills, vec!["React", "Node.js", "TypeScript"]);
    assert!(document.experience.contains("Acme Corp"));
}

#[test]
fn test_submission_from_json_file() {
    let submission = Submission::from_file(Path::new("tests/fixtures/sample_submission.json")).unwrap();

    assert_eq!(submission.name, "Ada Lovelace");
    assert_eq!(submission.template_id.as_deref(), Some("T1"));
    assert_eq!(submission.job_text(), Some("Pioneer"));
    assert!(submission.experience.is_empty());
}

#[tokio::test]
async fn test_score_resume_against_job_file() {
    let submission = Submission::from_file(Path::new("tests/fixtures/sample_submission.toml")).unwrap();
    let resume_text = ResumeDocument::from_submission(&submission).resume_text();
    let job_text = InputManager::new()
        .extract_text(Path::new("tests/fixtures/sample_job.md"))
        .await
        .unwrap();

    let scorer = SimilarityScorer::new();
    let score = scorer.score(&resume_text, &job_text);

    assert!(score > 0.0);
    assert!(score < 100.0);
    assert_eq!(score, scorer.score(&job_text, &resume_text));
}

#[test]
fn test_unrelated_job_scores_lower() {
    let scorer = SimilarityScorer::new();
    let resume = "Software Engineer building React and Node.js services";

    let related = scorer.score(resume, "Hiring a React engineer for Node.js services");
    let unrelated = scorer.score(resume, "Pastry chef for a busy bakery");

    assert!(related > unrelated);
    assert_eq!(unrelated, 0.0);
}
