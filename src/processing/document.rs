//! Canonical resume document and field normalization

use crate::input::Submission;
use serde::{Deserialize, Serialize};

/// Separator between skills in a raw submission.
pub const SKILL_DELIMITER: char = ',';

/// Normalized resume fields.
///
/// Every field is trimmed; empty strings mean "not provided". `skills` never
/// holds empty entries and keeps the order the skills were typed in.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResumeDocument {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub summary: String,
    pub skills: Vec<String>,
    pub experience: String,
    pub education: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SectionType {
    Summary,
    Skills,
    Experience,
    Education,
}

impl SectionType {
    pub const ALL: [SectionType; 4] = [
        SectionType::Summary,
        SectionType::Skills,
        SectionType::Experience,
        SectionType::Education,
    ];

    pub fn heading(&self) -> &'static str {
        match self {
            SectionType::Summary => "Professional Summary",
            SectionType::Skills => "Key Skills",
            SectionType::Experience => "Work Experience",
            SectionType::Education => "Education",
        }
    }
}

impl std::fmt::Display for SectionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.heading())
    }
}

impl ResumeDocument {
    /// Build the canonical document from a raw submission. Never fails.
    pub fn from_submission(submission: &Submission) -> Self {
        Self {
            name: submission.name.trim().to_string(),
            email: submission.email.trim().to_string(),
            phone: submission.phone.trim().to_string(),
            summary: submission.summary.trim().to_string(),
            skills: split_skills(&submission.skills),
            experience: submission.experience.trim().to_string(),
            education: submission.education.trim().to_string(),
        }
    }

    /// The name to print as the document title.
    pub fn display_name<'a>(&'a self, placeholder: &'a str) -> &'a str {
        if self.name.is_empty() {
            placeholder
        } else {
            &self.name
        }
    }

    /// Sections that have content, in document order.
    pub fn present_sections(&self) -> Vec<SectionType> {
        SectionType::ALL
            .into_iter()
            .filter(|section| self.has_section(*section))
            .collect()
    }

    pub fn has_section(&self, section: SectionType) -> bool {
        match section {
            SectionType::Summary => !self.summary.is_empty(),
            SectionType::Skills => !self.skills.is_empty(),
            SectionType::Experience => !self.experience.is_empty(),
            SectionType::Education => !self.education.is_empty(),
        }
    }

    /// Text compared against a job description: summary, skills, experience
    /// and education separated by single spaces.
    pub fn resume_text(&self) -> String {
        format!(
            "{} {} {} {}",
            self.summary,
            self.skills.join(", "),
            self.experience,
            self.education
        )
    }
}

/// Split a delimited skills string, dropping blank entries. Duplicates are kept.
pub fn split_skills(raw: &str) -> Vec<String> {
    raw.split(SKILL_DELIMITER)
        .map(str::trim)
        .filter(|skill| !skill.is_empty())
        .map(str::to_string)
        .collect()
}
