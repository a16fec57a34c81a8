//! HTML resume templates
//!
//! Templates are compiled into the binary with askama, so the catalog is a
//! closed set. Optional sections are only emitted when their field is
//! non-empty and rendering never embeds timestamps, so the same input always
//! yields byte-identical markup.

use crate::error::{Result, ResumeBuilderError};
use crate::processing::ResumeDocument;
use askama::Template;
use log::debug;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Known resume templates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TemplateId {
    #[default]
    #[serde(rename = "T1", alias = "classic")]
    Classic,
    #[serde(rename = "T2", alias = "modern")]
    Modern,
    #[serde(rename = "T3", alias = "minimal")]
    Minimal,
}

impl TemplateId {
    pub fn all() -> [TemplateId; 3] {
        [TemplateId::Classic, TemplateId::Modern, TemplateId::Minimal]
    }

    pub fn code(&self) -> &'static str {
        match self {
            TemplateId::Classic => "T1",
            TemplateId::Modern => "T2",
            TemplateId::Minimal => "T3",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            TemplateId::Classic => "classic",
            TemplateId::Modern => "modern",
            TemplateId::Minimal => "minimal",
        }
    }

    /// File name the template was historically distributed under.
    pub fn file_name(&self) -> &'static str {
        match self {
            TemplateId::Classic => "resume_template1.html",
            TemplateId::Modern => "resume_template2.html",
            TemplateId::Minimal => "resume_template3.html",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            TemplateId::Classic => "Centered serif layout with ruled section headings",
            TemplateId::Modern => "Accent-colored header with skill tags",
            TemplateId::Minimal => "Unstyled single column, friendly to ATS parsers",
        }
    }
}

impl fmt::Display for TemplateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.code(), self.name())
    }
}

impl FromStr for TemplateId {
    type Err = ResumeBuilderError;

    fn from_str(s: &str) -> Result<Self> {
        let wanted = s.trim().to_lowercase();
        TemplateId::all()
            .into_iter()
            .find(|id| {
                wanted == id.code().to_lowercase()
                    || wanted == id.name()
                    || wanted == id.file_name()
                    || Some(wanted.as_str()) == id.file_name().strip_suffix(".html")
            })
            .ok_or_else(|| ResumeBuilderError::TemplateNotFound(s.to_string()))
    }
}

/// Immutable rendering options, built once from configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TemplateSettings {
    pub include_styles: bool,
    pub placeholder_name: String,
}

impl Default for TemplateSettings {
    fn default() -> Self {
        Self {
            include_styles: true,
            placeholder_name: "Your Name".to_string(),
        }
    }
}

/// Fields bound into every template.
struct ResumeView<'a> {
    include_styles: bool,
    name: &'a str,
    email: &'a str,
    phone: &'a str,
    summary: &'a str,
    skills: &'a [String],
    experience: &'a str,
    education: &'a str,
}

#[derive(Template)]
#[template(source = r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <title>{{ resume.name }} - Resume</title>
    {% if resume.include_styles %}
    <style>
        body { font-family: Georgia, 'Times New Roman', serif; max-width: 800px; margin: 40px auto; color: #222; line-height: 1.5; }
        h1 { text-align: center; font-size: 2.2em; margin-bottom: 4px; }
        .contact { text-align: center; margin: 2px 0; color: #555; }
        h2 { border-bottom: 1px solid #222; padding-bottom: 4px; margin-top: 28px; text-transform: uppercase; font-size: 1.1em; letter-spacing: 1px; }
        .body { white-space: pre-line; }
    </style>
    {% endif %}
</head>
<body>
    <h1>{{ resume.name }}</h1>
    {% if !resume.email.is_empty() %}<p class="contact">Email: {{ resume.email }}</p>{% endif %}
    {% if !resume.phone.is_empty() %}<p class="contact">Phone: {{ resume.phone }}</p>{% endif %}
    {% if !resume.summary.is_empty() %}
    <h2>Professional Summary</h2>
    <p class="body">{{ resume.summary }}</p>
    {% endif %}
    {% if !resume.skills.is_empty() %}
    <h2>Key Skills</h2>
    <ul>
        {% for skill in resume.skills %}<li>{{ skill }}</li>
        {% endfor %}
    </ul>
    {% endif %}
    {% if !resume.experience.is_empty() %}
    <h2>Work Experience</h2>
    <p class="body">{{ resume.experience }}</p>
    {% endif %}
    {% if !resume.education.is_empty() %}
    <h2>Education</h2>
    <p class="body">{{ resume.education }}</p>
    {% endif %}
</body>
</html>
"#, ext = "html")]
struct ClassicTemplate<'a> {
    resume: ResumeView<'a>,
}

#[derive(Template)]
#[template(source = r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{{ resume.name }} - Resume</title>
    {% if resume.include_styles %}
    <style>
        body { font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif; margin: 0; color: #333; line-height: 1.6; }
        header { background: #007acc; color: white; padding: 30px 40px; }
        header h1 { margin: 0; font-size: 2.4em; }
        header p { margin: 4px 0 0; opacity: 0.9; }
        main { max-width: 860px; margin: 0 auto; padding: 20px 40px; }
        h2 { color: #007acc; border-bottom: 2px solid #e9ecef; padding-bottom: 8px; }
        .tags { list-style: none; padding: 0; display: flex; flex-wrap: wrap; gap: 8px; }
        .tags li { background: #e7f3fb; color: #005a96; border-radius: 14px; padding: 4px 12px; }
        .body { white-space: pre-line; }
    </style>
    {% endif %}
</head>
<body>
    <header>
        <h1>{{ resume.name }}</h1>
        {% if !resume.email.is_empty() %}<p>Email: {{ resume.email }}</p>{% endif %}
        {% if !resume.phone.is_empty() %}<p>Phone: {{ resume.phone }}</p>{% endif %}
    </header>
    <main>
        {% if !resume.summary.is_empty() %}
        <section>
            <h2>Professional Summary</h2>
            <p class="body">{{ resume.summary }}</p>
        </section>
        {% endif %}
        {% if !resume.skills.is_empty() %}
        <section>
            <h2>Key Skills</h2>
            <ul class="tags">
                {% for skill in resume.skills %}<li>{{ skill }}</li>
                {% endfor %}
            </ul>
        </section>
        {% endif %}
        {% if !resume.experience.is_empty() %}
        <section>
            <h2>Work Experience</h2>
            <p class="body">{{ resume.experience }}</p>
        </section>
        {% endif %}
        {% if !resume.education.is_empty() %}
        <section>
            <h2>Education</h2>
            <p class="body">{{ resume.education }}</p>
        </section>
        {% endif %}
    </main>
</body>
</html>
"#, ext = "html")]
struct ModernTemplate<'a> {
    resume: ResumeView<'a>,
}

#[derive(Template)]
#[template(source = r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <title>{{ resume.name }}</title>
    {% if resume.include_styles %}
    <style>
        body { font-family: Arial, Helvetica, sans-serif; max-width: 720px; margin: 24px auto; font-size: 11pt; }
        h1, h2 { margin: 16px 0 6px; }
        .body { white-space: pre-line; }
    </style>
    {% endif %}
</head>
<body>
<h1>{{ resume.name }}</h1>
{% if !resume.email.is_empty() %}<p>Email: {{ resume.email }}</p>
{% endif %}{% if !resume.phone.is_empty() %}<p>Phone: {{ resume.phone }}</p>
{% endif %}{% if !resume.summary.is_empty() %}<h2>Professional Summary</h2>
<p class="body">{{ resume.summary }}</p>
{% endif %}{% if !resume.skills.is_empty() %}<h2>Key Skills</h2>
<ul>
{% for skill in resume.skills %}<li>{{ skill }}</li>
{% endfor %}</ul>
{% endif %}{% if !resume.experience.is_empty() %}<h2>Work Experience</h2>
<p class="body">{{ resume.experience }}</p>
{% endif %}{% if !resume.education.is_empty() %}<h2>Education</h2>
<p class="body">{{ resume.education }}</p>
{% endif %}</body>
</html>
"#, ext = "html")]
struct MinimalTemplate<'a> {
    resume: ResumeView<'a>,
}

/// Binds a [`ResumeDocument`] into one of the known templates.
#[derive(Debug, Clone, Default)]
pub struct TemplateRenderer {
    settings: TemplateSettings,
}

impl TemplateRenderer {
    pub fn new(settings: TemplateSettings) -> Self {
        Self { settings }
    }

    pub fn settings(&self) -> &TemplateSettings {
        &self.settings
    }

    /// Render with a template id given as text, e.g. `"T1"` or `"modern"`.
    pub fn render_named(&self, template: &str, document: &ResumeDocument) -> Result<String> {
        let id = template.parse::<TemplateId>()?;
        self.render(id, document)
    }

    pub fn render(&self, template: TemplateId, document: &ResumeDocument) -> Result<String> {
        let resume = ResumeView {
            include_styles: self.settings.include_styles,
            name: document.display_name(&self.settings.placeholder_name),
            email: &document.email,
            phone: &document.phone,
            summary: &document.summary,
            skills: &document.skills,
            experience: &document.experience,
            education: &document.education,
        };

        let markup = match template {
            TemplateId::Classic => ClassicTemplate { resume }.render()?,
            TemplateId::Modern => ModernTemplate { resume }.render()?,
            TemplateId::Minimal => MinimalTemplate { resume }.render()?,
        };

        debug!("Rendered template {} ({} bytes)", template, markup.len());
        Ok(markup)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_document() -> ResumeDocument {
        ResumeDocument {
            name: "Ada Lovelace".to_string(),
            email: "ada@example.com".to_string(),
            summary: "Pioneer".to_string(),
            skills: vec!["Math".to_string(), "Computing".to_string()],
            ..Default::default()
        }
    }

    #[test]
    fn test_template_id_parsing() {
        assert_eq!("T1".parse::<TemplateId>().unwrap(), TemplateId::Classic);
        assert_eq!("t2".parse::<TemplateId>().unwrap(), TemplateId::Modern);
        assert_eq!("minimal".parse::<TemplateId>().unwrap(), TemplateId::Minimal);
        assert_eq!("resume_template2.html".parse::<TemplateId>().unwrap(), TemplateId::Modern);
        assert_eq!("resume_template3".parse::<TemplateId>().unwrap(), TemplateId::Minimal);
    }

    #[test]
    fn test_unknown_template_is_rejected() {
        let err = "T9".parse::<TemplateId>().unwrap_err();
        assert!(matches!(err, ResumeBuilderError::TemplateNotFound(ref id) if id == "T9"));

        let renderer = TemplateRenderer::default();
        assert!(renderer.render_named("fancy", &sample_document()).is_err());
    }

    #[test]
    fn test_rendering_is_deterministic() {
        let renderer = TemplateRenderer::default();
        let document = sample_document();

        for id in TemplateId::all() {
            let first = renderer.render(id, &document).unwrap();
            let second = renderer.render(id, &document).unwrap();
            assert_eq!(first, second);
        }
    }

    #[test]
    fn test_skills_render_in_order() {
        let renderer = TemplateRenderer::default();
        let html = renderer.render(TemplateId::Classic, &sample_document()).unwrap();

        let math = html.find("<li>Math</li>").unwrap();
        let computing = html.find("<li>Computing</li>").unwrap();
        assert!(math < computing);
    }

    #[test]
    fn test_empty_sections_are_absent() {
        let renderer = TemplateRenderer::default();
        let document = sample_document();

        for id in TemplateId::all() {
            let html = renderer.render(id, &document).unwrap();
            assert!(html.contains("Professional Summary"));
            assert!(html.contains("Email: ada@example.com"));
            assert!(!html.contains("Phone:"));
            assert!(!html.contains("Work Experience"));
            assert!(!html.contains("Education"));
            assert!(!html.contains("None"));
        }
    }

    #[test]
    fn test_fields_are_escaped() {
        let renderer = TemplateRenderer::default();
        let document = ResumeDocument {
            name: "<script>alert(1)</script>".to_string(),
            ..Default::default()
        };

        let html = renderer.render(TemplateId::Minimal, &document).unwrap();
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;"));
    }

    #[test]
    fn test_placeholder_name_and_styles_setting() {
        let renderer = TemplateRenderer::new(TemplateSettings {
            include_styles: false,
            placeholder_name: "Anonymous".to_string(),
        });

        let html = renderer.render(TemplateId::Modern, &ResumeDocument::default()).unwrap();
        assert!(html.contains("<h1>Anonymous</h1>"));
        assert!(!html.contains("<style>"));
    }
}
