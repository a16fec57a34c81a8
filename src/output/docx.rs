//! Word-processor (DOCX) export
//!
//! The resume is first mapped to a flat outline of blocks and then encoded with
//! docx-rs. Sections whose source field is empty are left out of the outline.

use crate::error::{Result, ResumeBuilderError};
use crate::output::artifact::{ArtifactKind, ExportArtifact};
use crate::processing::document::{ResumeDocument, SectionType};
use docx_rs::{
    AbstractNumbering, BreakType, Docx, IndentLevel, Level, LevelJc, LevelText, NumberFormat,
    Numbering, NumberingId, Paragraph, Run, SpecialIndentType, Start, Style, StyleType,
};
use log::debug;
use std::io::Cursor;

const TITLE_STYLE: &str = "Title";
const HEADING_STYLE: &str = "Heading1";
const BULLET_NUMBERING_ID: usize = 1;

/// One paragraph of the exported document.
#[derive(Debug, Clone, PartialEq)]
pub enum DocxBlock {
    Title(String),
    ContactLine(String),
    Heading(String),
    Body(String),
    Bullet(String),
}

impl DocxBlock {
    pub fn text(&self) -> &str {
        match self {
            DocxBlock::Title(text)
            | DocxBlock::ContactLine(text)
            | DocxBlock::Heading(text)
            | DocxBlock::Body(text)
            | DocxBlock::Bullet(text) => text,
        }
    }
}

#[derive(Debug, Clone)]
pub struct DocxExporter {
    placeholder_name: String,
}

impl Default for DocxExporter {
    fn default() -> Self {
        Self::new("Your Name")
    }
}

impl DocxExporter {
    pub fn new(placeholder_name: impl Into<String>) -> Self {
        Self {
            placeholder_name: placeholder_name.into(),
        }
    }

    /// Structural layout of the document, in order.
    pub fn outline(&self, document: &ResumeDocument) -> Vec<DocxBlock> {
        let mut blocks = vec![DocxBlock::Title(
            document.display_name(&self.placeholder_name).to_string(),
        )];

        if !document.email.is_empty() {
            blocks.push(DocxBlock::ContactLine(format!("Email: {}", document.email)));
        }
        if !document.phone.is_empty() {
            blocks.push(DocxBlock::ContactLine(format!("Phone: {}", document.phone)));
        }

        for section in document.present_sections() {
            blocks.push(DocxBlock::Heading(section.heading().to_string()));
            match section {
                SectionType::Skills => blocks.extend(
                    document.skills.iter().cloned().map(DocxBlock::Bullet),
                ),
                SectionType::Summary => blocks.push(DocxBlock::Body(document.summary.clone())),
                SectionType::Experience => {
                    blocks.push(DocxBlock::Body(document.experience.clone()))
                }
                SectionType::Education => blocks.push(DocxBlock::Body(document.education.clone())),
            }
        }

        blocks
    }

    pub fn export(&self, document: &ResumeDocument) -> Result<ExportArtifact> {
        let blocks = self.outline(document);
        let bytes = Self::encode(&blocks)?;

        debug!("Encoded {} DOCX blocks into {} bytes", blocks.len(), bytes.len());
        Ok(ExportArtifact::new(ArtifactKind::Docx, bytes))
    }

    /// Serialize an outline into a DOCX package.
    pub fn encode(blocks: &[DocxBlock]) -> Result<Vec<u8>> {
        let mut docx = Self::base_document();

        for block in blocks {
            let paragraph = match block {
                DocxBlock::Title(text) => Paragraph::new().add_run(text_run(text)).style(TITLE_STYLE),
                DocxBlock::Heading(text) => {
                    Paragraph::new().add_run(text_run(text)).style(HEADING_STYLE)
                }
                DocxBlock::Bullet(text) => Paragraph::new()
                    .add_run(text_run(text))
                    .numbering(NumberingId::new(BULLET_NUMBERING_ID), IndentLevel::new(0)),
                DocxBlock::ContactLine(text) | DocxBlock::Body(text) => {
                    Paragraph::new().add_run(text_run(text))
                }
            };
            docx = docx.add_paragraph(paragraph);
        }

        let mut buffer = Cursor::new(Vec::new());
        docx.build()
            .pack(&mut buffer)
            .map_err(|e| ResumeBuilderError::Docx(e.to_string()))?;

        Ok(buffer.into_inner())
    }

    fn base_document() -> Docx {
        let bullet_level = Level::new(
            0,
            Start::new(1),
            NumberFormat::new("bullet"),
            LevelText::new("•"),
            LevelJc::new("left"),
        )
        .indent(Some(720), Some(SpecialIndentType::Hanging(360)), None, None);

        Docx::new()
            .add_style(
                Style::new(TITLE_STYLE, StyleType::Paragraph)
                    .name("Title")
                    .size(52)
                    .bold(),
            )
            .add_style(
                Style::new(HEADING_STYLE, StyleType::Paragraph)
                    .name("Heading 1")
                    .size(32)
                    .bold()
                    .color("2F5496"),
            )
            .add_abstract_numbering(
                AbstractNumbering::new(BULLET_NUMBERING_ID).add_level(bullet_level),
            )
            .add_numbering(Numbering::new(BULLET_NUMBERING_ID, BULLET_NUMBERING_ID))
    }
}

/// A run holding `text`, with embedded newlines turned into line breaks.
fn text_run(text: &str) -> Run {
    let mut run = Run::new();
    for (i, line) in text.lines().enumerate() {
        if i > 0 {
            run = run.add_break(BreakType::TextWrapping);
        }
        run = run.add_text(line);
    }
    run
}
