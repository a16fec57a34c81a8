//! Block-level text extraction from rendered HTML resumes

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

static RE_HIDDEN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?is)<(head|style|script)\b.*?</(?:head|style|script)\s*>")
        .expect("Invalid hidden element regex")
});
static RE_BLOCK: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?is)<(h1|h2|h3|h4|p|li)\b[^>]*>(.*?)</(?:h1|h2|h3|h4|p|li)\s*>")
        .expect("Invalid block regex")
});
static RE_LINE_BREAK: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)<br\s*/?>").expect("Invalid line break regex"));
static RE_TAG: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^>]*>").expect("Invalid tag regex"));
static RE_SPACES: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[ \t\r\f]+").expect("Invalid spacing regex"));
static RE_NUMERIC_ENTITY: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"&#(?:x([0-9a-fA-F]+)|([0-9]+));").expect("Invalid entity regex")
});

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockKind {
    Title,
    Heading,
    Paragraph,
    ListItem,
}

/// A run of text from one block element, with inline markup removed.
#[derive(Debug, Clone, PartialEq)]
pub struct MarkupBlock {
    pub kind: BlockKind,
    pub text: String,
}

/// Extract headings, paragraphs and list items in document order.
///
/// `<head>`, `<style>` and `<script>` content is ignored. Line breaks inside a
/// block survive as `\n`; other whitespace is collapsed.
pub fn blocks(html: &str) -> Vec<MarkupBlock> {
    let visible = RE_HIDDEN.replace_all(html, "");

    RE_BLOCK
        .captures_iter(&visible)
        .filter_map(|caps| {
            let kind = match caps[1].to_ascii_lowercase().as_str() {
                "h1" => BlockKind::Title,
                "h2" | "h3" | "h4" => BlockKind::Heading,
                "li" => BlockKind::ListItem,
                _ => BlockKind::Paragraph,
            };
            let text = inline_text(&caps[2]);
            (!text.is_empty()).then_some(MarkupBlock { kind, text })
        })
        .collect()
}

/// Plain text of an HTML document, one block per line.
pub fn to_plain_text(html: &str) -> String {
    let extracted = blocks(html);
    if extracted.is_empty() {
        return inline_text(html);
    }

    extracted
        .into_iter()
        .map(|block| block.text)
        .collect::<Vec<_>>()
        .join("\n")
}

fn inline_text(fragment: &str) -> String {
    let with_breaks = RE_LINE_BREAK.replace_all(fragment, "\n");
    let stripped = RE_TAG.replace_all(&with_breaks, "");
    let decoded = decode_entities(&stripped);

    decoded
        .lines()
        .map(|line| RE_SPACES.replace_all(line.trim(), " ").to_string())
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

/// Decode the entities an HTML escaper produces.
pub fn decode_entities(text: &str) -> String {
    let decoded = RE_NUMERIC_ENTITY.replace_all(text, |caps: &Captures| {
        let code = match (caps.get(1), caps.get(2)) {
            (Some(hex), _) => u32::from_str_radix(hex.as_str(), 16).ok(),
            (None, Some(dec)) => dec.as_str().parse().ok(),
            _ => None,
        };
        code.and_then(char::from_u32)
            .map(String::from)
            .unwrap_or_else(|| caps[0].to_string())
    });

    decoded
        .replace("&nbsp;", " ")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&apos;", "'")
        .replace("&amp;", "&")
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"<!DOCTYPE html>
<html><head><title>Ignored</title><style>h1 { color: red; }</style></head>
<body>
  <h1 class="name">Ada   Lovelace</h1>
  <p class="contact">Email: ada@example.com</p>
  <h2>Key Skills</h2>
  <ul><li>Math</li><li><strong>Computing</strong></li></ul>
  <p class="body">Line one
  Line two</p>
</body></html>"#;

    #[test]
    fn test_blocks_in_order() {
        let extracted = blocks(SAMPLE);
        let kinds: Vec<BlockKind> = extracted.iter().map(|b| b.kind).collect();

        assert_eq!(
            kinds,
            vec![
                BlockKind::Title,
                BlockKind::Paragraph,
                BlockKind::Heading,
                BlockKind::ListItem,
                BlockKind::ListItem,
                BlockKind::Paragraph,
            ]
        );
        assert_eq!(extracted[0].text, "Ada Lovelace");
        assert_eq!(extracted[4].text, "Computing");
        assert_eq!(extracted[5].text, "Line one\nLine two");
    }

    #[test]
    fn test_head_is_ignored() {
        let text = to_plain_text(SAMPLE);
        assert!(!text.contains("Ignored"));
        assert!(!text.contains("color"));
    }

    #[test]
    fn test_decode_entities() {
        assert_eq!(decode_entities("R&amp;D &lt;team&gt; &#39;A&#x27; &#34;q&quot;"), "R&D <team> 'A' \"q\"");
        assert_eq!(decode_entities("&amp;lt;"), "&lt;");
    }

    #[test]
    fn test_shared_patterns_across_threads() {
        let items: String = (0..200).map(|i| format!("<li>Skill&#32;{}</li>", i)).collect();
        let html = format!("<html><head><style>li {{}}</style></head><body><ul>{}</ul></body></html>", items);

        let handles: Vec<_> = (0..4)
            .map(|_| {
                let html = html.clone();
                std::thread::spawn(move || blocks(&html))
            })
            .collect();

        for handle in handles {
            let extracted = handle.join().unwrap();
            assert_eq!(extracted.len(), 200);
            assert_eq!(extracted[199].text, "Skill 199");
            assert!(extracted.iter().all(|b| b.kind == BlockKind::ListItem));
        }
    }

    #[test]
    fn test_plain_text_without_blocks() {
        assert_eq!(to_plain_text("<div>Just <b>text</b></div>"), "Just text");
    }
}
