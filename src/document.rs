//! Structured document model - headings and paragraphs before serialization.

use serde::Serialize;

/// One block of a structured document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "text", rename_all = "snake_case")]
pub enum Block {
    /// Level-1 heading.
    Heading(String),
    Paragraph(String),
}

/// Title plus ordered plain-text paragraphs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct GeneratedDocument {
    pub title: String,
    pub paragraphs: Vec<String>,
}

impl GeneratedDocument {
    /// Split `text` into paragraphs, one per line.
    ///
    /// `\r\n` counts as a single break. Blank and whitespace-only lines are
    /// kept as paragraphs, so N lines always give N paragraphs.
    pub fn from_text(title: impl Into<String>, text: &str) -> Self {
        let normalized = text.replace("\r\n", "\n");
        Self {
            title: title.into(),
            paragraphs: normalized.split('\n').map(str::to_string).collect(),
        }
    }

    pub fn has_heading(&self) -> bool {
        !self.title.is_empty()
    }

    /// Heading first (if the title is non-empty), then every paragraph.
    pub fn blocks(&self) -> impl Iterator<Item = Block> + '_ {
        let heading = self
            .has_heading()
            .then(|| Block::Heading(self.title.clone()));
        heading
            .into_iter()
            .chain(self.paragraphs.iter().cloned().map(Block::Paragraph))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_lines_become_empty_paragraphs() {
        let doc = GeneratedDocument::from_text("Contrato", "Linha 1\n\nLinha 3");
        let blocks: Vec<Block> = doc.blocks().collect();
        assert_eq!(
            blocks,
            vec![
                Block::Heading("Contrato".into()),
                Block::Paragraph("Linha 1".into()),
                Block::Paragraph(String::new()),
                Block::Paragraph("Linha 3".into()),
            ]
        );
    }

    #[test]
    fn test_crlf_is_one_break() {
        let doc = GeneratedDocument::from_text("", "a\r\nb\r\n\r\nc");
        assert_eq!(doc.paragraphs, vec!["a", "b", "", "c"]);
        assert!(!doc.has_heading());
    }

    #[test]
    fn test_whitespace_lines_are_kept() {
        let doc = GeneratedDocument::from_text("", "a\n   \n\t\nb\n");
        assert_eq!(doc.paragraphs, vec!["a", "   ", "\t", "b", ""]);
    }

    #[test]
    fn test_empty_text_yields_single_empty_paragraph() {
        let doc = GeneratedDocument::from_text("", "");
        assert_eq!(doc.blocks().count(), 1);
        assert_eq!(doc.paragraphs, vec![""]);
    }
}
