//! Sections and subsections of a solicitation document
//!
//! A solicitation follows the uniform contract format: thirteen lettered
//! sections ("A" through "M") plus attachments listed in Section J and
//! identified as "J-<designator>".

use serde::{Deserialize, Serialize};

/// A top-level section recovered from document text.
///
/// Sections are non-overlapping, ordered by start offset, and their spans
/// union to the whole document: any preamble before the first detected
/// header is owned by the first section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    /// Section label, e.g. "C", "L", or "J-1" for attachments.
    pub id: String,

    /// Canonical section title, e.g. "Statement of Work".
    pub title: String,

    /// Trimmed text of the section span.
    pub content: String,

    /// Span start (byte offset in the source document).
    pub start: usize,

    /// Span end (exclusive byte offset).
    pub end: usize,

    /// Subsections nested within this section's span.
    pub subsections: Vec<Subsection>,

    /// Estimated 1-based page number of the section header.
    pub page: usize,
}

impl Section {
    /// The base label with any attachment designator stripped ("J-1" -> "J").
    pub fn base_label(&self) -> &str {
        base_label(&self.id)
    }
}

/// A nested structural unit within a section, identified by a numbered or
/// lettered header such as "C.3.1" or "L.2".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subsection {
    /// Dotted identifier, e.g. "C.3.1".
    pub id: String,

    /// Header title text (may be empty).
    pub title: String,

    /// Trimmed subsection text.
    pub content: String,

    /// Owning section id.
    pub parent_id: String,

    /// Span start, relative to the parent section's content.
    pub start: usize,

    /// Span end (exclusive), relative to the parent section's content.
    pub end: usize,
}

/// Strip an attachment designator from a section id: "J-1" -> "J", "C" -> "C".
pub fn base_label(section_id: &str) -> &str {
    section_id.split('-').next().unwrap_or(section_id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_label_strips_attachment_designator() {
        assert_eq!(base_label("J-1"), "J");
        assert_eq!(base_label("J-A2"), "J");
        assert_eq!(base_label("C"), "C");
    }

    #[test]
    fn section_base_label() {
        let section = Section {
            id: "J-3".to_string(),
            title: "Attachment 3: Wage Determination".to_string(),
            content: String::new(),
            start: 0,
            end: 0,
            subsections: Vec::new(),
            page: 1,
        };
        assert_eq!(section.base_label(), "J");
    }
}
