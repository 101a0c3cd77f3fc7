//! Section and subsection boundary detection
//!
//! Finds ordered, non-overlapping section spans in a full document. Each
//! label's primary pattern is tried first, then its fallbacks in order; the
//! first pattern yielding matches is used exclusively for that label.
//! J attachments are detected separately with delimiter-constrained
//! designator patterns. Matches are pooled and sorted by start offset,
//! with pattern declaration order breaking ties.

use regex::Regex;
use tracing::debug;

use rfx_core::{Section, Subsection};

use crate::patterns::{
    attachment_patterns, section_patterns, subsection_conventions, AttachmentPatterns,
    SectionPattern,
};
use crate::Result;

/// Coarse page estimate: characters of text per printed page.
pub const DEFAULT_CHARS_PER_PAGE: usize = 2000;

/// Subsection candidates with content at or below this length are noise.
const MIN_SUBSECTION_LEN: usize = 50;

/// Detects section and subsection spans in solicitation text.
pub struct SectionDetector {
    patterns: Vec<SectionPattern>,
    attachments: AttachmentPatterns,
    chars_per_page: usize,
}

/// A pooled header match, prior to span assignment.
struct SectionMatch {
    id: String,
    title: String,
    start: usize,
    priority: usize,
}

impl SectionDetector {
    pub fn new() -> Result<Self> {
        Self::with_chars_per_page(DEFAULT_CHARS_PER_PAGE)
    }

    pub fn with_chars_per_page(chars_per_page: usize) -> Result<Self> {
        Ok(Self {
            patterns: section_patterns()?,
            attachments: attachment_patterns()?,
            chars_per_page,
        })
    }

    /// Detect all sections in a document.
    ///
    /// A document with no recognizable headers yields an empty vec; the
    /// caller falls back to a structure-unaware strategy. When sections are
    /// found, their spans tile the document: the first section owns any
    /// preamble before its header, and the last runs to document end.
    pub fn detect(&self, text: &str) -> Result<Vec<Section>> {
        let mut matches = self.collect_matches(text);
        matches.sort_by_key(|m| (m.start, m.priority));

        let mut sections = Vec::with_capacity(matches.len());
        for (index, header) in matches.iter().enumerate() {
            let end = matches
                .get(index + 1)
                .map(|next| next.start)
                .unwrap_or(text.len());
            // Preamble before the first header belongs to the first section
            // so that section spans union to the whole document.
            let span_start = if index == 0 { 0 } else { header.start };
            let page = (header.start / self.chars_per_page).max(1);
            let content = text[span_start..end].trim().to_string();
            let subsections = self.detect_subsections(&content, &header.id)?;

            sections.push(Section {
                id: header.id.clone(),
                title: header.title.clone(),
                content,
                start: span_start,
                end,
                subsections,
                page,
            });
        }

        let ids: Vec<&str> = sections.iter().map(|s| s.id.as_str()).collect();
        debug!(count = sections.len(), sections = ?ids, "detected sections");
        Ok(sections)
    }

    /// Pool header matches across the label table and attachment patterns.
    fn collect_matches(&self, text: &str) -> Vec<SectionMatch> {
        let mut matches = Vec::new();

        for (priority, pattern) in self.patterns.iter().enumerate() {
            for found in first_matching_all(&pattern.primary, &pattern.fallbacks, text) {
                matches.push(SectionMatch {
                    id: pattern.label.to_string(),
                    title: pattern.title.to_string(),
                    start: found,
                    priority,
                });
            }
        }

        // Attachments are declared after the thirteen labels, so a label
        // header wins a tie at the same offset.
        let attachment_priority = self.patterns.len();
        for captures in first_capturing_all(
            &self.attachments.primary,
            &self.attachments.fallbacks,
            text,
        ) {
            let Some(whole) = captures.get(0) else {
                continue;
            };
            let designator = captures
                .get(1)
                .map(|group| group.as_str())
                .unwrap_or("1");
            let title = captures
                .get(2)
                .map(|group| group.as_str().trim())
                .filter(|title| !title.is_empty())
                .unwrap_or("Attachment");
            matches.push(SectionMatch {
                id: format!("J-{designator}"),
                title: format!("Attachment {designator}: {title}"),
                start: whole.start(),
                priority: attachment_priority,
            });
        }

        matches
    }

    /// Detect subsections within one section's content, trying each
    /// numbering convention in priority order. Conventions are never
    /// merged: the first that yields substantial matches wins.
    fn detect_subsections(&self, content: &str, parent_id: &str) -> Result<Vec<Subsection>> {
        for convention in subsection_conventions(parent_id)? {
            let marks: Vec<(usize, String, String)> = convention
                .captures_iter(content)
                .filter_map(|captures| {
                    let whole = captures.get(0)?;
                    let number = captures.get(1)?.as_str().to_string();
                    let title = captures
                        .get(2)
                        .map(|group| group.as_str().trim().to_string())
                        .unwrap_or_default();
                    Some((whole.start(), number, title))
                })
                .collect();

            if marks.is_empty() {
                continue;
            }

            let mut subsections = Vec::new();
            for (index, (start, number, title)) in marks.iter().enumerate() {
                let end = marks
                    .get(index + 1)
                    .map(|next| next.0)
                    .unwrap_or(content.len());
                let body = content[*start..end].trim();
                if body.len() <= MIN_SUBSECTION_LEN {
                    continue;
                }
                subsections.push(Subsection {
                    id: format!("{parent_id}.{number}"),
                    title: title.clone(),
                    content: body.to_string(),
                    parent_id: parent_id.to_string(),
                    start: *start,
                    end,
                });
            }

            // All candidates may have been noise; if so, the next
            // convention still gets its chance.
            if !subsections.is_empty() {
                return Ok(subsections);
            }
        }

        Ok(Vec::new())
    }
}

/// Start offsets of all matches for the first pattern that matches at all:
/// primary first, then fallbacks in declared order.
fn first_matching_all(primary: &Regex, fallbacks: &[Regex], text: &str) -> Vec<usize> {
    let found: Vec<usize> = primary.find_iter(text).map(|m| m.start()).collect();
    if !found.is_empty() {
        return found;
    }
    for fallback in fallbacks {
        let found: Vec<usize> = fallback.find_iter(text).map(|m| m.start()).collect();
        if !found.is_empty() {
            return found;
        }
    }
    Vec::new()
}

/// Capture sets for the first pattern that matches at all.
fn first_capturing_all<'t>(
    primary: &Regex,
    fallbacks: &[Regex],
    text: &'t str,
) -> Vec<regex::Captures<'t>> {
    let found: Vec<_> = primary.captures_iter(text).collect();
    if !found.is_empty() {
        return found;
    }
    for fallback in fallbacks {
        let found: Vec<_> = fallback.captures_iter(text).collect();
        if !found.is_empty() {
            return found;
        }
    }
    Vec::new()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn detector() -> SectionDetector {
        SectionDetector::new().unwrap()
    }

    const THREE_SECTIONS: &str = "SECTION C - STATEMENT OF WORK\n\
The contractor shall provide engineering support services for the program office.\n\
\n\
SECTION L - INSTRUCTIONS TO OFFERORS\n\
Offerors shall submit proposals in accordance with the evaluation criteria described below.\n\
\n\
SECTION M - EVALUATION FACTORS FOR AWARD\n\
The government will base award on technical merit and total price.\n";

    #[test]
    fn detects_sections_in_document_order() {
        let sections = detector().detect(THREE_SECTIONS).unwrap();
        let ids: Vec<&str> = sections.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, vec!["C", "L", "M"]);
        assert_eq!(sections[0].title, "Statement of Work");
        assert_eq!(sections[2].title, "Evaluation Factors for Award");
    }

    #[test]
    fn spans_tile_the_document() {
        let sections = detector().detect(THREE_SECTIONS).unwrap();
        assert_eq!(sections[0].start, 0);
        for window in sections.windows(2) {
            assert_eq!(window[0].end, window[1].start);
        }
        assert_eq!(sections.last().unwrap().end, THREE_SECTIONS.len());
    }

    #[test]
    fn preamble_belongs_to_first_section() {
        let doc = format!("Cover letter text with no header value.\n\n{THREE_SECTIONS}");
        let sections = detector().detect(&doc).unwrap();
        assert_eq!(sections[0].id, "C");
        assert_eq!(sections[0].start, 0);
        assert!(sections[0].content.starts_with("Cover letter"));
    }

    #[test]
    fn no_matches_is_a_silent_empty_result() {
        let sections = detector()
            .detect("An ordinary memo about the office picnic schedule.")
            .unwrap();
        assert!(sections.is_empty());
    }

    #[test]
    fn detects_j_attachments_with_designators() {
        let doc = "SECTION J - LIST OF ATTACHMENTS\n\
The following are incorporated by reference.\n\
\n\
ATTACHMENT J-1 - WAGE DETERMINATION\n\
Wage rates applicable to this effort are listed herein for all labor categories.\n";
        let sections = detector().detect(doc).unwrap();
        let ids: Vec<&str> = sections.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, vec!["J", "J-1"]);
        assert_eq!(sections[1].title, "Attachment 1: WAGE DETERMINATION");
    }

    #[test]
    fn bare_attachment_reference_with_short_designator_is_ignored() {
        let sections = detector()
            .detect("Deliverables are listed in J-1 and described elsewhere in this memo.")
            .unwrap();
        assert!(sections.is_empty());
    }

    #[test]
    fn detects_dotted_subsections() {
        let doc = "SECTION L - INSTRUCTIONS TO OFFERORS\n\
L.1 General\n\
Proposals are limited to fifty pages and are due no later than the date shown on the cover sheet.\n\
L.2 Format\n\
Use single spaced twelve point type with one inch margins on all sides of every page submitted.\n";
        let sections = detector().detect(doc).unwrap();
        assert_eq!(sections.len(), 1);
        let subsections = &sections[0].subsections;
        assert_eq!(subsections.len(), 2);
        assert_eq!(subsections[0].id, "L.1");
        assert_eq!(subsections[0].title, "General");
        assert_eq!(subsections[1].id, "L.2");
        assert!(subsections[0].content.contains("fifty pages"));
    }

    #[test]
    fn noise_subsections_are_discarded() {
        let doc = "SECTION D - PACKAGING AND MARKING\n\
D.1 N/A\n\
D.2 Also short.\n";
        let sections = detector().detect(doc).unwrap();
        assert_eq!(sections.len(), 1);
        assert!(sections[0].subsections.is_empty());
    }

    #[test]
    fn page_estimate_uses_header_offset() {
        let padding = "Plain preamble text without any keywords of note. ".repeat(90);
        let doc = format!("{padding}\nSECTION C - STATEMENT OF WORK\nWork description follows.");
        let sections = detector().detect(&doc).unwrap();
        assert_eq!(sections[0].id, "C");
        // ~4500 chars of preamble at 2000 chars/page.
        assert_eq!(sections[0].page, 2);
    }
}
