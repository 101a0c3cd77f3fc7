//! Obligation-sentence (requirement) detection
//!
//! A heuristic, pattern-driven detector: text is split into sentence-like
//! units on terminal punctuation, and a unit counts as a requirement when
//! it matches any obligation pattern (shall/must/will/required/mandatory,
//! actor forms like "contractor shall"). Under-detection is an accepted
//! trade-off of the methodology; results are advisory.

use regex::Regex;

use crate::patterns::requirement_patterns;
use crate::Result;

/// Cap on requirements reported per span.
pub const MAX_REQUIREMENTS: usize = 10;

/// Sentence fragments shorter than this are discarded before matching.
const MIN_SENTENCE_LEN: usize = 20;

/// Normalized requirements at or below this length are discarded as
/// insubstantial.
const MIN_REQUIREMENT_LEN: usize = 30;

/// A requirement sentence located within a span of text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequirementHit {
    /// Byte offset of the sentence start within the input span.
    pub offset: usize,
    /// Whitespace-collapsed sentence text.
    pub text: String,
}

/// Detects obligation-bearing sentences in a text span.
///
/// Pure function of its input: no side effects, no retained state.
pub struct RequirementExtractor {
    patterns: Vec<Regex>,
    sentence_end: Regex,
    whitespace: Regex,
}

impl RequirementExtractor {
    pub fn new() -> Result<Self> {
        Ok(Self {
            patterns: requirement_patterns()?,
            sentence_end: Regex::new(r"[.!?]+")?,
            whitespace: Regex::new(r"\s+")?,
        })
    }

    /// Fast boolean check that short-circuits on the first obligation
    /// pattern matching anywhere in the span.
    pub fn contains_requirement(&self, text: &str) -> bool {
        self.patterns.iter().any(|pattern| pattern.is_match(text))
    }

    /// Extract up to [`MAX_REQUIREMENTS`] normalized requirement sentences,
    /// in first-found order.
    pub fn extract(&self, text: &str) -> Vec<String> {
        self.extract_with_offsets(text)
            .into_iter()
            .map(|hit| hit.text)
            .collect()
    }

    /// Like [`extract`](Self::extract), but also reports each requirement's
    /// byte offset in the input. Offsets are exact (recorded during
    /// sentence splitting), ascending, and feed requirement-group chunk
    /// splitting downstream.
    pub fn extract_with_offsets(&self, text: &str) -> Vec<RequirementHit> {
        let mut hits = Vec::new();

        for (offset, sentence) in self.sentences(text) {
            let trimmed = sentence.trim();
            if trimmed.len() < MIN_SENTENCE_LEN {
                continue;
            }
            if !self.patterns.iter().any(|p| p.is_match(trimmed)) {
                continue;
            }
            let normalized = self.whitespace.replace_all(trimmed, " ").into_owned();
            if normalized.len() <= MIN_REQUIREMENT_LEN {
                continue;
            }
            let leading = sentence.len() - sentence.trim_start().len();
            hits.push(RequirementHit {
                offset: offset + leading,
                text: normalized,
            });
            if hits.len() >= MAX_REQUIREMENTS {
                break;
            }
        }

        hits
    }

    /// Sentence-like units with their start offsets, split on runs of
    /// terminal punctuation.
    fn sentences<'t>(&self, text: &'t str) -> Vec<(usize, &'t str)> {
        let mut units = Vec::new();
        let mut start = 0;
        for boundary in self.sentence_end.find_iter(text) {
            units.push((start, &text[start..boundary.start()]));
            start = boundary.end();
        }
        if start < text.len() {
            units.push((start, &text[start..]));
        }
        units
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extractor() -> RequirementExtractor {
        RequirementExtractor::new().unwrap()
    }

    #[test]
    fn detects_obligation_sentences() {
        let text = "The contractor shall deliver monthly reports. \
                    The sky was clear that morning. \
                    Offerors must submit pricing in a separate volume.";
        let requirements = extractor().extract(text);
        assert_eq!(requirements.len(), 2);
        assert!(requirements[0].starts_with("The contractor shall"));
        assert!(requirements[1].starts_with("Offerors must"));
    }

    #[test]
    fn short_fragments_are_discarded() {
        // Matches an obligation pattern but is below the length floor.
        assert!(extractor().extract("You shall not.").is_empty());
    }

    #[test]
    fn whitespace_is_collapsed() {
        let text = "The  contractor\n\tshall   maintain a quality assurance plan.";
        let requirements = extractor().extract(text);
        assert_eq!(
            requirements,
            vec!["The contractor shall maintain a quality assurance plan".to_string()]
        );
    }

    #[test]
    fn offsets_point_at_sentence_starts() {
        let text = "Background only here, nothing binding. The offeror shall provide three references.";
        let hits = extractor().extract_with_offsets(text);
        assert_eq!(hits.len(), 1);
        assert_eq!(&text[hits[0].offset..hits[0].offset + 3], "The");
        assert!(hits[0].offset > 0);
    }

    #[test]
    fn capped_at_ten() {
        let text = "The contractor shall complete milestone number one on schedule. "
            .repeat(15);
        let requirements = extractor().extract(&text);
        assert_eq!(requirements.len(), MAX_REQUIREMENTS);
    }

    #[test]
    fn contains_requirement_short_circuits_on_plain_text() {
        let ex = extractor();
        assert!(ex.contains_requirement("delivery is required within ten days"));
        assert!(!ex.contains_requirement("a quiet afternoon in the reading room"));
    }
}
