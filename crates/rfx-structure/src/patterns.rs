//! Pattern tables for section, subsection, and requirement detection
//!
//! The section table is data-driven: one row per label with the canonical
//! header phrase as the primary pattern and abbreviated or reordered
//! phrasings as ordered fallbacks. A single generic matching routine in the
//! detector consumes the table.

use regex::Regex;

use crate::Result;

/// One row of the section pattern table.
pub(crate) struct SectionPattern {
    pub label: &'static str,
    pub title: &'static str,
    pub primary: Regex,
    pub fallbacks: Vec<Regex>,
}

/// The thirteen uniform-contract-format section labels, in declaration
/// order. Declaration order doubles as the tie-break priority when two
/// matches share a start offset.
pub(crate) fn section_patterns() -> Result<Vec<SectionPattern>> {
    let table: &[(&str, &str, &str, &[&str])] = &[
        (
            "A",
            "Solicitation/Contract Form",
            r"(?im)section\s+a[\s\-:]+(?:solicitation[/\s]contract\s+form|solicitation|contract\s+form)",
            &[
                r"(?im)^a[\.\s\-]+solicitation",
                r"(?im)part\s+i\s*[\-\s]*section\s+a",
            ],
        ),
        (
            "B",
            "Supplies or Services and Prices/Costs",
            r"(?im)section\s+b[\s\-:]+(?:supplies?\s+(?:or\s+)?services?|contract\s+schedule)",
            &[
                r"(?im)^b[\.\s\-]+supplies",
                r"(?im)contract\s+line\s+item(?:s)?\s+(?:\(clin\)|number)",
            ],
        ),
        (
            "C",
            "Statement of Work",
            r"(?im)section\s+c[\s\-:]+(?:statement\s+of\s+work|description|sow|specifications)",
            &[
                r"(?im)^c[\.\s\-]+statement\s+of\s+work",
                r"(?im)performance\s+work\s+statement",
            ],
        ),
        (
            "D",
            "Packaging and Marking",
            r"(?im)section\s+d[\s\-:]+(?:packaging\s+and\s+marking|packaging|marking)",
            &[r"(?im)^d[\.\s\-]+packaging"],
        ),
        (
            "E",
            "Inspection and Acceptance",
            r"(?im)section\s+e[\s\-:]+(?:inspection\s+and\s+acceptance|inspection|acceptance)",
            &[r"(?im)^e[\.\s\-]+inspection"],
        ),
        (
            "F",
            "Deliveries or Performance",
            r"(?im)section\s+f[\s\-:]+(?:deliveries?\s+(?:or\s+)?performance|performance|delivery)",
            &[
                r"(?im)^f[\.\s\-]+deliver",
                r"(?im)period\s+of\s+performance",
            ],
        ),
        (
            "G",
            "Contract Administration Data",
            r"(?im)section\s+g[\s\-:]+(?:contract\s+administration\s+data|administration|admin)",
            &[r"(?im)^g[\.\s\-]+contract\s+administration"],
        ),
        (
            "H",
            "Special Contract Requirements",
            r"(?im)section\s+h[\s\-:]+(?:special\s+contract\s+requirements|special|requirements)",
            &[r"(?im)^h[\.\s\-]+special"],
        ),
        (
            "I",
            "Contract Clauses",
            r"(?im)section\s+i[\s\-:]+(?:contract\s+clauses|clauses)",
            &[
                r"(?im)^i[\.\s\-]+contract\s+clauses",
                r"(?im)applicable\s+clauses",
            ],
        ),
        (
            "J",
            "List of Attachments",
            r"(?im)section\s+j[\s\-:]+(?:list\s+of\s+(?:attachments|documents)|attachments|documents)",
            &[r"(?im)^j[\.\s\-]+list\s+of", r"(?im)attachment(?:s)?"],
        ),
        (
            "K",
            "Representations, Certifications and Other Statements",
            r"(?im)section\s+k[\s\-:]+(?:representations?[,\s]+certifications?|representations?|certifications?)",
            &[r"(?im)^k[\.\s\-]+representations"],
        ),
        (
            "L",
            "Instructions to Offerors",
            r"(?im)section\s+l[\s\-:]+(?:instructions?\s+to\s+offerors?|instructions?)",
            &[
                r"(?im)^l[\.\s\-]+instructions",
                r"(?im)proposal\s+preparation\s+instructions",
            ],
        ),
        (
            "M",
            "Evaluation Factors for Award",
            r"(?im)section\s+m[\s\-:]+(?:evaluation\s+factors?|evaluation)",
            &[r"(?im)^m[\.\s\-]+evaluation", r"(?im)basis\s+for\s+award"],
        ),
    ];

    table
        .iter()
        .map(|(label, title, primary, fallbacks)| {
            Ok(SectionPattern {
                label,
                title,
                primary: Regex::new(primary)?,
                fallbacks: fallbacks
                    .iter()
                    .map(|pattern| Regex::new(pattern))
                    .collect::<std::result::Result<_, _>>()?,
            })
        })
        .collect()
}

/// Patterns for J attachment headers ("Attachment J-1", "Exhibit J.2").
///
/// Group 1 captures the designator, group 2 an optional title. Every
/// pattern requires an explicit delimiter between "J" and the designator,
/// and the bare "J-" fallback requires a designator of at least two
/// characters, so short fragments like "J-1" in running text are not
/// mistaken for attachment headers.
pub(crate) struct AttachmentPatterns {
    pub primary: Regex,
    pub fallbacks: Vec<Regex>,
}

pub(crate) fn attachment_patterns() -> Result<AttachmentPatterns> {
    Ok(AttachmentPatterns {
        primary: Regex::new(
            r"(?im)(?:attachment|exhibit)\s+j[\-\.\s]([a-z0-9]+(?:[\-\.][a-z0-9]+)*)(?:\s+[\-:]\s*(.+?))?(?:\n|\r|$)",
        )?,
        fallbacks: vec![
            Regex::new(
                r"(?im)section\s+j\s+attachment\s+([a-z0-9]+(?:[\-\.][a-z0-9]+)*)(?:\s+[\-:]\s*(.+?))?(?:\n|\r|$)",
            )?,
            Regex::new(
                r"(?im)\bj\-([a-z0-9]{2,}(?:[\-\.][a-z0-9]+)*)(?:\s+[\-:]\s*(.+?))?(?:\n|\r|$)",
            )?,
        ],
    })
}

/// Subsection numbering conventions for one section, in priority order:
/// section-letter dotted numeric ("C.3.1"), bare dotted numeric ("3.1"),
/// section-letter lettered ("C.a"), parenthesized items ("(a)", "(1)").
/// The first convention that yields matches is used exclusively.
pub(crate) fn subsection_conventions(parent_label: &str) -> Result<Vec<Regex>> {
    let label = regex::escape(parent_label);
    Ok(vec![
        Regex::new(&format!(r"(?im)^{label}\.(\d+(?:\.\d+)*)\s+(.+?)$"))?,
        Regex::new(r"(?im)^(\d+(?:\.\d+)*)\s+(.+?)$")?,
        Regex::new(&format!(r"(?im)^{label}\.([a-z]+)\s+(.+?)$"))?,
        Regex::new(r"(?im)^\(([a-z\d]+)\)\s+(.+?)$")?,
    ])
}

/// Obligation patterns for requirement detection. A sentence matching any
/// of these is treated as a requirement.
pub(crate) fn requirement_patterns() -> Result<Vec<Regex>> {
    [
        r"(?i)\b(?:shall|must|will|required?|mandatory)\b",
        r"(?i)\bofferor(?:s)?\s+(?:shall|must|will)\b",
        r"(?i)\bcontractor(?:s)?\s+(?:shall|must|will)\b",
        r"(?i)\b(?:proposal|response)\s+(?:shall|must|will)\b",
        r"(?i)\bis\s+required\b",
        r"(?i)\bmandatory\s+requirement\b",
    ]
    .iter()
    .map(|pattern| Ok(Regex::new(pattern)?))
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_tables_compile() {
        let patterns = section_patterns().unwrap();
        assert_eq!(patterns.len(), 13);
        assert_eq!(patterns[0].label, "A");
        assert_eq!(patterns[12].label, "M");
        attachment_patterns().unwrap();
        subsection_conventions("C").unwrap();
        subsection_conventions("J-1").unwrap();
        assert_eq!(requirement_patterns().unwrap().len(), 6);
    }

    #[test]
    fn primary_matches_canonical_headers() {
        let patterns = section_patterns().unwrap();
        let c = patterns.iter().find(|p| p.label == "C").unwrap();
        assert!(c.primary.is_match("SECTION C - STATEMENT OF WORK"));
        assert!(c.primary.is_match("Section C: Description"));
        let m = patterns.iter().find(|p| p.label == "M").unwrap();
        assert!(m.primary.is_match("SECTION M - EVALUATION FACTORS FOR AWARD"));
        assert!(!m.primary.is_match("evaluation criteria are described below"));
    }

    #[test]
    fn bare_attachment_fallback_requires_long_designator() {
        let attachments = attachment_patterns().unwrap();
        let bare = &attachments.fallbacks[1];
        assert!(bare.is_match("J-A2 - PERFORMANCE STANDARDS"));
        assert!(bare.is_match("J-A2\nWage rates follow."));
        // Single-character designators are rejected on the bare form.
        assert!(!bare.is_match("see J-1 for details"));
    }
}
