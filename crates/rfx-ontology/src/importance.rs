//! Edge importance classification
//!
//! Not every valid edge deserves the same attention: the instructions-to-
//! evaluation linkage drives proposal strategy, while an attachment citing
//! a document is background. Overrides are checked from most to least
//! specific, then structural rules over section labels, then a default.

use serde::{Deserialize, Serialize};

use crate::types::{EntityType, RelationType};

/// Priority tier of a graph edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Importance {
    Informational,
    Important,
    Critical,
}

impl Importance {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Informational => "informational",
            Self::Important => "important",
            Self::Critical => "critical",
        }
    }
}

impl std::fmt::Display for Importance {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Overrides keyed on both endpoints' types and labels.
const NAMED_PAIR_OVERRIDES: &[(EntityType, &str, EntityType, &str, Importance)] = &[
    (EntityType::Section, "L", EntityType::Section, "M", Importance::Critical),
    (EntityType::Section, "M", EntityType::Section, "L", Importance::Critical),
];

/// Overrides keyed on the source type and label plus the target type.
const LABELED_SOURCE_OVERRIDES: &[(EntityType, &str, EntityType, Importance)] = &[
    (EntityType::Section, "L", EntityType::Requirement, Importance::Critical),
    (EntityType::Section, "M", EntityType::Requirement, Importance::Critical),
    (EntityType::Section, "I", EntityType::Clause, Importance::Important),
    (EntityType::Section, "C", EntityType::Requirement, Importance::Important),
    (EntityType::Section, "J", EntityType::Document, Importance::Informational),
];

/// Overrides keyed on the endpoint types alone.
const TYPE_PAIR_OVERRIDES: &[(EntityType, EntityType, Importance)] = &[
    (EntityType::Requirement, EntityType::Clause, Importance::Important),
    (EntityType::Organization, EntityType::Requirement, Importance::Important),
    (EntityType::Document, EntityType::Section, Importance::Informational),
];

/// Classify one edge. The relation itself does not influence the tier;
/// importance follows from what is connected, not how.
pub fn classify(
    source: EntityType,
    source_label: &str,
    _relation: RelationType,
    target: EntityType,
    target_label: &str,
) -> Importance {
    for (s_type, s_label, t_type, t_label, importance) in NAMED_PAIR_OVERRIDES {
        if source == *s_type
            && target == *t_type
            && source_label.eq_ignore_ascii_case(s_label)
            && target_label.eq_ignore_ascii_case(t_label)
        {
            return *importance;
        }
    }

    for (s_type, s_label, t_type, importance) in LABELED_SOURCE_OVERRIDES {
        if source == *s_type && target == *t_type && source_label.eq_ignore_ascii_case(s_label) {
            return *importance;
        }
    }

    for (s_type, t_type, importance) in TYPE_PAIR_OVERRIDES {
        if source == *s_type && target == *t_type {
            return *importance;
        }
    }

    // Structural rules over bare section labels.
    let pair = (source_label, target_label);
    if pair.0.eq_ignore_ascii_case("L") && pair.1.eq_ignore_ascii_case("M")
        || pair.0.eq_ignore_ascii_case("M") && pair.1.eq_ignore_ascii_case("L")
    {
        return Importance::Critical;
    }
    if source_label.eq_ignore_ascii_case("I") || target_label.eq_ignore_ascii_case("I") {
        return Importance::Important;
    }
    if source_label.eq_ignore_ascii_case("C")
        && ["B", "F", "M"]
            .iter()
            .any(|label| target_label.eq_ignore_ascii_case(label))
    {
        return Importance::Important;
    }

    Importance::Informational
}

#[cfg(test)]
mod tests {
    use super::*;

    use EntityType::*;
    use RelationType::*;

    #[test]
    fn instructions_to_evaluation_is_critical_both_ways() {
        assert_eq!(
            classify(Section, "L", References, Section, "M"),
            Importance::Critical
        );
        assert_eq!(
            classify(Section, "m", DependsOn, Section, "l"),
            Importance::Critical
        );
    }

    #[test]
    fn instruction_requirements_are_critical() {
        assert_eq!(
            classify(Section, "L", Contains, Requirement, "REQ-004"),
            Importance::Critical
        );
    }

    #[test]
    fn clause_section_edges_are_important() {
        assert_eq!(
            classify(Section, "I", Contains, Clause, "52.212-4"),
            Importance::Important
        );
        // Structural rule: label I on either side.
        assert_eq!(
            classify(Section, "I", References, Section, "C"),
            Importance::Important
        );
    }

    #[test]
    fn work_statement_pricing_edges_are_important() {
        assert_eq!(
            classify(Section, "C", References, Section, "B"),
            Importance::Important
        );
    }

    #[test]
    fn type_pair_overrides_apply_without_labels() {
        assert_eq!(
            classify(Requirement, "REQ-001", References, Clause, "52.204-21"),
            Importance::Important
        );
        assert_eq!(
            classify(Organization, "ACME", Implements, Requirement, "REQ-002"),
            Importance::Important
        );
    }

    #[test]
    fn attachment_documents_are_informational() {
        assert_eq!(
            classify(Section, "J", References, Document, "DD-254"),
            Importance::Informational
        );
    }

    #[test]
    fn unmatched_edges_default_to_informational() {
        assert_eq!(
            classify(Technology, "ERP", Supports, Concept, "sustainment"),
            Importance::Informational
        );
    }
}
