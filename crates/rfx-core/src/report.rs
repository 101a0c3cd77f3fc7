//! Per-section summary report
//!
//! Aggregates a finalized chunk list into the operational report consumed
//! at the output boundary: one entry per section id with chunk counts,
//! content volume, requirement presence, and the union of relationship ids.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::chunk::Chunk;

/// Summary of one section's chunks.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionSummary {
    pub title: String,
    pub chunk_count: usize,
    pub total_content_length: usize,
    pub has_requirements: bool,
    /// Subsection ids that produced at least one chunk.
    pub subsections: BTreeSet<String>,
    /// Union of the relationship ids across the section's chunks.
    pub relationships: BTreeSet<String>,
}

/// Document-level report, keyed by section id.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentReport {
    pub sections: BTreeMap<String, SectionSummary>,
    pub total_chunks: usize,
}

impl DocumentReport {
    /// Build the report from a finalized chunk list.
    pub fn from_chunks(chunks: &[Chunk]) -> Self {
        let mut sections: BTreeMap<String, SectionSummary> = BTreeMap::new();

        for chunk in chunks {
            let entry = sections.entry(chunk.section_id.clone()).or_default();
            if entry.title.is_empty() {
                entry.title = chunk.section_title.clone();
            }
            entry.chunk_count += 1;
            entry.total_content_length += chunk.content.len();
            entry.has_requirements |= chunk.has_requirements();
            if let Some(subsection_id) = &chunk.subsection_id {
                entry.subsections.insert(subsection_id.clone());
            }
            entry
                .relationships
                .extend(chunk.related_chunks.iter().cloned());
        }

        Self {
            sections,
            total_chunks: chunks.len(),
        }
    }

    /// Section ids present in the report, in sorted order.
    pub fn section_ids(&self) -> Vec<&str> {
        self.sections.keys().map(String::as_str).collect()
    }

    /// Sections whose chunks carry at least one requirement.
    pub fn sections_with_requirements(&self) -> Vec<&str> {
        self.sections
            .iter()
            .filter(|(_, summary)| summary.has_requirements)
            .map(|(id, _)| id.as_str())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chunk::{chunk_id, ChunkKind, ChunkMetadata};

    fn chunk(ordinal: usize, section_id: &str, requirements: Vec<String>) -> Chunk {
        Chunk {
            id: chunk_id(ordinal),
            section_id: section_id.to_string(),
            section_title: format!("Section {section_id}"),
            subsection_id: None,
            content: "content body".to_string(),
            ordinal,
            related_sections: Vec::new(),
            related_chunks: BTreeSet::new(),
            requirements,
            page: Some(1),
            metadata: ChunkMetadata::new(ChunkKind::WholeSection, false),
        }
    }

    #[test]
    fn report_aggregates_per_section() {
        let mut first = chunk(0, "L", vec!["Offerors shall submit one copy.".into()]);
        first.subsection_id = Some("L.1".to_string());
        first.related_chunks.insert(chunk_id(2));
        let second = chunk(1, "L", Vec::new());
        let third = chunk(2, "M", Vec::new());

        let report = DocumentReport::from_chunks(&[first, second, third]);

        assert_eq!(report.total_chunks, 3);
        assert_eq!(report.section_ids(), vec!["L", "M"]);

        let l = &report.sections["L"];
        assert_eq!(l.chunk_count, 2);
        assert!(l.has_requirements);
        assert!(l.subsections.contains("L.1"));
        assert!(l.relationships.contains("chunk_0002"));

        assert_eq!(report.sections_with_requirements(), vec!["L"]);
    }

    #[test]
    fn empty_chunk_list_yields_empty_report() {
        let report = DocumentReport::from_chunks(&[]);
        assert_eq!(report.total_chunks, 0);
        assert!(report.sections.is_empty());
    }
}
