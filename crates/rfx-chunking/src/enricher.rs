//! Cross-section relationship enrichment
//!
//! Solicitation sections reference each other in conventional ways: the
//! instructions in L mirror the evaluation factors in M, the work statement
//! in C prices against the supplies in B, and so on. A static adjacency
//! table captures these conventions; content triggers catch the references
//! the table cannot. Enrichment resolves both into concrete chunk-id links.

use std::collections::HashMap;

use tracing::debug;

use rfx_core::Chunk;

/// Conventionally related section labels for a given base label.
///
/// Labels without an entry relate to nothing by convention; their chunks
/// can still be linked by content triggers.
pub fn adjacent_sections(label: &str) -> &'static [&'static str] {
    match label {
        "B" => &["C", "F"],
        "C" => &["B", "F", "H", "M"],
        "F" => &["B", "C"],
        "H" => &["C", "M", "I"],
        "I" => &["A", "B", "C", "D", "E", "F", "G", "H"],
        "J" => &["C", "L", "M", "H"],
        "L" => &["M", "K"],
        "M" => &["L", "C"],
        _ => &[],
    }
}

/// A substring that, found in a chunk of the source section, links that
/// chunk to every chunk of the target section.
struct ContentTrigger {
    source: &'static str,
    needle: &'static str,
    target: &'static str,
}

// Matched against lowercased content; "evaluat" covers evaluate,
// evaluation, and evaluated.
const CONTENT_TRIGGERS: &[ContentTrigger] = &[
    ContentTrigger { source: "L", needle: "evaluat", target: "M" },
    ContentTrigger { source: "M", needle: "instruction", target: "L" },
    ContentTrigger { source: "C", needle: "clin", target: "B" },
    ContentTrigger { source: "C", needle: "performance", target: "F" },
];

/// Resolves section-level adjacency and content triggers into chunk-id
/// links.
///
/// The pass is idempotent: links live in an ordered set, self-references
/// are dropped, and re-running over already-enriched chunks changes
/// nothing.
#[derive(Debug, Default)]
pub struct RelationshipEnricher;

impl RelationshipEnricher {
    pub fn new() -> Self {
        Self
    }

    /// Populate `related_chunks` on every chunk in place.
    pub fn enrich(&self, chunks: &mut [Chunk]) {
        let by_label = index_by_label(chunks);

        for index in 0..chunks.len() {
            let own_id = chunks[index].id.clone();
            let label = chunks[index].base_label().to_string();
            let lowered = chunks[index].content.to_lowercase();

            let mut target_labels: Vec<&str> = chunks[index]
                .related_sections
                .iter()
                .map(|s| s.as_str())
                .collect();
            for trigger in CONTENT_TRIGGERS {
                if trigger.source == label && lowered.contains(trigger.needle) {
                    target_labels.push(trigger.target);
                }
            }

            for target in target_labels {
                let Some(ids) = by_label.get(target) else {
                    continue;
                };
                for id in ids {
                    if *id != own_id {
                        chunks[index].related_chunks.insert(id.clone());
                    }
                }
            }
        }

        let linked = chunks
            .iter()
            .filter(|chunk| !chunk.related_chunks.is_empty())
            .count();
        debug!(chunks = chunks.len(), linked, "enriched chunk relationships");
    }
}

/// Chunk ids grouped by base section label, in document order.
fn index_by_label(chunks: &[Chunk]) -> HashMap<String, Vec<String>> {
    let mut index: HashMap<String, Vec<String>> = HashMap::new();
    for chunk in chunks {
        index
            .entry(chunk.base_label().to_string())
            .or_default()
            .push(chunk.id.clone());
    }
    index
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::collections::BTreeSet;

    use rfx_core::chunk::{chunk_id, ChunkKind, ChunkMetadata};

    fn chunk(ordinal: usize, section_id: &str, content: &str) -> Chunk {
        Chunk {
            id: chunk_id(ordinal),
            section_id: section_id.to_string(),
            section_title: String::new(),
            subsection_id: None,
            content: content.to_string(),
            ordinal,
            related_sections: adjacent_sections(section_id)
                .iter()
                .map(|s| s.to_string())
                .collect(),
            related_chunks: BTreeSet::new(),
            requirements: Vec::new(),
            page: Some(1),
            metadata: ChunkMetadata::new(ChunkKind::WholeSection, false),
        }
    }

    #[test]
    fn adjacency_links_l_and_m_both_ways() {
        let mut chunks = vec![
            chunk(0, "L", "Submit two volumes by the closing date."),
            chunk(1, "M", "Award criteria are described below."),
        ];
        RelationshipEnricher::new().enrich(&mut chunks);
        assert!(chunks[0].related_chunks.contains("chunk_0001"));
        assert!(chunks[1].related_chunks.contains("chunk_0000"));
    }

    #[test]
    fn adjacency_is_directional() {
        // K is not adjacent to anything, so a K chunk stays unlinked even
        // when L links to it by table.
        let mut chunks = vec![
            chunk(0, "K", "Representations and certifications follow."),
            chunk(1, "L", "Offerors are to acknowledge amendments in writing."),
        ];
        RelationshipEnricher::new().enrich(&mut chunks);
        assert!(chunks[0].related_chunks.is_empty());
        assert_eq!(
            chunks[1].related_chunks,
            BTreeSet::from(["chunk_0000".to_string()])
        );
    }

    #[test]
    fn content_trigger_matches_case_insensitively() {
        let mut chunks = vec![
            chunk(0, "C", "Each CLIN is priced separately in the schedule."),
            chunk(1, "B", "Supplies and prices are listed in the schedule."),
        ];
        RelationshipEnricher::new().enrich(&mut chunks);
        assert!(chunks[0].related_chunks.contains("chunk_0001"));
    }

    #[test]
    fn self_references_are_never_recorded() {
        let mut chunks = vec![
            chunk(0, "C", "The work is described herein."),
            chunk(1, "C", "Further tasking appears below."),
            chunk(2, "M", "Factors appear below."),
        ];
        RelationshipEnricher::new().enrich(&mut chunks);
        // C is adjacent to M but not to itself.
        assert!(!chunks[0].related_chunks.contains("chunk_0000"));
        assert!(!chunks[0].related_chunks.contains("chunk_0001"));
        assert!(chunks[0].related_chunks.contains("chunk_0002"));
    }

    #[test]
    fn attachment_chunks_use_the_base_label() {
        let mut chunks = vec![
            chunk(0, "J-1", "Wage determination rates for all labor categories."),
            chunk(1, "L", "Instructions for assembling the proposal volumes."),
        ];
        chunks[0].related_sections = adjacent_sections("J")
            .iter()
            .map(|s| s.to_string())
            .collect();
        RelationshipEnricher::new().enrich(&mut chunks);
        assert!(chunks[0].related_chunks.contains("chunk_0001"));
    }

    #[test]
    fn enrichment_is_idempotent() {
        let mut chunks = vec![
            chunk(0, "L", "Proposal instructions reference the evaluation factors."),
            chunk(1, "M", "Award is made to the best overall value."),
        ];
        let enricher = RelationshipEnricher::new();
        enricher.enrich(&mut chunks);
        let first_pass = chunks.clone();
        enricher.enrich(&mut chunks);
        assert_eq!(chunks, first_pass);
    }
}
