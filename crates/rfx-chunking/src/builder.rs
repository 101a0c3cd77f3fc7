//! Bounded chunk construction from detected sections
//!
//! Splitting strategy, in order of precedence:
//! 1. Requirement density: a section with more than the threshold count of
//!    requirements is partitioned by requirement groups regardless of size.
//! 2. Whole section, when it fits the character budget.
//! 3. One chunk per subsection, paragraph-splitting any subsection that
//!    itself exceeds the budget.
//! 4. Paragraph accumulation with flush-on-overflow. A section with no
//!    subsections and no paragraph breaks still yields exactly one chunk,
//!    flagged oversized rather than silently truncated.

use std::collections::BTreeSet;

use regex::Regex;
use tracing::debug;

use rfx_core::chunk::{chunk_id, Chunk, ChunkKind, ChunkMetadata};
use rfx_core::document::Section;
use rfx_structure::{RequirementExtractor, RequirementHit};

use crate::enricher::adjacent_sections;
use crate::Result;

/// Knobs for chunk construction.
#[derive(Debug, Clone)]
pub struct ChunkingConfig {
    /// Character budget per chunk.
    pub max_chunk_size: usize,

    /// Requirement count above which a section is split by requirement
    /// groups instead of by size.
    pub density_threshold: usize,

    /// Requirements per group when density splitting.
    pub max_requirements_per_chunk: usize,

    /// Leading context carried into each requirement-group chunk, in
    /// characters before the group's first requirement.
    pub context_before: usize,

    /// Characters per page for page estimation.
    pub chars_per_page: usize,
}

impl Default for ChunkingConfig {
    fn default() -> Self {
        Self {
            max_chunk_size: 2000,
            density_threshold: 5,
            max_requirements_per_chunk: 3,
            context_before: 200,
            chars_per_page: 2000,
        }
    }
}

/// Builds bounded chunks from sections, consulting the requirement
/// extractor to choose between size-based and density-based splitting.
pub struct ChunkBuilder {
    config: ChunkingConfig,
    extractor: RequirementExtractor,
    paragraph_break: Regex,
}

impl ChunkBuilder {
    pub fn new(config: ChunkingConfig) -> Result<Self> {
        Ok(Self {
            config,
            extractor: RequirementExtractor::new()?,
            paragraph_break: Regex::new(r"\n\s*\n")?,
        })
    }

    /// Chunk every section, assigning document-wide ordinals in order.
    pub fn build(&self, sections: &[Section]) -> Vec<Chunk> {
        let mut chunks = Vec::new();
        for section in sections {
            self.chunk_section(section, &mut chunks);
        }
        chunks
    }

    fn chunk_section(&self, section: &Section, out: &mut Vec<Chunk>) {
        let related = seed_related(section);
        let hits = self.extractor.extract_with_offsets(&section.content);

        if hits.len() > self.config.density_threshold {
            self.split_by_requirements(section, &hits, &related, out);
            return;
        }

        let requirements: Vec<String> = hits.into_iter().map(|hit| hit.text).collect();

        if section.content.len() <= self.config.max_chunk_size {
            let mut metadata = ChunkMetadata::new(ChunkKind::WholeSection, !requirements.is_empty());
            metadata.subsection_count = Some(section.subsections.len());
            self.push_chunk(
                out,
                section,
                None,
                section.content.clone(),
                requirements,
                &related,
                metadata,
            );
            return;
        }

        if !section.subsections.is_empty() {
            for subsection in &section.subsections {
                if subsection.content.len() <= self.config.max_chunk_size {
                    let requirements = self.extractor.extract(&subsection.content);
                    let mut metadata =
                        ChunkMetadata::new(ChunkKind::Subsection, !requirements.is_empty());
                    metadata.subsection_title = Some(subsection.title.clone());
                    self.push_chunk(
                        out,
                        section,
                        Some(subsection.id.clone()),
                        subsection.content.clone(),
                        requirements,
                        &related,
                        metadata,
                    );
                } else {
                    self.split_paragraphs(
                        section,
                        Some(subsection.id.clone()),
                        &subsection.content,
                        &related,
                        out,
                    );
                }
            }
        } else {
            self.split_paragraphs(section, None, &section.content, &related, out);
        }
    }

    /// Partition a requirement-dense section into fixed-size requirement
    /// groups. Group k spans from a context window before its first
    /// requirement to the offset of group k+1's first requirement. This
    /// bounds the obligations any single downstream extraction call sees.
    fn split_by_requirements(
        &self,
        section: &Section,
        hits: &[RequirementHit],
        related: &[String],
        out: &mut Vec<Chunk>,
    ) {
        let total = hits.len();
        let groups: Vec<&[RequirementHit]> =
            hits.chunks(self.config.max_requirements_per_chunk).collect();
        let group_count = groups.len();
        debug!(
            section = %section.id,
            requirements = total,
            groups = group_count,
            "requirement-dense section, splitting by requirement groups"
        );

        for (index, group) in groups.iter().enumerate() {
            let lead = group[0].offset.saturating_sub(self.config.context_before);
            let start = floor_char_boundary(&section.content, lead);
            let end = groups
                .get(index + 1)
                .map(|next| next[0].offset)
                .unwrap_or(section.content.len());
            let content = section.content[start..end].trim().to_string();

            let mut metadata = ChunkMetadata::new(ChunkKind::RequirementSplit, true);
            metadata.requirement_count = Some(group.len());
            metadata.section_requirement_total = Some(total);
            metadata.part = Some(format!("{}/{}", index + 1, group_count));

            let requirements = group.iter().map(|hit| hit.text.clone()).collect();
            self.push_chunk(out, section, None, content, requirements, related, metadata);
        }
    }

    /// Accumulate paragraphs into a running buffer, flushing whenever the
    /// next paragraph would exceed the budget. The remainder is always
    /// flushed, even when it is the only chunk produced.
    fn split_paragraphs(
        &self,
        section: &Section,
        subsection_id: Option<String>,
        content: &str,
        related: &[String],
        out: &mut Vec<Chunk>,
    ) {
        let mut buffer = String::new();
        let mut paragraph_count = 0usize;

        for paragraph in self.paragraph_break.split(content) {
            if !buffer.is_empty() && buffer.len() + paragraph.len() > self.config.max_chunk_size {
                self.flush_partial(
                    out,
                    section,
                    subsection_id.clone(),
                    &buffer,
                    paragraph_count,
                    related,
                );
                buffer.clear();
                paragraph_count = 0;
            }
            buffer.push_str(paragraph);
            buffer.push_str("\n\n");
            paragraph_count += 1;
        }

        if !buffer.trim().is_empty() {
            self.flush_partial(out, section, subsection_id, &buffer, paragraph_count, related);
        }
    }

    fn flush_partial(
        &self,
        out: &mut Vec<Chunk>,
        section: &Section,
        subsection_id: Option<String>,
        buffer: &str,
        paragraph_count: usize,
        related: &[String],
    ) {
        let content = buffer.trim().to_string();
        if content.is_empty() {
            return;
        }
        let requirements = self.extractor.extract(&content);
        let mut metadata = ChunkMetadata::new(ChunkKind::PartialSection, !requirements.is_empty());
        metadata.paragraph_count = Some(paragraph_count);
        self.push_chunk(out, section, subsection_id, content, requirements, related, metadata);
    }

    #[allow(clippy::too_many_arguments)]
    fn push_chunk(
        &self,
        out: &mut Vec<Chunk>,
        section: &Section,
        subsection_id: Option<String>,
        content: String,
        requirements: Vec<String>,
        related: &[String],
        mut metadata: ChunkMetadata,
    ) {
        if content.len() > self.config.max_chunk_size {
            metadata.oversized = true;
        }
        let ordinal = out.len();
        out.push(Chunk {
            id: chunk_id(ordinal),
            section_id: section.id.clone(),
            section_title: section.title.clone(),
            subsection_id,
            content,
            ordinal,
            related_sections: related.to_vec(),
            related_chunks: BTreeSet::new(),
            requirements,
            page: Some(section.page),
            metadata,
        });
    }
}

/// Seed a section's adjacent labels from the static adjacency table.
fn seed_related(section: &Section) -> Vec<String> {
    adjacent_sections(section.base_label())
        .iter()
        .map(|label| label.to_string())
        .collect()
}

/// Largest char boundary at or below `index`.
fn floor_char_boundary(text: &str, index: usize) -> usize {
    if index >= text.len() {
        return text.len();
    }
    let mut index = index;
    while !text.is_char_boundary(index) {
        index -= 1;
    }
    index
}
