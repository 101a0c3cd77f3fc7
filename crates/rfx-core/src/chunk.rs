//! Contextual chunks produced from section content
//!
//! A chunk is the bounded unit of text handed to downstream language-model
//! extraction. It carries its section context, the obligation sentences
//! found in its span, and the relationship links added by the enricher.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// How a chunk was carved out of its section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChunkKind {
    /// The entire section fit within the size budget.
    WholeSection,
    /// One subsection of a section that exceeded the budget.
    Subsection,
    /// A run of paragraphs from a section with no usable subsections.
    PartialSection,
    /// A requirement group from a requirement-dense section.
    RequirementSplit,
}

impl ChunkKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::WholeSection => "whole_section",
            Self::Subsection => "subsection",
            Self::PartialSection => "partial_section",
            Self::RequirementSplit => "requirement_split",
        }
    }
}

impl std::fmt::Display for ChunkKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Per-chunk metadata recording how the chunk was produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChunkMetadata {
    /// Split strategy that produced this chunk.
    pub kind: ChunkKind,

    /// Whether any obligation sentence was found in the chunk's span.
    pub has_requirements: bool,

    /// Set when the content exceeds the size budget and no further split
    /// existed. Truncation is a caller policy decision, never performed here.
    pub oversized: bool,

    /// Number of subsections owned by the section (whole-section chunks).
    pub subsection_count: Option<usize>,

    /// Title of the originating subsection (subsection chunks).
    pub subsection_title: Option<String>,

    /// Paragraphs accumulated into this chunk (partial-section chunks).
    pub paragraph_count: Option<usize>,

    /// Requirements in this chunk (requirement-split chunks).
    pub requirement_count: Option<usize>,

    /// Total requirements detected in the owning section
    /// (requirement-split chunks).
    pub section_requirement_total: Option<usize>,

    /// Position among requirement-split chunks, e.g. "2/4".
    pub part: Option<String>,
}

impl ChunkMetadata {
    pub fn new(kind: ChunkKind, has_requirements: bool) -> Self {
        Self {
            kind,
            has_requirements,
            oversized: false,
            subsection_count: None,
            subsection_title: None,
            paragraph_count: None,
            requirement_count: None,
            section_requirement_total: None,
            part: None,
        }
    }
}

/// A bounded unit of section text with context and relationship links.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chunk {
    /// Stable id derived from the ordinal, e.g. "chunk_0007".
    pub id: String,

    /// Owning section id ("C", "L", "J-1", ...).
    pub section_id: String,

    /// Owning section title.
    pub section_title: String,

    /// Originating subsection id, when the chunk maps to one.
    pub subsection_id: Option<String>,

    /// Chunk text.
    pub content: String,

    /// Document-wide creation order, contiguous from 0.
    pub ordinal: usize,

    /// Adjacent section labels seeded at build time from the static
    /// section-adjacency table.
    pub related_sections: Vec<String>,

    /// Ids of related chunks, populated by the relationship enricher.
    /// Never contains this chunk's own id.
    pub related_chunks: BTreeSet<String>,

    /// Obligation sentences found in this chunk's span, first-found order,
    /// capped at 10.
    pub requirements: Vec<String>,

    /// Estimated page number inherited from the owning section.
    pub page: Option<usize>,

    /// How this chunk was produced.
    pub metadata: ChunkMetadata,
}

impl Chunk {
    /// The owning section's base label ("J-1" -> "J").
    pub fn base_label(&self) -> &str {
        crate::document::base_label(&self.section_id)
    }

    pub fn has_requirements(&self) -> bool {
        !self.requirements.is_empty()
    }
}

/// Format the stable chunk id for a document-wide ordinal.
pub fn chunk_id(ordinal: usize) -> String {
    format!("chunk_{ordinal:04}")
}
