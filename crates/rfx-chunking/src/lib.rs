//! Chunk construction and relationship enrichment
//!
//! Turns detected sections into bounded chunks for downstream
//! language-model extraction:
//! - Size-based splitting (whole section, per subsection, per paragraph run)
//! - Requirement-density override: requirement-dense sections are split by
//!   requirement groups so no single extraction call sees too many
//!   obligations
//! - A second, idempotent pass that expands the static section-adjacency
//!   table and content triggers into chunk-id relationship links
//! - A document pipeline gluing detector, builder, enricher, and the
//!   per-section report together

pub mod builder;
pub mod enricher;
pub mod pipeline;

pub use builder::{ChunkBuilder, ChunkingConfig};
pub use enricher::{adjacent_sections, RelationshipEnricher};
pub use pipeline::{DocumentPipeline, PipelineOutput};

use thiserror::Error;

use rfx_structure::StructureError;

/// Errors raised while building the chunking machinery.
#[derive(Error, Debug)]
pub enum ChunkingError {
    #[error(transparent)]
    Structure(#[from] StructureError),

    #[error("invalid pattern: {0}")]
    Pattern(#[from] regex::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, ChunkingError>;
