//! Core domain models for solicitation structure recovery
//!
//! Defines the data types shared across the structure/chunking pipeline:
//! - Sections and subsections recovered from document text
//! - Contextual chunks handed to the downstream ingestion pipeline
//! - The per-section summary report for operational visibility

pub mod chunk;
pub mod document;
pub mod report;

pub use chunk::{chunk_id, Chunk, ChunkKind, ChunkMetadata};
pub use document::{base_label, Section, Subsection};
pub use report::{DocumentReport, SectionSummary};
