//! End-to-end document pipeline
//!
//! Detector, builder, enricher, report, run strictly in sequence over one
//! document. The pipeline holds no per-document state, so one instance can
//! process any number of documents.

use std::time::Instant;

use serde::{Deserialize, Serialize};
use tracing::info;

use rfx_core::{Chunk, DocumentReport, Section};
use rfx_structure::SectionDetector;

use crate::builder::{ChunkBuilder, ChunkingConfig};
use crate::enricher::RelationshipEnricher;
use crate::Result;

/// Everything one pipeline run produces.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PipelineOutput {
    pub sections: Vec<Section>,
    pub chunks: Vec<Chunk>,
    pub report: DocumentReport,
}

/// Runs detection, chunking, enrichment, and reporting over raw text.
pub struct DocumentPipeline {
    detector: SectionDetector,
    builder: ChunkBuilder,
    enricher: RelationshipEnricher,
}

impl DocumentPipeline {
    pub fn new(config: ChunkingConfig) -> Result<Self> {
        let detector = SectionDetector::with_chars_per_page(config.chars_per_page)?;
        Ok(Self {
            detector,
            builder: ChunkBuilder::new(config)?,
            enricher: RelationshipEnricher::new(),
        })
    }

    pub fn with_defaults() -> Result<Self> {
        Self::new(ChunkingConfig::default())
    }

    /// Process one document. A document with no recognizable structure
    /// yields empty sections and chunks, not an error.
    pub fn run(&self, text: &str) -> Result<PipelineOutput> {
        let started = Instant::now();

        let sections = self.detector.detect(text)?;
        let mut chunks = self.builder.build(&sections);
        self.enricher.enrich(&mut chunks);
        let report = DocumentReport::from_chunks(&chunks);

        info!(
            sections = sections.len(),
            chunks = chunks.len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "pipeline run complete"
        );

        Ok(PipelineOutput {
            sections,
            chunks,
            report,
        })
    }
}
