//! Structure recovery for solicitation documents
//!
//! Recovers the legally standardized section layout of a solicitation from
//! raw text:
//! - Section A-M boundary detection with per-label fallback patterns
//! - J attachment detection with delimiter-constrained designators
//! - Subsection detection across several numbering conventions
//! - A lightweight obligation-sentence (requirement) detector
//!
//! All detection is regex-driven and best-effort: a document with no
//! recognizable structure yields zero sections, never an error.

mod patterns;

pub mod detector;
pub mod requirements;

pub use detector::{SectionDetector, DEFAULT_CHARS_PER_PAGE};
pub use requirements::{RequirementExtractor, RequirementHit, MAX_REQUIREMENTS};

use thiserror::Error;

/// Errors raised while building the detection machinery.
#[derive(Error, Debug)]
pub enum StructureError {
    #[error("invalid pattern: {0}")]
    Pattern(#[from] regex::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, StructureError>;
