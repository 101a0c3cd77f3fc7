//! Constrained knowledge-graph ontology for solicitation documents
//!
//! An unconstrained extractor will happily relate every entity to every
//! other entity. This crate pins down the taxonomy instead:
//! - Ten entity types and nineteen relation types for the government
//!   contracting domain
//! - A fixed (source type, relation) -> allowed target types schema that
//!   rejects edges outside the domain's conventions
//! - An importance classifier that ranks surviving edges as critical,
//!   important, or informational for downstream prioritization

pub mod importance;
pub mod schema;
mod types;

pub use importance::Importance;
pub use schema::{EdgeValidation, OntologySchema};
pub use types::{EntityType, RelationType};
