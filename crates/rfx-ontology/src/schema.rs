//! Constrained relationship schema
//!
//! The schema is a fixed map from (source type, relation) to the target
//! types that relation may point at. Anything outside the map is rejected,
//! which keeps extracted graphs from degenerating into all-pairs noise.

use std::collections::{BTreeMap, HashMap};

use once_cell::sync::Lazy;

use crate::types::{EntityType, RelationType};

use EntityType::*;
use RelationType::*;

type SchemaMap = HashMap<(EntityType, RelationType), &'static [EntityType]>;

static VALID_RELATIONSHIPS: Lazy<SchemaMap> = Lazy::new(|| {
    let rows: &[((EntityType, RelationType), &'static [EntityType])] = &[
        // Section edges
        ((Section, References), &[Section, Requirement, Clause, Document]),
        ((Section, DependsOn), &[Section, Requirement]),
        ((Section, Evaluates), &[Section, Requirement, Concept]),
        ((Section, Supports), &[Section, Requirement]),
        ((Section, Requires), &[Requirement, Document, Clause]),
        ((Section, Contains), &[Requirement, Concept, Clause]),
        // Requirement edges
        ((Requirement, References), &[Section, Clause, Document, Requirement]),
        ((Requirement, DependsOn), &[Requirement, Concept, Technology]),
        ((Requirement, Requires), &[Technology, Concept, Organization]),
        ((Requirement, Specifies), &[Concept, Technology, Event]),
        ((Requirement, AppliesTo), &[Section, Organization, Technology]),
        // Organization edges
        ((Organization, Implements), &[Requirement, Technology]),
        ((Organization, ResponsibleFor), &[Requirement, Event, Concept]),
        ((Organization, Delivers), &[Concept, Technology, Document]),
        ((Organization, PerformedAt), &[Location]),
        // Clause edges
        ((Clause, AppliesTo), &[Section, Requirement, Organization]),
        ((Clause, References), &[Clause, Document, Section]),
        ((Clause, Requires), &[Requirement, Concept]),
        // Concept edges
        ((Concept, DefinedBy), &[Section, Requirement, Document]),
        ((Concept, DependsOn), &[Concept, Technology, Requirement]),
        ((Concept, Implements), &[Requirement]),
        ((Concept, Specifies), &[Technology, Event]),
        // Event edges
        ((Event, Requires), &[Concept, Document, Technology]),
        ((Event, DependsOn), &[Event, Requirement]),
        ((Event, DeliveredBy), &[Organization]),
        ((Event, PerformedAt), &[Location]),
        // Technology edges
        ((Technology, Implements), &[Requirement, Concept]),
        ((Technology, Supports), &[Requirement, Concept]),
        ((Technology, DependsOn), &[Technology, Concept]),
        // Person edges
        ((Person, ResponsibleFor), &[Requirement, Event, Concept]),
        ((Person, Represents), &[Organization]),
        // Document edges
        ((Document, References), &[Section, Requirement, Clause, Document]),
        ((Document, Supports), &[Section, Requirement]),
        ((Document, Defines), &[Concept, Requirement]),
        // Location edges
        ((Location, Hosts), &[Event, Organization]),
    ];
    rows.iter().copied().collect()
});

static SHARED: Lazy<OntologySchema> = Lazy::new(|| OntologySchema);

/// Outcome of validating one proposed graph edge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EdgeValidation {
    Valid,
    /// The source type carries no such relation at all.
    UnknownRelation { message: String },
    /// The relation exists but does not point at this target type.
    DisallowedTarget { message: String },
}

impl EdgeValidation {
    pub fn is_valid(&self) -> bool {
        matches!(self, Self::Valid)
    }

    pub fn message(&self) -> Option<&str> {
        match self {
            Self::Valid => None,
            Self::UnknownRelation { message } | Self::DisallowedTarget { message } => {
                Some(message)
            }
        }
    }
}

/// Handle over the fixed relationship schema. Stateless and `Sync`; use
/// [`OntologySchema::shared`] rather than constructing per call site.
#[derive(Debug, Clone, Copy, Default)]
pub struct OntologySchema;

impl OntologySchema {
    pub fn shared() -> &'static Self {
        &SHARED
    }

    /// Whether the schema allows this (source, relation, target) triple.
    pub fn is_valid(
        &self,
        source: EntityType,
        relation: RelationType,
        target: EntityType,
    ) -> bool {
        VALID_RELATIONSHIPS
            .get(&(source, relation))
            .is_some_and(|targets| targets.contains(&target))
    }

    /// String-typed convenience for callers holding extractor output.
    /// Unknown type or relation names are invalid, not an error.
    pub fn is_valid_named(&self, source: &str, relation: &str, target: &str) -> bool {
        let (Some(source), Some(relation), Some(target)) = (
            EntityType::from_str(source),
            RelationType::from_str(relation),
            EntityType::from_str(target),
        ) else {
            return false;
        };
        self.is_valid(source, relation, target)
    }

    /// All relations a source type may carry, with their allowed targets.
    pub fn allowed_relations(
        &self,
        source: EntityType,
    ) -> BTreeMap<RelationType, Vec<EntityType>> {
        VALID_RELATIONSHIPS
            .iter()
            .filter(|((row_source, _), _)| *row_source == source)
            .map(|((_, relation), targets)| (*relation, targets.to_vec()))
            .collect()
    }

    /// Validate a labeled edge, producing a diagnostic that names the valid
    /// alternatives when the edge is rejected.
    pub fn validate(
        &self,
        source_label: &str,
        source: EntityType,
        relation: RelationType,
        target_label: &str,
        target: EntityType,
    ) -> EdgeValidation {
        match VALID_RELATIONSHIPS.get(&(source, relation)) {
            None => {
                let relations: Vec<&str> = self
                    .allowed_relations(source)
                    .keys()
                    .map(|r| r.as_str())
                    .collect();
                EdgeValidation::UnknownRelation {
                    message: format!(
                        "{source} carries no '{relation}' relation; valid relations: {}",
                        relations.join(", ")
                    ),
                }
            }
            Some(targets) if !targets.contains(&target) => {
                let names: Vec<&str> = targets.iter().map(|t| t.as_str()).collect();
                EdgeValidation::DisallowedTarget {
                    message: format!(
                        "'{source_label}' -{relation}-> '{target_label}': {target} is not a \
                         valid target; valid targets: {}",
                        names.join(", ")
                    ),
                }
            }
            Some(_) => EdgeValidation::Valid,
        }
    }

    /// Rank an edge for extraction prioritization.
    pub fn classify_importance(
        &self,
        source: EntityType,
        source_label: &str,
        relation: RelationType,
        target: EntityType,
        target_label: &str,
    ) -> crate::Importance {
        crate::importance::classify(source, source_label, relation, target, target_label)
    }
}
