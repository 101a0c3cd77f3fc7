//! Entity and relation taxonomies.

use serde::{Deserialize, Serialize};

/// Entity types appearing in solicitation knowledge graphs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EntityType {
    /// Contractors, agencies, departments.
    Organization,
    /// Line items, technical concepts, terms of art.
    Concept,
    /// Milestones, deliveries, reviews.
    Event,
    /// Systems, tools, platforms.
    Technology,
    /// Points of contact, contracting officers.
    Person,
    /// Delivery sites, places of performance.
    Location,
    /// Explicit obligations.
    Requirement,
    /// Regulatory clauses and contract provisions.
    Clause,
    /// Document sections, including attachments.
    Section,
    /// Referenced documents and attachments.
    Document,
}

impl EntityType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Organization => "ORGANIZATION",
            Self::Concept => "CONCEPT",
            Self::Event => "EVENT",
            Self::Technology => "TECHNOLOGY",
            Self::Person => "PERSON",
            Self::Location => "LOCATION",
            Self::Requirement => "REQUIREMENT",
            Self::Clause => "CLAUSE",
            Self::Section => "SECTION",
            Self::Document => "DOCUMENT",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_uppercase().as_str() {
            "ORGANIZATION" => Some(Self::Organization),
            "CONCEPT" => Some(Self::Concept),
            "EVENT" => Some(Self::Event),
            "TECHNOLOGY" => Some(Self::Technology),
            "PERSON" => Some(Self::Person),
            "LOCATION" => Some(Self::Location),
            "REQUIREMENT" => Some(Self::Requirement),
            "CLAUSE" => Some(Self::Clause),
            "SECTION" => Some(Self::Section),
            "DOCUMENT" => Some(Self::Document),
            _ => None,
        }
    }
}

impl std::fmt::Display for EntityType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Relation types allowed between entities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RelationType {
    /// One entity mentions or cites another.
    References,
    /// One entity needs another for context.
    DependsOn,
    /// Evaluation factors assess content elsewhere.
    Evaluates,
    /// Attachments and clauses back up main sections.
    Supports,
    /// Mandatory connection for compliance.
    Requires,
    /// Entity defines a concept or term.
    Defines,
    /// Concept is defined elsewhere.
    DefinedBy,
    /// Entity implements a requirement.
    Implements,
    /// Entity validates a requirement or approach.
    Validates,
    /// Entity pins down details of another.
    Specifies,
    /// Structural containment.
    Contains,
    /// Citation of a clause, regulation, or document.
    Cites,
    /// Organization delivers a work product.
    Delivers,
    /// Deliverable produced by an organization.
    DeliveredBy,
    /// Work carried out at a location.
    PerformedAt,
    /// Person or organization owns a task.
    ResponsibleFor,
    /// Clause or requirement scoped to another entity.
    AppliesTo,
    /// Person acts on behalf of an organization.
    Represents,
    /// Location hosts an event or organization.
    Hosts,
}

impl RelationType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::References => "references",
            Self::DependsOn => "depends_on",
            Self::Evaluates => "evaluates",
            Self::Supports => "supports",
            Self::Requires => "requires",
            Self::Defines => "defines",
            Self::DefinedBy => "defined_by",
            Self::Implements => "implements",
            Self::Validates => "validates",
            Self::Specifies => "specifies",
            Self::Contains => "contains",
            Self::Cites => "cites",
            Self::Delivers => "delivers",
            Self::DeliveredBy => "delivered_by",
            Self::PerformedAt => "performed_at",
            Self::ResponsibleFor => "responsible_for",
            Self::AppliesTo => "applies_to",
            Self::Represents => "represents",
            Self::Hosts => "hosts",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "references" => Some(Self::References),
            "depends_on" => Some(Self::DependsOn),
            "evaluates" => Some(Self::Evaluates),
            "supports" => Some(Self::Supports),
            "requires" => Some(Self::Requires),
            "defines" => Some(Self::Defines),
            "defined_by" => Some(Self::DefinedBy),
            "implements" => Some(Self::Implements),
            "validates" => Some(Self::Validates),
            "specifies" => Some(Self::Specifies),
            "contains" => Some(Self::Contains),
            "cites" => Some(Self::Cites),
            "delivers" => Some(Self::Delivers),
            "delivered_by" => Some(Self::DeliveredBy),
            "performed_at" => Some(Self::PerformedAt),
            "responsible_for" => Some(Self::ResponsibleFor),
            "applies_to" => Some(Self::AppliesTo),
            "represents" => Some(Self::Represents),
            "hosts" => Some(Self::Hosts),
            _ => None,
        }
    }
}

impl std::fmt::Display for RelationType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entity_type_round_trips_through_names() {
        assert_eq!(EntityType::Section.as_str(), "SECTION");
        assert_eq!(EntityType::from_str("section"), Some(EntityType::Section));
        assert_eq!(EntityType::from_str("widget"), None);
    }

    #[test]
    fn relation_type_round_trips_through_names() {
        assert_eq!(RelationType::DependsOn.as_str(), "depends_on");
        assert_eq!(
            RelationType::from_str("DEPENDS_ON"),
            Some(RelationType::DependsOn)
        );
        assert_eq!(RelationType::from_str("adjacent_to"), None);
    }

    #[test]
    fn serde_uses_wire_names() {
        let entity = serde_json::to_string(&EntityType::Requirement).unwrap();
        assert_eq!(entity, "\"REQUIREMENT\"");
        let relation = serde_json::to_string(&RelationType::AppliesTo).unwrap();
        assert_eq!(relation, "\"applies_to\"");
        let back: RelationType = serde_json::from_str("\"applies_to\"").unwrap();
        assert_eq!(back, RelationType::AppliesTo);
    }
}
