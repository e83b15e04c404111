//! Document dialect detection and the per-dialect tag table.

use std::fmt;

use crate::document::{Document, NodeId};
use crate::tag::Tag;

/// Document dialect variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Dialect {
    /// Conceptual/logical model: entities, data items, relationships
    #[default]
    Conceptual,
    /// Physical model: tables, columns, references
    Physical,
}

/// Tags a dialect uses for each role. Everything dialect-specific in the
/// reader goes through this table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DialectKeys {
    pub diagrams: Tag,
    pub diagram: Tag,
    pub symbol: Tag,
    pub entities: Tag,
    pub entity: Tag,
    pub attributes: Tag,
    pub attribute: Tag,
    pub domain: Tag,
    pub identifiers: Tag,
    pub identifier: Tag,
    pub identifier_attributes: Tag,
    pub identifier_attribute: Tag,
    pub primary_identifier: Tag,
    pub relations: Tag,
    pub relation: Tag,
    pub relation_from: Tag,
    pub relation_to: Tag,
    /// Object tag inside relation ends and symbol `c:Object` links
    pub entity_ref: Tag,
    pub from_cardinality: Tag,
    pub to_cardinality: Tag,
}

const CONCEPTUAL: DialectKeys = DialectKeys {
    diagrams: Tag::ConceptualDiagrams,
    diagram: Tag::ConceptualDiagram,
    symbol: Tag::EntitySymbol,
    entities: Tag::Entities,
    entity: Tag::Entity,
    attributes: Tag::Attributes,
    attribute: Tag::EntityAttribute,
    domain: Tag::Domain,
    identifiers: Tag::Identifiers,
    identifier: Tag::Identifier,
    identifier_attributes: Tag::IdentifierAttributes,
    identifier_attribute: Tag::EntityAttribute,
    primary_identifier: Tag::PrimaryIdentifier,
    relations: Tag::Relationships,
    relation: Tag::Relationship,
    relation_from: Tag::Object1,
    relation_to: Tag::Object2,
    entity_ref: Tag::Entity,
    from_cardinality: Tag::Entity1ToEntity2RoleCardinality,
    to_cardinality: Tag::Entity2ToEntity1RoleCardinality,
};

const PHYSICAL: DialectKeys = DialectKeys {
    diagrams: Tag::PhysicalDiagrams,
    diagram: Tag::PhysicalDiagram,
    symbol: Tag::TableSymbol,
    entities: Tag::Tables,
    entity: Tag::Table,
    attributes: Tag::Columns,
    attribute: Tag::Column,
    domain: Tag::PhysicalDomain,
    identifiers: Tag::Keys,
    identifier: Tag::Key,
    identifier_attributes: Tag::KeyColumns,
    identifier_attribute: Tag::Column,
    primary_identifier: Tag::PrimaryKey,
    relations: Tag::References,
    relation: Tag::Reference,
    relation_from: Tag::ParentTable,
    relation_to: Tag::ChildTable,
    entity_ref: Tag::Table,
    // References carry a single cardinality for both ends
    from_cardinality: Tag::Cardinality,
    to_cardinality: Tag::Cardinality,
};

impl Dialect {
    /// Parse dialect from string.
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "conceptual" | "cdm" => Some(Self::Conceptual),
            "physical" | "pdm" => Some(Self::Physical),
            _ => None,
        }
    }

    /// Detect the dialect from the collections present under the model root.
    pub fn detect(doc: &Document, model: NodeId) -> Self {
        let has = |tag: Tag| doc.child(model, tag).is_some();

        if has(Tag::ConceptualDiagrams) || has(Tag::Entities) {
            Self::Conceptual
        } else if has(Tag::PhysicalDiagrams) || has(Tag::Tables) {
            Self::Physical
        } else {
            Self::default()
        }
    }

    /// Detect from a whole document; documents without a model root are
    /// treated as conceptual.
    pub fn of(doc: &Document) -> Self {
        doc.model_root()
            .map(|model| Self::detect(doc, model))
            .unwrap_or_default()
    }

    pub fn keys(self) -> &'static DialectKeys {
        match self {
            Self::Conceptual => &CONCEPTUAL,
            Self::Physical => &PHYSICAL,
        }
    }
}

impl fmt::Display for Dialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Conceptual => f.write_str("conceptual"),
            Self::Physical => f.write_str("physical"),
        }
    }
}
