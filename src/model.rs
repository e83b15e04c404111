//! Typed, denormalized read model derived from a document.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::dialect::Dialect;
use crate::geometry::Rect;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Model {
    #[serde(serialize_with = "serialize_dialect")]
    pub dialect: Dialect,
    pub entities: Vec<Entity>,
    pub domains: BTreeMap<String, Domain>,
    /// Shared conceptual data items by id; empty for physical documents
    pub data_items: BTreeMap<String, Attribute>,
    pub relations: Vec<Relation>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Entity {
    pub id: String,
    /// The `a:ObjectID` provenance token
    pub uid: String,
    pub name: String,
    pub attributes: Vec<Attribute>,
    pub identifiers: Vec<Identifier>,
    pub location: Option<Rect>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Attribute {
    pub id: String,
    pub name: String,
    pub data_type: String,
    pub length: u32,
    pub domain_id: Option<String>,
    pub data_item_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Identifier {
    pub id: String,
    pub attribute_id: Option<String>,
    pub is_primary: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Domain {
    pub id: String,
    pub name: String,
    pub code: String,
    pub data_type: String,
    pub length: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Relation {
    pub id: String,
    pub name: String,
    pub from: RelationEnd,
    pub to: RelationEnd,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RelationEnd {
    #[serde(rename = "ref")]
    pub reference: String,
    pub cardinality: String,
}

fn serialize_dialect<S: serde::Serializer>(dialect: &Dialect, s: S) -> Result<S::Ok, S::Error> {
    s.collect_str(dialect)
}

impl Model {
    pub fn entity(&self, id: &str) -> Option<&Entity> {
        self.entities.iter().find(|e| e.id == id)
    }

    pub fn entity_by_name(&self, name: &str) -> Option<&Entity> {
        self.entities.iter().find(|e| e.name == name)
    }

    /// Relations with `entity_id` on either end.
    pub fn relations_of<'a>(&'a self, entity_id: &'a str) -> impl Iterator<Item = &'a Relation> {
        self.relations
            .iter()
            .filter(move |r| r.from.reference == entity_id || r.to.reference == entity_id)
    }
}

impl Entity {
    pub fn attribute(&self, id: &str) -> Option<&Attribute> {
        self.attributes.iter().find(|a| a.id == id)
    }

    pub fn attribute_by_name(&self, name: &str) -> Option<&Attribute> {
        self.attributes.iter().find(|a| a.name == name)
    }

    pub fn primary_identifier(&self) -> Option<&Identifier> {
        self.identifiers.iter().find(|i| i.is_primary)
    }
}
