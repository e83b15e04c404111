use std::fmt;

use log::debug;

use super::{ModelDocument, OpsError, Removed, check_field_tag};
use crate::document::NodeId;
use crate::tag::Tag;

/// Role cardinality on one end of a relationship.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Cardinality {
    ZeroOrOne,
    #[default]
    ZeroOrMany,
    ExactlyOne,
    OneOrMany,
}

impl Cardinality {
    pub const ALL: [Cardinality; 4] = [
        Cardinality::ZeroOrOne,
        Cardinality::ZeroOrMany,
        Cardinality::ExactlyOne,
        Cardinality::OneOrMany,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Cardinality::ZeroOrOne => "0,1",
            Cardinality::ZeroOrMany => "0,n",
            Cardinality::ExactlyOne => "1,1",
            Cardinality::OneOrMany => "1,n",
        }
    }

    /// Parse the stored form, e.g. `"0,n"`.
    pub fn from_str(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.as_str() == s.trim())
    }
}

impl fmt::Display for Cardinality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl ModelDocument {
    /// Create a relationship from `from` to `to` with the same cardinality on
    /// both ends. Returns the relationship id.
    pub fn create_relationship(
        &mut self,
        from: &str,
        to: &str,
        name: &str,
        cardinality: Cardinality,
    ) -> Result<String, OpsError> {
        let model = self.editable_model()?;
        self.entity_node(model, from)?;
        self.entity_node(model, to)?;

        let relationship_id = self.doc.next_id()?;
        let relationship = self.build_basic_node(Tag::Relationship, &relationship_id, name);
        self.set_ref(relationship, Tag::Object1, Tag::Entity, from);
        self.set_ref(relationship, Tag::Object2, Tag::Entity, to);
        self.set_field(relationship, Tag::Entity2ToEntity1RoleCardinality, cardinality.as_str());
        self.set_field(relationship, Tag::Entity1ToEntity2RoleCardinality, cardinality.as_str());

        let relationships = self.ensure_collection(model, Tag::Relationships);
        self.doc.append(relationships, relationship);

        debug!("created relationship {relationship_id} ({name:?}) from {from} to {to}");
        Ok(relationship_id)
    }

    /// Overwrite one `a:` field of a relationship.
    pub fn set_relationship_field(&mut self, relationship_id: &str, field: &str, value: &str) -> Result<(), OpsError> {
        check_field_tag(field)?;
        let relationship = self.editable_relationship(relationship_id)?;

        self.doc.set_field(relationship, field, value);
        debug!("set {field} of relationship {relationship_id}");
        Ok(())
    }

    pub fn set_from_ref(&mut self, relationship_id: &str, entity_id: &str) -> Result<(), OpsError> {
        self.set_end_ref(relationship_id, Tag::Object1, entity_id)
    }

    pub fn set_to_ref(&mut self, relationship_id: &str, entity_id: &str) -> Result<(), OpsError> {
        self.set_end_ref(relationship_id, Tag::Object2, entity_id)
    }

    pub fn set_from_cardinality(&mut self, relationship_id: &str, cardinality: Cardinality) -> Result<(), OpsError> {
        let relationship = self.editable_relationship(relationship_id)?;
        self.set_field(relationship, Tag::Entity1ToEntity2RoleCardinality, cardinality.as_str());
        debug!("from cardinality of {relationship_id} is now {cardinality}");
        Ok(())
    }

    pub fn set_to_cardinality(&mut self, relationship_id: &str, cardinality: Cardinality) -> Result<(), OpsError> {
        let relationship = self.editable_relationship(relationship_id)?;
        self.set_field(relationship, Tag::Entity2ToEntity1RoleCardinality, cardinality.as_str());
        debug!("to cardinality of {relationship_id} is now {cardinality}");
        Ok(())
    }

    /// Delete a relationship and its symbols.
    pub fn delete_relationship(&mut self, relationship_id: &str) -> Result<Removed, OpsError> {
        let model = self.editable_model()?;
        let relationship = self.relationship_node(model, relationship_id)?;

        let mut removed = self.remove_symbols(model, Tag::RelationshipSymbol, Tag::Relationship, relationship_id);
        if removed.symbols.is_empty() {
            debug!("relationship {relationship_id} had no diagram symbol");
        }

        self.doc.remove(relationship);
        removed.relationships.push(relationship_id.to_string());

        debug!("deleted relationship {relationship_id}");
        Ok(removed)
    }

    fn editable_relationship(&self, relationship_id: &str) -> Result<NodeId, OpsError> {
        let model = self.editable_model()?;
        Ok(self.relationship_node(model, relationship_id)?)
    }

    fn set_end_ref(&mut self, relationship_id: &str, side: Tag, entity_id: &str) -> Result<(), OpsError> {
        let model = self.editable_model()?;
        let relationship = self.relationship_node(model, relationship_id)?;
        self.entity_node(model, entity_id)?;

        self.set_ref(relationship, side, Tag::Entity, entity_id);
        debug!("{side} of relationship {relationship_id} now points at {entity_id}");
        Ok(())
    }
}
