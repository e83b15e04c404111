use log::debug;

use super::{ModelDocument, OpsError, Removed};
use crate::document::{NodeId, NodeNotFound};
use crate::tag::Tag;

impl ModelDocument {
    /// Mark an attribute as an identifier of its entity, reusing an existing
    /// identifier for that attribute. Returns the identifier id.
    ///
    /// With `is_primary` the entity's primary identifier moves to it; without,
    /// it stops being primary if it was.
    pub fn add_identifier(
        &mut self,
        entity_id: &str,
        attribute_id: &str,
        is_primary: bool,
    ) -> Result<String, OpsError> {
        let model = self.editable_model()?;
        let entity = self.entity_node(model, entity_id)?;
        self.doc
            .find_node(entity, &[Tag::Attributes])
            .ok()
            .and_then(|attributes| self.doc.child_by_id(attributes, Tag::EntityAttribute, attribute_id))
            .ok_or_else(|| NodeNotFound::new(format!("attribute {attribute_id} of entity {entity_id}")))?;

        let existing = self
            .doc
            .child(entity, Tag::Identifiers)
            .and_then(|identifiers| self.identifier_for(identifiers, attribute_id));

        let identifier_id = match existing {
            Some((_, id)) => id,
            None => {
                let id = self.doc.next_id()?;
                let identifier = self.build_basic_node(Tag::Identifier, &id, &format!("Identifier_{attribute_id}"));
                self.set_ref(identifier, Tag::IdentifierAttributes, Tag::EntityAttribute, attribute_id);

                let identifiers = self.ensure_collection(entity, Tag::Identifiers);
                self.doc.append(identifiers, identifier);
                debug!("created identifier {id} on attribute {attribute_id}");
                id
            }
        };

        let current = self.primary_target(entity);
        if is_primary {
            if current.as_deref() != Some(identifier_id.as_str()) {
                self.set_ref(entity, Tag::PrimaryIdentifier, Tag::Identifier, &identifier_id);
                debug!("primary identifier of entity {entity_id} is now {identifier_id}");
            }
        } else if current.as_deref() == Some(identifier_id.as_str()) {
            if let Some(wrapper) = self.doc.child(entity, Tag::PrimaryIdentifier) {
                self.doc.remove(wrapper);
            }
            debug!("entity {entity_id} no longer has a primary identifier");
        }

        Ok(identifier_id)
    }

    /// Remove the identifier keyed on `attribute_id`.
    pub fn remove_identifier(&mut self, entity_id: &str, attribute_id: &str) -> Result<Removed, OpsError> {
        let model = self.editable_model()?;
        let entity = self.entity_node(model, entity_id)?;
        let identifiers = self.doc.find_node(entity, &[Tag::Identifiers])?;
        let (identifier, identifier_id) = self
            .identifier_for(identifiers, attribute_id)
            .ok_or_else(|| {
                NodeNotFound::new(format!("identifier on attribute {attribute_id} of entity {entity_id}"))
            })?;

        Ok(self.remove_identifier_node(entity, identifiers, identifier, &identifier_id))
    }

    /// The identifier in `identifiers` whose key attribute is `attribute_id`.
    pub(super) fn identifier_for(&self, identifiers: NodeId, attribute_id: &str) -> Option<(NodeId, String)> {
        self.doc
            .find_children(identifiers, |el| el.is(Tag::Identifier))
            .into_iter()
            .find(|&node| {
                self.doc
                    .reference_at(node, &[Tag::IdentifierAttributes, Tag::EntityAttribute])
                    == Some(attribute_id)
            })
            .and_then(|node| Some((node, self.doc.element(node).id()?.to_string())))
    }

    fn primary_target(&self, entity: NodeId) -> Option<String> {
        self.doc
            .reference_at(entity, &[Tag::PrimaryIdentifier, Tag::Identifier])
            .map(str::to_string)
    }

    /// Remove one identifier, then the primary wrapper if it pointed there and
    /// the collection if it is now empty.
    pub(super) fn remove_identifier_node(
        &mut self,
        entity: NodeId,
        identifiers: NodeId,
        identifier: NodeId,
        identifier_id: &str,
    ) -> Removed {
        let mut removed = Removed::default();
        let was_primary = self.primary_target(entity).as_deref() == Some(identifier_id);

        self.doc.remove(identifier);
        removed.identifiers.push(identifier_id.to_string());

        if was_primary {
            if let Some(wrapper) = self.doc.child(entity, Tag::PrimaryIdentifier) {
                self.doc.remove(wrapper);
                removed.containers.push(Tag::PrimaryIdentifier.to_string());
            }
        }

        if !self.doc.has_children(identifiers) {
            self.doc.remove(identifiers);
            removed.containers.push(Tag::Identifiers.to_string());
        }

        debug!("removed identifier {identifier_id}");
        removed
    }
}
