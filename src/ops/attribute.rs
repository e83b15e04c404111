use log::debug;

use super::{CreatedAttribute, ModelDocument, OpsError, Removed};
use crate::datatype::{base_code, type_identifier};
use crate::document::NodeNotFound;
use crate::tag::Tag;

impl ModelDocument {
    /// Create an attribute on an entity, backed by a fresh data item.
    pub fn create_attribute(
        &mut self,
        entity_id: &str,
        name: &str,
        data_type: &str,
        length: u32,
    ) -> Result<CreatedAttribute, OpsError> {
        let model = self.editable_model()?;
        let entity = self.entity_node(model, entity_id)?;

        let attribute_id = self.doc.next_id()?;
        let data_item_id = self.doc.next_id()?;
        let attribute = self.build_basic_node(Tag::EntityAttribute, &attribute_id, name);
        let data_item = self.build_basic_node(Tag::DataItem, &data_item_id, name);
        self.set_field(data_item, Tag::DataType, &type_identifier(base_code(data_type), length));
        self.set_field(data_item, Tag::Length, &length.to_string());

        self.set_ref(attribute, Tag::DataItemLink, Tag::DataItem, &data_item_id);

        let data_items = self.ensure_collection(model, Tag::DataItems);
        self.doc.append(data_items, data_item);
        let attributes = self.ensure_collection(entity, Tag::Attributes);
        self.doc.append(attributes, attribute);

        debug!(
            "created attribute {attribute_id} ({name:?}) on entity {entity_id} with data item {data_item_id}"
        );
        Ok(CreatedAttribute {
            attribute_id,
            data_item_id,
        })
    }

    /// Remove an attribute from an entity, along with any identifier keyed on
    /// it. The data item stays in the model.
    pub fn remove_attribute(&mut self, entity_id: &str, attribute_id: &str) -> Result<Removed, OpsError> {
        let model = self.editable_model()?;
        let entity = self.entity_node(model, entity_id)?;
        let attributes = self.doc.find_node(entity, &[Tag::Attributes])?;
        let attribute = self
            .doc
            .child_by_id(attributes, Tag::EntityAttribute, attribute_id)
            .ok_or_else(|| NodeNotFound::new(format!("attribute {attribute_id} of entity {entity_id}")))?;

        let mut removed = Removed::default();
        if let Some(identifiers) = self.doc.child(entity, Tag::Identifiers) {
            if let Some((identifier, identifier_id)) = self.identifier_for(identifiers, attribute_id) {
                removed.merge(self.remove_identifier_node(entity, identifiers, identifier, &identifier_id));
            }
        }

        self.doc.remove(attribute);
        removed.attributes.push(attribute_id.to_string());

        if !self.doc.has_children(attributes) {
            self.doc.remove(attributes);
            removed.containers.push(Tag::Attributes.to_string());
        }

        debug!("removed attribute {attribute_id} from entity {entity_id}");
        Ok(removed)
    }

    /// Switch a data item to raw typing. Any domain reference is dropped.
    pub fn set_data_type_and_length(
        &mut self,
        data_item_id: &str,
        data_type: &str,
        length: u32,
    ) -> Result<(), OpsError> {
        let model = self.editable_model()?;
        let data_item = self.data_item_node(model, data_item_id)?;

        if let Some(domain) = self.doc.child(data_item, Tag::DomainLink) {
            self.doc.remove(domain);
            debug!("data item {data_item_id} no longer uses a domain");
        }

        let data_type = type_identifier(base_code(data_type), length);
        self.set_field(data_item, Tag::DataType, &data_type);
        self.set_field(data_item, Tag::Length, &length.to_string());

        debug!("set data type of {data_item_id} to {data_type}");
        Ok(())
    }

    /// Type a data item through a domain. The raw type fields are left in
    /// place and come back into effect if the domain is later dropped.
    pub fn assign_domain(&mut self, data_item_id: &str, domain_id: &str) -> Result<(), OpsError> {
        let model = self.editable_model()?;
        self.domain_node(model, domain_id)?;
        let data_item = self.data_item_node(model, data_item_id)?;

        self.set_ref(data_item, Tag::DomainLink, Tag::Domain, domain_id);
        debug!("assigned domain {domain_id} to data item {data_item_id}");
        Ok(())
    }
}
