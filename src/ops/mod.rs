//! Checked mutations on a conceptual model document.
//!
//! Every operation resolves all the nodes it needs before touching the tree,
//! so a lookup failure leaves the document unchanged. Cascading operations
//! report what they removed.

mod attribute;
mod domain;
mod entity;
mod identifier;
mod relationship;
mod symbol;

pub use relationship::Cardinality;

use log::info;
use serde::Serialize;

use crate::config::EngineConfig;
use crate::dialect::Dialect;
use crate::document::{Document, IdsExhausted, NodeId, NodeNotFound};
use crate::model::Model;
use crate::parser::ParseError;
use crate::reader::ReadError;
use crate::serializer;
use crate::tag::Tag;

#[derive(Debug, thiserror::Error)]
pub enum OpsError {
    #[error(transparent)]
    NodeNotFound(#[from] NodeNotFound),
    #[error(transparent)]
    IdsExhausted(#[from] IdsExhausted),
    #[error("Unsupported dialect: {0} documents cannot be edited")]
    UnsupportedDialect(Dialect),
    #[error("Invalid field: {0}")]
    InvalidField(String),
}

/// Ids removed by a cascading operation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Removed {
    pub entities: Vec<String>,
    pub attributes: Vec<String>,
    pub identifiers: Vec<String>,
    pub relationships: Vec<String>,
    pub symbols: Vec<String>,
    /// Tags of wrapper and collection nodes dropped because they became empty
    pub containers: Vec<String>,
}

impl Removed {
    pub fn merge(&mut self, other: Removed) {
        self.entities.extend(other.entities);
        self.attributes.extend(other.attributes);
        self.identifiers.extend(other.identifiers);
        self.relationships.extend(other.relationships);
        self.symbols.extend(other.symbols);
        self.containers.extend(other.containers);
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
            && self.attributes.is_empty()
            && self.identifiers.is_empty()
            && self.relationships.is_empty()
            && self.symbols.is_empty()
            && self.containers.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatedEntity {
    pub entity_id: String,
    pub symbol_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatedAttribute {
    pub attribute_id: String,
    pub data_item_id: String,
}

/// A loaded document together with the settings used to stamp new nodes.
#[derive(Debug, Clone)]
pub struct ModelDocument {
    doc: Document,
    config: EngineConfig,
    dialect: Dialect,
}

impl ModelDocument {
    pub fn new(doc: Document, config: EngineConfig) -> Self {
        let dialect = Dialect::of(&doc);
        info!("loaded {} document, last id o{}", dialect, doc.last_id());
        Self { doc, config, dialect }
    }

    pub fn load(text: &str) -> Result<Self, ParseError> {
        Ok(Self::new(Document::load(text)?, EngineConfig::default()))
    }

    pub fn with_config(mut self, config: EngineConfig) -> Self {
        self.config = config;
        self
    }

    pub fn document(&self) -> &Document {
        &self.doc
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn dialect(&self) -> Dialect {
        self.dialect
    }

    pub fn to_xml(&self) -> String {
        serializer::serialize(&self.doc, &self.config.preamble)
    }

    /// Serialize and read back, the way a caller refreshes its view after
    /// each mutation.
    pub fn snapshot(&self) -> Result<Model, ReadError> {
        Model::from_xml(&self.to_xml())
    }

    /// The model root, after checking that the document can be edited.
    fn editable_model(&self) -> Result<NodeId, OpsError> {
        if self.dialect != Dialect::Conceptual {
            return Err(OpsError::UnsupportedDialect(self.dialect));
        }
        Ok(self.doc.model_root()?)
    }

    /// Object `tag` with `Id == id` inside the model-level `collection`.
    fn find_object(
        &self,
        model: NodeId,
        collection: Tag,
        tag: Tag,
        id: &str,
    ) -> Result<NodeId, NodeNotFound> {
        let collection = self.doc.find_node(model, &[collection])?;
        self.doc
            .child_by_id(collection, tag, id)
            .ok_or_else(|| NodeNotFound::new(format!("<{tag}> {id}")))
    }

    fn entity_node(&self, model: NodeId, id: &str) -> Result<NodeId, NodeNotFound> {
        self.find_object(model, Tag::Entities, Tag::Entity, id)
    }

    fn relationship_node(&self, model: NodeId, id: &str) -> Result<NodeId, NodeNotFound> {
        self.find_object(model, Tag::Relationships, Tag::Relationship, id)
    }

    fn data_item_node(&self, model: NodeId, id: &str) -> Result<NodeId, NodeNotFound> {
        self.find_object(model, Tag::DataItems, Tag::DataItem, id)
    }

    fn domain_node(&self, model: NodeId, id: &str) -> Result<NodeId, NodeNotFound> {
        self.find_object(model, Tag::Domains, Tag::Domain, id)
    }

    /// First `tag` child of `parent`, created and appended when missing.
    fn ensure_collection(&mut self, parent: NodeId, tag: Tag) -> NodeId {
        match self.doc.child(parent, tag) {
            Some(collection) => collection,
            None => {
                let collection = self.doc.create_element(tag.as_str());
                self.doc.append(parent, collection);
                collection
            }
        }
    }

    /// Point `parent/wrapper/object@Ref` at `target`, creating the wrapper and
    /// the reference node as needed.
    fn set_ref(&mut self, parent: NodeId, wrapper: Tag, object: Tag, target: &str) {
        let wrapper = self.ensure_collection(parent, wrapper);
        let object = self.ensure_collection(wrapper, object);
        self.doc.set_attr(object, "Ref", target);
    }

    fn set_field(&mut self, node: NodeId, tag: Tag, value: &str) {
        self.doc.set_field(node, tag.as_str(), value);
    }

    /// Detached object node carrying `id` and the standard identity fields.
    fn build_basic_node(&mut self, tag: Tag, id: &str, name: &str) -> NodeId {
        let node = self.doc.create_element(tag.as_str());
        self.doc.set_attr(node, "Id", id);

        let now = self.config.clock.now().to_string();
        let object_id = self.config.object_ids.next();
        let code = self.config.object_ids.next();
        let author = self.config.author.clone();

        self.set_field(node, Tag::ObjectId, &object_id);
        self.set_field(node, Tag::CreationDate, &now);
        self.set_field(node, Tag::Creator, &author);
        self.set_field(node, Tag::ModificationDate, &now);
        self.set_field(node, Tag::Modifier, &author);
        self.set_field(node, Tag::Name, name);
        self.set_field(node, Tag::Code, &code);
        node
    }
}

fn check_field_tag(tag: &str) -> Result<(), OpsError> {
    if crate::tag::is_field_tag(tag) {
        Ok(())
    } else {
        Err(OpsError::InvalidField(tag.to_string()))
    }
}
