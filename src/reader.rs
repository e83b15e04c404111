//! Builds the typed [`Model`] snapshot from a document in one pass.

use std::collections::{BTreeMap, HashMap};

use log::debug;

use crate::dialect::{Dialect, DialectKeys};
use crate::document::{Document, NodeId};
use crate::geometry::Rect;
use crate::model::{Attribute, Domain, Entity, Identifier, Model, Relation, RelationEnd};
use crate::parser::ParseError;
use crate::tag::Tag;

#[derive(Debug, thiserror::Error)]
pub enum ReadError {
    #[error("Parse error: {0}")]
    Parse(#[from] ParseError),
    #[error("Malformed model: {0}")]
    MalformedModel(String),
}

fn malformed(what: impl Into<String>) -> ReadError {
    ReadError::MalformedModel(what.into())
}

/// Read the typed model out of `doc`. Either the whole model is produced or
/// an error is returned; there are no partial results.
pub fn read_model(doc: &Document) -> Result<Model, ReadError> {
    ModelReader::new(doc)?.read()
}

impl Model {
    /// Parse `text` and read the typed model from it.
    pub fn from_xml(text: &str) -> Result<Self, ReadError> {
        let doc = Document::load(text)?;
        read_model(&doc)
    }
}

struct ModelReader<'a> {
    doc: &'a Document,
    model: NodeId,
    dialect: Dialect,
    keys: &'static DialectKeys,
}

impl<'a> ModelReader<'a> {
    fn new(doc: &'a Document) -> Result<Self, ReadError> {
        let model = doc
            .model_root()
            .map_err(|e| malformed(format!("missing model root ({e})")))?;
        let dialect = Dialect::detect(doc, model);

        Ok(Self {
            doc,
            model,
            dialect,
            keys: dialect.keys(),
        })
    }

    fn read(&self) -> Result<Model, ReadError> {
        let domains = self.read_domains()?;
        let data_items = match self.dialect {
            Dialect::Conceptual => self.read_data_items()?,
            Dialect::Physical => BTreeMap::new(),
        };
        let locations = self.read_locations()?;

        let entities = self
            .collection_items(self.keys.entities, self.keys.entity)
            .into_iter()
            .map(|node| self.read_entity(node, &data_items, &locations))
            .collect::<Result<Vec<_>, _>>()?;

        let relations = self
            .collection_items(self.keys.relations, self.keys.relation)
            .into_iter()
            .map(|node| self.read_relation(node))
            .collect::<Result<Vec<_>, _>>()?;

        debug!(
            "read {} model: {} entities, {} relations, {} domains",
            self.dialect,
            entities.len(),
            relations.len(),
            domains.len()
        );

        Ok(Model {
            dialect: self.dialect,
            entities,
            domains,
            data_items,
            relations,
        })
    }

    /// Items of an optional model-level collection; absent means empty.
    fn collection_items(&self, collection: Tag, item: Tag) -> Vec<NodeId> {
        self.doc
            .child(self.model, collection)
            .map(|c| self.doc.find_children(c, |el| el.is(item)))
            .unwrap_or_default()
    }

    fn required_id(&self, node: NodeId) -> Result<String, ReadError> {
        self.doc
            .element(node)
            .id()
            .map(str::to_string)
            .ok_or_else(|| malformed(format!("<{}> without Id", self.doc.tag(node))))
    }

    fn required_field(&self, node: NodeId, tag: Tag) -> Result<String, ReadError> {
        self.doc.field(node, tag).ok_or_else(|| {
            let owner = self.doc.element(node).id().unwrap_or("?");
            malformed(format!("<{}> {} has no <{}>", self.doc.tag(node), owner, tag))
        })
    }

    fn length(&self, node: NodeId) -> Result<u32, ReadError> {
        match self.doc.field(node, Tag::Length) {
            None => Ok(0),
            Some(s) if s.trim().is_empty() => Ok(0),
            Some(s) => s
                .trim()
                .parse()
                .map_err(|_| malformed(format!("invalid length {s:?}"))),
        }
    }

    fn read_domains(&self) -> Result<BTreeMap<String, Domain>, ReadError> {
        let mut domains = BTreeMap::new();
        for node in self.collection_items(Tag::Domains, self.keys.domain) {
            let domain = Domain {
                id: self.required_id(node)?,
                name: self.required_field(node, Tag::Name)?,
                code: self.doc.field(node, Tag::Code).unwrap_or_default(),
                data_type: self.doc.field(node, Tag::DataType).unwrap_or_default(),
                length: self.length(node)?,
            };
            domains.insert(domain.id.clone(), domain);
        }
        Ok(domains)
    }

    fn read_attribute(&self, node: NodeId) -> Result<Attribute, ReadError> {
        Ok(Attribute {
            id: self.required_id(node)?,
            name: self.required_field(node, Tag::Name)?,
            data_type: self.doc.field(node, Tag::DataType).unwrap_or_default(),
            length: self.length(node)?,
            domain_id: self
                .doc
                .reference_at(node, &[Tag::DomainLink, self.keys.domain])
                .map(str::to_string),
            data_item_id: None,
        })
    }

    fn read_data_items(&self) -> Result<BTreeMap<String, Attribute>, ReadError> {
        let mut items = BTreeMap::new();
        for node in self.collection_items(Tag::DataItems, Tag::DataItem) {
            let item = self.read_attribute(node)?;
            items.insert(item.id.clone(), item);
        }
        Ok(items)
    }

    /// Symbol rectangles of the first diagram, keyed by the bound object's id.
    fn read_locations(&self) -> Result<HashMap<String, Rect>, ReadError> {
        let mut locations = HashMap::new();
        let Ok(symbols) = self
            .doc
            .find_node(self.model, &[self.keys.diagrams, self.keys.diagram, Tag::Symbols])
        else {
            return Ok(locations);
        };

        for symbol in self.doc.find_children(symbols, |el| el.is(self.keys.symbol)) {
            let Some(object) = self
                .doc
                .reference_at(symbol, &[Tag::Object, self.keys.entity_ref])
            else {
                continue;
            };
            let raw = self.required_field(symbol, Tag::Rect)?;
            let rect = Rect::parse_symbol_rect(&raw)
                .ok_or_else(|| malformed(format!("invalid symbol rectangle {raw:?}")))?;
            locations.entry(object.to_string()).or_insert(rect);
        }
        Ok(locations)
    }

    fn read_entity(
        &self,
        node: NodeId,
        data_items: &BTreeMap<String, Attribute>,
        locations: &HashMap<String, Rect>,
    ) -> Result<Entity, ReadError> {
        let id = self.required_id(node)?;

        let attributes = match self.doc.child(node, self.keys.attributes) {
            Some(collection) => self
                .doc
                .find_children(collection, |el| el.is(self.keys.attribute))
                .into_iter()
                .map(|attribute| self.resolve_attribute(attribute, data_items))
                .collect::<Result<Vec<_>, _>>()?,
            None => Vec::new(),
        };

        Ok(Entity {
            uid: self.doc.field(node, Tag::ObjectId).unwrap_or_default(),
            name: self.required_field(node, Tag::Name)?,
            attributes,
            identifiers: self.read_identifiers(node)?,
            location: locations.get(&id).copied(),
            id,
        })
    }

    /// Conceptual attributes indirect through a shared data item; physical
    /// columns carry their type inline.
    fn resolve_attribute(
        &self,
        node: NodeId,
        data_items: &BTreeMap<String, Attribute>,
    ) -> Result<Attribute, ReadError> {
        let Some(item_id) = self
            .doc
            .reference_at(node, &[Tag::DataItemLink, Tag::DataItem])
        else {
            return self.read_attribute(node);
        };

        let id = self.required_id(node)?;
        let item = data_items.get(item_id).ok_or_else(|| {
            malformed(format!(
                "attribute {id} references missing data item {item_id}"
            ))
        })?;

        Ok(Attribute {
            id,
            data_item_id: Some(item_id.to_string()),
            ..item.clone()
        })
    }

    fn read_identifiers(&self, entity: NodeId) -> Result<Vec<Identifier>, ReadError> {
        let Some(collection) = self.doc.child(entity, self.keys.identifiers) else {
            return Ok(Vec::new());
        };
        let primary = self
            .doc
            .reference_at(entity, &[self.keys.primary_identifier, self.keys.identifier]);

        self.doc
            .find_children(collection, |el| el.is(self.keys.identifier))
            .into_iter()
            .map(|node| {
                let id = self.required_id(node)?;
                Ok(Identifier {
                    attribute_id: self
                        .doc
                        .reference_at(
                            node,
                            &[self.keys.identifier_attributes, self.keys.identifier_attribute],
                        )
                        .map(str::to_string),
                    is_primary: primary == Some(id.as_str()),
                    id,
                })
            })
            .collect()
    }

    fn relation_end(&self, node: NodeId, side: Tag, cardinality: Tag) -> Result<RelationEnd, ReadError> {
        let reference = self
            .doc
            .reference_at(node, &[side, self.keys.entity_ref])
            .ok_or_else(|| {
                let id = self.doc.element(node).id().unwrap_or("?");
                malformed(format!("relation {id} has no <{side}> reference"))
            })?;

        Ok(RelationEnd {
            reference: reference.to_string(),
            cardinality: self.doc.field(node, cardinality).unwrap_or_default(),
        })
    }

    fn read_relation(&self, node: NodeId) -> Result<Relation, ReadError> {
        Ok(Relation {
            id: self.required_id(node)?,
            name: self.required_field(node, Tag::Name)?,
            from: self.relation_end(node, self.keys.relation_from, self.keys.from_cardinality)?,
            to: self.relation_end(node, self.keys.relation_to, self.keys.to_cardinality)?,
        })
    }
}
