pub mod config;
pub mod datatype;
pub mod dialect;
pub mod document;
pub mod error;
pub mod geometry;
pub mod lexer;
pub mod measure;
pub mod model;
pub mod ops;
pub mod parser;
pub mod reader;
pub mod serializer;
pub mod tag;

pub use config::EngineConfig;
pub use dialect::Dialect;
pub use document::{Document, IdsExhausted, NodeId, NodeNotFound};
pub use error::EngineError;
pub use geometry::{Point, Rect};
pub use model::Model;
pub use ops::{Cardinality, CreatedAttribute, CreatedEntity, ModelDocument, OpsError, Removed};
pub use reader::{ReadError, read_model};

use serde::Serialize;
use wasm_bindgen::prelude::*;

/// Initialize panic hook for better error messages in WASM
#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(target_arch = "wasm32")]
    console_error_panic_hook::set_once();
}

fn to_json<T: Serialize>(value: &T) -> Result<String, String> {
    serde_json::to_string(value).map_err(|e| e.to_string())
}

fn cardinality(value: &str) -> Result<Cardinality, String> {
    Cardinality::from_str(value).ok_or_else(|| format!("Invalid cardinality: {value}"))
}

/// Read a model document and return the typed model as JSON
#[wasm_bindgen(js_name = "readModel")]
pub fn read_model_json(xml: &str) -> Result<String, String> {
    let model = Model::from_xml(xml).map_err(|e| e.to_string())?;
    to_json(&model)
}

/// Editable model document. Structured results are returned as JSON.
#[wasm_bindgen]
pub struct ModelEditor {
    doc: ModelDocument,
}

#[wasm_bindgen]
impl ModelEditor {
    #[wasm_bindgen(constructor)]
    pub fn new(xml: &str) -> Result<ModelEditor, String> {
        let doc = ModelDocument::load(xml).map_err(|e| e.to_string())?;
        Ok(ModelEditor { doc })
    }

    pub fn dialect(&self) -> String {
        self.doc.dialect().to_string()
    }

    #[wasm_bindgen(js_name = "toXml")]
    pub fn to_xml(&self) -> String {
        self.doc.to_xml()
    }

    pub fn snapshot(&self) -> Result<String, String> {
        let model = self.doc.snapshot().map_err(|e| e.to_string())?;
        to_json(&model)
    }

    #[wasm_bindgen(js_name = "createEntity")]
    pub fn create_entity(&mut self, name: &str) -> Result<String, String> {
        let created = self.doc.create_entity(name).map_err(|e| e.to_string())?;
        to_json(&created)
    }

    #[wasm_bindgen(js_name = "setEntityField")]
    pub fn set_entity_field(&mut self, entity_id: &str, field: &str, value: &str) -> Result<(), String> {
        self.doc
            .set_entity_field(entity_id, field, value)
            .map_err(|e| e.to_string())
    }

    #[wasm_bindgen(js_name = "deleteEntity")]
    pub fn delete_entity(&mut self, entity_id: &str) -> Result<String, String> {
        let removed = self.doc.delete_entity(entity_id).map_err(|e| e.to_string())?;
        to_json(&removed)
    }

    #[wasm_bindgen(js_name = "moveEntity")]
    pub fn move_entity(&mut self, entity_id: &str, x1: i32, y1: i32, x2: i32, y2: i32) -> Result<(), String> {
        let rect = Rect::new(x1.into(), y1.into(), x2.into(), y2.into());
        self.doc.move_entity(entity_id, rect).map_err(|e| e.to_string())
    }

    #[wasm_bindgen(js_name = "createAttribute")]
    pub fn create_attribute(
        &mut self,
        entity_id: &str,
        name: &str,
        data_type: &str,
        length: u32,
    ) -> Result<String, String> {
        let created = self
            .doc
            .create_attribute(entity_id, name, data_type, length)
            .map_err(|e| e.to_string())?;
        to_json(&created)
    }

    #[wasm_bindgen(js_name = "removeAttribute")]
    pub fn remove_attribute(&mut self, entity_id: &str, attribute_id: &str) -> Result<String, String> {
        let removed = self
            .doc
            .remove_attribute(entity_id, attribute_id)
            .map_err(|e| e.to_string())?;
        to_json(&removed)
    }

    #[wasm_bindgen(js_name = "setDataTypeAndLength")]
    pub fn set_data_type_and_length(&mut self, data_item_id: &str, data_type: &str, length: u32) -> Result<(), String> {
        self.doc
            .set_data_type_and_length(data_item_id, data_type, length)
            .map_err(|e| e.to_string())
    }

    #[wasm_bindgen(js_name = "assignDomain")]
    pub fn assign_domain(&mut self, data_item_id: &str, domain_id: &str) -> Result<(), String> {
        self.doc
            .assign_domain(data_item_id, domain_id)
            .map_err(|e| e.to_string())
    }

    #[wasm_bindgen(js_name = "createDomain")]
    pub fn create_domain(&mut self, name: &str, data_type: &str, length: u32) -> Result<String, String> {
        self.doc
            .create_domain(name, data_type, length)
            .map_err(|e| e.to_string())
    }

    #[wasm_bindgen(js_name = "updateDomain")]
    pub fn update_domain(&mut self, domain_id: &str, name: &str, data_type: &str, length: u32) -> Result<(), String> {
        self.doc
            .update_domain(domain_id, name, data_type, length)
            .map_err(|e| e.to_string())
    }

    /// False when the domain is still referenced
    #[wasm_bindgen(js_name = "removeDomain")]
    pub fn remove_domain(&mut self, domain_id: &str) -> Result<bool, String> {
        self.doc.remove_domain(domain_id).map_err(|e| e.to_string())
    }

    #[wasm_bindgen(js_name = "addIdentifier")]
    pub fn add_identifier(&mut self, entity_id: &str, attribute_id: &str, is_primary: bool) -> Result<String, String> {
        self.doc
            .add_identifier(entity_id, attribute_id, is_primary)
            .map_err(|e| e.to_string())
    }

    #[wasm_bindgen(js_name = "removeIdentifier")]
    pub fn remove_identifier(&mut self, entity_id: &str, attribute_id: &str) -> Result<String, String> {
        let removed = self
            .doc
            .remove_identifier(entity_id, attribute_id)
            .map_err(|e| e.to_string())?;
        to_json(&removed)
    }

    #[wasm_bindgen(js_name = "createRelationship")]
    pub fn create_relationship(
        &mut self,
        from: &str,
        to: &str,
        name: &str,
        cardinality_value: &str,
    ) -> Result<String, String> {
        let cardinality = cardinality(cardinality_value)?;
        self.doc
            .create_relationship(from, to, name, cardinality)
            .map_err(|e| e.to_string())
    }

    #[wasm_bindgen(js_name = "setRelationshipField")]
    pub fn set_relationship_field(&mut self, relationship_id: &str, field: &str, value: &str) -> Result<(), String> {
        self.doc
            .set_relationship_field(relationship_id, field, value)
            .map_err(|e| e.to_string())
    }

    #[wasm_bindgen(js_name = "setFromRef")]
    pub fn set_from_ref(&mut self, relationship_id: &str, entity_id: &str) -> Result<(), String> {
        self.doc
            .set_from_ref(relationship_id, entity_id)
            .map_err(|e| e.to_string())
    }

    #[wasm_bindgen(js_name = "setToRef")]
    pub fn set_to_ref(&mut self, relationship_id: &str, entity_id: &str) -> Result<(), String> {
        self.doc
            .set_to_ref(relationship_id, entity_id)
            .map_err(|e| e.to_string())
    }

    #[wasm_bindgen(js_name = "setFromCardinality")]
    pub fn set_from_cardinality(&mut self, relationship_id: &str, value: &str) -> Result<(), String> {
        let cardinality = cardinality(value)?;
        self.doc
            .set_from_cardinality(relationship_id, cardinality)
            .map_err(|e| e.to_string())
    }

    #[wasm_bindgen(js_name = "setToCardinality")]
    pub fn set_to_cardinality(&mut self, relationship_id: &str, value: &str) -> Result<(), String> {
        let cardinality = cardinality(value)?;
        self.doc
            .set_to_cardinality(relationship_id, cardinality)
            .map_err(|e| e.to_string())
    }

    #[wasm_bindgen(js_name = "deleteRelationship")]
    pub fn delete_relationship(&mut self, relationship_id: &str) -> Result<String, String> {
        let removed = self
            .doc
            .delete_relationship(relationship_id)
            .map_err(|e| e.to_string())?;
        to_json(&removed)
    }
}
