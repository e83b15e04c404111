use log::{debug, warn};

use super::{CreatedEntity, ModelDocument, OpsError, Removed, check_field_tag};
use crate::document::NodeId;
use crate::tag::Tag;

impl ModelDocument {
    /// Create an entity together with its symbol on the first diagram.
    pub fn create_entity(&mut self, name: &str) -> Result<CreatedEntity, OpsError> {
        let model = self.editable_model()?;
        let diagram = self
            .doc
            .find_node(model, &[Tag::ConceptualDiagrams, Tag::ConceptualDiagram])?;

        let entity_id = self.doc.next_id()?;
        let symbol_id = self.doc.next_id()?;
        let entity = self.build_basic_node(Tag::Entity, &entity_id, name);
        let symbol = self.build_entity_symbol(&symbol_id, &entity_id);

        let symbols = self.ensure_collection(diagram, Tag::Symbols);
        self.doc.append(symbols, symbol);
        let entities = self.ensure_collection(model, Tag::Entities);
        self.doc.append(entities, entity);

        debug!("created entity {entity_id} ({name:?}) with symbol {symbol_id}");
        Ok(CreatedEntity {
            entity_id,
            symbol_id,
        })
    }

    /// Overwrite one `a:` field of an entity.
    pub fn set_entity_field(&mut self, entity_id: &str, field: &str, value: &str) -> Result<(), OpsError> {
        check_field_tag(field)?;
        let model = self.editable_model()?;
        let entity = self.entity_node(model, entity_id)?;

        self.doc.set_field(entity, field, value);
        debug!("set {field} of entity {entity_id}");
        Ok(())
    }

    /// Delete an entity, its relationships, and its symbols.
    pub fn delete_entity(&mut self, entity_id: &str) -> Result<Removed, OpsError> {
        let model = self.editable_model()?;
        let entity = self.entity_node(model, entity_id)?;

        let mut removed = Removed::default();
        for relationship_id in self.relationships_touching(model, entity_id) {
            removed.merge(self.delete_relationship(&relationship_id)?);
        }

        let symbols = self.remove_symbols(model, Tag::EntitySymbol, Tag::Entity, entity_id);
        if symbols.symbols.is_empty() {
            warn!("entity {entity_id} had no diagram symbol");
        }
        removed.merge(symbols);

        self.doc.remove(entity);
        removed.entities.push(entity_id.to_string());

        debug!(
            "deleted entity {entity_id}: {} relationships, {} symbols",
            removed.relationships.len(),
            removed.symbols.len()
        );
        Ok(removed)
    }

    /// Ids of relationships with `entity_id` on either end.
    fn relationships_touching(&self, model: NodeId, entity_id: &str) -> Vec<String> {
        let Some(relationships) = self.doc.child(model, Tag::Relationships) else {
            return Vec::new();
        };

        self.doc
            .find_children(relationships, |el| el.is(Tag::Relationship))
            .into_iter()
            .filter(|&node| {
                [Tag::Object1, Tag::Object2]
                    .iter()
                    .any(|&side| self.doc.reference_at(node, &[side, Tag::Entity]) == Some(entity_id))
            })
            .filter_map(|node| self.doc.element(node).id().map(str::to_string))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use crate::geometry::Rect;
    use crate::ops::fixture::shop;
    use crate::ops::{OpsError, Removed};

    #[test]
    fn test_create_entity_pairs_symbol() {
        let mut doc = shop();
        let created = doc.create_entity("PRODUCT").unwrap();
        assert_eq!(created.entity_id, "o31");
        assert_eq!(created.symbol_id, "o32");

        let model = doc.snapshot().unwrap();
        let product = model.entity("o31").unwrap();
        assert_eq!(product.name, "PRODUCT");
        assert_eq!(product.uid, "0000-TEST");
        assert_eq!(product.location, Some(Rect::new(34395, 3759, 53577, -5606)));
        assert!(product.attributes.is_empty());
    }

    #[test]
    fn test_create_entity_without_diagram() {
        let mut doc = crate::ops::ModelDocument::load(
            "<Model><o:RootObject Id=\"o1\"><c:Children><o:Model Id=\"o2\"><c:Entities/></o:Model></c:Children></o:RootObject></Model>",
        )
        .unwrap();
        let before = doc.to_xml();
        let err = doc.create_entity("X").unwrap_err();
        assert!(matches!(err, OpsError::NodeNotFound(_)));
        assert_eq!(doc.to_xml(), before);
        assert_eq!(doc.document().last_id(), 2);
    }

    #[test]
    fn test_create_entity_when_ids_run_out() {
        let mut doc = crate::ops::ModelDocument::load(
            "<Model><o:RootObject Id=\"o1\"><c:Children><o:Model Id=\"o18446744073709551614\"><c:ConceptualDiagrams><o:ConceptualDiagram Id=\"o3\"/></c:ConceptualDiagrams></o:Model></c:Children></o:RootObject></Model>",
        )
        .unwrap();
        let before = doc.to_xml();
        let err = doc.create_entity("X").unwrap_err();
        assert!(matches!(err, OpsError::IdsExhausted(_)));
        assert_eq!(doc.to_xml(), before);
        assert!(doc.snapshot().unwrap().entities.is_empty());
    }

    #[test]
    fn test_set_entity_field() {
        let mut doc = shop();
        doc.set_entity_field("o10", "a:Name", "CLIENT & CO").unwrap();
        assert!(doc.to_xml().contains("<a:Name>CLIENT &amp; CO</a:Name>"));
        assert_eq!(doc.snapshot().unwrap().entity("o10").unwrap().name, "CLIENT & CO");

        doc.set_entity_field("o20", "a:Comment", "placed orders").unwrap();
        assert!(doc.to_xml().contains("<a:Comment>placed orders</a:Comment>"));
    }

    #[test]
    fn test_set_entity_field_rejects_non_field_tags() {
        let mut doc = shop();
        let err = doc.set_entity_field("o10", "c:Attributes", "x").unwrap_err();
        assert!(matches!(err, OpsError::InvalidField(ref tag) if tag == "c:Attributes"));
        let err = doc.set_entity_field("o99", "a:Name", "x").unwrap_err();
        assert!(matches!(err, OpsError::NodeNotFound(_)));
    }

    #[test]
    fn test_delete_entity_cascades() {
        let mut doc = shop();
        let removed = doc.delete_entity("o10").unwrap();
        assert_eq!(
            removed,
            Removed {
                entities: vec!["o10".into()],
                relationships: vec!["o30".into()],
                symbols: vec!["o6".into(), "o7".into(), "o4".into()],
                ..Default::default()
            }
        );

        let xml = doc.to_xml();
        assert!(!xml.contains("Ref=\"o10\""));
        assert!(!xml.contains("Ref=\"o30\""));
        assert!(!xml.contains("Ref=\"o4\""));

        let model = doc.snapshot().unwrap();
        assert_eq!(model.entities.len(), 1);
        assert!(model.relations.is_empty());
        let order = model.entity("o20").unwrap();
        assert_eq!(order.location, Some(Rect::new(400, 0, 600, -100)));
    }

    #[test]
    fn test_delete_entities_in_sequence() {
        let mut doc = shop();
        let removed = doc.delete_entity("o20").unwrap();
        assert_eq!(removed.relationships, ["o30"]);
        assert_eq!(removed.symbols, ["o6", "o5"]);

        let removed = doc.delete_entity("o10").unwrap();
        assert!(removed.relationships.is_empty());
        assert_eq!(removed.symbols, ["o7", "o4"]);
        assert!(doc.snapshot().unwrap().entities.is_empty());
    }

    #[test]
    fn test_delete_missing_entity() {
        let mut doc = shop();
        let before = doc.to_xml();
        assert!(doc.delete_entity("o12").is_err());
        assert_eq!(doc.to_xml(), before);
    }
}
