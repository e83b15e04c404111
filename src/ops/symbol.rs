use log::debug;

use super::{ModelDocument, OpsError, Removed};
use crate::document::{NodeId, NodeNotFound};
use crate::geometry::Rect;
use crate::tag::Tag;

impl ModelDocument {
    /// Rewrite the rectangle of an entity's symbol on the first diagram.
    pub fn move_entity(&mut self, entity_id: &str, rect: Rect) -> Result<(), OpsError> {
        let model = self.editable_model()?;
        let symbols = self.doc.find_node(
            model,
            &[Tag::ConceptualDiagrams, Tag::ConceptualDiagram, Tag::Symbols],
        )?;
        let symbol = self
            .bound_symbols(symbols, Tag::EntitySymbol, Tag::Entity, entity_id)
            .into_iter()
            .next()
            .ok_or_else(|| NodeNotFound::new(format!("symbol of entity {entity_id}")))?;

        self.set_field(symbol, Tag::Rect, &rect.to_symbol_rect());
        debug!("moved entity {entity_id} to {}", rect.to_symbol_rect());
        Ok(())
    }

    /// Detached entity symbol bound to `entity_id`, styled from the config.
    pub(super) fn build_entity_symbol(&mut self, symbol_id: &str, entity_id: &str) -> NodeId {
        let symbol = self.doc.create_element(Tag::EntitySymbol.as_str());
        self.doc.set_attr(symbol, "Id", symbol_id);

        let now = self.config.clock.now().to_string();
        let style = self.config.symbol.clone();
        let fields = [
            (Tag::CreationDate, now.clone()),
            (Tag::ModificationDate, now),
            (Tag::IconMode, style.icon_mode.to_string()),
            (Tag::Rect, style.rect.to_symbol_rect()),
            (Tag::LineColor, style.line_color.to_string()),
            (Tag::FillColor, style.fill_color.to_string()),
            (Tag::ShadowColor, style.shadow_color.to_string()),
            (Tag::FontList, style.font_list),
            (Tag::BrushStyle, style.brush_style.to_string()),
            (Tag::GradientFillMode, style.gradient_fill_mode.to_string()),
            (Tag::GradientEndColor, style.gradient_end_color.to_string()),
        ];
        for (tag, value) in &fields {
            self.set_field(symbol, *tag, value);
        }

        self.set_ref(symbol, Tag::Object, Tag::Entity, entity_id);
        symbol
    }

    /// Symbols of kind `symbol_tag` in one `c:Symbols` collection whose
    /// `c:Object` points at `object_id`.
    fn bound_symbols(&self, symbols: NodeId, symbol_tag: Tag, object_tag: Tag, object_id: &str) -> Vec<NodeId> {
        self.doc
            .find_children(symbols, |el| el.is(symbol_tag))
            .into_iter()
            .filter(|&symbol| {
                self.doc.reference_at(symbol, &[Tag::Object, object_tag]) == Some(object_id)
            })
            .collect()
    }

    /// `c:Symbols` collections of every conceptual diagram.
    fn symbol_collections(&self, model: NodeId) -> Vec<NodeId> {
        let Some(diagrams) = self.doc.child(model, Tag::ConceptualDiagrams) else {
            return Vec::new();
        };
        self.doc
            .find_children(diagrams, |el| el.is(Tag::ConceptualDiagram))
            .into_iter()
            .filter_map(|diagram| self.doc.child(diagram, Tag::Symbols))
            .collect()
    }

    /// Note links in `symbols` anchored at either end to `symbol_id`.
    fn anchored_note_links(&self, symbols: NodeId, symbol_id: &str) -> Vec<NodeId> {
        self.doc
            .find_children(symbols, |el| el.is(Tag::NoteLinkSymbol))
            .into_iter()
            .filter(|&link| {
                [Tag::SourceSymbol, Tag::DestinationSymbol].iter().any(|&end| {
                    self.doc.child(link, end).is_some_and(|anchor| {
                        self.doc
                            .children(anchor)
                            .any(|target| self.doc.element(target).reference() == Some(symbol_id))
                    })
                })
            })
            .collect()
    }

    /// Remove every symbol bound to `object_id` on every diagram, along with
    /// note links anchored to those symbols.
    pub(super) fn remove_symbols(
        &mut self,
        model: NodeId,
        symbol_tag: Tag,
        object_tag: Tag,
        object_id: &str,
    ) -> Removed {
        let mut removed = Removed::default();

        for symbols in self.symbol_collections(model) {
            for symbol in self.bound_symbols(symbols, symbol_tag, object_tag, object_id) {
                let symbol_id = self.doc.element(symbol).id().map(str::to_string);

                if let Some(symbol_id) = &symbol_id {
                    for link in self.anchored_note_links(symbols, symbol_id) {
                        if let Some(link_id) = self.doc.element(link).id() {
                            removed.symbols.push(link_id.to_string());
                        }
                        self.doc.remove(link);
                    }
                }

                self.doc.remove(symbol);
                removed.symbols.extend(symbol_id);
            }
        }

        removed
    }
}
