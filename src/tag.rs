//! Qualified tag names used by the model document format.
//!
//! Every tag the engine navigates or writes is a variant here, so a typo in a
//! path is a compile error rather than a silent lookup miss.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tag {
    // Root chain
    RootObject,
    Children,
    Model,

    // Conceptual collections
    Entities,
    Attributes,
    DataItems,
    Domains,
    Identifiers,
    IdentifierAttributes,
    PrimaryIdentifier,
    Relationships,
    Object1,
    Object2,
    ConceptualDiagrams,
    Symbols,
    Object,
    SourceSymbol,
    DestinationSymbol,
    /// `c:DataItem`, the link from an entity attribute to its data item.
    DataItemLink,
    /// `c:Domain`, the link from a data item or column to its domain.
    DomainLink,

    // Physical collections
    Tables,
    Columns,
    References,
    ParentTable,
    ChildTable,
    PhysicalDiagrams,
    Keys,
    KeyColumns,
    PrimaryKey,

    // Objects
    Entity,
    EntityAttribute,
    DataItem,
    Domain,
    Identifier,
    Relationship,
    ConceptualDiagram,
    EntitySymbol,
    RelationshipSymbol,
    NoteLinkSymbol,
    Table,
    Column,
    Reference,
    PhysicalDomain,
    PhysicalDiagram,
    TableSymbol,
    Key,

    // Fields
    ObjectId,
    CreationDate,
    Creator,
    ModificationDate,
    Modifier,
    Name,
    Code,
    DataType,
    Length,
    Rect,
    Entity1ToEntity2RoleCardinality,
    Entity2ToEntity1RoleCardinality,
    Cardinality,
    IconMode,
    LineColor,
    FillColor,
    ShadowColor,
    FontList,
    BrushStyle,
    GradientFillMode,
    GradientEndColor,
}

impl Tag {
    pub fn as_str(self) -> &'static str {
        match self {
            Tag::RootObject => "o:RootObject",
            Tag::Children => "c:Children",
            Tag::Model => "o:Model",

            Tag::Entities => "c:Entities",
            Tag::Attributes => "c:Attributes",
            Tag::DataItems => "c:DataItems",
            Tag::Domains => "c:Domains",
            Tag::Identifiers => "c:Identifiers",
            Tag::IdentifierAttributes => "c:Identifier.Attributes",
            Tag::PrimaryIdentifier => "c:PrimaryIdentifier",
            Tag::Relationships => "c:Relationships",
            Tag::Object1 => "c:Object1",
            Tag::Object2 => "c:Object2",
            Tag::ConceptualDiagrams => "c:ConceptualDiagrams",
            Tag::Symbols => "c:Symbols",
            Tag::Object => "c:Object",
            Tag::SourceSymbol => "c:SourceSymbol",
            Tag::DestinationSymbol => "c:DestinationSymbol",
            Tag::DataItemLink => "c:DataItem",
            Tag::DomainLink => "c:Domain",

            Tag::Tables => "c:Tables",
            Tag::Columns => "c:Columns",
            Tag::References => "c:References",
            Tag::ParentTable => "c:ParentTable",
            Tag::ChildTable => "c:ChildTable",
            Tag::PhysicalDiagrams => "c:PhysicalDiagrams",
            Tag::Keys => "c:Keys",
            Tag::KeyColumns => "c:Key.Columns",
            Tag::PrimaryKey => "c:PrimaryKey",

            Tag::Entity => "o:Entity",
            Tag::EntityAttribute => "o:EntityAttribute",
            Tag::DataItem => "o:DataItem",
            Tag::Domain => "o:Domain",
            Tag::Identifier => "o:Identifier",
            Tag::Relationship => "o:Relationship",
            Tag::ConceptualDiagram => "o:ConceptualDiagram",
            Tag::EntitySymbol => "o:EntitySymbol",
            Tag::RelationshipSymbol => "o:RelationshipSymbol",
            Tag::NoteLinkSymbol => "o:NoteLinkSymbol",
            Tag::Table => "o:Table",
            Tag::Column => "o:Column",
            Tag::Reference => "o:Reference",
            Tag::PhysicalDomain => "o:PhysicalDomain",
            Tag::PhysicalDiagram => "o:PhysicalDiagram",
            Tag::TableSymbol => "o:TableSymbol",
            Tag::Key => "o:Key",

            Tag::ObjectId => "a:ObjectID",
            Tag::CreationDate => "a:CreationDate",
            Tag::Creator => "a:Creator",
            Tag::ModificationDate => "a:ModificationDate",
            Tag::Modifier => "a:Modifier",
            Tag::Name => "a:Name",
            Tag::Code => "a:Code",
            Tag::DataType => "a:DataType",
            Tag::Length => "a:Length",
            Tag::Rect => "a:Rect",
            Tag::Entity1ToEntity2RoleCardinality => "a:Entity1ToEntity2RoleCardinality",
            Tag::Entity2ToEntity1RoleCardinality => "a:Entity2ToEntity1RoleCardinality",
            Tag::Cardinality => "a:Cardinality",
            Tag::IconMode => "a:IconMode",
            Tag::LineColor => "a:LineColor",
            Tag::FillColor => "a:FillColor",
            Tag::ShadowColor => "a:ShadowColor",
            Tag::FontList => "a:FontList",
            Tag::BrushStyle => "a:BrushStyle",
            Tag::GradientFillMode => "a:GradientFillMode",
            Tag::GradientEndColor => "a:GradientEndColor",
        }
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Field tags are the `a:`-prefixed leaves carrying a text payload.
pub fn is_field_tag(tag: &str) -> bool {
    tag.strip_prefix("a:").is_some_and(|rest| {
        !rest.is_empty() && rest.chars().all(|c| c.is_ascii_alphanumeric() || c == '.' || c == '_')
    })
}
