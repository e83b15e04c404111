#![allow(dead_code)]

use cdmodel::serializer::DEFAULT_PREAMBLE;
use cdmodel::{EngineConfig, ModelDocument};

const SHOP_BODY: &str = r#"<Model xmlns:a="attribute" xmlns:c="collection" xmlns:o="object">

<o:RootObject Id="o1">
<c:Children>
<o:Model Id="o2">
<a:ObjectID>5C1C1A44-7F0E-4F73-9A0B-1D1E4E6B6B01</a:ObjectID>
<a:Name>Shop</a:Name>
<a:Code>SHOP</a:Code>
<a:CreationDate>1556106851</a:CreationDate>
<a:Creator>webversion</a:Creator>
<c:ConceptualDiagrams>
<o:ConceptualDiagram Id="o3">
<a:Name>Main</a:Name>
<a:Code>MAIN</a:Code>
<c:Symbols>
<o:EntitySymbol Id="o4">
<a:Rect>((-5000,-2000), (5000,4000))</a:Rect>
<a:LineColor>11184640</a:LineColor>
<c:Object>
<o:Entity Ref="o10"/>
</c:Object>
</o:EntitySymbol>
<o:EntitySymbol Id="o5">
<a:Rect>((20000,-2000), (30000,4000))</a:Rect>
<c:Object>
<o:Entity Ref="o20"/>
</c:Object>
</o:EntitySymbol>
<o:RelationshipSymbol Id="o6">
<a:Rect>((5000,0), (20000,1000))</a:Rect>
<c:SourceSymbol>
<o:EntitySymbol Ref="o4"/>
</c:SourceSymbol>
<c:DestinationSymbol>
<o:EntitySymbol Ref="o5"/>
</c:DestinationSymbol>
<c:Object>
<o:Relationship Ref="o30"/>
</c:Object>
</o:RelationshipSymbol>
<o:TextSymbol Id="o7">
<a:Text>Customers &amp; their orders</a:Text>
<a:Rect>((-5000,8000), (0,9000))</a:Rect>
</o:TextSymbol>
<o:NoteLinkSymbol Id="o8">
<c:SourceSymbol>
<o:TextSymbol Ref="o7"/>
</c:SourceSymbol>
<c:DestinationSymbol>
<o:EntitySymbol Ref="o4"/>
</c:DestinationSymbol>
</o:NoteLinkSymbol>
<o:EntitySymbol Id="o26">
<a:Rect>((40000,-2000), (50000,4000))</a:Rect>
<c:Object>
<o:Entity Ref="o25"/>
</c:Object>
</o:EntitySymbol>
</c:Symbols>
</o:ConceptualDiagram>
</c:ConceptualDiagrams>
<c:Domains>
<o:Domain Id="o9">
<a:ObjectID>0D5A3C0B-3A52-4D4B-8E8F-0A4F2E9F1C11</a:ObjectID>
<a:Name>CODE</a:Name>
<a:Code>CODE</a:Code>
<a:DataType>A10</a:DataType>
<a:Length>10</a:Length>
</o:Domain>
</c:Domains>
<c:DataItems>
<o:DataItem Id="o12">
<a:Name>name</a:Name>
<a:Code>NAME</a:Code>
<a:DataType>VA80</a:DataType>
<a:Length>80</a:Length>
</o:DataItem>
<o:DataItem Id="o22">
<a:Name>amount</a:Name>
<a:Code>AMOUNT</a:Code>
<a:DataType>DC10</a:DataType>
<a:Length>10</a:Length>
</o:DataItem>
</c:DataItems>
<c:Entities>
<o:Entity Id="o10">
<a:ObjectID>9B0F6C1E-6E43-4C4B-A1E3-5A8C2C0E7D10</a:ObjectID>
<a:Name>CUSTOMER</a:Name>
<a:Code>CUSTOMER</a:Code>
<a:Comment>R&D accounts included</a:Comment>
<c:Attributes>
<o:EntityAttribute Id="o11">
<c:DataItem>
<o:DataItem Ref="o12"/>
</c:DataItem>
</o:EntityAttribute>
</c:Attributes>
</o:Entity>
<o:Entity Id="o20">
<a:Name>ORDER</a:Name>
<a:Code>ORDER</a:Code>
<c:Attributes>
<o:EntityAttribute Id="o21">
<c:DataItem>
<o:DataItem Ref="o22"/>
</c:DataItem>
</o:EntityAttribute>
</c:Attributes>
</o:Entity>
<o:Entity Id="o25">
<a:Name>PRODUCT</a:Name>
<a:Code>PRODUCT</a:Code>
</o:Entity>
</c:Entities>
<c:Relationships>
<o:Relationship Id="o30">
<a:Name>places</a:Name>
<a:Code>PLACES</a:Code>
<a:Entity1ToEntity2RoleCardinality>0,n</a:Entity1ToEntity2RoleCardinality>
<a:Entity2ToEntity1RoleCardinality>1,1</a:Entity2ToEntity1RoleCardinality>
<c:Object1>
<o:Entity Ref="o10"/>
</c:Object1>
<c:Object2>
<o:Entity Ref="o20"/>
</c:Object2>
</o:Relationship>
</c:Relationships>
</o:Model>
</c:Children>
</o:RootObject>
</Model>"#;

/// The shop model in canonical form: fixed preamble, then the root.
pub fn shop_xml() -> String {
    format!("{DEFAULT_PREAMBLE}{SHOP_BODY}")
}

/// The shop model with deterministic stamping.
pub fn shop() -> ModelDocument {
    ModelDocument::load(&shop_xml())
        .unwrap()
        .with_config(EngineConfig::fixed(1556190897, "00000000-0000-0000-0000-000000000000"))
}

pub const PHYSICAL: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<?PowerDesigner AppLocale="UTF16" Name="PDM" signature="PDM_DATA_MODEL_XML"?>
<Model xmlns:a="attribute" xmlns:c="collection" xmlns:o="object">
<o:RootObject Id="o1">
<c:Children>
<o:Model Id="o2">
<a:Name>Warehouse</a:Name>
<c:PhysicalDiagrams>
<o:PhysicalDiagram Id="o3">
<c:Symbols>
<o:TableSymbol Id="o4">
<a:Rect>((0,-3000), (8000,0))</a:Rect>
<c:Object>
<o:Table Ref="o10"/>
</c:Object>
</o:TableSymbol>
</c:Symbols>
</o:PhysicalDiagram>
</c:PhysicalDiagrams>
<c:Tables>
<o:Table Id="o10">
<a:Name>stock</a:Name>
<c:Columns>
<o:Column Id="o11">
<a:Name>sku</a:Name>
<a:DataType>varchar(20)</a:DataType>
<a:Length>20</a:Length>
</o:Column>
<o:Column Id="o12">
<a:Name>quantity</a:Name>
<a:DataType>integer</a:DataType>
</o:Column>
</c:Columns>
<c:Keys>
<o:Key Id="o13">
<a:Name>pk_stock</a:Name>
<c:Key.Columns>
<o:Column Ref="o11"/>
</c:Key.Columns>
</o:Key>
</c:Keys>
<c:PrimaryKey>
<o:Key Ref="o13"/>
</c:PrimaryKey>
</o:Table>
<o:Table Id="o20">
<a:Name>bin</a:Name>
</o:Table>
</c:Tables>
<c:References>
<o:Reference Id="o30">
<a:Name>stock_bin</a:Name>
<a:Cardinality>0..*</a:Cardinality>
<c:ParentTable>
<o:Table Ref="o20"/>
</c:ParentTable>
<c:ChildTable>
<o:Table Ref="o10"/>
</c:ChildTable>
</o:Reference>
</c:References>
</o:Model>
</c:Children>
</o:RootObject>
</Model>"#;
