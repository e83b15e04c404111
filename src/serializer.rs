//! Serializer for writing a document tree back to model XML.

use crate::document::{Content, Document, NodeId};

/// Banner written in front of every serialized document.
pub const DEFAULT_PREAMBLE: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<?PowerDesigner AppLocale="UTF16" ID="{13453C9B-E125-4B37-9A2E-133025BBAEA1}" Label="" LastModificationDate="1560423936" Name="CDM" Objects="319" Symbols="86" Type="{1E597170-9350-11D1-AB3C-0020AF71E433}" signature="CDM_DATA_MODEL_XML" version="16.0.0.3488"?>
<!-- do not edit this file -->"#;

/// Serialize `doc` with `preamble` prepended. Text and attribute values are
/// written exactly as stored; empty elements are self-closed.
pub fn serialize(doc: &Document, preamble: &str) -> String {
    let mut output = String::from(preamble);
    serialize_element(&mut output, doc, doc.root());
    output
}

fn serialize_element(output: &mut String, doc: &Document, id: NodeId) {
    let element = doc.element(id);

    output.push('<');
    output.push_str(element.tag());
    for (key, value) in element.attributes() {
        output.push(' ');
        output.push_str(key);
        output.push_str("=\"");
        output.push_str(value);
        output.push('"');
    }

    if element.content().is_empty() {
        output.push_str("/>");
        return;
    }
    output.push('>');

    for content in element.content() {
        match content {
            Content::Element(child) => serialize_element(output, doc, *child),
            Content::Text(text) => output.push_str(text),
            Content::Comment(text) => {
                output.push_str("<!--");
                output.push_str(text);
                output.push_str("-->");
            }
            Content::CData(text) => {
                output.push_str("<![CDATA[");
                output.push_str(text);
                output.push_str("]]>");
            }
            Content::Instruction(text) => {
                output.push_str("<?");
                output.push_str(text);
                output.push_str("?>");
            }
        }
    }

    output.push_str("</");
    output.push_str(element.tag());
    output.push('>');
}

/// Escape a value for use as element text.
pub fn escape_text(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(c),
        }
    }
    out
}

/// Escape a value for use inside a double-quoted attribute.
pub fn escape_attr(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}
