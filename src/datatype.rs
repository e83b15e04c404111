//! Conceptual data type codes.

/// Type codes and their display labels.
pub const DATA_TYPES: &[(&str, &str)] = &[
    ("I", "Integer"),
    ("N", "Number"),
    ("DC", "Decimal"),
    ("F", "Float"),
    ("MN", "Money"),
    ("BL", "Boolean"),
    ("A", "Characters"),
    ("VA", "Variable Characters"),
    ("LA", "Long Characters"),
    ("LVA", "Long Variable Characters"),
    ("TXT", "Text"),
    ("BT", "Bytes"),
    ("MBT", "Multibyte"),
    ("D", "Date"),
    ("T", "Time"),
    ("DT", "Date & Time"),
    ("TS", "Timestamp"),
    ("BIN", "Binary"),
    ("VBIN", "Variable Binary"),
    ("LBIN", "Long Binary"),
    ("", "Undefined"),
];

/// The `a:DataType` value for a code and length: `VA` + 255 is `VA255`.
/// A zero length leaves the code bare.
pub fn type_identifier(code: &str, length: u32) -> String {
    if length == 0 {
        code.to_string()
    } else {
        format!("{code}{length}")
    }
}

/// Strip the length/precision suffix from a stored data type.
pub fn base_code(data_type: &str) -> &str {
    data_type.trim_end_matches(|c: char| c.is_ascii_digit() || c == ',')
}

pub fn label(data_type: &str) -> Option<&'static str> {
    let code = base_code(data_type);
    DATA_TYPES
        .iter()
        .find(|(c, _)| *c == code)
        .map(|(_, label)| *label)
}
