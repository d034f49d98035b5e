//! Firestore REST typed-value decoding.
//!
//! REST documents encode every field as a tagged union:
//! `{"stringValue": "x"}`, `{"integerValue": "42"}`,
//! `{"arrayValue": {"values": [...]}}` and so on. `decode_document` flattens a
//! document's `fields` map into plain JSON so records can deserialize through
//! serde without knowing about the wire encoding.

use serde_json::{Map, Value, json};

/// Flatten a Firestore REST document into a plain JSON object.
///
/// A document without a `fields` map (legal for empty documents) decodes to
/// an empty object.
pub fn decode_document(document: &Value) -> Value {
    match document.get("fields") {
        Some(Value::Object(fields)) => decode_fields(fields),
        _ => json!({}),
    }
}

fn decode_fields(fields: &Map<String, Value>) -> Value {
    let decoded: Map<String, Value> = fields
        .iter()
        .map(|(name, value)| (name.clone(), decode_value(value)))
        .collect();
    Value::Object(decoded)
}

/// Decode a single tagged value.
///
/// Unknown tags decode to `Null` rather than failing the whole document; the
/// records only read a handful of field types.
fn decode_value(value: &Value) -> Value {
    let Some(tagged) = value.as_object() else {
        return Value::Null;
    };

    if let Some(s) = tagged.get("stringValue") {
        return s.clone();
    }
    if let Some(i) = tagged.get("integerValue") {
        // The REST API transports 64-bit integers as decimal strings; the
        // emulator sometimes sends plain numbers
        return match i {
            Value::String(raw) => raw
                .parse::<i64>()
                .ok()
                .map(|n| json!(n))
                .unwrap_or(Value::Null),
            Value::Number(_) => i.clone(),
            _ => Value::Null,
        };
    }
    if let Some(d) = tagged.get("doubleValue") {
        return d.clone();
    }
    if let Some(b) = tagged.get("booleanValue") {
        return b.clone();
    }
    if tagged.contains_key("nullValue") {
        return Value::Null;
    }
    if let Some(t) = tagged.get("timestampValue") {
        return t.clone();
    }
    if let Some(r) = tagged.get("referenceValue") {
        return r.clone();
    }
    if let Some(array) = tagged.get("arrayValue") {
        let values = array
            .get("values")
            .and_then(Value::as_array)
            .map(|items| items.iter().map(decode_value).collect())
            .unwrap_or_default();
        return Value::Array(values);
    }
    if let Some(map) = tagged.get("mapValue") {
        return match map.get("fields") {
            Some(Value::Object(fields)) => decode_fields(fields),
            _ => json!({}),
        };
    }

    Value::Null
}
