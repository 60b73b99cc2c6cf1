// Generic property value codec, implemented by the host runtime.

use std::collections::BTreeMap;

use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::error::Result;

/// Reads and compares serialized property values against a live object `T`.
///
/// Property names are the reflected names as they appear in the asset
/// document.
pub trait PropertyCodec<T: ?Sized> {
    /// Decode a struct document into its Rust mirror.
    fn deserialize_struct<S: DeserializeOwned>(&self, value: &Value) -> Result<S> {
        Ok(S::deserialize(value)?)
    }

    /// Write one property of `target` from its serialized value.
    fn deserialize_property_value(&mut self, property: &str, value: &Value, target: &mut T) -> Result<()>;

    /// Whether one property of `target` already holds the serialized value.
    fn compare_property_values(&self, property: &str, value: &Value, target: &T) -> bool;

    /// Write every listed property of `target`.
    fn deserialize_object_properties(&mut self, properties: &Map<String, Value>, target: &mut T) -> Result<()>;

    /// Whether every listed property of `target` already matches.
    fn compare_object_properties(&self, properties: &Map<String, Value>, target: &T) -> bool;
}

/// Prefix of dumper bookkeeping keys such as `$ReferencedObjects`. These
/// are not reflected properties.
pub const METADATA_PREFIX: char = '$';

/// The part of `properties` the generic path may read or write.
///
/// Drops metadata keys and the `skipped` names. For every property named in
/// `nested_fields`, the listed fields are removed from its struct value, or
/// from each entry when it is an array of structs.
pub fn generic_properties(
    properties: &Map<String, Value>,
    skipped: &[String],
    nested_fields: &BTreeMap<String, Vec<String>>,
) -> Map<String, Value> {
    properties
        .iter()
        .filter(|(name, _)| !name.starts_with(METADATA_PREFIX) && !skipped.iter().any(|s| s == *name))
        .map(|(name, value)| {
            let mut value = value.clone();
            if let Some(fields) = nested_fields.get(name) {
                strip_fields(&mut value, fields);
            }
            (name.clone(), value)
        })
        .collect()
}

fn strip_fields(value: &mut Value, fields: &[String]) {
    match value {
        Value::Array(entries) => entries.iter_mut().for_each(|entry| strip_fields(entry, fields)),
        Value::Object(entry) => {
            for field in fields {
                entry.remove(field);
            }
        }
        _ => {}
    }
}
