// Document shapes written by the asset dumper.
//
// A field document describes one reflected property or function. Object
// references are integer indices into the dump's object table, resolved
// through `ObjectRegistry`.

use serde::{Deserialize, Deserializer};

use crate::error::{AssetGenError, Result};

// ---------------------------------------------------------------------------
// Field documents
// ---------------------------------------------------------------------------

/// One entry of `ChildProperties`, tagged by `FieldKind`.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "FieldKind")]
pub enum FieldDescriptor {
    Property(PropertyDescriptor),
    Function(FunctionDescriptor),
}

impl FieldDescriptor {
    pub fn object_name(&self) -> &str {
        match self {
            FieldDescriptor::Property(p) => &p.object_name,
            FieldDescriptor::Function(f) => &f.object_name,
        }
    }

    pub fn kind_name(&self) -> &'static str {
        match self {
            FieldDescriptor::Property(_) => "Property",
            FieldDescriptor::Function(_) => "Function",
        }
    }

    pub fn as_property(&self) -> Result<&PropertyDescriptor> {
        match self {
            FieldDescriptor::Property(p) => Ok(p),
            other => Err(AssetGenError::UnexpectedFieldKind {
                object: other.object_name().to_string(),
                expected: "Property",
                found: other.kind_name(),
            }),
        }
    }

    pub fn as_function(&self) -> Result<&FunctionDescriptor> {
        match self {
            FieldDescriptor::Function(f) => Ok(f),
            other => Err(AssetGenError::UnexpectedFieldKind {
                object: other.object_name().to_string(),
                expected: "Function",
                found: other.kind_name(),
            }),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct PropertyDescriptor {
    /// Reflection class name, e.g. `ArrayProperty`.
    pub object_class: String,
    pub object_name: String,
    #[serde(deserialize_with = "deser_flags_u64")]
    pub property_flags: u64,
    #[serde(default = "default_array_dim")]
    pub array_dim: i32,
    #[serde(default)]
    pub rep_notify_func: Option<String>,
    #[serde(default)]
    pub blueprint_replication_condition: LifetimeCondition,

    pub inner: Option<i32>,
    pub key_prop: Option<i32>,
    pub value_prop: Option<i32>,
    pub element_type: Option<i32>,
    pub interface_class: Option<i32>,
    pub meta_class: Option<i32>,
    pub property_class: Option<i32>,
    #[serde(rename = "Struct")]
    pub struct_type: Option<i32>,
    #[serde(rename = "Enum")]
    pub enum_type: Option<i32>,
    pub signature_function: Option<i32>,
}

fn default_array_dim() -> i32 {
    1
}

/// The index-bearing fields of a property document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndexField {
    Inner,
    KeyProp,
    ValueProp,
    ElementType,
    InterfaceClass,
    MetaClass,
    PropertyClass,
    Struct,
    Enum,
    SignatureFunction,
}

impl IndexField {
    /// JSON key as written by the dumper.
    pub fn key(self) -> &'static str {
        match self {
            IndexField::Inner => "Inner",
            IndexField::KeyProp => "KeyProp",
            IndexField::ValueProp => "ValueProp",
            IndexField::ElementType => "ElementType",
            IndexField::InterfaceClass => "InterfaceClass",
            IndexField::MetaClass => "MetaClass",
            IndexField::PropertyClass => "PropertyClass",
            IndexField::Struct => "Struct",
            IndexField::Enum => "Enum",
            IndexField::SignatureFunction => "SignatureFunction",
        }
    }
}

impl PropertyDescriptor {
    /// Read a required index field. Absence is a malformed document.
    pub fn index(&self, field: IndexField) -> Result<i32> {
        let value = match field {
            IndexField::Inner => self.inner,
            IndexField::KeyProp => self.key_prop,
            IndexField::ValueProp => self.value_prop,
            IndexField::ElementType => self.element_type,
            IndexField::InterfaceClass => self.interface_class,
            IndexField::MetaClass => self.meta_class,
            IndexField::PropertyClass => self.property_class,
            IndexField::Struct => self.struct_type,
            IndexField::Enum => self.enum_type,
            IndexField::SignatureFunction => self.signature_function,
        };
        value.ok_or_else(|| AssetGenError::missing(&self.object_name, field.key()))
    }

    pub fn has_any_property_flags(&self, mask: u64) -> bool {
        assetgen_ue_flags::has_any_flags(self.property_flags, mask)
    }

    pub fn has_all_property_flags(&self, mask: u64) -> bool {
        assetgen_ue_flags::has_all_flags(self.property_flags, mask)
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct FunctionDescriptor {
    pub object_name: String,
    #[serde(deserialize_with = "deser_flags_u32")]
    pub function_flags: u32,
    #[serde(default)]
    pub child_properties: Vec<FieldDescriptor>,
    #[serde(default)]
    pub script: Vec<ScriptStatement>,
}

/// One decoded bytecode statement. Only the fields the generator inspects.
#[derive(Debug, Clone, Deserialize)]
pub struct ScriptStatement {
    #[serde(rename = "Inst")]
    pub inst: String,
    #[serde(rename = "Function", default)]
    pub function: Option<String>,
}

/// ELifetimeCondition, stored on replicated blueprint variables.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(try_from = "i64")]
pub enum LifetimeCondition {
    #[default]
    None,
    InitialOnly,
    OwnerOnly,
    SkipOwner,
    SimulatedOnly,
    AutonomousOnly,
    SimulatedOrPhysics,
    InitialOrOwner,
    Custom,
    ReplayOrOwner,
    ReplayOnly,
    SimulatedOnlyNoReplay,
    SimulatedOrPhysicsNoReplay,
    SkipReplay,
    Never,
}

impl TryFrom<i64> for LifetimeCondition {
    type Error = String;

    fn try_from(value: i64) -> std::result::Result<Self, Self::Error> {
        use LifetimeCondition::*;
        Ok(match value {
            0 => None,
            1 => InitialOnly,
            2 => OwnerOnly,
            3 => SkipOwner,
            4 => SimulatedOnly,
            5 => AutonomousOnly,
            6 => SimulatedOrPhysics,
            7 => InitialOrOwner,
            8 => Custom,
            9 => ReplayOrOwner,
            10 => ReplayOnly,
            11 => SimulatedOnlyNoReplay,
            12 => SimulatedOrPhysicsNoReplay,
            13 => SkipReplay,
            14 => Never,
            other => return Err(format!("unknown lifetime condition {other}")),
        })
    }
}

// ---------------------------------------------------------------------------
// Serde helpers. The dumper writes flags as decimal strings (Atoi64 on the
// reading side), older dumps as plain numbers. Signed values are the bit
// pattern of the unsigned mask.
// ---------------------------------------------------------------------------

#[derive(Deserialize)]
#[serde(untagged)]
enum RawFlags {
    Unsigned(u64),
    Signed(i64),
    Text(String),
}

impl RawFlags {
    fn into_bits<E: serde::de::Error>(self) -> std::result::Result<u64, E> {
        match self {
            RawFlags::Unsigned(v) => Ok(v),
            RawFlags::Signed(v) => Ok(v as u64),
            RawFlags::Text(s) => {
                let s = s.trim();
                s.parse::<u64>()
                    .or_else(|_| s.parse::<i64>().map(|v| v as u64))
                    .map_err(|_| E::custom(format!("invalid flags `{s}`")))
            }
        }
    }

    fn into_bits_u32<E: serde::de::Error>(self) -> std::result::Result<u32, E> {
        let out_of_range = |v: &dyn std::fmt::Display| E::custom(format!("flags `{v}` do not fit in 32 bits"));
        match self {
            RawFlags::Unsigned(v) => u32::try_from(v).map_err(|_| out_of_range(&v)),
            RawFlags::Signed(v) => i32::try_from(v).map(|v| v as u32).map_err(|_| out_of_range(&v)),
            RawFlags::Text(s) => {
                let s = s.trim();
                if let Ok(v) = s.parse::<u64>() {
                    RawFlags::Unsigned(v).into_bits_u32()
                } else if let Ok(v) = s.parse::<i64>() {
                    RawFlags::Signed(v).into_bits_u32()
                } else {
                    Err(E::custom(format!("invalid flags `{s}`")))
                }
            }
        }
    }
}

fn deser_flags_u64<'de, D: Deserializer<'de>>(d: D) -> std::result::Result<u64, D::Error> {
    RawFlags::deserialize(d)?.into_bits()
}

fn deser_flags_u32<'de, D: Deserializer<'de>>(d: D) -> std::result::Result<u32, D::Error> {
    RawFlags::deserialize(d)?.into_bits_u32()
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn property_flags_accept_strings_and_numbers() {
        let from_str: PropertyDescriptor = serde_json::from_value(json!({
            "ObjectClass": "IntProperty", "ObjectName": "Count", "PropertyFlags": "16777216"
        }))
        .unwrap();
        assert_eq!(from_str.property_flags, assetgen_ue_flags::CPF_SAVE_GAME);

        let from_num: PropertyDescriptor = serde_json::from_value(json!({
            "ObjectClass": "IntProperty", "ObjectName": "Count", "PropertyFlags": 5
        }))
        .unwrap();
        assert_eq!(from_num.property_flags, 5);
        assert_eq!(from_num.array_dim, 1);
        assert_eq!(from_num.blueprint_replication_condition, LifetimeCondition::None);
    }

    #[test]
    fn negative_function_flags_keep_their_bits() {
        let func: FunctionDescriptor = serde_json::from_value(json!({
            "ObjectName": "Foo", "FunctionFlags": "-2147483648"
        }))
        .unwrap();
        assert_eq!(func.function_flags, 0x8000_0000);
    }

    #[test]
    fn oversized_function_flags_are_rejected() {
        for flags in [json!("4294967296"), json!(4294967296u64), json!("-2147483649")] {
            let parsed: std::result::Result<FunctionDescriptor, _> =
                serde_json::from_value(json!({"ObjectName": "Foo", "FunctionFlags": flags}));
            assert!(parsed.is_err(), "accepted {flags}");
        }

        let max: FunctionDescriptor =
            serde_json::from_value(json!({"ObjectName": "Foo", "FunctionFlags": "4294967295"})).unwrap();
        assert_eq!(max.function_flags, u32::MAX);
    }

    #[test]
    fn field_kind_selects_variant() {
        let field: FieldDescriptor = serde_json::from_value(json!({
            "FieldKind": "Function", "ObjectName": "Tick", "FunctionFlags": "0",
            "ChildProperties": [
                {"FieldKind": "Property", "ObjectClass": "FloatProperty",
                 "ObjectName": "DeltaSeconds", "PropertyFlags": "128"}
            ],
            "Script": [{"Inst": "Return"}]
        }))
        .unwrap();
        let func = field.as_function().unwrap();
        assert_eq!(func.child_properties.len(), 1);
        assert!(field.as_property().is_err());
    }

    #[test]
    fn missing_index_is_reported_by_key() {
        let prop: PropertyDescriptor = serde_json::from_value(json!({
            "ObjectClass": "StructProperty", "ObjectName": "Where", "PropertyFlags": "0"
        }))
        .unwrap();
        let err = prop.index(IndexField::Struct).unwrap_err();
        assert_eq!(err.to_string(), "Where: missing required field `Struct`");
    }

    #[test]
    fn missing_required_field_fails_to_parse() {
        let parsed: std::result::Result<PropertyDescriptor, _> =
            serde_json::from_value(json!({"ObjectName": "NoClass", "PropertyFlags": "0"}));
        assert!(parsed.is_err());
    }

    #[test]
    fn replication_condition_rejects_unknown_values() {
        let parsed: std::result::Result<PropertyDescriptor, _> = serde_json::from_value(json!({
            "ObjectClass": "IntProperty", "ObjectName": "X", "PropertyFlags": "0",
            "BlueprintReplicationCondition": 99
        }));
        assert!(parsed.is_err());
    }
}
