// Property class table: `ObjectClass` name → FieldClass.
//
// The table is expected to be exhaustive for the engine version the dumper
// ran against. An unknown name means version skew and is a hard error.

use std::collections::HashMap;
use std::sync::OnceLock;

use crate::error::{AssetGenError, Result};

/// Every concrete property class the dumper can emit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldClass {
    Bool,
    Byte,
    Int8,
    Int16,
    UInt16,
    Int,
    UInt32,
    Int64,
    UInt64,
    Float,
    Double,
    Str,
    Name,
    Text,
    Enum,
    Object,
    WeakObject,
    LazyObject,
    SoftObject,
    Class,
    SoftClass,
    Interface,
    Struct,
    Array,
    Set,
    Map,
    Delegate,
    MulticastDelegate,
    MulticastInlineDelegate,
    MulticastSparseDelegate,
}

/// Container shapes a pin can take.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub enum ContainerKind {
    #[default]
    None,
    Array,
    Set,
    Map,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DelegateKind {
    Single,
    Multicast,
}

impl FieldClass {
    pub const ALL: [FieldClass; 30] = [
        FieldClass::Bool,
        FieldClass::Byte,
        FieldClass::Int8,
        FieldClass::Int16,
        FieldClass::UInt16,
        FieldClass::Int,
        FieldClass::UInt32,
        FieldClass::Int64,
        FieldClass::UInt64,
        FieldClass::Float,
        FieldClass::Double,
        FieldClass::Str,
        FieldClass::Name,
        FieldClass::Text,
        FieldClass::Enum,
        FieldClass::Object,
        FieldClass::WeakObject,
        FieldClass::LazyObject,
        FieldClass::SoftObject,
        FieldClass::Class,
        FieldClass::SoftClass,
        FieldClass::Interface,
        FieldClass::Struct,
        FieldClass::Array,
        FieldClass::Set,
        FieldClass::Map,
        FieldClass::Delegate,
        FieldClass::MulticastDelegate,
        FieldClass::MulticastInlineDelegate,
        FieldClass::MulticastSparseDelegate,
    ];

    /// Reflection class name as it appears in `ObjectClass`.
    pub fn name(self) -> &'static str {
        match self {
            FieldClass::Bool => "BoolProperty",
            FieldClass::Byte => "ByteProperty",
            FieldClass::Int8 => "Int8Property",
            FieldClass::Int16 => "Int16Property",
            FieldClass::UInt16 => "UInt16Property",
            FieldClass::Int => "IntProperty",
            FieldClass::UInt32 => "UInt32Property",
            FieldClass::Int64 => "Int64Property",
            FieldClass::UInt64 => "UInt64Property",
            FieldClass::Float => "FloatProperty",
            FieldClass::Double => "DoubleProperty",
            FieldClass::Str => "StrProperty",
            FieldClass::Name => "NameProperty",
            FieldClass::Text => "TextProperty",
            FieldClass::Enum => "EnumProperty",
            FieldClass::Object => "ObjectProperty",
            FieldClass::WeakObject => "WeakObjectProperty",
            FieldClass::LazyObject => "LazyObjectProperty",
            FieldClass::SoftObject => "SoftObjectProperty",
            FieldClass::Class => "ClassProperty",
            FieldClass::SoftClass => "SoftClassProperty",
            FieldClass::Interface => "InterfaceProperty",
            FieldClass::Struct => "StructProperty",
            FieldClass::Array => "ArrayProperty",
            FieldClass::Set => "SetProperty",
            FieldClass::Map => "MapProperty",
            FieldClass::Delegate => "DelegateProperty",
            FieldClass::MulticastDelegate => "MulticastDelegateProperty",
            FieldClass::MulticastInlineDelegate => "MulticastInlineDelegateProperty",
            FieldClass::MulticastSparseDelegate => "MulticastSparseDelegateProperty",
        }
    }

    pub fn container_kind(self) -> ContainerKind {
        match self {
            FieldClass::Map => ContainerKind::Map,
            FieldClass::Set => ContainerKind::Set,
            FieldClass::Array => ContainerKind::Array,
            _ => ContainerKind::None,
        }
    }

    pub fn delegate_kind(self) -> Option<DelegateKind> {
        match self {
            FieldClass::MulticastDelegate
            | FieldClass::MulticastInlineDelegate
            | FieldClass::MulticastSparseDelegate => Some(DelegateKind::Multicast),
            FieldClass::Delegate => Some(DelegateKind::Single),
            _ => None,
        }
    }

    /// The object-pointer family sharing `PropertyClass`. Class and soft class
    /// belong to the family too but are dispatched before it.
    pub fn is_object_reference(self) -> bool {
        matches!(
            self,
            FieldClass::Object
                | FieldClass::WeakObject
                | FieldClass::LazyObject
                | FieldClass::SoftObject
                | FieldClass::Class
                | FieldClass::SoftClass
        )
    }

    pub fn is_weak_reference(self) -> bool {
        self == FieldClass::WeakObject
    }
}

static FIELD_CLASSES: OnceLock<HashMap<&'static str, FieldClass>> = OnceLock::new();

fn field_classes() -> &'static HashMap<&'static str, FieldClass> {
    FIELD_CLASSES.get_or_init(|| {
        let table: HashMap<_, _> = FieldClass::ALL.iter().map(|c| (c.name(), *c)).collect();
        log::debug!("field_class: indexed {} property classes", table.len());
        table
    })
}

/// Look up the property class for an `ObjectClass` name.
pub fn resolve_field_class(object_class: &str) -> Result<FieldClass> {
    field_classes()
        .get(object_class)
        .copied()
        .ok_or_else(|| AssetGenError::UnknownFieldClass(object_class.to_string()))
}
