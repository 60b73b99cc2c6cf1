// Property document → pin type resolution.
//
// Two layers: `resolve_category` handles one non-container, non-delegate
// document; `convert` adds container unwrapping, by-ref/const flags and the
// delegate override on top of it.

use std::fmt;

use assetgen_ue_flags::{has_all_flags, CPF_BY_REF_FLAGS, CPF_CONST_PARM};
use serde::Serialize;

use crate::error::{AssetGenError, Result};
use crate::field_class::{resolve_field_class, ContainerKind, DelegateKind, FieldClass};
use crate::registry::{ObjectRegistry, ObjectRef};
use crate::schema::{IndexField, PropertyDescriptor};

/// Pin category names used by the blueprint schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PinCategory {
    Boolean,
    Byte,
    Class,
    SoftClass,
    Int,
    Int64,
    Float,
    Name,
    Object,
    Interface,
    String,
    Text,
    Struct,
    Delegate,
    MulticastDelegate,
    /// Unmapped property class. Propagated as data so callers can report it.
    BadType,
}

impl PinCategory {
    pub fn as_str(self) -> &'static str {
        match self {
            PinCategory::Boolean => "bool",
            PinCategory::Byte => "byte",
            PinCategory::Class => "class",
            PinCategory::SoftClass => "softclass",
            PinCategory::Int => "int",
            PinCategory::Int64 => "int64",
            PinCategory::Float => "float",
            PinCategory::Name => "name",
            PinCategory::Object => "object",
            PinCategory::Interface => "interface",
            PinCategory::String => "string",
            PinCategory::Text => "text",
            PinCategory::Struct => "struct",
            PinCategory::Delegate => "delegate",
            PinCategory::MulticastDelegate => "mcdelegate",
            PinCategory::BadType => "bad_type",
        }
    }
}

impl fmt::Display for PinCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for PinCategory {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// Output of the category resolver for a single document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryInfo {
    pub category: PinCategory,
    pub sub_category: Option<String>,
    pub sub_category_object: Option<ObjectRef>,
    pub is_weak_pointer: bool,
}

impl CategoryInfo {
    fn plain(category: PinCategory) -> Self {
        Self {
            category,
            sub_category: None,
            sub_category_object: None,
            is_weak_pointer: false,
        }
    }

    fn with_object(category: PinCategory, object: Option<ObjectRef>) -> Self {
        Self {
            sub_category_object: object,
            ..Self::plain(category)
        }
    }
}

/// Value half of a map pin.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TerminalType {
    pub category: PinCategory,
    pub sub_category: Option<String>,
    pub sub_category_object: Option<ObjectRef>,
    pub is_weak_pointer: bool,
}

impl From<CategoryInfo> for TerminalType {
    fn from(info: CategoryInfo) -> Self {
        Self {
            category: info.category,
            sub_category: info.sub_category,
            sub_category_object: info.sub_category_object,
            is_weak_pointer: info.is_weak_pointer,
        }
    }
}

/// Reference to a function by name and owner, used for delegate signatures.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MemberReference {
    pub member_name: String,
    pub member_parent: Option<String>,
}

impl MemberReference {
    pub fn from_function(function: &ObjectRef) -> Self {
        Self {
            member_name: function.name().to_string(),
            member_parent: function.outer_path().map(str::to_string),
        }
    }
}

/// Fully resolved pin type of one property.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TypedPinDescriptor {
    pub category: PinCategory,
    pub sub_category: Option<String>,
    pub sub_category_object: Option<ObjectRef>,
    /// Signature of delegate pins.
    pub member_reference: Option<MemberReference>,
    /// Only populated for maps.
    pub value_type: Option<TerminalType>,
    pub container: ContainerKind,
    pub is_reference: bool,
    pub is_const: bool,
    pub is_weak_pointer: bool,
}

/// A degraded resolution that did not abort the pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolveWarning {
    /// A struct index resolved to nothing; the pin fell back to float.
    MissingStruct { property: String, index: i32 },
    /// A delegate signature index resolved to nothing.
    MissingSignature { property: String, index: i32 },
}

impl fmt::Display for ResolveWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResolveWarning::MissingStruct { property, index } => {
                write!(f, "{property}: struct {index} is missing, using float")
            }
            ResolveWarning::MissingSignature { property, index } => {
                write!(f, "{property}: signature function {index} is missing")
            }
        }
    }
}

/// Resolution context: borrows the registry for one pass and records the
/// degraded cases it ran into.
pub struct PinTypeResolver<'r, R: ObjectRegistry + ?Sized> {
    registry: &'r mut R,
    warnings: Vec<ResolveWarning>,
}

impl<'r, R: ObjectRegistry + ?Sized> PinTypeResolver<'r, R> {
    pub fn new(registry: &'r mut R) -> Self {
        Self {
            registry,
            warnings: Vec::new(),
        }
    }

    pub fn registry(&mut self) -> &mut R {
        &mut *self.registry
    }

    pub fn warnings(&self) -> &[ResolveWarning] {
        &self.warnings
    }

    pub fn take_warnings(&mut self) -> Vec<ResolveWarning> {
        std::mem::take(&mut self.warnings)
    }

    fn warn(&mut self, warning: ResolveWarning) {
        log::warn!("pin_type: {warning}");
        self.warnings.push(warning);
    }

    fn resolve_index(&mut self, desc: &PropertyDescriptor, field: IndexField) -> Result<Option<ObjectRef>> {
        let index = desc.index(field)?;
        Ok(self.registry.deserialize_object(index))
    }

    fn sub_descriptor(&mut self, desc: &PropertyDescriptor, field: IndexField) -> Result<PropertyDescriptor> {
        let index = desc.index(field)?;
        self.registry
            .property_descriptor(index)
            .ok_or_else(|| AssetGenError::UnresolvedIndex {
                object: desc.object_name.clone(),
                field: field.key(),
                index,
            })
    }

    /// Category, sub-category object and weak flag of one element document.
    pub fn resolve_category(&mut self, desc: &PropertyDescriptor) -> Result<CategoryInfo> {
        let class = resolve_field_class(&desc.object_class)?;

        let info = match class {
            FieldClass::Interface => {
                let object = self.resolve_index(desc, IndexField::InterfaceClass)?;
                CategoryInfo::with_object(PinCategory::Interface, object)
            }
            FieldClass::Class => {
                let object = self.resolve_index(desc, IndexField::MetaClass)?;
                CategoryInfo::with_object(PinCategory::Class, object)
            }
            FieldClass::SoftClass => {
                let object = self.resolve_index(desc, IndexField::MetaClass)?;
                CategoryInfo::with_object(PinCategory::SoftClass, object)
            }
            c if c.is_object_reference() => {
                let object = self.resolve_index(desc, IndexField::PropertyClass)?;
                CategoryInfo {
                    is_weak_pointer: c.is_weak_reference(),
                    ..CategoryInfo::with_object(PinCategory::Object, object)
                }
            }
            FieldClass::Struct => self.resolve_struct(desc)?,
            FieldClass::Float => CategoryInfo::plain(PinCategory::Float),
            FieldClass::Int64 => CategoryInfo::plain(PinCategory::Int64),
            FieldClass::Int => CategoryInfo::plain(PinCategory::Int),
            // Byte-as-enum and real enums share the byte category.
            FieldClass::Byte | FieldClass::Enum => {
                let object = self.resolve_index(desc, IndexField::Enum)?;
                CategoryInfo::with_object(PinCategory::Byte, object)
            }
            FieldClass::Name => CategoryInfo::plain(PinCategory::Name),
            FieldClass::Bool => CategoryInfo::plain(PinCategory::Boolean),
            FieldClass::Str => CategoryInfo::plain(PinCategory::String),
            FieldClass::Text => CategoryInfo::plain(PinCategory::Text),
            _ => CategoryInfo::plain(PinCategory::BadType),
        };
        Ok(info)
    }

    fn resolve_struct(&mut self, desc: &PropertyDescriptor) -> Result<CategoryInfo> {
        let index = desc.index(IndexField::Struct)?;
        let Some(resolved) = self.registry.deserialize_object(index) else {
            self.warn(ResolveWarning::MissingStruct {
                property: desc.object_name.clone(),
                index,
            });
            return Ok(CategoryInfo::plain(PinCategory::Float));
        };

        // Placeholder user structs point at the struct they were reinstanced from.
        let object = if resolved.is_user_defined_struct() {
            self.registry.primary_struct(&resolved).unwrap_or(resolved)
        } else {
            resolved
        };
        Ok(CategoryInfo::with_object(PinCategory::Struct, Some(object)))
    }

    /// Full pin type of a property document.
    pub fn convert(&mut self, desc: &PropertyDescriptor) -> Result<TypedPinDescriptor> {
        let class = resolve_field_class(&desc.object_class)?;
        let container = class.container_kind();

        let mut value_type = None;
        let element = match container {
            ContainerKind::Map => {
                let value = self.sub_descriptor(desc, IndexField::ValueProp)?;
                value_type = Some(TerminalType::from(self.resolve_category(&value)?));
                Some(self.sub_descriptor(desc, IndexField::KeyProp)?)
            }
            ContainerKind::Set => Some(self.sub_descriptor(desc, IndexField::ElementType)?),
            ContainerKind::Array => Some(self.sub_descriptor(desc, IndexField::Inner)?),
            ContainerKind::None => None,
        };

        let mut pin = TypedPinDescriptor {
            category: PinCategory::BadType,
            sub_category: None,
            sub_category_object: None,
            member_reference: None,
            value_type,
            container,
            is_reference: has_all_flags(desc.property_flags, CPF_BY_REF_FLAGS),
            is_const: has_all_flags(desc.property_flags, CPF_CONST_PARM),
            is_weak_pointer: false,
        };

        if let Some(kind) = class.delegate_kind() {
            pin.category = match kind {
                DelegateKind::Multicast => PinCategory::MulticastDelegate,
                DelegateKind::Single => PinCategory::Delegate,
            };
            let index = desc.index(IndexField::SignatureFunction)?;
            match self.registry.deserialize_object(index) {
                Some(function) => pin.member_reference = Some(MemberReference::from_function(&function)),
                None => self.warn(ResolveWarning::MissingSignature {
                    property: desc.object_name.clone(),
                    index,
                }),
            }
            return Ok(pin);
        }

        let info = self.resolve_category(element.as_ref().unwrap_or(desc))?;
        pin.category = info.category;
        pin.sub_category = info.sub_category;
        pin.sub_category_object = info.sub_category_object;
        pin.is_weak_pointer = info.is_weak_pointer;
        Ok(pin)
    }
}

/// One-shot conversion without keeping the resolver around.
pub fn convert_to_pin_type<R: ObjectRegistry + ?Sized>(
    desc: &PropertyDescriptor,
    registry: &mut R,
) -> Result<TypedPinDescriptor> {
    PinTypeResolver::new(registry).convert(desc)
}
