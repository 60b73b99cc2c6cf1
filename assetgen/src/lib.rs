// assetgen: rebuilds engine assets from dumped reflection JSON.

pub mod codec;
pub mod config;
pub mod dependencies;
pub mod error;
pub mod field_class;
pub mod function;
pub mod generator;
pub mod guid;
pub mod naming;
pub mod pin_type;
pub mod registry;
pub mod schema;
pub mod struct_variable;

#[cfg(test)]
mod testing;

pub use codec::PropertyCodec;
pub use config::GeneratorConfig;
pub use dependencies::collect_property_dependencies;
pub use error::{AssetGenError, Result};
pub use field_class::{resolve_field_class, FieldClass};
pub use function::{DeserializedFunction, DeserializedProperty};
pub use generator::{drive_stage, AssetDocument, AssetGenerator, GenerationStage, PackageDependency};
pub use pin_type::{convert_to_pin_type, PinCategory, PinTypeResolver, TypedPinDescriptor};
pub use registry::{ObjectRef, ObjectRegistry};
pub use schema::{FieldDescriptor, PropertyDescriptor};
pub use struct_variable::{populate_struct_variable, StructVariableDescription};

/// Resolve `desc` and render the pin type as JSON, for inspection and
/// export. Keys are the `TypedPinDescriptor` field names.
pub fn pin_type_json<R: ObjectRegistry + ?Sized>(desc: &PropertyDescriptor, registry: &mut R) -> Result<String> {
    let pin = convert_to_pin_type(desc, registry)?;
    Ok(serde_json::to_string(&pin)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{prop, MockRegistry};

    #[test]
    fn pin_type_json_export() {
        let mut reg = MockRegistry::default();
        reg.add_object(4, "/Script/CoreUObject.Vector", "ScriptStruct");
        let mut desc = prop("StructProperty", "Location");
        desc.struct_type = Some(4);

        let json: serde_json::Value = serde_json::from_str(&pin_type_json(&desc, &mut reg).unwrap()).unwrap();
        assert_eq!(json["category"], "struct");
        assert_eq!(json["sub_category_object"]["path"], "/Script/CoreUObject.Vector");
    }

    #[test]
    fn unknown_class_aborts_export() {
        let mut reg = MockRegistry::default();
        let err = pin_type_json(&prop("FancyProperty", "X"), &mut reg).unwrap_err();
        assert!(matches!(err, AssetGenError::UnknownFieldClass(_)));
    }
}
