// Package dependencies of a single property document.
//
// Only the immediate level is walked: for a container, the element/key/value
// descriptor indices are handed to the registry, which owns any further
// expansion.

use crate::error::Result;
use crate::field_class::{resolve_field_class, ContainerKind, FieldClass};
use crate::registry::ObjectRegistry;
use crate::schema::{IndexField, PropertyDescriptor};

/// The index fields a document depends on, in collection order.
pub fn dependency_fields(desc: &PropertyDescriptor) -> Result<&'static [IndexField]> {
    let class = resolve_field_class(&desc.object_class)?;

    let fields: &'static [IndexField] = match class.container_kind() {
        ContainerKind::Map => &[IndexField::ValueProp, IndexField::KeyProp],
        ContainerKind::Set => &[IndexField::ElementType],
        ContainerKind::Array => &[IndexField::Inner],
        ContainerKind::None => match class {
            c if c.delegate_kind().is_some() => &[IndexField::SignatureFunction],
            FieldClass::Interface => &[IndexField::InterfaceClass],
            FieldClass::Class | FieldClass::SoftClass => &[IndexField::MetaClass],
            FieldClass::Struct => &[IndexField::Struct],
            FieldClass::Byte | FieldClass::Enum => &[IndexField::Enum],
            c if c.is_object_reference() => &[IndexField::PropertyClass],
            _ => &[],
        },
    };
    Ok(fields)
}

/// Append every package `desc` references to `out`. Duplicates are kept.
pub fn collect_property_dependencies<R: ObjectRegistry + ?Sized>(
    desc: &PropertyDescriptor,
    registry: &mut R,
    out: &mut Vec<String>,
) -> Result<()> {
    for field in dependency_fields(desc)? {
        let index = desc.index(*field)?;
        registry.collect_object_packages(index, out);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AssetGenError;
    use crate::testing::{prop, MockRegistry};

    #[test]
    fn struct_surfaces_only_its_own_package() {
        let mut reg = MockRegistry::default();
        reg.add_object(1, "/Game/Data/S_Loadout.S_Loadout", "UserDefinedStruct");
        reg.add_object(2, "/Game/Items/BP_Weapon.BP_Weapon_C", "BlueprintGeneratedClass");
        let mut inner = prop("ObjectProperty", "Weapons");
        inner.property_class = Some(2);
        reg.add_descriptor(3, inner.clone());

        let mut field = prop("StructProperty", "Loadout");
        field.struct_type = Some(1);

        let mut out = Vec::new();
        collect_property_dependencies(&field, &mut reg, &mut out).unwrap();
        assert_eq!(out, vec!["/Game/Data/S_Loadout"]);

        // The array's inner document only contributes once fed on its own.
        let mut array = prop("ArrayProperty", "Weapons");
        array.inner = Some(3);
        collect_property_dependencies(&array, &mut reg, &mut out).unwrap();
        assert_eq!(reg.collected, vec![1, 3]);

        collect_property_dependencies(&inner, &mut reg, &mut out).unwrap();
        assert_eq!(out.last().map(String::as_str), Some("/Game/Items/BP_Weapon"));
    }

    #[test]
    fn map_collects_value_then_key() {
        let mut reg = MockRegistry::default();
        let mut map = prop("MapProperty", "Table");
        map.key_prop = Some(5);
        map.value_prop = Some(6);
        let mut out = Vec::new();
        collect_property_dependencies(&map, &mut reg, &mut out).unwrap();
        assert_eq!(reg.collected, vec![6, 5]);
    }

    #[test]
    fn exactly_one_branch_fires() {
        let mut reg = MockRegistry::default();
        let mut p = prop("ClassProperty", "Spawn");
        p.meta_class = Some(1);
        p.property_class = Some(2);
        let mut out = Vec::new();
        collect_property_dependencies(&p, &mut reg, &mut out).unwrap();
        assert_eq!(reg.collected, vec![1]);

        let mut s = prop("SetProperty", "Tags");
        s.element_type = Some(7);
        s.inner = Some(8);
        collect_property_dependencies(&s, &mut reg, &mut out).unwrap();
        assert_eq!(reg.collected, vec![1, 7]);
    }

    #[test]
    fn delegates_depend_on_signature() {
        let mut reg = MockRegistry::default();
        let mut p = prop("MulticastSparseDelegateProperty", "OnHit");
        p.signature_function = Some(12);
        let mut out = Vec::new();
        collect_property_dependencies(&p, &mut reg, &mut out).unwrap();
        assert_eq!(reg.collected, vec![12]);
    }

    #[test]
    fn duplicates_are_preserved() {
        let mut reg = MockRegistry::default();
        reg.packages.insert(4, vec!["/Game/A".into(), "/Game/A".into()]);
        let mut p = prop("EnumProperty", "Mode");
        p.enum_type = Some(4);
        let mut out = vec!["/Game/A".to_string()];
        collect_property_dependencies(&p, &mut reg, &mut out).unwrap();
        assert_eq!(out, vec!["/Game/A", "/Game/A", "/Game/A"]);
    }

    #[test]
    fn primitives_have_no_dependencies() {
        let mut reg = MockRegistry::default();
        let mut out = Vec::new();
        collect_property_dependencies(&prop("TextProperty", "Label"), &mut reg, &mut out).unwrap();
        assert!(out.is_empty());
        assert!(reg.collected.is_empty());
    }

    #[test]
    fn missing_index_and_unknown_class_are_fatal() {
        let mut reg = MockRegistry::default();
        let mut out = Vec::new();
        let err = collect_property_dependencies(&prop("InterfaceProperty", "I"), &mut reg, &mut out)
            .unwrap_err();
        assert!(matches!(err, AssetGenError::MissingField { field: "InterfaceClass", .. }));

        let err = collect_property_dependencies(&prop("Nope", "N"), &mut reg, &mut out).unwrap_err();
        assert!(matches!(err, AssetGenError::UnknownFieldClass(_)));
    }
}
