// Shared fixtures for the unit tests.

use std::collections::HashMap;

use crate::registry::{ObjectRegistry, ObjectRef};
use crate::schema::{LifetimeCondition, PropertyDescriptor};

/// In-memory object table that records which indices were touched.
#[derive(Default)]
pub struct MockRegistry {
    pub objects: HashMap<i32, ObjectRef>,
    pub descriptors: HashMap<i32, PropertyDescriptor>,
    pub primary_structs: HashMap<String, ObjectRef>,
    /// Explicit package lists; otherwise the object's own package is reported.
    pub packages: HashMap<i32, Vec<String>>,
    pub resolved: Vec<i32>,
    pub collected: Vec<i32>,
}

impl MockRegistry {
    pub fn add_object(&mut self, index: i32, path: &str, class_name: &str) {
        self.objects.insert(index, ObjectRef::new(path, class_name));
    }

    pub fn add_descriptor(&mut self, index: i32, desc: PropertyDescriptor) {
        self.descriptors.insert(index, desc);
    }
}

impl ObjectRegistry for MockRegistry {
    fn deserialize_object(&mut self, index: i32) -> Option<ObjectRef> {
        self.resolved.push(index);
        self.objects.get(&index).cloned()
    }

    fn collect_object_packages(&mut self, index: i32, out: &mut Vec<String>) {
        self.collected.push(index);
        if let Some(packages) = self.packages.get(&index) {
            out.extend(packages.iter().cloned());
        } else if let Some(object) = self.objects.get(&index) {
            out.push(object.package_name().to_string());
        }
    }

    fn property_descriptor(&mut self, index: i32) -> Option<PropertyDescriptor> {
        self.descriptors.get(&index).cloned()
    }

    fn primary_struct(&mut self, user_struct: &ObjectRef) -> Option<ObjectRef> {
        self.primary_structs.get(&user_struct.path).cloned()
    }
}

/// Property document with no flags and no index fields.
pub fn prop(object_class: &str, object_name: &str) -> PropertyDescriptor {
    PropertyDescriptor {
        object_class: object_class.to_string(),
        object_name: object_name.to_string(),
        property_flags: 0,
        array_dim: 1,
        rep_notify_func: None,
        blueprint_replication_condition: LifetimeCondition::None,
        inner: None,
        key_prop: None,
        value_prop: None,
        element_type: None,
        interface_class: None,
        meta_class: None,
        property_class: None,
        struct_type: None,
        enum_type: None,
        signature_function: None,
    }
}
