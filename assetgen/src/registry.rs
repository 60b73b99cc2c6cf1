// Object registry seam: the dump's object table, owned outside this crate.
//
// Every index is resolved through the registry on each call. An `ObjectRef`
// is only valid for the resolution that produced it; the registry may
// materialize or invalidate entries lazily.

use serde::Serialize;

use crate::naming::object_short_name;
use crate::schema::PropertyDescriptor;

/// A live object handed out by the registry, identified by its path name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct ObjectRef {
    /// Full path, e.g. `/Game/UI/S_Entry.S_Entry` or `/Script/Engine.Actor:ReceiveTick`.
    pub path: String,
    /// Reflection class of the object, e.g. `ScriptStruct` or `UserDefinedStruct`.
    pub class_name: String,
}

impl ObjectRef {
    pub fn new(path: impl Into<String>, class_name: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            class_name: class_name.into(),
        }
    }

    /// Object name without outers.
    pub fn name(&self) -> &str {
        object_short_name(&self.path)
    }

    /// Path of the immediate outer, if the object is not a package.
    pub fn outer_path(&self) -> Option<&str> {
        self.path.rfind([':', '.']).map(|i| &self.path[..i])
    }

    /// Package the object lives in.
    pub fn package_name(&self) -> &str {
        match self.path.find(['.', ':']) {
            Some(i) => &self.path[..i],
            None => &self.path,
        }
    }

    pub fn is_user_defined_struct(&self) -> bool {
        self.class_name == "UserDefinedStruct"
    }
}

/// Resolves dump indices to live objects and their packages.
pub trait ObjectRegistry {
    /// Resolve an index to a live object, materializing it on first use.
    /// Negative or dangling indices yield `None`.
    fn deserialize_object(&mut self, index: i32) -> Option<ObjectRef>;

    /// Append the packages `index` depends on. De-duplication is up to the
    /// registry.
    fn collect_object_packages(&mut self, index: i32, out: &mut Vec<String>);

    /// The property document stored at `index`, used for container
    /// element, key and value descriptors.
    fn property_descriptor(&mut self, index: i32) -> Option<PropertyDescriptor>;

    /// For a user-defined struct, the canonical struct it was
    /// reinstanced from. `None` keeps the struct as resolved.
    fn primary_struct(&mut self, user_struct: &ObjectRef) -> Option<ObjectRef> {
        let _ = user_struct;
        None
    }
}
