// Function signatures rebuilt from compiled function documents.

use assetgen_ue_flags::{has_any_flags, CPF_PARM, CPF_RETURN_PARM, CPF_SIGNATURE_FLAGS};

use crate::config::FunctionConfig;
use crate::error::Result;
use crate::pin_type::{PinTypeResolver, TypedPinDescriptor};
use crate::registry::ObjectRegistry;
use crate::schema::{FieldDescriptor, LifetimeCondition, PropertyDescriptor};

/// Bytecode instruction for a direct call to a final function on self.
const LOCAL_FINAL_FUNCTION: &str = "LocalFinalFunction";

/// Property with its resolved pin type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeserializedProperty {
    pub name: String,
    pub flags: u64,
    pub array_dim: i32,
    pub rep_notify_func: Option<String>,
    pub replication_condition: LifetimeCondition,
    pub pin_type: TypedPinDescriptor,
}

impl DeserializedProperty {
    pub fn from_field<R: ObjectRegistry + ?Sized>(
        field: &FieldDescriptor,
        resolver: &mut PinTypeResolver<'_, R>,
    ) -> Result<Self> {
        Self::from_descriptor(field.as_property()?, resolver)
    }

    pub fn from_descriptor<R: ObjectRegistry + ?Sized>(
        desc: &PropertyDescriptor,
        resolver: &mut PinTypeResolver<'_, R>,
    ) -> Result<Self> {
        // The dumper writes NAME_None for "no notify function".
        let rep_notify_func = desc
            .rep_notify_func
            .as_deref()
            .filter(|name| !name.is_empty() && *name != "None")
            .map(str::to_string);

        Ok(Self {
            name: desc.object_name.clone(),
            flags: desc.property_flags,
            array_dim: desc.array_dim,
            rep_notify_func,
            replication_condition: desc.blueprint_replication_condition,
            pin_type: resolver.convert(desc)?,
        })
    }

    pub fn has_any_property_flags(&self, mask: u64) -> bool {
        has_any_flags(self.flags, mask)
    }
}

/// True when the property takes part in the calling contract.
pub fn is_signature_relevant(desc: &PropertyDescriptor) -> bool {
    desc.has_any_property_flags(CPF_SIGNATURE_FLAGS)
}

#[derive(Debug, Clone)]
pub struct DeserializedFunction {
    pub name: String,
    pub flags: u32,
    pub return_value: Option<DeserializedProperty>,
    /// Declaration order.
    pub parameters: Vec<DeserializedProperty>,
    /// Parameters, return value and, unless filtered, locals.
    pub all_properties: Vec<DeserializedProperty>,
    pub is_ubergraph_function: bool,
    pub is_delegate_signature: bool,
    /// The function body calls into the event graph entry point.
    pub calls_into_ubergraph: bool,
}

impl DeserializedFunction {
    pub fn from_field<R: ObjectRegistry + ?Sized>(
        field: &FieldDescriptor,
        resolver: &mut PinTypeResolver<'_, R>,
        config: &FunctionConfig,
        only_signature: bool,
    ) -> Result<Self> {
        let func = field.as_function()?;

        let mut return_value = None;
        let mut parameters = Vec::new();
        let mut all_properties = Vec::new();

        for child in &func.child_properties {
            let desc = child.as_property()?;
            if only_signature && !is_signature_relevant(desc) {
                continue;
            }

            let property = DeserializedProperty::from_descriptor(desc, resolver)?;
            if property.has_any_property_flags(CPF_RETURN_PARM) {
                return_value = Some(property.clone());
            }
            if property.has_any_property_flags(CPF_PARM) {
                parameters.push(property.clone());
            }
            all_properties.push(property);
        }

        let prefix = config.ubergraph_prefix.as_str();
        let calls_into_ubergraph = func.script.iter().any(|stmt| {
            stmt.inst == LOCAL_FINAL_FUNCTION
                && stmt.function.as_deref().is_some_and(|target| target.starts_with(prefix))
        });

        Ok(Self {
            name: func.object_name.clone(),
            flags: func.function_flags,
            return_value,
            parameters,
            all_properties,
            is_ubergraph_function: func.object_name.starts_with(prefix),
            is_delegate_signature: func.object_name.ends_with(&config.delegate_signature_suffix),
            calls_into_ubergraph,
        })
    }

    pub fn has_any_function_flags(&self, mask: u32) -> bool {
        self.flags & mask != 0
    }
}

#[cfg(test)]
mod tests {
    use assetgen_ue_flags::*;
    use serde_json::json;

    use super::*;
    use crate::error::AssetGenError;
    use crate::pin_type::PinCategory;
    use crate::testing::{prop, MockRegistry};

    fn field(value: serde_json::Value) -> FieldDescriptor {
        serde_json::from_value(value).unwrap()
    }

    fn tick_function() -> FieldDescriptor {
        field(json!({
            "FieldKind": "Function",
            "ObjectName": "ReceiveTick",
            "FunctionFlags": FUNC_EVENT | FUNC_BLUEPRINT_EVENT,
            "ChildProperties": [
                {"FieldKind": "Property", "ObjectClass": "FloatProperty", "ObjectName": "DeltaSeconds",
                 "PropertyFlags": (CPF_PARM).to_string()},
                {"FieldKind": "Property", "ObjectClass": "BoolProperty", "ObjectName": "ReturnValue",
                 "PropertyFlags": (CPF_PARM | CPF_OUT_PARM | CPF_RETURN_PARM).to_string()},
                {"FieldKind": "Property", "ObjectClass": "IntProperty", "ObjectName": "Temp_int_Variable",
                 "PropertyFlags": "0"},
                {"FieldKind": "Property", "ObjectClass": "IntProperty", "ObjectName": "OutCount",
                 "PropertyFlags": (CPF_PARM | CPF_OUT_PARM).to_string()}
            ],
            "Script": [
                {"Inst": "LetValueOnPersistentFrame"},
                {"Inst": "LocalFinalFunction", "Function": "ExecuteUbergraph_BP_Door"},
                {"Inst": "Return"}
            ]
        }))
    }

    #[test]
    fn signature_mode_drops_locals() {
        let mut reg = MockRegistry::default();
        let mut resolver = PinTypeResolver::new(&mut reg);
        let config = FunctionConfig::default();

        let func = DeserializedFunction::from_field(&tick_function(), &mut resolver, &config, true).unwrap();
        let names: Vec<_> = func.all_properties.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, ["DeltaSeconds", "ReturnValue", "OutCount"]);

        let params: Vec<_> = func.parameters.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(params, ["DeltaSeconds", "ReturnValue", "OutCount"]);
        assert_eq!(func.return_value.as_ref().unwrap().name, "ReturnValue");
        assert_eq!(func.parameters[0].pin_type.category, PinCategory::Float);
        assert!(func.has_any_function_flags(FUNC_BLUEPRINT_EVENT));
    }

    #[test]
    fn full_mode_keeps_locals() {
        let mut reg = MockRegistry::default();
        let mut resolver = PinTypeResolver::new(&mut reg);
        let config = FunctionConfig::default();

        let func = DeserializedFunction::from_field(&tick_function(), &mut resolver, &config, false).unwrap();
        assert_eq!(func.all_properties.len(), 4);
        assert_eq!(func.parameters.len(), 3);
    }

    #[test]
    fn ubergraph_call_is_found_by_scanning_the_script() {
        let mut reg = MockRegistry::default();
        let mut resolver = PinTypeResolver::new(&mut reg);
        let config = FunctionConfig::default();

        let func = DeserializedFunction::from_field(&tick_function(), &mut resolver, &config, true).unwrap();
        assert!(func.calls_into_ubergraph);
        assert!(!func.is_ubergraph_function);
        assert!(!func.is_delegate_signature);

        // Same target through a different instruction does not count.
        let virtual_call = field(json!({
            "FieldKind": "Function", "ObjectName": "Helper", "FunctionFlags": "0",
            "Script": [{"Inst": "VirtualFunction", "Function": "ExecuteUbergraph_BP_Door"}]
        }));
        let func = DeserializedFunction::from_field(&virtual_call, &mut resolver, &config, true).unwrap();
        assert!(!func.calls_into_ubergraph);
    }

    #[test]
    fn name_based_classification() {
        let mut reg = MockRegistry::default();
        let mut resolver = PinTypeResolver::new(&mut reg);
        let config = FunctionConfig::default();

        let uber = field(json!({
            "FieldKind": "Function", "ObjectName": "ExecuteUbergraph_BP_Door", "FunctionFlags": FUNC_UBERGRAPH_FUNCTION
        }));
        let func = DeserializedFunction::from_field(&uber, &mut resolver, &config, true).unwrap();
        assert!(func.is_ubergraph_function);
        assert!(!func.calls_into_ubergraph);

        let signature = field(json!({
            "FieldKind": "Function", "ObjectName": "OnOpened__DelegateSignature",
            "FunctionFlags": FUNC_DELEGATE | FUNC_MULTICAST_DELEGATE
        }));
        let func = DeserializedFunction::from_field(&signature, &mut resolver, &config, true).unwrap();
        assert!(func.is_delegate_signature);
    }

    #[test]
    fn wrong_field_kind_is_fatal() {
        let mut reg = MockRegistry::default();
        let mut resolver = PinTypeResolver::new(&mut reg);
        let config = FunctionConfig::default();

        let property = field(json!({
            "FieldKind": "Property", "ObjectClass": "IntProperty", "ObjectName": "X", "PropertyFlags": "0"
        }));
        let err = DeserializedFunction::from_field(&property, &mut resolver, &config, true).unwrap_err();
        assert!(matches!(err, AssetGenError::UnexpectedFieldKind { expected: "Function", .. }));

        let err = DeserializedProperty::from_field(&tick_function(), &mut resolver).unwrap_err();
        assert!(matches!(err, AssetGenError::UnexpectedFieldKind { expected: "Property", .. }));
    }

    #[test]
    fn property_metadata_is_carried() {
        let mut reg = MockRegistry::default();
        let mut resolver = PinTypeResolver::new(&mut reg);

        let mut desc = prop("IntProperty", "Health");
        desc.property_flags = CPF_NET | CPF_REP_NOTIFY;
        desc.array_dim = 4;
        desc.rep_notify_func = Some("OnRep_Health".into());
        desc.blueprint_replication_condition = LifetimeCondition::OwnerOnly;
        let property = DeserializedProperty::from_descriptor(&desc, &mut resolver).unwrap();
        assert_eq!(property.array_dim, 4);
        assert_eq!(property.rep_notify_func.as_deref(), Some("OnRep_Health"));
        assert_eq!(property.replication_condition, LifetimeCondition::OwnerOnly);

        desc.rep_notify_func = Some("None".into());
        let property = DeserializedProperty::from_descriptor(&desc, &mut resolver).unwrap();
        assert_eq!(property.rep_notify_func, None);
    }
}
