// Static parameter overrides of a material instance.

use serde::{Deserialize, Serialize};

use crate::guid::FGuid;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MaterialParameterAssociation {
    #[serde(alias = "EMaterialParameterAssociation::LayerParameter")]
    LayerParameter,
    #[serde(alias = "EMaterialParameterAssociation::BlendParameter")]
    BlendParameter,
    #[default]
    #[serde(alias = "EMaterialParameterAssociation::GlobalParameter")]
    GlobalParameter,
}

/// Identity of a parameter within the material graph.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct MaterialParameterInfo {
    pub name: String,
    #[serde(default)]
    pub association: MaterialParameterAssociation,
    /// Layer index, -1 for global parameters.
    #[serde(default = "global_index")]
    pub index: i32,
}

fn global_index() -> i32 {
    -1
}

impl MaterialParameterInfo {
    pub fn global(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            association: MaterialParameterAssociation::GlobalParameter,
            index: -1,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StaticSwitchParameter {
    #[serde(rename = "ParameterInfo")]
    pub parameter_info: MaterialParameterInfo,
    #[serde(rename = "Value")]
    pub value: bool,
    #[serde(rename = "bOverride", default)]
    pub override_: bool,
    #[serde(rename = "ExpressionGUID", default)]
    pub expression_guid: FGuid,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StaticComponentMaskParameter {
    #[serde(rename = "ParameterInfo")]
    pub parameter_info: MaterialParameterInfo,
    #[serde(rename = "R")]
    pub r: bool,
    #[serde(rename = "G")]
    pub g: bool,
    #[serde(rename = "B")]
    pub b: bool,
    #[serde(rename = "A")]
    pub a: bool,
    #[serde(rename = "bOverride", default)]
    pub override_: bool,
    #[serde(rename = "ExpressionGUID", default)]
    pub expression_guid: FGuid,
}

/// The override lists the generator reconciles. Layer and terrain weight
/// parameters present in the document are ignored.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct StaticParameterSet {
    #[serde(default)]
    pub static_switch_parameters: Vec<StaticSwitchParameter>,
    #[serde(default)]
    pub static_component_mask_parameters: Vec<StaticComponentMaskParameter>,
}

impl StaticParameterSet {
    /// Both lists equal element-wise, in order.
    pub fn matches(&self, other: &StaticParameterSet) -> bool {
        self.static_switch_parameters == other.static_switch_parameters
            && self.static_component_mask_parameters == other.static_component_mask_parameters
    }

    /// Names of every override, switches first.
    pub fn parameter_names(&self) -> impl Iterator<Item = &str> {
        let switches = self.static_switch_parameters.iter().map(|p| p.parameter_info.name.as_str());
        let masks = self
            .static_component_mask_parameters
            .iter()
            .map(|p| p.parameter_info.name.as_str());
        switches.chain(masks)
    }
}
