// Generator settings, deserialized from assetgen.toml. Every key is optional.

use std::collections::BTreeMap;
use std::path::Path;

use serde::Deserialize;

use crate::error::Result;

/// Top-level config file.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    pub functions: FunctionConfig,
    pub material_instance: MaterialInstanceConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct FunctionConfig {
    /// Name prefix of the generated event graph entry point.
    pub ubergraph_prefix: String,
    /// Name suffix of generated delegate signature functions.
    pub delegate_signature_suffix: String,
}

impl Default for FunctionConfig {
    fn default() -> Self {
        Self {
            ubergraph_prefix: "ExecuteUbergraph".to_string(),
            delegate_signature_suffix: "__DelegateSignature".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct MaterialInstanceConfig {
    /// Properties kept out of the generic compare/copy path. Either editor
    /// derived data or fields the generator handles by hand.
    pub skip_properties: Vec<String>,
    /// Struct fields removed from the entries of the named properties before
    /// the generic path sees them. The editor regenerates these from the
    /// parent material graph.
    pub skip_nested_fields: BTreeMap<String, Vec<String>>,
}

impl Default for MaterialInstanceConfig {
    fn default() -> Self {
        Self {
            skip_properties: [
                "TextureStreamingData",
                "CachedReferencedTextures",
                "CachedLayerParameters",
                "bHasStaticPermutationResource",
                "StaticParameters",
                "AssetUserData",
            ]
            .into_iter()
            .map(String::from)
            .collect(),
            skip_nested_fields: [
                "ScalarParameterValues",
                "VectorParameterValues",
                "TextureParameterValues",
                "FontParameterValues",
            ]
            .into_iter()
            .map(|property| (property.to_string(), vec!["ExpressionGUID".to_string()]))
            .collect(),
        }
    }
}

impl GeneratorConfig {
    pub fn from_toml_str(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        let config = Self::from_toml_str(&text)?;
        log::debug!("config: loaded {}", path.display());
        Ok(config)
    }
}
