// Material instance regeneration.
//
// `AssetUserData` is kept out of the generic property path: its objects may
// depend back on this instance, so they are declared at PRE_FINISHED and
// written by `pre_finish` instead of at DATA_POPULATION.

use serde_json::{Map, Value};

use super::static_params::StaticParameterSet;
use super::{AssetDocument, AssetGenerator, GenerationStage, PackageDependency, PopulateOutcome};
use crate::codec::{generic_properties, PropertyCodec};
use crate::config::MaterialInstanceConfig;
use crate::error::Result;
use crate::registry::ObjectRegistry;

pub const ASSET_CLASS: &str = "MaterialInstanceConstant";

const ASSET_USER_DATA: &str = "AssetUserData";
const REFERENCED_OBJECTS: &str = "$ReferencedObjects";
const STATIC_PARAMETERS: &str = "StaticParameters";

/// Expression node kinds of a material graph, as far as the generator cares.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExpressionKind {
    StaticSwitchParameter,
    StaticBoolParameter,
    StaticComponentMaskParameter,
    Other,
}

impl ExpressionKind {
    /// Expressions that define a static parameter by name.
    pub fn defines_static_parameter(self) -> bool {
        !matches!(self, ExpressionKind::Other)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MaterialExpression {
    pub kind: ExpressionKind,
    pub parameter_name: String,
}

/// Expression graph of a base material.
pub trait MaterialGraph {
    fn expressions(&self) -> Vec<MaterialExpression>;

    /// Add a parameter expression node named `parameter_name`.
    fn spawn_expression(&mut self, kind: ExpressionKind, parameter_name: &str);

    /// Wire newly added parameter nodes where the graph allows it.
    fn connect_basic_parameter_pins(&mut self, transaction: &str);

    fn force_compilation(&mut self);
}

/// Live material instance owned by the host runtime.
pub trait MaterialInstanceAsset {
    type Material: MaterialGraph;

    fn path_name(&self) -> String;

    fn has_parent(&self) -> bool;

    /// Point the instance at the engine's default surface material.
    fn assign_default_parent(&mut self);

    /// The base material at the root of the parent chain.
    fn base_material_mut(&mut self) -> Option<&mut Self::Material>;

    fn static_parameters(&self) -> &StaticParameterSet;

    fn update_static_permutation(&mut self, overrides: &StaticParameterSet);

    /// Re-run load-time initialization, regenerating parameter expression GUIDs.
    fn post_load(&mut self);
}

/// Add a graph node for every override the material does not define yet.
/// Returns the number of nodes added.
pub fn ensure_static_parameter_nodes<M: MaterialGraph + ?Sized>(
    material: &mut M,
    overrides: &StaticParameterSet,
) -> usize {
    let mut existing: Vec<String> = material
        .expressions()
        .into_iter()
        .filter(|e| e.kind.defines_static_parameter())
        .map(|e| e.parameter_name)
        .collect();

    let switches = overrides
        .static_switch_parameters
        .iter()
        .map(|p| (ExpressionKind::StaticSwitchParameter, &p.parameter_info.name));
    let masks = overrides
        .static_component_mask_parameters
        .iter()
        .map(|p| (ExpressionKind::StaticComponentMaskParameter, &p.parameter_info.name));

    let mut added = 0;
    for (kind, name) in switches.chain(masks) {
        if existing.iter().any(|e| e == name) {
            continue;
        }
        material.spawn_expression(kind, name);
        existing.push(name.clone());
        added += 1;
    }

    if added > 0 {
        material.connect_basic_parameter_pins("Static Parameters Added from MaterialInstance");
        material.force_compilation();
    }
    added
}

pub struct MaterialInstanceGenerator<A, C> {
    document: AssetDocument,
    config: MaterialInstanceConfig,
    asset: A,
    codec: C,
}

impl<A, C> MaterialInstanceGenerator<A, C>
where
    A: MaterialInstanceAsset,
    C: PropertyCodec<A>,
{
    pub fn new(document: AssetDocument, config: MaterialInstanceConfig, asset: A, codec: C) -> Self {
        Self {
            document,
            config,
            asset,
            codec,
        }
    }

    pub fn asset(&self) -> &A {
        &self.asset
    }

    pub fn codec(&self) -> &C {
        &self.codec
    }

    /// The static parameter overrides the document asks for.
    pub fn static_parameter_overrides(&self) -> Result<StaticParameterSet> {
        let value = self.document.required_field(STATIC_PARAMETERS)?;
        self.codec.deserialize_struct(value)
    }

    /// Object data handed to the generic codec path.
    fn generic_object_data(&self) -> Map<String, Value> {
        generic_properties(
            &self.document.asset_object_data,
            &self.config.skip_properties,
            &self.config.skip_nested_fields,
        )
    }

    fn asset_user_data(&self) -> Value {
        self.document
            .object_field(ASSET_USER_DATA)
            .cloned()
            .unwrap_or_else(|| Value::Array(Vec::new()))
    }

    fn collect_packages<R: ObjectRegistry + ?Sized>(
        registry: &mut R,
        indices: impl IntoIterator<Item = i32>,
        out: &mut Vec<PackageDependency>,
    ) {
        let mut packages = Vec::new();
        for index in indices {
            registry.collect_object_packages(index, &mut packages);
        }
        out.extend(packages.into_iter().map(|package_name| PackageDependency {
            package_name,
            required_stage: GenerationStage::CdoFinalization,
        }));
    }
}

impl<A, C> AssetGenerator for MaterialInstanceGenerator<A, C>
where
    A: MaterialInstanceAsset,
    C: PropertyCodec<A>,
{
    fn asset_class(&self) -> &'static str {
        ASSET_CLASS
    }

    fn document(&self) -> &AssetDocument {
        &self.document
    }

    fn populate_stage_dependencies<R: ObjectRegistry + ?Sized>(
        &self,
        stage: GenerationStage,
        registry: &mut R,
        out: &mut Vec<PackageDependency>,
    ) -> Result<()> {
        if self.document.skip_dependencies {
            return Ok(());
        }

        match stage {
            GenerationStage::Construction => {
                let user_data = self.document.index_list(ASSET_USER_DATA)?;
                let referenced = self.document.index_list(REFERENCED_OBJECTS)?;
                let deferred = |index: &i32| !user_data.contains(index);
                Self::collect_packages(registry, referenced.into_iter().filter(deferred), out);
            }
            GenerationStage::PreFinished => {
                let user_data = self.document.index_list(ASSET_USER_DATA)?;
                Self::collect_packages(registry, user_data, out);
            }
            _ => {}
        }
        Ok(())
    }

    fn is_up_to_date(&self) -> Result<bool> {
        let generic = self.generic_object_data();
        if !self.codec.compare_object_properties(&generic, &self.asset) {
            return Ok(false);
        }

        if !self
            .codec
            .compare_property_values(ASSET_USER_DATA, &self.asset_user_data(), &self.asset)
        {
            return Ok(false);
        }

        let overrides = self.static_parameter_overrides()?;
        Ok(overrides.matches(self.asset.static_parameters()))
    }

    fn populate(&mut self) -> Result<PopulateOutcome> {
        let generic = self.generic_object_data();
        self.codec.deserialize_object_properties(&generic, &mut self.asset)?;

        if !self.asset.has_parent() {
            log::error!(
                "material_instance: failed to deserialize parent material of {}; falling back to default material",
                self.asset.path_name()
            );
            self.asset.assign_default_parent();
            return Ok(PopulateOutcome::FellBackToDefaultParent);
        }

        let overrides = self.static_parameter_overrides()?;
        let path_name = self.asset.path_name();
        let nodes_added = match self.asset.base_material_mut() {
            Some(material) => ensure_static_parameter_nodes(material, &overrides),
            None => {
                log::warn!("material_instance: {path_name} has a parent but no base material");
                0
            }
        };
        if nodes_added > 0 {
            log::debug!("material_instance: added {nodes_added} static parameter nodes for {path_name}");
        }

        self.asset.update_static_permutation(&overrides);
        self.asset.post_load();
        Ok(PopulateOutcome::Regenerated { nodes_added })
    }

    fn pre_finish(&mut self) -> Result<()> {
        let user_data = self.asset_user_data();
        self.codec
            .deserialize_property_value(ASSET_USER_DATA, &user_data, &mut self.asset)
    }
}
