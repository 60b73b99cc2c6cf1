// Staged asset generation: stages, dependency declaration and the driver.

pub mod material_instance;
pub mod static_params;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{AssetGenError, Result};
use crate::registry::ObjectRegistry;

/// Generation stages, in the order every asset walks them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GenerationStage {
    Construction,
    DataPopulation,
    CdoFinalization,
    PreFinished,
    Finished,
}

impl GenerationStage {
    pub const ALL: [GenerationStage; 5] = [
        GenerationStage::Construction,
        GenerationStage::DataPopulation,
        GenerationStage::CdoFinalization,
        GenerationStage::PreFinished,
        GenerationStage::Finished,
    ];

    pub fn next(self) -> Option<GenerationStage> {
        match self {
            GenerationStage::Construction => Some(GenerationStage::DataPopulation),
            GenerationStage::DataPopulation => Some(GenerationStage::CdoFinalization),
            GenerationStage::CdoFinalization => Some(GenerationStage::PreFinished),
            GenerationStage::PreFinished => Some(GenerationStage::Finished),
            GenerationStage::Finished => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            GenerationStage::Construction => "CONSTRUCTION",
            GenerationStage::DataPopulation => "DATA_POPULATION",
            GenerationStage::CdoFinalization => "CDO_FINALIZATION",
            GenerationStage::PreFinished => "PRE_FINISHED",
            GenerationStage::Finished => "FINISHED",
        }
    }
}

/// A package that must reach `required_stage` before the current stage of
/// the declaring asset may run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PackageDependency {
    pub package_name: String,
    pub required_stage: GenerationStage,
}

/// Top-level document of one dumped asset.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct AssetDocument {
    pub asset_class: String,
    pub asset_package: String,
    pub asset_name: String,
    // The dumper spells it this way.
    #[serde(rename = "SkipDependecies", alias = "SkipDependencies", default)]
    pub skip_dependencies: bool,
    pub asset_object_data: Map<String, Value>,
}

impl AssetDocument {
    pub fn object_field(&self, name: &str) -> Option<&Value> {
        self.asset_object_data.get(name)
    }

    pub fn required_field(&self, name: &'static str) -> Result<&Value> {
        self.object_field(name)
            .ok_or_else(|| AssetGenError::missing(&self.asset_name, name))
    }

    /// Object indices listed under `name`. Absent means empty.
    pub fn index_list(&self, name: &str) -> Result<Vec<i32>> {
        let Some(value) = self.object_field(name) else {
            return Ok(Vec::new());
        };
        let invalid = || AssetGenError::Codec {
            property: name.to_string(),
            message: format!("expected an array of object indices, got {value}"),
        };
        value
            .as_array()
            .ok_or_else(invalid)?
            .iter()
            .map(|v| v.as_i64().and_then(|i| i32::try_from(i).ok()).ok_or_else(invalid))
            .collect()
    }
}

/// Outcome of populating a stale asset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PopulateOutcome {
    Regenerated { nodes_added: usize },
    /// The asset could not be reconciled; a placeholder was put in and the
    /// rest of its population was abandoned.
    FellBackToDefaultParent,
}

/// One asset kind's regeneration logic.
pub trait AssetGenerator {
    /// Reflection class of the generated asset object.
    fn asset_class(&self) -> &'static str;

    fn document(&self) -> &AssetDocument;

    /// Declare the packages the given stage waits on.
    fn populate_stage_dependencies<R: ObjectRegistry + ?Sized>(
        &self,
        stage: GenerationStage,
        registry: &mut R,
        out: &mut Vec<PackageDependency>,
    ) -> Result<()>;

    /// Whether the live asset already matches the document.
    fn is_up_to_date(&self) -> Result<bool>;

    /// Write the document into the live asset.
    fn populate(&mut self) -> Result<PopulateOutcome>;

    /// Runs once all PRE_FINISHED dependencies are available.
    fn pre_finish(&mut self) -> Result<()> {
        Ok(())
    }
}

/// What `drive_stage` did for one asset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StageReport {
    pub stage: GenerationStage,
    pub dependencies: Vec<PackageDependency>,
    /// DATA_POPULATION only.
    pub up_to_date: Option<bool>,
    pub populated: Option<PopulateOutcome>,
    pub pre_finished: bool,
}

/// Run one stage of `generator`.
pub fn drive_stage<G, R>(generator: &mut G, stage: GenerationStage, registry: &mut R) -> Result<StageReport>
where
    G: AssetGenerator,
    R: ObjectRegistry + ?Sized,
{
    let mut report = StageReport {
        stage,
        dependencies: Vec::new(),
        up_to_date: None,
        populated: None,
        pre_finished: false,
    };

    generator.populate_stage_dependencies(stage, registry, &mut report.dependencies)?;

    match stage {
        GenerationStage::DataPopulation => {
            let up_to_date = generator.is_up_to_date()?;
            report.up_to_date = Some(up_to_date);
            if !up_to_date {
                report.populated = Some(generator.populate()?);
            }
        }
        GenerationStage::PreFinished => {
            generator.pre_finish()?;
            report.pre_finished = true;
        }
        _ => {}
    }

    log::debug!(
        "generator: {} {} at {}: {} dependencies",
        generator.asset_class(),
        generator.document().asset_name,
        stage.name(),
        report.dependencies.len()
    );
    Ok(report)
}
