use serde::{Deserialize, Serialize};

use crate::{DataSpec, PrincipleSpec, PriorSpec, ScoreSpec};

/// How the scoring functions are warm started before the starting point is drawn.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WarmStartSpec {
    #[default]
    None,
    Data,
    Random,
}

/// The specification for a single class.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassSpec {
    pub score: ScoreSpec,
    pub data: DataSpec,
}

/// The specification for the objective engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineSpec {
    pub threads: usize,
    pub principle: PrincipleSpec,
    #[serde(default)]
    pub prior: PriorSpec,
    #[serde(default)]
    pub normalize: bool,
    #[serde(default)]
    pub free_params: bool,
    /// The name of the initialization policy, `zeros`, `last` or `plugin`.
    pub init: String,
    #[serde(default)]
    pub warm_start: WarmStartSpec,
    pub seed: Option<u64>,
    pub classes: Vec<ClassSpec>,
}
