mod data;
mod engine;
mod objective;

pub use data::DataSpec;
pub use engine::{ClassSpec, EngineSpec, WarmStartSpec};
pub use objective::{PrincipleSpec, PriorSpec, ScoreSpec};
