//! Parallel evaluation of generative-discriminative objectives for class-partitioned
//! sequence data.

pub mod building;
pub mod data;
pub mod execution;
pub mod function;
pub mod layout;
pub mod logsum;
pub mod prior;
pub mod scoring;

mod error;
mod init;
mod principle;
mod weights;

pub use error::{ObjectiveErr, Result};
pub use init::InitKind;
pub use principle::LearningPrinciple;
pub use weights::ClassWeightState;
