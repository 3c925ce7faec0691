mod pwm;
mod score;
mod sparse;
mod uniform;

pub use pwm::Pwm;
pub use score::{ScoreErr, ScoringFunction, StatisticalModel};
pub use sparse::SparseGrad;
pub use uniform::UniformScore;
