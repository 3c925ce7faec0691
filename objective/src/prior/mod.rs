mod composite;
mod gaussian;
mod log_prior;
mod no_prior;

pub use composite::CompositePrior;
pub use gaussian::GaussianPrior;
pub use log_prior::{LogPrior, PriorContext};
pub use no_prior::NoPrior;
