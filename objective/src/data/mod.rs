mod dataset;
mod sequence;
mod weighted;

pub use dataset::DataSet;
pub use sequence::{DNA_SIZE, Sequence};
pub use weighted::WeightedData;
