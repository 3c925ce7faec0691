mod builder;

pub use builder::{EngineBuilder, Setup};
