mod class_layout;
mod param_layout;

pub use class_layout::ClassLayout;
pub use param_layout::ParamLayout;
