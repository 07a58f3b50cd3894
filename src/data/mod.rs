pub mod dataset;
pub mod value;
