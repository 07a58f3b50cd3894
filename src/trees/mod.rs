pub mod classifier;
pub mod condition;
pub mod index;
pub mod info;
pub mod node;
pub mod nominal;
pub mod numeric;
