//! # treelearn
//!
//! `treelearn` trains decision-tree classifiers on tabular data mixing
//! numeric and categorical (nominal) attributes, including rows with missing
//! values. Splits are chosen by gain ratio; numeric attributes produce binary
//! threshold tests, nominal attributes produce one branch per domain value.
//!
//! ## Example Usage
//!
//! ```rust
//! use treelearn::data::dataset::{Dataset, Instance};
//! use treelearn::data::value::{Attribute, AttributeType, Value};
//! use treelearn::trees::classifier::DecisionTreeClassifier;
//!
//! let outlook = Attribute::new("outlook", AttributeType::Nominal);
//! let class = Attribute::new("play", AttributeType::Nominal);
//! let mut dataset = Dataset::new(vec![outlook.clone(), class.clone()]);
//! dataset.set_domain(&outlook, vec![Value::nominal("sunny"), Value::nominal("rainy")]);
//! dataset.set_domain(&class, vec![Value::nominal("yes"), Value::nominal("no")]);
//! dataset.add_instance(Instance::new(vec![Value::nominal("sunny"), Value::nominal("yes")]));
//! dataset.add_instance(Instance::new(vec![Value::nominal("rainy"), Value::nominal("no")]));
//!
//! let mut model = DecisionTreeClassifier::new();
//! model.fit(&dataset).unwrap();
//!
//! let unseen = Instance::new(vec![Value::nominal("sunny"), Value::Unknown]);
//! let label = model.predict(&unseen).unwrap();
//! assert_eq!(label, Some(Value::nominal("yes")));
//! ```

/// Majority-class baseline classifier
pub mod baseline;
/// Dataset, attribute and value model
pub mod data;
/// Crate error type
pub mod error;
/// Functions for evaluating classifier performance
pub mod metrics;
/// Decision trees
pub mod trees;

pub use error::ModelError;
