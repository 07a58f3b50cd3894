use std::collections::HashMap;

use rand::seq::SliceRandom;
use rand::{rngs::StdRng, SeedableRng};

use crate::data::value::{Attribute, Value};
use crate::ModelError;

/// A single row of a dataset: one value per attribute (class included) plus
/// a weight.
///
/// The weight defaults to 1.0. Tree induction lowers it below 1.0 when a row
/// with a missing value at a split attribute is replicated into every branch;
/// replication always works on clones, the original row is never touched.
#[derive(Debug, Clone, PartialEq)]
pub struct Instance {
    values: Vec<Value>,
    weight: f64,
}

impl Instance {
    pub fn new(values: Vec<Value>) -> Self {
        Self {
            values,
            weight: 1.0,
        }
    }

    pub fn with_weight(values: Vec<Value>, weight: f64) -> Self {
        Self { values, weight }
    }

    pub fn values(&self) -> &[Value] {
        &self.values
    }

    pub fn value_at(&self, index: usize) -> &Value {
        &self.values[index]
    }

    pub fn weight(&self) -> f64 {
        self.weight
    }

    pub fn set_weight(&mut self, weight: f64) {
        self.weight = weight;
    }
}

/// A collection of instances together with their metadata: the ordered
/// attribute list, the per-attribute nominal domains and the class index.
///
/// Domains are kept in insertion order; that order drives nominal value
/// codes and the order of tree branches, so training is deterministic.
#[derive(Debug, Clone)]
pub struct Dataset {
    attributes: Vec<Attribute>,
    instances: Vec<Instance>,
    domains: HashMap<Attribute, Vec<Value>>,
    class_index: usize,
}

impl Dataset {
    /// Creates an empty dataset over the given attributes. The class
    /// defaults to the last attribute.
    pub fn new(attributes: Vec<Attribute>) -> Self {
        let class_index = attributes.len().saturating_sub(1);
        Self {
            attributes,
            instances: Vec::new(),
            domains: HashMap::new(),
            class_index,
        }
    }

    pub fn attributes(&self) -> &[Attribute] {
        &self.attributes
    }

    pub fn instances(&self) -> &[Instance] {
        &self.instances
    }

    pub fn class_index(&self) -> usize {
        self.class_index
    }

    pub fn set_class_index(&mut self, class_index: usize) {
        self.class_index = class_index;
    }

    /// The set of possible values of a nominal attribute, in the order they
    /// were registered. Empty for attributes without a registered domain.
    pub fn domain(&self, attribute: &Attribute) -> &[Value] {
        self.domains
            .get(attribute)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn set_domain(&mut self, attribute: &Attribute, values: Vec<Value>) {
        self.domains.insert(attribute.clone(), values);
    }

    pub fn add_instance(&mut self, instance: Instance) {
        self.instances.push(instance);
    }

    pub fn is_empty(&self) -> bool {
        self.instances.is_empty()
    }

    /// The class value of an instance belonging to this dataset.
    pub fn class_value<'a>(&self, instance: &'a Instance) -> &'a Value {
        instance.value_at(self.class_index)
    }

    /// Splits the instances into a train and a test dataset sharing this
    /// dataset's metadata. Rows are shuffled before splitting.
    pub fn train_test_split(
        &self,
        train_size: f64,
        seed: Option<u64>,
    ) -> Result<(Self, Self), ModelError> {
        if !(0.0..=1.0).contains(&train_size) {
            return Err(ModelError::InvalidParameter(
                "train size should be between 0.0 and 1.0".to_string(),
            ));
        }
        let mut rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        let mut indices = (0..self.instances.len()).collect::<Vec<_>>();
        indices.shuffle(&mut rng);
        let train_count = (self.instances.len() as f64 * train_size).floor() as usize;

        let mut train = self.copy_without_instances();
        let mut test = self.copy_without_instances();
        for &index in &indices[..train_count] {
            train.add_instance(self.instances[index].clone());
        }
        for &index in &indices[train_count..] {
            test.add_instance(self.instances[index].clone());
        }
        Ok((train, test))
    }

    fn copy_without_instances(&self) -> Self {
        Self {
            attributes: self.attributes.clone(),
            instances: Vec::new(),
            domains: self.domains.clone(),
            class_index: self.class_index,
        }
    }
}
