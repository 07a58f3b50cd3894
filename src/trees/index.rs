use std::collections::HashMap;

use crate::data::dataset::{Dataset, Instance};
use crate::data::value::{Attribute, AttributeType, Value};

/// A read-only index over a dataset's attribute metadata.
///
/// Built once at the start of `fit`, it assigns every nominal value a dense
/// integer code within its attribute's domain, partitions attribute indices
/// into nominal and numeric groups and remembers the class attribute. The
/// index is owned by the trained model and never mutated afterwards.
#[derive(Debug, Clone)]
pub struct DatasetIndex {
    attributes: Vec<Attribute>,
    domains: Vec<Vec<Value>>,
    codes: Vec<HashMap<String, usize>>,
    nominal_indices: Vec<usize>,
    numeric_indices: Vec<usize>,
    class_index: usize,
}

impl DatasetIndex {
    pub fn new(dataset: &Dataset) -> Self {
        let attributes = dataset.attributes().to_vec();
        let n = attributes.len();
        let mut domains = Vec::with_capacity(n);
        let mut codes = Vec::with_capacity(n);
        let mut nominal_indices = Vec::new();
        let mut numeric_indices = Vec::new();

        for (i, attribute) in attributes.iter().enumerate() {
            let domain = dataset.domain(attribute).to_vec();
            let mut value_codes = HashMap::new();
            match attribute.kind() {
                AttributeType::Nominal => {
                    for (code, value) in domain.iter().enumerate() {
                        if let Value::Nominal(payload) = value {
                            value_codes.insert(payload.clone(), code);
                        }
                    }
                    nominal_indices.push(i);
                }
                AttributeType::Numeric => numeric_indices.push(i),
                AttributeType::Unknown => {}
            }
            domains.push(domain);
            codes.push(value_codes);
        }

        Self {
            attributes,
            domains,
            codes,
            nominal_indices,
            numeric_indices,
            class_index: dataset.class_index(),
        }
    }

    pub fn n_attributes(&self) -> usize {
        self.attributes.len()
    }

    pub fn class_index(&self) -> usize {
        self.class_index
    }

    /// Number of distinct class labels.
    pub fn n_classes(&self) -> usize {
        self.domains[self.class_index].len()
    }

    pub fn attribute(&self, index: usize) -> &Attribute {
        &self.attributes[index]
    }

    pub fn domain(&self, index: usize) -> &[Value] {
        &self.domains[index]
    }

    /// Indices of nominal attributes, class attribute included.
    pub fn nominal_indices(&self) -> &[usize] {
        &self.nominal_indices
    }

    pub fn numeric_indices(&self) -> &[usize] {
        &self.numeric_indices
    }

    /// The dense code of a nominal value within an attribute's domain, or
    /// None for unknown values and values outside the domain.
    pub fn code(&self, attribute_index: usize, value: &Value) -> Option<usize> {
        match value {
            Value::Nominal(payload) => self.codes[attribute_index].get(payload).copied(),
            _ => None,
        }
    }

    pub fn class_of<'a>(&self, instance: &'a Instance) -> &'a Value {
        instance.value_at(self.class_index)
    }

    pub fn class_code(&self, instance: &Instance) -> Option<usize> {
        self.code(self.class_index, self.class_of(instance))
    }
}
