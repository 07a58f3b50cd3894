//! Majority-class baseline.
use crate::data::dataset::{Dataset, Instance};
use crate::data::value::{AttributeType, Value};
use crate::ModelError;

/// A classifier that ignores every attribute and always predicts the
/// majority class of its training set. Useful as a floor when judging a
/// real model's accuracy.
#[derive(Debug, Default)]
pub struct ZeroR {
    majority: Option<Value>,
    n_attributes: usize,
}

impl ZeroR {
    pub fn new() -> Self {
        Self::default()
    }

    /// Counts class labels and stores the most frequent one. Exact ties
    /// resolve to the lowest class code, like the tree's majority votes.
    pub fn fit(&mut self, dataset: &Dataset) -> Result<(), ModelError> {
        if dataset.is_empty() {
            return Err(ModelError::EmptyDataset);
        }
        let attributes = dataset.attributes();
        let class = &attributes[dataset.class_index()];
        if class.kind() != AttributeType::Nominal {
            return Err(ModelError::UnsupportedClassAttribute(
                class.name().to_string(),
            ));
        }
        let domain = dataset.domain(class);
        if domain.is_empty() {
            return Err(ModelError::InvalidParameter(format!(
                "class attribute '{}' has no registered domain",
                class.name()
            )));
        }

        let mut counts = vec![0usize; domain.len()];
        for instance in dataset.instances() {
            if instance.values().len() != attributes.len() {
                return Err(ModelError::MalformedInstance {
                    expected: attributes.len(),
                    found: instance.values().len(),
                });
            }
            let label = dataset.class_value(instance);
            if let Some(code) = domain.iter().position(|value| value == label) {
                counts[code] += 1;
            }
        }

        let mut majority = None;
        let mut max = 0;
        for (code, &count) in counts.iter().enumerate() {
            if count > max {
                max = count;
                majority = Some(domain[code].clone());
            }
        }

        self.majority = majority;
        self.n_attributes = attributes.len();
        Ok(())
    }

    /// The stored majority class, regardless of the instance's values.
    /// `Ok(None)` only when no training row carried a known class label.
    pub fn predict(&self, instance: &Instance) -> Result<Option<Value>, ModelError> {
        if self.n_attributes == 0 {
            return Err(ModelError::NotFitted);
        }
        if instance.values().len() != self.n_attributes {
            return Err(ModelError::MalformedInstance {
                expected: self.n_attributes,
                found: instance.values().len(),
            });
        }
        Ok(self.majority.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::value::Attribute;

    fn dataset(labels: &[&str]) -> Dataset {
        let a = Attribute::new("a", AttributeType::Numeric);
        let class = Attribute::new("class", AttributeType::Nominal);
        let mut dataset = Dataset::new(vec![a, class.clone()]);
        dataset.set_domain(&class, vec![Value::nominal("yes"), Value::nominal("no")]);
        for (i, label) in labels.iter().enumerate() {
            dataset.add_instance(Instance::new(vec![
                Value::Numeric(i as f64),
                Value::nominal(*label),
            ]));
        }
        dataset
    }

    #[test]
    fn test_predicts_the_majority_class_for_any_instance() {
        let mut model = ZeroR::new();
        model.fit(&dataset(&["no", "yes", "no", "no"])).unwrap();
        let probe = Instance::new(vec![Value::Numeric(42.0), Value::Unknown]);
        assert_eq!(model.predict(&probe).unwrap(), Some(Value::nominal("no")));
        let masked = Instance::new(vec![Value::Unknown, Value::Unknown]);
        assert_eq!(model.predict(&masked).unwrap(), Some(Value::nominal("no")));
    }

    #[test]
    fn test_ties_resolve_to_the_lowest_class_code() {
        let mut model = ZeroR::new();
        model.fit(&dataset(&["no", "yes", "yes", "no"])).unwrap();
        let probe = Instance::new(vec![Value::Numeric(0.0), Value::Unknown]);
        assert_eq!(model.predict(&probe).unwrap(), Some(Value::nominal("yes")));
    }

    #[test]
    fn test_validation_errors() {
        let mut model = ZeroR::new();
        let probe = Instance::new(vec![Value::Numeric(0.0), Value::Unknown]);
        assert_eq!(model.predict(&probe), Err(ModelError::NotFitted));

        let empty = {
            let a = Attribute::new("a", AttributeType::Numeric);
            let class = Attribute::new("class", AttributeType::Nominal);
            Dataset::new(vec![a, class])
        };
        assert_eq!(model.fit(&empty), Err(ModelError::EmptyDataset));

        model.fit(&dataset(&["yes"])).unwrap();
        let short = Instance::new(vec![Value::Unknown]);
        assert_eq!(
            model.predict(&short),
            Err(ModelError::MalformedInstance {
                expected: 2,
                found: 1
            })
        );
    }
}
