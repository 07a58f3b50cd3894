use std::collections::HashMap;

use crate::data::dataset::Instance;
use crate::data::value::Value;
use crate::trees::index::DatasetIndex;
use crate::trees::info;

/// Per-subset statistics for every nominal attribute that is still available
/// for splitting.
///
/// A single pass over the subset builds, for each candidate attribute, a
/// table mapping every domain value to a class-count vector. From the tables
/// the evaluator derives the subset's class entropy, its majority class and
/// the gain ratio of each candidate attribute. Instances whose class value is
/// missing are skipped by the scan.
pub struct NominalInfo {
    gain_ratios: Vec<f64>,
    classes_entropy: f64,
    majority: Option<Value>,
    empty: bool,
}

impl NominalInfo {
    /// `used` flags attributes already tested on the path from the root
    /// (class attribute included); those are not candidates.
    pub fn new(index: &DatasetIndex, instances: &[Instance], used: &[bool]) -> Self {
        let empty = index
            .nominal_indices()
            .iter()
            .filter(|&&i| used[i])
            .count()
            >= index.nominal_indices().len();

        let n_classes = index.n_classes();
        let class_index = index.class_index();

        // attribute -> value -> class-count vector, filled in one pass
        let mut stats: HashMap<usize, HashMap<&str, Vec<usize>>> = HashMap::new();
        for &i in index.nominal_indices() {
            if i == class_index || used[i] {
                continue;
            }
            let mut table = HashMap::new();
            for value in index.domain(i) {
                if let Value::Nominal(payload) = value {
                    table.insert(payload.as_str(), vec![0usize; n_classes]);
                }
            }
            stats.insert(i, table);
        }

        let mut class_counts = vec![0usize; n_classes];
        for instance in instances {
            let class_code = match index.class_code(instance) {
                Some(code) => code,
                None => continue,
            };
            class_counts[class_code] += 1;
            for (&i, table) in stats.iter_mut() {
                if let Value::Nominal(payload) = instance.value_at(i) {
                    if let Some(counts) = table.get_mut(payload.as_str()) {
                        counts[class_code] += 1;
                    }
                }
            }
        }

        let total = class_counts.iter().sum::<usize>();
        let classes_entropy = info::entropy_counts(&class_counts, total);

        // Majority class; exact ties resolve to the lowest class code.
        let mut majority = None;
        let mut max = 0;
        for (code, &count) in class_counts.iter().enumerate() {
            if count > max {
                max = count;
                majority = Some(index.domain(class_index)[code].clone());
            }
        }

        let mut gain_ratios = vec![0.0; index.n_attributes()];
        for (&i, table) in stats.iter() {
            gain_ratios[i] = Self::gain_ratio_of(index, i, table, classes_entropy);
        }

        Self {
            gain_ratios,
            classes_entropy,
            majority,
            empty,
        }
    }

    fn gain_ratio_of(
        index: &DatasetIndex,
        attribute_index: usize,
        table: &HashMap<&str, Vec<usize>>,
        classes_entropy: f64,
    ) -> f64 {
        let domain = index.domain(attribute_index);
        let mut value_counts = Vec::with_capacity(domain.len());
        let mut value_entropies = Vec::with_capacity(domain.len());
        let mut total = 0usize;
        // Domain order keeps the computation independent of hashing.
        for value in domain {
            let payload = match value {
                Value::Nominal(payload) => payload.as_str(),
                _ => continue,
            };
            let class_counts = match table.get(payload) {
                Some(counts) => counts,
                None => continue,
            };
            let count = class_counts.iter().sum::<usize>();
            total += count;
            value_entropies.push(info::entropy_counts(class_counts, count));
            value_counts.push(count as f64);
        }
        let weighted = info::weighted_average(&value_entropies, &value_counts, total as f64);
        let split_information = info::entropy(&value_counts, total as f64);
        if split_information > 0.0 {
            (classes_entropy - weighted) / split_information
        } else {
            // A single populated value carries no split information; the
            // attribute never competes.
            0.0
        }
    }

    /// Gain ratio of a candidate attribute; 0 for attributes out of range,
    /// already used or without split information.
    pub fn gain_ratio(&self, attribute_index: usize) -> f64 {
        if self.empty || attribute_index >= self.gain_ratios.len() {
            return 0.0;
        }
        self.gain_ratios[attribute_index]
    }

    /// Entropy of the subset's class distribution.
    pub fn classes_entropy(&self) -> f64 {
        self.classes_entropy
    }

    /// The most frequent class in the subset, or None for an empty subset.
    pub fn majority_class(&self) -> Option<&Value> {
        self.majority.as_ref()
    }

    /// True when every nominal attribute has already been used on the path.
    pub fn is_empty(&self) -> bool {
        self.empty
    }
}
