use crate::data::dataset::Instance;
use crate::trees::index::DatasetIndex;
use crate::trees::info;

/// Finds the binary threshold on one numeric attribute that minimizes the
/// weighted entropy of the two resulting groups.
///
/// Instances are sorted once by the attribute (rows with a missing value
/// group first and are excluded via the first-known offset), then a single
/// sweep advances the split point one distinct-value group at a time while
/// the class-count matrix is updated incrementally. Equal attribute values
/// always stay on the same side of the split.
pub struct ContinuousSplit<'a> {
    instances: &'a [Instance],
    order: Vec<usize>,
    attribute_index: usize,
    classes_entropy: f64,
    known_start: usize,
    best_pos: usize,
    min_entropy: f64,
    empty: bool,
    valid: bool,
}

impl<'a> ContinuousSplit<'a> {
    pub fn new(
        index: &DatasetIndex,
        instances: &'a [Instance],
        attribute_index: usize,
        classes_entropy: f64,
    ) -> Self {
        let mut order = (0..instances.len()).collect::<Vec<_>>();
        order.sort_by(|&a, &b| {
            instances[a]
                .value_at(attribute_index)
                .compare(instances[b].value_at(attribute_index))
        });
        let known_start = order
            .iter()
            .position(|&i| !instances[i].value_at(attribute_index).is_unknown())
            .unwrap_or(instances.len());

        let mut split = Self {
            instances,
            order,
            attribute_index,
            classes_entropy,
            known_start,
            best_pos: 0,
            min_entropy: 0.0,
            empty: false,
            valid: false,
        };
        split.sweep(index);
        split
    }

    /// The placeholder returned when no numeric attribute produces a useful
    /// split.
    pub fn empty() -> Self {
        Self {
            instances: &[],
            order: Vec::new(),
            attribute_index: 0,
            classes_entropy: 0.0,
            known_start: 0,
            best_pos: 0,
            min_entropy: 0.0,
            empty: true,
            valid: false,
        }
    }

    fn sweep(&mut self, index: &DatasetIndex) {
        let len = self.order.len();
        if self.known_start >= len {
            return;
        }

        // First candidate boundary: after the group of lowest values.
        let mut split_pos = self.known_start;
        let first = self.numeric_at(self.known_start);
        while split_pos + 1 < len && self.numeric_at(split_pos + 1) == first {
            split_pos += 1;
        }

        let n_classes = index.n_classes();
        let mut dist = [vec![0usize; n_classes], vec![0usize; n_classes]];
        for pos in self.known_start..len {
            if let Some(code) = index.class_code(&self.instances[self.order[pos]]) {
                let side = usize::from(pos > split_pos);
                dist[side][code] += 1;
            }
        }

        self.min_entropy = self.sides_entropy(&dist, split_pos);
        self.best_pos = split_pos;
        self.valid = true;

        let mut k = split_pos + 1;
        while k < len {
            let group = self.numeric_at(k);
            // Equal values move to the left side together.
            while k < len && self.numeric_at(k) == group {
                split_pos += 1;
                if let Some(code) = index.class_code(&self.instances[self.order[split_pos]]) {
                    dist[0][code] += 1;
                    dist[1][code] -= 1;
                }
                k += 1;
            }
            if k >= len {
                break;
            }
            let current = self.sides_entropy(&dist, split_pos);
            if current < self.min_entropy {
                self.min_entropy = current;
                self.best_pos = split_pos;
            }
        }
    }

    fn sides_entropy(&self, dist: &[Vec<usize>; 2], split_pos: usize) -> f64 {
        let num_before = split_pos + 1 - self.known_start;
        let num_after = self.order.len() - split_pos - 1;
        let entropies = [
            info::entropy_counts(&dist[0], num_before),
            info::entropy_counts(&dist[1], num_after),
        ];
        info::weighted_average(
            &entropies,
            &[num_before as f64, num_after as f64],
            (num_before + num_after) as f64,
        )
    }

    fn numeric_at(&self, pos: usize) -> f64 {
        // Positions at or past known_start always carry numeric payloads.
        self.instances[self.order[pos]]
            .value_at(self.attribute_index)
            .as_f64()
            .unwrap_or(f64::NAN)
    }

    /// Gain ratio of the best boundary found, 0 when no boundary exists or
    /// one side would be empty.
    pub fn gain_ratio(&self) -> f64 {
        if !self.valid {
            return 0.0;
        }
        let num_before = self.best_pos + 1 - self.known_start;
        let num_after = self.order.len() - self.best_pos - 1;
        let split_information = info::entropy_counts(&[num_before, num_after], num_before + num_after);
        if split_information > 0.0 {
            (self.classes_entropy - self.min_entropy) / split_information
        } else {
            0.0
        }
    }

    /// The threshold: midpoint of the values around the best boundary, or
    /// the last value when the boundary sits at the end.
    pub fn split_value(&self) -> f64 {
        if !self.valid {
            return 0.0;
        }
        if self.best_pos + 1 < self.order.len() {
            (self.numeric_at(self.best_pos) + self.numeric_at(self.best_pos + 1)) / 2.0
        } else {
            self.numeric_at(self.order.len() - 1)
        }
    }

    pub fn attribute_index(&self) -> usize {
        self.attribute_index
    }

    pub fn is_empty(&self) -> bool {
        self.empty
    }
}

/// Scans every numeric attribute and returns the split with the highest
/// gain ratio, or the empty split when none improves on zero gain.
pub fn best_numeric<'a>(
    index: &DatasetIndex,
    instances: &'a [Instance],
    classes_entropy: f64,
) -> ContinuousSplit<'a> {
    let mut best = ContinuousSplit::empty();
    let mut max = 0.0;
    for &i in index.numeric_indices() {
        let current = ContinuousSplit::new(index, instances, i, classes_entropy);
        let ratio = current.gain_ratio();
        if ratio > max {
            max = ratio;
            best = current;
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use crate::data::dataset::Dataset;
    use crate::data::value::{Attribute, AttributeType, Value};

    fn numeric_dataset(values: &[(Value, &str)]) -> (DatasetIndex, Vec<Instance>) {
        let width = Attribute::new("width", AttributeType::Numeric);
        let class = Attribute::new("class", AttributeType::Nominal);
        let mut dataset = Dataset::new(vec![width, class.clone()]);
        dataset.set_domain(&class, vec![Value::nominal("neg"), Value::nominal("pos")]);
        for (value, label) in values {
            dataset.add_instance(Instance::new(vec![value.clone(), Value::nominal(*label)]));
        }
        let index = DatasetIndex::new(&dataset);
        let instances = dataset.instances().to_vec();
        (index, instances)
    }

    #[test]
    fn test_midpoint_split_on_separable_data() {
        let (index, instances) = numeric_dataset(&[
            (Value::Numeric(1.0), "neg"),
            (Value::Numeric(2.0), "neg"),
            (Value::Numeric(3.0), "pos"),
            (Value::Numeric(4.0), "pos"),
        ]);
        let split = ContinuousSplit::new(&index, &instances, 0, 1.0);
        assert_relative_eq!(split.split_value(), 2.5, epsilon = 1e-9);
        assert_relative_eq!(split.gain_ratio(), 1.0, epsilon = 1e-9);
        assert_eq!(split.attribute_index(), 0);
        assert!(!split.is_empty());
    }

    #[test]
    fn test_sweep_is_order_independent() {
        let (index, instances) = numeric_dataset(&[
            (Value::Numeric(4.0), "pos"),
            (Value::Numeric(1.0), "neg"),
            (Value::Numeric(3.0), "pos"),
            (Value::Numeric(2.0), "neg"),
        ]);
        let split = ContinuousSplit::new(&index, &instances, 0, 1.0);
        assert_relative_eq!(split.split_value(), 2.5, epsilon = 1e-9);
    }

    #[test]
    fn test_equal_values_stay_together() {
        // The best boundary in class terms would fall between the two 2.0
        // rows; equal values must not be separated.
        let (index, instances) = numeric_dataset(&[
            (Value::Numeric(1.0), "neg"),
            (Value::Numeric(2.0), "neg"),
            (Value::Numeric(2.0), "pos"),
            (Value::Numeric(3.0), "pos"),
        ]);
        let split = ContinuousSplit::new(&index, &instances, 0, 1.0);
        let threshold = split.split_value();
        assert!(threshold == 1.5 || threshold == 2.5);
    }

    #[test]
    fn test_unknown_values_are_excluded() {
        let (index, instances) = numeric_dataset(&[
            (Value::Unknown, "pos"),
            (Value::Numeric(1.0), "neg"),
            (Value::Numeric(2.0), "neg"),
            (Value::Numeric(3.0), "pos"),
            (Value::Numeric(4.0), "pos"),
        ]);
        let split = ContinuousSplit::new(&index, &instances, 0, 1.0);
        assert_relative_eq!(split.split_value(), 2.5, epsilon = 1e-9);
        assert!(split.gain_ratio() > 0.9);
    }

    #[test]
    fn test_constant_attribute_has_no_gain() {
        let (index, instances) = numeric_dataset(&[
            (Value::Numeric(5.0), "neg"),
            (Value::Numeric(5.0), "pos"),
        ]);
        let split = ContinuousSplit::new(&index, &instances, 0, 1.0);
        assert_eq!(split.gain_ratio(), 0.0);
    }

    #[test]
    fn test_all_unknown_has_no_gain() {
        let (index, instances) = numeric_dataset(&[
            (Value::Unknown, "neg"),
            (Value::Unknown, "pos"),
        ]);
        let split = ContinuousSplit::new(&index, &instances, 0, 1.0);
        assert_eq!(split.gain_ratio(), 0.0);
        assert_eq!(split.split_value(), 0.0);
    }

    #[test]
    fn test_gain_ratio_bounds() {
        let (index, instances) = numeric_dataset(&[
            (Value::Numeric(1.0), "neg"),
            (Value::Numeric(2.0), "pos"),
            (Value::Numeric(3.0), "neg"),
            (Value::Numeric(4.0), "pos"),
        ]);
        let split = ContinuousSplit::new(&index, &instances, 0, 1.0);
        let ratio = split.gain_ratio();
        assert!((0.0..=1.0 + 1e-9).contains(&ratio));
    }

    #[test]
    fn test_best_numeric_prefers_the_informative_attribute() {
        let width = Attribute::new("width", AttributeType::Numeric);
        let noise = Attribute::new("noise", AttributeType::Numeric);
        let class = Attribute::new("class", AttributeType::Nominal);
        let mut dataset = Dataset::new(vec![width, noise, class.clone()]);
        dataset.set_domain(&class, vec![Value::nominal("neg"), Value::nominal("pos")]);
        let rows = [
            (1.0, 7.0, "neg"),
            (2.0, 3.0, "neg"),
            (3.0, 8.0, "pos"),
            (4.0, 3.5, "pos"),
        ];
        for (w, n, label) in rows {
            dataset.add_instance(Instance::new(vec![
                Value::Numeric(w),
                Value::Numeric(n),
                Value::nominal(label),
            ]));
        }
        let index = DatasetIndex::new(&dataset);
        let best = best_numeric(&index, dataset.instances(), 1.0);
        assert!(!best.is_empty());
        assert_eq!(best.attribute_index(), 0);
        assert_relative_eq!(best.split_value(), 2.5, epsilon = 1e-9);
    }

    #[test]
    fn test_best_numeric_is_empty_without_numeric_attributes() {
        let a = Attribute::new("a", AttributeType::Nominal);
        let class = Attribute::new("class", AttributeType::Nominal);
        let mut dataset = Dataset::new(vec![a.clone(), class.clone()]);
        dataset.set_domain(&a, vec![Value::nominal("x")]);
        dataset.set_domain(&class, vec![Value::nominal("yes")]);
        let index = DatasetIndex::new(&dataset);
        let best = best_numeric(&index, dataset.instances(), 0.0);
        assert!(best.is_empty());
        assert_eq!(best.gain_ratio(), 0.0);
    }
}
