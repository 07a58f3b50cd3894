//! Decision Tree Classifier
use std::fmt::{self, Display, Formatter};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use rayon::iter::{IntoParallelRefIterator, ParallelIterator};

use crate::data::dataset::{Dataset, Instance};
use crate::data::value::{AttributeType, Value};
use crate::trees::condition::{Condition, Operator};
use crate::trees::index::DatasetIndex;
use crate::trees::node::{NodeKind, TreeNode};
use crate::trees::nominal::NominalInfo;
use crate::trees::numeric::{best_numeric, ContinuousSplit};
use crate::ModelError;

/// A cloneable flag for aborting a running fit or prediction from another
/// thread.
///
/// Both engines poll the flag at recursion and loop boundaries and unwind
/// with [`ModelError::Cancelled`]; nothing is retried, a caller that aborted
/// a fit discards the classifier and starts over.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// A decision tree classifier with elements from ID3 and C4.5.
///
/// Attributes compete for each split by gain ratio. Nominal attributes
/// produce one branch per domain value and are used at most once per path;
/// numeric attributes produce binary threshold branches and may be reused at
/// different depths with different thresholds. Training rows missing a value
/// at a split attribute are cloned into every branch with their weight scaled
/// by the branch's reach; instances missing a tested value at prediction
/// time are labeled with the branch's majority class. Nominal splits win
/// exact gain-ratio ties, which keeps training deterministic.
pub struct DecisionTreeClassifier {
    root: Option<TreeNode>,
    index: Option<DatasetIndex>,
    cancel: CancelToken,
}

impl Default for DecisionTreeClassifier {
    fn default() -> Self {
        Self::new()
    }
}

impl DecisionTreeClassifier {
    pub fn new() -> Self {
        Self {
            root: None,
            index: None,
            cancel: CancelToken::new(),
        }
    }

    /// A handle for cancelling this classifier's work from another thread.
    pub fn cancel_token(&self) -> CancelToken {
        self.cancel.clone()
    }

    /// The induced tree, if the classifier was fitted.
    pub fn tree(&self) -> Option<&TreeNode> {
        self.root.as_ref()
    }

    /// Builds the tree from a dataset.
    ///
    /// The dataset must be non-empty, carry at least two attributes (class
    /// included), a nominal class attribute with a registered domain, and
    /// instance vectors matching the attribute count. Violations are
    /// rejected before any tree construction starts.
    ///
    /// # Errors
    ///
    /// Returns a validation error for a malformed dataset, or
    /// [`ModelError::Cancelled`] if the cancel token tripped mid-build (the
    /// partial tree is discarded).
    pub fn fit(&mut self, dataset: &Dataset) -> Result<(), ModelError> {
        let attributes = dataset.attributes();
        if attributes.len() < 2 {
            return Err(ModelError::TooFewAttributes(attributes.len()));
        }
        if dataset.is_empty() {
            return Err(ModelError::EmptyDataset);
        }
        let class = &attributes[dataset.class_index()];
        if class.kind() != AttributeType::Nominal {
            return Err(ModelError::UnsupportedClassAttribute(
                class.name().to_string(),
            ));
        }
        if dataset.domain(class).is_empty() {
            return Err(ModelError::InvalidParameter(format!(
                "class attribute '{}' has no registered domain",
                class.name()
            )));
        }
        for instance in dataset.instances() {
            if instance.values().len() != attributes.len() {
                return Err(ModelError::MalformedInstance {
                    expected: attributes.len(),
                    found: instance.values().len(),
                });
            }
        }

        let index = DatasetIndex::new(dataset);
        let mut used = vec![false; index.n_attributes()];
        used[index.class_index()] = true;
        let instances = dataset.instances().to_vec();

        // The root has no parent to inherit a majority from. Seeding the
        // fallback with the training set's majority keeps the tree labeled
        // even when no attribute offers an informative root split.
        let info = NominalInfo::new(&index, &instances, &used);
        let fallback = info.majority_class().cloned().unwrap_or(Value::Unknown);
        match build(&index, &self.cancel, instances, used, fallback) {
            Ok(kind) => {
                self.root = Some(TreeNode::new(None, kind));
                self.index = Some(index);
                Ok(())
            }
            Err(err) => {
                self.root = None;
                self.index = None;
                Err(err)
            }
        }
    }

    /// Labels a single instance.
    ///
    /// Returns `Ok(None)` when no branch matches; the constructed branches
    /// are exhaustive, so this is a defensive outcome.
    ///
    /// # Errors
    ///
    /// [`ModelError::NotFitted`] before a successful `fit`,
    /// [`ModelError::MalformedInstance`] when the vector length doesn't
    /// match the training attributes, [`ModelError::Cancelled`] when the
    /// token trips mid-walk.
    pub fn predict(&self, instance: &Instance) -> Result<Option<Value>, ModelError> {
        let (root, index) = match (&self.root, &self.index) {
            (Some(root), Some(index)) => (root, index),
            _ => return Err(ModelError::NotFitted),
        };
        if instance.values().len() != index.n_attributes() {
            return Err(ModelError::MalformedInstance {
                expected: index.n_attributes(),
                found: instance.values().len(),
            });
        }
        self.classify(instance, root)
    }

    /// Labels a batch of instances in parallel.
    pub fn predict_batch(
        &self,
        instances: &[Instance],
    ) -> Result<Vec<Option<Value>>, ModelError> {
        instances
            .par_iter()
            .map(|instance| self.predict(instance))
            .collect()
    }

    fn classify(
        &self,
        instance: &Instance,
        node: &TreeNode,
    ) -> Result<Option<Value>, ModelError> {
        match &node.kind {
            NodeKind::Leaf { label, .. } => Ok(Some(label.clone())),
            NodeKind::Internal { children } => {
                for child in children {
                    if self.cancel.is_cancelled() {
                        return Err(ModelError::Cancelled);
                    }
                    let condition = match &child.condition {
                        Some(condition) => condition,
                        None => continue,
                    };
                    let value = instance.value_at(condition.attribute_index());
                    if value.is_unknown() {
                        return Ok(Some(condition.majority_class().clone()));
                    }
                    if condition.holds(value) {
                        return self.classify(instance, child);
                    }
                }
                Ok(None)
            }
        }
    }
}

impl Display for DecisionTreeClassifier {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        writeln!(f, "=== Tree ===")?;
        if let Some(root) = &self.root {
            write!(f, "{}", root)?;
        }
        Ok(())
    }
}

fn build(
    index: &DatasetIndex,
    cancel: &CancelToken,
    instances: Vec<Instance>,
    mut used: Vec<bool>,
    fallback: Value,
) -> Result<NodeKind, ModelError> {
    if cancel.is_cancelled() {
        return Err(ModelError::Cancelled);
    }
    // Empty partitions inherit the majority of the subset they were carved
    // from, not the global one.
    if instances.is_empty() {
        return Ok(NodeKind::Leaf {
            label: fallback,
            count: 0,
        });
    }
    let first_class = index.class_of(&instances[0]).clone();
    if instances
        .iter()
        .all(|instance| index.class_of(instance) == &first_class)
    {
        return Ok(NodeKind::Leaf {
            label: first_class,
            count: instances.len(),
        });
    }

    let count = instances.len();
    let mut conditions = children_conditions(index, &instances, &mut used);
    if conditions.is_empty() {
        // No informative split left; majority vote settles the subset.
        return Ok(NodeKind::Leaf {
            label: fallback,
            count,
        });
    }

    let partitions = distribute(instances, &mut conditions);
    let mut children = Vec::with_capacity(conditions.len());
    for (condition, partition) in conditions.into_iter().zip(partitions) {
        let child_fallback = condition.majority_class().clone();
        let kind = build(index, cancel, partition, used.clone(), child_fallback)?;
        children.push(TreeNode::new(Some(condition), kind));
    }
    Ok(NodeKind::Internal { children })
}

/// Selects the best split over the subset and materializes one condition per
/// branch. A chosen nominal attribute is marked used; numeric attributes
/// never are.
fn children_conditions(
    index: &DatasetIndex,
    instances: &[Instance],
    used: &mut [bool],
) -> Vec<Condition> {
    let info = NominalInfo::new(index, instances, used);
    let numeric = best_numeric(index, instances, info.classes_entropy());
    if info.is_empty() && numeric.is_empty() {
        return Vec::new();
    }
    let majority = match info.majority_class() {
        Some(majority) => majority.clone(),
        None => return Vec::new(),
    };
    match best_nominal_index(index, &info, used) {
        None if numeric.is_empty() => Vec::new(),
        Some(i) if numeric.is_empty() || info.gain_ratio(i) >= numeric.gain_ratio() => {
            used[i] = true;
            nominal_conditions(index, i, majority)
        }
        _ => numeric_conditions(index, &numeric, majority),
    }
}

/// The not-yet-used nominal attribute with the highest positive gain ratio.
fn best_nominal_index(
    index: &DatasetIndex,
    info: &NominalInfo,
    used: &[bool],
) -> Option<usize> {
    let mut best = None;
    let mut max = 0.0;
    for &i in index.nominal_indices() {
        if used[i] {
            continue;
        }
        let ratio = info.gain_ratio(i);
        if ratio > max {
            max = ratio;
            best = Some(i);
        }
    }
    best
}

fn nominal_conditions(
    index: &DatasetIndex,
    attribute_index: usize,
    majority: Value,
) -> Vec<Condition> {
    let attribute = index.attribute(attribute_index);
    index
        .domain(attribute_index)
        .iter()
        .map(|value| {
            Condition::new(
                attribute.clone(),
                attribute_index,
                value.clone(),
                Operator::Eq,
                majority.clone(),
            )
        })
        .collect()
}

fn numeric_conditions(
    index: &DatasetIndex,
    split: &ContinuousSplit<'_>,
    majority: Value,
) -> Vec<Condition> {
    let attribute_index = split.attribute_index();
    let attribute = index.attribute(attribute_index);
    let threshold = Value::Numeric(split.split_value());
    vec![
        Condition::new(
            attribute.clone(),
            attribute_index,
            threshold.clone(),
            Operator::Lte,
            majority.clone(),
        ),
        Condition::new(
            attribute.clone(),
            attribute_index,
            threshold,
            Operator::Gt,
            majority,
        ),
    ]
}

/// Partitions a subset across the branch conditions, which all test the same
/// attribute.
///
/// Instances with a known value move whole into the first branch whose
/// condition they satisfy. Each condition's reach is then the fraction of
/// those known instances its branch received, and every instance with a
/// missing value is cloned into all branches with its weight scaled by the
/// branch's reach, so the clones' weights sum back to the original weight.
fn distribute(instances: Vec<Instance>, conditions: &mut [Condition]) -> Vec<Vec<Instance>> {
    let mut partitions: Vec<Vec<Instance>> = conditions.iter().map(|_| Vec::new()).collect();
    if conditions.is_empty() {
        return partitions;
    }
    let attribute_index = conditions[0].attribute_index();
    let mut unknown = Vec::new();
    let mut total_known = 0usize;

    for instance in instances {
        if instance.value_at(attribute_index).is_unknown() {
            unknown.push(instance);
            continue;
        }
        let slot = conditions
            .iter()
            .position(|condition| condition.holds(instance.value_at(attribute_index)));
        // A known value matching no condition drops the instance.
        if let Some(slot) = slot {
            partitions[slot].push(instance);
            total_known += 1;
        }
    }

    for (condition, partition) in conditions.iter_mut().zip(&partitions) {
        let reach = if total_known > 0 {
            partition.len() as f64 / total_known as f64
        } else {
            0.0
        };
        condition.set_reach(reach);
    }

    for instance in unknown {
        for (condition, partition) in conditions.iter().zip(partitions.iter_mut()) {
            let mut copy = instance.clone();
            copy.set_weight(copy.weight() * condition.reach());
            partition.push(copy);
        }
    }
    partitions
}
