//! ID3 classifier with chi-square pre-pruning
use super::builder::TreeBuilder;
use super::node::TreeNode;
use super::params::TreeParams;
use super::printer::TreeDisplay;
use crate::data::attribute::Schema;
use crate::data::dataset::Dataset;
use crate::error::TreeError;
use crate::metrics::confusion::ClassificationMetrics;
use crate::stats::max_index;
use log::info;
use nalgebra::{DMatrix, DVector};
use rayon::iter::{IntoParallelIterator, ParallelIterator};
use std::fmt::{self, Display, Formatter};
use std::sync::Arc;

/// Decision tree classifier for nominal data.
///
/// The tree is grown with the ID3 information-gain criterion. A split is
/// dropped in favour of a leaf when a chi-square test cannot reject the
/// independence of the split attribute and the class at the configured
/// confidence level. Missing values are handled fractionally both when
/// training and when classifying.
#[derive(Clone, Debug)]
pub struct Id3ChiClassifier {
    root: Option<TreeNode>,
    schema: Option<Arc<Schema>>,
    tree_params: TreeParams,
}

impl Default for Id3ChiClassifier {
    fn default() -> Self {
        Self::new()
    }
}

impl ClassificationMetrics for Id3ChiClassifier {}

impl Id3ChiClassifier {
    /// Creates a new classifier with default parameters.
    pub fn new() -> Self {
        Self {
            root: None,
            schema: None,
            tree_params: TreeParams::new(),
        }
    }

    /// Creates a new classifier with custom parameters.
    ///
    /// # Arguments
    ///
    /// * `confidence_level` - Confidence of the chi-square test, 0.99 by default.
    /// * `min_bucket_size` - Buckets smaller than this count as small, 5 by default.
    /// * `max_small_bucket_ratio` - The test is skipped when this fraction of
    ///   buckets or more is small, 0.2 by default.
    ///
    /// # Errors
    ///
    /// Returns an error if any of the parameters is out of its range.
    pub fn with_params(
        confidence_level: Option<f64>,
        min_bucket_size: Option<usize>,
        max_small_bucket_ratio: Option<f64>,
    ) -> Result<Self, TreeError> {
        let mut classifier = Self::new();
        if let Some(level) = confidence_level {
            classifier.set_confidence_level(level)?;
        }
        if let Some(size) = min_bucket_size {
            classifier.set_min_bucket_size(size)?;
        }
        if let Some(ratio) = max_small_bucket_ratio {
            classifier.set_max_small_bucket_ratio(ratio)?;
        }
        Ok(classifier)
    }

    /// Trains a classifier on `dataset` at the given confidence level.
    pub fn build(dataset: &Dataset, confidence_level: f64) -> Result<Self, TreeError> {
        let mut classifier = Self::with_params(Some(confidence_level), None, None)?;
        classifier.fit(dataset)?;
        Ok(classifier)
    }

    pub fn set_confidence_level(&mut self, confidence_level: f64) -> Result<(), TreeError> {
        self.tree_params.set_confidence_level(confidence_level)
    }

    pub fn set_min_bucket_size(&mut self, min_bucket_size: usize) -> Result<(), TreeError> {
        self.tree_params.set_min_bucket_size(min_bucket_size)
    }

    pub fn set_max_small_bucket_ratio(&mut self, ratio: f64) -> Result<(), TreeError> {
        self.tree_params.set_max_small_bucket_ratio(ratio)
    }

    pub fn params(&self) -> &TreeParams {
        &self.tree_params
    }

    pub fn root(&self) -> Option<&TreeNode> {
        self.root.as_ref()
    }

    pub fn schema(&self) -> Option<&Schema> {
        self.schema.as_deref()
    }

    /// Builds the decision tree from a dataset.
    ///
    /// # Errors
    ///
    /// Fails before any node is built if the dataset does not satisfy
    /// [`check_capabilities`].
    pub fn fit(&mut self, dataset: &Dataset) -> Result<String, TreeError> {
        check_capabilities(dataset)?;

        let root = TreeBuilder::new(&self.tree_params).build(dataset);
        info!(
            "Built tree from {} instances: {} nodes, {} leaves, depth {}",
            dataset.nrows(),
            root.num_nodes(),
            root.num_leaves(),
            root.depth()
        );
        self.root = Some(root);
        self.schema = Some(dataset.shared_schema());
        Ok("Finished building the tree.".into())
    }

    /// Token-weighted class vector of `instance`, tolerating missing values.
    ///
    /// The vector is not normalized: on top of the fan-out over missing
    /// values, every branch taken scales the token by its mass ratio.
    pub fn token_distribution(&self, instance: &[Option<usize>]) -> Result<DVector<f64>, TreeError> {
        let (root, schema) = self.model()?;
        check_instance(schema, instance)?;
        root.token_distribution(schema, instance, 1.0)
    }

    /// Class index with the largest token weight, ties going to the lowest index.
    pub fn classify(&self, instance: &[Option<usize>]) -> Result<usize, TreeError> {
        self.token_distribution(instance)
            .map(|distribution| max_index(&distribution))
    }

    /// Name of the class [`Id3ChiClassifier::classify`] returns.
    pub fn classify_label(&self, instance: &[Option<usize>]) -> Result<&str, TreeError> {
        let class = self.classify(instance)?;
        let (_, schema) = self.model()?;
        Ok(schema.class_attribute().value(class).unwrap_or_default())
    }

    /// Stored class distribution of the leaf `instance` reaches.
    ///
    /// Every attribute tested on the way must be known; a missing one is a
    /// [`TreeError::UndefinedQuery`]. Use [`Id3ChiClassifier::classify`] or
    /// [`Id3ChiClassifier::token_distribution`] when values may be missing.
    pub fn class_distribution(&self, instance: &[Option<usize>]) -> Result<DVector<f64>, TreeError> {
        let (root, schema) = self.model()?;
        check_instance(schema, instance)?;
        root.strict_distribution(schema, instance).cloned()
    }

    /// Classifies every row of `features` with the token method.
    pub fn predict(&self, features: &DMatrix<Option<usize>>) -> Result<DVector<usize>, TreeError> {
        self.model()?;
        let predictions = (0..features.nrows())
            .into_par_iter()
            .map(|row| {
                let instance = features.row(row).iter().cloned().collect::<Vec<_>>();
                self.classify(&instance)
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(DVector::from_vec(predictions))
    }

    /// Text dump of the tree, one branch per line.
    pub fn render(&self) -> String {
        self.to_string()
    }

    fn model(&self) -> Result<(&TreeNode, &Schema), TreeError> {
        match (&self.root, &self.schema) {
            (Some(root), Some(schema)) => Ok((root, schema)),
            _ => Err(TreeError::NotFitted),
        }
    }
}

impl Display for Id3ChiClassifier {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self.model() {
            Ok((root, schema)) => write!(f, "Id3Chi\n\n{}", TreeDisplay::new(root, schema)),
            Err(_) => write!(f, "Id3Chi: No model built yet."),
        }
    }
}

/// Checks that `dataset` can be learned from.
///
/// Every attribute, the class included, needs at least two nominal values,
/// every stored value must be inside its attribute's domain, and no class
/// value may be missing. Datasets with missing class values can be cleaned
/// with [`Dataset::without_missing_class`] first.
pub fn check_capabilities(dataset: &Dataset) -> Result<(), TreeError> {
    let schema = dataset.schema();
    if dataset.x.ncols() != schema.num_attributes() {
        return Err(TreeError::SchemaMismatch {
            expected: schema.num_attributes(),
            found: dataset.x.ncols(),
        });
    }
    if dataset.x.nrows() != dataset.y.len() {
        return Err(TreeError::RowCountMismatch {
            rows: dataset.x.nrows(),
            classes: dataset.y.len(),
        });
    }

    let class_attribute = schema.class_attribute();
    for attribute in schema.attributes().iter().chain(Some(class_attribute)) {
        if attribute.num_values() < 2 {
            return Err(TreeError::TooFewValues {
                name: attribute.name().to_string(),
                num_values: attribute.num_values(),
            });
        }
    }

    for (index, attribute) in schema.attributes().iter().enumerate() {
        if let Some(value) = dataset
            .x
            .column(index)
            .iter()
            .flatten()
            .find(|&&value| value >= attribute.num_values())
        {
            return Err(out_of_range(attribute.name(), *value, attribute.num_values()));
        }
    }

    for (row, class) in dataset.y.iter().enumerate() {
        match class {
            None => return Err(TreeError::MissingClass(row)),
            Some(value) if *value >= class_attribute.num_values() => {
                return Err(out_of_range(
                    class_attribute.name(),
                    *value,
                    class_attribute.num_values(),
                ))
            }
            Some(_) => {}
        }
    }
    Ok(())
}

fn check_instance(schema: &Schema, instance: &[Option<usize>]) -> Result<(), TreeError> {
    if instance.len() != schema.num_attributes() {
        return Err(TreeError::InstanceShape {
            expected: schema.num_attributes(),
            found: instance.len(),
        });
    }
    Ok(())
}

fn out_of_range(attribute: &str, value: usize, num_values: usize) -> TreeError {
    TreeError::ValueOutOfRange {
        attribute: attribute.to_string(),
        value,
        num_values,
    }
}
