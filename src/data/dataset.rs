use super::attribute::Schema;
use crate::error::TreeError;
use nalgebra::{DMatrix, DVector};
use rand::seq::SliceRandom;
use rand::{rngs::StdRng, SeedableRng};
use std::error::Error;
use std::fmt::{self, Debug, Formatter};
use std::sync::Arc;

/// Table of nominal instances sharing one schema.
///
/// Row `i` of `x` holds the attribute values of instance `i` (`None` marks a
/// missing value) and `y[i]` its class value.
#[derive(Clone)]
pub struct Dataset {
    schema: Arc<Schema>,
    pub x: DMatrix<Option<usize>>,
    pub y: DVector<Option<usize>>,
}

impl Debug for Dataset {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "Dataset {{\n    x: [\n")?;

        for i in 0..self.x.nrows() {
            write!(f, "        [")?;
            for j in 0..self.x.ncols() {
                let label = self.x[(i, j)].and_then(|v| self.schema.attribute(j).value(v));
                write!(f, "{}, ", label.unwrap_or("?"))?;
            }
            writeln!(f, "],")?;
        }

        write!(f, "    ],\n    y: [")?;
        for i in 0..self.y.len() {
            let label = self.y[i].and_then(|v| self.schema.class_attribute().value(v));
            write!(f, "{}, ", label.unwrap_or("?"))?;
        }
        write!(f, "]\n}}")
    }
}

impl Dataset {
    pub fn new(schema: Arc<Schema>, x: DMatrix<Option<usize>>, y: DVector<Option<usize>>) -> Self {
        Self { schema, x, y }
    }

    /// Builds a dataset from row-major value codes.
    ///
    /// # Errors
    ///
    /// Returns an error if a row does not have one value per schema attribute
    /// or if the number of rows and class values differ.
    pub fn from_rows(
        schema: Arc<Schema>,
        rows: Vec<Vec<Option<usize>>>,
        classes: Vec<Option<usize>>,
    ) -> Result<Self, TreeError> {
        if rows.len() != classes.len() {
            return Err(TreeError::InvalidParameter(format!(
                "{} rows were given with {} class values.",
                rows.len(),
                classes.len()
            )));
        }
        let ncols = schema.num_attributes();
        if let Some(row) = rows.iter().find(|row| row.len() != ncols) {
            return Err(TreeError::InstanceShape {
                expected: ncols,
                found: row.len(),
            });
        }

        let x = DMatrix::from_fn(rows.len(), ncols, |i, j| rows[i][j]);
        let y = DVector::from_vec(classes);
        Ok(Self::new(schema, x, y))
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    pub fn shared_schema(&self) -> Arc<Schema> {
        Arc::clone(&self.schema)
    }

    pub fn is_not_empty(&self) -> bool {
        !self.y.is_empty()
    }

    pub fn nrows(&self) -> usize {
        self.y.len()
    }

    /// Attribute values of instance `index`.
    pub fn instance(&self, index: usize) -> Vec<Option<usize>> {
        self.x.row(index).iter().cloned().collect()
    }

    pub fn class_value(&self, index: usize) -> Option<usize> {
        self.y[index]
    }

    /// Iterates over `(attribute values, class value)` pairs in row order.
    pub fn iter(&self) -> impl Iterator<Item = (Vec<Option<usize>>, Option<usize>)> + '_ {
        (0..self.nrows()).map(move |i| (self.instance(i), self.y[i]))
    }

    /// Fresh dataset holding the given rows, in the given order.
    pub fn select(&self, indices: &[usize]) -> Self {
        Self::new(
            self.shared_schema(),
            self.x.select_rows(indices),
            self.y.select_rows(indices),
        )
    }

    /// Copy without the instances whose value on `attribute` is missing.
    pub fn without_missing(&self, attribute: usize) -> Self {
        let kept = (0..self.nrows())
            .filter(|&i| self.x[(i, attribute)].is_some())
            .collect::<Vec<_>>();
        self.select(&kept)
    }

    /// Copy without the instances whose class value is missing.
    pub fn without_missing_class(&self) -> Self {
        let kept = (0..self.nrows())
            .filter(|&i| self.y[i].is_some())
            .collect::<Vec<_>>();
        self.select(&kept)
    }

    /// Known class values in row order. Rows with a missing class are skipped,
    /// so the result lines up with the rows only after
    /// [`Dataset::without_missing_class`].
    pub fn known_classes(&self) -> DVector<usize> {
        DVector::from_iterator(
            self.y.iter().flatten().count(),
            self.y.iter().flatten().cloned(),
        )
    }

    /// Number of instances of each class. Missing class values are not counted.
    pub fn class_counts(&self) -> DVector<f64> {
        let mut counts = DVector::zeros(self.schema.num_classes());
        for class in self.y.iter().flatten() {
            counts[*class] += 1.0;
        }
        counts
    }

    /// Splits the dataset by the values of `attribute`.
    ///
    /// Returns `V + 1` buckets for an attribute with `V` values: bucket `v`
    /// holds the instances with value `v` and bucket `V` the instances
    /// missing the attribute. Every instance lands in exactly one bucket and
    /// keeps its relative order.
    ///
    /// # Panics
    ///
    /// Panics if a value code on `attribute` is outside the attribute's
    /// domain, or if `x` has fewer rows than `y`. Datasets accepted by
    /// [`check_capabilities`](crate::trees::classifier::check_capabilities)
    /// never do.
    pub fn partition(&self, attribute: usize) -> Vec<Self> {
        let num_values = self.schema.attribute(attribute).num_values();
        let mut buckets = vec![Vec::new(); num_values + 1];
        for i in 0..self.nrows() {
            let bucket = self.x[(i, attribute)].unwrap_or(num_values);
            buckets[bucket].push(i);
        }

        buckets
            .iter()
            .map(|indices| self.select(indices))
            .collect()
    }

    pub fn train_test_split(
        &self,
        train_size: f64,
        seed: Option<u64>,
    ) -> Result<(Self, Self), Box<dyn Error>> {
        if !(0.0..=1.0).contains(&train_size) {
            return Err("Train size should be between 0.0 and 1.0".into());
        }
        let mut rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        let mut indices = (0..self.nrows()).collect::<Vec<_>>();
        indices.shuffle(&mut rng);
        let train_size = (self.nrows() as f64 * train_size).floor() as usize;
        let (train_indices, test_indices) = indices.split_at(train_size);

        Ok((self.select(train_indices), self.select(test_indices)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::attribute::Attribute;
    use approx::assert_relative_eq;

    fn schema() -> Arc<Schema> {
        Arc::new(Schema::new(
            vec![
                Attribute::from_labels("Weather", &["Sunny", "Rainy", "Cloudy"]),
                Attribute::from_labels("Wind", &["Weak", "Strong"]),
            ],
            Attribute::from_labels("Play", &["Yes", "No"]),
        ))
    }

    fn dataset() -> Dataset {
        Dataset::from_rows(
            schema(),
            vec![
                vec![Some(0), Some(0)],
                vec![None, Some(1)],
                vec![Some(1), None],
                vec![Some(0), Some(1)],
                vec![Some(2), Some(0)],
                vec![None, Some(0)],
            ],
            vec![Some(0), Some(1), Some(1), Some(0), None, Some(0)],
        )
        .unwrap()
    }

    #[test]
    fn test_dataset_from_rows() {
        let dataset = dataset();
        assert_eq!(dataset.nrows(), 6);
        assert_eq!(dataset.x.ncols(), 2);
        assert_eq!(dataset.instance(1), vec![None, Some(1)]);
        assert_eq!(dataset.class_value(4), None);
        assert!(dataset.is_not_empty());
    }

    #[test]
    fn test_dataset_from_rows_rejects_ragged_rows() {
        let result = Dataset::from_rows(schema(), vec![vec![Some(0)]], vec![Some(0)]);
        assert_eq!(
            result.unwrap_err(),
            TreeError::InstanceShape {
                expected: 2,
                found: 1
            }
        );
    }

    #[test]
    fn test_dataset_from_rows_rejects_class_count_mismatch() {
        let result = Dataset::from_rows(schema(), vec![vec![Some(0), Some(1)]], vec![]);
        assert!(matches!(result, Err(TreeError::InvalidParameter(_))));
    }

    #[test]
    fn test_dataset_empty() {
        let empty = Dataset::from_rows(schema(), vec![], vec![]).unwrap();
        assert!(!empty.is_not_empty());
        assert_eq!(empty.nrows(), 0);
        assert_eq!(empty.x.ncols(), 2);
        assert_eq!(empty.iter().count(), 0);
    }

    #[test]
    fn test_dataset_formatting() {
        let dataset = dataset().select(&[0, 1]);
        let expected_str = "\
Dataset {
    x: [
        [Sunny, Weak, ],
        [?, Strong, ],
    ],
    y: [Yes, No, ]
}";
        assert_eq!(format!("{:?}", dataset), expected_str);
    }

    #[test]
    fn test_dataset_iter_preserves_order() {
        let rows = dataset().iter().collect::<Vec<_>>();
        assert_eq!(rows.len(), 6);
        assert_eq!(rows[2], (vec![Some(1), None], Some(1)));
        assert_eq!(rows[5], (vec![None, Some(0)], Some(0)));
    }

    #[test]
    fn test_dataset_class_counts_skip_missing_class() {
        let counts = dataset().class_counts();
        assert_relative_eq!(counts[0], 3.0);
        assert_relative_eq!(counts[1], 2.0);
    }

    #[test]
    fn test_dataset_without_missing() {
        let dataset = dataset();
        let known_weather = dataset.without_missing(0);
        assert_eq!(known_weather.nrows(), 4);
        assert!(known_weather.x.column(0).iter().all(Option::is_some));

        let known_class = dataset.without_missing_class();
        assert_eq!(known_class.nrows(), 5);
        assert!(known_class.y.iter().all(Option::is_some));
        assert_eq!(
            known_class.known_classes(),
            DVector::from_vec(vec![0, 1, 1, 0, 0])
        );
    }

    #[test]
    fn test_dataset_partition_is_complete_and_disjoint() {
        let dataset = dataset();
        let buckets = dataset.partition(0);

        assert_eq!(buckets.len(), 4);
        assert_eq!(buckets[0].nrows(), 2);
        assert_eq!(buckets[1].nrows(), 1);
        assert_eq!(buckets[2].nrows(), 1);
        assert_eq!(buckets[3].nrows(), 2);
        assert_eq!(
            buckets.iter().map(Dataset::nrows).sum::<usize>(),
            dataset.nrows()
        );

        for (value, bucket) in buckets.iter().take(3).enumerate() {
            assert!(bucket.x.column(0).iter().all(|v| *v == Some(value)));
        }
        assert!(buckets[3].x.column(0).iter().all(Option::is_none));
    }

    #[test]
    fn test_dataset_partition_preserves_relative_order() {
        let buckets = dataset().partition(0);
        assert_eq!(buckets[0].instance(0), vec![Some(0), Some(0)]);
        assert_eq!(buckets[0].instance(1), vec![Some(0), Some(1)]);
        assert_eq!(buckets[3].instance(0), vec![None, Some(1)]);
        assert_eq!(buckets[3].instance(1), vec![None, Some(0)]);
    }

    #[test]
    #[should_panic]
    fn test_dataset_partition_panics_on_out_of_domain_code() {
        let dataset = Dataset::from_rows(schema(), vec![vec![Some(5), Some(0)]], vec![Some(0)]).unwrap();
        dataset.partition(0);
    }

    #[test]
    fn test_dataset_partition_of_empty_dataset() {
        let empty = Dataset::from_rows(schema(), vec![], vec![]).unwrap();
        let buckets = empty.partition(1);
        assert_eq!(buckets.len(), 3);
        assert!(buckets.iter().all(|bucket| bucket.nrows() == 0));
    }

    #[test]
    fn test_dataset_train_test_split() {
        let (train_dataset, test_dataset) = dataset().train_test_split(0.5, Some(7)).unwrap();
        assert_eq!(train_dataset.nrows(), 3);
        assert_eq!(test_dataset.nrows(), 3);
        assert_eq!(train_dataset.x.ncols(), 2);
    }

    #[test]
    fn test_dataset_train_test_split_rejects_bad_size() {
        assert!(dataset().train_test_split(1.5, None).is_err());
    }
}
