/// Nominal attribute with a fixed, ordered set of named values.
///
/// Values are referred to by their position in `values`, so an instance
/// stores `Some(i)` for the i-th label and `None` when the value is missing.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Attribute {
    name: String,
    values: Vec<String>,
}

impl Attribute {
    pub fn new<S: Into<String>>(name: S, values: Vec<String>) -> Self {
        Self {
            name: name.into(),
            values,
        }
    }

    /// Convenience constructor from string slices.
    pub fn from_labels(name: &str, labels: &[&str]) -> Self {
        Self::new(name, labels.iter().map(|label| label.to_string()).collect())
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn values(&self) -> &[String] {
        &self.values
    }

    pub fn num_values(&self) -> usize {
        self.values.len()
    }

    pub fn value(&self, index: usize) -> Option<&str> {
        self.values.get(index).map(String::as_str)
    }

    pub fn index_of(&self, label: &str) -> Option<usize> {
        self.values.iter().position(|value| value == label)
    }

    /// Appends `label` if it is not known yet and returns its index.
    pub(crate) fn intern(&mut self, label: &str) -> usize {
        match self.index_of(label) {
            Some(index) => index,
            None => {
                self.values.push(label.to_string());
                self.values.len() - 1
            }
        }
    }
}

/// Attributes shared by a dataset, its partitions and the trees built from it.
///
/// The position of an attribute in `attributes` is its stable index. The
/// class attribute is kept apart and never takes part in a split.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Schema {
    attributes: Vec<Attribute>,
    class_attribute: Attribute,
}

impl Schema {
    pub fn new(attributes: Vec<Attribute>, class_attribute: Attribute) -> Self {
        Self {
            attributes,
            class_attribute,
        }
    }

    pub fn attributes(&self) -> &[Attribute] {
        &self.attributes
    }

    pub fn attribute(&self, index: usize) -> &Attribute {
        &self.attributes[index]
    }

    pub fn num_attributes(&self) -> usize {
        self.attributes.len()
    }

    pub fn class_attribute(&self) -> &Attribute {
        &self.class_attribute
    }

    pub fn num_classes(&self) -> usize {
        self.class_attribute.num_values()
    }
}
