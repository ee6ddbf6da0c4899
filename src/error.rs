use thiserror::Error;

/// Errors raised while configuring, training or querying a tree.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TreeError {
    /// An attribute cannot be split on because it has fewer than two values.
    #[error("Attribute '{name}' has {num_values} nominal value(s), at least 2 are required.")]
    TooFewValues { name: String, num_values: usize },

    /// Training data contains an instance without a class value.
    #[error("Instance {0} has a missing class value.")]
    MissingClass(usize),

    /// A stored or queried value code is not part of the attribute's domain.
    #[error("Value {value} is out of range for attribute '{attribute}' with {num_values} values.")]
    ValueOutOfRange {
        attribute: String,
        value: usize,
        num_values: usize,
    },

    /// The data matrix does not have one column per schema attribute.
    #[error("Data has {found} attribute columns but the schema declares {expected}.")]
    SchemaMismatch { expected: usize, found: usize },

    /// The data matrix and the class vector hold a different number of rows.
    #[error("Data has {rows} instance rows but {classes} class values.")]
    RowCountMismatch { rows: usize, classes: usize },

    /// A query instance does not have one value per schema attribute.
    #[error("Instance has {found} values, expected {expected}.")]
    InstanceShape { expected: usize, found: usize },

    /// Strict classification reached a split whose attribute is missing.
    #[error("Attribute '{attribute}' is missing; strict classification is undefined, use token classification instead.")]
    UndefinedQuery { attribute: String },

    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("Tree wasn't built yet.")]
    NotFitted,
}
