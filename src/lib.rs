//! # id3-chi
//!
//! `id3-chi` builds ID3 decision trees over nominal data. Tree growth is
//! pre-pruned with a chi-square independence test, and missing values are
//! handled by spreading fractional weight over the branches of a split, both
//! while training and while classifying.
//!
//! ## Example Usage
//!
//! ```rust
//! use id3_chi::data::attribute::{Attribute, Schema};
//! use id3_chi::data::dataset::Dataset;
//! use id3_chi::trees::classifier::Id3ChiClassifier;
//! use std::sync::Arc;
//!
//! let schema = Arc::new(Schema::new(
//!     vec![Attribute::from_labels("Weather", &["Sunny", "Rainy"])],
//!     Attribute::from_labels("Play", &["Yes", "No"]),
//! ));
//! let dataset = Dataset::from_rows(
//!     schema,
//!     vec![vec![Some(0)], vec![Some(0)], vec![Some(1)], vec![Some(1)]],
//!     vec![Some(0), Some(0), Some(1), Some(1)],
//! )
//! .unwrap();
//!
//! let mut model = Id3ChiClassifier::new();
//! model.fit(&dataset).unwrap();
//!
//! assert_eq!(model.classify_label(&[Some(1)]).unwrap(), "No");
//! // a missing value is spread over every branch
//! let weights = model.token_distribution(&[None]).unwrap();
//! assert_eq!(weights.len(), 2);
//! ```

/// Nominal datasets and CSV input
pub mod data;
/// Error type shared by the crate
pub mod error;
/// Functions for evaluating model performance
pub mod metrics;
/// Entropy, chi-square and supporting special functions
pub mod stats;
/// Decision trees
pub mod trees;
