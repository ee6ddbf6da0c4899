/// Recursive tree growth with chi-square pre-pruning
pub mod builder;
/// The ID3 classifier
pub mod classifier;
/// Classification over a finished tree
pub mod inference;
/// Tree nodes
pub mod node;
/// Growth parameters
pub mod params;
/// Text rendering of trees
pub mod printer;
