/// Nominal attributes and schemas
pub mod attribute;
/// In-memory nominal datasets
pub mod dataset;
/// CSV input
pub mod reader;
