//! Reading nominal datasets from CSV.
use super::attribute::{Attribute, Schema};
use super::dataset::Dataset;
use csv::{ReaderBuilder, StringRecord};
use std::error::Error;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use std::sync::Arc;

/// Marker used for missing values in the input files.
pub const MISSING_MARKER: &str = "?";

/// Reads a CSV file with a header row of attribute names.
///
/// Every column is treated as nominal. Value sets are collected in order of
/// first appearance and `?` marks a missing value. `class_column` selects the
/// class attribute, the last column is used when it is `None`.
///
/// A column holding a single label yields a one-valued attribute, which
/// training rejects by name. Declare the full value sets with a [`Schema`]
/// and [`read_nominal_csv_with_schema`] when the file does not show them all.
pub fn read_nominal_csv<P: AsRef<Path>>(
    path: P,
    class_column: Option<usize>,
) -> Result<Dataset, Box<dyn Error>> {
    read_nominal(File::open(path)?, class_column)
}

/// Reads a CSV file whose values must belong to an existing schema, such as
/// a test set that accompanies a training set.
pub fn read_nominal_csv_with_schema<P: AsRef<Path>>(
    path: P,
    schema: Arc<Schema>,
    class_column: Option<usize>,
) -> Result<Dataset, Box<dyn Error>> {
    read_nominal_with_schema(File::open(path)?, schema, class_column)
}

/// Same as [`read_nominal_csv`] over any reader.
pub fn read_nominal<R: Read>(
    input: R,
    class_column: Option<usize>,
) -> Result<Dataset, Box<dyn Error>> {
    let mut reader = ReaderBuilder::new().has_headers(true).from_reader(input);
    let header = reader.headers()?.clone();
    let class_column = resolve_class_column(&header, class_column)?;

    let mut columns = header
        .iter()
        .map(|name| Attribute::new(name.trim(), Vec::new()))
        .collect::<Vec<_>>();

    let mut records = Vec::new();
    for result in reader.records() {
        let record = result?;
        check_width(&record, header.len(), records.len())?;
        let codes = record
            .iter()
            .zip(columns.iter_mut())
            .map(|(field, column)| match field.trim() {
                MISSING_MARKER => None,
                label => Some(column.intern(label)),
            })
            .collect::<Vec<_>>();
        records.push(codes);
    }

    let class_attribute = columns.remove(class_column);
    let schema = Arc::new(Schema::new(columns, class_attribute));
    assemble(schema, records, class_column)
}

/// Same as [`read_nominal_csv_with_schema`] over any reader.
pub fn read_nominal_with_schema<R: Read>(
    input: R,
    schema: Arc<Schema>,
    class_column: Option<usize>,
) -> Result<Dataset, Box<dyn Error>> {
    let mut reader = ReaderBuilder::new().has_headers(true).from_reader(input);
    let header = reader.headers()?.clone();
    let class_column = resolve_class_column(&header, class_column)?;

    if header.len() != schema.num_attributes() + 1 {
        return Err(format!(
            "File has {} columns, the schema expects {}.",
            header.len(),
            schema.num_attributes() + 1
        )
        .into());
    }

    let mut columns = schema.attributes().to_vec();
    columns.insert(class_column, schema.class_attribute().clone());

    let mut records = Vec::new();
    for result in reader.records() {
        let record = result?;
        check_width(&record, header.len(), records.len())?;
        let codes = record
            .iter()
            .zip(columns.iter())
            .map(|(field, column)| match field.trim() {
                MISSING_MARKER => Ok(None),
                label => column.index_of(label).map(Some).ok_or_else(|| {
                    format!("Unknown value '{}' for attribute '{}'.", label, column.name())
                }),
            })
            .collect::<Result<Vec<_>, _>>()?;
        records.push(codes);
    }

    assemble(schema, records, class_column)
}

fn resolve_class_column(
    header: &StringRecord,
    class_column: Option<usize>,
) -> Result<usize, Box<dyn Error>> {
    if header.len() < 2 {
        return Err("At least one attribute column and a class column are required.".into());
    }
    match class_column {
        Some(column) if column >= header.len() => {
            Err(format!("Class column {} is out of range.", column).into())
        }
        Some(column) => Ok(column),
        None => Ok(header.len() - 1),
    }
}

fn check_width(record: &StringRecord, width: usize, row: usize) -> Result<(), Box<dyn Error>> {
    if record.len() != width {
        return Err(format!(
            "Row {} has {} fields, expected {}.",
            row + 1,
            record.len(),
            width
        )
        .into());
    }
    Ok(())
}

fn assemble(
    schema: Arc<Schema>,
    mut records: Vec<Vec<Option<usize>>>,
    class_column: usize,
) -> Result<Dataset, Box<dyn Error>> {
    let classes = records
        .iter_mut()
        .map(|codes| codes.remove(class_column))
        .collect::<Vec<_>>();
    Ok(Dataset::from_rows(schema, records, classes)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    const WEATHER: &str = "\
Outlook,Wind,Play
Sunny,Weak,Yes
Rainy,Strong,No
?,Weak,Yes
Sunny,?,No
";

    #[test]
    fn test_read_nominal_collects_values_in_order() {
        let dataset = read_nominal(WEATHER.as_bytes(), None).unwrap();
        let schema = dataset.schema();

        assert_eq!(dataset.nrows(), 4);
        assert_eq!(schema.num_attributes(), 2);
        assert_eq!(schema.attribute(0).values(), &["Sunny", "Rainy"]);
        assert_eq!(schema.attribute(1).values(), &["Weak", "Strong"]);
        assert_eq!(schema.class_attribute().name(), "Play");
        assert_eq!(schema.class_attribute().values(), &["Yes", "No"]);
        assert_eq!(dataset.instance(2), vec![None, Some(0)]);
        assert_eq!(dataset.instance(3), vec![Some(0), None]);
        assert_eq!(dataset.class_value(3), Some(1));
    }

    #[test]
    fn test_read_nominal_with_first_column_as_class() {
        let dataset = read_nominal(WEATHER.as_bytes(), Some(0)).unwrap();
        let schema = dataset.schema();

        assert_eq!(schema.class_attribute().name(), "Outlook");
        assert_eq!(schema.attribute(1).name(), "Play");
        assert_eq!(dataset.class_value(2), None);
    }

    #[test]
    fn test_read_nominal_with_schema_maps_known_labels() {
        let train = read_nominal(WEATHER.as_bytes(), None).unwrap();
        let test = "Outlook,Wind,Play\nRainy,Weak,No\n?,Strong,Yes\n";
        let dataset = read_nominal_with_schema(test.as_bytes(), train.shared_schema(), None).unwrap();

        assert_eq!(dataset.nrows(), 2);
        assert_eq!(dataset.instance(0), vec![Some(1), Some(0)]);
        assert_eq!(dataset.instance(1), vec![None, Some(1)]);
        assert_eq!(dataset.class_value(1), Some(0));
    }

    #[test]
    fn test_read_nominal_with_schema_rejects_unknown_label() {
        let train = read_nominal(WEATHER.as_bytes(), None).unwrap();
        let test = "Outlook,Wind,Play\nSnowy,Weak,No\n";
        let result = read_nominal_with_schema(test.as_bytes(), train.shared_schema(), None);
        assert!(result.is_err());
    }

    #[test]
    fn test_read_nominal_rejects_ragged_rows() {
        let input = "Outlook,Play\nSunny\n";
        assert!(read_nominal(input.as_bytes(), None).is_err());
    }

    #[test]
    fn test_read_nominal_rejects_bad_class_column() {
        assert!(read_nominal(WEATHER.as_bytes(), Some(3)).is_err());
    }
}
