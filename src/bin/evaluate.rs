use id3_chi::data::dataset::Dataset;
use id3_chi::data::reader::{read_nominal_csv, read_nominal_csv_with_schema};
use id3_chi::metrics::confusion::ClassificationMetrics;
use id3_chi::trees::classifier::Id3ChiClassifier;
use log::{LevelFilter, Log, Metadata, Record};
use std::env;
use std::error::Error;
use std::process;

const USAGE: &str = "Usage: id3-chi <train.csv> [test.csv] [--confidence p] [-v | -vv]";
const SPLIT_SEED: u64 = 42;
const TRAIN_SIZE: f64 = 0.75;

struct StderrLogger;

impl Log for StderrLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            eprintln!("[{}] {}", record.level(), record.args());
        }
    }

    fn flush(&self) {}
}

static LOGGER: StderrLogger = StderrLogger;

struct Options {
    train_path: String,
    test_path: Option<String>,
    confidence_level: Option<f64>,
    verbosity: usize,
}

fn parse_args(args: &[String]) -> Result<Options, Box<dyn Error>> {
    let mut paths = Vec::new();
    let mut confidence_level = None;
    let mut verbosity = 0;

    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--confidence" | "-c" => {
                let value = iter.next().ok_or("--confidence needs a value")?;
                confidence_level = Some(value.parse::<f64>()?);
            }
            "-v" => verbosity += 1,
            "-vv" => verbosity += 2,
            flag if flag.starts_with('-') => return Err(format!("Unknown option {}", flag).into()),
            path => paths.push(path.to_string()),
        }
    }

    let mut paths = paths.into_iter();
    let train_path = paths.next().ok_or(USAGE)?;
    let test_path = paths.next();
    if paths.next().is_some() {
        return Err(USAGE.into());
    }

    Ok(Options {
        train_path,
        test_path,
        confidence_level,
        verbosity,
    })
}

fn accuracy_of(classifier: &Id3ChiClassifier, dataset: &Dataset) -> Result<f64, Box<dyn Error>> {
    let predictions = classifier.predict(&dataset.x)?;
    classifier.accuracy(&dataset.known_classes(), &predictions)
}

fn run(options: Options) -> Result<(), Box<dyn Error>> {
    let dataset = read_nominal_csv(&options.train_path, None)?;
    println!("Loaded dataset with {} instances", dataset.nrows());

    let (train_dataset, test_dataset) = match &options.test_path {
        Some(path) => {
            let test_dataset = read_nominal_csv_with_schema(path, dataset.shared_schema(), None)?;
            (dataset.without_missing_class(), test_dataset.without_missing_class())
        }
        None => dataset
            .without_missing_class()
            .train_test_split(TRAIN_SIZE, Some(SPLIT_SEED))?,
    };

    let mut classifier = Id3ChiClassifier::with_params(options.confidence_level, None, None)?;
    println!("{}", classifier.fit(&train_dataset)?);
    println!("{}\n", classifier);

    if test_dataset.is_not_empty() {
        let accuracy = accuracy_of(&classifier, &test_dataset)?;
        println!("Test accuracy: {:.2}%", accuracy * 100.0);
    } else {
        println!("Test set is empty.");
    }
    if train_dataset.is_not_empty() {
        let accuracy = accuracy_of(&classifier, &train_dataset)?;
        println!("Training accuracy: {:.2}%", accuracy * 100.0);
    }
    Ok(())
}

fn main() {
    let args = env::args().skip(1).collect::<Vec<_>>();
    let options = match parse_args(&args) {
        Ok(options) => options,
        Err(err) => {
            eprintln!("{}", err);
            eprintln!("{}", USAGE);
            process::exit(2);
        }
    };

    let level = match options.verbosity {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        _ => LevelFilter::Debug,
    };
    if log::set_logger(&LOGGER).is_ok() {
        log::set_max_level(level);
    }

    if let Err(err) = run(options) {
        eprintln!("Error: {}", err);
        process::exit(1);
    }
}
