// Processing module for dataset filtering and statistics
// Author: Gabriel Demetrios Lafis

mod filter;
mod stats;

pub use filter::*;
pub use stats::*;

use std::error::Error;
use std::fmt;

use crate::data::{DataError, Dataset};

/// Represents a data processor that derives a new dataset from an input dataset
pub trait DataProcessor {
    /// Process a dataset and return a new dataset
    fn process(&self, input: &Dataset) -> Result<Dataset, ProcessingError>;

    /// Get the processor name
    fn name(&self) -> &str;
}

/// Represents an error in the processing module
#[derive(Debug)]
pub enum ProcessingError {
    Data(DataError),
    /// The month selector is not "all" or a month from January to June
    InvalidMonth(String),
    /// The day selector is not "all" or a weekday name
    InvalidDay(String),
    /// A statistic was requested over a dataset with zero rows
    NoData,
}

impl fmt::Display for ProcessingError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ProcessingError::Data(err) => write!(f, "Data error: {}", err),
            ProcessingError::InvalidMonth(month) => {
                write!(f, "Invalid month selector: '{}'", month)
            }
            ProcessingError::InvalidDay(day) => write!(f, "Invalid day selector: '{}'", day),
            ProcessingError::NoData => {
                write!(f, "No data: statistic requested over zero rows")
            }
        }
    }
}

impl Error for ProcessingError {}

impl From<DataError> for ProcessingError {
    fn from(err: DataError) -> Self {
        ProcessingError::Data(err)
    }
}

/// Pipeline for chaining multiple processors
pub struct Pipeline {
    name: String,
    processors: Vec<Box<dyn DataProcessor>>,
}

impl Pipeline {
    /// Create a new pipeline with the given name
    pub fn new(name: &str) -> Self {
        Pipeline {
            name: name.to_string(),
            processors: Vec::new(),
        }
    }

    /// Add a processor to the pipeline
    pub fn add<P: DataProcessor + 'static>(mut self, processor: P) -> Self {
        self.processors.push(Box::new(processor));
        self
    }

    /// Execute the pipeline on a dataset
    pub fn execute(&self, input: &Dataset) -> Result<Dataset, ProcessingError> {
        let mut current = input.clone();

        for processor in &self.processors {
            current = processor.process(&current)?;
        }

        Ok(current)
    }
}

impl DataProcessor for Pipeline {
    fn process(&self, input: &Dataset) -> Result<Dataset, ProcessingError> {
        self.execute(input)
    }

    fn name(&self) -> &str {
        &self.name
    }
}
