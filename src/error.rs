use std::error::Error;
use std::fmt;

/// Fatal pipeline failures. Each variant aborts the run; the `Display` text
/// is the single descriptive message surfaced to the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PipelineError {
    /// Input text contained no lines.
    EmptyInput,
    /// Header row had fewer than the two required fields (id + class).
    Schema { fields: usize },
    /// Every data row was skipped during parsing.
    NoValidData,
    /// Training or testing set came out empty after the stratified split.
    EmptySplit,
    /// Configured field delimiter is not a single-byte ASCII character.
    Delimiter { delimiter: char },
}

impl fmt::Display for PipelineError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            PipelineError::EmptyInput => write!(f, "input file is empty"),
            PipelineError::Schema { fields } => write!(
                f,
                "header must contain at least an id attribute and a class attribute (found {} field{})",
                fields,
                if *fields == 1 { "" } else { "s" }
            ),
            PipelineError::NoValidData => {
                write!(f, "no valid data rows found after the header")
            }
            PipelineError::EmptySplit => write!(
                f,
                "training or testing set is empty after the split; every class needs enough instances for both subsets"
            ),
            PipelineError::Delimiter { delimiter } => write!(
                f,
                "delimiter '{}' is not a single ASCII character",
                delimiter
            ),
        }
    }
}

impl Error for PipelineError {}
