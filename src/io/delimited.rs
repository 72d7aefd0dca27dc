//! Delimited text reader for categorical datasets.
use csv::{ReaderBuilder, Trim};

use crate::data_handling::{Dataset, Instance, Schema};
use crate::error::PipelineError;

/// Result of parsing raw input text: the dataset plus one warning line per
/// skipped row, in input order.
#[derive(Debug)]
pub struct ParseOutcome {
    pub dataset: Dataset,
    pub warnings: Vec<String>,
}

/// Parse raw delimited text into a dataset.
///
/// The first line is the attribute header; every following line must match
/// its arity and carry a non-empty identifier in the first field. Rows that
/// do not are skipped with a warning (never a hard failure), keeping the
/// original 1-based line number. Fields are trimmed; no quoting or escaping
/// of the delimiter inside values is supported.
pub fn parse_delimited(contents: &str, delimiter: u8) -> Result<ParseOutcome, PipelineError> {
    if contents.trim().is_empty() {
        return Err(PipelineError::EmptyInput);
    }
    // A blank first line means there is no header to parse; it splits into
    // a single empty field.
    if contents
        .lines()
        .next()
        .map(|line| line.trim().is_empty())
        .unwrap_or(true)
    {
        return Err(PipelineError::Schema { fields: 1 });
    }

    let mut reader = ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(true)
        .flexible(true)
        .quoting(false)
        .trim(Trim::All)
        .from_reader(contents.as_bytes());

    let headers = reader
        .headers()
        .map_err(|_| PipelineError::EmptyInput)?
        .clone();
    let attributes: Vec<String> = headers.iter().map(|field| field.to_string()).collect();
    let schema = Schema::new(attributes)?;

    let mut instances = Vec::new();
    let mut warnings: Vec<(u64, String)> = Vec::new();
    for result in reader.records() {
        let record = match result {
            Ok(record) => record,
            Err(err) => {
                let line = err.position().map(|p| p.line()).unwrap_or(0);
                push_warning(
                    &mut warnings,
                    line,
                    format!("Warning: line {} skipped (unreadable record: {})", line, err),
                );
                continue;
            }
        };
        let line = record.position().map(|p| p.line()).unwrap_or(0);

        if record.len() != schema.len() {
            push_warning(
                &mut warnings,
                line,
                format!(
                    "Warning: line {} skipped (expected {} fields, found {})",
                    line,
                    schema.len(),
                    record.len()
                ),
            );
            continue;
        }

        let values: Vec<String> = record.iter().map(|field| field.to_string()).collect();
        if values[0].is_empty() {
            push_warning(
                &mut warnings,
                line,
                format!("Warning: line {} skipped (empty identifier)", line),
            );
            continue;
        }

        instances.push(Instance::new(values));
    }

    // The csv reader silently drops completely empty lines, but the row
    // contract treats a blank line as a one-field row. Scan for them
    // separately and merge the warnings back in line order.
    for (index, line) in contents.lines().enumerate().skip(1) {
        if line.is_empty() {
            let line_number = (index + 1) as u64;
            push_warning(
                &mut warnings,
                line_number,
                format!(
                    "Warning: line {} skipped (expected {} fields, found 1)",
                    line_number,
                    schema.len()
                ),
            );
        }
    }
    warnings.sort_by_key(|(line, _)| *line);

    if instances.is_empty() {
        return Err(PipelineError::NoValidData);
    }

    Ok(ParseOutcome {
        dataset: Dataset { schema, instances },
        warnings: warnings.into_iter().map(|(_, warning)| warning).collect(),
    })
}

fn push_warning(warnings: &mut Vec<(u64, String)>, line: u64, warning: String) {
    log::warn!("{}", warning);
    warnings.push((line, warning));
}
