//! Ordered report line buffer and table rendering.
use crate::data_handling::{Instance, Schema};

/// Ordered sequence of human-readable report lines.
///
/// Computation stages append here instead of writing to any output sink;
/// the caller decides whether the finished lines go to stdout, a file, or a
/// display widget.
#[derive(Debug, Default)]
pub struct Report {
    lines: Vec<String>,
}

impl Report {
    pub fn new() -> Self {
        Report { lines: Vec::new() }
    }

    pub fn push(&mut self, line: impl Into<String>) {
        self.lines.push(line.into());
    }

    pub fn blank(&mut self) {
        self.lines.push(String::new());
    }

    pub fn extend(&mut self, lines: impl IntoIterator<Item = String>) {
        self.lines.extend(lines);
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn into_lines(self) -> Vec<String> {
        self.lines
    }
}

/// Render instances as a bordered fixed-width table:
///
/// ```text
/// +----+---------+-------+
/// | ID | Outlook | Class |
/// +----+---------+-------+
/// | 1  | Sunny   | Yes   |
/// +----+---------+-------+
/// ```
///
/// Column widths grow to the longest value in each column.
pub fn format_as_table(schema: &Schema, instances: &[Instance]) -> Vec<String> {
    if instances.is_empty() {
        return vec!["No data to display.".to_string()];
    }

    let attributes = schema.attributes();
    let mut widths: Vec<usize> = attributes.iter().map(|attr| attr.len()).collect();
    for instance in instances {
        for (i, value) in instance.values().iter().enumerate() {
            widths[i] = widths[i].max(value.len());
        }
    }

    let separator = {
        let parts: Vec<String> = widths.iter().map(|w| "-".repeat(w + 2)).collect();
        format!("+{}+", parts.join("+"))
    };
    let header = {
        let parts: Vec<String> = attributes
            .iter()
            .zip(widths.iter())
            .map(|(attr, &w)| format!(" {:<width$} ", attr, width = w))
            .collect();
        format!("|{}|", parts.join("|"))
    };

    let mut out = vec![separator.clone(), header, separator.clone()];
    for instance in instances {
        let parts: Vec<String> = instance
            .values()
            .iter()
            .zip(widths.iter())
            .map(|(value, &w)| format!(" {:<width$} ", value, width = w))
            .collect();
        out.push(format!("|{}|", parts.join("|")));
    }
    out.push(separator);
    out
}
