//! Lower-triangular distance matrix and its PHYLIP text encoding
//!
//! The native FITCH routine reads a fixed-width document:
//!
//! ```text
//! 3
//! aaa
//! aab         1.3
//! aac         5.1   6.4
//! ```
//!
//! The first line holds the leaf count. Every following line starts with the
//! label fitted into a 10-character field, then the row's lower-triangular
//! distances, each as `{:5.1}` plus a trailing space.

use std::collections::HashSet;
use std::fmt::Write;

use crate::domain::DomainError;

/// Width of the PHYLIP name field.
pub const LABEL_WIDTH: usize = 10;

/// Fit a label into the PHYLIP name field: left-aligned, space-padded,
/// truncated to [`LABEL_WIDTH`] characters.
pub fn fit_label(label: &str) -> String {
    format!("{:<width$.width$}", label, width = LABEL_WIDTH)
}

/// Validated labels plus lower-triangular distances.
///
/// Row `i` holds the distances to labels `0..i`; the diagonal is implicit.
#[derive(Debug, Clone, PartialEq)]
pub struct DistanceMatrix {
    labels: Vec<String>,
    rows: Vec<Vec<f64>>,
}

impl DistanceMatrix {
    /// Build a matrix from labels and rows indexed in parallel.
    ///
    /// Row `i` must carry at least `i` entries. Anything beyond the lower
    /// triangle (the diagonal, or the rest of a square row) is dropped.
    ///
    /// # Errors
    /// Returns a [`DomainError`] when labels are missing, empty, contain line
    /// breaks or collide in the name field, when the shapes disagree, or when a
    /// distance is negative or not finite.
    pub fn new(labels: Vec<String>, rows: Vec<Vec<f64>>) -> Result<Self, DomainError> {
        if labels.is_empty() {
            return Err(DomainError::EmptyLabels);
        }
        if labels.len() != rows.len() {
            return Err(DomainError::ShapeMismatch {
                labels: labels.len(),
                rows: rows.len(),
            });
        }

        let mut seen = HashSet::with_capacity(labels.len());
        for (index, label) in labels.iter().enumerate() {
            if label.trim().is_empty() {
                return Err(DomainError::EmptyLabel { index });
            }
            if label.contains(['\n', '\r']) {
                return Err(DomainError::InvalidLabel {
                    label: label.clone(),
                });
            }
            if !seen.insert(fit_label(label)) {
                return Err(DomainError::DuplicateLabel {
                    label: label.clone(),
                });
            }
        }

        let mut triangle = Vec::with_capacity(rows.len());
        for (row, mut entries) in rows.into_iter().enumerate() {
            if entries.len() < row {
                return Err(DomainError::RaggedRow {
                    row,
                    expected: row,
                    found: entries.len(),
                });
            }
            entries.truncate(row);
            if let Some((column, &value)) = entries
                .iter()
                .enumerate()
                .find(|(_, d)| !d.is_finite() || **d < 0.0)
            {
                return Err(DomainError::InvalidDistance { row, column, value });
            }
            triangle.push(entries);
        }

        Ok(Self {
            labels,
            rows: triangle,
        })
    }

    /// Parse a PHYLIP lower-triangular (or square) distance document.
    ///
    /// The first 10 characters of each row are the label; the remaining
    /// whitespace-separated tokens are distances. Blank lines are skipped.
    pub fn from_phylip(document: &str) -> Result<Self, DomainError> {
        let mut lines = document
            .lines()
            .enumerate()
            .map(|(idx, line)| (idx + 1, line))
            .filter(|(_, line)| !line.trim().is_empty());

        let (header_line, header) = lines.next().ok_or(DomainError::Parse {
            line: 1,
            message: "missing leaf count".into(),
        })?;
        let count: usize = header.trim().parse().map_err(|_| DomainError::Parse {
            line: header_line,
            message: format!("invalid leaf count {:?}", header.trim()),
        })?;

        let mut labels = Vec::new();
        let mut rows = Vec::new();
        let mut last_line = header_line;
        for (line_no, line) in lines {
            let (name, rest) = match line.char_indices().nth(LABEL_WIDTH) {
                Some((idx, _)) => line.split_at(idx),
                None => (line, ""),
            };
            let row = rest
                .split_whitespace()
                .map(|token| {
                    token.parse::<f64>().map_err(|_| DomainError::Parse {
                        line: line_no,
                        message: format!("invalid distance {token:?}"),
                    })
                })
                .collect::<Result<Vec<_>, _>>()?;
            labels.push(name.trim_end().to_string());
            rows.push(row);
            last_line = line_no;
        }

        if labels.len() != count {
            return Err(DomainError::Parse {
                line: last_line,
                message: format!("expected {} rows, found {}", count, labels.len()),
            });
        }

        Self::new(labels, rows)
    }

    /// Number of leaves.
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    /// Symmetric distance lookup; the diagonal is zero.
    ///
    /// `None` if either index is out of range.
    pub fn distance(&self, i: usize, j: usize) -> Option<f64> {
        match i.cmp(&j) {
            std::cmp::Ordering::Equal => (i < self.len()).then_some(0.0),
            std::cmp::Ordering::Greater => self.rows.get(i)?.get(j).copied(),
            std::cmp::Ordering::Less => self.rows.get(j)?.get(i).copied(),
        }
    }

    /// Serialize into the fixed-width document read by FITCH.
    ///
    /// Lines are joined with `\n`; there is no trailing newline.
    pub fn to_phylip(&self) -> String {
        let mut lines = Vec::with_capacity(self.len() + 1);
        lines.push(self.len().to_string());
        for (label, row) in self.labels.iter().zip(&self.rows) {
            let mut line = fit_label(label);
            for distance in row {
                // writing into a String cannot fail
                let _ = write!(line, "{:5.1} ", distance);
            }
            lines.push(line);
        }
        lines.join("\n")
    }
}
