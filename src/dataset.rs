//! Paired two-group dataset.

use ndarray::Array1;

use crate::error::{DataError, PlotResult};

/// Default name of the first column.
pub const GROUP_1: &str = "Group 1";
/// Default name of the second column.
pub const GROUP_2: &str = "Group 2";

/// Selects one of the two columns of a [`PairedDataset`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Group {
    /// First column, drawn at x = 0.
    First,
    /// Second column, drawn at x = 1.
    Second,
}

impl Group {
    /// Both groups in drawing order.
    pub const BOTH: [Group; 2] = [Group::First, Group::Second];

    /// Position in the palette and on the categorical axis.
    pub const fn index(self) -> usize {
        match self {
            Group::First => 0,
            Group::Second => 1,
        }
    }
}

/// Two equal-length numeric columns whose rows are paired.
///
/// Row `j` of the first column belongs to the same subject as row `j` of the
/// second column; the strip panel joins them with a line.
#[derive(Debug, Clone, PartialEq)]
pub struct PairedDataset {
    names: [String; 2],
    first: Array1<f64>,
    second: Array1<f64>,
}

impl PairedDataset {
    /// Create a dataset with the default column names "Group 1" and "Group 2".
    pub fn new(first: Array1<f64>, second: Array1<f64>) -> PlotResult<Self> {
        Self::from_columns(GROUP_1, first, GROUP_2, second)
    }

    /// Create a dataset with explicit column names.
    ///
    /// # Errors
    /// Returns [`DataError::LengthMismatch`] if the columns differ in length.
    pub fn from_columns(
        first_name: impl Into<String>,
        first: Array1<f64>,
        second_name: impl Into<String>,
        second: Array1<f64>,
    ) -> PlotResult<Self> {
        if first.len() != second.len() {
            return Err(DataError::LengthMismatch {
                left: first.len(),
                right: second.len(),
            }
            .into());
        }
        Ok(Self {
            names: [first_name.into(), second_name.into()],
            first,
            second,
        })
    }

    /// Convenience constructor from plain vectors.
    pub fn from_vecs(first: Vec<f64>, second: Vec<f64>) -> PlotResult<Self> {
        Self::new(Array1::from_vec(first), Array1::from_vec(second))
    }

    /// Number of paired rows.
    pub fn len(&self) -> usize {
        self.first.len()
    }

    /// True when the dataset has no rows.
    pub fn is_empty(&self) -> bool {
        self.first.is_empty()
    }

    /// Column values of one group.
    pub const fn group(&self, group: Group) -> &Array1<f64> {
        match group {
            Group::First => &self.first,
            Group::Second => &self.second,
        }
    }

    /// Column name of one group.
    pub fn name(&self, group: Group) -> &str {
        &self.names[group.index()]
    }

    /// Iterate over `(first, second)` row pairs.
    pub fn pairs(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.first.iter().copied().zip(self.second.iter().copied())
    }
}
