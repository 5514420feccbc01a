//! Dense symmetric cost matrix.

use super::error::DistanceMatrixError;

/// Integer travel cost between two stops.
///
/// Costs are scaled distances, so comparisons during the search never drift
/// the way repeated floating-point sums can.
pub type Cost = u64;

/// Symmetric `n×n` matrix of travel costs with a zero diagonal.
///
/// Stored row-major in a single allocation. The matrix is immutable once
/// built.
///
/// # Examples
/// ```
/// use greenroute_core::DistanceMatrix;
///
/// let matrix = DistanceMatrix::from_fn(3, |from, to| (from + to) as u64);
/// assert_eq!(matrix.get(1, 2), Some(3));
/// assert_eq!(matrix.get(2, 1), Some(3));
/// assert_eq!(matrix.get(1, 1), Some(0));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DistanceMatrix {
    size: usize,
    costs: Vec<Cost>,
}

impl DistanceMatrix {
    /// Build a matrix by evaluating `cost` once per unordered pair.
    ///
    /// `cost` is called for `from < to` only; the lower triangle mirrors the
    /// upper one and the diagonal is zero.
    #[must_use]
    #[expect(
        clippy::indexing_slicing,
        reason = "both indices are below size and the buffer holds size * size entries"
    )]
    pub fn from_fn<F>(size: usize, mut cost: F) -> Self
    where
        F: FnMut(usize, usize) -> Cost,
    {
        let mut costs = vec![0; size * size];
        for from in 0..size {
            for to in (from + 1)..size {
                let value = cost(from, to);
                costs[from * size + to] = value;
                costs[to * size + from] = value;
            }
        }
        Self { size, costs }
    }

    /// Validate and adopt explicit rows.
    ///
    /// # Errors
    /// Returns [`DistanceMatrixError`] when the rows are ragged, asymmetric,
    /// or carry a non-zero diagonal.
    ///
    /// # Examples
    /// ```
    /// use greenroute_core::{DistanceMatrix, DistanceMatrixError};
    ///
    /// let matrix = DistanceMatrix::from_rows(vec![vec![0, 4], vec![4, 0]])?;
    /// assert_eq!(matrix.len(), 2);
    ///
    /// let err = DistanceMatrix::from_rows(vec![vec![0, 4], vec![5, 0]]).unwrap_err();
    /// assert_eq!(err, DistanceMatrixError::Asymmetric { from: 0, to: 1 });
    /// # Ok::<(), DistanceMatrixError>(())
    /// ```
    pub fn from_rows(rows: Vec<Vec<Cost>>) -> Result<Self, DistanceMatrixError> {
        let size = rows.len();
        if let Some((row, actual)) = rows
            .iter()
            .map(Vec::len)
            .enumerate()
            .find(|(_, len)| *len != size)
        {
            return Err(DistanceMatrixError::NotSquare {
                row,
                expected: size,
                actual,
            });
        }
        let matrix = Self {
            size,
            costs: rows.into_iter().flatten().collect(),
        };
        for from in 0..size {
            if matrix.get(from, from) != Some(0) {
                return Err(DistanceMatrixError::NonZeroDiagonal { index: from });
            }
            for to in (from + 1)..size {
                if matrix.get(from, to) != matrix.get(to, from) {
                    return Err(DistanceMatrixError::Asymmetric { from, to });
                }
            }
        }
        Ok(matrix)
    }

    /// Number of stops covered.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.size
    }

    /// Whether the matrix covers no stops at all.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// Checked lookup of the cost between two stops.
    #[must_use]
    pub fn get(&self, from: usize, to: usize) -> Option<Cost> {
        if from >= self.size || to >= self.size {
            return None;
        }
        self.costs.get(from * self.size + to).copied()
    }

    /// Unchecked-by-contract lookup used on the search hot path.
    ///
    /// # Panics
    /// Panics when either index is not below [`Self::len`].
    #[must_use]
    #[expect(
        clippy::indexing_slicing,
        reason = "hot path; callers only pass tour entries, which are validated stop indices"
    )]
    pub fn cost(&self, from: usize, to: usize) -> Cost {
        assert!(
            from < self.size && to < self.size,
            "stop index out of range: ({from}, {to}) for {} stops",
            self.size
        );
        self.costs[from * self.size + to]
    }

    /// Copy the matrix out as nested rows.
    #[must_use]
    pub fn to_rows(&self) -> Vec<Vec<Cost>> {
        if self.size == 0 {
            return Vec::new();
        }
        self.costs
            .chunks(self.size)
            .map(<[Cost]>::to_vec)
            .collect()
    }
}
