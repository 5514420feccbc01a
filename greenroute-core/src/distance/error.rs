use thiserror::Error;

/// Errors raised while building a [`crate::DistanceMatrix`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DistanceMatrixError {
    /// A row did not have one entry per stop.
    #[error("row {row} has {actual} entries, expected {expected}")]
    NotSquare {
        /// Offending row index.
        row: usize,
        /// Number of rows, and so the required row length.
        expected: usize,
        /// Actual row length.
        actual: usize,
    },
    /// `matrix[from][to]` differs from `matrix[to][from]`.
    #[error("cost from {from} to {to} differs from the reverse direction")]
    Asymmetric {
        /// Row index of the mismatch.
        from: usize,
        /// Column index of the mismatch.
        to: usize,
    },
    /// A stop has a non-zero cost to itself.
    #[error("cost from stop {index} to itself must be zero")]
    NonZeroDiagonal {
        /// Stop index on the diagonal.
        index: usize,
    },
    /// The model produced a matrix for a different number of stops.
    #[error("matrix covers {matrix} stops but {stops} were supplied")]
    DimensionMismatch {
        /// Number of stops supplied to the model.
        stops: usize,
        /// Dimension of the produced matrix.
        matrix: usize,
    },
}
