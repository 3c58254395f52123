//! Row-major slice kernel.
//!
//! Every operation here works on plain `&[T]` / `&mut [T]` buffers with
//! explicit dimensions and never allocates. Intermediate matrices live in a
//! caller-supplied `scratch` slice; the `*_scratch_len` functions report
//! how long it must be.
//!
//! Two flavours exist for everything that can fail numerically:
//!
//! - the plain functions ([`invert`], [`pseudo_inverse`],
//!   [`weighted_pseudo_inverse`]) do no checking at all. A zero pivot in the
//!   LU decomposition produces `inf`/`NaN` that flows through to the output.
//!   Undersized buffers panic on slice indexing.
//! - the `try_*` functions validate buffer lengths and shapes up front and
//!   stop at the first pivot whose magnitude is not above `tol`, returning a
//!   [`LinalgError`].
//!
//! LU decomposition never pivots. Matrices that are invertible but have a
//! zero leading principal minor (e.g. `[[0, 1], [1, 0]]`) are reported
//! singular by the checked path and yield non-finite values on the
//! unchecked path.

pub(crate) mod basic;
pub(crate) mod lu;
pub(crate) mod pinv;

#[cfg(test)]
mod tests;

pub use basic::{cross, multiply, transpose, try_multiply, try_transpose};
pub use lu::{
    invert, invert_scratch_len, lu_in_place, lu_solve, try_invert, try_lu_in_place,
    LuDecomposition,
};
pub use pinv::{
    pseudo_inverse, pseudo_inverse_scratch_len, try_pseudo_inverse, try_weighted_pseudo_inverse,
    weighted_pseudo_inverse, weighted_pseudo_inverse_scratch_len,
};

/// Errors from the checked (`try_*`) operations.
///
/// The unchecked operations never produce these; they let bad input turn
/// into `NaN`/`inf` or panic on slice bounds instead.
///
/// ```
/// use rowmat::Matrix;
/// use rowmat::linalg::LinalgError;
///
/// // Invertible, but the leading pivot is zero and LU does not pivot.
/// let swap = Matrix::new([[0.0_f64, 1.0], [1.0, 0.0]]);
/// assert_eq!(swap.try_inverse().unwrap_err(), LinalgError::Singular { pivot: 0 });
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum LinalgError {
    /// Operand shapes are incompatible.
    #[error("dimension mismatch: expected {}x{}, got {}x{}", .expected.0, .expected.1, .got.0, .got.1)]
    DimensionMismatch {
        /// Expected `(rows, cols)`.
        expected: (usize, usize),
        /// Got `(rows, cols)`.
        got: (usize, usize),
    },
    /// A buffer holds fewer elements than its declared dimensions need.
    #[error("buffer `{name}` too small: need {required} elements, got {got}")]
    BufferTooSmall {
        /// Parameter name of the offending buffer.
        name: &'static str,
        /// Minimum element count.
        required: usize,
        /// Actual element count.
        got: usize,
    },
    /// A buffer length implied by the dimensions does not fit in `usize`.
    #[error("dimensions {rows}x{cols} overflow the addressable buffer size")]
    DimensionOverflow {
        /// Rows of the offending operand.
        rows: usize,
        /// Columns of the offending operand.
        cols: usize,
    },
    /// Zero-sized matrix where at least 1x1 is required.
    #[error("matrix has a zero dimension")]
    Empty,
    /// Pivot `pivot` of the LU decomposition is zero, below tolerance, or not finite.
    #[error("matrix is singular or needs pivoting (pivot {pivot})")]
    Singular {
        /// Row index of the failing pivot.
        pivot: usize,
    },
}

#[inline]
pub(crate) fn check_len(name: &'static str, got: usize, required: usize) -> Result<(), LinalgError> {
    if got < required {
        #[cfg(feature = "tracing")]
        tracing::debug!(buffer = name, required, got, "buffer too small");
        return Err(LinalgError::BufferTooSmall {
            name,
            required,
            got,
        });
    }
    Ok(())
}

/// `rows * cols`, or [`LinalgError::DimensionOverflow`].
#[inline]
pub(crate) fn element_count(rows: usize, cols: usize) -> Result<usize, LinalgError> {
    rows.checked_mul(cols).ok_or_else(|| overflow(rows, cols))
}

#[cold]
pub(crate) fn overflow(rows: usize, cols: usize) -> LinalgError {
    #[cfg(feature = "tracing")]
    tracing::debug!(rows, cols, "buffer size overflows usize");
    LinalgError::DimensionOverflow { rows, cols }
}

#[inline]
pub(crate) fn check_nonempty(rows: usize, cols: usize) -> Result<(), LinalgError> {
    if rows == 0 || cols == 0 {
        #[cfg(feature = "tracing")]
        tracing::debug!(rows, cols, "zero-sized matrix rejected");
        return Err(LinalgError::Empty);
    }
    Ok(())
}
