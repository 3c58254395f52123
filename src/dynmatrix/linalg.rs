use alloc::vec;
use alloc::vec::Vec;

use crate::linalg::lu::solve_columns;
use crate::linalg::pinv::{try_pseudo_inverse_by, try_weighted_pseudo_inverse_by};
use crate::linalg::{
    invert, invert_scratch_len, lu_in_place, lu_solve, pseudo_inverse,
    pseudo_inverse_scratch_len, try_invert, try_lu_in_place, weighted_pseudo_inverse,
    weighted_pseudo_inverse_scratch_len, LinalgError,
};
use crate::traits::FloatScalar;

use super::DynMatrix;

fn square_or_err<T>(a: &DynMatrix<T>) -> Result<usize, LinalgError> {
    if !a.is_square() {
        return Err(LinalgError::DimensionMismatch {
            expected: (a.nrows, a.nrows),
            got: (a.nrows, a.ncols),
        });
    }
    Ok(a.nrows)
}

// ── DynLu ───────────────────────────────────────────────────────────

/// LU decomposition (no pivoting) of a dynamically-sized square matrix.
///
/// # Example
///
/// ```
/// use rowmat::DynMatrix;
///
/// let a = DynMatrix::from_rows(2, 2, &[2.0_f64, 1.0, 5.0, 3.0]);
/// let lu = a.lu();
///
/// let x = lu.solve(&[4.0, 11.0]);
/// assert!((x[0] - 1.0).abs() < 1e-12);
/// assert!((x[1] - 2.0).abs() < 1e-12);
/// ```
#[derive(Debug, Clone)]
pub struct DynLu<T> {
    lu: DynMatrix<T>,
}

impl<T: FloatScalar> DynLu<T> {
    /// Decompose without pivot checks. Panics if `a` is not square.
    pub fn new(a: &DynMatrix<T>) -> Self {
        assert!(a.is_square(), "LU decomposition requires a square matrix");
        let mut lu = a.clone();
        lu_in_place(&mut lu.data, lu.nrows);
        Self { lu }
    }

    /// Decompose, failing on a non-square input or a pivot not above `tol`.
    pub fn try_new(a: &DynMatrix<T>, tol: T) -> Result<Self, LinalgError> {
        let n = square_or_err(a)?;
        let mut lu = a.clone();
        try_lu_in_place(&mut lu.data, n, tol)?;
        Ok(Self { lu })
    }

    /// Packed factors: U on and above the diagonal, L strictly below.
    #[inline]
    pub fn packed(&self) -> &DynMatrix<T> {
        &self.lu
    }

    /// Unit lower-triangular factor L.
    pub fn l(&self) -> DynMatrix<T> {
        let n = self.lu.nrows;
        DynMatrix::from_fn(n, n, |i, j| {
            if i > j {
                self.lu[(i, j)]
            } else if i == j {
                T::one()
            } else {
                T::zero()
            }
        })
    }

    /// Upper-triangular factor U.
    pub fn u(&self) -> DynMatrix<T> {
        let n = self.lu.nrows;
        DynMatrix::from_fn(n, n, |i, j| if i <= j { self.lu[(i, j)] } else { T::zero() })
    }

    /// Solve Ax = b for x.
    pub fn solve(&self, b: &[T]) -> Vec<T> {
        let n = self.lu.nrows;
        assert_eq!(b.len(), n, "rhs length mismatch");
        let mut x = vec![T::zero(); n];
        lu_solve(&self.lu.data, n, b, &mut x);
        x
    }

    /// Compute the matrix inverse.
    pub fn inverse(&self) -> DynMatrix<T> {
        let n = self.lu.nrows;
        let mut inv = DynMatrix::zeros(n, n);
        let mut col = vec![T::zero(); n];
        solve_columns(&self.lu.data, n, &mut inv.data, &mut col);
        inv
    }

    /// Determinant: product of U's diagonal.
    pub fn det(&self) -> T {
        let mut d = T::one();
        for i in 0..self.lu.nrows {
            d = d * self.lu[(i, i)];
        }
        d
    }
}

// ── Convenience methods ─────────────────────────────────────────────

impl<T: FloatScalar> DynMatrix<T> {
    /// LU decomposition without pivoting or pivot checks.
    pub fn lu(&self) -> DynLu<T> {
        DynLu::new(self)
    }

    /// LU decomposition rejecting pivots not above
    /// [`T::pivot_tol`](FloatScalar::pivot_tol) of this matrix.
    pub fn try_lu(&self) -> Result<DynLu<T>, LinalgError> {
        DynLu::try_new(self, T::pivot_tol(&self.data))
    }

    /// Solve `Ax = b` via no-pivot LU.
    pub fn solve(&self, b: &[T]) -> Vec<T> {
        self.lu().solve(b)
    }

    /// Inverse via no-pivot LU. Panics if not square.
    ///
    /// A vanished pivot shows up as `inf`/`NaN` entries.
    ///
    /// ```
    /// use rowmat::DynMatrix;
    /// let a = DynMatrix::from_rows(2, 2, &[4.0_f64, 7.0, 2.0, 6.0]);
    /// let id = &a * &a.inverse();
    /// assert!((id[(0, 0)] - 1.0).abs() < 1e-12);
    /// assert!(id[(0, 1)].abs() < 1e-12);
    /// ```
    pub fn inverse(&self) -> Self {
        assert!(self.is_square(), "inverse requires a square matrix");
        let n = self.nrows;
        let mut out = DynMatrix::zeros(n, n);
        let mut scratch = vec![T::zero(); invert_scratch_len(n)];
        invert(&self.data, n, &mut out.data, &mut scratch);
        out
    }

    /// Checked inverse with a tolerance relative to the matrix scale,
    /// see [`Matrix::try_inverse`](crate::Matrix::try_inverse).
    pub fn try_inverse(&self) -> Result<Self, LinalgError> {
        self.try_inverse_tol(T::pivot_tol(&self.data))
    }

    /// Checked inverse with an explicit, absolute pivot tolerance.
    pub fn try_inverse_tol(&self, tol: T) -> Result<Self, LinalgError> {
        let n = square_or_err(self)?;
        let mut out = DynMatrix::zeros(n, n);
        let mut scratch = vec![T::zero(); invert_scratch_len(n)];
        try_invert(&self.data, n, &mut out.data, &mut scratch, tol)?;
        Ok(out)
    }

    /// Moore-Penrose pseudo-inverse (n×m) assuming full rank.
    ///
    /// ```
    /// use rowmat::DynMatrix;
    /// let a = DynMatrix::from_rows(2, 3, &[1.0_f64, 0.0, 2.0, 0.0, 1.0, -1.0]);
    /// let id = &a * &a.pinv();
    /// assert!((id[(1, 1)] - 1.0).abs() < 1e-12);
    /// assert!(id[(1, 0)].abs() < 1e-12);
    /// ```
    pub fn pinv(&self) -> Self {
        let (m, n) = (self.nrows, self.ncols);
        let mut out = DynMatrix::zeros(n, m);
        let mut scratch = vec![T::zero(); pseudo_inverse_scratch_len(m, n)];
        pseudo_inverse(&self.data, m, n, &mut out.data, &mut scratch);
        out
    }

    /// Checked pseudo-inverse; Gram pivots are tested against the Gram
    /// matrix's own [`T::pivot_tol`](FloatScalar::pivot_tol).
    pub fn try_pinv(&self) -> Result<Self, LinalgError> {
        self.try_pinv_by(T::pivot_tol)
    }

    /// Checked pseudo-inverse; `tol` is an absolute bound on the Gram pivots.
    pub fn try_pinv_tol(&self, tol: T) -> Result<Self, LinalgError> {
        self.try_pinv_by(|_| tol)
    }

    fn try_pinv_by(&self, tol_for: impl Fn(&[T]) -> T) -> Result<Self, LinalgError> {
        let (m, n) = (self.nrows, self.ncols);
        let mut out = DynMatrix::zeros(n, m);
        let mut scratch = vec![T::zero(); pseudo_inverse_scratch_len(m, n)];
        try_pseudo_inverse_by(&self.data, m, n, &mut out.data, &mut scratch, tol_for)?;
        Ok(out)
    }

    /// Weighted pseudo-inverse `W⁻¹·Aᵗ·(A·W⁻¹·Aᵗ)⁻¹`.
    ///
    /// Panics unless `w` is `ncols × ncols`.
    pub fn weighted_pinv(&self, w: &DynMatrix<T>) -> Self {
        let (m, n, l) = (self.nrows, self.ncols, w.ncols);
        assert_eq!(
            (w.nrows, w.ncols),
            (n, n),
            "weight must be {}x{}, got {}x{}",
            n,
            n,
            w.nrows,
            w.ncols,
        );
        let mut out = DynMatrix::zeros(l, m);
        let mut scratch = vec![T::zero(); weighted_pseudo_inverse_scratch_len(m, n, l)];
        weighted_pseudo_inverse(&self.data, &w.data, m, n, l, &mut out.data, &mut scratch);
        out
    }

    /// Checked weighted pseudo-inverse; each inverted matrix is tested
    /// against its own [`T::pivot_tol`](FloatScalar::pivot_tol).
    pub fn try_weighted_pinv(&self, w: &DynMatrix<T>) -> Result<Self, LinalgError> {
        self.try_weighted_pinv_by(w, T::pivot_tol)
    }

    /// Checked weighted pseudo-inverse; `tol` is an absolute bound on the
    /// pivots of both inversions.
    pub fn try_weighted_pinv_tol(&self, w: &DynMatrix<T>, tol: T) -> Result<Self, LinalgError> {
        self.try_weighted_pinv_by(w, |_| tol)
    }

    fn try_weighted_pinv_by(
        &self,
        w: &DynMatrix<T>,
        tol_for: impl Fn(&[T]) -> T,
    ) -> Result<Self, LinalgError> {
        let (m, n, l) = (self.nrows, self.ncols, w.ncols);
        if w.nrows != n {
            return Err(LinalgError::DimensionMismatch {
                expected: (n, n),
                got: (w.nrows, w.ncols),
            });
        }
        let mut out = DynMatrix::zeros(l, m);
        let mut scratch = vec![T::zero(); weighted_pseudo_inverse_scratch_len(m, n, l)];
        try_weighted_pseudo_inverse_by(
            &self.data,
            &w.data,
            m,
            n,
            l,
            &mut out.data,
            &mut scratch,
            tol_for,
        )?;
        Ok(out)
    }
}
