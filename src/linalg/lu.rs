use crate::linalg::{check_len, check_nonempty, element_count, overflow, LinalgError};
use crate::matrix::vector::Vector;
use crate::traits::FloatScalar;
use crate::Matrix;

/// Scratch elements [`invert`] needs for an `n×n` matrix: the packed LU
/// factors plus one solution column.
///
/// Overflows for `n` past `sqrt(usize::MAX)`; the `try_*` functions check
/// that case and report [`LinalgError::DimensionOverflow`].
#[inline]
pub const fn invert_scratch_len(n: usize) -> usize {
    n * n + n
}

pub(crate) fn checked_invert_scratch_len(n: usize) -> Result<usize, LinalgError> {
    element_count(n, n)?
        .checked_add(n)
        .ok_or_else(|| overflow(n, n))
}

/// Doolittle elimination over a packed row-major buffer.
///
/// Row `i` of U is finished before column `i` of L, so every read on the
/// right-hand side hits either an untouched entry of A or a finished factor.
/// With `tol = None` nothing is checked and a zero pivot divides through.
fn decompose<T: FloatScalar>(lu: &mut [T], n: usize, tol: Option<T>) -> Result<(), LinalgError> {
    for i in 0..n {
        for j in i..n {
            let mut u = lu[i * n + j];
            for k in 0..i {
                u = u - lu[i * n + k] * lu[k * n + j];
            }
            lu[i * n + j] = u;
        }

        let pivot = lu[i * n + i];
        if let Some(tol) = tol {
            if !pivot.is_finite() || pivot.abs() <= tol {
                #[cfg(feature = "tracing")]
                tracing::debug!(pivot = i, value = ?pivot, "LU pivot not above tolerance");
                return Err(LinalgError::Singular { pivot: i });
            }
        }

        for j in (i + 1)..n {
            let mut l = lu[j * n + i];
            for k in 0..i {
                l = l - lu[j * n + k] * lu[k * n + i];
            }
            lu[j * n + i] = l / pivot;
        }
    }
    Ok(())
}

/// Solve `L·U·x = b` in place: `x` holds `b` on entry and the solution on return.
fn substitute<T: FloatScalar>(lu: &[T], n: usize, x: &mut [T]) {
    // L has an implicit unit diagonal.
    for i in 0..n {
        let mut sum = x[i];
        for j in 0..i {
            sum = sum - lu[i * n + j] * x[j];
        }
        x[i] = sum;
    }

    for i in (0..n).rev() {
        let mut sum = x[i];
        for j in ((i + 1)..n).rev() {
            sum = sum - lu[i * n + j] * x[j];
        }
        x[i] = sum / lu[i * n + i];
    }
}

/// Fill `a_inv` column by column by solving against each unit basis vector.
pub(crate) fn solve_columns<T: FloatScalar>(lu: &[T], n: usize, a_inv: &mut [T], col: &mut [T]) {
    for k in 0..n {
        col.fill(T::zero());
        col[k] = T::one();
        substitute(lu, n, col);
        for i in 0..n {
            a_inv[i * n + k] = col[i];
        }
    }
}

/// LU decomposition without pivoting (Doolittle), in place.
///
/// On entry `lu[..n*n]` holds the row-major square matrix A. On return it
/// holds both factors packed together:
/// - upper triangle including the diagonal: U
/// - strictly lower triangle: L (its unit diagonal is implicit)
///
/// No rows are exchanged. A zero pivot `U[i][i]` makes the entries of L
/// below it infinite or `NaN`; nothing is reported. Use
/// [`try_lu_in_place`] to stop at such a pivot instead.
///
/// ```
/// use rowmat::linalg::lu_in_place;
///
/// let mut lu = [4.0, 3.0, 6.0, 3.0];
/// lu_in_place(&mut lu, 2);
/// assert_eq!(lu, [4.0, 3.0, 1.5, -1.5]);
/// ```
pub fn lu_in_place<T: FloatScalar>(lu: &mut [T], n: usize) {
    // Cannot fail without a tolerance.
    let _ = decompose(lu, n, None);
}

/// [`lu_in_place`] that rejects any pivot whose magnitude is not above `tol`.
///
/// On error `lu` is left partially factored.
pub fn try_lu_in_place<T: FloatScalar>(lu: &mut [T], n: usize, tol: T) -> Result<(), LinalgError> {
    check_nonempty(n, n)?;
    check_len("lu", lu.len(), element_count(n, n)?)?;
    decompose(lu, n, Some(tol))
}

/// Solve `A·x = b` given the packed factors from [`lu_in_place`].
///
/// Forward substitution with L, then back substitution with U.
/// `b` (input) and `x` (output) are separate slices of length `n`.
pub fn lu_solve<T: FloatScalar>(lu: &[T], n: usize, b: &[T], x: &mut [T]) {
    x[..n].copy_from_slice(&b[..n]);
    substitute(lu, n, x);
}

/// Inverse of the square row-major matrix `a` (n×n) into `a_inv`.
///
/// Factors `a` with [`lu_in_place`] and solves `n` triangular systems.
/// `scratch` must hold at least [`invert_scratch_len`]`(n)` elements.
///
/// Zero or negligible pivots are not detected: they turn into `inf`/`NaN`
/// in the result. In particular a matrix that is invertible but needs a row
/// exchange, such as `[[0, 1], [1, 0]]`, comes back non-finite. Use
/// [`try_invert`] to get an error instead.
///
/// ```
/// use rowmat::linalg::{invert, invert_scratch_len};
///
/// let a = [4.0_f64, 3.0, 6.0, 3.0];
/// let mut a_inv = [0.0; 4];
/// let mut scratch = [0.0; invert_scratch_len(2)];
/// invert(&a, 2, &mut a_inv, &mut scratch);
/// assert!((a_inv[0] + 0.5).abs() < 1e-12);
/// assert!((a_inv[3] + 2.0 / 3.0).abs() < 1e-12);
/// ```
pub fn invert<T: FloatScalar>(a: &[T], n: usize, a_inv: &mut [T], scratch: &mut [T]) {
    let (lu, col) = scratch.split_at_mut(n * n);
    lu.copy_from_slice(&a[..n * n]);
    lu_in_place(lu, n);
    solve_columns(lu, n, a_inv, &mut col[..n]);
}

/// Checked [`invert`].
///
/// Validates buffer lengths, rejects `n == 0`, and fails with
/// [`LinalgError::Singular`] at the first pivot whose magnitude is not
/// above `tol`. `a_inv` is untouched on error.
pub fn try_invert<T: FloatScalar>(
    a: &[T],
    n: usize,
    a_inv: &mut [T],
    scratch: &mut [T],
    tol: T,
) -> Result<(), LinalgError> {
    check_nonempty(n, n)?;
    let nn = element_count(n, n)?;
    check_len("a", a.len(), nn)?;
    check_len("a_inv", a_inv.len(), nn)?;
    check_len("scratch", scratch.len(), checked_invert_scratch_len(n)?)?;

    let (lu, col) = scratch.split_at_mut(nn);
    lu.copy_from_slice(&a[..nn]);
    decompose(lu, n, Some(tol))?;
    solve_columns(lu, n, a_inv, &mut col[..n]);

    #[cfg(feature = "tracing")]
    tracing::trace!(n, "inverted matrix");
    Ok(())
}

/// LU decomposition (no pivoting) of a fixed-size square matrix.
///
/// Stores the packed L/U factors. Use `solve()`, `inverse()`, or `det()`
/// to work with the decomposition.
///
/// # Example
///
/// ```
/// use rowmat::{Matrix, Vector};
///
/// let a = Matrix::new([[2.0_f64, 1.0], [5.0, 3.0]]);
/// let lu = a.lu();
///
/// let b = Vector::from_array([4.0, 11.0]);
/// let x = lu.solve(&b);
/// assert!((x[0] - 1.0).abs() < 1e-12);
/// assert!((x[1] - 2.0).abs() < 1e-12);
/// assert!((lu.det() - 1.0).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct LuDecomposition<T, const N: usize> {
    lu: Matrix<T, N, N>,
}

impl<T: FloatScalar, const N: usize> LuDecomposition<T, N> {
    /// Decompose without any pivot check.
    pub fn new(a: &Matrix<T, N, N>) -> Self {
        let mut lu = *a;
        lu_in_place(lu.as_mut_slice(), N);
        Self { lu }
    }

    /// Decompose, failing at the first pivot not above `tol` in magnitude.
    pub fn try_new(a: &Matrix<T, N, N>, tol: T) -> Result<Self, LinalgError> {
        let mut lu = *a;
        try_lu_in_place(lu.as_mut_slice(), N, tol)?;
        Ok(Self { lu })
    }

    /// Packed factors: U on and above the diagonal, L strictly below.
    #[inline]
    pub fn packed(&self) -> &Matrix<T, N, N> {
        &self.lu
    }

    /// Unit lower-triangular factor L.
    pub fn l(&self) -> Matrix<T, N, N> {
        Matrix::from_fn(|i, j| match i.cmp(&j) {
            core::cmp::Ordering::Greater => self.lu[(i, j)],
            core::cmp::Ordering::Equal => T::one(),
            core::cmp::Ordering::Less => T::zero(),
        })
    }

    /// Upper-triangular factor U.
    pub fn u(&self) -> Matrix<T, N, N> {
        Matrix::from_fn(|i, j| if i <= j { self.lu[(i, j)] } else { T::zero() })
    }

    /// Solve Ax = b for x.
    pub fn solve(&self, b: &Vector<T, N>) -> Vector<T, N> {
        let mut x = *b;
        substitute(self.lu.as_slice(), N, x.as_mut_slice());
        x
    }

    /// Compute the matrix inverse.
    pub fn inverse(&self) -> Matrix<T, N, N> {
        let mut inv = Matrix::<T, N, N>::zeros();
        let mut col = [T::zero(); N];
        solve_columns(self.lu.as_slice(), N, inv.as_mut_slice(), &mut col);
        inv
    }

    /// Determinant: product of U's diagonal (no row swaps, so no sign flip).
    pub fn det(&self) -> T {
        let mut d = T::one();
        for i in 0..N {
            d = d * self.lu[(i, i)];
        }
        d
    }
}

/// Convenience methods on square matrices.
impl<T: FloatScalar, const N: usize> Matrix<T, N, N> {
    /// LU decomposition without pivoting or pivot checks.
    pub fn lu(&self) -> LuDecomposition<T, N> {
        LuDecomposition::new(self)
    }

    /// LU decomposition rejecting pivots not above
    /// [`T::pivot_tol`](FloatScalar::pivot_tol) of this matrix.
    pub fn try_lu(&self) -> Result<LuDecomposition<T, N>, LinalgError> {
        LuDecomposition::try_new(self, T::pivot_tol(self.as_slice()))
    }

    /// Inverse via no-pivot LU.
    ///
    /// Entries are `inf`/`NaN` when a pivot vanishes; see
    /// [`try_inverse`](Self::try_inverse) for a checked version.
    ///
    /// ```
    /// use rowmat::Matrix;
    /// let a = Matrix::new([[4.0_f64, 7.0], [2.0, 6.0]]);
    /// let a_inv = a.inverse();
    /// let id = a * a_inv;
    /// assert!((id[(0, 0)] - 1.0).abs() < 1e-12);
    /// assert!((id[(0, 1)]).abs() < 1e-12);
    /// ```
    pub fn inverse(&self) -> Self {
        self.lu().inverse()
    }

    /// Checked inverse with a tolerance relative to the matrix scale.
    ///
    /// A pivot fails when `|pivot| <= T::epsilon() * max|a_ij|`, so a
    /// uniformly scaled matrix is accepted or rejected alike at any scale.
    ///
    /// ```
    /// use rowmat::Matrix;
    /// let tiny = Matrix::new([[1e-8_f32, 0.0], [0.0, 1e-8]]);
    /// let inv = tiny.try_inverse().unwrap();
    /// assert!((inv[(0, 0)] * 1e-8 - 1.0).abs() < 1e-6);
    /// ```
    pub fn try_inverse(&self) -> Result<Self, LinalgError> {
        self.try_inverse_tol(T::pivot_tol(self.as_slice()))
    }

    /// Checked inverse with an explicit, absolute pivot tolerance.
    pub fn try_inverse_tol(&self, tol: T) -> Result<Self, LinalgError> {
        Ok(LuDecomposition::try_new(self, tol)?.inverse())
    }

    /// Solve `Ax = b` for `x` via no-pivot LU.
    ///
    /// ```
    /// use rowmat::{Matrix, Vector};
    /// let a = Matrix::new([
    ///     [4.0_f64, 1.0, -1.0],
    ///     [2.0, 5.0, 1.0],
    ///     [1.0, -1.0, 6.0],
    /// ]);
    /// let b = Vector::from_array([3.0, 9.0, 12.0]);
    /// let x = a.solve(&b);
    /// assert!((x[0] - 1.0).abs() < 1e-12);
    /// assert!((x[1] - 1.0).abs() < 1e-12);
    /// assert!((x[2] - 2.0).abs() < 1e-12);
    /// ```
    pub fn solve(&self, b: &Vector<T, N>) -> Vector<T, N> {
        self.lu().solve(b)
    }

    /// Checked solve with the default tolerance.
    pub fn try_solve(&self, b: &Vector<T, N>) -> Result<Vector<T, N>, LinalgError> {
        Ok(self.try_lu()?.solve(b))
    }

    /// Determinant via no-pivot LU.
    pub fn det(&self) -> T {
        self.lu().det()
    }
}
