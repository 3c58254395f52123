use crate::traits::{FloatScalar, Scalar};
use crate::Matrix;

// ── Constructors ────────────────────────────────────────────────────

impl<T: Scalar, const M: usize, const N: usize> Matrix<T, M, N> {
    /// Create a matrix by calling `f(row, col)` for each element.
    ///
    /// ```
    /// use rowmat::Matrix;
    /// let m: Matrix<f64, 3, 3> = Matrix::from_fn(|i, j| {
    ///     if i == j { 1.0 } else { 0.0 }
    /// });
    /// assert_eq!(m, Matrix::eye());
    /// ```
    pub fn from_fn(f: impl Fn(usize, usize) -> T) -> Self {
        let mut out = Self::zeros();
        for i in 0..M {
            for j in 0..N {
                out.data[i][j] = f(i, j);
            }
        }
        out
    }

    /// Create a matrix from a row-major slice of exactly `M * N` elements.
    ///
    /// Panics on any other length.
    ///
    /// ```
    /// use rowmat::Matrix;
    /// let m: Matrix<f64, 2, 3> = Matrix::from_slice(&[1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
    /// assert_eq!(m[(1, 0)], 4.0);
    /// ```
    pub fn from_slice(row_major: &[T]) -> Self {
        assert_eq!(
            row_major.len(),
            M * N,
            "slice length {} does not match {}x{} matrix",
            row_major.len(),
            M,
            N,
        );
        let mut out = Self::zeros();
        out.as_mut_slice().copy_from_slice(row_major);
        out
    }

    /// Apply a function to every element, producing a new matrix.
    pub fn map<U: Scalar>(&self, f: impl Fn(T) -> U) -> Matrix<U, M, N> {
        Matrix::from_fn(|i, j| f(self.data[i][j]))
    }
}

// ── Float checks ────────────────────────────────────────────────────

impl<T: FloatScalar, const M: usize, const N: usize> Matrix<T, M, N> {
    /// `true` when no element is `NaN` or infinite.
    ///
    /// The unchecked inverse and pseudo-inverse report a vanished pivot only
    /// through non-finite output, so this is the cheap way to test for it.
    ///
    /// ```
    /// use rowmat::Matrix;
    /// let swap = Matrix::new([[0.0_f64, 1.0], [1.0, 0.0]]);
    /// assert!(!swap.inverse().is_finite());
    /// ```
    pub fn is_finite(&self) -> bool {
        self.as_slice().iter().all(|x| x.is_finite())
    }

    /// Largest element-wise absolute difference to `other`.
    ///
    /// `NaN` if either matrix holds a `NaN`.
    pub fn max_abs_diff(&self, other: &Self) -> T {
        let mut max = T::zero();
        for (&a, &b) in self.as_slice().iter().zip(other.as_slice()) {
            let d = (a - b).abs();
            if d.is_nan() {
                return d;
            }
            if d > max {
                max = d;
            }
        }
        max
    }
}
