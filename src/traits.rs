use core::fmt::Debug;
use num_traits::{Float, Num, One, Zero};

/// Trait for types that can be used as matrix elements.
///
/// Blanket-implemented for all types satisfying the bounds.
/// Covers `f32`, `f64`, and all integer types, so multiplication and
/// transposition work on integer matrices too.
pub trait Scalar: Copy + PartialEq + Debug + Zero + One + Num {}

impl<T: Copy + PartialEq + Debug + Zero + One + Num> Scalar for T {}

/// Trait for floating-point matrix elements.
///
/// Required by everything that divides: LU inversion, pseudo-inverses,
/// and the tolerance checks of the `try_*` operations. `f32` and `f64`
/// are parallel instantiations of the same generic code; no operation
/// mixes the two.
pub trait FloatScalar: Scalar + Float {
    /// Default pivot tolerance for checked operations on the matrix with
    /// these entries: `epsilon * max|entry|`.
    ///
    /// Scaling by the largest entry keeps `1e-8·I` invertible while an
    /// all-zero matrix still fails (its tolerance is zero and so is every
    /// pivot). `NaN` entries are skipped here; they surface as non-finite
    /// pivots instead. The `*_tol` variants take an absolute tolerance.
    ///
    /// ```
    /// use rowmat::FloatScalar;
    /// assert_eq!(f64::pivot_tol(&[1.0, -4.0, 2.0]), 4.0 * f64::EPSILON);
    /// assert_eq!(f32::pivot_tol(&[]), 0.0);
    /// ```
    fn pivot_tol(entries: &[Self]) -> Self {
        let mut max = Self::zero();
        for &x in entries {
            let a = x.abs();
            if a > max {
                max = a;
            }
        }
        Self::epsilon() * max
    }
}

impl<T: Scalar + Float> FloatScalar for T {}

/// Read-only access to a row-major matrix.
///
/// Implemented by [`Matrix`](crate::Matrix) and
/// [`DynMatrix`](crate::DynMatrix) so generic helpers can accept either.
/// `as_slice()` exposes the contiguous row-major buffer consumed by the
/// slice kernel in [`linalg`](crate::linalg).
pub trait MatrixRef<T> {
    fn nrows(&self) -> usize;
    fn ncols(&self) -> usize;
    fn get(&self, row: usize, col: usize) -> &T;

    /// Row-major backing storage, `nrows * ncols` elements.
    fn as_slice(&self) -> &[T];

    /// Contiguous slice of one row.
    #[inline]
    fn row_as_slice(&self, row: usize) -> &[T] {
        let n = self.ncols();
        &self.as_slice()[row * n..(row + 1) * n]
    }
}

/// Mutable access to a row-major matrix.
pub trait MatrixMut<T>: MatrixRef<T> {
    fn get_mut(&mut self, row: usize, col: usize) -> &mut T;

    /// Mutable row-major backing storage.
    fn as_mut_slice(&mut self) -> &mut [T];
}
