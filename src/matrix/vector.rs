use core::ops::{Index, IndexMut};

use crate::linalg::cross;
use crate::traits::Scalar;
use crate::Matrix;

/// A row vector (1×N matrix).
///
/// Its row-major buffer is just the `N` elements, so it doubles as the
/// right-hand side of [`Matrix::solve`].
///
/// ```
/// use rowmat::Vector;
///
/// let v = Vector::from_array([3.0_f64, 4.0]);
/// assert_eq!(v[0], 3.0);
/// assert_eq!(v.dot(&v), 25.0);
/// ```
pub type Vector<T, const N: usize> = Matrix<T, 1, N>;

/// A column vector (N×1 matrix).
pub type ColumnVector<T, const N: usize> = Matrix<T, N, 1>;

impl<T: Scalar, const N: usize> Vector<T, N> {
    /// Create a vector from a 1D array.
    #[inline]
    pub fn from_array(data: [T; N]) -> Self {
        Self::new([data])
    }

    /// Number of elements.
    #[inline]
    pub const fn len(&self) -> usize {
        N
    }

    /// Whether the vector has no elements.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        N == 0
    }

    /// Dot product of two vectors.
    #[inline]
    pub fn dot(&self, rhs: &Self) -> T {
        let mut sum = T::zero();
        for i in 0..N {
            sum = sum + self[i] * rhs[i];
        }
        sum
    }

    /// The elements as a plain array.
    #[inline]
    pub fn to_array(&self) -> [T; N] {
        self.data[0]
    }
}

impl<T: Scalar, const N: usize> ColumnVector<T, N> {
    /// Create a column vector from a 1D array.
    #[inline]
    pub fn from_column(data: [T; N]) -> Self {
        let mut out = Self::zeros();
        out.as_mut_slice().copy_from_slice(&data);
        out
    }
}

/// A 3-element row vector.
///
/// Adds `cross()` in addition to all `Vector` methods.
pub type Vector3<T> = Vector<T, 3>;

/// A 3-element column vector.
pub type ColumnVector3<T> = ColumnVector<T, 3>;

impl<T: Scalar> Vector3<T> {
    /// Cross product of two 3-vectors.
    ///
    /// ```
    /// use rowmat::Vector3;
    /// let x = Vector3::from_array([1.0, 0.0, 0.0]);
    /// let y = Vector3::from_array([0.0, 1.0, 0.0]);
    /// assert_eq!(x.cross(&y).to_array(), [0.0, 0.0, 1.0]);
    /// ```
    #[inline]
    pub fn cross(&self, rhs: &Self) -> Self {
        Self::new([cross(&self.data[0], &rhs.data[0])])
    }
}

impl<T: Scalar> ColumnVector3<T> {
    /// Cross product of two 3-element column vectors.
    #[inline]
    pub fn cross(&self, rhs: &Self) -> Self {
        let a = [self[(0, 0)], self[(1, 0)], self[(2, 0)]];
        let b = [rhs[(0, 0)], rhs[(1, 0)], rhs[(2, 0)]];
        Self::from_column(cross(&a, &b))
    }
}

// Single-index access: v[i] instead of v[(0, i)]
impl<T, const N: usize> Index<usize> for Vector<T, N> {
    type Output = T;

    #[inline]
    fn index(&self, i: usize) -> &T {
        &self.data[0][i]
    }
}

impl<T, const N: usize> IndexMut<usize> for Vector<T, N> {
    #[inline]
    fn index_mut(&mut self, i: usize) -> &mut T {
        &mut self.data[0][i]
    }
}
