use core::ops::{Add, AddAssign, Mul, MulAssign, Neg, Sub, SubAssign};

use crate::linalg::{multiply, transpose};
use crate::traits::Scalar;

use super::DynMatrix;

// ── Element-wise addition / subtraction ─────────────────────────────

macro_rules! impl_elementwise {
    ($Op:ident, $method:ident, $OpAssign:ident, $method_assign:ident, $op:tt, $sym:literal) => {
        impl<T: Scalar> $OpAssign<&DynMatrix<T>> for DynMatrix<T> {
            fn $method_assign(&mut self, rhs: &DynMatrix<T>) {
                assert_eq!(
                    (self.nrows, self.ncols),
                    (rhs.nrows, rhs.ncols),
                    concat!("dimension mismatch: {}x{} ", $sym, " {}x{}"),
                    self.nrows, self.ncols, rhs.nrows, rhs.ncols,
                );
                for (x, &y) in self.data.iter_mut().zip(&rhs.data) {
                    *x = *x $op y;
                }
            }
        }

        impl<T: Scalar> $OpAssign for DynMatrix<T> {
            fn $method_assign(&mut self, rhs: Self) {
                self.$method_assign(&rhs);
            }
        }

        impl<T: Scalar> $Op<&DynMatrix<T>> for DynMatrix<T> {
            type Output = DynMatrix<T>;
            fn $method(mut self, rhs: &DynMatrix<T>) -> DynMatrix<T> {
                self.$method_assign(rhs);
                self
            }
        }

        impl<T: Scalar> $Op for DynMatrix<T> {
            type Output = Self;
            fn $method(self, rhs: Self) -> Self {
                self.$method(&rhs)
            }
        }

        impl<T: Scalar> $Op<&DynMatrix<T>> for &DynMatrix<T> {
            type Output = DynMatrix<T>;
            fn $method(self, rhs: &DynMatrix<T>) -> DynMatrix<T> {
                self.clone().$method(rhs)
            }
        }
    };
}

impl_elementwise!(Add, add, AddAssign, add_assign, +, "+");
impl_elementwise!(Sub, sub, SubAssign, sub_assign, -, "-");

// ── Negation ────────────────────────────────────────────────────────

impl<T: Scalar> Neg for DynMatrix<T> {
    type Output = Self;

    fn neg(mut self) -> Self {
        for x in self.data.iter_mut() {
            *x = T::zero() - *x;
        }
        self
    }
}

// ── Matrix multiplication: (M×N) * (N×P) → (M×P) ──────────────────

impl<T: Scalar> Mul<&DynMatrix<T>> for &DynMatrix<T> {
    type Output = DynMatrix<T>;

    fn mul(self, rhs: &DynMatrix<T>) -> DynMatrix<T> {
        assert_eq!(
            self.ncols, rhs.nrows,
            "dimension mismatch: {}x{} * {}x{}",
            self.nrows, self.ncols, rhs.nrows, rhs.ncols,
        );
        let mut out = DynMatrix::zeros(self.nrows, rhs.ncols);
        multiply(
            &self.data,
            &rhs.data,
            self.nrows,
            self.ncols,
            rhs.ncols,
            &mut out.data,
        );
        out
    }
}

impl<T: Scalar> Mul for DynMatrix<T> {
    type Output = Self;
    fn mul(self, rhs: Self) -> Self {
        &self * &rhs
    }
}

impl<T: Scalar> Mul<&DynMatrix<T>> for DynMatrix<T> {
    type Output = DynMatrix<T>;
    fn mul(self, rhs: &DynMatrix<T>) -> DynMatrix<T> {
        &self * rhs
    }
}

impl<T: Scalar> Mul<DynMatrix<T>> for &DynMatrix<T> {
    type Output = DynMatrix<T>;
    fn mul(self, rhs: DynMatrix<T>) -> DynMatrix<T> {
        self * &rhs
    }
}

// ── Scalar multiplication ───────────────────────────────────────────

impl<T: Scalar> MulAssign<T> for DynMatrix<T> {
    fn mul_assign(&mut self, rhs: T) {
        for x in self.data.iter_mut() {
            *x = *x * rhs;
        }
    }
}

impl<T: Scalar> Mul<T> for DynMatrix<T> {
    type Output = Self;
    fn mul(mut self, rhs: T) -> Self {
        self *= rhs;
        self
    }
}

impl<T: Scalar> Mul<T> for &DynMatrix<T> {
    type Output = DynMatrix<T>;
    fn mul(self, rhs: T) -> DynMatrix<T> {
        self.clone() * rhs
    }
}

// ── Transpose ───────────────────────────────────────────────────────

impl<T: Scalar> DynMatrix<T> {
    /// Transpose: (m×n) → (n×m).
    ///
    /// ```
    /// use rowmat::DynMatrix;
    /// let a = DynMatrix::from_rows(2, 3, &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
    /// let t = a.transpose();
    /// assert_eq!(t.nrows(), 3);
    /// assert_eq!(t[(1, 0)], 2.0);
    /// ```
    pub fn transpose(&self) -> Self {
        let mut out = DynMatrix::zeros(self.ncols, self.nrows);
        transpose(&self.data, self.nrows, self.ncols, &mut out.data);
        out
    }
}
