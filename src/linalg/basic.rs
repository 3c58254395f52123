use crate::linalg::{check_len, element_count, LinalgError};
use crate::traits::Scalar;

/// Matrix product `C(m×l) = A(m×n) · B(n×l)`, all row-major.
///
/// Each output cell is accumulated from zero with `k` ascending. `c` is
/// fully overwritten. Panics if a buffer is shorter than its dimensions.
///
/// ```
/// use rowmat::linalg::multiply;
///
/// let a = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0]; // 2x3
/// let b = [7.0, 8.0, 9.0, 10.0, 11.0, 12.0]; // 3x2
/// let mut c = [0.0; 4];
/// multiply(&a, &b, 2, 3, 2, &mut c);
/// assert_eq!(c, [58.0, 64.0, 139.0, 154.0]);
/// ```
pub fn multiply<T: Scalar>(a: &[T], b: &[T], m: usize, n: usize, l: usize, c: &mut [T]) {
    for i in 0..m {
        let a_row = &a[i * n..(i + 1) * n];
        for j in 0..l {
            let mut sum = T::zero();
            for k in 0..n {
                sum = sum + a_row[k] * b[k * l + j];
            }
            c[i * l + j] = sum;
        }
    }
}

/// [`multiply`] with buffer length checks.
///
/// Dimensions whose buffer sizes overflow `usize` are reported as
/// [`LinalgError::DimensionOverflow`].
pub fn try_multiply<T: Scalar>(
    a: &[T],
    b: &[T],
    m: usize,
    n: usize,
    l: usize,
    c: &mut [T],
) -> Result<(), LinalgError> {
    check_len("a", a.len(), element_count(m, n)?)?;
    check_len("b", b.len(), element_count(n, l)?)?;
    check_len("c", c.len(), element_count(m, l)?)?;
    multiply(a, b, m, n, l, c);
    Ok(())
}

/// Transpose `A(m×n)` into `at(n×m)`.
///
/// ```
/// use rowmat::linalg::transpose;
///
/// let a = [1, 2, 3, 4, 5, 6]; // 2x3
/// let mut at = [0; 6];
/// transpose(&a, 2, 3, &mut at);
/// assert_eq!(at, [1, 4, 2, 5, 3, 6]);
/// ```
pub fn transpose<T: Copy>(a: &[T], m: usize, n: usize, at: &mut [T]) {
    for i in 0..m {
        for j in 0..n {
            at[j * m + i] = a[i * n + j];
        }
    }
}

/// [`transpose`] with buffer length checks.
pub fn try_transpose<T: Copy>(
    a: &[T],
    m: usize,
    n: usize,
    at: &mut [T],
) -> Result<(), LinalgError> {
    let len = element_count(m, n)?;
    check_len("a", a.len(), len)?;
    check_len("at", at.len(), len)?;
    transpose(a, m, n, at);
    Ok(())
}

/// Cross product of two 3-vectors, `a × b`.
///
/// ```
/// use rowmat::linalg::cross;
/// assert_eq!(cross(&[1.0, 0.0, 0.0], &[0.0, 1.0, 0.0]), [0.0, 0.0, 1.0]);
/// ```
#[inline]
pub fn cross<T: Scalar>(a: &[T; 3], b: &[T; 3]) -> [T; 3] {
    [
        a[1] * b[2] - a[2] * b[1],
        a[2] * b[0] - a[0] * b[2],
        a[0] * b[1] - a[1] * b[0],
    ]
}
