use crate::linalg::basic::{multiply, transpose};
use crate::linalg::lu::{
    checked_invert_scratch_len, invert, invert_scratch_len, try_invert, LuDecomposition,
};
use crate::linalg::{check_len, check_nonempty, element_count, overflow, LinalgError};
use crate::traits::FloatScalar;
use crate::Matrix;

/// Scratch elements [`pseudo_inverse`] needs for an `m×n` input.
///
/// Holds `Aᵗ` (n×m), the k×k Gram matrix and its inverse, and the scratch
/// of the inner [`invert`], with `k = min(m, n)`.
#[inline]
pub const fn pseudo_inverse_scratch_len(m: usize, n: usize) -> usize {
    let k = if m < n { m } else { n };
    n * m + 2 * k * k + invert_scratch_len(k)
}

/// Scratch elements [`weighted_pseudo_inverse`] needs for `A` (m×n) and a
/// weight of order `l`.
#[inline]
pub const fn weighted_pseudo_inverse_scratch_len(m: usize, n: usize, l: usize) -> usize {
    let k = if l > m { l } else { m };
    // Aᵗ, W⁻¹, A·W⁻¹, A·W⁻¹·Aᵗ and its inverse, W⁻¹·Aᵗ
    n * m + l * l + m * l + 2 * m * m + l * m + invert_scratch_len(k)
}

fn checked_pseudo_inverse_scratch_len(m: usize, n: usize) -> Result<usize, LinalgError> {
    let k = m.min(n);
    let kk = element_count(k, k)?;
    [element_count(n, m)?, kk, kk, checked_invert_scratch_len(k)?]
        .into_iter()
        .try_fold(0usize, usize::checked_add)
        .ok_or_else(|| overflow(m, n))
}

fn checked_weighted_pseudo_inverse_scratch_len(
    m: usize,
    n: usize,
    l: usize,
) -> Result<usize, LinalgError> {
    let mm = element_count(m, m)?;
    let ml = element_count(m, l)?;
    [
        element_count(n, m)?,
        element_count(l, l)?,
        ml,
        mm,
        mm,
        ml,
        checked_invert_scratch_len(l.max(m))?,
    ]
    .into_iter()
    .try_fold(0usize, usize::checked_add)
    .ok_or_else(|| overflow(m, n))
}

fn pinv_with<T, F>(
    a: &[T],
    m: usize,
    n: usize,
    a_pinv: &mut [T],
    scratch: &mut [T],
    mut inv: F,
) -> Result<(), LinalgError>
where
    T: FloatScalar,
    F: FnMut(&[T], usize, &mut [T], &mut [T]) -> Result<(), LinalgError>,
{
    let k = m.min(n);
    let (at, rest) = scratch.split_at_mut(n * m);
    let (gram, rest) = rest.split_at_mut(k * k);
    let (gram_inv, inv_scratch) = rest.split_at_mut(k * k);

    transpose(a, m, n, at);
    if m < n {
        // Full row rank: A⁺ = Aᵗ·(A·Aᵗ)⁻¹
        multiply(a, at, m, n, m, gram);
        inv(&*gram, m, &mut *gram_inv, &mut *inv_scratch)?;
        multiply(at, gram_inv, n, m, m, a_pinv);
    } else {
        // Full column rank: A⁺ = (Aᵗ·A)⁻¹·Aᵗ
        multiply(at, a, n, m, n, gram);
        inv(&*gram, n, &mut *gram_inv, &mut *inv_scratch)?;
        multiply(gram_inv, at, n, n, m, a_pinv);
    }
    Ok(())
}

/// Moore-Penrose pseudo-inverse of a full-rank `A` (m×n) into `a_pinv` (n×m).
///
/// - `m < n` (full row rank assumed): `A⁺ = Aᵗ·(A·Aᵗ)⁻¹`
/// - `m ≥ n` (full column rank assumed): `A⁺ = (Aᵗ·A)⁻¹·Aᵗ`
///
/// Built only from [`transpose`], [`multiply`] and [`invert`], so it
/// inherits the no-pivot behaviour: rank-deficient input is not detected
/// and comes back as `inf`/`NaN` or meaningless values. `scratch` must hold
/// [`pseudo_inverse_scratch_len`]`(m, n)` elements.
///
/// ```
/// use rowmat::linalg::{pseudo_inverse, pseudo_inverse_scratch_len};
///
/// // 3x2, full column rank
/// let a = [1.0_f64, 2.0, 3.0, 4.0, 5.0, 6.0];
/// let mut a_pinv = [0.0; 6];
/// let mut scratch = vec![0.0; pseudo_inverse_scratch_len(3, 2)];
/// pseudo_inverse(&a, 3, 2, &mut a_pinv, &mut scratch);
/// assert!((a_pinv[0] + 4.0 / 3.0).abs() < 1e-10);
/// ```
pub fn pseudo_inverse<T: FloatScalar>(
    a: &[T],
    m: usize,
    n: usize,
    a_pinv: &mut [T],
    scratch: &mut [T],
) {
    let _ = pinv_with(a, m, n, a_pinv, scratch, |g, k, g_inv, s| {
        invert(g, k, g_inv, s);
        Ok(())
    });
}

/// Checked [`pseudo_inverse`].
///
/// Validates buffers and rejects empty input. The full-rank assumption is
/// checked indirectly: a rank-deficient `A` makes the Gram matrix singular,
/// which fails the pivot test of the inner [`try_invert`] with `tol`.
pub fn try_pseudo_inverse<T: FloatScalar>(
    a: &[T],
    m: usize,
    n: usize,
    a_pinv: &mut [T],
    scratch: &mut [T],
    tol: T,
) -> Result<(), LinalgError> {
    try_pseudo_inverse_by(a, m, n, a_pinv, scratch, |_| tol)
}

/// Checked pseudo-inverse whose Gram pivot tolerance is `tol_for(gram)`.
pub(crate) fn try_pseudo_inverse_by<T: FloatScalar>(
    a: &[T],
    m: usize,
    n: usize,
    a_pinv: &mut [T],
    scratch: &mut [T],
    tol_for: impl Fn(&[T]) -> T,
) -> Result<(), LinalgError> {
    check_nonempty(m, n)?;
    let len = element_count(m, n)?;
    let scratch_len = checked_pseudo_inverse_scratch_len(m, n)?;
    check_len("a", a.len(), len)?;
    check_len("a_pinv", a_pinv.len(), len)?;
    check_len("scratch", scratch.len(), scratch_len)?;
    pinv_with(a, m, n, a_pinv, scratch, |g, k, g_inv, s| {
        try_invert(g, k, g_inv, s, tol_for(&g[..k * k]))
    })
}

#[allow(clippy::too_many_arguments)]
fn wpinv_with<T, F>(
    a: &[T],
    w: &[T],
    m: usize,
    n: usize,
    l: usize,
    a_wpinv: &mut [T],
    scratch: &mut [T],
    mut inv: F,
) -> Result<(), LinalgError>
where
    T: FloatScalar,
    F: FnMut(&[T], usize, &mut [T], &mut [T]) -> Result<(), LinalgError>,
{
    let (at, rest) = scratch.split_at_mut(n * m);
    let (w_inv, rest) = rest.split_at_mut(l * l);
    let (aw, rest) = rest.split_at_mut(m * l);
    let (awa, rest) = rest.split_at_mut(m * m);
    let (awa_inv, rest) = rest.split_at_mut(m * m);
    let (wa, inv_scratch) = rest.split_at_mut(l * m);

    transpose(a, m, n, at);
    inv(w, l, &mut *w_inv, &mut *inv_scratch)?;

    multiply(a, w_inv, m, n, l, aw);
    multiply(aw, at, m, l, m, awa);
    inv(&*awa, m, &mut *awa_inv, &mut *inv_scratch)?;

    multiply(w_inv, at, l, l, m, wa);
    multiply(wa, awa_inv, l, m, m, a_wpinv);
    Ok(())
}

/// Weighted pseudo-inverse `A⁺_w = W⁻¹·Aᵗ·(A·W⁻¹·Aᵗ)⁻¹` into `a_wpinv` (l×m).
///
/// `A` is m×n and `W` is n×l. W is inverted as an l×l matrix, so it must be
/// square with `l == n`; any other `l` reads the wrong elements or panics.
/// Both W and the m×m matrix `A·W⁻¹·Aᵗ` go through the no-pivot [`invert`],
/// and neither is checked. `scratch` must hold
/// [`weighted_pseudo_inverse_scratch_len`]`(m, n, l)` elements.
///
/// With `W = I` this is the full-row-rank branch of [`pseudo_inverse`].
#[allow(clippy::too_many_arguments)]
pub fn weighted_pseudo_inverse<T: FloatScalar>(
    a: &[T],
    w: &[T],
    m: usize,
    n: usize,
    l: usize,
    a_wpinv: &mut [T],
    scratch: &mut [T],
) {
    let _ = wpinv_with(a, w, m, n, l, a_wpinv, scratch, |g, k, g_inv, s| {
        invert(g, k, g_inv, s);
        Ok(())
    });
}

/// Checked [`weighted_pseudo_inverse`].
///
/// Fails with [`LinalgError::DimensionMismatch`] unless `W` is n×n, and with
/// [`LinalgError::Singular`] when W or `A·W⁻¹·Aᵗ` has a pivot not above `tol`.
#[allow(clippy::too_many_arguments)]
pub fn try_weighted_pseudo_inverse<T: FloatScalar>(
    a: &[T],
    w: &[T],
    m: usize,
    n: usize,
    l: usize,
    a_wpinv: &mut [T],
    scratch: &mut [T],
    tol: T,
) -> Result<(), LinalgError> {
    try_weighted_pseudo_inverse_by(a, w, m, n, l, a_wpinv, scratch, |_| tol)
}

/// Checked weighted pseudo-inverse; each inverted matrix `g` gets the
/// pivot tolerance `tol_for(g)`.
#[allow(clippy::too_many_arguments)]
pub(crate) fn try_weighted_pseudo_inverse_by<T: FloatScalar>(
    a: &[T],
    w: &[T],
    m: usize,
    n: usize,
    l: usize,
    a_wpinv: &mut [T],
    scratch: &mut [T],
    tol_for: impl Fn(&[T]) -> T,
) -> Result<(), LinalgError> {
    check_nonempty(m, n)?;
    if l != n {
        #[cfg(feature = "tracing")]
        tracing::debug!(n, l, "weight matrix is not n x n");
        return Err(LinalgError::DimensionMismatch {
            expected: (n, n),
            got: (n, l),
        });
    }
    let scratch_len = checked_weighted_pseudo_inverse_scratch_len(m, n, l)?;
    check_len("a", a.len(), element_count(m, n)?)?;
    check_len("w", w.len(), element_count(n, l)?)?;
    check_len("a_wpinv", a_wpinv.len(), element_count(l, m)?)?;
    check_len("scratch", scratch.len(), scratch_len)?;
    wpinv_with(a, w, m, n, l, a_wpinv, scratch, |g, k, g_inv, s| {
        try_invert(g, k, g_inv, s, tol_for(&g[..k * k]))
    })
}

/// Pseudo-inverses of fixed-size matrices.
///
/// The Gram matrix is `M×M` or `N×N` depending on the branch, both sized at
/// compile time, so nothing is allocated.
impl<T: FloatScalar, const M: usize, const N: usize> Matrix<T, M, N> {
    /// Moore-Penrose pseudo-inverse, assuming full rank.
    ///
    /// ```
    /// use rowmat::Matrix;
    ///
    /// let a = Matrix::new([[1.0_f64, 2.0], [3.0, 4.0], [5.0, 6.0]]);
    /// let id = a.pinv() * a;
    /// assert!((id[(0, 0)] - 1.0).abs() < 1e-10);
    /// assert!(id[(0, 1)].abs() < 1e-10);
    /// ```
    pub fn pinv(&self) -> Matrix<T, N, M> {
        let at = self.transpose();
        if M < N {
            let gram: Matrix<T, M, M> = self * at;
            at * gram.inverse()
        } else {
            let gram: Matrix<T, N, N> = at * self;
            gram.inverse() * at
        }
    }

    /// Checked pseudo-inverse; the Gram matrix pivots are tested against
    /// [`T::pivot_tol`](FloatScalar::pivot_tol) of the Gram matrix.
    pub fn try_pinv(&self) -> Result<Matrix<T, N, M>, LinalgError> {
        self.try_pinv_by(T::pivot_tol)
    }

    /// Checked pseudo-inverse; `tol` is an absolute bound on the Gram
    /// matrix pivots.
    pub fn try_pinv_tol(&self, tol: T) -> Result<Matrix<T, N, M>, LinalgError> {
        self.try_pinv_by(|_| tol)
    }

    fn try_pinv_by(&self, tol_for: impl Fn(&[T]) -> T) -> Result<Matrix<T, N, M>, LinalgError> {
        check_nonempty(M, N)?;
        let at = self.transpose();
        if M < N {
            let gram: Matrix<T, M, M> = self * at;
            let tol = tol_for(gram.as_slice());
            Ok(at * LuDecomposition::try_new(&gram, tol)?.inverse())
        } else {
            let gram: Matrix<T, N, N> = at * self;
            let tol = tol_for(gram.as_slice());
            Ok(LuDecomposition::try_new(&gram, tol)?.inverse() * at)
        }
    }

    /// Weighted pseudo-inverse `W⁻¹·Aᵗ·(A·W⁻¹·Aᵗ)⁻¹`.
    ///
    /// The weight is `N×N`, so the shape rule `l == n` holds by construction.
    ///
    /// ```
    /// use rowmat::Matrix;
    ///
    /// let a = Matrix::new([[1.0_f64, 0.0, 1.0], [0.0, 1.0, 1.0]]);
    /// let w = Matrix::new([[1.0, 0.0, 0.0], [0.0, 2.0, 0.0], [0.0, 0.0, 4.0]]);
    /// let id = a * a.weighted_pinv(&w);
    /// assert!((id[(0, 0)] - 1.0).abs() < 1e-12);
    /// assert!(id[(1, 0)].abs() < 1e-12);
    /// ```
    pub fn weighted_pinv(&self, w: &Matrix<T, N, N>) -> Matrix<T, N, M> {
        let at = self.transpose();
        let w_inv = w.inverse();
        let awa: Matrix<T, M, M> = self * w_inv * at;
        w_inv * at * awa.inverse()
    }

    /// Checked weighted pseudo-inverse. `W` and `A·W⁻¹·Aᵗ` are each tested
    /// against their own [`T::pivot_tol`](FloatScalar::pivot_tol).
    pub fn try_weighted_pinv(&self, w: &Matrix<T, N, N>) -> Result<Matrix<T, N, M>, LinalgError> {
        self.try_weighted_pinv_by(w, T::pivot_tol)
    }

    /// Checked weighted pseudo-inverse; `tol` is an absolute bound on the
    /// pivots of both inversions.
    pub fn try_weighted_pinv_tol(
        &self,
        w: &Matrix<T, N, N>,
        tol: T,
    ) -> Result<Matrix<T, N, M>, LinalgError> {
        self.try_weighted_pinv_by(w, |_| tol)
    }

    fn try_weighted_pinv_by(
        &self,
        w: &Matrix<T, N, N>,
        tol_for: impl Fn(&[T]) -> T,
    ) -> Result<Matrix<T, N, M>, LinalgError> {
        check_nonempty(M, N)?;
        let at = self.transpose();
        let w_inv = w.try_inverse_tol(tol_for(w.as_slice()))?;
        let awa: Matrix<T, M, M> = self * w_inv * at;
        let awa_inv = awa.try_inverse_tol(tol_for(awa.as_slice()))?;
        Ok(w_inv * at * awa_inv)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tall_pinv_is_left_inverse() {
        let a = Matrix::new([[1.0_f64, 2.0], [3.0, 4.0], [5.0, 6.0]]);
        let id = a.pinv() * a;
        for i in 0..2 {
            for j in 0..2 {
                let expected = if i == j { 1.0 } else { 0.0 };
                assert!((id[(i, j)] - expected).abs() < 1e-10);
            }
        }
    }

    #[test]
    fn tall_pinv_known_values() {
        // (AᵗA)⁻¹Aᵗ for [[1,2],[3,4],[5,6]]
        let a = Matrix::new([[1.0_f64, 2.0], [3.0, 4.0], [5.0, 6.0]]);
        let p = a.pinv();
        let expected = [
            [-4.0 / 3.0, -1.0 / 3.0, 2.0 / 3.0],
            [13.0 / 12.0, 1.0 / 3.0, -5.0 / 12.0],
        ];
        for i in 0..2 {
            for j in 0..3 {
                assert!((p[(i, j)] - expected[i][j]).abs() < 1e-10);
            }
        }
    }

    #[test]
    fn wide_pinv_is_right_inverse() {
        let a = Matrix::new([[1.0_f64, 0.0, 2.0], [0.0, 1.0, -1.0]]);
        let id = a * a.pinv();
        for i in 0..2 {
            for j in 0..2 {
                let expected = if i == j { 1.0 } else { 0.0 };
                assert!((id[(i, j)] - expected).abs() < 1e-12);
            }
        }
    }

    #[test]
    fn square_pinv_is_inverse() {
        let a = Matrix::new([[4.0_f64, 1.0], [2.0, 3.0]]);
        let p = a.pinv();
        let inv = a.inverse();
        for i in 0..2 {
            for j in 0..2 {
                assert!((p[(i, j)] - inv[(i, j)]).abs() < 1e-12);
            }
        }
    }

    #[test]
    fn slice_pinv_matches_matrix_pinv() {
        let a = Matrix::new([[2.0_f64, 1.0, 0.0, 1.0], [1.0, 3.0, 1.0, 0.0]]);
        let mut out = [0.0; 8];
        let mut scratch = [0.0; pseudo_inverse_scratch_len(2, 4)];
        pseudo_inverse(a.as_slice(), 2, 4, &mut out, &mut scratch);
        assert_eq!(&out[..], a.pinv().as_slice());
    }

    #[test]
    fn rank_deficient_pinv_is_garbage_or_error() {
        let a = Matrix::new([[1.0_f64, 2.0], [2.0, 4.0], [3.0, 6.0]]);
        assert!(!a.pinv().is_finite());
        assert_eq!(a.try_pinv().unwrap_err(), LinalgError::Singular { pivot: 1 });
    }

    #[test]
    fn weighted_identity_matches_wide_pinv() {
        let a = Matrix::new([[1.0_f64, 2.0, 0.0], [0.0, 1.0, 3.0]]);
        let w: Matrix<f64, 3, 3> = Matrix::eye();
        let wp = a.weighted_pinv(&w);
        let p = a.pinv();
        for i in 0..3 {
            for j in 0..2 {
                assert!((wp[(i, j)] - p[(i, j)]).abs() < 1e-12);
            }
        }
    }

    #[test]
    fn weighted_pinv_prefers_cheap_coordinates() {
        // One equation x + y = 1; a heavy weight on y pushes the solution to x.
        let a = Matrix::new([[1.0_f64, 1.0]]);
        let w = Matrix::new([[1.0, 0.0], [0.0, 100.0]]);
        let wp = a.weighted_pinv(&w);
        assert!((wp[(0, 0)] - 100.0 / 101.0).abs() < 1e-12);
        assert!((wp[(1, 0)] - 1.0 / 101.0).abs() < 1e-12);
    }

    #[test]
    fn slice_weighted_matches_matrix_version() {
        let a = Matrix::new([[1.0_f64, 0.5, 0.0], [0.0, 1.0, 2.0]]);
        let w = Matrix::new([[2.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 3.0]]);
        let mut out = [0.0; 6];
        let mut scratch = [0.0; weighted_pseudo_inverse_scratch_len(2, 3, 3)];
        weighted_pseudo_inverse(a.as_slice(), w.as_slice(), 2, 3, 3, &mut out, &mut scratch);
        assert_eq!(&out[..], a.weighted_pinv(&w).as_slice());
    }

    #[test]
    fn try_weighted_rejects_non_square_weight() {
        let a = [1.0_f64, 0.0, 0.0, 1.0];
        let w = [1.0_f64; 6];
        let mut out = [0.0; 6];
        let mut scratch = [0.0; 64];
        assert_eq!(
            try_weighted_pseudo_inverse(&a, &w, 2, 2, 3, &mut out, &mut scratch, 1e-12),
            Err(LinalgError::DimensionMismatch {
                expected: (2, 2),
                got: (2, 3)
            })
        );
    }

    #[test]
    fn try_pinv_accepts_small_scale_input() {
        let a = Matrix::new([[1.0_f32, 2.0], [3.0, 4.0], [5.0, 6.0]]) * 1e-6;
        let p = a.try_pinv().unwrap();
        assert_eq!(p, a.pinv());
        // An absolute epsilon rejects the 1e-11 sized Gram matrix.
        assert!(a.try_pinv_tol(f32::EPSILON).is_err());

        let w = Matrix::new([[1e-9_f32, 0.0], [0.0, 2e-9]]);
        let wide = Matrix::new([[1e-6_f32, 3e-6]]);
        assert_eq!(wide.try_weighted_pinv(&w).unwrap(), wide.weighted_pinv(&w));
    }

    #[test]
    fn try_pinv_slices_report_size_overflow() {
        let a = [1.0_f64; 6];
        let w = [1.0_f64; 9];
        let mut out = [0.0; 6];
        let mut scratch = [0.0; 64];
        assert!(matches!(
            try_pseudo_inverse(&a, usize::MAX, 2, &mut out, &mut scratch, 1e-12),
            Err(LinalgError::DimensionOverflow { .. })
        ));
        // Each product fits, the scratch total does not.
        let big = 1usize << (usize::BITS / 2 - 1);
        assert!(matches!(
            try_pseudo_inverse(&a, big, big, &mut out, &mut scratch, 1e-12),
            Err(LinalgError::DimensionOverflow { .. })
        ));
        assert!(matches!(
            try_weighted_pseudo_inverse(
                &a,
                &w,
                2,
                usize::MAX,
                usize::MAX,
                &mut out,
                &mut scratch,
                1e-12
            ),
            Err(LinalgError::DimensionOverflow { .. })
        ));
    }

    #[test]
    fn try_weighted_rejects_singular_weight() {
        let a = Matrix::new([[1.0_f64, 1.0]]);
        let w = Matrix::new([[0.0, 1.0], [1.0, 0.0]]);
        assert_eq!(
            a.try_weighted_pinv(&w).unwrap_err(),
            LinalgError::Singular { pivot: 0 }
        );
    }

    #[test]
    fn try_pinv_slices_check_scratch() {
        let a = [1.0_f64, 2.0, 3.0, 4.0, 5.0, 6.0];
        let mut out = [0.0; 6];
        let mut scratch = [0.0; 4];
        assert!(matches!(
            try_pseudo_inverse(&a, 3, 2, &mut out, &mut scratch, 1e-12),
            Err(LinalgError::BufferTooSmall { name: "scratch", .. })
        ));
        assert_eq!(
            try_pseudo_inverse(&a, 0, 2, &mut out, &mut scratch, 1e-12),
            Err(LinalgError::Empty)
        );
    }
}
