use super::*;
use crate::Matrix;

fn approx_eq<const M: usize, const N: usize>(
    a: &Matrix<f64, M, N>,
    b: &Matrix<f64, M, N>,
    tol: f64,
) -> bool {
    a.max_abs_diff(b) < tol
}

#[test]
fn multiply_is_associative() {
    let a = Matrix::new([[1.0_f64, 2.0], [3.0, 4.0], [5.0, 6.0]]);
    let b = Matrix::new([[0.5_f64, -1.0, 2.0], [1.5, 0.25, -0.5]]);
    let c = Matrix::new([[2.0_f64], [-1.0], [0.5]]);
    let left = (a * b) * c;
    let right = a * (b * c);
    assert!(approx_eq(&left, &right, 1e-12));
}

#[test]
fn transpose_of_product() {
    let a = Matrix::new([[1.0_f64, 2.0, 3.0], [4.0, 5.0, 6.0]]);
    let b = Matrix::new([[7.0_f64, 8.0], [9.0, 10.0], [11.0, 12.0]]);
    assert_eq!((a * b).transpose(), b.transpose() * a.transpose());
}

#[test]
fn inverse_of_product_reverses_order() {
    let a = Matrix::new([[4.0_f64, 1.0, 0.0], [1.0, 3.0, 1.0], [0.0, 1.0, 2.0]]);
    let b = Matrix::new([[2.0_f64, 0.5, 0.0], [0.0, 5.0, 1.0], [1.0, 0.0, 3.0]]);
    let lhs = (a * b).inverse();
    let rhs = b.inverse() * a.inverse();
    assert!(approx_eq(&lhs, &rhs, 1e-12));
}

#[test]
fn pinv_satisfies_penrose_conditions_wide() {
    let a = Matrix::new([[1.0_f64, 2.0, 3.0, 0.0], [0.0, 1.0, -1.0, 2.0]]);
    let p = a.pinv();
    assert!(approx_eq(&(a * p * a), &a, 1e-10));
    assert!(approx_eq(&(p * a * p), &p, 1e-10));
    let ap = a * p;
    assert!(approx_eq(&ap, &ap.transpose(), 1e-10));
}

#[test]
fn pinv_satisfies_penrose_conditions_tall() {
    let a = Matrix::new([[2.0_f64, 0.0], [1.0, 1.0], [0.0, 3.0], [1.0, -1.0]]);
    let p = a.pinv();
    assert!(approx_eq(&(a * p * a), &a, 1e-10));
    assert!(approx_eq(&(p * a * p), &p, 1e-10));
    let pa = p * a;
    assert!(approx_eq(&pa, &pa.transpose(), 1e-10));
}

#[test]
fn pinv_of_square_is_inverse() {
    let a = Matrix::new([[3.0_f64, 1.0], [1.0, 2.0]]);
    assert!(approx_eq(&a.pinv(), &a.inverse(), 1e-12));
}

#[test]
fn least_squares_line_fit() {
    // y = 2x + 1 sampled exactly
    let a = Matrix::new([[0.0_f64, 1.0], [1.0, 1.0], [2.0, 1.0], [3.0, 1.0]]);
    let y = Matrix::new([[1.0_f64], [3.0], [5.0], [7.0]]);
    let coef = a.pinv() * y;
    assert!((coef[(0, 0)] - 2.0).abs() < 1e-10);
    assert!((coef[(1, 0)] - 1.0).abs() < 1e-10);
}

#[test]
fn weighted_pinv_minimises_weighted_norm() {
    // One equation, two unknowns: x0 + x1 = 1. Weight x1 heavily so the
    // solution puts most of the load on x0.
    let a = Matrix::new([[1.0_f64, 1.0]]);
    let w = Matrix::new([[1.0_f64, 0.0], [0.0, 100.0]]);
    let x = a.weighted_pinv(&w) * Matrix::new([[1.0_f64]]);
    assert!((x[(0, 0)] - 100.0 / 101.0).abs() < 1e-12);
    assert!((x[(1, 0)] - 1.0 / 101.0).abs() < 1e-12);
}

#[test]
fn checked_chain_reports_first_failure() {
    let a = Matrix::new([[1.0_f64, 2.0], [2.0, 4.0], [3.0, 6.0]]);
    assert!(matches!(a.try_pinv(), Err(LinalgError::Singular { .. })));

    let mut out = [0.0_f64; 6];
    let mut scratch = [0.0_f64; 3];
    assert_eq!(
        try_pseudo_inverse(a.as_slice(), 3, 2, &mut out, &mut scratch, 1e-12),
        Err(LinalgError::BufferTooSmall {
            name: "scratch",
            required: pseudo_inverse_scratch_len(3, 2),
            got: 3,
        })
    );
}

#[test]
fn f32_and_f64_agree_loosely() {
    let a64 = Matrix::new([[2.0_f64, 1.0, 0.0], [1.0, 3.0, 1.0]]);
    let a32 = a64.map(|x| x as f32);
    let p64 = a64.pinv();
    let p32 = a32.pinv().map(|x| x as f64);
    assert!(p64.max_abs_diff(&p32) < 1e-5);
}
