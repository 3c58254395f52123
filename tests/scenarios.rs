use rowmat::linalg::{
    cross, invert, invert_scratch_len, multiply, pseudo_inverse, pseudo_inverse_scratch_len,
    transpose, try_invert, weighted_pseudo_inverse, weighted_pseudo_inverse_scratch_len,
    LinalgError,
};
use rowmat::{DynMatrix, Matrix, Matrix2, Matrix3x2, Vector3};

// ── Unchecked behaviour ─────────────────────────────────────────────

#[test]
fn invert_known_2x2() {
    let a = Matrix2::new([[4.0_f64, 3.0], [6.0, 3.0]]);
    let inv = a.inverse();
    let expected = [[-0.5, 0.5], [1.0, -0.667]];
    for i in 0..2 {
        for j in 0..2 {
            assert!(
                (inv[(i, j)] - expected[i][j]).abs() < 1e-3,
                "({i},{j}): {} vs {}",
                inv[(i, j)],
                expected[i][j]
            );
        }
    }
}

#[test]
fn invert_known_2x2_f32() {
    let a = Matrix2::new([[4.0_f32, 3.0], [6.0, 3.0]]);
    let inv = a.inverse();
    assert!((inv[(0, 0)] + 0.5).abs() < 1e-3);
    assert!((inv[(1, 1)] + 0.667).abs() < 1e-3);
}

#[test]
fn cross_unit_vectors() {
    assert_eq!(cross(&[1.0, 0.0, 0.0], &[0.0, 1.0, 0.0]), [0.0, 0.0, 1.0]);
    let x = Vector3::from_array([1.0_f32, 0.0, 0.0]);
    let y = Vector3::from_array([0.0_f32, 1.0, 0.0]);
    assert_eq!(x.cross(&y).to_array(), [0.0, 0.0, 1.0]);
}

#[test]
fn pinv_tall_is_left_inverse() {
    let a = Matrix3x2::new([[1.0_f64, 2.0], [3.0, 4.0], [5.0, 6.0]]);
    let id = a.pinv() * a;
    assert!(id.max_abs_diff(&Matrix::eye()) < 1e-10);
}

#[test]
fn pinv_tall_is_left_inverse_f32() {
    let a = Matrix3x2::new([[1.0_f32, 2.0], [3.0, 4.0], [5.0, 6.0]]);
    let id = a.pinv() * a;
    assert!(id.max_abs_diff(&Matrix::eye()) < 1e-3);
}

#[test]
fn zero_leading_pivot_is_not_pivoted_away() {
    let a = Matrix2::new([[0.0_f64, 1.0], [1.0, 0.0]]);
    let inv = a.inverse();
    assert!(inv.as_slice().iter().any(|x| !x.is_finite()));

    let d = DynMatrix::from(a);
    assert!(!d.inverse().is_finite());
}

#[test]
fn slice_kernel_end_to_end() {
    // 2x3 A, times its 3x2 transpose, then inverted
    let a = [1.0_f64, 2.0, 0.0, 0.0, 1.0, 1.0];
    let mut at = [0.0; 6];
    transpose(&a, 2, 3, &mut at);
    assert_eq!(at, [1.0, 0.0, 2.0, 1.0, 0.0, 1.0]);

    let mut aat = [0.0; 4];
    multiply(&a, &at, 2, 3, 2, &mut aat);
    assert_eq!(aat, [5.0, 2.0, 2.0, 2.0]);

    let mut inv = [0.0; 4];
    let mut scratch = [0.0; invert_scratch_len(2)];
    invert(&aat, 2, &mut inv, &mut scratch);
    assert!((inv[0] - 1.0 / 3.0).abs() < 1e-12);
    assert!((inv[1] + 1.0 / 3.0).abs() < 1e-12);
    assert!((inv[3] - 5.0 / 6.0).abs() < 1e-12);

    let mut pinv = [0.0; 6];
    let mut scratch = vec![0.0; pseudo_inverse_scratch_len(2, 3)];
    pseudo_inverse(&a, 2, 3, &mut pinv, &mut scratch);
    let mut id = [0.0; 4];
    multiply(&a, &pinv, 2, 3, 2, &mut id);
    for (got, want) in id.iter().zip([1.0, 0.0, 0.0, 1.0]) {
        assert!((got - want).abs() < 1e-12);
    }
}

#[test]
fn weighted_pinv_slice_matches_matrix() {
    let a = Matrix::new([[1.0_f64, 0.5, 2.0], [0.0, 1.0, -1.0]]);
    let w = Matrix::new([[2.0_f64, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 4.0]]);

    let mut out = [0.0; 6];
    let mut scratch = vec![0.0; weighted_pseudo_inverse_scratch_len(2, 3, 3)];
    weighted_pseudo_inverse(a.as_slice(), w.as_slice(), 2, 3, 3, &mut out, &mut scratch);
    assert_eq!(&out, a.weighted_pinv(&w).as_slice());

    let id = a * a.weighted_pinv(&w);
    assert!(id.max_abs_diff(&Matrix::eye()) < 1e-12);
}

#[test]
fn fixed_and_dynamic_agree_bitwise() {
    let rows = [[3.0_f64, 1.0, 0.5], [0.25, 4.0, 1.0], [1.0, -0.5, 5.0], [2.0, 0.0, 1.0]];
    let a = Matrix::new(rows);
    let d = DynMatrix::from(a);
    assert_eq!(d.pinv().as_slice(), a.pinv().as_slice());
    assert_eq!(d.transpose().as_slice(), a.transpose().as_slice());
}

// ── Checked variants (new behaviour: errors instead of NaN/inf) ─────

#[test]
fn checked_inverse_reports_zero_leading_pivot() {
    let a = Matrix2::new([[0.0_f64, 1.0], [1.0, 0.0]]);
    assert_eq!(a.try_inverse(), Err(LinalgError::Singular { pivot: 0 }));
}

#[test]
fn checked_inverse_reports_later_pivot() {
    let a = Matrix::new([[1.0_f64, 2.0, 3.0], [2.0, 4.0, 7.0], [1.0, 0.0, 1.0]]);
    assert_eq!(a.try_inverse(), Err(LinalgError::Singular { pivot: 1 }));
    assert!(!a.inverse().is_finite());
}

#[test]
fn checked_inverse_accepts_well_conditioned() {
    let a = Matrix2::new([[4.0_f64, 3.0], [6.0, 3.0]]);
    assert_eq!(a.try_inverse().unwrap(), a.inverse());
}

#[test]
fn checked_inverse_tolerance_is_configurable() {
    let a = Matrix2::new([[1e-6_f64, 0.0], [0.0, 1.0]]);
    assert!(a.try_inverse().is_ok());
    assert_eq!(a.try_inverse_tol(1e-3), Err(LinalgError::Singular { pivot: 0 }));
}

#[test]
fn checked_pinv_reports_rank_deficiency() {
    let a = Matrix3x2::new([[1.0_f64, 2.0], [2.0, 4.0], [3.0, 6.0]]);
    assert!(matches!(a.try_pinv(), Err(LinalgError::Singular { .. })));

    let wide = a.transpose();
    assert!(matches!(wide.try_pinv(), Err(LinalgError::Singular { .. })));
}

#[test]
fn checked_slice_invert_validates_buffers() {
    let a = [1.0_f64, 0.0, 0.0, 1.0];
    let mut out = [0.0; 3];
    let mut scratch = [0.0; invert_scratch_len(2)];
    assert_eq!(
        try_invert(&a, 2, &mut out, &mut scratch, 1e-12),
        Err(LinalgError::BufferTooSmall {
            name: "a_inv",
            required: 4,
            got: 3
        })
    );
    assert_eq!(
        try_invert(&a, 0, &mut out, &mut scratch, 1e-12),
        Err(LinalgError::Empty)
    );
}

#[test]
fn checked_dynamic_weighted_pinv_rejects_bad_weight() {
    let a = DynMatrix::from_rows(2, 3, &[1.0_f64, 0.0, 1.0, 0.0, 1.0, 1.0]);
    let w = DynMatrix::<f64>::eye(2);
    assert_eq!(
        a.try_weighted_pinv(&w),
        Err(LinalgError::DimensionMismatch {
            expected: (3, 3),
            got: (2, 2)
        })
    );
}

#[test]
fn error_messages() {
    assert_eq!(
        LinalgError::Singular { pivot: 2 }.to_string(),
        "matrix is singular or needs pivoting (pivot 2)"
    );
}
