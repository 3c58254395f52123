//! # rowmat
//!
//! Small dense matrix kernel for embedded and control code: multiplication,
//! transposition, the 3-vector cross product, inversion by LU decomposition
//! without pivoting, and (weighted) Moore-Penrose pseudo-inverses. No-std,
//! allocation optional.
//!
//! ## Quick start
//!
//! ```
//! use rowmat::Matrix;
//!
//! let a = Matrix::new([[4.0_f64, 3.0], [6.0, 3.0]]);
//! let a_inv = a.inverse();
//! assert!((a_inv[(0, 0)] + 0.5).abs() < 1e-12);
//!
//! // Least-squares fit of a tall system
//! let j = Matrix::new([[1.0_f64, 0.0], [0.0, 1.0], [1.0, 1.0]]);
//! let j_pinv = j.pinv();
//! assert!((j_pinv * j).max_abs_diff(&Matrix::eye()) < 1e-12);
//! ```
//!
//! ## Layers
//!
//! - [`linalg`] — the slice kernel. Row-major `&[T]` buffers with explicit
//!   dimensions, caller-supplied scratch, no allocation. Everything else
//!   calls into it, so all layers produce bit-identical results.
//!
//! - [`matrix`] — fixed-size `Matrix<T, M, N>` with const-generic
//!   dimensions and `[[T; N]; M]` storage. Shapes are checked at compile
//!   time; [`Vector<T, N>`] and [`ColumnVector<T, N>`] are 1-row and
//!   1-column aliases.
//!
//! - [`dynmatrix`] — heap-allocated `DynMatrix<T>` with runtime dimensions
//!   (requires `alloc`, included with `std`).
//!
//! ## Checked and unchecked operations
//!
//! LU decomposition never exchanges rows. The plain operations (`inverse`,
//! `pinv`, `weighted_pinv`) do not look at pivots, so a singular or
//! zero-leading-minor input comes back as `inf`/`NaN`. Every one of them
//! has a `try_*` twin returning [`LinalgError`] at the first pivot whose
//! magnitude is not above a tolerance. By default that is machine epsilon
//! times the largest entry of the matrix being factored.
//!
//! ## Cargo features
//!
//! | Feature   | Default  | Description |
//! |-----------|----------|-------------|
//! | `std`     | yes      | Implies `alloc`. Hardware FPU via system libm |
//! | `alloc`   | via std  | `DynMatrix` (heap-allocated, runtime-sized) |
//! | `libm`    | no       | Pure-Rust float math for `no_std` builds without `std` |
//! | `tracing` | no       | `tracing` events for failed checks and decompositions |
//! | `all`     | no       | `std` + `tracing` |

#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(not(any(feature = "std", feature = "libm")))]
compile_error!("rowmat needs float math: enable the `std` or the `libm` feature");

#[cfg(feature = "alloc")]
extern crate alloc;

#[cfg(feature = "alloc")]
pub mod dynmatrix;
pub mod linalg;
pub mod matrix;
pub mod traits;

pub use linalg::{LinalgError, LuDecomposition};
pub use matrix::aliases::{
    ColumnVector1, ColumnVector2, ColumnVector4, ColumnVector5, ColumnVector6, Matrix1, Matrix2,
    Matrix2x3, Matrix2x4, Matrix2x6, Matrix3, Matrix3x2, Matrix3x4, Matrix3x6, Matrix4, Matrix4x2,
    Matrix4x3, Matrix5, Matrix6, Matrix6x2, Matrix6x3, Vector1, Vector2, Vector4, Vector5,
    Vector6,
};
pub use matrix::vector::{ColumnVector, ColumnVector3, Vector, Vector3};
pub use matrix::Matrix;
#[cfg(feature = "alloc")]
pub use dynmatrix::{DynLu, DynMatrix, DynMatrixf32, DynMatrixf64};
pub use traits::{FloatScalar, MatrixMut, MatrixRef, Scalar};
