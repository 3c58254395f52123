//! Type aliases for the matrix and vector sizes small control and
//! estimation code uses most.

use crate::matrix::vector::{ColumnVector, Vector};
use crate::Matrix;

macro_rules! square_aliases {
    ($($name:ident = $n:literal),* $(,)?) => {
        $(
            #[doc = concat!(stringify!($n), "×", stringify!($n), " matrix.")]
            pub type $name<T> = Matrix<T, $n, $n>;
        )*
    };
}

macro_rules! rect_aliases {
    ($($name:ident = $m:literal x $n:literal),* $(,)?) => {
        $(
            #[doc = concat!(stringify!($m), "×", stringify!($n), " matrix.")]
            pub type $name<T> = Matrix<T, $m, $n>;
        )*
    };
}

macro_rules! vector_aliases {
    ($($row:ident, $col:ident = $n:literal),* $(,)?) => {
        $(
            #[doc = concat!(stringify!($n), "-element row vector.")]
            pub type $row<T> = Vector<T, $n>;
            #[doc = concat!(stringify!($n), "-element column vector.")]
            pub type $col<T> = ColumnVector<T, $n>;
        )*
    };
}

square_aliases!(
    Matrix1 = 1,
    Matrix2 = 2,
    Matrix3 = 3,
    Matrix4 = 4,
    Matrix5 = 5,
    Matrix6 = 6,
);

rect_aliases!(
    Matrix2x3 = 2 x 3,
    Matrix2x4 = 2 x 4,
    Matrix2x6 = 2 x 6,
    Matrix3x2 = 3 x 2,
    Matrix3x4 = 3 x 4,
    Matrix3x6 = 3 x 6,
    Matrix4x2 = 4 x 2,
    Matrix4x3 = 4 x 3,
    Matrix6x2 = 6 x 2,
    Matrix6x3 = 6 x 3,
);

vector_aliases!(
    Vector1, ColumnVector1 = 1,
    Vector2, ColumnVector2 = 2,
    Vector4, ColumnVector4 = 4,
    Vector5, ColumnVector5 = 5,
    Vector6, ColumnVector6 = 6,
);
