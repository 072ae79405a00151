use super::Backend;
use ndarray::{Array1, Array2, Axis};

/// Tensor backend implementation using the `ndarray` crate.
///
/// Provides the same semantics as [`CpuBackend`](super::CpuBackend) on top of
/// ndarray's array types, for projects already living in the ndarray
/// ecosystem.
///
/// # Type mappings
/// - `Scalar`: `f64`
/// - `Tensor1D`: `ndarray::Array1<f64>`
/// - `Tensor2D`: `NdarrayTensor2D` wrapper around `ndarray::Array2<f64>`
/// - `Device`: `()` (CPU-only execution)
#[derive(Clone, Debug, Copy)]
pub struct NdarrayBackend;

/// Wrapper type for 2D tensors using ndarray's `Array2<f64>`.
///
/// The wrapper enables trait implementation for an external type while
/// providing convenient conversion from nested `Vec` representations commonly
/// used in tests and data loading.
#[derive(Debug, Clone)]
pub struct NdarrayTensor2D(pub Array2<f64>);

impl From<&[Vec<f64>]> for NdarrayTensor2D {
    /// Converts a slice of row vectors into a 2D tensor.
    ///
    /// # Panics
    /// Panics if rows have inconsistent lengths.
    fn from(x: &[Vec<f64>]) -> Self {
        let rows = x.len();
        if rows == 0 {
            return NdarrayTensor2D(Array2::from_shape_vec((0, 0), vec![]).unwrap());
        }
        let cols = x[0].len();
        assert!(x.iter().all(|r| r.len() == cols));
        let data: Vec<f64> = x.iter().flat_map(|r| r.iter()).copied().collect();
        NdarrayTensor2D(Array2::from_shape_vec((rows, cols), data).unwrap())
    }
}

impl Backend for NdarrayBackend {
    type Scalar = f64;
    type Tensor1D = Array1<f64>;
    type Tensor2D = NdarrayTensor2D;
    type Device = ();

    fn default_device() -> Self::Device {}

    fn zeros_1d(len: usize) -> Self::Tensor1D {
        Array1::zeros(len)
    }

    fn zeros_2d(rows: usize, cols: usize) -> Self::Tensor2D {
        NdarrayTensor2D(Array2::zeros((rows, cols)))
    }

    fn from_vec_1d(data: Vec<f64>) -> Self::Tensor1D {
        Array1::from_vec(data)
    }

    fn from_vec_2d(data: Vec<f64>, rows: usize, cols: usize) -> Self::Tensor2D {
        NdarrayTensor2D(
            Array2::from_shape_vec((rows, cols), data).expect("inconsistent shape"),
        )
    }

    fn to_vec_1d(t: &Self::Tensor1D) -> Vec<f64> {
        t.to_vec()
    }

    fn len_1d(t: &Self::Tensor1D) -> usize {
        t.len()
    }

    fn shape(t: &Self::Tensor2D) -> (usize, usize) {
        t.0.dim()
    }

    fn ravel_2d(t: &Self::Tensor2D) -> Self::Tensor1D {
        Array1::from_iter(t.0.iter().copied())
    }

    fn add_1d(a: &Self::Tensor1D, b: &Self::Tensor1D) -> Self::Tensor1D {
        a + b
    }

    fn sub_1d(a: &Self::Tensor1D, b: &Self::Tensor1D) -> Self::Tensor1D {
        a - b
    }

    fn mul_1d(a: &Self::Tensor1D, b: &Self::Tensor1D) -> Self::Tensor1D {
        a * b
    }

    fn div_1d(a: &Self::Tensor1D, b: &Self::Tensor1D) -> Self::Tensor1D {
        a / b
    }

    fn abs_1d(t: &Self::Tensor1D) -> Self::Tensor1D {
        t.mapv(f64::abs)
    }

    fn sqrt_1d(t: &Self::Tensor1D) -> Self::Tensor1D {
        t.mapv(f64::sqrt)
    }

    fn maximum_1d(a: &Self::Tensor1D, b: &Self::Tensor1D) -> Self::Tensor1D {
        assert_eq!(a.len(), b.len());
        ndarray::Zip::from(a).and(b).map_collect(|&x, &y| x.max(y))
    }

    fn minimum_1d(a: &Self::Tensor1D, b: &Self::Tensor1D) -> Self::Tensor1D {
        assert_eq!(a.len(), b.len());
        ndarray::Zip::from(a).and(b).map_collect(|&x, &y| x.min(y))
    }

    fn sub_2d(a: &Self::Tensor2D, b: &Self::Tensor2D) -> Self::Tensor2D {
        NdarrayTensor2D(&a.0 - &b.0)
    }

    fn mul_scalar_2d(t: &Self::Tensor2D, s: &Self::Scalar) -> Self::Tensor2D {
        NdarrayTensor2D(&t.0 * *s)
    }

    fn add_scalar_2d(t: &Self::Tensor2D, s: &Self::Scalar) -> Self::Tensor2D {
        NdarrayTensor2D(&t.0 + *s)
    }

    fn col_mean_2d(t: &Self::Tensor2D) -> Self::Tensor1D {
        t.0.mean_axis(Axis(0))
            .unwrap_or_else(|| Array1::zeros(t.0.ncols()))
    }

    fn col_min_2d(t: &Self::Tensor2D) -> Self::Tensor1D {
        t.0.fold_axis(Axis(0), f64::INFINITY, |acc, &x| acc.min(x))
    }

    fn col_max_2d(t: &Self::Tensor2D) -> Self::Tensor1D {
        t.0.fold_axis(Axis(0), f64::NEG_INFINITY, |acc, &x| acc.max(x))
    }

    fn row_mean_2d(t: &Self::Tensor2D) -> Self::Tensor1D {
        t.0.mean_axis(Axis(1))
            .unwrap_or_else(|| Array1::zeros(t.0.nrows()))
    }

    fn mean_all_2d(t: &Self::Tensor2D) -> Self::Scalar {
        t.0.mean().unwrap_or(0.0)
    }

    fn is_finite_2d(t: &Self::Tensor2D) -> bool {
        t.0.iter().all(|x| x.is_finite())
    }

    fn scalar_f64(value: f64) -> Self::Scalar {
        value
    }

    fn broadcast_sub_1d_to_2d_rows(t: &Self::Tensor2D, v: &Self::Tensor1D) -> Self::Tensor2D {
        NdarrayTensor2D(&t.0 - &v.view().insert_axis(Axis(0)))
    }

    fn broadcast_add_1d_to_2d_rows(t: &Self::Tensor2D, v: &Self::Tensor1D) -> Self::Tensor2D {
        NdarrayTensor2D(&t.0 + &v.view().insert_axis(Axis(0)))
    }

    fn broadcast_mul_1d_to_2d_rows(t: &Self::Tensor2D, v: &Self::Tensor1D) -> Self::Tensor2D {
        NdarrayTensor2D(&t.0 * &v.view().insert_axis(Axis(0)))
    }

    fn broadcast_div_1d_to_2d_rows(t: &Self::Tensor2D, v: &Self::Tensor1D) -> Self::Tensor2D {
        NdarrayTensor2D(&t.0 / &v.view().insert_axis(Axis(0)))
    }

    fn broadcast_sub_1d_to_2d_cols(t: &Self::Tensor2D, v: &Self::Tensor1D) -> Self::Tensor2D {
        NdarrayTensor2D(&t.0 - &v.view().insert_axis(Axis(1)))
    }
}
