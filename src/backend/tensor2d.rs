use super::scalar::Scalar;
use super::tensor1d::Tensor1D;
use crate::backend::Backend;
use std::marker::PhantomData;

/// Backend-typed 2D tensor (feature matrix), rows = samples, cols = features.
///
/// Wraps a backend's native 2D tensor representation (`B::Tensor2D`) with a
/// phantom backend type, preventing accidental mixing of tensors from
/// different backends at compile time.
///
/// Data is stored in row-major order by convention; constructors take flat
/// `Vec<f64>` buffers plus explicit shape.
///
/// # Example
/// ```
/// use streamscale::backend::{CpuBackend, Tensor2D};
///
/// // [[1, 2], [3, 4]]
/// let m: Tensor2D<CpuBackend> = Tensor2D::new(vec![1.0, 2.0, 3.0, 4.0], 2, 2);
/// assert_eq!(m.shape(), (2, 2));
/// assert_eq!(m.col_mean().to_vec(), vec![2.0, 3.0]);
/// ```
#[derive(Clone)]
pub struct Tensor2D<B: Backend> {
    pub(crate) data: B::Tensor2D,
    pub(crate) backend: PhantomData<B>,
}

impl<B: Backend> Tensor2D<B> {
    /// Creates a new 2D tensor from row-major data.
    ///
    /// # Panics
    /// Panics if `data.len() != rows * cols`.
    pub fn new(data: Vec<f64>, rows: usize, cols: usize) -> Self {
        Self {
            data: B::from_vec_2d(data, rows, cols),
            backend: PhantomData,
        }
    }

    /// Creates a 2D tensor filled with zeros.
    pub fn zeros(rows: usize, cols: usize) -> Self {
        Self {
            data: B::zeros_2d(rows, cols),
            backend: PhantomData,
        }
    }

    /// Builds a 2D tensor from a slice of equally sized row vectors.
    ///
    /// # Panics
    /// Panics if rows have inconsistent lengths.
    pub fn from_rows(rows: &[Vec<f64>]) -> Self {
        let n_rows = rows.len();
        let n_cols = rows.first().map_or(0, Vec::len);
        assert!(
            rows.iter().all(|r| r.len() == n_cols),
            "all rows must have the same length"
        );
        let data: Vec<f64> = rows.iter().flat_map(|r| r.iter().copied()).collect();
        Self::new(data, n_rows, n_cols)
    }

    /// Returns the shape as (rows, cols).
    pub fn shape(&self) -> (usize, usize) {
        B::shape(&self.data)
    }

    /// Flattens the tensor into a 1D tensor in row-major order.
    pub fn ravel(&self) -> Tensor1D<B> {
        Tensor1D {
            data: B::ravel_2d(&self.data),
            backend: PhantomData,
        }
    }

    /// Computes element-wise subtraction: `self - other`.
    ///
    /// # Panics
    /// Panics if tensors have different shapes (backend-dependent behavior).
    pub fn sub(&self, other: &Self) -> Self {
        Self {
            data: B::sub_2d(&self.data, &other.data),
            backend: PhantomData,
        }
    }

    /// Adds a scalar to every element.
    pub fn add_scalar(&self, s: Scalar<B>) -> Self {
        Self {
            data: B::add_scalar_2d(&self.data, &s.data),
            backend: PhantomData,
        }
    }

    /// Multiplies every element by a scalar.
    pub fn scale(&self, s: Scalar<B>) -> Self {
        Self {
            data: B::mul_scalar_2d(&self.data, &s.data),
            backend: PhantomData,
        }
    }

    /// Computes the mean of each column.
    pub fn col_mean(&self) -> Tensor1D<B> {
        Tensor1D {
            data: B::col_mean_2d(&self.data),
            backend: PhantomData,
        }
    }

    /// Computes the minimum of each column.
    pub fn col_min(&self) -> Tensor1D<B> {
        Tensor1D {
            data: B::col_min_2d(&self.data),
            backend: PhantomData,
        }
    }

    /// Computes the maximum of each column.
    pub fn col_max(&self) -> Tensor1D<B> {
        Tensor1D {
            data: B::col_max_2d(&self.data),
            backend: PhantomData,
        }
    }

    /// Returns `true` when every element is finite (no NaN, no infinities).
    pub fn is_finite(&self) -> bool {
        B::is_finite_2d(&self.data)
    }
}
