use crate::backend::Backend;
use std::marker::PhantomData;

/// Backend-typed 1D tensor providing compile-time type safety.
///
/// Wraps a backend's native 1D tensor representation (`B::Tensor1D`) while
/// carrying phantom type information about its originating backend. This
/// prevents accidental mixing of tensors from different backends at compile
/// time while maintaining performance through zero-sized `PhantomData`
/// overhead.
///
/// # Precision semantics
/// - Constructors accept `Vec<f64>`; all operations occur in native backend
///   precision (`f64`)
/// - `to_vec()` returns `Vec<f64>` for host interoperability
///
/// # Example
/// ```
/// use streamscale::backend::{CpuBackend, Tensor1D};
///
/// let x: Tensor1D<CpuBackend> = Tensor1D::new(vec![1.0, 2.0, 3.0]);
/// assert_eq!(x.len(), 3);
/// assert_eq!(x.abs().to_vec(), vec![1.0, 2.0, 3.0]);
/// ```
#[derive(Clone)]
pub struct Tensor1D<B: Backend> {
    pub(crate) data: B::Tensor1D,
    pub(crate) backend: PhantomData<B>,
}

impl<B: Backend> Tensor1D<B> {
    /// Creates a new 1D tensor from a vector of `f64` values.
    pub fn new(data: Vec<f64>) -> Self {
        Self {
            data: B::from_vec_1d(data),
            backend: PhantomData,
        }
    }

    /// Creates a 1D tensor filled with zeros of specified length.
    pub fn zeros(len: usize) -> Self {
        Self {
            data: B::zeros_1d(len),
            backend: PhantomData,
        }
    }

    /// Returns the number of elements in the tensor.
    pub fn len(&self) -> usize {
        B::len_1d(&self.data)
    }

    /// Returns `true` if the tensor has no elements.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Computes element-wise addition: `self + other`.
    ///
    /// # Panics
    /// Panics if tensors have different lengths (backend-dependent behavior).
    pub fn add(&self, other: &Self) -> Self {
        Self {
            data: B::add_1d(&self.data, &other.data),
            backend: PhantomData,
        }
    }

    /// Computes element-wise subtraction: `self - other`.
    ///
    /// # Panics
    /// Panics if tensors have different lengths (backend-dependent behavior).
    pub fn sub(&self, other: &Self) -> Self {
        Self {
            data: B::sub_1d(&self.data, &other.data),
            backend: PhantomData,
        }
    }

    /// Computes element-wise multiplication: `self * other`.
    ///
    /// # Panics
    /// Panics if tensors have different lengths (backend-dependent behavior).
    pub fn mul(&self, other: &Self) -> Self {
        Self {
            data: B::mul_1d(&self.data, &other.data),
            backend: PhantomData,
        }
    }

    /// Computes element-wise division: `self / other`.
    ///
    /// # Panics
    /// Panics if tensors have different lengths (backend-dependent behavior).
    pub fn div(&self, other: &Self) -> Self {
        Self {
            data: B::div_1d(&self.data, &other.data),
            backend: PhantomData,
        }
    }

    /// Computes element-wise absolute value.
    pub fn abs(&self) -> Self {
        Self {
            data: B::abs_1d(&self.data),
            backend: PhantomData,
        }
    }

    /// Computes element-wise square root.
    pub fn sqrt(&self) -> Self {
        Self {
            data: B::sqrt_1d(&self.data),
            backend: PhantomData,
        }
    }

    /// Computes the element-wise maximum between two tensors.
    pub fn maximum(&self, other: &Self) -> Self {
        Self {
            data: B::maximum_1d(&self.data, &other.data),
            backend: PhantomData,
        }
    }

    /// Computes the element-wise minimum between two tensors.
    pub fn minimum(&self, other: &Self) -> Self {
        Self {
            data: B::minimum_1d(&self.data, &other.data),
            backend: PhantomData,
        }
    }

    /// Converts the tensor to a standard Rust `Vec<f64>` for host
    /// interoperability.
    ///
    /// # Use cases
    /// - Debugging and logging
    /// - Serialization to external formats
    /// - Test assertions
    pub fn to_vec(&self) -> Vec<f64> {
        B::to_vec_1d(&self.data)
    }
}

impl<B: Backend> std::fmt::Debug for Tensor1D<B> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("Tensor1D").field(&self.to_vec()).finish()
    }
}
