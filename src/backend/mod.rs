//! # Backend Abstraction
//!
//! This module provides a trait-based abstraction over computation backends,
//! enabling transformers to run on different hardware (CPU, GPU) and tensor
//! libraries without code changes.
//!
//! ## Design Philosophy
//!
//! - **Minimal trait surface**: Only the operations preprocessing needs are
//!   exposed, keeping backend implementations simple and testable.
//! - **Zero-cost generics**: Backend selection happens at compile time via type
//!   parameters, avoiding runtime dispatch overhead.
//! - **Type-safe tensor handling**: Each backend defines its own tensor types
//!   (`Tensor1D`, `Tensor2D`) that encapsulate storage details while exposing a
//!   uniform API.
//! - **Feature-gated implementations**: Backends are enabled via Cargo features
//!   (`cpu`, `ndarray`, future `cuda`, etc.), allowing users to minimize
//!   dependencies.
//!
//! ## Available Backends
//!
//! | Backend      | Feature    | Use Case                          |
//! |--------------|------------|-----------------------------------|
//! | `CpuBackend` | `cpu`      | Default, pure-Rust implementation |
//! | `NdarrayBackend` | `ndarray` | Interop with `ndarray` ecosystem |
//!
//! ## Precision
//!
//! All backends operate in `f64`. Scalers accumulate statistics over data with
//! potentially huge per-feature offsets; single precision cannot hold such
//! values to the tolerances the incremental statistics guarantee.

#[cfg(feature = "cpu")]
pub mod cpu;
#[cfg(feature = "cpu")]
/// Pure-Rust CPU backend implementation with zero external dependencies.
pub use cpu::{CpuBackend, CpuTensor2D};

#[cfg(feature = "ndarray")]
mod ndarray_backend;
#[cfg(feature = "ndarray")]
/// Backend backed by the `ndarray` crate for ecosystem interoperability.
pub use ndarray_backend::{NdarrayBackend, NdarrayTensor2D};

/// Scalar value representation and arithmetic operations.
pub mod scalar;
/// One-dimensional tensor abstraction.
pub mod tensor1d;
/// Two-dimensional tensor abstraction.
pub mod tensor2d;

pub use scalar::{Scalar, ScalarOps};
pub use tensor1d::Tensor1D;
pub use tensor2d::Tensor2D;

/// Abstraction over computation devices and tensor operations.
///
/// The `Backend` trait defines the set of operations required for fitting and
/// applying preprocessing transformers. Implementations provide concrete tensor
/// types and device-specific optimizations while maintaining a uniform API
/// surface.
///
/// # Type Parameters
///
/// - `Scalar`: Primitive numeric type with arithmetic capabilities
/// - `Tensor1D`: One-dimensional array representation
/// - `Tensor2D`: Two-dimensional matrix representation
/// - `Device`: Hardware device identifier (CPU core, GPU ID, etc.)
///
/// # Safety Guarantees
///
/// - Element-wise operations panic on shape mismatch
/// - Tensor types are `Clone + Send + Sync` for safe concurrent usage
pub trait Backend: Clone + Copy + 'static {
    /// Scalar type supporting arithmetic operations.
    type Scalar: ScalarOps + Clone;

    /// One-dimensional tensor type.
    type Tensor1D: Clone + Send + Sync;

    /// Two-dimensional tensor type.
    type Tensor2D: Clone + Send + Sync;

    /// Device identifier type (CPU core index, GPU handle, etc.).
    type Device: Clone + Send + Sync;

    /// Returns the default device for this backend.
    fn default_device() -> Self::Device;

    // --- Constructors ---

    /// Creates a 1D tensor filled with zeros of given length.
    fn zeros_1d(len: usize) -> Self::Tensor1D;

    /// Creates a 2D tensor filled with zeros of given dimensions.
    fn zeros_2d(rows: usize, cols: usize) -> Self::Tensor2D;

    /// Constructs a 1D tensor from owned `f64` data.
    fn from_vec_1d(data: Vec<f64>) -> Self::Tensor1D;

    /// Constructs a 2D tensor from row-major ordered `f64` data.
    ///
    /// # Panics
    /// If `data.len() != rows * cols`.
    fn from_vec_2d(data: Vec<f64>, rows: usize, cols: usize) -> Self::Tensor2D;

    // --- Data access ---

    /// Converts a 1D tensor to a `Vec<f64>` for host interoperability.
    fn to_vec_1d(t: &Self::Tensor1D) -> Vec<f64>;

    /// Returns the number of elements in a 1D tensor.
    fn len_1d(t: &Self::Tensor1D) -> usize;

    /// Returns the shape of a 2D tensor as (rows, cols).
    fn shape(t: &Self::Tensor2D) -> (usize, usize);

    /// Flattens a 2D tensor into a 1D tensor in row-major order.
    fn ravel_2d(t: &Self::Tensor2D) -> Self::Tensor1D;

    // --- Element-wise operations (1D) ---

    /// Element-wise addition of two 1D tensors.
    ///
    /// # Panics
    /// If tensors have different lengths.
    fn add_1d(a: &Self::Tensor1D, b: &Self::Tensor1D) -> Self::Tensor1D;

    /// Element-wise subtraction of two 1D tensors.
    ///
    /// # Panics
    /// If tensors have different lengths.
    fn sub_1d(a: &Self::Tensor1D, b: &Self::Tensor1D) -> Self::Tensor1D;

    /// Element-wise multiplication of two 1D tensors.
    ///
    /// # Panics
    /// If tensors have different lengths.
    fn mul_1d(a: &Self::Tensor1D, b: &Self::Tensor1D) -> Self::Tensor1D;

    /// Element-wise division of two 1D tensors.
    ///
    /// # Panics
    /// If tensors have different lengths.
    fn div_1d(a: &Self::Tensor1D, b: &Self::Tensor1D) -> Self::Tensor1D;

    /// Element-wise absolute value.
    fn abs_1d(t: &Self::Tensor1D) -> Self::Tensor1D;

    /// Element-wise square root.
    fn sqrt_1d(t: &Self::Tensor1D) -> Self::Tensor1D;

    /// Element-wise maximum between two tensors.
    ///
    /// # Panics
    /// If tensors have different lengths.
    fn maximum_1d(a: &Self::Tensor1D, b: &Self::Tensor1D) -> Self::Tensor1D;

    /// Element-wise minimum between two tensors.
    ///
    /// # Panics
    /// If tensors have different lengths.
    fn minimum_1d(a: &Self::Tensor1D, b: &Self::Tensor1D) -> Self::Tensor1D;

    // --- Element-wise operations (2D) ---

    /// Element-wise subtraction of two 2D tensors.
    ///
    /// # Panics
    /// If tensors have different shapes.
    fn sub_2d(a: &Self::Tensor2D, b: &Self::Tensor2D) -> Self::Tensor2D;

    /// Multiplies each element of a 2D tensor by a scalar.
    fn mul_scalar_2d(t: &Self::Tensor2D, s: &Self::Scalar) -> Self::Tensor2D;

    /// Adds a scalar to each element of a 2D tensor.
    fn add_scalar_2d(t: &Self::Tensor2D, s: &Self::Scalar) -> Self::Tensor2D;

    // --- Reductions ---

    /// Computes the mean of each column in a 2D tensor.
    ///
    /// Returns a 1D tensor of length `cols`.
    fn col_mean_2d(t: &Self::Tensor2D) -> Self::Tensor1D;

    /// Computes the minimum value of each column in a 2D tensor.
    ///
    /// Returns a 1D tensor of length `cols`.
    fn col_min_2d(t: &Self::Tensor2D) -> Self::Tensor1D;

    /// Computes the maximum value of each column in a 2D tensor.
    ///
    /// Returns a 1D tensor of length `cols`.
    fn col_max_2d(t: &Self::Tensor2D) -> Self::Tensor1D;

    /// Computes the mean of each row in a 2D tensor.
    ///
    /// Returns a 1D tensor of length `rows`.
    fn row_mean_2d(t: &Self::Tensor2D) -> Self::Tensor1D;

    /// Computes the arithmetic mean of all elements in a 2D tensor.
    fn mean_all_2d(t: &Self::Tensor2D) -> Self::Scalar;

    /// Returns `true` when every element of the tensor is finite
    /// (neither NaN nor infinite).
    fn is_finite_2d(t: &Self::Tensor2D) -> bool;

    // --- Scalar operations ---

    /// Creates a backend-specific scalar from an f64 value.
    fn scalar_f64(value: f64) -> Self::Scalar;

    // --- Broadcasting operations ---

    /// Broadcasts a 1D tensor and subtracts from each row of a 2D tensor.
    ///
    /// Result[i, j] = t[i, j] - v[j]
    fn broadcast_sub_1d_to_2d_rows(t: &Self::Tensor2D, v: &Self::Tensor1D) -> Self::Tensor2D;

    /// Broadcasts a 1D tensor and adds to each row of a 2D tensor.
    ///
    /// Result[i, j] = t[i, j] + v[j]
    fn broadcast_add_1d_to_2d_rows(t: &Self::Tensor2D, v: &Self::Tensor1D) -> Self::Tensor2D;

    /// Broadcasts a 1D tensor and multiplies each row of a 2D tensor.
    ///
    /// Result[i, j] = t[i, j] * v[j]
    fn broadcast_mul_1d_to_2d_rows(t: &Self::Tensor2D, v: &Self::Tensor1D) -> Self::Tensor2D;

    /// Broadcasts a 1D tensor and divides each row of a 2D tensor.
    ///
    /// Result[i, j] = t[i, j] / v[j]
    fn broadcast_div_1d_to_2d_rows(t: &Self::Tensor2D, v: &Self::Tensor1D) -> Self::Tensor2D;

    /// Broadcasts a 1D tensor down the columns and subtracts it.
    ///
    /// For a 2D tensor with shape (rows, cols) and a 1D tensor with shape
    /// (rows,), subtracts `v[i]` from every element of row `i`.
    ///
    /// Result[i, j] = t[i, j] - v[i]
    fn broadcast_sub_1d_to_2d_cols(t: &Self::Tensor2D, v: &Self::Tensor1D) -> Self::Tensor2D;
}
