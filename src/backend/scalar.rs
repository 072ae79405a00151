use crate::backend::Backend;
use std::marker::PhantomData;

/// Trait for scalar operations required by numerical backends.
///
/// Defines the minimal arithmetic surface needed by the scaler math.
/// Implemented for primitive floating-point types used by backends
/// (currently `f64`).
///
/// # Design rationale
/// This trait abstracts scalar operations to enable backend-agnostic generic
/// code while maintaining performance through `Copy` semantics and avoiding
/// dynamic dispatch.
pub trait ScalarOps:
    Clone
    + Copy
    + Send
    + Sync
    + std::ops::Add<Output = Self>
    + std::ops::Mul<Output = Self>
    + std::ops::Sub<Output = Self>
    + std::ops::Div<Output = Self>
{
    /// Computes the square root of the scalar.
    fn sqrt(self) -> Self;

    /// Returns the absolute value of the scalar.
    fn abs(self) -> Self;

    /// Returns the additive identity (zero) for this scalar type.
    fn zero() -> Self;

    /// Returns the multiplicative identity (one) for this scalar type.
    fn one() -> Self;

    /// Converts an `f64` value to this scalar type.
    fn from_f64(v: f64) -> Self;

    /// Converts this scalar to an `f64` value.
    fn to_f64(self) -> f64;
}

impl ScalarOps for f64 {
    fn sqrt(self) -> Self {
        f64::sqrt(self)
    }

    fn abs(self) -> Self {
        f64::abs(self)
    }

    fn zero() -> Self {
        0.0
    }

    fn one() -> Self {
        1.0
    }

    fn from_f64(v: f64) -> Self {
        v
    }

    fn to_f64(self) -> f64 {
        self
    }
}

/// Backend-typed scalar wrapper.
///
/// Carries a backend's native scalar representation together with phantom type
/// information about its originating backend, mirroring [`Tensor1D`] and
/// [`Tensor2D`].
///
/// [`Tensor1D`]: crate::backend::Tensor1D
/// [`Tensor2D`]: crate::backend::Tensor2D
#[derive(Clone, Copy)]
pub struct Scalar<B: Backend> {
    pub(crate) data: B::Scalar,
    pub(crate) backend: PhantomData<B>,
}

impl<B: Backend> Scalar<B> {
    /// Creates a scalar from an `f64` value.
    pub fn new(value: f64) -> Self {
        Self {
            data: B::scalar_f64(value),
            backend: PhantomData,
        }
    }

    /// Converts the scalar to an `f64` value.
    pub fn to_f64(&self) -> f64 {
        self.data.to_f64()
    }
}
