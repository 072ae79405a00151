//! # streamscale
//!
//! Streaming-friendly feature preprocessing for machine learning pipelines.
//!
//! The crate centers on an incremental per-feature statistics accumulator
//! ([`preprocessing::stats::RunningMoments`]) that tracks count, mean,
//! population variance, min, max and max-abs over successive row chunks, and
//! a family of scalers built on top of it. Scalers whose statistics fold over
//! chunks (`StandardScaler`, `MinMaxScaler`, `MaxAbsScaler`) support
//! `partial_fit`; fitting chunk by chunk yields the same parameters as one
//! fit over the concatenated data.
//!
//! Computation is generic over a [`backend::Backend`], selected at compile
//! time. The default `cpu` feature provides a pure-Rust backend; the
//! `ndarray` feature adds one backed by the `ndarray` crate.
//!
//! ## Quick start
//!
//! ```
//! use streamscale::backend::{CpuBackend, Tensor2D};
//! use streamscale::preprocessing::{FittedTransformer, IncrementalFit, StandardScaler, Transformer};
//!
//! // [[0, 1], [0, 1]] then [[1, 3]]
//! let chunk1: Tensor2D<CpuBackend> = Tensor2D::new(vec![0.0, 1.0, 0.0, 1.0], 2, 2);
//! let chunk2: Tensor2D<CpuBackend> = Tensor2D::new(vec![1.0, 3.0], 1, 2);
//!
//! let scaler = StandardScaler::<CpuBackend>::new();
//! let mut fitted = scaler.partial_fit(&chunk1).unwrap();
//! fitted.partial_fit(&chunk2).unwrap();
//!
//! let scaled = fitted.transform(&chunk1).unwrap();
//! assert_eq!(scaled.shape(), (2, 2));
//! ```

pub mod backend;
pub mod preprocessing;
pub mod serialization;

pub use backend::Backend;
pub use preprocessing::{
    FittedTransformer, IncrementalFit, PreprocessingError, StatelessTransformer, Transformer,
};
