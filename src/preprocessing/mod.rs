//! Data preprocessing transformers.
//!
//! The transformers here follow a fit/transform split: an unfitted
//! [`Transformer`] carries hyperparameters and learns from data, producing a
//! [`FittedTransformer`] that applies (and where meaningful, inverts) the
//! learned transformation and can be serialized for deployment.
//!
//! Scalers whose statistics fold over row chunks also implement
//! [`IncrementalFit`], backed by the [`stats::RunningMoments`] accumulator:
//! fitting on the whole matrix and fitting chunk by chunk produce the same
//! parameters.

pub mod binarize;
pub mod error;
pub mod kernel;
pub mod scaling;
pub mod stats;
pub mod traits;
pub mod validate;

pub use binarize::{Binarizer, BinarizerParams, FittedBinarizer};
pub use error::PreprocessingError;
pub use kernel::{FittedKernelCenterer, KernelCenterer, KernelCentererParams};
pub use scaling::{
    FittedMaxAbsScaler, FittedMinMaxScaler, FittedNormalizer, FittedRobustScaler,
    FittedStandardScaler, MaxAbsScaler, MaxAbsScalerParams, MinMaxScaler, MinMaxScalerConfig,
    MinMaxScalerParams, NormType, Normalizer, NormalizerParams, RobustScaler, RobustScalerConfig,
    RobustScalerParams, StandardScaler, StandardScalerConfig, StandardScalerParams,
};
pub use stats::{ColumnarChunk, RunningMoments, Tracking};
pub use traits::{FittedTransformer, IncrementalFit, StatelessTransformer, Transformer};
