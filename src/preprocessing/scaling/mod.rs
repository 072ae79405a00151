//! Scaling transformers for feature normalization.
//!
//! This module provides transformers that scale features to a common range
//! or distribution, which is essential for many machine learning algorithms.
//!
//! # Available Transformers
//!
//! | Transformer | Description | Streaming |
//! |-------------|-------------|-----------|
//! | [`StandardScaler`] | Z-score normalization (mean=0, std=1) | `partial_fit` |
//! | [`MinMaxScaler`] | Scale to [0, 1] or custom range | `partial_fit` |
//! | [`MaxAbsScaler`] | Scale by max absolute value | `partial_fit` |
//! | [`RobustScaler`] | Use median and IQR | batch only |
//! | [`Normalizer`] | Scale individual samples to unit norm | stateless |
//!
//! The streaming scalers accumulate their statistics with
//! [`RunningMoments`](crate::preprocessing::stats::RunningMoments); `fit` is
//! one merge of the whole matrix, `partial_fit` merges chunk by chunk, so the
//! two agree by construction.
//!
//! # Example
//!
//! ```ignore
//! use streamscale::preprocessing::{Transformer, StandardScaler};
//! use streamscale::backend::CpuBackend;
//!
//! let scaler = StandardScaler::<CpuBackend>::new();
//! let fitted = scaler.fit(&data)?;
//! let scaled = fitted.transform(&new_data)?;
//! ```

pub mod maxabs;
pub mod minmax;
pub mod normalizer;
pub mod robust;
pub mod standard;

pub use maxabs::{FittedMaxAbsScaler, MaxAbsScaler, MaxAbsScalerParams};
pub use minmax::{FittedMinMaxScaler, MinMaxScaler, MinMaxScalerConfig, MinMaxScalerParams};
pub use normalizer::{FittedNormalizer, NormType, Normalizer, NormalizerParams};
pub use robust::{FittedRobustScaler, RobustScaler, RobustScalerConfig, RobustScalerParams};
pub use standard::{
    FittedStandardScaler, StandardScaler, StandardScalerConfig, StandardScalerParams,
};

/// Replaces zero scale factors with one.
///
/// A constant feature accumulates a scale of exactly zero (zero variance,
/// zero range, or zero max-abs). Dividing by it would produce non-finite
/// output, so every scaler substitutes a scale of 1 for such features,
/// leaving them unscaled.
pub fn handle_zeros_in_scale(mut scale: Vec<f64>) -> Vec<f64> {
    for s in scale.iter_mut() {
        if *s == 0.0 {
            *s = 1.0;
        }
    }
    scale
}
