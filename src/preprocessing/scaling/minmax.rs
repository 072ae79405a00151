//! Min-Max Scaler.
//!
//! Transforms features by scaling each to a given range, typically [0, 1]:
//! ```text
//! x_scaled = (x - data_min) / (data_max - data_min) * (max - min) + min
//! ```
//!
//! The per-feature minimum and maximum fold over chunks, so this scaler
//! supports `partial_fit`.

use crate::backend::{Backend, Tensor1D, Tensor2D};
use crate::preprocessing::error::PreprocessingError;
use crate::preprocessing::scaling::handle_zeros_in_scale;
use crate::preprocessing::stats::{RunningMoments, Tracking};
use crate::preprocessing::traits::{FittedTransformer, IncrementalFit, Transformer};
use crate::preprocessing::validate;
use serde::{Deserialize, Serialize};
use std::marker::PhantomData;

/// Configuration for MinMaxScaler.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct MinMaxScalerConfig {
    /// Desired minimum of transformed data.
    pub feature_min: f64,
    /// Desired maximum of transformed data.
    pub feature_max: f64,
}

impl Default for MinMaxScalerConfig {
    fn default() -> Self {
        Self {
            feature_min: 0.0,
            feature_max: 1.0,
        }
    }
}

/// Serializable parameters for a fitted MinMaxScaler.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct MinMaxScalerParams {
    /// Configuration options.
    pub config: MinMaxScalerConfig,
    /// Accumulated running statistics.
    pub moments: RunningMoments,
}

/// MinMaxScaler transformer (unfitted).
///
/// Scales features to a given range by computing per-feature min and max.
#[derive(Clone)]
pub struct MinMaxScaler<B: Backend> {
    config: MinMaxScalerConfig,
    _backend: PhantomData<B>,
}

impl<B: Backend> Default for MinMaxScaler<B> {
    fn default() -> Self {
        Self::new()
    }
}

impl<B: Backend> MinMaxScaler<B> {
    /// Create a new MinMaxScaler targeting the [0, 1] range.
    pub fn new() -> Self {
        Self {
            config: MinMaxScalerConfig::default(),
            _backend: PhantomData,
        }
    }

    /// Set the target range for scaled features.
    ///
    /// # Panics
    /// Panics if `min >= max`.
    pub fn with_range(mut self, min: f64, max: f64) -> Self {
        assert!(min < max, "feature range minimum must be below maximum");
        self.config.feature_min = min;
        self.config.feature_max = max;
        self
    }

    /// Begin incremental fitting with a first chunk of samples.
    pub fn partial_fit(
        &self,
        data: &Tensor2D<B>,
    ) -> Result<FittedMinMaxScaler<B>, PreprocessingError> {
        Transformer::fit(self, data)
    }
}

impl<B: Backend> Transformer<B> for MinMaxScaler<B> {
    type Input = Tensor2D<B>;
    type Output = Tensor2D<B>;
    type Params = MinMaxScalerParams;
    type Fitted = FittedMinMaxScaler<B>;

    fn fit(&self, data: &Self::Input) -> Result<Self::Fitted, PreprocessingError> {
        validate::check_non_empty(data, "MinMaxScaler::fit")?;
        validate::check_finite(data, "MinMaxScaler::fit")?;

        let mut moments = RunningMoments::new(Tracking::default().with_min_max(true));
        moments.merge(data)?;

        FittedMinMaxScaler::from_moments(self.config.clone(), moments)
    }

    fn fit_transform(&self, data: &Self::Input) -> Result<Self::Output, PreprocessingError> {
        let fitted = self.fit(data)?;
        fitted.transform(data)
    }
}

/// Fitted MinMaxScaler ready for inference and further `partial_fit`.
#[derive(Clone)]
pub struct FittedMinMaxScaler<B: Backend> {
    config: MinMaxScalerConfig,
    moments: RunningMoments,
    data_min_: Tensor1D<B>,
    data_max_: Tensor1D<B>,
    data_range_: Tensor1D<B>,
    n_features: usize,
    _backend: PhantomData<B>,
}

impl<B: Backend> FittedMinMaxScaler<B> {
    fn from_moments(
        config: MinMaxScalerConfig,
        moments: RunningMoments,
    ) -> Result<Self, PreprocessingError> {
        let n_features = moments.n_features().ok_or_else(|| {
            PreprocessingError::EmptyData("MinMaxScaler has seen no samples".to_string())
        })?;

        let data_min = moments.min().map(<[f64]>::to_vec).ok_or_else(|| {
            PreprocessingError::EmptyData("MinMaxScaler has seen no samples".to_string())
        })?;
        let data_max = moments.max().map(<[f64]>::to_vec).ok_or_else(|| {
            PreprocessingError::EmptyData("MinMaxScaler has seen no samples".to_string())
        })?;

        let range: Vec<f64> = data_max
            .iter()
            .zip(data_min.iter())
            .map(|(max, min)| max - min)
            .collect();
        let range = handle_zeros_in_scale(range);

        Ok(Self {
            config,
            moments,
            data_min_: Tensor1D::new(data_min),
            data_max_: Tensor1D::new(data_max),
            data_range_: Tensor1D::new(range),
            n_features,
            _backend: PhantomData,
        })
    }

    /// Get the per-feature minimum seen during fitting.
    pub fn data_min(&self) -> &Tensor1D<B> {
        &self.data_min_
    }

    /// Get the per-feature maximum seen during fitting.
    pub fn data_max(&self) -> &Tensor1D<B> {
        &self.data_max_
    }

    /// Get the per-feature range (max - min, zeros replaced by 1).
    pub fn data_range(&self) -> &Tensor1D<B> {
        &self.data_range_
    }

    /// Number of samples the statistics were accumulated over.
    pub fn n_samples_seen(&self) -> u64 {
        self.moments.n_samples_seen()
    }

    fn span(&self) -> f64 {
        self.config.feature_max - self.config.feature_min
    }
}

impl<B: Backend> IncrementalFit<B> for FittedMinMaxScaler<B> {
    fn partial_fit(&mut self, data: &Self::Input) -> Result<(), PreprocessingError> {
        validate::check_finite(data, "MinMaxScaler::partial_fit")?;
        self.moments.merge(data)?;
        *self = Self::from_moments(self.config.clone(), self.moments.clone())?;
        Ok(())
    }
}

impl<B: Backend> FittedTransformer<B> for FittedMinMaxScaler<B> {
    type Input = Tensor2D<B>;
    type Output = Tensor2D<B>;
    type Params = MinMaxScalerParams;

    fn transform(&self, data: &Self::Input) -> Result<Self::Output, PreprocessingError> {
        let (_, cols) = data.shape();

        if cols != self.n_features {
            return Err(PreprocessingError::DimensionMismatch {
                expected: self.n_features,
                got: cols,
            });
        }

        // (x - data_min) / range, then stretch into [feature_min, feature_max]
        let centered = B::broadcast_sub_1d_to_2d_rows(&data.data, &self.data_min_.data);
        let unit = B::broadcast_div_1d_to_2d_rows(&centered, &self.data_range_.data);
        let stretched = B::mul_scalar_2d(&unit, &B::scalar_f64(self.span()));
        let shifted = B::add_scalar_2d(&stretched, &B::scalar_f64(self.config.feature_min));

        Ok(Tensor2D {
            data: shifted,
            backend: PhantomData,
        })
    }

    fn inverse_transform(&self, data: &Self::Output) -> Result<Self::Input, PreprocessingError> {
        let (_, cols) = data.shape();

        if cols != self.n_features {
            return Err(PreprocessingError::DimensionMismatch {
                expected: self.n_features,
                got: cols,
            });
        }

        let shifted = B::add_scalar_2d(&data.data, &B::scalar_f64(-self.config.feature_min));
        let unit = B::mul_scalar_2d(&shifted, &B::scalar_f64(1.0 / self.span()));
        let scaled = B::broadcast_mul_1d_to_2d_rows(&unit, &self.data_range_.data);
        let result = B::broadcast_add_1d_to_2d_rows(&scaled, &self.data_min_.data);

        Ok(Tensor2D {
            data: result,
            backend: PhantomData,
        })
    }

    fn extract_params(&self) -> Self::Params {
        MinMaxScalerParams {
            config: self.config.clone(),
            moments: self.moments.clone(),
        }
    }

    fn from_params(params: Self::Params) -> Result<Self, PreprocessingError> {
        Self::from_moments(params.config, params.moments)
    }

    fn n_features_in(&self) -> usize {
        self.n_features
    }
}
