//! Max-Abs Scaler.
//!
//! Scales each feature by its maximum absolute value:
//! ```text
//! x_scaled = x / max(|x|)
//! ```
//!
//! This keeps sparsity (zeros stay zero) and maps data into [-1, 1]. The
//! per-feature max-abs folds over chunks, so this scaler supports
//! `partial_fit`.

use crate::backend::{Backend, Tensor1D, Tensor2D};
use crate::preprocessing::error::PreprocessingError;
use crate::preprocessing::scaling::handle_zeros_in_scale;
use crate::preprocessing::stats::{RunningMoments, Tracking};
use crate::preprocessing::traits::{FittedTransformer, IncrementalFit, Transformer};
use crate::preprocessing::validate;
use serde::{Deserialize, Serialize};
use std::marker::PhantomData;

/// Serializable parameters for a fitted MaxAbsScaler.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct MaxAbsScalerParams {
    /// Accumulated running statistics.
    pub moments: RunningMoments,
}

/// MaxAbsScaler transformer (unfitted).
///
/// Has no hyperparameters; construction is enough.
#[derive(Clone)]
pub struct MaxAbsScaler<B: Backend> {
    _backend: PhantomData<B>,
}

impl<B: Backend> Default for MaxAbsScaler<B> {
    fn default() -> Self {
        Self::new()
    }
}

impl<B: Backend> MaxAbsScaler<B> {
    /// Create a new MaxAbsScaler.
    pub fn new() -> Self {
        Self {
            _backend: PhantomData,
        }
    }

    /// Begin incremental fitting with a first chunk of samples.
    pub fn partial_fit(
        &self,
        data: &Tensor2D<B>,
    ) -> Result<FittedMaxAbsScaler<B>, PreprocessingError> {
        Transformer::fit(self, data)
    }
}

impl<B: Backend> Transformer<B> for MaxAbsScaler<B> {
    type Input = Tensor2D<B>;
    type Output = Tensor2D<B>;
    type Params = MaxAbsScalerParams;
    type Fitted = FittedMaxAbsScaler<B>;

    fn fit(&self, data: &Self::Input) -> Result<Self::Fitted, PreprocessingError> {
        validate::check_non_empty(data, "MaxAbsScaler::fit")?;
        validate::check_finite(data, "MaxAbsScaler::fit")?;

        let mut moments = RunningMoments::new(Tracking::default().with_max_abs(true));
        moments.merge(data)?;

        FittedMaxAbsScaler::from_moments(moments)
    }

    fn fit_transform(&self, data: &Self::Input) -> Result<Self::Output, PreprocessingError> {
        let fitted = self.fit(data)?;
        fitted.transform(data)
    }
}

/// Fitted MaxAbsScaler ready for inference and further `partial_fit`.
#[derive(Clone)]
pub struct FittedMaxAbsScaler<B: Backend> {
    moments: RunningMoments,
    scale_: Tensor1D<B>,
    n_features: usize,
    _backend: PhantomData<B>,
}

impl<B: Backend> FittedMaxAbsScaler<B> {
    fn from_moments(moments: RunningMoments) -> Result<Self, PreprocessingError> {
        let n_features = moments.n_features().ok_or_else(|| {
            PreprocessingError::EmptyData("MaxAbsScaler has seen no samples".to_string())
        })?;

        let max_abs = moments.max_abs().map(<[f64]>::to_vec).ok_or_else(|| {
            PreprocessingError::EmptyData("MaxAbsScaler has seen no samples".to_string())
        })?;
        let scale = handle_zeros_in_scale(max_abs);

        Ok(Self {
            moments,
            scale_: Tensor1D::new(scale),
            n_features,
            _backend: PhantomData,
        })
    }

    /// Get the per-feature maximum absolute value seen during fitting.
    pub fn max_abs(&self) -> Option<Vec<f64>> {
        self.moments.max_abs().map(<[f64]>::to_vec)
    }

    /// Get the scale (max-abs, zeros replaced by 1) for each feature.
    pub fn scale(&self) -> &Tensor1D<B> {
        &self.scale_
    }

    /// Number of samples the statistics were accumulated over.
    pub fn n_samples_seen(&self) -> u64 {
        self.moments.n_samples_seen()
    }
}

impl<B: Backend> IncrementalFit<B> for FittedMaxAbsScaler<B> {
    fn partial_fit(&mut self, data: &Self::Input) -> Result<(), PreprocessingError> {
        validate::check_finite(data, "MaxAbsScaler::partial_fit")?;
        self.moments.merge(data)?;
        *self = Self::from_moments(self.moments.clone())?;
        Ok(())
    }
}

impl<B: Backend> FittedTransformer<B> for FittedMaxAbsScaler<B> {
    type Input = Tensor2D<B>;
    type Output = Tensor2D<B>;
    type Params = MaxAbsScalerParams;

    fn transform(&self, data: &Self::Input) -> Result<Self::Output, PreprocessingError> {
        let (_, cols) = data.shape();

        if cols != self.n_features {
            return Err(PreprocessingError::DimensionMismatch {
                expected: self.n_features,
                got: cols,
            });
        }

        Ok(Tensor2D {
            data: B::broadcast_div_1d_to_2d_rows(&data.data, &self.scale_.data),
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

        Ok(Tensor2D {
            data: B::broadcast_mul_1d_to_2d_rows(&data.data, &self.scale_.data),
            backend: PhantomData,
        })
    }

    fn extract_params(&self) -> Self::Params {
        MaxAbsScalerParams {
            moments: self.moments.clone(),
        }
    }

    fn from_params(params: Self::Params) -> Result<Self, PreprocessingError> {
        Self::from_moments(params.moments)
    }

    fn n_features_in(&self) -> usize {
        self.n_features
    }
}
