//! Robust Scaler.
//!
//! Scales features using statistics that are robust to outliers: centers on
//! the per-feature median and scales by a quantile range (the interquartile
//! range by default):
//! ```text
//! x_scaled = (x - median) / (q_high - q_low)
//! ```
//!
//! Medians and quantiles are order statistics and do not fold over chunks, so
//! this scaler is batch-only and does not implement `partial_fit`.

use crate::backend::{Backend, Tensor1D, Tensor2D};
use crate::preprocessing::error::PreprocessingError;
use crate::preprocessing::scaling::handle_zeros_in_scale;
use crate::preprocessing::stats::ColumnarChunk;
use crate::preprocessing::traits::{FittedTransformer, Transformer};
use crate::preprocessing::validate;
use serde::{Deserialize, Serialize};
use std::marker::PhantomData;

/// Configuration for RobustScaler.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RobustScalerConfig {
    /// If true, center the data on the median before scaling.
    pub with_centering: bool,
    /// If true, scale the data by the quantile range.
    pub with_scaling: bool,
    /// Lower quantile in percent, 0 <= low < high <= 100.
    pub quantile_low: f64,
    /// Upper quantile in percent.
    pub quantile_high: f64,
}

impl Default for RobustScalerConfig {
    fn default() -> Self {
        Self {
            with_centering: true,
            with_scaling: true,
            quantile_low: 25.0,
            quantile_high: 75.0,
        }
    }
}

/// Serializable parameters for a fitted RobustScaler.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RobustScalerParams {
    /// Configuration options.
    pub config: RobustScalerConfig,
    /// Per-feature median (zeros when centering is off).
    pub center: Vec<f64>,
    /// Per-feature quantile range (ones when scaling is off).
    pub scale: Vec<f64>,
    /// Number of features seen during fit.
    pub n_features: usize,
}

/// RobustScaler transformer (unfitted).
#[derive(Clone)]
pub struct RobustScaler<B: Backend> {
    config: RobustScalerConfig,
    _backend: PhantomData<B>,
}

impl<B: Backend> Default for RobustScaler<B> {
    fn default() -> Self {
        Self::new()
    }
}

impl<B: Backend> RobustScaler<B> {
    /// Create a new RobustScaler with the default (25, 75) quantile range.
    pub fn new() -> Self {
        Self {
            config: RobustScalerConfig::default(),
            _backend: PhantomData,
        }
    }

    /// Set whether to center data on the median.
    pub fn with_centering(mut self, on: bool) -> Self {
        self.config.with_centering = on;
        self
    }

    /// Set whether to scale data by the quantile range.
    pub fn with_scaling(mut self, on: bool) -> Self {
        self.config.with_scaling = on;
        self
    }

    /// Set the quantile range, in percent.
    ///
    /// # Panics
    /// Panics unless `0 <= low < high <= 100`.
    pub fn with_quantile_range(mut self, low: f64, high: f64) -> Self {
        assert!(
            (0.0..=100.0).contains(&low) && (0.0..=100.0).contains(&high) && low < high,
            "quantile range must satisfy 0 <= low < high <= 100"
        );
        self.config.quantile_low = low;
        self.config.quantile_high = high;
        self
    }
}

/// Quantile of already sorted values, with linear interpolation between ranks.
///
/// `q` is in percent. Matches the "linear" interpolation convention used by
/// numpy's percentile.
fn quantile_sorted(sorted: &[f64], q: f64) -> f64 {
    debug_assert!(!sorted.is_empty());
    if sorted.len() == 1 {
        return sorted[0];
    }
    let rank = q / 100.0 * (sorted.len() - 1) as f64;
    let lo = rank.floor() as usize;
    let hi = rank.ceil() as usize;
    if lo == hi {
        sorted[lo]
    } else {
        let frac = rank - lo as f64;
        sorted[lo] * (1.0 - frac) + sorted[hi] * frac
    }
}

impl<B: Backend> Transformer<B> for RobustScaler<B> {
    type Input = Tensor2D<B>;
    type Output = Tensor2D<B>;
    type Params = RobustScalerParams;
    type Fitted = FittedRobustScaler<B>;

    fn fit(&self, data: &Self::Input) -> Result<Self::Fitted, PreprocessingError> {
        validate::check_non_empty(data, "RobustScaler::fit")?;
        validate::check_finite(data, "RobustScaler::fit")?;

        let (_, cols) = data.shape();
        let mut center = Vec::with_capacity(cols);
        let mut scale = Vec::with_capacity(cols);

        for mut col in ColumnarChunk::columns(data) {
            col.sort_by(|a, b| a.partial_cmp(b).unwrap());

            center.push(if self.config.with_centering {
                quantile_sorted(&col, 50.0)
            } else {
                0.0
            });
            scale.push(if self.config.with_scaling {
                quantile_sorted(&col, self.config.quantile_high)
                    - quantile_sorted(&col, self.config.quantile_low)
            } else {
                1.0
            });
        }

        if self.config.with_scaling {
            scale = handle_zeros_in_scale(scale);
        }

        FittedRobustScaler::from_params(RobustScalerParams {
            config: self.config.clone(),
            center,
            scale,
            n_features: cols,
        })
    }

    fn fit_transform(&self, data: &Self::Input) -> Result<Self::Output, PreprocessingError> {
        let fitted = self.fit(data)?;
        fitted.transform(data)
    }
}

/// Fitted RobustScaler ready for inference.
#[derive(Clone)]
pub struct FittedRobustScaler<B: Backend> {
    config: RobustScalerConfig,
    center_: Tensor1D<B>,
    scale_: Tensor1D<B>,
    center_vals: Vec<f64>,
    scale_vals: Vec<f64>,
    n_features: usize,
    _backend: PhantomData<B>,
}

impl<B: Backend> FittedRobustScaler<B> {
    /// Get the per-feature median (zeros when centering is off).
    pub fn center(&self) -> &Tensor1D<B> {
        &self.center_
    }

    /// Get the per-feature quantile range (zeros replaced by 1; ones when
    /// scaling is off).
    pub fn scale(&self) -> &Tensor1D<B> {
        &self.scale_
    }
}

impl<B: Backend> FittedTransformer<B> for FittedRobustScaler<B> {
    type Input = Tensor2D<B>;
    type Output = Tensor2D<B>;
    type Params = RobustScalerParams;

    fn transform(&self, data: &Self::Input) -> Result<Self::Output, PreprocessingError> {
        let (_, cols) = data.shape();

        if cols != self.n_features {
            return Err(PreprocessingError::DimensionMismatch {
                expected: self.n_features,
                got: cols,
            });
        }

        let mut result = data.data.clone();
        if self.config.with_centering {
            result = B::broadcast_sub_1d_to_2d_rows(&result, &self.center_.data);
        }
        if self.config.with_scaling {
            result = B::broadcast_div_1d_to_2d_rows(&result, &self.scale_.data);
        }

        Ok(Tensor2D {
            data: result,
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

        let mut result = data.data.clone();
        if self.config.with_scaling {
            result = B::broadcast_mul_1d_to_2d_rows(&result, &self.scale_.data);
        }
        if self.config.with_centering {
            result = B::broadcast_add_1d_to_2d_rows(&result, &self.center_.data);
        }

        Ok(Tensor2D {
            data: result,
            backend: PhantomData,
        })
    }

    fn extract_params(&self) -> Self::Params {
        RobustScalerParams {
            config: self.config.clone(),
            center: self.center_vals.clone(),
            scale: self.scale_vals.clone(),
            n_features: self.n_features,
        }
    }

    fn from_params(params: Self::Params) -> Result<Self, PreprocessingError> {
        if params.center.len() != params.n_features || params.scale.len() != params.n_features {
            return Err(PreprocessingError::DimensionMismatch {
                expected: params.n_features,
                got: params.center.len(),
            });
        }
        Ok(Self {
            config: params.config,
            center_: Tensor1D::new(params.center.clone()),
            scale_: Tensor1D::new(params.scale.clone()),
            center_vals: params.center,
            scale_vals: params.scale,
            n_features: params.n_features,
            _backend: PhantomData,
        })
    }

    fn n_features_in(&self) -> usize {
        self.n_features
    }
}
