//! Standard Scaler (Z-score normalization).
//!
//! Transforms features by removing the mean and scaling to unit variance.
//!
//! The standard score of a sample `x` is calculated as:
//! ```text
//! z = (x - u) / s
//! ```
//! where `u` is the mean of the training samples, and `s` is the standard
//! deviation (population, divisor `n`).
//!
//! Both `fit` and `partial_fit` accumulate their statistics through
//! [`RunningMoments`], so fitting in one shot or chunk by chunk yields the
//! same parameters up to floating-point rounding.
//!
//! # Example
//! ```ignore
//! use streamscale::preprocessing::{IncrementalFit, Transformer, StandardScaler};
//! use streamscale::backend::CpuBackend;
//!
//! let scaler = StandardScaler::<CpuBackend>::new()
//!     .with_mean(true)
//!     .with_std(true);
//!
//! // Streaming over chunks:
//! let mut fitted = scaler.partial_fit(&first_chunk)?;
//! fitted.partial_fit(&second_chunk)?;
//! let scaled = fitted.transform(&data)?;
//! ```

use crate::backend::{Backend, Tensor1D, Tensor2D};
use crate::preprocessing::error::PreprocessingError;
use crate::preprocessing::scaling::handle_zeros_in_scale;
use crate::preprocessing::stats::{RunningMoments, Tracking};
use crate::preprocessing::traits::{FittedTransformer, IncrementalFit, Transformer};
use crate::preprocessing::validate;
use serde::{Deserialize, Serialize};
use std::marker::PhantomData;

/// Configuration for StandardScaler.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct StandardScalerConfig {
    /// If true, center the data before scaling.
    pub with_mean: bool,
    /// If true, scale the data to unit variance.
    pub with_std: bool,
}

impl Default for StandardScalerConfig {
    fn default() -> Self {
        Self {
            with_mean: true,
            with_std: true,
        }
    }
}

/// Serializable parameters for a fitted StandardScaler.
///
/// Carries the full accumulator state, so a loaded scaler can continue
/// `partial_fit` where the saved one stopped.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct StandardScalerParams {
    /// Configuration options.
    pub config: StandardScalerConfig,
    /// Accumulated running statistics.
    pub moments: RunningMoments,
}

/// StandardScaler transformer (unfitted).
///
/// Transforms features by removing the mean and scaling to unit variance.
#[derive(Clone)]
pub struct StandardScaler<B: Backend> {
    config: StandardScalerConfig,
    _backend: PhantomData<B>,
}

impl<B: Backend> Default for StandardScaler<B> {
    fn default() -> Self {
        Self::new()
    }
}

impl<B: Backend> StandardScaler<B> {
    /// Create a new StandardScaler with default configuration.
    pub fn new() -> Self {
        Self {
            config: StandardScalerConfig::default(),
            _backend: PhantomData,
        }
    }

    /// Set whether to center data by mean.
    pub fn with_mean(mut self, with_mean: bool) -> Self {
        self.config.with_mean = with_mean;
        self
    }

    /// Set whether to scale data to unit variance.
    pub fn with_std(mut self, with_std: bool) -> Self {
        self.config.with_std = with_std;
        self
    }

    /// Begin incremental fitting with a first chunk of samples.
    ///
    /// Further chunks are folded in with
    /// [`FittedStandardScaler::partial_fit`].
    pub fn partial_fit(
        &self,
        data: &Tensor2D<B>,
    ) -> Result<FittedStandardScaler<B>, PreprocessingError> {
        Transformer::fit(self, data)
    }
}

impl<B: Backend> Transformer<B> for StandardScaler<B> {
    type Input = Tensor2D<B>;
    type Output = Tensor2D<B>;
    type Params = StandardScalerParams;
    type Fitted = FittedStandardScaler<B>;

    fn fit(&self, data: &Self::Input) -> Result<Self::Fitted, PreprocessingError> {
        validate::check_non_empty(data, "StandardScaler::fit")?;
        validate::check_finite(data, "StandardScaler::fit")?;

        let mut moments = RunningMoments::new(Tracking::default().with_mean_var(true));
        moments.merge(data)?;

        FittedStandardScaler::from_moments(self.config.clone(), moments)
    }

    fn fit_transform(&self, data: &Self::Input) -> Result<Self::Output, PreprocessingError> {
        let fitted = self.fit(data)?;
        fitted.transform(data)
    }
}

/// Fitted StandardScaler ready for inference and further `partial_fit`.
#[derive(Clone)]
pub struct FittedStandardScaler<B: Backend> {
    config: StandardScalerConfig,
    moments: RunningMoments,
    mean_: Tensor1D<B>,
    scale_: Tensor1D<B>,
    n_features: usize,
    _backend: PhantomData<B>,
}

impl<B: Backend> FittedStandardScaler<B> {
    /// Derives the transform parameters from accumulated statistics.
    fn from_moments(
        config: StandardScalerConfig,
        moments: RunningMoments,
    ) -> Result<Self, PreprocessingError> {
        let n_features = moments.n_features().ok_or_else(|| {
            PreprocessingError::EmptyData("StandardScaler has seen no samples".to_string())
        })?;

        let mean_vals = if config.with_mean {
            moments
                .mean()
                .map(<[f64]>::to_vec)
                .unwrap_or_else(|| vec![0.0; n_features])
        } else {
            vec![0.0; n_features]
        };

        let scale_vals = if config.with_std {
            let std: Vec<f64> = moments
                .var()
                .map(|var| var.iter().map(|v| v.sqrt()).collect())
                .unwrap_or_else(|| vec![1.0; n_features]);
            handle_zeros_in_scale(std)
        } else {
            vec![1.0; n_features]
        };

        Ok(Self {
            config,
            moments,
            mean_: Tensor1D::new(mean_vals),
            scale_: Tensor1D::new(scale_vals),
            n_features,
            _backend: PhantomData,
        })
    }

    /// Get the mean values for each feature (zeros when `with_mean` is off).
    pub fn mean(&self) -> &Tensor1D<B> {
        &self.mean_
    }

    /// Get the scale (standard deviation, zeros replaced by 1) for each
    /// feature.
    pub fn scale(&self) -> &Tensor1D<B> {
        &self.scale_
    }

    /// Get the accumulated population variance per feature.
    ///
    /// `None` when variance scaling is disabled (`with_std(false)`).
    pub fn var(&self) -> Option<Vec<f64>> {
        if self.config.with_std {
            self.moments.var().map(<[f64]>::to_vec)
        } else {
            None
        }
    }

    /// Number of samples the statistics were accumulated over.
    pub fn n_samples_seen(&self) -> u64 {
        self.moments.n_samples_seen()
    }
}

impl<B: Backend> IncrementalFit<B> for FittedStandardScaler<B> {
    fn partial_fit(&mut self, data: &Self::Input) -> Result<(), PreprocessingError> {
        validate::check_finite(data, "StandardScaler::partial_fit")?;
        self.moments.merge(data)?;
        *self = Self::from_moments(self.config.clone(), self.moments.clone())?;
        Ok(())
    }
}

impl<B: Backend> FittedTransformer<B> for FittedStandardScaler<B> {
    type Input = Tensor2D<B>;
    type Output = Tensor2D<B>;
    type Params = StandardScalerParams;

    fn transform(&self, data: &Self::Input) -> Result<Self::Output, PreprocessingError> {
        let (_, cols) = data.shape();

        if cols != self.n_features {
            return Err(PreprocessingError::DimensionMismatch {
                expected: self.n_features,
                got: cols,
            });
        }

        let mut result = data.data.clone();

        if self.config.with_mean {
            result = B::broadcast_sub_1d_to_2d_rows(&result, &self.mean_.data);
        }

        if self.config.with_std {
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

        if self.config.with_std {
            result = B::broadcast_mul_1d_to_2d_rows(&result, &self.scale_.data);
        }

        if self.config.with_mean {
            result = B::broadcast_add_1d_to_2d_rows(&result, &self.mean_.data);
        }

        Ok(Tensor2D {
            data: result,
            backend: PhantomData,
        })
    }

    fn extract_params(&self) -> Self::Params {
        StandardScalerParams {
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::CpuBackend;

    fn create_test_data() -> Tensor2D<CpuBackend> {
        // [[0, 1], [0, 1], [1, 3]]
        Tensor2D::new(vec![0.0, 1.0, 0.0, 1.0, 1.0, 3.0], 3, 2)
    }

    #[test]
    fn test_standard_scaler_fit() {
        let data = create_test_data();
        let scaler = StandardScaler::<CpuBackend>::new();
        let fitted = scaler.fit(&data).unwrap();

        // Mean: [1/3, 5/3]
        let mean = fitted.mean().to_vec();
        assert!((mean[0] - 1.0 / 3.0).abs() < 1e-10);
        assert!((mean[1] - 5.0 / 3.0).abs() < 1e-10);
        assert_eq!(fitted.n_samples_seen(), 3);
    }

    #[test]
    fn test_standard_scaler_transform() {
        let data = create_test_data();
        let scaler = StandardScaler::<CpuBackend>::new();
        let fitted = scaler.fit(&data).unwrap();

        let transformed = fitted.transform(&data).unwrap();

        // After standardization, each column should have mean≈0 and var≈1
        let mean_vals = transformed.col_mean().to_vec();
        assert!(mean_vals[0].abs() < 1e-10, "mean[0] = {}", mean_vals[0]);
        assert!(mean_vals[1].abs() < 1e-10, "mean[1] = {}", mean_vals[1]);

        let refit = StandardScaler::<CpuBackend>::new()
            .fit(&transformed)
            .unwrap();
        let var = refit.var().unwrap();
        assert!((var[0] - 1.0).abs() < 1e-10, "var[0] = {}", var[0]);
        assert!((var[1] - 1.0).abs() < 1e-10, "var[1] = {}", var[1]);
    }

    #[test]
    fn test_standard_scaler_inverse_transform() {
        let data = create_test_data();
        let scaler = StandardScaler::<CpuBackend>::new();
        let fitted = scaler.fit(&data).unwrap();

        let transformed = fitted.transform(&data).unwrap();
        let recovered = fitted.inverse_transform(&transformed).unwrap();

        let original = data.ravel().to_vec();
        let recovered_vec = recovered.ravel().to_vec();

        for (o, r) in original.iter().zip(recovered_vec.iter()) {
            assert!((o - r).abs() < 1e-10);
        }
    }

    #[test]
    fn test_standard_scaler_partial_fit_matches_fit() {
        let data = create_test_data();
        let scaler = StandardScaler::<CpuBackend>::new();

        let batch = scaler.fit(&data).unwrap();

        // Same rows, one at a time
        let mut incr = scaler
            .partial_fit(&Tensor2D::new(vec![0.0, 1.0], 1, 2))
            .unwrap();
        incr.partial_fit(&Tensor2D::new(vec![0.0, 1.0], 1, 2))
            .unwrap();
        incr.partial_fit(&Tensor2D::new(vec![1.0, 3.0], 1, 2))
            .unwrap();

        assert_eq!(incr.n_samples_seen(), batch.n_samples_seen());
        for (a, b) in batch
            .mean()
            .to_vec()
            .iter()
            .zip(incr.mean().to_vec().iter())
        {
            assert!((a - b).abs() < 1e-12);
        }
        for (a, b) in batch
            .var()
            .unwrap()
            .iter()
            .zip(incr.var().unwrap().iter())
        {
            assert!((a - b).abs() < 1e-12);
        }
    }

    #[test]
    fn test_standard_scaler_partial_fit_single_row_start() {
        // partial_fit on one row: mean is the row itself, var is zero,
        // so the derived scale falls back to 1
        let row = Tensor2D::<CpuBackend>::new(vec![4.0, -2.0], 1, 2);
        let fitted = StandardScaler::<CpuBackend>::new().partial_fit(&row).unwrap();

        assert_eq!(fitted.mean().to_vec(), vec![4.0, -2.0]);
        assert_eq!(fitted.var().unwrap(), vec![0.0, 0.0]);
        assert_eq!(fitted.scale().to_vec(), vec![1.0, 1.0]);
        assert_eq!(fitted.n_samples_seen(), 1);
    }

    #[test]
    fn test_standard_scaler_partial_fit_rejects_non_finite() {
        let data = create_test_data();
        let mut fitted = StandardScaler::<CpuBackend>::new().fit(&data).unwrap();
        let before = fitted.mean().to_vec();

        let bad = Tensor2D::<CpuBackend>::new(vec![1.0, f64::NAN], 1, 2);
        let result = fitted.partial_fit(&bad);

        assert!(matches!(
            result,
            Err(PreprocessingError::NonFiniteInput(_))
        ));
        // state unchanged
        assert_eq!(fitted.mean().to_vec(), before);
        assert_eq!(fitted.n_samples_seen(), 3);
    }

    #[test]
    fn test_standard_scaler_without_mean() {
        let data = create_test_data();
        let scaler = StandardScaler::<CpuBackend>::new().with_mean(false);
        let fitted = scaler.fit(&data).unwrap();

        // Mean should be zeros
        let mean = fitted.mean().to_vec();
        assert!(mean.iter().all(|&m| m == 0.0));
    }

    #[test]
    fn test_standard_scaler_without_std() {
        let data = create_test_data();
        let scaler = StandardScaler::<CpuBackend>::new().with_std(false);
        let fitted = scaler.fit(&data).unwrap();

        // Scale should be ones, variance not exposed
        let scale = fitted.scale().to_vec();
        assert!(scale.iter().all(|&s| s == 1.0));
        assert!(fitted.var().is_none());
    }

    #[test]
    fn test_standard_scaler_serialization() {
        let data = create_test_data();
        let scaler = StandardScaler::<CpuBackend>::new();
        let fitted = scaler.fit(&data).unwrap();

        let params = fitted.extract_params();
        let restored = FittedStandardScaler::<CpuBackend>::from_params(params).unwrap();

        let t1 = fitted.transform(&data).unwrap().ravel().to_vec();
        let t2 = restored.transform(&data).unwrap().ravel().to_vec();

        for (i, (a, b)) in t1.iter().zip(t2.iter()).enumerate() {
            assert!(
                (a - b).abs() < 1e-12,
                "Mismatch at index {}: {} vs {}",
                i,
                a,
                b
            );
        }
    }

    #[test]
    fn test_standard_scaler_partial_fit_resumes_after_load() {
        let scaler = StandardScaler::<CpuBackend>::new();

        let chunk1 = Tensor2D::<CpuBackend>::new(vec![0.0, 1.0, 0.0, 1.0], 2, 2);
        let chunk2 = Tensor2D::<CpuBackend>::new(vec![1.0, 3.0], 1, 2);

        let fitted = scaler.partial_fit(&chunk1).unwrap();
        let mut reloaded =
            FittedStandardScaler::<CpuBackend>::from_params(fitted.extract_params()).unwrap();
        reloaded.partial_fit(&chunk2).unwrap();

        let full = scaler.fit(&create_test_data()).unwrap();
        assert_eq!(reloaded.n_samples_seen(), full.n_samples_seen());
        for (a, b) in full
            .var()
            .unwrap()
            .iter()
            .zip(reloaded.var().unwrap().iter())
        {
            assert!((a - b).abs() < 1e-12);
        }
    }

    #[test]
    fn test_standard_scaler_feature_mismatch() {
        let data = create_test_data(); // 2 features
        let scaler = StandardScaler::<CpuBackend>::new();
        let fitted = scaler.fit(&data).unwrap();

        let wrong_data = Tensor2D::<CpuBackend>::new(vec![1.0, 2.0, 3.0], 1, 3);
        let result = fitted.transform(&wrong_data);

        assert!(matches!(
            result,
            Err(PreprocessingError::DimensionMismatch {
                expected: 2,
                got: 3
            })
        ));
    }

    #[test]
    fn test_standard_scaler_fit_rejects_non_finite() {
        let data = Tensor2D::<CpuBackend>::new(vec![1.0, f64::INFINITY], 1, 2);
        let result = StandardScaler::<CpuBackend>::new().fit(&data);
        assert!(matches!(
            result,
            Err(PreprocessingError::NonFiniteInput(_))
        ));
    }

    #[test]
    fn test_standard_scaler_empty_data() {
        let data = Tensor2D::<CpuBackend>::zeros(0, 2);
        let scaler = StandardScaler::<CpuBackend>::new();
        let result = scaler.fit(&data);
        assert!(result.is_err());
    }

    #[test]
    fn test_standard_scaler_constant_feature() {
        // All values in column 0 are the same (constant feature)
        let data = Tensor2D::<CpuBackend>::new(vec![5.0, 1.0, 5.0, 2.0, 5.0, 3.0], 3, 2);
        let scaler = StandardScaler::<CpuBackend>::new();
        let fitted = scaler.fit(&data).unwrap();

        // Raw variance is zero; derived scale is substituted with 1
        assert_eq!(fitted.var().unwrap()[0], 0.0);
        assert!((fitted.scale().to_vec()[0] - 1.0).abs() < 1e-12);
        assert!((fitted.mean().to_vec()[0] - 5.0).abs() < 1e-12);

        // Transform output stays finite
        let transformed = fitted.transform(&data).unwrap();
        assert!(transformed.is_finite());
    }

    #[test]
    fn test_standard_scaler_save_load_file() {
        let data = create_test_data();
        let scaler = StandardScaler::<CpuBackend>::new();
        let fitted = scaler.fit(&data).unwrap();

        let temp_file = std::env::temp_dir().join("streamscale_test_standard.bin");
        fitted.save_to_file(&temp_file).unwrap();

        let loaded = FittedStandardScaler::<CpuBackend>::load_from_file(&temp_file).unwrap();

        assert_eq!(loaded.n_features_in(), fitted.n_features_in());

        let v1 = fitted.transform(&data).unwrap().ravel().to_vec();
        let v2 = loaded.transform(&data).unwrap().ravel().to_vec();
        for (a, b) in v1.iter().zip(v2.iter()) {
            assert!((a - b).abs() < 1e-12);
        }

        std::fs::remove_file(temp_file).ok();
    }

    #[test]
    fn test_standard_scaler_no_mean_no_std() {
        let data = create_test_data();
        let scaler = StandardScaler::<CpuBackend>::new()
            .with_mean(false)
            .with_std(false);
        let fitted = scaler.fit(&data).unwrap();

        let transformed = fitted.transform(&data).unwrap();
        let original = data.ravel().to_vec();
        let result = transformed.ravel().to_vec();

        // Without mean centering or std scaling, data should be unchanged
        for (o, r) in original.iter().zip(result.iter()) {
            assert!((o - r).abs() < 1e-12);
        }
    }
}
