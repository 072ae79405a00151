//! Feature binarization.
//!
//! Thresholds features to boolean (0/1) values: elements strictly greater
//! than the threshold become 1, everything else 0. Stateless; the threshold
//! is configuration, not learned.

use crate::backend::{Backend, Tensor2D};
use crate::preprocessing::error::PreprocessingError;
use crate::preprocessing::traits::{FittedTransformer, StatelessTransformer, Transformer};
use crate::preprocessing::validate;
use serde::{Deserialize, Serialize};
use std::marker::PhantomData;

/// Serializable parameters for a fitted Binarizer.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct BinarizerParams {
    /// Threshold above which values map to 1.
    pub threshold: f64,
    /// Number of features seen during fit.
    pub n_features: usize,
}

/// Binarizer transformer (stateless).
#[derive(Clone)]
pub struct Binarizer<B: Backend> {
    threshold: f64,
    _backend: PhantomData<B>,
}

impl<B: Backend> Default for Binarizer<B> {
    fn default() -> Self {
        Self::new()
    }
}

impl<B: Backend> Binarizer<B> {
    /// Create a new Binarizer with threshold 0.
    pub fn new() -> Self {
        Self {
            threshold: 0.0,
            _backend: PhantomData,
        }
    }

    /// Set the threshold. Values strictly above it map to 1.
    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.threshold = threshold;
        self
    }
}

fn binarize<B: Backend>(data: &Tensor2D<B>, threshold: f64) -> Tensor2D<B> {
    let (rows, cols) = data.shape();
    let flat: Vec<f64> = data
        .ravel()
        .to_vec()
        .into_iter()
        .map(|x| if x > threshold { 1.0 } else { 0.0 })
        .collect();
    Tensor2D::new(flat, rows, cols)
}

impl<B: Backend> Transformer<B> for Binarizer<B> {
    type Input = Tensor2D<B>;
    type Output = Tensor2D<B>;
    type Params = BinarizerParams;
    type Fitted = FittedBinarizer<B>;

    fn fit(&self, data: &Self::Input) -> Result<Self::Fitted, PreprocessingError> {
        validate::check_finite(data, "Binarizer::fit")?;
        let (_, cols) = data.shape();
        Ok(FittedBinarizer {
            threshold: self.threshold,
            n_features: cols,
            _backend: PhantomData,
        })
    }

    fn fit_transform(&self, data: &Self::Input) -> Result<Self::Output, PreprocessingError> {
        let fitted = self.fit(data)?;
        fitted.transform(data)
    }
}

impl<B: Backend> StatelessTransformer<B> for Binarizer<B> {
    fn transform_direct(data: &Self::Input) -> Result<Self::Output, PreprocessingError> {
        validate::check_finite(data, "Binarizer::transform_direct")?;
        Ok(binarize(data, 0.0))
    }
}

/// Fitted Binarizer; carries only the configured threshold.
#[derive(Clone)]
pub struct FittedBinarizer<B: Backend> {
    threshold: f64,
    n_features: usize,
    _backend: PhantomData<B>,
}

impl<B: Backend> FittedTransformer<B> for FittedBinarizer<B> {
    type Input = Tensor2D<B>;
    type Output = Tensor2D<B>;
    type Params = BinarizerParams;

    fn transform(&self, data: &Self::Input) -> Result<Self::Output, PreprocessingError> {
        validate::check_finite(data, "Binarizer::transform")?;
        Ok(binarize(data, self.threshold))
    }

    fn inverse_transform(&self, _data: &Self::Output) -> Result<Self::Input, PreprocessingError> {
        Err(PreprocessingError::NotInvertible(
            "Binarizer discards the original magnitudes".to_string(),
        ))
    }

    fn extract_params(&self) -> Self::Params {
        BinarizerParams {
            threshold: self.threshold,
            n_features: self.n_features,
        }
    }

    fn from_params(params: Self::Params) -> Result<Self, PreprocessingError> {
        Ok(Self {
            threshold: params.threshold,
            n_features: params.n_features,
            _backend: PhantomData,
        })
    }

    fn n_features_in(&self) -> usize {
        self.n_features
    }
}
