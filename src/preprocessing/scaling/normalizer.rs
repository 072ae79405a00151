//! Sample-wise normalizer.
//!
//! Scales each sample (row) individually to unit norm. Unlike the column
//! scalers this operates per row, learns nothing from the data, and is
//! stateless. Rows with zero norm are left unchanged.

use crate::backend::{Backend, Tensor2D};
use crate::preprocessing::error::PreprocessingError;
use crate::preprocessing::traits::{FittedTransformer, StatelessTransformer, Transformer};
use crate::preprocessing::validate;
use serde::{Deserialize, Serialize};
use std::marker::PhantomData;

/// Norm used for row scaling.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum NormType {
    /// Sum of absolute values.
    L1,
    /// Euclidean norm.
    L2,
    /// Maximum absolute value.
    Max,
}

/// Serializable parameters for a fitted Normalizer.
///
/// The Normalizer learns nothing; the parameters are its configuration plus
/// the feature count recorded at fit time.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct NormalizerParams {
    /// Which norm to scale rows by.
    pub norm: NormType,
    /// Number of features seen during fit.
    pub n_features: usize,
}

/// Normalizer transformer (stateless).
#[derive(Clone)]
pub struct Normalizer<B: Backend> {
    norm: NormType,
    _backend: PhantomData<B>,
}

impl<B: Backend> Default for Normalizer<B> {
    fn default() -> Self {
        Self::new()
    }
}

impl<B: Backend> Normalizer<B> {
    /// Create a new Normalizer using the L2 norm.
    pub fn new() -> Self {
        Self {
            norm: NormType::L2,
            _backend: PhantomData,
        }
    }

    /// Set the norm to scale rows by.
    pub fn with_norm(mut self, norm: NormType) -> Self {
        self.norm = norm;
        self
    }
}

fn row_norm(row: &[f64], norm: NormType) -> f64 {
    match norm {
        NormType::L1 => row.iter().map(|x| x.abs()).sum(),
        NormType::L2 => row.iter().map(|x| x * x).sum::<f64>().sqrt(),
        NormType::Max => row.iter().map(|x| x.abs()).fold(0.0, f64::max),
    }
}

fn normalize_rows<B: Backend>(data: &Tensor2D<B>, norm: NormType) -> Tensor2D<B> {
    let (rows, cols) = data.shape();
    let mut flat = data.ravel().to_vec();

    for i in 0..rows {
        let row = &mut flat[i * cols..(i + 1) * cols];
        let n = row_norm(row, norm);
        if n > 0.0 {
            for x in row.iter_mut() {
                *x /= n;
            }
        }
    }

    Tensor2D::new(flat, rows, cols)
}

impl<B: Backend> Transformer<B> for Normalizer<B> {
    type Input = Tensor2D<B>;
    type Output = Tensor2D<B>;
    type Params = NormalizerParams;
    type Fitted = FittedNormalizer<B>;

    fn fit(&self, data: &Self::Input) -> Result<Self::Fitted, PreprocessingError> {
        validate::check_finite(data, "Normalizer::fit")?;
        let (_, cols) = data.shape();
        Ok(FittedNormalizer {
            norm: self.norm,
            n_features: cols,
            _backend: PhantomData,
        })
    }

    fn fit_transform(&self, data: &Self::Input) -> Result<Self::Output, PreprocessingError> {
        let fitted = self.fit(data)?;
        fitted.transform(data)
    }
}

impl<B: Backend> StatelessTransformer<B> for Normalizer<B> {
    fn transform_direct(data: &Self::Input) -> Result<Self::Output, PreprocessingError> {
        validate::check_finite(data, "Normalizer::transform_direct")?;
        Ok(normalize_rows(data, NormType::L2))
    }
}

/// Fitted Normalizer; carries only the configured norm.
#[derive(Clone)]
pub struct FittedNormalizer<B: Backend> {
    norm: NormType,
    n_features: usize,
    _backend: PhantomData<B>,
}

impl<B: Backend> FittedTransformer<B> for FittedNormalizer<B> {
    type Input = Tensor2D<B>;
    type Output = Tensor2D<B>;
    type Params = NormalizerParams;

    fn transform(&self, data: &Self::Input) -> Result<Self::Output, PreprocessingError> {
        validate::check_finite(data, "Normalizer::transform")?;
        Ok(normalize_rows(data, self.norm))
    }

    fn inverse_transform(&self, _data: &Self::Output) -> Result<Self::Input, PreprocessingError> {
        Err(PreprocessingError::NotInvertible(
            "Normalizer discards the original row magnitudes".to_string(),
        ))
    }

    fn extract_params(&self) -> Self::Params {
        NormalizerParams {
            norm: self.norm,
            n_features: self.n_features,
        }
    }

    fn from_params(params: Self::Params) -> Result<Self, PreprocessingError> {
        Ok(Self {
            norm: params.norm,
            n_features: params.n_features,
            _backend: PhantomData,
        })
    }

    fn n_features_in(&self) -> usize {
        self.n_features
    }
}
