//! Core traits for preprocessing transformers.
//!
//! This module defines the three central traits:
//! - [`Transformer`]: Used during fitting; has hyperparameters and can learn from data.
//! - [`FittedTransformer`]: After fitting; ready for inference and serialization.
//! - [`IncrementalFit`]: Fitted transformers whose statistics fold over chunks.

use crate::backend::Backend;
use crate::preprocessing::error::PreprocessingError;
use crate::serialization::SerializableParams;

/// Trait for unfitted transformers with hyperparameters.
///
/// A transformer learns parameters from training data and can then transform
/// new data using those learned parameters. This trait represents the
/// configurable, unfitted state.
///
/// # Type Parameters
/// - `B`: The backend (e.g., `CpuBackend`) used for computation.
/// - `Input`: Input data type (typically `Tensor2D<B>`).
/// - `Output`: Output data type (typically `Tensor2D<B>`).
/// - `Params`: Serializable representation of learned parameters.
/// - `Fitted`: The corresponding fitted transformer type.
///
/// # Example
/// ```ignore
/// use streamscale::preprocessing::{Transformer, StandardScaler};
/// use streamscale::backend::CpuBackend;
///
/// let scaler = StandardScaler::<CpuBackend>::new();
/// let fitted = scaler.fit(&data)?;
/// let transformed = fitted.transform(&new_data)?;
/// ```
pub trait Transformer<B: Backend>: Clone {
    /// Input data type for transformation.
    type Input;
    /// Output data type after transformation.
    type Output;
    /// Serializable representation of learned parameters.
    type Params: SerializableParams;
    /// The fitted transformer type ready for inference.
    type Fitted: FittedTransformer<
        B,
        Params = Self::Params,
        Input = Self::Input,
        Output = Self::Output,
    >;

    /// Fit the transformer to the training data.
    ///
    /// # Errors
    /// Returns [`PreprocessingError`] if:
    /// - Data is empty
    /// - Data contains non-finite values (NaN, Inf)
    /// - Shape is incompatible with the transformer
    fn fit(&self, data: &Self::Input) -> Result<Self::Fitted, PreprocessingError>;

    /// Fit the transformer and transform the data in one step.
    fn fit_transform(&self, data: &Self::Input) -> Result<Self::Output, PreprocessingError>;
}

/// Trait for fitted transformers ready for inference.
///
/// After fitting, a transformer contains learned parameters (e.g., `mean_`,
/// `scale_` for StandardScaler) and can transform new data. It can also be
/// serialized and deserialized for deployment.
///
/// # Guarantees
/// - `extract_params()` + `from_params()` is a round-trip.
/// - `save_to_file` / `load_from_file` are cross-platform compatible.
pub trait FittedTransformer<B: Backend>: Clone {
    /// Input data type for transformation.
    type Input;
    /// Output data type after transformation.
    type Output;
    /// Serializable representation of learned parameters.
    type Params: SerializableParams;

    /// Transform data using learned parameters.
    ///
    /// # Errors
    /// Returns [`PreprocessingError`] if the input shape doesn't match the
    /// expected number of features.
    fn transform(&self, data: &Self::Input) -> Result<Self::Output, PreprocessingError>;

    /// Reverse the transformation (if supported).
    ///
    /// Not all transformers support inverse transformation; for example,
    /// Binarizer discards the original magnitudes.
    ///
    /// # Errors
    /// Returns [`PreprocessingError::NotInvertible`] if inverse transform is
    /// not supported, or a shape error if the data cannot be inverse
    /// transformed.
    fn inverse_transform(&self, data: &Self::Output) -> Result<Self::Input, PreprocessingError>;

    /// Extract learned parameters as a serializable representation.
    fn extract_params(&self) -> Self::Params;

    /// Reconstruct a fitted transformer from parameters.
    fn from_params(params: Self::Params) -> Result<Self, PreprocessingError>
    where
        Self: Sized;

    /// Save the fitted transformer to a file.
    fn save_to_file<P: AsRef<std::path::Path>>(&self, path: P) -> std::io::Result<()> {
        let params = self.extract_params();
        let bytes = params.to_bytes().map_err(std::io::Error::other)?;
        std::fs::write(path, bytes)
    }

    /// Load a fitted transformer from a file.
    fn load_from_file<P: AsRef<std::path::Path>>(path: P) -> Result<Self, PreprocessingError>
    where
        Self: Sized,
    {
        let bytes = std::fs::read(path)?;
        let params = Self::Params::from_bytes(&bytes)
            .map_err(|e| PreprocessingError::SerializationError(e.to_string()))?;
        Self::from_params(params)
    }

    /// Returns the number of features seen during fit.
    fn n_features_in(&self) -> usize;
}

/// Trait for fitted transformers that can keep learning from new chunks.
///
/// Estimators whose learned statistics are expressible as an incremental
/// reduction (mean/variance, min/max, max-abs) implement this to fold further
/// row chunks into their state. After any number of `partial_fit` calls over a
/// partition of a matrix's rows, the derived parameters equal those of one
/// `fit` over the whole matrix, up to floating-point rounding.
///
/// Estimators based on order statistics (e.g. RobustScaler's median/IQR) do
/// not implement this trait.
///
/// # Example
/// ```ignore
/// let mut fitted = scaler.fit(&first_chunk)?;
/// for chunk in more_chunks {
///     fitted.partial_fit(&chunk)?;
/// }
/// let scaled = fitted.transform(&data)?;
/// ```
pub trait IncrementalFit<B: Backend>: FittedTransformer<B> {
    /// Fold another chunk of samples into the learned statistics.
    ///
    /// A zero-row chunk is a no-op. The chunk must have the same feature
    /// count as the data the transformer was fitted on.
    ///
    /// # Errors
    /// Returns [`PreprocessingError::DimensionMismatch`] on feature-count
    /// disagreement and [`PreprocessingError::NonFiniteInput`] if the chunk
    /// contains NaN or infinite values; the state is left unchanged in both
    /// cases.
    fn partial_fit(&mut self, data: &Self::Input) -> Result<(), PreprocessingError>;
}

/// Marker trait for transformers that don't require fitting.
///
/// Stateless transformers (like Normalizer and Binarizer) can transform data
/// without learning any parameters. They implement both `Transformer` and
/// this trait.
pub trait StatelessTransformer<B: Backend>: Transformer<B> {
    /// Transform data without fitting.
    ///
    /// For stateless transformers, this is equivalent to `fit_transform`
    /// but communicates that no learning occurs.
    fn transform_direct(data: &Self::Input) -> Result<Self::Output, PreprocessingError>;
}
