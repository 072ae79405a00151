//! Boundary validation of input matrices.
//!
//! The statistics tracker assumes finite input; estimators reject NaN and
//! infinite values here, before any accumulator state is touched.

use crate::backend::{Backend, Tensor2D};
use crate::preprocessing::error::PreprocessingError;

/// Rejects input containing NaN or infinite values.
///
/// `what` names the operation for the error message (e.g. `"StandardScaler::fit"`).
pub fn check_finite<B: Backend>(
    data: &Tensor2D<B>,
    what: &str,
) -> Result<(), PreprocessingError> {
    if data.is_finite() {
        Ok(())
    } else {
        Err(PreprocessingError::NonFiniteInput(format!(
            "{} received NaN or infinite values",
            what
        )))
    }
}

/// Rejects input with zero rows.
pub fn check_non_empty<B: Backend>(
    data: &Tensor2D<B>,
    what: &str,
) -> Result<(), PreprocessingError> {
    let (rows, _) = data.shape();
    if rows == 0 {
        Err(PreprocessingError::EmptyData(format!(
            "{} requires at least one sample",
            what
        )))
    } else {
        Ok(())
    }
}
