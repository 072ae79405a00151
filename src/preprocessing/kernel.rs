//! Kernel matrix centering.
//!
//! Centers a kernel (Gram) matrix K of inner products in feature space, so
//! that the implicit feature mapping has zero mean. For a kernel matrix K'
//! between new samples and the training samples:
//! ```text
//! K'_centered[i, j] = K'[i, j] - row_mean(K')[i] - fit_col_mean[j] + fit_all_mean
//! ```
//! where `fit_col_mean` and `fit_all_mean` come from the training kernel
//! matrix seen during `fit`.

use crate::backend::{Backend, ScalarOps, Tensor1D, Tensor2D};
use crate::preprocessing::error::PreprocessingError;
use crate::preprocessing::traits::{FittedTransformer, Transformer};
use crate::preprocessing::validate;
use serde::{Deserialize, Serialize};
use std::marker::PhantomData;

/// Serializable parameters for a fitted KernelCenterer.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct KernelCentererParams {
    /// Column means of the training kernel matrix.
    pub fit_col_mean: Vec<f64>,
    /// Mean of all elements of the training kernel matrix.
    pub fit_all_mean: f64,
}

/// KernelCenterer transformer (unfitted).
///
/// Has no hyperparameters.
#[derive(Clone)]
pub struct KernelCenterer<B: Backend> {
    _backend: PhantomData<B>,
}

impl<B: Backend> Default for KernelCenterer<B> {
    fn default() -> Self {
        Self::new()
    }
}

impl<B: Backend> KernelCenterer<B> {
    /// Create a new KernelCenterer.
    pub fn new() -> Self {
        Self {
            _backend: PhantomData,
        }
    }
}

impl<B: Backend> Transformer<B> for KernelCenterer<B> {
    type Input = Tensor2D<B>;
    type Output = Tensor2D<B>;
    type Params = KernelCentererParams;
    type Fitted = FittedKernelCenterer<B>;

    fn fit(&self, data: &Self::Input) -> Result<Self::Fitted, PreprocessingError> {
        validate::check_non_empty(data, "KernelCenterer::fit")?;
        validate::check_finite(data, "KernelCenterer::fit")?;

        let (rows, cols) = data.shape();
        if rows != cols {
            return Err(PreprocessingError::InvalidParameter(format!(
                "KernelCenterer::fit requires a square kernel matrix, got {}x{}",
                rows, cols
            )));
        }

        Ok(FittedKernelCenterer {
            fit_col_mean: data.col_mean(),
            fit_all_mean: B::mean_all_2d(&data.data).to_f64(),
            n_features: cols,
            _backend: PhantomData,
        })
    }

    fn fit_transform(&self, data: &Self::Input) -> Result<Self::Output, PreprocessingError> {
        let fitted = self.fit(data)?;
        fitted.transform(data)
    }
}

/// Fitted KernelCenterer ready for inference.
#[derive(Clone)]
pub struct FittedKernelCenterer<B: Backend> {
    fit_col_mean: Tensor1D<B>,
    fit_all_mean: f64,
    n_features: usize,
    _backend: PhantomData<B>,
}

impl<B: Backend> FittedKernelCenterer<B> {
    /// Column means of the training kernel matrix.
    pub fn fit_col_mean(&self) -> &Tensor1D<B> {
        &self.fit_col_mean
    }

    /// Mean of all elements of the training kernel matrix.
    pub fn fit_all_mean(&self) -> f64 {
        self.fit_all_mean
    }
}

impl<B: Backend> FittedTransformer<B> for FittedKernelCenterer<B> {
    type Input = Tensor2D<B>;
    type Output = Tensor2D<B>;
    type Params = KernelCentererParams;

    fn transform(&self, data: &Self::Input) -> Result<Self::Output, PreprocessingError> {
        let (_, cols) = data.shape();

        if cols != self.n_features {
            return Err(PreprocessingError::DimensionMismatch {
                expected: self.n_features,
                got: cols,
            });
        }

        let row_means = B::row_mean_2d(&data.data);
        let centered = B::broadcast_sub_1d_to_2d_cols(&data.data, &row_means);
        let centered = B::broadcast_sub_1d_to_2d_rows(&centered, &self.fit_col_mean.data);
        let centered = B::add_scalar_2d(&centered, &B::scalar_f64(self.fit_all_mean));

        Ok(Tensor2D {
            data: centered,
            backend: PhantomData,
        })
    }

    fn inverse_transform(&self, _data: &Self::Output) -> Result<Self::Input, PreprocessingError> {
        Err(PreprocessingError::NotInvertible(
            "KernelCenterer cannot reconstruct the uncentered kernel".to_string(),
        ))
    }

    fn extract_params(&self) -> Self::Params {
        KernelCentererParams {
            fit_col_mean: self.fit_col_mean.to_vec(),
            fit_all_mean: self.fit_all_mean,
        }
    }

    fn from_params(params: Self::Params) -> Result<Self, PreprocessingError> {
        let n_features = params.fit_col_mean.len();
        Ok(Self {
            fit_col_mean: Tensor1D::new(params.fit_col_mean),
            fit_all_mean: params.fit_all_mean,
            n_features,
            _backend: PhantomData,
        })
    }

    fn n_features_in(&self) -> usize {
        self.n_features
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::CpuBackend;

    /// Linear kernel K = X X^T of a small matrix X.
    fn linear_kernel(rows: &[Vec<f64>]) -> Tensor2D<CpuBackend> {
        let n = rows.len();
        let mut data = Vec::with_capacity(n * n);
        for a in rows {
            for b in rows {
                data.push(a.iter().zip(b.iter()).map(|(x, y)| x * y).sum());
            }
        }
        Tensor2D::new(data, n, n)
    }

    #[test]
    fn test_kernel_centerer_zero_means() {
        let x = vec![vec![1.0, 2.0], vec![3.0, -1.0], vec![0.5, 0.5]];
        let k = linear_kernel(&x);

        let fitted = KernelCenterer::<CpuBackend>::new().fit(&k).unwrap();
        let centered = fitted.transform(&k).unwrap();

        // A centered training kernel has zero row and column means
        let col_means = centered.col_mean().to_vec();
        for m in col_means {
            assert!(m.abs() < 1e-10, "column mean {}", m);
        }

        let (n, _) = centered.shape();
        let flat = centered.ravel().to_vec();
        for i in 0..n {
            let row_mean: f64 = flat[i * n..(i + 1) * n].iter().sum::<f64>() / n as f64;
            assert!(row_mean.abs() < 1e-10, "row mean {}", row_mean);
        }
    }

    #[test]
    fn test_kernel_centerer_matches_explicit_centering() {
        // Centering K = X X^T must equal the kernel of mean-centered X
        let x = vec![vec![2.0, 0.0], vec![0.0, 2.0], vec![1.0, 1.0], vec![3.0, 3.0]];
        let k = linear_kernel(&x);

        let fitted = KernelCenterer::<CpuBackend>::new().fit(&k).unwrap();
        let centered = fitted.transform(&k).unwrap();

        let mean: Vec<f64> = (0..2)
            .map(|j| x.iter().map(|r| r[j]).sum::<f64>() / x.len() as f64)
            .collect();
        let x_centered: Vec<Vec<f64>> = x
            .iter()
            .map(|r| r.iter().zip(mean.iter()).map(|(v, m)| v - m).collect())
            .collect();
        let expected = linear_kernel(&x_centered);

        for (a, b) in centered
            .ravel()
            .to_vec()
            .iter()
            .zip(expected.ravel().to_vec().iter())
        {
            assert!((a - b).abs() < 1e-10, "{} vs {}", a, b);
        }
    }

    #[test]
    fn test_kernel_centerer_rejects_non_square() {
        let k = Tensor2D::<CpuBackend>::new(vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0], 2, 3);
        assert!(matches!(
            KernelCenterer::<CpuBackend>::new().fit(&k),
            Err(PreprocessingError::InvalidParameter(_))
        ));
    }

    #[test]
    fn test_kernel_centerer_transform_rectangular_test_kernel() {
        // K' between 2 new samples and the 3 training samples is 2x3
        let x_train = vec![vec![1.0, 0.0], vec![0.0, 1.0], vec![1.0, 1.0]];
        let x_test = vec![vec![2.0, 1.0], vec![-1.0, 0.5]];

        let k_train = linear_kernel(&x_train);
        let fitted = KernelCenterer::<CpuBackend>::new().fit(&k_train).unwrap();

        let mut k_test_data = Vec::new();
        for a in &x_test {
            for b in &x_train {
                k_test_data.push(a.iter().zip(b.iter()).map(|(x, y)| x * y).sum());
            }
        }
        let k_test = Tensor2D::<CpuBackend>::new(k_test_data, 2, 3);

        let centered = fitted.transform(&k_test).unwrap();
        assert_eq!(centered.shape(), (2, 3));

        // Compare against explicitly centered features
        let mean: Vec<f64> = (0..2)
            .map(|j| x_train.iter().map(|r| r[j]).sum::<f64>() / x_train.len() as f64)
            .collect();
        let center = |r: &Vec<f64>| -> Vec<f64> {
            r.iter().zip(mean.iter()).map(|(v, m)| v - m).collect()
        };

        let flat = centered.ravel().to_vec();
        for (i, a) in x_test.iter().enumerate() {
            let ac = center(a);
            for (j, b) in x_train.iter().enumerate() {
                let bc = center(b);
                let expected: f64 = ac.iter().zip(bc.iter()).map(|(x, y)| x * y).sum();
                assert!((flat[i * 3 + j] - expected).abs() < 1e-10);
            }
        }
    }

    #[test]
    fn test_kernel_centerer_not_invertible() {
        let k = linear_kernel(&[vec![1.0], vec![2.0]]);
        let fitted = KernelCenterer::<CpuBackend>::new().fit(&k).unwrap();
        let centered = fitted.transform(&k).unwrap();
        assert!(matches!(
            fitted.inverse_transform(&centered),
            Err(PreprocessingError::NotInvertible(_))
        ));
    }

    #[test]
    fn test_kernel_centerer_serialization_round_trip() {
        let k = linear_kernel(&[vec![1.0, 2.0], vec![3.0, 4.0], vec![5.0, 6.0]]);
        let fitted = KernelCenterer::<CpuBackend>::new().fit(&k).unwrap();

        let restored =
            FittedKernelCenterer::<CpuBackend>::from_params(fitted.extract_params()).unwrap();

        let t1 = fitted.transform(&k).unwrap().ravel().to_vec();
        let t2 = restored.transform(&k).unwrap().ravel().to_vec();
        assert_eq!(t1, t2);
    }
}
