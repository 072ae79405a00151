use super::Backend;

/// Pure-Rust CPU backend with no external dependencies.
///
/// The default backend. Tensors are plain `Vec<f64>` buffers; 2D tensors carry
/// their shape alongside a row-major buffer. All operations are straightforward
/// loops; correctness and portability over raw speed.
#[derive(Clone, Debug, Copy)]
pub struct CpuBackend;

/// Row-major 2D tensor for [`CpuBackend`]: (data, rows, cols).
#[derive(Debug, Clone)]
pub struct CpuTensor2D(pub Vec<f64>, pub usize, pub usize);

impl CpuTensor2D {
    /// Creates a tensor from a row-major buffer.
    ///
    /// # Panics
    /// Panics if `data.len() != rows * cols`.
    pub fn new(data: Vec<f64>, rows: usize, cols: usize) -> Self {
        assert_eq!(data.len(), rows * cols, "inconsistent shape");
        Self(data, rows, cols)
    }
}

impl From<&[Vec<f64>]> for CpuTensor2D {
    fn from(x: &[Vec<f64>]) -> Self {
        if x.is_empty() {
            return CpuTensor2D::new(Vec::new(), 0, 0);
        }
        let rows = x.len();
        let cols = x[0].len();
        assert!(
            x.iter().all(|row| row.len() == cols),
            "all rows must have the same length"
        );
        let data: Vec<f64> = x.iter().flat_map(|row| row.iter()).copied().collect();
        CpuTensor2D::new(data, rows, cols)
    }
}

impl Backend for CpuBackend {
    type Scalar = f64;
    type Tensor1D = Vec<f64>;
    type Tensor2D = CpuTensor2D;
    type Device = ();

    fn default_device() -> Self::Device {}

    // --- Constructors ---

    fn zeros_1d(len: usize) -> Self::Tensor1D {
        vec![0.0; len]
    }

    fn zeros_2d(rows: usize, cols: usize) -> Self::Tensor2D {
        CpuTensor2D::new(vec![0.0; rows * cols], rows, cols)
    }

    fn from_vec_1d(data: Vec<f64>) -> Self::Tensor1D {
        data
    }

    fn from_vec_2d(data: Vec<f64>, rows: usize, cols: usize) -> Self::Tensor2D {
        CpuTensor2D::new(data, rows, cols)
    }

    // --- Data access ---

    fn to_vec_1d(t: &Self::Tensor1D) -> Vec<f64> {
        t.clone()
    }

    fn len_1d(t: &Self::Tensor1D) -> usize {
        t.len()
    }

    fn shape(t: &Self::Tensor2D) -> (usize, usize) {
        (t.1, t.2)
    }

    fn ravel_2d(t: &Self::Tensor2D) -> Self::Tensor1D {
        t.0.clone()
    }

    // --- Element-wise ops (1D) ---

    fn add_1d(a: &Self::Tensor1D, b: &Self::Tensor1D) -> Self::Tensor1D {
        assert_eq!(a.len(), b.len());
        a.iter().zip(b.iter()).map(|(a, b)| a + b).collect()
    }

    fn sub_1d(a: &Self::Tensor1D, b: &Self::Tensor1D) -> Self::Tensor1D {
        assert_eq!(a.len(), b.len());
        a.iter().zip(b.iter()).map(|(a, b)| a - b).collect()
    }

    fn mul_1d(a: &Self::Tensor1D, b: &Self::Tensor1D) -> Self::Tensor1D {
        assert_eq!(a.len(), b.len());
        a.iter().zip(b.iter()).map(|(a, b)| a * b).collect()
    }

    fn div_1d(a: &Self::Tensor1D, b: &Self::Tensor1D) -> Self::Tensor1D {
        assert_eq!(a.len(), b.len());
        a.iter().zip(b.iter()).map(|(a, b)| a / b).collect()
    }

    fn abs_1d(t: &Self::Tensor1D) -> Self::Tensor1D {
        t.iter().map(|x| x.abs()).collect()
    }

    fn sqrt_1d(t: &Self::Tensor1D) -> Self::Tensor1D {
        t.iter().map(|x| x.sqrt()).collect()
    }

    fn maximum_1d(a: &Self::Tensor1D, b: &Self::Tensor1D) -> Self::Tensor1D {
        assert_eq!(a.len(), b.len());
        a.iter().zip(b.iter()).map(|(&x, &y)| x.max(y)).collect()
    }

    fn minimum_1d(a: &Self::Tensor1D, b: &Self::Tensor1D) -> Self::Tensor1D {
        assert_eq!(a.len(), b.len());
        a.iter().zip(b.iter()).map(|(&x, &y)| x.min(y)).collect()
    }

    // --- Element-wise ops (2D) ---

    fn sub_2d(a: &Self::Tensor2D, b: &Self::Tensor2D) -> Self::Tensor2D {
        assert_eq!((a.1, a.2), (b.1, b.2));
        CpuTensor2D::new(
            a.0.iter().zip(b.0.iter()).map(|(a, b)| a - b).collect(),
            a.1,
            a.2,
        )
    }

    fn mul_scalar_2d(t: &Self::Tensor2D, s: &Self::Scalar) -> Self::Tensor2D {
        CpuTensor2D::new(t.0.iter().map(|x| x * s).collect(), t.1, t.2)
    }

    fn add_scalar_2d(t: &Self::Tensor2D, s: &Self::Scalar) -> Self::Tensor2D {
        CpuTensor2D::new(t.0.iter().map(|x| x + s).collect(), t.1, t.2)
    }

    // --- Reductions ---

    fn col_mean_2d(t: &Self::Tensor2D) -> Self::Tensor1D {
        let CpuTensor2D(data, rows, cols) = t;
        let mut sums = vec![0.0; *cols];
        for row in 0..*rows {
            for col in 0..*cols {
                sums[col] += data[row * cols + col];
            }
        }
        sums.iter().map(|s| s / *rows as f64).collect()
    }

    fn col_min_2d(t: &Self::Tensor2D) -> Self::Tensor1D {
        let CpuTensor2D(data, rows, cols) = t;
        let mut mins = vec![f64::INFINITY; *cols];
        for row in 0..*rows {
            for col in 0..*cols {
                mins[col] = mins[col].min(data[row * cols + col]);
            }
        }
        mins
    }

    fn col_max_2d(t: &Self::Tensor2D) -> Self::Tensor1D {
        let CpuTensor2D(data, rows, cols) = t;
        let mut maxs = vec![f64::NEG_INFINITY; *cols];
        for row in 0..*rows {
            for col in 0..*cols {
                maxs[col] = maxs[col].max(data[row * cols + col]);
            }
        }
        maxs
    }

    fn row_mean_2d(t: &Self::Tensor2D) -> Self::Tensor1D {
        let CpuTensor2D(data, rows, cols) = t;
        (0..*rows)
            .map(|row| data[row * cols..(row + 1) * cols].iter().sum::<f64>() / *cols as f64)
            .collect()
    }

    fn mean_all_2d(t: &Self::Tensor2D) -> Self::Scalar {
        t.0.iter().sum::<f64>() / t.0.len() as f64
    }

    fn is_finite_2d(t: &Self::Tensor2D) -> bool {
        t.0.iter().all(|x| x.is_finite())
    }

    // --- Scalar ops ---

    fn scalar_f64(value: f64) -> Self::Scalar {
        value
    }

    // --- Broadcasting ---

    fn broadcast_sub_1d_to_2d_rows(t: &Self::Tensor2D, v: &Self::Tensor1D) -> Self::Tensor2D {
        broadcast_rows(t, v, |x, y| x - y)
    }

    fn broadcast_add_1d_to_2d_rows(t: &Self::Tensor2D, v: &Self::Tensor1D) -> Self::Tensor2D {
        broadcast_rows(t, v, |x, y| x + y)
    }

    fn broadcast_mul_1d_to_2d_rows(t: &Self::Tensor2D, v: &Self::Tensor1D) -> Self::Tensor2D {
        broadcast_rows(t, v, |x, y| x * y)
    }

    fn broadcast_div_1d_to_2d_rows(t: &Self::Tensor2D, v: &Self::Tensor1D) -> Self::Tensor2D {
        broadcast_rows(t, v, |x, y| x / y)
    }

    fn broadcast_sub_1d_to_2d_cols(t: &Self::Tensor2D, v: &Self::Tensor1D) -> Self::Tensor2D {
        let CpuTensor2D(data, rows, cols) = t;
        assert_eq!(v.len(), *rows);
        let mut out = Vec::with_capacity(data.len());
        for row in 0..*rows {
            for col in 0..*cols {
                out.push(data[row * cols + col] - v[row]);
            }
        }
        CpuTensor2D::new(out, *rows, *cols)
    }
}

fn broadcast_rows(t: &CpuTensor2D, v: &[f64], op: impl Fn(f64, f64) -> f64) -> CpuTensor2D {
    let CpuTensor2D(data, rows, cols) = t;
    assert_eq!(v.len(), *cols);
    let mut out = Vec::with_capacity(data.len());
    for row in 0..*rows {
        for col in 0..*cols {
            out.push(op(data[row * cols + col], v[col]));
        }
    }
    CpuTensor2D::new(out, *rows, *cols)
}
