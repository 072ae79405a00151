//! Chunked fitting agrees with one-shot fitting.
//!
//! These tests partition a reference matrix into row chunks of various sizes,
//! feed the chunks through `partial_fit`, and compare the resulting parameters
//! with a single `fit` over the whole matrix.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use streamscale::backend::{CpuBackend, Tensor2D};
use streamscale::preprocessing::{
    FittedTransformer, IncrementalFit, MaxAbsScaler, MinMaxScaler, RunningMoments, StandardScaler,
    Tracking, Transformer,
};

const N_ROWS: usize = 1000;
const N_COLS: usize = 30;
const REL_TOL: f64 = 1e-6;

/// Random matrix with a distinct offset and spread per column, so columns are
/// not interchangeable and indexing bugs show up.
fn reference_matrix(seed: u64) -> Vec<Vec<f64>> {
    let mut rng = StdRng::seed_from_u64(seed);
    let offsets: Vec<f64> = (0..N_COLS).map(|j| (j as f64 - 10.0) * 7.5).collect();
    let spreads: Vec<f64> = (0..N_COLS).map(|j| 0.5 + j as f64 * 0.25).collect();

    (0..N_ROWS)
        .map(|_| {
            (0..N_COLS)
                .map(|j| offsets[j] + spreads[j] * (rng.gen::<f64>() - 0.5))
                .collect()
        })
        .collect()
}

fn chunks_of(rows: &[Vec<f64>], size: usize) -> Vec<Tensor2D<CpuBackend>> {
    rows.chunks(size.max(1)).map(Tensor2D::from_rows).collect()
}

fn assert_close(a: f64, b: f64, what: &str) {
    let scale = a.abs().max(b.abs()).max(1.0);
    assert!(
        (a - b).abs() <= REL_TOL * scale,
        "{}: {} vs {} (rel err {})",
        what,
        a,
        b,
        (a - b).abs() / scale
    );
}

fn assert_all_close(a: &[f64], b: &[f64], what: &str) {
    assert_eq!(a.len(), b.len(), "{}: length mismatch", what);
    for (i, (x, y)) in a.iter().zip(b.iter()).enumerate() {
        assert_close(*x, *y, &format!("{}[{}]", what, i));
    }
}

// Chunk sizes: single row, tiny, moderate, the whole matrix, and oversized
// (the final chunk is shorter than the rest; oversized means one chunk).
fn chunk_sizes() -> [usize; 5] {
    [1, 2, 50, N_ROWS, N_ROWS + 42]
}

#[test]
fn standard_scaler_chunked_matches_batch() {
    let rows = reference_matrix(7);
    let full = Tensor2D::<CpuBackend>::from_rows(&rows);
    let batch = StandardScaler::<CpuBackend>::new().fit(&full).unwrap();

    for size in chunk_sizes() {
        let mut chunks = chunks_of(&rows, size).into_iter();
        let mut fitted = StandardScaler::<CpuBackend>::new()
            .partial_fit(&chunks.next().unwrap())
            .unwrap();
        for chunk in chunks {
            fitted.partial_fit(&chunk).unwrap();
        }

        assert_eq!(fitted.n_samples_seen(), N_ROWS as u64, "size {}", size);
        assert_all_close(
            &fitted.mean().to_vec(),
            &batch.mean().to_vec(),
            &format!("mean (chunk size {})", size),
        );
        assert_all_close(
            &fitted.var().unwrap(),
            &batch.var().unwrap(),
            &format!("var (chunk size {})", size),
        );
        assert_all_close(
            &fitted.scale().to_vec(),
            &batch.scale().to_vec(),
            &format!("scale (chunk size {})", size),
        );
    }
}

#[test]
fn minmax_scaler_chunked_matches_batch() {
    let rows = reference_matrix(11);
    let full = Tensor2D::<CpuBackend>::from_rows(&rows);
    let batch = MinMaxScaler::<CpuBackend>::new().fit(&full).unwrap();

    for size in chunk_sizes() {
        let mut chunks = chunks_of(&rows, size).into_iter();
        let mut fitted = MinMaxScaler::<CpuBackend>::new()
            .partial_fit(&chunks.next().unwrap())
            .unwrap();
        for chunk in chunks {
            fitted.partial_fit(&chunk).unwrap();
        }

        // Min and max are exact under chunking, not just close
        assert_eq!(fitted.data_min().to_vec(), batch.data_min().to_vec());
        assert_eq!(fitted.data_max().to_vec(), batch.data_max().to_vec());
        assert_eq!(fitted.n_samples_seen(), N_ROWS as u64);
    }
}

#[test]
fn maxabs_scaler_chunked_matches_batch() {
    let rows = reference_matrix(13);
    let full = Tensor2D::<CpuBackend>::from_rows(&rows);
    let batch = MaxAbsScaler::<CpuBackend>::new().fit(&full).unwrap();

    for size in chunk_sizes() {
        let mut chunks = chunks_of(&rows, size).into_iter();
        let mut fitted = MaxAbsScaler::<CpuBackend>::new()
            .partial_fit(&chunks.next().unwrap())
            .unwrap();
        for chunk in chunks {
            fitted.partial_fit(&chunk).unwrap();
        }

        assert_eq!(fitted.max_abs(), batch.max_abs());
        assert_eq!(fitted.scale().to_vec(), batch.scale().to_vec());
    }
}

#[test]
fn transform_after_chunked_fit_matches_batch_fit() {
    let rows = reference_matrix(17);
    let full = Tensor2D::<CpuBackend>::from_rows(&rows);

    let batch = StandardScaler::<CpuBackend>::new().fit(&full).unwrap();
    let mut chunks = chunks_of(&rows, 128).into_iter();
    let mut incr = StandardScaler::<CpuBackend>::new()
        .partial_fit(&chunks.next().unwrap())
        .unwrap();
    for chunk in chunks {
        incr.partial_fit(&chunk).unwrap();
    }

    let a = batch.transform(&full).unwrap().ravel().to_vec();
    let b = incr.transform(&full).unwrap().ravel().to_vec();
    assert_all_close(&a, &b, "transformed output");
}

#[test]
fn variance_is_stable_under_huge_offsets() {
    // Columns offset by ~1e15 and spread by ~1e6, merged one row at a time.
    // A naive sum-of-squares accumulator loses all precision here; the
    // parallel combination formula keeps the relative error within tolerance.
    let mut rng = StdRng::seed_from_u64(23);
    let rows: Vec<Vec<f64>> = (0..500)
        .map(|_| {
            (0..4)
                .map(|j| 1e15 * (j + 1) as f64 + 1e6 * (rng.gen::<f64>() - 0.5))
                .collect()
        })
        .collect();

    let full = Tensor2D::<CpuBackend>::from_rows(&rows);
    let batch = StandardScaler::<CpuBackend>::new().fit(&full).unwrap();

    let mut per_row = chunks_of(&rows, 1).into_iter();
    let mut incr = StandardScaler::<CpuBackend>::new()
        .partial_fit(&per_row.next().unwrap())
        .unwrap();
    for chunk in per_row {
        incr.partial_fit(&chunk).unwrap();
    }

    assert_all_close(&incr.mean().to_vec(), &batch.mean().to_vec(), "mean");
    assert_all_close(&incr.var().unwrap(), &batch.var().unwrap(), "var");

    // Variance must reflect the 1e6 spread, not collapse to zero or blow up
    for v in incr.var().unwrap() {
        assert!(v > 0.0 && v.is_finite(), "var = {}", v);
    }
}

#[test]
fn zero_variance_feature_transforms_finite() {
    // Column 0 constant across all chunks
    let rows: Vec<Vec<f64>> = (0..100)
        .map(|i| vec![42.0, i as f64])
        .collect();

    let mut chunks = chunks_of(&rows, 7).into_iter();
    let mut fitted = StandardScaler::<CpuBackend>::new()
        .partial_fit(&chunks.next().unwrap())
        .unwrap();
    for chunk in chunks {
        fitted.partial_fit(&chunk).unwrap();
    }

    assert_eq!(fitted.var().unwrap()[0], 0.0);
    assert_eq!(fitted.scale().to_vec()[0], 1.0);

    let full = Tensor2D::<CpuBackend>::from_rows(&rows);
    let transformed = fitted.transform(&full).unwrap();
    assert!(transformed.is_finite());
    // Constant column maps to exactly zero everywhere
    let flat = transformed.ravel().to_vec();
    for i in 0..rows.len() {
        assert_eq!(flat[i * 2], 0.0);
    }
}

#[test]
fn empty_chunk_does_not_change_parameters() {
    let rows = reference_matrix(29);
    let full = Tensor2D::<CpuBackend>::from_rows(&rows);
    let mut fitted = StandardScaler::<CpuBackend>::new().fit(&full).unwrap();

    let before_mean = fitted.mean().to_vec();
    let before_var = fitted.var().unwrap();

    fitted
        .partial_fit(&Tensor2D::<CpuBackend>::zeros(0, N_COLS))
        .unwrap();

    assert_eq!(fitted.mean().to_vec(), before_mean);
    assert_eq!(fitted.var().unwrap(), before_var);
    assert_eq!(fitted.n_samples_seen(), N_ROWS as u64);
}

#[test]
fn tracker_two_chunk_reference_values() {
    // [[0], [1]] then [[2], [3]]: mean 1.5, population variance 1.25, n 4
    let mut moments = RunningMoments::new(Tracking::default().with_mean_var(true));
    moments
        .merge(&Tensor2D::<CpuBackend>::new(vec![0.0, 1.0], 2, 1))
        .unwrap();
    moments
        .merge(&Tensor2D::<CpuBackend>::new(vec![2.0, 3.0], 2, 1))
        .unwrap();

    assert_eq!(moments.n_samples_seen(), 4);
    assert_close(moments.mean().unwrap()[0], 1.5, "mean");
    assert_close(moments.var().unwrap()[0], 1.25, "var");
}

#[test]
fn tracker_chunk_sweep_matches_single_merge() {
    let rows = reference_matrix(31);

    let mut whole = RunningMoments::new(
        Tracking::default()
            .with_mean_var(true)
            .with_min_max(true)
            .with_max_abs(true),
    );
    whole.merge(&rows).unwrap();

    for size in chunk_sizes() {
        let mut chunked = RunningMoments::new(whole.tracking());
        for chunk in rows.chunks(size) {
            chunked.merge(&chunk.to_vec()).unwrap();
        }

        assert_eq!(chunked.n_samples_seen(), whole.n_samples_seen());
        assert_all_close(chunked.mean().unwrap(), whole.mean().unwrap(), "mean");
        assert_all_close(chunked.var().unwrap(), whole.var().unwrap(), "var");
        assert_eq!(chunked.min().unwrap(), whole.min().unwrap());
        assert_eq!(chunked.max().unwrap(), whole.max().unwrap());
        assert_eq!(chunked.max_abs().unwrap(), whole.max_abs().unwrap());
    }
}
