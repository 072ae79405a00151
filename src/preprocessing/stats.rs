//! Incremental (streaming) feature statistics.
//!
//! [`RunningMoments`] maintains per-feature count, mean, population variance,
//! min, max and max-abs over successive row chunks of a feature matrix, and
//! produces the same values (to floating-point rounding) as a single pass over
//! all rows combined, regardless of how the rows are split into chunks and in
//! which order the chunks arrive.
//!
//! Mean and variance are combined across chunks with Chan's parallel update
//! formula on (count, mean, sum-of-squared-deviations) triples. Naive
//! re-averaging of variances loses precision and is not equivalent; the
//! combination formula is what makes per-row updates agree with the batch
//! computation even for features with huge offsets.
//!
//! Both the one-shot `fit` and the streaming `partial_fit` paths of the
//! scalers drive this tracker, so the two are equal by construction rather
//! than by parallel implementations.
//!
//! # Example
//! ```
//! use streamscale::preprocessing::stats::{RunningMoments, Tracking};
//!
//! let mut moments = RunningMoments::new(Tracking::default().with_mean_var(true));
//! moments.merge(&vec![vec![0.0], vec![1.0]]).unwrap();
//! moments.merge(&vec![vec![2.0], vec![3.0]]).unwrap();
//!
//! assert_eq!(moments.n_samples_seen(), 4);
//! assert_eq!(moments.mean().unwrap(), &[1.5]);
//! assert_eq!(moments.var().unwrap(), &[1.25]);
//! ```

use crate::backend::{Backend, Tensor2D};
use crate::preprocessing::error::PreprocessingError;
use serde::{Deserialize, Serialize};

/// Capability interface for chunk inputs: shape plus columnar read access.
///
/// The tracker never touches a concrete array type; anything that can report
/// its (rows, cols) shape and hand out one feature column as host values can
/// be merged. Adapters exist for the backend tensor type ([`Tensor2D`]) and
/// for plain nested `Vec` row data.
///
/// A device-resident implementation would perform the column read on device
/// and only materialize the per-column reduction inputs.
pub trait ColumnarChunk {
    /// Returns the chunk shape as (rows, cols).
    fn shape(&self) -> (usize, usize);

    /// Reads feature column `index` as host values, in row order.
    ///
    /// # Panics
    /// Panics if `index >= cols`.
    fn column(&self, index: usize) -> Vec<f64>;

    /// Reads all feature columns at once, in column order.
    ///
    /// Implementors whose `column` pays a per-call materialization cost
    /// (e.g. a device transfer or a full ravel) should override this to
    /// materialize once per chunk rather than once per column.
    fn columns(&self) -> Vec<Vec<f64>> {
        let (_, cols) = self.shape();
        (0..cols).map(|j| self.column(j)).collect()
    }
}

impl<B: Backend> ColumnarChunk for Tensor2D<B> {
    fn shape(&self) -> (usize, usize) {
        Tensor2D::shape(self)
    }

    fn column(&self, index: usize) -> Vec<f64> {
        let (rows, cols) = Tensor2D::shape(self);
        assert!(index < cols, "column index out of bounds");
        let flat = self.ravel().to_vec();
        (0..rows).map(|row| flat[row * cols + index]).collect()
    }

    // One ravel for the whole chunk instead of one per column.
    fn columns(&self) -> Vec<Vec<f64>> {
        let (rows, cols) = Tensor2D::shape(self);
        let flat = self.ravel().to_vec();
        let mut out: Vec<Vec<f64>> = (0..cols).map(|_| Vec::with_capacity(rows)).collect();
        for (i, x) in flat.into_iter().enumerate() {
            out[i % cols].push(x);
        }
        out
    }
}

impl ColumnarChunk for Vec<Vec<f64>> {
    fn shape(&self) -> (usize, usize) {
        (self.len(), self.first().map_or(0, Vec::len))
    }

    fn column(&self, index: usize) -> Vec<f64> {
        self.iter().map(|row| row[index]).collect()
    }
}

/// Selects which statistic families a [`RunningMoments`] accumulates.
///
/// Chosen at construction; a scaler only pays for the statistics it derives
/// its scale factors from. Untracked families stay absent no matter how many
/// chunks are merged.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tracking {
    /// Track running mean and population variance.
    pub mean_var: bool,
    /// Track running per-feature minimum and maximum.
    pub min_max: bool,
    /// Track running per-feature maximum absolute value.
    pub max_abs: bool,
}

impl Tracking {
    /// Enable or disable mean/variance tracking.
    pub fn with_mean_var(mut self, on: bool) -> Self {
        self.mean_var = on;
        self
    }

    /// Enable or disable min/max tracking.
    pub fn with_min_max(mut self, on: bool) -> Self {
        self.min_max = on;
        self
    }

    /// Enable or disable max-abs tracking.
    pub fn with_max_abs(mut self, on: bool) -> Self {
        self.max_abs = on;
        self
    }
}

/// Running per-feature statistics over a stream of row chunks.
///
/// State is a plain value type: a sample count plus one vector per tracked
/// statistic family. It is mutated exclusively through [`merge`](Self::merge)
/// (all-or-nothing) and [`reset`](Self::reset), and carries no history of past
/// chunks.
///
/// # Contract
///
/// For any partition of a reference matrix's rows into chunks, merging the
/// chunks in any order yields the same `mean`/`var`/`min`/`max`/`max_abs` and
/// `n_samples_seen` as one merge of the whole matrix, up to floating-point
/// rounding. Variance is the population variance (divisor `n`, not `n - 1`).
///
/// Inputs are assumed finite; callers validate chunks (see
/// [`validate::check_finite`](crate::preprocessing::validate::check_finite))
/// before merging. A constant feature is reported with `var == 0`; the
/// substitution of `1` for a zero-derived scale is the consuming scaler's
/// policy, not the tracker's.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RunningMoments {
    tracking: Tracking,
    n_features: Option<usize>,
    n_samples_seen: u64,
    mean: Vec<f64>,
    var: Vec<f64>,
    min: Vec<f64>,
    max: Vec<f64>,
    max_abs: Vec<f64>,
}

impl RunningMoments {
    /// Creates an empty accumulator ("no samples seen") with the given
    /// tracking configuration.
    pub fn new(tracking: Tracking) -> Self {
        Self {
            tracking,
            n_features: None,
            n_samples_seen: 0,
            mean: Vec::new(),
            var: Vec::new(),
            min: Vec::new(),
            max: Vec::new(),
            max_abs: Vec::new(),
        }
    }

    /// Clears all state back to "no samples seen", keeping the tracking
    /// configuration.
    pub fn reset(&mut self) {
        *self = Self::new(self.tracking);
    }

    /// The tracking configuration this accumulator was created with.
    pub fn tracking(&self) -> Tracking {
        self.tracking
    }

    /// Number of samples incorporated so far.
    pub fn n_samples_seen(&self) -> u64 {
        self.n_samples_seen
    }

    /// Feature count locked in by the first non-degenerate merge, if any.
    pub fn n_features(&self) -> Option<usize> {
        self.n_features
    }

    /// `true` before any samples have been merged.
    pub fn is_empty(&self) -> bool {
        self.n_samples_seen == 0
    }

    /// Running per-feature mean, if tracked and any samples were seen.
    pub fn mean(&self) -> Option<&[f64]> {
        self.tracked(self.tracking.mean_var, &self.mean)
    }

    /// Running per-feature population variance, if tracked and any samples
    /// were seen.
    pub fn var(&self) -> Option<&[f64]> {
        self.tracked(self.tracking.mean_var, &self.var)
    }

    /// Running per-feature minimum, if tracked and any samples were seen.
    pub fn min(&self) -> Option<&[f64]> {
        self.tracked(self.tracking.min_max, &self.min)
    }

    /// Running per-feature maximum, if tracked and any samples were seen.
    pub fn max(&self) -> Option<&[f64]> {
        self.tracked(self.tracking.min_max, &self.max)
    }

    /// Running per-feature maximum absolute value, if tracked and any samples
    /// were seen.
    pub fn max_abs(&self) -> Option<&[f64]> {
        self.tracked(self.tracking.max_abs, &self.max_abs)
    }

    fn tracked<'a>(&self, on: bool, values: &'a [f64]) -> Option<&'a [f64]> {
        (on && !self.is_empty()).then_some(values)
    }

    /// Folds a chunk of rows into the running statistics.
    ///
    /// A zero-row chunk leaves all state unchanged. A chunk whose feature
    /// count disagrees with previously merged chunks fails with
    /// [`PreprocessingError::DimensionMismatch`] and leaves the state
    /// untouched; the merge is all-or-nothing.
    ///
    /// Mean and variance are combined via the parallel formula: with
    /// `delta = mean1 - mean0`,
    ///
    /// ```text
    /// mean = (n0 * mean0 + n1 * mean1) / n
    /// ssd  = ssd0 + ssd1 + delta^2 * n0 * n1 / n
    /// var  = ssd / n
    /// ```
    ///
    /// where `ssd0` is recovered from the stored variance as `var0 * n0` and
    /// a single-row chunk contributes `ssd1 = 0`.
    pub fn merge<C: ColumnarChunk>(&mut self, chunk: &C) -> Result<(), PreprocessingError> {
        let (rows, cols) = chunk.shape();

        // A zero-row chunk carries no meaningful feature count (nested-Vec
        // chunks report (0, 0)), so it is skipped before the dimension check.
        if rows == 0 {
            return Ok(());
        }

        if let Some(expected) = self.n_features {
            if cols != expected {
                return Err(PreprocessingError::DimensionMismatch {
                    expected,
                    got: cols,
                });
            }
        }

        let n0 = self.n_samples_seen as f64;
        let n1 = rows as f64;
        let n = n0 + n1;
        let first = self.n_samples_seen == 0;
        let track = self.tracking;

        let mut mean_new = Vec::with_capacity(if track.mean_var { cols } else { 0 });
        let mut var_new = Vec::with_capacity(if track.mean_var { cols } else { 0 });
        let mut min_new = Vec::with_capacity(if track.min_max { cols } else { 0 });
        let mut max_new = Vec::with_capacity(if track.min_max { cols } else { 0 });
        let mut max_abs_new = Vec::with_capacity(if track.max_abs { cols } else { 0 });

        if track.mean_var || track.min_max || track.max_abs {
            for (j, col) in chunk.columns().into_iter().enumerate() {
                if track.mean_var {
                    let mean1 = col.iter().sum::<f64>() / n1;
                    // Two-pass sum of squared deviations about the chunk's own
                    // mean; exactly zero for a single-row chunk.
                    let ssd1 = if rows > 1 {
                        col.iter()
                            .map(|x| {
                                let d = x - mean1;
                                d * d
                            })
                            .sum::<f64>()
                    } else {
                        0.0
                    };

                    if first {
                        mean_new.push(mean1);
                        var_new.push(ssd1 / n1);
                    } else {
                        let mean0 = self.mean[j];
                        let ssd0 = self.var[j] * n0;
                        let delta = mean1 - mean0;
                        mean_new.push((n0 * mean0 + n1 * mean1) / n);
                        var_new.push((ssd0 + ssd1 + delta * delta * n0 * n1 / n) / n);
                    }
                }

                if track.min_max {
                    let cmin = col.iter().copied().fold(f64::INFINITY, f64::min);
                    let cmax = col.iter().copied().fold(f64::NEG_INFINITY, f64::max);
                    if first {
                        min_new.push(cmin);
                        max_new.push(cmax);
                    } else {
                        min_new.push(self.min[j].min(cmin));
                        max_new.push(self.max[j].max(cmax));
                    }
                }

                if track.max_abs {
                    let cabs = col.iter().map(|x| x.abs()).fold(0.0_f64, f64::max);
                    if first {
                        max_abs_new.push(cabs);
                    } else {
                        max_abs_new.push(self.max_abs[j].max(cabs));
                    }
                }
            }
        }

        if track.mean_var {
            self.mean = mean_new;
            self.var = var_new;
        }
        if track.min_max {
            self.min = min_new;
            self.max = max_new;
        }
        if track.max_abs {
            self.max_abs = max_abs_new;
        }
        self.n_features = Some(cols);
        self.n_samples_seen += rows as u64;

        Ok(())
    }
}
