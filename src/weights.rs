//! The normalization pipeline that turns a raw weight matrix into edge weights.
//!
//! Each step is a pure function so it can be checked on its own:
//! [`truncate`] drops small entries, [`zero_diagonal`] removes self
//! transitions and [`normalize`] rescales so the heaviest edge is [`MAX_WEIGHT`].

use crate::error::GraphError;
use log::debug;
use ndarray::{Array2, ArrayView2};

/// Weight assigned to the heaviest edge after normalization.
pub const MAX_WEIGHT: f64 = 100.0;

/// Entries below this value are treated as absent unless told otherwise.
pub const DEFAULT_CUTOFF: f64 = 1e-10;

/// A square weight matrix with a zero diagonal whose largest entry is [`MAX_WEIGHT`].
#[derive(Debug, Clone, PartialEq)]
pub struct TruncatedWeights(Array2<f64>);

impl TruncatedWeights {
    /// Runs the full pipeline on a copy of `weights`.
    pub fn from_weights(
        weights: ArrayView2<'_, f64>,
        cutoff: Option<f64>,
    ) -> Result<Self, GraphError> {
        check_square(weights)?;
        check_finite(weights)?;

        let mut trunc = weights.to_owned();
        if let Some(cutoff) = cutoff {
            truncate(&mut trunc, cutoff);
        }
        zero_diagonal(&mut trunc);
        normalize(&mut trunc)?;

        Ok(Self(trunc))
    }

    /// Number of nodes, i.e. the side length of the matrix.
    pub fn len(&self) -> usize {
        self.0.nrows()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn view(&self) -> ArrayView2<'_, f64> {
        self.0.view()
    }

    /// Number of nonzero entries.
    pub fn nnz(&self) -> usize {
        self.0.iter().filter(|w| **w != 0.0).count()
    }

    pub fn into_inner(self) -> Array2<f64> {
        self.0
    }
}

/// Zeroes every entry strictly below `cutoff`. Returns how many entries were dropped.
pub fn truncate(weights: &mut Array2<f64>, cutoff: f64) -> usize {
    let mut dropped = 0;
    for w in weights.iter_mut() {
        if *w < cutoff {
            if *w != 0.0 {
                dropped += 1;
            }
            *w = 0.0;
        }
    }
    debug!("Truncated {dropped} entries below {cutoff:e}");
    dropped
}

/// Zeroes the main diagonal.
pub fn zero_diagonal(weights: &mut Array2<f64>) {
    weights.diag_mut().fill(0.0);
}

/// Rescales in place so the largest entry becomes [`MAX_WEIGHT`].
///
/// Fails when the largest entry is not positive, since there is nothing to
/// scale against.
pub fn normalize(weights: &mut Array2<f64>) -> Result<(), GraphError> {
    let max = weights.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    if max <= 0.0 {
        return Err(GraphError::NoPositiveWeight);
    }

    // Multiply before dividing: `MAX_WEIGHT / max` overflows for subnormal maxima.
    weights.mapv_inplace(|w| MAX_WEIGHT * w / max);
    debug!("Normalized weights against max {max:e}");
    Ok(())
}

fn check_square(weights: ArrayView2<'_, f64>) -> Result<(), GraphError> {
    let (rows, cols) = weights.dim();
    if rows != cols {
        return Err(GraphError::NotSquare { rows, cols });
    }
    Ok(())
}

fn check_finite(weights: ArrayView2<'_, f64>) -> Result<(), GraphError> {
    match weights.indexed_iter().find(|(_, w)| !w.is_finite()) {
        Some(((row, col), _)) => Err(GraphError::NonFinite { row, col }),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn truncate_zeroes_small_and_negative_entries() {
        let mut w = array![[0.5, 1e-12], [-3.0, 2.0]];
        let dropped = truncate(&mut w, 1e-10);
        assert_eq!(dropped, 2);
        assert_eq!(w, array![[0.5, 0.0], [0.0, 2.0]]);
    }

    #[test]
    fn truncate_keeps_entries_equal_to_cutoff() {
        let mut w = array![[0.0, 0.25], [0.1, 0.0]];
        truncate(&mut w, 0.25);
        assert_eq!(w, array![[0.0, 0.25], [0.0, 0.0]]);
    }

    #[test]
    fn zero_diagonal_leaves_off_diagonal_alone() {
        let mut w = array![[1.0, 2.0, 3.0], [4.0, 5.0, 6.0], [7.0, 8.0, 9.0]];
        zero_diagonal(&mut w);
        assert_eq!(w, array![[0.0, 2.0, 3.0], [4.0, 0.0, 6.0], [7.0, 8.0, 0.0]]);
    }

    #[test]
    fn normalize_scales_max_to_hundred() {
        let mut w = array![[0.0, 0.2], [0.05, 0.0]];
        normalize(&mut w).unwrap();
        assert!((w[[0, 1]] - 100.0).abs() < 1e-9);
        assert!((w[[1, 0]] - 25.0).abs() < 1e-9);
    }

    #[test]
    fn normalize_handles_subnormal_max() {
        let mut w = array![[0.0, 1e-310], [5e-311, 0.0]];
        normalize(&mut w).unwrap();
        assert!(w.iter().all(|x| x.is_finite()));
        assert_eq!(w[[0, 0]], 0.0);
        assert!((w[[0, 1]] - 100.0).abs() < 1e-6);
        assert!((w[[1, 0]] - 50.0).abs() < 1e-6);
    }

    #[test]
    fn normalize_rejects_all_zero() {
        let mut w = Array2::<f64>::zeros((3, 3));
        assert!(matches!(normalize(&mut w), Err(GraphError::NoPositiveWeight)));
    }

    #[test]
    fn pipeline_ignores_heavy_self_transitions() {
        // The diagonal dominates but must not set the scale.
        let w = array![[1000.0, 1.0, 0.0], [0.5, 1000.0, 2.0], [0.0, 0.0, 1000.0]];
        let trunc = TruncatedWeights::from_weights(w.view(), Some(DEFAULT_CUTOFF)).unwrap();
        let t = trunc.view();

        for i in 0..3 {
            assert_eq!(t[[i, i]], 0.0);
        }
        assert!((t[[1, 2]] - 100.0).abs() < 1e-9);
        assert!((t[[0, 1]] - 50.0).abs() < 1e-9);
        assert!((t[[1, 0]] - 25.0).abs() < 1e-9);
        assert_eq!(trunc.nnz(), 3);
    }

    #[test]
    fn pipeline_without_cutoff_keeps_tiny_weights() {
        let w = array![[0.0, 1e-12], [1.0, 0.0]];
        let trunc = TruncatedWeights::from_weights(w.view(), None).unwrap();
        assert!(trunc.view()[[0, 1]] > 0.0);

        let trunc = TruncatedWeights::from_weights(w.view(), Some(DEFAULT_CUTOFF)).unwrap();
        assert_eq!(trunc.view()[[0, 1]], 0.0);
    }

    #[test]
    fn pipeline_only_diagonal_is_degenerate() {
        let w = Array2::from_diag(&array![1.0, 2.0, 3.0]);
        assert!(matches!(
            TruncatedWeights::from_weights(w.view(), Some(DEFAULT_CUTOFF)),
            Err(GraphError::NoPositiveWeight)
        ));
    }

    #[test]
    fn pipeline_rejects_non_square() {
        let w = Array2::<f64>::ones((2, 3));
        assert!(matches!(
            TruncatedWeights::from_weights(w.view(), None),
            Err(GraphError::NotSquare { rows: 2, cols: 3 })
        ));
    }

    #[test]
    fn pipeline_rejects_nan() {
        let w = array![[0.0, 1.0], [f64::NAN, 0.0]];
        assert!(matches!(
            TruncatedWeights::from_weights(w.view(), None),
            Err(GraphError::NonFinite { row: 1, col: 0 })
        ));
    }

    #[test]
    fn pipeline_rejects_empty_matrix() {
        let w = Array2::<f64>::zeros((0, 0));
        assert!(matches!(
            TruncatedWeights::from_weights(w.view(), None),
            Err(GraphError::NoPositiveWeight)
        ));
    }
}
