//! Distribution summaries over per-trial samples.

use serde::Serialize;

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct DistributionSummary {
    pub min: f64,
    pub p5: f64,
    pub p25: f64,
    pub p50: f64,
    pub p75: f64,
    pub p95: f64,
    pub mean: f64,
    pub max: f64,
}

/// Summarizes `samples`. An empty slice yields the all-zero summary.
pub fn summarize(samples: &[f64]) -> DistributionSummary {
    if samples.is_empty() {
        return DistributionSummary::default();
    }
    let mut sorted = samples.to_vec();
    sorted.sort_by(f64::total_cmp);

    let mean = sorted.iter().sum::<f64>() / sorted.len() as f64;
    DistributionSummary {
        min: sorted[0],
        p5: percentile_sorted(&sorted, 5.0),
        p25: percentile_sorted(&sorted, 25.0),
        p50: percentile_sorted(&sorted, 50.0),
        p75: percentile_sorted(&sorted, 75.0),
        p95: percentile_sorted(&sorted, 95.0),
        mean,
        max: sorted[sorted.len() - 1],
    }
}

/// Linear interpolation between closest ranks. `sorted` must be ascending and non-empty.
pub fn percentile_sorted(sorted: &[f64], pct: f64) -> f64 {
    let last = sorted.len() - 1;
    let rank = (pct / 100.0).clamp(0.0, 1.0) * last as f64;
    let lower = rank.floor() as usize;
    let upper = rank.ceil() as usize;
    let weight = rank - lower as f64;
    sorted[lower] + (sorted[upper] - sorted[lower]) * weight
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_input_is_zeroed() {
        assert_eq!(summarize(&[]), DistributionSummary::default());
    }

    #[test]
    fn single_sample_collapses() {
        let s = summarize(&[4.5]);
        assert_eq!(s.min, 4.5);
        assert_eq!(s.p50, 4.5);
        assert_eq!(s.mean, 4.5);
        assert_eq!(s.max, 4.5);
    }

    #[test]
    fn interpolates_between_ranks() {
        let samples: Vec<f64> = (0..=100).rev().map(f64::from).collect();
        let s = summarize(&samples);
        assert_eq!(s.min, 0.0);
        assert!((s.p5 - 5.0).abs() < 1e-9);
        assert!((s.p25 - 25.0).abs() < 1e-9);
        assert!((s.p50 - 50.0).abs() < 1e-9);
        assert!((s.p95 - 95.0).abs() < 1e-9);
        assert_eq!(s.max, 100.0);
        assert!((s.mean - 50.0).abs() < 1e-12);

        let s = summarize(&[1.0, 2.0]);
        assert!((s.p50 - 1.5).abs() < 1e-12);
    }
}
