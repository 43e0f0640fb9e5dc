//! Descriptive statistics over plain `f64` slices.

use serde::Serialize;

/// Arithmetic mean, or `None` for an empty input.
pub fn mean<I>(values: I) -> Option<f64>
where
    I: IntoIterator<Item = f64>,
{
    let (sum, count) = values
        .into_iter()
        .fold((0.0, 0usize), |(sum, count), v| (sum + v, count + 1));

    if count == 0 {
        None
    } else {
        Some(sum / count as f64)
    }
}

/// Round to `decimals` places, half away from zero.
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

/// Quantile of an ascending-sorted slice using linear interpolation
/// between closest ranks. `q` is clamped to `[0, 1]`.
pub fn quantile_sorted(sorted: &[f64], q: f64) -> Option<f64> {
    if sorted.is_empty() {
        return None;
    }

    let position = q.clamp(0.0, 1.0) * (sorted.len() - 1) as f64;
    let lower = position.floor() as usize;
    let upper = position.ceil() as usize;
    let fraction = position - lower as f64;

    Some(sorted[lower] + (sorted[upper] - sorted[lower]) * fraction)
}

/// Five-number summary plus Tukey whiskers for one group of values.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BoxStats {
    pub count: usize,
    pub min: f64,
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    pub max: f64,
    pub mean: f64,
    /// Smallest value not below `q1 - 1.5 * IQR`.
    pub lower_whisker: f64,
    /// Largest value not above `q3 + 1.5 * IQR`.
    pub upper_whisker: f64,
    /// Values outside the whiskers, ascending.
    pub outliers: Vec<f64>,
}

impl BoxStats {
    /// Summarise a group of values; `None` for an empty group.
    pub fn from_values(values: &[f64]) -> Option<Self> {
        let mut sorted: Vec<f64> = values.iter().copied().filter(|v| !v.is_nan()).collect();
        if sorted.is_empty() {
            return None;
        }
        sorted.sort_by(f64::total_cmp);

        let q1 = quantile_sorted(&sorted, 0.25)?;
        let median = quantile_sorted(&sorted, 0.5)?;
        let q3 = quantile_sorted(&sorted, 0.75)?;
        let iqr = q3 - q1;
        let low_fence = q1 - 1.5 * iqr;
        let high_fence = q3 + 1.5 * iqr;

        let inside: Vec<f64> = sorted
            .iter()
            .copied()
            .filter(|v| *v >= low_fence && *v <= high_fence)
            .collect();
        let outliers: Vec<f64> = sorted
            .iter()
            .copied()
            .filter(|v| *v < low_fence || *v > high_fence)
            .collect();

        Some(Self {
            count: sorted.len(),
            min: sorted[0],
            q1,
            median,
            q3,
            max: sorted[sorted.len() - 1],
            mean: mean(sorted.iter().copied())?,
            // The quartiles always lie inside the fences, so `inside` is non-empty.
            lower_whisker: inside.first().copied().unwrap_or(q1),
            upper_whisker: inside.last().copied().unwrap_or(q3),
            outliers,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mean() {
        assert_eq!(mean(vec![1.0, 2.0, 3.0, 4.0]), Some(2.5));
        assert_eq!(mean(Vec::<f64>::new()), None);
    }

    #[test]
    fn test_round_to() {
        assert_eq!(round_to(7.25, 1), 7.3);
        assert_eq!(round_to(-7.25, 1), -7.3);
        assert_eq!(round_to(71.04, 1), 71.0);
        assert_eq!(round_to(3.14159, 2), 3.14);
    }

    #[test]
    fn test_quantile_linear_interpolation() {
        let sorted = [1.0, 2.0, 3.0, 4.0];
        assert_eq!(quantile_sorted(&sorted, 0.0), Some(1.0));
        assert_eq!(quantile_sorted(&sorted, 0.25), Some(1.75));
        assert_eq!(quantile_sorted(&sorted, 0.5), Some(2.5));
        assert_eq!(quantile_sorted(&sorted, 1.0), Some(4.0));
        assert_eq!(quantile_sorted(&[], 0.5), None);
        assert_eq!(quantile_sorted(&[9.0], 0.75), Some(9.0));
    }

    #[test]
    fn test_box_stats_with_outlier() {
        let values = [50.0, 60.0, 61.0, 62.0, 63.0, 64.0, 100.0];
        let stats = BoxStats::from_values(&values).unwrap();

        assert_eq!(stats.count, 7);
        assert_eq!(stats.min, 50.0);
        assert_eq!(stats.max, 100.0);
        assert_eq!(stats.median, 62.0);
        assert_eq!(stats.q1, 60.5);
        assert_eq!(stats.q3, 63.5);
        // Fences are 56.0 and 68.0.
        assert_eq!(stats.lower_whisker, 60.0);
        assert_eq!(stats.upper_whisker, 64.0);
        assert_eq!(stats.outliers, vec![50.0, 100.0]);
    }

    #[test]
    fn test_box_stats_single_value() {
        let stats = BoxStats::from_values(&[72.5]).unwrap();
        assert_eq!(stats.q1, 72.5);
        assert_eq!(stats.q3, 72.5);
        assert_eq!(stats.lower_whisker, 72.5);
        assert_eq!(stats.upper_whisker, 72.5);
        assert!(stats.outliers.is_empty());
    }

    #[test]
    fn test_box_stats_empty() {
        assert!(BoxStats::from_values(&[]).is_none());
    }
}
