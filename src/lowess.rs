//! Locally weighted regression (LOWESS) for the trend overlay
//!
//! For each point the `fraction` nearest neighbors along x are fitted with a
//! tricube-weighted least-squares line, evaluated at that point's x. The
//! result is the smoothed trend curve drawn over the scatter.

/// Default fraction of the dataset used for each local fit
pub const DEFAULT_FRACTION: f64 = 2.0 / 3.0;

/// Smooth `points` with LOWESS, returning one fitted point per input point,
/// ascending in x.
///
/// Inputs with fewer than two points are returned as-is (sorted).
pub fn smooth(points: &[(f64, f64)], fraction: f64) -> Vec<(f64, f64)> {
    let mut sorted: Vec<(f64, f64)> = points.to_vec();
    sorted.sort_by(|a, b| a.0.total_cmp(&b.0));

    let n = sorted.len();
    if n < 2 {
        return sorted;
    }

    let window = ((fraction * n as f64).ceil() as usize).clamp(2, n);

    (0..n)
        .map(|i| {
            let lo = nearest_window_start(&sorted, i, window);
            let fitted = weighted_fit(&sorted[lo..lo + window], sorted[i].0);
            (sorted[i].0, fitted)
        })
        .collect()
}

/// Start index of the contiguous window of `window` points whose x values
/// are nearest to `points[i].0`.
fn nearest_window_start(points: &[(f64, f64)], i: usize, window: usize) -> usize {
    let n = points.len();
    let x = points[i].0;
    let mut lo = i.saturating_sub(window / 2).min(n - window);

    loop {
        let shrink_left = lo > 0 && x - points[lo - 1].0 < points[lo + window - 1].0 - x;
        let shrink_right = lo + window < n && points[lo + window].0 - x < x - points[lo].0;
        if shrink_left {
            lo -= 1;
        } else if shrink_right {
            lo += 1;
        } else {
            return lo;
        }
    }
}

/// Tricube-weighted least-squares line over `window`, evaluated at `x`.
fn weighted_fit(window: &[(f64, f64)], x: f64) -> f64 {
    let d_max = window
        .iter()
        .map(|&(xi, _)| (xi - x).abs())
        .fold(0.0, f64::max);

    let mut sum_w = 0.0;
    let mut sum_wx = 0.0;
    let mut sum_wy = 0.0;
    let mut sum_wxx = 0.0;
    let mut sum_wxy = 0.0;

    for &(xi, yi) in window {
        let w = if d_max > 0.0 {
            tricube((xi - x).abs() / d_max)
        } else {
            1.0
        };
        sum_w += w;
        sum_wx += w * xi;
        sum_wy += w * yi;
        sum_wxx += w * xi * xi;
        sum_wxy += w * xi * yi;
    }

    let denom = sum_w * sum_wxx - sum_wx * sum_wx;
    if denom.abs() < f64::EPSILON * sum_wxx.max(1.0) {
        // Degenerate window, fall back to the weighted mean
        return sum_wy / sum_w;
    }

    let slope = (sum_w * sum_wxy - sum_wx * sum_wy) / denom;
    let intercept = (sum_wy - slope * sum_wx) / sum_w;
    slope * x + intercept
}

fn tricube(u: f64) -> f64 {
    let v = 1.0 - u.powi(3);
    v * v * v
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constant_data_stays_constant() {
        let points: Vec<(f64, f64)> = (0..20).map(|i| (i as f64, 5.0)).collect();
        let trend = smooth(&points, DEFAULT_FRACTION);

        assert_eq!(trend.len(), points.len());
        for (_, y) in trend {
            assert!((y - 5.0).abs() < 1e-9);
        }
    }

    #[test]
    fn test_linear_data_reproduced() {
        let points: Vec<(f64, f64)> = (0..30).map(|i| (i as f64, 2.0 * i as f64 + 1.0)).collect();
        let trend = smooth(&points, 1.0);

        for (x, y) in trend {
            assert!((y - (2.0 * x + 1.0)).abs() < 1e-6, "fit at x={x} was {y}");
        }
    }

    #[test]
    fn test_output_ascending_in_x() {
        let points = vec![(3.0, 1.0), (1.0, 4.0), (2.0, 2.0), (5.0, 8.0), (4.0, 3.0)];
        let trend = smooth(&points, DEFAULT_FRACTION);

        assert_eq!(trend.len(), points.len());
        for pair in trend.windows(2) {
            assert!(pair[0].0 <= pair[1].0);
        }
    }

    #[test]
    fn test_small_inputs_returned_unchanged() {
        assert!(smooth(&[], DEFAULT_FRACTION).is_empty());
        assert_eq!(smooth(&[(1.0, 2.0)], DEFAULT_FRACTION), vec![(1.0, 2.0)]);
    }

    #[test]
    fn test_duplicate_x_values() {
        // All points at the same x, fit falls back to the weighted mean
        let points = vec![(1.0, 2.0), (1.0, 4.0), (1.0, 6.0)];
        let trend = smooth(&points, 1.0);
        for (_, y) in trend {
            assert!((y - 4.0).abs() < 1e-9);
        }
    }

    #[test]
    fn test_tricube_kernel_bounds() {
        assert!((tricube(0.0) - 1.0).abs() < 1e-12);
        assert!(tricube(1.0).abs() < 1e-12);
        assert!(tricube(0.5) > 0.0 && tricube(0.5) < 1.0);
    }
}
