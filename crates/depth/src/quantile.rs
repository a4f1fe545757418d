//! Discretised inverse CDF of a truncated mixed exponential.

use crate::mixed_exp::MixedExpParams;

/// Number of probability levels in a quantile table (0.00, 0.01, ..., 1.00).
pub const N_LEVELS: usize = 101;

const LAST: usize = N_LEVELS - 1;

/// Returns the probability levels `i / 100` for `i` in `0..=100`.
pub fn probability_levels() -> [f64; N_LEVELS] {
    std::array::from_fn(|i| i as f64 / LAST as f64)
}

/// Depths at each of the [`N_LEVELS`] probability levels.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct QuantileTable {
    depths: [f64; N_LEVELS],
}

impl QuantileTable {
    /// Builds the table for `params` truncated to `[threshold, max_depth]`.
    ///
    /// Callers guarantee `0 <= threshold < max_depth`, both finite.
    pub(crate) fn build(params: &MixedExpParams, threshold: f64, max_depth: f64) -> Self {
        let support = support(threshold, max_depth);

        // Density at the threshold is zero so the first point carries no mass.
        let mut cumulative = Vec::with_capacity(support.len());
        let mut total = 0.0;
        cumulative.push(total);
        for &x in &support[1..] {
            total += params.pdf(x);
            cumulative.push(total);
        }

        let mut depths = [threshold; N_LEVELS];
        depths[LAST] = max_depth;
        if total <= 0.0 || !total.is_finite() {
            return Self { depths };
        }
        for c in &mut cumulative {
            *c /= total;
        }

        let levels = probability_levels();
        let mut seg = 1;
        for (depth, &p) in depths.iter_mut().zip(&levels).take(LAST).skip(1) {
            while cumulative[seg] < p {
                seg += 1;
            }
            let (c0, c1) = (cumulative[seg - 1], cumulative[seg]);
            let (x0, x1) = (support[seg - 1], support[seg]);
            *depth = x0 + (p - c0) / (c1 - c0) * (x1 - x0);
        }
        Self { depths }
    }

    /// Depth at each probability level.
    pub(crate) fn depths(&self) -> &[f64; N_LEVELS] {
        &self.depths
    }

    /// Linear interpolation of `p` into the table; `p` clamps to [0, 1].
    pub(crate) fn interpolate(&self, p: f64) -> f64 {
        if p.is_nan() || p <= 0.0 {
            return self.depths[0];
        }
        if p >= 1.0 {
            return self.depths[LAST];
        }
        let pos = p * LAST as f64;
        let i = (pos.floor() as usize).min(LAST - 1);
        let frac = pos - i as f64;
        self.depths[i] + frac * (self.depths[i + 1] - self.depths[i])
    }
}

/// Threshold, every whole number strictly between threshold and maximum, then
/// the maximum.
fn support(threshold: f64, max_depth: f64) -> Vec<f64> {
    let mut xs = vec![threshold];
    let mut x = threshold.floor() + 1.0;
    while x < max_depth {
        if x > threshold {
            xs.push(x);
        }
        x += 1.0;
    }
    xs.push(max_depth);
    xs
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn levels_are_exact_hundredths() {
        let levels = probability_levels();
        assert_eq!(levels[0], 0.0);
        assert_eq!(levels[50], 0.5);
        assert_eq!(levels[LAST], 1.0);
        assert!(levels.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn support_starts_at_threshold() {
        assert_eq!(support(0.2, 4.0), vec![0.2, 1.0, 2.0, 3.0, 4.0]);
        assert_eq!(support(0.2, 3.5), vec![0.2, 1.0, 2.0, 3.0, 3.5]);
        assert_eq!(support(1.0, 3.0), vec![1.0, 2.0, 3.0]);
    }

    #[test]
    fn table_spans_threshold_to_max() {
        let params = MixedExpParams::new(0.6, 2.0, 15.0).unwrap();
        let table = QuantileTable::build(&params, 0.2, 50.0);
        assert_eq!(table.depths()[0], 0.2);
        assert_eq!(table.depths()[LAST], 50.0);
        assert!(table.depths().windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn interpolate_hits_table_points() {
        let params = MixedExpParams::new(0.6, 2.0, 15.0).unwrap();
        let table = QuantileTable::build(&params, 0.2, 50.0);
        assert_relative_eq!(table.interpolate(0.5), table.depths()[50], epsilon = 1e-12);
        let mid = table.interpolate(0.505);
        assert!(mid >= table.depths()[50] && mid <= table.depths()[51]);
    }

    #[test]
    fn vanishing_density_collapses_to_threshold() {
        // exp(-x / 0.001) underflows for every x >= 1.
        let params = MixedExpParams::new(0.5, 0.001, 0.001).unwrap();
        let table = QuantileTable::build(&params, 0.2, 10.0);
        assert!(table.depths()[..LAST].iter().all(|&d| d == 0.2));
        assert_eq!(table.depths()[LAST], 10.0);
    }
}
