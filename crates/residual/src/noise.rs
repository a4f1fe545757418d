//! Per-variable white-noise samplers.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::StandardNormal;

use crate::error::ResidualError;
use crate::small_linalg::SmallVec;

/// Location and scale of one normal noise sampler.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NormalParams {
    /// Mean.
    pub loc: f64,
    /// Standard deviation.
    pub scale: f64,
}

impl Default for NormalParams {
    fn default() -> Self {
        Self {
            loc: 0.0,
            scale: 1.0,
        }
    }
}

/// Independent normal samplers, one seeded stream per variable.
///
/// Each day one value is drawn per variable. A non-finite draw is replaced
/// by the fallback value.
#[derive(Debug, Clone)]
pub struct WhiteNoise<const K: usize> {
    params: [NormalParams; K],
    streams: [StdRng; K],
    fallback: f64,
}

impl<const K: usize> WhiteNoise<K> {
    /// Creates the samplers, deriving one stream per variable from `seed`.
    ///
    /// # Errors
    ///
    /// Returns [`ResidualError::InvalidNormal`] if a location is non-finite or
    /// a scale is not finite and positive.
    pub fn new(seed: u64, params: [NormalParams; K], fallback: f64) -> Result<Self, ResidualError> {
        for (variable, p) in params.iter().enumerate() {
            if !p.loc.is_finite() || !p.scale.is_finite() || p.scale <= 0.0 {
                return Err(ResidualError::InvalidNormal {
                    variable,
                    loc: p.loc,
                    scale: p.scale,
                });
            }
        }
        let mut master = StdRng::seed_from_u64(seed);
        let streams = std::array::from_fn(|_| StdRng::from_rng(&mut master));
        Ok(Self {
            params,
            streams,
            fallback,
        })
    }

    /// Standard normal samplers for every variable.
    ///
    /// # Errors
    ///
    /// Never fails for the standard parameters; the signature matches [`WhiteNoise::new`].
    pub fn standard(seed: u64, fallback: f64) -> Result<Self, ResidualError> {
        Self::new(seed, [NormalParams::default(); K], fallback)
    }

    /// Draws today's noise vector, one value per variable.
    pub fn draw(&mut self) -> SmallVec<K> {
        let mut eps = SmallVec::splat(0.0);
        for ((e, rng), p) in eps.data.iter_mut().zip(&mut self.streams).zip(&self.params) {
            let z: f64 = rng.sample(StandardNormal);
            let v = p.loc + p.scale * z;
            *e = if v.is_finite() { v } else { self.fallback };
        }
        eps
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn rejects_bad_scale() {
        let bad = [
            NormalParams::default(),
            NormalParams {
                loc: 0.0,
                scale: 0.0,
            },
        ];
        let err = WhiteNoise::new(1, bad, 0.25).unwrap_err();
        assert!(matches!(err, ResidualError::InvalidNormal { variable: 1, .. }));
    }

    #[test]
    fn reproducible_for_seed() {
        let mut a = WhiteNoise::<2>::standard(5, 0.25).unwrap();
        let mut b = WhiteNoise::<2>::standard(5, 0.25).unwrap();
        for _ in 0..100 {
            assert_eq!(a.draw(), b.draw());
        }
    }

    #[test]
    fn variables_are_not_identical() {
        let mut noise = WhiteNoise::<2>::standard(5, 0.25).unwrap();
        let same = (0..100)
            .filter(|_| {
                let e = noise.draw();
                e.data[0] == e.data[1]
            })
            .count();
        assert_eq!(same, 0);
    }

    #[test]
    fn moments_follow_params() {
        let params = [
            NormalParams {
                loc: 2.0,
                scale: 0.5,
            },
            NormalParams::default(),
        ];
        let mut noise = WhiteNoise::new(17, params, 0.25).unwrap();
        let n = 20_000;
        let mut sum = [0.0; 2];
        let mut sum_sq = [0.0; 2];
        for _ in 0..n {
            let e = noise.draw();
            for k in 0..2 {
                sum[k] += e.data[k];
                sum_sq[k] += e.data[k] * e.data[k];
            }
        }
        let mean0 = sum[0] / n as f64;
        let var0 = sum_sq[0] / n as f64 - mean0 * mean0;
        assert_abs_diff_eq!(mean0, 2.0, epsilon = 0.02);
        assert_abs_diff_eq!(var0, 0.25, epsilon = 0.02);
        let mean1 = sum[1] / n as f64;
        assert_abs_diff_eq!(mean1, 0.0, epsilon = 0.03);
    }
}
