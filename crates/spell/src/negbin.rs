//! Negative-binomial spell-length distribution.

use rand::Rng;

use crate::error::SpellError;

/// Upper bound on a single sampled spell length, in days.
pub const MAX_SPELL_DAYS: u32 = 10_000;

const MAX_SHAPE: f64 = 1000.0;
const MAX_PROBABILITY: f64 = 10.0;

/// Negative-binomial distribution of the number of failures before the
/// `n`-th success, with success probability `p`.
///
/// `pmf(k) = Γ(k + n) / (Γ(n) k!) · pᴺ · (1 − p)ᵏ`
///
/// `p` is a fitted family parameter and is accepted in `(0, 10)`. For
/// `p >= 1` the distribution is degenerate at zero.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NegBinomial {
    n: f64,
    p: f64,
}

impl NegBinomial {
    /// Creates a distribution after validating both parameters.
    ///
    /// # Errors
    ///
    /// - [`SpellError::InvalidShape`] unless `n` is finite and in `(0, 1000]`.
    /// - [`SpellError::InvalidProbability`] unless `p` is finite and in `(0, 10)`.
    pub fn new(n: f64, p: f64) -> Result<Self, SpellError> {
        if !n.is_finite() || n <= 0.0 || n > MAX_SHAPE {
            return Err(SpellError::InvalidShape { n });
        }
        if !p.is_finite() || p <= 0.0 || p >= MAX_PROBABILITY {
            return Err(SpellError::InvalidProbability { p });
        }
        Ok(Self { n, p })
    }

    /// Shape parameter N.
    pub fn n(&self) -> f64 {
        self.n
    }

    /// Probability parameter P.
    pub fn p(&self) -> f64 {
        self.p
    }

    fn is_degenerate(&self) -> bool {
        self.p >= 1.0
    }

    /// Expected number of failures, `n (1 − p) / p`.
    pub fn mean(&self) -> f64 {
        if self.is_degenerate() {
            return 0.0;
        }
        self.n * (1.0 - self.p) / self.p
    }

    /// Expected number of days a spell occupies when a zero draw still
    /// consumes the day on which it was drawn, i.e. `E[max(X, 1)]`.
    pub fn mean_spell_days(&self) -> f64 {
        self.mean() + self.pmf(0)
    }

    /// Probability mass at `k`.
    pub fn pmf(&self, k: u32) -> f64 {
        self.terms().nth(k as usize).unwrap_or(0.0)
    }

    /// Cumulative probability `P(X <= k)`.
    pub fn cdf(&self, k: u32) -> f64 {
        self.terms()
            .take(k as usize + 1)
            .fold(0.0, |cum, pmf| cum + pmf)
            .min(1.0)
    }

    /// Smallest `k` with `cdf(k) >= u`, capped at [`MAX_SPELL_DAYS`].
    ///
    /// `u <= 0` or NaN yields 0.
    pub fn quantile(&self, u: f64) -> u32 {
        if u.is_nan() || u <= 0.0 {
            return 0;
        }
        let mut cum = 0.0;
        for (k, pmf) in self.terms().take(MAX_SPELL_DAYS as usize + 1).enumerate() {
            cum += pmf;
            if cum >= u {
                return k as u32;
            }
        }
        MAX_SPELL_DAYS
    }

    /// Draws one spell length, consuming exactly one uniform from `rng`.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> u32 {
        self.quantile(rng.random::<f64>())
    }

    /// Iterator over `pmf(0), pmf(1), ...`.
    ///
    /// Terms are carried in log space so that a vanishing `pᴺ` does not zero
    /// the whole sequence.
    fn terms(&self) -> PmfTerms {
        PmfTerms {
            ln_term: if self.is_degenerate() {
                0.0
            } else {
                self.n * self.p.ln()
            },
            ln_q: if self.is_degenerate() {
                f64::NEG_INFINITY
            } else {
                (1.0 - self.p).ln()
            },
            n: self.n,
            k: 0,
        }
    }
}

struct PmfTerms {
    ln_term: f64,
    ln_q: f64,
    n: f64,
    k: u32,
}

impl Iterator for PmfTerms {
    type Item = f64;

    fn next(&mut self) -> Option<f64> {
        let pmf = self.ln_term.exp();
        let k = f64::from(self.k);
        self.ln_term += ((k + self.n) / (k + 1.0)).ln() + self.ln_q;
        self.k = self.k.saturating_add(1);
        Some(pmf)
    }
}
