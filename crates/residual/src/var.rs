//! VAR(1) recursion for standardised anomalies.

use crate::config::ResidualSettings;
use crate::error::ResidualError;
use crate::small_linalg::{SmallMat, SmallVec};

/// Lag-1 (`A`) and innovation (`B`) matrices of one calibration period.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VarMatrices<const K: usize> {
    a: SmallMat<K>,
    b: SmallMat<K>,
}

impl<const K: usize> VarMatrices<K> {
    /// Creates the matrix pair.
    ///
    /// # Errors
    ///
    /// Returns [`ResidualError::NonFiniteMatrix`] if either matrix holds NaN
    /// or infinity.
    pub fn new(a: SmallMat<K>, b: SmallMat<K>) -> Result<Self, ResidualError> {
        for (matrix, m) in [("A", &a), ("B", &b)] {
            if let Some((row, col)) = m.first_non_finite() {
                return Err(ResidualError::NonFiniteMatrix { matrix, row, col });
            }
        }
        Ok(Self { a, b })
    }

    /// Lag-1 matrix.
    pub fn a(&self) -> &SmallMat<K> {
        &self.a
    }

    /// Innovation matrix.
    pub fn b(&self) -> &SmallMat<K> {
        &self.b
    }
}

/// Double-buffered Chi of one pathway: today's and yesterday's anomalies.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResidualState<const K: usize> {
    today: SmallVec<K>,
    yesterday: SmallVec<K>,
}

impl<const K: usize> ResidualState<K> {
    /// Starts both buffers at `initial`.
    pub fn new(initial: f64) -> Self {
        Self {
            today: SmallVec::splat(initial),
            yesterday: SmallVec::splat(initial),
        }
    }

    /// Today's anomalies.
    pub fn chi(&self) -> &SmallVec<K> {
        &self.today
    }

    /// Yesterday's anomalies.
    pub fn previous(&self) -> &SmallVec<K> {
        &self.yesterday
    }

    /// Computes today's Chi as `yesterday · A + epsilon · B`.
    ///
    /// A non-finite element becomes `chi_fallback`; every other element is
    /// clipped to `±stability_bound`.
    pub fn advance(
        &mut self,
        matrices: &VarMatrices<K>,
        epsilon: &SmallVec<K>,
        settings: &ResidualSettings,
    ) {
        let bound = settings.stability_bound();
        let persistence = matrices.a.left_mul(&self.yesterday);
        let innovation = matrices.b.left_mul(epsilon);
        self.today = persistence.plus(&innovation);
        for c in &mut self.today.data {
            *c = if c.is_finite() {
                c.clamp(-bound, bound)
            } else {
                settings.chi_fallback()
            };
        }
    }

    /// Ends the day: today's Chi becomes yesterday's.
    pub fn roll(&mut self) {
        std::mem::swap(&mut self.today, &mut self.yesterday);
    }
}
