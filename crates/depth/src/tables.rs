//! Depth distributions laid out per period, spatial unit and month.

use tracing::debug;

use crate::distribution::DepthDistribution;
use crate::error::DepthError;
use crate::mixed_exp::MixedExpParams;
use crate::truncation::{TruncationOption, TruncationTables};

/// Which family of depth distributions a pathway draws from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DepthFamily {
    /// Data-period calibration, used by both pathways inside data periods.
    Data,
    /// Projection calibration, used by the alternative pathway in projection periods.
    Projection,
    /// Data calibration truncated for projection periods, used by the
    /// baseline pathway in projection periods.
    Baseline,
}

/// Depth distributions for one period, indexed `[unit][month]`.
#[derive(Debug, Clone)]
pub struct DepthGrid {
    n_units: usize,
    cells: Vec<DepthDistribution>,
}

impl DepthGrid {
    /// Builds one distribution per unit and month.
    ///
    /// `params[u][m]` holds the parameters of unit `u` in month `m + 1`. The
    /// truncation maximum of every cell is resolved with `option` at
    /// `period_index`.
    ///
    /// # Errors
    ///
    /// Returns [`DepthError::Empty`] for zero units, or the first
    /// construction error of any cell.
    pub fn build(
        params: &[[MixedExpParams; 12]],
        option: TruncationOption,
        period_index: usize,
        truncation: &TruncationTables,
        threshold: f64,
    ) -> Result<Self, DepthError> {
        if params.is_empty() {
            return Err(DepthError::Empty);
        }
        let mut cells = Vec::with_capacity(params.len() * 12);
        for (unit, months) in params.iter().enumerate() {
            for (m, &p) in months.iter().enumerate() {
                cells.push(DepthDistribution::build(
                    p,
                    unit,
                    m as u8 + 1,
                    option,
                    period_index,
                    truncation,
                    threshold,
                )?);
            }
        }
        debug!(
            n_units = params.len(),
            period_index,
            option = option.code(),
            "built depth grid"
        );
        Ok(Self {
            n_units: params.len(),
            cells,
        })
    }

    /// Number of spatial units.
    pub fn n_units(&self) -> usize {
        self.n_units
    }

    /// Distribution of `unit` in `month` (1..=12), if both are in range.
    pub fn get(&self, unit: usize, month: u8) -> Option<&DepthDistribution> {
        if unit >= self.n_units || !(1..=12).contains(&month) {
            return None;
        }
        self.cells.get(unit * 12 + (month - 1) as usize)
    }
}

/// All depth grids used during a simulation.
#[derive(Debug, Clone)]
pub struct DepthTables {
    n_units: usize,
    data: Vec<DepthGrid>,
    projection: Vec<DepthGrid>,
    baseline: Vec<DepthGrid>,
}

impl DepthTables {
    /// Bundles the three families.
    ///
    /// # Errors
    ///
    /// - [`DepthError::Empty`] if `data` is empty.
    /// - [`DepthError::UnitCountMismatch`] if grids disagree on unit count.
    pub fn new(
        data: Vec<DepthGrid>,
        projection: Vec<DepthGrid>,
        baseline: Vec<DepthGrid>,
    ) -> Result<Self, DepthError> {
        let n_units = data.first().ok_or(DepthError::Empty)?.n_units();
        for (family, grids) in [
            (DepthFamily::Data, &data),
            (DepthFamily::Projection, &projection),
            (DepthFamily::Baseline, &baseline),
        ] {
            for (period, grid) in grids.iter().enumerate() {
                if grid.n_units() != n_units {
                    return Err(DepthError::UnitCountMismatch {
                        family,
                        period,
                        expected: n_units,
                        got: grid.n_units(),
                    });
                }
            }
        }
        Ok(Self {
            n_units,
            data,
            projection,
            baseline,
        })
    }

    /// Number of spatial units.
    pub fn n_units(&self) -> usize {
        self.n_units
    }

    fn grids(&self, family: DepthFamily) -> &[DepthGrid] {
        match family {
            DepthFamily::Data => &self.data,
            DepthFamily::Projection => &self.projection,
            DepthFamily::Baseline => &self.baseline,
        }
    }

    /// Verifies that every period the resolver can produce has a grid.
    ///
    /// # Errors
    ///
    /// Returns [`DepthError::MissingPeriod`] for the first uncovered family.
    pub fn check_periods(&self, n_data: usize, n_projection: usize) -> Result<(), DepthError> {
        for (family, needed) in [
            (DepthFamily::Data, n_data),
            (DepthFamily::Projection, n_projection),
            (DepthFamily::Baseline, n_projection),
        ] {
            let available = self.grids(family).len();
            if needed > available {
                return Err(DepthError::MissingPeriod {
                    family,
                    period: available,
                    available,
                });
            }
        }
        Ok(())
    }

    /// Grid of `family` at `period`.
    ///
    /// # Errors
    ///
    /// Returns [`DepthError::MissingPeriod`] if there is no such grid.
    pub fn grid(&self, family: DepthFamily, period: usize) -> Result<&DepthGrid, DepthError> {
        let grids = self.grids(family);
        grids.get(period).ok_or(DepthError::MissingPeriod {
            family,
            period,
            available: grids.len(),
        })
    }

    /// Distribution of `unit` in `month` for `family` at `period`.
    ///
    /// # Errors
    ///
    /// - [`DepthError::MissingPeriod`] if there is no such grid.
    /// - [`DepthError::UnitOutOfRange`] if `unit` is past the unit count.
    /// - [`DepthError::InvalidMonth`] if `month` is not in 1..=12.
    pub fn get(
        &self,
        family: DepthFamily,
        period: usize,
        unit: usize,
        month: u8,
    ) -> Result<&DepthDistribution, DepthError> {
        let grid = self.grid(family, period)?;
        if unit >= grid.n_units() {
            return Err(DepthError::UnitOutOfRange {
                unit,
                n_units: grid.n_units(),
            });
        }
        grid.get(unit, month).ok_or(DepthError::InvalidMonth { month })
    }

    /// Samples one depth per spatial unit: `out[u]` is drawn with `probs[u]`.
    ///
    /// # Errors
    ///
    /// - [`DepthError::BufferLengthMismatch`] unless both slices have one
    ///   entry per unit.
    /// - [`DepthError::MissingPeriod`] or [`DepthError::InvalidMonth`] on a
    ///   bad lookup.
    pub fn sample_units_into(
        &self,
        family: DepthFamily,
        period: usize,
        month: u8,
        probs: &[f64],
        out: &mut [f64],
    ) -> Result<(), DepthError> {
        for len in [probs.len(), out.len()] {
            if len != self.n_units {
                return Err(DepthError::BufferLengthMismatch {
                    expected: self.n_units,
                    got: len,
                });
            }
        }
        let grid = self.grid(family, period)?;
        for (unit, (o, &p)) in out.iter_mut().zip(probs).enumerate() {
            let dist = grid
                .get(unit, month)
                .ok_or(DepthError::InvalidMonth { month })?;
            *o = dist.sample(p);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(alpha: f64) -> [MixedExpParams; 12] {
        [MixedExpParams::new(alpha, 2.0, 15.0).unwrap(); 12]
    }

    fn truncation() -> TruncationTables {
        TruncationTables::new()
            .with_regional(vec![[50.0; 12], [80.0; 12]], vec![[0; 12], [1; 12]])
            .with_projected_model(vec![[60.0; 12]])
            .with_baseline_design(vec![[70.0; 12]])
    }

    fn grid(option: TruncationOption, n_units: usize) -> DepthGrid {
        let p: Vec<_> = (0..n_units).map(|_| params(0.6)).collect();
        DepthGrid::build(&p, option, 0, &truncation(), 0.2).unwrap()
    }

    #[test]
    fn grid_lookup_by_unit_and_month() {
        let g = grid(TruncationOption::Regional, 2);
        assert_eq!(g.get(0, 1).unwrap().max_depth(), 50.0);
        assert_eq!(g.get(1, 12).unwrap().max_depth(), 80.0);
        assert!(g.get(2, 1).is_none());
        assert!(g.get(0, 0).is_none());
    }

    #[test]
    fn empty_grid_rejected() {
        let err = DepthGrid::build(&[], TruncationOption::Regional, 0, &truncation(), 0.2)
            .unwrap_err();
        assert_eq!(err, DepthError::Empty);
    }

    #[test]
    fn tables_reject_unit_mismatch() {
        let err = DepthTables::new(
            vec![grid(TruncationOption::Regional, 2)],
            vec![grid(TruncationOption::ProjectedModel, 1)],
            vec![],
        )
        .unwrap_err();
        assert!(matches!(
            err,
            DepthError::UnitCountMismatch {
                family: DepthFamily::Projection,
                ..
            }
        ));
    }

    #[test]
    fn sample_units_uses_family_truncation() {
        let tables = DepthTables::new(
            vec![grid(TruncationOption::Regional, 2)],
            vec![grid(TruncationOption::ProjectedModel, 2)],
            vec![grid(TruncationOption::BaselineDesignStorm, 2)],
        )
        .unwrap();
        let mut out = [0.0; 2];
        tables
            .sample_units_into(DepthFamily::Data, 0, 5, &[1.0, 1.0], &mut out)
            .unwrap();
        assert_eq!(out, [50.0, 80.0]);
        tables
            .sample_units_into(DepthFamily::Projection, 0, 5, &[1.0, 0.0], &mut out)
            .unwrap();
        assert_eq!(out, [60.0, 0.2]);
        tables
            .sample_units_into(DepthFamily::Baseline, 0, 5, &[1.0, 1.0], &mut out)
            .unwrap();
        assert_eq!(out, [70.0, 70.0]);
        let dist = tables.get(DepthFamily::Baseline, 0, 1, 3).unwrap();
        assert_eq!(dist.max_depth(), 70.0);
        assert!(tables.get(DepthFamily::Data, 1, 0, 3).is_err());
        assert_eq!(
            tables.get(DepthFamily::Data, 0, 2, 3).unwrap_err(),
            DepthError::UnitOutOfRange { unit: 2, n_units: 2 }
        );
    }

    #[test]
    fn check_periods_counts_every_family() {
        let tables = DepthTables::new(
            vec![grid(TruncationOption::Regional, 1)],
            vec![grid(TruncationOption::ProjectedModel, 1)],
            vec![],
        )
        .unwrap();
        assert!(tables.check_periods(1, 0).is_ok());
        assert!(matches!(
            tables.check_periods(1, 1),
            Err(DepthError::MissingPeriod {
                family: DepthFamily::Baseline,
                ..
            })
        ));
    }
}
