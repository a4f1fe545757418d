//! Read-only calibration bundle and run window.

use chrono::NaiveDate;
use wgen_calendar::{PeriodRef, PeriodResolver, n_days_inclusive};
use wgen_depth::{DepthFamily, DepthTables};
use wgen_residual::{N_VARIABLES, ResidualModel, ResidualPeriod, ResidualSettings};
use wgen_spell::{DayState, NegBinomial, SpellTables};

use crate::error::PathwayError;
use crate::seeds::SeedSet;
use crate::state::Pathway;

/// Everything a realization reads and nothing it writes.
///
/// Built once at setup; shared by reference across concurrent realizations.
#[derive(Debug, Clone)]
pub struct Calibration {
    resolver: PeriodResolver,
    spells: SpellTables,
    depths: DepthTables,
    residual: ResidualModel<N_VARIABLES>,
}

impl Calibration {
    /// Bundles the component tables after checking that every period the
    /// resolver can produce is covered by each of them.
    ///
    /// # Errors
    ///
    /// Returns the first component's `MissingPeriod` error.
    pub fn new(
        resolver: PeriodResolver,
        spells: SpellTables,
        depths: DepthTables,
        residual: ResidualModel<N_VARIABLES>,
    ) -> Result<Self, PathwayError> {
        let (n_data, n_projection) = (resolver.n_data(), resolver.n_projection());
        spells.check_periods(n_data, n_projection)?;
        depths.check_periods(n_data, n_projection)?;
        residual.check_periods(n_data, n_projection)?;
        Ok(Self {
            resolver,
            spells,
            depths,
            residual,
        })
    }

    /// Date-to-period resolver.
    pub fn resolver(&self) -> &PeriodResolver {
        &self.resolver
    }

    /// Spell-length tables.
    pub fn spells(&self) -> &SpellTables {
        &self.spells
    }

    /// Depth tables.
    pub fn depths(&self) -> &DepthTables {
        &self.depths
    }

    /// Residual model.
    pub fn residual(&self) -> &ResidualModel<N_VARIABLES> {
        &self.residual
    }

    /// Residual guards.
    pub fn residual_settings(&self) -> &ResidualSettings {
        self.residual.settings()
    }

    /// Number of spatial units.
    pub fn n_units(&self) -> usize {
        self.depths.n_units()
    }

    /// Calibration period governing `pathway` on `date`.
    ///
    /// H0 always runs on data periods; H1 follows the full timeline.
    pub fn period(&self, pathway: Pathway, date: NaiveDate) -> PeriodRef {
        match pathway {
            Pathway::H0 => PeriodRef::data(self.resolver.resolve_data_period(date)),
            Pathway::H1 => self.resolver.resolve_pathway_period(date),
        }
    }

    /// Depth family and period index used by `pathway` on `date`.
    ///
    /// Inside data periods both pathways share the data tables. Inside a
    /// projection period H0 uses the baseline tables and H1 the projection
    /// tables of that period.
    pub fn depth_source(&self, pathway: Pathway, date: NaiveDate) -> (DepthFamily, usize) {
        let governing = self.resolver.resolve_pathway_period(date);
        if governing.is_data() {
            return (DepthFamily::Data, self.period(pathway, date).index);
        }
        match pathway {
            Pathway::H0 => (DepthFamily::Baseline, governing.index),
            Pathway::H1 => (DepthFamily::Projection, governing.index),
        }
    }

    /// Spell distribution for a `state` spell starting in `month` of `period`.
    ///
    /// # Errors
    ///
    /// Propagates the lookup error from the spell tables.
    pub fn spell(
        &self,
        period: PeriodRef,
        state: DayState,
        month: u8,
    ) -> Result<&NegBinomial, PathwayError> {
        Ok(self.spells.distribution(period, state, month)?)
    }

    /// Residual calibration of `period`.
    ///
    /// # Errors
    ///
    /// Propagates the lookup error from the residual model.
    pub fn residual_period(
        &self,
        period: PeriodRef,
    ) -> Result<&ResidualPeriod<N_VARIABLES>, PathwayError> {
        Ok(self.residual.period(period)?)
    }
}

/// Simulation window and seeds.
///
/// # Example
///
/// ```
/// use chrono::NaiveDate;
/// use wgen_pathway::{RunSettings, SeedSet};
///
/// let run = RunSettings::new(
///     NaiveDate::from_ymd_opt(2000, 1, 1).unwrap(),
///     NaiveDate::from_ymd_opt(2000, 12, 31).unwrap(),
/// )
/// .with_seeds(SeedSet::new(11, 12, 13, 14));
/// assert_eq!(run.n_days().unwrap(), 366);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunSettings {
    start: NaiveDate,
    end: NaiveDate,
    seeds: SeedSet,
}

impl RunSettings {
    /// Simulates `start` through `end`, both inclusive, with default seeds.
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self {
            start,
            end,
            seeds: SeedSet::default(),
        }
    }

    /// Sets the base seeds.
    pub fn with_seeds(mut self, seeds: SeedSet) -> Self {
        self.seeds = seeds;
        self
    }

    /// First simulated day.
    pub fn start(&self) -> NaiveDate {
        self.start
    }

    /// Last simulated day.
    pub fn end(&self) -> NaiveDate {
        self.end
    }

    /// Base seeds.
    pub fn seeds(&self) -> &SeedSet {
        &self.seeds
    }

    /// Number of simulated days.
    ///
    /// # Errors
    ///
    /// See [`RunSettings::validate`].
    pub fn n_days(&self) -> Result<usize, PathwayError> {
        self.validate()?;
        Ok(n_days_inclusive(self.start, self.end)?)
    }

    /// Validates the window.
    ///
    /// # Errors
    ///
    /// Returns [`PathwayError::InvalidWindow`] if `end < start`.
    pub fn validate(&self) -> Result<(), PathwayError> {
        if self.end < self.start {
            return Err(PathwayError::InvalidWindow {
                start: self.start,
                end: self.end,
            });
        }
        Ok(())
    }
}
