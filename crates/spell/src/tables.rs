//! Spell-length distributions per calibration period and month.

use rand::Rng;
use wgen_calendar::{PeriodKind, PeriodRef};

use crate::error::SpellError;
use crate::negbin::{MAX_SPELL_DAYS, NegBinomial};
use crate::state::DayState;

/// Wet and dry spell-length distributions for the twelve months of one period.
#[derive(Debug, Clone, PartialEq)]
pub struct PeriodSpells {
    wet: [NegBinomial; 12],
    dry: [NegBinomial; 12],
}

impl PeriodSpells {
    /// Creates the tables from January..December arrays.
    pub fn new(wet: [NegBinomial; 12], dry: [NegBinomial; 12]) -> Self {
        Self { wet, dry }
    }

    /// Uses the same wet and dry distribution in every month.
    pub fn uniform(wet: NegBinomial, dry: NegBinomial) -> Self {
        Self {
            wet: [wet; 12],
            dry: [dry; 12],
        }
    }

    /// First month and state whose mean spell length reaches [`MAX_SPELL_DAYS`].
    fn first_above_cap(&self) -> Option<(u8, DayState, f64)> {
        let cap = f64::from(MAX_SPELL_DAYS);
        (0..12).find_map(|m| {
            [(DayState::Wet, &self.wet[m]), (DayState::Dry, &self.dry[m])]
                .into_iter()
                .map(|(state, nb)| (m as u8 + 1, state, nb.mean_spell_days()))
                .find(|&(_, _, mean)| mean >= cap)
        })
    }

    /// Returns the distribution for spells of `state` starting in `month` (1..=12).
    ///
    /// # Errors
    ///
    /// Returns [`SpellError::InvalidMonth`] if `month` is not in 1..=12.
    pub fn for_month(&self, state: DayState, month: u8) -> Result<&NegBinomial, SpellError> {
        if !(1..=12).contains(&month) {
            return Err(SpellError::InvalidMonth { month });
        }
        let i = (month - 1) as usize;
        Ok(match state {
            DayState::Wet => &self.wet[i],
            DayState::Dry => &self.dry[i],
        })
    }
}

/// Which tables projection periods draw their spell lengths from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SpellSource {
    /// Each projection period uses its own tables.
    #[default]
    Projected,
    /// Projection periods reuse the first data period's tables.
    Historical,
}

/// Spell-length tables for every data and projection period.
///
/// Built once at setup and shared read-only across realizations.
#[derive(Debug, Clone)]
pub struct SpellTables {
    data: Vec<PeriodSpells>,
    projection: Vec<PeriodSpells>,
    source: SpellSource,
}

impl SpellTables {
    /// Creates the tables.
    ///
    /// # Errors
    ///
    /// - [`SpellError::NoDataTables`] if `data` is empty.
    /// - [`SpellError::MeanAboveCap`] if any distribution's mean spell length
    ///   reaches [`MAX_SPELL_DAYS`], where draws pile up at the cap.
    pub fn new(
        data: Vec<PeriodSpells>,
        projection: Vec<PeriodSpells>,
        source: SpellSource,
    ) -> Result<Self, SpellError> {
        if data.is_empty() {
            return Err(SpellError::NoDataTables);
        }
        for (kind, tables) in [(PeriodKind::Data, &data), (PeriodKind::Projection, &projection)] {
            for (index, period) in tables.iter().enumerate() {
                if let Some((month, state, mean)) = period.first_above_cap() {
                    return Err(SpellError::MeanAboveCap {
                        kind,
                        index,
                        month,
                        state,
                        mean,
                        cap: MAX_SPELL_DAYS,
                    });
                }
            }
        }
        Ok(Self {
            data,
            projection,
            source,
        })
    }

    /// Source used for projection periods.
    pub fn source(&self) -> SpellSource {
        self.source
    }

    /// Verifies that every period the resolver can produce has a table.
    ///
    /// # Errors
    ///
    /// Returns [`SpellError::MissingPeriod`] for the first uncovered period.
    pub fn check_periods(&self, n_data: usize, n_projection: usize) -> Result<(), SpellError> {
        if n_data > self.data.len() {
            return Err(SpellError::MissingPeriod {
                kind: PeriodKind::Data,
                index: self.data.len(),
                available: self.data.len(),
            });
        }
        if self.source == SpellSource::Projected && n_projection > self.projection.len() {
            return Err(SpellError::MissingPeriod {
                kind: PeriodKind::Projection,
                index: self.projection.len(),
                available: self.projection.len(),
            });
        }
        Ok(())
    }

    /// Returns the spell distribution for `state` in `month` of `period`.
    ///
    /// # Errors
    ///
    /// - [`SpellError::MissingPeriod`] if `period` has no table.
    /// - [`SpellError::InvalidMonth`] if `month` is not in 1..=12.
    pub fn distribution(
        &self,
        period: PeriodRef,
        state: DayState,
        month: u8,
    ) -> Result<&NegBinomial, SpellError> {
        let (tables, index) = match (period.kind, self.source) {
            (PeriodKind::Data, _) => (&self.data, period.index),
            (PeriodKind::Projection, SpellSource::Projected) => (&self.projection, period.index),
            (PeriodKind::Projection, SpellSource::Historical) => (&self.data, 0),
        };
        tables
            .get(index)
            .ok_or(SpellError::MissingPeriod {
                kind: period.kind,
                index: period.index,
                available: tables.len(),
            })?
            .for_month(state, month)
    }

    /// Draws the length of a new `state` spell starting in `month` of `period`.
    ///
    /// Consumes exactly one uniform from `rng`.
    ///
    /// # Errors
    ///
    /// See [`SpellTables::distribution`].
    pub fn sample_duration<R: Rng + ?Sized>(
        &self,
        period: PeriodRef,
        state: DayState,
        month: u8,
        rng: &mut R,
    ) -> Result<u32, SpellError> {
        Ok(self.distribution(period, state, month)?.sample(rng))
    }
}
