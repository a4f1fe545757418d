//! Per-pathway day-state machine.

use chrono::{Datelike, NaiveDate};
use wgen_calendar::Doy;
use wgen_residual::{N_VARIABLES, ResidualState, TMAX, TMIN};
use wgen_spell::DayState;

use crate::calibration::Calibration;
use crate::error::PathwayError;
use crate::seeds::DailyDraws;

/// The two simulated pathways of the paired design.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Pathway {
    /// Baseline: data-period calibration throughout.
    H0,
    /// Alternative: projection calibration inside projection periods.
    H1,
}

impl Pathway {
    /// Both pathways, H0 first.
    pub const ALL: [Pathway; 2] = [Self::H0, Self::H1];

    /// 0 for H0, 1 for H1.
    pub fn as_index(self) -> usize {
        self as usize
    }

    /// Short label used in logs and summaries.
    pub fn label(self) -> &'static str {
        match self {
            Self::H0 => "H0",
            Self::H1 => "H1",
        }
    }
}

/// Values one pathway produces on one day, apart from the per-unit depths.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DayValues {
    /// Day state after any spell transition.
    pub state: DayState,
    /// Maximum temperature.
    pub tmax: f64,
    /// Minimum temperature.
    pub tmin: f64,
}

/// Mutable state one pathway carries from day to day.
#[derive(Debug, Clone, PartialEq)]
pub struct PathwayState {
    state: DayState,
    remaining: i64,
    residual: ResidualState<N_VARIABLES>,
}

impl PathwayState {
    /// Starts in `state` with `duration` days left in the current spell.
    pub fn new(state: DayState, duration: u32, initial_chi: f64) -> Self {
        Self {
            state,
            remaining: i64::from(duration),
            residual: ResidualState::new(initial_chi),
        }
    }

    /// Current day state.
    pub fn state(&self) -> DayState {
        self.state
    }

    /// Days left in the current spell; zero or below flips on the next day.
    pub fn remaining(&self) -> i64 {
        self.remaining
    }

    /// Residual buffers.
    pub fn residual(&self) -> &ResidualState<N_VARIABLES> {
        &self.residual
    }

    /// Advances this pathway by one day.
    ///
    /// Order: spell transition, depths, Chi, temperatures, counter, buffers.
    /// `depths` receives one value per spatial unit and is all zero on a dry
    /// day.
    ///
    /// # Errors
    ///
    /// Propagates table lookup failures; a validated [`Calibration`] covers
    /// every period, so these indicate a bad month or unit count.
    pub fn step(
        &mut self,
        calibration: &Calibration,
        pathway: Pathway,
        date: NaiveDate,
        draws: &DailyDraws,
        depths: &mut [f64],
    ) -> Result<DayValues, PathwayError> {
        let month = date.month() as u8;
        let period = calibration.period(pathway, date);

        if self.remaining <= 0 {
            self.state = self.state.flip();
            let u = match self.state {
                DayState::Wet => draws.wet_spell,
                DayState::Dry => draws.dry_spell,
            };
            self.remaining = i64::from(calibration.spell(period, self.state, month)?.quantile(u));
        }

        if self.state.is_wet() {
            let (family, index) = calibration.depth_source(pathway, date);
            calibration
                .depths()
                .sample_units_into(family, index, month, &draws.depth_probs, depths)?;
        } else {
            depths.fill(0.0);
        }

        let residual = calibration.residual_period(period)?;
        self.residual
            .advance(residual.matrices(), &draws.epsilon, calibration.residual_settings());
        let temps = residual
            .seasonal()
            .back_transform(self.state, Doy::from_date(date), self.residual.chi());

        self.remaining -= 1;
        self.residual.roll();

        Ok(DayValues {
            state: self.state,
            tmax: temps.data[TMAX],
            tmin: temps.data[TMIN],
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pathway_indices() {
        assert_eq!(Pathway::H0.as_index(), 0);
        assert_eq!(Pathway::H1.as_index(), 1);
        assert_eq!(Pathway::ALL.map(Pathway::label), ["H0", "H1"]);
    }

    #[test]
    fn new_state_counts_down_from_duration() {
        let s = PathwayState::new(DayState::Wet, 3, 1.0);
        assert_eq!(s.state(), DayState::Wet);
        assert_eq!(s.remaining(), 3);
        assert_eq!(s.residual().chi().data, [1.0, 1.0]);
    }
}
