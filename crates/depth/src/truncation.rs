//! Maximum-depth tables used to truncate the depth distributions.

use crate::error::DepthError;

/// Selects which maximum-depth table bounds a depth distribution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TruncationOption {
    /// Historical monthly maximum of the unit's climate region.
    Regional,
    /// Monthly maximum per period from downscaled climate-model output.
    ProjectedModel,
    /// Monthly maximum per period from scaled historical gridded data.
    ProjectedScaled,
    /// 100-year design-storm depth per period.
    BaselineDesignStorm,
    /// 200-year design-storm depth per period.
    AlternativeDesignStorm,
}

impl TruncationOption {
    /// Configuration code (1..=5).
    pub fn code(self) -> u8 {
        match self {
            Self::Regional => 1,
            Self::ProjectedModel => 2,
            Self::ProjectedScaled => 3,
            Self::BaselineDesignStorm => 4,
            Self::AlternativeDesignStorm => 5,
        }
    }
}

impl TryFrom<u8> for TruncationOption {
    type Error = DepthError;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        match code {
            1 => Ok(Self::Regional),
            2 => Ok(Self::ProjectedModel),
            3 => Ok(Self::ProjectedScaled),
            4 => Ok(Self::BaselineDesignStorm),
            5 => Ok(Self::AlternativeDesignStorm),
            code => Err(DepthError::UnknownTruncationCode { code }),
        }
    }
}

/// The five alternative maximum-depth tables.
///
/// Regional maxima are indexed `[region][month]` and reached through a
/// `[unit][month]` region map. The other four are indexed
/// `[period position][month]`.
///
/// # Example
///
/// ```
/// use wgen_depth::{TruncationOption, TruncationTables};
///
/// let tables = TruncationTables::new()
///     .with_regional(vec![[300.0; 12]], vec![[0; 12]])
///     .with_projected_model(vec![[320.0; 12], [340.0; 12]]);
///
/// let max = tables
///     .max_depth(TruncationOption::ProjectedModel, 0, 7, 1)
///     .unwrap();
/// assert_eq!(max, 340.0);
/// ```
#[derive(Debug, Clone, Default)]
pub struct TruncationTables {
    regional: Vec<[f64; 12]>,
    unit_regions: Vec<[usize; 12]>,
    projected_model: Vec<[f64; 12]>,
    projected_scaled: Vec<[f64; 12]>,
    baseline_design: Vec<[f64; 12]>,
    alternative_design: Vec<[f64; 12]>,
}

impl TruncationTables {
    /// Creates empty tables.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets regional maxima and the unit-to-region map (0-based regions).
    pub fn with_regional(mut self, regional: Vec<[f64; 12]>, unit_regions: Vec<[usize; 12]>) -> Self {
        self.regional = regional;
        self.unit_regions = unit_regions;
        self
    }

    /// Sets the downscaled-model maxima per period.
    pub fn with_projected_model(mut self, table: Vec<[f64; 12]>) -> Self {
        self.projected_model = table;
        self
    }

    /// Sets the scaled historical maxima per period.
    pub fn with_projected_scaled(mut self, table: Vec<[f64; 12]>) -> Self {
        self.projected_scaled = table;
        self
    }

    /// Sets the 100-year design-storm depths per period.
    pub fn with_baseline_design(mut self, table: Vec<[f64; 12]>) -> Self {
        self.baseline_design = table;
        self
    }

    /// Sets the 200-year design-storm depths per period.
    pub fn with_alternative_design(mut self, table: Vec<[f64; 12]>) -> Self {
        self.alternative_design = table;
        self
    }

    /// Region of `unit` in `month`.
    ///
    /// # Errors
    ///
    /// Returns [`DepthError::UnmappedUnit`] or [`DepthError::InvalidMonth`].
    pub fn region_of(&self, unit: usize, month: u8) -> Result<usize, DepthError> {
        let m = month_index(month)?;
        self.unit_regions
            .get(unit)
            .map(|months| months[m])
            .ok_or(DepthError::UnmappedUnit {
                unit,
                available: self.unit_regions.len(),
            })
    }

    /// Truncation maximum for `unit` in `month` at `period_index`.
    ///
    /// # Errors
    ///
    /// - [`DepthError::InvalidMonth`] if `month` is not in 1..=12.
    /// - [`DepthError::UnmappedUnit`] if a regional lookup has no mapping.
    /// - [`DepthError::MissingTruncation`] if the table has no such row.
    pub fn max_depth(
        &self,
        option: TruncationOption,
        unit: usize,
        month: u8,
        period_index: usize,
    ) -> Result<f64, DepthError> {
        let m = month_index(month)?;
        let (table, row) = match option {
            TruncationOption::Regional => (&self.regional, self.region_of(unit, month)?),
            TruncationOption::ProjectedModel => (&self.projected_model, period_index),
            TruncationOption::ProjectedScaled => (&self.projected_scaled, period_index),
            TruncationOption::BaselineDesignStorm => (&self.baseline_design, period_index),
            TruncationOption::AlternativeDesignStorm => (&self.alternative_design, period_index),
        };
        table
            .get(row)
            .map(|months| months[m])
            .ok_or(DepthError::MissingTruncation {
                option,
                index: row,
                available: table.len(),
            })
    }
}

fn month_index(month: u8) -> Result<usize, DepthError> {
    if !(1..=12).contains(&month) {
        return Err(DepthError::InvalidMonth { month });
    }
    Ok((month - 1) as usize)
}
