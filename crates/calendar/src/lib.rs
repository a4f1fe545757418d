//! # wgen-calendar
//!
//! Gregorian day-of-year arithmetic and calibration period resolution.
//!
//! Every simulated day is mapped to a calendar month, a day of year and a
//! calibration period. Periods come in two kinds: *data* periods, calibrated
//! against the historical record, and *projection* periods, calibrated against
//! future climate. Dates outside every configured period clamp to the nearest
//! boundary period.
//!
//! ## Architecture
//!
//! ```mermaid
//! graph LR
//!     A["NaiveDate"] -->|"Doy::from_date()"| B["Doy (1..=366)"]
//!     A -->|"date_sequence()"| C["Vec of NaiveDate"]
//!     D["DateInterval"] -->|"PeriodResolver::new()"| E["PeriodResolver"]
//!     E -->|".resolve_data_period()"| F["data index"]
//!     E -->|".resolve_pathway_period()"| G["PeriodRef"]
//! ```
//!
//! ## Quick Start
//!
//! ```
//! use chrono::NaiveDate;
//! use wgen_calendar::{DateInterval, PeriodKind, PeriodResolver};
//!
//! let d = |y, m, dd| NaiveDate::from_ymd_opt(y, m, dd).unwrap();
//! let data = vec![DateInterval::from_inclusive(d(1980, 1, 1), d(2010, 12, 31)).unwrap()];
//! let projection = vec![DateInterval::from_inclusive(d(2011, 1, 1), d(2040, 12, 31)).unwrap()];
//! let resolver = PeriodResolver::new(data, projection).unwrap();
//!
//! let period = resolver.resolve_pathway_period(d(2025, 7, 1));
//! assert_eq!(period.kind, PeriodKind::Projection);
//! assert_eq!(resolver.resolve_data_period(d(2025, 7, 1)), 0);
//! ```
//!
//! ## Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | `doy` | Day-of-year newtype |
//! | `sequence` | Inclusive daily date sequences |
//! | `period` | Date intervals and the period resolver |
//! | `error` | Error types |

mod doy;
mod error;
mod period;
mod sequence;

pub use doy::Doy;
pub use error::CalendarError;
pub use period::{DateInterval, PeriodKind, PeriodRef, PeriodResolver};
pub use sequence::{date_sequence, n_days_inclusive};
