//! Cross-correlated temperature residuals.
//!
//! Daily temperatures are produced from standardised anomalies ("Chi") that
//! follow a first-order vector autoregression driven by white noise:
//!
//! ```text
//! Chi_t = Chi_{t-1} · A + Epsilon_t · B
//! T_k   = mean_k(doy, state) + Chi_t[k] · std_k(doy, state)
//! ```
//!
//! `A` carries lag-1 persistence, `B` loads the innovations and couples the
//! variables. Both are fixed per calibration period. Degenerate values never
//! abort a run: non-finite noise, anomalies and temperatures fall back to
//! configured neutral values.
//!
//! # Pipeline
//!
//! ```text
//!  ┌─────────────┐   ┌──────────────────┐   ┌────────────────┐
//!  │ WhiteNoise  │──▶│  ResidualState   │──▶│ SeasonalTable  │
//!  │ (Epsilon)   │   │  (VAR(1), Chi)   │   │ (mean + Chi·σ) │
//!  └─────────────┘   └──────────────────┘   └────────────────┘
//! ```
//!
//! # Quick start
//!
//! ```rust
//! use wgen_residual::{ResidualSettings, ResidualState, SmallMat, SmallVec, VarMatrices};
//!
//! let matrices = VarMatrices::new(
//!     SmallMat::from_rows([[0.6, 0.1], [0.1, 0.6]]),
//!     SmallMat::from_rows([[0.7, 0.0], [0.3, 0.6]]),
//! )
//! .unwrap();
//! let settings = ResidualSettings::new();
//! let mut state = ResidualState::<2>::new(settings.initial_chi());
//!
//! state.advance(&matrices, &SmallVec::new([0.5, -0.2]), &settings);
//! assert!(state.chi().data.iter().all(|c| c.abs() <= settings.stability_bound()));
//! state.roll();
//! ```

mod config;
mod error;
mod model;
mod noise;
mod seasonal;
mod small_linalg;
mod var;

pub use config::ResidualSettings;
pub use error::ResidualError;
pub use model::{ResidualModel, ResidualPeriod};
pub use noise::{NormalParams, WhiteNoise};
pub use seasonal::{SeasonalSeries, SeasonalTable};
pub use small_linalg::{SmallMat, SmallVec};
pub use var::{ResidualState, VarMatrices};

/// Number of temperature variables.
pub const N_VARIABLES: usize = 2;

/// Index of daily maximum temperature in Chi.
pub const TMAX: usize = 0;

/// Index of daily minimum temperature in Chi.
pub const TMIN: usize = 1;
