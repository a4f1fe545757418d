//! Dual-pathway day-state simulator and realization driver.
//!
//! Two pathways are simulated side by side. H0 always runs on data-period
//! calibration; H1 switches to projection calibration inside projection
//! periods. Every day both pathways consume the same random draws, so any
//! difference between them is caused by calibration alone.
//!
//! # Pipeline
//!
//! ```text
//!  ┌──────────────┐   ┌───────────────┐   ┌──────────────────┐   ┌───────────────────┐
//!  │   SeedSet    │──▶│ RandomStreams │──▶│  PathwayState    │──▶│ RealizationOutput │
//!  │ (+ r)        │   │ (DailyDraws)  │   │  (H0, H1)        │   │ (columnar)        │
//!  └──────────────┘   └───────────────┘   └──────────────────┘   └───────────────────┘
//!                                                 ▲
//!                                        ┌────────┴────────┐
//!                                        │   Calibration   │
//!                                        │ (shared, &)     │
//!                                        └─────────────────┘
//! ```
//!
//! Per day and pathway: flip the spell when its counter is exhausted, draw
//! depths on wet days, advance the residual recursion, back-transform the
//! temperatures, decrement the counter and roll the residual buffers.
//!
//! Realizations are independent and run in parallel with
//! [`simulate_ensemble`].

mod calibration;
mod error;
mod output;
mod seeds;
mod simulate;
mod state;

pub use calibration::{Calibration, RunSettings};
pub use error::PathwayError;
pub use output::{DayRecord, PathwaySeries, RealizationOutput};
pub use seeds::{DailyDraws, RandomStreams, SeedSet};
pub use simulate::{simulate_ensemble, simulate_realization};
pub use state::{DayValues, Pathway, PathwayState};
