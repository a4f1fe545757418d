//! Wet and dry spell-length model.
//!
//! Each simulated pathway alternates between wet and dry spells. When a
//! spell ends, the length of the next one is drawn from a negative-binomial
//! distribution selected by calibration period, calendar month and the state
//! being entered.
//!
//! # Pipeline
//!
//! ```text
//!  ┌──────────────┐     ┌────────────────┐     ┌──────────────────┐
//!  │ NegBinomial  │────▶│  PeriodSpells  │────▶│   SpellTables    │
//!  │  (N, P)      │     │ (12 wet/dry)   │     │ (data + proj)    │
//!  └──────────────┘     └────────────────┘     └──────────────────┘
//! ```
//!
//! # Quick start
//!
//! ```rust
//! use rand::SeedableRng;
//! use rand::rngs::StdRng;
//! use wgen_calendar::PeriodRef;
//! use wgen_spell::{DayState, NegBinomial, PeriodSpells, SpellSource, SpellTables};
//!
//! let wet = NegBinomial::new(3.0, 0.6).unwrap();
//! let dry = NegBinomial::new(2.0, 0.5).unwrap();
//! let tables = SpellTables::new(
//!     vec![PeriodSpells::uniform(wet, dry)],
//!     vec![],
//!     SpellSource::Projected,
//! )
//! .unwrap();
//!
//! let mut rng = StdRng::seed_from_u64(1);
//! let days = tables
//!     .sample_duration(PeriodRef::data(0), DayState::Wet, 7, &mut rng)
//!     .unwrap();
//! assert!(days <= wgen_spell::MAX_SPELL_DAYS);
//! ```

mod error;
mod negbin;
mod state;
mod tables;

pub use error::SpellError;
pub use negbin::{MAX_SPELL_DAYS, NegBinomial};
pub use state::DayState;
pub use tables::{PeriodSpells, SpellSource, SpellTables};
