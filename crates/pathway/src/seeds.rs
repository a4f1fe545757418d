//! Base seeds and the per-realization random streams derived from them.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use wgen_residual::{N_VARIABLES, ResidualError, SmallVec, WhiteNoise};

/// Base seeds of the four random streams.
///
/// Realization `r` seeds every stream with `base + r`, so realizations are
/// independent and any one of them can be regenerated on its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeedSet {
    standard_normal: u64,
    precipitation_depth: u64,
    wet_spell: u64,
    dry_spell: u64,
}

impl SeedSet {
    /// Creates a seed set.
    pub fn new(standard_normal: u64, precipitation_depth: u64, wet_spell: u64, dry_spell: u64) -> Self {
        Self {
            standard_normal,
            precipitation_depth,
            wet_spell,
            dry_spell,
        }
    }

    /// Seed of the noise driving the temperature residuals.
    pub fn standard_normal(&self) -> u64 {
        self.standard_normal
    }

    /// Seed of the per-unit depth probabilities.
    pub fn precipitation_depth(&self) -> u64 {
        self.precipitation_depth
    }

    /// Seed of the wet-spell duration draws.
    pub fn wet_spell(&self) -> u64 {
        self.wet_spell
    }

    /// Seed of the dry-spell duration draws.
    pub fn dry_spell(&self) -> u64 {
        self.dry_spell
    }

    /// Seeds of `realization`: every base seed plus the realization number.
    pub fn for_realization(&self, realization: u64) -> Self {
        Self {
            standard_normal: self.standard_normal.wrapping_add(realization),
            precipitation_depth: self.precipitation_depth.wrapping_add(realization),
            wet_spell: self.wet_spell.wrapping_add(realization),
            dry_spell: self.dry_spell.wrapping_add(realization),
        }
    }

    /// Seed of the single draw that picks the starting state of `realization`.
    pub fn start_state(&self, realization: u64) -> u64 {
        self.precipitation_depth
            .wrapping_add(realization)
            .wrapping_sub(1)
    }
}

impl Default for SeedSet {
    fn default() -> Self {
        Self::new(1, 2, 3, 4)
    }
}

/// Random values shared by both pathways on one day.
#[derive(Debug, Clone)]
pub struct DailyDraws {
    /// Uniform used if a wet spell starts today.
    pub wet_spell: f64,
    /// Uniform used if a dry spell starts today.
    pub dry_spell: f64,
    /// One depth probability per spatial unit.
    pub depth_probs: Vec<f64>,
    /// Residual noise vector.
    pub epsilon: SmallVec<N_VARIABLES>,
}

/// Owned random streams of one realization.
#[derive(Debug, Clone)]
pub struct RandomStreams {
    noise: WhiteNoise<N_VARIABLES>,
    depth: StdRng,
    wet: StdRng,
    dry: StdRng,
}

impl RandomStreams {
    /// Seeds the streams from already offset `seeds`.
    ///
    /// # Errors
    ///
    /// Propagates [`ResidualError`] from the noise sampler.
    pub fn new(seeds: &SeedSet, epsilon_fallback: f64) -> Result<Self, ResidualError> {
        Ok(Self {
            noise: WhiteNoise::standard(seeds.standard_normal, epsilon_fallback)?,
            depth: StdRng::seed_from_u64(seeds.precipitation_depth),
            wet: StdRng::seed_from_u64(seeds.wet_spell),
            dry: StdRng::seed_from_u64(seeds.dry_spell),
        })
    }

    /// One uniform from each spell stream, consumed before the first day.
    pub fn initial_spells(&mut self) -> (f64, f64) {
        (self.wet.random(), self.dry.random())
    }

    /// Draws today's shared values.
    pub fn draw(&mut self, n_units: usize) -> DailyDraws {
        let mut draws = DailyDraws {
            wet_spell: 0.0,
            dry_spell: 0.0,
            depth_probs: vec![0.0; n_units],
            epsilon: SmallVec::splat(0.0),
        };
        self.draw_into(&mut draws);
        draws
    }

    /// Refills `draws` in place, keeping its unit count.
    pub fn draw_into(&mut self, draws: &mut DailyDraws) {
        draws.wet_spell = self.wet.random();
        draws.dry_spell = self.dry.random();
        for p in &mut draws.depth_probs {
            *p = self.depth.random();
        }
        draws.epsilon = self.noise.draw();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn for_realization_offsets_every_seed() {
        let s = SeedSet::new(10, 20, 30, 40).for_realization(3);
        assert_eq!(
            (s.standard_normal(), s.precipitation_depth(), s.wet_spell(), s.dry_spell()),
            (13, 23, 33, 43)
        );
    }

    #[test]
    fn for_realization_wraps() {
        let s = SeedSet::new(u64::MAX, 0, 0, 0).for_realization(2);
        assert_eq!(s.standard_normal(), 1);
    }

    #[test]
    fn start_state_seed() {
        let s = SeedSet::new(0, 100, 0, 0);
        assert_eq!(s.start_state(1), 100);
        assert_eq!(s.start_state(5), 104);
        assert_eq!(SeedSet::new(0, 0, 0, 0).start_state(0), u64::MAX);
    }

    #[test]
    fn streams_are_reproducible() {
        let seeds = SeedSet::default().for_realization(1);
        let mut a = RandomStreams::new(&seeds, 0.25).unwrap();
        let mut b = RandomStreams::new(&seeds, 0.25).unwrap();
        for _ in 0..20 {
            let (da, db) = (a.draw(3), b.draw(3));
            assert_eq!(da.wet_spell, db.wet_spell);
            assert_eq!(da.depth_probs, db.depth_probs);
            assert_eq!(da.epsilon, db.epsilon);
        }
    }

    #[test]
    fn draws_are_unit_interval() {
        let mut s = RandomStreams::new(&SeedSet::default(), 0.25).unwrap();
        let mut d = s.draw(4);
        for _ in 0..100 {
            s.draw_into(&mut d);
            assert!((0.0..1.0).contains(&d.wet_spell));
            assert!((0.0..1.0).contains(&d.dry_spell));
            assert!(d.depth_probs.iter().all(|p| (0.0..1.0).contains(p)));
            assert_eq!(d.depth_probs.len(), 4);
        }
    }
}
