//! Random colors that are perceptually distinct from each other.
//!
//! Colors are drawn uniformly in HSLuv and rejected when they are
//! closer than a minimum [`delta_e`] to a color already chosen.  After
//! [`MAX_ATTEMPTS`] rejected draws the generator gives up and returns
//! black: the result is best-effort, not a guarantee.

use std::collections::hash_map::RandomState;
use std::hash::{BuildHasher, Hasher};
use std::time::{SystemTime, UNIX_EPOCH};
use rgb::RGB;
use tracing::{trace, warn};
use crate::config::{RandomColourConfig, MAX_ATTEMPTS};
use crate::{delta_e, Hsluv, RGBColor};

/// Returned when no distinct color could be found.
const FALLBACK: RGB<f64> = RGB { r: 0., g: 0., b: 0. };

/// Xorshift64* pseudo-random numbers.
#[derive(Clone, Debug)]
struct Xorshift64 {
    state: u64,
}

impl Xorshift64 {
    fn new(seed: u64) -> Self {
        Self { state: seed.max(1) }
    }

    fn next(&mut self) -> u64 {
        self.state ^= self.state >> 12;
        self.state ^= self.state << 25;
        self.state ^= self.state >> 27;
        self.state.wrapping_mul(0x2545_F491_4F6C_DD1D)
    }

    /// Uniform in \[0, 1).
    fn unit(&mut self) -> f64 {
        (self.next() >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Uniform in \[lo, hi) (or \[hi, lo) if `hi < lo`).
    fn range(&mut self, (lo, hi): (f64, f64)) -> f64 {
        lo + (hi - lo) * self.unit()
    }
}

/// Generator of mutually distinct random colors.
///
/// # Example
///
/// ```
/// use rgb::RGB8;
/// use color_scale::DistinctColours;
/// let mut picker = DistinctColours::new(42).min_difference(0.1);
/// let colors: Vec<RGB8> = picker.fill(4, Vec::new());
/// assert_eq!(colors.len(), 4);
/// ```
#[derive(Clone, Debug)]
pub struct DistinctColours {
    rng: Xorshift64,
    config: RandomColourConfig,
}

impl DistinctColours {
    /// Deterministic generator with the default
    /// [`RandomColourConfig`].
    pub fn new(seed: u64) -> Self {
        Self { rng: Xorshift64::new(seed),
               config: RandomColourConfig::default() }
    }

    /// Generator seeded from the clock and the process' hash keys.
    pub fn from_entropy() -> Self {
        let mut hasher = RandomState::new().build_hasher();
        if let Ok(d) = SystemTime::now().duration_since(UNIX_EPOCH) {
            hasher.write_u128(d.as_nanos());
        }
        Self::new(hasher.finish())
    }

    pub fn config(mut self, config: RandomColourConfig) -> Self {
        self.config = config;
        self
    }

    /// Minimum [`delta_e`] between generated colors.
    pub fn min_difference(mut self, d: f64) -> Self {
        self.config.min_difference = d;
        self
    }

    /// HSLuv saturation range (0 to 100).
    pub fn saturation(mut self, lo: f64, hi: f64) -> Self {
        self.config.saturation = (lo, hi);
        self
    }

    /// HSLuv lightness range (0 to 100).
    pub fn lightness(mut self, lo: f64, hi: f64) -> Self {
        self.config.lightness = (lo, hi);
        self
    }

    /// Try up to [`MAX_ATTEMPTS`] draws, returning the first one at
    /// least `min_difference` away from every color of `existing`.
    fn draw<C: RGBColor>(&mut self, existing: &[C]) -> Option<C> {
        let RandomColourConfig { min_difference, saturation, lightness } =
            self.config;
        for attempt in 1 ..= MAX_ATTEMPTS {
            let hsluv = Hsluv::new(360. * self.rng.unit(),
                                   self.rng.range(saturation),
                                   self.rng.range(lightness));
            let c = C::from_hsluv(hsluv);
            if existing.iter().all(|e| delta_e(e, &c) >= min_difference) {
                trace!(attempt, ?hsluv, "accepted random color");
                return Some(c);
            }
        }
        None
    }

    /// A random color distinct from all of `existing`, or black if
    /// none was found.
    pub fn next_colour<C: RGBColor>(&mut self, existing: &[C]) -> C {
        self.draw(existing).unwrap_or_else(|| {
            warn!(existing = existing.len(),
                  min_difference = self.config.min_difference,
                  "no distinct color after {MAX_ATTEMPTS} attempts, \
                   falling back to black");
            C::from_rgb(FALLBACK)
        })
    }

    /// Extend `seed` with distinct colors until it holds `count`
    /// colors.  A seed already holding `count` colors or more is
    /// returned as is.
    pub fn fill<C: RGBColor>(&mut self, count: usize, mut seed: Vec<C>)
                             -> Vec<C> {
        while seed.len() < count {
            let c = self.next_colour(&seed);
            seed.push(c);
        }
        seed
    }

    /// Replace the colors of `colours` whose lock is not set by new
    /// colors distinct from the locked ones.  Missing locks count as
    /// unlocked.
    pub fn refresh<C>(&mut self, colours: &[C], locks: &[bool]) -> Vec<C>
    where C: RGBColor + Clone {
        let locked = |i: usize| locks.get(i).copied().unwrap_or(false);
        let kept: Vec<C> = colours.iter().enumerate()
            .filter(|(i, _)| locked(*i))
            .map(|(_, c)| c.clone())
            .collect();
        let n_kept = kept.len();
        let mut fresh = self.fill(colours.len(), kept).split_off(n_kept);
        colours.iter().enumerate().map(|(i, c)| {
            if locked(i) { c.clone() }
            else { fresh.pop().unwrap_or_else(|| C::from_rgb(FALLBACK)) }
        }).collect()
    }
}

/// A random color at least `min_difference` away from every color in
/// `existing`, with HSLuv saturation and lightness in the given
/// ranges.  Falls back to black after [`MAX_ATTEMPTS`] draws.
pub fn random_distinct_colour<C: RGBColor>(existing: &[C],
                                           min_difference: f64,
                                           saturation: (f64, f64),
                                           lightness: (f64, f64)) -> C {
    DistinctColours::from_entropy()
        .min_difference(min_difference)
        .saturation(saturation.0, saturation.1)
        .lightness(lightness.0, lightness.1)
        .next_colour(existing)
}

/// `seed` extended to `count` mutually distinct colors (see
/// [`DistinctColours::fill`]).
pub fn generate_distinct_colour_set<C: RGBColor>(count: usize, seed: Vec<C>,
                                                 min_difference: f64,
                                                 saturation: (f64, f64),
                                                 lightness: (f64, f64))
                                                 -> Vec<C> {
    DistinctColours::from_entropy()
        .min_difference(min_difference)
        .saturation(saturation.0, saturation.1)
        .lightness(lightness.0, lightness.1)
        .fill(count, seed)
}
