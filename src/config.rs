//! Configuration constants and parameter bundles.

use serde::{Deserialize, Serialize};

/// Minimum number of colors of a sequential scale.
pub const MIN_SEQUENTIAL_LEN: usize = 2;

/// Minimum number of colors of a diverging scale.
pub const MIN_DIVERGING_LEN: usize = 5;

/// Default number of classes of a scale.
pub const DEFAULT_SCALE_LEN: usize = 5;

/// [`delta_e`](crate::delta_e) below which two scale colors conflict.
pub const CONFLICT_TOLERANCE: f64 = 0.05;

/// Samples generated per pair of adjacent colors when looking for
/// conflicts.
pub const INTERPOLATION_STEPS: usize = 5;

/// Draws attempted by the random generator before giving up.
pub const MAX_ATTEMPTS: usize = 100;

/// Size of the random color set offered to pick anchors from.
pub const NUM_RANDOM_COLOURS: usize = 5;

/// Hue shifts producing pleasant scales.
pub const RECOMMENDED_HUE_SHIFT: (f64, f64) = (-0.2, 0.2);

/// Saturation shifts producing pleasant scales.
pub const RECOMMENDED_SAT_SHIFT: (f64, f64) = (0., 1.);

/// Lightness shifts producing pleasant scales.
pub const RECOMMENDED_LGT_SHIFT: (f64, f64) = (0.7, 1.);

/// How a scale bends away from its anchor color towards the light end.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Shaping {
    /// Hue rotation at the light end, as a fraction of 360° in
    /// \[-1, 1\].
    pub hue_shift: f64,
    /// Fraction of the saturation removed at the light end, in
    /// \[0, 1\].
    pub saturation_shift: f64,
    /// Fraction of the remaining headroom to lightness 100 reached at
    /// the light end, in \[0, 1\].
    pub lightness_shift: f64,
}

impl Default for Shaping {
    fn default() -> Self {
        Self { hue_shift: 0., saturation_shift: 0., lightness_shift: 1. }
    }
}

impl Shaping {
    /// Clamp every shift to its range.  NaN shifts take their default.
    pub fn clamped(&self) -> Self {
        let d = Self::default();
        let clamp = |x: f64, default: f64, lo: f64, hi: f64| {
            if x.is_nan() { default } else { x.clamp(lo, hi) }
        };
        Self {
            hue_shift: clamp(self.hue_shift, d.hue_shift, -1., 1.),
            saturation_shift: clamp(self.saturation_shift,
                                    d.saturation_shift, 0., 1.),
            lightness_shift: clamp(self.lightness_shift,
                                   d.lightness_shift, 0., 1.),
        }
    }

    /// Whether every shift lies in its recommended range.
    pub fn is_recommended(&self) -> bool {
        let within = |x: f64, (lo, hi): (f64, f64)| lo <= x && x <= hi;
        within(self.hue_shift, RECOMMENDED_HUE_SHIFT)
            && within(self.saturation_shift, RECOMMENDED_SAT_SHIFT)
            && within(self.lightness_shift, RECOMMENDED_LGT_SHIFT)
    }
}

/// Parameters of the random distinct color generator.
///
/// Ranges are in HSLuv units (0 to 100).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RandomColourConfig {
    /// Minimum [`delta_e`](crate::delta_e) to every other color.
    pub min_difference: f64,
    pub saturation: (f64, f64),
    pub lightness: (f64, f64),
}

impl Default for RandomColourConfig {
    fn default() -> Self {
        Self { min_difference: 0.2, saturation: (60., 100.),
               lightness: (30., 70.) }
    }
}
