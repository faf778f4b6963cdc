//! Detection of scale colors that are too close to tell apart.
//!
//! Two adjacent colors of a scale may both be far from a color on the
//! other half while a color *between* them is not.  The halves of a
//! diverging scale are therefore densely interpolated before every
//! color of one half is compared with every color of the other half.
//! Colors on the same half are expected to be close and are never
//! compared.

use serde::Serialize;
use tracing::trace;
use crate::config::INTERPOLATION_STEPS;
use crate::scale::{correct_diverging_lightness, darker_side};
use crate::{delta_e, simulate_scale, ColorRange, Deficiency, RGBColor, Scale};

/// The matrix of [`delta_e`] from every color of `a` (rows) to every
/// color of `b` (columns).  Entries involving a missing color are
/// `None`.
pub fn colour_difference_matrix<A, B>(a: &[Option<A>], b: &[Option<B>])
                                      -> Vec<Vec<Option<f64>>>
where A: RGBColor, B: RGBColor {
    a.iter().map(|ca| {
        b.iter().map(|cb| match (ca, cb) {
            (Some(ca), Some(cb)) => Some(delta_e(ca, cb)),
            _ => None,
        }).collect()
    }).collect()
}

/// Insert `steps - 1` colors between consecutive colors of `half`,
/// along their Lch gradient.  Pairs with a missing color give missing
/// colors.
fn interpolate<C>(half: &[Option<C>], steps: usize) -> Scale<C>
where C: RGBColor + Clone {
    let mut out = Vec::with_capacity(half.len().saturating_sub(1) * steps + 1);
    for pair in half.windows(2) {
        match (&pair[0], &pair[1]) {
            (Some(c0), Some(c1)) => {
                out.push(Some(c0.clone()));
                out.extend(c0.gradient(c1).range(0., 1., steps + 1)
                           .skip(1).take(steps - 1)
                           .map(|(_, c)| Some(c)));
            }
            (c0, _) => {
                out.push(c0.clone());
                out.extend((1 .. steps).map(|_| None));
            }
        }
    }
    if let Some(last) = half.last() {
        out.push(last.clone());
    }
    out
}

/// Conflicts of a diverging scale, interpolating with
/// [`INTERPOLATION_STEPS`].  See [`diverging_conflicts_with_steps`].
pub fn diverging_conflicts<C>(scale: &[Option<C>], tolerance: f64) -> Vec<bool>
where C: RGBColor + Clone {
    diverging_conflicts_with_steps(scale, tolerance, INTERPOLATION_STEPS)
}

/// Flag the colors of the interpolated diverging `scale` that are
/// less than `tolerance` away from a color on the other half.
///
/// Each half of ⌊len/2⌋ colors is expanded to `(h - 1)·steps + 1`
/// colors.  The result has one flag per expanded color, the halves
/// being separated by the midpoint of odd scales which is never
/// compared and never flagged.  Use [`anchor_conflicts`] to get one
/// flag per color of `scale`.
pub fn diverging_conflicts_with_steps<C>(scale: &[Option<C>], tolerance: f64,
                                         steps: usize) -> Vec<bool>
where C: RGBColor + Clone {
    let steps = steps.max(1);
    let len = scale.len();
    let half = len / 2;
    let left = interpolate(&scale[.. half], steps);
    let right = interpolate(&scale[len - half ..], steps);
    let offset = left.len() + len % 2;
    let mut flags = vec![false; offset + right.len()];
    let matrix = colour_difference_matrix(&left, &right);
    for (i, row) in matrix.iter().enumerate() {
        for (j, d) in row.iter().enumerate() {
            if matches!(d, Some(d) if *d < tolerance) {
                flags[i] = true;
                flags[offset + j] = true;
            }
        }
    }
    trace!(len, steps, tolerance,
           conflicts = flags.iter().filter(|&&f| f).count(),
           "diverging conflicts");
    flags
}

/// Map the flags returned by [`diverging_conflicts_with_steps`] back
/// to the `len` colors of the uninterpolated scale.
pub fn anchor_conflicts(flags: &[bool], len: usize, steps: usize) -> Vec<bool> {
    let steps = steps.max(1);
    let half = len / 2;
    let left_len = if half == 0 { 0 } else { (half - 1) * steps + 1 };
    let offset = left_len + len % 2;
    let flag = |k: usize| flags.get(k).copied().unwrap_or(false);
    (0 .. len).map(|p| {
        if p < half { flag(p * steps) }
        else if p < len - half { flag(left_len) }
        else { flag(offset + (p - (len - half)) * steps) }
    }).collect()
}

/// For every deficiency, whether simulating it creates conflicts
/// that the scale does not have with normal vision.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct DeficiencyConflicts {
    pub protanopia: bool,
    pub deuteranopia: bool,
    pub tritanopia: bool,
    pub achromatopsia: bool,
}

impl DeficiencyConflicts {
    pub fn get(&self, d: Deficiency) -> bool {
        match d {
            Deficiency::Protanopia => self.protanopia,
            Deficiency::Deuteranopia => self.deuteranopia,
            Deficiency::Tritanopia => self.tritanopia,
            Deficiency::Achromatopsia => self.achromatopsia,
        }
    }

    fn set(&mut self, d: Deficiency, value: bool) {
        match d {
            Deficiency::Protanopia => self.protanopia = value,
            Deficiency::Deuteranopia => self.deuteranopia = value,
            Deficiency::Tritanopia => self.tritanopia = value,
            Deficiency::Achromatopsia => self.achromatopsia = value,
        }
    }

    /// Whether any deficiency creates conflicts.
    pub fn any(&self) -> bool {
        Deficiency::ALL.iter().any(|&d| self.get(d))
    }
}

/// Conflicts that only appear under a color vision deficiency.
///
/// The scale is first corrected to the lightness of its darker half
/// (the widest lightness range), which reveals similarities the raw
/// scale hides.  Returns `None` if an end of `scale` is missing.
pub fn deficiency_conflicts<C>(scale: &[Option<C>], tolerance: f64)
                               -> Option<DeficiencyConflicts>
where C: RGBColor + Clone {
    let side = darker_side(scale)?;
    let corrected = correct_diverging_lightness(scale, side);
    let normal = diverging_conflicts(&corrected, tolerance);
    let mut report = DeficiencyConflicts::default();
    for d in Deficiency::ALL {
        let simulated = simulate_scale(&corrected, Some(d));
        let new = diverging_conflicts(&simulated, tolerance).iter()
            .zip(&normal)
            .any(|(&c, &n)| c && !n);
        report.set(d, new);
    }
    Some(report)
}


#[cfg(test)]
mod tests {
    use super::*;
    use rgb::RGB8;
    use pretty_assertions::assert_eq;
    use crate::{diverging_scale, Shaping};

    const BLUE: RGB8 = RGB8 { r: 30, g: 60, b: 200 };

    fn twin(len: usize) -> Scale<RGB8> {
        diverging_scale(Some(&BLUE), Some(&BLUE), len, &Shaping::default())
            .unwrap()
    }

    #[test]
    fn matrix_with_gaps() {
        let a = [Some(BLUE), None];
        let b = [None, Some(BLUE), Some(RGB8::new(255, 255, 255))];
        let m = colour_difference_matrix(&a, &b);
        assert_eq!(m.len(), 2);
        assert_eq!(m[0][0], None);
        assert_eq!(m[0][1], Some(0.));
        assert!(m[0][2].unwrap() > 0.5);
        assert_eq!(m[1], vec![None, None, None]);
    }

    #[test]
    fn interpolation_length() {
        let half = [Some(BLUE), Some(RGB8::new(200, 200, 255)),
                    Some(RGB8::new(250, 250, 255))];
        let out = interpolate(&half, 5);
        assert_eq!(out.len(), 11);
        assert_eq!(out[0], half[0]);
        assert_eq!(out[5], half[1]);
        assert_eq!(out[10], half[2]);
        let gaps = interpolate::<RGB8>(&[None, None, None], 4);
        assert_eq!(gaps, vec![None; 9]);
    }

    #[test]
    fn zero_tolerance_never_conflicts() {
        let flags = diverging_conflicts(&twin(7), 0.);
        assert_eq!(flags.len(), 2 * (2 * 5 + 1) + 1);
        assert!(flags.iter().all(|f| !f));
    }

    #[test]
    fn identical_halves_conflict_everywhere() {
        let flags = diverging_conflicts(&twin(7), 1.);
        let mid = flags.len() / 2;
        for (i, f) in flags.iter().enumerate() {
            assert_eq!(*f, i != mid, "position {i}");
        }
        let flags = diverging_conflicts(&twin(6), 1.);
        assert_eq!(flags.len(), 22);
        assert!(flags.iter().all(|&f| f));
    }

    #[test]
    fn missing_half_has_no_conflicts() {
        let scale = diverging_scale(Some(&BLUE), None, 5, &Shaping::default())
            .unwrap();
        assert!(diverging_conflicts(&scale, 1.).iter().all(|f| !f));
        assert_eq!(deficiency_conflicts(&scale, 1.), None);
    }

    #[test]
    fn back_to_anchors() {
        let flags = diverging_conflicts(&twin(7), 1.);
        assert_eq!(anchor_conflicts(&flags, 7, INTERPOLATION_STEPS),
                   vec![true, true, true, false, true, true, true]);
        let flags = diverging_conflicts_with_steps(&twin(6), 0., 3);
        assert_eq!(flags.len(), 2 * (2 * 3 + 1));
        assert_eq!(anchor_conflicts(&flags, 6, 3), vec![false; 6]);
    }

    #[test]
    fn single_step_compares_anchors_only() {
        let flags = diverging_conflicts_with_steps(&twin(5), 1., 1);
        assert_eq!(flags, vec![true, true, false, true, true]);
    }

    #[test]
    fn deficiency_report_of_identical_halves() {
        // Everything already conflicts: nothing new under simulation.
        let report = deficiency_conflicts(&twin(7), 1.).unwrap();
        assert!(!report.any());
        assert_eq!(report, DeficiencyConflicts::default());
    }
}
