//! Perceptual color difference.
//!
//! A CIE94-like formula over CIE L*a*b* (graphic arts weights
//! `k_L = k_C = k_H = 1`), scaled so that typical distances fall in
//! \[0, 1\].  Opposite extremes of the gamut can exceed 1 slightly.

use crate::lab::Lab;
use crate::RGBColor;

/// Perceptual distance between `a` and `b`, roughly in \[0, 1\].
///
/// The chroma and hue weights `1 + 0.045·C₁` and `1 + 0.015·C₁` use
/// the chroma of `a`, so the function is not symmetric: keep the
/// argument order consistent when comparing distances, or use
/// [`delta_e_symmetric`].
///
/// # Example
///
/// ```
/// use rgb::RGB8;
/// use color_scale::delta_e;
/// let red = RGB8::new(255, 0, 0);
/// assert_eq!(delta_e(&red, &red), 0.);
/// assert!(delta_e(&red, &RGB8::new(0, 0, 255)) > 0.5);
/// ```
pub fn delta_e<A, B>(a: &A, b: &B) -> f64
where A: RGBColor, B: RGBColor {
    let lab1 = Lab::from_rgb(a.to_rgb());
    let lab2 = Lab::from_rgb(b.to_rgb());
    let dl = lab1.l - lab2.l;
    let c1 = lab1.chroma();
    let c2 = lab2.chroma();
    let dc = c1 - c2;
    let da = lab1.a - lab2.a;
    let db = lab1.b - lab2.b;
    // Rounding can make ΔH² slightly negative for equal hues.
    let dh = (da * da + db * db - dc * dc).max(0.).sqrt();
    let sc = 1. + 0.045 * c1;
    let sh = 1. + 0.015 * c1;
    let dist = dl * dl + (dc / sc).powi(2) + (dh / sh).powi(2);
    dist.max(0.).sqrt() / 100.
}

/// Mean of [`delta_e`] taken in both argument orders.
pub fn delta_e_symmetric<A, B>(a: &A, b: &B) -> f64
where A: RGBColor, B: RGBColor {
    0.5 * (delta_e(a, b) + delta_e(b, a))
}


#[cfg(test)]
mod tests {
    use super::*;
    use rgb::RGB8;

    const COLORS: [RGB8; 6] = [
        RGB8 { r: 0, g: 0, b: 0 }, RGB8 { r: 255, g: 255, b: 255 },
        RGB8 { r: 255, g: 0, b: 0 }, RGB8 { r: 20, g: 180, b: 90 },
        RGB8 { r: 60, g: 60, b: 200 }, RGB8 { r: 250, g: 240, b: 10 },
    ];

    #[test]
    fn identical_colors() {
        for c in &COLORS {
            assert_eq!(delta_e(c, c), 0.);
        }
    }

    #[test]
    fn non_negative_and_bounded() {
        for a in &COLORS {
            for b in &COLORS {
                let d = delta_e(a, b);
                assert!(d >= 0. && d < 1.5, "{a:?} {b:?}: {d}");
            }
        }
    }

    #[test]
    fn black_white() {
        let d = delta_e(&COLORS[0], &COLORS[1]);
        assert!((d - 1.).abs() < 1e-3, "{d}");
    }

    #[test]
    fn asymmetric_weighting() {
        let red = COLORS[2];
        let white = COLORS[1];
        assert!(delta_e(&white, &red) > delta_e(&red, &white));
        let s = delta_e_symmetric(&red, &white);
        assert_eq!(s, delta_e_symmetric(&white, &red));
    }
}
