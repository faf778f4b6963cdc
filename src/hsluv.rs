//! Conversions between sRGB and [HSLuv](https://www.hsluv.org/).
//!
//! HSLuv is CIE LCh(uv) with the chroma rescaled, for every lightness
//! and hue, to the largest value that stays inside the sRGB gamut.
//! Saturation 100 therefore always reaches the gamut boundary.

use rgb::RGB;
use crate::lab::{linear_to_srgb, srgb_to_linear};
use crate::RGBColor;

/// XYZ (D65) to linear sRGB.
const M: [[f64; 3]; 3] = [
    [3.240969941904521, -1.537383177570093, -0.498610760293],
    [-0.96924363628087, 1.87596750150772, 0.041555057407175],
    [0.055630079696993, -0.20397695888897, 1.056971514242878],
];

/// Linear sRGB to XYZ (D65).
const M_INV: [[f64; 3]; 3] = [
    [0.41239079926595, 0.35758433938387, 0.18048078840183],
    [0.21263900587151, 0.71516867876775, 0.072192315360733],
    [0.019330818715591, 0.11919477979462, 0.95053215224966],
];

const REF_U: f64 = 0.19783000664283;
const REF_V: f64 = 0.46831999493879;
const KAPPA: f64 = 903.2962962;
const EPSILON: f64 = 0.0088564516;

/// A color in the HSLuv space.
///
/// `h` is in degrees and always in \[0, 360), `s` and `l` are in
/// \[0, 100\].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Hsluv {
    pub h: f64,
    pub s: f64,
    pub l: f64,
}

impl Hsluv {
    /// Create a color, reducing the hue modulo 360.
    pub fn new(h: f64, s: f64, l: f64) -> Self {
        Hsluv { h: normalize_hue(h), s, l }
    }

    /// Same color with lightness `l`.
    pub fn with_lightness(self, l: f64) -> Self { Hsluv { l, ..self } }
}

/// Reduce `h` to \[0, 360).  Non-finite hues become 0.
#[inline]
fn normalize_hue(h: f64) -> f64 {
    let h = h.rem_euclid(360.);
    // `rem_euclid` may round up to 360 for tiny negative values.
    if h.is_finite() && h < 360. { h } else { 0. }
}

#[inline]
fn dot(m: &[f64; 3], v: [f64; 3]) -> f64 {
    m[0] * v[0] + m[1] * v[1] + m[2] * v[2]
}

/// Lines `(slope, intercept)` bounding the sRGB gamut in the (u, v)
/// chroma plane at lightness `l`.
fn bounds(l: f64) -> [(f64, f64); 6] {
    let sub1 = (l + 16.).powi(3) / 1_560_896.;
    let sub2 = if sub1 > EPSILON { sub1 } else { l / KAPPA };
    let mut lines = [(0., 0.); 6];
    for (c, m) in M.iter().enumerate() {
        let [m1, m2, m3] = *m;
        for t in 0 .. 2 {
            let t = t as f64;
            let top1 = (284_517. * m1 - 94_839. * m3) * sub2;
            let top2 = (838_422. * m3 + 769_860. * m2 + 731_718. * m1) * l
                * sub2 - 769_860. * t * l;
            let bottom = (632_260. * m3 - 126_452. * m2) * sub2 + 126_452. * t;
            lines[2 * c + t as usize] = (top1 / bottom, top2 / bottom);
        }
    }
    lines
}

/// Largest in-gamut chroma for lightness `l` and hue `h` (degrees).
fn max_chroma(l: f64, h: f64) -> f64 {
    let hrad = h.to_radians();
    let (sin, cos) = hrad.sin_cos();
    bounds(l).iter()
        .map(|&(slope, intercept)| intercept / (sin - slope * cos))
        .filter(|len| *len >= 0.)
        .fold(f64::INFINITY, f64::min)
}

fn y_to_l(y: f64) -> f64 {
    if y <= EPSILON { y * KAPPA } else { 116. * y.cbrt() - 16. }
}

fn l_to_y(l: f64) -> f64 {
    if l <= 8. { l / KAPPA } else { ((l + 16.) / 116.).powi(3) }
}

/// Linear pipeline sRGB → XYZ → Luv → LCh(uv), returning `(l, c, h)`.
fn rgb_to_lch(c: RGB<f64>) -> (f64, f64, f64) {
    let lin = [srgb_to_linear(c.r / 255.), srgb_to_linear(c.g / 255.),
               srgb_to_linear(c.b / 255.)];
    let x = dot(&M_INV[0], lin);
    let y = dot(&M_INV[1], lin);
    let z = dot(&M_INV[2], lin);
    let l = y_to_l(y);
    let divider = x + 15. * y + 3. * z;
    if l == 0. || divider == 0. { return (0., 0., 0.) }
    let u = 13. * l * (4. * x / divider - REF_U);
    let v = 13. * l * (9. * y / divider - REF_V);
    let chroma = u.hypot(v);
    let h = if chroma < 1e-8 { 0. } else { normalize_hue(v.atan2(u).to_degrees()) };
    (l, chroma, h)
}

fn lch_to_rgb(l: f64, chroma: f64, h: f64) -> RGB<f64> {
    let (x, y, z) = if l == 0. {
        (0., 0., 0.)
    } else {
        let (sin, cos) = h.to_radians().sin_cos();
        let var_u = chroma * cos / (13. * l) + REF_U;
        let var_v = chroma * sin / (13. * l) + REF_V;
        let y = l_to_y(l);
        let x = -(9. * y * var_u) / ((var_u - 4.) * var_v - var_u * var_v);
        let z = (9. * y - 15. * var_v * y - var_v * x) / (3. * var_v);
        (x, y, z)
    };
    let xyz = [x, y, z];
    RGB { r: 255. * linear_to_srgb(dot(&M[0], xyz)),
          g: 255. * linear_to_srgb(dot(&M[1], xyz)),
          b: 255. * linear_to_srgb(dot(&M[2], xyz)) }
}

/// Convert a color to HSLuv.
pub fn rgb_to_hsluv<C: RGBColor>(c: &C) -> Hsluv {
    let (l, chroma, h) = rgb_to_lch(c.to_rgb());
    if l > 99.999_999_9 { return Hsluv { h, s: 0., l: 100. } }
    if l < 1e-8 { return Hsluv { h, s: 0., l: 0. } }
    Hsluv { h, s: chroma / max_chroma(l, h) * 100., l }
}

/// Convert an HSLuv color to RGB.  The result is not clipped to the
/// sRGB gamut (it can only leave it when `s` or `l` are outside
/// \[0, 100\]).
pub fn hsluv_to_rgb<C: RGBColor>(c: Hsluv) -> C {
    let h = normalize_hue(c.h);
    let rgb = if c.l > 99.999_999_9 {
        lch_to_rgb(100., 0., h)
    } else if c.l < 1e-8 {
        lch_to_rgb(0., 0., h)
    } else {
        lch_to_rgb(c.l, max_chroma(c.l, h) / 100. * c.s, h)
    };
    C::from_rgb(rgb)
}


#[cfg(test)]
mod tests {
    use super::*;
    use rgb::RGB8;

    fn close(a: f64, b: f64, eps: f64) -> bool { (a - b).abs() <= eps }

    #[test]
    fn reference_values() {
        let red = rgb_to_hsluv(&RGB8::new(255, 0, 0));
        assert!(close(red.h, 12.177, 1e-3), "{red:?}");
        assert!(close(red.s, 100., 1e-6), "{red:?}");
        assert!(close(red.l, 53.237, 1e-3), "{red:?}");
        let white = rgb_to_hsluv(&RGB8::new(255, 255, 255));
        assert!(close(white.l, 100., 1e-6) && close(white.s, 0., 1e-6));
        let black = rgb_to_hsluv(&RGB8::new(0, 0, 0));
        assert_eq!(black, Hsluv { h: 0., s: 0., l: 0. });
    }

    #[test]
    fn round_trip() {
        for r in (0 ..= 255).step_by(51) {
            for g in (0 ..= 255).step_by(51) {
                for b in (0 ..= 255).step_by(85) {
                    let c = RGB { r: r as f64, g: g as f64, b: b as f64 };
                    let back: RGB<f64> = hsluv_to_rgb(rgb_to_hsluv(&c));
                    assert!(close(back.r, c.r, 1e-6)
                            && close(back.g, c.g, 1e-6)
                            && close(back.b, c.b, 1e-6),
                            "{c:?} → {back:?}");
                }
            }
        }
    }

    #[test]
    fn hue_is_reduced() {
        assert_eq!(Hsluv::new(370., 50., 50.).h, 10.);
        assert_eq!(Hsluv::new(-90., 50., 50.).h, 270.);
        let a: RGB8 = hsluv_to_rgb(Hsluv { h: 400., s: 80., l: 60. });
        let b: RGB8 = hsluv_to_rgb(Hsluv { h: 40., s: 80., l: 60. });
        assert_eq!(a, b);
    }

    #[test]
    fn out_of_range_passes_through() {
        let c: RGB<f64> = hsluv_to_rgb(Hsluv { h: 0., s: 150., l: 50. });
        assert!(c.r > 255. || c.g < 0. || c.b < 0., "{c:?}");
    }
}
