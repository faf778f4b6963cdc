//! CIE L*a*b* and L*C*h colors (D65 white point) and gradients.

use std::f64::consts::PI;
use std::marker::PhantomData;
use rgb::RGB;
use crate::{ColorRange, RGBColor};

const TWO_PI: f64 = 2. * PI;
// CIE constants: ε = (6/29)³, κ·ε = 8 (with κ = 903.3).
const EPS0: f64 = 6. / 29.;
const EPS: f64 = EPS0 * EPS0 * EPS0;

/// Linear sRGB to CIE XYZ (D65).
const RGB_TO_XYZ: [[f64; 3]; 3] = [
    [0.4124564, 0.3575761, 0.1804375],
    [0.2126729, 0.7151522, 0.0721750],
    [0.0193339, 0.1191920, 0.9503041],
];

/// Inverse of [`RGB_TO_XYZ`].
const XYZ_TO_RGB: [[f64; 3]; 3] = [
    [3.2404548, -1.5371389, -0.4985315],
    [-0.9692664, 1.8760109, 0.0415561],
    [0.0556434, -0.2040259, 1.0572252],
];

// D65 reference white, the image of sRGB white so that greys have
// a = b = 0.
const XN: f64 = RGB_TO_XYZ[0][0] + RGB_TO_XYZ[0][1] + RGB_TO_XYZ[0][2];
const YN: f64 = RGB_TO_XYZ[1][0] + RGB_TO_XYZ[1][1] + RGB_TO_XYZ[1][2];
const ZN: f64 = RGB_TO_XYZ[2][0] + RGB_TO_XYZ[2][1] + RGB_TO_XYZ[2][2];

#[inline]
fn mul(m: &[[f64; 3]; 3], v: [f64; 3]) -> [f64; 3] {
    m.map(|row| row[0] * v[0] + row[1] * v[1] + row[2] * v[2])
}

/// sRGB component in \[0, 1\] to linear light.
#[inline]
pub(crate) fn srgb_to_linear(c: f64) -> f64 {
    if c > 0.04045 { ((c + 0.055) / 1.055).powf(2.4) } else { c / 12.92 }
}

/// Linear light to sRGB component in \[0, 1\].
#[inline]
pub(crate) fn linear_to_srgb(c: f64) -> f64 {
    if c > 0.0031308 { 1.055 * c.powf(1. / 2.4) - 0.055 } else { 12.92 * c }
}

/// A color in the CIE L*a*b* space.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Lab {
    /// The lightness in the range 0. to 100.
    pub l: f64,
    /// Green–red axis.
    pub a: f64,
    /// Blue–yellow axis.
    pub b: f64,
}

impl Lab {
    /// Convert a color with sRGB components in \[0, 255\].
    pub fn from_rgb(c: RGB<f64>) -> Lab {
        const C0: f64 = 1. / 3.;
        const C1: f64 = 841. / 108.;
        const C2: f64 = 4. / 29.;
        let lin = [c.r, c.g, c.b].map(|x| srgb_to_linear(x / 255.));
        let [x, y, z] = mul(&RGB_TO_XYZ, lin);
        let (x, y, z) = (x / XN, y / YN, z / ZN);
        let fx = if x > EPS { x.powf(C0) } else { C1 * x + C2 };
        let fy = if y > EPS { y.powf(C0) } else { C1 * y + C2 };
        let fz = if z > EPS { z.powf(C0) } else { C1 * z + C2 };
        Lab { l: 116. * fy - 16., a: 500. * (fx - fy), b: 200. * (fy - fz) }
    }

    /// Convert back to sRGB components in \[0, 255\] (not clipped).
    pub fn to_rgb(&self) -> RGB<f64> {
        const C0: f64 = 108. / 841.;
        const C1: f64 = 4. / 29.;
        let fy = (self.l + 16.) / 116.;
        let fx = self.a / 500. + fy;
        let fz = fy - self.b / 200.;
        let x = XN * if fx > EPS0 { fx * fx * fx } else { C0 * (fx - C1) };
        let y = YN * if fy > EPS0 { fy * fy * fy } else { C0 * (fy - C1) };
        let z = ZN * if fz > EPS0 { fz * fz * fz } else { C0 * (fz - C1) };
        let [r, g, b] = mul(&XYZ_TO_RGB, [x, y, z])
            .map(|v| 255. * linear_to_srgb(v));
        RGB { r, g, b }
    }

    /// The chroma `√(a² + b²)`.
    #[inline]
    pub fn chroma(&self) -> f64 { self.a.hypot(self.b) }
}

/// A color in CIE L*C*h, the polar form of [`Lab`].
#[derive(Clone, Copy, Debug)]
struct Lch {
    /// The lightness in the range 0. to 100.
    l: f64,
    /// The chroma, in the range 0. to 181.02, but less in practice.
    c: f64,
    /// The hue in radians in the range 0. to 2π.
    h: f64,
}

impl Lch {
    fn from_rgb(c: RGB<f64>) -> Lch {
        let lab = Lab::from_rgb(c);
        let h = { let h = lab.b.atan2(lab.a);
                  if h < 0. { h + TWO_PI } else { h } };
        Lch { l: lab.l, c: lab.chroma(), h }
    }

    fn to_rgb(self) -> RGB<f64> {
        Lab { l: self.l, a: self.c * self.h.cos(), b: self.c * self.h.sin() }
            .to_rgb()
    }
}

/// Gradient between two colors.
///
/// Created by [`RGBColor::gradient`].  See the [`ColorRange`] trait
/// for methods.
pub struct Gradient<Color> {
    c0: Lch, // first color
    dc: Lch, // last - first color
    color: PhantomData<Color>,
}

impl<Color> Gradient<Color>
where Color: RGBColor {
    pub(crate) fn new(c0: &Color, c1: &Color) -> Self {
        let lch0 = Lch::from_rgb(c0.to_rgb());
        let lch1 = Lch::from_rgb(c1.to_rgb());
        let h0 = lch0.h;
        let h1 = lch1.h;
        let dh = {
            if h1 > h0 && h1 - h0 > PI { h1 - (h0 + TWO_PI) }
            else if h1 < h0 && h0 - h1 > PI { h1 + TWO_PI - h0 }
            else { h1 - h0 } };
        Gradient { c0: lch0,
                   dc: Lch { l: lch1.l - lch0.l, c: lch1.c - lch0.c, h: dh },
                   color: PhantomData }
    }
}

impl<Color> ColorRange<Color> for Gradient<Color>
where Color: RGBColor {
    /// Returns the color corresponding to `t` ∈ \[0., 1.\], where
    /// `t == 0.` returns the first color provided in the gradient and
    /// `t == 1.` the second.
    fn rgb(&self, t: f64) -> Color {
        let t = t.clamp(0., 1.);
        let lch = Lch { l: self.c0.l + t * self.dc.l,
                        c: self.c0.c + t * self.dc.c,
                        h: self.c0.h + t * self.dc.h };
        Color::from_rgb(lch.to_rgb())
    }
}
