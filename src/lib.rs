//! Perceptual color scales for data visualization.
//!
//! - [`sequential_scale`] and [`diverging_scale`] build ramps in the
//!   HSLuv color space from one or two anchor colors.
//! - [`correct_diverging_lightness`] balances the two halves of a
//!   diverging scale.
//! - [`simulate_deficiency`] shows a color as seen with a color
//!   vision deficiency.
//! - [`diverging_conflicts`] flags scale positions that are too close
//!   to each other under [`delta_e`].
//! - [`DistinctColours`] draws random colors that are mutually
//!   distinct.
//!
//! Colors are any type implementing [`RGBColor`].  A [`Scale`] is a
//! vector of optional colors: `None` stands for an anchor that has not
//! been chosen yet and propagates through every stage.

use std::marker::PhantomData;
use rgb::{RGB, RGBA8, RGB8};

pub mod config;
pub mod conflict;
pub mod cvd;
pub mod delta_e;
pub mod error;
pub mod format;
pub mod gamut;
pub mod hsluv;
pub mod lab;
pub mod random;
pub mod report;
pub mod scale;

pub use config::{RandomColourConfig, Shaping};
pub use conflict::{anchor_conflicts, colour_difference_matrix,
                   deficiency_conflicts, diverging_conflicts,
                   diverging_conflicts_with_steps, DeficiencyConflicts};
pub use cvd::{simulate_deficiency, simulate_scale, Deficiency};
pub use delta_e::{delta_e, delta_e_symmetric};
pub use error::{ParseColourError, Result};
pub use format::{export_array, export_list, format_colour, parse_colour,
                 ExportFormat};
pub use gamut::{GamutStop, Sinebow, GAMUT_COLOURS};
pub use hsluv::{hsluv_to_rgb, rgb_to_hsluv, Hsluv};
pub use lab::Gradient;
pub use random::{generate_distinct_colour_set, random_distinct_colour,
                 DistinctColours};
pub use report::{ScaleConfig, ScaleReport};
pub use scale::{correct_diverging_lightness, darker_side, diverging_scale,
                sequential_scale, DivergingScale, Scale, ScaleMode,
                SequentialScale, Side};

/// A “continuous” range of colors parametrized by reals in \[0, 1\].
pub trait ColorRange<Color> {
    /// Returns the color corresponding to `t` ∈ \[0., 1.\].
    fn rgb(&self, t: f64) -> Color;

    /// Return an iterator yielding uniform sampling of `n` points
    /// between `a` and `b` (with the bounds `a` and `b` included in
    /// the list of points) together with colors.  It is not required
    /// that `a <= b`.
    fn range(self, mut a: f64, mut b: f64, n: usize) -> Range<Self, Color>
    where Self: Sized {
        if a == f64::INFINITY { a = f64::MAX; }
        else if a == f64::NEG_INFINITY { a = f64::MIN };
        if b == f64::NEG_INFINITY { b = f64::MIN; }
        else if b == f64::INFINITY { b = f64::MAX };
        if n == 0 {
            Range { range: self,  color: PhantomData,
                    a, b, flast: 0., last: 0,
                    i: 1, j: 0 } // Empty iterator
        } else {
            Range { range: self,  color: PhantomData,
                    a, b, flast: (n - 1) as f64,
                    last: n - 1, i: 0, j: n - 1 }
        }
    }
}

/// An iterator yielding `f64` in a given range together with colors.
pub struct Range<R, Color> {
    range: R,
    color: PhantomData<Color>,
    a: f64, // finite or NaN
    b: f64, // finite or NaN
    flast: f64, // `last` as a floating-point number
    last: usize,
    i: usize, // first position to be consumed (i ≤ j)
    j: usize, // last position to be consumed
}

impl<R, Color> Range<R, Color> where R: ColorRange<Color> {
    /// Return the float and color of the position `k` (assuming it is
    /// in the range `0 ..= self.last`).  A single point sits at `t = 0`.
    fn rgb(&self, k: usize) -> (f64, Color) {
        if k == 0 {
            (self.a, R::rgb(&self.range, 0.))
        } else if k == self.last {
            (self.b, R::rgb(&self.range, 1.))
        } else {
            let alpha = (self.last - k) as f64;
            let beta = k as f64;
            let t = beta / self.flast;
            let mut x = (alpha * self.a + beta * self.b) / self.flast;
            if x.is_infinite() {
                x = (1. - t) * self.a + t * self.b;
            }
            (x, R::rgb(&self.range, t))
        }
    }
}

impl<R, Color> Iterator for Range<R, Color>
where R: ColorRange<Color> {
    type Item = (f64, Color);

    fn next(&mut self) -> Option<Self::Item> {
        if self.i <= self.j {
            let item = self.rgb(self.i);
            self.i += 1;
            Some(item)
        } else {
            None
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.len();
        (len, Some(len))
    }
}

impl<R, Color> ExactSizeIterator for Range<R, Color>
where R: ColorRange<Color> {
    fn len(&self) -> usize {
        if self.i <= self.j { self.j - self.i + 1 } else { 0 }
    }
}

impl<R, Color> DoubleEndedIterator for Range<R, Color>
where R: ColorRange<Color> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.i <= self.j {
            let item = self.rgb(self.j);
            if self.j == 0 {
                self.i = 1
            } else {
                self.j -= 1;
            }
            Some(item)
        } else {
            None
        }
    }
}

/// Specifies the methods a RGB color encoding must provide.
///
/// Colors are exchanged as `RGB<f64>` with components in \[0, 255\].
/// Values outside this interval are allowed: conversions out of a
/// perceptual space may leave the sRGB gamut, and only the integer
/// encodings clip them.
pub trait RGBColor: Sized {
    /// Return the red, green and blue components of the color (in
    /// \[0, 255\]).
    fn to_rgb(&self) -> RGB<f64>;

    /// Create a color from its RGB components (in \[0, 255\]).
    fn from_rgb(rgb: RGB<f64>) -> Self;

    /// Convert the color to HSLuv.
    ///
    /// # Example
    ///
    /// ```
    /// use rgb::RGB8;
    /// use color_scale::RGBColor;
    /// let red = RGB8::new(255, 0, 0).to_hsluv();
    /// assert!((red.h - 12.177).abs() < 1e-3);
    /// ```
    #[inline]
    fn to_hsluv(&self) -> Hsluv { rgb_to_hsluv(self) }

    /// Create a color from its HSLuv coordinates.
    #[inline]
    fn from_hsluv(c: Hsluv) -> Self { hsluv_to_rgb(c) }

    /// Return a gradient from color `c0` to color `c1`, interpolated
    /// in CIE L*C*h along the shortest hue arc.
    ///
    /// # Example
    ///
    /// ```
    /// use rgb::RGB8;
    /// use color_scale::{RGBColor, ColorRange};
    /// let red = RGB8::new(255,0, 0);
    /// let blue = RGB8::new(0, 0, 255);
    /// let grad = red.gradient(&blue);
    /// assert_eq!(grad.rgb(0.), red);
    /// ```
    fn gradient(&self, c1: &Self) -> Gradient<Self> {
        Gradient::new(self, c1)
    }

    /// Perceptual distance to `other`, see [`delta_e`].
    #[inline]
    fn delta_e(&self, other: &impl RGBColor) -> f64 { delta_e(self, other) }
}

impl RGBColor for RGB<f64> {
    #[inline]
    fn to_rgb(&self) -> RGB<f64> { *self }

    #[inline]
    fn from_rgb(c: RGB<f64>) -> Self { c }
}

impl RGBColor for RGB8 {
    #[inline]
    fn to_rgb(&self) -> RGB<f64> {
        RGB { r: self.r as f64, g: self.g as f64, b: self.b as f64 }
    }

    /// Components are rounded, then saturated to \[0, 255\].
    #[inline]
    fn from_rgb(c: RGB<f64>) -> Self {
        RGB8 { r: c.r.round() as u8,  g: c.g.round() as u8,
               b: c.b.round() as u8 }
    }
}

impl RGBColor for RGBA8 {
    /// The alpha channel is ignored.
    #[inline]
    fn to_rgb(&self) -> RGB<f64> {
        RGB { r: self.r as f64, g: self.g as f64, b: self.b as f64 }
    }

    #[inline]
    fn from_rgb(c: RGB<f64>) -> Self {
        RGBA8 { r: c.r.round() as u8,  g: c.g.round() as u8,
                b: c.b.round() as u8, a: 255 }
    }
}
