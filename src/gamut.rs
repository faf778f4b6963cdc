//! Reference colors spanning the hue circle, used as a backdrop when
//! picking anchor colors.

use std::f64::consts::PI;
use std::marker::PhantomData;
use lazy_static::lazy_static;
use rgb::{RGB, RGB8};
use crate::format::{hsl_to_rgb, rgb_to_hsl};
use crate::{ColorRange, RGBColor};

/// The “sinebow” hue wheel: three phase-shifted squared sines, which
/// look more even than the HSL hue circle.
///
/// # Example
///
/// ```
/// use rgb::RGB8;
/// use color_scale::{ColorRange, Sinebow};
/// let c: RGB8 = Sinebow::new().rgb(0.);
/// assert_eq!(c.r, 255);
/// ```
pub struct Sinebow<Color> { color: PhantomData<Color> }

impl<Color> Sinebow<Color> {
    pub const fn new() -> Self { Sinebow { color: PhantomData } }
}

impl<Color> Default for Sinebow<Color> {
    fn default() -> Self { Self::new() }
}

impl<Color: RGBColor> ColorRange<Color> for Sinebow<Color> {
    fn rgb(&self, t: f64) -> Color {
        let t = 0.5 - t;
        let channel = |phase: f64| {
            let s = (PI * (t + phase)).sin();
            255. * s * s
        };
        Color::from_rgb(RGB { r: channel(0.), g: channel(1. / 3.),
                              b: channel(2. / 3.) })
    }
}

/// A color of [`struct@GAMUT_COLOURS`] with its position on a CSS
/// gradient (0 to 1).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GamutStop {
    pub colour: RGB8,
    pub position: f64,
}

/// HSL lightness increase of the gamut colors, relative.
const LIGHTEN: f64 = 0.4;

lazy_static! {
    /// Eight sinebow colors at `t = 0, 0.125, …, 0.875`, lightened by
    /// 40 % in HSL.
    pub static ref GAMUT_COLOURS: Vec<GamutStop> = {
        let sinebow = Sinebow::<RGB<f64>>::new();
        (0 .. 8).map(|i| {
                let t = 0.125 * i as f64;
                let (h, s, l) = rgb_to_hsl(sinebow.rgb(t));
                let l = (l * (1. + LIGHTEN)).min(100.);
                GamutStop { colour: RGB8::from_rgb(hsl_to_rgb(h, s, l)),
                            position: t + 0.05 }
            })
            .collect()
    };
}


#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn stops() {
        assert_eq!(GAMUT_COLOURS.len(), 8);
        assert_eq!(GAMUT_COLOURS[0].colour, RGB8::new(255, 191, 191));
        for (i, stop) in GAMUT_COLOURS.iter().enumerate() {
            let expected = 0.125 * i as f64 + 0.05;
            assert!((stop.position - expected).abs() < 1e-12, "{stop:?}");
        }
    }

    #[test]
    fn sinebow_is_periodic() {
        let s = Sinebow::<RGB8>::new();
        assert_eq!(s.rgb(0.), s.rgb(1.));
        assert_eq!(s.rgb(0.1), s.rgb(1.1));
    }
}
