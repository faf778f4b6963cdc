//! Sequential and diverging scales.
//!
//! A sequential scale runs from a light, neutral end (position 0) to
//! its anchor color (last position).  It is sampled from a [`Ramp`]
//! in HSLuv: hue and saturation move linearly away from the anchor,
//! lightness follows a quadratic ease-out so that it changes slowly
//! near the anchor.
//!
//! A diverging scale glues two sequential halves at their light ends,
//! with a white midpoint when the number of colors is odd.

use std::marker::PhantomData;
use rgb::RGB;
use serde::{Deserialize, Serialize};
use tracing::debug;
use crate::config::{Shaping, MIN_DIVERGING_LEN, MIN_SEQUENTIAL_LEN};
use crate::{ColorRange, Hsluv, RGBColor};

/// An ordered list of colors, `None` marking a color not chosen yet.
pub type Scale<C> = Vec<Option<C>>;

/// The neutral color in the middle of diverging scales.
pub const NEUTRAL: RGB<f64> = RGB { r: 255., g: 255., b: 255. };

/// Kind of scale.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScaleMode {
    /// One anchor; suited to ordered data from low to high.
    #[default]
    Sequential,
    /// Two anchors around a light midpoint; suited to data diverging
    /// from a critical value.
    Diverging,
}

/// A half of a diverging scale.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Left,
    Right,
}

fn placeholders<C>(len: usize) -> Scale<C> {
    (0 .. len).map(|_| None).collect()
}

/// Quadratic ease-out on \[0, 1\].
#[inline]
fn ease_quad_out(t: f64) -> f64 { t * (2. - t) }

/// The continuous ramp underlying a sequential scale: `t = 0` is the
/// anchor color, `t = 1` the light end.
pub struct Ramp<Color> {
    anchor: Hsluv,
    dh: f64,
    ds: f64,
    dl: f64,
    color: PhantomData<Color>,
}

impl<Color: RGBColor> Ramp<Color> {
    /// Ramp away from `anchor`.  The shifts are clamped to their range.
    pub fn new(anchor: &Color, shaping: &Shaping) -> Self {
        let s = shaping.clamped();
        let anchor = anchor.to_hsluv();
        Ramp { anchor,
               dh: 360. * s.hue_shift,
               ds: -anchor.s * s.saturation_shift,
               dl: (100. - anchor.l) * s.lightness_shift,
               color: PhantomData }
    }
}

impl<Color: RGBColor> ColorRange<Color> for Ramp<Color> {
    fn rgb(&self, t: f64) -> Color {
        let a = self.anchor;
        Color::from_hsluv(Hsluv::new(a.h + t * self.dh,
                                     a.s + t * self.ds,
                                     a.l + ease_quad_out(t) * self.dl))
    }
}

/// Builder of sequential scales.
///
/// # Example
///
/// ```
/// use rgb::RGB8;
/// use color_scale::SequentialScale;
/// let scale = SequentialScale::new(5).hue_shift(0.1)
///     .build(Some(&RGB8::new(0, 90, 160))).unwrap();
/// assert_eq!(scale.len(), 5);
/// assert_eq!(scale[4], Some(RGB8::new(0, 90, 160)));
/// ```
#[derive(Clone, Copy, Debug)]
pub struct SequentialScale {
    len: usize,
    shaping: Shaping,
    exclude_neutral: bool,
}

impl SequentialScale {
    /// Scale of `len` colors with the default [`Shaping`].
    pub fn new(len: usize) -> Self {
        Self { len, shaping: Shaping::default(), exclude_neutral: false }
    }

    pub fn shaping(mut self, shaping: Shaping) -> Self {
        self.shaping = shaping;
        self
    }

    pub fn hue_shift(mut self, shift: f64) -> Self {
        self.shaping.hue_shift = shift;
        self
    }

    pub fn saturation_shift(mut self, shift: f64) -> Self {
        self.shaping.saturation_shift = shift;
        self
    }

    pub fn lightness_shift(mut self, shift: f64) -> Self {
        self.shaping.lightness_shift = shift;
        self
    }

    /// Sample one more color and drop the lightest one, so that the
    /// scale does not end on the neutral color.  Used for the halves
    /// of diverging scales.
    pub fn exclude_neutral(mut self, exclude: bool) -> Self {
        self.exclude_neutral = exclude;
        self
    }

    /// Build the scale ending at `anchor`.
    ///
    /// Returns `None` if fewer than 2 colors were requested and a
    /// scale of `None`s if there is no anchor.
    pub fn build<C: RGBColor>(&self, anchor: Option<&C>) -> Option<Scale<C>> {
        if self.len < MIN_SEQUENTIAL_LEN {
            debug!(len = self.len, "sequential scale too short");
            return None;
        }
        let Some(anchor) = anchor else { return Some(placeholders(self.len)) };
        let n = if self.exclude_neutral { self.len + 1 } else { self.len };
        let scale = Ramp::new(anchor, &self.shaping).range(0., 1., n)
            .rev()
            .skip(n - self.len)
            .map(|(_, c)| Some(c))
            .collect();
        Some(scale)
    }
}

/// Builder of diverging scales.
#[derive(Clone, Copy, Debug)]
pub struct DivergingScale {
    len: usize,
    shaping: Shaping,
}

impl DivergingScale {
    /// Scale of `len` colors with the default [`Shaping`].
    pub fn new(len: usize) -> Self {
        Self { len, shaping: Shaping::default() }
    }

    /// Shaping applied to both halves.
    pub fn shaping(mut self, shaping: Shaping) -> Self {
        self.shaping = shaping;
        self
    }

    /// Build the scale from `start` (position 0) to `end` (last
    /// position).
    ///
    /// Returns `None` if fewer than 5 colors were requested.  A
    /// missing anchor leaves its half as `None`s; without any anchor
    /// the whole scale is `None`s, white midpoint included.
    pub fn build<C: RGBColor>(&self, start: Option<&C>, end: Option<&C>)
                              -> Option<Scale<C>> {
        if self.len < MIN_DIVERGING_LEN {
            debug!(len = self.len, "diverging scale too short");
            return None;
        }
        if start.is_none() && end.is_none() {
            return Some(placeholders(self.len));
        }
        let half = SequentialScale::new(self.len / 2)
            .shaping(self.shaping)
            .exclude_neutral(true);
        let mut scale = half.build(start)?;
        scale.reverse();
        if self.len % 2 == 1 {
            scale.push(Some(C::from_rgb(NEUTRAL)));
        }
        scale.extend(half.build(end)?);
        Some(scale)
    }
}

/// Sequential scale of `len` colors from the light end to `anchor`.
/// See [`SequentialScale::build`].
pub fn sequential_scale<C: RGBColor>(anchor: Option<&C>, len: usize,
                                     shaping: &Shaping) -> Option<Scale<C>> {
    SequentialScale::new(len).shaping(*shaping).build(anchor)
}

/// Diverging scale of `len` colors from `start` to `end`.
/// See [`DivergingScale::build`].
pub fn diverging_scale<C: RGBColor>(start: Option<&C>, end: Option<&C>,
                                    len: usize, shaping: &Shaping)
                                    -> Option<Scale<C>> {
    DivergingScale::new(len).shaping(*shaping).build(start, end)
}

/// Give the half of `scale` opposite to `anchor` the HSLuv lightness
/// of the mirrored positions on the `anchor` half, so both halves
/// reach the same extremes.  Hue and saturation are kept.
///
/// The scale is returned unchanged if either end is `None`.
pub fn correct_diverging_lightness<C>(scale: &[Option<C>], anchor: Side)
                                      -> Scale<C>
where C: RGBColor + Clone {
    let len = scale.len();
    if !matches!((scale.first(), scale.last()), (Some(Some(_)), Some(Some(_)))) {
        return scale.to_vec();
    }
    scale.iter().enumerate().map(|(i, c)| {
        let mirror = len - 1 - i;
        let free = match anchor {
            Side::Left => i > mirror,
            Side::Right => i < mirror,
        };
        match (c, &scale[mirror]) {
            (Some(c), Some(m)) if free => {
                let l = m.to_hsluv().l;
                Some(C::from_hsluv(c.to_hsluv().with_lightness(l)))
            }
            _ => c.clone(),
        }
    }).collect()
}

/// The side whose end color is darker (in HSLuv lightness), `Left`
/// on ties.  `None` if an end is missing.
pub fn darker_side<C: RGBColor>(scale: &[Option<C>]) -> Option<Side> {
    match (scale.first()?, scale.last()?) {
        (Some(first), Some(last)) => {
            if first.to_hsluv().l <= last.to_hsluv().l { Some(Side::Left) }
            else { Some(Side::Right) }
        }
        _ => None,
    }
}
