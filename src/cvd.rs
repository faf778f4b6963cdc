//! Color vision deficiency simulation.
//!
//! Dichromacies are simulated by a linear map on linear sRGB:
//! Viénot, Brettel & Mollon (1999) for protanopia and deuteranopia,
//! Machado, Oliveira & Fernandes (2009) at full severity for
//! tritanopia.  Achromatopsia keeps only the relative luminance.
//!
//! See also <https://daltonlens.org/opensource-cvd-simulation/>.

use rgb::RGB;
use serde::{Deserialize, Serialize};
use crate::lab::{linear_to_srgb, srgb_to_linear};
use crate::{RGBColor, Scale};

type Mat3 = [[f64; 3]; 3];

const PROTANOPIA: Mat3 = [
    [0.11238, 0.88762, 0.],
    [0.11238, 0.88762, 0.],
    [0.00401, -0.00401, 1.],
];

const DEUTERANOPIA: Mat3 = [
    [0.29275, 0.70725, 0.],
    [0.29275, 0.70725, 0.],
    [-0.02234, 0.02234, 1.],
];

const TRITANOPIA: Mat3 = [
    [1.255528, -0.076749, -0.178779],
    [-0.078411, 0.930809, 0.147602],
    [0.004733, 0.691367, 0.303900],
];

const ACHROMATOPSIA: Mat3 = [
    [0.2126, 0.7152, 0.0722],
    [0.2126, 0.7152, 0.0722],
    [0.2126, 0.7152, 0.0722],
];

/// A color vision deficiency.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Deficiency {
    /// No functioning long-wavelength (red) cones.
    Protanopia,
    /// No functioning medium-wavelength (green) cones.
    Deuteranopia,
    /// No functioning short-wavelength (blue) cones.
    Tritanopia,
    /// No color vision at all.
    Achromatopsia,
}

impl Deficiency {
    pub const ALL: [Deficiency; 4] = [Deficiency::Protanopia,
                                      Deficiency::Deuteranopia,
                                      Deficiency::Tritanopia,
                                      Deficiency::Achromatopsia];

    fn matrix(self) -> &'static Mat3 {
        match self {
            Deficiency::Protanopia => &PROTANOPIA,
            Deficiency::Deuteranopia => &DEUTERANOPIA,
            Deficiency::Tritanopia => &TRITANOPIA,
            Deficiency::Achromatopsia => &ACHROMATOPSIA,
        }
    }

    /// The color `c` as seen with this deficiency.
    pub fn simulate<C: RGBColor>(self, c: &C) -> C {
        let c = c.to_rgb();
        let lin = [c.r, c.g, c.b].map(|x| srgb_to_linear(x.clamp(0., 255.) / 255.));
        let [r, g, b] = self.matrix().map(|row| {
            let x = row[0] * lin[0] + row[1] * lin[1] + row[2] * lin[2];
            255. * linear_to_srgb(x.clamp(0., 1.))
        });
        C::from_rgb(RGB { r, g, b })
    }
}

impl std::fmt::Display for Deficiency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Deficiency::Protanopia => write!(f, "protanopia"),
            Deficiency::Deuteranopia => write!(f, "deuteranopia"),
            Deficiency::Tritanopia => write!(f, "tritanopia"),
            Deficiency::Achromatopsia => write!(f, "achromatopsia"),
        }
    }
}

/// Simulate `deficiency` on `colour`.  A missing color stays missing
/// and no deficiency leaves the color unchanged.
pub fn simulate_deficiency<C>(colour: Option<&C>,
                              deficiency: Option<Deficiency>) -> Option<C>
where C: RGBColor + Clone {
    let colour = colour?;
    match deficiency {
        Some(d) => Some(d.simulate(colour)),
        None => Some(colour.clone()),
    }
}

/// Simulate `deficiency` on every color of `scale`.
pub fn simulate_scale<C>(scale: &[Option<C>], deficiency: Option<Deficiency>)
                         -> Scale<C>
where C: RGBColor + Clone {
    scale.iter().map(|c| simulate_deficiency(c.as_ref(), deficiency)).collect()
}
