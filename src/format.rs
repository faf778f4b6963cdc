//! Reading colors from text and writing them in CSS-friendly formats.

use std::fmt;
use rgb::{RGB, RGB8};
use serde::{Deserialize, Serialize};
use crate::error::{ParseColourError, Result};
use crate::lab::Lab;
use crate::RGBColor;

/// Text format of exported colors.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ExportFormat {
    /// `#RRGGBB`
    Hex,
    /// `rgb(r, g, b)`
    #[default]
    Rgb,
    /// `hsl(h, s%, l%)`
    Hsl,
    /// `hwb(h, w%, b%)`
    Hwb,
    /// `lab(L%, a, b)`
    Lab,
}

impl ExportFormat {
    pub const ALL: [ExportFormat; 5] = [ExportFormat::Hex, ExportFormat::Rgb,
                                        ExportFormat::Hsl, ExportFormat::Hwb,
                                        ExportFormat::Lab];
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExportFormat::Hex => write!(f, "HEX"),
            ExportFormat::Rgb => write!(f, "RGB"),
            ExportFormat::Hsl => write!(f, "HSL"),
            ExportFormat::Hwb => write!(f, "HWB"),
            ExportFormat::Lab => write!(f, "LAB"),
        }
    }
}

const NAMED: [(&str, RGB8); 12] = [
    ("black", RGB8 { r: 0, g: 0, b: 0 }),
    ("white", RGB8 { r: 255, g: 255, b: 255 }),
    ("red", RGB8 { r: 255, g: 0, b: 0 }),
    ("green", RGB8 { r: 0, g: 128, b: 0 }),
    ("blue", RGB8 { r: 0, g: 0, b: 255 }),
    ("yellow", RGB8 { r: 255, g: 255, b: 0 }),
    ("cyan", RGB8 { r: 0, g: 255, b: 255 }),
    ("magenta", RGB8 { r: 255, g: 0, b: 255 }),
    ("orange", RGB8 { r: 255, g: 165, b: 0 }),
    ("purple", RGB8 { r: 128, g: 0, b: 128 }),
    ("gray", RGB8 { r: 128, g: 128, b: 128 }),
    ("grey", RGB8 { r: 128, g: 128, b: 128 }),
];

fn parse_hex(input: &str, digits: &str) -> Result<RGB8> {
    let invalid = || ParseColourError::InvalidHex(input.to_string());
    if !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(invalid());
    }
    let byte = |s: &str| u8::from_str_radix(s, 16).map_err(|_| invalid());
    match digits.len() {
        3 => {
            let n = |i: usize| byte(&digits[i .. i + 1]).map(|v| v * 17);
            Ok(RGB8::new(n(0)?, n(1)?, n(2)?))
        }
        6 => Ok(RGB8::new(byte(&digits[0 .. 2])?, byte(&digits[2 .. 4])?,
                          byte(&digits[4 .. 6])?)),
        _ => Err(ParseColourError::InvalidLength(input.to_string())),
    }
}

fn parse_function(input: &str, args: &str, n_args: usize) -> Result<RGB8> {
    let args: Vec<&str> = args.split(',').map(str::trim).collect();
    if args.len() != n_args {
        return Err(ParseColourError::InvalidFunction(input.to_string()));
    }
    let mut rgb = [0u8; 3];
    for (i, arg) in args.iter().enumerate() {
        let v: f64 = arg.parse().map_err(|_| {
            ParseColourError::InvalidFunction(input.to_string())
        })?;
        let max = if i < 3 { 255. } else { 1. };
        if !(0. ..= max).contains(&v) {
            return Err(ParseColourError::OutOfRange {
                input: input.to_string(), value: arg.to_string() });
        }
        if i < 3 { rgb[i] = v.round() as u8 }
    }
    Ok(RGB8::new(rgb[0], rgb[1], rgb[2]))
}

/// Parse `#rgb`, `#rrggbb`, `rgb(r, g, b)`, `rgba(r, g, b, a)` or a
/// basic CSS color name.  The alpha of `rgba` is checked but dropped.
///
/// # Example
///
/// ```
/// use rgb::RGB8;
/// use color_scale::parse_colour;
/// assert_eq!(parse_colour("rgb(255, 0, 0)"), Ok(RGB8::new(255, 0, 0)));
/// assert_eq!(parse_colour("#0f0"), Ok(RGB8::new(0, 255, 0)));
/// assert!(parse_colour("rgb(300, 0, 0)").is_err());
/// ```
pub fn parse_colour(s: &str) -> Result<RGB8> {
    let s = s.trim();
    if s.is_empty() {
        return Err(ParseColourError::Empty);
    }
    if let Some(hex) = s.strip_prefix('#') {
        return parse_hex(s, hex.trim());
    }
    let lower = s.to_ascii_lowercase();
    if let Some(args) = lower.strip_prefix("rgba(")
        .and_then(|a| a.strip_suffix(')')) {
        return parse_function(s, args, 4);
    }
    if let Some(args) = lower.strip_prefix("rgb(")
        .and_then(|a| a.strip_suffix(')')) {
        return parse_function(s, args, 3);
    }
    NAMED.iter().find(|(name, _)| *name == lower)
        .map(|&(_, c)| c)
        .ok_or_else(|| ParseColourError::Unknown(s.to_string()))
}

/// Hue (degrees), saturation and lightness (percentages) of a color
/// with components in \[0, 255\].
pub(crate) fn rgb_to_hsl(c: RGB<f64>) -> (f64, f64, f64) {
    let (r, g, b) = (c.r / 255., c.g / 255., c.b / 255.);
    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let l = (max + min) / 2.;
    let delta = max - min;
    if delta == 0. {
        return (0., 0., 100. * l);
    }
    let s = if l <= 0.5 { delta / (max + min) } else { delta / (2. - max - min) };
    (hue(r, g, b, max, delta), 100. * s, 100. * l)
}

fn hue(r: f64, g: f64, b: f64, max: f64, delta: f64) -> f64 {
    let h = if max == r { (g - b) / delta }
            else if max == g { 2. + (b - r) / delta }
            else { 4. + (r - g) / delta };
    (60. * h).rem_euclid(360.)
}

/// Inverse of [`rgb_to_hsl`].
pub(crate) fn hsl_to_rgb(h: f64, s: f64, l: f64) -> RGB<f64> {
    let s = s / 100.;
    let l = l / 100.;
    let c = (1. - (2. * l - 1.).abs()) * s;
    let h = h.rem_euclid(360.) / 60.;
    let x = c * (1. - (h.rem_euclid(2.) - 1.).abs());
    let (r, g, b) = match h as u32 {
        0 => (c, x, 0.),
        1 => (x, c, 0.),
        2 => (0., c, x),
        3 => (0., x, c),
        4 => (x, 0., c),
        _ => (c, 0., x),
    };
    let m = l - c / 2.;
    RGB { r: 255. * (r + m), g: 255. * (g + m), b: 255. * (b + m) }
}

/// Round to one decimal, without a trailing `.0`.
fn num(x: f64) -> String {
    let x = (x * 10.).round() / 10.;
    if x.fract() == 0. { format!("{}", x as i64) } else { format!("{x:.1}") }
}

/// Write `c` in the format `fmt`.  Components outside the sRGB gamut
/// are clipped.
///
/// # Example
///
/// ```
/// use rgb::RGB8;
/// use color_scale::{format_colour, ExportFormat};
/// let red = RGB8::new(255, 0, 0);
/// assert_eq!(format_colour(&red, ExportFormat::Hex), "#FF0000");
/// assert_eq!(format_colour(&red, ExportFormat::Hsl), "hsl(0, 100%, 50%)");
/// ```
pub fn format_colour<C: RGBColor>(c: &C, fmt: ExportFormat) -> String {
    let c = RGB8::from_rgb(c.to_rgb());
    match fmt {
        ExportFormat::Hex => format!("#{:02X}{:02X}{:02X}", c.r, c.g, c.b),
        ExportFormat::Rgb => format!("rgb({}, {}, {})", c.r, c.g, c.b),
        ExportFormat::Hsl => {
            let (h, s, l) = rgb_to_hsl(c.to_rgb());
            format!("hsl({}, {}%, {}%)", num(h), num(s), num(l))
        }
        ExportFormat::Hwb => {
            let (h, _, _) = rgb_to_hsl(c.to_rgb());
            let max = c.r.max(c.g).max(c.b) as f64;
            let min = c.r.min(c.g).min(c.b) as f64;
            format!("hwb({}, {}%, {}%)", num(h), num(100. * min / 255.),
                    num(100. * (1. - max / 255.)))
        }
        ExportFormat::Lab => {
            let lab = Lab::from_rgb(c.to_rgb());
            // Rounding residues of greys must not print as `-0.000`.
            let r = |x: f64| (x * 1000.).round() / 1000. + 0.;
            format!("lab({:.3}%, {:.3}, {:.3})", r(lab.l), r(lab.a), r(lab.b))
        }
    }
}

fn formatted<C: RGBColor>(scale: &[Option<C>], fmt: ExportFormat)
                          -> Option<Vec<String>> {
    scale.iter().map(|c| c.as_ref().map(|c| format_colour(c, fmt))).collect()
}

/// The colors of `scale` separated by commas, or `None` if a color
/// is missing.
pub fn export_list<C: RGBColor>(scale: &[Option<C>], fmt: ExportFormat)
                                -> Option<String> {
    Some(formatted(scale, fmt)?.join(", "))
}

/// The colors of `scale` as an array literal of quoted strings, or
/// `None` if a color is missing.
pub fn export_array<C: RGBColor>(scale: &[Option<C>], fmt: ExportFormat)
                                 -> Option<String> {
    let items: Vec<String> = formatted(scale, fmt)?.iter()
        .map(|s| format!("'{s}'"))
        .collect();
    Some(format!("[{}]", items.join(", ")))
}


#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const TEAL: RGB8 = RGB8 { r: 0, g: 128, b: 128 };

    #[test]
    fn parse_forms() {
        assert_eq!(parse_colour("  #008080 "), Ok(TEAL));
        assert_eq!(parse_colour("#008080"), parse_colour("RGB(0,128,128)"));
        assert_eq!(parse_colour("rgba(0, 128, 128, 0.5)"), Ok(TEAL));
        assert_eq!(parse_colour("rgb(0.4, 127.6, 128)"), Ok(TEAL));
        assert_eq!(parse_colour("Grey"), Ok(RGB8::new(128, 128, 128)));
        assert_eq!(parse_colour("#abc"), Ok(RGB8::new(0xaa, 0xbb, 0xcc)));
    }

    #[test]
    fn parse_errors() {
        use ParseColourError::*;
        assert_eq!(parse_colour(" "), Err(Empty));
        assert_eq!(parse_colour("#12345"), Err(InvalidLength("#12345".into())));
        assert_eq!(parse_colour("#12345g"), Err(InvalidHex("#12345g".into())));
        assert_eq!(parse_colour("rgb(1, 2)"),
                   Err(InvalidFunction("rgb(1, 2)".into())));
        assert_eq!(parse_colour("rgb(1, 2, -3)"),
                   Err(OutOfRange { input: "rgb(1, 2, -3)".into(),
                                    value: "-3".into() }));
        assert_eq!(parse_colour("chartreuse"), Err(Unknown("chartreuse".into())));
    }

    #[test]
    fn formats() {
        let f = |fmt| format_colour(&TEAL, fmt);
        assert_eq!(f(ExportFormat::Hex), "#008080");
        assert_eq!(f(ExportFormat::Rgb), "rgb(0, 128, 128)");
        assert_eq!(f(ExportFormat::Hsl), "hsl(180, 100%, 25.1%)");
        assert_eq!(f(ExportFormat::Hwb), "hwb(180, 0%, 49.8%)");
        let red = RGB8::new(255, 0, 0);
        assert_eq!(format_colour(&red, ExportFormat::Lab),
                   "lab(53.241%, 80.092, 67.203)");
    }

    #[test]
    fn greys_in_lab_are_neutral() {
        let lab = |c: RGB8| format_colour(&c, ExportFormat::Lab);
        assert_eq!(lab(RGB8::new(255, 255, 255)), "lab(100.000%, 0.000, 0.000)");
        assert_eq!(lab(RGB8::new(128, 128, 128)), "lab(53.585%, 0.000, 0.000)");
        assert_eq!(lab(RGB8::new(0, 0, 0)), "lab(0.000%, 0.000, 0.000)");
    }

    #[test]
    fn out_of_gamut_is_clipped() {
        let c = RGB { r: 300., g: -20., b: 127.6 };
        assert_eq!(format_colour(&c, ExportFormat::Rgb), "rgb(255, 0, 128)");
    }

    #[test]
    fn hsl_round_trip() {
        for c in [RGB8::new(10, 200, 30), RGB8::new(250, 250, 10), TEAL,
                  RGB8::new(90, 10, 160), RGB8::new(77, 77, 77)] {
            let (h, s, l) = rgb_to_hsl(c.to_rgb());
            assert_eq!(RGB8::from_rgb(hsl_to_rgb(h, s, l)), c);
        }
    }

    #[test]
    fn export() {
        let scale = [Some(TEAL), Some(RGB8::new(255, 255, 255))];
        assert_eq!(export_list(&scale, ExportFormat::Hex).as_deref(),
                   Some("#008080, #FFFFFF"));
        assert_eq!(export_array(&scale, ExportFormat::Rgb).as_deref(),
                   Some("['rgb(0, 128, 128)', 'rgb(255, 255, 255)']"));
        assert_eq!(export_list(&[Some(TEAL), None], ExportFormat::Hex), None);
    }

    #[test]
    fn format_names() {
        let json = serde_json::to_string(&ExportFormat::ALL).unwrap();
        assert_eq!(json, r#"["HEX","RGB","HSL","HWB","LAB"]"#);
        assert_eq!(ExportFormat::Lab.to_string(), "LAB");
    }
}
