//! Everything a scale editor displays, derived from one set of
//! parameters.
//!
//! [`ScaleConfig::report`] is pure: callers that want to avoid
//! recomputation keep the report and recompute it when the
//! configuration or the anchors change.

use serde::{Deserialize, Serialize};
use tracing::debug;
use crate::config::{CONFLICT_TOLERANCE, DEFAULT_SCALE_LEN};
use crate::conflict::{deficiency_conflicts, diverging_conflicts,
                      DeficiencyConflicts};
use crate::cvd::{simulate_scale, Deficiency};
use crate::scale::{correct_diverging_lightness, darker_side, DivergingScale,
                   Scale, ScaleMode, SequentialScale, Side};
use crate::{RGBColor, Shaping};

/// Parameters of a scale and of its checks.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScaleConfig {
    pub mode: ScaleMode,
    /// Number of colors.
    pub len: usize,
    pub shaping: Shaping,
    /// Sequential scales only: sample white as an extra neutral point
    /// and drop it, so the light end stops short of white.
    pub use_neutral: bool,
    /// Show the scale with the lightness of this half on both halves.
    pub lightness_lock: Option<Side>,
    /// Show the scale as seen with this deficiency.
    pub deficiency: Option<Deficiency>,
    /// [`delta_e`](crate::delta_e) below which colors conflict.
    pub tolerance: f64,
}

impl Default for ScaleConfig {
    fn default() -> Self {
        Self { mode: ScaleMode::Sequential, len: DEFAULT_SCALE_LEN,
               shaping: Shaping::default(), use_neutral: false,
               lightness_lock: None,
               deficiency: None, tolerance: CONFLICT_TOLERANCE }
    }
}

/// The scale and the values derived from it.
#[derive(Debug, Clone, PartialEq)]
pub struct ScaleReport<C> {
    /// The scale as built.
    pub scale: Scale<C>,
    /// `scale` with the lightness of its left half on both halves
    /// (unchanged for sequential scales).
    pub corrected_left: Scale<C>,
    /// `scale` with the lightness of its right half on both halves
    /// (unchanged for sequential scales).
    pub corrected_right: Scale<C>,
    pub darker_side: Option<Side>,
    /// The scale to display: lightness lock, then deficiency applied.
    pub active: Scale<C>,
    /// Whether the diverging scale has conflicts with normal vision.
    pub has_conflicts: Option<bool>,
    /// Conflicts appearing only with a deficiency (diverging scales).
    pub deficiency_conflicts: Option<DeficiencyConflicts>,
}

impl ScaleConfig {
    /// Build the scale.  Sequential scales use the `end` anchor.
    pub fn build<C: RGBColor>(&self, start: Option<&C>, end: Option<&C>)
                              -> Option<Scale<C>> {
        match self.mode {
            ScaleMode::Sequential => SequentialScale::new(self.len)
                .shaping(self.shaping).exclude_neutral(self.use_neutral)
                .build(end),
            ScaleMode::Diverging => DivergingScale::new(self.len)
                .shaping(self.shaping).build(start, end),
        }
    }

    /// Build the scale and everything derived from it.  `None` if the
    /// number of colors is too small for the mode.
    pub fn report<C>(&self, start: Option<&C>, end: Option<&C>)
                     -> Option<ScaleReport<C>>
    where C: RGBColor + Clone {
        debug!(mode = ?self.mode, len = self.len, "building scale report");
        let scale = self.build(start, end)?;
        let diverging = self.mode == ScaleMode::Diverging;
        let (corrected_left, corrected_right) = if diverging {
            (correct_diverging_lightness(&scale, Side::Left),
             correct_diverging_lightness(&scale, Side::Right))
        } else {
            (scale.clone(), scale.clone())
        };
        let locked = match self.lightness_lock {
            Some(Side::Left) => &corrected_left,
            Some(Side::Right) => &corrected_right,
            None => &scale,
        };
        let active = simulate_scale(locked, self.deficiency);
        let has_conflicts = diverging.then(|| {
            diverging_conflicts(&scale, self.tolerance).into_iter().any(|c| c)
        });
        let deficiency_conflicts = if diverging {
            deficiency_conflicts(&scale, self.tolerance)
        } else {
            None
        };
        Some(ScaleReport { darker_side: darker_side(&scale),
                           scale, corrected_left, corrected_right, active,
                           has_conflicts, deficiency_conflicts })
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use rgb::RGB8;
    use pretty_assertions::assert_eq;

    const BLUE: RGB8 = RGB8 { r: 30, g: 60, b: 200 };
    const ORANGE: RGB8 = RGB8 { r: 230, g: 120, b: 20 };

    #[test]
    fn sequential_report() {
        let report = ScaleConfig::default()
            .report(Some(&ORANGE), Some(&BLUE)).unwrap();
        assert_eq!(report.scale.len(), 5);
        assert_eq!(report.scale[4], Some(BLUE));
        assert_eq!(report.active, report.scale);
        assert_eq!(report.corrected_left, report.scale);
        assert_eq!(report.has_conflicts, None);
        assert_eq!(report.deficiency_conflicts, None);
        assert_eq!(report.darker_side, Some(Side::Right));
    }

    #[test]
    fn diverging_report() {
        let config = ScaleConfig { mode: ScaleMode::Diverging, len: 7,
                                   lightness_lock: Some(Side::Left),
                                   deficiency: Some(Deficiency::Achromatopsia),
                                   ..ScaleConfig::default() };
        let report = config.report(Some(&BLUE), Some(&ORANGE)).unwrap();
        assert_eq!(report.darker_side, Some(Side::Left));
        assert_eq!(report.active,
                   simulate_scale(&report.corrected_left,
                                  Some(Deficiency::Achromatopsia)));
        assert!(report.has_conflicts.is_some());
        assert!(report.deficiency_conflicts.is_some());
    }

    #[test]
    fn neutral_point() {
        const WHITE: RGB8 = RGB8 { r: 255, g: 255, b: 255 };
        let with_white = ScaleConfig::default()
            .report(None, Some(&BLUE)).unwrap();
        assert_eq!(with_white.scale[0], Some(WHITE));
        let config = ScaleConfig { use_neutral: true, ..ScaleConfig::default() };
        let report = config.report(None, Some(&BLUE)).unwrap();
        assert_eq!(report.scale.len(), 5);
        assert_eq!(report.scale[4], Some(BLUE));
        assert!(report.scale.iter().all(|c| c.is_some() && *c != Some(WHITE)));
        assert_eq!(report.scale,
                   SequentialScale::new(5).exclude_neutral(true)
                       .build(Some(&BLUE)).unwrap());
        let config: ScaleConfig =
            serde_json::from_str(r#"{"use_neutral": true}"#).unwrap();
        assert!(config.use_neutral);
        // Diverging halves always drop their neutral point.
        let diverging = ScaleConfig { mode: ScaleMode::Diverging, len: 6,
                                      ..ScaleConfig::default() };
        let a = diverging.report(Some(&BLUE), Some(&ORANGE)).unwrap();
        let b = ScaleConfig { use_neutral: true, ..diverging }
            .report(Some(&BLUE), Some(&ORANGE)).unwrap();
        assert_eq!(a.scale, b.scale);
    }

    #[test]
    fn too_short() {
        let config = ScaleConfig { mode: ScaleMode::Diverging, len: 4,
                                   ..ScaleConfig::default() };
        assert_eq!(config.report(Some(&BLUE), Some(&ORANGE)), None);
    }

    #[test]
    fn config_from_json() {
        let config: ScaleConfig = serde_json::from_str(r#"{
            "mode": "diverging",
            "len": 9,
            "shaping": {"hue_shift": -0.1, "lightness_shift": 0.8},
            "lightness_lock": "right",
            "deficiency": "deuteranopia"
        }"#).unwrap();
        assert_eq!(config, ScaleConfig {
            mode: ScaleMode::Diverging, len: 9,
            shaping: Shaping { hue_shift: -0.1, saturation_shift: 0.,
                               lightness_shift: 0.8 },
            use_neutral: false,
            lightness_lock: Some(Side::Right),
            deficiency: Some(Deficiency::Deuteranopia),
            tolerance: CONFLICT_TOLERANCE,
        });
    }
}
