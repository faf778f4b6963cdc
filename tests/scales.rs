use rgb::{RGB, RGB8};
use pretty_assertions::assert_eq;
use color_scale::{anchor_conflicts, diverging_conflicts, diverging_scale,
                  export_list, generate_distinct_colour_set, delta_e,
                  parse_colour, sequential_scale, simulate_scale, Deficiency,
                  ExportFormat, RGBColor, ScaleConfig, ScaleMode, Shaping};
use color_scale::config::INTERPOLATION_STEPS;

const WHITE: RGB8 = RGB8 { r: 255, g: 255, b: 255 };

fn lightness<C: RGBColor>(c: &Option<C>) -> f64 {
    c.as_ref().map_or(f64::NAN, |c| c.to_hsluv().l)
}

#[test]
fn red_sequential_scale() {
    let red = parse_colour("rgb(255, 0, 0)").unwrap();
    let scale = sequential_scale(Some(&red), 5, &Shaping::default()).unwrap();
    assert_eq!(scale.len(), 5);
    assert_eq!(scale[4], Some(red));
    assert_eq!(scale[0], Some(WHITE));
    assert!((lightness(&scale[0]) - 100.).abs() < 1e-6);
    for i in 0 .. 4 {
        assert!(lightness(&scale[i]) > lightness(&scale[i + 1]),
                "position {i}");
    }
}

#[test]
fn unset_anchor_propagates() {
    let scale = sequential_scale::<RGB8>(None, 6, &Shaping::default());
    assert_eq!(scale, Some(vec![None; 6]));
    let scale = diverging_scale::<RGB8>(None, None, 7, &Shaping::default());
    assert_eq!(scale, Some(vec![None; 7]));
    let blue = RGB8::new(30, 60, 200);
    let scale = diverging_scale(None, Some(&blue), 7, &Shaping::default())
        .unwrap();
    assert_eq!(scale.iter().filter(|c| c.is_some()).count(), 4);
    assert_eq!(scale[3], Some(WHITE));
    let seen = simulate_scale(&scale, Some(Deficiency::Tritanopia));
    assert_eq!(seen[.. 3].iter().filter(|c| c.is_none()).count(), 3);
    assert_eq!(seen[3], Some(WHITE));
    assert_eq!(export_list(&scale, ExportFormat::Hex), None);
}

#[test]
fn diverging_lengths() {
    let a = parse_colour("#1f4e9c").unwrap();
    let b = parse_colour("#c0392b").unwrap();
    for n in 5 .. 12 {
        let scale = diverging_scale(Some(&a), Some(&b), n,
                                    &Shaping::default()).unwrap();
        assert_eq!(scale.len(), n);
        assert_eq!(scale[0], Some(a));
        assert_eq!(scale[n - 1], Some(b));
        if n % 2 == 1 {
            assert_eq!(scale[n / 2], Some(WHITE));
        } else {
            assert!(scale.iter().all(|c| *c != Some(WHITE)), "{n}: {scale:?}");
        }
    }
}

#[test]
fn distinct_colour_set() {
    let d = 0.1;
    let colors: Vec<RGB<f64>> = generate_distinct_colour_set(
        5, vec![], d, (60., 100.), (30., 70.));
    assert_eq!(colors.len(), 5);
    let black = RGB { r: 0., g: 0., b: 0. };
    for (i, a) in colors.iter().enumerate() {
        for b in &colors[i + 1 ..] {
            assert!(delta_e(a, b) >= d || *b == black, "{a:?} {b:?}");
        }
    }
}

#[test]
fn identical_anchors_conflict() {
    let blue = parse_colour("#1f4e9c").unwrap();
    let scale = diverging_scale(Some(&blue), Some(&blue), 9,
                                &Shaping::default()).unwrap();
    let none = diverging_conflicts(&scale, 0.);
    assert!(none.iter().all(|&f| !f));
    let all = diverging_conflicts(&scale, 1.);
    let flags = anchor_conflicts(&all, scale.len(), INTERPOLATION_STEPS);
    assert_eq!(flags, vec![true, true, true, true, false,
                           true, true, true, true]);
}

#[test]
fn report_pipeline() {
    let config: ScaleConfig = serde_json::from_str(
        r#"{"mode": "diverging", "len": 7, "deficiency": "achromatopsia"}"#)
        .unwrap();
    assert_eq!(config.mode, ScaleMode::Diverging);
    let start = parse_colour("#1f4e9c").unwrap();
    let end = parse_colour("#c0392b").unwrap();
    let report = config.report(Some(&start), Some(&end)).unwrap();
    assert_eq!(report.scale.len(), 7);
    for c in report.active.iter().flatten() {
        assert!(c.r == c.g && c.g == c.b, "{c:?} is not gray");
    }
    assert!(report.has_conflicts.is_some());
}
