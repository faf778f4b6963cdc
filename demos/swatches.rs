use std::{env,
          io::{BufWriter, Write},
          fs::File,
          error::Error};
use rgb::RGB8;
use tracing_subscriber::EnvFilter;
use color_scale::{anchor_conflicts, diverging_conflicts, format_colour,
                  parse_colour, ColorRange, Deficiency, DistinctColours,
                  ExportFormat, ScaleConfig, ScaleMode, Shaping, Side,
                  Sinebow, GAMUT_COLOURS};
use color_scale::config::{INTERPOLATION_STEPS, NUM_RANDOM_COLOURS};

type Err = Box<dyn Error>;

fn table_of_colors(fh: &mut impl Write, colors: &[Option<RGB8>],
                   marks: &[bool], width: u32, comment: &str)
                   -> Result<(), Err> {
    writeln!(fh, "<table style=\"border: 0px;  border-spacing: 0px\"><tr>")?;
    for (i, c) in colors.iter().enumerate() {
        let bg = c.map_or("transparent".into(),
                          |c| format_colour(&c, ExportFormat::Hex));
        let mark = if marks.get(i).copied().unwrap_or(false) { "⚠" }
                   else { "" };
        writeln!(fh, "  <td style=\"width: {width}px; height: 30px; \
                      text-align: center; background-color: {bg}\">\
                      {mark}</td>")?;
    }
    writeln!(fh, "<td style=\"padding-left: 7px\">{comment}</td>\
                  </tr></table><br/>")?;
    Ok(())
}

fn range(fh: &mut impl Write,
         color: impl Fn(f64) -> RGB8, n: usize,
         width: u32, comment: &str) -> Result<(), Err> {
    let dt = 1. / (n - 1) as f64;
    let colors: Vec<_> = (0 .. n).map(move |i| Some(color(i as f64 * dt)))
        .collect();
    table_of_colors(fh, &colors, &[], width, comment)
}

fn scale(fh: &mut impl Write, config: &ScaleConfig, start: &str, end: &str,
         comment: &str) -> Result<(), Err> {
    let start = parse_colour(start)?;
    let end = parse_colour(end)?;
    let Some(report) = config.report(Some(&start), Some(&end)) else {
        writeln!(fh, "<p>{comment}: too few colors</p>")?;
        return Ok(())
    };
    let marks = if config.mode == ScaleMode::Diverging {
        let flags = diverging_conflicts(&report.active, config.tolerance);
        anchor_conflicts(&flags, report.active.len(), INTERPOLATION_STEPS)
    } else {
        vec![]
    };
    let mut comment = comment.to_string();
    if let Some(d) = report.deficiency_conflicts {
        for def in Deficiency::ALL.into_iter().filter(|&def| d.get(def)) {
            comment.push_str(&format!(" (conflicts with {def})"));
        }
    }
    table_of_colors(fh, &report.active, &marks, 43, &comment)
}


fn main() -> Result<(), Err> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();
    let mut fh = BufWriter::new(File::create("swatches.html")?);
    writeln!(fh, "<html>\n\
                  <head>\n\
                  <title>Color_scale: test {}</title>\n\
                  </head>\n\
                  <body>",
             env::args().next().unwrap_or_default())?;
    writeln!(fh, "<h3>Sinebow</h3>")?;
    let sinebow = Sinebow::<RGB8>::new();
    range(&mut fh, |t| sinebow.rgb(t), 30, 13, "")?;
    range(&mut fh, |t| sinebow.rgb(t), 150, 1, "")?;
    let gamut: Vec<_> = GAMUT_COLOURS.iter().map(|s| Some(s.colour)).collect();
    table_of_colors(&mut fh, &gamut, &[], 43, "gamut colors")?;

    writeln!(fh, "<h3>Sequential</h3>")?;
    for (len, shaping) in [(5, Shaping::default()),
                           (9, Shaping::default()),
                           (9, Shaping { hue_shift: 0.2,
                                         saturation_shift: 0.5,
                                         lightness_shift: 0.8 })] {
        let config = ScaleConfig { len, shaping, ..ScaleConfig::default() };
        let note = if shaping.is_recommended() { "" } else { " (unusual)" };
        scale(&mut fh, &config, "#fff", "#1f4e9c",
              &format!("{len} colors, {shaping:?}{note}"))?;
    }

    writeln!(fh, "<h3>Diverging</h3>")?;
    let diverging = ScaleConfig { mode: ScaleMode::Diverging, len: 9,
                                  ..ScaleConfig::default() };
    scale(&mut fh, &diverging, "#1f4e9c", "#c0392b", "blue–red")?;
    scale(&mut fh, &diverging, "rgb(200, 30, 30)", "rgb(30, 160, 30)",
          "red–green")?;
    scale(&mut fh, &ScaleConfig { lightness_lock: Some(Side::Left),
                                  ..diverging },
          "#1f4e9c", "#f1c40f", "blue–yellow, left lightness")?;
    for d in Deficiency::ALL {
        scale(&mut fh, &ScaleConfig { deficiency: Some(d), ..diverging },
              "rgb(200, 30, 30)", "rgb(30, 160, 30)",
              &format!("red–green, {d}"))?;
    }

    writeln!(fh, "<h3>Distinct colors</h3>")?;
    let mut picker = DistinctColours::new(2024);
    for _ in 0 .. 3 {
        let colors: Vec<RGB8> = picker.fill(NUM_RANDOM_COLOURS, vec![]);
        let colors: Vec<_> = colors.into_iter().map(Some).collect();
        table_of_colors(&mut fh, &colors, &[], 43, "")?;
    }

    writeln!(fh, "</body>\n\
                  </html>")?;
    Ok(())
}
