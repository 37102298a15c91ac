//! Draws a [`ChartSpec`] as a standalone SVG document.

use std::fmt::{self, Write};

use crate::chart::{BarChart, ChartSpec, LineChart};
use crate::math::palette::VIRIDIS;
use crate::model::record::Bounds;
use crate::render::{escape, format_value};

pub const WIDTH: f64 = 900.0;
pub const HEIGHT: f64 = 480.0;

const LEFT: f64 = 90.0;
const RIGHT: f64 = 120.0;
const TOP: f64 = 50.0;
const BOTTOM: f64 = 70.0;

/// Pixel rectangle the data is mapped into.
#[derive(Debug, Clone, Copy)]
struct PlotArea {
    x0: f64,
    y0: f64,
    w: f64,
    h: f64,
}

impl PlotArea {
    fn standard() -> Self {
        Self {
            x0: LEFT,
            y0: TOP,
            w: WIDTH - LEFT - RIGHT,
            h: HEIGHT - TOP - BOTTOM,
        }
    }

    fn bottom(&self) -> f64 {
        self.y0 + self.h
    }

    fn right(&self) -> f64 {
        self.x0 + self.w
    }

    /// Horizontal position of `v` between `min` and `max`; a zero-width
    /// range maps to the centre.
    fn map_x(&self, v: f64, min: f64, max: f64) -> f64 {
        if max > min {
            self.x0 + (v - min) / (max - min) * self.w
        } else {
            self.x0 + self.w / 2.0
        }
    }

    fn map_y(&self, v: f64, min: f64, max: f64) -> f64 {
        if max > min {
            self.bottom() - (v - min) / (max - min) * self.h
        } else {
            self.y0 + self.h / 2.0
        }
    }
}

pub fn to_svg(spec: &ChartSpec) -> String {
    let mut out = String::new();
    let _ = write_svg(&mut out, spec);
    out
}

pub fn write_svg<W: Write>(w: &mut W, spec: &ChartSpec) -> fmt::Result {
    let area = PlotArea::standard();
    writeln!(
        w,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{WIDTH}" height="{HEIGHT}" viewBox="0 0 {WIDTH} {HEIGHT}" font-family="sans-serif">"#
    )?;
    writeln!(w, r##"<rect width="100%" height="100%" fill="#ffffff"/>"##)?;
    writeln!(
        w,
        r#"<text x="{}" y="30" font-size="20" text-anchor="middle">{}</text>"#,
        WIDTH / 2.0,
        escape(spec.title())
    )?;

    match spec {
        ChartSpec::Bar(c) => {
            axis_labels(w, &area, &c.x_label, &c.y_label)?;
            frame(w, &area)?;
            if c.bars.is_empty() {
                no_data(w, &area)?;
            } else {
                bars(w, &area, c)?;
            }
        }
        ChartSpec::Line(c) => {
            axis_labels(w, &area, &c.x_label, &c.y_label)?;
            frame(w, &area)?;
            match (c.x_bounds, c.y_bounds) {
                (Some(xb), Some(yb)) => {
                    line(w, &area, c, xb, yb)?;
                    colorbar(w, &area, yb)?;
                }
                _ => no_data(w, &area)?,
            }
        }
    }

    writeln!(w, "</svg>")
}

fn frame<W: Write>(w: &mut W, a: &PlotArea) -> fmt::Result {
    writeln!(
        w,
        r##"<rect x="{}" y="{}" width="{}" height="{}" fill="none" stroke="#333333" stroke-width="1"/>"##,
        a.x0, a.y0, a.w, a.h
    )
}

fn axis_labels<W: Write>(w: &mut W, a: &PlotArea, x_label: &str, y_label: &str) -> fmt::Result {
    writeln!(
        w,
        r#"<text x="{}" y="{}" font-size="14" fill="red" text-anchor="middle">{}</text>"#,
        a.x0 + a.w / 2.0,
        HEIGHT - 15.0,
        escape(x_label)
    )?;
    let cy = a.y0 + a.h / 2.0;
    writeln!(
        w,
        r#"<text x="20" y="{cy}" font-size="14" fill="blue" text-anchor="middle" transform="rotate(-90 20 {cy})">{}</text>"#,
        escape(y_label)
    )
}

fn no_data<W: Write>(w: &mut W, a: &PlotArea) -> fmt::Result {
    writeln!(
        w,
        r##"<text x="{}" y="{}" font-size="18" fill="#888888" text-anchor="middle">No data</text>"##,
        a.x0 + a.w / 2.0,
        a.y0 + a.h / 2.0
    )
}

fn y_tick<W: Write>(w: &mut W, a: &PlotArea, y: f64, label: &str) -> fmt::Result {
    writeln!(
        w,
        r##"<line x1="{}" y1="{y}" x2="{}" y2="{y}" stroke="#dddddd" stroke-width="0.5"/>"##,
        a.x0,
        a.right()
    )?;
    writeln!(
        w,
        r#"<text x="{}" y="{}" font-size="11" text-anchor="end">{}</text>"#,
        a.x0 - 6.0,
        y + 4.0,
        escape(label)
    )
}

fn bars<W: Write>(w: &mut W, a: &PlotArea, c: &BarChart) -> fmt::Result {
    let max = c.bars.iter().map(|b| b.value).fold(0.0_f64, f64::max);
    // all-zero bars still get a usable scale
    let max = if max > 0.0 { max } else { 1.0 };
    for i in 0..=4 {
        let v = max * i as f64 / 4.0;
        y_tick(w, a, a.map_y(v, 0.0, max), &format_value(v))?;
    }

    let slot = a.w / c.bars.len() as f64;
    let bar_w = slot * 0.7;
    for (i, b) in c.bars.iter().enumerate() {
        let top = a.map_y(b.value, 0.0, max).min(a.bottom());
        let x = a.x0 + slot * i as f64 + (slot - bar_w) / 2.0;
        writeln!(
            w,
            r#"<rect x="{x:.1}" y="{top:.1}" width="{bar_w:.1}" height="{:.1}" fill="{}"><title>{}: {}</title></rect>"#,
            a.bottom() - top,
            b.color,
            escape(&b.label),
            format_value(b.value)
        )?;
        writeln!(
            w,
            r#"<text x="{:.1}" y="{}" font-size="12" text-anchor="middle">{}</text>"#,
            x + bar_w / 2.0,
            a.bottom() + 18.0,
            escape(&b.label)
        )?;
    }
    Ok(())
}

fn line<W: Write>(
    w: &mut W,
    a: &PlotArea,
    c: &LineChart,
    xb: Bounds<i32>,
    yb: Bounds<f64>,
) -> fmt::Result {
    let (x_min, x_max) = (xb.min as f64, xb.max as f64);
    for (v, label) in [(yb.min, format_value(yb.min)), (yb.max, format_value(yb.max))] {
        y_tick(w, a, a.map_y(v, yb.min, yb.max), &label)?;
    }
    for x in [xb.min, xb.max] {
        writeln!(
            w,
            r#"<text x="{:.1}" y="{}" font-size="12" text-anchor="middle">{x}</text>"#,
            a.map_x(x as f64, x_min, x_max),
            a.bottom() + 18.0
        )?;
    }

    for s in &c.segments {
        writeln!(
            w,
            r#"<line x1="{:.1}" y1="{:.1}" x2="{:.1}" y2="{:.1}" stroke="{}" stroke-width="2"/>"#,
            a.map_x(s.from.x as f64, x_min, x_max),
            a.map_y(s.from.y, yb.min, yb.max),
            a.map_x(s.to.x as f64, x_min, x_max),
            a.map_y(s.to.y, yb.min, yb.max),
            s.color
        )?;
    }
    // A lone point has no segment to carry its color.
    if c.segments.is_empty() {
        for p in &c.points {
            writeln!(
                w,
                r#"<circle cx="{:.1}" cy="{:.1}" r="3" fill="{}"/>"#,
                a.map_x(p.x as f64, x_min, x_max),
                a.map_y(p.y, yb.min, yb.max),
                VIRIDIS.sample(0.5)
            )?;
        }
    }
    Ok(())
}

fn colorbar<W: Write>(w: &mut W, a: &PlotArea, yb: Bounds<f64>) -> fmt::Result {
    let x = a.right() + 30.0;
    writeln!(w, r#"<defs><linearGradient id="ramp" x1="0" y1="1" x2="0" y2="0">"#)?;
    for i in 0..=10 {
        let t = i as f64 / 10.0;
        writeln!(
            w,
            r#"<stop offset="{t:.1}" stop-color="{}"/>"#,
            VIRIDIS.sample(t)
        )?;
    }
    writeln!(w, "</linearGradient></defs>")?;
    writeln!(
        w,
        r#"<rect x="{x}" y="{}" width="18" height="{}" fill="url(#ramp)"/>"#,
        a.y0, a.h
    )?;
    writeln!(
        w,
        r#"<text x="{}" y="{}" font-size="11">{}</text>"#,
        x + 24.0,
        a.y0 + 10.0,
        format_value(yb.max)
    )?;
    writeln!(
        w,
        r#"<text x="{}" y="{}" font-size="11">{}</text>"#,
        x + 24.0,
        a.bottom(),
        format_value(yb.min)
    )
}
