//! The analysis page: input form on top, results below.

use std::fmt::{self, Write};

use crate::chart::ChartLabels;
use crate::query::TopKResult;
use crate::render::svg::write_svg;
use crate::render::{escape, format_value};
use crate::shell::{Analysis, AnalysisRequest, Section, KNOWN_ENTITIES};

pub const PAGE_TITLE: &str = "CO2 Emissions Analysis";

const DESCRIPTION: &str = "<strong>Analyses and visualises CO2 emissions by year and by country \
for 1850-2022.</strong><br>\n\
1) Enter a year to see the five countries with the highest emissions that year as a bar chart.<br>\n\
2) Select a country to see its emissions trend from 1850 to 2022 as a line chart.";

const STYLE: &str = "body{font-family:sans-serif;max-width:960px;margin:2em auto;padding:0 1em}\
table{border-collapse:collapse;margin:1em 0}td,th{border:1px solid #ccc;padding:4px 10px}\
td.num{text-align:right}.nodata{color:#888}";

/// Render the page. `analysis` is `None` until the form has been submitted.
pub fn render_page(
    labels: &ChartLabels,
    req: &AnalysisRequest,
    analysis: Option<&Analysis>,
) -> String {
    let mut out = String::new();
    let _ = write_page(&mut out, labels, req, analysis);
    out
}

fn write_page<W: Write>(
    w: &mut W,
    labels: &ChartLabels,
    req: &AnalysisRequest,
    analysis: Option<&Analysis>,
) -> fmt::Result {
    writeln!(w, "<!DOCTYPE html>")?;
    writeln!(w, r#"<html lang="en"><head><meta charset="utf-8">"#)?;
    writeln!(w, "<title>{PAGE_TITLE}</title><style>{STYLE}</style></head><body>")?;
    writeln!(w, "<h1>{PAGE_TITLE}</h1>")?;
    writeln!(w, "<p>{DESCRIPTION}</p>")?;
    form(w, labels, req)?;

    if let Some(a) = analysis {
        writeln!(w, "<p><strong>{}</strong></p>", escape(&a.headline))?;
        for section in &a.sections {
            writeln!(w, "<section>")?;
            writeln!(w, "<h2>{}</h2>", escape(section.caption()))?;
            match section {
                Section::TopK { result, .. } => preview_table(w, labels, result)?,
                Section::Trend { result, .. } if result.is_empty() => {
                    writeln!(
                        w,
                        r#"<p class="nodata">No data for {}.</p>"#,
                        escape(&result.entity)
                    )?;
                }
                Section::Trend { .. } => {}
            }
            write_svg(w, section.chart())?;
            writeln!(w, "</section>")?;
        }
    }

    writeln!(w, "</body></html>")
}

fn form<W: Write>(w: &mut W, labels: &ChartLabels, req: &AnalysisRequest) -> fmt::Result {
    writeln!(w, r#"<form method="get" action="/">"#)?;
    writeln!(
        w,
        r#"<label>{} <input type="text" name="year" placeholder="Year (1850-2022)" value="{}"></label>"#,
        escape(&labels.time),
        escape(req.year.as_deref().unwrap_or_default())
    )?;
    writeln!(
        w,
        r#"<label>Select a {} <select name="country">"#,
        escape(&labels.category)
    )?;
    let chosen = req.country.as_deref().unwrap_or_default();
    writeln!(w, r#"<option value=""></option>"#)?;
    for e in KNOWN_ENTITIES {
        let selected = if e == chosen { " selected" } else { "" };
        writeln!(w, r#"<option value="{0}"{selected}>{0}</option>"#, escape(e))?;
    }
    writeln!(w, "</select></label>")?;
    writeln!(w, r#"<button type="submit">Analysis</button>"#)?;
    writeln!(w, "</form>")
}

fn preview_table<W: Write>(w: &mut W, labels: &ChartLabels, result: &TopKResult) -> fmt::Result {
    if result.is_empty() {
        return writeln!(w, r#"<p class="nodata">No data for {}.</p>"#, result.year);
    }
    writeln!(
        w,
        "<table><tr><th>#</th><th>{}</th><th>{}</th><th>{}</th></tr>",
        escape(&labels.category),
        escape(&labels.time),
        escape(&labels.value)
    )?;
    for (rank, r) in result.records.iter().enumerate() {
        writeln!(
            w,
            r#"<tr><td>{}</td><td>{}</td><td>{}</td><td class="num">{}</td></tr>"#,
            rank + 1,
            escape(&r.entity),
            r.year,
            format_value(r.value)
        )?;
    }
    writeln!(w, "</table>")
}
