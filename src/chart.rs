//! Renderer-agnostic chart descriptions built from query results.
//!
//! A [`ChartSpec`] carries everything a display sink needs (titles, labels,
//! colors, axis bounds) and nothing about pixels.

use serde::Serialize;

use crate::math::palette::{normalize, Rgb, VIRIDIS};
use crate::model::record::Bounds;
use crate::query::{TopKResult, TrendResult, TOP_K};

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ChartSpec {
    Bar(BarChart),
    Line(LineChart),
}

impl ChartSpec {
    pub fn title(&self) -> &str {
        match self {
            ChartSpec::Bar(c) => &c.title,
            ChartSpec::Line(c) => &c.title,
        }
    }

    /// True when there is nothing to draw ("no data").
    pub fn is_empty(&self) -> bool {
        match self {
            ChartSpec::Bar(c) => c.bars.is_empty(),
            ChartSpec::Line(c) => c.points.is_empty(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BarChart {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub bars: Vec<Bar>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Bar {
    pub label: String,
    pub value: f64,
    pub color: Rgb,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LineChart {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub points: Vec<Point>,
    pub segments: Vec<Segment>,
    pub x_bounds: Option<Bounds<i32>>,
    pub y_bounds: Option<Bounds<f64>>,
    pub colorbar: Option<ColorBar>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Point {
    pub x: i32,
    pub y: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Segment {
    pub from: Point,
    pub to: Point,
    pub color: Rgb,
}

/// Value range the line colors were normalised against.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColorBar {
    pub ramp: &'static str,
    pub min: f64,
    pub max: f64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChartLabels {
    pub category: String,
    pub time: String,
    pub value: String,
}

impl Default for ChartLabels {
    fn default() -> Self {
        Self {
            category: "Country".to_string(),
            time: "Year".to_string(),
            value: "CO2 Emissions".to_string(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ChartRenderer {
    pub labels: ChartLabels,
}

impl ChartRenderer {
    pub fn new(labels: ChartLabels) -> Self {
        Self { labels }
    }

    /// One bar per record, colored by rank only.
    pub fn render_top_k(&self, result: &TopKResult) -> ChartSpec {
        let colors = VIRIDIS.sample_evenly(result.records.len());
        let bars = result
            .records
            .iter()
            .zip(colors)
            .map(|(r, color)| Bar { label: r.entity.clone(), value: r.value, color })
            .collect();
        ChartSpec::Bar(BarChart {
            title: format!(
                "Top {} {} by {} in {}",
                TOP_K, self.labels.value, self.labels.category, result.year
            ),
            x_label: self.labels.category.clone(),
            y_label: self.labels.value.clone(),
            bars,
        })
    }

    /// Line through the records in order, each segment colored by the value
    /// at its start point relative to the result's value range.
    pub fn render_trend(&self, result: &TrendResult) -> ChartSpec {
        let points: Vec<Point> = result
            .records
            .iter()
            .map(|r| Point { x: r.year, y: r.value })
            .collect();
        let x_bounds = result.year_bounds();
        let y_bounds = result.value_bounds();

        let segments = match y_bounds {
            Some(b) => points
                .windows(2)
                .map(|w| Segment {
                    from: w[0],
                    to: w[1],
                    color: segment_color(w[0].y, b),
                })
                .collect(),
            None => Vec::new(),
        };

        ChartSpec::Line(LineChart {
            title: format!("{} Over Time in {}", self.labels.value, result.entity),
            x_label: self.labels.time.clone(),
            y_label: self.labels.value.clone(),
            points,
            segments,
            x_bounds,
            y_bounds,
            colorbar: y_bounds.map(|b| ColorBar { ramp: "viridis", min: b.min, max: b.max }),
        })
    }
}

// A flat series has no range to normalise over; it gets the midpoint color.
fn segment_color(value: f64, bounds: Bounds<f64>) -> Rgb {
    let t = normalize(value, bounds.min, bounds.max).unwrap_or(0.5);
    VIRIDIS.sample(t)
}
