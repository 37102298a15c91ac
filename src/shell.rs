//! Turns the raw form inputs (a year string and a country choice) into the
//! analyses to run.

use serde::{Deserialize, Serialize};

use crate::chart::{ChartRenderer, ChartSpec};
use crate::model::record::Table;
use crate::query::{top_k_by_year, trend_for_entity, TopKResult, TrendResult, TOP_K};

/// Countries offered in the selection list, in display order.
pub const KNOWN_ENTITIES: [&str; 20] = [
    "China",
    "United States",
    "India",
    "Russia",
    "Japan",
    "Germany",
    "Brazil",
    "Canada",
    "South Korea",
    "Indonesia",
    "Mexico",
    "Saudi Arabia",
    "Australia",
    "Iran",
    "United Kingdom",
    "France",
    "Italy",
    "Turkey",
    "South Africa",
    "Spain",
];

pub const PROMPT: &str = "Enter a Country or Year please";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum YearInput {
    Absent,
    /// Present but not a plain run of ASCII digits that fits an `i32`.
    Invalid(String),
    Year(i32),
}

impl YearInput {
    pub fn parse(raw: Option<&str>) -> Self {
        match raw {
            None | Some("") => YearInput::Absent,
            Some(s) if s.bytes().all(|b| b.is_ascii_digit()) => match s.parse::<i32>() {
                Ok(y) => YearInput::Year(y),
                Err(_) => YearInput::Invalid(s.to_string()),
            },
            Some(s) => YearInput::Invalid(s.to_string()),
        }
    }

    pub fn year(&self) -> Option<i32> {
        match self {
            YearInput::Year(y) => Some(*y),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntityInput {
    Absent,
    Unknown(String),
    Known(&'static str),
}

impl EntityInput {
    pub fn parse(raw: Option<&str>) -> Self {
        match raw {
            None | Some("") => EntityInput::Absent,
            Some(s) => match KNOWN_ENTITIES.iter().find(|&&e| e == s) {
                Some(e) => EntityInput::Known(*e),
                None => EntityInput::Unknown(s.to_string()),
            },
        }
    }

    pub fn entity(&self) -> Option<&'static str> {
        match self {
            EntityInput::Known(e) => Some(*e),
            _ => None,
        }
    }
}

/// Raw inputs as submitted by the page form or a JSON client.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisRequest {
    #[serde(default)]
    pub year: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Section {
    TopK {
        caption: String,
        result: TopKResult,
        chart: ChartSpec,
    },
    Trend {
        caption: String,
        result: TrendResult,
        chart: ChartSpec,
    },
}

impl Section {
    pub fn caption(&self) -> &str {
        match self {
            Section::TopK { caption, .. } | Section::Trend { caption, .. } => caption,
        }
    }

    pub fn chart(&self) -> &ChartSpec {
        match self {
            Section::TopK { chart, .. } | Section::Trend { chart, .. } => chart,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Analysis {
    pub headline: String,
    pub sections: Vec<Section>,
}

impl Analysis {
    /// Nothing usable was submitted; only the prompt is shown.
    pub fn is_prompt(&self) -> bool {
        self.sections.is_empty()
    }
}

/// Run whichever analyses the inputs ask for: top-k first, then trend.
pub fn analyze(table: &Table, renderer: &ChartRenderer, req: &AnalysisRequest) -> Analysis {
    let year = YearInput::parse(req.year.as_deref());
    let entity = EntityInput::parse(req.country.as_deref());
    tracing::debug!(?year, ?entity, "parsed analysis inputs");

    let headline = match (year.year(), entity.entity()) {
        (Some(y), Some(e)) => format!("Year: {y}, Country: {e}"),
        (Some(y), None) => format!("Year: {y}"),
        (None, Some(e)) => format!("Country: {e}"),
        (None, None) => PROMPT.to_string(),
    };

    let mut sections = Vec::new();
    if let Some(y) = year.year() {
        let result = top_k_by_year(table, y, TOP_K);
        tracing::info!(year = y, rows = result.records.len(), "top emitters");
        sections.push(Section::TopK {
            caption: format!("Top {TOP_K} CO2 emitters in {y}:"),
            chart: renderer.render_top_k(&result),
            result,
        });
    }
    if let Some(e) = entity.entity() {
        let result = trend_for_entity(table, e);
        tracing::info!(entity = e, rows = result.records.len(), "emission trend");
        sections.push(Section::Trend {
            caption: format!("{e} CO2 emissions trend (1850-2022):"),
            chart: renderer.render_trend(&result),
            result,
        });
    }

    Analysis { headline, sections }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::record::Record;

    fn table() -> Table {
        vec![
            Record::new("China", 2019, 95.0),
            Record::new("United States", 2020, 90.0),
            Record::new("China", 2020, 100.0),
        ]
        .into_iter()
        .collect()
    }

    fn req(year: Option<&str>, country: Option<&str>) -> AnalysisRequest {
        AnalysisRequest {
            year: year.map(str::to_string),
            country: country.map(str::to_string),
        }
    }

    fn kinds(a: &Analysis) -> Vec<&'static str> {
        a.sections
            .iter()
            .map(|s| match s {
                Section::TopK { .. } => "top_k",
                Section::Trend { .. } => "trend",
            })
            .collect()
    }

    #[test]
    fn year_parsing() {
        assert_eq!(YearInput::parse(None), YearInput::Absent);
        assert_eq!(YearInput::parse(Some("")), YearInput::Absent);
        assert_eq!(YearInput::parse(Some("2020")), YearInput::Year(2020));
        assert_eq!(YearInput::parse(Some("0")), YearInput::Year(0));
        assert_eq!(YearInput::parse(Some(" 2020")), YearInput::Invalid(" 2020".into()));
        assert_eq!(YearInput::parse(Some("-5")), YearInput::Invalid("-5".into()));
        assert_eq!(YearInput::parse(Some("20.5")), YearInput::Invalid("20.5".into()));
        assert_eq!(YearInput::parse(Some("abc")), YearInput::Invalid("abc".into()));
        assert_eq!(
            YearInput::parse(Some("99999999999")),
            YearInput::Invalid("99999999999".into())
        );
    }

    #[test]
    fn entity_parsing() {
        assert_eq!(EntityInput::parse(None), EntityInput::Absent);
        assert_eq!(EntityInput::parse(Some("")), EntityInput::Absent);
        assert_eq!(EntityInput::parse(Some("Spain")), EntityInput::Known("Spain"));
        assert_eq!(EntityInput::parse(Some("spain")), EntityInput::Unknown("spain".into()));
    }

    #[test]
    fn both_inputs_run_top_k_then_trend() {
        let a = analyze(&table(), &ChartRenderer::default(), &req(Some("2020"), Some("China")));
        assert_eq!(a.headline, "Year: 2020, Country: China");
        assert_eq!(kinds(&a), ["top_k", "trend"]);
        assert_eq!(a.sections[0].caption(), "Top 5 CO2 emitters in 2020:");
        assert_eq!(a.sections[1].caption(), "China CO2 emissions trend (1850-2022):");
    }

    #[test]
    fn year_only() {
        let a = analyze(&table(), &ChartRenderer::default(), &req(Some("2020"), None));
        assert_eq!(a.headline, "Year: 2020");
        assert_eq!(kinds(&a), ["top_k"]);
        match &a.sections[0] {
            Section::TopK { result, .. } => {
                assert_eq!(result.records[0].entity, "China");
                assert_eq!(result.records[1].entity, "United States");
            }
            other => panic!("unexpected section {other:?}"),
        }
    }

    #[test]
    fn country_only() {
        let a = analyze(&table(), &ChartRenderer::default(), &req(None, Some("China")));
        assert_eq!(a.headline, "Country: China");
        assert_eq!(kinds(&a), ["trend"]);
    }

    #[test]
    fn invalid_year_counts_as_absent() {
        let a = analyze(&table(), &ChartRenderer::default(), &req(Some("20x0"), Some("China")));
        assert_eq!(a.headline, "Country: China");
        assert_eq!(kinds(&a), ["trend"]);
    }

    #[test]
    fn nothing_usable_is_a_prompt() {
        let a = analyze(&table(), &ChartRenderer::default(), &req(Some("abc"), Some("Atlantis")));
        assert!(a.is_prompt());
        assert_eq!(a.headline, PROMPT);
        let a = analyze(&table(), &ChartRenderer::default(), &AnalysisRequest::default());
        assert!(a.is_prompt());
    }

    #[test]
    fn empty_results_still_produce_sections() {
        let a = analyze(&table(), &ChartRenderer::default(), &req(Some("1999"), Some("Spain")));
        assert_eq!(kinds(&a), ["top_k", "trend"]);
        assert!(a.sections.iter().all(|s| s.chart().is_empty()));
    }
}
