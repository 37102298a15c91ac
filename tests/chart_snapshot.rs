use co2view::chart::ChartRenderer;
use co2view::io::dataset::{load_table, ColumnNames};
use co2view::query::{top_k_by_year, trend_for_entity, TOP_K};
use co2view::Table;

const CSV: &str = "\
Country,Year,CO2 Emissions
China,2018,90
India,2018,40
China,2019,95
India,2019,45
China,2020,100
United States,2020,90
India,2020,80
Russia,2020,70
Japan,2020,60
Germany,2020,50
";

fn load_fixture() -> Table {
    let tmp = tempfile::tempdir().expect("tempdir");
    let path = tmp.path().join("co.csv");
    std::fs::write(&path, CSV).expect("write fixture");
    load_table(&path, &ColumnNames::default()).expect("load fixture")
}

#[test]
fn top_five_bar_chart() {
    let table = load_fixture();
    let result = top_k_by_year(&table, 2020, TOP_K);
    let chart = ChartRenderer::default().render_top_k(&result);
    let json = serde_json::to_string_pretty(&chart).expect("serialize chart");
    insta::assert_snapshot!(json);
}

#[test]
fn china_trend_line_chart() {
    let table = load_fixture();
    let result = trend_for_entity(&table, "China");
    let chart = ChartRenderer::default().render_trend(&result);
    let json = serde_json::to_string_pretty(&chart).expect("serialize chart");
    insta::assert_snapshot!(json);
}
