pub mod math;
pub mod model;
pub mod io;
pub mod query;
pub mod chart;
pub mod shell;
pub mod config;
pub mod render;
pub mod web;

pub use chart::{ChartRenderer, ChartSpec};
pub use io::dataset::{load_table, ColumnNames, LoadError};
pub use model::record::{Record, Table};
pub use query::{top_k_by_year, trend_for_entity, TopKResult, TrendResult, TOP_K};
