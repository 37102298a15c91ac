use std::num::{ParseFloatError, ParseIntError};
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::model::record::{Record, Table};

/// Header names of the three required columns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnNames {
    pub entity: String,
    pub year: String,
    pub value: String,
}

impl Default for ColumnNames {
    fn default() -> Self {
        Self {
            entity: "Country".to_string(),
            year: "Year".to_string(),
            value: "CO2 Emissions".to_string(),
        }
    }
}

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to open dataset {path:?}")]
    Open {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("failed to read dataset header")]
    Header(#[source] csv::Error),

    #[error("dataset is missing required column '{column}'")]
    MissingColumn { column: String },

    #[error("failed to read dataset row near line {line}")]
    Row {
        line: u64,
        #[source]
        source: csv::Error,
    },

    #[error("line {line}: year '{raw}' is not an integer")]
    ParseYear {
        line: u64,
        raw: String,
        #[source]
        source: ParseIntError,
    },

    #[error("line {line}: value '{raw}' is not a number")]
    ParseValue {
        line: u64,
        raw: String,
        #[source]
        source: ParseFloatError,
    },

    #[error("line {line}: value {value} must be finite and non-negative")]
    InvalidValue { line: u64, value: f64 },
}

/// Load the emissions table from a CSV file with a header row.
///
/// Only the three columns named in `columns` are read; anything else in the
/// file is ignored. The first bad row aborts the whole load.
pub fn load_table(path: impl AsRef<Path>, columns: &ColumnNames) -> Result<Table, LoadError> {
    let path = path.as_ref();
    let rdr = reader_builder().from_path(path).map_err(|source| LoadError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    let table = read_table(rdr, columns)?;
    tracing::info!(path = %path.display(), records = table.len(), "loaded dataset");
    Ok(table)
}

/// Same as [`load_table`] over any reader.
pub fn load_table_from_reader<R: std::io::Read>(
    reader: R,
    columns: &ColumnNames,
) -> Result<Table, LoadError> {
    read_table(reader_builder().from_reader(reader), columns)
}

fn reader_builder() -> csv::ReaderBuilder {
    let mut builder = csv::ReaderBuilder::new();
    builder.has_headers(true).trim(csv::Trim::All);
    builder
}

fn read_table<R: std::io::Read>(
    mut rdr: csv::Reader<R>,
    columns: &ColumnNames,
) -> Result<Table, LoadError> {
    let headers = rdr.headers().map_err(LoadError::Header)?.clone();
    let find = |name: &str| {
        headers
            .iter()
            .position(|h| h == name.trim())
            .ok_or_else(|| LoadError::MissingColumn { column: name.to_string() })
    };
    let entity_idx = find(columns.entity.as_str())?;
    let year_idx = find(columns.year.as_str())?;
    let value_idx = find(columns.value.as_str())?;

    let mut records = Vec::new();
    for result in rdr.records() {
        let row = result.map_err(|source| LoadError::Row {
            line: source.position().map(|p| p.line()).unwrap_or(0),
            source,
        })?;
        let line = row.position().map(|p| p.line()).unwrap_or(0);
        // Rows are length-checked by the csv reader, so the indexes exist.
        let entity = row.get(entity_idx).unwrap_or_default();
        let year_raw = row.get(year_idx).unwrap_or_default();
        let value_raw = row.get(value_idx).unwrap_or_default();

        let year = year_raw.parse::<i32>().map_err(|source| LoadError::ParseYear {
            line,
            raw: year_raw.to_string(),
            source,
        })?;
        let value = value_raw.parse::<f64>().map_err(|source| LoadError::ParseValue {
            line,
            raw: value_raw.to_string(),
            source,
        })?;
        if !value.is_finite() || value < 0.0 {
            return Err(LoadError::InvalidValue { line, value });
        }
        // "-0" passes the sign check; store it as plain zero.
        let value = value + 0.0;
        records.push(Record::new(entity, year, value));
    }
    Ok(Table::new(records))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn load(csv: &str) -> Result<Table, LoadError> {
        load_table_from_reader(csv.as_bytes(), &ColumnNames::default())
    }

    #[test]
    fn reads_required_columns_and_ignores_extras() {
        let t = load("Country,Code,Year,CO2 Emissions\nChina,CHN,2020,100.5\nIndia,IND,2020,80\n")
            .unwrap();
        assert_eq!(
            t.records(),
            &[Record::new("China", 2020, 100.5), Record::new("India", 2020, 80.0)]
        );
    }

    #[test]
    fn columns_can_appear_in_any_order() {
        let t = load("CO2 Emissions,Year,Country\n7,1900,Spain\n").unwrap();
        assert_eq!(t.records(), &[Record::new("Spain", 1900, 7.0)]);
    }

    #[test]
    fn cells_are_trimmed() {
        let t = load("Country, Year ,CO2 Emissions\n Japan , 2001 , 3.5 \n").unwrap();
        assert_eq!(t.records(), &[Record::new("Japan", 2001, 3.5)]);
    }

    #[test]
    fn custom_column_names() {
        let cols = ColumnNames {
            entity: "Entity".into(),
            year: "Year".into(),
            value: "Annual CO2".into(),
        };
        let t = load_table_from_reader("Entity,Year,Annual CO2\nFrance,1990,1\n".as_bytes(), &cols)
            .unwrap();
        assert_eq!(t.len(), 1);
        assert_eq!(t.records()[0].entity, "France");
    }

    #[test]
    fn missing_column_is_reported() {
        let err = load("Country,Year\nChina,2020\n").unwrap_err();
        match err {
            LoadError::MissingColumn { column } => assert_eq!(column, "CO2 Emissions"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn malformed_year_fails_the_load() {
        let err = load("Country,Year,CO2 Emissions\nChina,2020,1\nChina,20x1,2\n").unwrap_err();
        match err {
            LoadError::ParseYear { line, raw, .. } => {
                assert_eq!(line, 3);
                assert_eq!(raw, "20x1");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn empty_value_cell_fails_the_load() {
        let err = load("Country,Year,CO2 Emissions\nChina,2020,\n").unwrap_err();
        assert!(matches!(err, LoadError::ParseValue { line: 2, .. }));
    }

    #[test]
    fn negative_and_nan_values_are_rejected() {
        let err = load("Country,Year,CO2 Emissions\nChina,2020,-1\n").unwrap_err();
        assert!(matches!(err, LoadError::InvalidValue { line: 2, .. }));
        let err = load("Country,Year,CO2 Emissions\nChina,2020,NaN\n").unwrap_err();
        assert!(matches!(err, LoadError::InvalidValue { .. }));
    }

    #[test]
    fn negative_zero_is_stored_as_zero() {
        let t = load("Country,Year,CO2 Emissions\nA,2000,-0\nB,2000,0\n").unwrap();
        assert!(t.iter().all(|r| r.value == 0.0 && r.value.is_sign_positive()));
    }

    #[test]
    fn ragged_row_fails_the_load() {
        let err = load("Country,Year,CO2 Emissions\nChina,2020\n").unwrap_err();
        assert!(matches!(err, LoadError::Row { .. }));
    }

    #[test]
    fn header_only_file_is_an_empty_table() {
        let t = load("Country,Year,CO2 Emissions\n").unwrap();
        assert!(t.is_empty());
    }

    #[test]
    fn missing_file_is_an_open_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_table(dir.path().join("nope.csv"), &ColumnNames::default()).unwrap_err();
        assert!(matches!(err, LoadError::Open { .. }));
    }

    #[test]
    fn loads_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("co.csv");
        std::fs::write(&path, "Country,Year,CO2 Emissions\nBrazil,2010,4.25\n").unwrap();
        let t = load_table(&path, &ColumnNames::default()).unwrap();
        assert_eq!(t.records(), &[Record::new("Brazil", 2010, 4.25)]);
    }
}
