//! CSV writing operations.

use std::{fs::File, path::Path};

use anyhow::{ensure, Context, Result};
use polars::{frame::DataFrame, io::SerWriter, prelude::{Column, CsvWriter, NamedFrom}};

use crate::metrics::{MetricRow, MetricValue};

/// Build a table with one row per region and columns `region, area, <metrics...>`.
///
/// Count metrics become integer columns, everything else is `f64`. Every row
/// must carry the same metric columns in the same order.
pub fn rows_to_dataframe(rows: &[MetricRow]) -> Result<DataFrame> {
    let names = rows.first()
        .map(|row| row.metrics().iter().map(|(name, _)| name.clone()).collect::<Vec<_>>())
        .unwrap_or_default();

    for row in rows {
        ensure!(
            row.metrics().len() == names.len()
                && row.metrics().iter().zip(&names).all(|((name, _), expected)| name == expected),
            "[io::csv::write] row for region {:?} has columns {:?}, expected {:?}",
            row.region(), row.columns(), names,
        );
    }

    let mut columns = vec![
        Column::new("region".into(), rows.iter().map(|row| row.region().to_string()).collect::<Vec<_>>()),
        Column::new("area".into(), rows.iter().map(MetricRow::area).collect::<Vec<_>>()),
    ];

    for (i, name) in names.iter().enumerate() {
        let is_count = matches!(rows[0].metrics()[i].1, MetricValue::Count(_));
        let column = if is_count {
            Column::new(name.as_str().into(), rows.iter()
                .map(|row| row.metrics()[i].1.as_f64() as u64)
                .collect::<Vec<_>>())
        } else {
            Column::new(name.as_str().into(), rows.iter()
                .map(|row| row.metrics()[i].1.as_f64())
                .collect::<Vec<_>>())
        };
        columns.push(column);
    }

    DataFrame::new(columns).context("[io::csv::write] Failed to assemble metric table")
}

/// Write a DataFrame to a CSV file.
pub fn write_csv(df: &mut DataFrame, path: &Path) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("[io::csv::write] Failed to create CSV file: {}", path.display()))?;
    CsvWriter::new(file)
        .finish(df)
        .with_context(|| format!("[io::csv::write] Failed to write CSV to {:?}", path))
}

/// Write metric rows as a CSV table at `path`.
pub fn write_metric_table(rows: &[MetricRow], path: &Path) -> Result<()> {
    let mut df = rows_to_dataframe(rows)?;
    write_csv(&mut df, path)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_rows() -> Vec<MetricRow> {
        vec![
            MetricRow::new("north", 4.0, vec![
                ("n_streets".into(), MetricValue::Count(2)),
                ("density_streets".into(), MetricValue::Float(0.5)),
            ]),
            MetricRow::new("south", 8.0, vec![
                ("n_streets".into(), MetricValue::Count(4)),
                ("density_streets".into(), MetricValue::Float(0.5)),
            ]),
        ]
    }

    #[test]
    fn table_has_region_area_and_metric_columns() {
        let df = rows_to_dataframe(&make_rows()).unwrap();
        assert_eq!(df.height(), 2);
        let names = df.get_column_names().iter().map(|name| name.as_str()).collect::<Vec<_>>();
        assert_eq!(names, vec!["region", "area", "n_streets", "density_streets"]);
    }

    #[test]
    fn metric_table_file_has_header_and_one_line_per_region() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("results.csv");
        write_metric_table(&make_rows(), &path).unwrap();

        let csv = std::fs::read_to_string(&path).unwrap();
        let mut lines = csv.lines();
        assert_eq!(lines.next(), Some("region,area,n_streets,density_streets"));
        assert!(lines.next().unwrap().starts_with("north,"));
        assert!(lines.next().unwrap().starts_with("south,"));
        assert_eq!(lines.next(), None);
    }

    #[test]
    fn mismatched_rows_are_rejected() {
        let mut rows = make_rows();
        rows.push(MetricRow::new("west", 1.0, vec![]));
        assert!(rows_to_dataframe(&rows).is_err());
    }
}
