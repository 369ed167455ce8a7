//! Sub-table reshaping.
//!
//! A sub-table arrives metric-major: row 0 lists the periods, each further row
//! holds one metric across those periods. [`reshape_report`] transposes it into
//! a period-major DataFrame led by the [`PERIOD_COLUMN`] column.

use polars::prelude::*;
use serde_json::Value;
use std::collections::HashSet;
use ths_core::{DataError, PERIOD_COLUMN, Result, SubTable};
use tracing::debug;

use crate::payload::FinancePayload;

/// Reshapes one sub-table of `payload` into a period-indexed DataFrame.
///
/// The result has one row per period (in header order) and one string column
/// per metric label (in title order). Cells are copied positionally: the value
/// for period `p` and metric `m` is `rows[1 + m][p]`.
///
/// Repeated labels are made unique with [`unique_column_names`].
///
/// Fails if the sub-table is missing or empty, if the number of metric rows
/// differs from the number of metric labels, or if a metric row is not as wide
/// as the header.
pub fn reshape_report(payload: &FinancePayload, sub_table: SubTable) -> Result<DataFrame> {
    let labels = payload.metric_labels();
    let rows = payload.sub_table(sub_table)?;

    let (header, metric_rows) = rows.split_first().ok_or_else(|| {
        DataError::Parse(format!("Sub-table `{}` has no header row", sub_table.key()))
    })?;

    if metric_rows.len() != labels.len() {
        return Err(DataError::Parse(format!(
            "Sub-table `{}` has {} metric rows but the title lists {} metrics",
            sub_table.key(),
            metric_rows.len(),
            labels.len()
        )));
    }

    debug!(
        sub_table = sub_table.key(),
        periods = header.len(),
        metrics = labels.len(),
        "Reshaping sub-table"
    );

    let periods: Vec<Option<String>> = header.iter().map(cell_text).collect();
    let names =
        unique_column_names(std::iter::once(PERIOD_COLUMN).chain(labels.iter().copied()));

    let mut columns = Vec::with_capacity(names.len());
    columns.push(Column::new(names[0].as_str().into(), periods));

    for ((label, name), row) in labels.iter().zip(&names[1..]).zip(metric_rows) {
        if row.len() != header.len() {
            return Err(DataError::Parse(format!(
                "Metric `{label}` has {} values for {} periods",
                row.len(),
                header.len()
            )));
        }

        let values: Vec<Option<String>> = row.iter().map(cell_text).collect();
        columns.push(Column::new(name.as_str().into(), values));
    }

    DataFrame::new(columns).map_err(|e| DataError::Other(e.to_string()))
}

/// Makes column names unique, keeping their order. A repeated name gets the
/// first free `_1`, `_2`, ... suffix.
#[must_use]
pub fn unique_column_names<'a>(names: impl IntoIterator<Item = &'a str>) -> Vec<String> {
    let mut taken = HashSet::new();

    names
        .into_iter()
        .map(|name| {
            let mut unique = name.to_string();
            let mut suffix = 1;
            while taken.contains(&unique) {
                unique = format!("{name}_{suffix}");
                suffix += 1;
            }
            taken.insert(unique.clone());
            unique
        })
        .collect()
}

/// Renders a payload cell as text. Strings are kept verbatim, other scalars use
/// their JSON form, and `null` becomes a missing value.
#[must_use]
pub fn cell_text(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(text) => Some(text.clone()),
        other => Some(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{FINANCE_PAYLOAD, cell, column_names};
    use serde_json::json;

    fn payload() -> FinancePayload {
        FinancePayload::from_json(FINANCE_PAYLOAD).unwrap()
    }

    #[test]
    fn test_shape_and_leading_column() {
        let payload = payload();

        for (sub_table, periods) in [
            (SubTable::Report, 3),
            (SubTable::Simple, 2),
            (SubTable::Year, 2),
        ] {
            let df = reshape_report(&payload, sub_table).unwrap();
            assert_eq!(df.height(), periods);
            assert_eq!(df.width(), payload.metric_labels().len() + 1);
            assert_eq!(column_names(&df)[0], PERIOD_COLUMN);
        }
    }

    #[test]
    fn test_column_order_follows_title() {
        let df = reshape_report(&payload(), SubTable::Report).unwrap();
        assert_eq!(
            column_names(&df),
            vec!["报告期", "净利润", "净利润同比增长率", "基本每股收益"]
        );
    }

    #[test]
    fn test_transpose_is_positional() {
        let payload = payload();
        let rows = payload.sub_table(SubTable::Report).unwrap();
        let labels = payload.metric_labels();
        let df = reshape_report(&payload, SubTable::Report).unwrap();

        for (p, period) in rows[0].iter().enumerate() {
            assert_eq!(cell(&df, PERIOD_COLUMN, p), cell_text(period));

            for (m, label) in labels.iter().enumerate() {
                assert_eq!(cell(&df, label, p), cell_text(&rows[1 + m][p]));
            }
        }
    }

    #[test]
    fn test_cells_are_not_coerced() {
        let df = reshape_report(&payload(), SubTable::Year).unwrap();

        assert_eq!(cell(&df, "报告期", 0).as_deref(), Some("2023"));
        assert_eq!(cell(&df, "净利润", 1).as_deref(), Some("80.80亿"));
        assert_eq!(cell(&df, "基本每股收益", 0).as_deref(), Some("1.96"));
        assert_eq!(cell(&df, "净利润同比增长率", 1), None);
    }

    #[test]
    fn test_cell_text() {
        assert_eq!(cell_text(&json!("1.2亿")).as_deref(), Some("1.2亿"));
        assert_eq!(cell_text(&json!(0.5)).as_deref(), Some("0.5"));
        assert_eq!(cell_text(&json!(false)).as_deref(), Some("false"));
        assert_eq!(cell_text(&json!(null)), None);
    }

    #[test]
    fn test_empty_sub_table() {
        let payload = FinancePayload::from_json(r#"{"title": ["科目"], "report": []}"#).unwrap();
        assert!(matches!(
            reshape_report(&payload, SubTable::Report),
            Err(DataError::Parse(_))
        ));
    }

    #[test]
    fn test_metric_count_mismatch() {
        let payload = FinancePayload::from_json(
            r#"{"title": ["科目", "营业收入", "净利润"], "report": [["2024-06-30"], ["1"]]}"#,
        )
        .unwrap();

        assert!(matches!(
            reshape_report(&payload, SubTable::Report),
            Err(DataError::Parse(_))
        ));
    }

    #[test]
    fn test_ragged_metric_row() {
        let payload = FinancePayload::from_json(
            r#"{"title": ["科目", "营业收入"], "report": [["2024-06-30", "2024-03-31"], ["1"]]}"#,
        )
        .unwrap();

        assert!(matches!(
            reshape_report(&payload, SubTable::Report),
            Err(DataError::Parse(_))
        ));
    }

    #[test]
    fn test_duplicate_labels_are_suffixed() {
        let payload = FinancePayload::from_json(
            r#"{"title": ["科目", "其他", "其他", "报告期"], "report": [["2024"], ["1"], ["2"], ["3"]]}"#,
        )
        .unwrap();
        let df = reshape_report(&payload, SubTable::Report).unwrap();

        assert_eq!(df.width(), payload.metric_labels().len() + 1);
        assert_eq!(column_names(&df), vec!["报告期", "其他", "其他_1", "报告期_1"]);
        assert_eq!(cell(&df, "其他", 0).as_deref(), Some("1"));
        assert_eq!(cell(&df, "其他_1", 0).as_deref(), Some("2"));
        assert_eq!(cell(&df, "报告期_1", 0).as_deref(), Some("3"));
    }

    #[test]
    fn test_unique_column_names() {
        assert_eq!(
            unique_column_names(["a", "b", "a", "a_1", "a", "", ""]),
            vec!["a", "b", "a_1", "a_1_1", "a_2", "", "_1"]
        );
        assert_eq!(unique_column_names(["x", "y"]), vec!["x", "y"]);
    }

    #[test]
    fn test_header_only() {
        let payload =
            FinancePayload::from_json(r#"{"title": ["科目"], "year": [["2023", "2022"]]}"#)
                .unwrap();
        let df = reshape_report(&payload, SubTable::Year).unwrap();

        assert_eq!(df.shape(), (2, 1));
        assert_eq!(cell(&df, PERIOD_COLUMN, 1).as_deref(), Some("2022"));
    }
}
