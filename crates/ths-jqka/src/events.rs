//! Shareholder-change event table reconstruction.
//!
//! The event page renders its rows as a `table.m_table.data_table_1.m_hl`
//! whose body text loses the cell structure once flattened. Rows are recovered
//! by re-tokenizing that text and chunking the tokens by the header width.

use polars::prelude::*;
use scraper::{ElementRef, Html, Node, Selector};
use ths_core::{DataError, Result};
use tracing::{debug, warn};

use crate::reshape::unique_column_names;

/// Selector of the shareholder-change table.
pub const EVENT_TABLE_SELECTOR: &str = "table.m_table.data_table_1.m_hl";

/// Index of the header block among the table's child nodes.
const HEADER_BLOCK: usize = 1;

/// Index of the data block among the table's child nodes.
const DATA_BLOCK: usize = 3;

/// Parses the shareholder-change table out of a decoded event page.
///
/// A page without the table yields an empty DataFrame.
pub fn parse_shareholder_changes(html: &str) -> Result<DataFrame> {
    let document = Html::parse_document(html);
    let selector = Selector::parse(EVENT_TABLE_SELECTOR)
        .map_err(|e| DataError::Parse(format!("Invalid selector: {e}")))?;

    let Some(table) = document.select(&selector).next() else {
        warn!("No shareholder-change table in page");
        return Ok(DataFrame::empty());
    };

    let blocks = child_blocks(table);
    let block = |index: usize| {
        blocks.get(index).ok_or_else(|| {
            DataError::Parse(format!(
                "Event table has {} child blocks, expected at least {}",
                blocks.len(),
                index + 1
            ))
        })
    };

    let columns = header_columns(block(HEADER_BLOCK)?);
    let tokens = event_tokens(block(DATA_BLOCK)?);
    debug!(
        columns = columns.len(),
        tokens = tokens.len(),
        "Reconstructing event rows"
    );

    let rows = chunk_rows(tokens, columns.len());
    assemble(&columns, &rows)
}

/// Trimmed text of every direct child node of the table, text nodes included,
/// in document order.
fn child_blocks(table: ElementRef<'_>) -> Vec<String> {
    table
        .children()
        .map(|child| match child.value() {
            Node::Text(text) => text.trim().to_string(),
            Node::Element(_) => ElementRef::wrap(child)
                .map(|element| element.text().collect::<String>().trim().to_string())
                .unwrap_or_default(),
            _ => String::new(),
        })
        .collect()
}

/// Splits the header block into column names, one per line.
#[must_use]
pub fn header_columns(block: &str) -> Vec<String> {
    block.split('\n').map(str::to_string).collect()
}

/// Re-tokenizes the flattened data block.
///
/// Tabs are removed, blank lines joined, runs of three spaces turned into
/// separators and remaining spaces dropped. Empty tokens are discarded.
#[must_use]
pub fn event_tokens(block: &str) -> Vec<String> {
    block
        .replace('\t', "")
        .replace("\n\n", "")
        .replace("   ", "\n")
        .replace(' ', "")
        .replace("\n\n", "\n")
        .split('\n')
        .filter(|token| !token.is_empty())
        .map(str::to_string)
        .collect()
}

/// Groups tokens into rows of `column_count` cells. A short trailing row is
/// kept as is.
#[must_use]
pub fn chunk_rows(tokens: Vec<String>, column_count: usize) -> Vec<Vec<String>> {
    if column_count == 0 {
        return Vec::new();
    }

    if tokens.len() % column_count != 0 {
        warn!(
            tokens = tokens.len(),
            columns = column_count,
            "Event tokens do not fill the last row"
        );
    }

    tokens
        .chunks(column_count)
        .map(<[String]>::to_vec)
        .collect()
}

/// Builds a string DataFrame from header names and rows. Cells missing from a
/// short row are null and repeated header names are suffixed.
fn assemble(columns: &[String], rows: &[Vec<String>]) -> Result<DataFrame> {
    let columns = unique_column_names(columns.iter().map(String::as_str))
        .iter()
        .enumerate()
        .map(|(index, name)| {
            let values: Vec<Option<String>> =
                rows.iter().map(|row| row.get(index).cloned()).collect();
            Column::new(name.as_str().into(), values)
        })
        .collect::<Vec<_>>();

    DataFrame::new(columns).map_err(|e| DataError::Other(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{EVENT_PAGE, cell, column_names};
    use rstest::rstest;

    #[test]
    fn test_parse_event_page() {
        let df = parse_shareholder_changes(EVENT_PAGE).unwrap();

        assert_eq!(column_names(&df), vec!["股东", "变动日期", "变动数量"]);
        assert_eq!(df.shape(), (3, 3));
        assert_eq!(cell(&df, "股东", 0).as_deref(), Some("张三"));
        assert_eq!(cell(&df, "变动数量", 0).as_deref(), Some("1000"));
        assert_eq!(cell(&df, "变动日期", 1).as_deref(), Some("2024-02-03"));
        assert_eq!(cell(&df, "股东", 2).as_deref(), Some("王五"));
        assert_eq!(cell(&df, "变动数量", 2).as_deref(), Some("300"));
    }

    #[test]
    fn test_missing_table_is_empty() {
        let html = r#"<html><body><table class="m_table"><tr><td>x</td></tr></table></body></html>"#;
        let df = parse_shareholder_changes(html).unwrap();
        assert_eq!(df.shape(), (0, 0));
    }

    #[test]
    fn test_missing_data_block() {
        let html = "<html><body><table class=\"m_table data_table_1 m_hl\">\n\
                    <thead><tr><th>股东</th></tr></thead>\n</table></body></html>";
        assert!(matches!(
            parse_shareholder_changes(html),
            Err(DataError::Parse(_))
        ));
    }

    #[test]
    fn test_empty_data_block_keeps_columns() {
        let html = "<html><body><table class=\"m_table data_table_1 m_hl\">\n\
                    <thead><tr><th>股东</th>\n<th>变动日期</th></tr></thead>\n\
                    <tbody></tbody>\n</table></body></html>";
        let df = parse_shareholder_changes(html).unwrap();

        assert_eq!(column_names(&df), vec!["股东", "变动日期"]);
        assert_eq!(df.height(), 0);
    }

    #[test]
    fn test_repeated_headers_are_suffixed() {
        let html = "<html><body><table class=\"m_table data_table_1 m_hl\">\n\
                    <thead><tr><th>股东</th>\n\n<th>变动</th>\n<th>变动</th>\n</tr></thead>\n\
                    <tbody><tr><td>甲</td>   <td>x</td>   <td>1</td>   <td>2</td>   <td>3</td></tr></tbody>\n\
                    </table></body></html>";
        let df = parse_shareholder_changes(html).unwrap();

        assert_eq!(column_names(&df), vec!["股东", "", "变动", "变动_1"]);
        assert_eq!(df.shape(), (2, 4));
        assert_eq!(cell(&df, "变动", 0).as_deref(), Some("1"));
        assert_eq!(cell(&df, "变动_1", 0).as_deref(), Some("2"));
        assert_eq!(cell(&df, "股东", 1).as_deref(), Some("3"));
        assert_eq!(cell(&df, "变动_1", 1), None);
    }

    #[test]
    fn test_event_tokens() {
        let block = "\t张三   2024-01-02   1 000   \n\t李四   2024-02-03   -200";
        assert_eq!(
            event_tokens(block),
            vec!["张三", "2024-01-02", "1000", "李四", "2024-02-03", "-200"]
        );
    }

    #[rstest]
    #[case::blank_line_joins("股东\n\n甲   100", &["股东甲", "100"])]
    #[case::six_spaces("甲      乙", &["甲", "乙"])]
    #[case::four_spaces("甲    乙", &["甲", "乙"])]
    #[case::two_spaces_join("甲  乙", &["甲乙"])]
    #[case::tabs_only("\t甲\t\t乙", &["甲乙"])]
    #[case::whitespace_only(" \t \n ", &[])]
    fn test_event_tokens_heuristics(#[case] block: &str, #[case] expected: &[&str]) {
        assert_eq!(event_tokens(block), expected);
    }

    #[test]
    fn test_header_columns() {
        assert_eq!(
            header_columns("股东\n变动日期\n变动数量"),
            vec!["股东", "变动日期", "变动数量"]
        );
        assert_eq!(header_columns(""), vec![""]);
    }

    #[test]
    fn test_chunk_rows_exact() {
        let tokens: Vec<String> = (1..=9).map(|i| i.to_string()).collect();
        let rows = chunk_rows(tokens, 3);

        assert_eq!(rows.len(), 3);
        assert!(rows.iter().all(|row| row.len() == 3));
        assert_eq!(rows[0], vec!["1", "2", "3"]);
        assert_eq!(rows[2], vec!["7", "8", "9"]);
    }

    #[test]
    fn test_chunk_rows_short_tail() {
        let tokens: Vec<String> = ["a", "b", "c", "d"].map(str::to_string).to_vec();
        let rows = chunk_rows(tokens, 3);

        assert_eq!(rows, vec![vec!["a", "b", "c"], vec!["d"]]);
        assert!(chunk_rows(vec!["a".to_string()], 0).is_empty());
    }

    #[test]
    fn test_short_tail_is_null_filled() {
        let columns = header_columns("股东\n变动日期\n变动数量");
        let rows = chunk_rows(["a", "b", "c", "d"].map(str::to_string).to_vec(), 3);
        let df = assemble(&columns, &rows).unwrap();

        assert_eq!(df.shape(), (2, 3));
        assert_eq!(cell(&df, "股东", 1).as_deref(), Some("d"));
        assert_eq!(cell(&df, "变动日期", 1), None);
        assert_eq!(cell(&df, "变动数量", 1), None);
    }
}
