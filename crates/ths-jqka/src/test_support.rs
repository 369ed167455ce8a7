//! Canned payloads and an offline fetcher shared by the unit tests.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use polars::prelude::DataFrame;
use ths_core::{Charset, DataError, HttpFetch, Result};

/// A finance document with three metrics. `year` carries a null cell.
pub(crate) const FINANCE_PAYLOAD: &str = r#"{
    "title": ["科目\/年度", ["净利润", "元"], ["净利润同比增长率", ""], "基本每股收益"],
    "report": [
        ["2024-06-30", "2024-03-31", "2023-12-31"],
        ["47.26亿", "23.07亿", "93.26亿"],
        ["4.20%", "3.73%", "15.41%"],
        [0.99, 0.48, 1.96]
    ],
    "simple": [
        ["2024-06-30", "2024-03-31"],
        ["24.19亿", "23.07亿"],
        ["4.64%", "3.73%"],
        [0.51, 0.48]
    ],
    "year": [
        ["2023", "2022"],
        ["93.26亿", "80.80亿"],
        ["15.41%", null],
        [1.96, 1.7]
    ]
}"#;

/// An event page whose table flattens to nine tokens under three columns.
pub(crate) const EVENT_PAGE: &str = "<html><head><meta charset=\"gbk\"></head><body>
<table class=\"m_table data_table_1 m_hl\">
<thead><tr><th>股东</th>
<th>变动日期</th>
<th>变动数量</th></tr></thead>
<tbody><tr><td>张三</td>   <td>2024-01-02</td>   <td>1 000</td></tr>   \
<tr><td>李四</td>   <td>2024-02-03</td>   <td>-200</td></tr>   \
<tr><td>王五</td>   <td>2024-03-04</td>   <td>300</td></tr></tbody>
</table>
</body></html>";

/// Wraps a payload the way the summary page does.
pub(crate) fn finance_page(payload: &str) -> String {
    format!(
        "<html><body><div class=\"bd\"><p id=\"main\" style=\"display:none\">{payload}</p></div></body></html>"
    )
}

/// Wraps a payload the way the statement endpoints do.
pub(crate) fn flash_body(payload: &str) -> String {
    serde_json::json!({ "flashData": payload }).to_string()
}

/// Column names of a DataFrame as owned strings.
pub(crate) fn column_names(df: &DataFrame) -> Vec<String> {
    df.get_column_names()
        .iter()
        .map(|name| name.to_string())
        .collect()
}

/// Reads one string cell.
pub(crate) fn cell(df: &DataFrame, column: &str, row: usize) -> Option<String> {
    df.column(column)
        .unwrap()
        .as_materialized_series()
        .str()
        .unwrap()
        .get(row)
        .map(str::to_string)
}

/// Serves canned bodies by URL and records every request.
#[derive(Debug, Default)]
pub(crate) struct StaticFetcher {
    responses: HashMap<String, String>,
    requests: Mutex<Vec<(String, Charset)>>,
    user_agents: Mutex<Vec<String>>,
}

impl StaticFetcher {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn with_response(mut self, url: &str, body: impl Into<String>) -> Self {
        self.responses.insert(url.to_string(), body.into());
        self
    }

    pub(crate) fn requests(&self) -> Vec<(String, Charset)> {
        self.requests.lock().unwrap().clone()
    }

    /// User agents passed explicitly, in request order.
    pub(crate) fn user_agents(&self) -> Vec<String> {
        self.user_agents.lock().unwrap().clone()
    }
}

#[async_trait]
impl HttpFetch for StaticFetcher {
    async fn fetch(&self, url: &str, charset: Charset) -> Result<String> {
        self.requests
            .lock()
            .unwrap()
            .push((url.to_string(), charset));

        self.responses
            .get(url)
            .cloned()
            .ok_or_else(|| DataError::Network(format!("HTTP 404 Not Found for {url}")))
    }

    async fn fetch_with_user_agent(
        &self,
        url: &str,
        charset: Charset,
        user_agent: &str,
    ) -> Result<String> {
        self.user_agents.lock().unwrap().push(user_agent.to_string());
        self.fetch(url, charset).await
    }
}
