//! Finance payload unwrapping.
//!
//! The four finance reports share one logical document, delivered two ways:
//!
//! - the summary page embeds it as the text of `<p id="main">`
//! - the statement endpoints wrap it as a JSON string in the `flashData` field
//!   of an outer JSON object
//!
//! Both are unwrapped to a [`FinancePayload`].

use scraper::{Html, Selector};
use serde::de::{self, IgnoredAny, SeqAccess, Visitor};
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use std::fmt;
use ths_core::{DataError, Result, SubTable};

/// Selector of the element holding the summary-indicator payload.
pub const MAIN_PAYLOAD_SELECTOR: &str = "p#main";

/// Rows of a sub-table. Row 0 holds the period labels, every further row the
/// values of one metric.
pub type SubTableRows = Vec<Vec<Value>>;

/// One entry of the payload's `title` array.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum TitleEntry {
    /// A bare label, e.g. `"基本每股收益"`.
    Plain(String),
    /// A label followed by annotations such as its unit, e.g. `["净利润", "元"]`.
    /// Only the label is kept; annotations may be of any JSON type.
    Annotated(#[serde(deserialize_with = "leading_label")] String),
}

impl TitleEntry {
    /// Returns the label, dropping any annotation.
    #[must_use]
    pub fn label(&self) -> &str {
        match self {
            Self::Plain(label) | Self::Annotated(label) => label,
        }
    }
}

/// Reads the first element of a list as the label and skips the rest.
fn leading_label<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    struct LeadingLabel;

    impl<'de> Visitor<'de> for LeadingLabel {
        type Value = String;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("a list whose first element is a label")
        }

        fn visit_seq<A>(self, mut seq: A) -> std::result::Result<String, A::Error>
        where
            A: SeqAccess<'de>,
        {
            let label = seq
                .next_element::<String>()?
                .ok_or_else(|| de::Error::invalid_length(0, &self))?;
            while seq.next_element::<IgnoredAny>()?.is_some() {}
            Ok(label)
        }
    }

    deserializer.deserialize_seq(LeadingLabel)
}

/// The logical finance document shared by all four reports.
#[derive(Clone, Debug, Deserialize)]
pub struct FinancePayload {
    /// Row labels. The first entry names the period column and is not a metric.
    pub title: Vec<TitleEntry>,
    /// Figures per report period.
    #[serde(default)]
    pub report: Option<SubTableRows>,
    /// Single-quarter figures.
    #[serde(default)]
    pub simple: Option<SubTableRows>,
    /// Fiscal-year figures.
    #[serde(default)]
    pub year: Option<SubTableRows>,
}

impl FinancePayload {
    /// Parses the unwrapped payload document.
    pub fn from_json(text: &str) -> Result<Self> {
        serde_json::from_str(text)
            .map_err(|e| DataError::Parse(format!("Malformed finance payload: {e}")))
    }

    /// Metric labels in title order, without the leading period placeholder.
    #[must_use]
    pub fn metric_labels(&self) -> Vec<&str> {
        self.title.iter().skip(1).map(TitleEntry::label).collect()
    }

    /// Returns the rows of a sub-table.
    pub fn sub_table(&self, sub_table: SubTable) -> Result<&[Vec<Value>]> {
        let rows = match sub_table {
            SubTable::Report => &self.report,
            SubTable::Simple => &self.simple,
            SubTable::Year => &self.year,
        };

        rows.as_deref().ok_or_else(|| {
            DataError::Parse(format!("Payload has no `{}` sub-table", sub_table.key()))
        })
    }
}

/// Outer object of the statement endpoints.
#[derive(Debug, Deserialize)]
struct FlashEnvelope {
    #[serde(rename = "flashData")]
    flash_data: String,
}

/// Extracts the nested document from a `{"flashData": "..."}` envelope.
///
/// A body without the envelope is rejected.
pub fn unwrap_flash_data(body: &str) -> Result<String> {
    let envelope: FlashEnvelope = serde_json::from_str(body)
        .map_err(|e| DataError::Parse(format!("Missing flashData envelope: {e}")))?;

    Ok(envelope.flash_data)
}

/// Extracts the text of `<p id="main">` from the summary page.
pub fn extract_main_payload(html: &str) -> Result<String> {
    let document = Html::parse_document(html);
    let selector = Selector::parse(MAIN_PAYLOAD_SELECTOR)
        .map_err(|e| DataError::Parse(format!("Invalid selector: {e}")))?;

    document
        .select(&selector)
        .next()
        .map(|element| element.text().collect::<String>())
        .ok_or_else(|| {
            DataError::Parse(format!("No `{MAIN_PAYLOAD_SELECTOR}` element in page"))
        })
}
