use std::sync::LazyLock;

use regex::Regex;
use serde::{
    Deserialize,
    Serialize,
};
use serde_json::Value;

use crate::core::{
    DeckError,
    Flag,
};

/// One cell of the query response, `{ "v": value, "f": formatted }`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawCell {
    #[serde(default)]
    pub v: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub f: Option<String>,
}

impl RawCell {
    pub fn new(v: Value) -> Self {
        Self { v: Some(v), f: None }
    }

    pub fn as_text(&self) -> Option<String> {
        match self.v.as_ref()? {
            Value::String(s) => Some(s.clone()),
            Value::Number(n) => match n.as_f64() {
                Some(f) if f.fract() == 0.0 && f.abs() < 1e15 => Some(format!("{}", f as i64)),
                _ => Some(n.to_string()),
            },
            Value::Bool(b) => Some(b.to_string()),
            _ => None,
        }
    }

    /// Flags are set only when the decoded value is the number 1.
    pub fn is_one(&self) -> bool {
        matches!(&self.v, Some(Value::Number(n)) if n.as_f64() == Some(1.0))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawRow {
    #[serde(rename = "c", default)]
    pub cells: Vec<Option<RawCell>>,
}

impl RawRow {
    pub fn from_values(values: Vec<Value>) -> Self {
        let cells = values
            .into_iter()
            .map(|v| if v.is_null() { None } else { Some(RawCell::new(v)) })
            .collect();
        Self { cells }
    }

    pub fn cell(&self, index: usize) -> Option<&RawCell> {
        self.cells.get(index).and_then(|c| c.as_ref())
    }

    pub fn text(&self, index: usize) -> Option<String> {
        self.cell(index).and_then(RawCell::as_text)
    }

    pub fn flag(&self, index: usize) -> bool {
        self.cell(index).is_some_and(RawCell::is_one)
    }
}

#[derive(Debug, Deserialize)]
struct QueryResponse {
    #[serde(default)]
    status: Option<String>,
    #[serde(default)]
    errors: Vec<QueryIssue>,
    table: Option<QueryTable>,
}

#[derive(Debug, Deserialize)]
struct QueryIssue {
    #[serde(default)]
    reason: Option<String>,
    #[serde(default)]
    message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct QueryTable {
    rows: Option<Vec<RawRow>>,
}

static WRAPPED_JSON_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)\{.*\}").expect("Invalid regex"));

/// Strips the `google.visualization.Query.setResponse(...)` wrapper and decodes the rows.
pub fn parse_table_payload(body: &str) -> Result<Vec<RawRow>, DeckError> {
    let json = WRAPPED_JSON_RE
        .find(body)
        .ok_or_else(|| DeckError::MalformedTable("no JSON object in response".to_string()))?
        .as_str();

    let response: QueryResponse = serde_json::from_str(json)
        .map_err(|e| DeckError::MalformedTable(format!("invalid JSON: {e}")))?;

    if response.status.as_deref() == Some("error") {
        let reason = response
            .errors
            .first()
            .and_then(|issue| issue.message.clone().or_else(|| issue.reason.clone()))
            .unwrap_or_else(|| "query failed".to_string());
        return Err(DeckError::MalformedTable(reason));
    }

    response
        .table
        .and_then(|table| table.rows)
        .ok_or_else(|| DeckError::MalformedTable("response has no table rows".to_string()))
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateRequest {
    #[serde(rename = "char")]
    pub term: String,
    pub column: Flag,
    pub value: u8,
}

impl UpdateRequest {
    pub fn new(term: impl Into<String>, flag: Flag, value: bool) -> Self {
        Self { term: term.into(), column: flag, value: u8::from(value) }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UpdateResponse {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

impl UpdateResponse {
    pub fn success() -> Self {
        Self { status: Some("success".to_string()), message: None }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self { status: Some("error".to_string()), message: Some(message.into()) }
    }

    pub fn parse(body: &str) -> Result<Self, DeckError> {
        Ok(serde_json::from_str(body.trim())?)
    }

    pub fn into_result(self) -> Result<(), DeckError> {
        match self.status.as_deref() {
            Some("success") => Ok(()),
            Some("error") => Err(DeckError::Rejected(
                self.message.unwrap_or_else(|| "unspecified error".to_string()),
            )),
            Some(other) => Err(DeckError::Rejected(format!("unexpected status '{other}'"))),
            None => Err(DeckError::Rejected("response has no status".to_string())),
        }
    }
}
