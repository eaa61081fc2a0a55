//! SPARQL 1.1 query results, JSON flavour.

use std::collections::HashMap;

use serde::Deserialize;

/// Media type of SPARQL JSON results.
pub const SPARQL_RESULTS_JSON: &str = "application/sparql-results+json";

/// One result row: variable name to the bound value's lexical form.
pub type Row = HashMap<String, String>;

/// A `application/sparql-results+json` document.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SparqlResults {
    #[serde(default)]
    pub head: SparqlHead,
    #[serde(default)]
    pub results: SparqlBindings,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SparqlHead {
    #[serde(default)]
    pub vars: Vec<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SparqlBindings {
    #[serde(default)]
    pub bindings: Vec<HashMap<String, SparqlTerm>>,
}

/// A single bound value.
#[derive(Debug, Clone, Deserialize)]
pub struct SparqlTerm {
    /// `uri`, `literal`, `typed-literal` or `bnode`.
    #[serde(rename = "type")]
    pub kind: String,
    pub value: String,
    #[serde(default, rename = "xml:lang")]
    pub lang: Option<String>,
    #[serde(default)]
    pub datatype: Option<String>,
}

impl SparqlResults {
    /// Flatten `{var: {type, value}}` bindings to `{var: value}` rows.
    pub fn into_rows(self) -> Vec<Row> {
        self.results
            .bindings
            .into_iter()
            .map(|binding| binding.into_iter().map(|(k, v)| (k, v.value)).collect())
            .collect()
    }
}

/// What [`query_sparql`](crate::NanopubClient::query_sparql) asks the
/// endpoint for.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ResultFormat {
    #[default]
    Json,
    Csv,
}

impl ResultFormat {
    pub fn media_type(self) -> &'static str {
        match self {
            ResultFormat::Json => SPARQL_RESULTS_JSON,
            ResultFormat::Csv => "text/csv",
        }
    }
}

/// The decoded answer to a raw SPARQL query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SparqlOutput {
    Rows(Vec<Row>),
    Text(String),
}

impl SparqlOutput {
    /// An empty answer in the requested format.
    pub fn empty(format: ResultFormat) -> Self {
        match format {
            ResultFormat::Json => SparqlOutput::Rows(Vec::new()),
            ResultFormat::Csv => SparqlOutput::Text(String::new()),
        }
    }

    /// The rows of a JSON answer; `None` for CSV text.
    pub fn rows(&self) -> Option<&[Row]> {
        match self {
            SparqlOutput::Rows(rows) => Some(rows),
            SparqlOutput::Text(_) => None,
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            SparqlOutput::Rows(rows) => rows.is_empty(),
            SparqlOutput::Text(text) => text.is_empty(),
        }
    }
}

// --- tests -------------------------------------------------------------------
