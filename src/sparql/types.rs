//! SPARQL result set types.
//!
//! Mirrors the `application/sparql-results+json` document: a `head` naming the
//! projected variables and a `results` object carrying the binding rows.

use crate::error::{Result, StepsError};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// A decoded SELECT result.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResultSet {
    /// Projected variable names, in declared order.
    pub head: Head,

    /// Binding rows, in endpoint order.
    pub results: Bindings,
}

/// The `head` section of a result document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Head {
    #[serde(default)]
    pub vars: Vec<String>,
}

/// The `results` section of a result document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Bindings {
    #[serde(default)]
    pub bindings: Vec<BindingRow>,
}

impl ResultSet {
    /// Creates a result set from column names and rows.
    pub fn new(columns: Vec<String>, rows: Vec<BindingRow>) -> Self {
        Self {
            head: Head { vars: columns },
            results: Bindings { bindings: rows },
        }
    }

    /// Parses a result document from its JSON text.
    pub fn from_json(body: &str) -> Result<Self> {
        serde_json::from_str(body)
            .map_err(|e| StepsError::decode(format!("Invalid SPARQL results document: {e}")))
    }

    /// Column names in declared order.
    pub fn columns(&self) -> &[String] {
        &self.head.vars
    }

    /// Rows in received order.
    pub fn rows(&self) -> &[BindingRow] {
        &self.results.bindings
    }

    pub fn len(&self) -> usize {
        self.results.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.bindings.is_empty()
    }
}

/// One solution: column name to bound value.
///
/// Unbound variables are simply absent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BindingRow(HashMap<String, Value>);

impl BindingRow {
    /// Creates an empty row.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a plain literal binding. Used by tests and callers building rows by hand.
    pub fn with_literal(mut self, column: impl Into<String>, text: impl Into<String>) -> Self {
        self.0.insert(column.into(), Value::literal(text));
        self
    }

    /// Returns the bound value for a column.
    pub fn get(&self, column: &str) -> Option<&Value> {
        self.0.get(column)
    }

    /// Returns the literal text bound to a column.
    pub fn text(&self, column: &str) -> Option<&str> {
        self.0.get(column).map(|v| v.value.as_str())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(String, Value)> for BindingRow {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// A single RDF term as serialized in the results document.
///
/// Only `value` is interpreted; the rest is carried through untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Value {
    /// Term kind: `uri`, `literal`, `typed-literal` or `bnode`.
    #[serde(rename = "type")]
    pub kind: String,

    /// Lexical form of the term.
    pub value: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub datatype: Option<String>,

    #[serde(rename = "xml:lang", default, skip_serializing_if = "Option::is_none")]
    pub lang: Option<String>,
}

impl Value {
    /// Creates a plain literal.
    pub fn literal(text: impl Into<String>) -> Self {
        Self {
            kind: "literal".to_string(),
            value: text.into(),
            datatype: None,
            lang: None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.value)
    }
}
