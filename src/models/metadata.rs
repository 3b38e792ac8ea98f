//! Structured forms of the metadata channels.
//!
//! The backend may send each metadata channel either as JSON in one of these
//! shapes or as free Markdown text. See [`crate::render::Decoded`].

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Read a display field that the model may emit as a string, number or bool.
/// `null` reads as empty.
fn scalar_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(text) => Ok(text),
        Value::Number(number) => Ok(number.to_string()),
        Value::Bool(flag) => Ok(flag.to_string()),
        Value::Null => Ok(String::new()),
        other => Err(D::Error::custom(format!(
            "expected a string or number, found {other}"
        ))),
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct InfoboxRow {
    #[serde(deserialize_with = "scalar_text")]
    pub field: String,
    #[serde(deserialize_with = "scalar_text")]
    pub value: String,
}

/// `{"rows": [{"field": .., "value": ..}]}`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Infobox {
    pub rows: Vec<InfoboxRow>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Reference {
    #[serde(deserialize_with = "scalar_text")]
    pub author: String,
    #[serde(deserialize_with = "scalar_text")]
    pub title: String,
    #[serde(deserialize_with = "scalar_text")]
    pub publisher: String,
    #[serde(deserialize_with = "scalar_text")]
    pub year: String,
}

impl Reference {
    /// Citation line: the non-empty parts joined by `". "`, ending in `.`
    pub fn citation(&self) -> String {
        let parts: Vec<&str> = [&self.author, &self.title, &self.publisher, &self.year]
            .into_iter()
            .map(String::as_str)
            .filter(|part| !part.is_empty())
            .collect();
        format!("{}.", parts.join(". "))
    }
}

/// `{"references": [{"author", "title", "publisher", "year"}]}`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct References {
    pub references: Vec<Reference>,
}

/// `{"topics": [..]}`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SeeAlso {
    pub topics: Vec<String>,
}

/// `{"categories": [..]}`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Categories {
    pub categories: Vec<String>,
}

impl Categories {
    pub fn joined(&self) -> String {
        self.categories.join(", ")
    }
}
