use serde::de::DeserializeOwned;

use crate::models::{Categories, Infobox, References, SeeAlso};

/// A metadata payload that is either the structured JSON shape or free text.
///
/// A failed decode is a branch, not an error: the text is shown as markdown.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decoded<T> {
    Structured(T),
    Raw(String),
}

impl<T: DeserializeOwned> Decoded<T> {
    /// `None` for empty text.
    pub fn parse(text: &str) -> Option<Self> {
        if text.trim().is_empty() {
            return None;
        }
        Some(match serde_json::from_str::<T>(text.trim()) {
            Ok(value) => Decoded::Structured(value),
            Err(_) => Decoded::Raw(text.to_string()),
        })
    }
}

impl<T> Decoded<T> {
    pub fn is_structured(&self) -> bool {
        matches!(self, Decoded::Structured(_))
    }

    pub fn structured(&self) -> Option<&T> {
        match self {
            Decoded::Structured(value) => Some(value),
            Decoded::Raw(_) => None,
        }
    }

    pub fn raw(&self) -> Option<&str> {
        match self {
            Decoded::Raw(text) => Some(text),
            Decoded::Structured(_) => None,
        }
    }
}

pub type InfoboxView = Decoded<Infobox>;
pub type ReferencesView = Decoded<References>;
pub type SeeAlsoView = Decoded<SeeAlso>;
pub type CategoriesView = Decoded<Categories>;
