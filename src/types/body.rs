//! Parsed body representations

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Structured view of a webhook payload, chosen by content type
///
/// Every parse failure degrades to `Text` or `Binary`, so a stored event always
/// has one of these variants.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum ParsedBody {
    /// Valid JSON document
    Json(serde_json::Value),
    /// `application/x-www-form-urlencoded` fields
    Form(FormFields),
    /// `multipart/form-data` parts
    Multipart(Vec<MultipartPart>),
    /// UTF-8 text (also the fallback for malformed JSON or multipart)
    Text(String),
    /// Undecodable payload; only the size is kept
    Binary { size: usize },
}

impl ParsedBody {
    /// Variant tag without the payload
    pub fn kind(&self) -> BodyKind {
        match self {
            ParsedBody::Json(_) => BodyKind::Json,
            ParsedBody::Form(_) => BodyKind::Form,
            ParsedBody::Multipart(_) => BodyKind::Multipart,
            ParsedBody::Text(_) => BodyKind::Text,
            ParsedBody::Binary { .. } => BodyKind::Binary,
        }
    }

    pub fn as_json(&self) -> Option<&serde_json::Value> {
        match self {
            ParsedBody::Json(value) => Some(value),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            ParsedBody::Text(text) => Some(text),
            _ => None,
        }
    }
}

/// Tag of a `ParsedBody` variant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BodyKind {
    Json,
    Form,
    Multipart,
    Text,
    Binary,
}

impl std::fmt::Display for BodyKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BodyKind::Json => write!(f, "json"),
            BodyKind::Form => write!(f, "form"),
            BodyKind::Multipart => write!(f, "multipart"),
            BodyKind::Text => write!(f, "text"),
            BodyKind::Binary => write!(f, "binary"),
        }
    }
}

/// One form field with every value it was sent with
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormField {
    pub name: String,
    pub values: Vec<String>,
}

/// Form fields in order of first appearance
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FormFields(Vec<FormField>);

impl FormFields {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a value, grouping it under an existing field of the same name
    ///
    /// Scans existing fields. Build large sets with `collect` instead.
    pub fn insert(&mut self, name: String, value: String) {
        match self.0.iter_mut().find(|f| f.name == name) {
            Some(field) => field.values.push(value),
            None => self.0.push(FormField {
                name,
                values: vec![value],
            }),
        }
    }

    /// First value of `name`
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|f| f.name == name)
            .and_then(|f| f.values.first())
            .map(String::as_str)
    }

    pub fn get_all(&self, name: &str) -> &[String] {
        self.0
            .iter()
            .find(|f| f.name == name)
            .map(|f| f.values.as_slice())
            .unwrap_or(&[])
    }

    pub fn iter(&self) -> impl Iterator<Item = &FormField> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Groups repeated names in one pass, keeping first-occurrence order
impl FromIterator<(String, String)> for FormFields {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        let mut fields: Vec<FormField> = Vec::new();
        let mut positions: HashMap<String, usize> = HashMap::new();

        for (name, value) in iter {
            match positions.get(&name) {
                Some(&position) => fields[position].values.push(value),
                None => {
                    positions.insert(name.clone(), fields.len());
                    fields.push(FormField {
                        name,
                        values: vec![value],
                    });
                }
            }
        }

        Self(fields)
    }
}

/// Metadata (and text, when small and textual) of one multipart part
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MultipartPart {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filename: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content_type: Option<String>,
    pub size: usize,
    /// Part content when it is retained; binary or oversized parts are `None`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}
