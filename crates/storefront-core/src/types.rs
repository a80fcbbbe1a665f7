//! Small shared catalog primitives.

use serde::{Deserialize, Serialize};

/// A catalog image.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Image {
    /// Image URL.
    pub url: String,
    /// Alt text, when the catalog provides one.
    #[serde(default)]
    pub alt_text: Option<String>,
}

/// One option-name/value pair a variant was selected with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectedOption {
    pub name: String,
    pub value: String,
}
