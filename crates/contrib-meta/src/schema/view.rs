use serde::{Deserialize, Serialize};
use serde_json::Number;

/// A contributed view
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct View {
    /// View container the view is registered in
    pub container: String,
    /// Zero-based position within the container, assigned on extraction
    #[serde(default)]
    pub order: usize,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub when: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contextual_title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub initial_size: Option<Number>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub visibility: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub welcome_content: Vec<WelcomeEntry>,
}

impl View {
    pub fn new(container: impl Into<String>, order: usize, name: impl Into<String>) -> Self {
        Self {
            container: container.into(),
            order,
            kind: None,
            name: name.into(),
            when: None,
            contextual_title: None,
            icon: None,
            initial_size: None,
            visibility: None,
            welcome_content: Vec::new(),
        }
    }
}

/// Content shown by a view while it has nothing else to display
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WelcomeEntry {
    pub contents: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub when: Option<String>,
}
