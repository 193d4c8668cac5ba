use serde::{Deserialize, Serialize};

/// One appearance of a command or submenu at a menu location.
///
/// `group` and `order` are the two halves of the manifest's single
/// `"group@order"` field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Placement {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub when: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order: Option<i64>,
    /// Command shown instead while the alt key is held
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alt: Option<String>,
}

impl Placement {
    /// Builds a placement from a manifest `group` field.
    pub fn from_group(when: Option<String>, group: Option<&str>, alt: Option<String>) -> Self {
        let (group, order) = parse_group(group);
        Self {
            when,
            group,
            order,
            alt,
        }
    }

    /// The manifest `"group@order"` form of this placement.
    pub fn group_field(&self) -> Option<String> {
        format_group(self.group.as_deref(), self.order)
    }
}

/// Splits a manifest `group` field on its last `@`.
///
/// The right-hand side becomes the order only when it is an integer;
/// otherwise the whole text is the group, so formatting the result back
/// reproduces the input.
///
/// # Example
/// ```
/// use contrib_meta::parse_group;
///
/// assert_eq!(parse_group(Some("inline@2")), (Some("inline".to_string()), Some(2)));
/// assert_eq!(parse_group(Some("navigation")), (Some("navigation".to_string()), None));
/// assert_eq!(parse_group(None), (None, None));
/// ```
pub fn parse_group(raw: Option<&str>) -> (Option<String>, Option<i64>) {
    let Some(raw) = raw else {
        return (None, None);
    };

    match raw.rsplit_once('@') {
        // `@+1` or `@01` would not format back to the same text
        Some((group, text)) => match text.parse::<i64>() {
            Ok(order) if order.to_string() == text => (Some(group.to_string()), Some(order)),
            _ => (Some(raw.to_string()), None),
        },
        None => (Some(raw.to_string()), None),
    }
}

/// Inverse of [`parse_group`].
pub fn format_group(group: Option<&str>, order: Option<i64>) -> Option<String> {
    match (group, order) {
        (None, None) => None,
        (Some(group), None) => Some(group.to_string()),
        (group, Some(order)) => Some(format!("{}@{}", group.unwrap_or_default(), order)),
    }
}
