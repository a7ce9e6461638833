//! Shared wire types used across all endpoints

use serde::{Deserialize, Serialize};

/// Hyperlink metadata attached to most API entities (`_links`).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Link {
    #[serde(default)]
    pub rel: String,
    #[serde(default)]
    pub href: String,
    #[serde(default)]
    pub method: String,
    #[serde(rename = "targetSchema", default, skip_serializing_if = "String::is_empty")]
    pub target_schema: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub schema: String,
}

/// Envelope fields every "list of X" response carries alongside its items:
/// the total item count and hyperlinks. Embedded via `#[serde(flatten)]`.
///
/// Pagination is purely offset/count query parameters supplied by the
/// caller; no cursor is modeled.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ListMeta {
    #[serde(default)]
    pub total_items: i64,
    #[serde(rename = "_links", default, skip_serializing_if = "Vec::is_empty")]
    pub links: Vec<Link>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_meta_decode() {
        let body = r#"{"total_items":42,"_links":[{"rel":"self","href":"https://us1.api.mailchimp.com/3.0/lists","method":"GET"}]}"#;
        let meta: ListMeta = serde_json::from_str(body).unwrap();
        assert_eq!(meta.total_items, 42);
        assert_eq!(meta.links.len(), 1);
        assert_eq!(meta.links[0].rel, "self");
    }

    #[test]
    fn test_list_meta_defaults() {
        let meta: ListMeta = serde_json::from_str("{}").unwrap();
        assert_eq!(meta.total_items, 0);
        assert!(meta.links.is_empty());
    }
}
