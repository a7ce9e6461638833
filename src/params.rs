//! Query-parameter encoding
//!
//! Every endpoint-specific parameter struct implements [`QueryParams`],
//! producing a flat key/value map. The request pipeline applies one
//! normalization rule uniformly: keys whose value is the empty string are
//! dropped, never sent as empty. Extended parameter sets embed the basic
//! set and layer additional keys on top.

use std::collections::HashMap;

/// Capability to serialize a request-parameter struct into a flat
/// string-keyed mapping. The pipeline is agnostic to the concrete type;
/// call sites pass `Option<&dyn QueryParams>`.
pub trait QueryParams {
    /// Produce the parameter map. Empty values are filtered out later by
    /// the pipeline, so implementations may insert them unconditionally.
    fn params(&self) -> HashMap<String, String>;
}

/// Parameters accepted by most single-entity GET endpoints.
#[derive(Debug, Clone, Default)]
pub struct BasicQueryParams {
    pub status: String,
    pub sort_field: String,
    pub sort_dir: String,
    /// Fields to include in the response, comma-joined on the wire.
    pub fields: Vec<String>,
    /// Fields to exclude from the response, comma-joined on the wire.
    pub exclude_fields: Vec<String>,
}

impl QueryParams for BasicQueryParams {
    fn params(&self) -> HashMap<String, String> {
        let mut m = HashMap::new();
        m.insert("status".to_string(), self.status.clone());
        m.insert("sort_field".to_string(), self.sort_field.clone());
        m.insert("sort_dir".to_string(), self.sort_dir.clone());
        m.insert("fields".to_string(), self.fields.join(","));
        m.insert("exclude_fields".to_string(), self.exclude_fields.join(","));
        m
    }
}

/// Basic parameters plus offset/count paging.
#[derive(Debug, Clone, Default)]
pub struct ExtendedQueryParams {
    pub basic: BasicQueryParams,
    pub count: i64,
    pub offset: i64,
}

impl QueryParams for ExtendedQueryParams {
    fn params(&self) -> HashMap<String, String> {
        let mut m = self.basic.params();
        m.insert("count".to_string(), self.count.to_string());
        m.insert("offset".to_string(), self.offset.to_string());
        m
    }
}

/// Parameters for the `/lists` collection endpoint.
#[derive(Debug, Clone, Default)]
pub struct ListQueryParams {
    pub extended: ExtendedQueryParams,
    pub before_date_created: String,
    pub since_date_created: String,
    pub before_campaign_last_sent: String,
    pub since_campaign_last_sent: String,
    pub email: String,
}

impl QueryParams for ListQueryParams {
    fn params(&self) -> HashMap<String, String> {
        let mut m = self.extended.params();
        m.insert("before_date_created".to_string(), self.before_date_created.clone());
        m.insert("since_date_created".to_string(), self.since_date_created.clone());
        m.insert(
            "before_campaign_last_sent".to_string(),
            self.before_campaign_last_sent.clone(),
        );
        m.insert(
            "since_campaign_last_sent".to_string(),
            self.since_campaign_last_sent.clone(),
        );
        m.insert("email".to_string(), self.email.clone());
        m
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_params_joins_fields() {
        let params = BasicQueryParams {
            fields: vec!["id".to_string(), "name".to_string()],
            exclude_fields: vec!["_links".to_string()],
            ..Default::default()
        };
        let m = params.params();
        assert_eq!(m["fields"], "id,name");
        assert_eq!(m["exclude_fields"], "_links");
        assert_eq!(m["status"], "");
    }

    #[test]
    fn test_extended_params_layer_on_basic() {
        let params = ExtendedQueryParams {
            basic: BasicQueryParams {
                sort_field: "date_created".to_string(),
                ..Default::default()
            },
            count: 25,
            offset: 50,
        };
        let m = params.params();
        assert_eq!(m["count"], "25");
        assert_eq!(m["offset"], "50");
        assert_eq!(m["sort_field"], "date_created");
    }

    #[test]
    fn test_list_params_layer_on_extended() {
        let params = ListQueryParams {
            email: "a@b.com".to_string(),
            ..Default::default()
        };
        let m = params.params();
        assert_eq!(m["email"], "a@b.com");
        assert!(m.contains_key("count"));
        assert!(m.contains_key("fields"));
    }
}
