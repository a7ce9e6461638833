//! Template endpoints: CRUD and default content

use reqwest::Method;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::client::Client;
use crate::error::ClientResult;
use crate::params::{BasicQueryParams, ExtendedQueryParams, QueryParams};
use crate::types::{Link, ListMeta};

const TEMPLATES_PATH: &str = "/templates";

/// Filters accepted by the template collection endpoint.
#[derive(Debug, Clone, Default)]
pub struct TemplateQueryParams {
    pub extended: ExtendedQueryParams,
    pub created_by: String,
    pub kind: String,
    pub category: String,
    pub folder_id: String,
}

impl QueryParams for TemplateQueryParams {
    fn params(&self) -> HashMap<String, String> {
        let mut m = self.extended.params();
        m.insert("created_by".to_string(), self.created_by.clone());
        m.insert("type".to_string(), self.kind.clone());
        m.insert("category".to_string(), self.category.clone());
        m.insert("folder_id".to_string(), self.folder_id.clone());
        m
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListOfTemplates {
    #[serde(flatten)]
    pub meta: ListMeta,
    #[serde(default)]
    pub templates: Vec<Template>,
}

/// Body for creating or updating a template.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TemplateCreationRequest {
    pub name: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub folder_id: String,
    pub html: String,
}

/// A template as returned by the API.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Template {
    #[serde(default)]
    pub id: u64,
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub drag_and_drop: bool,
    #[serde(default)]
    pub responsive: bool,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub date_created: String,
    #[serde(default)]
    pub created_by: String,
    #[serde(default)]
    pub active: bool,
    #[serde(default)]
    pub folder_id: String,
    #[serde(default)]
    pub thumbnail: String,
    #[serde(default)]
    pub share_url: String,
    #[serde(rename = "_links", default, skip_serializing_if = "Vec::is_empty")]
    pub links: Vec<Link>,
}

/// Editable sections of a template, keyed by section name.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TemplateDefaultContentResponse {
    #[serde(default)]
    pub sections: HashMap<String, serde_json::Value>,
    #[serde(rename = "_links", default)]
    pub links: Vec<Link>,
}

impl Client {
    /// Fetch templates matching the given filters.
    pub async fn get_templates(
        &self,
        params: Option<&TemplateQueryParams>,
    ) -> ClientResult<ListOfTemplates> {
        self.get(TEMPLATES_PATH, params.map(|p| p as _)).await
    }

    /// Fetch a single template by id.
    pub async fn get_template(
        &self,
        id: &str,
        params: Option<&BasicQueryParams>,
    ) -> ClientResult<Template> {
        let path = format!("{TEMPLATES_PATH}/{id}");
        self.get(&path, params.map(|p| p as _)).await
    }

    /// Fetch the default content sections of a template.
    pub async fn get_template_default_content(
        &self,
        id: &str,
        params: Option<&BasicQueryParams>,
    ) -> ClientResult<TemplateDefaultContentResponse> {
        let path = format!("{TEMPLATES_PATH}/{id}/default-content");
        self.get(&path, params.map(|p| p as _)).await
    }

    /// Create a new template from raw HTML.
    pub async fn create_template(&self, body: &TemplateCreationRequest) -> ClientResult<Template> {
        self.send(Method::POST, TEMPLATES_PATH, body).await
    }

    /// Update an existing template.
    pub async fn update_template(
        &self,
        id: &str,
        body: &TemplateCreationRequest,
    ) -> ClientResult<Template> {
        let path = format!("{TEMPLATES_PATH}/{id}");
        self.send(Method::PATCH, &path, body).await
    }

    /// Delete a template.
    pub async fn delete_template(&self, id: &str) -> ClientResult<()> {
        let path = format!("{TEMPLATES_PATH}/{id}");
        self.request_ok(Method::DELETE, &path).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_template_query_params() {
        let params = TemplateQueryParams {
            kind: "user".to_string(),
            folder_id: "f1".to_string(),
            ..Default::default()
        };
        let m = params.params();
        assert_eq!(m["type"], "user");
        assert_eq!(m["folder_id"], "f1");
        assert_eq!(m["category"], "");
    }

    #[test]
    fn test_template_decode() {
        let body = r#"{"id": 9, "type": "user", "name": "Welcome", "active": true}"#;
        let template: Template = serde_json::from_str(body).unwrap();
        assert_eq!(template.id, 9);
        assert_eq!(template.name, "Welcome");
        assert!(template.active);
    }

    #[test]
    fn test_creation_request_omits_empty_folder() {
        let body = TemplateCreationRequest {
            name: "t".to_string(),
            html: "<p>hi</p>".to_string(),
            ..Default::default()
        };
        let json = serde_json::to_string(&body).unwrap();
        assert!(!json.contains("folder_id"));
    }
}
