//! Template folder endpoints

use reqwest::Method;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::client::Client;
use crate::error::ClientResult;
use crate::params::{ExtendedQueryParams, QueryParams};
use crate::types::{Link, ListMeta};

const TEMPLATE_FOLDERS_PATH: &str = "/template-folders";
// single folder endpoint not implemented

/// Paging filters for the template folder collection.
#[derive(Debug, Clone, Default)]
pub struct TemplateFolderQueryParams {
    pub extended: ExtendedQueryParams,
}

impl QueryParams for TemplateFolderQueryParams {
    fn params(&self) -> HashMap<String, String> {
        self.extended.params()
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListOfTemplateFolders {
    #[serde(flatten)]
    pub meta: ListMeta,
    #[serde(default)]
    pub folders: Vec<TemplateFolder>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TemplateFolder {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub count: u64,
    #[serde(rename = "_links", default, skip_serializing_if = "Vec::is_empty")]
    pub links: Vec<Link>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TemplateFolderCreationRequest {
    pub name: String,
}

impl Client {
    /// Fetch template folders.
    pub async fn get_template_folders(
        &self,
        params: Option<&TemplateFolderQueryParams>,
    ) -> ClientResult<ListOfTemplateFolders> {
        self.get(TEMPLATE_FOLDERS_PATH, params.map(|p| p as _)).await
    }

    /// Create a template folder.
    pub async fn create_template_folder(
        &self,
        body: &TemplateFolderCreationRequest,
    ) -> ClientResult<TemplateFolder> {
        self.send(Method::POST, TEMPLATE_FOLDERS_PATH, body).await
    }
}
