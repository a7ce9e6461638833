//! Campaign folder endpoints

use reqwest::Method;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::client::Client;
use crate::error::ClientResult;
use crate::params::{ExtendedQueryParams, QueryParams};
use crate::types::{Link, ListMeta};

const CAMPAIGN_FOLDERS_PATH: &str = "/campaign-folders";
// single folder endpoint not implemented

/// Paging filters for the campaign folder collection.
#[derive(Debug, Clone, Default)]
pub struct CampaignFolderQueryParams {
    pub extended: ExtendedQueryParams,
}

impl QueryParams for CampaignFolderQueryParams {
    fn params(&self) -> HashMap<String, String> {
        self.extended.params()
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListOfCampaignFolders {
    #[serde(flatten)]
    pub meta: ListMeta,
    #[serde(default)]
    pub folders: Vec<CampaignFolder>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CampaignFolder {
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
pub struct CampaignFolderCreationRequest {
    pub name: String,
}

impl Client {
    /// Fetch campaign folders.
    pub async fn get_campaign_folders(
        &self,
        params: Option<&CampaignFolderQueryParams>,
    ) -> ClientResult<ListOfCampaignFolders> {
        self.get(CAMPAIGN_FOLDERS_PATH, params.map(|p| p as _)).await
    }

    /// Create a campaign folder.
    pub async fn create_campaign_folder(
        &self,
        body: &CampaignFolderCreationRequest,
    ) -> ClientResult<CampaignFolder> {
        self.send(Method::POST, CAMPAIGN_FOLDERS_PATH, body).await
    }
}
