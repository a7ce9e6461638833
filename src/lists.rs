//! List (audience) endpoints and the list-scoped resource handle
//!
//! A [`ListHandle`] is a cheap, local construction pairing the client with a
//! list id; only leaf calls perform I/O. Member and webhook sub-resources
//! hang off it so chained calls never re-supply the parent path.

use reqwest::Method;
use serde::{Deserialize, Serialize};

use crate::client::Client;
use crate::error::{ClientError, ClientResult};
use crate::params::{BasicQueryParams, ListQueryParams};
use crate::types::{Link, ListMeta};

pub(crate) const LISTS_PATH: &str = "/lists";

// ============================================================================
// Wire models
// ============================================================================

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListOfLists {
    #[serde(flatten)]
    pub meta: ListMeta,
    #[serde(default)]
    pub lists: Vec<List>,
}

/// Contact information block required on every list.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ListContact {
    #[serde(default)]
    pub company: String,
    #[serde(default)]
    pub address1: String,
    #[serde(default)]
    pub address2: String,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub state: String,
    #[serde(default)]
    pub zip: String,
    #[serde(default)]
    pub country: String,
    #[serde(default)]
    pub phone: String,
}

/// Default settings applied to campaigns sent to this list.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CampaignDefaults {
    #[serde(default)]
    pub from_name: String,
    #[serde(default)]
    pub from_email: String,
    #[serde(default)]
    pub subject: String,
    #[serde(default)]
    pub language: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ListStats {
    #[serde(default)]
    pub member_count: i64,
    #[serde(default)]
    pub unsubscribe_count: i64,
    #[serde(default)]
    pub cleaned_count: i64,
    #[serde(default)]
    pub member_count_since_send: i64,
    #[serde(default)]
    pub unsubscribe_count_since_send: i64,
    #[serde(default)]
    pub cleaned_count_since_send: i64,
    #[serde(default)]
    pub campaign_count: i64,
    #[serde(default)]
    pub campaign_last_sent: String,
    #[serde(default)]
    pub merge_field_count: i64,
    #[serde(default)]
    pub avg_sub_rate: f64,
    #[serde(default)]
    pub avg_unsub_rate: f64,
    #[serde(default)]
    pub target_sub_rate: f64,
    #[serde(default)]
    pub open_rate: f64,
    #[serde(default)]
    pub click_rate: f64,
    #[serde(default)]
    pub last_sub_date: String,
    #[serde(default)]
    pub last_unsub_date: String,
}

/// Body for creating or updating a list.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ListCreationRequest {
    pub name: String,
    pub contact: ListContact,
    pub permission_reminder: String,
    pub use_archive_bar: bool,
    pub campaign_defaults: CampaignDefaults,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub notify_on_subscribe: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub notify_on_unsubscribe: String,
    pub email_type_option: bool,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub visibility: String,
}

/// A list (audience) as returned by the API.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct List {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub web_id: i64,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub contact: ListContact,
    #[serde(default)]
    pub permission_reminder: String,
    #[serde(default)]
    pub use_archive_bar: bool,
    #[serde(default)]
    pub campaign_defaults: CampaignDefaults,
    #[serde(default)]
    pub notify_on_subscribe: String,
    #[serde(default)]
    pub notify_on_unsubscribe: String,
    #[serde(default)]
    pub date_created: String,
    #[serde(default)]
    pub list_rating: i64,
    #[serde(default)]
    pub email_type_option: bool,
    #[serde(default)]
    pub subscribe_url_short: String,
    #[serde(default)]
    pub subscribe_url_long: String,
    #[serde(default)]
    pub beamer_address: String,
    #[serde(default)]
    pub visibility: String,
    #[serde(default)]
    pub modules: Vec<String>,
    #[serde(default)]
    pub stats: ListStats,
    #[serde(rename = "_links", default, skip_serializing_if = "Vec::is_empty")]
    pub links: Vec<Link>,
}

impl List {
    /// Scoped handle for this list's sub-resources on the given client.
    pub fn handle<'a>(&self, client: &'a Client) -> ListHandle<'a> {
        client.list(self.id.as_str())
    }
}

// ============================================================================
// Operations
// ============================================================================

impl Client {
    /// Fetch lists matching the given filters.
    pub async fn get_lists(&self, params: Option<&ListQueryParams>) -> ClientResult<ListOfLists> {
        self.get(LISTS_PATH, params.map(|p| p as _)).await
    }

    /// Fetch a single list by id.
    pub async fn get_list(
        &self,
        id: &str,
        params: Option<&BasicQueryParams>,
    ) -> ClientResult<List> {
        let path = format!("{LISTS_PATH}/{id}");
        self.get(&path, params.map(|p| p as _)).await
    }

    /// Create a new list.
    pub async fn create_list(&self, body: &ListCreationRequest) -> ClientResult<List> {
        self.send(Method::POST, LISTS_PATH, body).await
    }

    /// Update a list's settings.
    pub async fn update_list(&self, id: &str, body: &ListCreationRequest) -> ClientResult<List> {
        let path = format!("{LISTS_PATH}/{id}");
        self.send(Method::PATCH, &path, body).await
    }

    /// Delete a list.
    pub async fn delete_list(&self, id: &str) -> ClientResult<()> {
        let path = format!("{LISTS_PATH}/{id}");
        self.request_ok(Method::DELETE, &path).await
    }

    /// Build a [`ListHandle`] from a known list id without a round trip.
    pub fn list(&self, id: impl Into<String>) -> ListHandle<'_> {
        ListHandle {
            client: self,
            id: id.into(),
        }
    }
}

// ============================================================================
// Handle
// ============================================================================

/// Scoped handle for one list, used to issue member and webhook
/// sub-resource calls without re-fetching the list.
///
/// Construction is local and free; the id is only validated (non-empty)
/// when a call is issued.
#[derive(Debug, Clone)]
pub struct ListHandle<'a> {
    pub(crate) client: &'a Client,
    pub(crate) id: String,
}

impl<'a> ListHandle<'a> {
    /// The list id this handle is scoped to.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Precondition check shared by all sub-resource calls: fails locally,
    /// with no network call, when the list id is empty.
    pub(crate) fn check(&self) -> ClientResult<()> {
        if self.id.is_empty() {
            return Err(ClientError::MissingId("list id"));
        }
        Ok(())
    }
}
