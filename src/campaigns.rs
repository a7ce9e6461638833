//! Campaign endpoints: CRUD, send/schedule actions and content
//!
//! API docs: <https://mailchimp.com/developer/marketing/api/campaigns/>

use chrono::{DateTime, SecondsFormat, Utc};
use reqwest::Method;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::client::Client;
use crate::error::ClientResult;
use crate::params::{BasicQueryParams, ExtendedQueryParams, QueryParams};
use crate::types::{Link, ListMeta};

const CAMPAIGNS_PATH: &str = "/campaigns";

pub const CAMPAIGN_TYPE_REGULAR: &str = "regular";
pub const CAMPAIGN_TYPE_PLAINTEXT: &str = "plaintext";
/// Deprecated by Mailchimp in favor of variate campaigns.
pub const CAMPAIGN_TYPE_ABSPLIT: &str = "absplit";
pub const CAMPAIGN_TYPE_RSS: &str = "rss";
pub const CAMPAIGN_TYPE_VARIATE: &str = "variate";

pub const CAMPAIGN_SEND_TYPE_HTML: &str = "html";
pub const CAMPAIGN_SEND_TYPE_PLAINTEXT: &str = "plaintext";

pub const CONDITION_MATCH_ANY: &str = "any";
pub const CONDITION_MATCH_ALL: &str = "all";

pub const CONDITION_TYPE_INTERESTS: &str = "Interests";

pub const CONDITION_OP_CONTAINS: &str = "interestcontains";

// ============================================================================
// Query parameters
// ============================================================================

/// Filters accepted by the campaign collection endpoint.
#[derive(Debug, Clone, Default)]
pub struct CampaignQueryParams {
    pub extended: ExtendedQueryParams,
    pub kind: String,
    pub status: String,
    pub before_send_time: String,
    pub since_send_time: String,
    pub before_create_time: String,
    pub since_create_time: String,
    pub list_id: String,
    pub folder_id: String,
    pub sort_field: String,
    pub sort_dir: String,
}

impl QueryParams for CampaignQueryParams {
    fn params(&self) -> HashMap<String, String> {
        let mut m = self.extended.params();
        m.insert("type".to_string(), self.kind.clone());
        m.insert("status".to_string(), self.status.clone());
        m.insert("before_send_time".to_string(), self.before_send_time.clone());
        m.insert("since_send_time".to_string(), self.since_send_time.clone());
        m.insert("before_create_time".to_string(), self.before_create_time.clone());
        m.insert("since_create_time".to_string(), self.since_create_time.clone());
        m.insert("list_id".to_string(), self.list_id.clone());
        m.insert("folder_id".to_string(), self.folder_id.clone());
        m.insert("sort_field".to_string(), self.sort_field.clone());
        m.insert("sort_dir".to_string(), self.sort_dir.clone());
        m
    }
}

// ============================================================================
// Wire models
// ============================================================================

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListOfCampaigns {
    #[serde(flatten)]
    pub meta: ListMeta,
    #[serde(default)]
    pub campaigns: Vec<Campaign>,
}

/// Recipients block of a campaign creation request.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CampaignCreationRecipients {
    pub list_id: String,
    pub segment_opts: CampaignCreationSegmentOptions,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CampaignCreationSegmentOptions {
    #[serde(default, skip_serializing_if = "is_zero")]
    pub saved_segment_id: i64,
    /// One of the `CONDITION_MATCH_*` constants.
    #[serde(rename = "match", default, skip_serializing_if = "String::is_empty")]
    pub match_type: String,
    /// Segment conditions; the API accepts several payload shapes, so this
    /// stays schemaless.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub conditions: Option<serde_json::Value>,
}

fn is_zero(n: &i64) -> bool {
    *n == 0
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InterestsCondition {
    pub condition_type: String,
    pub field: String,
    pub op: String,
    pub value: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StaticSegmentCondition {
    pub condition_type: String,
    pub field: String,
    pub op: String,
    pub value: i64,
}

impl StaticSegmentCondition {
    /// Condition matching (or excluding) membership of a static segment.
    pub fn new(id: i64, is_equal: bool) -> Self {
        StaticSegmentCondition {
            condition_type: "StaticSegment".to_string(),
            field: "static_segment".to_string(),
            op: if is_equal { "static_is" } else { "static_not" }.to_string(),
            value: id,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CampaignCreationSettings {
    pub subject_line: String,
    pub preview_text: String,
    pub title: String,
    pub from_name: String,
    pub reply_to: String,
    pub use_conversation: bool,
    pub to_name: String,
    pub folder_id: String,
    pub authenticate: bool,
    pub auto_footer: bool,
    pub inline_css: bool,
    pub auto_tweet: bool,
    pub fb_comments: bool,
    pub template_id: u64,
}

/// Body for creating or updating a campaign.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CampaignCreationRequest {
    /// One of the `CAMPAIGN_TYPE_*` constants.
    #[serde(rename = "type")]
    pub kind: String,
    pub recipients: CampaignCreationRecipients,
    pub settings: CampaignCreationSettings,
    // variate_settings, rss_opts and social_card are not implemented
    pub tracking: CampaignTracking,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CampaignResponseRecipients {
    #[serde(default)]
    pub list_id: String,
    #[serde(default)]
    pub list_name: String,
    #[serde(default)]
    pub segment_text: String,
    #[serde(default)]
    pub recipient_count: i64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CampaignResponseSettings {
    #[serde(default)]
    pub subject_line: String,
    #[serde(default)]
    pub preview_text: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub from_name: String,
    #[serde(default)]
    pub reply_to: String,
    #[serde(default)]
    pub use_conversation: bool,
    #[serde(default)]
    pub to_name: String,
    #[serde(default)]
    pub folder_id: String,
    #[serde(default)]
    pub authenticate: bool,
    #[serde(default)]
    pub auto_footer: bool,
    #[serde(default)]
    pub inline_css: bool,
    #[serde(default)]
    pub auto_tweet: bool,
    #[serde(default)]
    pub fb_comments: bool,
    #[serde(default)]
    pub timewarp: bool,
    #[serde(default)]
    pub template_id: u64,
    #[serde(default)]
    pub drag_and_drop: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CampaignTracking {
    pub opens: bool,
    pub html_clicks: bool,
    pub text_clicks: bool,
    pub goal_tracking: bool,
    pub ecomm360: bool,
    #[serde(default)]
    pub google_analytics: String,
    #[serde(default)]
    pub clicktale: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CampaignEcommerce {
    #[serde(default)]
    pub total_orders: i64,
    #[serde(default)]
    pub total_spent: i64,
    #[serde(default)]
    pub total_revenue: i64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CampaignReportSummary {
    #[serde(default)]
    pub opens: i64,
    #[serde(default)]
    pub unique_opens: i64,
    #[serde(default)]
    pub open_rate: f64,
    #[serde(default)]
    pub clicks: i64,
    #[serde(default)]
    pub subscriber_clicks: i64,
    #[serde(default)]
    pub click_rate: f64,
    #[serde(default)]
    pub ecommerce: CampaignEcommerce,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CampaignDeliveryStatus {
    #[serde(default)]
    pub enabled: bool,
    #[serde(default)]
    pub can_cancel: bool,
    /// "delivering", "delivered", "canceling" or "canceled".
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub emails_sent: i64,
    #[serde(default)]
    pub emails_canceled: i64,
}

/// A campaign as returned by the API.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Campaign {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub web_id: i64,
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub create_time: String,
    #[serde(default)]
    pub archive_url: String,
    #[serde(default)]
    pub long_archive_url: String,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub emails_sent: i64,
    #[serde(default)]
    pub send_time: String,
    #[serde(default)]
    pub content_type: String,
    #[serde(default)]
    pub needs_block_refresh: bool,
    #[serde(default)]
    pub recipients: CampaignResponseRecipients,
    #[serde(default)]
    pub settings: CampaignResponseSettings,
    #[serde(default)]
    pub tracking: CampaignTracking,
    #[serde(default)]
    pub report_summary: CampaignReportSummary,
    #[serde(default)]
    pub delivery_status: CampaignDeliveryStatus,
    #[serde(rename = "_links", default, skip_serializing_if = "Vec::is_empty")]
    pub links: Vec<Link>,
}

// ============================================================================
// Operations
// ============================================================================

impl Client {
    /// Fetch campaigns matching the given filters.
    pub async fn get_campaigns(
        &self,
        params: Option<&CampaignQueryParams>,
    ) -> ClientResult<ListOfCampaigns> {
        self.get(CAMPAIGNS_PATH, params.map(|p| p as _)).await
    }

    /// Fetch a single campaign by id.
    pub async fn get_campaign(
        &self,
        id: &str,
        params: Option<&BasicQueryParams>,
    ) -> ClientResult<Campaign> {
        let path = format!("{CAMPAIGNS_PATH}/{id}");
        self.get(&path, params.map(|p| p as _)).await
    }

    /// Create a new campaign.
    pub async fn create_campaign(
        &self,
        body: &CampaignCreationRequest,
    ) -> ClientResult<Campaign> {
        self.send(Method::POST, CAMPAIGNS_PATH, body).await
    }

    /// Update a campaign's settings.
    pub async fn update_campaign(
        &self,
        id: &str,
        body: &CampaignCreationRequest,
    ) -> ClientResult<Campaign> {
        let path = format!("{CAMPAIGNS_PATH}/{id}");
        self.send(Method::PATCH, &path, body).await
    }

    /// Delete a campaign.
    pub async fn delete_campaign(&self, id: &str) -> ClientResult<()> {
        let path = format!("{CAMPAIGNS_PATH}/{id}");
        self.request_ok(Method::DELETE, &path).await
    }
}

// ============================================================================
// Actions
// ============================================================================

/// Body for the send-test action.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TestEmailRequest {
    pub test_emails: Vec<String>,
    /// One of the `CAMPAIGN_SEND_TYPE_*` constants.
    pub send_type: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SendCampaignRequest {
    pub campaign_id: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct ScheduleCampaignRequest {
    schedule_time: String,
}

impl Client {
    /// Send a test email for the campaign.
    pub async fn send_test_email(&self, id: &str, body: &TestEmailRequest) -> ClientResult<()> {
        let path = format!("{CAMPAIGNS_PATH}/{id}/actions/test");
        self.send_ok(Method::POST, &path, body).await
    }

    /// Send the campaign immediately.
    pub async fn send_campaign(&self, id: &str, body: &SendCampaignRequest) -> ClientResult<()> {
        let path = format!("{CAMPAIGNS_PATH}/{id}/actions/send");
        self.send_ok(Method::POST, &path, body).await
    }

    /// Schedule the campaign for delivery at the given UTC time, sent to the
    /// API in ISO 8601. Campaigns may only be scheduled on the quarter-hour
    /// (:00, :15, :30, :45).
    pub async fn schedule_campaign(
        &self,
        id: &str,
        schedule_time: DateTime<Utc>,
    ) -> ClientResult<()> {
        let body = ScheduleCampaignRequest {
            schedule_time: schedule_time.to_rfc3339_opts(SecondsFormat::Secs, true),
        };
        let path = format!("{CAMPAIGNS_PATH}/{id}/actions/schedule");
        self.send_ok(Method::POST, &path, &body).await
    }

    /// Cancel a scheduled send.
    pub async fn unschedule_campaign(&self, id: &str) -> ClientResult<()> {
        let path = format!("{CAMPAIGNS_PATH}/{id}/actions/unschedule");
        self.request_ok(Method::POST, &path).await
    }
}

// ============================================================================
// Content
// ============================================================================

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CampaignContentTemplateRequest {
    #[serde(default, skip_serializing_if = "is_zero_u64")]
    pub id: u64,
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub sections: HashMap<String, String>,
}

fn is_zero_u64(n: &u64) -> bool {
    *n == 0
}

/// Body for replacing a campaign's content.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CampaignContentUpdateRequest {
    pub plain_text: String,
    pub html: String,
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub template: Option<CampaignContentTemplateRequest>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CampaignContentResponse {
    #[serde(default)]
    pub plain_text: String,
    #[serde(default)]
    pub html: String,
    #[serde(default)]
    pub archive_html: String,
    #[serde(rename = "_links", default, skip_serializing_if = "Vec::is_empty")]
    pub links: Vec<Link>,
}

impl Client {
    /// Fetch the rendered content of a campaign.
    pub async fn get_campaign_content(
        &self,
        id: &str,
        params: Option<&BasicQueryParams>,
    ) -> ClientResult<CampaignContentResponse> {
        let path = format!("{CAMPAIGNS_PATH}/{id}/content");
        self.get(&path, params.map(|p| p as _)).await
    }

    /// Replace the content of a campaign.
    pub async fn update_campaign_content(
        &self,
        id: &str,
        body: &CampaignContentUpdateRequest,
    ) -> ClientResult<CampaignContentResponse> {
        let path = format!("{CAMPAIGNS_PATH}/{id}/content");
        self.send(Method::PUT, &path, body).await
    }
}
