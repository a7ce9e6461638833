//! List webhook endpoints, issued through a [`ListHandle`]

use reqwest::Method;
use serde::{Deserialize, Serialize};

use crate::error::ClientResult;
use crate::lists::{ListHandle, LISTS_PATH};
use crate::types::{Link, ListMeta};

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListOfWebhooks {
    #[serde(flatten)]
    pub meta: ListMeta,
    #[serde(default)]
    pub list_id: String,
    #[serde(default)]
    pub webhooks: Vec<Webhook>,
}

/// Which subscriber events trigger the webhook.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WebhookEvents {
    pub subscribe: bool,
    pub unsubscribe: bool,
    pub profile: bool,
    pub cleaned: bool,
    pub upemail: bool,
    pub campaign: bool,
}

/// Which actors cause events to fire the webhook.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WebhookSources {
    pub user: bool,
    pub admin: bool,
    pub api: bool,
}

/// Body for creating or updating a webhook.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WebhookRequest {
    pub url: String,
    pub events: WebhookEvents,
    pub sources: WebhookSources,
}

/// A webhook as returned by the API.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Webhook {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub list_id: String,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub events: WebhookEvents,
    #[serde(default)]
    pub sources: WebhookSources,
    #[serde(rename = "_links", default, skip_serializing_if = "Vec::is_empty")]
    pub links: Vec<Link>,
}

impl<'a> ListHandle<'a> {
    fn webhooks_path(&self) -> String {
        format!("{LISTS_PATH}/{}/webhooks", self.id)
    }

    /// Fetch the webhooks configured for this list.
    pub async fn get_webhooks(&self) -> ClientResult<ListOfWebhooks> {
        self.check()?;
        self.client.get(&self.webhooks_path(), None).await
    }

    /// Fetch a single webhook by id.
    pub async fn get_webhook(&self, id: &str) -> ClientResult<Webhook> {
        self.check()?;
        let path = format!("{}/{id}", self.webhooks_path());
        self.client.get(&path, None).await
    }

    /// Register a new webhook for this list.
    pub async fn create_webhook(&self, body: &WebhookRequest) -> ClientResult<Webhook> {
        self.check()?;
        self.client
            .send(Method::POST, &self.webhooks_path(), body)
            .await
    }

    /// Update an existing webhook.
    pub async fn update_webhook(&self, id: &str, body: &WebhookRequest) -> ClientResult<Webhook> {
        self.check()?;
        let path = format!("{}/{id}", self.webhooks_path());
        self.client.send(Method::PATCH, &path, body).await
    }

    /// Delete a webhook.
    pub async fn delete_webhook(&self, id: &str) -> ClientResult<()> {
        self.check()?;
        let path = format!("{}/{id}", self.webhooks_path());
        self.client.request_ok(Method::DELETE, &path).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_webhook_round_trip() {
        let body = r#"{
            "id": "w1",
            "list_id": "l1",
            "url": "https://example.test/hook",
            "events": {"subscribe": true, "unsubscribe": true, "profile": false,
                       "cleaned": false, "upemail": false, "campaign": false},
            "sources": {"user": true, "admin": false, "api": true}
        }"#;
        let hook: Webhook = serde_json::from_str(body).unwrap();
        assert!(hook.events.subscribe);
        assert!(hook.sources.api);
        assert!(!hook.sources.admin);

        let echoed = serde_json::to_string(&hook).unwrap();
        let again: Webhook = serde_json::from_str(&echoed).unwrap();
        assert_eq!(again.url, hook.url);
    }
}
