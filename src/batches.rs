//! Batch operation endpoints
//!
//! Pass-through access to `/batches`: submit a set of operations and poll
//! their aggregate status. The client adds no batching of its own.

use reqwest::Method;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::client::Client;
use crate::error::ClientResult;
use crate::params::{BasicQueryParams, ListQueryParams};
use crate::types::{Link, ListMeta};

const BATCHES_PATH: &str = "/batches";

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListOfBatchOperations {
    #[serde(flatten)]
    pub meta: ListMeta,
    #[serde(default)]
    pub batches: Vec<BatchOperationResponse>,
}

/// One operation inside a batch submission, expressed as a relative API
/// call.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BatchOperation {
    pub method: String,
    pub path: String,
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub params: HashMap<String, Vec<String>>,
    pub body: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub operation_id: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BatchOperationCreationRequest {
    pub operations: Vec<BatchOperation>,
}

/// Status of a submitted batch.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BatchOperationResponse {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub total_operations: i64,
    #[serde(default)]
    pub finished_operations: i64,
    #[serde(default)]
    pub errored_operations: i64,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub submitted_at: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub completed_at: String,
    #[serde(default)]
    pub response_body_url: String,
    #[serde(rename = "_links", default, skip_serializing_if = "Vec::is_empty")]
    pub links: Vec<Link>,
}

impl Client {
    /// Fetch the batches submitted for this account.
    pub async fn get_batch_operations(
        &self,
        params: Option<&ListQueryParams>,
    ) -> ClientResult<ListOfBatchOperations> {
        self.get(BATCHES_PATH, params.map(|p| p as _)).await
    }

    /// Fetch the status of a single batch.
    pub async fn get_batch_operation(
        &self,
        id: &str,
        params: Option<&BasicQueryParams>,
    ) -> ClientResult<BatchOperationResponse> {
        let path = format!("{BATCHES_PATH}/{id}");
        self.get(&path, params.map(|p| p as _)).await
    }

    /// Submit a new batch of operations.
    pub async fn create_batch_operation(
        &self,
        body: &BatchOperationCreationRequest,
    ) -> ClientResult<BatchOperationResponse> {
        self.send(Method::POST, BATCHES_PATH, body).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_batch_request_encoding() {
        let request = BatchOperationCreationRequest {
            operations: vec![BatchOperation {
                method: "POST".to_string(),
                path: "/lists/l1/members".to_string(),
                body: r#"{"email_address":"a@b.com","status":"subscribed"}"#.to_string(),
                ..Default::default()
            }],
        };
        let json = serde_json::to_string(&request).unwrap();
        assert!(json.contains(r#""method":"POST""#));
        assert!(!json.contains("operation_id"));
        assert!(!json.contains("params"));
    }

    #[test]
    fn test_batch_status_decode() {
        let body = r#"{
            "id": "b1",
            "status": "finished",
            "total_operations": 2,
            "finished_operations": 2,
            "errored_operations": 0,
            "response_body_url": "https://example.test/archive.tar.gz"
        }"#;
        let batch: BatchOperationResponse = serde_json::from_str(body).unwrap();
        assert_eq!(batch.status, "finished");
        assert_eq!(batch.total_operations, 2);
    }
}
