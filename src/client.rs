//! Mailchimp API client and request pipeline
//!
//! `Client` resolves the regional endpoint from the API key once at
//! construction, then funnels every operation through a single
//! request/response pipeline: compose URL, attach basic auth, encode the
//! JSON body, append non-empty query parameters, execute, and decode the
//! typed response or the structured API error.

use once_cell::sync::Lazy;
use regex::Regex;
use reqwest::header::CONTENT_TYPE;
use reqwest::Method;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{ApiError, ClientError, ClientResult};
use crate::params::{BasicQueryParams, QueryParams};
use crate::types::Link;

/// Hostname template; the datacenter shard goes in front.
pub const URI_FORMAT: &str = "api.mailchimp.com";

/// API version path prefix.
pub const VERSION: &str = "/3.0";

/// Environment variable read by [`Client::from_env`].
pub const API_KEY_ENV: &str = "MAILCHIMP_API_KEY";

/// Extracts the trailing datacenter token from an API key
/// (`<key>-<datacenter>`).
static DATACENTER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^-]\w+$").expect("datacenter regex must compile"));

/// Authenticated handle for the Mailchimp Marketing API v3.
///
/// Holds the API key, the HTTP transport and the resolved base endpoint.
/// Configuration is immutable after construction apart from the debug
/// toggle, so one instance can be shared freely across concurrent calls;
/// `reqwest::Client` is internally pooled and cheap to clone.
///
/// Every operation issues exactly one HTTP request. There are no retries;
/// dropping the returned future (for example under `tokio::time::timeout`)
/// aborts the in-flight request.
#[derive(Debug, Clone)]
pub struct Client {
    key: String,
    http: reqwest::Client,
    user: String,
    debug: bool,
    endpoint: String,
}

impl Client {
    /// Create a client from an API key of the form `<key>-<datacenter>`.
    ///
    /// The datacenter suffix selects the regional hostname. A key without a
    /// recognizable suffix is not rejected here; it surfaces later as an
    /// authentication failure from the server.
    pub fn new(api_key: &str) -> Self {
        Self::with_http_client(api_key, reqwest::Client::new())
    }

    /// Create a client with an externally configured `reqwest::Client`
    /// (timeouts, proxy, pool settings).
    pub fn with_http_client(api_key: &str, http: reqwest::Client) -> Self {
        let endpoint = resolve_endpoint(api_key);
        Client {
            key: api_key.to_string(),
            http,
            user: "mailchimp3".to_string(),
            debug: false,
            endpoint,
        }
    }

    /// Create a client with an explicit base endpoint instead of the one
    /// derived from the key. Intended for tests and proxies; a trailing
    /// slash is trimmed.
    pub fn with_endpoint(api_key: &str, endpoint: &str) -> Self {
        let mut client = Self::new(api_key);
        client.endpoint = endpoint.trim_end_matches('/').to_string();
        client
    }

    /// Create a client from the `MAILCHIMP_API_KEY` environment variable.
    /// Returns `None` when the variable is unset.
    pub fn from_env() -> Option<Self> {
        std::env::var(API_KEY_ENV).ok().map(|key| Self::new(&key))
    }

    /// Toggle debug dumps of requests and responses to the `tracing` sink.
    /// Logging never alters control flow or results.
    pub fn set_debug(&mut self, debug: bool) {
        self.debug = debug;
    }

    /// Builder-style variant of [`set_debug`](Self::set_debug).
    pub fn debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    /// The resolved base endpoint, e.g. `https://us14.api.mailchimp.com/3.0`.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    // ========================================================================
    // Request pipeline
    // ========================================================================

    /// Execute one HTTP exchange and return the raw response body on 2xx.
    ///
    /// Non-2xx responses are parsed as problem-details and returned as
    /// `ClientError::Api`; if that parse fails the original status code is
    /// kept in `ClientError::ErrorBodyDecode`. Transport failures pass
    /// through unmodified.
    async fn execute(
        &self,
        method: Method,
        path: &str,
        params: Option<&dyn QueryParams>,
        body: Option<Vec<u8>>,
    ) -> ClientResult<Vec<u8>> {
        let url = format!("{}{}", self.endpoint, path);
        if self.debug {
            debug!(method = %method, url = %url, "requesting");
        }

        let mut request = self
            .http
            .request(method, &url)
            .header(CONTENT_TYPE, "application/json")
            .basic_auth(&self.user, Some(&self.key));

        if let Some(body) = body {
            if self.debug {
                debug!(body = %String::from_utf8_lossy(&body), "adding body");
            }
            request = request.body(body);
        }

        if let Some(params) = params {
            let mut pairs: Vec<(String, String)> = params
                .params()
                .into_iter()
                .filter(|(_, v)| !v.is_empty())
                .collect();
            pairs.sort();
            if self.debug {
                debug!(?pairs, "adding query params");
            }
            request = request.query(&pairs);
        }

        let response = request.send().await?;
        let status = response.status();
        let data = response.bytes().await?;

        if self.debug {
            debug!(
                status = status.as_u16(),
                body = %String::from_utf8_lossy(&data),
                "response"
            );
        }

        if status.is_success() {
            return Ok(data.to_vec());
        }

        Err(parse_api_error(status.as_u16(), &data))
    }

    /// GET with optional query parameters, decoding a typed response.
    pub(crate) async fn get<T>(
        &self,
        path: &str,
        params: Option<&dyn QueryParams>,
    ) -> ClientResult<T>
    where
        T: DeserializeOwned + Default,
    {
        let data = self.execute(Method::GET, path, params, None).await?;
        decode_response(&data)
    }

    /// POST/PATCH/PUT a JSON body, decoding a typed response. Encode
    /// failures return immediately, before any I/O.
    pub(crate) async fn send<T, B>(&self, method: Method, path: &str, body: &B) -> ClientResult<T>
    where
        T: DeserializeOwned + Default,
        B: Serialize + ?Sized,
    {
        let data = serde_json::to_vec(body).map_err(ClientError::Encode)?;
        let response = self.execute(method, path, None, Some(data)).await?;
        decode_response(&response)
    }

    /// POST/PATCH/PUT a JSON body, discarding any response body.
    pub(crate) async fn send_ok<B>(&self, method: Method, path: &str, body: &B) -> ClientResult<()>
    where
        B: Serialize + ?Sized,
    {
        let data = serde_json::to_vec(body).map_err(ClientError::Encode)?;
        self.execute(method, path, None, Some(data)).await?;
        Ok(())
    }

    /// Run the pipeline with no body and discard any response body.
    /// Success means the status was 2xx; any error propagates.
    pub(crate) async fn request_ok(&self, method: Method, path: &str) -> ClientResult<()> {
        self.execute(method, path, None, None).await?;
        Ok(())
    }
}

/// Derive the versioned base URL from the key's datacenter suffix.
fn resolve_endpoint(api_key: &str) -> String {
    let datacenter = DATACENTER_RE
        .find(api_key)
        .map(|m| m.as_str())
        .unwrap_or("");
    format!("https://{datacenter}.{URI_FORMAT}{VERSION}")
}

/// Decode a 2xx body into the requested type. An empty body yields the
/// type's default value with no decode attempted.
fn decode_response<T>(data: &[u8]) -> ClientResult<T>
where
    T: DeserializeOwned + Default,
{
    if data.is_empty() {
        return Ok(T::default());
    }
    serde_json::from_slice(data).map_err(ClientError::Decode)
}

fn parse_api_error(status: u16, data: &[u8]) -> ClientError {
    match serde_json::from_slice::<ApiError>(data) {
        Ok(api_error) => ClientError::Api(api_error),
        Err(source) => ClientError::ErrorBodyDecode { status, source },
    }
}

// ============================================================================
// API root
// ============================================================================

/// Account contact block on the API root resource.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AccountContact {
    #[serde(default)]
    pub company: String,
    #[serde(default)]
    pub addr1: String,
    #[serde(default)]
    pub addr2: String,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub state: String,
    #[serde(default)]
    pub zip: String,
    #[serde(default)]
    pub country: String,
}

/// Response of the API root endpoint (`GET /`), describing the account
/// behind the key.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RootResponse {
    #[serde(default)]
    pub account_id: String,
    #[serde(default)]
    pub login_id: String,
    #[serde(default)]
    pub account_name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub role: String,
    #[serde(default)]
    pub avatar_url: String,
    #[serde(default)]
    pub member_since: String,
    #[serde(default)]
    pub total_subscribers: i64,
    #[serde(default)]
    pub contact: AccountContact,
    #[serde(rename = "_links", default, skip_serializing_if = "Vec::is_empty")]
    pub links: Vec<Link>,
}

impl Client {
    /// Fetch the API root resource for the authenticated account.
    pub async fn get_root(&self, params: Option<&BasicQueryParams>) -> ClientResult<RootResponse> {
        self.get("/", params.map(|p| p as _)).await
    }
}
