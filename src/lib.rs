//! Typed async client for the Mailchimp Marketing API v3
//!
//! Every operation is a single authenticated HTTP round trip against the
//! regional endpoint derived from the API key (`<key>-<datacenter>`), with
//! JSON bodies marshaled through `serde` and API failures surfaced as a
//! uniform [`ClientError`].
//!
//! # Architecture
//!
//! ```text
//! Client ──────────────► request pipeline (auth, query, JSON, errors)
//!   │
//!   ├── campaigns / templates / folders / batches   (client-level calls)
//!   └── list(id) ─► ListHandle ─► members, webhooks
//!                        └── member(email) ─► MemberHandle ─► notes, tags,
//!                                                             activity, goals
//! ```
//!
//! Handles are cheap local constructions carrying the parent id chain; only
//! leaf calls perform I/O, and missing identifiers fail locally before any
//! network call.
//!
//! # Example
//!
//! ```no_run
//! use mailchimp3::{Client, MemberRequest};
//!
//! # async fn example() -> Result<(), mailchimp3::ClientError> {
//! let client = Client::new("0123456789abcdef0123456789abcdef-us14");
//!
//! let lists = client.get_lists(None).await?;
//! let list = client.list(lists.lists[0].id.as_str());
//!
//! let member = list
//!     .create_member(&MemberRequest {
//!         email_address: "john@example.com".to_string(),
//!         status: "subscribed".to_string(),
//!         ..Default::default()
//!     })
//!     .await?;
//!
//! let notes = list.member(&member.email_address).get_notes(None).await?;
//! println!("{} notes", notes.meta.total_items);
//! # Ok(())
//! # }
//! ```

pub mod batches;
pub mod campaign_folders;
pub mod campaigns;
pub mod client;
pub mod error;
pub mod lists;
pub mod members;
pub mod params;
pub mod template_folders;
pub mod templates;
pub mod types;
pub mod webhooks;

// Re-export commonly used types
pub use client::{Client, RootResponse, API_KEY_ENV, URI_FORMAT, VERSION};
pub use error::{ApiError, ClientError, ClientResult};
pub use lists::{List, ListCreationRequest, ListHandle, ListOfLists};
pub use members::{
    email_to_member_id, ListOfMembers, Member, MemberHandle, MemberNote, MemberRequest,
    UpdateMemberTag,
};
pub use params::{BasicQueryParams, ExtendedQueryParams, ListQueryParams, QueryParams};
pub use types::{Link, ListMeta};

pub use batches::{
    BatchOperation, BatchOperationCreationRequest, BatchOperationResponse, ListOfBatchOperations,
};
pub use campaign_folders::{
    CampaignFolder, CampaignFolderCreationRequest, CampaignFolderQueryParams,
    ListOfCampaignFolders,
};
pub use campaigns::{
    Campaign, CampaignContentUpdateRequest, CampaignCreationRequest, CampaignQueryParams,
    ListOfCampaigns, SendCampaignRequest, TestEmailRequest,
};
pub use template_folders::{
    ListOfTemplateFolders, TemplateFolder, TemplateFolderCreationRequest,
    TemplateFolderQueryParams,
};
pub use templates::{ListOfTemplates, Template, TemplateCreationRequest, TemplateQueryParams};
pub use webhooks::{ListOfWebhooks, Webhook, WebhookEvents, WebhookRequest, WebhookSources};
