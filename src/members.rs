//! Member endpoints, subscriber-hash derivation and member sub-resources
//!
//! Members are addressed by the MD5 hash of their lowercased email address;
//! the server computes the same digest, so [`email_to_member_id`] must
//! match it byte for byte. Notes, tags, activity and goals are nested under
//! a member and issued through a [`MemberHandle`].

use md5::{Digest, Md5};
use reqwest::Method;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::client::Client;
use crate::error::{ClientError, ClientResult};
use crate::lists::{ListHandle, LISTS_PATH};
use crate::params::{BasicQueryParams, ExtendedQueryParams};
use crate::types::{Link, ListMeta};

/// Convert an email address to the subscriber hash used as the member id:
/// lowercase, MD5, lowercase hex. Always 32 characters.
pub fn email_to_member_id(email: &str) -> String {
    let digest = Md5::digest(email.to_lowercase().as_bytes());
    hex::encode(digest)
}

// ============================================================================
// Wire models
// ============================================================================

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListOfMembers {
    #[serde(flatten)]
    pub meta: ListMeta,
    #[serde(default)]
    pub list_id: String,
    #[serde(default)]
    pub members: Vec<Member>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MemberStats {
    #[serde(default)]
    pub avg_open_rate: f64,
    #[serde(default)]
    pub avg_click_rate: f64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MemberLocation {
    #[serde(default)]
    pub latitude: f64,
    #[serde(default)]
    pub longitude: f64,
    #[serde(rename = "gmtoff", default)]
    pub gmt_offset: i32,
    #[serde(rename = "dstoff", default)]
    pub dst_offset: i32,
    #[serde(default)]
    pub country_code: String,
    #[serde(default)]
    pub timezone: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MarketingPermission {
    pub marketing_permission_id: String,
    pub text: String,
    pub enabled: bool,
}

/// Compact note summary embedded in a member record.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MemberNoteShort {
    #[serde(rename = "note_id", default)]
    pub id: i64,
    #[serde(default)]
    pub created_at: String,
    #[serde(default)]
    pub created_by: String,
    #[serde(default)]
    pub note: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MemberTag {
    #[serde(default)]
    pub id: i64,
    #[serde(default)]
    pub name: String,
}

/// Body for creating or updating a member.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MemberRequest {
    pub email_address: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub email_type: String,
    pub status: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub status_if_new: String,
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub merge_fields: HashMap<String, serde_json::Value>,
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub interests: HashMap<String, bool>,
    #[serde(default)]
    pub language: String,
    #[serde(default)]
    pub vip: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<MemberLocation>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub marketing_permissions: Vec<MarketingPermission>,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub ip_opt: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub ip_signup: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub timestamp_signup: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub timestamp_opt: String,
}

/// A member as returned by the API.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Member {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub list_id: String,
    #[serde(default)]
    pub email_address: String,
    #[serde(default)]
    pub unique_email_id: String,
    #[serde(default)]
    pub email_type: String,
    #[serde(default)]
    pub status: String,
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub merge_fields: HashMap<String, serde_json::Value>,
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub interests: HashMap<String, bool>,
    #[serde(default)]
    pub language: String,
    #[serde(default)]
    pub vip: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<MemberLocation>,
    #[serde(default)]
    pub ip_opt: String,
    #[serde(default)]
    pub ip_signup: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<MemberTag>,
    #[serde(default)]
    pub timestamp_signup: String,
    #[serde(default)]
    pub timestamp_opt: String,
    #[serde(default)]
    pub stats: MemberStats,
    #[serde(default)]
    pub member_rating: i32,
    #[serde(default)]
    pub last_changed: String,
    #[serde(default)]
    pub email_client: String,
    #[serde(default)]
    pub last_note: MemberNoteShort,
    #[serde(rename = "_links", default, skip_serializing_if = "Vec::is_empty")]
    pub links: Vec<Link>,
}

impl Member {
    /// Scoped handle for this member's sub-resources on the given client.
    /// Requires `list_id` and `id` to be populated, which every fetched
    /// member has; the handle's calls verify this before any I/O.
    pub fn handle<'a>(&self, client: &'a Client) -> MemberHandle<'a> {
        MemberHandle {
            client,
            list_id: self.list_id.clone(),
            id: self.id.clone(),
        }
    }
}

// ============================================================================
// Member operations (list scope)
// ============================================================================

impl<'a> ListHandle<'a> {
    fn members_path(&self) -> String {
        format!("{LISTS_PATH}/{}/members", self.id)
    }

    /// Fetch members of this list.
    pub async fn get_members(
        &self,
        params: Option<&ExtendedQueryParams>,
    ) -> ClientResult<ListOfMembers> {
        self.check()?;
        self.client
            .get(&self.members_path(), params.map(|p| p as _))
            .await
    }

    /// Fetch a single member by subscriber hash.
    pub async fn get_member(
        &self,
        id: &str,
        params: Option<&BasicQueryParams>,
    ) -> ClientResult<Member> {
        self.check()?;
        let path = format!("{}/{id}", self.members_path());
        self.client.get(&path, params.map(|p| p as _)).await
    }

    /// Add a new member to the list.
    pub async fn create_member(&self, body: &MemberRequest) -> ClientResult<Member> {
        self.check()?;
        self.client
            .send(Method::POST, &self.members_path(), body)
            .await
    }

    /// Update an existing member.
    pub async fn update_member(&self, id: &str, body: &MemberRequest) -> ClientResult<Member> {
        self.check()?;
        let path = format!("{}/{id}", self.members_path());
        self.client.send(Method::PATCH, &path, body).await
    }

    /// Add the member, or update it if the subscriber hash already exists.
    pub async fn add_or_update_member(
        &self,
        id: &str,
        body: &MemberRequest,
    ) -> ClientResult<Member> {
        self.check()?;
        let path = format!("{}/{id}", self.members_path());
        self.client.send(Method::PUT, &path, body).await
    }

    /// Archive a member.
    pub async fn delete_member(&self, id: &str) -> ClientResult<()> {
        self.check()?;
        let path = format!("{}/{id}", self.members_path());
        self.client.request_ok(Method::DELETE, &path).await
    }

    /// Permanently erase a member. Irreversible on the server side.
    pub async fn delete_member_permanent(&self, id: &str) -> ClientResult<()> {
        self.check()?;
        let path = format!("{}/{id}/actions/delete-permanent", self.members_path());
        self.client.request_ok(Method::POST, &path).await
    }

    /// Build a [`MemberHandle`] from a known subscriber hash, locally.
    pub fn member_by_id(&self, id: impl Into<String>) -> MemberHandle<'a> {
        MemberHandle {
            client: self.client,
            list_id: self.id.clone(),
            id: id.into(),
        }
    }

    /// Build a [`MemberHandle`] from an email address, deriving the
    /// subscriber hash locally.
    pub fn member(&self, email: &str) -> MemberHandle<'a> {
        self.member_by_id(email_to_member_id(email))
    }
}

impl Client {
    /// Build a member handle from a list id and email address. The result
    /// is ready for API calls: the subscriber hash is derived locally and
    /// no round trip is made.
    pub fn member_for_api_calls(&self, list_id: &str, email: &str) -> MemberHandle<'_> {
        self.list(list_id).member(email)
    }

    /// Fetch members of a list without constructing a handle first.
    pub async fn list_get_members(
        &self,
        list_id: &str,
        params: Option<&ExtendedQueryParams>,
    ) -> ClientResult<ListOfMembers> {
        self.list(list_id).get_members(params).await
    }

    /// Upsert a member by id, deriving the subscriber hash from the body's
    /// email address when no id is given. Fails locally when neither is
    /// present.
    pub async fn list_add_or_update_member(
        &self,
        list_id: &str,
        member_id: &str,
        body: &MemberRequest,
    ) -> ClientResult<Member> {
        let member_id = if member_id.is_empty() {
            if body.email_address.is_empty() {
                return Err(ClientError::MissingId("member id or email address"));
            }
            email_to_member_id(&body.email_address)
        } else {
            member_id.to_string()
        };

        self.list(list_id).add_or_update_member(&member_id, body).await
    }
}

// ============================================================================
// Member handle
// ============================================================================

/// Scoped handle for one member, used to issue note/tag/activity/goal
/// calls. Carries the full parent chain (list id + subscriber hash); both
/// are verified non-empty before any I/O.
#[derive(Debug, Clone)]
pub struct MemberHandle<'a> {
    pub(crate) client: &'a Client,
    pub(crate) list_id: String,
    pub(crate) id: String,
}

impl<'a> MemberHandle<'a> {
    /// The list id this member belongs to.
    pub fn list_id(&self) -> &str {
        &self.list_id
    }

    /// The subscriber hash identifying this member.
    pub fn id(&self) -> &str {
        &self.id
    }

    fn check(&self) -> ClientResult<()> {
        if self.list_id.is_empty() {
            return Err(ClientError::MissingId("list id"));
        }
        if self.id.is_empty() {
            return Err(ClientError::MissingId("member id"));
        }
        Ok(())
    }

    fn path(&self) -> String {
        format!("{LISTS_PATH}/{}/members/{}", self.list_id, self.id)
    }
}

// ============================================================================
// Activity
// ============================================================================

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListOfMemberActivity {
    #[serde(flatten)]
    pub meta: ListMeta,
    #[serde(default)]
    pub email_id: String,
    #[serde(default)]
    pub list_id: String,
    #[serde(default)]
    pub activity: Vec<MemberActivity>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MemberActivity {
    #[serde(default)]
    pub action: String,
    #[serde(default)]
    pub timestamp: String,
    #[serde(default)]
    pub url: String,
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub campaign_id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub parent_campaign: String,
}

impl<'a> MemberHandle<'a> {
    /// Fetch the member's recent activity feed.
    pub async fn get_activity(
        &self,
        params: Option<&BasicQueryParams>,
    ) -> ClientResult<ListOfMemberActivity> {
        self.check()?;
        let path = format!("{}/activity", self.path());
        self.client.get(&path, params.map(|p| p as _)).await
    }
}

// ============================================================================
// Goals
// ============================================================================

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListOfMemberGoals {
    #[serde(flatten)]
    pub meta: ListMeta,
    #[serde(default)]
    pub email_id: String,
    #[serde(default)]
    pub list_id: String,
    #[serde(default)]
    pub goals: Vec<MemberGoal>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MemberGoal {
    #[serde(rename = "goal_id", default)]
    pub id: i64,
    #[serde(default)]
    pub event: String,
    #[serde(default)]
    pub last_visited_at: String,
    #[serde(default)]
    pub data: String,
}

impl<'a> MemberHandle<'a> {
    /// Fetch the goal events recorded for the member.
    pub async fn get_goals(
        &self,
        params: Option<&BasicQueryParams>,
    ) -> ClientResult<ListOfMemberGoals> {
        self.check()?;
        let path = format!("{}/goals", self.path());
        self.client.get(&path, params.map(|p| p as _)).await
    }
}

// ============================================================================
// Notes
// ============================================================================

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListOfMemberNotes {
    #[serde(flatten)]
    pub meta: ListMeta,
    #[serde(default)]
    pub email_id: String,
    #[serde(default)]
    pub list_id: String,
    #[serde(default)]
    pub notes: Vec<MemberNote>,
}

/// Full note record returned by the notes endpoints.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MemberNote {
    #[serde(default)]
    pub id: i64,
    #[serde(default)]
    pub created_at: String,
    #[serde(default)]
    pub created_by: String,
    #[serde(default)]
    pub updated_at: String,
    #[serde(default)]
    pub note: String,
    #[serde(default)]
    pub list_id: String,
    #[serde(default)]
    pub email_id: String,
    #[serde(rename = "_links", default, skip_serializing_if = "Vec::is_empty")]
    pub links: Vec<Link>,
}

#[derive(Debug, Serialize)]
struct NoteBody<'a> {
    note: &'a str,
}

impl<'a> MemberHandle<'a> {
    fn notes_path(&self) -> String {
        format!("{}/notes", self.path())
    }

    /// Fetch the member's notes.
    pub async fn get_notes(
        &self,
        params: Option<&ExtendedQueryParams>,
    ) -> ClientResult<ListOfMemberNotes> {
        self.check()?;
        self.client
            .get(&self.notes_path(), params.map(|p| p as _))
            .await
    }

    /// Fetch a single note by id.
    pub async fn get_note(
        &self,
        id: &str,
        params: Option<&BasicQueryParams>,
    ) -> ClientResult<MemberNote> {
        self.check()?;
        let path = format!("{}/{id}", self.notes_path());
        self.client.get(&path, params.map(|p| p as _)).await
    }

    /// Attach a new note to the member.
    pub async fn create_note(&self, text: &str) -> ClientResult<MemberNote> {
        self.check()?;
        let body = NoteBody { note: text };
        self.client
            .send(Method::POST, &self.notes_path(), &body)
            .await
    }

    /// Replace the text of an existing note.
    pub async fn update_note(&self, id: &str, text: &str) -> ClientResult<MemberNote> {
        self.check()?;
        let body = NoteBody { note: text };
        let path = format!("{}/{id}", self.notes_path());
        self.client.send(Method::PATCH, &path, &body).await
    }

    /// Delete a note.
    pub async fn delete_note(&self, id: &str) -> ClientResult<()> {
        self.check()?;
        let path = format!("{}/{id}", self.notes_path());
        self.client.request_ok(Method::DELETE, &path).await
    }
}

// ============================================================================
// Tags
// ============================================================================

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListOfMemberTags {
    #[serde(flatten)]
    pub meta: ListMeta,
    #[serde(default)]
    pub tags: Vec<MemberTagDetail>,
}

/// Tag state change submitted via [`MemberHandle::update_tags`]; `status`
/// is `"active"` to add the tag or `"inactive"` to remove it.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateMemberTag {
    pub name: String,
    pub status: String,
}

/// Full tag record returned by the tags endpoint.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MemberTagDetail {
    #[serde(default)]
    pub id: i64,
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_added: Option<String>,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub status: String,
    #[serde(rename = "_links", default, skip_serializing_if = "Vec::is_empty")]
    pub links: Vec<Link>,
}

#[derive(Debug, Serialize)]
struct TagsBody<'a> {
    #[serde(skip_serializing_if = "<[_]>::is_empty")]
    tags: &'a [UpdateMemberTag],
}

impl<'a> MemberHandle<'a> {
    fn tags_path(&self) -> String {
        format!("{}/tags", self.path())
    }

    /// Fetch the tags attached to the member.
    pub async fn get_tags(
        &self,
        params: Option<&ExtendedQueryParams>,
    ) -> ClientResult<ListOfMemberTags> {
        self.check()?;
        self.client
            .get(&self.tags_path(), params.map(|p| p as _))
            .await
    }

    /// Add or remove tags in one call.
    pub async fn update_tags(&self, tags: &[UpdateMemberTag]) -> ClientResult<ListOfMemberTags> {
        self.check()?;
        let body = TagsBody { tags };
        self.client
            .send(Method::POST, &self.tags_path(), &body)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_email_hash_is_lowercase_hex() {
        let id = email_to_member_id("john@example.com");
        assert_eq!(id, "d4c74594d841139328695756648b6bd6");
        assert_eq!(id.len(), 32);
        assert!(id.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
    }

    #[test]
    fn test_email_hash_is_case_insensitive() {
        assert_eq!(
            email_to_member_id("John@Example.com"),
            email_to_member_id("john@example.com")
        );
    }

    #[test]
    fn test_member_for_api_calls_passes_preconditions() {
        let client = Client::new("key-us1");
        let member = client.member_for_api_calls("l1", "john@example.com");
        assert_eq!(member.list_id(), "l1");
        assert_eq!(member.id(), "d4c74594d841139328695756648b6bd6");
        assert!(member.check().is_ok());
    }

    #[test]
    fn test_member_handle_missing_list_id() {
        let client = Client::new("key-us1");
        let member = client.member_for_api_calls("", "john@example.com");
        assert!(matches!(
            member.check(),
            Err(ClientError::MissingId("list id"))
        ));
    }

    #[test]
    fn test_member_handle_missing_member_id() {
        let client = Client::new("key-us1");
        let member = client.list("l1").member_by_id("");
        assert!(matches!(
            member.check(),
            Err(ClientError::MissingId("member id"))
        ));
    }

    #[test]
    fn test_member_request_omits_empty_fields() {
        let body = MemberRequest {
            email_address: "a@b.com".to_string(),
            status: "subscribed".to_string(),
            ..Default::default()
        };
        let json = serde_json::to_string(&body).unwrap();
        assert!(!json.contains("merge_fields"));
        assert!(!json.contains("status_if_new"));
        assert!(!json.contains("tags"));
        assert!(json.contains(r#""email_address":"a@b.com""#));
    }

    #[test]
    fn test_member_round_trip() {
        let body = r#"{
            "id": "d4c74594d841139328695756648b6bd6",
            "list_id": "l1",
            "email_address": "john@example.com",
            "status": "subscribed",
            "merge_fields": {"FNAME": "John"},
            "stats": {"avg_open_rate": 0.5},
            "tags": [{"id": 1, "name": "vip"}]
        }"#;
        let member: Member = serde_json::from_str(body).unwrap();
        assert_eq!(member.email_address, "john@example.com");
        assert_eq!(member.tags[0].name, "vip");

        let echoed = serde_json::to_string(&member).unwrap();
        let again: Member = serde_json::from_str(&echoed).unwrap();
        assert_eq!(again.id, member.id);
        assert_eq!(again.merge_fields["FNAME"], member.merge_fields["FNAME"]);
    }
}
