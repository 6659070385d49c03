// SPDX-License-Identifier: MPL-2.0

use serde::{Deserialize, Serialize};

/// Decoupled from the backend's token response so the rest of the crate
/// only sees our own types. Passed explicitly into every controller;
/// nothing in the crate holds ambient session state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub user_id: String,
    pub email: String,
    pub access_token: String,
    pub refresh_token: String,
}

/// Identity record, created at account creation and mutated by its owner
/// only. `full_name` is always present; the rest of the fields are filled
/// in as the owner builds out their page.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Profile {
    pub id: String,
    pub full_name: String,
    pub headline: Option<String>,
    pub location: Option<String>,
    pub about: Option<String>,
    pub avatar_url: Option<String>,
    pub banner_url: Option<String>,
}

/// Partial update for the owner's profile row. `None` fields are left
/// untouched by the store.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ProfileChanges {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub headline: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub about: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub banner_url: Option<String>,
}

/// Lifecycle of a directed connection edge. `none → pending → {accepted,
/// rejected}`; accepted and rejected are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConnectionStatus {
    Pending,
    Accepted,
    Rejected,
}

impl ConnectionStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            ConnectionStatus::Pending => "pending",
            ConnectionStatus::Accepted => "accepted",
            ConnectionStatus::Rejected => "rejected",
        }
    }
}

/// Directed edge `user_id → connected_user_id`. A mutual relationship is
/// two accepted rows, one per direction, both written by the accept
/// operation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Connection {
    pub id: String,
    pub user_id: String,
    pub connected_user_id: String,
    pub status: ConnectionStatus,
    pub created_at: String,
}

/// A pending edge toward the current user, joined with the requester's
/// profile. The join can come back empty if the requester's profile row is
/// gone; rows like that are skipped at render time.
#[derive(Debug, Clone, Deserialize)]
pub struct ConnectionRequest {
    #[serde(flatten)]
    pub connection: Connection,
    #[serde(rename = "profiles")]
    pub requester: Option<Profile>,
}

/// Authored content. The counters are denormalized by the store; the
/// client adopts them from re-fetched rows rather than incrementing its
/// own copies.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Post {
    pub id: String,
    pub user_id: String,
    pub content: String,
    pub image_url: Option<String>,
    pub likes_count: i64,
    pub comments_count: i64,
    pub created_at: String,
}

/// Feed row: a post with its author joined in and the viewer's like state
/// merged client-side from the likes table.
#[derive(Debug, Clone, Deserialize)]
pub struct FeedPost {
    #[serde(flatten)]
    pub post: Post,
    #[serde(rename = "profiles")]
    pub author: Option<Profile>,
    #[serde(skip)]
    pub liked_by_viewer: bool,
}

/// Existence-only edge; un-liking deletes the row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Like {
    pub user_id: String,
    pub post_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Comment {
    pub id: String,
    pub user_id: String,
    pub post_id: String,
    pub content: String,
    pub created_at: String,
}

/// Comment with its author joined in, ordered oldest-first by the store.
#[derive(Debug, Clone, Deserialize)]
pub struct PostComment {
    #[serde(flatten)]
    pub comment: Comment,
    #[serde(rename = "profiles")]
    pub author: Option<Profile>,
}
