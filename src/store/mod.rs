// SPDX-License-Identifier: MPL-2.0

mod http;
mod postgrest;
mod types;

pub use http::{HttpStore, StoreError};
pub use postgrest::Query;
pub use types::{
    Comment, Connection, ConnectionRequest, ConnectionStatus, FeedPost, Like, Post, PostComment,
    Profile, ProfileChanges, Session,
};

/// The remote persistence and query service backing all entities.
///
/// Controllers are generic over this seam so the derivation logic runs
/// deterministically against an in-memory store under test. Every method is
/// a single request/response round trip except [`accept_connection`], whose
/// contract is transactional: the status flip and the reciprocal insert
/// commit together or not at all.
///
/// [`accept_connection`]: RelationshipStore::accept_connection
#[allow(async_fn_in_trait)]
pub trait RelationshipStore {
    /// All profiles except the given user's own row.
    async fn profiles_except(&self, user_id: &str) -> Result<Vec<Profile>, StoreError>;

    async fn profile_by_id(&self, user_id: &str) -> Result<Option<Profile>, StoreError>;

    async fn profiles_by_ids(&self, ids: &[String]) -> Result<Vec<Profile>, StoreError>;

    async fn update_profile(
        &self,
        user_id: &str,
        changes: &ProfileChanges,
    ) -> Result<(), StoreError>;

    /// Edges rooted at the user, optionally narrowed to one status.
    async fn connections_from(
        &self,
        user_id: &str,
        status: Option<ConnectionStatus>,
    ) -> Result<Vec<Connection>, StoreError>;

    /// Pending edges pointing at the user, requester profile joined.
    async fn incoming_requests(&self, user_id: &str) -> Result<Vec<ConnectionRequest>, StoreError>;

    async fn insert_connection(
        &self,
        user_id: &str,
        connected_user_id: &str,
        status: ConnectionStatus,
    ) -> Result<(), StoreError>;

    async fn set_connection_status(
        &self,
        connection_id: &str,
        status: ConnectionStatus,
    ) -> Result<(), StoreError>;

    /// Flip the pending edge to accepted and write the reciprocal accepted
    /// edge in one transaction. Either both rows land or neither does.
    async fn accept_connection(
        &self,
        connection_id: &str,
        requester_id: &str,
        user_id: &str,
    ) -> Result<(), StoreError>;

    /// All posts, author joined, newest first.
    async fn feed_posts(&self) -> Result<Vec<FeedPost>, StoreError>;

    async fn post_by_id(&self, post_id: &str) -> Result<Post, StoreError>;

    async fn insert_post(
        &self,
        user_id: &str,
        content: &str,
        image_url: Option<&str>,
    ) -> Result<(), StoreError>;

    /// Comments on a post, author joined, oldest first.
    async fn comments_for(&self, post_id: &str) -> Result<Vec<PostComment>, StoreError>;

    async fn insert_comment(
        &self,
        user_id: &str,
        post_id: &str,
        content: &str,
    ) -> Result<(), StoreError>;

    /// Every like edge the user has created.
    async fn likes_by(&self, user_id: &str) -> Result<Vec<Like>, StoreError>;

    async fn insert_like(&self, user_id: &str, post_id: &str) -> Result<(), StoreError>;

    async fn delete_like(&self, user_id: &str, post_id: &str) -> Result<(), StoreError>;
}
