// SPDX-License-Identifier: MPL-2.0

//! In-memory `RelationshipStore` used by the flow tests. Mirrors the
//! hosted backend's behavior: denormalized post counters are maintained by
//! the store, and `accept_connection` commits both rows or neither.

#![allow(dead_code)]

use gantry::store::{
    Comment, Connection, ConnectionRequest, ConnectionStatus, FeedPost, Like, Post, PostComment,
    Profile, ProfileChanges, RelationshipStore, Session, StoreError,
};
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

pub fn session(user_id: &str) -> Session {
    Session {
        user_id: user_id.to_string(),
        email: format!("{user_id}@example.test"),
        access_token: "token".to_string(),
        refresh_token: "refresh".to_string(),
    }
}

pub fn profile(id: &str) -> Profile {
    Profile {
        id: id.to_string(),
        full_name: format!("User {id}"),
        headline: None,
        location: None,
        about: None,
        avatar_url: None,
        banner_url: None,
    }
}

#[derive(Default)]
struct Inner {
    profiles: Vec<Profile>,
    connections: Vec<Connection>,
    posts: Vec<Post>,
    comments: Vec<Comment>,
    likes: Vec<Like>,
    next_id: u64,
    clock: u64,
}

impl Inner {
    fn next_id(&mut self) -> String {
        self.next_id += 1;
        format!("id-{}", self.next_id)
    }

    /// Strictly increasing RFC 3339 stamps so lexicographic order matches
    /// insertion order.
    fn stamp(&mut self) -> String {
        self.clock += 1;
        format!("2025-01-01T00:00:00.{:06}Z", self.clock)
    }
}

#[derive(Default)]
pub struct MemoryStore {
    inner: Mutex<Inner>,
    /// Number of `profiles_by_ids` round trips issued.
    pub profile_lookups: AtomicUsize,
    /// When set, every read fails with a network error.
    pub fail_reads: AtomicBool,
    /// When set, `accept_connection` fails before touching any state.
    pub fail_accept: AtomicBool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_profile(&self, id: &str) {
        self.inner.lock().unwrap().profiles.push(profile(id));
    }

    pub fn add_connection(&self, from: &str, to: &str, status: ConnectionStatus) -> String {
        let mut inner = self.inner.lock().unwrap();
        let id = inner.next_id();
        let created_at = inner.stamp();
        inner.connections.push(Connection {
            id: id.clone(),
            user_id: from.to_string(),
            connected_user_id: to.to_string(),
            status,
            created_at,
        });
        id
    }

    pub fn add_post(&self, author: &str, content: &str) -> String {
        let mut inner = self.inner.lock().unwrap();
        let id = inner.next_id();
        let created_at = inner.stamp();
        inner.posts.push(Post {
            id: id.clone(),
            user_id: author.to_string(),
            content: content.to_string(),
            image_url: None,
            likes_count: 0,
            comments_count: 0,
            created_at,
        });
        id
    }

    pub fn connections(&self) -> Vec<Connection> {
        self.inner.lock().unwrap().connections.clone()
    }

    pub fn posts(&self) -> Vec<Post> {
        self.inner.lock().unwrap().posts.clone()
    }

    pub fn likes(&self) -> Vec<Like> {
        self.inner.lock().unwrap().likes.clone()
    }

    fn read_guard(&self) -> Result<(), StoreError> {
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(StoreError::Network("injected read failure".to_string()));
        }
        Ok(())
    }

    fn author_of(inner: &Inner, user_id: &str) -> Option<Profile> {
        inner.profiles.iter().find(|p| p.id == user_id).cloned()
    }
}

impl RelationshipStore for MemoryStore {
    async fn profiles_except(&self, user_id: &str) -> Result<Vec<Profile>, StoreError> {
        self.read_guard()?;
        let inner = self.inner.lock().unwrap();
        Ok(inner
            .profiles
            .iter()
            .filter(|p| p.id != user_id)
            .cloned()
            .collect())
    }

    async fn profile_by_id(&self, user_id: &str) -> Result<Option<Profile>, StoreError> {
        self.read_guard()?;
        let inner = self.inner.lock().unwrap();
        Ok(Self::author_of(&inner, user_id))
    }

    async fn profiles_by_ids(&self, ids: &[String]) -> Result<Vec<Profile>, StoreError> {
        self.read_guard()?;
        self.profile_lookups.fetch_add(1, Ordering::SeqCst);
        let inner = self.inner.lock().unwrap();
        Ok(inner
            .profiles
            .iter()
            .filter(|p| ids.contains(&p.id))
            .cloned()
            .collect())
    }

    async fn update_profile(
        &self,
        user_id: &str,
        changes: &ProfileChanges,
    ) -> Result<(), StoreError> {
        let mut inner = self.inner.lock().unwrap();
        if let Some(profile) = inner.profiles.iter_mut().find(|p| p.id == user_id) {
            if let Some(full_name) = &changes.full_name {
                profile.full_name = full_name.clone();
            }
            if changes.headline.is_some() {
                profile.headline = changes.headline.clone();
            }
            if changes.location.is_some() {
                profile.location = changes.location.clone();
            }
            if changes.about.is_some() {
                profile.about = changes.about.clone();
            }
            if changes.avatar_url.is_some() {
                profile.avatar_url = changes.avatar_url.clone();
            }
            if changes.banner_url.is_some() {
                profile.banner_url = changes.banner_url.clone();
            }
        }
        Ok(())
    }

    async fn connections_from(
        &self,
        user_id: &str,
        status: Option<ConnectionStatus>,
    ) -> Result<Vec<Connection>, StoreError> {
        self.read_guard()?;
        let inner = self.inner.lock().unwrap();
        Ok(inner
            .connections
            .iter()
            .filter(|c| c.user_id == user_id)
            .filter(|c| status.is_none_or(|s| c.status == s))
            .cloned()
            .collect())
    }

    async fn incoming_requests(&self, user_id: &str) -> Result<Vec<ConnectionRequest>, StoreError> {
        self.read_guard()?;
        let inner = self.inner.lock().unwrap();
        Ok(inner
            .connections
            .iter()
            .filter(|c| c.connected_user_id == user_id && c.status == ConnectionStatus::Pending)
            .map(|c| ConnectionRequest {
                connection: c.clone(),
                requester: Self::author_of(&inner, &c.user_id),
            })
            .collect())
    }

    async fn insert_connection(
        &self,
        user_id: &str,
        connected_user_id: &str,
        status: ConnectionStatus,
    ) -> Result<(), StoreError> {
        self.add_connection(user_id, connected_user_id, status);
        Ok(())
    }

    async fn set_connection_status(
        &self,
        connection_id: &str,
        status: ConnectionStatus,
    ) -> Result<(), StoreError> {
        let mut inner = self.inner.lock().unwrap();
        let connection = inner
            .connections
            .iter_mut()
            .find(|c| c.id == connection_id)
            .ok_or(StoreError::NotFound)?;
        connection.status = status;
        Ok(())
    }

    async fn accept_connection(
        &self,
        connection_id: &str,
        requester_id: &str,
        user_id: &str,
    ) -> Result<(), StoreError> {
        if self.fail_accept.load(Ordering::SeqCst) {
            return Err(StoreError::Network("injected accept failure".to_string()));
        }

        let mut inner = self.inner.lock().unwrap();

        // Validate before mutating anything: both writes or neither.
        inner
            .connections
            .iter()
            .find(|c| c.id == connection_id)
            .ok_or(StoreError::NotFound)?;

        let id = inner.next_id();
        let created_at = inner.stamp();
        if let Some(connection) = inner.connections.iter_mut().find(|c| c.id == connection_id) {
            connection.status = ConnectionStatus::Accepted;
        }
        inner.connections.push(Connection {
            id,
            user_id: user_id.to_string(),
            connected_user_id: requester_id.to_string(),
            status: ConnectionStatus::Accepted,
            created_at,
        });
        Ok(())
    }

    async fn feed_posts(&self) -> Result<Vec<FeedPost>, StoreError> {
        self.read_guard()?;
        let inner = self.inner.lock().unwrap();
        let mut posts: Vec<FeedPost> = inner
            .posts
            .iter()
            .map(|p| FeedPost {
                post: p.clone(),
                author: Self::author_of(&inner, &p.user_id),
                liked_by_viewer: false,
            })
            .collect();
        posts.sort_by(|a, b| b.post.created_at.cmp(&a.post.created_at));
        Ok(posts)
    }

    async fn post_by_id(&self, post_id: &str) -> Result<Post, StoreError> {
        self.read_guard()?;
        let inner = self.inner.lock().unwrap();
        inner
            .posts
            .iter()
            .find(|p| p.id == post_id)
            .cloned()
            .ok_or(StoreError::NotFound)
    }

    async fn insert_post(
        &self,
        user_id: &str,
        content: &str,
        image_url: Option<&str>,
    ) -> Result<(), StoreError> {
        let id = self.add_post(user_id, content);
        if let Some(image_url) = image_url {
            let mut inner = self.inner.lock().unwrap();
            if let Some(post) = inner.posts.iter_mut().find(|p| p.id == id) {
                post.image_url = Some(image_url.to_string());
            }
        }
        Ok(())
    }

    async fn comments_for(&self, post_id: &str) -> Result<Vec<PostComment>, StoreError> {
        self.read_guard()?;
        let inner = self.inner.lock().unwrap();
        let mut thread: Vec<PostComment> = inner
            .comments
            .iter()
            .filter(|c| c.post_id == post_id)
            .map(|c| PostComment {
                comment: c.clone(),
                author: Self::author_of(&inner, &c.user_id),
            })
            .collect();
        thread.sort_by(|a, b| a.comment.created_at.cmp(&b.comment.created_at));
        Ok(thread)
    }

    async fn insert_comment(
        &self,
        user_id: &str,
        post_id: &str,
        content: &str,
    ) -> Result<(), StoreError> {
        let mut inner = self.inner.lock().unwrap();
        let id = inner.next_id();
        let created_at = inner.stamp();
        inner.comments.push(Comment {
            id,
            user_id: user_id.to_string(),
            post_id: post_id.to_string(),
            content: content.to_string(),
            created_at,
        });
        if let Some(post) = inner.posts.iter_mut().find(|p| p.id == post_id) {
            post.comments_count += 1;
        }
        Ok(())
    }

    async fn likes_by(&self, user_id: &str) -> Result<Vec<Like>, StoreError> {
        self.read_guard()?;
        let inner = self.inner.lock().unwrap();
        Ok(inner
            .likes
            .iter()
            .filter(|l| l.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn insert_like(&self, user_id: &str, post_id: &str) -> Result<(), StoreError> {
        let mut inner = self.inner.lock().unwrap();
        inner.likes.push(Like {
            user_id: user_id.to_string(),
            post_id: post_id.to_string(),
        });
        if let Some(post) = inner.posts.iter_mut().find(|p| p.id == post_id) {
            post.likes_count += 1;
        }
        Ok(())
    }

    async fn delete_like(&self, user_id: &str, post_id: &str) -> Result<(), StoreError> {
        let mut inner = self.inner.lock().unwrap();
        let before = inner.likes.len();
        inner
            .likes
            .retain(|l| !(l.user_id == user_id && l.post_id == post_id));
        let removed = (before - inner.likes.len()) as i64;
        if let Some(post) = inner.posts.iter_mut().find(|p| p.id == post_id) {
            post.likes_count -= removed;
        }
        Ok(())
    }
}
