// SPDX-License-Identifier: MPL-2.0

//! Feed view: posts newest-first with author join, like toggling, and
//! lazily loaded comment threads.

use crate::store::{FeedPost, PostComment, RelationshipStore, Session, StoreError};
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use tracing::warn;

pub struct FeedController<S> {
    store: Arc<S>,
    session: Session,
    pub posts: Vec<FeedPost>,
    /// Comment threads keyed by post id, filled on first expansion.
    pub comments: HashMap<String, Vec<PostComment>>,
    /// Posts whose comment thread is currently shown.
    pub expanded: HashSet<String>,
    pub loading: bool,
}

impl<S: RelationshipStore> FeedController<S> {
    pub fn new(store: Arc<S>, session: Session) -> Self {
        Self {
            store,
            session,
            posts: Vec::new(),
            comments: HashMap::new(),
            expanded: HashSet::new(),
            loading: false,
        }
    }

    /// Reload the whole feed and the viewer's like edges. Failures are
    /// logged and the previous feed is kept; the loading flag clears on
    /// every path.
    pub async fn refresh(&mut self) {
        self.loading = true;
        if let Err(e) = self.try_refresh().await {
            warn!("failed to load feed: {e}");
        }
        self.loading = false;
    }

    /// Publish a post. Whitespace-only content never reaches the store.
    pub async fn create_post(&mut self, content: &str) {
        let content = content.trim();
        if content.is_empty() {
            return;
        }

        self.loading = true;
        if let Err(e) = self.try_create_post(content).await {
            warn!("failed to create post: {e}");
        }
        self.loading = false;
    }

    /// Like or un-like depending on the viewer's current state, then adopt
    /// the store's counters for the affected row. The local flag only
    /// flips once the mutation has gone through.
    pub async fn toggle_like(&mut self, post_id: &str) {
        if let Err(e) = self.try_toggle_like(post_id).await {
            warn!("failed to toggle like: {e}");
        }
    }

    /// Show or hide a post's comment thread. The first expansion loads the
    /// thread; a load failure still expands, showing an empty thread until
    /// the next attempt.
    pub async fn toggle_comments(&mut self, post_id: &str) {
        if !self.expanded.contains(post_id) && !self.comments.contains_key(post_id) {
            if let Err(e) = self.load_comments(post_id).await {
                warn!("failed to load comments: {e}");
            }
        }

        if !self.expanded.remove(post_id) {
            self.expanded.insert(post_id.to_string());
        }
    }

    /// Comment on a post, then reload that thread and the post's counters.
    /// Whitespace-only content never reaches the store.
    pub async fn add_comment(&mut self, post_id: &str, content: &str) {
        let content = content.trim();
        if content.is_empty() {
            return;
        }

        if let Err(e) = self.try_add_comment(post_id, content).await {
            warn!("failed to add comment: {e}");
        }
    }

    pub fn comments_of(&self, post_id: &str) -> &[PostComment] {
        self.comments.get(post_id).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn is_expanded(&self, post_id: &str) -> bool {
        self.expanded.contains(post_id)
    }

    async fn try_create_post(&mut self, content: &str) -> Result<(), StoreError> {
        self.store
            .insert_post(&self.session.user_id, content, None)
            .await?;
        self.try_refresh().await
    }

    async fn try_add_comment(&mut self, post_id: &str, content: &str) -> Result<(), StoreError> {
        self.store
            .insert_comment(&self.session.user_id, post_id, content)
            .await?;
        self.load_comments(post_id).await?;
        self.reconcile_post(post_id).await
    }

    async fn try_refresh(&mut self) -> Result<(), StoreError> {
        let mut posts = self.store.feed_posts().await?;
        let likes = self.store.likes_by(&self.session.user_id).await?;
        let liked: HashSet<&str> = likes.iter().map(|l| l.post_id.as_str()).collect();

        for post in &mut posts {
            post.liked_by_viewer = liked.contains(post.post.id.as_str());
        }
        self.posts = posts;
        Ok(())
    }

    async fn try_toggle_like(&mut self, post_id: &str) -> Result<(), StoreError> {
        let liked = self
            .posts
            .iter()
            .find(|p| p.post.id == post_id)
            .map(|p| p.liked_by_viewer)
            .unwrap_or(false);

        if liked {
            self.store.delete_like(&self.session.user_id, post_id).await?;
        } else {
            self.store.insert_like(&self.session.user_id, post_id).await?;
        }

        if let Some(post) = self.posts.iter_mut().find(|p| p.post.id == post_id) {
            post.liked_by_viewer = !liked;
        }
        self.reconcile_post(post_id).await
    }

    async fn load_comments(&mut self, post_id: &str) -> Result<(), StoreError> {
        let thread = self.store.comments_for(post_id).await?;
        self.comments.insert(post_id.to_string(), thread);
        Ok(())
    }

    /// Re-fetch one post row and adopt its denormalized counters, instead
    /// of incrementing local copies that drift from store truth.
    async fn reconcile_post(&mut self, post_id: &str) -> Result<(), StoreError> {
        let fresh = self.store.post_by_id(post_id).await?;
        if let Some(post) = self.posts.iter_mut().find(|p| p.post.id == post_id) {
            post.post.likes_count = fresh.likes_count;
            post.post.comments_count = fresh.comments_count;
        }
        Ok(())
    }
}
