// SPDX-License-Identifier: MPL-2.0

//! REST client for the hosted backend.
//!
//! Wraps the service's auth and table endpoints so the rest of the crate
//! only sees our own types. One instance is shared by all controllers; the
//! access token lives behind a lock so sign-in can happen after
//! construction.

use crate::config::{ACCEPT_PROCEDURE, AUTH_PATH, REST_PATH};
use crate::store::postgrest::Query;
use crate::store::types::{
    Connection, ConnectionRequest, ConnectionStatus, FeedPost, Like, Post, PostComment, Profile,
    ProfileChanges, Session,
};
use crate::store::RelationshipStore;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::sync::RwLock;
use thiserror::Error;
use url::Url;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("invalid service URL: {0}")]
    BadUrl(String),
    #[error("authentication failed: {0}")]
    Auth(String),
    #[error("network error: {0}")]
    Network(String),
    #[error("store rejected request: {status} {message}")]
    Api { status: u16, message: String },
    #[error("invalid response: {0}")]
    InvalidResponse(String),
    #[error("not authenticated")]
    NotAuthenticated,
    #[error("row not found")]
    NotFound,
}

/// Shape of the auth endpoint's password-grant response.
#[derive(Deserialize)]
struct TokenResponse {
    access_token: String,
    refresh_token: String,
    user: TokenUser,
}

#[derive(Deserialize)]
struct TokenUser {
    id: String,
    email: Option<String>,
}

pub struct HttpStore {
    http: reqwest::Client,
    base: Url,
    api_key: String,
    access_token: RwLock<Option<String>>,
}

impl HttpStore {
    /// `service_url` is the deployment's base URL; `api_key` the public
    /// key every request carries alongside the per-user bearer token.
    pub fn new(service_url: &str, api_key: &str) -> Result<Self, StoreError> {
        // A trailing slash keeps Url::join from eating the last path segment.
        let normalized = if service_url.ends_with('/') {
            service_url.to_string()
        } else {
            format!("{service_url}/")
        };
        let base = Url::parse(&normalized).map_err(|e| StoreError::BadUrl(e.to_string()))?;

        Ok(Self {
            http: reqwest::Client::new(),
            base,
            api_key: api_key.to_string(),
            access_token: RwLock::new(None),
        })
    }

    /// Password sign-in against the auth endpoint. On success the returned
    /// session is also adopted for subsequent requests.
    pub async fn sign_in(&self, email: &str, password: &str) -> Result<Session, StoreError> {
        let mut url = self
            .base
            .join(&format!("{AUTH_PATH}/token"))
            .map_err(|e| StoreError::BadUrl(e.to_string()))?;
        url.query_pairs_mut().append_pair("grant_type", "password");

        let response = self
            .http
            .post(url)
            .header("apikey", &self.api_key)
            .json(&serde_json::json!({ "email": email, "password": password }))
            .send()
            .await
            .map_err(|e| StoreError::Network(e.to_string()))?;

        if !response.status().is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(StoreError::Auth(message));
        }

        let token: TokenResponse = response
            .json()
            .await
            .map_err(|e| StoreError::InvalidResponse(e.to_string()))?;

        let session = Session {
            user_id: token.user.id,
            email: token.user.email.unwrap_or_default(),
            access_token: token.access_token,
            refresh_token: token.refresh_token,
        };

        *self.access_token.write().unwrap() = Some(session.access_token.clone());
        Ok(session)
    }

    /// Adopt a session obtained elsewhere (a persisted token, a test).
    pub fn resume_session(&self, session: &Session) {
        *self.access_token.write().unwrap() = Some(session.access_token.clone());
    }

    /// Revoke the token server-side and drop it locally. The local drop
    /// happens even if the revocation round trip fails.
    pub async fn sign_out(&self) -> Result<(), StoreError> {
        let token = self.bearer()?;
        *self.access_token.write().unwrap() = None;

        let url = self
            .base
            .join(&format!("{AUTH_PATH}/logout"))
            .map_err(|e| StoreError::BadUrl(e.to_string()))?;

        let response = self
            .http
            .post(url)
            .header("apikey", &self.api_key)
            .bearer_auth(token)
            .send()
            .await
            .map_err(|e| StoreError::Network(e.to_string()))?;

        check_status(response).await.map(|_| ())
    }

    pub fn is_authenticated(&self) -> bool {
        self.access_token.read().unwrap().is_some()
    }

    fn bearer(&self) -> Result<String, StoreError> {
        self.access_token
            .read()
            .unwrap()
            .clone()
            .ok_or(StoreError::NotAuthenticated)
    }

    fn table_url(&self, table: &str) -> Result<Url, StoreError> {
        self.base
            .join(&format!("{REST_PATH}/{table}"))
            .map_err(|e| StoreError::BadUrl(e.to_string()))
    }

    async fn select_rows<T: DeserializeOwned>(
        &self,
        table: &str,
        query: Query,
    ) -> Result<Vec<T>, StoreError> {
        let mut url = self.table_url(table)?;
        query.apply(&mut url);

        let response = self
            .http
            .get(url)
            .header("apikey", &self.api_key)
            .bearer_auth(self.bearer()?)
            .send()
            .await
            .map_err(|e| StoreError::Network(e.to_string()))?;

        check_status(response)
            .await?
            .json::<Vec<T>>()
            .await
            .map_err(|e| StoreError::InvalidResponse(e.to_string()))
    }

    async fn insert_row<B: Serialize>(&self, table: &str, row: &B) -> Result<(), StoreError> {
        let url = self.table_url(table)?;

        let response = self
            .http
            .post(url)
            .header("apikey", &self.api_key)
            .header("Prefer", "return=minimal")
            .bearer_auth(self.bearer()?)
            .json(row)
            .send()
            .await
            .map_err(|e| StoreError::Network(e.to_string()))?;

        check_status(response).await.map(|_| ())
    }

    async fn update_rows<B: Serialize>(
        &self,
        table: &str,
        patch: &B,
        query: Query,
    ) -> Result<(), StoreError> {
        let mut url = self.table_url(table)?;
        query.apply(&mut url);

        let response = self
            .http
            .patch(url)
            .header("apikey", &self.api_key)
            .header("Prefer", "return=minimal")
            .bearer_auth(self.bearer()?)
            .json(patch)
            .send()
            .await
            .map_err(|e| StoreError::Network(e.to_string()))?;

        check_status(response).await.map(|_| ())
    }

    async fn delete_rows(&self, table: &str, query: Query) -> Result<(), StoreError> {
        let mut url = self.table_url(table)?;
        query.apply(&mut url);

        let response = self
            .http
            .delete(url)
            .header("apikey", &self.api_key)
            .bearer_auth(self.bearer()?)
            .send()
            .await
            .map_err(|e| StoreError::Network(e.to_string()))?;

        check_status(response).await.map(|_| ())
    }

    /// Invoke a stored procedure. The service runs the body in a single
    /// transaction, which is what the accept operation relies on.
    async fn rpc(&self, procedure: &str, args: serde_json::Value) -> Result<(), StoreError> {
        let url = self
            .base
            .join(&format!("{REST_PATH}/rpc/{procedure}"))
            .map_err(|e| StoreError::BadUrl(e.to_string()))?;

        let response = self
            .http
            .post(url)
            .header("apikey", &self.api_key)
            .bearer_auth(self.bearer()?)
            .json(&args)
            .send()
            .await
            .map_err(|e| StoreError::Network(e.to_string()))?;

        check_status(response).await.map(|_| ())
    }
}

async fn check_status(response: reqwest::Response) -> Result<reqwest::Response, StoreError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    if status == StatusCode::UNAUTHORIZED {
        return Err(StoreError::NotAuthenticated);
    }
    let message = response.text().await.unwrap_or_default();
    Err(StoreError::Api {
        status: status.as_u16(),
        message,
    })
}

impl RelationshipStore for HttpStore {
    async fn profiles_except(&self, user_id: &str) -> Result<Vec<Profile>, StoreError> {
        self.select_rows("profiles", Query::new().select("*").neq("id", user_id))
            .await
    }

    async fn profile_by_id(&self, user_id: &str) -> Result<Option<Profile>, StoreError> {
        let rows: Vec<Profile> = self
            .select_rows("profiles", Query::new().select("*").eq("id", user_id))
            .await?;
        Ok(rows.into_iter().next())
    }

    async fn profiles_by_ids(&self, ids: &[String]) -> Result<Vec<Profile>, StoreError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        self.select_rows("profiles", Query::new().select("*").in_any("id", ids))
            .await
    }

    async fn update_profile(
        &self,
        user_id: &str,
        changes: &ProfileChanges,
    ) -> Result<(), StoreError> {
        self.update_rows("profiles", changes, Query::new().eq("id", user_id))
            .await
    }

    async fn connections_from(
        &self,
        user_id: &str,
        status: Option<ConnectionStatus>,
    ) -> Result<Vec<Connection>, StoreError> {
        let mut query = Query::new().select("*").eq("user_id", user_id);
        if let Some(status) = status {
            query = query.eq("status", status.as_str());
        }
        self.select_rows("connections", query).await
    }

    async fn incoming_requests(&self, user_id: &str) -> Result<Vec<ConnectionRequest>, StoreError> {
        self.select_rows(
            "connections",
            Query::new()
                .select("*,profiles(*)")
                .eq("connected_user_id", user_id)
                .eq("status", ConnectionStatus::Pending.as_str()),
        )
        .await
    }

    async fn insert_connection(
        &self,
        user_id: &str,
        connected_user_id: &str,
        status: ConnectionStatus,
    ) -> Result<(), StoreError> {
        self.insert_row(
            "connections",
            &serde_json::json!({
                "user_id": user_id,
                "connected_user_id": connected_user_id,
                "status": status,
            }),
        )
        .await
    }

    async fn set_connection_status(
        &self,
        connection_id: &str,
        status: ConnectionStatus,
    ) -> Result<(), StoreError> {
        self.update_rows(
            "connections",
            &serde_json::json!({ "status": status }),
            Query::new().eq("id", connection_id),
        )
        .await
    }

    async fn accept_connection(
        &self,
        connection_id: &str,
        requester_id: &str,
        user_id: &str,
    ) -> Result<(), StoreError> {
        self.rpc(
            ACCEPT_PROCEDURE,
            serde_json::json!({
                "connection_id": connection_id,
                "requester_id": requester_id,
                "user_id": user_id,
            }),
        )
        .await
    }

    async fn feed_posts(&self) -> Result<Vec<FeedPost>, StoreError> {
        self.select_rows(
            "posts",
            Query::new().select("*,profiles(*)").order("created_at", true),
        )
        .await
    }

    async fn post_by_id(&self, post_id: &str) -> Result<Post, StoreError> {
        let rows: Vec<Post> = self
            .select_rows("posts", Query::new().select("*").eq("id", post_id))
            .await?;
        rows.into_iter().next().ok_or(StoreError::NotFound)
    }

    async fn insert_post(
        &self,
        user_id: &str,
        content: &str,
        image_url: Option<&str>,
    ) -> Result<(), StoreError> {
        self.insert_row(
            "posts",
            &serde_json::json!({
                "user_id": user_id,
                "content": content,
                "image_url": image_url.unwrap_or(""),
            }),
        )
        .await
    }

    async fn comments_for(&self, post_id: &str) -> Result<Vec<PostComment>, StoreError> {
        self.select_rows(
            "comments",
            Query::new()
                .select("*,profiles(*)")
                .eq("post_id", post_id)
                .order("created_at", false),
        )
        .await
    }

    async fn insert_comment(
        &self,
        user_id: &str,
        post_id: &str,
        content: &str,
    ) -> Result<(), StoreError> {
        self.insert_row(
            "comments",
            &serde_json::json!({
                "user_id": user_id,
                "post_id": post_id,
                "content": content,
            }),
        )
        .await
    }

    async fn likes_by(&self, user_id: &str) -> Result<Vec<Like>, StoreError> {
        self.select_rows("likes", Query::new().select("*").eq("user_id", user_id))
            .await
    }

    async fn insert_like(&self, user_id: &str, post_id: &str) -> Result<(), StoreError> {
        self.insert_row(
            "likes",
            &serde_json::json!({ "user_id": user_id, "post_id": post_id }),
        )
        .await
    }

    async fn delete_like(&self, user_id: &str, post_id: &str) -> Result<(), StoreError> {
        self.delete_rows(
            "likes",
            Query::new().eq("user_id", user_id).eq("post_id", post_id),
        )
        .await
    }
}
