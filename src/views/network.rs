// SPDX-License-Identifier: MPL-2.0

//! Network view: connection suggestions, accepted connections, and
//! incoming requests, derived fresh from the store after every mutation.

use crate::store::{
    Connection, ConnectionRequest, ConnectionStatus, Profile, RelationshipStore, Session,
    StoreError,
};
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{debug, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NetworkTab {
    #[default]
    Suggestions,
    Connections,
    Requests,
}

pub struct NetworkController<S> {
    store: Arc<S>,
    session: Session,
    pub tab: NetworkTab,
    pub suggestions: Vec<Profile>,
    pub connections: Vec<Profile>,
    pub requests: Vec<ConnectionRequest>,
    pub loading: bool,
    pub action_loading: bool,
}

impl<S: RelationshipStore> NetworkController<S> {
    pub fn new(store: Arc<S>, session: Session) -> Self {
        Self {
            store,
            session,
            tab: NetworkTab::default(),
            suggestions: Vec::new(),
            connections: Vec::new(),
            requests: Vec::new(),
            loading: false,
            action_loading: false,
        }
    }

    /// Switch tabs and reload that tab's collection.
    pub async fn select_tab(&mut self, tab: NetworkTab) {
        self.tab = tab;
        self.refresh().await;
    }

    /// Reload the active tab. Store failures are logged and the previous
    /// collection is kept; the loading flag clears on every path.
    pub async fn refresh(&mut self) {
        self.loading = true;
        let result = match self.tab {
            NetworkTab::Suggestions => self.load_suggestions().await,
            NetworkTab::Connections => self.load_connections().await,
            NetworkTab::Requests => self.load_requests().await,
        };
        if let Err(e) = result {
            warn!("failed to load network view: {e}");
        }
        self.loading = false;
    }

    /// Badge count for the navigation bar.
    pub fn pending_count(&self) -> usize {
        self.requests.len()
    }

    /// Send a connection request. An existing edge toward the target, in
    /// any status, makes this a no-op rather than a duplicate row.
    pub async fn connect(&mut self, target_id: &str) {
        self.action_loading = true;
        if let Err(e) = self.try_connect(target_id).await {
            warn!("failed to send connection request: {e}");
        }
        self.action_loading = false;
    }

    /// Accept an incoming request. The store performs the status flip and
    /// the reciprocal edge insert as one transaction, so a mutual
    /// relationship is always two accepted rows or none.
    pub async fn accept(&mut self, connection_id: &str, requester_id: &str) {
        self.action_loading = true;
        if let Err(e) = self.try_accept(connection_id, requester_id).await {
            warn!("failed to accept connection request: {e}");
        }
        self.action_loading = false;
    }

    /// Decline an incoming request. The edge stays in storage as rejected
    /// and drops out of the requests view by status filter.
    pub async fn reject(&mut self, connection_id: &str) {
        self.action_loading = true;
        if let Err(e) = self.try_reject(connection_id).await {
            warn!("failed to reject connection request: {e}");
        }
        self.action_loading = false;
    }

    async fn load_suggestions(&mut self) -> Result<(), StoreError> {
        let profiles = self.store.profiles_except(&self.session.user_id).await?;
        let edges = self.store.connections_from(&self.session.user_id, None).await?;
        self.suggestions = filter_suggestions(profiles, &connected_ids(&edges));
        Ok(())
    }

    async fn load_connections(&mut self) -> Result<(), StoreError> {
        let edges = self
            .store
            .connections_from(&self.session.user_id, Some(ConnectionStatus::Accepted))
            .await?;
        let ids: Vec<String> = edges.into_iter().map(|e| e.connected_user_id).collect();

        // Nothing accepted means nothing to look up.
        self.connections = if ids.is_empty() {
            Vec::new()
        } else {
            self.store.profiles_by_ids(&ids).await?
        };
        Ok(())
    }

    async fn load_requests(&mut self) -> Result<(), StoreError> {
        self.requests = self.store.incoming_requests(&self.session.user_id).await?;
        Ok(())
    }

    async fn try_connect(&mut self, target_id: &str) -> Result<(), StoreError> {
        let edges = self.store.connections_from(&self.session.user_id, None).await?;
        if edges.iter().any(|e| e.connected_user_id == target_id) {
            debug!("edge toward {target_id} already exists, skipping insert");
        } else {
            self.store
                .insert_connection(&self.session.user_id, target_id, ConnectionStatus::Pending)
                .await?;
        }
        self.load_suggestions().await
    }

    async fn try_accept(
        &mut self,
        connection_id: &str,
        requester_id: &str,
    ) -> Result<(), StoreError> {
        self.store
            .accept_connection(connection_id, requester_id, &self.session.user_id)
            .await?;
        self.load_requests().await
    }

    async fn try_reject(&mut self, connection_id: &str) -> Result<(), StoreError> {
        self.store
            .set_connection_status(connection_id, ConnectionStatus::Rejected)
            .await?;
        self.load_requests().await
    }
}

fn connected_ids(edges: &[Connection]) -> HashSet<String> {
    edges.iter().map(|e| e.connected_user_id.clone()).collect()
}

/// Keep the profiles with no edge from the current user. Status does not
/// matter: pending, accepted, and rejected edges all suppress the profile.
fn filter_suggestions(profiles: Vec<Profile>, connected: &HashSet<String>) -> Vec<Profile> {
    profiles
        .into_iter()
        .filter(|p| !connected.contains(&p.id))
        .collect()
}
